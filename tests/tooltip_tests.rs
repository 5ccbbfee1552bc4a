use treemap_rs::api::{TreemapChart, TreemapChartConfig};
use treemap_rs::core::RawNode;
use treemap_rs::interaction::TooltipPhase;
use treemap_rs::render::NullRenderer;

fn chart() -> TreemapChart<NullRenderer> {
    let raw = RawNode::branch(
        "Root",
        vec![RawNode::branch(
            "Action",
            vec![RawNode::leaf("Inception", "Action", 825_532_764.0)],
        )],
    );
    TreemapChart::new(NullRenderer::default(), TreemapChartConfig::default(), &raw)
        .expect("chart init")
}

#[test]
fn hover_then_move_produces_exact_overlay_text() {
    let mut chart = chart();
    chart.hover_enter(0).expect("enter");
    assert_eq!(chart.tooltip_phase(), TooltipPhase::Visible);
    assert_eq!(chart.tooltip_state().html(), None);

    chart.pointer_move(0, 300.0, 400.0).expect("move");
    let state = chart.tooltip_state();
    assert_eq!(
        state.html().as_deref(),
        Some("Inception<br>$825,532,764")
    );
    assert_eq!((state.left, state.top), (320.0, 330.0));
    assert_eq!(state.data_value(), Some(825_532_764.0));

    chart.hover_leave();
    assert_eq!(chart.tooltip_phase(), TooltipPhase::Hidden);
    assert_eq!(chart.hovered_tile(), None);
}

#[test]
fn every_move_overwrites_the_previous_position() {
    let mut chart = chart();
    chart.hover_enter(0).expect("enter");
    chart.pointer_move(0, 10.0, 100.0).expect("move");
    chart.pointer_move(0, 50.0, 500.0).expect("move");
    let state = chart.tooltip_state();
    assert_eq!((state.left, state.top), (70.0, 430.0));
}

#[test]
fn out_of_range_tile_is_rejected_without_state_change() {
    let mut chart = chart();
    assert!(chart.hover_enter(3).is_err());
    assert!(chart.pointer_move(3, 0.0, 0.0).is_err());
    assert_eq!(chart.tooltip_phase(), TooltipPhase::Hidden);
}

#[test]
fn raw_pointer_positions_drive_enter_move_and_leave() {
    let raw = RawNode::branch(
        "Root",
        vec![
            RawNode::leaf("Left", "A", 1.0),
            RawNode::leaf("Right", "B", 1.0),
        ],
    );
    let mut chart =
        TreemapChart::new(NullRenderer::default(), TreemapChartConfig::default(), &raw)
            .expect("chart init");

    let left = chart.tiles()[0].rect;
    let right = chart.tiles()[1].rect;

    chart.pointer_move_at(left.x + 5.0, left.y + 5.0);
    assert_eq!(chart.hovered_tile(), Some(0));
    assert_eq!(
        chart.tooltip_state().content.as_ref().map(|c| c.name.as_str()),
        Some("Left")
    );

    chart.pointer_move_at(right.x + 5.0, right.y + 5.0);
    assert_eq!(chart.hovered_tile(), Some(1));
    assert_eq!(chart.tooltip_phase(), TooltipPhase::Visible);
    assert_eq!(
        chart.tooltip_state().content.as_ref().map(|c| c.name.as_str()),
        Some("Right")
    );

    // The padding gap between the two tiles belongs to no tile.
    chart.pointer_move_at(left.x + left.width + 0.5, left.y + 5.0);
    assert_eq!(chart.hovered_tile(), None);
    assert_eq!(chart.tooltip_phase(), TooltipPhase::Hidden);
}
