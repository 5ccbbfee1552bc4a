use approx::assert_relative_eq;
use treemap_rs::api::{TreemapChart, TreemapChartConfig, TreemapSnapshot};
use treemap_rs::core::{RawNode, Viewport};
use treemap_rs::dataset::parse_dataset;
use treemap_rs::render::{NullRenderer, Renderer, SvgRenderer};
use treemap_rs::TreemapError;

fn fixture() -> RawNode {
    parse_dataset(include_str!("fixtures/movies_small.json")).expect("fixture")
}

#[test]
fn fixture_builds_one_tile_per_leaf_and_one_legend_row_per_group() {
    let mut chart = TreemapChart::new(NullRenderer::default(), TreemapChartConfig::default(), &fixture())
        .expect("chart init");

    assert_eq!(chart.tiles().len(), 6);
    assert_eq!(chart.legend_entries().len(), 3);

    let root = chart.hierarchy().root();
    assert_relative_eq!(chart.hierarchy().node(root).value, 2_900_700_353.0);

    let covered = chart.treemap_frame().tile_area();
    let canvas = 960.0 * 570.0;
    assert!(covered < canvas);
    assert!(covered > 0.95 * canvas, "covered={covered}");

    chart.render().expect("render");
    let renderer = chart.renderer();
    assert_eq!(renderer.frames_rendered, 2);
    assert_eq!(renderer.last_tile_count, 6);
    assert_eq!(renderer.last_legend_item_count, 3);
}

#[test]
fn invalid_viewport_is_rejected_before_layout() {
    let config = TreemapChartConfig::new(Viewport::new(0, 570));
    let result = TreemapChart::new(NullRenderer::default(), config, &fixture());
    assert!(matches!(result, Err(TreemapError::InvalidViewport { .. })));
}

#[test]
fn html_page_carries_heading_svgs_and_hidden_tooltip() {
    let mut chart = TreemapChart::new(SvgRenderer::new(), TreemapChartConfig::default(), &fixture())
        .expect("chart init");
    let page = chart.to_html_page().expect("page");

    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains(r#"<div id="app">"#));
    assert!(page.contains(r#"<h1 id="title">Movie Sales</h1>"#));
    assert!(page.contains(r#"<p id="description">Highest-grossing films grouped by genre</p>"#));
    assert_eq!(page.matches(r#"class="tile""#).count(), 6);
    assert_eq!(page.matches(r#"class="legend-item""#).count(), 3);
    assert!(page.contains(r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" id="legend""#));
    assert!(page.contains("visibility: hidden"));
}

#[test]
fn html_page_reflects_tooltip_after_pointer_move() {
    let mut chart = TreemapChart::new(SvgRenderer::new(), TreemapChartConfig::default(), &fixture())
        .expect("chart init");
    chart.hover_enter(1).expect("enter");
    chart.pointer_move(1, 100.0, 200.0).expect("move");

    let page = chart.to_html_page().expect("page");
    assert!(page.contains("visibility: visible; left: 120px; top: 130px"));
    assert!(page.contains(r#"data-value="292576195""#));
    assert!(page.contains("Inception<br>$292,576,195</div>"));
}

#[test]
fn snapshot_contract_round_trips_through_json() {
    let chart = TreemapChart::new(NullRenderer::default(), TreemapChartConfig::default(), &fixture())
        .expect("chart init");
    let json = chart.snapshot_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains("\"schema_version\": 1"));

    let restored = TreemapSnapshot::from_json_compat_str(&json).expect("parse");
    let original = chart.snapshot();
    assert_eq!(restored.tiles.len(), original.tiles.len());
    assert_eq!(restored.legend, original.legend);
    for (restored_tile, tile) in restored.tiles.iter().zip(&original.tiles) {
        assert_eq!(restored_tile.id, tile.id);
        assert_eq!(restored_tile.fill, tile.fill);
        assert_relative_eq!(restored_tile.rect.x0, tile.rect.x0, epsilon = 1e-9);
        assert_relative_eq!(restored_tile.rect.y1, tile.rect.y1, epsilon = 1e-9);
    }

    let bare = serde_json::to_string(&original).expect("bare snapshot");
    let from_bare = TreemapSnapshot::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(from_bare.tiles.len(), 6);
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let chart = TreemapChart::new(NullRenderer::default(), TreemapChartConfig::default(), &fixture())
        .expect("chart init");
    let json = chart
        .snapshot_json_contract_v1_pretty()
        .expect("serialize")
        .replace("\"schema_version\": 1", "\"schema_version\": 7");
    assert!(TreemapSnapshot::from_json_compat_str(&json).is_err());
}

#[test]
fn renderer_trait_is_usable_as_a_generic_bound() {
    fn render_twice<R: Renderer>(chart: &mut TreemapChart<R>) {
        chart.render().expect("first");
        chart.render().expect("second");
    }
    let mut chart = TreemapChart::new(NullRenderer::default(), TreemapChartConfig::default(), &fixture())
        .expect("chart init");
    render_twice(&mut chart);
    assert_eq!(chart.into_renderer().frames_rendered, 4);
}
