use approx::assert_relative_eq;
use treemap_rs::core::{Hierarchy, RawNode, TileRect, TilingMethod, TreemapLayout, Viewport};
use treemap_rs::dataset::parse_dataset;

fn laid_out(raw: &RawNode, viewport: Viewport, padding: f64) -> Hierarchy {
    let mut hierarchy = Hierarchy::from_raw(raw);
    TreemapLayout::new(viewport)
        .with_padding(padding)
        .apply(&mut hierarchy)
        .expect("layout should succeed");
    hierarchy
}

#[test]
fn two_children_split_area_three_to_one_without_padding() {
    let raw = RawNode::branch(
        "Root",
        vec![
            RawNode::leaf("big", "A", 750.0),
            RawNode::leaf("small", "B", 250.0),
        ],
    );
    let hierarchy = laid_out(&raw, Viewport::new(1000, 500), 0.0);
    let leaves = hierarchy.leaves();
    let big = hierarchy.node(leaves[0]).rect.area();
    let small = hierarchy.node(leaves[1]).rect.area();

    assert_relative_eq!(big / small, 3.0, max_relative = 1e-9);
    assert_relative_eq!(big + small, 500_000.0, max_relative = 1e-9);
}

#[test]
fn children_stay_inside_parents_and_siblings_do_not_overlap() {
    let body = include_str!("fixtures/movies_small.json");
    let hierarchy = laid_out(
        &parse_dataset(body).expect("fixture parses"),
        Viewport::new(960, 570),
        1.0,
    );

    for (_, node) in hierarchy.iter() {
        let rect = node.rect;
        assert!(rect.x0 <= rect.x1 && rect.y0 <= rect.y1);
        for child in &node.children {
            let child_rect = hierarchy.node(*child).rect;
            assert!(
                rect.contains_rect(child_rect, 1e-9),
                "{child_rect:?} escapes {rect:?}"
            );
        }
        for (index, a) in node.children.iter().enumerate() {
            for b in &node.children[index + 1..] {
                let overlap = hierarchy
                    .node(*a)
                    .rect
                    .intersection_area(hierarchy.node(*b).rect);
                assert!(overlap <= 1e-9, "siblings overlap by {overlap}");
            }
        }
    }
}

#[test]
fn padding_leaves_a_gap_between_adjacent_tiles() {
    let raw = RawNode::branch(
        "Root",
        vec![RawNode::leaf("a", "A", 1.0), RawNode::leaf("b", "A", 1.0)],
    );
    let hierarchy = laid_out(&raw, Viewport::new(200, 100), 1.0);
    let leaves = hierarchy.leaves();
    let a = hierarchy.node(leaves[0]).rect;
    let b = hierarchy.node(leaves[1]).rect;

    assert_eq!(a, TileRect::new(1.0, 1.0, 99.5, 99.0));
    assert_eq!(b, TileRect::new(100.5, 1.0, 199.0, 99.0));
    assert_relative_eq!(b.x0 - a.x1, 1.0);
}

#[test]
fn zero_value_leaf_degenerates_to_empty_rect() {
    let raw = RawNode::branch(
        "Root",
        vec![
            RawNode::leaf("a", "A", 10.0),
            RawNode::leaf("nothing", "A", 0.0),
        ],
    );
    let hierarchy = laid_out(&raw, Viewport::new(300, 200), 1.0);
    let leaves = hierarchy.leaves();
    let zero = hierarchy.node(leaves[1]).rect;

    assert_eq!(hierarchy.node(leaves[1]).name, "nothing");
    assert_eq!(zero.area(), 0.0);
    assert!(zero.x0 <= zero.x1 && zero.y0 <= zero.y1);
}

#[test]
fn slice_dice_tiling_preserves_proportions() {
    let raw = RawNode::branch(
        "Root",
        vec![
            RawNode::leaf("a", "A", 3.0),
            RawNode::leaf("b", "A", 1.0),
        ],
    );
    let mut hierarchy = Hierarchy::from_raw(&raw);
    TreemapLayout::new(Viewport::new(400, 100))
        .with_tiling(TilingMethod::SliceDice)
        .apply(&mut hierarchy)
        .expect("layout");
    let leaves = hierarchy.leaves();

    assert_eq!(hierarchy.node(leaves[0]).rect, TileRect::new(0.0, 0.0, 300.0, 100.0));
    assert_eq!(hierarchy.node(leaves[1]).rect, TileRect::new(300.0, 0.0, 400.0, 100.0));
}

#[test]
fn invalid_viewport_is_rejected() {
    let mut hierarchy = Hierarchy::from_raw(&RawNode::leaf("a", "A", 1.0));
    let err = TreemapLayout::new(Viewport::new(0, 100)).apply(&mut hierarchy);
    assert!(err.is_err());
}
