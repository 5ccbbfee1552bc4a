use proptest::prelude::*;
use treemap_rs::core::{Hierarchy, RawNode, TreemapLayout, Viewport};

fn arb_tree() -> impl Strategy<Value = RawNode> {
    let groups = prop::collection::vec(prop::collection::vec(0.0f64..1_000_000.0, 1..8), 1..8);
    groups.prop_map(|groups| {
        let children = groups
            .into_iter()
            .enumerate()
            .map(|(group_index, values)| {
                let category = format!("Group{group_index}");
                let leaves = values
                    .into_iter()
                    .enumerate()
                    .map(|(leaf_index, value)| {
                        RawNode::leaf(format!("Leaf{group_index}x{leaf_index}"), &category, value)
                    })
                    .collect();
                RawNode::branch(category.clone(), leaves)
            })
            .collect();
        RawNode::branch("Root", children)
    })
}

proptest! {
    #[test]
    fn branch_values_sum_children_and_children_sorted(raw in arb_tree()) {
        let hierarchy = Hierarchy::from_raw(&raw);
        for (_, node) in hierarchy.iter() {
            if node.is_leaf {
                continue;
            }
            let values: Vec<f64> = node
                .children
                .iter()
                .map(|child| hierarchy.node(*child).value)
                .collect();
            let sum: f64 = values.iter().sum();
            prop_assert!((node.value - sum).abs() <= 1e-6 * sum.max(1.0));
            prop_assert!(values.windows(2).all(|pair| pair[0] >= pair[1]));
        }
    }

    #[test]
    fn laid_out_rects_nest_and_siblings_never_overlap(
        raw in arb_tree(),
        width in 50u32..2_000,
        height in 50u32..2_000,
        padding in 0.0f64..3.0
    ) {
        let mut hierarchy = Hierarchy::from_raw(&raw);
        TreemapLayout::new(Viewport::new(width, height))
            .with_padding(padding)
            .apply(&mut hierarchy)
            .expect("layout");

        for (_, node) in hierarchy.iter() {
            let rect = node.rect;
            prop_assert!(rect.is_finite());
            prop_assert!(rect.x0 <= rect.x1 && rect.y0 <= rect.y1);
            for child in &node.children {
                prop_assert!(rect.contains_rect(hierarchy.node(*child).rect, 1e-6));
            }
            for (index, a) in node.children.iter().enumerate() {
                for b in &node.children[index + 1..] {
                    let overlap = hierarchy.node(*a).rect.intersection_area(hierarchy.node(*b).rect);
                    prop_assert!(overlap <= 1e-6);
                }
            }
        }
    }

    #[test]
    fn unpadded_leaf_areas_are_proportional_to_values(
        raw in arb_tree(),
        width in 100u32..1_500,
        height in 100u32..1_500
    ) {
        let viewport = Viewport::new(width, height);
        let mut hierarchy = Hierarchy::from_raw(&raw);
        TreemapLayout::new(viewport).apply(&mut hierarchy).expect("layout");

        let total = hierarchy.node(hierarchy.root()).value;
        prop_assume!(total > 0.0);
        let canvas = viewport.area();
        for leaf in hierarchy.leaves() {
            let node = hierarchy.node(leaf);
            let expected = canvas * node.value / total;
            prop_assert!((node.rect.area() - expected).abs() <= 1e-6 * canvas);
        }
    }
}
