use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::raw_node::RawNode;
use crate::core::types::TileRect;

/// Index of a node inside a [`Hierarchy`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Weighted node derived from one [`RawNode`].
///
/// `parent` is a non-owning back-reference used for path walks; ownership of
/// the tree flows top-down through `children`.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    pub name: String,
    pub category: Option<String>,
    pub value: f64,
    pub depth: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub is_leaf: bool,
    pub rect: TileRect,
}

/// Arena-backed weighted tree. The root is always the first node.
#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
}

impl Hierarchy {
    /// Builds the weighted tree: values are summed bottom-up and children are
    /// ordered by descending value, ties keeping their input order.
    #[must_use]
    pub fn from_raw(root: &RawNode) -> Self {
        let mut hierarchy = Self {
            nodes: Vec::with_capacity(root.node_count()),
        };
        hierarchy.insert(root, None, 0);
        debug!(
            nodes = hierarchy.nodes.len(),
            leaves = hierarchy.leaf_count(),
            total_value = hierarchy.nodes[0].value,
            "built hierarchy"
        );
        hierarchy
    }

    fn insert(&mut self, raw: &RawNode, parent: Option<NodeId>, depth: usize) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(HierarchyNode {
            name: raw.name.clone(),
            category: raw.category.clone(),
            value: 0.0,
            depth,
            parent,
            children: Vec::new(),
            is_leaf: raw.is_leaf(),
            rect: TileRect::default(),
        });

        let value = match raw.children.as_deref() {
            None => leaf_value(raw),
            Some(children) => {
                if raw.value.is_some() {
                    trace!(name = %raw.name, "ignoring own value on branch node");
                }
                let mut child_ids: Vec<NodeId> = children
                    .iter()
                    .map(|child| self.insert(child, Some(id), depth + 1))
                    .collect();
                child_ids.sort_by(|a, b| {
                    self.nodes[b.index()]
                        .value
                        .total_cmp(&self.nodes[a.index()].value)
                });
                let total = child_ids
                    .iter()
                    .map(|child| self.nodes[child.index()].value)
                    .sum();
                self.nodes[id.index()].children = child_ids;
                total
            }
        };
        self.nodes[id.index()].value = value;
        id
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Returns the node for `id`.
    ///
    /// # Panics
    /// Panics when `id` was not produced by this hierarchy.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &HierarchyNode {
        &self.nodes[id.index()]
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.nodes.get(id.index())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut HierarchyNode {
        &mut self.nodes[id.index()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all nodes in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &HierarchyNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::new(index), node))
    }

    /// Leaves in pre-order over the sorted tree, which is the tile draw order.
    #[must_use]
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.is_leaf {
                leaves.push(id);
            } else {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        leaves
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf).count()
    }

    /// Walks from `id` up to the root, `id` first.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Node names from the root down to `id`.
    #[must_use]
    pub fn path_names(&self, id: NodeId) -> Vec<&str> {
        self.ancestors(id)
            .into_iter()
            .rev()
            .map(|ancestor| self.node(ancestor).name.as_str())
            .collect()
    }

    /// The depth-1 ancestor of `id` (its top-level group). The root and its
    /// direct children map to themselves.
    #[must_use]
    pub fn top_level_ancestor(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while self.node(current).depth > 1 {
            match self.node(current).parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }
}

fn leaf_value(raw: &RawNode) -> f64 {
    match raw.numeric_value() {
        Some(value) if value.is_finite() && value >= 0.0 => value,
        Some(value) => {
            warn!(name = %raw.name, value, "coercing negative or non-finite leaf value to 0");
            0.0
        }
        None => {
            warn!(name = %raw.name, "leaf has no numeric value, using 0");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Hierarchy;
    use crate::core::RawNode;

    fn sample() -> RawNode {
        RawNode::branch(
            "Root",
            vec![
                RawNode::branch(
                    "Drama",
                    vec![
                        RawNode::leaf("Titanic", "Drama", 5.0),
                        RawNode::leaf("Forrest", "Drama", 1.0),
                    ],
                ),
                RawNode::branch(
                    "Action",
                    vec![
                        RawNode::leaf("Avatar", "Action", 7.0),
                        RawNode::leaf("Inception", "Action", 4.0),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn branch_values_sum_children_and_sort_descending() {
        let hierarchy = Hierarchy::from_raw(&sample());
        let root = hierarchy.node(hierarchy.root());
        assert_eq!(root.value, 17.0);
        let first = hierarchy.node(root.children[0]);
        assert_eq!(first.name, "Action");
        assert_eq!(first.value, 11.0);
        assert_eq!(first.depth, 1);
    }

    #[test]
    fn leaves_follow_sorted_preorder() {
        let hierarchy = Hierarchy::from_raw(&sample());
        let names: Vec<&str> = hierarchy
            .leaves()
            .into_iter()
            .map(|id| hierarchy.node(id).name.as_str())
            .collect();
        assert_eq!(names, vec!["Avatar", "Inception", "Titanic", "Forrest"]);
    }

    #[test]
    fn path_and_top_level_ancestor_walk_parents() {
        let hierarchy = Hierarchy::from_raw(&sample());
        let inception = hierarchy.leaves()[1];
        assert_eq!(
            hierarchy.path_names(inception),
            vec!["Root", "Action", "Inception"]
        );
        let group = hierarchy.top_level_ancestor(inception);
        assert_eq!(hierarchy.node(group).name, "Action");
        assert_eq!(hierarchy.top_level_ancestor(hierarchy.root()), hierarchy.root());
    }

    #[test]
    fn missing_leaf_value_counts_as_zero() {
        let mut leaf = RawNode::leaf("Unknown", "Misc", 0.0);
        leaf.value = None;
        let hierarchy = Hierarchy::from_raw(&RawNode::branch("Root", vec![leaf]));
        assert_eq!(hierarchy.node(hierarchy.root()).value, 0.0);
        assert_eq!(hierarchy.leaf_count(), 1);
    }
}
