pub mod format;
pub mod hierarchy;
pub mod raw_node;
pub mod treemap_layout;
pub mod types;

pub use format::{format_en_us, format_thousands, tokenize_label};
pub use hierarchy::{Hierarchy, HierarchyNode, NodeId};
pub use raw_node::{RawNode, RawValue};
pub use treemap_layout::{GOLDEN_RATIO, TilingMethod, TreemapLayout, dice, slice, squarify};
pub use types::{TileRect, Viewport};
