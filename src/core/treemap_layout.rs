use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::hierarchy::{Hierarchy, NodeId};
use crate::core::types::{TileRect, Viewport};
use crate::error::{TreemapError, TreemapResult};

/// Golden ratio, the default target aspect ratio of squarified rows.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Strategy used to split a parent rectangle among its children.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TilingMethod {
    /// Rows of children whose aspect ratios stay close to `ratio`.
    Squarify { ratio: f64 },
    /// Horizontal split on even depths, vertical split on odd depths.
    SliceDice,
}

impl Default for TilingMethod {
    fn default() -> Self {
        Self::Squarify {
            ratio: GOLDEN_RATIO,
        }
    }
}

impl TilingMethod {
    /// Splits `bounds` among `values` whose sum is `total`.
    #[must_use]
    pub fn tile(self, values: &[f64], total: f64, bounds: TileRect, depth: usize) -> Vec<TileRect> {
        match self {
            Self::Squarify { ratio } => squarify(values, total, bounds, ratio),
            Self::SliceDice if depth % 2 == 1 => slice(values, total, bounds),
            Self::SliceDice => dice(values, total, bounds),
        }
    }
}

/// Padded treemap layout over a fixed canvas.
///
/// `padding_outer` separates a branch's edge from its children, while
/// `padding_inner` is the gap between adjacent siblings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreemapLayout {
    pub viewport: Viewport,
    pub padding_inner: f64,
    pub padding_outer: f64,
    pub tiling: TilingMethod,
}

impl TreemapLayout {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            padding_inner: 0.0,
            padding_outer: 0.0,
            tiling: TilingMethod::default(),
        }
    }

    /// Sets both inner and outer padding.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding_inner = padding;
        self.padding_outer = padding;
        self
    }

    #[must_use]
    pub fn with_tiling(mut self, tiling: TilingMethod) -> Self {
        self.tiling = tiling;
        self
    }

    pub fn validate(self) -> TreemapResult<()> {
        if !self.viewport.is_valid() {
            return Err(TreemapError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for (name, padding) in [
            ("padding_inner", self.padding_inner),
            ("padding_outer", self.padding_outer),
        ] {
            if !padding.is_finite() || padding < 0.0 {
                return Err(TreemapError::InvalidData(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        if let TilingMethod::Squarify { ratio } = self.tiling {
            if !ratio.is_finite() || ratio < 1.0 {
                return Err(TreemapError::InvalidData(
                    "squarify ratio must be finite and >= 1".to_owned(),
                ));
            }
        }
        Ok(())
    }

    /// Assigns a rectangle to every node of `hierarchy`, the root receiving
    /// the full canvas.
    pub fn apply(self, hierarchy: &mut Hierarchy) -> TreemapResult<()> {
        self.validate()?;
        let root = hierarchy.root();
        hierarchy.node_mut(root).rect = self.viewport.bounds();
        self.position_node(hierarchy, root, 0.0);
        debug!(
            width = self.viewport.width,
            height = self.viewport.height,
            nodes = hierarchy.len(),
            "treemap layout applied"
        );
        Ok(())
    }

    fn position_node(self, hierarchy: &mut Hierarchy, id: NodeId, padding: f64) {
        let rect = hierarchy.node(id).rect.inset(padding);
        hierarchy.node_mut(id).rect = rect;

        let node = hierarchy.node(id);
        if node.children.is_empty() {
            return;
        }
        let children = node.children.clone();
        let total = node.value;
        let depth = node.depth;

        let half_inner = self.padding_inner / 2.0;
        let edge = self.padding_outer - half_inner;
        let region = rect.inset_edges(edge, edge, edge, edge);
        let values: Vec<f64> = children
            .iter()
            .map(|child| hierarchy.node(*child).value)
            .collect();

        let rects = self.tiling.tile(&values, total, region, depth);
        for (child, child_rect) in children.into_iter().zip(rects) {
            hierarchy.node_mut(child).rect = child_rect;
            self.position_node(hierarchy, child, half_inner);
        }
    }
}

/// Lays children side by side along x, each spanning the full height.
#[must_use]
pub fn dice(values: &[f64], total: f64, bounds: TileRect) -> Vec<TileRect> {
    let scale = if total > 0.0 {
        bounds.width() / total
    } else {
        0.0
    };
    let mut x = bounds.x0;
    values
        .iter()
        .map(|value| {
            let x0 = x;
            x += value * scale;
            TileRect::new(x0, bounds.y0, x, bounds.y1)
        })
        .collect()
}

/// Stacks children along y, each spanning the full width.
#[must_use]
pub fn slice(values: &[f64], total: f64, bounds: TileRect) -> Vec<TileRect> {
    let scale = if total > 0.0 {
        bounds.height() / total
    } else {
        0.0
    };
    let mut y = bounds.y0;
    values
        .iter()
        .map(|value| {
            let y0 = y;
            y += value * scale;
            TileRect::new(bounds.x0, y0, bounds.x1, y)
        })
        .collect()
}

/// Squarified tiling (Bruls, Huizing, van Wijk).
///
/// Children are consumed in order and grouped into rows; a row keeps growing
/// while its worst aspect ratio does not get worse. Each row is then laid
/// out along the shorter side of the remaining rectangle.
#[must_use]
pub fn squarify(values: &[f64], total: f64, bounds: TileRect, ratio: f64) -> Vec<TileRect> {
    let count = values.len();
    let mut rects = Vec::with_capacity(count);
    let mut remaining_value = total;
    let TileRect {
        mut x0,
        mut y0,
        x1,
        y1,
    } = bounds;

    let mut row_start = 0;
    let mut row_end = 0;
    while row_start < count {
        let dx = x1 - x0;
        let dy = y1 - y0;

        // First non-empty child seeds the row; leading zeros ride along.
        let mut sum_value;
        loop {
            sum_value = values[row_end];
            row_end += 1;
            if sum_value != 0.0 || row_end >= count {
                break;
            }
        }

        let mut min_value = sum_value;
        let mut max_value = sum_value;
        let alpha = (dy / dx).max(dx / dy) / (remaining_value * ratio);
        let mut beta = sum_value * sum_value * alpha;
        let mut min_ratio = (max_value / beta).max(beta / min_value);

        while row_end < count {
            let value = values[row_end];
            sum_value += value;
            min_value = min_value.min(value);
            max_value = max_value.max(value);
            beta = sum_value * sum_value * alpha;
            let new_ratio = (max_value / beta).max(beta / min_value);
            if new_ratio > min_ratio {
                sum_value -= value;
                break;
            }
            min_ratio = new_ratio;
            row_end += 1;
        }

        let row = &values[row_start..row_end];
        if dx < dy {
            let row_y1 = if remaining_value > 0.0 {
                y0 + dy * sum_value / remaining_value
            } else {
                y1
            };
            rects.extend(dice(row, sum_value, TileRect::new(x0, y0, x1, row_y1)));
            if remaining_value > 0.0 {
                y0 = row_y1;
            }
        } else {
            let row_x1 = if remaining_value > 0.0 {
                x0 + dx * sum_value / remaining_value
            } else {
                x1
            };
            rects.extend(slice(row, sum_value, TileRect::new(x0, y0, row_x1, y1)));
            if remaining_value > 0.0 {
                x0 = row_x1;
            }
        }

        remaining_value -= sum_value;
        row_start = row_end;
    }

    // Float drift must not push the last row past the parent's far edge.
    for rect in &mut rects {
        rect.x1 = rect.x1.min(x1);
        rect.y1 = rect.y1.min(y1);
        rect.x0 = rect.x0.min(rect.x1);
        rect.y0 = rect.y0.min(rect.y1);
    }
    rects
}
