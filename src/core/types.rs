use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn area(self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }

    /// Full-canvas rectangle anchored at the origin.
    #[must_use]
    pub fn bounds(self) -> TileRect {
        TileRect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Axis-aligned rectangle in canvas coordinates (`x0 <= x1`, `y0 <= y1`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TileRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl TileRect {
    #[must_use]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.x1 - self.x0
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.y1 - self.y0
    }

    #[must_use]
    pub fn area(self) -> f64 {
        self.width() * self.height()
    }

    /// Shrinks every edge by `amount`; an axis that would invert collapses to
    /// its midpoint.
    #[must_use]
    pub fn inset(self, amount: f64) -> Self {
        self.inset_edges(amount, amount, amount, amount)
    }

    #[must_use]
    pub fn inset_edges(self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        let (x0, x1) = collapse_axis(self.x0 + left, self.x1 - right);
        let (y0, y1) = collapse_axis(self.y0 + top, self.y1 - bottom);
        Self { x0, y0, x1, y1 }
    }

    /// Inclusive containment check with a tolerance for float drift.
    #[must_use]
    pub fn contains_rect(self, other: Self, epsilon: f64) -> bool {
        other.x0 >= self.x0 - epsilon
            && other.y0 >= self.y0 - epsilon
            && other.x1 <= self.x1 + epsilon
            && other.y1 <= self.y1 + epsilon
    }

    /// Half-open point hit test: `[x0, x1) x [y0, y1)`.
    #[must_use]
    pub fn contains_point(self, x: f64, y: f64) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    #[must_use]
    pub fn intersection_area(self, other: Self) -> f64 {
        let width = self.x1.min(other.x1) - self.x0.max(other.x0);
        let height = self.y1.min(other.y1) - self.y0.max(other.y0);
        if width <= 0.0 || height <= 0.0 {
            0.0
        } else {
            width * height
        }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }
}

fn collapse_axis(start: f64, end: f64) -> (f64, f64) {
    if end < start {
        let mid = (start + end) / 2.0;
        (mid, mid)
    } else {
        (start, end)
    }
}
