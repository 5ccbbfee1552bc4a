use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{TreemapError, TreemapResult};
use crate::render::{RectPrimitive, TextPrimitive, TilePrimitive};

/// Surface a frame is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameKind {
    Treemap,
    Legend,
}

/// Backend-agnostic scene for one draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub kind: FrameKind,
    pub viewport: Viewport,
    pub font_size_px: f64,
    pub tiles: Vec<TilePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(kind: FrameKind, viewport: Viewport) -> Self {
        Self {
            kind,
            viewport,
            font_size_px: 10.0,
            tiles: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_font_size(mut self, font_size_px: f64) -> Self {
        self.font_size_px = font_size_px;
        self
    }

    #[must_use]
    pub fn with_tile(mut self, tile: TilePrimitive) -> Self {
        self.tiles.push(tile);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    pub fn validate(&self) -> TreemapResult<()> {
        if !self.viewport.is_valid() {
            return Err(TreemapError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(TreemapError::InvalidData(
                "frame font size must be finite and > 0".to_owned(),
            ));
        }

        for tile in &self.tiles {
            tile.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty() && self.rects.is_empty() && self.texts.is_empty()
    }

    /// Summed area of every tile rectangle.
    #[must_use]
    pub fn tile_area(&self) -> f64 {
        self.tiles.iter().map(|tile| tile.rect.area()).sum()
    }

    /// First tile whose rectangle contains the point.
    #[must_use]
    pub fn tile_at(&self, x: f64, y: f64) -> Option<(usize, &TilePrimitive)> {
        self.tiles
            .iter()
            .enumerate()
            .find(|(_, tile)| tile.rect.contains_point(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameKind, RenderFrame};
    use crate::core::Viewport;
    use crate::render::{Color, RectPrimitive, TextHAlign, TextPrimitive};

    #[test]
    fn empty_text_fails_frame_validation() {
        let frame = RenderFrame::new(FrameKind::Legend, Viewport::new(100, 20))
            .with_rect(RectPrimitive::new(
                0.0,
                0.0,
                10.0,
                10.0,
                Color::rgb(1.0, 0.0, 0.0),
            ))
            .with_text(TextPrimitive::new(
                "",
                0.0,
                0.0,
                10.0,
                Color::rgb(0.0, 0.0, 0.0),
                TextHAlign::Left,
            ));
        assert!(frame.validate().is_err());
    }

    #[test]
    fn zero_viewport_fails_frame_validation() {
        let frame = RenderFrame::new(FrameKind::Treemap, Viewport::new(0, 570));
        assert!(frame.is_empty());
        assert!(frame.validate().is_err());
    }
}
