use crate::error::TreemapResult;
use crate::render::{FrameKind, RenderFrame, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content so tests can catch invalid geometry
/// without a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_tile_count: usize,
    pub last_legend_item_count: usize,
    pub frames_rendered: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> TreemapResult<()> {
        frame.validate()?;
        match frame.kind {
            FrameKind::Treemap => self.last_tile_count = frame.tiles.len(),
            FrameKind::Legend => self.last_legend_item_count = frame.rects.len(),
        }
        self.frames_rendered += 1;
        Ok(())
    }
}
