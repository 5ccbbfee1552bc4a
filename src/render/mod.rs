mod frame;
mod null_renderer;
mod palette;
mod primitives;
mod svg_backend;

pub use frame::{FrameKind, RenderFrame};
pub use null_renderer::NullRenderer;
pub use palette::{CATEGORY10, OrdinalColorScale};
pub use primitives::{
    Color, RectPrimitive, TextHAlign, TextPrimitive, TileLabelLine, TilePrimitive,
};
pub use svg_backend::{SvgRenderStats, SvgRenderer};

pub(crate) use svg_backend::{escape_xml, fmt_number};

use crate::error::TreemapResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from hierarchy, layout and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> TreemapResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
