use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use tracing::trace;

use crate::core::Viewport;
use crate::error::{TreemapError, TreemapResult};
use crate::render::{
    Color, FrameKind, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
    TilePrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub tiles_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Draws a frame onto a Cairo context owned by someone else, e.g. a toolkit
/// draw callback.
pub trait CairoContextRenderer {
    fn draw_on_context(&mut self, context: &Context, frame: &RenderFrame) -> TreemapResult<()>;
}

/// Rasterizes frames with Cairo and Pango.
///
/// Each [`FrameKind`] gets its own image surface sized to the frame viewport,
/// mirroring how [`crate::render::SvgRenderer`] keeps treemap and legend
/// markup apart.
#[derive(Debug)]
pub struct CairoRenderer {
    background: Color,
    font_family: String,
    treemap: Option<ImageSurface>,
    legend: Option<ImageSurface>,
    last_stats: CairoRenderStats,
}

impl Default for CairoRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CairoRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            background: Color::rgb(1.0, 1.0, 1.0),
            font_family: "Sans".to_owned(),
            treemap: None,
            legend: None,
            last_stats: CairoRenderStats::default(),
        }
    }

    #[must_use]
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    pub fn with_background(mut self, background: Color) -> TreemapResult<Self> {
        background.validate()?;
        self.background = background;
        Ok(self)
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango"
    }

    #[must_use]
    pub fn surface(&self, kind: FrameKind) -> Option<&ImageSurface> {
        match kind {
            FrameKind::Treemap => self.treemap.as_ref(),
            FrameKind::Legend => self.legend.as_ref(),
        }
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the last surface rendered for `kind` as PNG.
    pub fn write_png(&self, kind: FrameKind, path: &Path) -> TreemapResult<()> {
        let surface = self.surface(kind).ok_or_else(|| {
            TreemapError::InvalidData(format!("no {kind:?} frame has been rendered"))
        })?;
        write_surface(surface, path)
    }

    /// Writes one PNG with the legend strip stacked under the treemap.
    pub fn write_page_png(&self, path: &Path) -> TreemapResult<()> {
        let (Some(treemap), Some(legend)) = (&self.treemap, &self.legend) else {
            return Err(TreemapError::InvalidData(
                "treemap and legend frames must both be rendered".to_owned(),
            ));
        };
        let width = treemap.width().max(legend.width());
        let height = treemap.height() + legend.height();
        let page = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| backend_error("create page surface", err))?;
        let context =
            Context::new(&page).map_err(|err| backend_error("create page context", err))?;

        set_source(&context, self.background, 1.0);
        context
            .paint()
            .map_err(|err| backend_error("paint page background", err))?;
        for (surface, y) in [(treemap, 0.0), (legend, f64::from(treemap.height()))] {
            context
                .set_source_surface(surface, 0.0, y)
                .map_err(|err| backend_error("attach frame surface", err))?;
            context
                .paint()
                .map_err(|err| backend_error("compose frame surface", err))?;
        }
        drop(context);
        write_surface(&page, path)
    }

    fn draw(&mut self, context: &Context, frame: &RenderFrame) -> TreemapResult<CairoRenderStats> {
        frame.validate()?;

        set_source(context, self.background, 1.0);
        context
            .paint()
            .map_err(|err| backend_error("clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for tile in &frame.tiles {
            self.draw_tile(context, tile, frame.font_size_px)?;
            stats.tiles_drawn += 1;
        }
        for rect in &frame.rects {
            fill_rect(context, rect)?;
            stats.rects_drawn += 1;
        }
        for text in &frame.texts {
            self.draw_text(context, text);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(stats)
    }

    fn font(&self, size_px: f64) -> FontDescription {
        let mut font = FontDescription::from_string(&self.font_family);
        font.set_absolute_size(size_px * f64::from(pango::SCALE));
        font
    }

    /// Fills the tile, then draws its label lines clipped to the tile bounds.
    fn draw_tile(
        &self,
        context: &Context,
        tile: &TilePrimitive,
        font_size_px: f64,
    ) -> TreemapResult<()> {
        fill_rect(context, &tile.rect)?;

        context
            .save()
            .map_err(|err| backend_error("save state", err))?;
        context.rectangle(tile.rect.x, tile.rect.y, tile.rect.width, tile.rect.height);
        context.clip();

        let font = self.font(font_size_px);
        for line in &tile.label_lines {
            let layout = pangocairo::functions::create_layout(context);
            layout.set_font_description(Some(&font));
            layout.set_text(&line.text);

            // `dy_em` places the baseline; Pango draws from the layout top.
            let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
            set_source(context, Color::rgb(0.0, 0.0, 0.0), line.fill_opacity.unwrap_or(1.0));
            context.move_to(
                tile.rect.x + line.x,
                tile.rect.y + line.dy_em * font_size_px - baseline,
            );
            pangocairo::functions::show_layout(context, &layout);
        }

        context
            .restore()
            .map_err(|err| backend_error("restore state", err))
    }

    fn draw_text(&self, context: &Context, text: &TextPrimitive) {
        let layout = pangocairo::functions::create_layout(context);
        layout.set_font_description(Some(&self.font(text.font_size_px)));
        layout.set_text(&text.text);

        let (width, _) = layout.pixel_size();
        let x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - f64::from(width) / 2.0,
            TextHAlign::Right => text.x - f64::from(width),
        };
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);

        set_source(context, text.color, 1.0);
        context.move_to(x, text.y - baseline);
        pangocairo::functions::show_layout(context, &layout);
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> TreemapResult<()> {
        let surface = create_surface(frame.viewport)?;
        let context =
            Context::new(&surface).map_err(|err| backend_error("create context", err))?;
        let stats = self.draw(&context, frame)?;
        drop(context);
        trace!(kind = ?frame.kind, tiles = stats.tiles_drawn, "cairo frame rendered");

        match frame.kind {
            FrameKind::Treemap => self.treemap = Some(surface),
            FrameKind::Legend => self.legend = Some(surface),
        }
        Ok(())
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn draw_on_context(&mut self, context: &Context, frame: &RenderFrame) -> TreemapResult<()> {
        self.draw(context, frame).map(|_| ())
    }
}

fn create_surface(viewport: Viewport) -> TreemapResult<ImageSurface> {
    let (Ok(width), Ok(height)) = (i32::try_from(viewport.width), i32::try_from(viewport.height))
    else {
        return Err(TreemapError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    };
    ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| backend_error("create surface", err))
}

fn write_surface(surface: &ImageSurface, path: &Path) -> TreemapResult<()> {
    let mut file = File::create(path).map_err(|err| {
        TreemapError::InvalidData(format!("failed to create `{}`: {err}", path.display()))
    })?;
    surface
        .write_to_png(&mut file)
        .map_err(|err| TreemapError::InvalidData(format!("failed to write png: {err}")))
}

fn fill_rect(context: &Context, rect: &RectPrimitive) -> TreemapResult<()> {
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
    set_source(context, rect.fill_color, rect.fill_opacity);
    context.fill().map_err(|err| backend_error("fill rect", err))
}

fn set_source(context: &Context, color: Color, opacity: f64) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha * opacity);
}

fn backend_error(action: &str, err: cairo::Error) -> TreemapError {
    TreemapError::InvalidData(format!("cairo: failed to {action}: {err}"))
}
