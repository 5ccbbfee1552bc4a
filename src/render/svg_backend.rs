use std::fmt::Write as _;

use tracing::trace;

use crate::error::TreemapResult;
use crate::render::{
    FrameKind, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive, TilePrimitive,
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub tiles_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Serializes frames into standalone `<svg>` elements.
///
/// The last markup produced for each [`FrameKind`] is retained so a page
/// composer can pick up the treemap and legend separately.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    font_family: String,
    treemap_svg: Option<String>,
    legend_svg: Option<String>,
    last_stats: SvgRenderStats,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            font_family: "sans-serif".to_owned(),
            treemap_svg: None,
            legend_svg: None,
            last_stats: SvgRenderStats::default(),
        }
    }

    #[must_use]
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "svg"
    }

    #[must_use]
    pub fn treemap_svg(&self) -> Option<&str> {
        self.treemap_svg.as_deref()
    }

    #[must_use]
    pub fn legend_svg(&self) -> Option<&str> {
        self.legend_svg.as_deref()
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    /// Validates `frame` and returns its markup without retaining it.
    pub fn render_to_string(&self, frame: &RenderFrame) -> TreemapResult<String> {
        frame.validate()?;
        let (markup, _) = self.write_frame(frame);
        Ok(markup)
    }

    fn write_frame(&self, frame: &RenderFrame) -> (String, SvgRenderStats) {
        let mut stats = SvgRenderStats::default();
        let mut out = String::with_capacity(256 + frame.tiles.len() * 512);

        let _ = write!(
            out,
            r#"<svg xmlns="{SVG_NS}" xmlns:xlink="{XLINK_NS}""#
        );
        if frame.kind == FrameKind::Legend {
            out.push_str(r#" id="legend""#);
        }
        let _ = write!(
            out,
            r#" width="{}" height="{}" style="font: {}px {}">"#,
            frame.viewport.width,
            frame.viewport.height,
            fmt_number(frame.font_size_px),
            escape_xml(&self.font_family)
        );

        for tile in &frame.tiles {
            write_tile(&mut out, tile);
            stats.tiles_drawn += 1;
        }
        for rect in &frame.rects {
            write_rect(&mut out, rect, frame.kind);
            stats.rects_drawn += 1;
        }
        for text in &frame.texts {
            write_text(&mut out, text);
            stats.texts_drawn += 1;
        }

        out.push_str("</svg>");
        (out, stats)
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> TreemapResult<()> {
        frame.validate()?;
        let (markup, stats) = self.write_frame(frame);
        trace!(
            kind = ?frame.kind,
            bytes = markup.len(),
            tiles = stats.tiles_drawn,
            "svg frame rendered"
        );
        match frame.kind {
            FrameKind::Treemap => self.treemap_svg = Some(markup),
            FrameKind::Legend => self.legend_svg = Some(markup),
        }
        self.last_stats = stats;
        Ok(())
    }
}

fn write_tile(out: &mut String, tile: &TilePrimitive) {
    let rect = tile.rect;
    let _ = write!(
        out,
        r#"<g transform="translate({},{})">"#,
        fmt_number(rect.x),
        fmt_number(rect.y)
    );
    let _ = write!(out, "<title>{}</title>", escape_xml(&tile.title));
    let _ = write!(
        out,
        r#"<rect class="tile" id="{}" data-name="{}" data-category="{}" data-value="{}" fill="{}" fill-opacity="{}" width="{}" height="{}"/>"#,
        escape_xml(&tile.id),
        escape_xml(&tile.name),
        escape_xml(tile.category.as_deref().unwrap_or_default()),
        fmt_number(tile.value),
        rect.fill_color.to_hex(),
        fmt_number(rect.fill_opacity),
        fmt_number(rect.width),
        fmt_number(rect.height)
    );
    let _ = write!(
        out,
        r##"<clipPath id="{clip}"><use xlink:href="#{leaf}"/></clipPath>"##,
        clip = escape_xml(&tile.clip_id),
        leaf = escape_xml(&tile.id)
    );
    let _ = write!(
        out,
        r##"<text clip-path="url(#{})">"##,
        escape_xml(&tile.clip_id)
    );
    for line in &tile.label_lines {
        let _ = write!(
            out,
            r#"<tspan x="{}" y="{}em""#,
            fmt_number(line.x),
            fmt_number(line.dy_em)
        );
        if let Some(opacity) = line.fill_opacity {
            let _ = write!(out, r#" fill-opacity="{}""#, fmt_number(opacity));
        }
        let _ = write!(out, ">{}</tspan>", escape_xml(&line.text));
    }
    out.push_str("</text></g>");
}

fn write_rect(out: &mut String, rect: &RectPrimitive, kind: FrameKind) {
    out.push_str("<rect");
    if kind == FrameKind::Legend {
        out.push_str(r#" class="legend-item""#);
    }
    let _ = write!(
        out,
        r#" x="{}" y="{}" width="{}" height="{}" fill="{}""#,
        fmt_number(rect.x),
        fmt_number(rect.y),
        fmt_number(rect.width),
        fmt_number(rect.height),
        rect.fill_color.to_hex()
    );
    if rect.fill_opacity < 1.0 {
        let _ = write!(out, r#" fill-opacity="{}""#, fmt_number(rect.fill_opacity));
    }
    out.push_str("/>");
}

fn write_text(out: &mut String, text: &TextPrimitive) {
    let _ = write!(
        out,
        r#"<text x="{}" y="{}""#,
        fmt_number(text.x),
        fmt_number(text.y)
    );
    match text.h_align {
        TextHAlign::Left => {}
        TextHAlign::Center => out.push_str(r#" text-anchor="middle""#),
        TextHAlign::Right => out.push_str(r#" text-anchor="end""#),
    }
    let _ = write!(out, ">{}</text>", escape_xml(&text.text));
}

/// Shortest decimal form of a coordinate (`480`, `0.5`, `1.1`).
pub(crate) fn fmt_number(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.6}");
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    }
}

/// Escapes text for use in XML/HTML content and attribute values.
pub(crate) fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{escape_xml, fmt_number};

    #[test]
    fn numbers_use_shortest_decimal_form() {
        assert_eq!(fmt_number(480.0), "480");
        assert_eq!(fmt_number(0.5), "0.5");
        assert_eq!(fmt_number(2.3000000000000003), "2.3");
        assert_eq!(fmt_number(-0.25), "-0.25");
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_xml(r#"Fast & "Furious" <7>"#),
            "Fast &amp; &quot;Furious&quot; &lt;7&gt;"
        );
    }
}
