use std::fmt::Write as _;

use crate::error::{TreemapError, TreemapResult};
use crate::interaction::TooltipState;
use crate::render::{Renderer, SvgRenderer, escape_xml, fmt_number};

use super::{TreemapChart, TreemapChartConfig};

const TOOLTIP_BASE_STYLE: &str = "position: absolute; background-color: white; \
border: 1px solid black; border-radius: 10px; padding: 20px";

/// Markup of the floating tooltip overlay for `state`.
#[must_use]
pub fn tooltip_markup(state: &TooltipState) -> String {
    let visibility = if state.visible { "visible" } else { "hidden" };
    let mut out = format!(r#"<div id="tooltip" style="{TOOLTIP_BASE_STYLE}; visibility: {visibility}"#);
    if state.content.is_some() {
        let _ = write!(
            out,
            "; left: {}px; top: {}px",
            fmt_number(state.left),
            fmt_number(state.top)
        );
    }
    out.push('"');
    if let Some(value) = state.data_value() {
        let _ = write!(out, r#" data-value="{}""#, fmt_number(value));
    }
    out.push('>');
    if let Some(html) = state.html() {
        out.push_str(&html);
    }
    out.push_str("</div>");
    out
}

/// Standalone HTML document: heading, description, treemap, legend and the
/// tooltip overlay inside the configured container.
#[must_use]
pub fn compose_html_page(
    config: &TreemapChartConfig,
    treemap_svg: &str,
    legend_svg: &str,
    tooltip: &TooltipState,
) -> String {
    let title = escape_xml(&config.title);
    let mut out = String::with_capacity(treemap_svg.len() + legend_svg.len() + 1024);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{title}</title>\n</head>\n<body>");
    let _ = writeln!(out, r#"<div id="{}">"#, escape_xml(&config.container_id));
    let _ = writeln!(out, r#"<h1 id="title">{title}</h1>"#);
    let _ = writeln!(
        out,
        r#"<p id="description">{}</p>"#,
        escape_xml(&config.description)
    );
    out.push_str(treemap_svg);
    out.push('\n');
    out.push_str(legend_svg);
    out.push('\n');
    out.push_str(&tooltip_markup(tooltip));
    out.push_str("\n</div>\n</body>\n</html>\n");
    out
}

impl TreemapChart<SvgRenderer> {
    /// Renders both frames and returns the treemap `<svg>` markup.
    pub fn to_svg(&mut self) -> TreemapResult<String> {
        self.render()?;
        self.renderer()
            .treemap_svg()
            .map(str::to_owned)
            .ok_or_else(|| TreemapError::InvalidData("treemap frame was not rendered".to_owned()))
    }

    /// Renders both frames and composes the full HTML page.
    pub fn to_html_page(&mut self) -> TreemapResult<String> {
        self.render()?;
        let renderer = self.renderer();
        let (Some(treemap_svg), Some(legend_svg)) = (renderer.treemap_svg(), renderer.legend_svg())
        else {
            return Err(TreemapError::InvalidData(
                "treemap and legend frames must both be rendered".to_owned(),
            ));
        };
        Ok(compose_html_page(
            self.config(),
            treemap_svg,
            legend_svg,
            self.tooltip_state(),
        ))
    }
}
