use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Hierarchy, NodeId, Viewport, format_thousands, tokenize_label};
use crate::render::{
    Color, FrameKind, OrdinalColorScale, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
    TileLabelLine, TilePrimitive,
};

use super::{LegendLayout, TreemapChartConfig};

const LABEL_X_PX: f64 = 3.0;
const LABEL_FIRST_LINE_EM: f64 = 1.1;
const LABEL_LINE_STEP_EM: f64 = 0.9;
const LABEL_VALUE_GAP_EM: f64 = 0.3;
const LABEL_VALUE_OPACITY: f64 = 0.7;

/// One legend row: a top-level group and its swatch color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub name: String,
    pub color: Color,
}

/// Color scale whose domain starts with the root's children in sorted order,
/// so tile colors and legend rows agree.
#[must_use]
pub fn group_color_scale(hierarchy: &Hierarchy) -> OrdinalColorScale {
    let mut scale = OrdinalColorScale::default();
    for child in &hierarchy.node(hierarchy.root()).children {
        scale.color_for(&hierarchy.node(*child).name);
    }
    scale
}

#[must_use]
pub fn legend_entries(hierarchy: &Hierarchy, colors: &mut OrdinalColorScale) -> Vec<LegendEntry> {
    hierarchy
        .node(hierarchy.root())
        .children
        .iter()
        .map(|child| {
            let name = hierarchy.node(*child).name.clone();
            let color = colors.color_for(&name);
            LegendEntry { name, color }
        })
        .collect()
}

/// Hover title: the `/`-joined path from the root to `leaf`, then the
/// thousands-grouped value on its own line.
#[must_use]
pub fn tile_title(hierarchy: &Hierarchy, leaf: NodeId) -> String {
    format!(
        "{}\n{}",
        hierarchy.path_names(leaf).join("/"),
        format_thousands(hierarchy.node(leaf).value)
    )
}

/// Label lines for a tile: one line per name token, then a de-emphasized
/// value line.
#[must_use]
pub fn tile_label_lines(name: &str, value: f64) -> Vec<TileLabelLine> {
    let mut texts: Vec<String> = tokenize_label(name).into_vec();
    texts.push(format_thousands(value));
    let last = texts.len() - 1;

    texts
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            let is_value = index == last;
            let gap = if is_value { LABEL_VALUE_GAP_EM } else { 0.0 };
            TileLabelLine {
                text,
                x: LABEL_X_PX,
                dy_em: gap + LABEL_FIRST_LINE_EM + index as f64 * LABEL_LINE_STEP_EM,
                fill_opacity: is_value.then_some(LABEL_VALUE_OPACITY),
            }
        })
        .collect()
}

/// Maps every laid-out leaf to a tile primitive, in leaf order.
#[must_use]
pub fn build_treemap_frame(
    hierarchy: &Hierarchy,
    config: &TreemapChartConfig,
    colors: &mut OrdinalColorScale,
) -> RenderFrame {
    let mut frame =
        RenderFrame::new(FrameKind::Treemap, config.viewport).with_font_size(config.font_size_px);

    for (ordinal, leaf) in hierarchy.leaves().into_iter().enumerate() {
        let node = hierarchy.node(leaf);
        let group = hierarchy.top_level_ancestor(leaf);
        let fill = colors.color_for(&hierarchy.node(group).name);
        let rect = RectPrimitive::from_tile_rect(node.rect, fill)
            .with_fill_opacity(config.tile_fill_opacity);

        frame.tiles.push(TilePrimitive {
            id: format!("leaf-{}", ordinal + 1),
            clip_id: format!("clip-{}", ordinal + 1),
            rect,
            name: node.name.clone(),
            category: node.category.clone(),
            value: node.value,
            title: tile_title(hierarchy, leaf),
            label_lines: tile_label_lines(&node.name, node.value),
        });
    }

    debug!(tiles = frame.tiles.len(), "treemap frame built");
    frame
}

/// Lays legend entries out on a grid, row-major.
#[must_use]
pub fn build_legend_frame(
    entries: &[LegendEntry],
    viewport: Viewport,
    layout: LegendLayout,
) -> RenderFrame {
    let mut frame = RenderFrame::new(FrameKind::Legend, viewport).with_font_size(layout.font_size_px);
    let columns = layout.columns.max(1);

    for (index, entry) in entries.iter().enumerate() {
        let column = (index % columns) as f64;
        let row = (index / columns) as f64;
        let x = layout.origin_x + column * layout.column_spacing_px;
        let y = layout.origin_y + row * layout.row_spacing_px;

        frame.rects.push(RectPrimitive::new(
            x,
            y,
            layout.swatch_size_px,
            layout.swatch_size_px,
            entry.color,
        ));
        if !entry.name.is_empty() {
            frame.texts.push(TextPrimitive::new(
                entry.name.clone(),
                x + layout.label_offset_x,
                y + layout.label_offset_y,
                layout.font_size_px,
                Color::rgb(0.0, 0.0, 0.0),
                TextHAlign::Left,
            ));
        }
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::{build_legend_frame, tile_label_lines};
    use crate::api::{LegendEntry, LegendLayout};
    use crate::core::Viewport;
    use crate::render::CATEGORY10;

    #[test]
    fn value_line_is_shifted_and_faded() {
        let lines = tile_label_lines("Star Wars", 936_662_225.0);
        let texts: Vec<&str> = lines.iter().map(|line| line.text.as_str()).collect();
        assert_eq!(texts, vec!["Star", "Wars", "936,662,225"]);
        assert!((lines[0].dy_em - 1.1).abs() < 1e-9);
        assert!((lines[1].dy_em - 2.0).abs() < 1e-9);
        assert!((lines[2].dy_em - 3.2).abs() < 1e-9);
        assert_eq!(lines[0].fill_opacity, None);
        assert_eq!(lines[2].fill_opacity, Some(0.7));
    }

    #[test]
    fn legend_wraps_after_four_columns() {
        let entries: Vec<LegendEntry> = (0..7)
            .map(|index| LegendEntry {
                name: format!("Group {index}"),
                color: CATEGORY10[index],
            })
            .collect();
        let frame = build_legend_frame(&entries, Viewport::new(960, 100), LegendLayout::default());

        assert_eq!(frame.rects.len(), 7);
        assert_eq!((frame.rects[3].x, frame.rects[3].y), (470.0, 10.0));
        assert_eq!((frame.rects[4].x, frame.rects[4].y), (20.0, 40.0));
        assert_eq!((frame.texts[4].x, frame.texts[4].y), (45.0, 55.0));
        assert_eq!((frame.texts[0].x, frame.texts[0].y), (45.0, 25.0));
    }
}
