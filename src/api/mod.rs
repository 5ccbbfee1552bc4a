mod chart_config;
mod json_contract;
mod page;
mod scene_builder;

pub use chart_config::{LegendLayout, TreemapChartConfig};
pub use json_contract::{
    LegendEntrySnapshot, TREEMAP_SNAPSHOT_JSON_SCHEMA_V1, TileSnapshot, TreemapSnapshot,
    TreemapSnapshotJsonContractV1,
};
pub use page::{compose_html_page, tooltip_markup};
pub use scene_builder::{
    LegendEntry, build_legend_frame, build_treemap_frame, group_color_scale, legend_entries,
    tile_label_lines, tile_title,
};

use tracing::{debug, trace};

use crate::core::{Hierarchy, RawNode, TreemapLayout};
use crate::error::{TreemapError, TreemapResult};
use crate::interaction::{TooltipContent, TooltipController, TooltipPhase, TooltipState};
use crate::render::{RenderFrame, Renderer, TilePrimitive};

/// Treemap orchestration: hierarchy, layout, frames and tooltip state for one
/// dataset, drawn through a pluggable [`Renderer`].
///
/// The hierarchy and both frames are built once in [`TreemapChart::new`] and
/// never change afterwards; only the tooltip reacts to pointer events.
pub struct TreemapChart<R: Renderer> {
    renderer: R,
    config: TreemapChartConfig,
    hierarchy: Hierarchy,
    legend: Vec<LegendEntry>,
    treemap_frame: RenderFrame,
    legend_frame: RenderFrame,
    tooltip: TooltipController,
    hovered_tile: Option<usize>,
}

impl<R: Renderer> TreemapChart<R> {
    pub fn new(renderer: R, config: TreemapChartConfig, dataset: &RawNode) -> TreemapResult<Self> {
        config.validate()?;

        let mut hierarchy = Hierarchy::from_raw(dataset);
        TreemapLayout::new(config.viewport)
            .with_padding(config.padding)
            .with_tiling(config.tiling)
            .apply(&mut hierarchy)?;

        let mut colors = group_color_scale(&hierarchy);
        let legend = legend_entries(&hierarchy, &mut colors);
        let treemap_frame = build_treemap_frame(&hierarchy, &config, &mut colors);
        let legend_frame =
            build_legend_frame(&legend, config.legend_viewport, config.legend_layout);
        debug!(
            tiles = treemap_frame.tiles.len(),
            legend_entries = legend.len(),
            "treemap chart initialized"
        );

        Ok(Self {
            renderer,
            tooltip: TooltipController::new(config.tooltip_offset),
            config,
            hierarchy,
            legend,
            treemap_frame,
            legend_frame,
            hovered_tile: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TreemapChartConfig {
        &self.config
    }

    #[must_use]
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    #[must_use]
    pub fn legend_entries(&self) -> &[LegendEntry] {
        &self.legend
    }

    #[must_use]
    pub fn treemap_frame(&self) -> &RenderFrame {
        &self.treemap_frame
    }

    #[must_use]
    pub fn legend_frame(&self) -> &RenderFrame {
        &self.legend_frame
    }

    #[must_use]
    pub fn tiles(&self) -> &[TilePrimitive] {
        &self.treemap_frame.tiles
    }

    /// Draws the treemap frame, then the legend frame.
    pub fn render(&mut self) -> TreemapResult<()> {
        self.renderer.render(&self.treemap_frame)?;
        self.renderer.render(&self.legend_frame)?;
        trace!(tiles = self.treemap_frame.tiles.len(), "chart rendered");
        Ok(())
    }

    /// Index of the tile under canvas point `(x, y)`, if any.
    #[must_use]
    pub fn tile_at(&self, x: f64, y: f64) -> Option<usize> {
        self.treemap_frame.tile_at(x, y).map(|(index, _)| index)
    }

    #[must_use]
    pub fn hovered_tile(&self) -> Option<usize> {
        self.hovered_tile
    }

    #[must_use]
    pub fn tooltip_state(&self) -> &TooltipState {
        self.tooltip.state()
    }

    #[must_use]
    pub fn tooltip_phase(&self) -> TooltipPhase {
        self.tooltip.phase()
    }

    /// Pointer entered tile `tile_index`.
    pub fn hover_enter(&mut self, tile_index: usize) -> TreemapResult<()> {
        self.tile(tile_index)?;
        self.hovered_tile = Some(tile_index);
        self.tooltip.on_hover_enter();
        Ok(())
    }

    /// Pointer moved over tile `tile_index` at page coordinates.
    pub fn pointer_move(&mut self, tile_index: usize, page_x: f64, page_y: f64) -> TreemapResult<()> {
        let tile = self.tile(tile_index)?;
        let content = TooltipContent::new(tile.name.clone(), tile.value);
        self.hovered_tile = Some(tile_index);
        self.tooltip.on_pointer_move(page_x, page_y, content);
        Ok(())
    }

    pub fn hover_leave(&mut self) {
        self.hovered_tile = None;
        self.tooltip.on_hover_leave();
    }

    /// Drives enter/move/leave from a raw pointer position on the canvas, for
    /// surfaces without per-tile event targets.
    pub fn pointer_move_at(&mut self, x: f64, y: f64) {
        let hit = self.tile_at(x, y);
        if self.hovered_tile.is_some() && self.hovered_tile != hit {
            self.hover_leave();
        }
        if let Some(index) = hit {
            if self.hovered_tile.is_none() {
                self.hovered_tile = Some(index);
                self.tooltip.on_hover_enter();
            }
            let tile = &self.treemap_frame.tiles[index];
            let content = TooltipContent::new(tile.name.clone(), tile.value);
            self.tooltip.on_pointer_move(x, y, content);
        }
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn tile(&self, tile_index: usize) -> TreemapResult<&TilePrimitive> {
        self.treemap_frame.tiles.get(tile_index).ok_or_else(|| {
            TreemapError::InvalidData(format!(
                "tile index {tile_index} out of range (tiles: {})",
                self.treemap_frame.tiles.len()
            ))
        })
    }
}
