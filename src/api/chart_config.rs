use serde::{Deserialize, Serialize};

use crate::core::{TilingMethod, Viewport};
use crate::error::{TreemapError, TreemapResult};
use crate::interaction::TooltipOffset;

/// Grid placement of legend swatches and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendLayout {
    pub columns: usize,
    pub origin_x: f64,
    pub origin_y: f64,
    pub column_spacing_px: f64,
    pub row_spacing_px: f64,
    pub swatch_size_px: f64,
    /// Label anchor relative to the swatch's top-left corner.
    pub label_offset_x: f64,
    pub label_offset_y: f64,
    pub font_size_px: f64,
}

impl Default for LegendLayout {
    fn default() -> Self {
        Self {
            columns: 4,
            origin_x: 20.0,
            origin_y: 10.0,
            column_spacing_px: 150.0,
            row_spacing_px: 30.0,
            swatch_size_px: 20.0,
            label_offset_x: 25.0,
            label_offset_y: 15.0,
            font_size_px: 16.0,
        }
    }
}

/// Public chart bootstrap configuration.
///
/// This type is serializable so host applications can persist/load a chart
/// setup; every field falls back to the movie-sales page defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapChartConfig {
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default = "default_legend_viewport")]
    pub legend_viewport: Viewport,
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default)]
    pub tiling: TilingMethod,
    #[serde(default = "default_tile_fill_opacity")]
    pub tile_fill_opacity: f64,
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f64,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_container_id")]
    pub container_id: String,
    #[serde(default)]
    pub tooltip_offset: TooltipOffset,
    #[serde(default)]
    pub legend_layout: LegendLayout,
}

impl Default for TreemapChartConfig {
    fn default() -> Self {
        Self::new(default_viewport())
    }
}

impl TreemapChartConfig {
    /// Creates a config for a treemap canvas of `viewport`; everything else
    /// uses defaults.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            legend_viewport: Viewport::new(viewport.width, default_legend_viewport().height),
            padding: default_padding(),
            tiling: TilingMethod::default(),
            tile_fill_opacity: default_tile_fill_opacity(),
            font_size_px: default_font_size_px(),
            font_family: default_font_family(),
            title: default_title(),
            description: default_description(),
            container_id: default_container_id(),
            tooltip_offset: TooltipOffset::default(),
            legend_layout: LegendLayout::default(),
        }
    }

    /// Sets padding between adjacent tiles and around nested groups.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_tiling(mut self, tiling: TilingMethod) -> Self {
        self.tiling = tiling;
        self
    }

    #[must_use]
    pub fn with_legend_viewport(mut self, viewport: Viewport) -> Self {
        self.legend_viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_tile_fill_opacity(mut self, opacity: f64) -> Self {
        self.tile_fill_opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_tooltip_offset(mut self, offset: TooltipOffset) -> Self {
        self.tooltip_offset = offset;
        self
    }

    #[must_use]
    pub fn with_legend_layout(mut self, layout: LegendLayout) -> Self {
        self.legend_layout = layout;
        self
    }

    pub fn validate(&self) -> TreemapResult<()> {
        for viewport in [self.viewport, self.legend_viewport] {
            if !viewport.is_valid() {
                return Err(TreemapError::InvalidViewport {
                    width: viewport.width,
                    height: viewport.height,
                });
            }
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(TreemapError::InvalidData(
                "padding must be finite and >= 0".to_owned(),
            ));
        }
        if !self.tile_fill_opacity.is_finite() || !(0.0..=1.0).contains(&self.tile_fill_opacity)
        {
            return Err(TreemapError::InvalidData(
                "tile fill opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(TreemapError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if self.legend_layout.columns == 0 {
            return Err(TreemapError::InvalidData(
                "legend must have at least one column".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> TreemapResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| TreemapError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> TreemapResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TreemapError::InvalidData(format!("failed to serialize chart config: {e}"))
        })
    }
}

fn default_viewport() -> Viewport {
    Viewport::new(960, 570)
}

fn default_legend_viewport() -> Viewport {
    Viewport::new(960, 100)
}

fn default_padding() -> f64 {
    1.0
}

fn default_tile_fill_opacity() -> f64 {
    0.6
}

fn default_font_size_px() -> f64 {
    10.0
}

fn default_font_family() -> String {
    "sans-serif".to_owned()
}

fn default_title() -> String {
    "Movie Sales".to_owned()
}

fn default_description() -> String {
    "Highest-grossing films grouped by genre".to_owned()
}

fn default_container_id() -> String {
    "app".to_owned()
}
