use serde::{Deserialize, Serialize};

use crate::core::TileRect;
use crate::error::{TreemapError, TreemapResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> TreemapResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(TreemapError::InvalidData(format!(
                "color `{hex}` must be in #rrggbb form"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| {
                TreemapError::InvalidData(format!("color `{hex}` has a non-hex channel"))
            })
        };
        Ok(Self::rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// `#rrggbb` form; alpha is carried separately by the primitives.
    #[must_use]
    pub fn to_hex(self) -> String {
        let to_byte = |channel: f64| (channel.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            to_byte(self.red),
            to_byte(self.green),
            to_byte(self.blue)
        )
    }

    pub fn validate(self) -> TreemapResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(TreemapError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

fn validate_opacity(opacity: f64, what: &str) -> TreemapResult<()> {
    if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
        return Err(TreemapError::InvalidData(format!(
            "{what} opacity must be finite and in [0, 1]"
        )));
    }
    Ok(())
}

/// Draw command for one filled rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
    pub fill_opacity: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
            fill_opacity: 1.0,
        }
    }

    #[must_use]
    pub fn from_tile_rect(rect: TileRect, fill_color: Color) -> Self {
        Self::new(rect.x0, rect.y0, rect.width(), rect.height(), fill_color)
    }

    #[must_use]
    pub const fn with_fill_opacity(mut self, fill_opacity: f64) -> Self {
        self.fill_opacity = fill_opacity;
        self
    }

    #[must_use]
    pub fn area(self) -> f64 {
        self.width * self.height
    }

    #[must_use]
    pub fn contains_point(self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    pub fn validate(self) -> TreemapResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(TreemapError::InvalidData(
                "rect geometry must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(TreemapError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        validate_opacity(self.fill_opacity, "rect fill")?;
        self.fill_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space. `y` is the text baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> TreemapResult<()> {
        if self.text.is_empty() {
            return Err(TreemapError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(TreemapError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(TreemapError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// One line of a tile label, positioned relative to the tile's top-left
/// corner. `dy_em` is the baseline offset in multiples of the font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLabelLine {
    pub text: String,
    pub x: f64,
    pub dy_em: f64,
    pub fill_opacity: Option<f64>,
}

/// Draw command for one leaf tile: a filled rectangle, a hover title and a
/// multi-line label clipped to the rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilePrimitive {
    pub id: String,
    pub clip_id: String,
    pub rect: RectPrimitive,
    pub name: String,
    pub category: Option<String>,
    pub value: f64,
    pub title: String,
    pub label_lines: Vec<TileLabelLine>,
}

impl TilePrimitive {
    pub fn validate(&self) -> TreemapResult<()> {
        if self.id.is_empty() || self.clip_id.is_empty() {
            return Err(TreemapError::InvalidData(
                "tile ids must not be empty".to_owned(),
            ));
        }
        if !self.value.is_finite() {
            return Err(TreemapError::InvalidData(
                "tile value must be finite".to_owned(),
            ));
        }
        for line in &self.label_lines {
            if !line.x.is_finite() || !line.dy_em.is_finite() {
                return Err(TreemapError::InvalidData(
                    "tile label offsets must be finite".to_owned(),
                ));
            }
            if let Some(opacity) = line.fill_opacity {
                validate_opacity(opacity, "tile label")?;
            }
        }
        self.rect.validate()
    }
}
