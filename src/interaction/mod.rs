use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::format_en_us;
use crate::render::escape_xml;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TooltipPhase {
    Hidden,
    Visible,
}

/// Offset applied to the pointer position when placing the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipOffset {
    pub dx: f64,
    pub dy: f64,
}

impl Default for TooltipOffset {
    fn default() -> Self {
        Self {
            dx: 20.0,
            dy: -70.0,
        }
    }
}

/// Name and value shown by the overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub name: String,
    pub value: f64,
}

impl TooltipContent {
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Overlay markup: `<name><br>$<en-US value>`.
    #[must_use]
    pub fn html(&self) -> String {
        format!("{}<br>${}", escape_xml(&self.name), format_en_us(self.value))
    }
}

/// Public tooltip state exposed to host applications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub visible: bool,
    pub left: f64,
    pub top: f64,
    pub content: Option<TooltipContent>,
}

impl Default for TooltipState {
    fn default() -> Self {
        Self {
            visible: false,
            left: 0.0,
            top: 0.0,
            content: None,
        }
    }
}

impl TooltipState {
    #[must_use]
    pub fn html(&self) -> Option<String> {
        self.content.as_ref().map(TooltipContent::html)
    }

    /// Raw value mirrored into the overlay's `data-value` attribute.
    #[must_use]
    pub fn data_value(&self) -> Option<f64> {
        self.content.as_ref().map(|content| content.value)
    }
}

/// Two-state hover machine driving the single tooltip overlay.
///
/// Every pointer event overwrites the previous state synchronously; there are
/// no timers or queued transitions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipController {
    offset: TooltipOffset,
    state: TooltipState,
}

impl TooltipController {
    #[must_use]
    pub fn new(offset: TooltipOffset) -> Self {
        Self {
            offset,
            state: TooltipState::default(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> TooltipPhase {
        if self.state.visible {
            TooltipPhase::Visible
        } else {
            TooltipPhase::Hidden
        }
    }

    #[must_use]
    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    #[must_use]
    pub fn offset(&self) -> TooltipOffset {
        self.offset
    }

    /// Pointer entered a tile. Content stays as-is until the first move.
    pub fn on_hover_enter(&mut self) {
        self.state.visible = true;
        trace!("tooltip shown");
    }

    /// Pointer moved over a tile at page coordinates `(page_x, page_y)`.
    pub fn on_pointer_move(&mut self, page_x: f64, page_y: f64, content: TooltipContent) {
        self.state.visible = true;
        self.state.left = page_x + self.offset.dx;
        self.state.top = page_y + self.offset.dy;
        self.state.content = Some(content);
    }

    pub fn on_hover_leave(&mut self) {
        self.state.visible = false;
        trace!("tooltip hidden");
    }
}
