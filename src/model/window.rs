//! Top-level window description wrapping the widget tree.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

use super::widget::Widget;
use crate::core::errors::{Result, ShojiError};

/// Window flavor. Controls decoration and taskbar presence; layout is
/// unaffected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    /// Regular decorated top-level window. The default.
    #[default]
    Window,
    /// Borderless popup.
    Popup,
    /// Utility window (no taskbar entry).
    Tool,
}

impl WindowKind {
    /// Resolve the document's `type` tag. The empty tag means the default
    /// kind; anything outside the closed set is fatal.
    pub fn parse(tag: &str) -> Result<Self> {
        match tag {
            "" | "window" => Ok(Self::Window),
            "popup" => Ok(Self::Popup),
            "tool" => Ok(Self::Tool),
            other => Err(ShojiError::InvalidWindowKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// The decoded top-level document: window attributes plus the root of the
/// widget tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Window {
    /// Validated separately so a bad tag reports as a window error, not a
    /// generic decode failure.
    #[serde(skip)]
    pub kind: WindowKind,
    pub title: String,
    /// Font request, e.g. `"'DejaVu Sans' 11"`. Empty means backend default.
    pub font: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Whether the user may resize the window.
    pub fixed: bool,
    /// Model mode: interaction events carry a snapshot of current widget
    /// values instead of per-event detail.
    pub model: bool,
    /// Root of the widget tree.
    pub body: Widget,
}

impl Window {
    /// Decode a JSON document. Any malformed input is fatal; there is no
    /// partial-decode mode.
    pub fn decode(raw: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| ShojiError::document(e.to_string()))?;
        Self::from_value(value)
    }

    /// Decode from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let tag = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();
        let kind = WindowKind::parse(tag)?;

        let mut window: Self =
            serde_json::from_value(value).map_err(|e| ShojiError::document(e.to_string()))?;
        window.kind = kind;
        Ok(window)
    }
}
