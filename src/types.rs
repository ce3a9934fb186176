//! Type definitions for rundown rendering
//!
//! Coordinates in this crate are top-down: `y` grows towards the bottom of
//! the page, the way the layout cursor moves. The PDF backend flips them.

use serde::{Deserialize, Serialize};

/// Rectangle with top-left position and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Color representation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: &str) -> Result<Self, String> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("Invalid hex color: #{}", hex));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|_| format!("Invalid hex color: #{}", hex))
        };

        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

/// One timed activity of the rundown.
///
/// `start` and `end` are opaque time strings ("HH:MM"); they are never
/// parsed, compared or sorted. List order is document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RundownItem {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub activity: String,
}

impl RundownItem {
    /// Build a row, trimming surrounding whitespace of every field.
    pub fn new(start: &str, end: &str, activity: &str) -> Self {
        Self {
            start: start.trim().to_string(),
            end: end.trim().to_string(),
            activity: activity.trim().to_string(),
        }
    }

    /// Normalize a row received from the editor. Absent or non-string
    /// fields become empty text; nothing is rejected.
    pub fn from_json(value: &serde_json::Value) -> Self {
        use crate::json_helpers::get_text_or_empty;
        Self::new(
            get_text_or_empty(value, "start"),
            get_text_or_empty(value, "end"),
            get_text_or_empty(value, "activity"),
        )
    }

    pub fn is_blank(&self) -> bool {
        self.start.is_empty() && self.end.is_empty() && self.activity.is_empty()
    }
}
