//! Document geometry and style configuration
//!
//! Every render receives one `DocumentConfig` value; nothing in the engine
//! reads page size or style from global state. `Default` is the A4 rundown
//! layout in PDF points.

use serde::{Deserialize, Serialize};

use crate::error::{RendererError, RendererResult};
use crate::font_metrics::FontFace;
use crate::types::Color;

/// ISO A4 width in points
pub const A4_WIDTH: f64 = 595.0;
/// ISO A4 height in points
pub const A4_HEIGHT: f64 = 842.0;

/// Widths of the two fixed time columns. The activity column takes the rest
/// of the table width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnWidths {
    pub start: f64,
    pub end: f64,
}

impl Default for ColumnWidths {
    fn default() -> Self {
        Self { start: 70.0, end: 70.0 }
    }
}

/// Font face plus size in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub face: FontFace,
    pub size: f64,
}

impl FontSpec {
    pub fn new(face: FontFace, size: f64) -> Self {
        Self { face, size }
    }
}

/// Labels of the repeated table header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderLabels {
    pub start: String,
    pub end: String,
    pub activity: String,
}

impl Default for HeaderLabels {
    fn default() -> Self {
        Self {
            start: "Mulai".to_string(),
            end: "Berakhir".to_string(),
            activity: "Kegiatan".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub table_width: f64,
    pub column_widths: ColumnWidths,
    pub header_height: f64,
    pub cell_padding: f64,
    pub line_height: f64,
    pub body_font: FontSpec,
    pub header_font: FontSpec,
    pub title_font: FontSpec,
    /// Distance from the title baseline down to the top of the table
    pub title_gap: f64,
    pub header_labels: HeaderLabels,
    pub header_fill: String,
    pub header_text_color: String,
    pub body_text_color: String,
    pub border_color: String,
    pub border_width: f64,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            margin: 40.0,
            padding_top: 80.0,
            padding_bottom: 130.0,
            table_width: 450.0,
            column_widths: ColumnWidths::default(),
            header_height: 24.0,
            cell_padding: 5.0,
            line_height: 12.0,
            body_font: FontSpec::new(FontFace::Helvetica, 10.0),
            header_font: FontSpec::new(FontFace::HelveticaBold, 10.0),
            title_font: FontSpec::new(FontFace::HelveticaBold, 16.0),
            title_gap: 20.0,
            header_labels: HeaderLabels::default(),
            header_fill: "#E8EEF9".to_string(),
            header_text_color: "#1F3A68".to_string(),
            body_text_color: "#000000".to_string(),
            border_color: "#000000".to_string(),
            border_width: 0.5,
        }
    }
}

impl DocumentConfig {
    /// Load a config from JSON; missing keys keep their default value.
    pub fn from_json(json: &str) -> RendererResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject geometry that can never lay out a table row.
    pub fn validate(&self) -> RendererResult<()> {
        let invalid = |msg: String| Err(RendererError::InvalidConfig(msg));

        if !(self.page_width > 0.0 && self.page_height > 0.0) {
            return invalid(format!(
                "page size must be positive, got {}x{}",
                self.page_width, self.page_height
            ));
        }
        if self.table_width > self.page_width {
            return invalid(format!(
                "table width {} exceeds page width {}",
                self.table_width, self.page_width
            ));
        }
        if self.activity_text_width() <= 0.0 {
            return invalid(format!(
                "activity column has no room for text (column width {}, cell padding {})",
                self.activity_width(),
                self.cell_padding
            ));
        }
        if !(self.line_height > 0.0 && self.header_height > 0.0) {
            return invalid("line height and header height must be positive".to_string());
        }
        if self.body_top() >= self.bottom_limit() {
            return invalid(format!(
                "no usable height: table body starts at {} but rows must end before {}",
                self.body_top(),
                self.bottom_limit()
            ));
        }
        for (name, hex) in [
            ("header_fill", &self.header_fill),
            ("header_text_color", &self.header_text_color),
            ("body_text_color", &self.body_text_color),
            ("border_color", &self.border_color),
        ] {
            if let Err(e) = Color::from_hex(hex) {
                return invalid(format!("{}: {}", name, e));
            }
        }
        Ok(())
    }

    /// Left edge of the horizontally centered table
    pub fn dynamic_margin(&self) -> f64 {
        (self.page_width - self.table_width) / 2.0
    }

    pub fn activity_width(&self) -> f64 {
        self.table_width - self.column_widths.start - self.column_widths.end
    }

    /// Width available to wrapped activity text inside its cell
    pub fn activity_text_width(&self) -> f64 {
        self.activity_width() - 2.0 * self.cell_padding
    }

    pub fn start_column_x(&self) -> f64 {
        self.dynamic_margin()
    }

    pub fn end_column_x(&self) -> f64 {
        self.dynamic_margin() + self.column_widths.start
    }

    pub fn activity_column_x(&self) -> f64 {
        self.end_column_x() + self.column_widths.end
    }

    /// Top of the header row on every page
    pub fn table_top(&self) -> f64 {
        self.margin + self.padding_top
    }

    /// Cursor position for the first data row of a page
    pub fn body_top(&self) -> f64 {
        self.table_top() + self.header_height
    }

    /// Rows must end at or above this line
    pub fn bottom_limit(&self) -> f64 {
        self.page_height - self.padding_bottom
    }

    /// Height rows can use on a fresh page
    pub fn usable_height(&self) -> f64 {
        self.bottom_limit() - self.body_top()
    }

    pub fn title_baseline(&self) -> f64 {
        self.table_top() - self.title_gap
    }

    pub fn header_fill(&self) -> Color {
        Color::from_hex(&self.header_fill).unwrap_or(Color::white())
    }

    pub fn header_text_color(&self) -> Color {
        Color::from_hex(&self.header_text_color).unwrap_or(Color::black())
    }

    pub fn body_text_color(&self) -> Color {
        Color::from_hex(&self.body_text_color).unwrap_or(Color::black())
    }

    pub fn border_color(&self) -> Color {
        Color::from_hex(&self.border_color).unwrap_or(Color::black())
    }
}
