//! Text layout and line breaking
//!
//! This module provides:
//! - Word wrapping against an injected `TextMeasurer`
//! - Row height calculation from the wrapped line count

use crate::config::{DocumentConfig, FontSpec};
use crate::font_metrics::TextMeasurer;
use crate::types::RundownItem;

/// Line breaker for wrapping text into a fixed-width column
pub struct LineBreaker<'m, M: TextMeasurer + ?Sized> {
    max_width: f64,
    font: FontSpec,
    measurer: &'m M,
}

impl<'m, M: TextMeasurer + ?Sized> LineBreaker<'m, M> {
    pub fn new(max_width: f64, font: FontSpec, measurer: &'m M) -> Self {
        Self {
            max_width,
            font,
            measurer,
        }
    }

    fn width(&self, text: &str) -> f64 {
        self.measurer
            .measure_text_width(text, self.font.face, self.font.size)
    }

    /// Break text into lines at word boundaries.
    ///
    /// Every returned line measures at most `max_width`, except a single word
    /// that is wider on its own: it gets a line to itself and is never split.
    /// Empty input yields exactly one empty line.
    pub fn wrap(&self, text: &str) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }

            let candidate = format!("{} {}", current, word);
            if self.width(&candidate) <= self.max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }

        if !current.is_empty() || lines.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// Rendered height of a row holding `line_count` wrapped lines.
///
/// Never smaller than the header row, non-decreasing in `line_count`.
pub fn row_height(config: &DocumentConfig, line_count: usize) -> f64 {
    let content = line_count as f64 * config.line_height + 2.0 * config.cell_padding;
    content.max(config.header_height)
}

/// Wrapped activity text and resulting height of one row
#[derive(Debug, Clone, PartialEq)]
pub struct RowMetrics {
    pub lines: Vec<String>,
    pub height: f64,
}

impl RowMetrics {
    pub fn compute<M: TextMeasurer + ?Sized>(
        item: &RundownItem,
        config: &DocumentConfig,
        measurer: &M,
    ) -> Self {
        let breaker = LineBreaker::new(config.activity_text_width(), config.body_font, measurer);
        let lines = breaker.wrap(&item.activity);
        let height = row_height(config, lines.len());
        Self { lines, height }
    }
}
