//! Table cell drawing
//!
//! Stateless: every function draws at the vertical position it is given.
//! Page breaks are decided by the layout engine.

use crate::canvas::{Canvas, RectStyle};
use crate::config::{DocumentConfig, FontSpec};
use crate::text_layout::RowMetrics;
use crate::types::{Color, Rect, RundownItem};

/// Horizontal geometry of the three-column table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableGeometry {
    pub left: f64,
    pub width: f64,
    pub start_x: f64,
    pub end_x: f64,
    pub activity_x: f64,
    pub cell_padding: f64,
}

impl TableGeometry {
    pub fn from_config(config: &DocumentConfig) -> Self {
        Self {
            left: config.dynamic_margin(),
            width: config.table_width,
            start_x: config.start_column_x(),
            end_x: config.end_column_x(),
            activity_x: config.activity_column_x(),
            cell_padding: config.cell_padding,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Left edge of the text inside each column, in column order
    pub fn text_columns(&self) -> [f64; 3] {
        [
            self.start_x + self.cell_padding,
            self.end_x + self.cell_padding,
            self.activity_x + self.cell_padding,
        ]
    }
}

/// Baseline of the first text line below a cell top
fn first_baseline(config: &DocumentConfig, top: f64, font: FontSpec) -> f64 {
    top + config.cell_padding + font.size
}

fn draw_column_dividers<C: Canvas>(
    canvas: &mut C,
    geometry: &TableGeometry,
    top: f64,
    height: f64,
    color: Color,
    width: f64,
) {
    for x in [geometry.end_x, geometry.activity_x] {
        canvas.draw_line(x, top, x, top + height, color, width);
    }
}

/// Draw the filled header row with its three labels
pub fn draw_header<C: Canvas>(canvas: &mut C, config: &DocumentConfig, top: f64) {
    let geometry = TableGeometry::from_config(config);
    let border = config.border_color();

    canvas.draw_rect(
        Rect::new(geometry.left, top, geometry.width, config.header_height),
        RectStyle::filled_and_stroked(config.header_fill(), border, config.border_width),
    );
    draw_column_dividers(canvas, &geometry, top, config.header_height, border, config.border_width);

    let baseline = first_baseline(config, top, config.header_font);
    let labels = [
        config.header_labels.start.as_str(),
        config.header_labels.end.as_str(),
        config.header_labels.activity.as_str(),
    ];
    let color = config.header_text_color();
    for (x, label) in geometry.text_columns().into_iter().zip(labels) {
        canvas.draw_text(x, baseline, label, config.header_font, color);
    }
}

/// Horizontal rule separating the header from the first row
pub fn draw_header_divider<C: Canvas>(canvas: &mut C, config: &DocumentConfig, y: f64) {
    let geometry = TableGeometry::from_config(config);
    canvas.draw_line(
        geometry.left,
        y,
        geometry.right(),
        y,
        config.border_color(),
        config.border_width,
    );
}

/// Draw one data row with its top edge at `top`
pub fn draw_row<C: Canvas>(
    canvas: &mut C,
    config: &DocumentConfig,
    top: f64,
    item: &RundownItem,
    metrics: &RowMetrics,
) {
    let geometry = TableGeometry::from_config(config);
    let border = config.border_color();

    canvas.draw_rect(
        Rect::new(geometry.left, top, geometry.width, metrics.height),
        RectStyle::stroked(border, config.border_width),
    );
    draw_column_dividers(canvas, &geometry, top, metrics.height, border, config.border_width);

    let [start_x, end_x, activity_x] = geometry.text_columns();
    let baseline = first_baseline(config, top, config.body_font);
    let color = config.body_text_color();

    canvas.draw_text(start_x, baseline, &item.start, config.body_font, color);
    canvas.draw_text(end_x, baseline, &item.end, config.body_font, color);
    for (i, line) in metrics.lines.iter().enumerate() {
        let y = baseline + i as f64 * config.line_height;
        canvas.draw_text(activity_x, y, line, config.body_font, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CommandRecorder, DrawCommand};
    use crate::font_metrics::StandardFontMetrics;

    fn record<F: FnOnce(&mut CommandRecorder)>(f: F) -> Vec<DrawCommand> {
        let mut rec = CommandRecorder::new();
        rec.new_page(595.0, 842.0);
        f(&mut rec);
        rec.finalize().remove(0).commands
    }

    #[test]
    fn test_geometry_is_centered() {
        let config = DocumentConfig::default();
        let g = TableGeometry::from_config(&config);
        assert_eq!(g.left, (config.page_width - config.table_width) / 2.0);
        assert_eq!(g.right(), 522.5);
        assert_eq!(g.text_columns(), [77.5, 147.5, 217.5]);
    }

    #[test]
    fn test_header_draws_labels_in_column_order() {
        let config = DocumentConfig::default();
        let commands = record(|c| draw_header(c, &config, 120.0));

        let texts: Vec<(f64, f64, &str)> = commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { x, y, text, .. } => Some((*x, *y, text.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![(77.5, 135.0, "Mulai"), (147.5, 135.0, "Berakhir"), (217.5, 135.0, "Kegiatan")]
        );

        match &commands[0] {
            DrawCommand::Rect { rect, style } => {
                assert_eq!(*rect, Rect::new(72.5, 120.0, 450.0, 24.0));
                assert_eq!(style.fill, Some(config.header_fill()));
            }
            other => panic!("expected header rect first, got {:?}", other),
        }
    }

    #[test]
    fn test_row_borders_and_stacked_lines() {
        let config = DocumentConfig::default();
        let item = RundownItem::new("09:00", "10:00", "");
        let metrics = RowMetrics {
            lines: vec!["Pembukaan".to_string(), "oleh MC".to_string()],
            height: 34.0,
        };
        let commands = record(|c| draw_row(c, &config, 144.0, &item, &metrics));

        // outer rect, two dividers, start, end, two activity lines
        assert_eq!(commands.len(), 7);
        assert_eq!(
            commands[0],
            DrawCommand::Rect {
                rect: Rect::new(72.5, 144.0, 450.0, 34.0),
                style: RectStyle::stroked(config.border_color(), config.border_width),
            }
        );
        let dividers: Vec<f64> = commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Line { x1, x2, y1, y2, .. } if x1 == x2 => {
                    assert_eq!((*y1, *y2), (144.0, 178.0));
                    Some(*x1)
                }
                _ => None,
            })
            .collect();
        assert_eq!(dividers, vec![142.5, 212.5]);

        let activity_baselines: Vec<f64> = commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { x, y, .. } if *x == 217.5 => Some(*y),
                _ => None,
            })
            .collect();
        assert_eq!(activity_baselines, vec![159.0, 171.0]);
    }

    #[test]
    fn test_empty_row_still_draws_cells() {
        let config = DocumentConfig::default();
        let item = RundownItem::default();
        let metrics = RowMetrics::compute(&item, &config, &StandardFontMetrics);
        let commands = record(|c| draw_row(c, &config, 144.0, &item, &metrics));
        assert_eq!(commands.len(), 6);
    }
}
