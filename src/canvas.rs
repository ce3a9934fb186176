//! Drawing capability used by the layout engine
//!
//! The engine only talks to `Canvas`. `CommandRecorder` stores the calls as
//! `DrawCommand`s so a render pass can be inspected and replayed
//! onto the PDF backend.

use serde::Serialize;

use crate::config::FontSpec;
use crate::font_metrics::{FontFace, StandardFontMetrics, TextMeasurer};
use crate::types::{Color, Rect};

/// Fill and stroke of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RectStyle {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub line_width: f64,
}

impl RectStyle {
    pub fn stroked(color: Color, line_width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            line_width,
        }
    }

    pub fn filled_and_stroked(fill: Color, stroke: Color, line_width: f64) -> Self {
        Self {
            fill: Some(fill),
            stroke: Some(stroke),
            line_width,
        }
    }
}

/// Imperative drawing surface. Coordinates are top-down points; text `y`
/// is the baseline.
pub trait Canvas: TextMeasurer {
    type Output;

    fn new_page(&mut self, width: f64, height: f64);

    /// Place a previously registered image over `rect`
    fn add_image(&mut self, key: &str, rect: Rect);

    fn draw_rect(&mut self, rect: Rect, style: RectStyle);

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color, width: f64);

    fn draw_text(&mut self, x: f64, y: f64, text: &str, font: FontSpec, color: Color);

    fn finalize(self) -> Self::Output
    where
        Self: Sized;
}

/// One recorded canvas call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum DrawCommand {
    Image {
        key: String,
        rect: Rect,
    },
    Rect {
        rect: Rect,
        style: RectStyle,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        width: f64,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        font: FontSpec,
        color: Color,
    },
}

impl DrawCommand {
    /// Issue this command on another canvas
    pub fn apply<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        match self {
            DrawCommand::Image { key, rect } => canvas.add_image(key, *rect),
            DrawCommand::Rect { rect, style } => canvas.draw_rect(*rect, *style),
            DrawCommand::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
            } => canvas.draw_line(*x1, *y1, *x2, *y2, *color, *width),
            DrawCommand::Text {
                x,
                y,
                text,
                font,
                color,
            } => canvas.draw_text(*x, *y, text, *font, *color),
        }
    }
}

/// Commands of one emitted page, in draw order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPage {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

impl RenderedPage {
    /// All text strings drawn on the page
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = (&str, &Rect)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Image { key, rect } => Some((key.as_str(), rect)),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Rect, &RectStyle)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Rect { rect, style } => Some((rect, style)),
            _ => None,
        })
    }
}

/// Canvas that only records what it is asked to draw
pub struct CommandRecorder<M: TextMeasurer = StandardFontMetrics> {
    measurer: M,
    pages: Vec<RenderedPage>,
}

impl CommandRecorder<StandardFontMetrics> {
    pub fn new() -> Self {
        Self::with_measurer(StandardFontMetrics)
    }
}

impl Default for CommandRecorder<StandardFontMetrics> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: TextMeasurer> CommandRecorder<M> {
    pub fn with_measurer(measurer: M) -> Self {
        Self {
            measurer,
            pages: Vec::new(),
        }
    }

    fn push(&mut self, command: DrawCommand) {
        match self.pages.last_mut() {
            Some(page) => page.commands.push(command),
            None => log::warn!("Dropping draw command issued before the first page: {:?}", command),
        }
    }
}

impl<M: TextMeasurer> TextMeasurer for CommandRecorder<M> {
    fn measure_text_width(&self, text: &str, font: FontFace, size: f64) -> f64 {
        self.measurer.measure_text_width(text, font, size)
    }
}

impl<M: TextMeasurer> Canvas for CommandRecorder<M> {
    type Output = Vec<RenderedPage>;

    fn new_page(&mut self, width: f64, height: f64) {
        self.pages.push(RenderedPage {
            width,
            height,
            commands: Vec::new(),
        });
    }

    fn add_image(&mut self, key: &str, rect: Rect) {
        self.push(DrawCommand::Image {
            key: key.to_string(),
            rect,
        });
    }

    fn draw_rect(&mut self, rect: Rect, style: RectStyle) {
        self.push(DrawCommand::Rect { rect, style });
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color, width: f64) {
        self.push(DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            width,
        });
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, font: FontSpec, color: Color) {
        self.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            font,
            color,
        });
    }

    fn finalize(self) -> Vec<RenderedPage> {
        self.pages
    }
}

/// Replay recorded pages onto another canvas and finalize it
pub fn replay<C: Canvas>(pages: &[RenderedPage], mut canvas: C) -> C::Output {
    for page in pages {
        canvas.new_page(page.width, page.height);
        for command in &page.commands {
            command.apply(&mut canvas);
        }
    }
    canvas.finalize()
}
