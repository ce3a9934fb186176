//! Rundown PDF renderer
//!
//! Lays out an ordered list of timed activities as a paginated A4 table with
//! a repeated background and header, and writes it with pdf-writer.
//! Python bindings are available behind the `python` feature.

pub mod assets;
pub mod canvas;
pub mod config;
pub mod document;
pub mod error;
pub mod font_metrics;
mod image_utils;
pub mod json_helpers;
pub mod layout;
pub mod pdf_canvas;
#[cfg(feature = "python")]
mod python;
pub mod table;
pub mod text_layout;
pub mod types;
mod winansi;

pub use assets::{AssetSource, BackgroundImage, JsonBytesAsset, JsonFileAsset};
pub use canvas::{Canvas, CommandRecorder, DrawCommand, RenderedPage};
pub use config::DocumentConfig;
pub use document::{display_title, export_filename, render, ExportedFile, RenderedDocument, RundownDocument};
pub use error::{RendererError, RendererResult};
pub use font_metrics::{FontFace, StandardFontMetrics, TextMeasurer};
pub use image_utils::{EmbeddedImage, ImagePixels};
pub use layout::{LayoutCursor, LayoutState, PageLayoutEngine, RowPlacement};
pub use pdf_canvas::PdfCanvas;
pub use types::RundownItem;
