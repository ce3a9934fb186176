//! Document assembly: title, rows and the two output sinks
//!
//! ## Data Flow
//!
//! ```text
//! AssetSource → BackgroundImage ─┐
//! rows + title ──────────────────┴→ render pass (CommandRecorder) → RenderedDocument
//!                                      → PdfCanvas replay → PDF bytes → preview / export
//! ```
//!
//! Preview and export share the same render pass and the same PDF bytes;
//! only the sink differs.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine as _};
use log::info;
use percent_encoding::percent_decode_str;

use crate::assets::{AssetSource, BackgroundImage};
use crate::canvas::{replay, Canvas, CommandRecorder, RenderedPage};
use crate::config::DocumentConfig;
use crate::error::RendererResult;
use crate::layout::PageLayoutEngine;
use crate::pdf_canvas::PdfCanvas;
use crate::types::RundownItem;

/// Image key the page background is registered under
pub const BACKGROUND_KEY: &str = "background";

/// Used when neither a custom title nor a slug yields a filename
pub const DEFAULT_FILENAME: &str = "rundown";

/// Run the layout pass on any canvas. Returns the number of pages emitted.
pub fn layout_document<C: Canvas>(
    canvas: &mut C,
    config: &DocumentConfig,
    title: &str,
    rows: &[RundownItem],
    background: Option<&str>,
) -> usize {
    let mut engine = PageLayoutEngine::new(config, background);
    engine.begin(canvas, title);
    for row in rows {
        engine.place_row(canvas, row);
    }
    engine.page_count()
}

/// Pure render pass: the draw commands of every page.
pub fn render(
    config: &DocumentConfig,
    title: &str,
    rows: &[RundownItem],
    background: Option<&str>,
) -> Vec<RenderedPage> {
    let mut recorder = CommandRecorder::new();
    layout_document(&mut recorder, config, title, rows, background);
    recorder.finalize()
}

fn decode_slug(slug: &str) -> String {
    percent_decode_str(slug.trim()).decode_utf8_lossy().into_owned()
}

/// Keep `[A-Za-z0-9 ]`, then join the remaining words with hyphens.
///
/// Leading and trailing spaces are dropped and each run of spaces becomes a
/// single `-`, so the name never starts or ends with a hyphen.
pub fn sanitize_filename(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();
    kept.split(' ')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Title shown on page 1
pub fn display_title(custom_title: &str, slug: &str) -> String {
    let custom = custom_title.trim();
    if !custom.is_empty() {
        return custom.to_string();
    }
    let humanized = decode_slug(slug).replace('-', " ");
    let humanized = humanized.trim();
    if humanized.is_empty() {
        "Rundown".to_string()
    } else {
        format!("Rundown – {}", humanized)
    }
}

/// Download name without extension
pub fn export_filename(custom_title: &str, slug: &str) -> String {
    let from_title = sanitize_filename(custom_title);
    if !from_title.is_empty() {
        return from_title;
    }
    let from_slug = sanitize_filename(&decode_slug(slug).replace('-', " "));
    if !from_slug.is_empty() {
        return from_slug;
    }
    DEFAULT_FILENAME.to_string()
}

/// Output of one render pass
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub pages: Vec<RenderedPage>,
    background: Option<BackgroundImage>,
}

impl RenderedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Replay the command stream onto the PDF backend
    pub fn to_pdf_bytes(&self) -> Vec<u8> {
        let mut canvas = PdfCanvas::new();
        if let Some(background) = &self.background {
            canvas.register_image(BACKGROUND_KEY, background.image());
        }
        let bytes = replay(&self.pages, canvas);
        info!(
            "PDF generated: {} pages, {} bytes ({:.2} MB)",
            self.pages.len(),
            bytes.len(),
            bytes.len() as f64 / 1_048_576.0
        );
        bytes
    }
}

/// Downloadable file produced by the export sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    /// Write into `dir`, creating it if needed. Returns the written path.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> RendererResult<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        info!("PDF saved to: {}", path.display());
        Ok(path)
    }
}

/// Editor snapshot for one preview or export
#[derive(Debug, Clone, Default)]
pub struct RundownDocument {
    config: DocumentConfig,
    custom_title: String,
    slug: String,
    rows: Vec<RundownItem>,
}

impl RundownDocument {
    pub fn new(rows: Vec<RundownItem>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn with_config(mut self, config: DocumentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_custom_title(mut self, title: &str) -> Self {
        self.custom_title = title.to_string();
        self
    }

    pub fn with_slug(mut self, slug: &str) -> Self {
        self.slug = slug.to_string();
        self
    }

    pub fn rows(&self) -> &[RundownItem] {
        &self.rows
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn title(&self) -> String {
        display_title(&self.custom_title, &self.slug)
    }

    pub fn filename(&self) -> String {
        format!("{}.pdf", export_filename(&self.custom_title, &self.slug))
    }

    /// Lay out the document over an already fetched background
    pub fn render(&self, background: Option<BackgroundImage>) -> RendererResult<RenderedDocument> {
        self.config.validate()?;
        let key = background.as_ref().map(|_| BACKGROUND_KEY);
        let pages = render(&self.config, &self.title(), &self.rows, key);
        Ok(RenderedDocument { pages, background })
    }

    /// Fetch the background, then render. Nothing is drawn if the fetch fails.
    pub fn render_with<S: AssetSource + ?Sized>(&self, assets: &S) -> RendererResult<RenderedDocument> {
        self.config.validate()?;
        let background = assets.fetch()?;
        self.render(Some(background))
    }

    /// PDF as a `data:` URI for an embedded viewer
    pub fn preview<S: AssetSource + ?Sized>(&self, assets: &S) -> RendererResult<String> {
        let bytes = self.render_with(assets)?.to_pdf_bytes();
        Ok(format!(
            "data:application/pdf;base64,{}",
            general_purpose::STANDARD.encode(bytes)
        ))
    }

    /// PDF as a named downloadable file
    pub fn export<S: AssetSource + ?Sized>(&self, assets: &S) -> RendererResult<ExportedFile> {
        let bytes = self.render_with(assets)?.to_pdf_bytes();
        Ok(ExportedFile {
            filename: self.filename(),
            bytes,
        })
    }

    pub fn export_to_dir<S: AssetSource + ?Sized>(
        &self,
        assets: &S,
        dir: impl AsRef<Path>,
    ) -> RendererResult<PathBuf> {
        self.export(assets)?.write_to_dir(dir)
    }
}
