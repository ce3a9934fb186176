//! pdf-writer backend for the `Canvas` capability
//!
//! Takes top-down coordinates and flips them into PDF user space. Text is
//! written with the base-14 Helvetica faces in WinAnsiEncoding. Resources
//! are kept in ordered maps so identical input gives identical bytes.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, warn};
use pdf_writer::{Content, Finish, Name, Pdf, Rect as PdfRect, Ref, Str};

use crate::canvas::{Canvas, RectStyle};
use crate::config::FontSpec;
use crate::font_metrics::{FontFace, StandardFontMetrics, TextMeasurer};
use crate::image_utils::{image_resource_name, write_image_xobject, EmbeddedImage};
use crate::types::{Color, Rect};
use crate::winansi::encode_winansi;

/// Page being drawn; written out when the next page starts or on finalize
struct OpenPage {
    page_id: Ref,
    content_id: Ref,
    width: f64,
    height: f64,
    content: Content,
    images_used: BTreeSet<String>,
}

pub struct PdfCanvas<M: TextMeasurer = StandardFontMetrics> {
    pdf: Pdf,
    measurer: M,
    page_tree_id: Ref,
    next_ref_id: i32,
    fonts: BTreeMap<FontFace, (Ref, Name<'static>)>,
    images: BTreeMap<String, (Ref, Name<'static>)>,
    pages: Vec<Ref>,
    current_page: Option<OpenPage>,
}

impl PdfCanvas<StandardFontMetrics> {
    pub fn new() -> Self {
        Self::with_measurer(StandardFontMetrics)
    }
}

impl Default for PdfCanvas<StandardFontMetrics> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: TextMeasurer> PdfCanvas<M> {
    pub fn with_measurer(measurer: M) -> Self {
        let mut pdf = Pdf::new();

        // 1 = catalog, 2 = page tree, 3.. = fonts
        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        pdf.catalog(catalog_id).pages(page_tree_id);

        let mut fonts = BTreeMap::new();
        let mut next_ref_id = 3;
        for (face, resource) in [
            (FontFace::Helvetica, Name(b"F1")),
            (FontFace::HelveticaBold, Name(b"F2")),
        ] {
            let font_id = Ref::new(next_ref_id);
            next_ref_id += 1;
            pdf.type1_font(font_id)
                .base_font(Name(face.base_font().as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            fonts.insert(face, (font_id, resource));
        }

        Self {
            pdf,
            measurer,
            page_tree_id,
            next_ref_id,
            fonts,
            images: BTreeMap::new(),
            pages: Vec::new(),
            current_page: None,
        }
    }

    fn next_ref(&mut self) -> Ref {
        let r = Ref::new(self.next_ref_id);
        self.next_ref_id += 1;
        r
    }

    /// Embed an image once; pages reference it by `key` through `add_image`.
    pub fn register_image(&mut self, key: &str, image: &EmbeddedImage) {
        if self.images.contains_key(key) {
            return;
        }
        let image_id = self.next_ref();
        let mut counter = self.next_ref_id;
        write_image_xobject(&mut self.pdf, image, image_id, &mut counter);
        self.next_ref_id = counter;
        debug!(
            "Registered image '{}' as object {} ({}x{})",
            key,
            image_id.get(),
            image.width,
            image.height
        );
        self.images
            .insert(key.to_string(), (image_id, image_resource_name(image_id)));
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Write the open page's content stream and page object
    fn close_page(&mut self) {
        let Some(open) = self.current_page.take() else {
            return;
        };

        let content_bytes = open.content.finish();
        self.pdf.stream(open.content_id, &content_bytes);

        let mut page = self.pdf.page(open.page_id);
        page.media_box(PdfRect::new(0.0, 0.0, open.width as f32, open.height as f32));
        page.parent(self.page_tree_id);
        page.contents(open.content_id);
        {
            let mut resources = page.resources();
            {
                let mut font_dict = resources.fonts();
                for (font_id, name) in self.fonts.values() {
                    font_dict.pair(*name, *font_id);
                }
            }
            if !open.images_used.is_empty() {
                let mut xobject_dict = resources.x_objects();
                for key in &open.images_used {
                    if let Some((image_id, name)) = self.images.get(key) {
                        xobject_dict.pair(*name, *image_id);
                    }
                }
            }
        }
        page.finish();
    }

    fn page_mut(&mut self) -> Option<&mut OpenPage> {
        if self.current_page.is_none() {
            warn!("Draw call issued before the first page; ignored");
        }
        self.current_page.as_mut()
    }
}

fn set_fill(content: &mut Content, color: Color) {
    content.set_fill_rgb(color.r as f32, color.g as f32, color.b as f32);
}

fn set_stroke(content: &mut Content, color: Color, width: f64) {
    content.set_stroke_rgb(color.r as f32, color.g as f32, color.b as f32);
    content.set_line_width(width as f32);
}

impl<M: TextMeasurer> TextMeasurer for PdfCanvas<M> {
    fn measure_text_width(&self, text: &str, font: FontFace, size: f64) -> f64 {
        self.measurer.measure_text_width(text, font, size)
    }
}

impl<M: TextMeasurer> Canvas for PdfCanvas<M> {
    type Output = Vec<u8>;

    fn new_page(&mut self, width: f64, height: f64) {
        self.close_page();
        let page_id = self.next_ref();
        let content_id = self.next_ref();
        self.pages.push(page_id);
        self.current_page = Some(OpenPage {
            page_id,
            content_id,
            width,
            height,
            content: Content::new(),
            images_used: BTreeSet::new(),
        });
    }

    fn add_image(&mut self, key: &str, rect: Rect) {
        let Some(&(_, name)) = self.images.get(key) else {
            warn!("Image '{}' was never registered; skipping", key);
            return;
        };
        let Some(page) = self.page_mut() else {
            return;
        };
        let y = page.height - rect.bottom();
        page.content.save_state();
        page.content.transform([
            rect.width as f32,
            0.0,
            0.0,
            rect.height as f32,
            rect.x as f32,
            y as f32,
        ]);
        page.content.x_object(name);
        page.content.restore_state();
        page.images_used.insert(key.to_string());
    }

    fn draw_rect(&mut self, rect: Rect, style: RectStyle) {
        let Some(page) = self.page_mut() else {
            return;
        };
        let content = &mut page.content;
        let y = page.height - rect.bottom();
        content.rect(rect.x as f32, y as f32, rect.width as f32, rect.height as f32);
        match (style.fill, style.stroke) {
            (Some(fill), Some(stroke)) => {
                set_fill(content, fill);
                set_stroke(content, stroke, style.line_width);
                content.fill_nonzero_and_stroke();
            }
            (Some(fill), None) => {
                set_fill(content, fill);
                content.fill_nonzero();
            }
            (None, Some(stroke)) => {
                set_stroke(content, stroke, style.line_width);
                content.stroke();
            }
            (None, None) => {
                content.end_path();
            }
        }
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color, width: f64) {
        let Some(page) = self.page_mut() else {
            return;
        };
        let height = page.height;
        let content = &mut page.content;
        set_stroke(content, color, width);
        content.move_to(x1 as f32, (height - y1) as f32);
        content.line_to(x2 as f32, (height - y2) as f32);
        content.stroke();
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, font: FontSpec, color: Color) {
        if text.is_empty() {
            return;
        }
        let Some(&(_, font_name)) = self.fonts.get(&font.face) else {
            return;
        };
        let Some(page) = self.page_mut() else {
            return;
        };
        let height = page.height;
        let content = &mut page.content;
        set_fill(content, color);
        content.begin_text();
        content.set_font(font_name, font.size as f32);
        content.next_line(x as f32, (height - y) as f32);
        content.show(Str(&encode_winansi(text)));
        content.end_text();
    }

    fn finalize(mut self) -> Vec<u8> {
        self.close_page();

        let page_count = self.pages.len() as i32;
        self.pdf
            .pages(self.page_tree_id)
            .kids(self.pages.iter().copied())
            .count(page_count);

        self.pdf.finish()
    }
}
