//! Image utilities for PDF rendering

use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use pdf_writer::{Filter, Name, Pdf, Ref};

use crate::error::{RendererError, RendererResult};

/// Pixel payload ready to be written as an image XObject
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePixels {
    /// Original JPEG stream, written with DCTDecode
    Jpeg { data: Vec<u8>, grayscale: bool },
    /// Uncompressed 8-bit RGB with an optional 8-bit alpha plane
    Rgb { data: Vec<u8>, alpha: Option<Vec<u8>> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: ImagePixels,
}

/// Decode an encoded raster image (PNG, JPEG, ...) into an embeddable form.
pub fn prepare_image(data: &[u8]) -> RendererResult<EmbeddedImage> {
    let format = image::guess_format(data)
        .map_err(|e| RendererError::ImageError(format!("Failed to detect image format: {}", e)))?;
    let img = image::load_from_memory_with_format(data, format)
        .map_err(|e| RendererError::ImageError(format!("Failed to decode image: {}", e)))?;
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(RendererError::ImageError("Image has no pixels".to_string()));
    }

    let pixels = match (format, img.color()) {
        (ImageFormat::Jpeg, ColorType::L8) => ImagePixels::Jpeg {
            data: data.to_vec(),
            grayscale: true,
        },
        (ImageFormat::Jpeg, ColorType::Rgb8) => ImagePixels::Jpeg {
            data: data.to_vec(),
            grayscale: false,
        },
        _ => split_alpha(&img),
    };

    Ok(EmbeddedImage {
        width,
        height,
        pixels,
    })
}

/// Convert to RGB and extract alpha as a separate plane if present
fn split_alpha(image: &DynamicImage) -> ImagePixels {
    if !image.color().has_alpha() {
        return ImagePixels::Rgb {
            data: image.to_rgb8().into_raw(),
            alpha: None,
        };
    }

    let rgba = image.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut rgb: Vec<u8> = Vec::with_capacity((w * h * 3) as usize);
    let mut alpha: Vec<u8> = Vec::with_capacity((w * h) as usize);
    for chunk in rgba.as_raw().chunks_exact(4) {
        rgb.extend_from_slice(&chunk[..3]);
        alpha.push(chunk[3]);
    }

    // Fully opaque images do not need a soft mask
    let alpha = if alpha.iter().all(|&a| a == u8::MAX) {
        None
    } else {
        Some(alpha)
    };
    ImagePixels::Rgb { data: rgb, alpha }
}

/// Write the image XObject (and its soft mask) into the PDF.
///
/// `next_ref_id` is advanced for any extra object that gets allocated.
pub fn write_image_xobject(
    pdf: &mut Pdf,
    image: &EmbeddedImage,
    image_id: Ref,
    next_ref_id: &mut i32,
) {
    let width = image.width as i32;
    let height = image.height as i32;

    match &image.pixels {
        ImagePixels::Jpeg { data, grayscale } => {
            let mut xobject = pdf.image_xobject(image_id, data);
            xobject.filter(Filter::DctDecode);
            xobject.width(width);
            xobject.height(height);
            if *grayscale {
                xobject.color_space().device_gray();
            } else {
                xobject.color_space().device_rgb();
            }
            xobject.bits_per_component(8);
        }
        ImagePixels::Rgb { data, alpha } => {
            let smask_id = alpha.as_ref().map(|alpha| {
                let smask_id = Ref::new(*next_ref_id);
                *next_ref_id += 1;
                let mut smask = pdf.image_xobject(smask_id, alpha);
                smask.width(width);
                smask.height(height);
                smask.color_space().device_gray();
                smask.bits_per_component(8);
                smask_id
            });

            let mut xobject = pdf.image_xobject(image_id, data);
            xobject.width(width);
            xobject.height(height);
            xobject.color_space().device_rgb();
            xobject.bits_per_component(8);
            if let Some(smask_id) = smask_id {
                xobject.s_mask(smask_id);
            }
        }
    }
}

/// Resource name for an image object, e.g. "Im7"
pub fn image_resource_name(image_id: Ref) -> Name<'static> {
    let name = format!("Im{}", image_id.get());
    Name(Box::leak(name.into_boxed_str()).as_bytes())
}
