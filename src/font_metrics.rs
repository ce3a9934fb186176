//! Font metrics for text measurement
//!
//! The document is written with the PDF base-14 Helvetica faces, so widths
//! come from their Adobe AFM tables (units per 1000 em).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FontFace {
    #[serde(rename = "Helvetica")]
    Helvetica,
    #[serde(rename = "Helvetica-Bold")]
    HelveticaBold,
}

impl FontFace {
    /// PostScript name of the base-14 font
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Helvetica => "Helvetica",
            FontFace::HelveticaBold => "Helvetica-Bold",
        }
    }
}

/// Text measurement capability injected into the line breaker.
pub trait TextMeasurer {
    /// Rendered width of `text` in points.
    fn measure_text_width(&self, text: &str, font: FontFace, size: f64) -> f64;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure_text_width(&self, text: &str, font: FontFace, size: f64) -> f64 {
        (**self).measure_text_width(text, font, size)
    }
}

/// Advance widths for code points 0x20..=0x7E
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' .. '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0' .. '?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@' .. 'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P' .. '_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`' .. 'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p' .. '~'
];

const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' .. '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0' .. '?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@' .. 'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P' .. '_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`' .. 'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p' .. '~'
];

/// Used for characters without an entry in the tables
const FALLBACK_WIDTH: u16 = 556;

/// AFM-backed metrics for the base-14 Helvetica faces
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFontMetrics;

impl StandardFontMetrics {
    pub fn char_width(font: FontFace, ch: char) -> u16 {
        let code = ch as u32;
        if (0x20..=0x7E).contains(&code) {
            let idx = (code - 0x20) as usize;
            return match font {
                FontFace::Helvetica => HELVETICA_ASCII[idx],
                FontFace::HelveticaBold => HELVETICA_BOLD_ASCII[idx],
            };
        }
        let bold = font == FontFace::HelveticaBold;
        match ch {
            '\u{00A0}' => 278,
            '\u{2013}' => 556,
            '\u{2014}' | '\u{2026}' | '\u{2030}' => 1000,
            '\u{2018}' | '\u{2019}' | '\u{201A}' => {
                if bold {
                    278
                } else {
                    222
                }
            }
            '\u{201C}' | '\u{201D}' | '\u{201E}' => 500,
            '\u{2022}' => 350,
            '\u{00B7}' => 278,
            '\u{00B0}' => 400,
            _ => FALLBACK_WIDTH,
        }
    }
}

impl TextMeasurer for StandardFontMetrics {
    fn measure_text_width(&self, text: &str, font: FontFace, size: f64) -> f64 {
        let units: u32 = text
            .chars()
            .map(|ch| Self::char_width(font, ch) as u32)
            .sum();
        units as f64 / 1000.0 * size
    }
}
