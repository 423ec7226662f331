// src/font_config.rs

// Font families, sizes and text measurement for plot rendering.
// Text is rendered by plotters from host fonts; measurement is only used to
// size the legend panel so that the saved image has a tight bounding box.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::constants::{FONT_SIZE_AXIS_LABEL, FONT_SIZE_LEGEND, FONT_SIZE_TICK_LABEL};

/// Generic serif family, used for typeset presentation text.
pub const FONT_FAMILY_SERIF: &str = "serif";

/// Generic sans-serif family, the backend default.
pub const FONT_FAMILY_SANS: &str = "sans-serif";

/// Represents a font style (family + size)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontStyle {
    pub family: &'static str,
    pub size: i32,
}

impl FontStyle {
    /// Tuple form accepted by plotters' `IntoFont`.
    pub fn tuple(self) -> (&'static str, i32) {
        (self.family, self.size)
    }
}

/// Font set for one figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSet {
    pub tick_label: FontStyle,
    pub axis_label: FontStyle,
    pub legend: FontStyle,
}

impl FontSet {
    pub fn for_family(family: &'static str) -> Self {
        Self {
            tick_label: FontStyle {
                family,
                size: FONT_SIZE_TICK_LABEL,
            },
            axis_label: FontStyle {
                family,
                size: FONT_SIZE_AXIS_LABEL,
            },
            legend: FontStyle {
                family,
                size: FONT_SIZE_LEGEND,
            },
        }
    }
}

static FONT_DATA_BYTES: OnceLock<Option<&'static [u8]>> = OnceLock::new();

fn find_system_font_bytes() -> Option<&'static [u8]> {
    // Try common Linux font locations; return first found
    let candidates = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    ];
    for p in candidates.iter() {
        if Path::new(p).exists() {
            if let Ok(bytes) = fs::read(p) {
                // Leak into static for rusttype lifetime
                let leaked = Box::leak(bytes.into_boxed_slice());
                return Some(&*leaked);
            }
        }
    }
    None
}

fn get_system_font_bytes() -> Option<&'static [u8]> {
    *FONT_DATA_BYTES.get_or_init(find_system_font_bytes)
}

/// Character-class width estimate, in multiples of the font size.
fn estimated_text_width_px(text: &str, font_px: f32) -> i32 {
    let mut w = 0.0f32;
    for ch in text.chars() {
        w += match ch {
            'i' | 'l' | 'I' | 'j' | '\'' | '|' | ':' | '.' | ',' => 0.35,
            ' ' => 0.40,
            'f' | 't' | 'r' | 'c' | 'k' | 's' => 0.55,
            '0'..='9' => 0.6,
            'm' | 'w' | 'M' | 'W' => 1.0,
            _ => 0.75,
        };
    }
    (w * font_px).ceil() as i32
}

/// Pixel width of `text` at `font_px`.
///
/// Uses the advance widths of a system TTF when one is available and falls
/// back to a per-character estimate otherwise.
pub fn text_width_px(text: &str, font_px: f32) -> i32 {
    if let Some(font_bytes) = get_system_font_bytes() {
        if let Some(font) = rusttype::Font::try_from_bytes(font_bytes) {
            use rusttype::Scale;
            let scale = Scale::uniform(font_px);
            let width: f32 = text
                .chars()
                .map(|ch| font.glyph(ch).scaled(scale).h_metrics().advance_width)
                .sum();
            return width.ceil().max(0.0) as i32;
        }
    }
    estimated_text_width_px(text, font_px)
}
