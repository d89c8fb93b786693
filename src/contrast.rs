//! Readable text colors for a swatch background
//!
//! Title and body text use the same luma rule with different thresholds:
//! body text switches to dark earlier since it needs more contrast.

use crate::color::Rgb;

/// Text color used on light backgrounds
pub const DARK_TEXT: Rgb = Rgb::BLACK;

/// Text color used on dark backgrounds
pub const LIGHT_TEXT: Rgb = Rgb::WHITE;

/// Luma above which title text turns dark
pub const TITLE_LUMA_THRESHOLD: f32 = 0.6;

/// Luma above which body text turns dark
pub const BODY_LUMA_THRESHOLD: f32 = 0.5;

#[inline]
fn text_color_for(background: Rgb, threshold: f32) -> Rgb {
    if background.luma() > threshold {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

/// Title text color for a background
pub fn title_text_color(background: Rgb) -> Rgb {
    text_color_for(background, TITLE_LUMA_THRESHOLD)
}

/// Body text color for a background
pub fn body_text_color(background: Rgb) -> Rgb {
    text_color_for(background, BODY_LUMA_THRESHOLD)
}
