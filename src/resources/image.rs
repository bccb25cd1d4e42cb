use image::DynamicImage;

use crate::errors::{MarionetteError, Result};
use crate::settings::ColorSpace;

/// Decoded image with linear floating point channels, rows top to bottom.
///
/// Sources with an alpha channel decode to RGBA, everything else to RGB.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearImage {
    width: u32,
    height: u32,
    channels: u32,
    pixels: Vec<f32>,
}

impl LinearImage {
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// 3 or 4.
    #[inline]
    #[must_use]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    #[must_use]
    pub fn into_pixels(self) -> Vec<f32> {
        self.pixels
    }

    /// Number of mip levels in a full chain down to 1x1.
    #[must_use]
    pub fn mip_level_count(&self) -> u32 {
        mip_level_count(self.width, self.height)
    }
}

#[must_use]
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    let largest = width.max(height);
    if largest == 0 {
        return 0;
    }
    u32::BITS - largest.leading_zeros()
}

/// Decodes an encoded image (PNG, JPEG, HDR, WebP) into linear floats.
///
/// `color_space` describes 8/16-bit sources; float sources (HDR) are always
/// treated as linear.
pub fn decode_linear(bytes: &[u8], color_space: ColorSpace) -> Result<LinearImage> {
    if bytes.is_empty() {
        return Err(MarionetteError::ImageDecodeError("empty image buffer".to_owned()));
    }

    let img = image::load_from_memory(bytes)?;
    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(MarionetteError::ImageDecodeError(format!(
            "image has no pixels ({width}x{height})"
        )));
    }

    let is_float = matches!(img, DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_));
    let channels: u32 = if img.color().has_alpha() { 4 } else { 3 };

    let mut pixels = if channels == 4 {
        img.to_rgba32f().into_raw()
    } else {
        img.to_rgb32f().into_raw()
    };

    if color_space == ColorSpace::Srgb && !is_float {
        for pixel in pixels.chunks_exact_mut(channels as usize) {
            // alpha is stored linearly
            for c in &mut pixel[..3] {
                *c = srgb_to_linear(*c);
            }
        }
    }

    Ok(LinearImage {
        width,
        height,
        channels,
        pixels,
    })
}

#[inline]
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
