//! Whole-buffer resizing.
//!
//! Uses the `image` crate's resampling filters. Every function consumes its
//! input buffer: when the target size equals the current size the same
//! buffer is handed back, otherwise the input is released once the resized
//! copy exists.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::TransformError;
use crate::buffer::PixelBuffer;

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Resize a buffer to exact dimensions.
///
/// # Errors
///
/// Returns `TransformError::InvalidDimensions` for a zero target size and
/// `TransformError::InvalidBuffer` if the pixel data doesn't match the
/// buffer's dimensions.
pub fn resize(
    buffer: PixelBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<PixelBuffer, TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidDimensions { width, height });
    }

    // Fast path: nothing to do
    if buffer.dimensions() == (width, height) {
        return Ok(buffer);
    }

    let resized = {
        let view = buffer
            .as_rgb_view()
            .ok_or_else(|| TransformError::InvalidBuffer {
                width: buffer.width(),
                height: buffer.height(),
            })?;
        image::imageops::resize(&view, width, height, filter.to_image_filter())
    };

    debug!(
        from_width = buffer.width(),
        from_height = buffer.height(),
        width,
        height,
        "resized buffer"
    );
    Ok(buffer.derive_from_rgb(resized))
}

/// Scale a whole buffer by `factor`, keeping its aspect ratio.
///
/// Target dimensions are `round(width * factor)` and
/// `round(height * factor)`, never smaller than one pixel.
pub fn scale_by(
    buffer: PixelBuffer,
    factor: f32,
    filter: FilterType,
) -> Result<PixelBuffer, TransformError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(TransformError::InvalidFactor(factor));
    }

    let (width, height) = scaled_dimensions(buffer.width(), buffer.height(), factor);
    resize(buffer, width, height, filter)
}

/// Calculate the dimensions of a `width x height` buffer scaled by `factor`.
fn scaled_dimensions(width: u32, height: u32, factor: f32) -> (u32, u32) {
    let w = (width as f32 * factor).round() as u32;
    let h = (height as f32 * factor).round() as u32;
    (w.max(1), h.max(1))
}
