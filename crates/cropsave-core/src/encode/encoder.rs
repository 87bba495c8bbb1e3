//! Encoders built on the `image` crate's codecs.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;
use tracing::debug;

use super::OutputFormat;
use crate::buffer::PixelBuffer;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec rejected the image
    #[error("{format:?} encoding failed: {source}")]
    EncodingFailed {
        format: OutputFormat,
        #[source]
        source: image::ImageError,
    },
}

/// Encode RGB pixel data into `format`.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `format` - Output format
/// * `quality` - Quality 0-100; only JPEG uses it (0 is treated as 1)
pub fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let result = match format {
        OutputFormat::Jpeg => {
            let quality = quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut buffer, quality).write_image(
                pixels,
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
        OutputFormat::Png => {
            PngEncoder::new(&mut buffer).write_image(pixels, width, height, ExtendedColorType::Rgb8)
        }
        OutputFormat::WebP => WebPEncoder::new_lossless(&mut buffer).write_image(
            pixels,
            width,
            height,
            ExtendedColorType::Rgb8,
        ),
    };
    result.map_err(|source| EncodeError::EncodingFailed { format, source })?;

    let bytes = buffer.into_inner();
    debug!(?format, quality, width, height, len = bytes.len(), "encoded image");
    Ok(bytes)
}

/// Encode a working buffer into `format`.
pub fn encode_buffer(
    buffer: &PixelBuffer,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    encode(buffer.pixels(), buffer.width(), buffer.height(), format, quality)
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 80-90: Good quality, recommended for most uses
/// * 60-80: Medium quality, acceptable for web/social media
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    encode(pixels, width, height, OutputFormat::Jpeg, quality)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
