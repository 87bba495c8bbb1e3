//! Pixel-exact crop extraction.
//!
//! Regions are given in whole source pixels. A region that does not fit
//! inside the buffer is an error: nothing is clamped, since a region outside
//! the buffer means the geometry upstream is wrong.

use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::error::{CropError, Result};

/// Extract the `[x, y, width, height]` region of `buffer` as a new buffer.
///
/// The input buffer is consumed. A region covering the whole buffer hands
/// the same buffer back.
///
/// # Errors
///
/// Returns `CropError::Bounds` if the region has a negative offset, a
/// non-positive size, or extends past the right or bottom edge.
///
/// # Example
///
/// ```
/// use cropsave_core::buffer::PixelBuffer;
/// use cropsave_core::transform::extract_region;
///
/// let image = PixelBuffer::new(100, 100, vec![128u8; 100 * 100 * 3]);
/// let cropped = extract_region(image, 25, 25, 50, 50).unwrap();
/// assert_eq!(cropped.dimensions(), (50, 50));
/// ```
pub fn extract_region(
    buffer: PixelBuffer,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) -> Result<PixelBuffer> {
    let out_of_bounds = || CropError::Bounds {
        x,
        y,
        width,
        height,
        buffer_width: buffer.width(),
        buffer_height: buffer.height(),
    };

    if x < 0 || y < 0 || width <= 0 || height <= 0 {
        return Err(out_of_bounds());
    }

    let (left, top) = (x as u64, y as u64);
    let (out_w, out_h) = (width as u64, height as u64);
    if left + out_w > buffer.width() as u64 || top + out_h > buffer.height() as u64 {
        return Err(out_of_bounds());
    }
    if !buffer.is_usable() {
        return Err(CropError::precondition(
            "working buffer pixel data does not match its dimensions",
        ));
    }

    // Fast path: the region is the whole buffer
    if left == 0 && top == 0 && (out_w, out_h) == (buffer.width() as u64, buffer.height() as u64)
    {
        return Ok(buffer);
    }

    let src_stride = buffer.width() as usize * 3;
    let row_len = out_w as usize * 3;
    let mut output = Vec::with_capacity(row_len * out_h as usize);

    // Copy row by row
    for row in 0..out_h as usize {
        let start = (top as usize + row) * src_stride + left as usize * 3;
        output.extend_from_slice(&buffer.pixels()[start..start + row_len]);
    }

    debug!(x, y, width, height, "extracted crop region");
    Ok(buffer.derive(width as u32, height as u32, output))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x % 256) as u8);
                pixels.push((y % 256) as u8);
                pixels.push(0);
            }
        }
        PixelBuffer::new(width, height, pixels)
    }

    /// Strategy for an image size and a region that fits inside it.
    fn region_strategy() -> impl Strategy<Value = (u32, u32, i32, i32, i32, i32)> {
        (1u32..=60, 1u32..=60).prop_flat_map(|(w, h)| {
            (0..w as i32, 0..h as i32).prop_flat_map(move |(x, y)| {
                (
                    Just(w),
                    Just(h),
                    Just(x),
                    Just(y),
                    1..=(w as i32 - x),
                    1..=(h as i32 - y),
                )
            })
        })
    }

    proptest! {
        /// Property: In-bounds regions always succeed with the requested size.
        #[test]
        fn prop_in_bounds_region_has_requested_size(
            (w, h, x, y, cw, ch) in region_strategy(),
        ) {
            let img = create_test_image(w, h);
            let result = extract_region(img, x, y, cw, ch).unwrap();

            prop_assert_eq!(result.dimensions(), (cw as u32, ch as u32));
            prop_assert_eq!(result.byte_size(), (cw * ch * 3) as usize);
        }

        /// Property: Every extracted pixel comes from the matching source position.
        #[test]
        fn prop_pixels_come_from_offset_position(
            (w, h, x, y, cw, ch) in region_strategy(),
        ) {
            let img = create_test_image(w, h);
            let result = extract_region(img, x, y, cw, ch).unwrap();

            for py in 0..ch as u32 {
                for px in 0..cw as u32 {
                    let expected = [
                        ((px + x as u32) % 256) as u8,
                        ((py + y as u32) % 256) as u8,
                        0,
                    ];
                    prop_assert_eq!(result.pixel_at(px, py), Some(expected));
                }
            }
        }

        /// Property: Regions overflowing the buffer are rejected, never clamped.
        #[test]
        fn prop_overflowing_region_is_rejected(
            (w, h) in (1u32..=60, 1u32..=60),
            overflow in 1i32..=20,
        ) {
            let img = create_test_image(w, h);
            let result = extract_region(img, 0, 0, w as i32 + overflow, h as i32);
            let is_bounds_error = matches!(result, Err(CropError::Bounds { .. }));
            prop_assert!(is_bounds_error);
        }
    }
}
