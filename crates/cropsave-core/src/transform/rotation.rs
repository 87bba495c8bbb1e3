//! Whole-buffer rotation about the image centre.
//!
//! Angles are in degrees, positive = clockwise on screen (y grows downwards).
//! The output canvas is the bounding box of the rotated image, so nothing
//! is clipped; areas not covered by the source are filled with black.
//!
//! Multiples of 90° are exact pixel permutations. Any other angle uses
//! inverse mapping: for each output pixel centre we find the source point
//! and interpolate:
//!
//! ```text
//! src_x =  dx * cos(θ) + dy * sin(θ) + src_cx
//! src_y = -dx * sin(θ) + dy * cos(θ) + src_cy
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::TransformError;
use crate::buffer::PixelBuffer;

/// Tolerance used to snap angles onto quarter turns.
const ANGLE_EPSILON: f64 = 1e-4;

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationFilter {
    /// Fast bilinear interpolation.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 interpolation.
    Lanczos3,
}

/// Number of clockwise quarter turns if `angle_degrees` is a multiple of 90°.
fn quarter_turns(angle_degrees: f64) -> Option<u32> {
    let turns = angle_degrees.rem_euclid(360.0) / 90.0;
    let rounded = turns.round();
    if (turns - rounded).abs() * 90.0 < ANGLE_EPSILON {
        Some(rounded as u32 % 4)
    } else {
        None
    }
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// # Example
///
/// ```
/// use cropsave_core::transform::compute_rotated_bounds;
///
/// assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
/// assert_eq!(compute_rotated_bounds(100, 50, 0.0), (100, 50));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f32) -> (u32, u32) {
    let angle = angle_degrees as f64;

    if let Some(turns) = quarter_turns(angle) {
        return if turns % 2 == 1 {
            (height, width)
        } else {
            (width, height)
        };
    }

    let angle_rad = angle.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    // new_w = |w*cos| + |h*sin|
    // new_h = |w*sin| + |h*cos|
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate a buffer clockwise by `angle_degrees` about its centre.
///
/// The input buffer is consumed. A zero (or full-turn) rotation hands the
/// same buffer back; otherwise the input is released once the rotated copy
/// exists.
///
/// # Errors
///
/// Returns `TransformError::InvalidAngle` for a non-finite angle and
/// `TransformError::InvalidBuffer` if the pixel data doesn't match the
/// buffer's dimensions.
pub fn rotate(
    buffer: PixelBuffer,
    angle_degrees: f32,
    filter: InterpolationFilter,
) -> Result<PixelBuffer, TransformError> {
    if !angle_degrees.is_finite() {
        return Err(TransformError::InvalidAngle(angle_degrees));
    }
    if !buffer.is_usable() {
        return Err(TransformError::InvalidBuffer {
            width: buffer.width(),
            height: buffer.height(),
        });
    }

    let rotated = match quarter_turns(angle_degrees as f64) {
        Some(0) => return Ok(buffer),
        Some(turns) => rotate_quarter_turns(&buffer, turns)?,
        None => rotate_arbitrary(&buffer, angle_degrees as f64, filter),
    };

    debug!(
        angle = angle_degrees,
        from_width = buffer.width(),
        from_height = buffer.height(),
        width = rotated.width(),
        height = rotated.height(),
        "rotated buffer"
    );
    Ok(rotated)
}

fn rotate_quarter_turns(buffer: &PixelBuffer, turns: u32) -> Result<PixelBuffer, TransformError> {
    let view = buffer
        .as_rgb_view()
        .ok_or_else(|| TransformError::InvalidBuffer {
            width: buffer.width(),
            height: buffer.height(),
        })?;

    let rotated = match turns {
        1 => image::imageops::rotate90(&view),
        2 => image::imageops::rotate180(&view),
        _ => image::imageops::rotate270(&view),
    };
    Ok(buffer.derive_from_rgb(rotated))
}

fn rotate_arbitrary(
    buffer: &PixelBuffer,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> PixelBuffer {
    let (src_w, src_h) = (buffer.width() as f64, buffer.height() as f64);
    let (dst_w, dst_h) =
        compute_rotated_bounds(buffer.width(), buffer.height(), angle_degrees as f32);

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; dst_w as usize * dst_h as usize * 3];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Pixel centre relative to the canvas centre
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos + dy * sin + src_cx;
            let src_y = -dx * sin + dy * cos + src_cy;

            if src_x < 0.0 || src_x > src_w || src_y < 0.0 || src_y > src_h {
                continue;
            }

            // Back to pixel-index space (index i covers [i, i + 1))
            let (sx, sy) = (src_x - 0.5, src_y - 0.5);
            let pixel = match filter {
                InterpolationFilter::Bilinear => sample_bilinear(buffer, sx, sy),
                InterpolationFilter::Lanczos3 => sample_lanczos3(buffer, sx, sy),
            };

            let dst_idx = (dst_y as usize * dst_w as usize + dst_x as usize) * 3;
            output[dst_idx..dst_idx + 3].copy_from_slice(&pixel);
        }
    }

    buffer.derive(dst_w, dst_h, output)
}

/// Get a pixel as [f64; 3], clamping the coordinates to the buffer edge.
#[inline]
fn get_pixel_clamped(buffer: &PixelBuffer, px: i64, py: i64) -> [f64; 3] {
    let x = px.clamp(0, buffer.width() as i64 - 1) as usize;
    let y = py.clamp(0, buffer.height() as i64 - 1) as usize;
    let idx = (y * buffer.width() as usize + x) * 3;
    let pixels = buffer.pixels();
    [
        pixels[idx] as f64,
        pixels[idx + 1] as f64,
        pixels[idx + 2] as f64,
    ]
}

/// Sample a pixel using bilinear interpolation of the 4 nearest pixels.
fn sample_bilinear(buffer: &PixelBuffer, x: f64, y: f64) -> [u8; 3] {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_clamped(buffer, x0, y0);
    let p10 = get_pixel_clamped(buffer, x0 + 1, y0);
    let p01 = get_pixel_clamped(buffer, x0, y0 + 1);
    let p11 = get_pixel_clamped(buffer, x0 + 1, y0 + 1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }
    result
}

/// Sample a pixel using Lanczos3 interpolation over a 6x6 neighbourhood.
fn sample_lanczos3(buffer: &PixelBuffer, x: f64, y: f64) -> [u8; 3] {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 3];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;
            let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);

            let pixel = get_pixel_clamped(buffer, px, py);
            for i in 0..3 {
                sum[i] += pixel[i] * weight;
            }
            weight_sum += weight;
        }
    }

    if weight_sum.abs() < f64::EPSILON {
        return sample_bilinear(buffer, x, y);
    }

    let mut result = [0u8; 3];
    for i in 0..3 {
        result[i] = (sum[i] / weight_sum).clamp(0.0, 255.0).round() as u8;
    }
    result
}

/// Lanczos kernel: `sinc(x) * sinc(x / a)` for `|x| < a`, zero otherwise.
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;
    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
