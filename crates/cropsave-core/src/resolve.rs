//! Crop geometry resolution.
//!
//! Maps the crop rectangle and image bounds (both in view coordinates) to a
//! crop region in source pixels, and decides whether pixel cropping is
//! needed at all.
//!
//! ```text
//! offset_x = round((crop.left - bounds.left) / scale)
//! offset_y = round((crop.top  - bounds.top)  / scale)
//! width    = round(crop.width()  / scale)
//! height   = round(crop.height() / scale)
//! ```
//!
//! Cropping can be skipped only when the crop rectangle matches the image
//! bounds within `pixel_error` on every edge, the angle is zero and no size
//! limit is active. `pixel_error` allows one extra pixel per 1000 pixels of
//! crop size for accumulated matrix rounding.

use tracing::trace;

use crate::error::{CropError, Result};
use crate::geometry::{round_px, RectF};
use crate::limits::{limit_is_active, SizeLimit};

/// Crop region in source pixels plus the crop decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropGeometry {
    pub offset_x: i32,
    pub offset_y: i32,
    pub width: i32,
    pub height: i32,
    /// Edge tolerance used for the crop decision.
    pub pixel_error: i32,
    /// False when the working buffer can be used as-is.
    pub should_crop: bool,
}

/// Check the transform invariants shared by the resolver and the pipeline.
pub(crate) fn validate_transform(image_rect: &RectF, scale: f32) -> Result<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(CropError::precondition(format!(
            "scale must be a positive finite number, got {scale}"
        )));
    }
    if image_rect.is_empty() {
        return Err(CropError::precondition(
            "image bounds rectangle is empty; the image was never laid out",
        ));
    }
    Ok(())
}

/// Allowed edge slack for a crop of `width x height` source pixels.
pub fn pixel_error(width: i32, height: i32) -> i32 {
    1 + round_px(width.max(height) as f32 / 1000.0)
}

/// Resolve the source-pixel crop region and the crop decision.
///
/// # Errors
///
/// Returns `CropError::Precondition` when `scale` is not strictly positive
/// or `image_rect` is empty.
pub fn resolve_crop(
    crop_rect: &RectF,
    image_rect: &RectF,
    scale: f32,
    angle: f32,
    size_limit: Option<SizeLimit>,
) -> Result<CropGeometry> {
    validate_transform(image_rect, scale)?;

    let offset_x = round_px((crop_rect.left - image_rect.left) / scale);
    let offset_y = round_px((crop_rect.top - image_rect.top) / scale);
    let width = round_px(crop_rect.width() / scale);
    let height = round_px(crop_rect.height() / scale);

    let pixel_error = pixel_error(width, height);
    let tolerance = pixel_error as f32;
    let should_crop = limit_is_active(size_limit)
        || (crop_rect.left - image_rect.left).abs() > tolerance
        || (crop_rect.top - image_rect.top).abs() > tolerance
        || (crop_rect.bottom - image_rect.bottom).abs() > tolerance
        || (crop_rect.right - image_rect.right).abs() > tolerance
        || angle != 0.0;

    trace!(
        offset_x,
        offset_y,
        width,
        height,
        pixel_error,
        should_crop,
        "resolved crop geometry"
    );

    Ok(CropGeometry {
        offset_x,
        offset_y,
        width,
        height,
        pixel_error,
        should_crop,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
