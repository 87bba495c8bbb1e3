//! Output size limits and initial crop placement.
//!
//! The maximum working dimension is derived outside the core (screen size,
//! canvas and GPU texture limits) and injected as plain numbers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::RectF;

/// Largest acceptable crop output, in source pixels.
///
/// A zero in either dimension disables the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeLimit {
    pub max_width: u32,
    pub max_height: u32,
}

impl SizeLimit {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// Limit both dimensions to the same opaque maximum dimension.
    pub fn square(max_dimension: u32) -> Self {
        Self::new(max_dimension, max_dimension)
    }

    /// Both dimensions must be positive for the limit to apply.
    pub fn is_active(&self) -> bool {
        self.max_width > 0 && self.max_height > 0
    }
}

/// Whether an optional limit is present and active.
pub(crate) fn limit_is_active(limit: Option<SizeLimit>) -> bool {
    limit.is_some_and(|l| l.is_active())
}

/// Calculate the maximum working bitmap dimension.
///
/// Starts from the screen diagonal and clamps it by the canvas and texture
/// limits when those are known (`None` or zero means unknown).
///
/// # Example
///
/// ```
/// use cropsave_core::limits::max_bitmap_size;
///
/// assert_eq!(max_bitmap_size(1080, 1920, None, Some(4096)), 2202);
/// assert_eq!(max_bitmap_size(1080, 1920, Some(2048), Some(4096)), 2048);
/// ```
pub fn max_bitmap_size(
    screen_width: u32,
    screen_height: u32,
    max_canvas_size: Option<u32>,
    max_texture_size: Option<u32>,
) -> u32 {
    let w = screen_width as f64;
    let h = screen_height as f64;
    let mut max_size = (w * w + h * h).sqrt() as u32;

    if let Some(canvas) = max_canvas_size.filter(|&c| c > 0) {
        max_size = max_size.min(canvas);
    }
    if let Some(texture) = max_texture_size.filter(|&t| t > 0) {
        max_size = max_size.min(texture);
    }

    debug!(max_size, "computed max bitmap size");
    max_size
}

/// Map an initial crop rectangle from bitmap pixels into the coordinates of
/// the laid-out image.
///
/// `laid_out_width`/`laid_out_height` are the image's size once it is first
/// laid out on screen. When the bitmap was shrunk horizontally but not
/// vertically, the horizontal edges are multiplied by the width ratio;
/// otherwise every edge is divided by its axis ratio.
pub fn fit_initial_crop_rect(
    bitmap_width: u32,
    bitmap_height: u32,
    laid_out_width: f32,
    laid_out_height: f32,
    init_crop: RectF,
) -> RectF {
    if laid_out_width <= 0.0 || laid_out_height <= 0.0 {
        return init_crop;
    }

    let scale_x = bitmap_width as f32 / laid_out_width;
    let scale_y = bitmap_height as f32 / laid_out_height;

    let mut crop = init_crop;
    if scale_x <= 1.0 && scale_y >= 1.0 {
        crop.left *= scale_x;
        crop.right *= scale_x;
    } else {
        crop.left /= scale_x;
        crop.right /= scale_x;
    }
    crop.top /= scale_y;
    crop.bottom /= scale_y;

    crop
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_limit_active() {
        assert!(SizeLimit::new(300, 300).is_active());
        assert!(!SizeLimit::new(0, 300).is_active());
        assert!(!SizeLimit::new(300, 0).is_active());
        assert!(!SizeLimit::default().is_active());
    }

    #[test]
    fn test_limit_is_active() {
        assert!(limit_is_active(Some(SizeLimit::square(10))));
        assert!(!limit_is_active(Some(SizeLimit::square(0))));
        assert!(!limit_is_active(None));
    }

    #[test]
    fn test_max_bitmap_size_diagonal() {
        // sqrt(3^2 + 4^2) = 5
        assert_eq!(max_bitmap_size(3, 4, None, None), 5);
        assert_eq!(max_bitmap_size(1080, 1920, None, None), 2202);
    }

    #[test]
    fn test_max_bitmap_size_clamped() {
        assert_eq!(max_bitmap_size(1080, 1920, Some(2048), None), 2048);
        assert_eq!(max_bitmap_size(1080, 1920, Some(4096), Some(1024)), 1024);
    }

    #[test]
    fn test_max_bitmap_size_ignores_zero_limits() {
        assert_eq!(max_bitmap_size(1080, 1920, Some(0), Some(0)), 2202);
    }

    #[test]
    fn test_fit_initial_crop_divides_when_downscaled() {
        // 2000x1000 bitmap laid out at 1000x500: both ratios are 2
        let crop = fit_initial_crop_rect(
            2000,
            1000,
            1000.0,
            500.0,
            RectF::new(200.0, 100.0, 1800.0, 900.0),
        );
        assert_eq!(crop, RectF::new(100.0, 50.0, 900.0, 450.0));
    }

    #[test]
    fn test_fit_initial_crop_multiplies_when_width_shrunk() {
        // Width ratio 0.5, height ratio 2
        let crop = fit_initial_crop_rect(
            500,
            1000,
            1000.0,
            500.0,
            RectF::new(100.0, 100.0, 400.0, 900.0),
        );
        assert_eq!(crop, RectF::new(50.0, 50.0, 200.0, 450.0));
    }

    #[test]
    fn test_fit_initial_crop_ignores_empty_layout() {
        let init = RectF::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(fit_initial_crop_rect(100, 100, 0.0, 10.0, init), init);
    }

    #[test]
    fn test_size_limit_deserialize() {
        let limit: SizeLimit = serde_json::from_str(r#"{"maxWidth":300,"maxHeight":200}"#).unwrap();
        assert_eq!(limit, SizeLimit::new(300, 200));
    }
}
