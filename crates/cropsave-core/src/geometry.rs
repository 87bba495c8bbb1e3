//! View-space geometry: rectangles and pixel rounding.
//!
//! Rectangles use floating point edges in view coordinates (y grows
//! downwards, origin at the top-left corner of the view).

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle described by its four edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    /// Create a rectangle from its edges.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size.
    pub fn from_size(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// True when the rectangle has zero or negative extent on either axis.
    ///
    /// NaN edges also count as empty.
    pub fn is_empty(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }
}

/// Round a view-space measurement to a whole pixel.
///
/// Halves round away from zero, so `2.5 -> 3` and `-2.5 -> -3`.
#[inline]
pub fn round_px(value: f32) -> i32 {
    value.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let rect = RectF::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(rect.width(), 100.0);
        assert_eq!(rect.height(), 50.0);
        assert!(!rect.is_empty());
    }

    #[test]
    fn test_rect_from_size() {
        let rect = RectF::from_size(5.0, 5.0, 10.0, 20.0);
        assert_eq!(rect, RectF::new(5.0, 5.0, 15.0, 25.0));
    }

    #[test]
    fn test_rect_empty() {
        assert!(RectF::default().is_empty());
        assert!(RectF::new(0.0, 0.0, 0.0, 10.0).is_empty());
        assert!(RectF::new(0.0, 10.0, 10.0, 5.0).is_empty());
        assert!(RectF::new(f32::NAN, 0.0, 10.0, 10.0).is_empty());
    }

    #[test]
    fn test_round_px_half_away_from_zero() {
        assert_eq!(round_px(0.5), 1);
        assert_eq!(round_px(1.5), 2);
        assert_eq!(round_px(2.5), 3);
        assert_eq!(round_px(-0.5), -1);
        assert_eq!(round_px(-2.5), -3);
        assert_eq!(round_px(2.49), 2);
    }

    #[test]
    fn test_rect_serde_roundtrip_shape() {
        let json = r#"{"left":1.0,"top":2.0,"right":3.0,"bottom":4.0}"#;
        let rect: RectF = serde_json::from_str(json).unwrap();
        assert_eq!(rect, RectF::new(1.0, 2.0, 3.0, 4.0));
    }
}
