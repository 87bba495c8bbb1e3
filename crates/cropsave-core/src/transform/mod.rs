//! Pixel operations applied to the working buffer: resize, rotation and
//! crop extraction.
//!
//! # Operation Order
//!
//! The crop pipeline applies these in a fixed order:
//! 1. Resize (only when a size limit is active)
//! 2. Rotation (only when the angle is non-zero)
//! 3. Crop extraction (only when the resolver says it is needed)
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Crop regions are whole source pixels
//! - Origin is top-left corner
//!
//! Every operation takes its input buffer by value and returns either the
//! same buffer or a replacement; the input is released in the latter case.

mod crop;
mod error;
mod resize;
mod rotation;

pub use crop::extract_region;
pub use error::TransformError;
pub use resize::{resize, scale_by, FilterType};
pub use rotation::{compute_rotated_bounds, rotate, InterpolationFilter};
