//! Errors raised by pixel transform operations.

use thiserror::Error;

/// Failure inside a resize or rotate operation.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Pixel data length doesn't match the buffer dimensions.
    #[error("Invalid pixel data for a {width}x{height} buffer")]
    InvalidBuffer { width: u32, height: u32 },

    /// Resize factor is zero, negative or not finite.
    #[error("Invalid resize factor: {0}")]
    InvalidFactor(f32),

    /// Target width or height is zero.
    #[error("Invalid target dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Rotation angle is not finite.
    #[error("Invalid rotation angle: {0}")]
    InvalidAngle(f32),
}
