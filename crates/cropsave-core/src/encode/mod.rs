//! Image encoding for the save step.
//!
//! This module provides functionality for:
//! - Encoding the final RGB buffer to JPEG, PNG or WebP
//! - Choosing the output format and quality per invocation
//!
//! Encoding always targets an in-memory byte vector; writing the bytes to a
//! destination is the job of [`crate::sink`].
//!
//! # Examples
//!
//! ```ignore
//! use cropsave_core::encode::{encode, OutputFormat};
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let bytes = encode(&pixels, 100, 100, OutputFormat::Jpeg, 90).unwrap();
//! println!("Encoded {} bytes", bytes.len());
//! ```

mod encoder;
mod format;

pub use encoder::{encode, encode_buffer, encode_jpeg, EncodeError};
pub use format::OutputFormat;
