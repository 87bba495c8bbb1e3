//! Owned RGB working buffers.
//!
//! A [`PixelBuffer`] is move-only from the pipeline's point of view: every
//! stage takes the buffer by value and either hands the same buffer back or
//! returns a new one, dropping (releasing) its input. Buffers may carry a
//! [`ReleaseTracker`] so callers and tests can observe how many buffers were
//! allocated and released during a run.
//!
//! # Layout
//!
//! - 3 bytes per pixel (R, G, B)
//! - Row-major order, no row padding
//! - Origin at the top-left corner

mod pixel_buffer;
mod tracker;

pub use pixel_buffer::PixelBuffer;
pub use tracker::ReleaseTracker;
