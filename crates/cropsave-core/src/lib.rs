//! Cropsave Core - viewport crop pipeline
//!
//! This crate turns a source bitmap plus the on-screen transform state
//! (scale, rotation, crop rectangle and image bounds) into the final
//! cropped, rotated and resized image, encodes it and writes it out.
//!
//! # Modules
//!
//! - `resolve` - maps view-space rectangles to a source-pixel crop region
//! - `pipeline` - runs downscale, rotate, crop, encode and write in order
//! - `transform` - the pixel operations used by the pipeline
//! - `buffer` - the owned working buffer and its release tracking
//! - `encode` - JPEG/PNG/WebP encoding
//! - `sink` - output destinations
//! - `limits` - size limits and initial crop placement
//!
//! # Example
//!
//! ```ignore
//! use cropsave_core::{CropPipeline, CropRequest, FileSink, PixelBuffer, RectF};
//!
//! let source = PixelBuffer::decode(&std::fs::read("photo.jpg")?)?;
//! let request = CropRequest::new(
//!     RectF::new(40.0, 40.0, 440.0, 340.0), // crop window
//!     RectF::new(0.0, 0.0, 540.0, 720.0),   // image on screen
//!     0.5,                                  // view px per source px
//! );
//! CropPipeline::new(source, request)?.save(&FileSink::new("cropped.jpg"))?;
//! ```

pub mod buffer;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod limits;
pub mod pipeline;
pub mod resolve;
pub mod sink;
pub mod transform;

pub use buffer::{PixelBuffer, ReleaseTracker};
pub use encode::OutputFormat;
pub use error::{CropError, Result, Stage};
pub use geometry::RectF;
pub use limits::SizeLimit;
pub use pipeline::{CropPipeline, CropRequest, CroppedImage};
pub use resolve::{resolve_crop, CropGeometry};
pub use sink::{FileSink, MemorySink, OutputSink};
pub use transform::{FilterType, InterpolationFilter};
