//! Error taxonomy for the crop pipeline.
//!
//! - `Precondition`: caller misuse (missing buffer, bad scale, empty bounds)
//! - `Bounds`: resolved crop region falls outside the working buffer
//! - `Io`: the output sink could not be opened or written
//! - `Pipeline`: a resize/rotate/encode step failed; the cause is attached

use std::fmt;

use thiserror::Error;

/// Pipeline stage that produced a wrapped failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resize,
    Rotate,
    Encode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Resize => "resize",
            Stage::Rotate => "rotate",
            Stage::Encode => "encode",
        };
        f.write_str(name)
    }
}

/// Errors returned by the resolver and the pipeline.
#[derive(Debug, Error)]
pub enum CropError {
    /// Invalid input supplied by the caller. Never retried.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Crop region does not fit inside the working buffer.
    #[error(
        "Crop region ({x}, {y}, {width}x{height}) outside {buffer_width}x{buffer_height} buffer"
    )]
    Bounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        buffer_width: u32,
        buffer_height: u32,
    },

    /// Output sink could not be opened or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A lower-level transform or codec failure.
    #[error("{stage} stage failed: {source}")]
    Pipeline {
        stage: Stage,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CropError {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        CropError::Precondition(message.into())
    }

    pub(crate) fn pipeline<E>(stage: Stage, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CropError::Pipeline {
            stage,
            source: Box::new(source),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CropError>;
