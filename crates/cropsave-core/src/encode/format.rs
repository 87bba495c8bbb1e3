//! Output formats.

use serde::{Deserialize, Serialize};

/// Compressed raster format written by the save step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossy JPEG; quality applies.
    #[default]
    Jpeg,
    /// Lossless PNG; quality is ignored.
    Png,
    /// Lossless WebP; quality is ignored.
    WebP,
}

impl OutputFormat {
    /// MIME type of the encoded output.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::WebP => "image/webp",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        }
    }

    /// Whether the quality setting changes the output.
    pub fn uses_quality(self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }
}
