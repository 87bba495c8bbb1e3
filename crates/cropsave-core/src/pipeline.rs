//! The crop pipeline: downscale, rotate, crop, encode, write.
//!
//! # Stage Order
//!
//! 1. Downscale the whole buffer when a size limit is active and the crop
//!    would exceed it; the scale factor is divided by the resize factor.
//! 2. Rotate the whole buffer about its centre when the angle is non-zero.
//! 3. Resolve the crop geometry with the updated scale.
//! 4. Extract the crop region, or pass the buffer through untouched.
//! 5. (`save` only) Encode in memory and write the bytes to the sink.
//!
//! The pipeline owns its working buffer. Each stage consumes the buffer and
//! returns the same one or a replacement, so exactly one buffer is alive
//! between stages and a released buffer can never be reached again.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::encode::{encode_buffer, OutputFormat};
use crate::error::{CropError, Result, Stage};
use crate::geometry::RectF;
use crate::limits::SizeLimit;
use crate::resolve::{resolve_crop, validate_transform, CropGeometry};
use crate::sink::{write_all_to, OutputSink};
use crate::transform::{extract_region, rotate, scale_by, FilterType, InterpolationFilter};

/// Default encoding quality.
pub const DEFAULT_QUALITY: u8 = 100;

fn default_quality() -> u8 {
    DEFAULT_QUALITY
}

/// Snapshot of the view transform plus output settings for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRequest {
    /// Visible crop window, view coordinates.
    pub crop_rect: RectF,
    /// Current on-screen extent of the image, view coordinates.
    pub image_rect: RectF,
    /// Source-pixel to view-pixel ratio; must be positive.
    pub scale: f32,
    /// Rotation in degrees, clockwise.
    #[serde(default)]
    pub angle: f32,
    #[serde(default)]
    pub size_limit: Option<SizeLimit>,
    #[serde(default)]
    pub format: OutputFormat,
    /// Encoding quality, 0-100.
    #[serde(default = "default_quality")]
    pub quality: u8,
    #[serde(default)]
    pub resize_filter: FilterType,
    #[serde(default)]
    pub rotation_filter: InterpolationFilter,
}

impl CropRequest {
    /// Request with no rotation, no size limit and default output settings.
    pub fn new(crop_rect: RectF, image_rect: RectF, scale: f32) -> Self {
        Self {
            crop_rect,
            image_rect,
            scale,
            angle: 0.0,
            size_limit: None,
            format: OutputFormat::default(),
            quality: DEFAULT_QUALITY,
            resize_filter: FilterType::default(),
            rotation_filter: InterpolationFilter::default(),
        }
    }

    /// Check the request invariants.
    ///
    /// # Errors
    ///
    /// `CropError::Precondition` for a non-positive scale, an empty image
    /// rectangle, a crop rectangle with a non-finite edge, a non-finite angle
    /// or a quality above 100.
    pub fn validate(&self) -> Result<()> {
        validate_transform(&self.image_rect, self.scale)?;
        let crop = &self.crop_rect;
        if ![crop.left, crop.top, crop.right, crop.bottom]
            .iter()
            .all(|edge| edge.is_finite())
        {
            return Err(CropError::precondition(format!(
                "crop rectangle edges must be finite, got {crop:?}"
            )));
        }
        if !self.angle.is_finite() {
            return Err(CropError::precondition(format!(
                "angle must be finite, got {}",
                self.angle
            )));
        }
        if self.quality > 100 {
            return Err(CropError::precondition(format!(
                "quality must be in 0..=100, got {}",
                self.quality
            )));
        }
        Ok(())
    }
}

/// Result of [`CropPipeline::run`].
#[derive(Debug)]
pub struct CroppedImage {
    /// The final buffer.
    pub buffer: PixelBuffer,
    /// Geometry resolved after the downscale and rotation stages.
    pub geometry: CropGeometry,
    /// Scale factor after the downscale stage.
    pub scale: f32,
}

/// A validated, ready-to-run crop.
#[derive(Debug)]
pub struct CropPipeline {
    buffer: PixelBuffer,
    request: CropRequest,
}

impl CropPipeline {
    /// Validate the inputs and take ownership of the source buffer.
    ///
    /// # Errors
    ///
    /// `CropError::Precondition` when the buffer is missing or unusable, or
    /// when [`CropRequest::validate`] fails. Nothing is mutated on failure.
    pub fn new(buffer: impl Into<Option<PixelBuffer>>, request: CropRequest) -> Result<Self> {
        let buffer = buffer
            .into()
            .ok_or_else(|| CropError::precondition("source buffer is missing"))?;
        if !buffer.is_usable() {
            return Err(CropError::precondition(format!(
                "source buffer is not usable ({}x{}, {} bytes)",
                buffer.width(),
                buffer.height(),
                buffer.byte_size()
            )));
        }
        request.validate()?;

        Ok(Self { buffer, request })
    }

    pub fn request(&self) -> &CropRequest {
        &self.request
    }

    /// Run the transform stages and return the final buffer.
    ///
    /// When no stage changes anything the source buffer itself is returned.
    pub fn produce_cropped_image(self) -> Result<PixelBuffer> {
        self.run().map(|cropped| cropped.buffer)
    }

    /// Run the transform stages, keeping the resolved geometry alongside
    /// the final buffer.
    pub fn run(self) -> Result<CroppedImage> {
        let Self { buffer, request } = self;
        let mut scale = request.scale;

        debug!(
            width = buffer.width(),
            height = buffer.height(),
            scale,
            angle = request.angle,
            "starting crop pipeline"
        );

        let buffer = downscale(buffer, &request, &mut scale)?;

        let buffer = if request.angle != 0.0 {
            rotate(buffer, request.angle, request.rotation_filter)
                .map_err(|e| CropError::pipeline(Stage::Rotate, e))?
        } else {
            buffer
        };

        let geometry = resolve_crop(
            &request.crop_rect,
            &request.image_rect,
            scale,
            request.angle,
            request.size_limit,
        )?;
        debug!(?geometry, "crop decision");

        let buffer = crop(buffer, &geometry)?;
        Ok(CroppedImage {
            buffer,
            geometry,
            scale,
        })
    }

    /// Run the pipeline and return the encoded bytes.
    pub fn save_to_vec(self) -> Result<Vec<u8>> {
        let format = self.request.format;
        let quality = self.request.quality;

        let cropped = self.produce_cropped_image()?;
        let bytes = encode_buffer(&cropped, format, quality)
            .map_err(|e| CropError::pipeline(Stage::Encode, e))?;
        drop(cropped);

        Ok(bytes)
    }

    /// Run the pipeline, encode the result and write it to `sink`.
    ///
    /// The sink is opened only after encoding succeeded, so a failed crop
    /// never truncates the destination.
    ///
    /// # Errors
    ///
    /// `CropError::Io` when the sink cannot be opened or written, plus every
    /// error of [`CropPipeline::produce_cropped_image`].
    pub fn save<S: OutputSink + ?Sized>(self, sink: &S) -> Result<()> {
        let bytes = self.save_to_vec()?;
        write_all_to(sink, &bytes)?;
        Ok(())
    }
}

/// Shrink the whole buffer when the crop would exceed the size limit.
fn downscale(buffer: PixelBuffer, request: &CropRequest, scale: &mut f32) -> Result<PixelBuffer> {
    let Some(limit) = request.size_limit.filter(SizeLimit::is_active) else {
        return Ok(buffer);
    };

    let crop_width = request.crop_rect.width() / *scale;
    let crop_height = request.crop_rect.height() / *scale;
    let (max_width, max_height) = (limit.max_width as f32, limit.max_height as f32);

    if crop_width <= max_width && crop_height <= max_height {
        return Ok(buffer);
    }

    let resize_scale = (max_width / crop_width).min(max_height / crop_height);
    let resized = scale_by(buffer, resize_scale, request.resize_filter)
        .map_err(|e| CropError::pipeline(Stage::Resize, e))?;
    *scale /= resize_scale;

    debug!(resize_scale, scale = *scale, "downscaled to size limit");
    Ok(resized)
}

fn crop(buffer: PixelBuffer, geometry: &CropGeometry) -> Result<PixelBuffer> {
    if !geometry.should_crop {
        return Ok(buffer);
    }
    extract_region(
        buffer,
        geometry.offset_x,
        geometry.offset_y,
        geometry.width,
        geometry.height,
    )
}
