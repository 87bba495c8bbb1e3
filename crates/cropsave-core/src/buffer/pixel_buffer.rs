//! The working pixel buffer.

use super::ReleaseTracker;

/// An RGB8 image owned by exactly one pipeline stage at a time.
///
/// Dropping the buffer releases its pixel memory and, when tracked, records
/// the release with its [`ReleaseTracker`].
#[derive(Debug)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    tracker: Option<ReleaseTracker>,
}

impl PixelBuffer {
    /// Create an untracked buffer from raw RGB bytes.
    ///
    /// The pixel length is not checked here; see [`PixelBuffer::is_usable`].
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
            tracker: None,
        }
    }

    /// Create a buffer from an `image::RgbImage`.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Decode an encoded image (JPEG, PNG or WebP) into an RGB buffer.
    pub fn decode(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_rgb_image(img.into_rgb8()))
    }

    /// Attach a release tracker and register this buffer with it.
    ///
    /// Any tracker attached earlier is treated as if the buffer had been
    /// released from it.
    pub fn with_tracker(mut self, tracker: &ReleaseTracker) -> Self {
        if let Some(previous) = self.tracker.take() {
            previous.on_release();
        }
        tracker.on_allocate();
        self.tracker = Some(tracker.clone());
        self
    }

    /// Build a new buffer that shares this buffer's tracker.
    pub(crate) fn derive(&self, width: u32, height: u32, pixels: Vec<u8>) -> Self {
        if let Some(tracker) = &self.tracker {
            tracker.on_allocate();
        }
        Self {
            width,
            height,
            pixels,
            tracker: self.tracker.clone(),
        }
    }

    /// Build a tracked buffer from the result of an `image` crate operation.
    pub(crate) fn derive_from_rgb(&self, img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        self.derive(width, height, img.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// RGB pixel data in row-major order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer and return its pixel data.
    pub fn into_pixels(mut self) -> Vec<u8> {
        std::mem::take(&mut self.pixels)
    }

    pub fn tracker(&self) -> Option<&ReleaseTracker> {
        self.tracker.as_ref()
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// A buffer is usable when it has a non-zero size and its pixel data
    /// matches `width * height * 3`.
    pub fn is_usable(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.pixel_count().checked_mul(3) == Some(self.pixels.len() as u64)
    }

    /// Read the pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        let px = self.pixels.get(idx..idx + 3)?;
        Some([px[0], px[1], px[2]])
    }

    /// Borrow the pixels as an `image` crate view without copying.
    pub(crate) fn as_rgb_view(&self) -> Option<image::ImageBuffer<image::Rgb<u8>, &[u8]>> {
        image::ImageBuffer::from_raw(self.width, self.height, self.pixels.as_slice())
    }

    /// Copy the pixels into an owned `image::RgbImage`.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }
}

impl Clone for PixelBuffer {
    /// Clones are independent allocations and are tracked separately.
    fn clone(&self) -> Self {
        self.derive(self.width, self.height, self.pixels.clone())
    }
}

impl Drop for PixelBuffer {
    fn drop(&mut self) {
        if let Some(tracker) = self.tracker.take() {
            tracker.on_release();
        }
    }
}
