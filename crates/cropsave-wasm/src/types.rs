//! WASM-compatible wrapper types for image data.
//!
//! These types wrap the core cropsave types and handle the conversion
//! between Rust and JavaScript data representations.

use cropsave_core::{CropGeometry, PixelBuffer};
use wasm_bindgen::prelude::*;

/// An RGB image held in WASM memory.
///
/// # Memory Management
///
/// Passing a `JsPixelBuffer` to [`crate::crop_image`] or
/// [`crate::encode_cropped`] moves it into the pipeline; the JavaScript
/// handle is invalidated and must not be used afterwards. Call `pixels()`
/// first if the source data is still needed.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a buffer from dimensions and RGB pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsPixelBuffer {
        JsPixelBuffer {
            inner: PixelBuffer::new(width, height, pixels),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns RGB pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn into_buffer(self) -> PixelBuffer {
        self.inner
    }
}

/// Resolved crop region in source pixels.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsCropGeometry {
    inner: CropGeometry,
}

#[wasm_bindgen]
impl JsCropGeometry {
    #[wasm_bindgen(getter)]
    pub fn offset_x(&self) -> i32 {
        self.inner.offset_x
    }

    #[wasm_bindgen(getter)]
    pub fn offset_y(&self) -> i32 {
        self.inner.offset_y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> i32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> i32 {
        self.inner.height
    }

    #[wasm_bindgen(getter)]
    pub fn pixel_error(&self) -> i32 {
        self.inner.pixel_error
    }

    /// False when the image can be saved without pixel cropping
    #[wasm_bindgen(getter)]
    pub fn should_crop(&self) -> bool {
        self.inner.should_crop
    }
}

impl From<CropGeometry> for JsCropGeometry {
    fn from(inner: CropGeometry) -> Self {
        Self { inner }
    }
}
