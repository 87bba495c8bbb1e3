//! Crop pipeline WASM bindings.
//!
//! Requests are plain JavaScript objects matching the core `CropRequest`
//! (camelCase keys). Errors surface as JavaScript `Error` objects.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, encode_cropped } from '@cropsave/wasm';
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const jpeg = encode_cropped(image, {
//!   cropRect: { left: 40, top: 40, right: 440, bottom: 340 },
//!   imageRect: { left: 0, top: 0, right: 540, bottom: 720 },
//!   scale: 0.5,
//!   angle: 90,
//!   sizeLimit: { maxWidth: 1080, maxHeight: 1080 },
//! });
//! ```

use std::fmt::Display;

use cropsave_core::{limits, CropPipeline, CropRequest, PixelBuffer, RectF};
use wasm_bindgen::prelude::*;

use crate::types::{JsCropGeometry, JsPixelBuffer};

fn js_error(message: impl Display) -> JsValue {
    js_sys::Error::new(&message.to_string()).into()
}

fn parse_request(value: JsValue) -> Result<CropRequest, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| js_error(format!("Invalid crop request: {}", e)))
}

/// Decode JPEG, PNG or WebP bytes into an RGB buffer.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    PixelBuffer::decode(bytes)
        .map(JsPixelBuffer::from_buffer)
        .map_err(js_error)
}

/// Run the crop stages and return the final image.
///
/// Takes ownership of `image`.
#[wasm_bindgen]
pub fn crop_image(image: JsPixelBuffer, request: JsValue) -> Result<JsPixelBuffer, JsValue> {
    let request = parse_request(request)?;
    crop_buffer(image, request).map_err(js_error)
}

/// Run the crop stages and return the encoded bytes as a `Uint8Array`.
///
/// Takes ownership of `image`. The output format and quality come from the
/// request's `format` and `quality` fields (JPEG at 100 by default).
#[wasm_bindgen]
pub fn encode_cropped(image: JsPixelBuffer, request: JsValue) -> Result<Vec<u8>, JsValue> {
    let request = parse_request(request)?;
    encode_buffer(image, request).map_err(js_error)
}

/// Resolve the source-pixel crop region for a request without touching pixels.
#[wasm_bindgen]
pub fn resolve_crop_geometry(request: JsValue) -> Result<JsCropGeometry, JsValue> {
    let request = parse_request(request)?;
    cropsave_core::resolve_crop(
        &request.crop_rect,
        &request.image_rect,
        request.scale,
        request.angle,
        request.size_limit,
    )
    .map(JsCropGeometry::from)
    .map_err(js_error)
}

/// Largest bitmap edge worth decoding for a screen of this size.
///
/// Pass the canvas and GPU texture limits when known; `undefined` or 0
/// means no limit.
#[wasm_bindgen]
pub fn max_bitmap_size(
    screen_width: u32,
    screen_height: u32,
    max_canvas_size: Option<u32>,
    max_texture_size: Option<u32>,
) -> u32 {
    limits::max_bitmap_size(screen_width, screen_height, max_canvas_size, max_texture_size)
}

/// Map an initial crop rectangle from bitmap pixels into laid-out coordinates.
///
/// `init_crop` and the returned value are `{left, top, right, bottom}` objects.
#[wasm_bindgen]
pub fn fit_initial_crop_rect(
    bitmap_width: u32,
    bitmap_height: u32,
    laid_out_width: f32,
    laid_out_height: f32,
    init_crop: JsValue,
) -> Result<JsValue, JsValue> {
    let init_crop: RectF = serde_wasm_bindgen::from_value(init_crop)
        .map_err(|e| js_error(format!("Invalid crop rectangle: {}", e)))?;
    let fitted = limits::fit_initial_crop_rect(
        bitmap_width,
        bitmap_height,
        laid_out_width,
        laid_out_height,
        init_crop,
    );
    serde_wasm_bindgen::to_value(&fitted).map_err(js_error)
}

pub(crate) fn crop_buffer(
    image: JsPixelBuffer,
    request: CropRequest,
) -> cropsave_core::Result<JsPixelBuffer> {
    CropPipeline::new(image.into_buffer(), request)?
        .produce_cropped_image()
        .map(JsPixelBuffer::from_buffer)
}

pub(crate) fn encode_buffer(
    image: JsPixelBuffer,
    request: CropRequest,
) -> cropsave_core::Result<Vec<u8>> {
    CropPipeline::new(image.into_buffer(), request)?.save_to_vec()
}
