//! Cropsave WASM - WebAssembly bindings for the crop pipeline
//!
//! This crate exposes cropsave-core to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data and crop geometry
//! - `crop` - decode, crop, encode and sizing bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, crop_image } from '@cropsave/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const cropped = crop_image(image, request);
//! console.log(`Cropped to ${cropped.width}x${cropped.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod crop;
mod types;

pub use crop::{
    crop_image, decode_image, encode_cropped, fit_initial_crop_rect, max_bitmap_size,
    resolve_crop_geometry,
};
pub use types::{JsCropGeometry, JsPixelBuffer};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
