#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Browser entry point.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    game_core::run().map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Native builds start through `main`.
#[cfg(not(target_arch = "wasm32"))]
pub fn start() {}
