//! WASM bindings for the radar-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.

use wasm_bindgen::prelude::*;

use crate::layout::{RadarConfig, grid_rings};
use crate::output::{error_json, layout_json};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

/// Lay out a radar request and return the JSON result.
/// Errors come back as `{"error": {"message": ...}}`.
#[wasm_bindgen]
pub fn compute_radar(input: &str) -> String {
    match layout_json(input) {
        Ok(json) => json,
        Err(e) => {
            console_error(&format!("Error computing radar layout: {}", e));
            error_json(&e)
        }
    }
}

/// Grid ring radii for the default canvas, as a JSON array.
#[wasm_bindgen]
pub fn default_rings(count: usize) -> String {
    let rings = grid_rings(count, RadarConfig::default().max_radius());
    serde_json::to_string(&rings).unwrap_or_else(|_| "[]".to_string())
}
