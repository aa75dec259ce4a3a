// src/lib.rs

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

pub mod app_logic;
pub mod config;
pub mod material;
pub mod parser;
pub mod stress;
pub mod sweep;
pub mod vessel;

// When the "wasm" feature is enabled, use wasm_bindgen to expose the rating
// calculation to the host environment.
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn rate_vessel(inputs: &[f64]) -> Vec<f64> {
    if inputs.len() != 6 {
        return Vec::new();
    }
    let inputs = vessel::VesselInputs {
        external_pressure: inputs[0],
        internal_pressure: inputs[1],
        outer_diameter: inputs[2],
        inner_diameter: inputs[3],
        yield_stress: inputs[4],
        derated_yield_stress: inputs[5],
    };
    // Flatten the rating into a single Vec for the JavaScript side; invalid
    // geometry comes back as an empty Vec.
    match vessel::rate(&inputs) {
        Ok(rating) => vec![
            rating.max_stress,
            rating.average_stress,
            rating.safety_factor_room,
            rating.safety_factor_derated,
            rating.max_external_room,
            rating.max_internal_room,
            rating.max_external_derated,
            rating.max_internal_derated,
        ],
        Err(_) => Vec::new(),
    }
}
