//! wasm-bindgen exports
//!
//! Parameters and results cross the boundary as JSON strings. Parameters may
//! be flat or use the server's nested `{"config": {...}, "seed", "test_mode"}`
//! shape.

use wasm_bindgen::prelude::*;

use crate::settings::SimulationParams;
use crate::sim::{SimulationRun, WallClock, run_to_end, simulate};
use crate::timeline::Timeline;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (e.g. module reloaded) is harmless
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("gol-engine ready");
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Run to completion on the simulated clock and return the summary JSON
#[wasm_bindgen(js_name = runSimulation)]
pub fn run_simulation(params_json: &str) -> Result<String, JsValue> {
    let params = SimulationParams::from_json(params_json).map_err(to_js_error)?;
    let summary = simulate(&params).map_err(to_js_error)?;
    serde_json::to_string(&summary).map_err(to_js_error)
}

/// Run against real elapsed time, like the page's original in-browser loop
#[wasm_bindgen(js_name = runSimulationRealtime)]
pub fn run_simulation_realtime(params_json: &str) -> Result<String, JsValue> {
    let params = SimulationParams::from_json(params_json).map_err(to_js_error)?;
    let mut run = SimulationRun::from_params(&params).map_err(to_js_error)?;
    let summary = run_to_end(&mut run, &mut WallClock);
    serde_json::to_string(&summary).map_err(to_js_error)
}

/// Pre-compute every frame and return the timeline JSON
#[wasm_bindgen(js_name = recordTimeline)]
pub fn record_timeline(params_json: &str) -> Result<String, JsValue> {
    let params = SimulationParams::from_json(params_json).map_err(to_js_error)?;
    let timeline = Timeline::record(&params).map_err(to_js_error)?;
    serde_json::to_string(&timeline).map_err(to_js_error)
}
