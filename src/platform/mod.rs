//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (std on native, `Date.now()` in the browser)
//! - JS bindings for running the engine inside the playback page

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Seconds since an arbitrary fixed origin
#[cfg(not(target_arch = "wasm32"))]
pub fn now_seconds() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    ORIGIN.get_or_init(Instant::now).elapsed().as_secs_f64()
}

/// Seconds since the Unix epoch (`std::time::Instant` is unavailable on wasm32)
#[cfg(target_arch = "wasm32")]
pub fn now_seconds() -> f64 {
    js_sys::Date::now() / 1000.0
}
