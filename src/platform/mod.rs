//! Platform abstraction layer
//!
//! - `web`: wasm-bindgen surface driven by the page's animation frames
//! - Native builds use the headless replay in `main.rs`

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Wall-clock milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Wall-clock milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    #[test]
    fn clock_is_past_the_epoch() {
        assert!(super::now_ms() > 1.0e12);
    }
}
