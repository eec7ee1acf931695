//! Wall-clock access that also works inside the browser.

/// Current Unix timestamp in milliseconds.
#[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
#[must_use]
pub fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| {
        // Timestamp will not exceed u64 max for millennia
        #[allow(clippy::cast_possible_truncation)]
        {
            d.as_millis() as u64
        }
    })
}

/// Current Unix timestamp in milliseconds.
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}
