// Formatting, clock and console helpers shared by the views.

fn suffixed(num: f64) -> Option<String> {
    if num < 1_000.0 {
        None
    } else if num < 1_000_000.0 {
        Some(format!("{:.1}K", num / 1_000.0))
    } else if num < 1_000_000_000.0 {
        Some(format!("{:.1}M", num / 1_000_000.0))
    } else {
        Some(format!("{:.1}B", num / 1_000_000_000.0))
    }
}

/// Resource counter text: whole units below 1000, then K/M/B with one decimal.
pub fn format_amount(num: f64) -> String {
    suffixed(num).unwrap_or_else(|| format!("{}", num.floor()))
}

/// Upgrade price text. Prices are whole numbers so no flooring is applied.
pub fn format_cost(num: f64) -> String {
    suffixed(num).unwrap_or_else(|| format!("{}", num))
}

/// Milliseconds since the Unix epoch, from the browser clock.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn clog(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

pub fn cwarn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}
