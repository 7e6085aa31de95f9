use crate::error::{ExtensionError, Result};
use wasm_bindgen::prelude::*;

/// Run `callback` once after `millis`
///
/// There is no cancellation; callers that need last-write-wins behavior
/// check a `Debouncer` ticket when the callback fires.
pub fn run_later<F>(millis: u32, callback: F) -> Result<()>
where
    F: FnOnce() + 'static,
{
    let window = web_sys::window().ok_or_else(|| ExtensionError::Dom("no window".to_string()))?;
    let closure = Closure::once_into_js(callback);

    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.unchecked_ref(),
            i32::try_from(millis).unwrap_or(i32::MAX),
        )
        .map_err(ExtensionError::dom)?;

    Ok(())
}

/// Milliseconds since the epoch, from the JS clock
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}
