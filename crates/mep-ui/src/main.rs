//! WASM entry point
//!
//! Trunk compiles this to WASM and loads it on every page of the site.

fn main() {
    // Set up panic hook for better error messages in browser console
    console_error_panic_hook::set_once();

    if let Err(e) = mep_ui::start() {
        web_sys::console::error_1(&format!("MEP site failed to start: {e}").into());
    }
}
