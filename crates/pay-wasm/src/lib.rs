//! # pay-wasm
//!
//! Browser side of the fund-transfer checkout, compiled to WebAssembly.
//!
//! On load the controller fetches the publishable key from `/config`, mounts
//! the Stripe card element and enables the form. On submit it asks the server
//! for a payment intent and confirms it with Stripe.js.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { mount_checkout } from './pkg/pay_wasm.js';
//!
//! await init();
//! mount_checkout();
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build crates/pay-wasm --target web --out-dir ../../public/pkg
//! ```

pub mod api;
pub mod bindings;
pub mod error;
pub mod flow;
pub mod form;
pub mod stripe;

pub use error::CheckoutError;
pub use form::{BusyIndicator, CheckoutForm};

use pay_core::{Currency, MinorUnits};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Initialize the WASM module (called automatically)
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Attach the controller to the checkout form in the current document
#[wasm_bindgen]
pub fn mount_checkout() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let form = CheckoutForm::from_document(&document)?;
    form.attach()?;
    spawn_local(form.initialize());
    Ok(())
}

/// Format an amount in cents for display (e.g., "$10.00")
#[wasm_bindgen]
pub fn format_amount(cents: i64) -> String {
    MinorUnits(cents).display(Currency::USD)
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Log to browser console
pub(crate) fn log_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}

/// Best-effort text of a thrown JS value
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1000), "$10.00");
        assert_eq!(format_amount(51), "$0.51");
    }

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
