//! Low-level wasm-bindgen bindings to the parts of Stripe.js v3 the form uses.
//!
//! Stripe.js is loaded by the page from `https://js.stripe.com/v3/`.
//! Higher-level wrappers live in `stripe.rs`.

use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Stripe.js client handle.
    #[derive(Debug, Clone)]
    pub type JsStripe;

    /// Elements factory handle.
    #[derive(Debug, Clone)]
    pub type JsElements;

    /// Card element (iframe-hosted card input).
    #[derive(Debug, Clone)]
    pub type JsCardElement;

    /// `Stripe(publishableKey)`; throws if Stripe.js is not loaded.
    #[wasm_bindgen(catch, js_name = Stripe)]
    pub fn new_stripe(publishable_key: &str) -> Result<JsStripe, JsValue>;

    /// `stripe.elements()`
    #[wasm_bindgen(method, catch)]
    pub fn elements(this: &JsStripe) -> Result<JsElements, JsValue>;

    /// `elements.create(type, options)`
    #[wasm_bindgen(method, catch, js_name = create)]
    pub fn create_element(
        this: &JsElements,
        element_type: &str,
        options: &JsValue,
    ) -> Result<JsCardElement, JsValue>;

    /// `card.mount(selector)`
    #[wasm_bindgen(method, catch)]
    pub fn mount(this: &JsCardElement, selector: &str) -> Result<(), JsValue>;

    /// `card.on(event, handler)`
    #[wasm_bindgen(method)]
    pub fn on(this: &JsCardElement, event: &str, handler: &Function);

    /// `stripe.confirmCardPayment(clientSecret, data)` → `Promise<{ paymentIntent, error }>`
    #[wasm_bindgen(method, catch, js_name = confirmCardPayment)]
    pub fn confirm_card_payment(
        this: &JsStripe,
        client_secret: &str,
        data: &JsValue,
    ) -> Result<Promise, JsValue>;
}
