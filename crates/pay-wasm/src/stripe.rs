//! # Stripe.js Card Element
//!
//! Mounting the card input and confirming a payment with it.

use crate::bindings::{new_stripe, JsCardElement, JsStripe};
use crate::error::CheckoutError;
use crate::flow::{card_error_text, CardChangeEvent, ConfirmationResult};
use crate::js_message;
use js_sys::{Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlElement;

/// Stripe client plus the card element mounted in the page
#[derive(Debug, Clone)]
pub struct MountedCard {
    pub stripe: JsStripe,
    pub card: JsCardElement,
}

/// Appearance of the card input, matching the page's dark theme
fn card_style() -> serde_json::Value {
    serde_json::json!({
        "style": {
            "base": {
                "color": "#ffffff",
                "fontFamily": "'Inter', -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif",
                "fontSize": "16px",
                "fontSmoothing": "antialiased",
                "::placeholder": { "color": "#8a8a8a" }
            },
            "invalid": {
                "iconColor": "#f56565",
                "color": "#f56565"
            }
        }
    })
}

/// Initialize Stripe.js, create the card element and mount it at `selector`.
///
/// Card validation messages are mirrored into `error_display` as the user types.
pub fn mount_card(
    publishable_key: &str,
    selector: &str,
    error_display: &HtmlElement,
) -> Result<MountedCard, CheckoutError> {
    let config_error = |e: JsValue| CheckoutError::Config(js_message(&e));

    let stripe = new_stripe(publishable_key).map_err(config_error)?;
    let elements = stripe.elements().map_err(config_error)?;

    let options = card_style()
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| CheckoutError::Config(e.to_string()))?;
    let card = elements
        .create_element("card", &options)
        .map_err(config_error)?;
    card.mount(selector).map_err(config_error)?;

    let error_display = error_display.clone();
    let on_change = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        let event: CardChangeEvent = serde_wasm_bindgen::from_value(event).unwrap_or_default();
        error_display.set_text_content(Some(&card_error_text(event)));
    });
    card.on("change", on_change.as_ref().unchecked_ref());
    // The card element lives as long as the page
    on_change.forget();

    Ok(MountedCard { stripe, card })
}

/// Confirm the intent behind `client_secret` with the mounted card
pub async fn confirm_card_payment(
    mounted: &MountedCard,
    client_secret: &str,
) -> Result<ConfirmationResult, CheckoutError> {
    let confirmation_error = |e: JsValue| CheckoutError::Confirmation(js_message(&e));

    let payment_method = Object::new();
    Reflect::set(&payment_method, &"card".into(), &mounted.card).map_err(confirmation_error)?;
    let data = Object::new();
    Reflect::set(&data, &"payment_method".into(), &payment_method)
        .map_err(confirmation_error)?;

    let promise = mounted
        .stripe
        .confirm_card_payment(client_secret, &data)
        .map_err(confirmation_error)?;
    let result = JsFuture::from(promise).await.map_err(confirmation_error)?;

    serde_wasm_bindgen::from_value(result).map_err(|e| CheckoutError::Confirmation(e.to_string()))
}
