//! # Backend Calls
//!
//! `fetch` wrappers for the two endpoints the form talks to.

use crate::error::CheckoutError;
use crate::flow::{read_config, read_intent_response, ConfigResponse, IntentRequest, IntentResponse};
use crate::js_message;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response, Window};

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

async fn send(request: &Request) -> Result<Response, JsValue> {
    let response = JsFuture::from(window()?.fetch_with_request(request)).await?;
    response.dyn_into::<Response>()
}

async fn json_body(response: &Response) -> Result<JsValue, JsValue> {
    JsFuture::from(response.json()?).await
}

/// `GET /config` → publishable key
pub async fn fetch_config() -> Result<String, CheckoutError> {
    let config_error = |e: JsValue| CheckoutError::Config(js_message(&e));

    let request = Request::new_with_str("/config").map_err(config_error)?;
    let response = send(&request).await.map_err(config_error)?;
    let body = json_body(&response).await.map_err(config_error)?;

    let config: ConfigResponse = serde_wasm_bindgen::from_value(body)
        .map_err(|e| CheckoutError::Config(e.to_string()))?;
    read_config(config)
}

/// `POST /create-payment-intent` → client secret
pub async fn create_payment_intent(amount: &str) -> Result<String, CheckoutError> {
    let network_error = |e: JsValue| CheckoutError::Network(js_message(&e));

    let body = serde_json::to_string(&IntentRequest { amount })
        .map_err(|e| CheckoutError::Network(e.to_string()))?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(&body));

    let request =
        Request::new_with_str_and_init("/create-payment-intent", &init).map_err(network_error)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(network_error)?;

    let response = send(&request).await.map_err(network_error)?;
    let body = json_body(&response)
        .await
        .ok()
        .and_then(|body| serde_wasm_bindgen::from_value::<IntentResponse>(body).ok());

    read_intent_response(response.ok(), body)
}
