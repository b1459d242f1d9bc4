//! # Checkout Form Controller
//!
//! Wires the page's DOM to the checkout flow:
//!
//! ```text
//! load   ─▶ GET /config ─▶ mount card ─▶ enable submit
//! submit ─▶ POST /create-payment-intent ─▶ confirmCardPayment ─▶ render
//! ```
//!
//! Each of the two sequences runs as one local task with a single `Result`
//! chain; the first error ends it and is shown in the error display.

use crate::api;
use crate::error::CheckoutError;
use crate::flow::{read_confirmation, success_message, ConfirmedIntent};
use crate::stripe::{self, MountedCard};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement};

const HIDDEN: &str = "hidden";
const CARD_MOUNT_SELECTOR: &str = "#card-element";

/// Toggle the `hidden` class, logging if the class list refuses the change
fn set_hidden(element: &Element, hidden: bool) {
    let class_list = element.class_list();
    let result = if hidden {
        class_list.add_1(HIDDEN)
    } else {
        class_list.remove_1(HIDDEN)
    };
    if let Err(e) = result {
        crate::log_error(&format!(
            "Failed to update #{} visibility: {}",
            element.id(),
            crate::js_message(&e)
        ));
    }
}

/// Shows elements on creation and hides them again when dropped,
/// whichever way the enclosing scope is left.
pub struct BusyIndicator {
    elements: Vec<Element>,
}

impl BusyIndicator {
    pub fn show(elements: &[&Element]) -> Self {
        let elements: Vec<Element> = elements.iter().map(|e| (*e).clone()).collect();
        for element in &elements {
            set_hidden(element, false);
        }
        Self { elements }
    }
}

impl Drop for BusyIndicator {
    fn drop(&mut self) {
        for element in &self.elements {
            set_hidden(element, true);
        }
    }
}

/// The checkout form and everything it needs across events
pub struct CheckoutForm {
    form: HtmlFormElement,
    submit_button: HtmlButtonElement,
    amount_input: HtmlInputElement,
    result_message: HtmlElement,
    card_errors: HtmlElement,
    spinner: HtmlElement,
    processing_message: HtmlElement,
    card: RefCell<Option<MountedCard>>,
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{} element", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{} has the wrong element type", id)))
}

impl CheckoutForm {
    /// Look up the form's elements by id
    pub fn from_document(document: &Document) -> Result<Rc<Self>, JsValue> {
        Ok(Rc::new(Self {
            form: element_by_id(document, "payment-form")?,
            submit_button: element_by_id(document, "submit-button")?,
            amount_input: element_by_id(document, "amount")?,
            result_message: element_by_id(document, "result-message")?,
            card_errors: element_by_id(document, "card-errors")?,
            spinner: element_by_id(document, "spinner")?,
            processing_message: element_by_id(document, "processing-message")?,
            card: RefCell::new(None),
        }))
    }

    /// Register the submit handler
    pub fn attach(self: &Rc<Self>) -> Result<(), JsValue> {
        let form = Rc::clone(self);
        let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            spawn_local(Rc::clone(&form).submit());
        });
        self.form
            .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
        on_submit.forget();
        Ok(())
    }

    /// Fetch the publishable key and mount the card input.
    ///
    /// The submit button stays disabled unless this succeeds.
    pub async fn initialize(self: Rc<Self>) {
        match self.mount_card().await {
            Ok(()) => self.submit_button.set_disabled(false),
            Err(err) => {
                crate::log_error(&format!("Error fetching Stripe config: {}", err.detail()));
                self.submit_button.set_disabled(true);
                self.show_error(&err.to_string());
            }
        }
    }

    async fn mount_card(&self) -> Result<(), CheckoutError> {
        let publishable_key = api::fetch_config().await?;
        let mounted = stripe::mount_card(&publishable_key, CARD_MOUNT_SELECTOR, &self.card_errors)?;
        *self.card.borrow_mut() = Some(mounted);
        Ok(())
    }

    /// Handle one form submission
    pub async fn submit(self: Rc<Self>) {
        self.submit_button.set_disabled(true);
        self.show_error("");
        let _busy = BusyIndicator::show(&[&*self.spinner, &*self.processing_message]);

        match self.pay().await {
            Ok(intent) => self.show_success(&intent),
            Err(err) => {
                crate::log_error(&format!("Payment failed: {}", err.detail()));
                self.show_error(&err.to_string());
                self.submit_button.set_disabled(false);
            }
        }
    }

    async fn pay(&self) -> Result<ConfirmedIntent, CheckoutError> {
        let mounted = self
            .card
            .borrow()
            .clone()
            .ok_or_else(|| CheckoutError::Confirmation("Payment form is not ready.".to_string()))?;

        let client_secret = api::create_payment_intent(&self.amount_input.value()).await?;
        let result = stripe::confirm_card_payment(&mounted, &client_secret).await?;
        read_confirmation(result)
    }

    pub fn show_error(&self, message: &str) {
        self.card_errors.set_text_content(Some(message));
    }

    pub fn show_success(&self, intent: &ConfirmedIntent) {
        self.result_message
            .set_text_content(Some(&success_message(intent)));
        set_hidden(&self.result_message, false);
        set_hidden(&self.form, true);
    }
}
