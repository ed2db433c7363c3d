//! Checkout: turn the cart into a WhatsApp message.
//!
//! A valid submission clears the cart and redirects the browser to the
//! `wa.me` link (303, or `HX-Redirect` for htmx). An invalid one re-renders
//! the cart page with the customer-facing message and status 422.

use axum::{
    Form,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use ipizza_core::{
    CheckoutRequest, Customer, Fulfillment, MessageDispatcher, MessageLink, PaymentMethod,
};

use super::Layout;
use super::cart::{CartShowTemplate, CartView, CheckoutFormView};
use super::is_htmx;
use crate::error::{AppError, Result};
use crate::models::{load_cart, save_cart};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentMode {
    #[default]
    Delivery,
    Pickup,
}

/// Checkout form data. Every field may be missing; validation is done by
/// the core checkout.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub fulfillment: FulfillmentMode,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub payment: PaymentMethod,
    #[serde(default)]
    pub notes: String,
}

impl CheckoutForm {
    fn to_request(&self) -> CheckoutRequest {
        CheckoutRequest {
            customer: Customer {
                name: self.customer_name.clone(),
                phone: self.phone.clone(),
            },
            fulfillment: match self.fulfillment {
                FulfillmentMode::Delivery => Fulfillment::Delivery {
                    address: self.address.clone(),
                },
                FulfillmentMode::Pickup => Fulfillment::Pickup,
            },
            payment: self.payment,
            notes: self.notes.clone(),
        }
    }

    fn to_view(&self, error: &'static str) -> CheckoutFormView {
        CheckoutFormView {
            customer_name: self.customer_name.clone(),
            phone: self.phone.clone(),
            pickup: self.fulfillment == FulfillmentMode::Pickup,
            address: self.address.clone(),
            notes: self.notes.clone(),
            error: Some(error),
            ..CheckoutFormView::new(self.payment)
        }
    }
}

/// Keeps the link so the handler can redirect to it.
#[derive(Default)]
struct RedirectDispatcher {
    link: Option<MessageLink>,
}

impl MessageDispatcher for RedirectDispatcher {
    fn dispatch(&mut self, link: MessageLink) {
        self.link = Some(link);
    }
}

/// Send the order.
#[instrument(skip(state, session, headers, form))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let contact_number = state.catalog().store_profile().await.contact_number;
    let items = cart.line_count();
    let total = cart.total();
    let mut dispatcher = RedirectDispatcher::default();

    match cart.checkout(&form.to_request(), &contact_number, &mut dispatcher) {
        Ok(_summary) => {
            save_cart(&session, &cart).await?;
            tracing::info!(items, total = %total, "order handed to WhatsApp");

            let link = dispatcher
                .link
                .ok_or_else(|| AppError::Internal("checkout produced no message link".to_string()))?;
            redirect_to(&headers, &link)
        }
        Err(err) => {
            tracing::info!(error = %err, "checkout rejected");
            let page = CartShowTemplate {
                layout: Layout::load(&state).await,
                cart: CartView::from(&cart),
                form: form.to_view(err.user_message()),
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}

fn redirect_to(headers: &HeaderMap, link: &MessageLink) -> Result<Response> {
    let location = HeaderValue::from_str(link.as_str())
        .map_err(|e| AppError::Internal(format!("message link is not a header value: {e}")))?;

    if is_htmx(headers) {
        Ok(([("HX-Redirect", location)], StatusCode::OK).into_response())
    } else {
        Ok((
            StatusCode::SEE_OTHER,
            [(axum::http::header::LOCATION, location)],
        )
            .into_response())
    }
}
