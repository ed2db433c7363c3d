//! Cart route handlers.
//!
//! The cart is a [`Cart`] snapshot in the visitor's session. Each mutation
//! loads it, applies one core operation and stores it back. htmx requests
//! get fragments plus an `HX-Trigger: cart-updated` header; plain form posts
//! are redirected back to the cart page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use ipizza_core::{Cart, CartLine, MenuItemId, PaymentMethod, ProductId, PromotionId, Size};

use super::{CART_UPDATED_EVENT, Layout, empty_string_as_none, is_htmx};
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::{load_cart, save_cart};
use crate::state::AppState;

/// Cart line display data for templates.
pub struct CartLineView {
    pub product_id: String,
    /// Wire name of the size, for hidden form fields.
    pub size: Option<&'static str>,
    pub size_label: Option<&'static str>,
    pub name: String,
    pub note: Option<String>,
    pub quantity: u32,
    pub decrement: i64,
    pub increment: i64,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.to_string(),
            size: line.size.map(|size| size.as_str()),
            size_label: line.size.map(|size| size.label()),
            name: line.display_name.clone(),
            note: line.note.clone(),
            quantity: line.quantity,
            decrement: i64::from(line.quantity) - 1,
            increment: i64::from(line.quantity) + 1,
            unit_price: line.unit_price.to_string(),
            line_total: line.line_total().to_string(),
        }
    }
}

/// Cart display data for templates.
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.line_count(),
        }
    }
}

pub struct PaymentOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// What the checkout form shows: the visitor's last input plus any error.
pub struct CheckoutFormView {
    pub customer_name: String,
    pub phone: String,
    pub pickup: bool,
    pub address: String,
    pub notes: String,
    pub payments: Vec<PaymentOption>,
    pub error: Option<&'static str>,
}

impl CheckoutFormView {
    #[must_use]
    pub fn new(payment: PaymentMethod) -> Self {
        Self {
            customer_name: String::new(),
            phone: String::new(),
            pickup: false,
            address: String::new(),
            notes: String::new(),
            payments: PaymentMethod::ALL
                .into_iter()
                .map(|method| PaymentOption {
                    value: method.as_str(),
                    label: method.label(),
                    selected: method == payment,
                })
                .collect(),
            error: None,
        }
    }
}

impl Default for CheckoutFormView {
    fn default() -> Self {
        Self::new(PaymentMethod::default())
    }
}

/// Add menu item form data.
#[derive(Debug, Deserialize)]
pub struct AddItemForm {
    pub item_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub size: Option<Size>,
}

/// Add promotion form data.
#[derive(Debug, Deserialize)]
pub struct AddPromotionForm {
    pub promotion_id: String,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityForm {
    pub product_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub size: Option<Size>,
    pub quantity: i64,
}

/// Remove line form data.
#[derive(Debug, Deserialize)]
pub struct RemoveLineForm {
    pub product_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub size: Option<Size>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: Layout,
    pub cart: CartView,
    pub form: CheckoutFormView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Response after adding something: the new badge, or back to the cart.
fn added(headers: &HeaderMap, cart: &Cart) -> Response {
    if is_htmx(headers) {
        (
            AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
            CartCountTemplate {
                count: cart.line_count(),
            },
        )
            .into_response()
    } else {
        Redirect::to("/cart").into_response()
    }
}

/// Response after editing lines: the re-rendered items, or back to the cart.
fn edited(headers: &HeaderMap, cart: &Cart) -> Response {
    if is_htmx(headers) {
        (
            AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
            CartItemsTemplate {
                cart: CartView::from(cart),
            },
        )
            .into_response()
    } else {
        Redirect::to("/cart").into_response()
    }
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await?;

    Ok(CartShowTemplate {
        layout: Layout::load(&state).await,
        cart: CartView::from(&cart),
        form: CheckoutFormView::default(),
    })
}

/// Add one unit of a menu item in the chosen size.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddItemForm>,
) -> Result<Response> {
    let id = MenuItemId::new(form.item_id);
    let item = state
        .catalog()
        .menu_item(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("menu item {id}")))?;
    let entry = item.cart_entry(form.size)?;

    let mut cart = load_cart(&session).await?;
    let quantity = cart.add_item(entry).quantity;
    save_cart(&session, &cart).await?;

    tracing::debug!(item = %id, quantity, "added to cart");
    Ok(added(&headers, &cart))
}

/// Add one promotion bundle.
#[instrument(skip(state, session, headers))]
pub async fn add_promotion(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddPromotionForm>,
) -> Result<Response> {
    let catalog = state.catalog().snapshot().await;
    let id = PromotionId::new(form.promotion_id);
    let promotion = catalog
        .promotions
        .iter()
        .find(|promotion| promotion.id == id)
        .ok_or_else(|| AppError::NotFound(format!("promotion {id}")))?;

    let mut cart = load_cart(&session).await?;
    cart.add_item(promotion.cart_entry(&catalog.menu));
    save_cart(&session, &cart).await?;

    Ok(added(&headers, &cart))
}

/// Set a line's quantity; zero or less removes it.
#[instrument(skip(session, headers))]
pub async fn update(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateQuantityForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    cart.set_quantity(&ProductId::new(form.product_id), form.quantity, form.size);
    save_cart(&session, &cart).await?;

    Ok(edited(&headers, &cart))
}

/// Remove a line.
#[instrument(skip(session, headers))]
pub async fn remove(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveLineForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    cart.remove_line(&ProductId::new(form.product_id), form.size);
    save_cart(&session, &cart).await?;

    Ok(edited(&headers, &cart))
}

/// Empty the cart.
#[instrument(skip(session, headers))]
pub async fn clear(session: Session, headers: HeaderMap) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(edited(&headers, &cart))
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await?;
    Ok(CartCountTemplate {
        count: cart.line_count(),
    })
}

#[cfg(test)]
mod tests {
    use ipizza_core::{CartEntry, Money};

    use super::*;

    #[test]
    fn test_cart_view_formats_money_and_sizes() {
        let mut cart = Cart::new();
        let entry = CartEntry {
            product_id: ProductId::new("1"),
            display_name: "Mussarela".to_string(),
            unit_price: Money::from_reais(25),
            size: Some(Size::Broto),
            note: None,
        };
        cart.add_item(entry.clone());
        cart.add_item(entry);

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.total, "R$ 50.00");

        let line = view.lines.first();
        assert!(line.is_some_and(|line| line.size == Some("broto")
            && line.size_label == Some("Broto")
            && line.decrement == 1
            && line.increment == 3
            && line.line_total == "R$ 50.00"));
    }

    #[test]
    fn test_checkout_form_preselects_payment() {
        let form = CheckoutFormView::new(PaymentMethod::Pix);
        let selected: Vec<&str> = form
            .payments
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.value)
            .collect();
        assert_eq!(selected, ["pix"]);
    }
}
