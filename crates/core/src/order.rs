//! Turning a cart into a WhatsApp order message.
//!
//! There is no order backend: checking out means rendering the cart as a
//! formatted text message and handing a `wa.me` deep link to whatever opens
//! it (a redirect, in the storefront). The cart is cleared afterwards.

use core::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::types::PaymentMethod;

/// Base of the WhatsApp click-to-chat link.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Why an order cannot be sent yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("customer name is required")]
    MissingName,
    #[error("customer phone is required")]
    MissingPhone,
    /// Only raised for delivery orders.
    #[error("delivery address is required")]
    MissingAddress,
}

impl ValidationError {
    /// Message shown to the customer on the cart page.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingName | Self::MissingPhone => "Por favor, preencha seu nome e telefone",
            Self::MissingAddress => "Por favor, preencha o endereço para entrega",
        }
    }
}

/// Delivery to an address, or pickup at the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Fulfillment {
    Delivery { address: String },
    Pickup,
}

/// Who is ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
}

/// Everything the checkout form collects besides the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub customer: Customer,
    pub fulfillment: Fulfillment,
    pub payment: PaymentMethod,
    /// Free-text notes for the whole order.
    #[serde(default)]
    pub notes: String,
}

impl CheckoutRequest {
    /// Check the fields the store needs to call the customer back.
    ///
    /// # Errors
    ///
    /// Returns the first missing field: name, then phone, then the address
    /// of a delivery order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.customer.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.customer.phone.trim().is_empty() {
            return Err(ValidationError::MissingPhone);
        }
        if let Fulfillment::Delivery { address } = &self.fulfillment
            && address.trim().is_empty()
        {
            return Err(ValidationError::MissingAddress);
        }
        Ok(())
    }
}

/// A rendered order message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    text: String,
}

impl OrderSummary {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Deep link that opens a WhatsApp chat with `contact_number` and this
    /// message pre-filled. Non-digits in the number are dropped.
    #[must_use]
    pub fn whatsapp_link(&self, contact_number: &str) -> MessageLink {
        let digits: String = contact_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        MessageLink(format!(
            "{WHATSAPP_BASE_URL}{digits}?text={}",
            urlencoding::encode(&self.text)
        ))
    }
}

impl core::fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.text)
    }
}

/// An outbound messaging URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLink(String);

impl MessageLink {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Opens an outbound message link. Fire and forget: there is no result to
/// wait for and nothing is retried.
pub trait MessageDispatcher {
    fn dispatch(&mut self, link: MessageLink);
}

impl Cart {
    /// Render the order message for the current cart.
    ///
    /// Pure: the cart is not modified and nothing is validated.
    #[must_use]
    pub fn build_order_summary(&self, request: &CheckoutRequest) -> OrderSummary {
        // Writing to a String cannot fail.
        let mut text = String::from("🍕 *Novo Pedido!*\n\n");
        let _ = writeln!(text, "👤 *Cliente:* {}", request.customer.name.trim());
        let _ = writeln!(text, "📱 *Telefone:* {}", request.customer.phone.trim());

        match &request.fulfillment {
            Fulfillment::Delivery { address } => {
                let _ = writeln!(text, "📍 *Endereço:* {}", address.trim());
            }
            Fulfillment::Pickup => text.push_str("🏪 *Retirada no local*\n"),
        }

        let _ = write!(text, "💳 *Pagamento:* {}\n\n", request.payment);
        text.push_str("📋 *Itens do Pedido:*\n");

        for line in self.lines() {
            let _ = write!(text, "\n• {}x {}", line.quantity, line.display_name);
            if let Some(size) = line.size {
                let _ = write!(text, " ({size})");
            }
            let _ = write!(text, " - R$ {}", line.line_total().amount_str());
            if let Some(note) = line.note.as_deref().filter(|note| !note.is_empty()) {
                let _ = write!(text, "\n  _Obs: {note}_");
            }
        }

        let _ = write!(text, "\n\n💰 *Total: R$ {}*", self.total().amount_str());

        let notes = request.notes.trim();
        if !notes.is_empty() {
            let _ = write!(text, "\n\n📝 *Observações:* {notes}");
        }

        OrderSummary { text }
    }

    /// Validate the request, send the order message, then empty the cart.
    ///
    /// The dispatcher is called exactly once on success and never on error.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the name, the phone, or the address
    /// of a delivery order is blank. The cart is left untouched.
    pub fn checkout(
        &mut self,
        request: &CheckoutRequest,
        contact_number: &str,
        dispatcher: &mut impl MessageDispatcher,
    ) -> Result<OrderSummary, ValidationError> {
        request.validate()?;
        let summary = self.build_order_summary(request);
        dispatcher.dispatch(summary.whatsapp_link(contact_number));
        self.clear();
        Ok(summary)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::cart::CartEntry;
    use crate::types::{Money, ProductId, Size};

    #[derive(Default)]
    struct RecordingDispatcher {
        sent: Vec<MessageLink>,
    }

    impl MessageDispatcher for RecordingDispatcher {
        fn dispatch(&mut self, link: MessageLink) {
            self.sent.push(link);
        }
    }

    fn request(fulfillment: Fulfillment) -> CheckoutRequest {
        CheckoutRequest {
            customer: Customer {
                name: "Ana".to_string(),
                phone: "11 98888-7777".to_string(),
            },
            fulfillment,
            payment: PaymentMethod::Pix,
            notes: String::new(),
        }
    }

    fn delivery() -> Fulfillment {
        Fulfillment::Delivery {
            address: "Rua A, 10".to_string(),
        }
    }

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        let mussarela = CartEntry {
            product_id: ProductId::new("1"),
            display_name: "Mussarela".to_string(),
            unit_price: Money::from_reais(40),
            size: Some(Size::Grande),
            note: Some("Queijo mussarela e molho de tomate".to_string()),
        };
        cart.add_item(mussarela.clone());
        cart.add_item(mussarela);
        cart.add_item(CartEntry {
            product_id: ProductId::new("10"),
            display_name: "Guaraná".to_string(),
            unit_price: Money::new(Decimal::new(650, 2)),
            size: None,
            note: None,
        });
        cart
    }

    #[test]
    fn test_summary_format_for_delivery() {
        let cart = sample_cart();
        let mut req = request(delivery());
        req.notes = "Sem cebola".to_string();

        let expected = "🍕 *Novo Pedido!*\n\n\
             👤 *Cliente:* Ana\n\
             📱 *Telefone:* 11 98888-7777\n\
             📍 *Endereço:* Rua A, 10\n\
             💳 *Pagamento:* pix\n\n\
             📋 *Itens do Pedido:*\n\
             \n• 2x Mussarela (grande) - R$ 80.00\
             \n  _Obs: Queijo mussarela e molho de tomate_\
             \n• 1x Guaraná - R$ 6.50\
             \n\n💰 *Total: R$ 86.50*\
             \n\n📝 *Observações:* Sem cebola";

        assert_eq!(cart.build_order_summary(&req).as_str(), expected);
    }

    #[test]
    fn test_summary_for_pickup_has_no_address_or_notes() {
        let cart = sample_cart();
        let summary = cart.build_order_summary(&request(Fulfillment::Pickup));

        assert!(summary.as_str().contains("🏪 *Retirada no local*\n"));
        assert!(!summary.as_str().contains("Endereço"));
        assert!(!summary.as_str().contains("Observações"));
    }

    #[test]
    fn test_build_summary_does_not_mutate() {
        let cart = sample_cart();
        let before = cart.clone();
        let _ = cart.build_order_summary(&request(Fulfillment::Pickup));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_blank_name_fails_and_keeps_cart() {
        let mut cart = sample_cart();
        let mut dispatcher = RecordingDispatcher::default();
        let mut req = request(delivery());
        req.customer.name = "   ".to_string();

        let result = cart.checkout(&req, "5511999999999", &mut dispatcher);

        assert_eq!(result, Err(ValidationError::MissingName));
        assert_eq!(cart, sample_cart());
        assert!(dispatcher.sent.is_empty());
    }

    #[test]
    fn test_blank_phone_fails() {
        let mut req = request(Fulfillment::Pickup);
        req.customer.phone = String::new();
        assert_eq!(req.validate(), Err(ValidationError::MissingPhone));
    }

    #[test]
    fn test_delivery_without_address_fails_but_pickup_does_not() {
        let req = request(Fulfillment::Delivery {
            address: " ".to_string(),
        });
        assert_eq!(req.validate(), Err(ValidationError::MissingAddress));
        assert_eq!(request(Fulfillment::Pickup).validate(), Ok(()));
    }

    #[test]
    fn test_successful_checkout_dispatches_once_and_clears() {
        let mut cart = sample_cart();
        let total_before = cart.total();
        let mut dispatcher = RecordingDispatcher::default();

        let summary = cart
            .checkout(&request(delivery()), "+55 (11) 99999-9999", &mut dispatcher)
            .unwrap();

        assert!(cart.is_empty());
        assert_eq!(dispatcher.sent.len(), 1);
        assert!(
            summary
                .as_str()
                .contains(&format!("💰 *Total: R$ {}*", total_before.amount_str()))
        );

        let link = dispatcher.sent.first().unwrap().as_str();
        assert!(link.starts_with("https://wa.me/5511999999999?text="));
        assert!(!link.contains(' '));
        assert!(link.contains("%0A"));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            ValidationError::MissingAddress.user_message(),
            "Por favor, preencha o endereço para entrega"
        );
    }
}
