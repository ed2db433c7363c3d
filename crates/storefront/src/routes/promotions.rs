//! Promotions page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use ipizza_core::{MenuItem, Promotion};

use super::Layout;
use crate::filters;
use crate::state::AppState;

/// Promotion display data for templates.
pub struct PromotionView {
    pub id: String,
    pub name: String,
    pub items: String,
    pub price: String,
    /// Only set when the bundle is actually cheaper than its parts.
    pub list_price: Option<String>,
}

impl PromotionView {
    fn new(promotion: &Promotion, menu: &[MenuItem]) -> Self {
        let names: Vec<&str> = promotion
            .included_items(menu)
            .map(|item| item.name.as_str())
            .collect();
        let list_price = promotion.list_price(menu);

        Self {
            id: promotion.id.to_string(),
            name: promotion.name.clone(),
            items: names.join(", "),
            price: promotion.price.to_string(),
            list_price: (list_price > promotion.price).then(|| list_price.to_string()),
        }
    }
}

/// Promotions page template.
#[derive(Template, WebTemplate)]
#[template(path = "promotions.html")]
pub struct PromotionsTemplate {
    pub layout: Layout,
    pub promotions: Vec<PromotionView>,
}

/// Display the promotions page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog().snapshot().await;
    let promotions = catalog
        .promotions
        .iter()
        .map(|promotion| PromotionView::new(promotion, &catalog.menu))
        .collect();

    PromotionsTemplate {
        layout: Layout::load(&state).await,
        promotions,
    }
}

#[cfg(test)]
mod tests {
    use ipizza_core::{MenuItemId, Money, PromotionId, default_menu};

    use super::*;

    #[test]
    fn test_list_price_only_shown_when_discounted() {
        let menu = default_menu();
        let mut promotion = Promotion {
            id: PromotionId::new("p1"),
            name: "Dupla".to_string(),
            price: Money::from_reais(70),
            item_ids: vec![MenuItemId::new("1"), MenuItemId::new("2")],
        };

        let view = PromotionView::new(&promotion, &menu);
        assert_eq!(view.items, "Mussarela, Calabresa");
        assert_eq!(view.list_price.as_deref(), Some("R$ 85.00"));

        promotion.price = Money::from_reais(90);
        assert_eq!(PromotionView::new(&promotion, &menu).list_price, None);
    }
}
