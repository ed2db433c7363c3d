//! Menu page: one category tab at a time, with a name search.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use ipizza_core::{MenuCategory, MenuItem, Pricing, filter_menu};

use super::Layout;
use crate::filters;
use crate::state::AppState;

/// Query string of `/cardapio`.
#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    /// Category slug; unknown or missing slugs fall back to the first tab.
    pub category: Option<String>,
    /// Case-insensitive name search.
    pub q: Option<String>,
}

pub struct CategoryTab {
    pub slug: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Menu item display data for templates.
pub struct MenuItemView {
    pub id: String,
    pub name: String,
    pub note: Option<String>,
    pub single_price: Option<String>,
    pub broto_price: Option<String>,
    pub grande_price: Option<String>,
}

impl From<&MenuItem> for MenuItemView {
    fn from(item: &MenuItem) -> Self {
        let (single_price, broto_price, grande_price) = match item.pricing {
            Pricing::Single(price) => (Some(price.to_string()), None, None),
            Pricing::Sized { broto, grande } => {
                (None, Some(broto.to_string()), Some(grande.to_string()))
            }
        };
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            note: item.note.clone(),
            single_price,
            broto_price,
            grande_price,
        }
    }
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu.html")]
pub struct MenuTemplate {
    pub layout: Layout,
    pub tabs: Vec<CategoryTab>,
    pub active_slug: &'static str,
    pub query: String,
    pub items: Vec<MenuItemView>,
}

/// Display the menu page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(query): Query<MenuQuery>) -> impl IntoResponse {
    let active = query
        .category
        .as_deref()
        .and_then(|slug| slug.parse::<MenuCategory>().ok())
        .unwrap_or_default();
    let search = query.q.unwrap_or_default();

    let menu = state.catalog().menu().await;
    let items = filter_menu(&menu, active, &search)
        .into_iter()
        .map(MenuItemView::from)
        .collect();

    MenuTemplate {
        layout: Layout::load(&state).await,
        tabs: MenuCategory::ALL
            .into_iter()
            .map(|category| CategoryTab {
                slug: category.slug(),
                label: category.label(),
                active: category == active,
            })
            .collect(),
        active_slug: active.slug(),
        query: search,
        items,
    }
}
