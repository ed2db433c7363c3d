//! Back-office HTML pages.
//!
//! A token login, a dashboard listing the catalog, and a form for the store
//! profile and opening schedule. Menu and promotion edits go through the
//! JSON API.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use ipizza_core::{
    MenuItem, Pricing, Promotion, ScheduleInput, StoreProfile, StoreProfileUpdate, StoreStatus,
};

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::middleware::admin_auth::LOGIN_PATH;
use crate::models::{clear_admin, set_admin};
use crate::routes::Layout;
use crate::services::CatalogServiceError;
use crate::state::AppState;

/// Where the dashboard lives.
pub const DASHBOARD_PATH: &str = "/admin";

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub token: String,
}

/// Store profile form data, as typed.
#[derive(Debug, Default, Deserialize)]
pub struct StoreForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub social_handle: String,
    #[serde(default)]
    pub maps_link: String,
    #[serde(default)]
    pub delivery_time: String,
    #[serde(default)]
    pub opening_time: String,
    #[serde(default)]
    pub closing_time: String,
    /// Comma-separated weekday numbers, 0 = Sunday.
    #[serde(default)]
    pub operating_days: String,
}

impl StoreForm {
    fn from_profile(profile: &StoreProfile) -> Self {
        let schedule = &profile.schedule;
        Self {
            name: profile.name.clone(),
            contact_number: profile.contact_number.clone(),
            social_handle: profile.social_handle.clone(),
            maps_link: profile.maps_link.clone(),
            delivery_time: profile.delivery_time.clone(),
            opening_time: schedule
                .opening_time
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            closing_time: schedule
                .closing_time
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            operating_days: schedule
                .operating_days
                .iter()
                .flatten()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// The edit this form asks for, or a message for the owner.
    fn to_update(&self) -> std::result::Result<StoreProfileUpdate, String> {
        let operating_days = parse_days(&self.operating_days)?;
        Ok(StoreProfileUpdate {
            name: Some(self.name.clone()),
            contact_number: Some(self.contact_number.clone()),
            social_handle: Some(self.social_handle.clone()),
            maps_link: Some(self.maps_link.clone()),
            delivery_time: Some(self.delivery_time.clone()),
            schedule: Some(ScheduleInput {
                opening_time: Some(self.opening_time.clone()),
                closing_time: Some(self.closing_time.clone()),
                operating_days,
            }),
            ..StoreProfileUpdate::default()
        })
    }
}

/// `"2, 3,4"` into weekday numbers; blank means no operating days set.
fn parse_days(raw: &str) -> std::result::Result<Option<Vec<u8>>, String> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    raw.split(',')
        .map(|day| {
            day.trim()
                .parse::<u8>()
                .map_err(|_| format!("dia inválido: {:?}", day.trim()))
        })
        .collect::<std::result::Result<Vec<_>, _>>()
        .map(Some)
}

pub struct MenuRow {
    pub id: String,
    pub name: String,
    pub category: &'static str,
    pub price: String,
}

impl From<&MenuItem> for MenuRow {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            category: item.category.label(),
            price: match item.pricing {
                Pricing::Single(price) => price.to_string(),
                Pricing::Sized { broto, grande } => format!("{broto} / {grande}"),
            },
        }
    }
}

pub struct PromotionRow {
    pub id: String,
    pub name: String,
    pub price: String,
    pub item_count: usize,
}

impl From<&Promotion> for PromotionRow {
    fn from(promotion: &Promotion) -> Self {
        Self {
            id: promotion.id.to_string(),
            name: promotion.name.clone(),
            price: promotion.price.to_string(),
            item_count: promotion.item_ids.len(),
        }
    }
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    pub error: Option<&'static str>,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub layout: Layout,
    pub status: StoreStatus,
    pub form: StoreForm,
    pub error: Option<String>,
    pub menu: Vec<MenuRow>,
    pub promotions: Vec<PromotionRow>,
}

impl DashboardTemplate {
    async fn load(state: &AppState, form: Option<StoreForm>, error: Option<String>) -> Self {
        let catalog = state.catalog().snapshot().await;
        Self {
            layout: Layout::load(state).await,
            status: state.status().current(),
            form: form.unwrap_or_else(|| StoreForm::from_profile(&catalog.profile)),
            error,
            menu: catalog.menu.iter().map(MenuRow::from).collect(),
            promotions: catalog.promotions.iter().map(PromotionRow::from).collect(),
        }
    }
}

/// Render the login page.
#[instrument(skip(state))]
pub async fn login_page(State(state): State<AppState>) -> impl IntoResponse {
    LoginTemplate {
        layout: Layout::load(&state).await,
        error: None,
    }
}

/// Check the token and remember the login.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if !state.config().admin_token_matches(form.token.trim()) {
        tracing::warn!("rejected back-office login");
        let page = LoginTemplate {
            layout: Layout::load(&state).await,
            error: Some("Token inválido"),
        };
        return Ok((StatusCode::UNAUTHORIZED, page).into_response());
    }

    set_admin(&session).await?;
    tracing::info!("back-office login");
    Ok(Redirect::to(DASHBOARD_PATH).into_response())
}

/// Forget the login.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_admin(&session).await?;
    Ok(Redirect::to(LOGIN_PATH))
}

/// Catalog overview with the store form.
#[instrument(skip_all)]
pub async fn dashboard(_admin: RequireAdmin, State(state): State<AppState>) -> impl IntoResponse {
    DashboardTemplate::load(&state, None, None).await
}

/// Save the store form, then re-evaluate the open/closed status.
///
/// # Errors
///
/// Returns 500 when storage fails. Invalid input re-renders the dashboard
/// with status 422.
#[instrument(skip_all)]
pub async fn update_store(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<StoreForm>,
) -> Result<Response> {
    let update = match form.to_update() {
        Ok(update) => update,
        Err(message) => return Ok(rejected(&state, form, message).await),
    };

    match state.catalog().update_store_profile(update).await {
        Ok(_) => {
            state.status().refresh().await;
            Ok(Redirect::to(DASHBOARD_PATH).into_response())
        }
        Err(CatalogServiceError::Catalog(err)) => Ok(rejected(&state, form, err.to_string()).await),
        Err(err) => Err(err.into()),
    }
}

async fn rejected(state: &AppState, form: StoreForm, message: String) -> Response {
    tracing::info!(error = %message, "store form rejected");
    let page = DashboardTemplate::load(state, Some(form), Some(message)).await;
    (StatusCode::UNPROCESSABLE_ENTITY, page).into_response()
}
