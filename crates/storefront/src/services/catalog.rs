//! Cached, write-through access to the store catalog.
//!
//! All three catalog documents are loaded once at startup and kept behind a
//! `RwLock`. Every mutation validates against the cached copy, saves the
//! whole affected document, and only then swaps it into the cache. A failed
//! save leaves the cache untouched.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

use ipizza_core::{
    Catalog, CatalogError, MenuItem, MenuItemId, MenuItemUpdate, NewMenuItem, NewPromotion,
    Promotion, PromotionId, PromotionUpdate, StoreProfile, StoreProfileUpdate, default_menu,
};

use crate::db::{CatalogRepository, RepositoryError};

/// Errors from catalog reads and edits.
#[derive(Debug, Error)]
pub enum CatalogServiceError {
    /// The edit itself is invalid, or names something that does not exist.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The edit was valid but could not be persisted.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Shared handle to the catalog. Cheap to clone.
#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn CatalogRepository>,
    cache: Arc<RwLock<Catalog>>,
}

impl CatalogService {
    /// Load every document from `repository`, using the built-in defaults
    /// for anything not stored yet.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if a stored document cannot be read.
    pub async fn load(repository: Arc<dyn CatalogRepository>) -> Result<Self, RepositoryError> {
        let profile = repository.load_store_profile().await?.unwrap_or_default();
        let menu = repository.load_menu().await?.unwrap_or_else(default_menu);
        let promotions = repository.load_promotions().await?.unwrap_or_default();

        tracing::info!(
            store = %profile.name,
            menu_items = menu.len(),
            promotions = promotions.len(),
            "catalog loaded"
        );

        Ok(Self {
            repository,
            cache: Arc::new(RwLock::new(Catalog {
                profile,
                menu,
                promotions,
            })),
        })
    }

    /// Whether the backing store can still be read.
    pub async fn is_readable(&self) -> bool {
        self.repository.load_store_profile().await.is_ok()
    }

    /// A copy of the whole catalog.
    pub async fn snapshot(&self) -> Catalog {
        self.cache.read().await.clone()
    }

    // =========================================================================
    // Store profile
    // =========================================================================

    pub async fn store_profile(&self) -> StoreProfile {
        self.cache.read().await.profile.clone()
    }

    /// Merge a partial edit into the store profile.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] for blank names, malformed times, weekdays
    /// outside 0..=6 or a maps link that is not an http(s) URL.
    #[instrument(skip_all)]
    pub async fn update_store_profile(
        &self,
        update: StoreProfileUpdate,
    ) -> Result<StoreProfile, CatalogServiceError> {
        if let Some(link) = update.maps_link.as_deref() {
            validate_maps_link(link)?;
        }

        let mut cache = self.cache.write().await;
        let mut profile = cache.profile.clone();
        let schedule_changed = update.apply(&mut profile)?;

        self.repository.save_store_profile(&profile).await?;
        cache.profile = profile.clone();

        tracing::info!(schedule_changed, "store profile updated");
        Ok(profile)
    }

    // =========================================================================
    // Menu
    // =========================================================================

    pub async fn menu(&self) -> Vec<MenuItem> {
        self.cache.read().await.menu.clone()
    }

    pub async fn menu_item(&self, id: &MenuItemId) -> Option<MenuItem> {
        self.cache
            .read()
            .await
            .menu
            .iter()
            .find(|item| &item.id == id)
            .cloned()
    }

    /// Append a new item with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BlankName`] or [`CatalogError::NegativePrice`].
    #[instrument(skip_all, fields(name = %new.name))]
    pub async fn add_menu_item(&self, new: NewMenuItem) -> Result<MenuItem, CatalogServiceError> {
        let item = new.into_item(MenuItemId::new(Uuid::new_v4().to_string()))?;

        let mut cache = self.cache.write().await;
        let mut menu = cache.menu.clone();
        menu.push(item.clone());

        self.repository.save_menu(&menu).await?;
        cache.menu = menu;

        tracing::info!(id = %item.id, "menu item added");
        Ok(item)
    }

    /// Apply a partial edit to one item.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MenuItemNotFound`] for an unknown id, or the
    /// validation errors of [`MenuItemUpdate::apply`].
    #[instrument(skip(self, update))]
    pub async fn update_menu_item(
        &self,
        id: &MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, CatalogServiceError> {
        let mut cache = self.cache.write().await;
        let mut menu = cache.menu.clone();
        let item = menu
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| CatalogError::MenuItemNotFound(id.clone()))?;
        update.apply(item)?;
        let updated = item.clone();

        self.repository.save_menu(&menu).await?;
        cache.menu = menu;

        tracing::info!("menu item updated");
        Ok(updated)
    }

    /// Delete one item. Promotions that include it simply stop listing it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MenuItemNotFound`] for an unknown id.
    #[instrument(skip(self))]
    pub async fn remove_menu_item(&self, id: &MenuItemId) -> Result<(), CatalogServiceError> {
        let mut cache = self.cache.write().await;
        let mut menu = cache.menu.clone();
        let before = menu.len();
        menu.retain(|item| &item.id != id);
        if menu.len() == before {
            return Err(CatalogError::MenuItemNotFound(id.clone()).into());
        }

        self.repository.save_menu(&menu).await?;
        cache.menu = menu;

        tracing::info!("menu item removed");
        Ok(())
    }

    // =========================================================================
    // Promotions
    // =========================================================================

    pub async fn promotions(&self) -> Vec<Promotion> {
        self.cache.read().await.promotions.clone()
    }

    pub async fn promotion(&self, id: &PromotionId) -> Option<Promotion> {
        self.cache
            .read()
            .await
            .promotions
            .iter()
            .find(|promotion| &promotion.id == id)
            .cloned()
    }

    /// Append a new promotion with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BlankName`], [`CatalogError::NegativePrice`] or
    /// [`CatalogError::MenuItemNotFound`] when an included item is not on the
    /// menu.
    #[instrument(skip_all, fields(name = %new.name))]
    pub async fn add_promotion(
        &self,
        new: NewPromotion,
    ) -> Result<Promotion, CatalogServiceError> {
        let promotion = new.into_promotion(PromotionId::new(Uuid::new_v4().to_string()))?;

        let mut cache = self.cache.write().await;
        ensure_items_exist(&cache.menu, &promotion.item_ids)?;
        let mut promotions = cache.promotions.clone();
        promotions.push(promotion.clone());

        self.repository.save_promotions(&promotions).await?;
        cache.promotions = promotions;

        tracing::info!(id = %promotion.id, "promotion added");
        Ok(promotion)
    }

    /// Apply a partial edit to one promotion.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::PromotionNotFound`] for an unknown id, or the
    /// errors of [`CatalogService::add_promotion`].
    #[instrument(skip(self, update))]
    pub async fn update_promotion(
        &self,
        id: &PromotionId,
        update: PromotionUpdate,
    ) -> Result<Promotion, CatalogServiceError> {
        let mut cache = self.cache.write().await;
        if let Some(item_ids) = &update.item_ids {
            ensure_items_exist(&cache.menu, item_ids)?;
        }
        let mut promotions = cache.promotions.clone();
        let promotion = promotions
            .iter_mut()
            .find(|promotion| &promotion.id == id)
            .ok_or_else(|| CatalogError::PromotionNotFound(id.clone()))?;
        update.apply(promotion)?;
        let updated = promotion.clone();

        self.repository.save_promotions(&promotions).await?;
        cache.promotions = promotions;

        tracing::info!("promotion updated");
        Ok(updated)
    }

    /// Delete one promotion.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::PromotionNotFound`] for an unknown id.
    #[instrument(skip(self))]
    pub async fn remove_promotion(&self, id: &PromotionId) -> Result<(), CatalogServiceError> {
        let mut cache = self.cache.write().await;
        let mut promotions = cache.promotions.clone();
        let before = promotions.len();
        promotions.retain(|promotion| &promotion.id != id);
        if promotions.len() == before {
            return Err(CatalogError::PromotionNotFound(id.clone()).into());
        }

        self.repository.save_promotions(&promotions).await?;
        cache.promotions = promotions;

        tracing::info!("promotion removed");
        Ok(())
    }
}

/// Empty is allowed (no link); anything else must be an absolute `http` or
/// `https` URL, since the link is rendered as a clickable anchor.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidMapsLink`] for anything else.
pub fn validate_maps_link(link: &str) -> Result<(), CatalogError> {
    let link = link.trim();
    if link.is_empty() {
        return Ok(());
    }
    match url::Url::parse(link) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(CatalogError::InvalidMapsLink(link.to_owned())),
    }
}

fn ensure_items_exist(menu: &[MenuItem], item_ids: &[MenuItemId]) -> Result<(), CatalogError> {
    match item_ids
        .iter()
        .find(|id| !menu.iter().any(|item| &item.id == *id))
    {
        Some(missing) => Err(CatalogError::MenuItemNotFound(missing.clone())),
        None => Ok(()),
    }
}
