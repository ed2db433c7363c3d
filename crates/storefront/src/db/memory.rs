//! Process-local catalog storage.

use async_trait::async_trait;
use tokio::sync::Mutex;

use ipizza_core::{Catalog, MenuItem, Promotion, StoreProfile};

use super::{CatalogRepository, RepositoryError};

#[derive(Debug, Default)]
struct Documents {
    store_profile: Option<StoreProfile>,
    menu: Option<Vec<MenuItem>>,
    promotions: Option<Vec<Promotion>>,
}

/// Catalog repository that keeps documents in memory. Never fails.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    documents: Mutex<Documents>,
}

impl InMemoryRepository {
    /// An empty repository; loads return `None` until something is saved.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository pre-populated with every document of `catalog`.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            documents: Mutex::new(Documents {
                store_profile: Some(catalog.profile),
                menu: Some(catalog.menu),
                promotions: Some(catalog.promotions),
            }),
        }
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRepository {
    async fn load_store_profile(&self) -> Result<Option<StoreProfile>, RepositoryError> {
        Ok(self.documents.lock().await.store_profile.clone())
    }

    async fn save_store_profile(&self, profile: &StoreProfile) -> Result<(), RepositoryError> {
        self.documents.lock().await.store_profile = Some(profile.clone());
        Ok(())
    }

    async fn load_menu(&self) -> Result<Option<Vec<MenuItem>>, RepositoryError> {
        Ok(self.documents.lock().await.menu.clone())
    }

    async fn save_menu(&self, menu: &[MenuItem]) -> Result<(), RepositoryError> {
        self.documents.lock().await.menu = Some(menu.to_vec());
        Ok(())
    }

    async fn load_promotions(&self) -> Result<Option<Vec<Promotion>>, RepositoryError> {
        Ok(self.documents.lock().await.promotions.clone())
    }

    async fn save_promotions(&self, promotions: &[Promotion]) -> Result<(), RepositoryError> {
        self.documents.lock().await.promotions = Some(promotions.to_vec());
        Ok(())
    }
}
