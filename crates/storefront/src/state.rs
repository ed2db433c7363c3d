//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::{CatalogService, StatusMonitor};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration, the catalog and the open/closed monitor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogService,
    status: StatusMonitor,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Loaded catalog service
    /// * `status` - Running status monitor over the same catalog
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: CatalogService, status: StatusMonitor) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                status,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog service.
    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    /// Get a reference to the store status monitor.
    #[must_use]
    pub fn status(&self) -> &StatusMonitor {
        &self.inner.status
    }
}
