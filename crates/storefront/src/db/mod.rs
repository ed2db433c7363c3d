//! Catalog persistence.
//!
//! The catalog is stored as three whole-value documents:
//!
//! - `store_info` - the [`StoreProfile`] (name, contact, hours, schedule)
//! - `menu` - every [`MenuItem`]
//! - `promotions` - every [`Promotion`]
//!
//! Each write replaces the whole document. Nothing is merged at this layer;
//! partial edits are resolved by `services::catalog` before saving.
//!
//! # Backends
//!
//! - [`JsonFileRepository`] - one JSON file per document in a data directory
//! - [`InMemoryRepository`] - process-local, for tests and throwaway runs

pub mod json_file;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use ipizza_core::{MenuItem, Promotion, StoreProfile};

pub use json_file::JsonFileRepository;
pub use memory::InMemoryRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reading or writing the backing storage failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Whole-value storage for the three catalog documents.
///
/// `load_*` returns `None` when nothing has been stored yet, so callers can
/// fall back to defaults.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Load the store profile.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] when the document exists but cannot be
    /// read or decoded.
    async fn load_store_profile(&self) -> Result<Option<StoreProfile>, RepositoryError>;

    /// Replace the store profile.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] when the write fails.
    async fn save_store_profile(&self, profile: &StoreProfile) -> Result<(), RepositoryError>;

    /// Load the menu.
    ///
    /// # Errors
    ///
    /// See [`CatalogRepository::load_store_profile`].
    async fn load_menu(&self) -> Result<Option<Vec<MenuItem>>, RepositoryError>;

    /// Replace the menu.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] when the write fails.
    async fn save_menu(&self, menu: &[MenuItem]) -> Result<(), RepositoryError>;

    /// Load the promotions.
    ///
    /// # Errors
    ///
    /// See [`CatalogRepository::load_store_profile`].
    async fn load_promotions(&self) -> Result<Option<Vec<Promotion>>, RepositoryError>;

    /// Replace the promotions.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] when the write fails.
    async fn save_promotions(&self, promotions: &[Promotion]) -> Result<(), RepositoryError>;
}
