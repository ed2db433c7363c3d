//! JSON-file catalog storage.
//!
//! Layout of the data directory:
//!
//! ```text
//! <data dir>/store_info.json
//! <data dir>/menu.json
//! <data dir>/promotions.json
//! ```
//!
//! Writes go to `<name>.json.tmp` first and are renamed over the target, so a
//! crash mid-write leaves the previous document intact.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use ipizza_core::{MenuItem, Promotion, StoreProfile};

use super::{CatalogRepository, RepositoryError};

pub const STORE_INFO_FILE: &str = "store_info.json";
pub const MENU_FILE: &str = "menu.json";
pub const PROMOTIONS_FILE: &str = "promotions.json";

/// Catalog repository backed by JSON files in one directory.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    /// Use `dir` as the data directory. It is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether any catalog document exists yet.
    pub async fn is_empty(&self) -> bool {
        for file in [STORE_INFO_FILE, MENU_FILE, PROMOTIONS_FILE] {
            if tokio::fs::try_exists(self.dir.join(file))
                .await
                .unwrap_or(false)
            {
                return false;
            }
        }
        true
    }

    async fn read<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>, RepositoryError> {
        let bytes = match tokio::fs::read(self.dir.join(file)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn write<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<(), RepositoryError> {
        let json = serde_json::to_vec_pretty(value)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let target = self.dir.join(file);
        let temp = self.dir.join(format!("{file}.tmp"));
        tokio::fs::write(&temp, json).await?;
        tokio::fs::rename(&temp, &target).await?;

        tracing::debug!(path = %target.display(), "catalog document written");
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for JsonFileRepository {
    #[instrument(skip(self))]
    async fn load_store_profile(&self) -> Result<Option<StoreProfile>, RepositoryError> {
        self.read(STORE_INFO_FILE).await
    }

    #[instrument(skip_all)]
    async fn save_store_profile(&self, profile: &StoreProfile) -> Result<(), RepositoryError> {
        self.write(STORE_INFO_FILE, profile).await
    }

    #[instrument(skip(self))]
    async fn load_menu(&self) -> Result<Option<Vec<MenuItem>>, RepositoryError> {
        self.read(MENU_FILE).await
    }

    #[instrument(skip_all, fields(items = menu.len()))]
    async fn save_menu(&self, menu: &[MenuItem]) -> Result<(), RepositoryError> {
        self.write(MENU_FILE, menu).await
    }

    #[instrument(skip(self))]
    async fn load_promotions(&self) -> Result<Option<Vec<Promotion>>, RepositoryError> {
        self.read(PROMOTIONS_FILE).await
    }

    #[instrument(skip_all, fields(promotions = promotions.len()))]
    async fn save_promotions(&self, promotions: &[Promotion]) -> Result<(), RepositoryError> {
        self.write(PROMOTIONS_FILE, promotions).await
    }
}
