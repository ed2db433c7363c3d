//! Seed the catalog documents.
//!
//! Reads a YAML catalog (or takes the built-in default), runs it through the
//! same checks the admin API applies, and writes the three JSON documents
//! the storefront loads at startup.

use std::path::Path;

use tracing::{error, info};

use ipizza_core::{Catalog, NewMenuItem, NewPromotion};
use ipizza_storefront::db::{CatalogRepository, JsonFileRepository};
use ipizza_storefront::services::catalog::validate_maps_link;

/// Seed the catalog into `data_dir`.
///
/// # Errors
///
/// Returns an error if the data directory already holds a catalog and
/// `force` is not set, if the file cannot be read or parsed, if any entry
/// fails validation, or if writing fails.
pub async fn catalog(
    data_dir: &Path,
    file: Option<&Path>,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository = JsonFileRepository::new(data_dir);
    if !force && !repository.is_empty().await {
        return Err(format!(
            "{} already holds a catalog; pass --force to overwrite it",
            data_dir.display()
        )
        .into());
    }

    let catalog = match file {
        Some(path) => {
            if !path.exists() {
                return Err(format!("File not found: {}", path.display()).into());
            }
            info!(path = %path.display(), "Loading catalog from file");
            let content = tokio::fs::read_to_string(path).await?;
            parse_catalog(&content)?
        }
        None => {
            info!("Using the built-in default catalog");
            Catalog::default()
        }
    };

    let errors = validation_errors(&catalog);
    if !errors.is_empty() {
        error!("Catalog validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    tokio::fs::create_dir_all(data_dir).await?;
    repository.save_store_profile(&catalog.profile).await?;
    repository.save_menu(&catalog.menu).await?;
    repository.save_promotions(&catalog.promotions).await?;

    info!("Seeding complete!");
    info!("  Store: {}", catalog.profile.name);
    info!("  Menu items: {}", catalog.menu.len());
    info!("  Promotions: {}", catalog.promotions.len());

    Ok(())
}

fn parse_catalog(content: &str) -> Result<Catalog, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// One message per problem the admin API would have rejected.
fn validation_errors(catalog: &Catalog) -> Vec<String> {
    let mut errors = Vec::new();

    if catalog.profile.name.trim().is_empty() {
        errors.push("store name is blank".to_string());
    }
    if let Err(err) = validate_maps_link(&catalog.profile.maps_link) {
        errors.push(format!("store profile: {err}"));
    }

    for item in &catalog.menu {
        let new = NewMenuItem {
            name: item.name.clone(),
            category: item.category,
            pricing: item.pricing,
            note: item.note.clone(),
        };
        if let Err(err) = new.into_item(item.id.clone()) {
            errors.push(format!("menu item {}: {err}", item.id));
        }
    }

    for promotion in &catalog.promotions {
        let new = NewPromotion {
            name: promotion.name.clone(),
            price: promotion.price,
            item_ids: Vec::new(),
        };
        if let Err(err) = new.into_promotion(promotion.id.clone()) {
            errors.push(format!("promotion {}: {err}", promotion.id));
        }
    }

    errors.extend(unknown_references(catalog));
    errors
}

/// One message per promotion item id that is not on the menu.
fn unknown_references(catalog: &Catalog) -> Vec<String> {
    catalog
        .promotions
        .iter()
        .flat_map(|promotion| {
            promotion
                .item_ids
                .iter()
                .filter(|id| !catalog.menu.iter().any(|item| &item.id == *id))
                .map(move |id| format!("promotion {:?} names unknown item {id}", promotion.name))
        })
        .collect()
}
