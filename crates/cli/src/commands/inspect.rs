//! Read-only views of the stored catalog.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use ipizza_core::{Catalog, MenuCategory, Pricing, evaluate_at};
use ipizza_storefront::db::JsonFileRepository;
use ipizza_storefront::services::CatalogService;

async fn load(data_dir: &Path) -> Result<CatalogService, Box<dyn std::error::Error>> {
    let repository = Arc::new(JsonFileRepository::new(data_dir));
    if repository.is_empty().await {
        info!(dir = %data_dir.display(), "No catalog stored; showing the defaults");
    }
    Ok(CatalogService::load(repository).await?)
}

/// Evaluate the stored schedule against the local clock.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
pub async fn status(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let profile = load(data_dir).await?.store_profile().await;
    let now = chrono::Local::now().naive_local();
    let status = evaluate_at(&profile.schedule, &now);

    let schedule = &profile.schedule;
    info!(
        opening = schedule.opening_time.as_ref().map_or("-", |t| t.as_str()),
        closing = schedule.closing_time.as_ref().map_or("-", |t| t.as_str()),
        days = ?schedule.operating_days,
        "Schedule"
    );
    info!("{} is {} at {}", profile.name, status, now.format("%a %H:%M"));

    Ok(())
}

/// List every menu item grouped by category, then the promotions.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
pub async fn menu(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let Catalog {
        menu, promotions, ..
    } = load(data_dir).await?.snapshot().await;

    for category in MenuCategory::ALL {
        let items: Vec<_> = menu.iter().filter(|item| item.category == category).collect();
        if items.is_empty() {
            continue;
        }

        info!("{}", category.label());
        for item in items {
            match item.pricing {
                Pricing::Single(price) => info!("  [{}] {} - {price}", item.id, item.name),
                Pricing::Sized { broto, grande } => info!(
                    "  [{}] {} - broto {broto} / grande {grande}",
                    item.id, item.name
                ),
            }
        }
    }

    if !promotions.is_empty() {
        info!("Promoções");
        for promotion in &promotions {
            let items: Vec<&str> = promotion
                .included_items(&menu)
                .map(|item| item.name.as_str())
                .collect();
            info!(
                "  [{}] {} - {} ({})",
                promotion.id,
                promotion.name,
                promotion.price,
                items.join(", ")
            );
        }
    }

    Ok(())
}
