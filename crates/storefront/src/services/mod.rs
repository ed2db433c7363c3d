//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `catalog` - cached, write-through catalog reads and admin edits
//! - `schedule` - background open/closed monitor with an injectable clock

pub mod catalog;
pub mod schedule;

pub use catalog::{CatalogService, CatalogServiceError};
pub use schedule::{Clock, FixedClock, LocalClock, StatusMonitor};
