//! Storefront-side models.

pub mod session;

pub use session::{clear_admin, is_admin, load_cart, save_cart, set_admin};
