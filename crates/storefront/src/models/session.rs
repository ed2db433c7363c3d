//! Session-stored visitor data.
//!
//! The cart lives in the session as one serialized [`Cart`] snapshot,
//! rewritten after every mutation. A back-office login is a flag next to it.

use tower_sessions::Session;

use ipizza_core::Cart;

/// Session keys.
pub mod keys {
    /// Key for the visitor's cart snapshot.
    pub const CART: &str = "cart";

    /// Set once the admin token was entered on the login page.
    pub const ADMIN: &str = "admin";
}

/// Load the visitor's cart, or an empty one.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_cart(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Replace the visitor's cart.
///
/// # Errors
///
/// Returns an error if the session store cannot be written.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}

/// Whether this session has logged in to the back office.
pub async fn is_admin(session: &Session) -> bool {
    session
        .get::<bool>(keys::ADMIN)
        .await
        .ok()
        .flatten()
        .unwrap_or(false)
}

/// Mark the session as logged in, under a fresh session id.
///
/// # Errors
///
/// Returns an error if the session store cannot be written.
pub async fn set_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(keys::ADMIN, true).await
}

/// Log the session out of the back office. The cart is kept.
///
/// # Errors
///
/// Returns an error if the session store cannot be written.
pub async fn clear_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<bool>(keys::ADMIN).await.map(|_| ())
}
