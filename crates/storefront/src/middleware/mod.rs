//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (opens the `request` span)
//! 3. Request ID (records `request_id` on that span)
//! 4. Security headers (CSP, frame denial, etc.)
//! 5. Session layer (tower-sessions with in-memory store)
//!
//! Admin routes additionally extract [`RequireAdmin`].

pub mod admin_auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use admin_auth::RequireAdmin;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
