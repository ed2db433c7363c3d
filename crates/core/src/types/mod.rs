//! Core types for IPIZZA.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod status;
pub mod wall_clock;

pub use id::*;
pub use money::Money;
pub use status::*;
pub use wall_clock::{TimeParseError, WallClockTime};
