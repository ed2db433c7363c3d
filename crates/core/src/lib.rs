//! IPIZZA Core - domain library for the pizzeria storefront.
//!
//! This crate holds everything about the store that does not need I/O:
//! - [`cart`] - the visitor's cart and its merge/quantity rules
//! - [`catalog`] - menu items, promotions, store profile and their edits
//! - [`order`] - validation and the WhatsApp order message
//! - [`schedule`] - the open/closed evaluator
//!
//! # Architecture
//!
//! No persistence, no HTTP, no clock. The storefront crate loads the catalog,
//! keeps carts in the session store, reads the wall clock and feeds all of it
//! through the functions here.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, money, times and enumerations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod order;
pub mod schedule;
pub mod types;

pub use cart::{Cart, CartEntry, CartLine};
pub use catalog::{
    Catalog, CatalogError, HoursEntry, MenuItem, MenuItemUpdate, NewMenuItem, NewPromotion,
    Pricing, Promotion, PromotionUpdate, ScheduleInput, StoreProfile, StoreProfileUpdate,
    StoreSchedule, default_menu, filter_menu,
};
pub use order::{
    CheckoutRequest, Customer, Fulfillment, MessageDispatcher, MessageLink, OrderSummary,
    ValidationError,
};
pub use schedule::{evaluate, evaluate_at};
pub use types::*;
