//! Newtype IDs for type-safe entity references.
//!
//! Catalog identifiers are opaque strings (the admin panel mints UUIDs, older
//! stored catalogs use timestamps or small integers). Use the `define_id!`
//! macro to create wrappers that prevent accidentally mixing IDs from
//! different entity types.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use ipizza_core::define_id;
/// define_id!(ToppingId);
/// define_id!(DriverId);
///
/// let topping = ToppingId::new("42");
/// let driver = DriverId::new("42");
///
/// // These are different types, so this won't compile:
/// // let _: ToppingId = driver;
/// # let _ = (topping, driver);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(MenuItemId);
define_id!(PromotionId);
define_id!(HoursEntryId);
define_id!(ProductId);

/// Prefix of the synthesized product id a promotion bundle uses in the cart.
pub const PROMOTION_PRODUCT_PREFIX: &str = "promo-";

impl From<&MenuItemId> for ProductId {
    fn from(id: &MenuItemId) -> Self {
        Self::new(id.as_str())
    }
}

impl From<&PromotionId> for ProductId {
    fn from(id: &PromotionId) -> Self {
        Self::new(format!("{PROMOTION_PRODUCT_PREFIX}{id}"))
    }
}

impl ProductId {
    /// Whether this product id was synthesized for a promotion bundle.
    #[must_use]
    pub fn is_promotion(&self) -> bool {
        self.0.starts_with(PROMOTION_PRODUCT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_product_id_is_the_item_id() {
        let id = MenuItemId::new("7");
        let product = ProductId::from(&id);
        assert_eq!(product.as_str(), "7");
        assert!(!product.is_promotion());
    }

    #[test]
    fn test_promotion_product_id_is_prefixed() {
        let id = PromotionId::new("3");
        let product = ProductId::from(&id);
        assert_eq!(product.as_str(), "promo-3");
        assert!(product.is_promotion());
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = MenuItemId::new("abc");
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("\"abc\""));
    }
}
