//! Enumerations shared by the catalog, the cart and the storefront pages.

use serde::{Deserialize, Serialize};

/// Pizza size, the only variant dimension the menu has.
///
/// The wire names are the ones the store uses on its menu and in the
/// WhatsApp order message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    /// Small ("broto").
    Broto,
    /// Large ("grande").
    Grande,
}

impl Size {
    /// Lowercase wire name, as printed in the order message.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Broto => "broto",
            Self::Grande => "grande",
        }
    }

    /// Capitalized label for menu and cart pages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Broto => "Broto",
            Self::Grande => "Grande",
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "broto" => Ok(Self::Broto),
            "grande" => Ok(Self::Grande),
            _ => Err(format!("invalid size: {s}")),
        }
    }
}

/// How the customer will pay on delivery or pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "dinheiro")]
    Cash,
    #[serde(rename = "debito")]
    Debit,
    #[serde(rename = "credito")]
    Credit,
    #[serde(rename = "pix")]
    Pix,
}

impl PaymentMethod {
    /// Every method, in the order the checkout form offers them.
    pub const ALL: [Self; 4] = [Self::Cash, Self::Debit, Self::Credit, Self::Pix];

    /// Literal written into the order message.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "dinheiro",
            Self::Debit => "debito",
            Self::Credit => "credito",
            Self::Pix => "pix",
        }
    }

    /// Label for the checkout form.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Dinheiro",
            Self::Debit => "Débito",
            Self::Credit => "Crédito",
            Self::Pix => "Pix",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Menu section an item is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MenuCategory {
    #[default]
    #[serde(rename = "pizza-salgada")]
    SavoryPizza,
    #[serde(rename = "pizza-doce")]
    SweetPizza,
    #[serde(rename = "esfirra-salgada")]
    SavoryEsfiha,
    #[serde(rename = "esfirra-doce")]
    SweetEsfiha,
    #[serde(rename = "bebidas")]
    Drinks,
}

impl MenuCategory {
    /// Every category, in menu tab order.
    pub const ALL: [Self; 5] = [
        Self::SavoryPizza,
        Self::SweetPizza,
        Self::SavoryEsfiha,
        Self::SweetEsfiha,
        Self::Drinks,
    ];

    /// URL slug, identical to the serialized name.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::SavoryPizza => "pizza-salgada",
            Self::SweetPizza => "pizza-doce",
            Self::SavoryEsfiha => "esfirra-salgada",
            Self::SweetEsfiha => "esfirra-doce",
            Self::Drinks => "bebidas",
        }
    }

    /// Tab label on the menu page.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SavoryPizza => "🍕 Pizzas Salgadas",
            Self::SweetPizza => "🍰 Pizzas Doces",
            Self::SavoryEsfiha => "🥟 Esfirras Salgadas",
            Self::SweetEsfiha => "🧁 Esfirras Doces",
            Self::Drinks => "🥤 Bebidas",
        }
    }

    /// Whether items in this category are sold in sizes.
    #[must_use]
    pub const fn is_pizza(&self) -> bool {
        matches!(self, Self::SavoryPizza | Self::SweetPizza)
    }
}

impl std::str::FromStr for MenuCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.slug() == s)
            .ok_or_else(|| format!("invalid menu category: {s}"))
    }
}

/// Whether the store is taking orders right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreStatus {
    Open,
    /// Also the answer whenever the schedule is incomplete.
    #[default]
    Closed,
}

impl StoreStatus {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Badge text for the home page.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Open => "Aberto",
            Self::Closed => "Fechado",
        }
    }
}

impl std::fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_size_round_trips_through_str() {
        for size in [Size::Broto, Size::Grande] {
            assert_eq!(size.as_str().parse::<Size>().unwrap(), size);
        }
        assert!("media".parse::<Size>().is_err());
    }

    #[test]
    fn test_payment_method_wire_names() {
        let json = serde_json::to_string(&PaymentMethod::ALL).unwrap();
        assert_eq!(json, r#"["dinheiro","debito","credito","pix"]"#);
    }

    #[test]
    fn test_category_slug_matches_serde_name() {
        for category in MenuCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.slug()));
            assert_eq!(category.slug().parse::<MenuCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_store_status_defaults_closed() {
        assert_eq!(StoreStatus::default(), StoreStatus::Closed);
        assert!(!StoreStatus::default().is_open());
    }
}
