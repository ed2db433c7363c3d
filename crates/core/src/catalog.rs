//! Store catalog: menu items, promotions and the store profile.
//!
//! The catalog is plain data. Loading and saving it is the storefront's job;
//! this module only knows how to validate edits and how catalog entries
//! become cart entries.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::cart::CartEntry;
use crate::types::wall_clock::{self, Loose, TimeParseError, WallClockTime};
use crate::types::{
    HoursEntryId, MenuCategory, MenuItemId, Money, ProductId, PromotionId, Size,
};

/// Errors raised while resolving or editing catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A sized item was added without choosing a size.
    #[error("{item} requires a size (broto or grande)")]
    SizeRequired { item: String },

    /// A size was chosen for an item sold at a single price.
    #[error("{item} is not sold in size {size}")]
    SizeNotOffered { item: String, size: Size },

    /// Names must contain something other than whitespace.
    #[error("name cannot be blank")]
    BlankName,

    /// Prices must not be below zero.
    #[error("price cannot be negative")]
    NegativePrice,

    /// A schedule time is not `HH:MM`.
    #[error("invalid time: {0}")]
    InvalidTime(#[from] TimeParseError),

    /// Weekdays are numbered 0 (Sunday) through 6 (Saturday).
    #[error("invalid weekday {0}: must be between 0 (Sunday) and 6 (Saturday)")]
    InvalidWeekday(u8),

    /// The maps link is not an absolute http(s) URL.
    #[error("invalid maps link: {0}")]
    InvalidMapsLink(String),

    /// No menu item has this id.
    #[error("menu item not found: {0}")]
    MenuItemNotFound(MenuItemId),

    /// No promotion has this id.
    #[error("promotion not found: {0}")]
    PromotionNotFound(PromotionId),
}

// =============================================================================
// Menu
// =============================================================================

/// How a menu item is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pricing {
    /// One fixed price (drinks, esfihas).
    Single(Money),
    /// Separate small and large prices (pizzas).
    Sized { broto: Money, grande: Money },
}

impl Pricing {
    fn validate(&self) -> Result<(), CatalogError> {
        let negative = match self {
            Self::Single(price) => price.is_negative(),
            Self::Sized { broto, grande } => broto.is_negative() || grande.is_negative(),
        };
        if negative {
            return Err(CatalogError::NegativePrice);
        }
        Ok(())
    }
}

/// An orderable item on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub category: MenuCategory,
    pub pricing: Pricing,
    /// Customer-facing description, usually the ingredients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MenuItem {
    /// Price of the item in the requested size.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::SizeRequired`] for a sized item without a size,
    /// and [`CatalogError::SizeNotOffered`] for a single-price item with one.
    pub fn price_for(&self, size: Option<Size>) -> Result<Money, CatalogError> {
        match (self.pricing, size) {
            (Pricing::Single(price), None) => Ok(price),
            (Pricing::Sized { broto, .. }, Some(Size::Broto)) => Ok(broto),
            (Pricing::Sized { grande, .. }, Some(Size::Grande)) => Ok(grande),
            (Pricing::Sized { .. }, None) => Err(CatalogError::SizeRequired {
                item: self.name.clone(),
            }),
            (Pricing::Single(_), Some(size)) => Err(CatalogError::SizeNotOffered {
                item: self.name.clone(),
                size,
            }),
        }
    }

    /// What the cart needs to add one of this item, price captured now.
    ///
    /// # Errors
    ///
    /// See [`MenuItem::price_for`].
    pub fn cart_entry(&self, size: Option<Size>) -> Result<CartEntry, CatalogError> {
        let unit_price = self.price_for(size)?;
        Ok(CartEntry {
            product_id: ProductId::from(&self.id),
            display_name: self.name.clone(),
            unit_price,
            size,
            note: self.note.clone().filter(|note| !note.trim().is_empty()),
        })
    }

    /// The price a bundle compares against: the large size, or the single
    /// price.
    #[must_use]
    pub fn reference_price(&self) -> Money {
        match self.pricing {
            Pricing::Single(price) => price,
            Pricing::Sized { grande, .. } => grande,
        }
    }

    /// Case-insensitive name search.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Items of one category whose name contains `query`, in menu order.
#[must_use]
pub fn filter_menu<'a>(
    menu: &'a [MenuItem],
    category: MenuCategory,
    query: &str,
) -> Vec<&'a MenuItem> {
    menu.iter()
        .filter(|item| item.category == category && item.matches(query))
        .collect()
}

/// Payload for creating a menu item; the id is minted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub category: MenuCategory,
    pub pricing: Pricing,
    #[serde(default)]
    pub note: Option<String>,
}

impl NewMenuItem {
    /// Validate and attach an id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BlankName`] or [`CatalogError::NegativePrice`].
    pub fn into_item(self, id: MenuItemId) -> Result<MenuItem, CatalogError> {
        validate_name(&self.name)?;
        self.pricing.validate()?;
        Ok(MenuItem {
            id,
            name: self.name.trim().to_owned(),
            category: self.category,
            pricing: self.pricing,
            note: normalize_note(self.note),
        })
    }
}

/// Partial edit of a menu item; absent fields are left untouched.
///
/// An empty `note` clears the note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<MenuCategory>,
    #[serde(default)]
    pub pricing: Option<Pricing>,
    #[serde(default)]
    pub note: Option<String>,
}

impl MenuItemUpdate {
    /// Validate the edit, then merge it into `item`.
    ///
    /// Nothing is written when validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BlankName`] or [`CatalogError::NegativePrice`].
    pub fn apply(self, item: &mut MenuItem) -> Result<(), CatalogError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(pricing) = &self.pricing {
            pricing.validate()?;
        }

        if let Some(name) = self.name {
            item.name = name.trim().to_owned();
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(pricing) = self.pricing {
            item.pricing = pricing;
        }
        if let Some(note) = self.note {
            item.note = normalize_note(Some(note));
        }
        Ok(())
    }
}

// =============================================================================
// Promotions
// =============================================================================

/// A bundle of menu items sold together at a fixed price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: PromotionId,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub item_ids: Vec<MenuItemId>,
}

impl Promotion {
    /// The menu items this promotion includes, skipping ids no longer on the
    /// menu.
    pub fn included_items<'a>(&'a self, menu: &'a [MenuItem]) -> impl Iterator<Item = &'a MenuItem> {
        self.item_ids
            .iter()
            .filter_map(|id| menu.iter().find(|item| &item.id == id))
    }

    /// Sum of the included items' reference prices (the "from" price shown
    /// struck through).
    #[must_use]
    pub fn list_price(&self, menu: &[MenuItem]) -> Money {
        self.included_items(menu).map(MenuItem::reference_price).sum()
    }

    /// What the cart needs to add this bundle.
    #[must_use]
    pub fn cart_entry(&self, menu: &[MenuItem]) -> CartEntry {
        let names: Vec<&str> = self
            .included_items(menu)
            .map(|item| item.name.as_str())
            .collect();
        CartEntry {
            product_id: ProductId::from(&self.id),
            display_name: self.name.clone(),
            unit_price: self.price,
            size: None,
            note: Some(format!("Promoção: {}", names.join(", "))),
        }
    }
}

/// Payload for creating a promotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPromotion {
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub item_ids: Vec<MenuItemId>,
}

impl NewPromotion {
    /// Validate and attach an id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BlankName`] or [`CatalogError::NegativePrice`].
    pub fn into_promotion(self, id: PromotionId) -> Result<Promotion, CatalogError> {
        validate_name(&self.name)?;
        if self.price.is_negative() {
            return Err(CatalogError::NegativePrice);
        }
        Ok(Promotion {
            id,
            name: self.name.trim().to_owned(),
            price: self.price,
            item_ids: self.item_ids,
        })
    }
}

/// Partial edit of a promotion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub item_ids: Option<Vec<MenuItemId>>,
}

impl PromotionUpdate {
    /// Validate the edit, then merge it into `promotion`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BlankName`] or [`CatalogError::NegativePrice`].
    pub fn apply(self, promotion: &mut Promotion) -> Result<(), CatalogError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if self.price.is_some_and(|price| price.is_negative()) {
            return Err(CatalogError::NegativePrice);
        }

        if let Some(name) = self.name {
            promotion.name = name.trim().to_owned();
        }
        if let Some(price) = self.price {
            promotion.price = price;
        }
        if let Some(item_ids) = self.item_ids {
            promotion.item_ids = item_ids;
        }
        Ok(())
    }
}

// =============================================================================
// Store profile
// =============================================================================

/// Opening hours used by the open/closed evaluator.
///
/// Any missing field means the store is reported closed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSchedule {
    #[serde(
        default,
        deserialize_with = "wall_clock::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub opening_time: Option<WallClockTime>,
    #[serde(
        default,
        deserialize_with = "wall_clock::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub closing_time: Option<WallClockTime>,
    /// Weekday numbers, 0 = Sunday through 6 = Saturday.
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_days",
        skip_serializing_if = "Option::is_none"
    )]
    pub operating_days: Option<BTreeSet<u8>>,
}

/// Stored weekday list; any entry that is not a weekday number drops the
/// whole list, so the store reads as closed rather than open on a guess.
fn deserialize_lenient_days<'de, D>(deserializer: D) -> Result<Option<BTreeSet<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Loose<Vec<Loose<u8>>>>::deserialize(deserializer)?;
    Ok(raw.and_then(Loose::valid).and_then(|days| {
        days.into_iter()
            .map(|day| day.valid().filter(|day| *day <= 6))
            .collect()
    }))
}

/// A stored schedule that is not an object at all reads as empty.
fn deserialize_lenient_schedule<'de, D>(deserializer: D) -> Result<StoreSchedule, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Loose<StoreSchedule>>::deserialize(deserializer)?;
    Ok(raw.and_then(Loose::valid).unwrap_or_default())
}

/// Unvalidated schedule as typed into the admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleInput {
    #[serde(default)]
    pub opening_time: Option<String>,
    #[serde(default)]
    pub closing_time: Option<String>,
    #[serde(default)]
    pub operating_days: Option<Vec<u8>>,
}

impl TryFrom<ScheduleInput> for StoreSchedule {
    type Error = CatalogError;

    fn try_from(input: ScheduleInput) -> Result<Self, Self::Error> {
        let parse = |value: Option<String>| {
            value
                .filter(|s| !s.trim().is_empty())
                .map(|s| WallClockTime::parse(s.trim()))
                .transpose()
        };
        let opening_time = parse(input.opening_time)?;
        let closing_time = parse(input.closing_time)?;

        let operating_days = input
            .operating_days
            .map(|days| {
                days.into_iter()
                    .map(|day| {
                        if day <= 6 {
                            Ok(day)
                        } else {
                            Err(CatalogError::InvalidWeekday(day))
                        }
                    })
                    .collect::<Result<BTreeSet<u8>, _>>()
            })
            .transpose()?;

        Ok(Self {
            opening_time,
            closing_time,
            operating_days,
        })
    }
}

/// One free-text line of the opening hours shown to customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursEntry {
    pub id: HoursEntryId,
    /// e.g. "Terça a Domingo".
    pub day: String,
    /// e.g. "18h - 23h".
    pub time: String,
}

/// Public information about the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreProfile {
    pub name: String,
    /// WhatsApp number orders are sent to; any formatting is allowed.
    pub contact_number: String,
    /// Instagram handle, e.g. `@pizzadelivery`.
    pub social_handle: String,
    pub maps_link: String,
    #[serde(default)]
    pub hours: Vec<HoursEntry>,
    pub delivery_time: String,
    #[serde(default, deserialize_with = "deserialize_lenient_schedule")]
    pub schedule: StoreSchedule,
}

impl StoreProfile {
    /// The contact number with every non-digit removed.
    #[must_use]
    pub fn contact_digits(&self) -> String {
        self.contact_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect()
    }
}

impl Default for StoreProfile {
    fn default() -> Self {
        Self {
            name: "Pizza Delivery".to_string(),
            contact_number: "5511999999999".to_string(),
            social_handle: "@pizzadelivery".to_string(),
            maps_link: "https://maps.google.com".to_string(),
            hours: vec![HoursEntry {
                id: HoursEntryId::new("1"),
                day: "Terça a Domingo".to_string(),
                time: "18h - 23h".to_string(),
            }],
            delivery_time: "40-60 minutos".to_string(),
            schedule: StoreSchedule {
                opening_time: WallClockTime::parse("18:00").ok(),
                closing_time: WallClockTime::parse("23:00").ok(),
                operating_days: Some(BTreeSet::from([0, 2, 3, 4, 5, 6])),
            },
        }
    }
}

/// Partial edit of the store profile.
///
/// `hours` and `schedule` replace the stored values wholesale when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub social_handle: Option<String>,
    #[serde(default)]
    pub maps_link: Option<String>,
    #[serde(default)]
    pub hours: Option<Vec<HoursEntry>>,
    #[serde(default)]
    pub delivery_time: Option<String>,
    #[serde(default)]
    pub schedule: Option<ScheduleInput>,
}

impl StoreProfileUpdate {
    /// Validate the edit, then merge it into `profile`.
    ///
    /// Returns whether the schedule changed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BlankName`], [`CatalogError::InvalidTime`] or
    /// [`CatalogError::InvalidWeekday`]. Nothing is written on error.
    pub fn apply(self, profile: &mut StoreProfile) -> Result<bool, CatalogError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        let schedule = self.schedule.map(StoreSchedule::try_from).transpose()?;

        if let Some(name) = self.name {
            profile.name = name.trim().to_owned();
        }
        if let Some(contact_number) = self.contact_number {
            profile.contact_number = contact_number;
        }
        if let Some(social_handle) = self.social_handle {
            profile.social_handle = social_handle;
        }
        if let Some(maps_link) = self.maps_link {
            profile.maps_link = maps_link;
        }
        if let Some(hours) = self.hours {
            profile.hours = hours;
        }
        if let Some(delivery_time) = self.delivery_time {
            profile.delivery_time = delivery_time;
        }

        let schedule_changed = match schedule {
            Some(schedule) if schedule != profile.schedule => {
                profile.schedule = schedule;
                true
            }
            _ => false,
        };
        Ok(schedule_changed)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Everything the storefront renders: profile, menu and promotions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub profile: StoreProfile,
    #[serde(default)]
    pub menu: Vec<MenuItem>,
    #[serde(default)]
    pub promotions: Vec<Promotion>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            profile: StoreProfile::default(),
            menu: default_menu(),
            promotions: Vec::new(),
        }
    }
}

/// The three pizzas a fresh store starts with.
#[must_use]
pub fn default_menu() -> Vec<MenuItem> {
    let pizza = |id: &str, name: &str, category, broto, grande, note: &str| MenuItem {
        id: MenuItemId::new(id),
        name: name.to_string(),
        category,
        pricing: Pricing::Sized {
            broto: Money::from_reais(broto),
            grande: Money::from_reais(grande),
        },
        note: Some(note.to_string()),
    };

    vec![
        pizza(
            "1",
            "Mussarela",
            MenuCategory::SavoryPizza,
            25,
            40,
            "Queijo mussarela e molho de tomate",
        ),
        pizza(
            "2",
            "Calabresa",
            MenuCategory::SavoryPizza,
            28,
            45,
            "Calabresa, cebola e azeitonas",
        ),
        pizza(
            "3",
            "Chocolate",
            MenuCategory::SweetPizza,
            30,
            48,
            "Chocolate ao leite derretido",
        ),
    ]
}

fn validate_name(name: &str) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::BlankName);
    }
    Ok(())
}

fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|note| note.trim().to_owned())
        .filter(|note| !note.is_empty())
}
