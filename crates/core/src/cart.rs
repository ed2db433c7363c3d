//! The visitor's cart.
//!
//! A cart is an ordered list of lines keyed by `(product id, size)`. Adding
//! an entry whose key already exists bumps that line's quantity instead of
//! appending a duplicate, and no line is ever kept at quantity zero.
//!
//! Prices and names are captured when an entry is added; later catalog edits
//! do not reach into carts that already hold the item.

use serde::{Deserialize, Serialize};

use crate::types::{Money, ProductId, Size};

/// Everything needed to put one unit of something into the cart.
///
/// Built from the catalog by [`MenuItem::cart_entry`](crate::MenuItem::cart_entry)
/// and [`Promotion::cart_entry`](crate::Promotion::cart_entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product_id: ProductId,
    pub display_name: String,
    pub unit_price: Money,
    pub size: Option<Size>,
    pub note: Option<String>,
}

/// One distinct orderable unit in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    pub unit_price: Money,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }

    fn is(&self, product_id: &ProductId, size: Option<Size>) -> bool {
        &self.product_id == product_id && self.size == size
    }
}

/// The lines a visitor has chosen, in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for a `(product, size)` key, if present.
    #[must_use]
    pub fn line(&self, product_id: &ProductId, size: Option<Size>) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.is(product_id, size))
    }

    /// Add one unit of `entry`.
    ///
    /// Merges into an existing line with the same `(product, size)` key by
    /// incrementing its quantity; otherwise appends a new line with quantity
    /// 1. Returns the affected line.
    #[allow(clippy::indexing_slicing)] // index was just found or just pushed
    pub fn add_item(&mut self, entry: CartEntry) -> &CartLine {
        let existing = self
            .lines
            .iter()
            .position(|line| line.is(&entry.product_id, entry.size));

        let index = if let Some(index) = existing {
            let line = &mut self.lines[index];
            line.quantity = line.quantity.saturating_add(1);
            index
        } else {
            self.lines.push(CartLine {
                product_id: entry.product_id,
                size: entry.size,
                unit_price: entry.unit_price,
                display_name: entry.display_name,
                note: entry.note,
                quantity: 1,
            });
            self.lines.len() - 1
        };
        &self.lines[index]
    }

    /// Delete the line for `(product, size)`. Absent lines are ignored.
    pub fn remove_line(&mut self, product_id: &ProductId, size: Option<Size>) {
        self.lines.retain(|line| !line.is(product_id, size));
    }

    /// Replace a line's quantity; zero or less removes the line.
    ///
    /// Quantities above `u32::MAX` are clamped. Setting the quantity of a
    /// line that is not in the cart does nothing.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64, size: Option<Size>) {
        if quantity <= 0 {
            self.remove_line(product_id, size);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.lines.iter_mut().find(|line| line.is(product_id, size)) {
            line.quantity = quantity;
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities (the badge count), not the number of lines.
    #[must_use]
    pub fn line_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity))
    }
}
