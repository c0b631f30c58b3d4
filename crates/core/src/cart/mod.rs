//! Cart

use std::{fmt, sync::Arc};

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError, CatalogItem, ItemId},
    pricing::{PricingError, line_total, total_price},
};

pub mod observer;
pub mod snapshot;

use observer::{CartEvent, CartObserver};
use snapshot::{CartSnapshot, SnapshotLine};

/// Errors related to pricing the cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A line refers to an item missing from the cart's catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Price arithmetic overflowed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// One item's entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    item_id: ItemId,
    quantity: u32,
}

impl CartLine {
    /// Item this line is for
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    /// Selected quantity, always at least 1
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Items a shopper intends to buy, in the order they were first added.
///
/// The cart holds at most one line per item and never keeps a line at quantity zero: lines are
/// only dropped through [`Cart::remove_item`] or [`Cart::clear`].
pub struct Cart {
    catalog: Arc<Catalog>,
    lines: Vec<CartLine>,
    observers: Vec<Box<dyn CartObserver>>,
}

impl Cart {
    /// Create an empty cart over a catalog.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Cart {
            catalog,
            lines: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Register an observer to be told about every mutation.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Add one unit of an item, appending a new line if the item is not in the cart yet.
    ///
    /// Items that are not part of the cart's catalog, or that differ from the catalog's entry for
    /// the same id, are ignored.
    pub fn add_item(&mut self, item: &CatalogItem) {
        let item_id = item.id();

        if self.catalog.get(item_id.as_str()) != Some(item) {
            debug!(item_id = %item_id, "ignored item from another catalog");

            return;
        }

        let event = if let Some(line) = self.line_mut(item_id.as_str()) {
            line.quantity = line.quantity.saturating_add(1);

            CartEvent::QuantityChanged {
                item_id: item_id.clone(),
                quantity: line.quantity,
            }
        } else {
            self.lines.push(CartLine {
                item_id: item_id.clone(),
                quantity: 1,
            });

            CartEvent::Added {
                item_id: item_id.clone(),
            }
        };

        debug!(item_id = %item_id, "added item to cart");

        self.notify(&event);
    }

    /// Remove an item's line. Does nothing if the item is not in the cart.
    pub fn remove_item(&mut self, item_id: &str) {
        let Some(position) = self.position(item_id) else {
            return;
        };

        let line = self.lines.remove(position);

        debug!(item_id = %line.item_id, "removed item from cart");

        self.notify(&CartEvent::Removed {
            item_id: line.item_id,
        });
    }

    /// Change an item's quantity by `delta`, never going below 1.
    ///
    /// Does nothing if the item is not in the cart. Use [`Cart::remove_item`] to drop a line.
    pub fn adjust_quantity(&mut self, item_id: &str, delta: i32) {
        let Some(line) = self.line_mut(item_id) else {
            return;
        };

        let adjusted = (i64::from(line.quantity) + i64::from(delta)).max(1);

        line.quantity = u32::try_from(adjusted).unwrap_or(u32::MAX);

        let event = CartEvent::QuantityChanged {
            item_id: line.item_id.clone(),
            quantity: line.quantity,
        };

        debug!(item_id, delta, quantity = line.quantity, "adjusted cart quantity");

        self.notify(&event);
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();

        debug!("cleared cart");

        self.notify(&CartEvent::Cleared);
    }

    /// Quantity of an item in the cart, or 0 if it has no line.
    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.position(item_id)
            .and_then(|position| self.lines.get(position))
            .map_or(0, CartLine::quantity)
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Catalog the cart is priced against.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Currency of the cart total.
    pub fn currency(&self) -> &'static Currency {
        self.catalog.currency()
    }

    /// Sum of `unit price × quantity` over every line, recomputed on each call.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if a line's item is missing from the catalog or the sum overflows.
    pub fn total(&self) -> Result<Money<'static, Currency>, CartError> {
        let line_totals = self
            .lines
            .iter()
            .map(|line| {
                let item = self.catalog.item(line.item_id.as_str())?;

                Ok(line_total(
                    line.item_id.as_str(),
                    item.unit_price(),
                    line.quantity,
                )?)
            })
            .collect::<Result<Vec<_>, CartError>>()?;

        Ok(total_price(line_totals, self.currency())?)
    }

    /// Freeze the current lines and total.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if a line's item is missing from the catalog or a total overflows.
    pub fn snapshot(&self) -> Result<CartSnapshot, CartError> {
        let lines = self
            .lines
            .iter()
            .map(|line| {
                let item = self.catalog.item(line.item_id.as_str())?;

                Ok(SnapshotLine {
                    item_id: line.item_id.clone(),
                    display_name: item.display_name().to_string(),
                    unit_price: *item.unit_price(),
                    quantity: line.quantity,
                    line_total: line_total(
                        line.item_id.as_str(),
                        item.unit_price(),
                        line.quantity,
                    )?,
                })
            })
            .collect::<Result<Vec<_>, CartError>>()?;

        let total = total_price(lines.iter().map(|line| line.line_total), self.currency())?;

        Ok(CartSnapshot { lines, total })
    }

    fn position(&self, item_id: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.item_id.as_str() == item_id)
    }

    fn line_mut(&mut self, item_id: &str) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.item_id.as_str() == item_id)
    }

    fn notify(&mut self, event: &CartEvent) {
        for observer in &mut self.observers {
            observer.on_cart_event(event);
        }
    }
}

impl fmt::Debug for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cart")
            .field("currency", &self.currency().iso_alpha_code)
            .field("lines", &self.lines)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::cart::observer::CartEventLog;

    use super::*;

    fn catalog() -> Result<Arc<Catalog>, CatalogError> {
        Ok(Arc::new(Catalog::new([
            CatalogItem::new("Goggles", "Goggles", "", Money::from_minor(1800, USD)),
            CatalogItem::new("Team Cap", "Team Cap", "", Money::from_minor(1200, USD)),
            CatalogItem::new("Caps", "Caps", "", Money::from_minor(1000, USD)),
        ])?))
    }

    #[test]
    fn add_item_appends_then_increments() -> TestResult {
        let catalog = catalog()?;
        let mut cart = Cart::new(Arc::clone(&catalog));

        cart.add_item(catalog.item("Goggles")?);
        cart.add_item(catalog.item("Team Cap")?);
        cart.add_item(catalog.item("Goggles")?);

        let lines: Vec<(&str, u32)> = cart
            .lines()
            .iter()
            .map(|line| (line.item_id().as_str(), line.quantity()))
            .collect();

        assert_eq!(lines, [("Goggles", 2), ("Team Cap", 1)]);
        assert_eq!(cart.item_count(), 3);

        Ok(())
    }

    #[test]
    fn remove_item_drops_line_and_ignores_absent() -> TestResult {
        let catalog = catalog()?;
        let mut cart = Cart::new(Arc::clone(&catalog));

        cart.add_item(catalog.item("Caps")?);
        cart.remove_item("Goggles");

        assert_eq!(cart.len(), 1);

        cart.remove_item("Caps");

        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of("Caps"), 0);

        Ok(())
    }

    #[test]
    fn adjust_quantity_floors_at_one() -> TestResult {
        let catalog = catalog()?;
        let mut cart = Cart::new(Arc::clone(&catalog));

        cart.add_item(catalog.item("Caps")?);
        cart.adjust_quantity("Caps", 4);

        assert_eq!(cart.quantity_of("Caps"), 5);

        cart.adjust_quantity("Caps", -10);

        assert_eq!(cart.quantity_of("Caps"), 1);
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn adjust_quantity_ignores_absent_items() -> TestResult {
        let mut cart = Cart::new(catalog()?);

        cart.adjust_quantity("Caps", 3);

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn total_of_goggles_and_cap() -> TestResult {
        let catalog = catalog()?;
        let mut cart = Cart::new(Arc::clone(&catalog));

        cart.add_item(catalog.item("Goggles")?);
        cart.add_item(catalog.item("Team Cap")?);
        cart.adjust_quantity("Goggles", 1);

        assert_eq!(cart.total()?, Money::from_minor(4800, USD));

        Ok(())
    }

    #[test]
    fn total_of_empty_cart_is_zero() -> TestResult {
        let cart = Cart::new(catalog()?);

        assert_eq!(cart.total()?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn add_item_ignores_items_from_another_catalog() -> TestResult {
        let catalog = catalog()?;
        let mut cart = Cart::new(Arc::clone(&catalog));
        let log = CartEventLog::new();

        cart.subscribe(log.clone());
        cart.add_item(catalog.item("Caps")?);

        let snorkel = CatalogItem::new("Snorkel", "Snorkel", "", Money::from_minor(900, USD));
        let cheap_caps = CatalogItem::new("Caps", "Caps", "", Money::from_minor(1, USD));

        cart.add_item(&snorkel);
        cart.add_item(&cheap_caps);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of("Caps"), 1);
        assert_eq!(cart.quantity_of("Snorkel"), 0);
        assert_eq!(cart.total()?, Money::from_minor(1000, USD));
        assert_eq!(log.events().len(), 1);

        Ok(())
    }

    #[test]
    fn observers_see_every_mutation() -> TestResult {
        let catalog = catalog()?;
        let mut cart = Cart::new(Arc::clone(&catalog));
        let log = CartEventLog::new();

        cart.subscribe(log.clone());

        cart.add_item(catalog.item("Goggles")?);
        cart.add_item(catalog.item("Goggles")?);
        cart.adjust_quantity("Goggles", -5);
        cart.remove_item("Goggles");
        cart.clear();

        let goggles = ItemId::new("Goggles");

        assert_eq!(
            log.events(),
            [
                CartEvent::Added {
                    item_id: goggles.clone()
                },
                CartEvent::QuantityChanged {
                    item_id: goggles.clone(),
                    quantity: 2
                },
                CartEvent::QuantityChanged {
                    item_id: goggles.clone(),
                    quantity: 1
                },
                CartEvent::Removed { item_id: goggles },
                CartEvent::Cleared,
            ]
        );

        Ok(())
    }

    #[test]
    fn snapshot_prices_each_line() -> TestResult {
        let catalog = catalog()?;
        let mut cart = Cart::new(Arc::clone(&catalog));

        cart.add_item(catalog.item("Team Cap")?);
        cart.adjust_quantity("Team Cap", 2);
        cart.add_item(catalog.item("Caps")?);

        let snapshot = cart.snapshot()?;

        assert_eq!(snapshot.lines().len(), 2);
        assert_eq!(snapshot.item_count(), 4);
        assert_eq!(
            snapshot.lines().first().map(SnapshotLine::line_total),
            Some(&Money::from_minor(3600, USD))
        );
        assert_eq!(snapshot.total(), &Money::from_minor(4600, USD));
        assert_eq!(snapshot.total(), &cart.total()?);

        Ok(())
    }

    #[test]
    fn snapshot_write_to_renders_lines_and_total() -> TestResult {
        let catalog = catalog()?;
        let mut cart = Cart::new(Arc::clone(&catalog));

        cart.add_item(catalog.item("Goggles")?);
        cart.add_item(catalog.item("Goggles")?);

        let mut out = Vec::new();

        cart.snapshot()?.write_to(&mut out)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Goggles"), "missing item name: {rendered}");
        assert!(rendered.contains("$36.00"), "missing line total: {rendered}");
        assert!(rendered.contains("Total: $36.00"), "missing total: {rendered}");

        Ok(())
    }
}
