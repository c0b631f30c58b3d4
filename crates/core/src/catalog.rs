//! Catalog

use std::{borrow::Borrow, fmt};

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::fixtures::{FixtureError, catalog::CatalogFixture};

const TEAM_STORE_FIXTURE_YAML: &str = include_str!("../../../fixtures/catalog/team-store.yml");

/// Errors related to catalog construction and lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A catalog needs at least one item to know its currency.
    #[error("catalog has no items")]
    Empty,

    /// Two items share the same id.
    #[error("duplicate catalog item: {0}")]
    DuplicateItem(String),

    /// An item is priced in a different currency to the rest of the catalog.
    #[error("item {item} has currency {found}, but catalog has currency {expected}")]
    CurrencyMismatch {
        /// Offending item id
        item: String,
        /// Catalog currency code
        expected: &'static str,
        /// Item currency code
        found: &'static str,
    },

    /// No item with this id exists.
    #[error("unknown catalog item: {0}")]
    UnknownItem(String),
}

/// Unique identity of a catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new item id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A purchasable item.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    id: ItemId,
    display_name: String,
    image_ref: String,
    unit_price: Money<'static, Currency>,
}

impl CatalogItem {
    /// Creates a new catalog item.
    pub fn new(
        id: impl Into<ItemId>,
        display_name: impl Into<String>,
        image_ref: impl Into<String>,
        unit_price: Money<'static, Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            image_ref: image_ref.into(),
            unit_price,
        }
    }

    /// Item id
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Name shown to shoppers
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Image URL
    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    /// Price of a single unit
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.unit_price
    }
}

/// Read-only list of purchasable items, in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: FxHashMap<ItemId, usize>,
    currency: &'static Currency,
}

impl Catalog {
    /// Creates a catalog from a list of items.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Empty`]: no items were given.
    /// - [`CatalogError::DuplicateItem`]: two items share an id.
    /// - [`CatalogError::CurrencyMismatch`]: items are priced in more than one currency.
    pub fn new(items: impl Into<Vec<CatalogItem>>) -> Result<Self, CatalogError> {
        let items = items.into();

        let currency = items
            .first()
            .map(|item| item.unit_price.currency())
            .ok_or(CatalogError::Empty)?;

        let mut index = FxHashMap::default();

        for (position, item) in items.iter().enumerate() {
            let item_currency = item.unit_price.currency();

            if item_currency != currency {
                return Err(CatalogError::CurrencyMismatch {
                    item: item.id.to_string(),
                    expected: currency.iso_alpha_code,
                    found: item_currency.iso_alpha_code,
                });
            }

            if index.insert(item.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateItem(item.id.to_string()));
            }
        }

        Ok(Self {
            items,
            index,
            currency,
        })
    }

    /// The team store merchandise list.
    ///
    /// # Errors
    ///
    /// Returns a `FixtureError` if the bundled fixture fails to parse.
    pub fn team_store() -> Result<Self, FixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(TEAM_STORE_FIXTURE_YAML)?;

        fixture.try_into()
    }

    /// Looks up an item by id.
    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.index
            .get(id)
            .and_then(|&position| self.items.get(position))
    }

    /// Looks up an item by id, failing if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownItem`] if no item has this id.
    pub fn item(&self, id: &str) -> Result<&CatalogItem, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::UnknownItem(id.to_string()))
    }

    /// Iterates over items in display order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items. Always false for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency every item is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
