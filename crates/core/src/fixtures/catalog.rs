//! Catalog Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{
    catalog::{Catalog, CatalogItem},
    fixtures::FixtureError,
};

/// Wrapper for catalog items in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Items in display order
    pub items: Vec<CatalogItemFixture>,
}

/// Catalog Item Fixture
#[derive(Debug, Deserialize)]
pub struct CatalogItemFixture {
    /// Unique item id
    pub id: String,

    /// Display name
    pub name: String,

    /// Image URL
    #[serde(default)]
    pub image: String,

    /// Item price (e.g., "$18" or "18.00 USD")
    pub price: String,
}

impl TryFrom<CatalogItemFixture> for CatalogItem {
    type Error = FixtureError;

    fn try_from(fixture: CatalogItemFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(CatalogItem::new(
            fixture.id.as_str(),
            fixture.name,
            fixture.image,
            Money::from_minor(minor_units, currency),
        ))
    }
}

impl TryFrom<CatalogFixture> for Catalog {
    type Error = FixtureError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let items = fixture
            .items
            .into_iter()
            .map(CatalogItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Catalog::new(items)?)
    }
}

/// Parse a price string into minor units and currency.
///
/// Accepts a leading currency symbol (`"$18"`, `"£2.99"`) or the `"AMOUNT CODE"` form
/// (`"18.00 USD"`).
///
/// # Errors
///
/// Returns an error if the amount is not a non-negative decimal, or if the currency symbol or
/// code is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let trimmed = s.trim();

    let (amount, currency) = match trimmed.split_once(char::is_whitespace) {
        Some((amount, code)) => (amount, currency_from_code(code.trim())?),
        None => {
            let mut chars = trimmed.chars();

            let symbol = chars
                .next()
                .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

            (chars.as_str(), currency_from_symbol(symbol, s)?)
        }
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

fn currency_from_code(code: &str) -> Result<&'static Currency, FixtureError> {
    match code {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

fn currency_from_symbol(symbol: char, price: &str) -> Result<&'static Currency, FixtureError> {
    match symbol {
        '$' => Ok(USD),
        '£' => Ok(GBP),
        '€' => Ok(EUR),
        digit if digit.is_ascii_digit() => Err(FixtureError::InvalidPrice(format!(
            "Missing currency in price: {price}"
        ))),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}
