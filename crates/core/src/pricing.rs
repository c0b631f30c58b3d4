//! Pricing

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors that can occur while pricing cart lines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A line total does not fit in minor units (item id).
    #[error("line total for {0} overflows")]
    LineOverflow(String),

    /// The running total does not fit in minor units.
    #[error("cart total overflows")]
    TotalOverflow,
}

/// Calculates the price of `quantity` units of an item.
///
/// # Errors
///
/// Returns [`PricingError::LineOverflow`] if the product does not fit in minor units.
pub fn line_total<'a>(
    item_id: &str,
    unit_price: &Money<'a, Currency>,
    quantity: u32,
) -> Result<Money<'a, Currency>, PricingError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or_else(|| PricingError::LineOverflow(item_id.to_string()))?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Sums line totals into a single amount in `currency`.
///
/// An empty iterator yields zero.
///
/// # Errors
///
/// Returns [`PricingError::TotalOverflow`] if the sum does not fit in minor units.
pub fn total_price<'a>(
    line_totals: impl IntoIterator<Item = Money<'a, Currency>>,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, PricingError> {
    let minor = line_totals
        .into_iter()
        .try_fold(0_i64, |acc, line| acc.checked_add(line.to_minor_units()))
        .ok_or(PricingError::TotalOverflow)?;

    Ok(Money::from_minor(minor, currency))
}

/// Format a money amount for display, e.g. `$48.00`.
pub fn format_price(amount: &Money<'_, Currency>) -> String {
    format_minor(amount.to_minor_units(), amount.currency().iso_alpha_code)
}

/// Format a minor-unit amount into a currency string.
pub fn format_minor(minor_units: i64, currency_code: &str) -> String {
    let abs_minor = minor_units.unsigned_abs();
    let major_units = abs_minor / 100;
    let fractional = abs_minor % 100;
    let sign = if minor_units < 0 { "-" } else { "" };
    let symbol = match currency_code {
        "GBP" => "£",
        "USD" => "$",
        "EUR" => "€",
        _ => "",
    };

    if symbol.is_empty() {
        format!("{sign}{major_units}.{fractional:02} {currency_code}")
    } else {
        format!("{sign}{symbol}{major_units}.{fractional:02}")
    }
}
