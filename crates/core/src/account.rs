//! Parent account
//!
//! Swimmers on a parent account and the monthly training fees they still owe.

use rusty_money::{
    Money,
    iso::{Currency, USD},
};
use serde::Deserialize;
use thiserror::Error;

use crate::pricing::{PricingError, format_price, line_total, total_price};

/// Monthly training fee, in cents.
pub const MONTHLY_FEE_MINOR: i64 = 18_500;

/// Errors loading or pricing an account.
#[derive(Debug, Error)]
pub enum AccountError {
    /// YAML parsing error
    #[error("Failed to parse account: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Balance arithmetic overflowed
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Whether a month's fee has been settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum PaymentStatus {
    /// Fee outstanding
    Due,

    /// Fee settled
    Paid,
}

/// One month in a swimmer's payment log.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentLogEntry {
    /// Billing month label, e.g. `"September 2025"`
    pub month: String,

    /// Payment status for the month
    pub status: PaymentStatus,
}

/// A swimmer registered on a parent account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Swimmer {
    /// Swimmer's name
    pub name: String,

    /// Swimmer's age
    pub age: u8,

    /// Training group, if assigned
    #[serde(default)]
    pub training_group: Option<String>,

    /// Monthly payment history
    #[serde(default)]
    pub payment_log: Vec<PaymentLogEntry>,
}

impl Swimmer {
    /// Months still owed.
    pub fn due_months(&self) -> usize {
        self.payment_log
            .iter()
            .filter(|entry| entry.status == PaymentStatus::Due)
            .count()
    }

    /// Fees this swimmer still owes.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::LineOverflow`] if the amount does not fit in minor units.
    pub fn balance(&self) -> Result<Money<'static, Currency>, PricingError> {
        let due_months = u32::try_from(self.due_months())
            .map_err(|_err| PricingError::LineOverflow(self.name.clone()))?;

        line_total(&self.name, &monthly_fee(), due_months)
    }
}

/// A parent's swimmers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Account {
    /// Swimmers in registration order
    #[serde(default)]
    pub swimmers: Vec<Swimmer>,
}

impl Account {
    /// Parse an account from YAML with a `swimmers` list.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Yaml`] if the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self, AccountError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Sum of every swimmer's outstanding fees.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a swimmer's balance or the sum overflows.
    pub fn balance(&self) -> Result<Money<'static, Currency>, PricingError> {
        let balances = self
            .swimmers
            .iter()
            .map(Swimmer::balance)
            .collect::<Result<Vec<_>, _>>()?;

        total_price(balances, USD)
    }

    /// Balance as shown on the parent home page: owed amounts are negative.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the balance overflows.
    pub fn balance_label(&self) -> Result<String, PricingError> {
        let balance = self.balance()?;

        if balance.to_minor_units() > 0 {
            Ok(format!("-{}", format_price(&balance)))
        } else {
            Ok(format!("{} (All Paid)", format_price(&balance)))
        }
    }
}

fn monthly_fee() -> Money<'static, Currency> {
    Money::from_minor(MONTHLY_FEE_MINOR, USD)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const ACCOUNT_YAML: &str = r"
swimmers:
  - name: Avery Park
    age: 9
    training_group: Bronze
    payment_log:
      - { month: July 2025, status: Paid }
      - { month: August 2025, status: Due }
      - { month: September 2025, status: Due }
  - name: Sam Park
    age: 12
    payment_log:
      - { month: September 2025, status: Due }
  - name: Riley Park
    age: 6
";

    #[test]
    fn balance_sums_due_months_across_swimmers() -> TestResult {
        let account = Account::from_yaml(ACCOUNT_YAML)?;

        assert_eq!(account.swimmers.len(), 3);
        assert_eq!(
            account.swimmers.first().map(Swimmer::due_months),
            Some(2)
        );
        assert_eq!(account.balance()?, Money::from_minor(55_500, USD));
        assert_eq!(account.balance_label()?, "-$555.00");

        Ok(())
    }

    #[test]
    fn paid_up_account_has_zero_balance() -> TestResult {
        let account = Account::from_yaml(
            "swimmers:\n  - name: Avery Park\n    age: 9\n    payment_log:\n      - { month: July 2025, status: Paid }\n",
        )?;

        assert_eq!(account.balance()?, Money::from_minor(0, USD));
        assert_eq!(account.balance_label()?, "$0.00 (All Paid)");

        Ok(())
    }

    #[test]
    fn empty_account_owes_nothing() -> TestResult {
        assert_eq!(Account::default().balance()?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = Account::from_yaml(
            "swimmers:\n  - name: Avery Park\n    age: 9\n    payment_log:\n      - { month: July 2025, status: Late }\n",
        );

        assert!(matches!(result, Err(AccountError::Yaml(_))));
    }
}
