//! Payment details

use std::fmt;

use thiserror::Error;
use zeroize::Zeroize;

use crate::validation::{is_blank, is_valid_email};

/// Inline form error. The checkout stays on the current form until it is fixed.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Card number left empty
    #[error("Please enter the card number.")]
    CardNumberRequired,

    /// Name on card left empty
    #[error("Please enter the name on the card.")]
    NameOnCardRequired,

    /// Expiry left empty
    #[error("Please enter the card expiry date (MM/YY).")]
    ExpiryRequired,

    /// CVC left empty
    #[error("Please enter the card CVC.")]
    CvcRequired,

    /// PayPal email missing or malformed
    #[error("Please enter a valid PayPal email address.")]
    InvalidPayPalEmail,
}

/// How the shopper wants to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    /// Credit or debit card
    Card,

    /// PayPal account
    PayPal,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Card => f.write_str("Credit / Debit Card"),
            PaymentMethod::PayPal => f.write_str("PayPal"),
        }
    }
}

/// Card form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    /// Card number, up to 19 characters
    Number,

    /// Name as printed on the card
    NameOnCard,

    /// Expiry as `MM/YY`
    Expiry,

    /// Security code, up to 4 characters
    Cvc,
}

impl CardField {
    /// Longest value the input accepts, if limited.
    pub fn max_len(self) -> Option<usize> {
        match self {
            CardField::Number => Some(19),
            CardField::NameOnCard => None,
            CardField::Expiry => Some(5),
            CardField::Cvc => Some(4),
        }
    }
}

/// Card form values. Wiped from memory when replaced or dropped.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CardDetails {
    number: String,
    name_on_card: String,
    expiry: String,
    cvc: String,
}

impl CardDetails {
    /// Current value of a field.
    pub fn get(&self, field: CardField) -> &str {
        match field {
            CardField::Number => &self.number,
            CardField::NameOnCard => &self.name_on_card,
            CardField::Expiry => &self.expiry,
            CardField::Cvc => &self.cvc,
        }
    }

    /// Replace a field's value, truncated to the field's maximum length.
    pub fn set(&mut self, field: CardField, value: &str) {
        let slot = match field {
            CardField::Number => &mut self.number,
            CardField::NameOnCard => &mut self.name_on_card,
            CardField::Expiry => &mut self.expiry,
            CardField::Cvc => &mut self.cvc,
        };

        slot.zeroize();

        match field.max_len() {
            Some(max_len) => slot.extend(value.chars().take(max_len)),
            None => slot.push_str(value),
        }
    }

    /// Card number with all but the last four characters hidden.
    pub fn masked_number(&self) -> String {
        let visible: String = self
            .number
            .chars()
            .rev()
            .filter(|c| !c.is_whitespace())
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();

        format!("•••• {visible}")
    }

    /// Checks every required field is filled in, reporting the first empty one.
    ///
    /// # Errors
    ///
    /// Returns the `ValidationError` for the first empty field, in form order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.number) {
            return Err(ValidationError::CardNumberRequired);
        }

        if is_blank(&self.name_on_card) {
            return Err(ValidationError::NameOnCardRequired);
        }

        if is_blank(&self.expiry) {
            return Err(ValidationError::ExpiryRequired);
        }

        if is_blank(&self.cvc) {
            return Err(ValidationError::CvcRequired);
        }

        Ok(())
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CardDetails(**redacted**)")
    }
}

impl Drop for CardDetails {
    fn drop(&mut self) {
        self.number.zeroize();
        self.name_on_card.zeroize();
        self.expiry.zeroize();
        self.cvc.zeroize();
    }
}

/// PayPal form values. Wiped from memory when replaced or dropped.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PayPalDetails {
    email: String,
}

impl PayPalDetails {
    /// PayPal account email
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Replace the PayPal account email.
    pub fn set_email(&mut self, email: &str) {
        self.email.zeroize();
        self.email.push_str(email);
    }

    /// Checks the email looks like an address.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPayPalEmail`] if it does not.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_valid_email(&self.email) {
            Ok(())
        } else {
            Err(ValidationError::InvalidPayPalEmail)
        }
    }
}

impl fmt::Debug for PayPalDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PayPalDetails(**redacted**)")
    }
}

impl Drop for PayPalDetails {
    fn drop(&mut self) {
        self.email.zeroize();
    }
}

/// Contact form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    /// Shopper's name
    Name,

    /// Shopper's email
    Email,

    /// Shipping address
    Address,
}

/// Shopper contact and shipping details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    name: String,
    email: String,
    address: String,
}

impl ContactInfo {
    /// Current value of a field.
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Address => &self.address,
        }
    }

    /// Replace a field's value.
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Address => &mut self.address,
        };

        *slot = value.into();
    }
}

/// Method choice and form values handed to the payment provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentHandoff {
    /// Pay by card
    Card(CardDetails),

    /// Pay through PayPal
    PayPal(PayPalDetails),
}

impl PaymentHandoff {
    /// Method this handoff is for.
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentHandoff::Card(_) => PaymentMethod::Card,
            PaymentHandoff::PayPal(_) => PaymentMethod::PayPal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_card() -> CardDetails {
        let mut card = CardDetails::default();

        card.set(CardField::Number, "4242 4242 4242 4242");
        card.set(CardField::NameOnCard, "Jordan Lee");
        card.set(CardField::Expiry, "09/27");
        card.set(CardField::Cvc, "123");

        card
    }

    #[test]
    fn card_validates_fields_in_form_order() {
        let mut card = CardDetails::default();

        assert_eq!(card.validate(), Err(ValidationError::CardNumberRequired));

        card.set(CardField::Number, "4242");

        assert_eq!(card.validate(), Err(ValidationError::NameOnCardRequired));

        card.set(CardField::NameOnCard, "Jordan Lee");
        card.set(CardField::Cvc, "123");

        assert_eq!(card.validate(), Err(ValidationError::ExpiryRequired));

        card.set(CardField::Expiry, "09/27");

        assert_eq!(card.validate(), Ok(()));
    }

    #[test]
    fn card_treats_whitespace_as_empty() {
        let mut card = filled_card();

        card.set(CardField::NameOnCard, "   ");

        assert_eq!(card.validate(), Err(ValidationError::NameOnCardRequired));
    }

    #[test]
    fn card_set_truncates_to_input_length() {
        let mut card = CardDetails::default();

        card.set(CardField::Expiry, "09/2027");
        card.set(CardField::Cvc, "123456");

        assert_eq!(card.get(CardField::Expiry), "09/20");
        assert_eq!(card.get(CardField::Cvc), "1234");
    }

    #[test]
    fn card_masks_number_and_redacts_debug() {
        let card = filled_card();

        assert_eq!(card.masked_number(), "•••• 4242");
        assert_eq!(format!("{card:?}"), "CardDetails(**redacted**)");
    }

    #[test]
    fn paypal_requires_valid_email() {
        let mut paypal = PayPalDetails::default();

        paypal.set_email("not-an-email");

        assert_eq!(paypal.validate(), Err(ValidationError::InvalidPayPalEmail));

        paypal.set_email("parent@example.com");

        assert_eq!(paypal.validate(), Ok(()));
        assert_eq!(paypal.email(), "parent@example.com");
    }

    #[test]
    fn contact_fields_round_trip() {
        let mut contact = ContactInfo::default();

        contact.set(ContactField::Address, "1 Pool Lane");

        assert_eq!(contact.get(ContactField::Address), "1 Pool Lane");
        assert_eq!(contact.get(ContactField::Name), "");
    }

    #[test]
    fn handoff_reports_method() {
        assert_eq!(
            PaymentHandoff::Card(filled_card()).method(),
            PaymentMethod::Card
        );
        assert_eq!(
            PaymentHandoff::PayPal(PayPalDetails::default()).method(),
            PaymentMethod::PayPal
        );
        assert_eq!(PaymentMethod::PayPal.to_string(), "PayPal");
    }
}
