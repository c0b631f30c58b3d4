//! Checkout
//!
//! The checkout modal as an explicit state machine:
//!
//! ```text
//! Closed ──open──▶ MethodSelection ──choose card──▶ CardForm ──submit──▶ Submitted
//!                        │  ▲        ──choose paypal─▶ PayPalForm ─submit─▶    │
//!                        │  └──────────── cancel ─────────┘                    │
//!                        └──────── close (from any open state) ──▶ Closed ◀─auto-close
//! ```
//!
//! Only one form can be active at a time and nothing is persisted. Submitting clears the cart and
//! issues an [`AutoCloseTicket`]; the view schedules [`CheckoutSession::auto_close`] after
//! [`AutoClose::delay`], and closing earlier makes that ticket stale.

use std::{fmt, time::Duration};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cart::{Cart, CartError, snapshot::CartSnapshot},
    config::{DEFAULT_CONFIRMATION_DELAY_MS, StoreConfig},
    pricing::format_price,
};

pub mod confirmation;
pub mod payment;

use confirmation::Confirmation;
use payment::{
    CardDetails, CardField, ContactField, ContactInfo, PayPalDetails, PaymentHandoff,
    PaymentMethod, ValidationError,
};

/// Where the checkout modal is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CheckoutStatus {
    /// Modal hidden
    #[default]
    Closed,

    /// Choosing between card and PayPal
    MethodSelection,

    /// Entering card details
    CardForm,

    /// Entering a PayPal email
    PayPalForm,

    /// Order placed, confirmation visible until the auto-close fires
    Submitted,
}

impl CheckoutStatus {
    /// Whether the modal is visible.
    pub fn is_open(self) -> bool {
        self != CheckoutStatus::Closed
    }

    /// Modal heading for this state.
    pub fn title(self) -> &'static str {
        match self {
            CheckoutStatus::Closed => "",
            CheckoutStatus::MethodSelection => "Choose Payment Method",
            CheckoutStatus::CardForm => "Credit / Debit Card Payment",
            CheckoutStatus::PayPalForm => "PayPal Payment",
            CheckoutStatus::Submitted => "Order Placed",
        }
    }
}

/// User or timer action fed to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutTrigger {
    /// Open the modal from the cart
    Open,

    /// Pick a payment method
    ChooseMethod(PaymentMethod),

    /// Back out of the current step
    Cancel,

    /// Dismiss the modal
    Close,

    /// Submit the active payment form
    Submit,
}

impl fmt::Display for CheckoutTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutTrigger::Open => f.write_str("open checkout"),
            CheckoutTrigger::ChooseMethod(method) => write!(f, "choose {method}"),
            CheckoutTrigger::Cancel => f.write_str("cancel"),
            CheckoutTrigger::Close => f.write_str("close"),
            CheckoutTrigger::Submit => f.write_str("submit"),
        }
    }
}

/// Reasons a checkout action was not applied. The state is unchanged in every case.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout needs a cart total above zero.
    #[error("cannot open checkout with an empty cart")]
    EmptyCart,

    /// The trigger is not offered in the current state.
    #[error("cannot {trigger} while checkout is {status:?}")]
    InvalidTransition {
        /// State the session was in
        status: CheckoutStatus,
        /// Rejected trigger
        trigger: CheckoutTrigger,
    },

    /// The active form has an inline error.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The cart could not be priced.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Identifies one pending post-submission close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AutoCloseTicket(u64);

/// A close the view should schedule after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoClose {
    /// Ticket to pass back to [`CheckoutSession::auto_close`]
    pub ticket: AutoCloseTicket,

    /// How long to wait before passing it back
    pub delay: Duration,
}

/// Transient checkout state for one shopper.
#[derive(Debug)]
pub struct CheckoutSession {
    status: CheckoutStatus,
    method: Option<PaymentMethod>,
    contact: ContactInfo,
    card: CardDetails,
    paypal: PayPalDetails,
    snapshot: Option<CartSnapshot>,
    confirmation: Option<Confirmation>,
    error: Option<ValidationError>,
    pending_close: Option<AutoCloseTicket>,
    next_ticket: u64,
    confirmation_delay: Duration,
}

impl CheckoutSession {
    /// Create a closed session whose confirmation stays up for `confirmation_delay`.
    pub fn new(confirmation_delay: Duration) -> Self {
        Self {
            status: CheckoutStatus::Closed,
            method: None,
            contact: ContactInfo::default(),
            card: CardDetails::default(),
            paypal: PayPalDetails::default(),
            snapshot: None,
            confirmation: None,
            error: None,
            pending_close: None,
            next_ticket: 0,
            confirmation_delay,
        }
    }

    /// Create a closed session using the configured confirmation delay.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.confirmation_delay())
    }

    /// Current state
    pub fn status(&self) -> CheckoutStatus {
        self.status
    }

    /// Method chosen, while a payment form is active or the order is confirmed
    pub fn method(&self) -> Option<PaymentMethod> {
        self.method
    }

    /// Contact details entered so far
    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    /// Card form values
    pub fn card(&self) -> &CardDetails {
        &self.card
    }

    /// PayPal form values
    pub fn paypal(&self) -> &PayPalDetails {
        &self.paypal
    }

    /// Cart as it was when checkout opened
    pub fn snapshot(&self) -> Option<&CartSnapshot> {
        self.snapshot
            .as_ref()
            .or_else(|| self.confirmation.as_ref().map(Confirmation::snapshot))
    }

    /// Confirmation, while `Submitted`
    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    /// Inline error for the active form
    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    /// Ticket of the auto-close that would currently be honoured
    pub fn pending_auto_close(&self) -> Option<AutoCloseTicket> {
        self.pending_close
    }

    /// How long the confirmation stays up
    pub fn confirmation_delay(&self) -> Duration {
        self.confirmation_delay
    }

    /// Whether `open` would succeed for this cart.
    pub fn can_open(&self, cart: &Cart) -> bool {
        self.status == CheckoutStatus::Closed
            && cart.total().is_ok_and(|total| total.to_minor_units() > 0)
    }

    /// Open the modal on method selection, capturing the cart's lines and total.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidTransition`]: the modal is already open.
    /// - [`CheckoutError::EmptyCart`]: the cart total is zero.
    /// - [`CheckoutError::Cart`]: the cart could not be priced.
    pub fn open(&mut self, cart: &Cart) -> Result<(), CheckoutError> {
        self.expect_status(CheckoutTrigger::Open, &[CheckoutStatus::Closed])?;

        let snapshot = cart.snapshot()?;

        if snapshot.total().to_minor_units() <= 0 {
            debug!("checkout not opened for empty cart");

            return Err(CheckoutError::EmptyCart);
        }

        info!(
            lines = snapshot.lines().len(),
            total = %format_price(snapshot.total()),
            "checkout opened"
        );

        self.snapshot = Some(snapshot);
        self.status = CheckoutStatus::MethodSelection;

        Ok(())
    }

    /// Move from method selection to the chosen method's form.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] outside method selection.
    pub fn choose_method(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        self.expect_status(
            CheckoutTrigger::ChooseMethod(method),
            &[CheckoutStatus::MethodSelection],
        )?;

        self.method = Some(method);
        self.error = None;
        self.status = match method {
            PaymentMethod::Card => CheckoutStatus::CardForm,
            PaymentMethod::PayPal => CheckoutStatus::PayPalForm,
        };

        debug!(%method, "payment method chosen");

        Ok(())
    }

    /// Back out one step: from a payment form to method selection, or from method selection to
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] when closed or submitted.
    pub fn cancel(&mut self) -> Result<(), CheckoutError> {
        match self.status {
            CheckoutStatus::CardForm | CheckoutStatus::PayPalForm => {
                self.method = None;
                self.error = None;
                self.status = CheckoutStatus::MethodSelection;

                debug!("returned to payment method selection");

                Ok(())
            }
            CheckoutStatus::MethodSelection => {
                self.reset();

                info!("checkout cancelled");

                Ok(())
            }
            status => Err(self.rejected(status, CheckoutTrigger::Cancel)),
        }
    }

    /// Dismiss the modal and discard everything entered.
    ///
    /// Closing a submitted checkout before its auto-close makes that ticket stale.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] when already closed.
    pub fn close(&mut self) -> Result<(), CheckoutError> {
        self.expect_status(
            CheckoutTrigger::Close,
            &[
                CheckoutStatus::MethodSelection,
                CheckoutStatus::CardForm,
                CheckoutStatus::PayPalForm,
                CheckoutStatus::Submitted,
            ],
        )?;

        self.reset();

        info!("checkout closed");

        Ok(())
    }

    /// Set a contact field.
    pub fn set_contact(&mut self, field: ContactField, value: impl Into<String>) {
        self.contact.set(field, value);
    }

    /// Set a card form field.
    pub fn set_card(&mut self, field: CardField, value: &str) {
        self.card.set(field, value);
    }

    /// Set the PayPal email.
    pub fn set_paypal_email(&mut self, email: &str) {
        self.paypal.set_email(email);
    }

    /// Submit the active payment form.
    ///
    /// On success the cart is cleared, a [`Confirmation`] becomes available and the returned
    /// [`AutoClose`] tells the caller when to call [`CheckoutSession::auto_close`]. On a
    /// validation failure the form stays active and [`CheckoutSession::error`] is set.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Validation`]: a required field is empty or the email is malformed.
    /// - [`CheckoutError::InvalidTransition`]: no payment form is active.
    pub fn submit(&mut self, cart: &mut Cart) -> Result<AutoClose, CheckoutError> {
        let validated = match self.status {
            CheckoutStatus::CardForm => self.card.validate(),
            CheckoutStatus::PayPalForm => self.paypal.validate(),
            status => return Err(self.rejected(status, CheckoutTrigger::Submit)),
        };

        if let Err(error) = validated {
            debug!(%error, "checkout form invalid");

            self.error = Some(error);

            return Err(error.into());
        }

        let snapshot = match self.snapshot.take() {
            Some(snapshot) => snapshot,
            None => cart.snapshot()?,
        };

        let handoff = if self.status == CheckoutStatus::CardForm {
            PaymentHandoff::Card(std::mem::take(&mut self.card))
        } else {
            PaymentHandoff::PayPal(std::mem::take(&mut self.paypal))
        };

        info!(
            method = %handoff.method(),
            total = %format_price(snapshot.total()),
            "checkout submitted"
        );

        self.confirmation = Some(Confirmation::new(snapshot, self.contact.clone(), handoff));
        self.error = None;
        self.status = CheckoutStatus::Submitted;

        cart.clear();

        let ticket = AutoCloseTicket(self.next_ticket);

        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.pending_close = Some(ticket);

        Ok(AutoClose {
            ticket,
            delay: self.confirmation_delay,
        })
    }

    /// Close a submitted checkout once its confirmation delay has elapsed.
    ///
    /// Returns `false`, leaving the session untouched, when the ticket is stale because the
    /// checkout was closed (and possibly reopened) in the meantime.
    pub fn auto_close(&mut self, ticket: AutoCloseTicket) -> bool {
        if self.status != CheckoutStatus::Submitted || self.pending_close != Some(ticket) {
            debug!(?ticket, "ignoring stale auto-close");

            return false;
        }

        self.reset();

        info!("checkout auto-closed after confirmation");

        true
    }

    fn reset(&mut self) {
        self.status = CheckoutStatus::Closed;
        self.method = None;
        self.contact = ContactInfo::default();
        self.card = CardDetails::default();
        self.paypal = PayPalDetails::default();
        self.snapshot = None;
        self.confirmation = None;
        self.error = None;
        self.pending_close = None;
    }

    fn expect_status(
        &self,
        trigger: CheckoutTrigger,
        allowed: &[CheckoutStatus],
    ) -> Result<(), CheckoutError> {
        if allowed.contains(&self.status) {
            Ok(())
        } else {
            Err(self.rejected(self.status, trigger))
        }
    }

    fn rejected(&self, status: CheckoutStatus, trigger: CheckoutTrigger) -> CheckoutError {
        warn!(?status, %trigger, method = ?self.method, "checkout transition rejected");

        CheckoutError::InvalidTransition { status, trigger }
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_CONFIRMATION_DELAY_MS))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::catalog::{Catalog, CatalogItem};

    use super::*;

    fn cart_with_goggles() -> Result<Cart, crate::catalog::CatalogError> {
        let catalog = Arc::new(Catalog::new([CatalogItem::new(
            "Goggles",
            "Goggles",
            "",
            Money::from_minor(1800, USD),
        )])?);

        let mut cart = Cart::new(Arc::clone(&catalog));

        cart.add_item(catalog.item("Goggles")?);

        Ok(cart)
    }

    fn fill_card(session: &mut CheckoutSession) {
        session.set_card(CardField::Number, "4242424242424242");
        session.set_card(CardField::NameOnCard, "Jordan Lee");
        session.set_card(CardField::Expiry, "09/27");
        session.set_card(CardField::Cvc, "123");
    }

    #[test]
    fn open_moves_to_method_selection_with_snapshot() -> TestResult {
        let cart = cart_with_goggles()?;
        let mut session = CheckoutSession::default();

        assert!(session.can_open(&cart));

        session.open(&cart)?;

        assert_eq!(session.status(), CheckoutStatus::MethodSelection);
        assert_eq!(
            session.snapshot().map(CartSnapshot::total),
            Some(&Money::from_minor(1800, USD))
        );

        Ok(())
    }

    #[test]
    fn open_twice_is_rejected() -> TestResult {
        let cart = cart_with_goggles()?;
        let mut session = CheckoutSession::default();

        session.open(&cart)?;

        assert_eq!(
            session.open(&cart),
            Err(CheckoutError::InvalidTransition {
                status: CheckoutStatus::MethodSelection,
                trigger: CheckoutTrigger::Open,
            })
        );

        Ok(())
    }

    #[test]
    fn choose_and_cancel_return_to_selection() -> TestResult {
        let cart = cart_with_goggles()?;
        let mut session = CheckoutSession::default();

        session.open(&cart)?;
        session.choose_method(PaymentMethod::PayPal)?;

        assert_eq!(session.status(), CheckoutStatus::PayPalForm);
        assert_eq!(session.method(), Some(PaymentMethod::PayPal));

        session.cancel()?;

        assert_eq!(session.status(), CheckoutStatus::MethodSelection);
        assert_eq!(session.method(), None);

        session.cancel()?;

        assert_eq!(session.status(), CheckoutStatus::Closed);
        assert!(session.snapshot().is_none());

        Ok(())
    }

    #[test]
    fn cancel_card_form_returns_to_selection() -> TestResult {
        let cart = cart_with_goggles()?;
        let mut session = CheckoutSession::default();

        session.open(&cart)?;
        session.choose_method(PaymentMethod::Card)?;
        fill_card(&mut session);

        assert_eq!(session.method(), Some(PaymentMethod::Card));

        session.cancel()?;

        assert_eq!(session.status(), CheckoutStatus::MethodSelection);
        assert_eq!(session.method(), None);
        assert_eq!(session.error(), None);
        assert!(session.snapshot().is_some());

        Ok(())
    }

    #[test]
    fn cancel_after_submit_is_rejected() -> TestResult {
        let mut cart = cart_with_goggles()?;
        let mut session = CheckoutSession::default();

        session.open(&cart)?;
        session.choose_method(PaymentMethod::Card)?;
        fill_card(&mut session);

        let auto_close = session.submit(&mut cart)?;

        assert_eq!(
            session.cancel(),
            Err(CheckoutError::InvalidTransition {
                status: CheckoutStatus::Submitted,
                trigger: CheckoutTrigger::Cancel,
            })
        );
        assert_eq!(session.status(), CheckoutStatus::Submitted);
        assert!(session.confirmation().is_some());
        assert_eq!(session.pending_auto_close(), Some(auto_close.ticket));

        Ok(())
    }

    #[test]
    fn choose_method_outside_selection_is_rejected() -> TestResult {
        let cart = cart_with_goggles()?;
        let mut session = CheckoutSession::default();

        assert!(session.choose_method(PaymentMethod::Card).is_err());

        session.open(&cart)?;
        session.choose_method(PaymentMethod::Card)?;

        assert!(session.choose_method(PaymentMethod::PayPal).is_err());
        assert_eq!(session.status(), CheckoutStatus::CardForm);

        Ok(())
    }

    #[test]
    fn close_from_form_discards_fields() -> TestResult {
        let cart = cart_with_goggles()?;
        let mut session = CheckoutSession::default();

        session.open(&cart)?;
        session.choose_method(PaymentMethod::Card)?;
        session.set_contact(ContactField::Name, "Jordan Lee");
        fill_card(&mut session);
        session.close()?;

        assert_eq!(session.status(), CheckoutStatus::Closed);
        assert_eq!(session.card().get(CardField::Number), "");
        assert_eq!(session.contact().get(ContactField::Name), "");
        assert!(session.close().is_err());

        Ok(())
    }

    #[test]
    fn submit_with_empty_name_on_card_stays_on_form() -> TestResult {
        let mut cart = cart_with_goggles()?;
        let mut session = CheckoutSession::default();

        session.open(&cart)?;
        session.choose_method(PaymentMethod::Card)?;
        fill_card(&mut session);
        session.set_card(CardField::NameOnCard, "");

        assert_eq!(
            session.submit(&mut cart),
            Err(CheckoutError::Validation(ValidationError::NameOnCardRequired))
        );
        assert_eq!(session.status(), CheckoutStatus::CardForm);
        assert_eq!(session.error(), Some(ValidationError::NameOnCardRequired));
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn submit_paypal_with_bad_email_stays_on_form() -> TestResult {
        let mut cart = cart_with_goggles()?;
        let mut session = CheckoutSession::default();

        session.open(&cart)?;
        session.choose_method(PaymentMethod::PayPal)?;
        session.set_paypal_email("not-an-email");

        assert!(session.submit(&mut cart).is_err());
        assert_eq!(session.status(), CheckoutStatus::PayPalForm);
        assert_eq!(session.error(), Some(ValidationError::InvalidPayPalEmail));

        Ok(())
    }

    #[test]
    fn submit_clears_cart_and_confirms() -> TestResult {
        let mut cart = cart_with_goggles()?;
        let mut session = CheckoutSession::new(Duration::from_millis(10));

        session.open(&cart)?;
        session.choose_method(PaymentMethod::Card)?;
        fill_card(&mut session);

        let auto_close = session.submit(&mut cart)?;

        assert_eq!(auto_close.delay, Duration::from_millis(10));
        assert_eq!(session.status(), CheckoutStatus::Submitted);
        assert_eq!(session.pending_auto_close(), Some(auto_close.ticket));
        assert!(cart.is_empty());
        assert_eq!(session.card().get(CardField::Number), "");

        let confirmation = session.confirmation().ok_or("missing confirmation")?;

        assert_eq!(confirmation.method(), PaymentMethod::Card);
        assert_eq!(
            confirmation.snapshot().total(),
            &Money::from_minor(1800, USD)
        );
        assert!(
            confirmation.message().contains("$18.00"),
            "message should include the total"
        );

        Ok(())
    }

    #[test]
    fn submit_outside_a_form_is_rejected() -> TestResult {
        let mut cart = cart_with_goggles()?;
        let mut session = CheckoutSession::default();

        session.open(&cart)?;

        assert!(matches!(
            session.submit(&mut cart),
            Err(CheckoutError::InvalidTransition {
                trigger: CheckoutTrigger::Submit,
                ..
            })
        ));
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn auto_close_honours_current_ticket_only() -> TestResult {
        let mut cart = cart_with_goggles()?;
        let catalog = Arc::clone(cart.catalog());
        let mut session = CheckoutSession::default();

        session.open(&cart)?;
        session.choose_method(PaymentMethod::PayPal)?;
        session.set_paypal_email("parent@example.com");

        let first = session.submit(&mut cart)?;

        session.close()?;

        cart.add_item(catalog.item("Goggles")?);
        session.open(&cart)?;
        session.choose_method(PaymentMethod::PayPal)?;
        session.set_paypal_email("parent@example.com");

        let second = session.submit(&mut cart)?;

        assert!(!session.auto_close(first.ticket));
        assert_eq!(session.status(), CheckoutStatus::Submitted);
        assert!(session.auto_close(second.ticket));
        assert_eq!(session.status(), CheckoutStatus::Closed);
        assert!(session.confirmation().is_none());
        assert!(!session.auto_close(second.ticket));

        Ok(())
    }

    #[test]
    fn status_titles_match_modal_headings() {
        assert_eq!(
            CheckoutStatus::MethodSelection.title(),
            "Choose Payment Method"
        );
        assert_eq!(CheckoutStatus::PayPalForm.title(), "PayPal Payment");
        assert!(!CheckoutStatus::Closed.is_open());
        assert!(CheckoutStatus::Submitted.is_open());
    }
}
