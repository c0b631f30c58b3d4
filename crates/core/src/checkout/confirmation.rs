//! Order confirmation

use crate::{
    cart::snapshot::CartSnapshot,
    checkout::payment::{ContactInfo, PaymentHandoff, PaymentMethod},
    pricing::format_price,
};

/// What the shopper submitted, shown until the checkout closes.
///
/// Nothing here is persisted; it is dropped (and payment fields wiped) when the checkout returns
/// to `Closed`.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    snapshot: CartSnapshot,
    contact: ContactInfo,
    handoff: PaymentHandoff,
}

impl Confirmation {
    pub(crate) fn new(snapshot: CartSnapshot, contact: ContactInfo, handoff: PaymentHandoff) -> Self {
        Self {
            snapshot,
            contact,
            handoff,
        }
    }

    /// Cart lines and total that were ordered
    pub fn snapshot(&self) -> &CartSnapshot {
        &self.snapshot
    }

    /// Contact details entered during checkout
    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    /// Values for the payment provider
    pub fn handoff(&self) -> &PaymentHandoff {
        &self.handoff
    }

    /// Payment method used
    pub fn method(&self) -> PaymentMethod {
        self.handoff.method()
    }

    /// Message shown to the shopper.
    pub fn message(&self) -> String {
        format!(
            "Thank you! Your order has been placed. {} paid by {}.",
            format_price(self.snapshot.total()),
            self.method()
        )
    }
}
