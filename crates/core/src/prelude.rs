//! Poolside prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    account::{Account, AccountError, PaymentLogEntry, PaymentStatus, Swimmer},
    cart::{
        Cart, CartError, CartLine,
        observer::{CartEvent, CartEventLog, CartObserver},
        snapshot::{CartSnapshot, SnapshotLine},
    },
    catalog::{Catalog, CatalogError, CatalogItem, ItemId},
    checkout::{
        AutoClose, AutoCloseTicket, CheckoutError, CheckoutSession, CheckoutStatus,
        CheckoutTrigger,
        confirmation::Confirmation,
        payment::{
            CardDetails, CardField, ContactField, ContactInfo, PayPalDetails, PaymentHandoff,
            PaymentMethod, ValidationError,
        },
    },
    config::{ConfigError, StoreConfig},
    fixtures::{Fixture, FixtureError},
    forms::{
        FormMessage,
        registration::{Registration, RegistrationError, RegistrationField, RegistrationForm},
        tryout::{Gender, TryoutError, TryoutField, TryoutForm, TryoutRequest},
    },
    pricing::{PricingError, format_price},
};
