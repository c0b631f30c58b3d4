//! Team Store Checkout Example
//!
//! Replays cart actions against a catalog fixture, checks out and prints the order summary.
//!
//! Use `-a` to queue cart actions, e.g. `-a add:Goggles -a "add:Team Cap" -a adjust:Goggles:+1`
//! Use `-c` to load a store config file
//! Use `--paypal <email>` to pay with PayPal instead of the demo card

use std::{
    io::{self, Write},
    sync::Arc,
    thread,
};

use anyhow::Result;
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use poolside::{
    prelude::*,
    utils::{CartAction, ExampleStoreArgs, LogFormat},
};

/// Team Store Checkout Example
pub fn main() -> Result<()> {
    let args = ExampleStoreArgs::parse();

    init_logging(&args)?;

    let config = match args.config.as_deref() {
        Some(path) => StoreConfig::load(path)?,
        None => StoreConfig::default(),
    };

    let catalog = Arc::new(Fixture::with_base_path(&args.fixtures).catalog_for(&config)?);
    let mut cart = Cart::new(Arc::clone(&catalog));
    let activity = CartEventLog::new();

    cart.subscribe(activity.clone());

    for action in &args.actions {
        match CartAction::parse(action)? {
            CartAction::Add(id) => cart.add_item(catalog.item(&id)?),
            CartAction::Remove(id) => cart.remove_item(&id),
            CartAction::Adjust(id, delta) => cart.adjust_quantity(&id, delta),
        }
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    writeln!(
        handle,
        "{} cart update(s), {} line(s), total {}",
        activity.events().len(),
        cart.len(),
        format_price(&cart.total()?)
    )?;

    let mut session = CheckoutSession::from_config(&config);

    if let Err(error) = session.open(&cart) {
        writeln!(handle, "Checkout unavailable: {error}")?;

        return Ok(());
    }

    session.set_contact(ContactField::Name, "Team Parent");
    session.set_contact(ContactField::Email, "parent@example.com");
    session.set_contact(ContactField::Address, "1 Pool Lane");

    if let Some(email) = args.paypal.as_deref() {
        session.choose_method(PaymentMethod::PayPal)?;
        session.set_paypal_email(email);
    } else {
        session.choose_method(PaymentMethod::Card)?;
        session.set_card(CardField::Number, "4242 4242 4242 4242");
        session.set_card(CardField::NameOnCard, "Team Parent");
        session.set_card(CardField::Expiry, "09/27");
        session.set_card(CardField::Cvc, "123");
    }

    let auto_close = match session.submit(&mut cart) {
        Ok(auto_close) => auto_close,
        Err(CheckoutError::Validation(error)) => {
            writeln!(handle, "{error}")?;

            return Ok(());
        }
        Err(error) => return Err(error.into()),
    };

    if let Some(confirmation) = session.confirmation() {
        confirmation.snapshot().write_to(&mut handle)?;

        if let PaymentHandoff::Card(card) = confirmation.handoff() {
            writeln!(handle, " Card: {}", card.masked_number())?;
        }

        writeln!(handle, "\n{}", confirmation.message())?;
    }

    writeln!(
        handle,
        "Closing in {}",
        auto_close.delay.human(Truncate::Nano)
    )?;

    thread::sleep(auto_close.delay);

    session.auto_close(auto_close.ticket);

    writeln!(
        handle,
        "Checkout {:?}, cart has {} line(s)",
        session.status(),
        cart.len()
    )?;

    Ok(())
}

fn init_logging(args: &ExampleStoreArgs) -> Result<()> {
    let filter = EnvFilter::try_new(&args.log_level)?;
    let registry = tracing_subscriber::registry().with(filter);

    match args.log_format {
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_writer(io::stderr))
            .try_init()?,
    }

    Ok(())
}
