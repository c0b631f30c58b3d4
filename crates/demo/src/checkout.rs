//! Checkout modal

use leptos::{
    ev,
    leptos_dom::helpers::{TimeoutHandle, set_timeout_with_handle},
    logging,
    prelude::*,
};

use poolside::{
    cart::Cart,
    checkout::{
        AutoClose, CheckoutError, CheckoutSession, CheckoutStatus,
        confirmation::Confirmation,
        payment::{CardField, ContactField, PaymentMethod},
    },
    pricing::format_price,
};

use crate::announce;

/// What the view should do after a submit click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Order placed. Show the message and schedule the auto-close.
    Placed {
        /// Ticket and delay for the auto-close timer
        auto_close: AutoClose,
        /// Confirmation text to announce
        message: String,
    },

    /// The active form has an error, already stored on the session.
    Invalid(String),

    /// Submit is not possible from the current state.
    Ignored,
}

/// Submit the active payment form and decide how the view reacts.
pub fn submit_checkout(cart: &mut Cart, session: &mut CheckoutSession) -> SubmitOutcome {
    match session.submit(cart) {
        Ok(auto_close) => SubmitOutcome::Placed {
            auto_close,
            message: session
                .confirmation()
                .map(Confirmation::message)
                .unwrap_or_default(),
        },
        Err(CheckoutError::Validation(error)) => SubmitOutcome::Invalid(error.to_string()),
        Err(error) => {
            logging::warn!("{error}");

            SubmitOutcome::Ignored
        }
    }
}

fn cancel_auto_close(pending_timer: StoredValue<Option<TimeoutHandle>>) {
    pending_timer.update_value(|handle| {
        if let Some(handle) = handle.take() {
            handle.clear();
        }
    });
}

fn schedule_auto_close(
    session: RwSignal<CheckoutSession>,
    pending_timer: StoredValue<Option<TimeoutHandle>>,
    auto_close: AutoClose,
) {
    cancel_auto_close(pending_timer);

    let ticket = auto_close.ticket;

    match set_timeout_with_handle(
        move || {
            pending_timer.set_value(None);
            session.update(|session| {
                session.auto_close(ticket);
            });
        },
        auto_close.delay,
    ) {
        Ok(handle) => pending_timer.set_value(Some(handle)),
        Err(_js_error) => logging::warn!("could not schedule checkout auto-close"),
    }
}

fn contact_input(
    session: RwSignal<CheckoutSession>,
    field: ContactField,
    label: &'static str,
    input_type: &'static str,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <input
                type=input_type
                class="form-input"
                prop:value=move || session.with(|session| session.contact().get(field).to_string())
                on:input=move |event| {
                    let value = event_target_value(&event);

                    session.update(|session| session.set_contact(field, value));
                }
            />
        </label>
    }
}

fn card_input(
    session: RwSignal<CheckoutSession>,
    field: CardField,
    label: &'static str,
    placeholder: &'static str,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <input
                type="text"
                class="form-input"
                placeholder=placeholder
                maxlength=field.max_len().map(|max_len| max_len.to_string())
                prop:value=move || session.with(|session| session.card().get(field).to_string())
                on:input=move |event| {
                    let value = event_target_value(&event);

                    session.update(|session| session.set_card(field, &value));
                }
            />
        </label>
    }
}

fn form_error(session: RwSignal<CheckoutSession>) -> impl IntoView {
    move || {
        session.with(CheckoutSession::error).map(|error| {
            view! { <p class="form-error" role="alert">{error.to_string()}</p> }
        })
    }
}

#[component]
fn MethodSelection(session: RwSignal<CheckoutSession>) -> impl IntoView {
    let total = move || {
        session.with(|session| {
            session
                .snapshot()
                .map(|snapshot| format_price(snapshot.total()))
                .unwrap_or_default()
        })
    };

    let choose = move |method: PaymentMethod| {
        session.update(|session| {
            if let Err(error) = session.choose_method(method) {
                logging::warn!("{error}");
            }
        });
    };

    view! {
        <p class="checkout-total">"Order total: " {total}</p>
        <div class="checkout-contact">
            {contact_input(session, ContactField::Name, "Name", "text")}
            {contact_input(session, ContactField::Email, "Email", "email")}
            {contact_input(session, ContactField::Address, "Shipping Address", "text")}
        </div>
        <div class="checkout-methods">
            <button
                type="button"
                class="button button-primary"
                on:click=move |_| choose(PaymentMethod::Card)
            >
                {PaymentMethod::Card.to_string()}
            </button>
            <button
                type="button"
                class="button button-primary"
                on:click=move |_| choose(PaymentMethod::PayPal)
            >
                {PaymentMethod::PayPal.to_string()}
            </button>
        </div>
    }
}

#[component]
fn CardForm(session: RwSignal<CheckoutSession>) -> impl IntoView {
    view! {
        {card_input(session, CardField::Number, "Card Number", "1234 5678 9012 3456")}
        {card_input(session, CardField::NameOnCard, "Name on Card", "")}
        <div class="form-row">
            {card_input(session, CardField::Expiry, "Expiry", "MM/YY")}
            {card_input(session, CardField::Cvc, "CVC", "123")}
        </div>
        {form_error(session)}
    }
}

#[component]
fn PayPalForm(session: RwSignal<CheckoutSession>) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">"PayPal Email"</span>
            <input
                type="email"
                class="form-input"
                prop:value=move || session.with(|session| session.paypal().email().to_string())
                on:input=move |event| {
                    let value = event_target_value(&event);

                    session.update(|session| session.set_paypal_email(&value));
                }
            />
        </label>
        {form_error(session)}
    }
}

/// Checkout modal, rendered for whichever state the session is in.
#[component]
pub fn CheckoutModal(
    cart: RwSignal<Cart>,
    session: RwSignal<CheckoutSession>,
    live_message: RwSignal<(u64, String)>,
) -> impl IntoView {
    let pending_timer = StoredValue::new(None::<TimeoutHandle>);
    let status = Memo::new(move |_| session.with(CheckoutSession::status));

    let close = move |_: ev::MouseEvent| {
        cancel_auto_close(pending_timer);
        session.update(|session| {
            if let Err(error) = session.close() {
                logging::warn!("{error}");
            }
        });
    };

    let cancel = move |_: ev::MouseEvent| {
        session.update(|session| {
            if let Err(error) = session.cancel() {
                logging::warn!("{error}");
            }
        });
    };

    let submit = move |_: ev::MouseEvent| {
        let mut outcome = SubmitOutcome::Ignored;

        cart.update(|cart| session.update(|session| outcome = submit_checkout(cart, session)));

        match outcome {
            SubmitOutcome::Placed {
                auto_close,
                message,
            } => {
                schedule_auto_close(session, pending_timer, auto_close);
                announce(live_message, message);
            }
            SubmitOutcome::Invalid(message) => announce(live_message, message),
            SubmitOutcome::Ignored => {}
        }
    };

    view! {
        <Show when=move || status.get().is_open()>
            <div class="modal-backdrop">
                <div class="modal" role="dialog" aria-modal="true" aria-labelledby="checkout-title">
                    <div class="modal-header">
                        <h2 id="checkout-title" class="modal-title">
                            {move || status.get().title()}
                        </h2>
                        <button
                            type="button"
                            aria-label="Close checkout"
                            class="icon-button icon-button-secondary icon-button-compact"
                            on:click=close
                        >
                            "×"
                        </button>
                    </div>
                    <div class="modal-body">
                        {move || match status.get() {
                            CheckoutStatus::MethodSelection => {
                                view! { <MethodSelection session=session /> }.into_any()
                            }
                            CheckoutStatus::CardForm => view! { <CardForm session=session /> }.into_any(),
                            CheckoutStatus::PayPalForm => {
                                view! { <PayPalForm session=session /> }.into_any()
                            }
                            CheckoutStatus::Submitted => {
                                let message = session.with(|session| {
                                    session
                                        .confirmation()
                                        .map(Confirmation::message)
                                        .unwrap_or_default()
                                });

                                view! { <p class="checkout-confirmation">{message}</p> }.into_any()
                            }
                            CheckoutStatus::Closed => ().into_any(),
                        }}
                    </div>
                    <div class="modal-footer">
                        {move || match status.get() {
                            CheckoutStatus::CardForm | CheckoutStatus::PayPalForm => {
                                view! {
                                    <button type="button" class="button button-secondary" on:click=cancel>
                                        "Back"
                                    </button>
                                    <button type="button" class="button button-primary" on:click=submit>
                                        "Place Order"
                                    </button>
                                }
                                .into_any()
                            }
                            CheckoutStatus::MethodSelection => {
                                view! {
                                    <button type="button" class="button button-secondary" on:click=cancel>
                                        "Cancel"
                                    </button>
                                }
                                .into_any()
                            }
                            CheckoutStatus::Submitted | CheckoutStatus::Closed => ().into_any(),
                        }}
                    </div>
                </div>
            </div>
        </Show>
    }
}
