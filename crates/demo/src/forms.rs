//! Member forms

use leptos::{ev, logging, prelude::*};

use poolside::forms::{
    FormMessage,
    registration::{RegistrationField, RegistrationForm},
    tryout::{Gender, TryoutField, TryoutForm},
};

/// CSS class for a form's result message.
pub fn message_class(message: &FormMessage) -> &'static str {
    if message.is_error() {
        "form-message form-message-error"
    } else {
        "form-message form-message-success"
    }
}

fn render_message(message: Option<FormMessage>) -> AnyView {
    match message {
        Some(message) => view! {
            <p class=message_class(&message) role="status">{message.to_string()}</p>
        }
        .into_any(),
        None => ().into_any(),
    }
}

fn registration_input(
    form: RwSignal<RegistrationForm>,
    field: RegistrationField,
    label: &'static str,
    input_type: &'static str,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <input
                type=input_type
                class="form-input"
                prop:value=move || form.with(|form| form.get(field).to_string())
                on:input=move |event| {
                    let value = event_target_value(&event);

                    form.update(|form| form.set(field, &value));
                }
            />
        </label>
    }
}

fn tryout_input(
    form: RwSignal<TryoutForm>,
    field: TryoutField,
    label: &'static str,
    input_type: &'static str,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <input
                type=input_type
                class="form-input"
                prop:value=move || form.with(|form| form.get(field).to_string())
                on:input=move |event| {
                    let value = event_target_value(&event);

                    form.update(|form| form.set(field, value));
                }
            />
        </label>
    }
}

/// New swimmer account registration.
#[component]
pub fn RegistrationPanel() -> impl IntoView {
    let form = RwSignal::new(RegistrationForm::new());

    let on_submit = move |event: ev::SubmitEvent| {
        event.prevent_default();

        form.update(|form| {
            if let Err(error) = form.submit() {
                logging::log!("registration rejected: {error}");
            }
        });
    };

    view! {
        <section class="panel">
            <div class="panel-header">
                <h2 class="panel-title">"Register"</h2>
            </div>
            <form class="member-form" on:submit=on_submit>
                {registration_input(form, RegistrationField::Name, "Swimmer Name", "text")}
                {registration_input(form, RegistrationField::Age, "Age", "number")}
                {registration_input(form, RegistrationField::Email, "Email", "email")}
                {registration_input(form, RegistrationField::Password, "Password", "password")}
                {registration_input(
                    form,
                    RegistrationField::ConfirmPassword,
                    "Confirm Password",
                    "password",
                )}
                <button type="submit" class="button button-primary">"Register"</button>
                {move || render_message(form.with(|form| form.message().cloned()))}
            </form>
        </section>
    }
}

/// Tryout booking.
#[component]
pub fn TryoutPanel() -> impl IntoView {
    let form = RwSignal::new(TryoutForm::new());

    let on_submit = move |event: ev::SubmitEvent| {
        event.prevent_default();

        form.update(|form| {
            if let Err(error) = form.submit() {
                logging::log!("tryout rejected: {error}");
            }
        });
    };

    view! {
        <section class="panel">
            <div class="panel-header">
                <h2 class="panel-title">"Schedule a Tryout"</h2>
            </div>
            <form class="member-form" on:submit=on_submit>
                {tryout_input(form, TryoutField::Name, "Swimmer Name", "text")}
                {tryout_input(form, TryoutField::Age, "Age", "number")}
                <label class="form-field">
                    <span class="form-label">"Gender"</span>
                    <select
                        class="form-input"
                        prop:value=move || {
                            form.with(|form| form.gender().map(Gender::as_str).unwrap_or_default())
                        }
                        on:change=move |event| {
                            let gender = event_target_value(&event).parse::<Gender>().ok();

                            form.update(|form| form.set_gender(gender));
                        }
                    >
                        <option value="">"Select…"</option>
                        {Gender::ALL
                            .into_iter()
                            .map(|gender| view! { <option value=gender.as_str()>{gender.as_str()}</option> })
                            .collect_view()}
                    </select>
                </label>
                {tryout_input(form, TryoutField::Email, "Parent Email", "email")}
                {tryout_input(form, TryoutField::Date, "Preferred Date", "date")}
                <button type="submit" class="button button-primary">"Book Tryout"</button>
                {move || render_message(form.with(|form| form.message().cloned()))}
            </form>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_class_distinguishes_errors() {
        assert_eq!(
            message_class(&FormMessage::Error("Passwords do not match.".to_string())),
            "form-message form-message-error"
        );
        assert_eq!(
            message_class(&FormMessage::Success("Welcome!".to_string())),
            "form-message form-message-success"
        );
    }

    #[test]
    fn registration_form_clears_after_success() {
        let form = RwSignal::new(RegistrationForm::new());

        form.update(|form| {
            form.set(RegistrationField::Name, "Avery Park");
            form.set(RegistrationField::Age, "9");
            form.set(RegistrationField::Email, "avery@example.com");
            form.set(RegistrationField::Password, "splash1");
            form.set(RegistrationField::ConfirmPassword, "splash1");
        });

        let accepted = form.try_update(RegistrationForm::submit);

        assert!(matches!(accepted, Some(Ok(_))));
        assert_eq!(
            form.with_untracked(|form| form.get(RegistrationField::Name).to_string()),
            ""
        );
    }
}
