//! Account registration form

use std::fmt;

use thiserror::Error;
use tracing::info;
use zeroize::Zeroize;

use crate::{
    forms::{FormMessage, parse_age},
    validation::{is_blank, is_valid_email},
};

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// First failing registration rule.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// Name left empty
    #[error("Please enter the swimmer's name.")]
    NameRequired,

    /// Age missing, not a number, or outside 3-100
    #[error("Please enter a valid age (3-100).")]
    InvalidAge,

    /// Email malformed
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    /// Password shorter than six characters
    #[error("Password must be at least 6 characters.")]
    PasswordTooShort,

    /// Confirmation differs from password
    #[error("Passwords do not match.")]
    PasswordMismatch,
}

/// Registration form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationField {
    /// Swimmer's full name
    Name,
    /// Swimmer's age
    Age,
    /// Contact email
    Email,
    /// Account password
    Password,
    /// Password, typed again
    ConfirmPassword,
}

/// A validated registration, ready for the account service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Swimmer's name, trimmed
    pub name: String,

    /// Swimmer's age
    pub age: u8,

    /// Contact email
    pub email: String,
}

/// Account registration form state.
#[derive(Default)]
pub struct RegistrationForm {
    name: String,
    age: String,
    email: String,
    password: String,
    confirm_password: String,
    message: Option<FormMessage>,
}

impl RegistrationForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a field.
    pub fn get(&self, field: RegistrationField) -> &str {
        match field {
            RegistrationField::Name => &self.name,
            RegistrationField::Age => &self.age,
            RegistrationField::Email => &self.email,
            RegistrationField::Password => &self.password,
            RegistrationField::ConfirmPassword => &self.confirm_password,
        }
    }

    /// Replace a field's value.
    pub fn set(&mut self, field: RegistrationField, value: &str) {
        let slot = self.slot_mut(field);

        slot.zeroize();
        slot.push_str(value);
    }

    /// Message from the last submission, if any.
    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    /// Validate the form.
    ///
    /// Fields are checked in order (name, age, email, password length, password match) and only
    /// the first failure is reported.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`RegistrationError`].
    pub fn validate(&self) -> Result<Registration, RegistrationError> {
        if is_blank(&self.name) {
            return Err(RegistrationError::NameRequired);
        }

        let age = parse_age(&self.age).ok_or(RegistrationError::InvalidAge)?;

        if !is_valid_email(&self.email) {
            return Err(RegistrationError::InvalidEmail);
        }

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RegistrationError::PasswordTooShort);
        }

        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }

        Ok(Registration {
            name: self.name.trim().to_string(),
            age,
            email: self.email.trim().to_string(),
        })
    }

    /// Submit the form: on success show a welcome message and clear every field, otherwise show
    /// the first error and keep the fields.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`RegistrationError`].
    pub fn submit(&mut self) -> Result<Registration, RegistrationError> {
        self.message = None;

        match self.validate() {
            Ok(registration) => {
                info!(age = registration.age, "registration accepted");

                self.clear();
                self.message = Some(FormMessage::Success(format!(
                    "Registration successful! Welcome, {}.",
                    registration.name
                )));

                Ok(registration)
            }
            Err(error) => {
                self.message = Some(FormMessage::Error(error.to_string()));

                Err(error)
            }
        }
    }

    fn clear(&mut self) {
        for field in [
            RegistrationField::Name,
            RegistrationField::Age,
            RegistrationField::Email,
            RegistrationField::Password,
            RegistrationField::ConfirmPassword,
        ] {
            self.slot_mut(field).zeroize();
        }
    }

    fn slot_mut(&mut self, field: RegistrationField) -> &mut String {
        match field {
            RegistrationField::Name => &mut self.name,
            RegistrationField::Age => &mut self.age,
            RegistrationField::Email => &mut self.email,
            RegistrationField::Password => &mut self.password,
            RegistrationField::ConfirmPassword => &mut self.confirm_password,
        }
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("name", &self.name)
            .field("age", &self.age)
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .field("confirm_password", &"**redacted**")
            .field("message", &self.message)
            .finish()
    }
}

impl Drop for RegistrationForm {
    fn drop(&mut self) {
        self.password.zeroize();
        self.confirm_password.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn filled_form() -> RegistrationForm {
        let mut form = RegistrationForm::new();

        form.set(RegistrationField::Name, "Avery Park");
        form.set(RegistrationField::Age, "12");
        form.set(RegistrationField::Email, "avery@example.com");
        form.set(RegistrationField::Password, "butterfly");
        form.set(RegistrationField::ConfirmPassword, "butterfly");

        form
    }

    #[test]
    fn submit_success_welcomes_and_clears() -> TestResult {
        let mut form = filled_form();

        let registration = form.submit()?;

        assert_eq!(
            registration,
            Registration {
                name: "Avery Park".to_string(),
                age: 12,
                email: "avery@example.com".to_string(),
            }
        );
        assert_eq!(
            form.message(),
            Some(&FormMessage::Success(
                "Registration successful! Welcome, Avery Park.".to_string()
            ))
        );
        assert_eq!(form.get(RegistrationField::Name), "");
        assert_eq!(form.get(RegistrationField::Password), "");

        Ok(())
    }

    #[test]
    fn first_failing_rule_wins() {
        let mut form = RegistrationForm::new();

        form.set(RegistrationField::Age, "1");
        form.set(RegistrationField::Email, "nope");

        assert_eq!(form.submit(), Err(RegistrationError::NameRequired));
        assert_eq!(
            form.message(),
            Some(&FormMessage::Error(
                "Please enter the swimmer's name.".to_string()
            ))
        );

        form.set(RegistrationField::Name, "Avery");

        assert_eq!(form.submit(), Err(RegistrationError::InvalidAge));

        form.set(RegistrationField::Age, "9");

        assert_eq!(form.submit(), Err(RegistrationError::InvalidEmail));
        assert_eq!(form.get(RegistrationField::Name), "Avery");
    }

    #[test]
    fn password_rules_run_after_email() {
        let mut form = filled_form();

        form.set(RegistrationField::Password, "short");

        assert_eq!(form.validate(), Err(RegistrationError::PasswordTooShort));

        form.set(RegistrationField::Password, "longenough");

        assert_eq!(form.validate(), Err(RegistrationError::PasswordMismatch));
    }

    #[test]
    fn password_length_counts_characters() {
        let mut form = filled_form();

        form.set(RegistrationField::Password, "ñññññ");
        form.set(RegistrationField::ConfirmPassword, "ñññññ");

        assert_eq!(form.validate(), Err(RegistrationError::PasswordTooShort));
    }

    #[test]
    fn debug_redacts_passwords() {
        let rendered = format!("{:?}", filled_form());

        assert!(!rendered.contains("butterfly"), "password leaked: {rendered}");
    }
}
