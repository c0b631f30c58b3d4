//! Tryout scheduling form

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use thiserror::Error;
use tracing::info;

use crate::{
    forms::{FormMessage, parse_age},
    validation::{is_blank, is_valid_email},
};

/// First failing tryout rule.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TryoutError {
    /// Name left empty
    #[error("Please enter your name.")]
    NameRequired,

    /// Age missing, not a number, or outside 3-100
    #[error("Please enter a valid age (3-100).")]
    InvalidAge,

    /// No gender selected
    #[error("Please select a gender.")]
    GenderRequired,

    /// Email malformed
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    /// No date picked
    #[error("Please select a tryout date.")]
    DateRequired,

    /// Date is not a real `YYYY-MM-DD` calendar date
    #[error("Please select a valid tryout date.")]
    InvalidDate,
}

/// Gender options offered on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Other
    Other,
}

impl Gender {
    /// All options, in the order the form lists them.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Option label and value
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = TryoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str() == s)
            .ok_or(TryoutError::GenderRequired)
    }
}

/// Tryout form text inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryoutField {
    /// Swimmer's name
    Name,
    /// Swimmer's age
    Age,
    /// Contact email
    Email,
    /// Requested date, `YYYY-MM-DD`
    Date,
}

/// A validated tryout request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryoutRequest {
    /// Swimmer's name, trimmed
    pub name: String,

    /// Swimmer's age
    pub age: u8,

    /// Selected gender
    pub gender: Gender,

    /// Contact email
    pub email: String,

    /// Requested tryout date
    pub date: Date,
}

/// Tryout scheduling form state.
#[derive(Debug, Default)]
pub struct TryoutForm {
    name: String,
    age: String,
    gender: Option<Gender>,
    email: String,
    date: String,
    message: Option<FormMessage>,
}

impl TryoutForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a text field.
    pub fn get(&self, field: TryoutField) -> &str {
        match field {
            TryoutField::Name => &self.name,
            TryoutField::Age => &self.age,
            TryoutField::Email => &self.email,
            TryoutField::Date => &self.date,
        }
    }

    /// Replace a text field's value.
    pub fn set(&mut self, field: TryoutField, value: impl Into<String>) {
        let slot = match field {
            TryoutField::Name => &mut self.name,
            TryoutField::Age => &mut self.age,
            TryoutField::Email => &mut self.email,
            TryoutField::Date => &mut self.date,
        };

        *slot = value.into();
    }

    /// Selected gender
    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    /// Select or clear the gender.
    pub fn set_gender(&mut self, gender: Option<Gender>) {
        self.gender = gender;
    }

    /// Message from the last submission, if any.
    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    /// Validate the form, in order: name, age, gender, email, date.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`TryoutError`].
    pub fn validate(&self) -> Result<TryoutRequest, TryoutError> {
        if is_blank(&self.name) {
            return Err(TryoutError::NameRequired);
        }

        let age = parse_age(&self.age).ok_or(TryoutError::InvalidAge)?;
        let gender = self.gender.ok_or(TryoutError::GenderRequired)?;

        if !is_valid_email(&self.email) {
            return Err(TryoutError::InvalidEmail);
        }

        if is_blank(&self.date) {
            return Err(TryoutError::DateRequired);
        }

        let date = self
            .date
            .trim()
            .parse::<Date>()
            .map_err(|_err| TryoutError::InvalidDate)?;

        Ok(TryoutRequest {
            name: self.name.trim().to_string(),
            age,
            gender,
            email: self.email.trim().to_string(),
            date,
        })
    }

    /// Submit the form: on success confirm the booking and clear every field, otherwise show the
    /// first error and keep the fields.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`TryoutError`].
    pub fn submit(&mut self) -> Result<TryoutRequest, TryoutError> {
        self.message = None;

        match self.validate() {
            Ok(request) => {
                info!(date = %request.date, "tryout scheduled");

                *self = Self {
                    message: Some(FormMessage::Success(format!(
                        "Tryout scheduled for {} on {}. We will contact you soon!",
                        request.name, request.date
                    ))),
                    ..Self::default()
                };

                Ok(request)
            }
            Err(error) => {
                self.message = Some(FormMessage::Error(error.to_string()));

                Err(error)
            }
        }
    }
}
