//! Member forms
//!
//! Account registration and tryout scheduling. Each form validates its fields in a fixed order
//! and reports only the first failure; a successful submission clears every field.

use std::fmt;

pub mod registration;
pub mod tryout;

/// Youngest accepted swimmer age.
pub const MIN_AGE: u8 = 3;

/// Oldest accepted swimmer age.
pub const MAX_AGE: u8 = 100;

/// The single message a form shows after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    /// The first failing rule
    Error(String),

    /// Confirmation of a successful submission
    Success(String),
}

impl FormMessage {
    /// Message text
    pub fn text(&self) -> &str {
        match self {
            FormMessage::Error(text) | FormMessage::Success(text) => text,
        }
    }

    /// Whether this is an error
    pub fn is_error(&self) -> bool {
        matches!(self, FormMessage::Error(_))
    }
}

impl fmt::Display for FormMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Parses a whole-number age within [`MIN_AGE`]..=[`MAX_AGE`].
pub fn parse_age(value: &str) -> Option<u8> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|age| (MIN_AGE..=MAX_AGE).contains(age))
}
