//! Field validation shared by checkout and the member forms.

use std::sync::LazyLock;

use regex::Regex;

#[expect(clippy::expect_used, reason = "literal pattern always compiles")]
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern should compile"));

/// Loose email check: something, an `@`, something, a dot, something.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Whether a form field is empty once surrounding whitespace is ignored.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
