//! Utils

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use thiserror::Error;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Arguments for the store examples
#[derive(Debug, Parser)]
pub struct ExampleStoreArgs {
    /// Fixture directory containing `catalog/<set>.yml`
    #[clap(short, long, default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Store config file; defaults are used when omitted
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Cart actions to replay, e.g. `add:Goggles`, `adjust:Goggles:+1`, `remove:Caps`
    #[clap(short, long = "action", num_args = 1..)]
    pub actions: Vec<String>,

    /// Pay with PayPal using this email instead of the demo card
    #[clap(long)]
    pub paypal: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[clap(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format
    #[clap(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Errors parsing a cart action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartActionError {
    /// The action is not `add`, `remove` or `adjust` with the right number of parts
    #[error("unrecognised cart action: '{0}'")]
    UnknownAction(String),

    /// The adjust delta is not a whole number
    #[error("invalid delta in '{action}': {source}")]
    InvalidDelta {
        /// Action as given
        action: String,
        /// Integer parse failure
        source: std::num::ParseIntError,
    },
}

/// A cart action parsed from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of an item
    Add(String),

    /// Remove an item's line
    Remove(String),

    /// Change an item's quantity
    Adjust(String, i32),
}

impl CartAction {
    /// Parse `add:<id>`, `remove:<id>` or `adjust:<id>:<delta>`.
    ///
    /// # Errors
    ///
    /// Returns a [`CartActionError`] if the action is not recognised or the delta is not a whole
    /// number.
    pub fn parse(action: &str) -> Result<Self, CartActionError> {
        match action.split(':').collect::<Vec<_>>().as_slice() {
            ["add", id] => Ok(CartAction::Add((*id).to_string())),
            ["remove", id] => Ok(CartAction::Remove((*id).to_string())),
            ["adjust", id, delta] => delta
                .trim_start_matches('+')
                .parse::<i32>()
                .map(|delta| CartAction::Adjust((*id).to_string(), delta))
                .map_err(|source| CartActionError::InvalidDelta {
                    action: action.to_string(),
                    source,
                }),
            _ => Err(CartActionError::UnknownAction(action.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cart_actions() {
        assert_eq!(
            CartAction::parse("add:Team Cap"),
            Ok(CartAction::Add("Team Cap".to_string()))
        );
        assert_eq!(
            CartAction::parse("adjust:Goggles:+1"),
            Ok(CartAction::Adjust("Goggles".to_string(), 1))
        );
        assert_eq!(
            CartAction::parse("adjust:Goggles:-2"),
            Ok(CartAction::Adjust("Goggles".to_string(), -2))
        );
        assert_eq!(
            CartAction::parse("remove:Caps"),
            Ok(CartAction::Remove("Caps".to_string()))
        );
    }

    #[test]
    fn parse_rejects_unknown_actions() {
        assert_eq!(
            CartAction::parse("buy:Caps"),
            Err(CartActionError::UnknownAction("buy:Caps".to_string()))
        );
        assert!(matches!(
            CartAction::parse("adjust:Caps:lots"),
            Err(CartActionError::InvalidDelta { action, .. }) if action == "adjust:Caps:lots"
        ));
        assert_eq!(
            CartAction::parse("adjust:Caps:lots")
                .err()
                .map(|error| error.to_string()),
            Some("invalid delta in 'adjust:Caps:lots': invalid digit found in string".to_string())
        );
    }
}
