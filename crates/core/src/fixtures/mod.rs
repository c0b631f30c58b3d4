//! Fixtures

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    config::StoreConfig,
    fixtures::catalog::CatalogFixture,
};

pub mod catalog;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code or symbol
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Catalog construction error
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Loads fixture sets from a directory laid out as `<base>/catalog/<set>.yml`.
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Fixture {
    /// Create a fixture loader rooted at `./fixtures`
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a fixture loader with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load a catalog fixture set by name
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a price is malformed, or if the
    /// items do not form a valid catalog.
    pub fn catalog(&self, name: &str) -> Result<Catalog, FixtureError> {
        let file_path = self.base_path.join("catalog").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CatalogFixture = serde_norway::from_str(&contents)?;

        fixture.try_into()
    }

    /// Load the catalog named by a store configuration
    ///
    /// # Errors
    ///
    /// See [`Fixture::catalog`].
    pub fn catalog_for(&self, config: &StoreConfig) -> Result<Catalog, FixtureError> {
        self.catalog(config.catalog())
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
