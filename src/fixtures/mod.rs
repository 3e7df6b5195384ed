//! Fixtures
//!
//! Seed catalogs described in YAML under `<base>/catalogs/<name>.yml`, loaded
//! into an [`InMemoryCatalog`] with the same checks storage applies.

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::catalog::{
    models::{Category, Product, ProductType},
    repository::{InMemoryCatalog, StorageError},
};

pub mod catalog;

pub use catalog::CatalogFixture;

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

    /// A record broke a catalog invariant
    #[error("Rejected fixture record: {0}")]
    Storage(#[from] StorageError),
}

/// Fixture
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

    /// Create a fixture loader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load the catalog set called `name`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a price is
    /// malformed, or a record breaks a catalog invariant (duplicate ids,
    /// unknown parents, repeated languages, negative prices).
    pub fn load_catalog(&self, name: &str) -> Result<InMemoryCatalog, FixtureError> {
        let file_path = self.base_path.join("catalogs").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        parse_catalog(&contents)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a catalog from YAML text
///
/// Parents are inserted before children, so records may reference any
/// category or type defined in the same document.
///
/// # Errors
///
/// See [`Fixture::load_catalog`].
pub fn parse_catalog(contents: &str) -> Result<InMemoryCatalog, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(contents)?;
    let mut catalog = InMemoryCatalog::new();

    for category in fixture.categories {
        catalog.insert_category(Category::from(category))?;
    }

    for product_type in fixture.product_types {
        catalog.insert_product_type(ProductType::from(product_type))?;
    }

    for product in fixture.products {
        catalog.insert_product(Product::try_from(product)?)?;
    }

    Ok(catalog)
}
