//! Fixtures

use std::{fs, path::Path, str::FromStr};

use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError, Product};

/// Fixture parsing errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading the fixture file
    #[error("failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Catalog assembly error (duplicate product, unknown category)
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// A whole menu as described in YAML: one currency, ordered categories,
/// each with ordered products.
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    currency: String,
    categories: Vec<CategoryFixture>,
}

#[derive(Debug, Deserialize)]
struct CategoryFixture {
    name: String,
    products: Vec<ProductFixture>,
}

#[derive(Debug, Deserialize)]
struct ProductFixture {
    name: String,
    price: String,
    description: String,
    image: String,
}

impl MenuFixture {
    /// Parse a menu from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Yaml`] if the document does not match the
    /// menu schema.
    pub fn parse(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Load a menu from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Io`] if the file cannot be read, or
    /// [`FixtureError::Yaml`] if it does not parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::parse(&contents)
    }

    /// Build the runtime catalog, preserving category and product order.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] for an unknown currency code, a bad price
    /// string, or a catalog-level problem such as a duplicate product name.
    pub fn into_catalog(self) -> Result<Catalog, FixtureError> {
        let currency = iso::find(&self.currency)
            .ok_or_else(|| FixtureError::UnknownCurrency(self.currency.clone()))?;

        let mut catalog = Catalog::new(currency);

        for category in self.categories {
            catalog.add_category(category.name.clone());

            for product in category.products {
                let price = parse_price(&product.price, currency)?;

                catalog.add_product(
                    &category.name,
                    Product {
                        name: product.name,
                        price,
                        description: product.description,
                        image: product.image,
                    },
                )?;
            }
        }

        Ok(catalog)
    }
}

/// Parse a decimal price string like `"3.99"` into money.
fn parse_price(
    raw: &str,
    currency: &'static iso::Currency,
) -> Result<Money<'static, iso::Currency>, FixtureError> {
    let amount = Decimal::from_str(raw)
        .ok()
        .filter(|amount| !amount.is_sign_negative())
        .ok_or_else(|| FixtureError::InvalidPrice(raw.to_owned()))?;

    Ok(Money::from_decimal(amount, currency))
}

/// The built-in Brew Haven menu: six categories, 28 products, priced in USD.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the embedded document is malformed, which
/// would be a packaging defect.
pub fn brew_haven() -> Result<Catalog, FixtureError> {
    MenuFixture::parse(include_str!("fixtures/brew_haven.yml"))?.into_catalog()
}
