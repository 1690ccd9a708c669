//! Catalog

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Errors raised while assembling the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A product with this name is already registered.
    #[error("duplicate product name: {0}")]
    DuplicateProduct(String),

    /// The named category has not been registered.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// A product's currency differs from the catalog currency.
    #[error("product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// A menu entry. Immutable once registered.
#[derive(Debug, Clone)]
pub struct Product {
    /// Display name, unique within the catalog
    pub name: String,

    /// Unit price
    pub price: Money<'static, Currency>,

    /// Menu-card description
    pub description: String,

    /// Asset-store reference for the product image
    pub image: String,
}

/// A named, ordered run of products. Insertion order is display order.
#[derive(Debug)]
pub struct Category {
    name: String,
    products: Vec<ProductKey>,
}

impl Category {
    /// Category display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product keys in display order.
    pub fn products(&self) -> &[ProductKey] {
        &self.products
    }
}

/// Static product and category registry, read-only once the menu is loaded.
///
/// Categories live in an ordered list rather than a map, so "first category"
/// selection does not depend on hash iteration order.
#[derive(Debug)]
pub struct Catalog {
    products: SlotMap<ProductKey, Product>,
    product_keys: FxHashMap<String, ProductKey>,
    categories: Vec<Category>,
    currency: &'static Currency,
}

impl Catalog {
    /// Create an empty catalog priced in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Catalog {
            products: SlotMap::with_key(),
            product_keys: FxHashMap::default(),
            categories: Vec::new(),
            currency,
        }
    }

    /// Register a category at the end of the display order.
    ///
    /// Registering a name twice keeps the original position.
    pub fn add_category(&mut self, name: impl Into<String>) {
        let name = name.into();

        if !self.categories.iter().any(|c| c.name == name) {
            self.categories.push(Category {
                name,
                products: Vec::new(),
            });
        }
    }

    /// Register a product under an existing category.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UnknownCategory`]: the category has not been registered.
    /// - [`CatalogError::DuplicateProduct`]: a product with this name already exists.
    /// - [`CatalogError::CurrencyMismatch`]: the product is priced in another currency.
    pub fn add_product(
        &mut self,
        category: &str,
        product: Product,
    ) -> Result<ProductKey, CatalogError> {
        if product.price.currency() != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                product.name,
                product.price.currency().iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if self.product_keys.contains_key(&product.name) {
            return Err(CatalogError::DuplicateProduct(product.name));
        }

        let slot = self
            .categories
            .iter_mut()
            .find(|c| c.name == category)
            .ok_or_else(|| CatalogError::UnknownCategory(category.to_owned()))?;

        let name = product.name.clone();
        let key = self.products.insert(product);

        slot.products.push(key);
        self.product_keys.insert(name, key);

        Ok(key)
    }

    /// Look up a product by key.
    pub fn product(&self, key: ProductKey) -> Option<&Product> {
        self.products.get(key)
    }

    /// Look up a product by its unique name.
    pub fn product_by_name(&self, name: &str) -> Option<(ProductKey, &Product)> {
        let key = *self.product_keys.get(name)?;

        Some((key, self.products.get(key)?))
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The category shown when the menu screen first opens.
    pub fn first_category(&self) -> Option<&Category> {
        self.categories.first()
    }

    /// Products of a category, in display order.
    pub fn products_in(
        &self,
        category: &str,
    ) -> Option<impl Iterator<Item = (ProductKey, &Product)>> {
        let slot = self.categories.iter().find(|c| c.name == category)?;

        Some(
            slot.products
                .iter()
                .filter_map(|&key| Some((key, self.products.get(key)?))),
        )
    }

    /// Currency all products are priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of registered products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
