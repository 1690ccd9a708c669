//! Cart

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::catalog::ProductKey;

/// Errors related to cart mutation or totals.
#[derive(Debug, Error)]
pub enum CartError {
    /// An item's currency differs from the cart currency.
    #[error("item has currency {0}, but cart has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// No line exists for the given product.
    #[error("no cart line for product {0:?}")]
    LineNotFound(ProductKey),

    /// A line total exceeded the representable range.
    #[error("line total overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// What a cart mutation did, so the caller can spawn the matching
/// feedback marker. Carries no business meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A line was created or its quantity grew.
    Added,

    /// A line's quantity shrank but the line survives.
    Reduced,

    /// A line left the cart.
    Removed,
}

/// One product in the cart. Quantity is always at least 1; a line that
/// would reach 0 is removed from the cart instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartLine {
    product: ProductKey,
    unit_price: Money<'static, Currency>,
    quantity: u32,
}

impl CartLine {
    /// The product this line references.
    pub fn product(&self) -> ProductKey {
        self.product
    }

    /// Unit price captured when the product was added.
    pub fn unit_price(&self) -> Money<'static, Currency> {
        self.unit_price
    }

    /// Units of the product in the cart.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the total exceeds the minor-unit range.
    pub fn total(&self) -> Result<Money<'static, Currency>, CartError> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or(CartError::Overflow)?;

        Ok(Money::from_minor(minor, self.unit_price.currency()))
    }
}

/// Ordered product-to-quantity ledger for the in-progress order.
///
/// Line order is first-added order, so the cart screen renders stably.
/// At most one line exists per distinct product.
#[derive(Debug)]
pub struct Cart {
    lines: SmallVec<[CartLine; 8]>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart priced in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: SmallVec::new(),
            currency,
        }
    }

    /// Add one unit of a product.
    ///
    /// An existing line for the product grows by one; otherwise a new line
    /// is appended at the end of the display order.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the unit price is in
    /// another currency.
    pub fn add(
        &mut self,
        product: ProductKey,
        unit_price: Money<'static, Currency>,
    ) -> Result<CartChange, CartError> {
        if unit_price.currency() != self.currency {
            return Err(CartError::CurrencyMismatch(
                unit_price.currency().iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product == product) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                product,
                unit_price,
                quantity: 1,
            });
        }

        Ok(CartChange::Added)
    }

    /// Add one unit to an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line exists for the product.
    pub fn increment(&mut self, product: ProductKey) -> Result<CartChange, CartError> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product == product)
            .ok_or(CartError::LineNotFound(product))?;

        line.quantity += 1;

        Ok(CartChange::Added)
    }

    /// Remove one unit from an existing line.
    ///
    /// A line at quantity 1 is removed outright; quantities never reach 0.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line exists for the product.
    pub fn decrement(&mut self, product: ProductKey) -> Result<CartChange, CartError> {
        let index = self
            .lines
            .iter()
            .position(|l| l.product == product)
            .ok_or(CartError::LineNotFound(product))?;

        if self.lines.get(index).is_some_and(|line| line.quantity > 1) {
            if let Some(line) = self.lines.get_mut(index) {
                line.quantity -= 1;
            }

            Ok(CartChange::Reduced)
        } else {
            self.lines.remove(index);

            Ok(CartChange::Removed)
        }
    }

    /// Remove a line regardless of its quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line exists for the product.
    pub fn remove(&mut self, product: ProductKey) -> Result<CartChange, CartError> {
        let index = self
            .lines
            .iter()
            .position(|l| l.product == product)
            .ok_or(CartError::LineNotFound(product))?;

        self.lines.remove(index);

        Ok(CartChange::Removed)
    }

    /// Empty the cart. Called when an order is placed.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of price times quantity across all lines, recomputed from the
    /// lines on every call so it can never drift.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if money arithmetic fails or a line total
    /// overflows.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, CartError> {
        self.lines
            .iter()
            .try_fold(Money::from_minor(0, self.currency), |acc, line| {
                Ok(acc.add(line.total()?)?)
            })
    }

    /// Lines in first-added order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity held for a product, if a line exists.
    pub fn quantity_of(&self, product: ProductKey) -> Option<u32> {
        self.lines
            .iter()
            .find(|l| l.product == product)
            .map(CartLine::quantity)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
