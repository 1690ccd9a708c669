//! Order session

use std::fmt;

use rand::Rng;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    cart::{Cart, CartChange, CartError},
    catalog::{Catalog, ProductKey},
    checkout::{CheckoutError, CheckoutTotals, compute},
    loyalty::{LoyaltyAccount, LoyaltyError},
};

/// How the order will be served. Selected once per session, changeable
/// until checkout begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderType {
    /// Served at a table.
    #[default]
    DineIn,

    /// Packed to go.
    TakeOut,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::DineIn => f.write_str("Dine In"),
            OrderType::TakeOut => f.write_str("Take Out"),
        }
    }
}

/// Where the session is in the order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Building the cart.
    Browsing,

    /// Reviewing totals and payment. Only reachable with a non-empty cart.
    Checkout,

    /// Order placed; terminal until [`OrderSession::reset`].
    Placed,
}

/// Errors surfaced by session operations.
///
/// `EmptyCart` and `NotAtCheckout` correspond to actions the UI simply
/// ignores (a disabled button), not user-visible failures.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Checkout requires a non-empty cart.
    #[error("cart is empty; checkout is unavailable")]
    EmptyCart,

    /// The operation is only valid at the checkout stage.
    #[error("order is not at checkout")]
    NotAtCheckout,

    /// The product key does not exist in the catalog.
    #[error("product not found in catalog")]
    UnknownProduct,

    /// Wrapped cart error.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Wrapped checkout computation error.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Wrapped loyalty error.
    #[error(transparent)]
    Loyalty(#[from] LoyaltyError),
}

/// Completed order summary carried to the confirmation screen.
#[derive(Debug, Clone, Copy)]
pub struct PlacedOrder {
    /// Display order number, random in 1000..=1999. Not unique.
    pub order_number: u16,

    /// How the order is served.
    pub order_type: OrderType,

    /// Final itemized totals.
    pub totals: CheckoutTotals,

    /// Loyalty balance after redemption and earning.
    pub points_balance: u32,
}

/// One in-progress order: order type, cart and loyalty account, plus the
/// redeem flag, coordinated through placement.
///
/// All business-state mutation flows through this type; views hold no
/// writable state of their own.
#[derive(Debug)]
pub struct OrderSession {
    stage: Stage,
    order_type: OrderType,
    cart: Cart,
    loyalty: LoyaltyAccount,
    redeem_requested: bool,
}

impl OrderSession {
    /// Start a fresh session with a default loyalty account.
    pub fn new(currency: &'static Currency) -> Self {
        Self::with_loyalty(currency, LoyaltyAccount::default())
    }

    /// Start a fresh session reusing an existing loyalty account.
    pub fn with_loyalty(currency: &'static Currency, loyalty: LoyaltyAccount) -> Self {
        OrderSession {
            stage: Stage::Browsing,
            order_type: OrderType::default(),
            cart: Cart::new(currency),
            loyalty,
            redeem_requested: false,
        }
    }

    /// Current lifecycle stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Selected order type.
    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Choose how the order is served. Ignored once checkout has begun.
    pub fn set_order_type(&mut self, order_type: OrderType) {
        if self.stage == Stage::Browsing {
            self.order_type = order_type;
        }
    }

    /// The in-progress cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The loyalty account attached to this kiosk.
    pub fn loyalty(&self) -> &LoyaltyAccount {
        &self.loyalty
    }

    /// Whether the customer asked to redeem points.
    pub fn redeem_requested(&self) -> bool {
        self.redeem_requested
    }

    /// Toggle the redeem request. Only previews the discount; points move
    /// when the order is placed, and the request has no effect while the
    /// balance is below the redemption cost.
    pub fn set_redeem(&mut self, requested: bool) {
        self.redeem_requested = requested;
    }

    /// Add one unit of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownProduct`] for a stale key, or a
    /// wrapped [`CartError`].
    pub fn add_item(
        &mut self,
        catalog: &Catalog,
        product: ProductKey,
    ) -> Result<CartChange, SessionError> {
        let entry = catalog
            .product(product)
            .ok_or(SessionError::UnknownProduct)?;

        Ok(self.cart.add(product, entry.price)?)
    }

    /// Add one unit to an existing cart line.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`CartError::LineNotFound`] for an unknown line.
    pub fn increment_line(&mut self, product: ProductKey) -> Result<CartChange, SessionError> {
        Ok(self.cart.increment(product)?)
    }

    /// Remove one unit from an existing cart line, dropping the line at
    /// quantity 1.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`CartError::LineNotFound`] for an unknown line.
    pub fn decrement_line(&mut self, product: ProductKey) -> Result<CartChange, SessionError> {
        Ok(self.cart.decrement(product)?)
    }

    /// Remove a cart line outright.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`CartError::LineNotFound`] for an unknown line.
    pub fn remove_line(&mut self, product: ProductKey) -> Result<CartChange, SessionError> {
        Ok(self.cart.remove(product)?)
    }

    /// Itemized totals for the current cart and redeem request, recomputed
    /// on demand.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`CartError`] or [`CheckoutError`].
    pub fn totals(&self) -> Result<CheckoutTotals, SessionError> {
        let subtotal = self.cart.subtotal()?;

        Ok(compute(
            subtotal,
            self.redeem_requested,
            self.loyalty.points(),
        )?)
    }

    /// Move from browsing to checkout.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyCart`] if the cart is empty; the UI
    /// treats this as a no-op and stays where it is.
    pub fn begin_checkout(&mut self) -> Result<(), SessionError> {
        if self.cart.is_empty() {
            return Err(SessionError::EmptyCart);
        }

        self.stage = Stage::Checkout;

        Ok(())
    }

    /// Place the order: commit the redemption if requested and affordable,
    /// earn one point per whole currency unit of the final total, clear the
    /// cart, and move to [`Stage::Placed`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAtCheckout`] unless checkout was entered
    /// with a non-empty cart, or a wrapped computation error.
    pub fn place_order(&mut self, rng: &mut impl Rng) -> Result<PlacedOrder, SessionError> {
        if self.stage != Stage::Checkout || self.cart.is_empty() {
            return Err(SessionError::NotAtCheckout);
        }

        let totals = self.totals()?;

        if self.redeem_requested && self.loyalty.can_redeem() {
            self.loyalty.commit_redemption()?;
        }

        self.loyalty.earn(&totals.total);
        self.cart.clear();
        self.stage = Stage::Placed;

        Ok(PlacedOrder {
            order_number: rng.gen_range(1000..2000),
            order_type: self.order_type,
            totals,
            points_balance: self.loyalty.points(),
        })
    }

    /// Return to a fresh browsing session after the confirmation screen.
    ///
    /// The order type falls back to [`OrderType::DineIn`] and the redeem
    /// flag clears; the loyalty balance persists across orders.
    pub fn reset(&mut self) {
        self.stage = Stage::Browsing;
        self.order_type = OrderType::default();
        self.redeem_requested = false;
        self.cart.clear();
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use crate::catalog::{CatalogError, Product};

    use super::*;

    fn product(name: &str, minor: i64) -> Product {
        Product {
            name: name.to_owned(),
            price: Money::from_minor(minor, iso::USD),
            description: String::new(),
            image: format!("images/{name}.jpg"),
        }
    }

    fn catalog() -> Result<(Catalog, ProductKey, ProductKey), CatalogError> {
        let mut catalog = Catalog::new(iso::USD);
        catalog.add_category("Coffee");

        let espresso = catalog.add_product("Coffee", product("Signature Espresso", 399))?;
        let mocha = catalog.add_product("Coffee", product("Mocha Fusion", 549))?;

        Ok((catalog, espresso, mocha))
    }

    #[test]
    fn order_type_defaults_to_dine_in_and_displays() {
        let session = OrderSession::new(iso::USD);

        assert_eq!(session.order_type(), OrderType::DineIn);
        assert_eq!(OrderType::DineIn.to_string(), "Dine In");
        assert_eq!(OrderType::TakeOut.to_string(), "Take Out");
    }

    #[test]
    fn checkout_with_empty_cart_is_blocked() {
        let mut session = OrderSession::new(iso::USD);

        let result = session.begin_checkout();

        assert!(matches!(result, Err(SessionError::EmptyCart)));
        assert_eq!(session.stage(), Stage::Browsing);
        assert!(session.cart().is_empty());
    }

    #[test]
    fn order_type_frozen_once_at_checkout() -> TestResult {
        let (catalog, espresso, _) = catalog()?;
        let mut session = OrderSession::new(iso::USD);

        session.add_item(&catalog, espresso)?;
        session.begin_checkout()?;
        session.set_order_type(OrderType::TakeOut);

        assert_eq!(session.order_type(), OrderType::DineIn);

        Ok(())
    }

    #[test]
    fn loyalty_round_trip() -> TestResult {
        // 150 points, $20.00 subtotal, redeeming: discount $5.00, tax $1.60,
        // total $16.60, final balance 150 - 100 + 16 = 66.
        let mut catalog = Catalog::new(iso::USD);
        catalog.add_category("Coffee");
        let flat = catalog.add_product("Coffee", product("Flat Twenty", 2000))?;

        let mut session = OrderSession::new(iso::USD);
        session.add_item(&catalog, flat)?;
        session.set_redeem(true);
        session.begin_checkout()?;

        let mut rng = StdRng::seed_from_u64(7);
        let order = session.place_order(&mut rng)?;

        assert_eq!(order.totals.discount, Money::from_minor(500, iso::USD));
        assert_eq!(order.totals.tax, Money::from_minor(160, iso::USD));
        assert_eq!(order.totals.total, Money::from_minor(1660, iso::USD));
        assert_eq!(order.points_balance, 66);
        assert_eq!(session.loyalty().points(), 66);
        assert!(session.cart().is_empty());
        assert_eq!(session.stage(), Stage::Placed);

        Ok(())
    }

    #[test]
    fn redeem_flag_without_points_changes_nothing() -> TestResult {
        let (catalog, espresso, _) = catalog()?;
        let mut session = OrderSession::with_loyalty(iso::USD, LoyaltyAccount::new(50));

        session.add_item(&catalog, espresso)?;
        session.set_redeem(true);
        session.begin_checkout()?;

        let mut rng = StdRng::seed_from_u64(7);
        let order = session.place_order(&mut rng)?;

        // $3.99 + $0.32 tax, no discount, 4 points earned on $4.31.
        assert_eq!(order.totals.discount, Money::from_minor(0, iso::USD));
        assert_eq!(order.totals.total, Money::from_minor(431, iso::USD));
        assert_eq!(order.points_balance, 54);

        Ok(())
    }

    #[test]
    fn placing_twice_is_rejected() -> TestResult {
        let (catalog, espresso, _) = catalog()?;
        let mut session = OrderSession::new(iso::USD);
        let mut rng = StdRng::seed_from_u64(7);

        session.add_item(&catalog, espresso)?;
        session.begin_checkout()?;
        session.place_order(&mut rng)?;

        let again = session.place_order(&mut rng);

        assert!(matches!(again, Err(SessionError::NotAtCheckout)));

        Ok(())
    }

    #[test]
    fn order_numbers_stay_in_range() -> TestResult {
        let (catalog, espresso, _) = catalog()?;
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..64 {
            let mut session = OrderSession::new(iso::USD);
            session.add_item(&catalog, espresso)?;
            session.begin_checkout()?;

            let order = session.place_order(&mut rng)?;

            assert!(
                (1000..=1999).contains(&order.order_number),
                "order number {} out of range",
                order.order_number
            );
        }

        Ok(())
    }

    #[test]
    fn totals_follow_cart_mutations() -> TestResult {
        let (catalog, espresso, mocha) = catalog()?;
        let mut session = OrderSession::new(iso::USD);

        session.add_item(&catalog, espresso)?;
        session.add_item(&catalog, espresso)?;
        session.add_item(&catalog, mocha)?;

        assert_eq!(
            session.totals()?.subtotal,
            Money::from_minor(1347, iso::USD)
        );

        session.decrement_line(espresso)?;
        session.remove_line(mocha)?;

        assert_eq!(session.totals()?.subtotal, Money::from_minor(399, iso::USD));

        Ok(())
    }

    #[test]
    fn reset_starts_a_fresh_browsing_session() -> TestResult {
        let (catalog, espresso, _) = catalog()?;
        let mut session = OrderSession::new(iso::USD);
        let mut rng = StdRng::seed_from_u64(7);

        session.set_order_type(OrderType::TakeOut);
        session.add_item(&catalog, espresso)?;
        session.set_redeem(true);
        session.begin_checkout()?;
        session.place_order(&mut rng)?;

        let balance = session.loyalty().points();
        session.reset();

        assert_eq!(session.stage(), Stage::Browsing);
        assert_eq!(session.order_type(), OrderType::DineIn);
        assert!(!session.redeem_requested());
        assert!(session.cart().is_empty());
        assert_eq!(session.loyalty().points(), balance);

        Ok(())
    }
}
