//! Checkout

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::loyalty::{REDEEM_COST, redemption_value};

/// Sales tax applied to every order.
const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Errors that can occur while computing checkout totals.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Tax calculation could not be safely represented.
    #[error("tax conversion overflowed or was not finite")]
    TaxConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Itemized totals for the checkout screen. Derived on demand, never stored.
///
/// All four values are 2-decimal amounts and sum to the penny:
/// `subtotal + tax - discount == total`. On an order cheaper than the
/// redemption value the discount shown here is the clamped amount actually
/// taken off, not the full $5.00, so a "you saved" line can print it as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutTotals {
    /// Cart subtotal before tax.
    pub subtotal: Money<'static, Currency>,

    /// Sales tax on the subtotal.
    pub tax: Money<'static, Currency>,

    /// Loyalty discount, zero unless redemption is requested and affordable.
    pub discount: Money<'static, Currency>,

    /// Amount due. Never negative.
    pub total: Money<'static, Currency>,
}

/// Compute the itemized totals for a cart subtotal.
///
/// Pure pricing function: tax is 8% of the subtotal rounded half-away-from-
/// zero, the loyalty discount is $5.00 when `redeem_requested` is set and the
/// balance covers the 100-point cost, and the total is floored at zero. A
/// discount larger than subtotal plus tax is clamped so the displayed values
/// still sum exactly. A zero subtotal yields zero tax and total regardless of
/// the redeem flag.
///
/// # Errors
///
/// Returns a [`CheckoutError`] if tax conversion or money arithmetic fails.
pub fn compute(
    subtotal: Money<'static, Currency>,
    redeem_requested: bool,
    points: u32,
) -> Result<CheckoutTotals, CheckoutError> {
    let currency = subtotal.currency();
    let zero = Money::from_minor(0, currency);

    if subtotal.is_zero() {
        return Ok(CheckoutTotals {
            subtotal,
            tax: zero,
            discount: zero,
            total: zero,
        });
    }

    let tax = Money::from_minor(tax_minor(subtotal.to_minor_units())?, currency);
    let gross = subtotal.add(tax)?;

    let discount = if redeem_requested && points >= REDEEM_COST {
        let value = redemption_value(currency);

        // Clamp so the total never dips below zero.
        if gross.to_minor_units() < value.to_minor_units() {
            gross
        } else {
            value
        }
    } else {
        zero
    };

    let total = gross.sub(discount)?;

    Ok(CheckoutTotals {
        subtotal,
        tax,
        discount,
        total,
    })
}

/// Tax amount in minor units, rounded half-away-from-zero to whole cents.
fn tax_minor(minor: i64) -> Result<i64, CheckoutError> {
    let Some(minor) = Decimal::from_i64(minor) else {
        unreachable!("always returns `Some` for every `i64`")
    };

    let Some(taxed) = TAX_RATE.checked_mul(minor) else {
        return Err(CheckoutError::TaxConversion);
    };

    let rounded = taxed.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let Some(rounded) = rounded.to_i64() else {
        return Err(CheckoutError::TaxConversion);
    };

    Ok(rounded)
}
