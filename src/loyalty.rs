//! Loyalty

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Points a new kiosk account starts with.
pub const STARTING_BALANCE: u32 = 150;

/// Points consumed by one redemption.
pub const REDEEM_COST: u32 = 100;

/// Redemption value in minor units ($5.00).
const REDEEM_VALUE_MINOR: i64 = 500;

/// The discount one redemption buys.
pub fn redemption_value(currency: &'static Currency) -> Money<'static, Currency> {
    Money::from_minor(REDEEM_VALUE_MINOR, currency)
}

/// Errors related to loyalty-point movements.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoyaltyError {
    /// The balance does not cover a redemption.
    #[error("insufficient points: {0} held, {REDEEM_COST} required")]
    InsufficientPoints(u32),
}

/// Loyalty point balance with earn and redeem rules.
///
/// The balance can never go negative: redemption is guarded, and earning
/// only adds. Toggling the redeem checkbox on the checkout screen previews
/// the discount; the deduction itself happens through
/// [`commit_redemption`](LoyaltyAccount::commit_redemption) when the order
/// is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoyaltyAccount {
    points: u32,
}

impl Default for LoyaltyAccount {
    fn default() -> Self {
        LoyaltyAccount {
            points: STARTING_BALANCE,
        }
    }
}

impl LoyaltyAccount {
    /// Create an account with an explicit balance.
    pub fn new(points: u32) -> Self {
        LoyaltyAccount { points }
    }

    /// Current point balance.
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Whether a redemption is currently affordable. Drives the checkout
    /// checkbox enablement: below [`REDEEM_COST`] the toggle is inert.
    pub fn can_redeem(&self) -> bool {
        self.points >= REDEEM_COST
    }

    /// Deduct one redemption's worth of points. Called at order placement,
    /// never at flag-toggle time.
    ///
    /// # Errors
    ///
    /// Returns [`LoyaltyError::InsufficientPoints`] if the balance is below
    /// [`REDEEM_COST`].
    pub fn commit_redemption(&mut self) -> Result<(), LoyaltyError> {
        if self.points < REDEEM_COST {
            return Err(LoyaltyError::InsufficientPoints(self.points));
        }

        self.points -= REDEEM_COST;

        Ok(())
    }

    /// Earn one point per whole currency unit of the amount spent, applied
    /// once at order placement using the post-discount total. Returns the
    /// points earned.
    pub fn earn(&mut self, spent: &Money<'static, Currency>) -> u32 {
        let scale = 10_i64.checked_pow(spent.currency().exponent).unwrap_or(100);
        let major = spent.to_minor_units() / scale;
        let earned = u32::try_from(major).unwrap_or(0);

        self.points = self.points.saturating_add(earned);

        earned
    }
}

/// One row of the loyalty screen's rewards table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardTier {
    /// Points needed to unlock the reward.
    pub points: u32,

    /// Reward description.
    pub reward: &'static str,
}

impl RewardTier {
    /// Whether a balance unlocks this tier.
    pub fn unlocked(&self, points: u32) -> bool {
        points >= self.points
    }
}

/// Rewards advertised on the loyalty screen, cheapest first.
pub const REWARD_TIERS: [RewardTier; 5] = [
    RewardTier {
        points: 100,
        reward: "$5 off your next purchase",
    },
    RewardTier {
        points: 200,
        reward: "Free coffee of your choice",
    },
    RewardTier {
        points: 300,
        reward: "Free pastry of your choice",
    },
    RewardTier {
        points: 500,
        reward: "Free sandwich of your choice",
    },
    RewardTier {
        points: 1000,
        reward: "Free catering box (6 coffees + 6 pastries)",
    },
];
