//! Brew Haven prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    assets::{AssetError, AssetStore, DirectoryStore, load_or_placeholder, placeholder_image},
    cart::{Cart, CartChange, CartError, CartLine},
    catalog::{Catalog, CatalogError, Category, Product, ProductKey},
    checkout::{CheckoutError, CheckoutTotals, compute},
    clock::{Clock, WallClock},
    feedback::{FeedbackQueue, FloatingMarker, Polarity},
    fixtures::{FixtureError, MenuFixture, brew_haven},
    loyalty::{LoyaltyAccount, LoyaltyError, REWARD_TIERS, RewardTier},
    navigation::{NavigationController, NavigationError, Screen},
    session::{OrderSession, OrderType, PlacedOrder, SessionError, Stage},
};
