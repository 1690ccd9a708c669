//! Brew Haven
//!
//! Headless core for a single-window coffee-shop point-of-sale kiosk: the
//! product catalog, cart ledger, checkout math, loyalty account, screen
//! navigation and the cosmetic feedback queue, with no rendering attached.

pub mod assets;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod clock;
pub mod feedback;
pub mod fixtures;
pub mod loyalty;
pub mod navigation;
pub mod prelude;
pub mod session;
