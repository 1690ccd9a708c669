//! Navigation

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Alpha change per animation tick, for both fade phases.
const FADE_STEP: f32 = 0.1;

/// Errors raised by screen lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    /// The name matches no known screen. A coding mistake, not a
    /// user-triggered condition; callers should fail fast.
    #[error("unknown screen: {0}")]
    UnknownScreen(String),
}

/// The kiosk's screens. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Attract/landing screen with the wall clock footer.
    Welcome,

    /// Dine-in versus take-out selection.
    OrderType,

    /// Category-tabbed product listing.
    Menu,

    /// Drink customization. Selections do not attach to cart lines.
    Customize,

    /// Cart review with per-line quantity controls.
    Cart,

    /// Totals and payment capture.
    Checkout,

    /// Post-placement summary with order number.
    Confirmation,

    /// Loyalty card balance and reward tiers.
    Loyalty,

    /// Store information.
    About,
}

impl Screen {
    /// Every screen, in the order the kiosk registers them.
    pub const ALL: [Screen; 9] = [
        Screen::Welcome,
        Screen::OrderType,
        Screen::Menu,
        Screen::Customize,
        Screen::Cart,
        Screen::Checkout,
        Screen::Confirmation,
        Screen::Loyalty,
        Screen::About,
    ];

    /// The screen's registry name.
    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Welcome => "welcome",
            Screen::OrderType => "orderType",
            Screen::Menu => "menu",
            Screen::Customize => "customize",
            Screen::Cart => "cart",
            Screen::Checkout => "checkout",
            Screen::Confirmation => "confirmation",
            Screen::Loyalty => "loyalty",
            Screen::About => "about",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .into_iter()
            .find(|screen| screen.as_str() == s)
            .ok_or_else(|| NavigationError::UnknownScreen(s.to_owned()))
    }
}

/// Which half of the fade is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    FadingOut,
    FadingIn,
}

/// An in-flight fade toward a target screen.
#[derive(Debug, Clone, Copy)]
struct Transition {
    target: Screen,
    phase: Phase,
    alpha: f32,
}

/// Screen-selection state machine with a fire-and-forget fade.
///
/// `goto` never blocks and never queues: a request arriving mid-animation
/// replaces the in-flight transition, so the last request wins. The fade is
/// purely visual; the logical screen switches the moment the fade-out
/// completes, exactly as the kiosk's card layout flips.
#[derive(Debug)]
pub struct NavigationController {
    current: Screen,
    transition: Option<Transition>,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationController {
    /// Start at the welcome screen.
    pub fn new() -> Self {
        NavigationController {
            current: Screen::Welcome,
            transition: None,
        }
    }

    /// The currently visible screen.
    pub fn screen(&self) -> Screen {
        self.current
    }

    /// Request a transition. Unconditional; business-level gating (such as
    /// checkout requiring a non-empty cart) belongs to the order session.
    pub fn goto(&mut self, target: Screen) {
        self.transition = Some(Transition {
            target,
            phase: Phase::FadingOut,
            alpha: 1.0,
        });
    }

    /// Advance the fade by one animation tick. A no-op when idle.
    pub fn tick(&mut self) {
        let Some(transition) = self.transition.as_mut() else {
            return;
        };

        match transition.phase {
            Phase::FadingOut => {
                transition.alpha -= FADE_STEP;

                if transition.alpha <= 0.0 {
                    self.current = transition.target;
                    transition.phase = Phase::FadingIn;
                    transition.alpha = 0.0;
                }
            }
            Phase::FadingIn => {
                transition.alpha += FADE_STEP;

                if transition.alpha >= 1.0 {
                    self.transition = None;
                }
            }
        }
    }

    /// Current render opacity, 1.0 when no transition is running.
    pub fn opacity(&self) -> f32 {
        self.transition.map_or(1.0, |t| t.alpha)
    }

    /// Whether a fade is in flight.
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }
}
