//! Clock

use chrono::Local;

/// Read-only time-of-day source for the welcome screen footer.
pub trait Clock {
    /// Current time of day, formatted for display.
    fn time_of_day(&self) -> String;
}

/// System wall clock in the kiosk's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct WallClock;

impl Clock for WallClock {
    fn time_of_day(&self) -> String {
        Local::now().format("%-I:%M %p").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(&'static str);

    impl Clock for FixedClock {
        fn time_of_day(&self) -> String {
            self.0.to_owned()
        }
    }

    #[test]
    fn wall_clock_formats_twelve_hour_time() {
        let label = WallClock.time_of_day();

        assert!(
            label.ends_with("AM") || label.ends_with("PM"),
            "unexpected label: {label}"
        );
    }

    #[test]
    fn views_accept_any_clock() {
        let clock = FixedClock("9:41 AM");

        assert_eq!(clock.time_of_day(), "9:41 AM");
    }
}
