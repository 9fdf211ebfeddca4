use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::quantity::time::Hours;

const HOURS_PER_DAY: f64 = 24.0;

/// Hour of day on the 24-hour dial.
///
/// A point in the daily cycle, not a duration: arithmetic wraps around
/// midnight. The journey clock is kept separately as linear [`Hours`] since
/// departure; this type only serves tariff and operating-hour lookups.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClockTime(f64);

impl ClockTime {
    pub const MIDNIGHT: Self = Self(0.0);

    /// Construct from an hour of day, which must already be in `[0, 24)`.
    ///
    /// Range enforcement happens in scenario validation, so that an
    /// out-of-range configuration value surfaces as a configuration error
    /// rather than being silently wrapped.
    pub const fn new(hour: f64) -> Self {
        Self(hour)
    }

    pub const fn hour(self) -> f64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0.is_finite() && (0.0..HOURS_PER_DAY).contains(&self.0)
    }

    /// The clock reading after the given number of linear hours.
    pub fn advanced_by(self, elapsed: Hours) -> Self {
        Self((self.0 + elapsed.0).rem_euclid(HOURS_PER_DAY))
    }

    /// Hours on the dial from `self` forward to `later`, wrapping midnight.
    ///
    /// Zero when the two readings coincide.
    pub fn until(self, later: Self) -> Hours {
        Hours::from((later.0 - self.0).rem_euclid(HOURS_PER_DAY))
    }
}

impl Display for ClockTime {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let minutes = (self.0.fract() * 60.0).round();
        // Rounding may carry over into the next hour:
        let (hours, minutes) = if minutes >= 60.0 {
            (self.0.trunc() + 1.0, 0.0)
        } else {
            (self.0.trunc(), minutes)
        };
        write!(f, "{:02}:{:02}", hours.rem_euclid(HOURS_PER_DAY) as u32, minutes as u32)
    }
}

/// Half-open daily window `[start, end)` that may wrap across midnight.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClockWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl ClockWindow {
    pub const fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// `start == end` denotes the empty window, never the full day.
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    pub fn contains(self, instant: ClockTime) -> bool {
        if self.start <= self.end {
            self.start <= instant && instant < self.end
        } else {
            // Wraps midnight, e.g. 22:00..06:00:
            instant >= self.start || instant < self.end
        }
    }

    /// Wait from `instant` until the window opens; zero when already inside.
    pub fn wait_until_open(self, instant: ClockTime) -> Hours {
        if self.contains(instant) { Hours::ZERO } else { instant.until(self.start) }
    }

    /// Dial hours left from `instant` (assumed inside) until the window closes.
    pub fn remaining(self, instant: ClockTime) -> Hours {
        instant.until(self.end)
    }
}

impl Display for ClockWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}–{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_advanced_by_wraps_midnight() {
        let clock = ClockTime::new(22.0).advanced_by(Hours::from(4.5));
        assert_abs_diff_eq!(clock.hour(), 2.5);
    }

    #[test]
    fn test_until_wraps_midnight() {
        assert_abs_diff_eq!(ClockTime::new(23.0).until(ClockTime::new(1.0)).0, 2.0);
        assert_abs_diff_eq!(ClockTime::new(6.0).until(ClockTime::new(8.0)).0, 2.0);
        assert_abs_diff_eq!(ClockTime::new(8.0).until(ClockTime::new(8.0)).0, 0.0);
    }

    #[test]
    fn test_plain_window() {
        let window = ClockWindow::new(ClockTime::new(8.0), ClockTime::new(18.0));
        assert!(window.contains(ClockTime::new(8.0)));
        assert!(window.contains(ClockTime::new(17.99)));
        assert!(!window.contains(ClockTime::new(18.0)));
        assert!(!window.contains(ClockTime::new(6.0)));
    }

    #[test]
    fn test_wrapping_window() {
        let window = ClockWindow::new(ClockTime::new(22.0), ClockTime::new(6.0));
        assert!(window.contains(ClockTime::new(23.0)));
        assert!(window.contains(ClockTime::new(2.0)));
        assert!(!window.contains(ClockTime::new(12.0)));
    }

    #[test]
    fn test_empty_window_contains_nothing() {
        let window = ClockWindow::new(ClockTime::new(9.0), ClockTime::new(9.0));
        assert!(!window.contains(ClockTime::new(9.0)));
        assert!(!window.contains(ClockTime::new(12.0)));
    }

    #[test]
    fn test_wait_until_open() {
        let window = ClockWindow::new(ClockTime::new(8.0), ClockTime::new(18.0));
        assert_abs_diff_eq!(window.wait_until_open(ClockTime::new(6.0)).0, 2.0);
        assert_abs_diff_eq!(window.wait_until_open(ClockTime::new(9.0)).0, 0.0);
        // Arriving after closing waits for the next day's opening:
        assert_abs_diff_eq!(window.wait_until_open(ClockTime::new(20.0)).0, 12.0);
    }

    #[test]
    fn test_remaining() {
        let window = ClockWindow::new(ClockTime::new(22.0), ClockTime::new(6.0));
        assert_abs_diff_eq!(window.remaining(ClockTime::new(23.0)).0, 7.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(ClockTime::new(9.25).to_string(), "09:15");
        assert_eq!(ClockTime::new(23.999).to_string(), "00:00");
    }
}
