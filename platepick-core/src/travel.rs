//! Convert a travel-time budget into a search radius.

use std::fmt;

/// Assumed average driving speed.
pub const AVERAGE_SPEED_KMH: u32 = 30;
/// Distance covered per minute at [`AVERAGE_SPEED_KMH`].
pub const METERS_PER_MINUTE: u32 = 500;
/// Shortest budget accepted.
pub const MIN_TRAVEL_MINUTES: u32 = 5;
/// Longest budget accepted.
pub const MAX_TRAVEL_MINUTES: u32 = 60;
/// Budget used when none is configured.
pub const DEFAULT_TRAVEL_MINUTES: u32 = 15;

/// How far the user is willing to travel, in minutes.
///
/// # Examples
/// ```
/// use platepick_core::TravelBudget;
///
/// let budget = TravelBudget::from_minutes(20);
/// assert_eq!(budget.radius_km(), 10.0);
/// assert_eq!(TravelBudget::from_minutes(500).minutes(), 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u32", into = "u32"))]
pub struct TravelBudget {
    minutes: u32,
}

impl TravelBudget {
    /// Build a budget, clamping into `5..=60` minutes.
    #[must_use]
    pub fn from_minutes(minutes: u32) -> Self {
        Self {
            minutes: minutes.clamp(MIN_TRAVEL_MINUTES, MAX_TRAVEL_MINUTES),
        }
    }

    /// Budget in minutes.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.minutes
    }

    /// Reachable radius in kilometres.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "radius is a fractional distance"
    )]
    pub fn radius_km(self) -> f64 {
        f64::from(self.minutes) * f64::from(AVERAGE_SPEED_KMH) / 60.0
    }

    /// Reachable radius in metres, as venue search APIs expect.
    #[must_use]
    pub const fn radius_meters(self) -> u32 {
        self.minutes * METERS_PER_MINUTE
    }
}

impl Default for TravelBudget {
    fn default() -> Self {
        Self {
            minutes: DEFAULT_TRAVEL_MINUTES,
        }
    }
}

impl From<u32> for TravelBudget {
    fn from(minutes: u32) -> Self {
        Self::from_minutes(minutes)
    }
}

impl From<TravelBudget> for u32 {
    fn from(budget: TravelBudget) -> Self {
        budget.minutes
    }
}

impl fmt::Display for TravelBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 5)]
    #[case(5, 5)]
    #[case(35, 35)]
    #[case(60, 60)]
    #[case(61, 60)]
    fn minutes_are_clamped(#[case] requested: u32, #[case] expected: u32) {
        assert_eq!(TravelBudget::from_minutes(requested).minutes(), expected);
    }

    #[rstest]
    #[case(5, 2_500)]
    #[case(15, 7_500)]
    #[case(60, 30_000)]
    fn radius_scales_with_budget(#[case] minutes: u32, #[case] metres: u32) {
        let budget = TravelBudget::from_minutes(minutes);
        assert_eq!(budget.radius_meters(), metres);
        assert!((budget.radius_km() * 1000.0 - f64::from(metres)).abs() < 1e-9);
    }

    #[rstest]
    fn default_is_fifteen_minutes() {
        assert_eq!(TravelBudget::default().minutes(), 15);
        assert_eq!(TravelBudget::default().to_string(), "15 min");
    }
}
