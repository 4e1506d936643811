//! The three recommendation slots shown after a spin.
//!
//! # Examples
//! ```
//! use platepick_core::Slot;
//!
//! assert_eq!(Slot::HiddenGem.as_str(), "hidden_gem");
//! assert_eq!("wildcard".parse::<Slot>(), Ok(Slot::Wildcard));
//! ```
use std::fmt;
use std::str::FromStr;

/// A recommendation slot, each backed by its own selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Slot {
    /// A safe bet from the top of the effective-score ranking.
    BestRated,
    /// A well-rated venue that few people have reviewed yet.
    HiddenGem,
    /// Anything else, nudged towards liked categories.
    Wildcard,
}

impl Slot {
    /// Every slot in display order.
    pub const ALL: [Self; 3] = [Self::BestRated, Self::HiddenGem, Self::Wildcard];

    /// Return the slot as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BestRated => "best_rated",
            Self::HiddenGem => "hidden_gem",
            Self::Wildcard => "wildcard",
        }
    }

    /// Human-readable title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BestRated => "Best Rated",
            Self::HiddenGem => "Hidden Gem",
            Self::Wildcard => "Wildcard",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "best_rated" | "best" => Ok(Self::BestRated),
            "hidden_gem" | "gem" => Ok(Self::HiddenGem),
            "wildcard" | "wild" => Ok(Self::Wildcard),
            _ => Err(format!("unknown slot '{s}'")),
        }
    }
}
