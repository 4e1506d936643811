//! Dining categories that narrow the candidate pool.
//!
//! Each category maps to a fixed set of venue type tags. Matching is a
//! case-insensitive intersection between those tags and the venue's own.

use std::fmt;
use std::str::FromStr;

use crate::Venue;

/// Venue types requested from the venue source for every search.
pub const DINING_TYPES: [&str; 4] = ["restaurant", "cafe", "bakery", "meal_takeaway"];

/// A user-facing dining category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Category {
    /// Coffee, tea and bakeries.
    Cafe,
    /// Burgers and takeaway.
    FastFood,
    /// Pizza.
    Pizza,
    /// Japanese, Chinese, Thai and friends.
    Asian,
    /// Middle Eastern and Mediterranean.
    Arabian,
    /// Mexican and tacos.
    Mexican,
    /// Italian.
    Italian,
    /// Vegan, vegetarian and salads.
    Healthy,
    /// Ice cream, desserts and bakeries.
    Dessert,
}

impl Category {
    /// Every category in menu order.
    pub const ALL: [Self; 9] = [
        Self::Cafe,
        Self::FastFood,
        Self::Pizza,
        Self::Asian,
        Self::Arabian,
        Self::Mexican,
        Self::Italian,
        Self::Healthy,
        Self::Dessert,
    ];

    /// Stable identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cafe => "cafe",
            Self::FastFood => "fast_food",
            Self::Pizza => "pizza",
            Self::Asian => "asian",
            Self::Arabian => "arabian",
            Self::Mexican => "mexican",
            Self::Italian => "italian",
            Self::Healthy => "healthy",
            Self::Dessert => "dessert",
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cafe => "Coffee & Tea",
            Self::FastFood => "Fast Food",
            Self::Pizza => "Pizza",
            Self::Asian => "Asian",
            Self::Arabian => "Arabian",
            Self::Mexican => "Mexican",
            Self::Italian => "Italian",
            Self::Healthy => "Healthy",
            Self::Dessert => "Dessert",
        }
    }

    /// Venue type tags belonging to this category.
    #[must_use]
    pub const fn tags(self) -> &'static [&'static str] {
        match self {
            Self::Cafe => &["cafe", "coffee_shop", "bakery"],
            Self::FastFood => &[
                "fast_food_restaurant",
                "meal_takeaway",
                "hamburger_restaurant",
            ],
            Self::Pizza => &["pizza_restaurant"],
            Self::Asian => &[
                "japanese_restaurant",
                "chinese_restaurant",
                "thai_restaurant",
                "sushi_restaurant",
                "ramen_restaurant",
            ],
            Self::Arabian => &[
                "middle_eastern_restaurant",
                "lebanese_restaurant",
                "mediterranean_restaurant",
            ],
            Self::Mexican => &["mexican_restaurant", "taco_restaurant"],
            Self::Italian => &["italian_restaurant"],
            Self::Healthy => &["vegan_restaurant", "vegetarian_restaurant", "salad_shop"],
            Self::Dessert => &["ice_cream_shop", "dessert_shop", "bakery"],
        }
    }

    /// Whether `venue` carries any of this category's tags.
    ///
    /// # Examples
    /// ```
    /// use platepick_core::{Category, Venue};
    ///
    /// let venue = Venue::new("p", "Pizzeria").with_tags(["Pizza_Restaurant"]);
    /// assert!(Category::Pizza.matches(&venue));
    /// assert!(!Category::Cafe.matches(&venue));
    /// ```
    #[must_use]
    pub fn matches(self, venue: &Venue) -> bool {
        venue
            .tags
            .iter()
            .any(|tag| self.tags().iter().any(|own| own.eq_ignore_ascii_case(tag)))
    }
}

/// Whether `venue` matches a category selection; an empty selection
/// matches everything.
#[must_use]
pub fn matches_any(categories: &[Category], venue: &Venue) -> bool {
    categories.is_empty() || categories.iter().any(|category| category.matches(venue))
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == needle)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}
