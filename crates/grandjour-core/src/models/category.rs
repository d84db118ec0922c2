//! Activity categories and their scheduling policies.
//!
//! A category is the closed semantic tag attached to every activity. It
//! drives two scheduling decisions:
//!
//! - **Ordering**: the precedence table fixes the relative order in which
//!   freshly generated activities are laid out on the day
//!   ([`Category::precedence`]).
//! - **Buffers**: the minimum idle gap to leave after an activity before
//!   the next one may start ([`Category::buffer_after_minutes`]).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of activity categories.
///
/// The second-block variants (`PreparationSecond`, `CeremonySecond`,
/// travel legs 3 and 4) only appear on dual-ceremony days; on a
/// single-ceremony day they are simply never generated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "String", try_from = "String")]
pub enum Category {
    /// Getting ready: hair, makeup, dressing
    Preparation,
    /// Second getting-ready block between two ceremonies
    PreparationSecond,
    /// The (first) ceremony, always a highlight and usually the anchor
    Ceremony,
    /// Second ceremony of a dual-ceremony day
    CeremonySecond,
    /// A door-to-door travel leg (1 to 4)
    Travel(u8),
    /// Couple/group photo session
    Photos,
    /// Cocktail reception
    Cocktail,
    /// Seated meal or dinner
    Meal,
    /// Evening party
    EveningParty,
    /// Ad-hoc user or AI-suggested task
    Custom,
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preparation" => Ok(Category::Preparation),
            "preparation2" => Ok(Category::PreparationSecond),
            "ceremony" => Ok(Category::Ceremony),
            "ceremony2" => Ok(Category::CeremonySecond),
            "travel1" => Ok(Category::Travel(1)),
            "travel2" => Ok(Category::Travel(2)),
            "travel3" => Ok(Category::Travel(3)),
            "travel4" => Ok(Category::Travel(4)),
            "photos" => Ok(Category::Photos),
            "cocktail" => Ok(Category::Cocktail),
            "meal" => Ok(Category::Meal),
            "evening_party" | "evening-party" => Ok(Category::EveningParty),
            "custom" => Ok(Category::Custom),
            _ => Err(format!("Invalid category: {s}")),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Category {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Preparation => "preparation",
            Category::PreparationSecond => "preparation2",
            Category::Ceremony => "ceremony",
            Category::CeremonySecond => "ceremony2",
            Category::Travel(leg) => match leg {
                2 => "travel2",
                3 => "travel3",
                4 => "travel4",
                _ => "travel1",
            },
            Category::Photos => "photos",
            Category::Cocktail => "cocktail",
            Category::Meal => "meal",
            Category::EveningParty => "evening_party",
            Category::Custom => "custom",
        }
    }

    /// Human-readable label for display contexts.
    pub fn label(&self) -> String {
        match self {
            Category::Preparation => "Preparation".to_string(),
            Category::PreparationSecond => "Second preparation".to_string(),
            Category::Ceremony => "Ceremony".to_string(),
            Category::CeremonySecond => "Second ceremony".to_string(),
            Category::Travel(leg) => format!("Travel (leg {leg})"),
            Category::Photos => "Photos".to_string(),
            Category::Cocktail => "Cocktail".to_string(),
            Category::Meal => "Meal".to_string(),
            Category::EveningParty => "Evening party".to_string(),
            Category::Custom => "Custom".to_string(),
        }
    }

    /// Minimum idle gap in minutes to insert after an activity of this
    /// category before the next activity may start.
    ///
    /// Ceremonies get the largest settle/transition buffer. Travel legs
    /// chain back-to-back: their duration already represents door-to-door
    /// time.
    pub fn buffer_after_minutes(&self) -> i64 {
        match self {
            Category::Preparation | Category::PreparationSecond => 5,
            Category::Ceremony | Category::CeremonySecond => 15,
            Category::Travel(_) => 0,
            Category::Photos => 10,
            Category::Cocktail => 5,
            Category::Meal => 10,
            Category::EveningParty => 5,
            Category::Custom => 5,
        }
    }

    /// Rank of this category in the day-of precedence table.
    ///
    /// The table interleaves the second preparation/travel/ceremony block
    /// between the two ceremonies of a dual-ceremony day. On a
    /// single-ceremony day the second-block categories are absent and the
    /// table collapses to
    /// `preparation -> travel1 -> ceremony -> travel2 -> photos ->
    /// cocktail -> meal -> evening party`, so a single ranking serves both
    /// modes.
    pub fn precedence(&self) -> u8 {
        match self {
            Category::Preparation => 0,
            Category::Travel(1) => 1,
            Category::Ceremony => 2,
            Category::Travel(2) => 3,
            Category::Travel(3) => 4,
            Category::PreparationSecond => 5,
            Category::Travel(4) => 6,
            Category::Travel(_) => 6,
            Category::CeremonySecond => 7,
            Category::Photos => 8,
            Category::Cocktail => 9,
            Category::Meal => 10,
            Category::EveningParty => 11,
            Category::Custom => 12,
        }
    }

    /// Whether this category is a ceremony (first or second).
    ///
    /// Ceremonies are timing anchors, are always highlighted, and carry
    /// the largest buffer.
    pub fn is_ceremony(&self) -> bool {
        matches!(self, Category::Ceremony | Category::CeremonySecond)
    }
}
