//! The age-rating scale.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseLevelError;

/// Age-rating level, ordered from the all-ages rating to the adults-only
/// rating. Higher levels unlock more content categories; the declaration
/// order is the scale order and `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RatingLevel {
    /// All-ages rating; no sensitive category is selectable.
    L,
    Ten,
    Twelve,
    Fourteen,
    Sixteen,
    Eighteen,
}

impl RatingLevel {
    /// The full scale in ascending order.
    pub const SCALE: [RatingLevel; 6] = [
        RatingLevel::L,
        RatingLevel::Ten,
        RatingLevel::Twelve,
        RatingLevel::Fourteen,
        RatingLevel::Sixteen,
        RatingLevel::Eighteen,
    ];

    /// The most permissive level on the scale.
    pub const TOP: RatingLevel = RatingLevel::Eighteen;

    /// Canonical wire identifier.
    pub fn identifier(self) -> &'static str {
        match self {
            RatingLevel::L => "L",
            RatingLevel::Ten => "TEN",
            RatingLevel::Twelve => "TWELVE",
            RatingLevel::Fourteen => "FOURTEEN",
            RatingLevel::Sixteen => "SIXTEEN",
            RatingLevel::Eighteen => "EIGHTEEN",
        }
    }
}

impl fmt::Display for RatingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for RatingLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RatingLevel::SCALE
            .into_iter()
            .find(|level| level.identifier() == s)
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}
