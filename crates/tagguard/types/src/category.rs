//! The content category catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseCategoryError;

/// Sensitive-content classification tag. The catalog is closed; the
/// declaration order is the display order and has no bearing on how
/// sensitive a category is considered (that ordering belongs to the
/// ruleset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentCategory {
    Language,
    Crime,
    Psychological,
    Alcohol,
    Horror,
    Violence,
    Gambling,
    Drugs,
    Sexual,
    Nudity,
    Gore,
    Discrimination,
}

impl ContentCategory {
    /// The full catalog in display order.
    pub const CATALOG: [ContentCategory; 12] = [
        ContentCategory::Language,
        ContentCategory::Crime,
        ContentCategory::Psychological,
        ContentCategory::Alcohol,
        ContentCategory::Horror,
        ContentCategory::Violence,
        ContentCategory::Gambling,
        ContentCategory::Drugs,
        ContentCategory::Sexual,
        ContentCategory::Nudity,
        ContentCategory::Gore,
        ContentCategory::Discrimination,
    ];

    /// Canonical wire identifier.
    pub fn identifier(self) -> &'static str {
        match self {
            ContentCategory::Language => "LANGUAGE",
            ContentCategory::Crime => "CRIME",
            ContentCategory::Psychological => "PSYCHOLOGICAL",
            ContentCategory::Alcohol => "ALCOHOL",
            ContentCategory::Horror => "HORROR",
            ContentCategory::Violence => "VIOLENCE",
            ContentCategory::Gambling => "GAMBLING",
            ContentCategory::Drugs => "DRUGS",
            ContentCategory::Sexual => "SEXUAL",
            ContentCategory::Nudity => "NUDITY",
            ContentCategory::Gore => "GORE",
            ContentCategory::Discrimination => "DISCRIMINATION",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for ContentCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentCategory::CATALOG
            .into_iter()
            .find(|category| category.identifier() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
