//! Identifier-level operations for the persistence boundary.
//!
//! Persisted records carry raw level and category identifiers. These
//! helpers parse them fail-closed: an unrecognized rating level behaves as
//! if it unlocked nothing, and unrecognized category identifiers are
//! dropped without error. Validation-at-the-boundary belongs to whoever
//! deserializes the record; this layer only guarantees that bad input can
//! never widen what is unlocked.

use tagguard_types::{ContentCategory, RatingLevel};
use tracing::debug;

use crate::ruleset::Ruleset;

impl Ruleset {
    /// Unlocked category identifiers for a raw level identifier, in
    /// catalog order. Unknown levels unlock nothing.
    pub fn unlocked_ids(&self, level: &str) -> Vec<&'static str> {
        match parse_level_closed(level) {
            Some(level) => self
                .unlocked(level)
                .into_iter()
                .map(ContentCategory::identifier)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Normalize a persisted allowed list of raw identifiers. Unknown
    /// levels fail closed to an empty result; unknown category identifiers
    /// are dropped.
    pub fn normalize_ids<S: AsRef<str>>(&self, level: &str, ids: &[S]) -> Vec<&'static str> {
        let Some(level) = parse_level_closed(level) else {
            return Vec::new();
        };
        let candidate = parse_categories(ids);
        self.normalize(level, &candidate)
            .into_iter()
            .map(ContentCategory::identifier)
            .collect()
    }

    /// Blocked-set identifiers for an allowed-first record. An unknown
    /// level blocks the entire catalog.
    pub fn blocked_ids<S: AsRef<str>>(&self, level: &str, allowed: &[S]) -> Vec<&'static str> {
        match parse_level_closed(level) {
            Some(level) => {
                let allowed = parse_categories(allowed);
                self.derive_blocked(level, &allowed)
                    .into_iter()
                    .map(ContentCategory::identifier)
                    .collect()
            }
            None => ContentCategory::CATALOG
                .into_iter()
                .map(ContentCategory::identifier)
                .collect(),
        }
    }

    /// Allowed-set identifiers for a blocked-first record. An unknown
    /// level allows nothing.
    pub fn allowed_ids<S: AsRef<str>>(&self, level: &str, blocked: &[S]) -> Vec<&'static str> {
        let Some(level) = parse_level_closed(level) else {
            return Vec::new();
        };
        let blocked = parse_categories(blocked);
        self.derive_allowed(level, &blocked)
            .into_iter()
            .map(ContentCategory::identifier)
            .collect()
    }
}

fn parse_level_closed(identifier: &str) -> Option<RatingLevel> {
    match identifier.parse::<RatingLevel>() {
        Ok(level) => Some(level),
        Err(_) => {
            debug!(identifier, "unrecognized rating level, failing closed");
            None
        }
    }
}

fn parse_categories<S: AsRef<str>>(ids: &[S]) -> Vec<ContentCategory> {
    let mut parsed = Vec::with_capacity(ids.len());
    let mut dropped = 0usize;
    for id in ids {
        match id.as_ref().parse::<ContentCategory>() {
            Ok(category) => parsed.push(category),
            Err(_) => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(dropped, "dropped unrecognized category identifiers");
    }
    parsed
}
