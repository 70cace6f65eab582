//! Ruleset definition, validation and the pure unlock operations.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tagguard_types::{ContentCategory, RatingLevel};
use tracing::debug;

use crate::error::{Result, RulesetError};

/// Serialized form of a ruleset: the sensitivity ordering of the catalog
/// and the per-level unlock thresholds. Validated into a [`Ruleset`]
/// before use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesetDoc {
    pub unlock_order: Vec<ContentCategory>,
    pub thresholds: BTreeMap<RatingLevel, usize>,
}

/// A validated unlock configuration.
///
/// `unlock_order` is a permutation of the catalog from least to most
/// sensitive; `thresholds` maps each rating level to the length of the
/// unlock-order prefix that level makes selectable. Thresholds are
/// non-decreasing along the scale and the top level covers the whole
/// catalog. Both tables are immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruleset {
    unlock_order: Vec<ContentCategory>,
    thresholds: BTreeMap<RatingLevel, usize>,
}

impl Ruleset {
    /// Validate a configuration into a usable ruleset.
    pub fn new(
        unlock_order: Vec<ContentCategory>,
        thresholds: BTreeMap<RatingLevel, usize>,
    ) -> Result<Self> {
        let catalog = ContentCategory::CATALOG.len();

        let mut seen = HashSet::new();
        for category in &unlock_order {
            if !seen.insert(*category) {
                return Err(RulesetError::DuplicateInOrder {
                    category: *category,
                });
            }
        }
        for category in ContentCategory::CATALOG {
            if !seen.contains(&category) {
                return Err(RulesetError::MissingFromOrder { category });
            }
        }

        let mut previous = 0usize;
        for level in RatingLevel::SCALE {
            let threshold = *thresholds
                .get(&level)
                .ok_or(RulesetError::MissingLevel { level })?;
            if threshold > catalog {
                return Err(RulesetError::ThresholdOutOfRange {
                    level,
                    threshold,
                    catalog,
                });
            }
            if threshold < previous {
                return Err(RulesetError::NonMonotonic {
                    level,
                    threshold,
                    previous,
                });
            }
            previous = threshold;
        }
        if previous != catalog {
            return Err(RulesetError::TopLevelIncomplete {
                threshold: previous,
                catalog,
            });
        }

        debug!(
            levels = RatingLevel::SCALE.len(),
            catalog, "ruleset validated"
        );
        Ok(Self {
            unlock_order,
            thresholds,
        })
    }

    /// The built-in ruleset: catalog order doubles as sensitivity order,
    /// thresholds L:0, TEN:1, TWELVE:3, FOURTEEN:6, SIXTEEN:8, EIGHTEEN:12.
    pub fn standard() -> Self {
        let thresholds = BTreeMap::from([
            (RatingLevel::L, 0),
            (RatingLevel::Ten, 1),
            (RatingLevel::Twelve, 3),
            (RatingLevel::Fourteen, 6),
            (RatingLevel::Sixteen, 8),
            (RatingLevel::Eighteen, ContentCategory::CATALOG.len()),
        ]);
        // The standard table satisfies every construction invariant; the
        // conformance suite re-checks it.
        Self {
            unlock_order: ContentCategory::CATALOG.to_vec(),
            thresholds,
        }
    }

    /// Parse and validate a JSON ruleset document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: RulesetDoc = serde_json::from_str(json)?;
        Self::new(doc.unlock_order, doc.thresholds)
    }

    /// Serialize back to a JSON ruleset document.
    pub fn to_json_string(&self) -> Result<String> {
        let doc = RulesetDoc {
            unlock_order: self.unlock_order.clone(),
            thresholds: self.thresholds.clone(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Unlock count for a level. A level with no entry unlocks nothing.
    pub fn threshold(&self, level: RatingLevel) -> usize {
        self.thresholds.get(&level).copied().unwrap_or(0)
    }

    fn unlocked_set(&self, level: RatingLevel) -> HashSet<ContentCategory> {
        self.unlock_order
            .iter()
            .take(self.threshold(level))
            .copied()
            .collect()
    }

    /// Categories unlocked at `level`, in catalog display order.
    pub fn unlocked(&self, level: RatingLevel) -> Vec<ContentCategory> {
        let unlocked = self.unlocked_set(level);
        ContentCategory::CATALOG
            .into_iter()
            .filter(|category| unlocked.contains(category))
            .collect()
    }

    /// Whether a single category is selectable at `level`.
    pub fn is_unlocked(&self, level: RatingLevel, category: ContentCategory) -> bool {
        self.unlock_order
            .iter()
            .position(|c| *c == category)
            .is_some_and(|index| index < self.threshold(level))
    }

    /// Cap a candidate allowed set to the categories unlocked at `level`.
    ///
    /// Preserves the candidate's encounter order and drops duplicates.
    /// Idempotent: normalizing an already-normalized set is a no-op.
    pub fn normalize(
        &self,
        level: RatingLevel,
        candidate: &[ContentCategory],
    ) -> Vec<ContentCategory> {
        let unlocked = self.unlocked_set(level);
        let mut seen = HashSet::new();
        candidate
            .iter()
            .copied()
            .filter(|category| unlocked.contains(category) && seen.insert(*category))
            .collect()
    }

    /// Explicit blocked set for an allowed-first record: the full catalog
    /// minus the allowed categories that are actually unlocked at `level`.
    /// Locked categories are always part of the result.
    pub fn derive_blocked(
        &self,
        level: RatingLevel,
        allowed: &[ContentCategory],
    ) -> Vec<ContentCategory> {
        let kept: HashSet<ContentCategory> = self.normalize(level, allowed).into_iter().collect();
        ContentCategory::CATALOG
            .into_iter()
            .filter(|category| !kept.contains(category))
            .collect()
    }

    /// Allowed set for a blocked-first record: the categories unlocked at
    /// `level` minus the blocked ones. Exact inverse of
    /// [`Ruleset::derive_blocked`] for any allowed set within the unlocked
    /// set.
    pub fn derive_allowed(
        &self,
        level: RatingLevel,
        blocked: &[ContentCategory],
    ) -> Vec<ContentCategory> {
        let blocked: HashSet<ContentCategory> = blocked.iter().copied().collect();
        self.unlocked(level)
            .into_iter()
            .filter(|category| !blocked.contains(category))
            .collect()
    }

    /// The least permissive level at which `category` is selectable.
    pub fn min_level_for(&self, category: ContentCategory) -> RatingLevel {
        RatingLevel::SCALE
            .into_iter()
            .find(|level| self.is_unlocked(*level, category))
            .unwrap_or(RatingLevel::TOP)
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagguard_types::ContentCategory::*;
    use tagguard_types::RatingLevel::*;

    #[test]
    fn standard_table_unlocks_expected_prefix() {
        let rules = Ruleset::standard();
        assert_eq!(rules.unlocked(L), vec![]);
        assert_eq!(rules.unlocked(Ten), vec![Language]);
        assert_eq!(rules.unlocked(Twelve), vec![Language, Crime, Psychological]);
        assert_eq!(
            rules.unlocked(Eighteen),
            ContentCategory::CATALOG.to_vec()
        );
    }

    #[test]
    fn unlock_is_monotone_along_the_scale() {
        let rules = Ruleset::standard();
        for pair in RatingLevel::SCALE.windows(2) {
            let lower: HashSet<_> = rules.unlocked(pair[0]).into_iter().collect();
            let higher: HashSet<_> = rules.unlocked(pair[1]).into_iter().collect();
            assert!(
                lower.is_subset(&higher),
                "{} unlocks more than {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn normalize_drops_categories_above_the_level() {
        let rules = Ruleset::standard();
        assert_eq!(
            rules.normalize(Twelve, &[Language, Violence, Sexual]),
            vec![Language]
        );
    }

    #[test]
    fn normalize_preserves_candidate_order_and_dedupes() {
        let rules = Ruleset::standard();
        assert_eq!(
            rules.normalize(Twelve, &[Psychological, Language, Psychological, Crime]),
            vec![Psychological, Language, Crime]
        );
    }

    #[test]
    fn normalize_is_idempotent() {
        let rules = Ruleset::standard();
        for level in RatingLevel::SCALE {
            let once = rules.normalize(level, &ContentCategory::CATALOG);
            assert_eq!(rules.normalize(level, &once), once);
        }
    }

    #[test]
    fn derive_blocked_includes_everything_outside_the_allowed_set() {
        let rules = Ruleset::standard();
        let blocked = rules.derive_blocked(Twelve, &[Language]);
        let expected: Vec<_> = ContentCategory::CATALOG
            .into_iter()
            .filter(|c| *c != Language)
            .collect();
        assert_eq!(blocked, expected);
    }

    #[test]
    fn blocked_and_allowed_partition_the_catalog() {
        let rules = Ruleset::standard();
        for level in RatingLevel::SCALE {
            let allowed = rules.unlocked(level);
            let blocked = rules.derive_blocked(level, &allowed);
            assert_eq!(allowed.len() + blocked.len(), ContentCategory::CATALOG.len());
            let overlap: Vec<_> = allowed.iter().filter(|c| blocked.contains(c)).collect();
            assert!(overlap.is_empty());
        }
    }

    #[test]
    fn blocked_allowed_round_trip() {
        let rules = Ruleset::standard();
        for level in RatingLevel::SCALE {
            let unlocked = rules.unlocked(level);
            // Every other unlocked category, as a representative subset.
            let allowed: Vec<_> = unlocked.iter().copied().step_by(2).collect();
            let blocked = rules.derive_blocked(level, &allowed);
            assert_eq!(rules.derive_allowed(level, &blocked), allowed);
        }
    }

    #[test]
    fn min_level_for_matches_the_unlock_order() {
        let rules = Ruleset::standard();
        assert_eq!(rules.min_level_for(Language), Ten);
        assert_eq!(rules.min_level_for(Crime), Twelve);
        assert_eq!(rules.min_level_for(Violence), Fourteen);
        assert_eq!(rules.min_level_for(Discrimination), Eighteen);
    }

    #[test]
    fn construction_rejects_duplicate_in_order() {
        let mut order = ContentCategory::CATALOG.to_vec();
        order[1] = Language;
        let result = Ruleset::new(order, Ruleset::standard().thresholds.clone());
        assert!(matches!(
            result,
            Err(RulesetError::DuplicateInOrder { category: Language })
        ));
    }

    #[test]
    fn construction_rejects_missing_level() {
        let mut thresholds = Ruleset::standard().thresholds.clone();
        thresholds.remove(&Fourteen);
        let result = Ruleset::new(ContentCategory::CATALOG.to_vec(), thresholds);
        assert!(matches!(
            result,
            Err(RulesetError::MissingLevel { level: Fourteen })
        ));
    }

    #[test]
    fn construction_rejects_decreasing_thresholds() {
        let mut thresholds = Ruleset::standard().thresholds.clone();
        thresholds.insert(Sixteen, 2);
        let result = Ruleset::new(ContentCategory::CATALOG.to_vec(), thresholds);
        assert!(matches!(result, Err(RulesetError::NonMonotonic { .. })));
    }

    #[test]
    fn construction_rejects_incomplete_top_level() {
        let mut thresholds = Ruleset::standard().thresholds.clone();
        thresholds.insert(Eighteen, 11);
        let result = Ruleset::new(ContentCategory::CATALOG.to_vec(), thresholds);
        assert!(matches!(
            result,
            Err(RulesetError::TopLevelIncomplete { threshold: 11, .. })
        ));
    }

    #[test]
    fn json_document_round_trips() {
        let rules = Ruleset::standard();
        let json = rules.to_json_string().unwrap();
        let back = Ruleset::from_json_str(&json).unwrap();
        assert_eq!(back, rules);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            Ruleset::from_json_str("{ not json"),
            Err(RulesetError::Malformed(_))
        ));
    }

    #[test]
    fn json_with_unknown_category_is_rejected() {
        let json = r#"{"unlock_order": ["LANGUAGE", "POLITICS"], "thresholds": {"L": 0}}"#;
        assert!(matches!(
            Ruleset::from_json_str(json),
            Err(RulesetError::Malformed(_))
        ));
    }
}
