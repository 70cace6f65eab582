//! Engine invariant definitions and check functions.
//!
//! Each check inspects one guarantee of the unlock engine and reports a
//! pass/fail record with enough detail to diagnose a failure.

use std::collections::HashSet;
use std::fmt;

use tagguard_rules::Ruleset;
use tagguard_types::{ContentCategory, RatingLevel};

/// Result of checking a single invariant.
#[derive(Clone, Debug)]
pub struct InvariantResult {
    /// Invariant identifier (e.g., "unlock.monotone")
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Whether the invariant holds
    pub passed: bool,
    /// Description of what was checked
    pub description: String,
    /// Details (error message if failed)
    pub details: Option<String>,
}

impl InvariantResult {
    pub fn pass(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            passed: true,
            description: description.into(),
            details: None,
        }
    }

    pub fn fail(id: &str, name: &str, description: &str, details: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            passed: false,
            description: description.into(),
            details: Some(details.into()),
        }
    }
}

impl fmt::Display for InvariantResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "PASS" } else { "FAIL" };
        write!(
            f,
            "[{}] {} — {}: {}",
            status, self.id, self.name, self.description
        )?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

/// Raising the rating level never locks a previously unlocked category.
pub fn check_monotone_unlock(rules: &Ruleset) -> InvariantResult {
    const ID: &str = "unlock.monotone";
    const NAME: &str = "Monotone unlock";
    const DESC: &str = "each level's unlocked set contains every lower level's";

    for pair in RatingLevel::SCALE.windows(2) {
        let lower: HashSet<_> = rules.unlocked(pair[0]).into_iter().collect();
        let higher: HashSet<_> = rules.unlocked(pair[1]).into_iter().collect();
        if !lower.is_subset(&higher) {
            return InvariantResult::fail(
                ID,
                NAME,
                DESC,
                &format!("{} unlocks categories that {} does not", pair[0], pair[1]),
            );
        }
    }
    InvariantResult::pass(ID, NAME, DESC)
}

/// The top of the scale unlocks the entire catalog.
pub fn check_top_level_complete(rules: &Ruleset) -> InvariantResult {
    const ID: &str = "unlock.top-complete";
    const NAME: &str = "Top level completeness";
    const DESC: &str = "the most permissive level unlocks every catalog category";

    let top = rules.unlocked(RatingLevel::TOP);
    if top.len() == ContentCategory::CATALOG.len() {
        InvariantResult::pass(ID, NAME, DESC)
    } else {
        InvariantResult::fail(
            ID,
            NAME,
            DESC,
            &format!(
                "{} of {} categories unlocked at {}",
                top.len(),
                ContentCategory::CATALOG.len(),
                RatingLevel::TOP
            ),
        )
    }
}

/// Unlocked-set sizes match the configured thresholds, which holds only
/// when the unlock order repeats no category.
pub fn check_order_consistent(rules: &Ruleset) -> InvariantResult {
    const ID: &str = "order.consistent";
    const NAME: &str = "Unlock order consistency";
    const DESC: &str = "each level unlocks exactly its threshold's worth of categories";

    for level in RatingLevel::SCALE {
        let unlocked = rules.unlocked(level).len();
        let threshold = rules.threshold(level);
        if unlocked != threshold {
            return InvariantResult::fail(
                ID,
                NAME,
                DESC,
                &format!(
                    "{} unlocks {} categories but its threshold is {}",
                    level, unlocked, threshold
                ),
            );
        }
    }
    InvariantResult::pass(ID, NAME, DESC)
}

/// Normalization is idempotent over representative candidate sets.
pub fn check_normalize_idempotent(rules: &Ruleset) -> InvariantResult {
    const ID: &str = "normalize.idempotent";
    const NAME: &str = "Idempotent normalization";
    const DESC: &str = "normalizing an already-normalized set changes nothing";

    let mut candidates: Vec<Vec<ContentCategory>> = vec![
        Vec::new(),
        ContentCategory::CATALOG.to_vec(),
        ContentCategory::CATALOG.iter().copied().rev().collect(),
    ];
    candidates.extend(ContentCategory::CATALOG.into_iter().map(|c| vec![c]));

    for level in RatingLevel::SCALE {
        for candidate in &candidates {
            let once = rules.normalize(level, candidate);
            let twice = rules.normalize(level, &once);
            if once != twice {
                return InvariantResult::fail(
                    ID,
                    NAME,
                    DESC,
                    &format!("second normalization at {} altered the set", level),
                );
            }
        }
    }
    InvariantResult::pass(ID, NAME, DESC)
}

/// Blocked-set derivation inverts back to the allowed set it came from.
pub fn check_reconcile_round_trip(rules: &Ruleset) -> InvariantResult {
    const ID: &str = "reconcile.round-trip";
    const NAME: &str = "Allowed/blocked round trip";
    const DESC: &str = "derive_allowed(derive_blocked(allowed)) returns the allowed set";

    for level in RatingLevel::SCALE {
        let unlocked = rules.unlocked(level);
        let subsets: [Vec<ContentCategory>; 3] = [
            Vec::new(),
            unlocked.clone(),
            unlocked.iter().copied().step_by(2).collect(),
        ];
        for allowed in &subsets {
            let blocked = rules.derive_blocked(level, allowed);
            let restored = rules.derive_allowed(level, &blocked);
            let before: HashSet<_> = allowed.iter().copied().collect();
            let after: HashSet<_> = restored.into_iter().collect();
            if before != after {
                return InvariantResult::fail(
                    ID,
                    NAME,
                    DESC,
                    &format!("round trip at {} lost or invented categories", level),
                );
            }
        }
    }
    InvariantResult::pass(ID, NAME, DESC)
}

/// Unrecognized level identifiers unlock nothing through the boundary.
pub fn check_boundary_fails_closed(rules: &Ruleset) -> InvariantResult {
    const ID: &str = "boundary.fail-closed";
    const NAME: &str = "Fail-closed boundary";
    const DESC: &str = "unknown level identifiers behave as the most restrictive level";

    for bogus in ["UNKNOWN", "", "eighteen", "21"] {
        if !rules.unlocked_ids(bogus).is_empty() {
            return InvariantResult::fail(
                ID,
                NAME,
                DESC,
                &format!("identifier '{}' unlocked categories", bogus),
            );
        }
        if !rules.normalize_ids(bogus, &["LANGUAGE"]).is_empty() {
            return InvariantResult::fail(
                ID,
                NAME,
                DESC,
                &format!("identifier '{}' let a category through normalization", bogus),
            );
        }
    }
    InvariantResult::pass(ID, NAME, DESC)
}

/// Run every invariant check against a ruleset.
pub fn run_all(rules: &Ruleset) -> Vec<InvariantResult> {
    vec![
        check_monotone_unlock(rules),
        check_top_level_complete(rules),
        check_order_consistent(rules),
        check_normalize_idempotent(rules),
        check_reconcile_round_trip(rules),
        check_boundary_fails_closed(rules),
    ]
}

/// Whether every result in a suite run passed.
pub fn all_passed(results: &[InvariantResult]) -> bool {
    results.iter().all(|result| result.passed)
}
