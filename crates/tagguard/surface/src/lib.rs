//! Tagguard Surface
//!
//! Binds the pure ruleset operations to a live selection: a rating-level
//! control plus one toggle per catalog category. The surface owns the
//! current allowed set, re-normalizes it synchronously whenever the level
//! changes, and notifies its sink at most once per effective change so a
//! reactive host never loops on its own updates.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tagguard_rules::Ruleset;
use tagguard_types::{ContentCategory, RatingLevel};
use tracing::debug;

/// Receiver for allowed-set updates.
///
/// Implemented for any `FnMut(&[ContentCategory])` closure; hosts with a
/// richer update path implement the trait directly.
pub trait SelectionSink {
    /// Called with the full allowed set after each effective change.
    fn allowed_changed(&mut self, allowed: &[ContentCategory]);
}

impl<F> SelectionSink for F
where
    F: FnMut(&[ContentCategory]),
{
    fn allowed_changed(&mut self, allowed: &[ContentCategory]) {
        self(allowed)
    }
}

/// Render state for one catalog entry.
///
/// `selected` implies `unlocked`; a category that is allowed in a stale
/// record but locked at the current level renders locked and unselected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySlot {
    pub category: ContentCategory,
    pub unlocked: bool,
    pub selected: bool,
}

/// Live selection state for one subject (a user preference pane or a
/// character authoring form).
pub struct SelectionSurface<S: SelectionSink> {
    ruleset: Arc<Ruleset>,
    level: RatingLevel,
    allowed: Vec<ContentCategory>,
    sink: S,
}

impl<S: SelectionSink> SelectionSurface<S> {
    /// Bind a surface to a ruleset, an initial level and a persisted
    /// allowed list. The persisted list is normalized immediately but
    /// silently: initialization is not a change event.
    pub fn new(
        ruleset: Arc<Ruleset>,
        level: RatingLevel,
        persisted: &[ContentCategory],
        sink: S,
    ) -> Self {
        let allowed = ruleset.normalize(level, persisted);
        Self {
            ruleset,
            level,
            allowed,
            sink,
        }
    }

    /// Current rating level.
    pub fn level(&self) -> RatingLevel {
        self.level
    }

    /// Current allowed set, in selection order.
    pub fn allowed(&self) -> &[ContentCategory] {
        &self.allowed
    }

    /// Move the surface to a new rating level and reconcile the allowed
    /// set in the same call. The sink is notified exactly once if the set
    /// changed by value, and not at all otherwise.
    pub fn set_level(&mut self, level: RatingLevel) {
        self.level = level;
        let next = self.ruleset.normalize(level, &self.allowed);
        if same_set(&next, &self.allowed) {
            return;
        }
        debug!(
            level = %level,
            dropped = self.allowed.len() - next.len(),
            "reconciled allowed set after rating change"
        );
        self.allowed = next;
        self.sink.allowed_changed(&self.allowed);
    }

    /// Flip one category's membership in the allowed set. Returns `false`
    /// without touching state or the sink when the category is locked at
    /// the current level.
    pub fn toggle(&mut self, category: ContentCategory) -> bool {
        if !self.ruleset.is_unlocked(self.level, category) {
            debug!(category = %category, level = %self.level, "toggle ignored for locked category");
            return false;
        }
        match self.allowed.iter().position(|c| *c == category) {
            Some(index) => {
                self.allowed.remove(index);
            }
            None => self.allowed.push(category),
        }
        self.sink.allowed_changed(&self.allowed);
        true
    }

    /// Render state for every catalog entry, in catalog order.
    pub fn slots(&self) -> Vec<CategorySlot> {
        ContentCategory::CATALOG
            .into_iter()
            .map(|category| {
                let unlocked = self.ruleset.is_unlocked(self.level, category);
                CategorySlot {
                    category,
                    unlocked,
                    selected: unlocked && self.allowed.contains(&category),
                }
            })
            .collect()
    }

    /// The catalog split into two display columns at the ceiling midpoint.
    /// Layout only; has no bearing on unlock logic.
    pub fn columns(&self) -> (Vec<CategorySlot>, Vec<CategorySlot>) {
        let slots = self.slots();
        let mid = slots.len().div_ceil(2);
        let right = slots[mid..].to_vec();
        let mut left = slots;
        left.truncate(mid);
        (left, right)
    }
}

fn same_set(a: &[ContentCategory], b: &[ContentCategory]) -> bool {
    let a: HashSet<ContentCategory> = a.iter().copied().collect();
    let b: HashSet<ContentCategory> = b.iter().copied().collect();
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tagguard_types::ContentCategory::*;
    use tagguard_types::RatingLevel::*;

    fn recording() -> (
        Rc<RefCell<Vec<Vec<ContentCategory>>>>,
        impl FnMut(&[ContentCategory]),
    ) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let writer = Rc::clone(&events);
        (events, move |allowed: &[ContentCategory]| {
            writer.borrow_mut().push(allowed.to_vec())
        })
    }

    #[test]
    fn lowering_the_level_emits_one_reconciled_update() {
        let (events, sink) = recording();
        let mut surface =
            SelectionSurface::new(Arc::new(Ruleset::standard()), Twelve, &[Language, Crime], sink);

        surface.set_level(Ten);

        assert_eq!(surface.allowed(), &[Language]);
        assert_eq!(events.borrow().as_slice(), &[vec![Language]]);
    }

    #[test]
    fn raising_the_level_emits_nothing_when_the_set_survives() {
        let (events, sink) = recording();
        let mut surface =
            SelectionSurface::new(Arc::new(Ruleset::standard()), Ten, &[Language], sink);

        surface.set_level(Twelve);

        assert_eq!(surface.allowed(), &[Language]);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn setting_the_same_level_never_emits() {
        let (events, sink) = recording();
        let mut surface =
            SelectionSurface::new(Arc::new(Ruleset::standard()), Twelve, &[Language, Crime], sink);

        surface.set_level(Twelve);

        assert!(events.borrow().is_empty());
    }

    #[test]
    fn construction_normalizes_silently() {
        let (events, sink) = recording();
        let surface = SelectionSurface::new(
            Arc::new(Ruleset::standard()),
            Twelve,
            &[Language, Violence, Sexual],
            sink,
        );

        assert_eq!(surface.allowed(), &[Language]);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn toggling_an_unlocked_category_flips_and_emits() {
        let (events, sink) = recording();
        let mut surface =
            SelectionSurface::new(Arc::new(Ruleset::standard()), Twelve, &[Language], sink);

        assert!(surface.toggle(Crime));
        assert_eq!(surface.allowed(), &[Language, Crime]);
        assert!(surface.toggle(Language));
        assert_eq!(surface.allowed(), &[Crime]);
        assert_eq!(events.borrow().len(), 2);
    }

    #[test]
    fn toggling_a_locked_category_is_ignored() {
        let (events, sink) = recording();
        let mut surface =
            SelectionSurface::new(Arc::new(Ruleset::standard()), Twelve, &[Language], sink);

        assert!(!surface.toggle(Nudity));
        assert_eq!(surface.allowed(), &[Language]);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn slots_partition_selected_enabled_and_locked() {
        let (_, sink) = recording();
        let surface =
            SelectionSurface::new(Arc::new(Ruleset::standard()), Twelve, &[Language], sink);

        let slots = surface.slots();
        assert_eq!(slots.len(), ContentCategory::CATALOG.len());
        let language = &slots[0];
        assert!(language.unlocked && language.selected);
        let crime = &slots[1];
        assert!(crime.unlocked && !crime.selected);
        let nudity = slots.iter().find(|s| s.category == Nudity).unwrap();
        assert!(!nudity.unlocked && !nudity.selected);
    }

    #[test]
    fn columns_split_at_the_ceiling_midpoint() {
        let (_, sink) = recording();
        let surface = SelectionSurface::new(Arc::new(Ruleset::standard()), L, &[], sink);

        let (left, right) = surface.columns();
        assert_eq!(left.len(), 6);
        assert_eq!(right.len(), 6);
        assert_eq!(left[0].category, Language);
        assert_eq!(right[0].category, Gambling);
    }
}
