use std::collections::HashSet;

use crate::model::absence_entry::{AbsenceEntry, EntrySet};

/// Entries in `current` that are not in `past`.
///
/// Entries that disappeared from the page since the last run are not reported.
/// Iteration order of the result is unspecified; use [`new_in_order`] when
/// the order matters.
pub fn detect_new(current: &EntrySet, past: &EntrySet) -> EntrySet {
    current.difference(past).cloned().collect()
}

/// Same difference as [`detect_new`], in extraction order, one copy per entry.
pub fn new_in_order(current: &[AbsenceEntry], past: &EntrySet) -> Vec<AbsenceEntry> {
    let mut emitted = HashSet::new();
    current
        .iter()
        .filter(|entry| !past.contains(*entry))
        .filter(|entry| emitted.insert(*entry))
        .cloned()
        .collect()
}

/// The store content after a successful report: `past ∪ current`.
pub fn merge_history(past: &EntrySet, current: &[AbsenceEntry]) -> EntrySet {
    past.iter().chain(current.iter()).cloned().collect()
}
