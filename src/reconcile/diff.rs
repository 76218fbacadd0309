//! Per-collection comparator between a persisted baseline and an edited
//! in-memory copy.

use std::collections::{HashMap, HashSet};

use crate::ids::EntityId;

/// A persistable record keyed by a tagged id.
///
/// Equality is tracked-field equality: the models in this crate carry
/// only persisted fields, so the derived `PartialEq` is exactly what the
/// diff engine must compare. UI-only error and display state never lives
/// on these types.
pub trait Record: Clone + PartialEq {
    fn id(&self) -> &EntityId;

    /// Position within the parent scope; used to order persister results.
    /// Collections without an explicit ordering (entry join records) keep
    /// their input order.
    fn sort_order(&self) -> i32 {
        0
    }
}

/// The `{created, updated, deleted}` partition for one collection.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionDiff<T> {
    /// In `edited` but not in `baseline`.
    pub created: Vec<T>,
    /// In both, with at least one field changed.
    pub updated: Vec<T>,
    /// In `baseline` but not in `edited`.
    pub deleted: Vec<T>,
}

impl<T> CollectionDiff<T> {
    /// No mutations needed: the edited copy is field-wise identical to
    /// the baseline.
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }

    /// Total number of mutations this diff represents.
    pub fn len(&self) -> usize {
        self.created.len() + self.updated.len() + self.deleted.len()
    }
}

impl<T> Default for CollectionDiff<T> {
    fn default() -> Self {
        Self {
            created: Vec::new(),
            updated: Vec::new(),
            deleted: Vec::new(),
        }
    }
}

/// Partition `edited` against `baseline` by id.
///
/// An id appears in at most one partition; records equal field-for-field
/// to their baseline counterpart appear in none. Input order is preserved
/// within each partition.
pub fn diff<T: Record>(baseline: &[T], edited: &[T]) -> CollectionDiff<T> {
    let by_id: HashMap<&EntityId, &T> = baseline.iter().map(|r| (r.id(), r)).collect();
    let edited_ids: HashSet<&EntityId> = edited.iter().map(|r| r.id()).collect();

    let mut out = CollectionDiff::default();
    for record in edited {
        match by_id.get(record.id()) {
            None => out.created.push(record.clone()),
            Some(prior) if *prior != record => out.updated.push(record.clone()),
            Some(_) => {}
        }
    }
    for record in baseline {
        if !edited_ids.contains(record.id()) {
            out.deleted.push(record.clone());
        }
    }
    out
}
