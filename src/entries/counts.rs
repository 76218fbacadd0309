//! Fee and entry-count derivation over raw rows.

use std::collections::HashMap;

use crate::constants::Money;
use crate::entries::models::{BrktEntry, EntryRow};
use crate::ids::EntityId;

/// The fee a player owes for `num_brackets` entries at `per_bracket_fee`
/// each. Zero whenever either operand is zero or negative; never
/// negative, never fractional (integer cents in, integer cents out).
pub fn bracket_entry_fee(per_bracket_fee: Money, num_brackets: i32) -> Money {
    if per_bracket_fee <= 0 || num_brackets <= 0 {
        return 0;
    }
    per_bracket_fee * Money::from(num_brackets)
}

/// Per-object entry counts.
///
/// For each division, pot, and eliminator: the number of rows whose fee
/// column is positive. For each bracket: the effective count over the
/// persisted bracket-entry records, `Σ num_brackets − Σ num_refunds`.
/// Objects with no entries simply have no key.
pub fn entry_counts(rows: &[EntryRow], brkt_entries: &[BrktEntry]) -> HashMap<EntityId, i64> {
    let mut counts: HashMap<EntityId, i64> = HashMap::new();
    for row in rows {
        for (id, fee) in &row.fees {
            if *fee > 0 {
                *counts.entry(id.clone()).or_insert(0) += 1;
            }
        }
    }
    for entry in brkt_entries {
        *counts.entry(entry.brkt_id.clone()).or_insert(0) +=
            i64::from(entry.num_brackets) - i64::from(entry.num_refunds);
    }
    counts
}
