//! Entry validation: the row-level rule ladder and the finalize gates.
//!
//! Validation runs in two regimes. [`ValidationMode::Prelim`] applies
//! while the tournament structure is still being defined and tolerates
//! half-filled rows; [`ValidationMode::Final`] runs right before the
//! tournament locks for scoring and requires every row to be complete.
//! Validators report the first violation only and never fail themselves:
//! a malformed row yields a message, not a panic, so the remaining rows
//! stay checkable on the next pass.

pub mod finalize;
pub mod outcome;
pub mod row;

pub use finalize::{count_error, structure_error};
pub use outcome::{FieldStatus, RowError};
pub use row::{ValidationMode, find_next_error};
