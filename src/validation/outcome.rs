//! Validation outcome types.

use crate::ids::EntityId;

/// How a single field check came out.
///
/// `Missing` is a field with no value; whether that is an error depends
/// on the validation regime. `Invalid` is a field that is present but
/// violates a constraint; `Other` is a check that could not run at all
/// (a cross-reference into structure that does not resolve). The ladder
/// maps each to its message rather than letting any of them abort
/// validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldStatus {
    Valid,
    Missing,
    Invalid,
    Other,
}

/// The first violation found in an entry grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowError {
    /// The offending row's player id, or `None` for a structural or
    /// array-level error with no single offending row.
    pub row_id: Option<EntityId>,
    pub msg: String,
}

impl RowError {
    /// An error not attributable to one row.
    pub fn structural(msg: impl Into<String>) -> Self {
        Self {
            row_id: None,
            msg: msg.into(),
        }
    }

    /// An error in the given row.
    pub fn in_row(row_id: &EntityId, msg: impl Into<String>) -> Self {
        Self {
            row_id: Some(row_id.clone()),
            msg: msg.into(),
        }
    }
}
