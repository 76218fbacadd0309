//! Reconciliation error types.

use thiserror::Error;

use crate::api::StoreError;
use crate::ids::EntityId;

/// A persistence step that failed mid-save.
///
/// The save is not transactional: operations before the failing one have
/// already applied and are not rolled back. The variant names the failing
/// collection and operation so the caller can log it; recovery is to fix
/// the cause and re-save the whole form.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("failed to load {route}: {source}")]
    Load {
        route: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("failed to delete {route} {id}: {source}")]
    Delete {
        route: &'static str,
        id: EntityId,
        #[source]
        source: StoreError,
    },

    #[error("failed to update {route} {id}: {source}")]
    Update {
        route: &'static str,
        id: EntityId,
        #[source]
        source: StoreError,
    },

    #[error("failed to insert {route} at index {index}: {source}")]
    Insert {
        route: &'static str,
        index: usize,
        #[source]
        source: StoreError,
    },

    #[error("failed to bulk insert {count} {route}: {source}")]
    InsertMany {
        route: &'static str,
        count: usize,
        #[source]
        source: StoreError,
    },
}

/// Result type for reconciliation operations.
pub type ReconcileResult<T> = Result<T, ReconcileError>;
