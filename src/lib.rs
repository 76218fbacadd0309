//! # Tenpin
//!
//! A bowling tournament management library: structure (events,
//! divisions, squads, lanes, pots, brackets, eliminators), player
//! entries with fees, and the reconciliation machinery that keeps an
//! edited in-memory copy and the persisted state in line.
//!
//! ## Architecture
//!
//! Editing is snapshot-based. A baseline is loaded at edit-session
//! start, the user mutates a copy, and "Save" reconciles the two:
//!
//! - [`reconcile::diff`] partitions each collection into created,
//!   updated, and deleted records by id.
//! - [`reconcile::ReconcileManager`] persists those partitions in
//!   foreign-key-safe order (deletes bottom-up, creates/updates
//!   top-down; delete/update/insert within a collection) against the
//!   per-entity CRUD API behind the [`api`] store traits.
//! - [`validation`] checks the wide entry rows against the PRELIM or
//!   FINAL rule ladder and gates finalization on aggregate entry counts.
//! - [`entries`] holds the wide rows, their decomposition into
//!   normalized join records, and the fee/count calculator.
//!
//! Saves are sequential and not transactional; a failure mid-save leaves
//! the earlier mutations applied and the caller re-saves. One editor
//! session per tournament is assumed.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tenpin::api::{ApiClient, ApiConfig};
//! use tenpin::ids::{EntityId, EntityKind};
//! use tenpin::reconcile::ReconcileManager;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(&ApiConfig::development())?;
//!     let manager = ReconcileManager::new(Arc::new(client));
//!
//!     let tmnt_id = EntityId::parse(
//!         "tmt_fd99387c33d9c78aba290286576ddce5",
//!         EntityKind::Tournament,
//!     )?;
//!     let baseline = manager.load_structure(&tmnt_id).await?;
//!     let edited = baseline.clone(); // ... user edits the copy ...
//!     let _new_baseline = manager.save_structure(&baseline, &edited).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod constants;
pub mod entries;
pub mod ids;
pub mod reconcile;
pub mod tournament;
pub mod validation;

pub use api::{ApiClient, ApiConfig};
pub use constants::Money;
pub use entries::{EntryBundle, EntryRow, bracket_entry_fee, entry_counts};
pub use ids::{EntityId, EntityKind};
pub use reconcile::{CollectionDiff, ReconcileError, ReconcileManager, Record, diff};
pub use tournament::TournamentData;
pub use validation::{RowError, ValidationMode, count_error, find_next_error};
