//! The per-entity CRUD API the reconciler persists through.
//!
//! The server side is a collaborator, not part of this crate; these
//! traits pin down exactly what the reconciler needs from it, and
//! [`ApiClient`] is the HTTP implementation. Tests swap in an in-memory
//! double behind the same traits.

pub mod client;
pub mod config;
pub mod store;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use store::{CollectionStore, Resource, StoreError, StoreResult, TournamentStore};
