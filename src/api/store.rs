//! Store trait definitions for testability and dependency injection.

use async_trait::async_trait;
use thiserror::Error;

use crate::entries::{BrktEntry, DivEntry, ElimEntry, Player, PotEntry};
use crate::ids::{EntityId, EntityKind};
use crate::tournament::{Bracket, Division, Eliminator, Event, Lane, Pot, Squad, Tournament};

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// An id that may not be placed into a route.
    #[error("invalid route parameter: {0}")]
    InvalidId(String),

    /// The endpoint answered with a non-success status.
    #[error("{route} request rejected with status {status}")]
    Rejected { route: &'static str, status: u16 },

    /// The endpoint answered 2xx but without the expected payload key.
    #[error("malformed {route} response: missing {key:?}")]
    MalformedResponse {
        route: &'static str,
        key: &'static str,
    },

    /// Network-level failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Payload did not decode into the expected model.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Routing metadata for one entity collection: the URL segment and the
/// payload keys its endpoints wrap responses in.
pub trait Resource {
    /// URL segment, e.g. `pots`.
    const ROUTE: &'static str;
    /// Singular payload key, e.g. `pot`.
    const ONE: &'static str;
    /// Plural payload key, e.g. `pots`.
    const MANY: &'static str;
    /// The id kind this collection's records carry.
    const KIND: EntityKind;
}

macro_rules! resource {
    ($ty:ty, $route:literal, $one:literal, $many:literal, $kind:expr) => {
        impl Resource for $ty {
            const ROUTE: &'static str = $route;
            const ONE: &'static str = $one;
            const MANY: &'static str = $many;
            const KIND: EntityKind = $kind;
        }
    };
}

resource!(Tournament, "tmnts", "tmnt", "tmnts", EntityKind::Tournament);
resource!(Event, "events", "event", "events", EntityKind::Event);
resource!(Division, "divs", "div", "divs", EntityKind::Division);
resource!(Squad, "squads", "squad", "squads", EntityKind::Squad);
resource!(Lane, "lanes", "lane", "lanes", EntityKind::Lane);
resource!(Pot, "pots", "pot", "pots", EntityKind::Pot);
resource!(Bracket, "brkts", "brkt", "brkts", EntityKind::Bracket);
resource!(Eliminator, "elims", "elim", "elims", EntityKind::Eliminator);
resource!(Player, "players", "player", "players", EntityKind::Player);
resource!(DivEntry, "div_entries", "div_entry", "div_entries", EntityKind::DivEntry);
resource!(PotEntry, "pot_entries", "pot_entry", "pot_entries", EntityKind::PotEntry);
resource!(BrktEntry, "brkt_entries", "brkt_entry", "brkt_entries", EntityKind::BrktEntry);
resource!(ElimEntry, "elim_entries", "elim_entry", "elim_entries", EntityKind::ElimEntry);

/// CRUD over one entity collection.
#[async_trait]
pub trait CollectionStore<T>: Send + Sync {
    /// Fetch every record under a parent scope
    /// (`GET /<entity>/<scope>/<scopeId>`).
    async fn fetch_by_scope(&self, scope: &str, scope_id: &EntityId) -> StoreResult<Vec<T>>;

    /// Insert one record (`POST /<entity>`).
    async fn insert(&self, item: &T) -> StoreResult<T>;

    /// Insert a batch (`POST /<entity>/many`); returns the insert count.
    async fn insert_many(&self, items: &[T]) -> StoreResult<usize>;

    /// Update one record in place (`PUT /<entity>/<id>`).
    async fn update(&self, item: &T) -> StoreResult<T>;

    /// Delete one record (`DELETE /<entity>/<id>`).
    async fn delete(&self, id: &EntityId) -> StoreResult<()>;

    /// Delete every record under a parent scope
    /// (`DELETE /<entity>/<scope>/<scopeId>`); returns the delete count.
    /// Used when a parent is torn down wholesale rather than diffed.
    async fn delete_by_scope(&self, scope: &str, scope_id: &EntityId) -> StoreResult<usize>;
}

/// The tournament record itself: a single object, not a collection.
#[async_trait]
pub trait TournamentStore: Send + Sync {
    async fn fetch_tournament(&self, id: &EntityId) -> StoreResult<Tournament>;

    async fn update_tournament(&self, tournament: &Tournament) -> StoreResult<Tournament>;
}
