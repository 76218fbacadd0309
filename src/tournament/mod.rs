//! Tournament structure: events, divisions, squads, lanes, pots,
//! brackets, and eliminators.
//!
//! These are the entities edited on the tournament-definition form and
//! persisted by the reconciliation manager on "Save Tournament". Each
//! model carries only persisted fields; per-field UI state (error
//! highlights, display formatting) lives with the caller.

pub mod models;

pub use models::{
    Bracket, Division, Eliminator, Event, HdcpFor, Lane, Pot, PotKind, Squad, Tournament,
    TournamentData,
};
