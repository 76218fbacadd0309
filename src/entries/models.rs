//! Entry data models.
//!
//! A tournament's entry grid has one wide row per player per squad. The
//! row's column set depends on how many divisions, pots, brackets, and
//! eliminators the tournament defines, so [`EntryRow`] keeps a fixed core
//! plus explicit id-to-value maps rather than a dynamically shaped
//! record. On save the rows decompose into the normalized join records
//! below ([`crate::entries::rows::explode_rows`]).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constants::Money;
use crate::ids::{EntityId, EntityKind};
use crate::reconcile::Record;

/// The fixed core of an entry row: who is bowling, where.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub squad_id: EntityId,
    pub first_name: String,
    pub last_name: String,
    /// Entering average; optional until the tournament locks.
    pub average: Option<i32>,
    pub lane: Option<i32>,
    /// Position on the lane, a single letter.
    pub position: Option<String>,
}

impl Player {
    pub fn new(
        squad_id: EntityId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::generate(EntityKind::Player),
            squad_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            average: None,
            lane: None,
            position: None,
        }
    }

    /// "First Last", as used in validation messages.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

impl Record for Player {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// One wide row of the entry grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryRow {
    pub player: Player,
    /// Fee per division, pot, or eliminator the row has a value for.
    /// Absent key means the column was never touched.
    pub fees: HashMap<EntityId, Money>,
    /// Brackets entered per bracket object.
    pub brackets: HashMap<EntityId, i32>,
}

impl EntryRow {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            fees: HashMap::new(),
            brackets: HashMap::new(),
        }
    }

    /// The fee entered for `id`, zero when the column is blank.
    pub fn fee(&self, id: &EntityId) -> Money {
        self.fees.get(id).copied().unwrap_or(0)
    }

    /// The bracket count entered for `id`, zero when blank.
    pub fn bracket_count(&self, id: &EntityId) -> i32 {
        self.brackets.get(id).copied().unwrap_or(0)
    }
}

/// A player's entry in a division.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DivEntry {
    pub id: EntityId,
    pub squad_id: EntityId,
    pub div_id: EntityId,
    pub player_id: EntityId,
    pub fee: Money,
}

impl Record for DivEntry {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// A player's entry in a pot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PotEntry {
    pub id: EntityId,
    pub pot_id: EntityId,
    pub player_id: EntityId,
    pub fee: Money,
}

impl Record for PotEntry {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// A player's entry in a bracket object: how many brackets they bought,
/// the derived fee, and any refunds issued after the close of entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrktEntry {
    pub id: EntityId,
    pub brkt_id: EntityId,
    pub player_id: EntityId,
    pub num_brackets: i32,
    #[serde(default)]
    pub num_refunds: i32,
    pub fee: Money,
}

impl Record for BrktEntry {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// A player's entry in an eliminator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElimEntry {
    pub id: EntityId,
    pub elim_id: EntityId,
    pub player_id: EntityId,
    pub fee: Money,
}

impl Record for ElimEntry {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Every persisted entry collection for one tournament; the unit the
/// entries save reconciles.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryBundle {
    pub players: Vec<Player>,
    pub div_entries: Vec<DivEntry>,
    pub pot_entries: Vec<PotEntry>,
    pub brkt_entries: Vec<BrktEntry>,
    pub elim_entries: Vec<ElimEntry>,
}
