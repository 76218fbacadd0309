//! Structural entity models.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::Money;
use crate::ids::{EntityId, EntityKind};
use crate::reconcile::Record;

/// A tournament. The parent scope for every other entity; edited as a
/// single record rather than a collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: EntityId,
    pub tmnt_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Tournament {
    pub fn new(tmnt_name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: EntityId::generate(EntityKind::Tournament),
            tmnt_name: tmnt_name.into(),
            start_date,
            end_date,
        }
    }
}

impl Record for Tournament {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// An event within a tournament (singles, doubles, team).
///
/// The entry fee splits into lineage, prize fund, other, and expenses;
/// `added_money` is sponsor money on top of the prize fund.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EntityId,
    pub tmnt_id: EntityId,
    pub event_name: String,
    pub team_size: i32,
    pub games: i32,
    pub entry_fee: Money,
    pub lineage: Money,
    pub prize_fund: Money,
    pub other: Money,
    pub expenses: Money,
    pub added_money: Money,
    pub sort_order: i32,
}

impl Record for Event {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }
}

/// What scores a division's handicap is applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HdcpFor {
    Game,
    Series,
}

/// A division groups players by entering average for handicap purposes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Division {
    pub id: EntityId,
    pub tmnt_id: EntityId,
    pub div_name: String,
    /// Handicap percentage, e.g. 0.9 for 90%.
    pub hdcp_per: f64,
    /// Average the handicap is calculated from, e.g. 230.
    pub hdcp_from: i32,
    /// Round handicap down to a whole number.
    pub int_hdcp: bool,
    pub hdcp_for: HdcpFor,
    pub sort_order: i32,
}

impl Record for Division {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }
}

/// A squad is one shift of an event: a date, a time, and a block of lanes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Squad {
    pub id: EntityId,
    pub event_id: EntityId,
    pub squad_name: String,
    pub games: i32,
    pub starting_lane: i32,
    pub lane_count: i32,
    pub squad_date: NaiveDate,
    pub squad_time: Option<NaiveTime>,
    pub sort_order: i32,
}

impl Record for Squad {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }
}

/// One lane in a squad's block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub id: EntityId,
    pub squad_id: EntityId,
    pub lane_number: i32,
    pub in_use: bool,
}

impl Record for Lane {
    fn id(&self) -> &EntityId {
        &self.id
    }

    // Lanes order by their number.
    fn sort_order(&self) -> i32 {
        self.lane_number
    }
}

/// Which game a pot pays on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotKind {
    Game,
    #[serde(rename = "Last Game")]
    LastGame,
    Series,
}

impl fmt::Display for PotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            PotKind::Game => "Game",
            PotKind::LastGame => "Last Game",
            PotKind::Series => "Series",
        };
        write!(f, "{repr}")
    }
}

/// A side pot offered to one division on one squad.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pot {
    pub id: EntityId,
    pub div_id: EntityId,
    pub squad_id: EntityId,
    pub pot_type: PotKind,
    pub fee: Money,
    pub sort_order: i32,
}

impl Pot {
    pub fn new(
        div_id: EntityId,
        squad_id: EntityId,
        pot_type: PotKind,
        fee: Money,
        sort_order: i32,
    ) -> Self {
        Self {
            id: EntityId::generate(EntityKind::Pot),
            div_id,
            squad_id,
            pot_type,
            fee,
            sort_order,
        }
    }
}

impl Record for Pot {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }
}

/// A single-elimination bracket over a run of games.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub id: EntityId,
    pub div_id: EntityId,
    pub squad_id: EntityId,
    /// First game the bracket covers, 1-based.
    pub start: i32,
    pub games: i32,
    /// Players per bracket sheet.
    pub players: i32,
    /// Fee per bracket entered.
    pub fee: Money,
    pub first: Money,
    pub second: Money,
    pub admin: Money,
    /// first + second + admin; what one full sheet pays out.
    pub fsa: Money,
    pub sort_order: i32,
}

impl Bracket {
    /// The games a bracket covers, e.g. "Games 1-3".
    pub fn games_label(&self) -> String {
        format!("Games {}-{}", self.start, self.start + self.games - 1)
    }
}

impl Record for Bracket {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }
}

/// A last-standing eliminator over a run of games.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Eliminator {
    pub id: EntityId,
    pub div_id: EntityId,
    pub squad_id: EntityId,
    pub start: i32,
    pub games: i32,
    pub fee: Money,
    pub sort_order: i32,
}

impl Eliminator {
    /// The games an eliminator covers, e.g. "Games 4-6".
    pub fn games_label(&self) -> String {
        format!("Games {}-{}", self.start, self.start + self.games - 1)
    }
}

impl Record for Eliminator {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }
}

/// The full structure of one tournament: the record itself plus every
/// structural collection. This is both the validator's context and the
/// unit the structure save reconciles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TournamentData {
    pub tournament: Option<Tournament>,
    pub events: Vec<Event>,
    pub divisions: Vec<Division>,
    pub squads: Vec<Squad>,
    pub lanes: Vec<Lane>,
    pub pots: Vec<Pot>,
    pub brackets: Vec<Bracket>,
    pub eliminators: Vec<Eliminator>,
}

impl TournamentData {
    pub fn division(&self, id: &EntityId) -> Option<&Division> {
        self.divisions.iter().find(|d| &d.id == id)
    }

    /// The inclusive range of lane numbers available, if any lanes exist.
    pub fn lane_range(&self) -> Option<(i32, i32)> {
        let min = self.lanes.iter().map(|l| l.lane_number).min()?;
        let max = self.lanes.iter().map(|l| l.lane_number).max()?;
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squad_id() -> EntityId {
        EntityId::generate(EntityKind::Squad)
    }

    #[test]
    fn test_pot_kind_display() {
        assert_eq!(PotKind::LastGame.to_string(), "Last Game");
        assert_eq!(PotKind::Game.to_string(), "Game");
    }

    #[test]
    fn test_bracket_games_label() {
        let brkt = Bracket {
            id: EntityId::generate(EntityKind::Bracket),
            div_id: EntityId::generate(EntityKind::Division),
            squad_id: squad_id(),
            start: 4,
            games: 3,
            players: 8,
            fee: 500,
            first: 2500,
            second: 1000,
            admin: 500,
            fsa: 4000,
            sort_order: 1,
        };
        assert_eq!(brkt.games_label(), "Games 4-6");
    }

    #[test]
    fn test_lane_range_spans_all_squads() {
        let mut data = TournamentData::default();
        assert_eq!(data.lane_range(), None);
        for n in [11, 12, 17, 18] {
            data.lanes.push(Lane {
                id: EntityId::generate(EntityKind::Lane),
                squad_id: squad_id(),
                lane_number: n,
                in_use: true,
            });
        }
        assert_eq!(data.lane_range(), Some((11, 18)));
    }
}
