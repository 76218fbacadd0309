//! Finalize-readiness gates: aggregate entry counts and structural
//! invariants checked right before a tournament locks for scoring.

use std::collections::HashMap;

use crate::ids::{EntityId, EntityKind};
use crate::tournament::TournamentData;

/// Check aggregate entry counts against the tournament structure.
///
/// Returns the first violated message, in order: every division needs at
/// least one entry, then every pot, then every eliminator, then every
/// bracket needs enough effective entries to run with at most one bye
/// slot (`players − 1`). `None` means the counts clear the gate.
pub fn count_error(counts: &HashMap<EntityId, i64>, data: &TournamentData) -> Option<String> {
    let count_of = |id: &EntityId| counts.get(id).copied().unwrap_or(0);

    if data.divisions.iter().any(|d| count_of(&d.id) == 0) {
        return Some("No division entries".to_string());
    }
    if data.pots.iter().any(|p| count_of(&p.id) == 0) {
        return Some("No pot entries".to_string());
    }
    if data.eliminators.iter().any(|e| count_of(&e.id) == 0) {
        return Some("No elim entries".to_string());
    }
    if data
        .brackets
        .iter()
        .any(|b| count_of(&b.id) < i64::from(b.players) - 1)
    {
        return Some("Not enough bracket entries".to_string());
    }
    None
}

/// Check the structural invariants the diff engine does not enforce:
/// every foreign key carries the expected type tag, and `sort_order` is
/// unique and dense (1..=n) within each parent scope.
pub fn structure_error(data: &TournamentData) -> Option<String> {
    if let Some(msg) = foreign_key_error(data) {
        return Some(msg);
    }
    sort_order_error(data)
}

fn foreign_key_error(data: &TournamentData) -> Option<String> {
    for event in &data.events {
        if !event.tmnt_id.has_kind(EntityKind::Tournament) {
            return Some(format!("Invalid tournament reference on event {}", event.id));
        }
    }
    for div in &data.divisions {
        if !div.tmnt_id.has_kind(EntityKind::Tournament) {
            return Some(format!("Invalid tournament reference on division {}", div.id));
        }
    }
    for squad in &data.squads {
        if !squad.event_id.has_kind(EntityKind::Event) {
            return Some(format!("Invalid event reference on squad {}", squad.id));
        }
    }
    for lane in &data.lanes {
        if !lane.squad_id.has_kind(EntityKind::Squad) {
            return Some(format!("Invalid squad reference on lane {}", lane.id));
        }
    }
    for pot in &data.pots {
        if !pot.div_id.has_kind(EntityKind::Division) || !pot.squad_id.has_kind(EntityKind::Squad) {
            return Some(format!("Invalid parent reference on pot {}", pot.id));
        }
    }
    for brkt in &data.brackets {
        if !brkt.div_id.has_kind(EntityKind::Division) || !brkt.squad_id.has_kind(EntityKind::Squad)
        {
            return Some(format!("Invalid parent reference on bracket {}", brkt.id));
        }
    }
    for elim in &data.eliminators {
        if !elim.div_id.has_kind(EntityKind::Division) || !elim.squad_id.has_kind(EntityKind::Squad)
        {
            return Some(format!("Invalid parent reference on eliminator {}", elim.id));
        }
    }
    None
}

fn sort_order_error(data: &TournamentData) -> Option<String> {
    // Events and divisions are scoped by tournament; squads by event;
    // pots, brackets, and eliminators by squad.
    if !dense(data.events.iter().map(|e| (e.tmnt_id.clone(), e.sort_order))) {
        return Some("Invalid sort order in events".to_string());
    }
    if !dense(data.divisions.iter().map(|d| (d.tmnt_id.clone(), d.sort_order))) {
        return Some("Invalid sort order in divisions".to_string());
    }
    if !dense(data.squads.iter().map(|s| (s.event_id.clone(), s.sort_order))) {
        return Some("Invalid sort order in squads".to_string());
    }
    if !dense(data.pots.iter().map(|p| (p.squad_id.clone(), p.sort_order))) {
        return Some("Invalid sort order in pots".to_string());
    }
    if !dense(data.brackets.iter().map(|b| (b.squad_id.clone(), b.sort_order))) {
        return Some("Invalid sort order in brackets".to_string());
    }
    if !dense(data.eliminators.iter().map(|e| (e.squad_id.clone(), e.sort_order))) {
        return Some("Invalid sort order in eliminators".to_string());
    }
    None
}

/// Per scope, sort orders must be exactly 1..=n with no gaps or repeats.
fn dense(scoped: impl Iterator<Item = (EntityId, i32)>) -> bool {
    let mut by_scope: HashMap<EntityId, Vec<i32>> = HashMap::new();
    for (scope, order) in scoped {
        by_scope.entry(scope).or_default().push(order);
    }
    by_scope.values_mut().all(|orders| {
        orders.sort_unstable();
        orders.iter().copied().eq(1..=orders.len() as i32)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_BRKT_PLAYERS;
    use crate::tournament::{Bracket, Division, Eliminator, HdcpFor, Pot, PotKind};

    fn gate_fixture() -> TournamentData {
        let tmnt_id = EntityId::generate(EntityKind::Tournament);
        let div = Division {
            id: EntityId::generate(EntityKind::Division),
            tmnt_id: tmnt_id.clone(),
            div_name: "Scratch".to_string(),
            hdcp_per: 0.0,
            hdcp_from: 230,
            int_hdcp: true,
            hdcp_for: HdcpFor::Game,
            sort_order: 1,
        };
        let squad_id = EntityId::generate(EntityKind::Squad);
        let pot = Pot::new(div.id.clone(), squad_id.clone(), PotKind::Game, 500, 1);
        let brkt = Bracket {
            id: EntityId::generate(EntityKind::Bracket),
            div_id: div.id.clone(),
            squad_id: squad_id.clone(),
            start: 1,
            games: 3,
            players: DEFAULT_BRKT_PLAYERS,
            fee: 500,
            first: 2500,
            second: 1000,
            admin: 500,
            fsa: 4000,
            sort_order: 1,
        };
        let elim = Eliminator {
            id: EntityId::generate(EntityKind::Eliminator),
            div_id: div.id.clone(),
            squad_id,
            start: 1,
            games: 3,
            fee: 500,
            sort_order: 1,
        };
        TournamentData {
            divisions: vec![div],
            pots: vec![pot],
            brackets: vec![brkt],
            eliminators: vec![elim],
            ..TournamentData::default()
        }
    }

    fn counts_for(data: &TournamentData, div: i64, pot: i64, elim: i64, brkt: i64) -> HashMap<EntityId, i64> {
        HashMap::from([
            (data.divisions[0].id.clone(), div),
            (data.pots[0].id.clone(), pot),
            (data.eliminators[0].id.clone(), elim),
            (data.brackets[0].id.clone(), brkt),
        ])
    }

    #[test]
    fn test_gate_order() {
        let data = gate_fixture();
        let players = i64::from(data.brackets[0].players);

        assert_eq!(
            count_error(&counts_for(&data, 0, 0, 0, 0), &data).as_deref(),
            Some("No division entries")
        );
        assert_eq!(
            count_error(&counts_for(&data, 1, 0, 0, 0), &data).as_deref(),
            Some("No pot entries")
        );
        assert_eq!(
            count_error(&counts_for(&data, 1, 1, 0, 0), &data).as_deref(),
            Some("No elim entries")
        );
        assert_eq!(
            count_error(&counts_for(&data, 1, 1, 1, players - 2), &data).as_deref(),
            Some("Not enough bracket entries")
        );
        // One bye slot is allowed.
        assert_eq!(count_error(&counts_for(&data, 1, 1, 1, players - 1), &data), None);
    }

    #[test]
    fn test_missing_count_key_is_zero() {
        let data = gate_fixture();
        assert_eq!(
            count_error(&HashMap::new(), &data).as_deref(),
            Some("No division entries")
        );
    }

    #[test]
    fn test_structure_error_catches_wrong_tag() {
        let mut data = gate_fixture();
        data.pots[0].div_id = EntityId::generate(EntityKind::Squad);
        let msg = structure_error(&data).unwrap();
        assert!(msg.starts_with("Invalid parent reference on pot"));
    }

    #[test]
    fn test_structure_error_catches_sparse_sort_order() {
        let mut data = gate_fixture();
        let mut second = data.pots[0].clone();
        second.id = EntityId::generate(EntityKind::Pot);
        second.sort_order = 3; // gap: 1, 3
        data.pots.push(second);
        assert_eq!(
            structure_error(&data).as_deref(),
            Some("Invalid sort order in pots")
        );
    }
}
