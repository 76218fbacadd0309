//! Decomposition of wide entry rows into normalized join records.

use std::collections::HashMap;

use crate::entries::counts::bracket_entry_fee;
use crate::entries::models::{BrktEntry, DivEntry, ElimEntry, EntryBundle, EntryRow, PotEntry};
use crate::ids::{EntityId, EntityKind};
use crate::tournament::TournamentData;

/// Decompose `rows` into the normalized entry collections the diff
/// engine can reconcile against `baseline`.
///
/// A positive column value becomes a join record; a blank or zeroed
/// column produces none, so the diff marks any baseline counterpart
/// deleted. Records that already exist in `baseline` for the same
/// (object, player) pair keep their persisted id, which is what lets an
/// unchanged fee come out as a no-op rather than a delete-and-create.
/// Bracket refunds are administered outside the entry grid, so an
/// existing record's `num_refunds` is carried over untouched.
pub fn explode_rows(
    rows: &[EntryRow],
    data: &TournamentData,
    baseline: &EntryBundle,
) -> EntryBundle {
    let div_ids: HashMap<(&EntityId, &EntityId), &EntityId> = baseline
        .div_entries
        .iter()
        .map(|e| ((&e.div_id, &e.player_id), &e.id))
        .collect();
    let pot_ids: HashMap<(&EntityId, &EntityId), &EntityId> = baseline
        .pot_entries
        .iter()
        .map(|e| ((&e.pot_id, &e.player_id), &e.id))
        .collect();
    let brkt_prior: HashMap<(&EntityId, &EntityId), &BrktEntry> = baseline
        .brkt_entries
        .iter()
        .map(|e| ((&e.brkt_id, &e.player_id), e))
        .collect();
    let elim_ids: HashMap<(&EntityId, &EntityId), &EntityId> = baseline
        .elim_entries
        .iter()
        .map(|e| ((&e.elim_id, &e.player_id), &e.id))
        .collect();

    let mut out = EntryBundle {
        players: rows.iter().map(|r| r.player.clone()).collect(),
        ..EntryBundle::default()
    };

    for row in rows {
        let player_id = &row.player.id;

        for div in &data.divisions {
            let fee = row.fee(&div.id);
            if fee > 0 {
                out.div_entries.push(DivEntry {
                    id: reuse(div_ids.get(&(&div.id, player_id)).copied(), EntityKind::DivEntry),
                    squad_id: row.player.squad_id.clone(),
                    div_id: div.id.clone(),
                    player_id: player_id.clone(),
                    fee,
                });
            }
        }

        for pot in &data.pots {
            let fee = row.fee(&pot.id);
            if fee > 0 {
                out.pot_entries.push(PotEntry {
                    id: reuse(pot_ids.get(&(&pot.id, player_id)).copied(), EntityKind::PotEntry),
                    pot_id: pot.id.clone(),
                    player_id: player_id.clone(),
                    fee,
                });
            }
        }

        for brkt in &data.brackets {
            let num_brackets = row.bracket_count(&brkt.id);
            if num_brackets > 0 {
                let prior = brkt_prior.get(&(&brkt.id, player_id)).copied();
                out.brkt_entries.push(BrktEntry {
                    id: prior.map_or_else(
                        || EntityId::generate(EntityKind::BrktEntry),
                        |e| e.id.clone(),
                    ),
                    brkt_id: brkt.id.clone(),
                    player_id: player_id.clone(),
                    num_brackets,
                    num_refunds: prior.map_or(0, |e| e.num_refunds),
                    fee: bracket_entry_fee(brkt.fee, num_brackets),
                });
            }
        }

        for elim in &data.eliminators {
            let fee = row.fee(&elim.id);
            if fee > 0 {
                out.elim_entries.push(ElimEntry {
                    id: reuse(elim_ids.get(&(&elim.id, player_id)).copied(), EntityKind::ElimEntry),
                    elim_id: elim.id.clone(),
                    player_id: player_id.clone(),
                    fee,
                });
            }
        }
    }

    out
}

fn reuse(existing: Option<&EntityId>, kind: EntityKind) -> EntityId {
    existing.map_or_else(|| EntityId::generate(kind), EntityId::clone)
}
