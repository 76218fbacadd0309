//! The row-level rule ladder.
//!
//! Rules are evaluated in a fixed order and the first violation wins:
//! structural guards over the whole grid, then per-row checks (names,
//! duplicate identity, lane, position, average, division fees, pots,
//! brackets, eliminators, and the FINAL-only completeness rules), then
//! the FINAL-only whole-grid division-fee rule.

use std::collections::HashSet;

use crate::constants::{self, MAX_AVERAGE, MAX_BRACKETS, MAX_FEE, Money};
use crate::entries::EntryRow;
use crate::tournament::TournamentData;
use crate::validation::outcome::{FieldStatus, RowError};

/// Which regime the grid is being checked under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationMode {
    /// Structure phase: half-filled rows are expected.
    Prelim,
    /// About to lock for scoring: every row must be complete.
    Final,
}

/// Find the first violated rule in `rows`, or `None` when the grid is
/// clean under `mode`.
pub fn find_next_error(
    rows: &[EntryRow],
    data: &TournamentData,
    mode: ValidationMode,
) -> Option<RowError> {
    // Structural guards run once, before any per-row rule.
    if mode == ValidationMode::Final && rows.is_empty() {
        return Some(RowError::structural("No players in the tournament"));
    }
    if data.tournament.is_none() {
        return Some(RowError::structural("No tournament data"));
    }
    if data.events.is_empty() {
        return Some(RowError::structural("No events in the tournament"));
    }
    if data.divisions.is_empty() {
        return Some(RowError::structural("No divisions in the tournament"));
    }
    if data.squads.is_empty() {
        return Some(RowError::structural("No squads in the tournament"));
    }
    let Some((lane_lo, lane_hi)) = data.lane_range() else {
        return Some(RowError::structural("No lanes in the tournament"));
    };

    let mut seen_names: HashSet<String> = HashSet::new();
    let mut seen_spots: HashSet<(i32, String)> = HashSet::new();

    for (i, row) in rows.iter().enumerate() {
        let n = i + 1;
        let player = &row.player;
        let id = &player.id;

        // 2. Names.
        if player.first_name.trim().is_empty() {
            return Some(RowError::in_row(id, format!("Missing First Name in row {n}")));
        }
        if player.last_name.trim().is_empty() {
            return Some(RowError::in_row(id, format!("Missing Last Name in row {n}")));
        }

        // 3. Duplicate identity, case-insensitive and trim-normalized.
        let identity = format!(
            "{}|{}",
            player.first_name.trim().to_lowercase(),
            player.last_name.trim().to_lowercase()
        );
        if !seen_names.insert(identity) {
            return Some(RowError::in_row(
                id,
                format!("Duplicate Player Name in row {n}: {}", player.full_name()),
            ));
        }

        // 4. Lane. A blank lane only matters once the grid is locking.
        match lane_status(player.lane, lane_lo, lane_hi) {
            FieldStatus::Invalid => {
                return Some(RowError::in_row(id, format!("Invalid Lane in row {n}")));
            }
            FieldStatus::Missing if mode == ValidationMode::Final => {
                return Some(RowError::in_row(id, format!("Missing Lane in row {n}")));
            }
            _ => {}
        }

        // 5. Position.
        match position_status(player.position.as_deref()) {
            FieldStatus::Invalid => {
                return Some(RowError::in_row(id, format!("Invalid Position in row {n}")));
            }
            FieldStatus::Missing if mode == ValidationMode::Final => {
                return Some(RowError::in_row(id, format!("Missing Position in row {n}")));
            }
            _ => {}
        }

        // 6. Average range, whenever a value is given; presence is a
        // FINAL-only rule checked with the other completeness rules.
        if average_status(player.average) == FieldStatus::Invalid {
            return Some(RowError::in_row(id, format!("Invalid Average in row {n}")));
        }

        // 7. Division fees are capped, not fixed.
        for div in &data.divisions {
            if let Some(&fee) = row.fees.get(&div.id) {
                if fee < 0 || fee > MAX_FEE {
                    return Some(RowError::in_row(id, format!("Invalid Fee in row {n}")));
                }
            }
        }

        // 8. Pots: exact fee, and entry in the owning division.
        for pot in &data.pots {
            let Some(&fee) = row.fees.get(&pot.id) else {
                continue;
            };
            if exact_fee_status(fee, pot.fee) != FieldStatus::Valid {
                return Some(RowError::in_row(id, format!("Invalid pot fee in row {n}")));
            }
            if fee > 0 {
                match owning_division_status(row, &pot.div_id, data) {
                    FieldStatus::Other => {
                        return Some(RowError::in_row(id, format!("Invalid pot data in row {n}")));
                    }
                    FieldStatus::Invalid => {
                        return Some(RowError::in_row(
                            id,
                            format!(
                                "{} is not entered in the division for pot {} in row {n}",
                                player.full_name(),
                                pot.pot_type
                            ),
                        ));
                    }
                    _ => {}
                }
            }
        }

        // 9. Brackets: count bounds, and entry in the owning division.
        for brkt in &data.brackets {
            let Some(&count) = row.brackets.get(&brkt.id) else {
                continue;
            };
            if count < 0 {
                return Some(RowError::in_row(
                    id,
                    format!("Bracket count cannot be less than 0 in row {n}"),
                ));
            }
            if count > MAX_BRACKETS {
                return Some(RowError::in_row(
                    id,
                    format!("Bracket count cannot be more than {MAX_BRACKETS} in row {n}"),
                ));
            }
            if count > 0 {
                match owning_division_status(row, &brkt.div_id, data) {
                    FieldStatus::Other => {
                        return Some(RowError::in_row(
                            id,
                            format!("Invalid bracket data in row {n}"),
                        ));
                    }
                    FieldStatus::Invalid => {
                        return Some(RowError::in_row(
                            id,
                            format!(
                                "{} is not entered in the division for bracket {} in row {n}",
                                player.full_name(),
                                brkt.games_label()
                            ),
                        ));
                    }
                    _ => {}
                }
            }
        }

        // 10. Eliminators: exact fee, and entry in the owning division.
        for elim in &data.eliminators {
            let Some(&fee) = row.fees.get(&elim.id) else {
                continue;
            };
            if exact_fee_status(fee, elim.fee) != FieldStatus::Valid {
                return Some(RowError::in_row(
                    id,
                    format!("Invalid eliminator fee in row {n}"),
                ));
            }
            if fee > 0 {
                match owning_division_status(row, &elim.div_id, data) {
                    FieldStatus::Other => {
                        return Some(RowError::in_row(
                            id,
                            format!("Invalid eliminator data in row {n}"),
                        ));
                    }
                    FieldStatus::Invalid => {
                        return Some(RowError::in_row(
                            id,
                            format!(
                                "{} is not entered in the division for eliminator {} in row {n}",
                                player.full_name(),
                                elim.games_label()
                            ),
                        ));
                    }
                    _ => {}
                }
            }
        }

        // 11. FINAL-only row completeness.
        if mode == ValidationMode::Final {
            if average_status(player.average) == FieldStatus::Missing {
                return Some(RowError::in_row(id, format!("Missing Average in row {n}")));
            }
            if let (Some(lane), Some(pos)) = (player.lane, player.position.as_deref()) {
                let spot = (lane, pos.to_uppercase());
                if !seen_spots.insert(spot.clone()) {
                    return Some(RowError::in_row(
                        id,
                        format!("Duplicate Lane/Position: {lane}-{}", spot.1),
                    ));
                }
            }
        }
    }

    // 12. FINAL-only: somebody has to be in a division.
    if mode == ValidationMode::Final {
        let any_div_fee = rows
            .iter()
            .any(|row| data.divisions.iter().any(|div| row.fee(&div.id) > 0));
        if !any_div_fee {
            return Some(RowError::structural("Missing Division Fee"));
        }
    }

    None
}

/// A pot or eliminator fee is all-or-nothing: exactly zero or exactly
/// the configured fee.
fn exact_fee_status(fee: Money, configured: Money) -> FieldStatus {
    if fee == 0 || fee == configured {
        FieldStatus::Valid
    } else {
        FieldStatus::Invalid
    }
}

/// A lane, when given, must lie within the tournament's lane range.
fn lane_status(lane: Option<i32>, lo: i32, hi: i32) -> FieldStatus {
    match lane {
        None => FieldStatus::Missing,
        Some(l) if l < lo || l > hi => FieldStatus::Invalid,
        Some(_) => FieldStatus::Valid,
    }
}

/// A position, when given, is a single character from the allowed set.
fn position_status(pos: Option<&str>) -> FieldStatus {
    let Some(pos) = pos else {
        return FieldStatus::Missing;
    };
    let mut chars = pos.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if constants::is_position(c) => FieldStatus::Valid,
        _ => FieldStatus::Invalid,
    }
}

/// An average, when given, must be a real bowling average.
fn average_status(average: Option<i32>) -> FieldStatus {
    match average {
        None => FieldStatus::Missing,
        Some(a) if !(0..=MAX_AVERAGE).contains(&a) => FieldStatus::Invalid,
        Some(_) => FieldStatus::Valid,
    }
}

/// Whether the row is entered in the division owning a pot, bracket, or
/// eliminator. `Other` when the owning division does not resolve in the
/// structure at all.
fn owning_division_status(
    row: &EntryRow,
    div_id: &crate::ids::EntityId,
    data: &TournamentData,
) -> FieldStatus {
    if data.division(div_id).is_none() {
        return FieldStatus::Other;
    }
    if row.fee(div_id) > 0 {
        FieldStatus::Valid
    } else {
        FieldStatus::Invalid
    }
}
