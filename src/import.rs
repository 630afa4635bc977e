//! Roster import from CSV (`name,court` rows).

use crate::models::{CourtId, PlayerId, Tournament, TournamentError};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    /// Court name (case-insensitive) or rank.
    court: String,
}

fn resolve_court(tournament: &Tournament, court: &str) -> Option<CourtId> {
    let court = court.trim();
    if let Ok(rank) = court.parse::<u32>() {
        return tournament.courts.iter().find(|c| c.rank == rank).map(|c| c.id);
    }
    tournament
        .courts
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(court))
        .map(|c| c.id)
}

/// Read `name,court` rows, creating players that do not exist yet.
///
/// Existing players are matched by name (case-insensitive). Returns per-court player
/// lists in court rank order, players in file order, ready for `assign_session`.
/// Nothing is added to the tournament if any row is invalid.
pub fn import_roster_csv<R: Read>(
    tournament: &mut Tournament,
    reader: R,
) -> Result<Vec<(CourtId, Vec<PlayerId>)>, TournamentError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows: Vec<(String, CourtId)> = Vec::new();
    for (line, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = record.map_err(|e| TournamentError::Import(e.to_string()))?;
        if row.name.is_empty() {
            return Err(TournamentError::Import(format!("row {}: empty player name", line + 1)));
        }
        let court = resolve_court(tournament, &row.court).ok_or_else(|| {
            TournamentError::Import(format!("row {}: unknown court {:?}", line + 1, row.court))
        })?;
        rows.push((row.name, court));
    }

    let mut staged = tournament.clone();
    let mut courts: Vec<_> = tournament.courts.iter().collect();
    courts.sort_by_key(|c| c.rank);
    let mut assignments: Vec<(CourtId, Vec<PlayerId>)> =
        courts.into_iter().map(|c| (c.id, Vec::new())).collect();
    let mut seen = HashSet::new();
    for (name, court) in rows {
        let id = match staged.find_player_by_name(&name) {
            Some(p) => p.id,
            None => staged.add_player(name)?,
        };
        if !seen.insert(id) {
            return Err(TournamentError::PlayerAssignedTwice { player: id });
        }
        if let Some((_, ids)) = assignments.iter_mut().find(|(c, _)| *c == court) {
            ids.push(id);
        }
    }
    assignments.retain(|(_, ids)| !ids.is_empty());

    let added = staged.players.len() - tournament.players.len();
    *tournament = staged;
    log::info!(
        "Imported {} court roster(s), {} new player(s)",
        assignments.len(),
        added
    );
    Ok(assignments)
}
