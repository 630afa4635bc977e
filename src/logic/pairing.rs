//! Pairing generator: fixed Americano schedules for 8, 10 and 12 player rosters.

use crate::models::{AppearanceMismatch, PlayerId, TournamentError};
use std::collections::HashMap;

/// Games each player plays in one roster's schedule.
pub const GAMES_PER_PLAYER: usize = 2;

/// Roster sizes with a pairing table.
pub const SUPPORTED_ROSTER_SIZES: [usize; 3] = [8, 10, 12];

/// A pair of roster indices playing together.
type Pair = [usize; 2];

const TABLE_8: [[Pair; 2]; 4] = [
    [[0, 1], [2, 3]],
    [[4, 5], [6, 7]],
    [[0, 2], [4, 6]],
    [[1, 3], [5, 7]],
];

const TABLE_10: [[Pair; 2]; 5] = [
    [[0, 1], [2, 3]],
    [[4, 5], [6, 7]],
    [[8, 9], [0, 2]],
    [[1, 3], [4, 6]],
    [[5, 8], [7, 9]],
];

const TABLE_12: [[Pair; 2]; 6] = [
    [[0, 1], [2, 3]],
    [[4, 5], [6, 7]],
    [[8, 9], [10, 11]],
    [[0, 2], [4, 6]],
    [[1, 3], [5, 7]],
    [[8, 10], [9, 11]],
];

/// One scheduled game of a roster, before it is stored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pairing<T> {
    /// Game number, starting at 1.
    pub number: u32,
    pub team_1: [T; 2],
    pub team_2: [T; 2],
}

impl<T> Pairing<T> {
    pub fn players(&self) -> [&T; 4] {
        [&self.team_1[0], &self.team_1[1], &self.team_2[0], &self.team_2[1]]
    }
}

/// `true` if a roster of this size can be paired.
pub fn is_supported_roster_size(size: usize) -> bool {
    SUPPORTED_ROSTER_SIZES.contains(&size)
}

fn table_for(size: usize) -> Option<&'static [[Pair; 2]]> {
    match size {
        8 => Some(&TABLE_8),
        10 => Some(&TABLE_10),
        12 => Some(&TABLE_12),
        _ => None,
    }
}

/// Generate the schedule for a roster (input order is the table index).
///
/// Every player plays exactly two games and never partners the same player twice.
/// Deterministic: the same input order always gives the same schedule.
pub fn generate_pairings<T: Clone>(players: &[T]) -> Result<Vec<Pairing<T>>, TournamentError> {
    let table = table_for(players.len()).ok_or(TournamentError::InvalidRosterSize {
        size: players.len(),
    })?;

    let mut appearances = vec![0usize; players.len()];
    for [team_1, team_2] in table {
        for &i in team_1.iter().chain(team_2.iter()) {
            appearances[i] += 1;
        }
    }
    if let Some(i) = appearances.iter().position(|&n| n != GAMES_PER_PLAYER) {
        log::error!(
            "pairing table for {} players gives index {} {} games",
            players.len(),
            i,
            appearances[i]
        );
        return Err(TournamentError::Inconsistent(format!(
            "pairing table for {} players is unbalanced at index {}",
            players.len(),
            i
        )));
    }

    let pick = |pair: &Pair| [players[pair[0]].clone(), players[pair[1]].clone()];
    Ok(table
        .iter()
        .enumerate()
        .map(|(n, [team_1, team_2])| Pairing {
            number: n as u32 + 1,
            team_1: pick(team_1),
            team_2: pick(team_2),
        })
        .collect())
}

/// Check that every roster player appears in exactly two of the given lineups.
///
/// Players found in lineups but missing from the roster are reported too. Mismatches
/// are listed in roster order, strays after them in first-seen order.
pub fn validate_game_distribution<I>(roster: &[PlayerId], lineups: I) -> Result<(), TournamentError>
where
    I: IntoIterator<Item = [PlayerId; 4]>,
{
    let mut counts: HashMap<PlayerId, usize> = roster.iter().map(|&id| (id, 0)).collect();
    let mut strays: Vec<PlayerId> = Vec::new();
    for lineup in lineups {
        for id in lineup {
            let count = counts.entry(id).or_insert_with(|| {
                strays.push(id);
                0
            });
            *count += 1;
        }
    }

    // Strays are always reported, whatever their count.
    let mismatches: Vec<AppearanceMismatch> = roster
        .iter()
        .filter(|id| counts[*id] != GAMES_PER_PLAYER)
        .chain(strays.iter())
        .map(|&id| AppearanceMismatch {
            player_id: id,
            games: counts[&id],
        })
        .collect();

    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(TournamentError::DistributionMismatch(mismatches))
    }
}
