//! Manual schedule edits: swap two seats, or replace lineups wholesale.
//!
//! A roster's schedule is treated as an arena of seats addressed by
//! (game position, team, seat). Every edit is applied to a copy of the schedule and
//! only committed once the two-games-per-player distribution holds again.

use crate::logic::pairing::validate_game_distribution;
use crate::models::{Game, GameId, PlayerId, RosterId, Team, Tournament, TournamentError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One seat in a roster's schedule.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameSlot {
    /// 0-based position of the game in the schedule (ordered by game number).
    pub game: usize,
    pub team: Team,
    /// 0 or 1.
    pub seat: usize,
}

/// New lineup for one game. Teams arrive as lists and must hold exactly two players.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LineupEdit {
    pub game_id: GameId,
    pub team_1: Vec<PlayerId>,
    pub team_2: Vec<PlayerId>,
}

fn pair(team: &[PlayerId]) -> Result<[PlayerId; 2], TournamentError> {
    <[PlayerId; 2]>::try_from(team)
        .map_err(|_| TournamentError::InvalidTeamSize { size: team.len() })
}

fn check_no_duplicates(game: &Game) -> Result<(), TournamentError> {
    let mut seen = HashSet::new();
    for id in game.players() {
        if !seen.insert(id) {
            return Err(TournamentError::DuplicatePlayerInGame {
                game: game.number,
                player: id,
            });
        }
    }
    Ok(())
}

/// Validate an edited schedule against its roster and write it back.
fn commit_schedule(
    tournament: &mut Tournament,
    roster_id: RosterId,
    edited: Vec<Game>,
) -> Result<(), TournamentError> {
    let roster = tournament.roster(roster_id)?;
    for game in &edited {
        check_no_duplicates(game)?;
    }
    let all: Vec<[PlayerId; 4]> = tournament
        .roster_games(roster_id)
        .into_iter()
        .map(|g| {
            edited
                .iter()
                .find(|e| e.id == g.id)
                .map_or_else(|| g.players(), |e| e.players())
        })
        .collect();
    validate_game_distribution(&roster.player_ids, all)?;

    for game in edited {
        let id = game.id;
        *tournament.game_mut(id)? = game;
    }
    Ok(())
}

/// Swap the players at two seats in different games of a roster's schedule.
///
/// Both games must still be pending. The swap is rejected, and nothing written, if it
/// puts a player twice in one game or breaks the two-games-per-player distribution.
pub fn swap_players(
    tournament: &mut Tournament,
    roster_id: RosterId,
    a: GameSlot,
    b: GameSlot,
) -> Result<(), TournamentError> {
    tournament.roster(roster_id)?;
    let schedule = tournament.roster_games(roster_id);
    for slot in [a, b] {
        if slot.game >= schedule.len() || slot.seat > 1 {
            return Err(TournamentError::InvalidSlot {
                game: slot.game,
                seat: slot.seat,
            });
        }
    }
    if a.game == b.game {
        return Err(TournamentError::SwapWithinGame);
    }
    let mut game_a = schedule[a.game].clone();
    let mut game_b = schedule[b.game].clone();
    for game in [&game_a, &game_b] {
        if game.is_completed() {
            return Err(TournamentError::GameAlreadyCompleted(game.id));
        }
    }

    let player_a = game_a.team(a.team)[a.seat];
    let player_b = game_b.team(b.team)[b.seat];
    game_a.team_mut(a.team)[a.seat] = player_b;
    game_b.team_mut(b.team)[b.seat] = player_a;

    commit_schedule(tournament, roster_id, vec![game_a, game_b])?;
    log::info!(
        "Swapped {} and {} on roster {}",
        tournament.player_name(player_a),
        tournament.player_name(player_b),
        roster_id
    );
    Ok(())
}

/// Replace the lineups of some or all pending games of a roster.
///
/// Every player must be on the roster and the resulting schedule must give each
/// roster player exactly two games.
pub fn replace_lineups(
    tournament: &mut Tournament,
    roster_id: RosterId,
    edits: &[LineupEdit],
) -> Result<(), TournamentError> {
    let roster = tournament.roster(roster_id)?;
    let mut edited: Vec<Game> = Vec::with_capacity(edits.len());
    for edit in edits {
        let mut game = tournament.game(edit.game_id)?.clone();
        if game.roster_id != roster_id {
            return Err(TournamentError::GameNotFound(edit.game_id));
        }
        if game.is_completed() {
            return Err(TournamentError::GameAlreadyCompleted(game.id));
        }
        if edited.iter().any(|g| g.id == game.id) {
            return Err(TournamentError::InvalidState(format!("game {} edited twice", game.number)));
        }
        game.team_1 = pair(&edit.team_1)?;
        game.team_2 = pair(&edit.team_2)?;
        if let Some(&stray) = game.players().iter().find(|&&id| !roster.contains(id)) {
            return Err(TournamentError::PlayerNotOnRoster { player: stray });
        }
        edited.push(game);
    }
    let count = edited.len();
    commit_schedule(tournament, roster_id, edited)?;
    log::info!("Replaced {} lineup(s) on roster {}", count, roster_id);
    Ok(())
}
