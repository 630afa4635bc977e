//! Score resets: reverse a session's results, or wipe every score.

use crate::models::{
    Game, GameId, GameStatus, Player, PlayerId, SessionId, Tournament, TournamentError,
};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Reverse every completed game of a session and set its games back to pending.
///
/// Each player loses the points their team scored and conceded in each game. All
/// reversals are computed first; if any counter would go negative nothing is written.
/// The session's status is left as it is. Returns the number of games reset.
pub fn reset_session_scores(
    tournament: &mut Tournament,
    session_id: SessionId,
) -> Result<usize, TournamentError> {
    let session_number = tournament.session(session_id)?.number;
    let completed: Vec<Game> = tournament
        .session_games(session_id)
        .into_iter()
        .filter(|g| g.is_completed())
        .cloned()
        .collect();

    let mut staged: HashMap<PlayerId, Player> = HashMap::new();
    for game in &completed {
        for (player_id, scored, conceded) in game.player_results() {
            let player = match staged.entry(player_id) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => {
                    let p = tournament.player(player_id).map_err(|_| {
                        log::error!("game {} lists unknown player {}", game.id, player_id);
                        TournamentError::Inconsistent(format!(
                            "game {} lists unknown player {player_id}",
                            game.id
                        ))
                    })?;
                    e.insert(p.clone())
                }
            };
            if let Err(e) = player.revert_game(scored, conceded) {
                log::error!("reset of session {} aborted: {}", session_number, e);
                return Err(e);
            }
        }
    }

    for (id, player) in staged {
        *tournament.player_mut(id)? = player;
    }
    let reset_ids: Vec<GameId> = completed.iter().map(|g| g.id).collect();
    for id in &reset_ids {
        let game = tournament.game_mut(*id)?;
        game.team_1_score = 0;
        game.team_2_score = 0;
        game.status = GameStatus::Pending;
    }
    log::info!("Reset {} game(s) in session {}", reset_ids.len(), session_number);
    Ok(reset_ids.len())
}

/// Administrative full reset: zero every player's counters and every game's scores.
pub fn reset_all_scores(tournament: &mut Tournament) {
    for player in &mut tournament.players {
        player.clear_scores();
    }
    for game in &mut tournament.games {
        game.team_1_score = 0;
        game.team_2_score = 0;
        game.status = GameStatus::Pending;
    }
    log::info!(
        "Reset scores of {} player(s) and {} game(s)",
        tournament.players.len(),
        tournament.games.len()
    );
}
