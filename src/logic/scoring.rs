//! Scoring: apply a finished game's team scores to cumulative player statistics.

use crate::models::{GameId, GameStatus, Player, SessionStatus, Tournament, TournamentError};

/// Convert an untyped score into a game score. Negative or oversized values are rejected.
pub fn parse_score(raw: i64) -> Result<u32, TournamentError> {
    u32::try_from(raw).map_err(|_| TournamentError::InvalidScore { value: raw })
}

/// Record the final score of a pending game and credit its four players.
///
/// Both teammates receive their team's full score as points for (and total score) and
/// the opposing team's score as points against. A completed game cannot be scored
/// again; use a session reset to correct it.
pub fn apply_game_score(
    tournament: &mut Tournament,
    game_id: GameId,
    team_1_score: u32,
    team_2_score: u32,
) -> Result<(), TournamentError> {
    let game = tournament.game(game_id)?;
    if game.is_completed() {
        return Err(TournamentError::GameAlreadyCompleted(game_id));
    }
    let roster = tournament.roster(game.roster_id).map_err(|_| {
        log::error!("game {} refers to missing roster {}", game_id, game.roster_id);
        TournamentError::Inconsistent(format!("game {game_id} has no roster"))
    })?;
    let session = tournament.session(roster.session_id)?;
    if session.status != SessionStatus::Active {
        return Err(TournamentError::InvalidState(format!(
            "session {} is not active",
            session.number
        )));
    }

    let mut scored = game.clone();
    scored.team_1_score = team_1_score;
    scored.team_2_score = team_2_score;
    scored.status = GameStatus::Completed;

    // Stage every player update before writing any of them.
    let mut updated: Vec<Player> = Vec::with_capacity(4);
    for (player_id, points_for, points_against) in scored.player_results() {
        let mut player = tournament
            .player(player_id)
            .map_err(|_| {
                log::error!("game {} lists unknown player {}", game_id, player_id);
                TournamentError::Inconsistent(format!(
                    "game {game_id} lists unknown player {player_id}"
                ))
            })?
            .clone();
        player.credit_game(points_for, points_against)?;
        updated.push(player);
    }

    for player in updated {
        let id = player.id;
        *tournament.player_mut(id)? = player;
    }
    log::info!(
        "Game {} on roster {} scored {}-{}",
        scored.number,
        scored.roster_id,
        team_1_score,
        team_2_score
    );
    *tournament.game_mut(game_id)? = scored;
    Ok(())
}
