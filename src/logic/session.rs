//! Session lifecycle: assign players to courts, fix a court by hand, complete a session.

use crate::logic::pairing::{
    generate_pairings, is_supported_roster_size, validate_game_distribution,
};
use crate::logic::promotion::{compute_next_rosters, CourtStanding, Movement};
use crate::models::{
    CourtId, Game, PlayerId, Roster, RosterId, SessionId, SessionStatus, Tournament,
    TournamentError,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A next-session roster whose size has no pairing table; it was stored without games.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct UnpairedCourt {
    pub court_id: CourtId,
    pub size: usize,
}

/// Result of completing a session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SessionOutcome {
    /// Rosters were rebalanced into the next session, which is now active.
    Advanced {
        next_session: SessionId,
        movements: Vec<Movement>,
        /// Courts that need `reassign_court` before they can play.
        unpaired: Vec<UnpairedCourt>,
    },
    /// There is no next session; the tournament is over.
    TournamentComplete,
}

/// Generate and check the games of a roster.
fn build_roster_games(roster: &Roster) -> Result<Vec<Game>, TournamentError> {
    let pairings = generate_pairings(&roster.player_ids)?;
    validate_game_distribution(
        &roster.player_ids,
        pairings.iter().map(|p| [p.team_1[0], p.team_1[1], p.team_2[0], p.team_2[1]]),
    )?;
    Ok(pairings
        .into_iter()
        .map(|p| Game::new(roster.id, p.number, p.team_1, p.team_2))
        .collect())
}

fn session_has_results(tournament: &Tournament, session_id: SessionId) -> bool {
    tournament
        .session_games(session_id)
        .iter()
        .any(|g| g.is_completed())
}

/// Drop a session's rosters and their games.
fn clear_session_rosters(tournament: &mut Tournament, session_id: SessionId) {
    let roster_ids: HashSet<RosterId> = tournament
        .rosters
        .iter()
        .filter(|r| r.session_id == session_id)
        .map(|r| r.id)
        .collect();
    tournament.games.retain(|g| !roster_ids.contains(&g.roster_id));
    tournament.rosters.retain(|r| r.session_id != session_id);
}

/// Check players exist, are not listed twice, and fill a pairable roster.
fn check_roster_players(
    tournament: &Tournament,
    court_id: CourtId,
    player_ids: &[PlayerId],
    seen: &mut HashSet<PlayerId>,
) -> Result<(), TournamentError> {
    tournament.court(court_id)?;
    for &id in player_ids {
        tournament.player(id)?;
        if !seen.insert(id) {
            return Err(TournamentError::PlayerAssignedTwice { player: id });
        }
    }
    if !is_supported_roster_size(player_ids.len()) {
        return Err(TournamentError::CourtRosterSize {
            court: court_id,
            size: player_ids.len(),
        });
    }
    Ok(())
}

/// Assign players to courts for a session, generate every court's games and make the
/// session active.
///
/// The session must be pending, or active without any results yet (its rosters and
/// games are then replaced). No other session may be active. Nothing is written unless
/// every court validates.
pub fn assign_session(
    tournament: &mut Tournament,
    session_id: SessionId,
    assignments: &[(CourtId, Vec<PlayerId>)],
) -> Result<(), TournamentError> {
    let session = tournament.session(session_id)?;
    let number = session.number;
    match session.status {
        SessionStatus::Pending => {}
        SessionStatus::Active if !session_has_results(tournament, session_id) => {}
        SessionStatus::Active => {
            return Err(TournamentError::InvalidState(format!(
                "session {number} already has results"
            )))
        }
        SessionStatus::Completed => {
            return Err(TournamentError::InvalidState(format!("session {number} is completed")))
        }
    }
    if let Some(active) = tournament.active_session().filter(|s| s.id != session_id) {
        return Err(TournamentError::InvalidState(format!(
            "session {} is still active",
            active.number
        )));
    }
    if assignments.is_empty() {
        return Err(TournamentError::InvalidState("no courts assigned".into()));
    }

    let mut seen_players = HashSet::new();
    let mut seen_courts = HashSet::new();
    for (court_id, player_ids) in assignments {
        if !seen_courts.insert(*court_id) {
            return Err(TournamentError::CourtAssignedTwice { court: *court_id });
        }
        check_roster_players(tournament, *court_id, player_ids, &mut seen_players)?;
    }

    let mut rosters = Vec::with_capacity(assignments.len());
    let mut games = Vec::new();
    for (court_id, player_ids) in assignments {
        let roster = Roster::new(session_id, *court_id, player_ids.clone());
        games.extend(build_roster_games(&roster)?);
        rosters.push(roster);
    }

    clear_session_rosters(tournament, session_id);
    let court_count = rosters.len();
    let game_count = games.len();
    tournament.rosters.extend(rosters);
    tournament.games.extend(games);
    tournament.session_mut(session_id)?.status = SessionStatus::Active;
    log::info!(
        "Session {} active: {} court(s), {} game(s)",
        number,
        court_count,
        game_count
    );
    Ok(())
}

/// Replace one court's roster in an active session and regenerate its games.
///
/// Used to fix a court left without games after promotion, or to correct an
/// assignment before any of the court's games are played.
pub fn reassign_court(
    tournament: &mut Tournament,
    session_id: SessionId,
    court_id: CourtId,
    player_ids: Vec<PlayerId>,
) -> Result<RosterId, TournamentError> {
    let session = tournament.session(session_id)?;
    if session.status != SessionStatus::Active {
        return Err(TournamentError::InvalidState(format!(
            "session {} is not active",
            session.number
        )));
    }
    let existing = tournament.court_roster(session_id, court_id).map(|r| r.id);
    if let Some(roster_id) = existing {
        let games = tournament.roster_games(roster_id);
        if let Some(played) = games.iter().find(|g| g.is_completed()) {
            return Err(TournamentError::GameAlreadyCompleted(played.id));
        }
    }

    // Players on the session's other courts count as already assigned.
    let mut seen: HashSet<PlayerId> = tournament
        .session_rosters(session_id)
        .into_iter()
        .filter(|r| r.court_id != court_id)
        .flat_map(|r| r.player_ids.iter().copied())
        .collect();
    check_roster_players(tournament, court_id, &player_ids, &mut seen)?;

    let mut roster = Roster::new(session_id, court_id, player_ids);
    if let Some(id) = existing {
        roster.id = id;
    }
    let games = build_roster_games(&roster)?;

    let roster_id = roster.id;
    tournament.games.retain(|g| g.roster_id != roster_id);
    tournament.rosters.retain(|r| r.id != roster_id);
    tournament.rosters.push(roster);
    tournament.games.extend(games);
    log::info!("Court {} reassigned in session {}", court_id, session_id);
    Ok(roster_id)
}

/// Complete an active session and rebalance its courts into the next one.
///
/// Every court must have games and every game a result. When a session numbered one
/// higher exists, each court's standings feed the promotion/relegation engine, the new
/// rosters and their games are stored in that session and it becomes active, all in
/// one step.
pub fn complete_session(
    tournament: &mut Tournament,
    session_id: SessionId,
) -> Result<SessionOutcome, TournamentError> {
    let session = tournament.session(session_id)?;
    let number = session.number;
    if session.status != SessionStatus::Active {
        return Err(TournamentError::InvalidState(format!("session {number} is not active")));
    }
    let unpaired: Vec<CourtId> = tournament
        .session_rosters(session_id)
        .into_iter()
        .filter(|r| tournament.roster_games(r.id).is_empty())
        .map(|r| r.court_id)
        .collect();
    if !unpaired.is_empty() {
        return Err(TournamentError::UnpairedCourts(unpaired));
    }
    let pending: Vec<_> = tournament
        .session_games(session_id)
        .into_iter()
        .filter(|g| !g.is_completed())
        .map(|g| g.id)
        .collect();
    if !pending.is_empty() {
        return Err(TournamentError::GamesPending(pending));
    }

    let next = match tournament.session_by_number(number + 1) {
        Some(next) => next,
        None => {
            let session = tournament.session_mut(session_id)?;
            session.status = SessionStatus::Completed;
            session.completed_at = Some(Utc::now());
            log::info!("Session {} completed; tournament complete", number);
            return Ok(SessionOutcome::TournamentComplete);
        }
    };
    if next.status != SessionStatus::Pending {
        return Err(TournamentError::InvalidState(format!(
            "session {} is not pending",
            next.number
        )));
    }
    let next_id = next.id;

    let standings = tournament
        .session_rosters(session_id)
        .into_iter()
        .map(|roster| {
            let court = tournament.court(roster.court_id)?;
            let players = roster
                .player_ids
                .iter()
                .map(|&id| {
                    tournament.player(id).cloned().map_err(|_| {
                        log::error!("roster {} lists unknown player {}", roster.id, id);
                        TournamentError::Inconsistent(format!(
                            "roster {} lists unknown player {id}",
                            roster.id
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(CourtStanding {
                court_id: court.id,
                rank: court.rank,
                players,
            })
        })
        .collect::<Result<Vec<_>, TournamentError>>()?;
    let plan = compute_next_rosters(&standings)?;

    let mut rosters = Vec::with_capacity(plan.rosters.len());
    let mut games = Vec::new();
    let mut unpaired = Vec::new();
    for next_roster in &plan.rosters {
        let roster = Roster::new(next_id, next_roster.court_id, next_roster.player_ids.clone());
        if is_supported_roster_size(roster.player_ids.len()) {
            games.extend(build_roster_games(&roster)?);
        } else {
            log::warn!(
                "Court {} has {} players for session {}; no games generated",
                next_roster.court_id,
                roster.player_ids.len(),
                number + 1
            );
            unpaired.push(UnpairedCourt {
                court_id: next_roster.court_id,
                size: roster.player_ids.len(),
            });
        }
        rosters.push(roster);
    }

    clear_session_rosters(tournament, next_id);
    tournament.rosters.extend(rosters);
    tournament.games.extend(games);
    let session = tournament.session_mut(session_id)?;
    session.status = SessionStatus::Completed;
    session.completed_at = Some(Utc::now());
    tournament.session_mut(next_id)?.status = SessionStatus::Active;

    for m in &plan.movements {
        log::info!(
            "{} {:?} from court {} to court {}",
            tournament.player_name(m.player_id),
            m.direction,
            m.from,
            m.to
        );
    }
    log::info!("Session {} completed; session {} active", number, number + 1);
    Ok(SessionOutcome::Advanced {
        next_session: next_id,
        movements: plan.movements,
        unpaired,
    })
}
