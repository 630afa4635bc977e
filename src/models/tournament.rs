//! Tournament (the whole persisted state) and TournamentError.

use crate::logic::compare_standing;
use crate::models::court::{Court, CourtId};
use crate::models::game::{Game, GameId};
use crate::models::player::{Player, PlayerId, PlayerStanding};
use crate::models::roster::{Roster, RosterId};
use crate::models::session::{Session, SessionId, SessionStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A player whose game count in a schedule is not exactly two.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AppearanceMismatch {
    pub player_id: PlayerId,
    pub games: usize,
}

/// Coarse classification of [`TournamentError`], used to pick a response status.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Validation,
    InvalidState,
    NotFound,
    Consistency,
    Storage,
}

/// Errors that can occur during tournament operations.
#[derive(Debug, thiserror::Error)]
pub enum TournamentError {
    #[error("Roster has {size} players; Americano needs 8, 10 or 12")]
    InvalidRosterSize { size: usize },
    #[error("Court {court} has {size} players; Americano needs 8, 10 or 12")]
    CourtRosterSize { court: CourtId, size: usize },
    #[error(
        "Court {court} has {size} players; at least {required} are needed to promote and relegate"
    )]
    CourtTooSmall { court: CourtId, size: usize, required: usize },
    #[error("More than one court has rank {rank}")]
    DuplicateCourtRank { rank: u32 },
    #[error("Invalid game distribution: {} player(s) do not play exactly 2 games", .0.len())]
    DistributionMismatch(Vec<AppearanceMismatch>),
    #[error("Invalid score {value}: scores must be non-negative integers")]
    InvalidScore { value: i64 },
    #[error("A team must have exactly 2 players (got {size})")]
    InvalidTeamSize { size: usize },
    #[error("Game slot {game}/{seat} is out of range")]
    InvalidSlot { game: usize, seat: usize },
    #[error("Cannot swap two players within the same game")]
    SwapWithinGame,
    #[error("Player {player} would appear twice in game {game}")]
    DuplicatePlayerInGame { game: u32, player: PlayerId },
    #[error("Player {player} is not on this roster")]
    PlayerNotOnRoster { player: PlayerId },
    #[error("Player {player} is assigned more than once")]
    PlayerAssignedTwice { player: PlayerId },
    #[error("Court {court} is assigned more than once")]
    CourtAssignedTwice { court: CourtId },
    #[error("Game {0} is already completed")]
    GameAlreadyCompleted(GameId),
    #[error("{} game(s) still have no result", .0.len())]
    GamesPending(Vec<GameId>),
    #[error("{} court(s) have no games; reassign them before completing", .0.len())]
    UnpairedCourts(Vec<CourtId>),
    #[error("Player name must not be empty")]
    EmptyName,
    #[error("A player with this name already exists")]
    DuplicatePlayerName,
    #[error("Import failed: {0}")]
    Import(String),
    #[error("Invalid state for this action: {0}")]
    InvalidState(String),
    #[error("Player {0} not found")]
    PlayerNotFound(PlayerId),
    #[error("Court {0} not found")]
    CourtNotFound(CourtId),
    #[error("Session {0} not found")]
    SessionNotFound(SessionId),
    #[error("Game {0} not found")]
    GameNotFound(GameId),
    #[error("Roster {0} not found")]
    RosterNotFound(RosterId),
    #[error("Internal consistency error: {0}")]
    Inconsistent(String),
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Snapshot format error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            InvalidState(_) => ErrorKind::InvalidState,
            PlayerNotFound(_) | CourtNotFound(_) | SessionNotFound(_) | GameNotFound(_)
            | RosterNotFound(_) => ErrorKind::NotFound,
            Inconsistent(_) => ErrorKind::Consistency,
            Io(_) | Json(_) => ErrorKind::Storage,
            _ => ErrorKind::Validation,
        }
    }
}

/// One court's ranked table within a session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CourtTable {
    pub court_id: CourtId,
    pub court_name: String,
    pub rank: u32,
    pub standings: Vec<PlayerStanding>,
}

/// Full tournament state: players, courts, sessions, rosters and games.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Tournament {
    pub players: Vec<Player>,
    /// Courts in rank order (rank 1 first).
    pub courts: Vec<Court>,
    pub sessions: Vec<Session>,
    pub rosters: Vec<Roster>,
    pub games: Vec<Game>,
}

impl Tournament {
    /// Create a tournament with the given courts (ranked top to bottom) and no players or sessions.
    pub fn new<S: AsRef<str>>(court_names: &[S]) -> Self {
        let mut t = Self::default();
        for name in court_names {
            t.add_court(name.as_ref());
        }
        t
    }

    /// Create a tournament with courts and `sessions` pending sessions numbered from 1.
    pub fn with_sessions<S: AsRef<str>>(court_names: &[S], sessions: u32) -> Self {
        let mut t = Self::new(court_names);
        for _ in 0..sessions {
            t.create_session();
        }
        t
    }

    /// Add a player. Names are trimmed and must be unique (case-insensitive).
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<PlayerId, TournamentError> {
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        if self.find_player_by_name(name_trimmed).is_some() {
            return Err(TournamentError::DuplicatePlayerName);
        }
        let player = Player::new(name_trimmed);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Case-insensitive lookup by trimmed name.
    pub fn find_player_by_name(&self, name: &str) -> Option<&Player> {
        let name = name.trim();
        self.players.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Append a court below the current bottom court.
    pub fn add_court(&mut self, name: impl Into<String>) -> CourtId {
        let court = Court::new(name, self.courts.len() as u32 + 1);
        let id = court.id;
        self.courts.push(court);
        id
    }

    /// Append a pending session numbered one past the last.
    pub fn create_session(&mut self) -> SessionId {
        let number = self.sessions.iter().map(|s| s.number).max().unwrap_or(0) + 1;
        let session = Session::new(number);
        let id = session.id;
        self.sessions.push(session);
        id
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, TournamentError> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(TournamentError::PlayerNotFound(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, TournamentError> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(TournamentError::PlayerNotFound(id))
    }

    /// Display name for messages; falls back to the id for unknown players.
    pub fn player_name(&self, id: PlayerId) -> String {
        self.player(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|_| id.to_string())
    }

    pub fn court(&self, id: CourtId) -> Result<&Court, TournamentError> {
        self.courts
            .iter()
            .find(|c| c.id == id)
            .ok_or(TournamentError::CourtNotFound(id))
    }

    pub fn session(&self, id: SessionId) -> Result<&Session, TournamentError> {
        self.sessions
            .iter()
            .find(|s| s.id == id)
            .ok_or(TournamentError::SessionNotFound(id))
    }

    pub fn session_mut(&mut self, id: SessionId) -> Result<&mut Session, TournamentError> {
        self.sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(TournamentError::SessionNotFound(id))
    }

    pub fn session_by_number(&self, number: u32) -> Option<&Session> {
        self.sessions.iter().find(|s| s.number == number)
    }

    pub fn active_session(&self) -> Option<&Session> {
        self.sessions
            .iter()
            .find(|s| s.status == SessionStatus::Active)
    }

    pub fn roster(&self, id: RosterId) -> Result<&Roster, TournamentError> {
        self.rosters
            .iter()
            .find(|r| r.id == id)
            .ok_or(TournamentError::RosterNotFound(id))
    }

    pub fn game(&self, id: GameId) -> Result<&Game, TournamentError> {
        self.games
            .iter()
            .find(|g| g.id == id)
            .ok_or(TournamentError::GameNotFound(id))
    }

    pub fn game_mut(&mut self, id: GameId) -> Result<&mut Game, TournamentError> {
        self.games
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(TournamentError::GameNotFound(id))
    }

    /// Rank of a court, or `u32::MAX` for unknown courts so they sort last.
    fn court_rank(&self, id: CourtId) -> u32 {
        self.court(id).map(|c| c.rank).unwrap_or(u32::MAX)
    }

    /// Rosters of a session ordered by court rank.
    pub fn session_rosters(&self, session_id: SessionId) -> Vec<&Roster> {
        let mut rosters: Vec<&Roster> = self
            .rosters
            .iter()
            .filter(|r| r.session_id == session_id)
            .collect();
        rosters.sort_by_key(|r| self.court_rank(r.court_id));
        rosters
    }

    /// The roster for one court in one session, if assigned.
    pub fn court_roster(&self, session_id: SessionId, court_id: CourtId) -> Option<&Roster> {
        self.rosters
            .iter()
            .find(|r| r.session_id == session_id && r.court_id == court_id)
    }

    /// Games of a roster ordered by game number.
    pub fn roster_games(&self, roster_id: RosterId) -> Vec<&Game> {
        let mut games: Vec<&Game> = self
            .games
            .iter()
            .filter(|g| g.roster_id == roster_id)
            .collect();
        games.sort_by_key(|g| g.number);
        games
    }

    /// Games of a session, by court rank then game number.
    pub fn session_games(&self, session_id: SessionId) -> Vec<&Game> {
        self.session_rosters(session_id)
            .into_iter()
            .flat_map(|r| self.roster_games(r.id))
            .collect()
    }

    /// All players ranked by net points, then total score, then name.
    pub fn standings(&self) -> Vec<PlayerStanding> {
        let mut players: Vec<&Player> = self.players.iter().collect();
        players.sort_by(|a, b| compare_standing(a, b));
        players.into_iter().map(Player::standing).collect()
    }

    /// Ranked table per court for one session, courts in rank order.
    pub fn court_standings(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<CourtTable>, TournamentError> {
        self.session(session_id)?;
        self.session_rosters(session_id)
            .into_iter()
            .map(|roster| {
                let court = self.court(roster.court_id)?;
                let mut players = roster
                    .player_ids
                    .iter()
                    .map(|&id| self.player(id))
                    .collect::<Result<Vec<_>, _>>()?;
                players.sort_by(|a, b| compare_standing(a, b));
                Ok(CourtTable {
                    court_id: court.id,
                    court_name: court.name.clone(),
                    rank: court.rank,
                    standings: players.into_iter().map(Player::standing).collect(),
                })
            })
            .collect()
    }

    /// Players not on any roster of the session.
    pub fn bench(&self, session_id: SessionId) -> Result<Vec<&Player>, TournamentError> {
        self.session(session_id)?;
        let assigned: HashSet<PlayerId> = self
            .session_rosters(session_id)
            .into_iter()
            .flat_map(|r| r.player_ids.iter().copied())
            .collect();
        Ok(self.players.iter().filter(|p| !assigned.contains(&p.id)).collect())
    }
}
