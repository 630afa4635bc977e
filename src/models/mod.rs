//! Data structures for the Americano tournament: players, courts, sessions, rosters, games.

mod court;
mod game;
mod player;
mod roster;
mod session;
mod tournament;

pub use court::{Court, CourtId};
pub use game::{Game, GameId, GameStatus, Team};
pub use player::{Player, PlayerId, PlayerStanding};
pub use roster::{Roster, RosterId};
pub use session::{Session, SessionId, SessionStatus};
pub use tournament::{AppearanceMismatch, CourtTable, ErrorKind, Tournament, TournamentError};
