//! Padel Americano tournament: library with models, business logic and the state
//! plumbing used by the web binary.

pub mod config;
pub mod import;
pub mod logic;
pub mod models;
pub mod snapshot;

pub use import::import_roster_csv;
pub use logic::{
    apply_game_score, assign_session, compare_standing, complete_session, compute_next_rosters,
    generate_pairings, parse_score, rank_players, reassign_court, replace_lineups,
    reset_all_scores, reset_session_scores, swap_players, validate_game_distribution,
    CourtStanding, Direction, GameSlot, LineupEdit, Movement, NextRoster, Pairing, RebalancePlan,
    SessionOutcome, UnpairedCourt, PROMOTION_GROUP_SIZE,
};
pub use models::{
    AppearanceMismatch, Court, CourtId, CourtTable, ErrorKind, Game, GameId, GameStatus, Player,
    PlayerId, PlayerStanding, Roster, RosterId, Session, SessionId, SessionStatus, Team,
    Tournament, TournamentError,
};
