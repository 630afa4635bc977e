//! Tournament business logic: pairing, scoring, resets, promotion and session flow.

mod editing;
mod pairing;
mod promotion;
mod reset;
mod scoring;
mod session;

pub use editing::{replace_lineups, swap_players, GameSlot, LineupEdit};
pub use pairing::{
    generate_pairings, is_supported_roster_size, validate_game_distribution, Pairing,
    GAMES_PER_PLAYER, SUPPORTED_ROSTER_SIZES,
};
pub use promotion::{
    compare_standing, compute_next_rosters, rank_players, CourtStanding, Direction, Movement,
    NextRoster, RebalancePlan, PROMOTION_GROUP_SIZE,
};
pub use reset::{reset_all_scores, reset_session_scores};
pub use scoring::{apply_game_score, parse_score};
pub use session::{assign_session, complete_session, reassign_court, SessionOutcome, UnpairedCourt};
