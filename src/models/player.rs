//! Player and PlayerStanding data structures.

use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in rosters, games and lookups).
pub type PlayerId = Uuid;

/// Standings view of a player (for API / display).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStanding {
    pub player_id: PlayerId,
    pub name: String,
    pub points_for: u32,
    pub points_against: u32,
    pub net_points: i64,
    pub total_score: u32,
}

impl PlayerStanding {
    pub fn from_player(p: &Player) -> Self {
        Self {
            player_id: p.id,
            name: p.name.clone(),
            points_for: p.points_for,
            points_against: p.points_against,
            net_points: p.net_points(),
            total_score: p.total_score,
        }
    }
}

/// A player with cumulative scoring across all sessions.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub points_for: u32,
    pub points_against: u32,
    /// Sum of per-game points earned. Tracks `points_for` in team-score mode.
    pub total_score: u32,
}

impl Player {
    /// Create a new player with the given name. Counters start at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            points_for: 0,
            points_against: 0,
            total_score: 0,
        }
    }

    /// Net points (`points_for - points_against`), the primary ranking metric.
    pub fn net_points(&self) -> i64 {
        i64::from(self.points_for) - i64::from(self.points_against)
    }

    /// Current standing as a separate struct (for API responses).
    pub fn standing(&self) -> PlayerStanding {
        PlayerStanding::from_player(self)
    }

    /// Record one game: `scored` by this player's team, `conceded` by the opponents.
    pub fn credit_game(&mut self, scored: u32, conceded: u32) -> Result<(), TournamentError> {
        let overflow = || {
            TournamentError::Inconsistent(format!("score counter overflow for {}", self.name))
        };
        let points_for = self.points_for.checked_add(scored).ok_or_else(overflow)?;
        let points_against = self.points_against.checked_add(conceded).ok_or_else(overflow)?;
        let total_score = self.total_score.checked_add(scored).ok_or_else(overflow)?;
        self.points_for = points_for;
        self.points_against = points_against;
        self.total_score = total_score;
        Ok(())
    }

    /// Reverse a previously credited game. Fails without changing anything if a
    /// counter would go below zero.
    pub fn revert_game(&mut self, scored: u32, conceded: u32) -> Result<(), TournamentError> {
        let underflow = || {
            TournamentError::Inconsistent(format!(
                "cannot reverse {scored}-{conceded} for {}: counters are {}/{}/{}",
                self.name, self.points_for, self.points_against, self.total_score
            ))
        };
        let points_for = self.points_for.checked_sub(scored).ok_or_else(underflow)?;
        let points_against = self.points_against.checked_sub(conceded).ok_or_else(underflow)?;
        let total_score = self.total_score.checked_sub(scored).ok_or_else(underflow)?;
        self.points_for = points_for;
        self.points_against = points_against;
        self.total_score = total_score;
        Ok(())
    }

    /// Zero every counter (administrative reset).
    pub fn clear_scores(&mut self) {
        self.points_for = 0;
        self.points_against = 0;
        self.total_score = 0;
    }
}
