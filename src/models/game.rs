//! Game (a 2v2 doubles match on one court), Team, and GameStatus.

use crate::models::player::PlayerId;
use crate::models::roster::RosterId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a game.
pub type GameId = Uuid;

/// One side of a game.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    #[default]
    One,
    Two,
}

impl Team {
    pub fn opponent(self) -> Self {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Pending,
    Completed,
}

/// A single game: two teams of exactly two players.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub roster_id: RosterId,
    /// Position in the roster's schedule, starting at 1.
    pub number: u32,
    pub status: GameStatus,
    pub team_1: [PlayerId; 2],
    pub team_2: [PlayerId; 2],
    /// Zero until the game is completed.
    pub team_1_score: u32,
    pub team_2_score: u32,
}

impl Game {
    pub fn new(
        roster_id: RosterId,
        number: u32,
        team_1: [PlayerId; 2],
        team_2: [PlayerId; 2],
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            roster_id,
            number,
            status: GameStatus::Pending,
            team_1,
            team_2,
            team_1_score: 0,
            team_2_score: 0,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }

    pub fn team(&self, team: Team) -> &[PlayerId; 2] {
        match team {
            Team::One => &self.team_1,
            Team::Two => &self.team_2,
        }
    }

    pub fn team_mut(&mut self, team: Team) -> &mut [PlayerId; 2] {
        match team {
            Team::One => &mut self.team_1,
            Team::Two => &mut self.team_2,
        }
    }

    pub fn score(&self, team: Team) -> u32 {
        match team {
            Team::One => self.team_1_score,
            Team::Two => self.team_2_score,
        }
    }

    /// All four players, team 1 first.
    pub fn players(&self) -> [PlayerId; 4] {
        [self.team_1[0], self.team_1[1], self.team_2[0], self.team_2[1]]
    }

    /// Which team a player is on, if any.
    pub fn team_of(&self, player_id: PlayerId) -> Option<Team> {
        if self.team_1.contains(&player_id) {
            Some(Team::One)
        } else if self.team_2.contains(&player_id) {
            Some(Team::Two)
        } else {
            None
        }
    }

    /// Recorded score for a player: their team's score (team-score mode).
    pub fn score_for(&self, player_id: PlayerId) -> Option<u32> {
        self.team_of(player_id).map(|t| self.score(t))
    }

    /// Each player with the points they scored and conceded in this game.
    pub fn player_results(&self) -> [(PlayerId, u32, u32); 4] {
        let row = |team: Team, seat: usize| {
            (self.team(team)[seat], self.score(team), self.score(team.opponent()))
        };
        [
            row(Team::One, 0),
            row(Team::One, 1),
            row(Team::Two, 0),
            row(Team::Two, 1),
        ]
    }
}
