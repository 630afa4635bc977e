//! Roster: the players assigned to one court for one session.

use crate::models::court::CourtId;
use crate::models::player::PlayerId;
use crate::models::session::SessionId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a roster.
pub type RosterId = Uuid;

/// Player order is the canonical index used by the pairing tables.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub id: RosterId,
    pub session_id: SessionId,
    pub court_id: CourtId,
    pub player_ids: Vec<PlayerId>,
}

impl Roster {
    pub fn new(session_id: SessionId, court_id: CourtId, player_ids: Vec<PlayerId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            court_id,
            player_ids,
        }
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.player_ids.contains(&player_id)
    }
}
