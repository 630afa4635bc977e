//! Session (one round of competition across all courts) and its status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a session.
pub type SessionId = Uuid;

/// Lifecycle of a session: `Pending --assign--> Active --complete--> Completed`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Pending,
    Active,
    /// Read-only history; only a score reset may touch its games.
    Completed,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// Sequential number, starting at 1.
    pub number: u32,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(number: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            status: SessionStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}
