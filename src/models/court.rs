//! Court: a ranked tier that players are promoted to and relegated from.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a court.
pub type CourtId = Uuid;

/// A court. Rank 1 is the top tier; the highest rank is the bottom tier.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub id: CourtId,
    pub name: String,
    pub rank: u32,
}

impl Court {
    pub fn new(name: impl Into<String>, rank: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rank,
        }
    }
}
