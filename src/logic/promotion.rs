//! Promotion and relegation between ranked courts at the end of a session.

use crate::models::{CourtId, Player, PlayerId, TournamentError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Players moved up from, and down to, each court per session.
pub const PROMOTION_GROUP_SIZE: usize = 3;

/// Final standings of one court, as input to [`compute_next_rosters`].
#[derive(Clone, Debug)]
pub struct CourtStanding {
    pub court_id: CourtId,
    pub rank: u32,
    pub players: Vec<Player>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Promoted,
    Relegated,
}

/// One player changing court.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub player_id: PlayerId,
    pub from: CourtId,
    pub to: CourtId,
    pub direction: Direction,
}

/// A court's roster for the next session, in pairing order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NextRoster {
    pub court_id: CourtId,
    pub rank: u32,
    pub player_ids: Vec<PlayerId>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RebalancePlan {
    /// One entry per input court, in rank order.
    pub rosters: Vec<NextRoster>,
    pub movements: Vec<Movement>,
}

/// Total ranking order: net points descending, then total score descending, then
/// name ascending.
pub fn compare_standing(a: &Player, b: &Player) -> Ordering {
    b.net_points()
        .cmp(&a.net_points())
        .then_with(|| b.total_score.cmp(&a.total_score))
        .then_with(|| a.name.cmp(&b.name))
}

/// Sort players best first.
pub fn rank_players(players: &mut [Player]) {
    players.sort_by(compare_standing);
}

/// How one court's ranked players split up.
struct Split {
    up: Vec<PlayerId>,
    stay: Vec<PlayerId>,
    down: Vec<PlayerId>,
}

fn split_court(
    court: &CourtStanding,
    is_top: bool,
    is_bottom: bool,
) -> Result<Split, TournamentError> {
    let k = PROMOTION_GROUP_SIZE;
    let up_count = if is_top { 0 } else { k };
    let down_count = if is_bottom { 0 } else { k };
    let required = up_count + down_count;
    let size = court.players.len();
    if size < required {
        return Err(TournamentError::CourtTooSmall {
            court: court.court_id,
            size,
            required,
        });
    }

    let mut ranked = court.players.clone();
    rank_players(&mut ranked);
    let ids: Vec<PlayerId> = ranked.iter().map(|p| p.id).collect();
    Ok(Split {
        up: ids[..up_count].to_vec(),
        stay: ids[up_count..size - down_count].to_vec(),
        down: ids[size - down_count..].to_vec(),
    })
}

/// Compute every court's roster for the next session.
///
/// The top `PROMOTION_GROUP_SIZE` of each court below the top move up one court and the
/// bottom `PROMOTION_GROUP_SIZE` of each court above the bottom move down one court;
/// everyone else stays. A new roster lists players relegated from above, then stayers,
/// then players promoted from below.
pub fn compute_next_rosters(courts: &[CourtStanding]) -> Result<RebalancePlan, TournamentError> {
    let mut ordered: Vec<&CourtStanding> = courts.iter().collect();
    ordered.sort_by_key(|c| c.rank);
    if let Some(pair) = ordered.windows(2).find(|w| w[0].rank == w[1].rank) {
        return Err(TournamentError::DuplicateCourtRank { rank: pair[0].rank });
    }

    let last = ordered.len().saturating_sub(1);
    let splits = ordered
        .iter()
        .enumerate()
        .map(|(i, court)| split_court(court, i == 0, i == last))
        .collect::<Result<Vec<_>, _>>()?;

    let mut plan = RebalancePlan::default();
    for (i, court) in ordered.iter().enumerate() {
        let mut player_ids = Vec::with_capacity(court.players.len());
        if i > 0 {
            let above = ordered[i - 1];
            for &id in &splits[i - 1].down {
                player_ids.push(id);
                plan.movements.push(Movement {
                    player_id: id,
                    from: above.court_id,
                    to: court.court_id,
                    direction: Direction::Relegated,
                });
            }
        }
        player_ids.extend_from_slice(&splits[i].stay);
        if i < last {
            let below = ordered[i + 1];
            for &id in &splits[i + 1].up {
                player_ids.push(id);
                plan.movements.push(Movement {
                    player_id: id,
                    from: below.court_id,
                    to: court.court_id,
                    direction: Direction::Promoted,
                });
            }
        }
        plan.rosters.push(NextRoster {
            court_id: court.court_id,
            rank: court.rank,
            player_ids,
        });
    }
    Ok(plan)
}
