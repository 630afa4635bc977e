//! Integration tests for ranking and the promotion/relegation engine.

use padel_americano::{
    compute_next_rosters, rank_players, CourtStanding, Direction, Player, PlayerId,
    TournamentError, PROMOTION_GROUP_SIZE,
};
use std::collections::HashSet;
use uuid::Uuid;

fn scored(name: &str, points_for: u32, points_against: u32) -> Player {
    let mut p = Player::new(name);
    p.points_for = points_for;
    p.points_against = points_against;
    p.total_score = points_for;
    p
}

/// A court whose players are already in ranked order: player 0 has the best net points.
fn court(rank: u32, size: usize) -> CourtStanding {
    CourtStanding {
        court_id: Uuid::new_v4(),
        rank,
        players: (0..size)
            .map(|i| scored(&format!("R{rank}P{i}"), 100 - i as u32, 50))
            .collect(),
    }
}

fn ids(players: &[Player]) -> Vec<PlayerId> {
    players.iter().map(|p| p.id).collect()
}

fn as_set(ids: &[PlayerId]) -> HashSet<PlayerId> {
    ids.iter().copied().collect()
}

#[test]
fn group_size_is_three() {
    assert_eq!(PROMOTION_GROUP_SIZE, 3);
}

#[test]
fn ranking_uses_net_points_then_total_then_name() {
    let mut players = vec![
        scored("Zed", 20, 10),  // net 10, total 20
        scored("Amy", 30, 25),  // net 5
        scored("Bob", 40, 30),  // net 10, total 40
        scored("Cat", 20, 10),  // net 10, total 20
    ];
    rank_players(&mut players);
    let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Bob", "Cat", "Zed", "Amy"]);
}

#[test]
fn three_courts_of_ten_rebalance_by_three() {
    let courts = vec![court(1, 10), court(2, 10), court(3, 10)];
    let plan = compute_next_rosters(&courts).unwrap();
    let [top, mid, bottom] = [&courts[0], &courts[1], &courts[2]].map(|c| ids(&c.players));

    assert_eq!(plan.rosters.len(), 3);
    let new_top = as_set(&plan.rosters[0].player_ids);
    let new_mid = as_set(&plan.rosters[1].player_ids);
    let new_bottom = as_set(&plan.rosters[2].player_ids);

    // Top court: its bottom 3 go down, rank 2's top 3 come up.
    assert!(top[7..].iter().all(|id| new_mid.contains(id)));
    assert!(top[..7].iter().all(|id| new_top.contains(id)));
    assert!(mid[..3].iter().all(|id| new_top.contains(id)));
    // Middle court: bottom 3 go down, middle 4 stay, rank 3's top 3 come up.
    assert!(mid[3..7].iter().all(|id| new_mid.contains(id)));
    assert!(mid[7..].iter().all(|id| new_bottom.contains(id)));
    assert!(bottom[..3].iter().all(|id| new_mid.contains(id)));
    assert!(bottom[3..].iter().all(|id| new_bottom.contains(id)));

    // Conservation: 30 in, 30 out, everyone exactly once.
    let all: Vec<PlayerId> = plan
        .rosters
        .iter()
        .flat_map(|r| r.player_ids.iter().copied())
        .collect();
    assert_eq!(all.len(), 30);
    assert_eq!(as_set(&all).len(), 30);
    assert!(plan.rosters.iter().all(|r| r.player_ids.len() == 10));
    assert_eq!(plan.movements.len(), 12);
}

#[test]
fn ranking_inside_a_court_decides_who_moves() {
    let mut courts = vec![court(1, 8), court(2, 8)];
    // Reverse court 2 so its input order is worst first.
    courts[1].players.reverse();
    let plan = compute_next_rosters(&courts).unwrap();
    let best_of_court_2: Vec<PlayerId> =
        courts[1].players.iter().rev().take(3).map(|p| p.id).collect();
    let new_top = as_set(&plan.rosters[0].player_ids);
    assert!(best_of_court_2.iter().all(|id| new_top.contains(id)));
}

#[test]
fn new_roster_order_is_relegated_then_stayers_then_promoted() {
    let courts = vec![court(1, 8), court(2, 8), court(3, 8)];
    let plan = compute_next_rosters(&courts).unwrap();
    let top = ids(&courts[0].players);
    let mid = ids(&courts[1].players);
    let bottom = ids(&courts[2].players);

    let expected_mid: Vec<PlayerId> = top[5..]
        .iter()
        .chain(&mid[3..5])
        .chain(&bottom[..3])
        .copied()
        .collect();
    assert_eq!(plan.rosters[1].player_ids, expected_mid);
    let expected_top: Vec<PlayerId> = top[..5].iter().chain(&mid[..3]).copied().collect();
    assert_eq!(plan.rosters[0].player_ids, expected_top);
}

#[test]
fn movements_record_direction_and_courts() {
    let courts = vec![court(1, 10), court(2, 10)];
    let plan = compute_next_rosters(&courts).unwrap();
    let promoted: Vec<_> = plan
        .movements
        .iter()
        .filter(|m| m.direction == Direction::Promoted)
        .collect();
    let relegated: Vec<_> = plan
        .movements
        .iter()
        .filter(|m| m.direction == Direction::Relegated)
        .collect();
    assert_eq!(promoted.len(), 3);
    assert_eq!(relegated.len(), 3);
    assert!(promoted.iter().all(|m| m.from == courts[1].court_id && m.to == courts[0].court_id));
    assert!(relegated.iter().all(|m| m.from == courts[0].court_id && m.to == courts[1].court_id));
}

#[test]
fn courts_are_ordered_by_rank_not_input_position() {
    let courts = vec![court(2, 10), court(1, 10)];
    let plan = compute_next_rosters(&courts).unwrap();
    assert_eq!(plan.rosters[0].rank, 1);
    assert_eq!(plan.rosters[0].court_id, courts[1].court_id);
    // Rank 1's bottom three went to rank 2.
    let new_second = as_set(&plan.rosters[1].player_ids);
    assert!(ids(&courts[1].players)[7..].iter().all(|id| new_second.contains(id)));
}

#[test]
fn single_court_keeps_everyone() {
    let courts = vec![court(1, 12)];
    let plan = compute_next_rosters(&courts).unwrap();
    assert_eq!(plan.rosters[0].player_ids, ids(&courts[0].players));
    assert!(plan.movements.is_empty());
}

#[test]
fn middle_court_needs_room_for_both_groups() {
    let courts = vec![court(1, 10), court(2, 5), court(3, 10)];
    assert!(matches!(
        compute_next_rosters(&courts),
        Err(TournamentError::CourtTooSmall { size: 5, required: 6, .. })
    ));
}

#[test]
fn duplicate_ranks_are_rejected() {
    let courts = vec![court(1, 10), court(1, 10)];
    assert!(matches!(
        compute_next_rosters(&courts),
        Err(TournamentError::DuplicateCourtRank { rank: 1 })
    ));
}
