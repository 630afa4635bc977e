//! Integration tests for the pairing generator and the distribution check.

use padel_americano::{
    generate_pairings, validate_game_distribution, Pairing, PlayerId, TournamentError,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

fn appearances(games: &[Pairing<usize>], n: usize) -> Vec<usize> {
    let mut counts = vec![0; n];
    for g in games {
        for &i in g.players() {
            counts[i] += 1;
        }
    }
    counts
}

fn lineup(p: &Pairing<PlayerId>) -> [PlayerId; 4] {
    [p.team_1[0], p.team_1[1], p.team_2[0], p.team_2[1]]
}

#[test]
fn every_player_plays_exactly_two_games() {
    for n in [8, 10, 12] {
        let players: Vec<usize> = (0..n).collect();
        let games = generate_pairings(&players).unwrap();
        assert_eq!(games.len(), n / 2);
        assert!(appearances(&games, n).iter().all(|&c| c == 2), "size {n}");
    }
}

#[test]
fn games_are_numbered_from_one() {
    let players: Vec<usize> = (0..12).collect();
    let numbers: Vec<u32> = generate_pairings(&players)
        .unwrap()
        .iter()
        .map(|g| g.number)
        .collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn no_partnership_repeats() {
    for n in [8, 10, 12] {
        let players: Vec<usize> = (0..n).collect();
        let mut partners = HashSet::new();
        for g in generate_pairings(&players).unwrap() {
            for team in [g.team_1, g.team_2] {
                let key = (team[0].min(team[1]), team[0].max(team[1]));
                assert!(partners.insert(key), "size {n}: {key:?} partner twice");
            }
        }
    }
}

#[test]
fn no_player_appears_twice_in_one_game() {
    for n in [8, 10, 12] {
        let players: Vec<usize> = (0..n).collect();
        for g in generate_pairings(&players).unwrap() {
            let set: HashSet<usize> = g.players().into_iter().copied().collect();
            assert_eq!(set.len(), 4);
        }
    }
}

#[test]
fn eight_player_table_is_fixed() {
    assert_eq!(
        table(8),
        vec![([0, 1], [2, 3]), ([4, 5], [6, 7]), ([0, 2], [4, 6]), ([1, 3], [5, 7])]
    );
}

fn table(n: usize) -> Vec<([usize; 2], [usize; 2])> {
    let players: Vec<usize> = (0..n).collect();
    generate_pairings(&players)
        .unwrap()
        .iter()
        .map(|g| (g.team_1, g.team_2))
        .collect()
}

#[test]
fn ten_player_table_is_fixed() {
    assert_eq!(
        table(10),
        vec![
            ([0, 1], [2, 3]),
            ([4, 5], [6, 7]),
            ([8, 9], [0, 2]),
            ([1, 3], [4, 6]),
            ([5, 8], [7, 9]),
        ]
    );
}

#[test]
fn twelve_player_table_is_fixed() {
    assert_eq!(
        table(12),
        vec![
            ([0, 1], [2, 3]),
            ([4, 5], [6, 7]),
            ([8, 9], [10, 11]),
            ([0, 2], [4, 6]),
            ([1, 3], [5, 7]),
            ([8, 10], [9, 11]),
        ]
    );
}

#[test]
fn uses_input_order_as_index() {
    let players = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"];
    let games = generate_pairings(&players).unwrap();
    assert_eq!(games[0].team_1, ["a", "b"]);
    assert_eq!(games[0].team_2, ["c", "d"]);
    assert_eq!(games[2].team_1, ["i", "j"]);
    assert_eq!(games[2].team_2, ["a", "c"]);
}

#[test]
fn deterministic_for_same_input() {
    let players: Vec<PlayerId> = (0..12).map(|_| Uuid::new_v4()).collect();
    assert_eq!(generate_pairings(&players).unwrap(), generate_pairings(&players).unwrap());
}

#[test]
fn unsupported_sizes_are_rejected() {
    for n in [0, 4, 7, 9, 11, 13, 16] {
        let players: Vec<usize> = (0..n).collect();
        assert!(
            matches!(
                generate_pairings(&players),
                Err(TournamentError::InvalidRosterSize { size }) if size == n
            ),
            "size {n}"
        );
    }
}

#[test]
fn generated_schedule_passes_validation() {
    let roster: Vec<PlayerId> = (0..10).map(|_| Uuid::new_v4()).collect();
    let games = generate_pairings(&roster).unwrap();
    assert!(validate_game_distribution(&roster, games.iter().map(lineup)).is_ok());
}

#[test]
fn validation_lists_every_mismatched_player() {
    let roster: Vec<PlayerId> = (0..8).map(|_| Uuid::new_v4()).collect();
    let mut lineups: Vec<[PlayerId; 4]> = generate_pairings(&roster)
        .unwrap()
        .iter()
        .map(lineup)
        .collect();
    // Player 0 takes player 7's seat in the last game.
    lineups[3][3] = roster[0];

    let Err(TournamentError::DistributionMismatch(list)) =
        validate_game_distribution(&roster, lineups)
    else {
        panic!("expected a distribution mismatch");
    };
    let counts: HashMap<PlayerId, usize> = list.iter().map(|m| (m.player_id, m.games)).collect();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[&roster[0]], 3);
    assert_eq!(counts[&roster[7]], 1);
    assert_eq!(list[0].player_id, roster[0]);
}

#[test]
fn validation_reports_players_missing_from_roster() {
    let roster: Vec<PlayerId> = (0..8).map(|_| Uuid::new_v4()).collect();
    let stranger = Uuid::new_v4();
    let mut lineups: Vec<[PlayerId; 4]> = generate_pairings(&roster)
        .unwrap()
        .iter()
        .map(lineup)
        .collect();
    lineups[0][0] = stranger;
    lineups[2][0] = stranger;

    let Err(TournamentError::DistributionMismatch(list)) =
        validate_game_distribution(&roster, lineups)
    else {
        panic!("expected a distribution mismatch");
    };
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].player_id, roster[0]);
    assert_eq!(list[0].games, 0);
    assert_eq!(list[1].player_id, stranger);
    assert_eq!(list[1].games, 2);
}
