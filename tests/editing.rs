//! Integration tests for manual schedule edits (seat swaps and lineup replacement).

use padel_americano::{
    apply_game_score, assign_session, replace_lineups, swap_players, Game, GameSlot, LineupEdit,
    PlayerId, RosterId, Team, Tournament, TournamentError,
};

/// One active court of 8 players; returns the roster id and players in pairing order.
fn eight_player_court() -> (Tournament, RosterId, Vec<PlayerId>) {
    let mut t = Tournament::with_sessions(&["Championship"], 1);
    let ids: Vec<PlayerId> = (0..8).map(|i| t.add_player(format!("P{i}")).unwrap()).collect();
    let session = t.sessions[0].id;
    let court = t.courts[0].id;
    assign_session(&mut t, session, &[(court, ids.clone())]).unwrap();
    let roster = t.rosters[0].id;
    (t, roster, ids)
}

fn schedule(t: &Tournament, roster: RosterId) -> Vec<Game> {
    t.roster_games(roster).into_iter().cloned().collect()
}

fn slot(game: usize, team: Team, seat: usize) -> GameSlot {
    GameSlot { game, team, seat }
}

#[test]
fn swap_exchanges_two_seats_in_different_games() {
    let (mut t, roster, p) = eight_player_court();
    // G1 {0,1}v{2,3}, G2 {4,5}v{6,7}: swap P0 and P4.
    swap_players(&mut t, roster, slot(0, Team::One, 0), slot(1, Team::One, 0)).unwrap();

    let games = schedule(&t, roster);
    assert_eq!(games[0].team_1, [p[4], p[1]]);
    assert_eq!(games[1].team_1, [p[0], p[5]]);
    assert_eq!(games[2].team_1, [p[0], p[2]]);
}

#[test]
fn swap_within_one_game_is_rejected() {
    let (mut t, roster, _) = eight_player_court();
    let before = schedule(&t, roster);
    assert!(matches!(
        swap_players(&mut t, roster, slot(0, Team::One, 0), slot(0, Team::Two, 1)),
        Err(TournamentError::SwapWithinGame)
    ));
    assert_eq!(schedule(&t, roster), before);
}

#[test]
fn swap_that_doubles_a_player_in_a_game_is_rejected() {
    let (mut t, roster, p) = eight_player_court();
    let before = schedule(&t, roster);
    // G3 is {0,2}v{4,6}; moving P0 into P4's seat puts P0 there twice.
    let result = swap_players(&mut t, roster, slot(0, Team::One, 0), slot(2, Team::Two, 0));
    assert!(matches!(
        result,
        Err(TournamentError::DuplicatePlayerInGame { game: 3, player }) if player == p[0]
    ));
    assert_eq!(schedule(&t, roster), before);
}

#[test]
fn swap_out_of_range_is_rejected() {
    let (mut t, roster, _) = eight_player_court();
    assert!(matches!(
        swap_players(&mut t, roster, slot(9, Team::One, 0), slot(0, Team::One, 0)),
        Err(TournamentError::InvalidSlot { game: 9, seat: 0 })
    ));
    assert!(matches!(
        swap_players(&mut t, roster, slot(0, Team::One, 2), slot(1, Team::One, 0)),
        Err(TournamentError::InvalidSlot { game: 0, seat: 2 })
    ));
}

#[test]
fn swap_touching_a_completed_game_is_rejected() {
    let (mut t, roster, _) = eight_player_court();
    let first = schedule(&t, roster)[0].id;
    apply_game_score(&mut t, first, 7, 4).unwrap();
    assert!(matches!(
        swap_players(&mut t, roster, slot(1, Team::One, 0), slot(0, Team::Two, 0)),
        Err(TournamentError::GameAlreadyCompleted(id)) if id == first
    ));
}

#[test]
fn replace_lineups_accepts_a_balanced_schedule() {
    let (mut t, roster, p) = eight_player_court();
    let games = schedule(&t, roster);
    // Swap P1 and P5 between G1 and G2 by rewriting both lineups.
    let edits = vec![
        LineupEdit {
            game_id: games[0].id,
            team_1: vec![p[0], p[5]],
            team_2: vec![p[2], p[3]],
        },
        LineupEdit {
            game_id: games[1].id,
            team_1: vec![p[4], p[1]],
            team_2: vec![p[6], p[7]],
        },
    ];
    replace_lineups(&mut t, roster, &edits).unwrap();

    let after = schedule(&t, roster);
    assert_eq!(after[0].team_1, [p[0], p[5]]);
    assert_eq!(after[1].team_1, [p[4], p[1]]);
    assert_eq!(after[2], games[2]);
}

#[test]
fn replace_lineups_lists_players_with_wrong_game_counts() {
    let (mut t, roster, p) = eight_player_court();
    let games = schedule(&t, roster);
    let before = schedule(&t, roster);
    // P0 replaces P6 in G2: P0 plays 3 games, P6 plays 1.
    let edits = vec![LineupEdit {
        game_id: games[1].id,
        team_1: vec![p[4], p[5]],
        team_2: vec![p[0], p[7]],
    }];
    let Err(TournamentError::DistributionMismatch(list)) = replace_lineups(&mut t, roster, &edits)
    else {
        panic!("expected a distribution mismatch");
    };
    let found: Vec<(PlayerId, usize)> = list.iter().map(|m| (m.player_id, m.games)).collect();
    assert_eq!(found, vec![(p[0], 3), (p[6], 1)]);
    assert_eq!(schedule(&t, roster), before);
}

#[test]
fn replace_lineups_requires_teams_of_two() {
    let (mut t, roster, p) = eight_player_court();
    let games = schedule(&t, roster);
    let edits = vec![LineupEdit {
        game_id: games[0].id,
        team_1: vec![p[0], p[1], p[4]],
        team_2: vec![p[2], p[3]],
    }];
    assert!(matches!(
        replace_lineups(&mut t, roster, &edits),
        Err(TournamentError::InvalidTeamSize { size: 3 })
    ));
}

#[test]
fn replace_lineups_rejects_players_from_elsewhere() {
    let (mut t, roster, p) = eight_player_court();
    let outsider = t.add_player("Outsider").unwrap();
    let games = schedule(&t, roster);
    let edits = vec![LineupEdit {
        game_id: games[0].id,
        team_1: vec![p[0], outsider],
        team_2: vec![p[2], p[3]],
    }];
    assert!(matches!(
        replace_lineups(&mut t, roster, &edits),
        Err(TournamentError::PlayerNotOnRoster { player }) if player == outsider
    ));
}
