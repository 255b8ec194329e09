mod common;

use common::{
    create_organiser, create_test_users, ctx_for, pending_tournament, play_current_round,
    started_tournament, test_context, tournament_input,
};
use padelpoints_backend::error::AppError;
use padelpoints_backend::models::{TournamentFilter, TournamentStatus};
use padelpoints_backend::store::{RatingRepository, TournamentRepository};

#[tokio::test]
async fn test_create_validates_configuration() {
    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;

    let mut input = tournament_input(10, 32);
    let err = ctx
        .tournaments
        .create(&ctx_for(&organiser), input.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)), "max_players 10");

    input.max_players = 8;
    input.entry_fee = -1.0;
    let err = ctx
        .tournaments
        .create(&ctx_for(&organiser), input.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)), "negative fee");

    input.entry_fee = 0.0;
    input.points_per_match = 0;
    let err = ctx
        .tournaments
        .create(&ctx_for(&organiser), input.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)), "zero points");

    input.points_per_match = 32;
    input.name = "   ".to_string();
    let err = ctx
        .tournaments
        .create(&ctx_for(&organiser), input)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)), "blank name");
}

#[tokio::test]
async fn test_roster_management_while_pending() {
    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 5).await;

    let tournament = ctx
        .tournaments
        .create(&ctx_for(&organiser), tournament_input(4, 32))
        .await
        .unwrap();

    for player in &players[..4] {
        ctx.tournaments
            .join(&ctx_for(player), tournament.id)
            .await
            .unwrap();
    }

    // Full tournament rejects the fifth player.
    let err = ctx
        .tournaments
        .join(&ctx_for(&players[4]), tournament.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Double join is rejected.
    let err = ctx
        .tournaments
        .join(&ctx_for(&players[0]), tournament.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Leaving frees a slot; the eligibility view agrees.
    ctx.tournaments
        .leave(&ctx_for(&players[0]), tournament.id)
        .await
        .unwrap();
    let eligibility = ctx
        .tournaments
        .join_eligibility(players[4].id, tournament.id)
        .await
        .unwrap();
    assert!(eligibility.can_join);

    let summary = ctx.tournaments.get(tournament.id).await.unwrap();
    assert_eq!(summary.current_players, 3);
    assert!(!summary.is_full);
}

#[tokio::test]
async fn test_update_only_while_pending() {
    use padelpoints_backend::models::TournamentUpdate;

    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;

    let tournament = pending_tournament(&ctx, &organiser, &players, 32).await;

    // Shrinking below the roster is rejected; a valid edit sticks.
    let err = ctx
        .tournaments
        .update(
            &ctx_for(&organiser),
            tournament.id,
            TournamentUpdate {
                max_players: Some(4),
                points_per_match: Some(24),
                ..Default::default()
            },
        )
        .await
        .err();
    assert!(err.is_none(), "4 players fit max_players 4: {err:?}");

    let updated = ctx
        .tournaments
        .update(
            &ctx_for(&organiser),
            tournament.id,
            TournamentUpdate {
                name: Some("Saturday Americano".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Saturday Americano");
    assert_eq!(updated.points_per_match, 24);

    // Non-organisers may not edit.
    let err = ctx
        .tournaments
        .update(
            &ctx_for(&players[0]),
            tournament.id,
            TournamentUpdate::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthorizationFailed(_)));

    // Started tournaments are frozen.
    ctx.tournaments
        .start(&ctx_for(&organiser), tournament.id)
        .await
        .unwrap();
    let err = ctx
        .tournaments
        .update(
            &ctx_for(&organiser),
            tournament.id,
            TournamentUpdate {
                name: Some("Too late".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::WrongStatus(_)));
}

#[tokio::test]
async fn test_join_code_is_idempotent_and_unique() {
    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;

    let first = ctx
        .tournaments
        .create(&ctx_for(&organiser), tournament_input(8, 32))
        .await
        .unwrap();
    let second = ctx
        .tournaments
        .create(&ctx_for(&organiser), tournament_input(8, 32))
        .await
        .unwrap();

    let code_a = ctx
        .tournaments
        .get_or_create_join_code(&ctx_for(&organiser), first.id)
        .await
        .unwrap();
    let code_a_again = ctx
        .tournaments
        .get_or_create_join_code(&ctx_for(&organiser), first.id)
        .await
        .unwrap();
    assert_eq!(code_a, code_a_again, "join code is stable");

    let code_b = ctx
        .tournaments
        .get_or_create_join_code(&ctx_for(&organiser), second.id)
        .await
        .unwrap();
    assert_ne!(code_a, code_b, "join codes are unique per tournament");

    // Joining through the code lands on the right tournament.
    let player = create_test_users(&ctx.store, 1).await.remove(0);
    let joined = ctx
        .tournaments
        .join_by_code(&ctx_for(&player), &code_a)
        .await
        .unwrap();
    assert_eq!(joined.id, first.id);

    let err = ctx
        .tournaments
        .join_by_code(&ctx_for(&player), "ZZZZZZ")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_start_requires_valid_roster() {
    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 6).await;

    let tournament = pending_tournament(&ctx, &organiser, &players, 32).await;
    let err = ctx
        .tournaments
        .start(&ctx_for(&organiser), tournament.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidRoster(_)), "6 players");

    // The failed start leaves the tournament pending.
    let summary = ctx.tournaments.get(tournament.id).await.unwrap();
    assert_eq!(summary.tournament.status, TournamentStatus::Pending);
    assert!(
        ctx.tournaments
            .current_round_matches(tournament.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_start_materialises_schedule() {
    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 8).await;

    let started = started_tournament(&ctx, &organiser, &players, 32).await;
    assert_eq!(started.status, TournamentStatus::Active);
    assert_eq!(started.current_round, 1);
    assert_eq!(started.average_player_rating, Some(1000.0));

    let rounds = ctx.tournaments.all_rounds(started.id).await.unwrap();
    assert_eq!(rounds.len(), 7);
    assert!(rounds.iter().all(|(_, matches)| matches.len() == 2));

    let current = ctx
        .tournaments
        .current_round_matches(started.id)
        .await
        .unwrap();
    assert_eq!(current.len(), 2);
    assert!(current.iter().all(|m| m.round_number == 1));
}

#[tokio::test]
async fn test_start_twice_and_unauthorised_start() {
    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;

    let tournament = pending_tournament(&ctx, &organiser, &players, 32).await;

    let err = ctx
        .tournaments
        .start(&ctx_for(&players[0]), tournament.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthorizationFailed(_)));

    ctx.tournaments
        .start(&ctx_for(&organiser), tournament.id)
        .await
        .unwrap();

    let err = ctx
        .tournaments
        .start(&ctx_for(&organiser), tournament.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::WrongStatus(_)));
}

#[tokio::test]
async fn test_record_result_validation_and_idempotency() {
    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;

    let tournament = started_tournament(&ctx, &organiser, &players, 32).await;
    let m = ctx
        .tournaments
        .current_round_matches(tournament.id)
        .await
        .unwrap()
        .remove(0);

    // Wrong sum.
    let err = ctx
        .tournaments
        .record_result(&ctx_for(&organiser), m.id, 10, 15)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidScore(_)));

    // Negative score.
    let err = ctx
        .tournaments
        .record_result(&ctx_for(&organiser), m.id, -1, 33)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidScore(_)));

    // Valid result.
    let recorded = ctx
        .tournaments
        .record_result(&ctx_for(&organiser), m.id, 17, 15)
        .await
        .unwrap();
    assert!(recorded.is_completed);
    assert_eq!(recorded.team1_score, Some(17));
    assert_eq!(recorded.team2_score, Some(15));

    // Recording the same match again is rejected.
    let err = ctx
        .tournaments
        .record_result(&ctx_for(&organiser), m.id, 17, 15)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyRecorded(_)));
}

#[tokio::test]
async fn test_recording_last_match_advances_round() {
    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 8).await;

    let tournament = started_tournament(&ctx, &organiser, &players, 32).await;

    let matches = ctx
        .tournaments
        .current_round_matches(tournament.id)
        .await
        .unwrap();
    assert_eq!(matches.len(), 2);

    ctx.tournaments
        .record_result(&ctx_for(&organiser), matches[0].id, 20, 12)
        .await
        .unwrap();
    let summary = ctx.tournaments.get(tournament.id).await.unwrap();
    assert_eq!(
        summary.tournament.current_round, 1,
        "round advances only when every match is in"
    );

    ctx.tournaments
        .record_result(&ctx_for(&organiser), matches[1].id, 16, 16)
        .await
        .unwrap();
    let summary = ctx.tournaments.get(tournament.id).await.unwrap();
    assert_eq!(summary.tournament.current_round, 2);
}

#[tokio::test]
async fn test_ratings_follow_recorded_results() {
    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;

    let tournament = started_tournament(&ctx, &organiser, &players, 32).await;
    play_current_round(&ctx, &organiser, tournament.id, 32, |_| 20).await;

    let mut total = 0.0;
    for player in &players {
        let rating = ctx
            .store
            .rating_for_user(player.id)
            .await
            .unwrap()
            .expect("rating created by the result");
        assert_eq!(rating.matches_played, 1);
        total += rating.current_rating;
    }
    assert!(
        (total - 4000.0).abs() < 1e-6,
        "ratings are conserved across the pool, total = {total}"
    );
}

#[tokio::test]
async fn test_full_tournament_to_finish() {
    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;

    let tournament = started_tournament(&ctx, &organiser, &players, 32).await;

    // Winner is unavailable while the tournament runs.
    assert!(ctx.tournaments.winner(tournament.id).await.unwrap().is_none());

    for _ in 0..3 {
        play_current_round(&ctx, &organiser, tournament.id, 32, |_| 20).await;
    }

    // The last round leaves the cursor in place; completion is explicit.
    let summary = ctx.tournaments.get(tournament.id).await.unwrap();
    assert_eq!(summary.tournament.status, TournamentStatus::Active);
    assert_eq!(summary.tournament.current_round, 3);

    let (finished, results) = ctx
        .tournaments
        .finish(&ctx_for(&organiser), tournament.id)
        .await
        .unwrap();
    assert_eq!(finished.status, TournamentStatus::Completed);
    assert_eq!(results.len(), 4);
    let positions: Vec<i32> = results.iter().map(|r| r.final_position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4]);
    assert!(
        results.windows(2).all(|w| {
            w[0].total_score > w[1].total_score
                || (w[0].total_score == w[1].total_score
                    && w[0].points_difference >= w[1].points_difference)
        }),
        "results are ordered best first"
    );

    // Match results are frozen after completion.
    let m = ctx
        .tournaments
        .current_round_matches(tournament.id)
        .await
        .unwrap()
        .remove(0);
    let err = ctx
        .tournaments
        .record_result(&ctx_for(&organiser), m.id, 16, 16)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::WrongStatus(_)));

    // The winner view matches the stored standings.
    let winner = ctx
        .tournaments
        .winner(tournament.id)
        .await
        .unwrap()
        .expect("completed tournament has a winner");
    assert_eq!(winner.player_id, results[0].player_id);
}

#[tokio::test]
async fn test_finish_is_idempotent_including_podium() {
    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;

    let tournament = started_tournament(&ctx, &organiser, &players, 32).await;
    for _ in 0..3 {
        play_current_round(&ctx, &organiser, tournament.id, 32, |_| 24).await;
    }

    let (_, first_results) = ctx
        .tournaments
        .finish(&ctx_for(&organiser), tournament.id)
        .await
        .unwrap();
    let (_, second_results) = ctx
        .tournaments
        .finish(&ctx_for(&organiser), tournament.id)
        .await
        .unwrap();

    assert_eq!(first_results.len(), second_results.len());
    for (a, b) in first_results.iter().zip(second_results.iter()) {
        assert_eq!(a.id, b.id, "repeat finish returns the stored snapshot");
    }

    // Podium accounting applied exactly once.
    for player in &players {
        let rating = ctx
            .store
            .rating_for_user(player.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rating.tournaments_played, 1);
    }
    let champion = ctx
        .store
        .rating_for_user(first_results[0].player_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(champion.first_place_finishes, 1);
}

#[tokio::test]
async fn test_finish_requires_started_tournament() {
    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;

    let tournament = pending_tournament(&ctx, &organiser, &players, 32).await;
    let err = ctx
        .tournaments
        .finish(&ctx_for(&organiser), tournament.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::WrongStatus(_)));
}

#[tokio::test]
async fn test_leaderboard_reflects_play() {
    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;

    let tournament = started_tournament(&ctx, &organiser, &players, 32).await;
    play_current_round(&ctx, &organiser, tournament.id, 32, |_| 22).await;

    let leaderboard = ctx.tournaments.leaderboard(tournament.id).await.unwrap();
    assert_eq!(leaderboard.len(), 4);
    assert_eq!(leaderboard[0].rank, 1);
    assert_eq!(leaderboard[0].score, 22);
    assert_eq!(leaderboard[3].score, 10);
    assert!(leaderboard[0].player_name.starts_with("Player"));

    let scores = ctx.tournaments.player_scores(tournament.id).await.unwrap();
    assert_eq!(scores.len(), 4);
    let total: i32 = scores.values().sum();
    assert_eq!(total, 2 * 32, "one match distributes its points twice over");
}

#[tokio::test]
async fn test_listing_filters() {
    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let other = create_organiser_named(&ctx, "Second Organiser").await;
    let players = create_test_users(&ctx.store, 4).await;

    let mine = pending_tournament(&ctx, &organiser, &players, 32).await;
    let mut input = tournament_input(8, 32);
    input.location = "North Hall".to_string();
    ctx.tournaments
        .create(&ctx_for(&other), input)
        .await
        .unwrap();

    let (all, total) = ctx
        .tournaments
        .list(&TournamentFilter::default())
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(all.len(), 2);

    let (pending_only, _) = ctx
        .tournaments
        .list(&TournamentFilter {
            status: Some(TournamentStatus::Pending),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending_only.len(), 2);

    let (by_creator, _) = ctx
        .tournaments
        .list(&TournamentFilter {
            created_by: Some(organiser.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_creator.len(), 1);
    assert_eq!(by_creator[0].tournament.id, mine.id);

    let (by_location, _) = ctx
        .tournaments
        .list(&TournamentFilter {
            location_contains: Some("north".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_location.len(), 1);

    let (paged, total) = ctx
        .tournaments
        .list(&TournamentFilter {
            limit: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(paged.len(), 1);
    assert_eq!(total, 2);
}

async fn create_organiser_named(
    ctx: &common::TestContext,
    name: &str,
) -> padelpoints_backend::models::User {
    use padelpoints_backend::models::User;
    use padelpoints_backend::store::UserRepository;
    let user = User::new(name, Some(format!("{}@example.com", name.replace(' ', "."))));
    ctx.store.save_user(&user).await.unwrap();
    user
}

#[tokio::test]
async fn test_roster_is_frozen_once_active() {
    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;
    let late = create_test_users(&ctx.store, 1).await.remove(0);

    let tournament = started_tournament(&ctx, &organiser, &players, 32).await;

    let err = ctx
        .tournaments
        .join(&ctx_for(&late), tournament.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::WrongStatus(_)));

    let err = ctx
        .tournaments
        .leave(&ctx_for(&players[0]), tournament.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::WrongStatus(_)));

    // The schedule partners every pair exactly once.
    let rounds = ctx.tournaments.all_rounds(tournament.id).await.unwrap();
    let mut partnerships: Vec<(uuid::Uuid, uuid::Uuid)> = rounds
        .iter()
        .flat_map(|(_, matches)| matches.iter())
        .flat_map(|m| {
            let t1 = if m.team1_player1 < m.team1_player2 {
                (m.team1_player1, m.team1_player2)
            } else {
                (m.team1_player2, m.team1_player1)
            };
            let t2 = if m.team2_player1 < m.team2_player2 {
                (m.team2_player1, m.team2_player2)
            } else {
                (m.team2_player2, m.team2_player1)
            };
            [t1, t2]
        })
        .collect();
    partnerships.sort();
    partnerships.dedup();
    assert_eq!(partnerships.len(), 6, "C(4,2) distinct partnerships");
}

#[tokio::test]
async fn test_organiser_adds_guest_players() {
    use padelpoints_backend::models::User;
    use padelpoints_backend::store::UserRepository;

    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 3).await;

    let guest = User::guest("Walk-in Guest");
    assert!(guest.is_guest());
    ctx.store.save_user(&guest).await.unwrap();

    let tournament = pending_tournament(&ctx, &organiser, &players, 32).await;

    // Only the organiser may place other people on the roster.
    let err = ctx
        .tournaments
        .add_player(&ctx_for(&players[0]), tournament.id, guest.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthorizationFailed(_)));

    ctx.tournaments
        .add_player(&ctx_for(&organiser), tournament.id, guest.id)
        .await
        .unwrap();

    // With the guest the roster reaches four and the tournament starts.
    let started = ctx
        .tournaments
        .start(&ctx_for(&organiser), tournament.id)
        .await
        .unwrap();
    assert!(started.is_active());

    // Organiser can also remove players, but only while pending.
    let err = ctx
        .tournaments
        .remove_player(&ctx_for(&organiser), tournament.id, guest.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::WrongStatus(_)));
}

#[tokio::test]
async fn test_player_result_lookup() {
    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;

    let tournament = started_tournament(&ctx, &organiser, &players, 32).await;
    for _ in 0..3 {
        play_current_round(&ctx, &organiser, tournament.id, 32, |_| 18).await;
    }

    // Nothing stored until the tournament finishes.
    let none = ctx
        .tournaments
        .player_result(tournament.id, players[0].id)
        .await
        .unwrap();
    assert!(none.is_none());

    ctx.tournaments
        .finish(&ctx_for(&organiser), tournament.id)
        .await
        .unwrap();

    let result = ctx
        .tournaments
        .player_result(tournament.id, players[0].id)
        .await
        .unwrap()
        .expect("placement stored on finish");
    assert_eq!(result.player_id, players[0].id);
    assert_eq!(result.matches_played, 3);
}

#[tokio::test]
async fn test_expired_deadline_aborts_operations() {
    use padelpoints_backend::context::{CurrentUser, RequestContext};
    use tokio::time::{Duration, Instant};

    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;
    let tournament = pending_tournament(&ctx, &organiser, &players, 32).await;

    let expired = RequestContext::with_deadline(
        CurrentUser::new(organiser.id),
        Instant::now() - Duration::from_millis(1),
    );
    let err = ctx
        .tournaments
        .start(&expired, tournament.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DeadlineExceeded));

    // The aborted start left no trace.
    let summary = ctx.tournaments.get(tournament.id).await.unwrap();
    assert_eq!(summary.tournament.status, TournamentStatus::Pending);
}

#[test]
fn test_error_kinds_map_to_adapter_statuses() {
    assert_eq!(AppError::InvalidInput("x".into()).http_status(), 400);
    assert_eq!(AppError::InvalidScore("x".into()).http_status(), 400);
    assert_eq!(AppError::InvalidRoster("x".into()).http_status(), 400);
    assert_eq!(AppError::AlreadyRecorded("x".into()).http_status(), 400);
    assert_eq!(AppError::WrongStatus("x".into()).http_status(), 400);
    assert_eq!(AppError::AuthorizationFailed("x".into()).http_status(), 403);
    assert_eq!(AppError::NotFound("x".into()).http_status(), 404);
    assert_eq!(AppError::Conflict("x".into()).http_status(), 409);
    assert_eq!(AppError::FatalStore("x".into()).http_status(), 500);
    assert_eq!(AppError::DeadlineExceeded.http_status(), 504);
}

#[tokio::test]
async fn test_late_join_attempt_during_start_race() {
    // A pending tournament whose roster changed between schedule
    // computation and activation retries and still starts consistently.
    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;

    let tournament = pending_tournament(&ctx, &organiser, &players, 32).await;

    // Direct roster read: join order preserved for the scheduler.
    let roster = ctx.store.roster(tournament.id).await.unwrap();
    let expected: Vec<uuid::Uuid> = players.iter().map(|p| p.id).collect();
    assert_eq!(roster, expected);

    ctx.tournaments
        .start(&ctx_for(&organiser), tournament.id)
        .await
        .unwrap();
}
