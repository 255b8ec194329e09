mod common;

use common::{
    create_admin, create_organiser, create_test_users, ctx_for, play_current_round,
    started_tournament, test_context,
};
use padelpoints_backend::error::AppError;
use padelpoints_backend::models::{AuditAction, TournamentStatus};
use padelpoints_backend::store::{AuditFilter, RoundRepository, TournamentRepository, UserRepository};

#[tokio::test]
async fn test_admin_operations_require_superuser() {
    let ctx = test_context();
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;
    let tournament = started_tournament(&ctx, &organiser, &players, 32).await;

    let err = ctx
        .admin
        .recalculate_results(&ctx_for(&organiser), tournament.id, "because")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthorizationFailed(_)));

    let err = ctx
        .admin
        .force_status(
            &ctx_for(&players[0]),
            tournament.id,
            TournamentStatus::Completed,
            "because",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthorizationFailed(_)));
}

#[tokio::test]
async fn test_override_match_result_is_audited() {
    let ctx = test_context();
    let admin = create_admin(&ctx.store).await;
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;

    let tournament = started_tournament(&ctx, &organiser, &players, 32).await;
    let m = ctx
        .tournaments
        .current_round_matches(tournament.id)
        .await
        .unwrap()
        .remove(0);
    ctx.tournaments
        .record_result(&ctx_for(&organiser), m.id, 20, 12)
        .await
        .unwrap();

    // Overrides still obey the score-sum constraint.
    let err = ctx
        .admin
        .override_match_result(&ctx_for(&admin), m.id, 30, 30, "typo fix")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidScore(_)));

    let (updated, record) = ctx
        .admin
        .override_match_result(&ctx_for(&admin), m.id, 12, 20, "typo fix")
        .await
        .unwrap();
    assert_eq!(updated.team1_score, Some(12));
    assert_eq!(updated.team2_score, Some(20));

    assert_eq!(record.action, AuditAction::MatchResultOverride);
    assert_eq!(record.admin_id, admin.id);
    assert_eq!(record.reason, "typo fix");
    let old = record.old_values.expect("old snapshot captured");
    assert_eq!(old["team1_score"], 20);
    let new = record.new_values.expect("new snapshot captured");
    assert_eq!(new["team1_score"], 12);

    let stored = ctx.store.get_match(m.id).await.unwrap().unwrap();
    assert_eq!(stored.team1_score, Some(12));
}

#[tokio::test]
async fn test_recalculate_results_replaces_the_set() {
    let ctx = test_context();
    let admin = create_admin(&ctx.store).await;
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;

    let tournament = started_tournament(&ctx, &organiser, &players, 32).await;
    for _ in 0..3 {
        play_current_round(&ctx, &organiser, tournament.id, 32, |_| 20).await;
    }
    let (_, original) = ctx
        .tournaments
        .finish(&ctx_for(&organiser), tournament.id)
        .await
        .unwrap();

    // Rewrite one result, then recompute the placements.
    let m = ctx
        .tournaments
        .current_round_matches(tournament.id)
        .await
        .unwrap()
        .remove(0);
    ctx.admin
        .override_match_result(&ctx_for(&admin), m.id, 2, 30, "scores entered backwards")
        .await
        .unwrap();

    let (recalculated, record) = ctx
        .admin
        .recalculate_results(&ctx_for(&admin), tournament.id, "scores entered backwards")
        .await
        .unwrap();
    assert_eq!(record.action, AuditAction::TournamentScoreRecalc);
    assert_eq!(recalculated.len(), original.len());

    let stored = ctx.tournaments.final_results(tournament.id).await.unwrap();
    let stored_ids: Vec<uuid::Uuid> = stored.iter().map(|r| r.id).collect();
    let recalculated_ids: Vec<uuid::Uuid> = recalculated.iter().map(|r| r.id).collect();
    assert_eq!(stored_ids, recalculated_ids, "old rows fully replaced");
    assert!(original.iter().all(|r| !stored_ids.contains(&r.id)));
}

#[tokio::test]
async fn test_force_status_never_moves_backwards() {
    let ctx = test_context();
    let admin = create_admin(&ctx.store).await;
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;

    let tournament = started_tournament(&ctx, &organiser, &players, 32).await;

    let err = ctx
        .admin
        .force_status(
            &ctx_for(&admin),
            tournament.id,
            TournamentStatus::Pending,
            "roll back",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::WrongStatus(_)));

    let err = ctx
        .admin
        .force_status(
            &ctx_for(&admin),
            tournament.id,
            TournamentStatus::Active,
            "same state",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::WrongStatus(_)));

    let (updated, record) = ctx
        .admin
        .force_status(
            &ctx_for(&admin),
            tournament.id,
            TournamentStatus::Completed,
            "abandoned midway",
        )
        .await
        .unwrap();
    assert_eq!(updated.status, TournamentStatus::Completed);
    assert_eq!(record.action, AuditAction::TournamentStatusChange);

    // Completed is terminal even for admins.
    let err = ctx
        .admin
        .force_status(
            &ctx_for(&admin),
            tournament.id,
            TournamentStatus::Active,
            "reopen",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::WrongStatus(_)));
}

#[tokio::test]
async fn test_user_deletion_paths() {
    let ctx = test_context();
    let admin = create_admin(&ctx.store).await;
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;
    let bystander = create_test_users(&ctx.store, 1).await.remove(0);

    started_tournament(&ctx, &organiser, &players, 32).await;

    // Players with historical matches cannot be hard-deleted.
    let err = ctx
        .admin
        .delete_user(&ctx_for(&admin), players[0].id, "gdpr request")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Soft delete instead.
    let (deactivated, record) = ctx
        .admin
        .deactivate_user(&ctx_for(&admin), players[0].id, "gdpr request")
        .await
        .unwrap();
    assert!(!deactivated.is_active);
    assert_eq!(record.action, AuditAction::UserStatusChange);

    // A user with no match history can be removed outright.
    ctx.admin
        .delete_user(&ctx_for(&admin), bystander.id, "spam account")
        .await
        .unwrap();
    assert!(ctx.store.get_user(bystander.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_tournament_cascades() {
    let ctx = test_context();
    let admin = create_admin(&ctx.store).await;
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;

    let tournament = started_tournament(&ctx, &organiser, &players, 32).await;
    let m = ctx
        .tournaments
        .current_round_matches(tournament.id)
        .await
        .unwrap()
        .remove(0);

    ctx.admin
        .delete_tournament(&ctx_for(&admin), tournament.id, "duplicate event")
        .await
        .unwrap();

    assert!(
        ctx.store
            .get_tournament(tournament.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(ctx.store.get_match(m.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_users_respects_activity_filter() {
    let ctx = test_context();
    let admin = create_admin(&ctx.store).await;
    let users = create_test_users(&ctx.store, 3).await;

    ctx.admin
        .deactivate_user(&ctx_for(&admin), users[0].id, "left the club")
        .await
        .unwrap();

    let active = ctx.admin.list_users(&ctx_for(&admin), false).await.unwrap();
    assert!(active.iter().all(|u| u.id != users[0].id));

    let everyone = ctx.admin.list_users(&ctx_for(&admin), true).await.unwrap();
    assert!(everyone.iter().any(|u| u.id == users[0].id));
    assert_eq!(everyone.len(), active.len() + 1);

    let err = ctx
        .admin
        .list_users(&ctx_for(&users[1]), false)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthorizationFailed(_)));
}

#[tokio::test]
async fn test_audit_trail_filters_and_order() {
    let ctx = test_context();
    let admin = create_admin(&ctx.store).await;
    let organiser = create_organiser(&ctx.store).await;
    let players = create_test_users(&ctx.store, 4).await;

    let tournament = started_tournament(&ctx, &organiser, &players, 32).await;
    ctx.admin
        .force_status(
            &ctx_for(&admin),
            tournament.id,
            TournamentStatus::Completed,
            "wrap up",
        )
        .await
        .unwrap();
    ctx.admin
        .deactivate_user(&ctx_for(&admin), players[0].id, "inactive account")
        .await
        .unwrap();

    let all = ctx
        .admin
        .audit_trail(&ctx_for(&admin), &AuditFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(
        all[0].action,
        AuditAction::UserStatusChange,
        "newest record first"
    );

    let status_changes = ctx
        .admin
        .audit_trail(
            &ctx_for(&admin),
            &AuditFilter {
                action: Some(AuditAction::TournamentStatusChange),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(status_changes.len(), 1);
    assert_eq!(status_changes[0].target_id, tournament.id.to_string());
}
