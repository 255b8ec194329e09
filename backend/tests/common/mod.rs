#![allow(dead_code)]

use chrono::NaiveDate;
use padelpoints_backend::config::AppConfig;
use padelpoints_backend::context::{CurrentUser, RequestContext};
use padelpoints_backend::models::{Tournament, TournamentSystem, User};
use padelpoints_backend::services::admin::AdminService;
use padelpoints_backend::services::statistics::StatisticsService;
use padelpoints_backend::services::tournament::{CreateTournament, TournamentService};
use padelpoints_backend::store::{MemoryStore, UserRepository};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

static NEXT_TEST_USER_ID: AtomicUsize = AtomicUsize::new(1);

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub tournaments: TournamentService,
    pub admin: AdminService,
    pub statistics: StatisticsService,
}

pub fn test_context() -> TestContext {
    padelpoints_backend::observability::init_tracing();
    let store = Arc::new(MemoryStore::new());
    let config = AppConfig::default();
    TestContext {
        tournaments: TournamentService::new(store.clone(), config.clone()),
        admin: AdminService::new(store.clone()),
        statistics: StatisticsService::new(store.clone(), config.rating),
        store,
    }
}

pub fn ctx_for(user: &User) -> RequestContext {
    if user.is_superuser {
        RequestContext::new(CurrentUser::superuser(user.id))
    } else {
        RequestContext::new(CurrentUser::new(user.id))
    }
}

/// Creates `count` active users named "Player 1".."Player count".
pub async fn create_test_users(store: &Arc<MemoryStore>, count: usize) -> Vec<User> {
    let mut users = Vec::with_capacity(count);
    for i in 0..count {
        let id = NEXT_TEST_USER_ID.fetch_add(1, Ordering::Relaxed);
        let user = User::new(
            format!("Player {}", i + 1),
            Some(format!("player{}@example.com", id)),
        );
        store.save_user(&user).await.expect("save user");
        users.push(user);
    }
    users
}

pub async fn create_organiser(store: &Arc<MemoryStore>) -> User {
    let user = User::new("Organiser", Some("organiser@example.com".to_string()));
    store.save_user(&user).await.expect("save organiser");
    user
}

pub async fn create_admin(store: &Arc<MemoryStore>) -> User {
    let mut user = User::new("Admin", Some("admin@example.com".to_string()));
    user.is_superuser = true;
    store.save_user(&user).await.expect("save admin");
    user
}

pub fn tournament_input(max_players: i32, points_per_match: i32) -> CreateTournament {
    CreateTournament {
        name: "Friday Americano".to_string(),
        description: None,
        location: "Centre Court".to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 6, 13).expect("valid date"),
        entry_fee: 10.0,
        max_players,
        system: TournamentSystem::Americano,
        points_per_match,
        courts: 2,
    }
}

/// Creates a pending tournament and puts every given player on its roster.
pub async fn pending_tournament(
    ctx: &TestContext,
    organiser: &User,
    players: &[User],
    points_per_match: i32,
) -> Tournament {
    let max_players = players.len().max(4).div_ceil(4) as i32 * 4;
    let tournament = ctx
        .tournaments
        .create(
            &ctx_for(organiser),
            tournament_input(max_players.min(24), points_per_match),
        )
        .await
        .expect("create tournament");

    for player in players {
        ctx.tournaments
            .join(&ctx_for(player), tournament.id)
            .await
            .expect("join tournament");
    }

    tournament
}

/// Creates and starts a tournament with the given players.
pub async fn started_tournament(
    ctx: &TestContext,
    organiser: &User,
    players: &[User],
    points_per_match: i32,
) -> Tournament {
    let tournament = pending_tournament(ctx, organiser, players, points_per_match).await;
    ctx.tournaments
        .start(&ctx_for(organiser), tournament.id)
        .await
        .expect("start tournament")
}

/// Records a result for every match of the current round. `score_for`
/// maps the match index within the round to the team-1 score; team 2 gets
/// the remainder.
pub async fn play_current_round(
    ctx: &TestContext,
    organiser: &User,
    tournament_id: Uuid,
    points_per_match: i32,
    score_for: impl Fn(usize) -> i32,
) {
    let matches = ctx
        .tournaments
        .current_round_matches(tournament_id)
        .await
        .expect("current round");
    for (index, m) in matches.iter().enumerate() {
        let team1_score = score_for(index);
        ctx.tournaments
            .record_result(
                &ctx_for(organiser),
                m.id,
                team1_score,
                points_per_match - team1_score,
            )
            .await
            .expect("record result");
    }
}
