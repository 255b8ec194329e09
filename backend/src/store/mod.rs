//! Store Ports
//!
//! The core reaches its persistent state exclusively through the repository
//! traits in this module. A concrete backend must provide the transactional
//! guarantees the composite operations describe: each of `begin_active`,
//! `record_scores`, `complete_tournament`, `apply_match_update` and
//! `replace_results` is one atomic unit, and mutating operations on a
//! single tournament are serialised against each other.
//!
//! `memory::MemoryStore` is the reference implementation used by tests and
//! demos; production deployments supply their own backend outside this
//! crate.

pub mod memory;
pub mod retry;

use crate::models::{
    AuditAction, AuditRecord, AuditTargetType, Match, PlayerRating, RatingHistoryEntry, Tournament,
    TournamentFilter, TournamentResult, TournamentStatus, User,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Constraint name if the backend reports one.
    #[error("unique violation{0:?}")]
    UniqueViolation(Option<String>),

    /// Deadlock, serialization failure, connection reset; a bounded retry
    /// may succeed.
    #[error("transient store failure: {0}")]
    Transient(String),

    #[error("fatal store failure: {0}")]
    Fatal(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Result of the atomic pending → active transition.
#[derive(Debug)]
pub enum ActivateOutcome {
    Activated(Tournament),
    /// Lost the race: another transition got there first.
    WrongStatus(TournamentStatus),
    /// The roster changed between schedule computation and the write.
    RosterChanged,
}

/// Result of an atomic score write.
#[derive(Debug)]
pub enum RecordOutcome {
    Recorded(Match),
    /// The match already carried a result; the stored row is returned
    /// unchanged.
    AlreadyCompleted(Match),
}

/// Result of the atomic active → completed transition.
#[derive(Debug)]
pub enum CompleteOutcome {
    /// This call performed the transition and persisted the placements.
    Completed(Tournament),
    /// Idempotent repeat; placements were left untouched.
    AlreadyCompleted(Tournament),
    WrongStatus(TournamentStatus),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn get_users(&self, ids: &[Uuid]) -> StoreResult<Vec<User>>;
    async fn list_users(&self, include_inactive: bool) -> StoreResult<Vec<User>>;
    /// Insert or update; enforces email uniqueness across users.
    async fn save_user(&self, user: &User) -> StoreResult<()>;
    async fn delete_user(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait TournamentRepository: Send + Sync {
    async fn get_tournament(&self, id: Uuid) -> StoreResult<Option<Tournament>>;
    /// Insert or update; enforces join-code uniqueness across tournaments.
    async fn save_tournament(&self, tournament: &Tournament) -> StoreResult<()>;
    /// Filtered listing plus the total count before pagination.
    async fn list_tournaments(
        &self,
        filter: &TournamentFilter,
    ) -> StoreResult<(Vec<Tournament>, usize)>;
    async fn find_by_join_code(&self, code: &str) -> StoreResult<Option<Tournament>>;
    /// Roster member ids in join order.
    async fn roster(&self, tournament_id: Uuid) -> StoreResult<Vec<Uuid>>;
    /// Returns false when the player was already on the roster.
    async fn add_roster_member(&self, tournament_id: Uuid, player_id: Uuid) -> StoreResult<bool>;
    /// Returns false when the player was not on the roster.
    async fn remove_roster_member(&self, tournament_id: Uuid, player_id: Uuid)
    -> StoreResult<bool>;
    /// Atomic pending → active transition: persists the full schedule,
    /// sets `current_round = 1` and freezes the average rating, provided
    /// the status is still pending and the roster still equals
    /// `roster_snapshot`.
    async fn begin_active(
        &self,
        tournament_id: Uuid,
        roster_snapshot: &[Uuid],
        average_rating: f64,
        matches: Vec<Match>,
    ) -> StoreResult<ActivateOutcome>;
    /// Atomically increments `current_round` if it still equals
    /// `expected_current`. Returns whether the increment happened.
    async fn advance_round(&self, tournament_id: Uuid, expected_current: i32)
    -> StoreResult<bool>;
    /// Atomic active → completed transition persisting the final
    /// placements in the same unit.
    async fn complete_tournament(
        &self,
        tournament_id: Uuid,
        results: Vec<TournamentResult>,
    ) -> StoreResult<CompleteOutcome>;
    /// Cascades to the tournament's matches and results.
    async fn delete_tournament(&self, id: Uuid) -> StoreResult<()>;
}

/// Schedule rows. Each row is one [`Match`]; the trait groups them by the
/// round they belong to.
#[async_trait]
pub trait RoundRepository: Send + Sync {
    async fn get_match(&self, id: Uuid) -> StoreResult<Option<Match>>;
    /// All matches of a tournament, ordered by round then creation.
    async fn matches_for_tournament(&self, tournament_id: Uuid) -> StoreResult<Vec<Match>>;
    async fn matches_for_round(
        &self,
        tournament_id: Uuid,
        round_number: i32,
    ) -> StoreResult<Vec<Match>>;
    async fn completed_matches(&self, tournament_id: Uuid) -> StoreResult<Vec<Match>>;
    /// Atomically writes the scores and sets the completion flag, failing
    /// over to `AlreadyCompleted` if a result was recorded first.
    async fn record_scores(
        &self,
        match_id: Uuid,
        team1_score: i32,
        team2_score: i32,
    ) -> StoreResult<RecordOutcome>;
    /// Unconditional rewrite used by the audited administrative path.
    async fn override_scores(
        &self,
        match_id: Uuid,
        team1_score: i32,
        team2_score: i32,
    ) -> StoreResult<Match>;
    /// Whether any match anywhere references the player. Guards hard
    /// deletion of users.
    async fn any_matches_for_player(&self, player_id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn rating_for_user(&self, user_id: Uuid) -> StoreResult<Option<PlayerRating>>;
    async fn ratings_for_users(&self, user_ids: &[Uuid]) -> StoreResult<Vec<PlayerRating>>;
    async fn save_rating(&self, rating: &PlayerRating) -> StoreResult<()>;
    /// Persists the mutated ratings and their history entries in one unit,
    /// so a reader never observes a completed match without its history.
    async fn apply_match_update(
        &self,
        ratings: &[PlayerRating],
        history: &[RatingHistoryEntry],
    ) -> StoreResult<()>;
    /// Newest-first, at most one (final) entry per tournament, capped at
    /// `limit`.
    async fn recent_tournament_history(
        &self,
        player_rating_id: Uuid,
        limit: usize,
    ) -> StoreResult<Vec<RatingHistoryEntry>>;
    async fn latest_history_entry(
        &self,
        player_rating_id: Uuid,
    ) -> StoreResult<Option<RatingHistoryEntry>>;
    /// Ratings with at least `min_matches` matches, best first.
    async fn top_ratings(&self, min_matches: i32, limit: usize)
    -> StoreResult<Vec<PlayerRating>>;
}

#[async_trait]
pub trait ResultRepository: Send + Sync {
    async fn results_for_tournament(&self, tournament_id: Uuid)
    -> StoreResult<Vec<TournamentResult>>;
    async fn result_for_player(
        &self,
        tournament_id: Uuid,
        player_id: Uuid,
    ) -> StoreResult<Option<TournamentResult>>;
    /// Atomically replaces the whole result set of a tournament.
    async fn replace_results(
        &self,
        tournament_id: Uuid,
        results: Vec<TournamentResult>,
    ) -> StoreResult<()>;
    async fn has_results(&self, tournament_id: Uuid) -> StoreResult<bool>;
}

/// Filters for audit-trail review; all criteria are conjunctive.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub admin_id: Option<Uuid>,
    pub action: Option<AuditAction>,
    pub target_type: Option<AuditTargetType>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub offset: usize,
    pub limit: Option<usize>,
}

#[async_trait]
pub trait AuditRepository: Send + Sync {
    async fn append_audit(&self, record: &AuditRecord) -> StoreResult<()>;
    /// Newest first.
    async fn list_audit(&self, filter: &AuditFilter) -> StoreResult<Vec<AuditRecord>>;
}

/// The full store surface the services hold as one `Arc<dyn Store>`.
pub trait Store:
    UserRepository
    + TournamentRepository
    + RoundRepository
    + RatingRepository
    + ResultRepository
    + AuditRepository
{
}

impl<T> Store for T where
    T: UserRepository
        + TournamentRepository
        + RoundRepository
        + RatingRepository
        + ResultRepository
        + AuditRepository
{
}
