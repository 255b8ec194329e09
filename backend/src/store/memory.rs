//! In-memory reference store.
//!
//! Backs every repository trait with a single `RwLock`-guarded state. The
//! write lock serialises all mutating operations, which gives the
//! composite operations their transactional contract for free. Tests and
//! demo setups construct one of these; nothing in the service layer knows
//! the difference.

use crate::models::{
    AuditRecord, Match, PlayerRating, RatingHistoryEntry, Tournament, TournamentFilter,
    TournamentResult, TournamentStatus, User,
};
use crate::store::{
    ActivateOutcome, AuditFilter, AuditRepository, CompleteOutcome, RatingRepository,
    RecordOutcome, ResultRepository, RoundRepository, StoreError, StoreResult,
    TournamentRepository, UserRepository,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    tournaments: HashMap<Uuid, Tournament>,
    /// Tournament id → roster member ids in join order.
    rosters: HashMap<Uuid, Vec<Uuid>>,
    matches: HashMap<Uuid, Match>,
    /// Tournament id → match ids in schedule order.
    tournament_matches: HashMap<Uuid, Vec<Uuid>>,
    /// Keyed by user id.
    ratings: HashMap<Uuid, PlayerRating>,
    history: Vec<RatingHistoryEntry>,
    results: HashMap<Uuid, Vec<TournamentResult>>,
    audit: Vec<AuditRecord>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_filter(tournament: &Tournament, filter: &TournamentFilter) -> bool {
    if let Some(system) = filter.system {
        if tournament.system != system {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if tournament.status != status {
            return false;
        }
    }
    if let Some(from) = filter.start_date_from {
        if tournament.start_date < from {
            return false;
        }
    }
    if let Some(to) = filter.start_date_to {
        if tournament.start_date > to {
            return false;
        }
    }
    if let Some(needle) = &filter.location_contains {
        if !tournament
            .location
            .to_lowercase()
            .contains(&needle.to_lowercase())
        {
            return false;
        }
    }
    if let Some(creator) = filter.created_by {
        if tournament.created_by != creator {
            return false;
        }
    }
    if let Some(min) = filter.min_average_rating {
        if tournament.average_player_rating.is_none_or(|r| r < min) {
            return false;
        }
    }
    if let Some(max) = filter.max_average_rating {
        if tournament.average_player_rating.is_none_or(|r| r > max) {
            return false;
        }
    }
    true
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn get_users(&self, ids: &[Uuid]) -> StoreResult<Vec<User>> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }

    async fn list_users(&self, include_inactive: bool) -> StoreResult<Vec<User>> {
        let state = self.state.read().await;
        let mut users: Vec<User> = state
            .users
            .values()
            .filter(|u| include_inactive || u.is_active)
            .cloned()
            .collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn save_user(&self, user: &User) -> StoreResult<()> {
        let mut state = self.state.write().await;
        if let Some(email) = &user.email {
            let taken = state
                .users
                .values()
                .any(|other| other.id != user.id && other.email.as_deref() == Some(email));
            if taken {
                return Err(StoreError::UniqueViolation(Some("users_email".to_string())));
            }
        }
        state.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state.users.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl TournamentRepository for MemoryStore {
    async fn get_tournament(&self, id: Uuid) -> StoreResult<Option<Tournament>> {
        Ok(self.state.read().await.tournaments.get(&id).cloned())
    }

    async fn save_tournament(&self, tournament: &Tournament) -> StoreResult<()> {
        let mut state = self.state.write().await;
        if let Some(code) = &tournament.join_code {
            let taken = state
                .tournaments
                .values()
                .any(|other| other.id != tournament.id && other.join_code.as_deref() == Some(code));
            if taken {
                return Err(StoreError::UniqueViolation(Some(
                    "tournaments_join_code".to_string(),
                )));
            }
        }
        state
            .rosters
            .entry(tournament.id)
            .or_insert_with(Vec::new);
        state.tournaments.insert(tournament.id, tournament.clone());
        Ok(())
    }

    async fn list_tournaments(
        &self,
        filter: &TournamentFilter,
    ) -> StoreResult<(Vec<Tournament>, usize)> {
        let state = self.state.read().await;
        let mut matching: Vec<Tournament> = state
            .tournaments
            .values()
            .filter(|t| matches_filter(t, filter))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.start_date
                .cmp(&a.start_date)
                .then(b.created_at.cmp(&a.created_at))
                .then(a.id.cmp(&b.id))
        });
        let total = matching.len();
        let page: Vec<Tournament> = matching
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit.unwrap_or(usize::MAX))
            .collect();
        Ok((page, total))
    }

    async fn find_by_join_code(&self, code: &str) -> StoreResult<Option<Tournament>> {
        let state = self.state.read().await;
        Ok(state
            .tournaments
            .values()
            .find(|t| t.join_code.as_deref() == Some(code))
            .cloned())
    }

    async fn roster(&self, tournament_id: Uuid) -> StoreResult<Vec<Uuid>> {
        let state = self.state.read().await;
        Ok(state.rosters.get(&tournament_id).cloned().unwrap_or_default())
    }

    async fn add_roster_member(&self, tournament_id: Uuid, player_id: Uuid) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let roster = state.rosters.entry(tournament_id).or_default();
        if roster.contains(&player_id) {
            return Ok(false);
        }
        roster.push(player_id);
        Ok(true)
    }

    async fn remove_roster_member(
        &self,
        tournament_id: Uuid,
        player_id: Uuid,
    ) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let roster = state.rosters.entry(tournament_id).or_default();
        let before = roster.len();
        roster.retain(|id| *id != player_id);
        Ok(roster.len() != before)
    }

    async fn begin_active(
        &self,
        tournament_id: Uuid,
        roster_snapshot: &[Uuid],
        average_rating: f64,
        matches: Vec<Match>,
    ) -> StoreResult<ActivateOutcome> {
        let mut state = self.state.write().await;

        let status = state
            .tournaments
            .get(&tournament_id)
            .map(|t| t.status)
            .ok_or_else(|| StoreError::Fatal(format!("tournament {tournament_id} vanished")))?;
        if status != TournamentStatus::Pending {
            return Ok(ActivateOutcome::WrongStatus(status));
        }

        let roster = state.rosters.get(&tournament_id).cloned().unwrap_or_default();
        if roster != roster_snapshot {
            return Ok(ActivateOutcome::RosterChanged);
        }

        let match_ids: Vec<Uuid> = matches.iter().map(|m| m.id).collect();
        for m in matches {
            state.matches.insert(m.id, m);
        }
        state.tournament_matches.insert(tournament_id, match_ids);

        let tournament = state
            .tournaments
            .get_mut(&tournament_id)
            .expect("checked above");
        tournament.status = TournamentStatus::Active;
        tournament.current_round = 1;
        tournament.average_player_rating = Some(average_rating);

        Ok(ActivateOutcome::Activated(tournament.clone()))
    }

    async fn advance_round(
        &self,
        tournament_id: Uuid,
        expected_current: i32,
    ) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        match state.tournaments.get_mut(&tournament_id) {
            Some(t) if t.status == TournamentStatus::Active && t.current_round == expected_current => {
                t.current_round += 1;
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(StoreError::Fatal(format!(
                "tournament {tournament_id} vanished"
            ))),
        }
    }

    async fn complete_tournament(
        &self,
        tournament_id: Uuid,
        results: Vec<TournamentResult>,
    ) -> StoreResult<CompleteOutcome> {
        let mut state = self.state.write().await;
        let status = state
            .tournaments
            .get(&tournament_id)
            .map(|t| t.status)
            .ok_or_else(|| StoreError::Fatal(format!("tournament {tournament_id} vanished")))?;

        match status {
            TournamentStatus::Active => {
                state.results.insert(tournament_id, results);
                let tournament = state
                    .tournaments
                    .get_mut(&tournament_id)
                    .expect("checked above");
                tournament.status = TournamentStatus::Completed;
                Ok(CompleteOutcome::Completed(tournament.clone()))
            }
            TournamentStatus::Completed => Ok(CompleteOutcome::AlreadyCompleted(
                state.tournaments[&tournament_id].clone(),
            )),
            other => Ok(CompleteOutcome::WrongStatus(other)),
        }
    }

    async fn delete_tournament(&self, id: Uuid) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state.tournaments.remove(&id);
        state.rosters.remove(&id);
        state.results.remove(&id);
        if let Some(match_ids) = state.tournament_matches.remove(&id) {
            for match_id in match_ids {
                state.matches.remove(&match_id);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl RoundRepository for MemoryStore {
    async fn get_match(&self, id: Uuid) -> StoreResult<Option<Match>> {
        Ok(self.state.read().await.matches.get(&id).cloned())
    }

    async fn matches_for_tournament(&self, tournament_id: Uuid) -> StoreResult<Vec<Match>> {
        let state = self.state.read().await;
        let mut matches: Vec<Match> = state
            .tournament_matches
            .get(&tournament_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.matches.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        matches.sort_by_key(|m| m.round_number);
        Ok(matches)
    }

    async fn matches_for_round(
        &self,
        tournament_id: Uuid,
        round_number: i32,
    ) -> StoreResult<Vec<Match>> {
        let all = self.matches_for_tournament(tournament_id).await?;
        Ok(all
            .into_iter()
            .filter(|m| m.round_number == round_number)
            .collect())
    }

    async fn completed_matches(&self, tournament_id: Uuid) -> StoreResult<Vec<Match>> {
        let all = self.matches_for_tournament(tournament_id).await?;
        Ok(all.into_iter().filter(|m| m.is_completed).collect())
    }

    async fn record_scores(
        &self,
        match_id: Uuid,
        team1_score: i32,
        team2_score: i32,
    ) -> StoreResult<RecordOutcome> {
        let mut state = self.state.write().await;
        let m = state
            .matches
            .get_mut(&match_id)
            .ok_or_else(|| StoreError::Fatal(format!("match {match_id} vanished")))?;
        if m.is_completed {
            return Ok(RecordOutcome::AlreadyCompleted(m.clone()));
        }
        m.team1_score = Some(team1_score);
        m.team2_score = Some(team2_score);
        m.is_completed = true;
        Ok(RecordOutcome::Recorded(m.clone()))
    }

    async fn override_scores(
        &self,
        match_id: Uuid,
        team1_score: i32,
        team2_score: i32,
    ) -> StoreResult<Match> {
        let mut state = self.state.write().await;
        let m = state
            .matches
            .get_mut(&match_id)
            .ok_or_else(|| StoreError::Fatal(format!("match {match_id} vanished")))?;
        m.team1_score = Some(team1_score);
        m.team2_score = Some(team2_score);
        m.is_completed = true;
        Ok(m.clone())
    }

    async fn any_matches_for_player(&self, player_id: Uuid) -> StoreResult<bool> {
        let state = self.state.read().await;
        Ok(state.matches.values().any(|m| m.involves(player_id)))
    }
}

#[async_trait]
impl RatingRepository for MemoryStore {
    async fn rating_for_user(&self, user_id: Uuid) -> StoreResult<Option<PlayerRating>> {
        Ok(self.state.read().await.ratings.get(&user_id).cloned())
    }

    async fn ratings_for_users(&self, user_ids: &[Uuid]) -> StoreResult<Vec<PlayerRating>> {
        let state = self.state.read().await;
        Ok(user_ids
            .iter()
            .filter_map(|id| state.ratings.get(id).cloned())
            .collect())
    }

    async fn save_rating(&self, rating: &PlayerRating) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state.ratings.insert(rating.user_id, rating.clone());
        Ok(())
    }

    async fn apply_match_update(
        &self,
        ratings: &[PlayerRating],
        history: &[RatingHistoryEntry],
    ) -> StoreResult<()> {
        let mut state = self.state.write().await;
        for rating in ratings {
            state.ratings.insert(rating.user_id, rating.clone());
        }
        state.history.extend_from_slice(history);
        Ok(())
    }

    async fn recent_tournament_history(
        &self,
        player_rating_id: Uuid,
        limit: usize,
    ) -> StoreResult<Vec<RatingHistoryEntry>> {
        let state = self.state.read().await;
        // Last entry per tournament, in append order.
        let mut per_tournament: HashMap<Uuid, RatingHistoryEntry> = HashMap::new();
        for entry in &state.history {
            if entry.player_rating_id != player_rating_id {
                continue;
            }
            if let Some(tournament_id) = entry.tournament_id {
                per_tournament.insert(tournament_id, entry.clone());
            }
        }
        let mut entries: Vec<RatingHistoryEntry> = per_tournament.into_values().collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        entries.truncate(limit);
        Ok(entries)
    }

    async fn latest_history_entry(
        &self,
        player_rating_id: Uuid,
    ) -> StoreResult<Option<RatingHistoryEntry>> {
        let state = self.state.read().await;
        Ok(state
            .history
            .iter()
            .rev()
            .find(|e| e.player_rating_id == player_rating_id)
            .cloned())
    }

    async fn top_ratings(
        &self,
        min_matches: i32,
        limit: usize,
    ) -> StoreResult<Vec<PlayerRating>> {
        let state = self.state.read().await;
        let mut ratings: Vec<PlayerRating> = state
            .ratings
            .values()
            .filter(|r| r.matches_played >= min_matches)
            .cloned()
            .collect();
        ratings.sort_by(|a, b| {
            b.current_rating
                .partial_cmp(&a.current_rating)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.user_id.cmp(&b.user_id))
        });
        ratings.truncate(limit);
        Ok(ratings)
    }
}

#[async_trait]
impl ResultRepository for MemoryStore {
    async fn results_for_tournament(
        &self,
        tournament_id: Uuid,
    ) -> StoreResult<Vec<TournamentResult>> {
        let state = self.state.read().await;
        let mut results = state
            .results
            .get(&tournament_id)
            .cloned()
            .unwrap_or_default();
        results.sort_by_key(|r| r.final_position);
        Ok(results)
    }

    async fn result_for_player(
        &self,
        tournament_id: Uuid,
        player_id: Uuid,
    ) -> StoreResult<Option<TournamentResult>> {
        let state = self.state.read().await;
        Ok(state
            .results
            .get(&tournament_id)
            .and_then(|results| results.iter().find(|r| r.player_id == player_id).cloned()))
    }

    async fn replace_results(
        &self,
        tournament_id: Uuid,
        results: Vec<TournamentResult>,
    ) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state.results.insert(tournament_id, results);
        Ok(())
    }

    async fn has_results(&self, tournament_id: Uuid) -> StoreResult<bool> {
        let state = self.state.read().await;
        Ok(state
            .results
            .get(&tournament_id)
            .is_some_and(|r| !r.is_empty()))
    }
}

#[async_trait]
impl AuditRepository for MemoryStore {
    async fn append_audit(&self, record: &AuditRecord) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state.audit.push(record.clone());
        Ok(())
    }

    async fn list_audit(&self, filter: &AuditFilter) -> StoreResult<Vec<AuditRecord>> {
        let state = self.state.read().await;
        let mut records: Vec<AuditRecord> = state
            .audit
            .iter()
            .filter(|r| {
                filter.admin_id.is_none_or(|id| r.admin_id == id)
                    && filter.action.is_none_or(|a| r.action == a)
                    && filter.target_type.is_none_or(|t| r.target_type == t)
                    && filter.from.is_none_or(|from| r.timestamp >= from)
                    && filter.to.is_none_or(|to| r.timestamp <= to)
            })
            .cloned()
            .collect();
        records.reverse();
        let records: Vec<AuditRecord> = records
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit.unwrap_or(usize::MAX))
            .collect();
        Ok(records)
    }
}
