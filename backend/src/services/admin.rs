//! Administrative Overrides
//!
//! Superuser-only operations that step outside the normal lifecycle:
//! rewriting a recorded result, recomputing a tournament's stored
//! placements, forcing a status change, and managing users. Every action
//! writes an audit record capturing the before/after state and the
//! supplied reason, and returns that record to the caller.
//!
//! Overrides never move the state machine backwards and never recompute
//! historical rating deltas.

use crate::context::RequestContext;
use crate::error::{AppError, Result};
use crate::models::{
    AuditAction, AuditRecord, AuditTargetType, Match, Tournament, TournamentResult,
    TournamentStatus, User,
};
use crate::services::results;
use crate::store::{retry, AuditFilter, Store};
use crate::validation;
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

fn snapshot<T: Serialize>(value: &T) -> Option<serde_json::Value> {
    serde_json::to_value(value).ok()
}

pub struct AdminService {
    store: Arc<dyn Store>,
}

impl AdminService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn log(&self, record: AuditRecord) -> Result<AuditRecord> {
        self.store.append_audit(&record).await?;
        Ok(record)
    }

    /// Rewrites a recorded match result. The new scores must still satisfy
    /// the Americano sum constraint. Historical rating deltas are left
    /// untouched.
    #[instrument(level = "info", skip(self, ctx, reason), fields(admin = %ctx.user.id))]
    pub async fn override_match_result(
        &self,
        ctx: &RequestContext,
        match_id: Uuid,
        team1_score: i32,
        team2_score: i32,
        reason: &str,
    ) -> Result<(Match, AuditRecord)> {
        ctx.require_superuser()?;
        retry::with_retries(ctx.deadline, || {
            self.try_override_match_result(ctx, match_id, team1_score, team2_score, reason)
        })
        .await
    }

    async fn try_override_match_result(
        &self,
        ctx: &RequestContext,
        match_id: Uuid,
        team1_score: i32,
        team2_score: i32,
        reason: &str,
    ) -> Result<(Match, AuditRecord)> {
        ctx.check_deadline()?;
        let existing = self
            .store
            .get_match(match_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Match {match_id} not found")))?;
        let tournament = self
            .store
            .get_tournament(existing.tournament_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Tournament {} not found", existing.tournament_id))
            })?;

        validation::validate_americano_score(
            team1_score,
            team2_score,
            tournament.points_per_match,
        )?;

        let updated = self
            .store
            .override_scores(match_id, team1_score, team2_score)
            .await?;

        let record = AuditRecord::new(
            ctx.user.id,
            AuditAction::MatchResultOverride,
            AuditTargetType::Match,
            match_id.to_string(),
            reason,
        )
        .with_values(snapshot(&existing), snapshot(&updated));

        Ok((updated, self.log(record).await?))
    }

    /// Recomputes and atomically replaces a tournament's stored final
    /// placements, typically after a result override.
    #[instrument(level = "info", skip(self, ctx, reason), fields(admin = %ctx.user.id))]
    pub async fn recalculate_results(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
        reason: &str,
    ) -> Result<(Vec<TournamentResult>, AuditRecord)> {
        ctx.require_superuser()?;
        retry::with_retries(ctx.deadline, || {
            self.try_recalculate_results(ctx, tournament_id, reason)
        })
        .await
    }

    async fn try_recalculate_results(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
        reason: &str,
    ) -> Result<(Vec<TournamentResult>, AuditRecord)> {
        ctx.check_deadline()?;
        self.store
            .get_tournament(tournament_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tournament {tournament_id} not found")))?;

        let old_results = self.store.results_for_tournament(tournament_id).await?;
        let roster = self.store.roster(tournament_id).await?;
        let completed = self.store.completed_matches(tournament_id).await?;
        let new_results = results::build_final_results(tournament_id, &roster, &completed);

        self.store
            .replace_results(tournament_id, new_results.clone())
            .await?;

        let record = AuditRecord::new(
            ctx.user.id,
            AuditAction::TournamentScoreRecalc,
            AuditTargetType::Tournament,
            tournament_id.to_string(),
            reason,
        )
        .with_values(snapshot(&old_results), snapshot(&new_results));

        Ok((new_results, self.log(record).await?))
    }

    /// Forces a tournament's status. Only forward moves within
    /// pending → active → completed are allowed; the state machine never
    /// runs backwards, not even for administrators.
    #[instrument(level = "info", skip(self, ctx, reason), fields(admin = %ctx.user.id))]
    pub async fn force_status(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
        new_status: TournamentStatus,
        reason: &str,
    ) -> Result<(Tournament, AuditRecord)> {
        ctx.require_superuser()?;
        ctx.check_deadline()?;

        let mut tournament = self
            .store
            .get_tournament(tournament_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tournament {tournament_id} not found")))?;

        if !tournament.status.can_transition_to(new_status) {
            return Err(AppError::WrongStatus(format!(
                "Cannot force status from {} to {new_status}",
                tournament.status
            )));
        }

        let before = snapshot(&tournament);
        tournament.status = new_status;
        self.store.save_tournament(&tournament).await?;

        let record = AuditRecord::new(
            ctx.user.id,
            AuditAction::TournamentStatusChange,
            AuditTargetType::Tournament,
            tournament_id.to_string(),
            reason,
        )
        .with_values(before, snapshot(&tournament));

        Ok((tournament, self.log(record).await?))
    }

    /// Deletes a tournament and, through the store's cascade, its matches
    /// and results.
    #[instrument(level = "info", skip(self, ctx, reason), fields(admin = %ctx.user.id))]
    pub async fn delete_tournament(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
        reason: &str,
    ) -> Result<AuditRecord> {
        ctx.require_superuser()?;
        ctx.check_deadline()?;

        let tournament = self
            .store
            .get_tournament(tournament_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tournament {tournament_id} not found")))?;

        self.store.delete_tournament(tournament_id).await?;

        let record = AuditRecord::new(
            ctx.user.id,
            AuditAction::TournamentDelete,
            AuditTargetType::Tournament,
            tournament_id.to_string(),
            reason,
        )
        .with_values(snapshot(&tournament), None);

        self.log(record).await
    }

    /// Soft delete: the user stays referenceable from historical matches
    /// but can no longer participate.
    #[instrument(level = "info", skip(self, ctx, reason), fields(admin = %ctx.user.id))]
    pub async fn deactivate_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        reason: &str,
    ) -> Result<(User, AuditRecord)> {
        ctx.require_superuser()?;
        ctx.check_deadline()?;

        let mut user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

        let before = snapshot(&user);
        user.is_active = false;
        self.store.save_user(&user).await?;

        let record = AuditRecord::new(
            ctx.user.id,
            AuditAction::UserStatusChange,
            AuditTargetType::User,
            user_id.to_string(),
            reason,
        )
        .with_values(before, snapshot(&user));

        Ok((user, self.log(record).await?))
    }

    /// Hard delete, refused while any match references the user; callers
    /// fall back to deactivation in that case.
    #[instrument(level = "info", skip(self, ctx, reason), fields(admin = %ctx.user.id))]
    pub async fn delete_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        reason: &str,
    ) -> Result<AuditRecord> {
        ctx.require_superuser()?;
        ctx.check_deadline()?;

        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

        if self.store.any_matches_for_player(user_id).await? {
            return Err(AppError::Conflict(
                "User has historical matches; deactivate instead".to_string(),
            ));
        }

        self.store.delete_user(user_id).await?;

        let record = AuditRecord::new(
            ctx.user.id,
            AuditAction::UserDelete,
            AuditTargetType::User,
            user_id.to_string(),
            reason,
        )
        .with_values(snapshot(&user), None);

        self.log(record).await
    }

    /// User listing for the administrative dashboard.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        include_inactive: bool,
    ) -> Result<Vec<User>> {
        ctx.require_superuser()?;
        self.store
            .list_users(include_inactive)
            .await
            .map_err(Into::into)
    }

    /// Audit-trail review, newest first.
    pub async fn audit_trail(
        &self,
        ctx: &RequestContext,
        filter: &AuditFilter,
    ) -> Result<Vec<AuditRecord>> {
        ctx.require_superuser()?;
        self.store.list_audit(filter).await.map_err(Into::into)
    }
}
