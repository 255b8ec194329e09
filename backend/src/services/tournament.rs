//! Tournament Lifecycle Service
//!
//! Orchestrates the pending → active → completed state machine and
//! everything that hangs off it:
//! - roster management while pending (join/leave, organiser add/remove,
//!   join codes)
//! - the start transition: schedule generation, average-rating snapshot,
//!   atomic materialisation of all matches
//! - result recording: score validation, atomic completion of the match,
//!   rating update, round advancement
//! - the finish transition: frozen placements and podium accounting
//!
//! Mutating operations run through the bounded-retry helper so transient
//! store failures and lost optimistic races are absorbed; read paths call
//! the store directly. Rating updates and result projections run after
//! the match/tournament state change commits; their failures are logged
//! and surfaced to operators but never undo the commit.

use crate::config::AppConfig;
use crate::context::RequestContext;
use crate::error::{AppError, Result};
use crate::models::{
    Match, Tournament, TournamentFilter, TournamentResult, TournamentStatus, TournamentSummary,
    TournamentSystem, TournamentUpdate, User,
};
use crate::services::rating::RatingEngine;
use crate::services::{pairing, results, scoring};
use crate::store::{retry, ActivateOutcome, CompleteOutcome, RecordOutcome, Store};
use crate::validation;
use chrono::Utc;
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

const JOIN_CODE_LENGTH: usize = 6;
const JOIN_CODE_ATTEMPTS: usize = 5;

/// Input for creating a tournament.
#[derive(Debug, Clone)]
pub struct CreateTournament {
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub start_date: chrono::NaiveDate,
    pub entry_fee: f64,
    pub max_players: i32,
    pub system: TournamentSystem,
    pub points_per_match: i32,
    pub courts: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub player_id: Uuid,
    pub player_name: String,
    pub email: Option<String>,
    pub score: i32,
    pub points_difference: i32,
    pub wins: i32,
    pub losses: i32,
    pub ties: i32,
    pub matches_played: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WinnerView {
    pub player_id: Uuid,
    pub player_name: String,
    pub email: Option<String>,
    pub score: i32,
}

/// Whether a given user could join a tournament right now.
#[derive(Debug, Clone, Serialize)]
pub struct JoinEligibility {
    pub is_full: bool,
    pub already_joined: bool,
    pub can_join: bool,
}

pub struct TournamentService {
    store: Arc<dyn Store>,
    rating: RatingEngine,
    config: AppConfig,
}

impl TournamentService {
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Self {
        let rating = RatingEngine::new(store.clone(), config.rating.clone());
        Self {
            store,
            rating,
            config,
        }
    }

    async fn require_tournament(&self, id: Uuid) -> Result<Tournament> {
        self.store
            .get_tournament(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tournament {id} not found")))
    }

    fn require_organiser(tournament: &Tournament, ctx: &RequestContext) -> Result<()> {
        if tournament.is_organiser(ctx.user.id) || ctx.user.is_superuser {
            Ok(())
        } else {
            Err(AppError::AuthorizationFailed(
                "Only the organiser may do this".to_string(),
            ))
        }
    }

    // ------------------------------------------------------------------
    // Creation and roster management (pending tournaments)
    // ------------------------------------------------------------------

    #[instrument(level = "info", skip(self, ctx, input), fields(organiser = %ctx.user.id))]
    pub async fn create(&self, ctx: &RequestContext, input: CreateTournament) -> Result<Tournament> {
        ctx.check_deadline()?;
        validation::validate_name(&input.name, "Tournament name")?;
        validation::validate_name(&input.location, "Location")?;
        validation::validate_tournament_config(
            input.max_players,
            input.points_per_match,
            input.courts,
            input.entry_fee,
        )?;

        let tournament = Tournament {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            description: input.description,
            location: input.location.trim().to_string(),
            start_date: input.start_date,
            entry_fee: input.entry_fee,
            max_players: input.max_players,
            system: input.system,
            points_per_match: input.points_per_match,
            courts: input.courts,
            created_at: Utc::now(),
            created_by: ctx.user.id,
            status: TournamentStatus::Pending,
            current_round: 0,
            average_player_rating: None,
            join_code: None,
        };

        self.store.save_tournament(&tournament).await?;
        Ok(tournament)
    }

    /// Updates a pending tournament's configuration. The organiser may not
    /// shrink `max_players` below the current roster size.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        update: TournamentUpdate,
    ) -> Result<Tournament> {
        ctx.check_deadline()?;
        let mut tournament = self.require_tournament(id).await?;
        Self::require_organiser(&tournament, ctx)?;

        if !tournament.is_pending() {
            return Err(AppError::WrongStatus(format!(
                "Tournament can only be edited while pending, status is {}",
                tournament.status
            )));
        }

        if let Some(name) = update.name {
            validation::validate_name(&name, "Tournament name")?;
            tournament.name = name.trim().to_string();
        }
        if let Some(location) = update.location {
            validation::validate_name(&location, "Location")?;
            tournament.location = location.trim().to_string();
        }
        if update.description.is_some() {
            tournament.description = update.description;
        }
        if let Some(start_date) = update.start_date {
            tournament.start_date = start_date;
        }
        if let Some(entry_fee) = update.entry_fee {
            tournament.entry_fee = entry_fee;
        }
        if let Some(max_players) = update.max_players {
            let roster_size = self.store.roster(id).await?.len();
            if (max_players as usize) < roster_size {
                return Err(AppError::InvalidInput(format!(
                    "Max players {max_players} is below the current roster size {roster_size}"
                )));
            }
            tournament.max_players = max_players;
        }
        if let Some(points_per_match) = update.points_per_match {
            tournament.points_per_match = points_per_match;
        }
        if let Some(courts) = update.courts {
            tournament.courts = courts;
        }

        validation::validate_tournament_config(
            tournament.max_players,
            tournament.points_per_match,
            tournament.courts,
            tournament.entry_fee,
        )?;

        self.store.save_tournament(&tournament).await?;
        Ok(tournament)
    }

    pub async fn get(&self, id: Uuid) -> Result<TournamentSummary> {
        let tournament = self.require_tournament(id).await?;
        let roster = self.store.roster(id).await?;
        Ok(TournamentSummary::new(tournament, roster.len()))
    }

    /// Filtered listing with roster counts, plus the pre-pagination total.
    pub async fn list(
        &self,
        filter: &TournamentFilter,
    ) -> Result<(Vec<TournamentSummary>, usize)> {
        let (tournaments, total) = self.store.list_tournaments(filter).await?;
        let mut summaries = Vec::with_capacity(tournaments.len());
        for tournament in tournaments {
            let roster = self.store.roster(tournament.id).await?;
            summaries.push(TournamentSummary::new(tournament, roster.len()));
        }
        Ok((summaries, total))
    }

    pub async fn join_eligibility(
        &self,
        user_id: Uuid,
        tournament_id: Uuid,
    ) -> Result<JoinEligibility> {
        let tournament = self.require_tournament(tournament_id).await?;
        let roster = self.store.roster(tournament_id).await?;
        let is_full = roster.len() >= tournament.max_players as usize;
        let already_joined = roster.contains(&user_id);
        Ok(JoinEligibility {
            is_full,
            already_joined,
            can_join: tournament.is_pending() && !is_full && !already_joined,
        })
    }

    #[instrument(level = "info", skip(self, ctx), fields(user = %ctx.user.id))]
    pub async fn join(&self, ctx: &RequestContext, tournament_id: Uuid) -> Result<()> {
        self.add_to_roster(ctx, tournament_id, ctx.user.id).await
    }

    /// Organiser-side roster addition (e.g. guest players).
    pub async fn add_player(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
        player_id: Uuid,
    ) -> Result<()> {
        let tournament = self.require_tournament(tournament_id).await?;
        Self::require_organiser(&tournament, ctx)?;
        self.add_to_roster(ctx, tournament_id, player_id).await
    }

    async fn add_to_roster(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
        player_id: Uuid,
    ) -> Result<()> {
        ctx.check_deadline()?;
        let tournament = self.require_tournament(tournament_id).await?;

        if !tournament.is_pending() {
            return Err(AppError::WrongStatus(format!(
                "Roster can only change while pending, status is {}",
                tournament.status
            )));
        }

        let user = self
            .store
            .get_user(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {player_id} not found")))?;
        if !user.is_active {
            return Err(AppError::InvalidInput(
                "Deactivated users cannot join tournaments".to_string(),
            ));
        }

        let roster = self.store.roster(tournament_id).await?;
        if roster.len() >= tournament.max_players as usize {
            return Err(AppError::Conflict("Tournament is full".to_string()));
        }

        let added = self
            .store
            .add_roster_member(tournament_id, player_id)
            .await?;
        if !added {
            return Err(AppError::Conflict(
                "Player is already on the roster".to_string(),
            ));
        }
        Ok(())
    }

    #[instrument(level = "info", skip(self, ctx), fields(user = %ctx.user.id))]
    pub async fn leave(&self, ctx: &RequestContext, tournament_id: Uuid) -> Result<()> {
        self.remove_from_roster(ctx, tournament_id, ctx.user.id, false)
            .await
    }

    pub async fn remove_player(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
        player_id: Uuid,
    ) -> Result<()> {
        self.remove_from_roster(ctx, tournament_id, player_id, true)
            .await
    }

    async fn remove_from_roster(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
        player_id: Uuid,
        organiser_action: bool,
    ) -> Result<()> {
        ctx.check_deadline()?;
        let tournament = self.require_tournament(tournament_id).await?;
        if organiser_action {
            Self::require_organiser(&tournament, ctx)?;
        }

        if !tournament.is_pending() {
            return Err(AppError::WrongStatus(format!(
                "Roster can only change while pending, status is {}",
                tournament.status
            )));
        }

        let removed = self
            .store
            .remove_roster_member(tournament_id, player_id)
            .await?;
        if !removed {
            return Err(AppError::NotFound(
                "Player is not on the roster".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the tournament's join code, creating one on first request.
    /// Subsequent calls return the same code.
    #[instrument(level = "info", skip(self, ctx))]
    pub async fn get_or_create_join_code(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
    ) -> Result<String> {
        ctx.check_deadline()?;
        let mut tournament = self.require_tournament(tournament_id).await?;
        Self::require_organiser(&tournament, ctx)?;

        if let Some(code) = tournament.join_code {
            return Ok(code);
        }

        for _ in 0..JOIN_CODE_ATTEMPTS {
            let code = generate_join_code();
            tournament.join_code = Some(code.clone());
            match self.store.save_tournament(&tournament).await {
                Ok(()) => return Ok(code),
                Err(err) => {
                    let app_err = AppError::from(err);
                    if !matches!(app_err, AppError::Conflict(_)) {
                        return Err(app_err);
                    }
                    // Code collision; roll a new one.
                }
            }
        }

        Err(AppError::Conflict(
            "Could not allocate a unique join code".to_string(),
        ))
    }

    pub async fn join_by_code(&self, ctx: &RequestContext, code: &str) -> Result<Tournament> {
        let tournament = self
            .store
            .find_by_join_code(code.trim())
            .await?
            .ok_or_else(|| AppError::NotFound("No tournament with that join code".to_string()))?;
        self.add_to_roster(ctx, tournament.id, ctx.user.id).await?;
        Ok(tournament)
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Starts a tournament: generates the full schedule, freezes the
    /// roster's average rating and materialises every match atomically.
    #[instrument(level = "info", skip(self, ctx), fields(organiser = %ctx.user.id))]
    pub async fn start(&self, ctx: &RequestContext, tournament_id: Uuid) -> Result<Tournament> {
        retry::with_retries(ctx.deadline, || self.try_start(ctx, tournament_id)).await
    }

    async fn try_start(&self, ctx: &RequestContext, tournament_id: Uuid) -> Result<Tournament> {
        ctx.check_deadline()?;
        let tournament = self.require_tournament(tournament_id).await?;
        Self::require_organiser(&tournament, ctx)?;

        if !tournament.is_pending() {
            return Err(AppError::WrongStatus(format!(
                "Tournament cannot be started, status is {}",
                tournament.status
            )));
        }
        if tournament.system != TournamentSystem::Americano {
            return Err(AppError::InvalidInput(format!(
                "No schedule generator for the {:?} system",
                tournament.system
            )));
        }

        let roster = self.store.roster(tournament_id).await?;
        let n = roster.len();
        if n < self.config.roster.min_players
            || n > self.config.roster.max_players
            || n % self.config.roster.group_size != 0
        {
            return Err(AppError::InvalidRoster(format!(
                "Americano needs between {} and {} players in multiples of {}, roster has {n}",
                self.config.roster.min_players,
                self.config.roster.max_players,
                self.config.roster.group_size,
            )));
        }

        let schedule = pairing::generate_schedule(&roster)?;

        ctx.check_deadline()?;
        let ratings = self.store.ratings_for_users(&roster).await?;
        let rating_of: HashMap<Uuid, f64> = ratings
            .iter()
            .map(|r| (r.user_id, r.current_rating))
            .collect();
        let average_rating = roster
            .iter()
            .map(|id| {
                rating_of
                    .get(id)
                    .copied()
                    .unwrap_or(self.config.rating.initial_rating)
            })
            .sum::<f64>()
            / n as f64;

        let matches: Vec<Match> = schedule
            .iter()
            .enumerate()
            .flat_map(|(round_index, round)| {
                round.iter().map(move |planned| {
                    Match::new(
                        tournament_id,
                        (round_index + 1) as i32,
                        planned.team1,
                        planned.team2,
                    )
                })
            })
            .collect();

        match self
            .store
            .begin_active(tournament_id, &roster, average_rating, matches)
            .await?
        {
            ActivateOutcome::Activated(tournament) => {
                tracing::info!(
                    %tournament_id,
                    rounds = schedule.len(),
                    "tournament started"
                );
                Ok(tournament)
            }
            ActivateOutcome::WrongStatus(status) => Err(AppError::WrongStatus(format!(
                "Tournament cannot be started, status is {status}"
            ))),
            ActivateOutcome::RosterChanged => Err(AppError::Conflict(
                "Roster changed while starting".to_string(),
            )),
        }
    }

    pub async fn current_round_matches(&self, tournament_id: Uuid) -> Result<Vec<Match>> {
        let tournament = self.require_tournament(tournament_id).await?;
        self.store
            .matches_for_round(tournament_id, tournament.current_round)
            .await
            .map_err(Into::into)
    }

    /// All rounds in order, each with its matches.
    pub async fn all_rounds(&self, tournament_id: Uuid) -> Result<Vec<(i32, Vec<Match>)>> {
        self.require_tournament(tournament_id).await?;
        let matches = self.store.matches_for_tournament(tournament_id).await?;

        let mut rounds: Vec<(i32, Vec<Match>)> = Vec::new();
        for m in matches {
            match rounds.last_mut() {
                Some((round_number, round)) if *round_number == m.round_number => round.push(m),
                _ => rounds.push((m.round_number, vec![m])),
            }
        }
        Ok(rounds)
    }

    /// Records a match result. The score write is atomic: of two
    /// concurrent calls on the same match exactly one succeeds and the
    /// other fails with `AlreadyRecorded`. The rating update and the
    /// round-cursor advancement run after the write commits; their
    /// failures are logged, never rolled back, and never retried here —
    /// rerunning this function after the commit would misread its own
    /// successful write as `AlreadyRecorded`. A missed advancement is
    /// recovered by the next recording.
    #[instrument(level = "info", skip(self, ctx), fields(user = %ctx.user.id))]
    pub async fn record_result(
        &self,
        ctx: &RequestContext,
        match_id: Uuid,
        team1_score: i32,
        team2_score: i32,
    ) -> Result<Match> {
        retry::with_retries(ctx.deadline, || {
            self.try_record_result(ctx, match_id, team1_score, team2_score)
        })
        .await
    }

    async fn try_record_result(
        &self,
        ctx: &RequestContext,
        match_id: Uuid,
        team1_score: i32,
        team2_score: i32,
    ) -> Result<Match> {
        ctx.check_deadline()?;
        let existing = self
            .store
            .get_match(match_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Match {match_id} not found")))?;
        let tournament = self.require_tournament(existing.tournament_id).await?;
        Self::require_organiser(&tournament, ctx)?;

        if tournament.is_completed() {
            return Err(AppError::WrongStatus(
                "Cannot edit results, tournament is already completed".to_string(),
            ));
        }

        validation::validate_americano_score(
            team1_score,
            team2_score,
            tournament.points_per_match,
        )?;

        let recorded = match self
            .store
            .record_scores(match_id, team1_score, team2_score)
            .await?
        {
            RecordOutcome::Recorded(m) => m,
            RecordOutcome::AlreadyCompleted(_) => {
                return Err(AppError::AlreadyRecorded(format!(
                    "Match {match_id} already has a result"
                )));
            }
        };

        // Post-commit side effects. Failures here are surfaced to
        // operators through the log, not to the caller: the result is
        // committed, and propagating an error would send the retry loop
        // back through `record_scores` to report a false `AlreadyRecorded`.
        if let Err(err) = self.rating.apply_match(&recorded).await {
            tracing::error!(%match_id, error = %err, "rating update failed after result commit");
        }
        if let Err(err) = self.maybe_advance_round(&tournament).await {
            tracing::error!(%match_id, error = %err, "round advancement failed after result commit");
        }

        Ok(recorded)
    }

    /// Advances the round cursor once the current round is fully
    /// recorded. Checked on every recording, so an advancement lost to a
    /// store failure is picked up by the next one.
    async fn maybe_advance_round(&self, tournament: &Tournament) -> Result<()> {
        let round_matches = self
            .store
            .matches_for_round(tournament.id, tournament.current_round)
            .await?;
        if !round_matches.iter().all(|m| m.is_completed) {
            return Ok(());
        }

        let all_matches = self.store.matches_for_tournament(tournament.id).await?;
        let last_round = all_matches
            .iter()
            .map(|m| m.round_number)
            .max()
            .unwrap_or(tournament.current_round);
        if tournament.current_round >= last_round {
            // Final round done; completion stays an explicit organiser action.
            return Ok(());
        }

        let advanced = self
            .store
            .advance_round(tournament.id, tournament.current_round)
            .await?;
        if advanced {
            tracing::info!(
                tournament_id = %tournament.id,
                new_round = tournament.current_round + 1,
                "advanced to next round"
            );
        }
        Ok(())
    }

    /// Finishes a tournament: freezes placements and applies podium
    /// accounting. Calling it again on a completed tournament is a no-op
    /// that returns the stored snapshot.
    #[instrument(level = "info", skip(self, ctx), fields(organiser = %ctx.user.id))]
    pub async fn finish(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
    ) -> Result<(Tournament, Vec<TournamentResult>)> {
        retry::with_retries(ctx.deadline, || self.try_finish(ctx, tournament_id)).await
    }

    async fn try_finish(
        &self,
        ctx: &RequestContext,
        tournament_id: Uuid,
    ) -> Result<(Tournament, Vec<TournamentResult>)> {
        ctx.check_deadline()?;
        let tournament = self.require_tournament(tournament_id).await?;
        Self::require_organiser(&tournament, ctx)?;

        match tournament.status {
            TournamentStatus::Pending => {
                return Err(AppError::WrongStatus(
                    "Tournament has not been started".to_string(),
                ));
            }
            TournamentStatus::Completed => {
                let stored = self.store.results_for_tournament(tournament_id).await?;
                return Ok((tournament, stored));
            }
            TournamentStatus::Active => {}
        }

        let roster = self.store.roster(tournament_id).await?;
        let completed = self.store.completed_matches(tournament_id).await?;
        let final_results = results::build_final_results(tournament_id, &roster, &completed);

        ctx.check_deadline()?;
        match self
            .store
            .complete_tournament(tournament_id, final_results.clone())
            .await?
        {
            CompleteOutcome::Completed(tournament) => {
                // Podium accounting runs exactly once: only the call that
                // performed the transition gets here.
                let standings: Vec<Uuid> =
                    final_results.iter().map(|r| r.player_id).collect();
                if let Err(err) = self.rating.apply_podium(tournament_id, &standings).await {
                    tracing::error!(
                        %tournament_id,
                        error = %err,
                        "podium accounting failed after completion"
                    );
                }
                Ok((tournament, final_results))
            }
            CompleteOutcome::AlreadyCompleted(tournament) => {
                let stored = self.store.results_for_tournament(tournament_id).await?;
                Ok((tournament, stored))
            }
            CompleteOutcome::WrongStatus(status) => Err(AppError::WrongStatus(format!(
                "Tournament cannot be finished, status is {status}"
            ))),
        }
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    /// Current standings from completed matches, enriched with player
    /// names.
    pub async fn leaderboard(&self, tournament_id: Uuid) -> Result<Vec<LeaderboardRow>> {
        self.require_tournament(tournament_id).await?;
        let roster = self.store.roster(tournament_id).await?;
        let completed = self.store.completed_matches(tournament_id).await?;

        let stats = scoring::calculate_player_stats(&roster, &completed);
        let standings = scoring::leaderboard_order(&roster, &stats);

        let users = self.store.get_users(&roster).await?;
        let user_of = |id: Uuid| users.iter().find(|u| u.id == id);

        Ok(standings
            .into_iter()
            .enumerate()
            .map(|(index, (player_id, stats))| LeaderboardRow {
                rank: index + 1,
                player_id,
                player_name: user_of(player_id)
                    .map(User::display_name)
                    .unwrap_or_else(|| "Unknown Player".to_string()),
                email: user_of(player_id).and_then(|u| u.email.clone()),
                score: stats.total_points,
                points_difference: stats.points_difference,
                wins: stats.wins,
                losses: stats.losses,
                ties: stats.ties,
                matches_played: stats.matches_played,
            })
            .collect())
    }

    /// Total points per player from completed matches.
    pub async fn player_scores(&self, tournament_id: Uuid) -> Result<HashMap<Uuid, i32>> {
        self.require_tournament(tournament_id).await?;
        let roster = self.store.roster(tournament_id).await?;
        let completed = self.store.completed_matches(tournament_id).await?;
        let stats = scoring::calculate_player_stats(&roster, &completed);
        Ok(stats
            .into_iter()
            .map(|(id, s)| (id, s.total_points))
            .collect())
    }

    /// The winner, available once the tournament is completed. Prefers
    /// the frozen placements; falls back to a live computation if none
    /// were stored.
    pub async fn winner(&self, tournament_id: Uuid) -> Result<Option<WinnerView>> {
        let tournament = self.require_tournament(tournament_id).await?;
        if !tournament.is_completed() {
            return Ok(None);
        }

        if self.store.has_results(tournament_id).await? {
            let results = self.store.results_for_tournament(tournament_id).await?;
            if let Some(first) = results.into_iter().find(|r| r.final_position == 1) {
                let user = self.store.get_user(first.player_id).await?;
                return Ok(Some(WinnerView {
                    player_id: first.player_id,
                    player_name: user
                        .as_ref()
                        .map(User::display_name)
                        .unwrap_or_else(|| "Unknown Player".to_string()),
                    email: user.and_then(|u| u.email),
                    score: first.total_score,
                }));
            }
        }

        let leaderboard = self.leaderboard(tournament_id).await?;
        Ok(leaderboard.into_iter().next().map(|row| WinnerView {
            player_id: row.player_id,
            player_name: row.player_name,
            email: row.email,
            score: row.score,
        }))
    }

    /// Stored final placements of a completed tournament.
    pub async fn final_results(&self, tournament_id: Uuid) -> Result<Vec<TournamentResult>> {
        self.require_tournament(tournament_id).await?;
        self.store
            .results_for_tournament(tournament_id)
            .await
            .map_err(Into::into)
    }

    /// One player's stored placement in a tournament.
    pub async fn player_result(
        &self,
        tournament_id: Uuid,
        player_id: Uuid,
    ) -> Result<Option<TournamentResult>> {
        self.require_tournament(tournament_id).await?;
        self.store
            .result_for_player(tournament_id, player_id)
            .await
            .map_err(Into::into)
    }
}

fn generate_join_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(JOIN_CODE_LENGTH)
        .map(|byte| (byte as char).to_ascii_uppercase())
        .collect()
}
