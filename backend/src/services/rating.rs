//! Rating Engine
//!
//! This module implements an Elo variant for padel doubles. Unlike
//! traditional 1v1 Elo, a match involves two teams of two, so the update
//! works at team level and is then divided between the partners:
//!
//! 1. **Expected share**: the classic logistic expectation computed from
//!    the two team ratings (arithmetic means of the partners).
//! 2. **Actual share**: the fraction of the match's points the team took,
//!    falling back to plain win/loss when no points were contested.
//! 3. **Team K**: the lower of the two partners' experience-based base K,
//!    scaled up by margin of victory and by an uncertainty multiplier for
//!    teams with a nearly unrated player.
//! 4. **Conservation**: team 1's delta is computed once; team 2's is its
//!    exact negation, so the four per-player deltas always sum to zero.
//! 5. **Teammate split**: each team's delta is divided with a weighting
//!    tilted towards the lower-rated partner; the second partner takes the
//!    exact remainder so nothing is lost to rounding.
//!
//! All pre-update ratings are captured before any mutation, which keeps
//! the emitted history entries independent of processing order.

use crate::config::RatingConfig;
use crate::error::{AppError, Result};
use crate::models::{Match, PlayerRating, RatingContext, RatingHistoryEntry};
use crate::store::Store;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Pre-update view of one player entering a match.
#[derive(Debug, Clone, Copy)]
pub struct RatingSnapshot {
    pub user_id: Uuid,
    pub rating: f64,
    pub matches_played: i32,
}

/// Rating change for one player from one match.
#[derive(Debug, Clone, Copy)]
pub struct PlayerDelta {
    pub user_id: Uuid,
    pub delta: f64,
}

/// Base K for a player with the given experience.
pub fn k_base(config: &RatingConfig, matches_played: i32) -> f64 {
    if matches_played < config.new_player_threshold {
        config.k_base_new
    } else if matches_played > config.experienced_threshold {
        config.k_base_experienced
    } else {
        config.k_base_normal
    }
}

/// Expected point share of a team rated `rating_a` against `rating_b`.
pub fn expected_share(config: &RatingConfig, rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / config.scaling_factor))
}

fn uncertainty_multiplier(config: &RatingConfig, min_matches: i32) -> f64 {
    if min_matches < config.uncertainty_fresh_threshold {
        config.uncertainty_fresh
    } else if min_matches < config.uncertainty_settling_threshold {
        config.uncertainty_settling
    } else {
        1.0
    }
}

/// Weight of the first partner in the team-delta split. The gap to the
/// second partner is clamped before tilting so an extreme mismatch cannot
/// push a weight past the tilt bound.
fn first_partner_weight(config: &RatingConfig, first_rating: f64, second_rating: f64) -> f64 {
    let gap =
        (second_rating - first_rating).clamp(-config.partner_gap_cap, config.partner_gap_cap);
    0.5 + config.split_tilt * gap / config.scaling_factor
}

/// Computes the four conserved rating deltas for one completed match.
///
/// `team1` and `team2` are the pre-update snapshots of the partnerships;
/// `team1_score`/`team2_score` the final scores. The returned deltas are
/// ordered team 1 first and sum to zero.
pub fn calculate_match_deltas(
    config: &RatingConfig,
    team1: [RatingSnapshot; 2],
    team2: [RatingSnapshot; 2],
    team1_score: i32,
    team2_score: i32,
) -> [PlayerDelta; 4] {
    let team1_rating = (team1[0].rating + team1[1].rating) / 2.0;
    let team2_rating = (team2[0].rating + team2[1].rating) / 2.0;

    let expected = expected_share(config, team1_rating, team2_rating);

    let total_points = team1_score + team2_score;
    let actual = if total_points > 0 {
        team1_score as f64 / total_points as f64
    } else if team1_score > team2_score {
        1.0
    } else {
        0.0
    };

    let team_k = k_base(config, team1[0].matches_played)
        .min(k_base(config, team1[1].matches_played));
    let margin = (team1_score - team2_score).abs() as f64 / total_points.max(1) as f64;
    let uncertainty = uncertainty_multiplier(
        config,
        team1[0].matches_played.min(team1[1].matches_played),
    );
    let effective_k = team_k * (1.0 + config.margin_weight * margin) * uncertainty;

    let team1_delta = effective_k * (actual - expected);
    let team2_delta = -team1_delta;

    let w1 = first_partner_weight(config, team1[0].rating, team1[1].rating);
    let delta_a = w1 * team1_delta;
    let delta_b = team1_delta - delta_a;

    let w2 = first_partner_weight(config, team2[0].rating, team2[1].rating);
    let delta_c = w2 * team2_delta;
    let delta_d = team2_delta - delta_c;

    [
        PlayerDelta {
            user_id: team1[0].user_id,
            delta: delta_a,
        },
        PlayerDelta {
            user_id: team1[1].user_id,
            delta: delta_b,
        },
        PlayerDelta {
            user_id: team2[0].user_id,
            delta: delta_c,
        },
        PlayerDelta {
            user_id: team2[1].user_id,
            delta: delta_d,
        },
    ]
}

/// Applies rating updates to the store and keeps the per-match history.
pub struct RatingEngine {
    store: Arc<dyn Store>,
    config: RatingConfig,
}

impl RatingEngine {
    pub fn new(store: Arc<dyn Store>, config: RatingConfig) -> Self {
        Self { store, config }
    }

    /// Fetches a player's rating, creating it at the initial rating on
    /// first use.
    pub async fn get_or_create_rating(&self, user_id: Uuid) -> Result<PlayerRating> {
        if let Some(rating) = self.store.rating_for_user(user_id).await? {
            return Ok(rating);
        }
        let rating = PlayerRating::new(user_id, self.config.initial_rating);
        self.store.save_rating(&rating).await?;
        Ok(rating)
    }

    /// Updates all four players' ratings from one completed match and
    /// persists the mutated ratings together with their history entries in
    /// a single store unit.
    ///
    /// # Errors
    ///
    /// Returns `WrongStatus` when the match has no recorded result yet
    #[instrument(level = "info", skip(self, completed_match), fields(match_id = %completed_match.id))]
    pub async fn apply_match(&self, completed_match: &Match) -> Result<HashMap<Uuid, f64>> {
        let (Some(team1_score), Some(team2_score)) =
            (completed_match.team1_score, completed_match.team2_score)
        else {
            return Err(AppError::WrongStatus(format!(
                "match {} has no recorded result",
                completed_match.id
            )));
        };
        if !completed_match.is_completed {
            return Err(AppError::WrongStatus(format!(
                "match {} is not completed",
                completed_match.id
            )));
        }

        let player_ids = completed_match.player_ids();
        let mut ratings = Vec::with_capacity(4);
        for player_id in player_ids {
            ratings.push(self.get_or_create_rating(player_id).await?);
        }

        // Pre-update snapshots; everything below works from these.
        let snapshots: Vec<RatingSnapshot> = ratings
            .iter()
            .map(|r| RatingSnapshot {
                user_id: r.user_id,
                rating: r.current_rating,
                matches_played: r.matches_played,
            })
            .collect();

        let deltas = calculate_match_deltas(
            &self.config,
            [snapshots[0], snapshots[1]],
            [snapshots[2], snapshots[3]],
            team1_score,
            team2_score,
        );

        let total_points = team1_score + team2_score;
        let now = Utc::now();
        let mut history = Vec::with_capacity(4);

        for (index, rating) in ratings.iter_mut().enumerate() {
            let on_team1 = index < 2;
            let (own_score, opposing_score) = if on_team1 {
                (team1_score, team2_score)
            } else {
                (team2_score, team1_score)
            };

            let old_rating = snapshots[index].rating;
            let new_rating = old_rating + deltas[index].delta;

            rating.current_rating = new_rating;
            rating.peak_rating = rating.peak_rating.max(new_rating);
            rating.lowest_rating = rating.lowest_rating.min(new_rating);
            rating.matches_played += 1;
            if own_score > opposing_score {
                rating.matches_won += 1;
            }
            rating.total_points_scored += own_score;
            rating.total_points_possible += total_points;
            rating.updated_at = now;

            let partner_index = index ^ 1;
            let opponent_indices = if on_team1 { [2, 3] } else { [0, 1] };

            history.push(RatingHistoryEntry {
                id: Uuid::new_v4(),
                player_rating_id: rating.id,
                tournament_id: Some(completed_match.tournament_id),
                match_id: Some(completed_match.id),
                old_rating,
                new_rating,
                rating_change: new_rating - old_rating,
                context: Some(RatingContext {
                    partner_rating: snapshots[partner_index].rating,
                    opponent_ratings: [
                        snapshots[opponent_indices[0]].rating,
                        snapshots[opponent_indices[1]].rating,
                    ],
                }),
                match_result: Some(format!("{own_score}-{opposing_score}")),
                timestamp: now,
            });
        }

        self.store.apply_match_update(&ratings, &history).await?;

        Ok(deltas.iter().map(|d| (d.user_id, d.delta)).collect())
    }

    /// Records podium finishes and participation counts from a finished
    /// tournament. `standings` is the final leaderboard, best first. The
    /// caller guarantees this runs exactly once per tournament.
    #[instrument(level = "info", skip(self, standings), fields(%tournament_id, participants = standings.len()))]
    pub async fn apply_podium(&self, tournament_id: Uuid, standings: &[Uuid]) -> Result<()> {
        for (position, player_id) in standings.iter().enumerate() {
            let mut rating = self.get_or_create_rating(*player_id).await?;
            match position {
                0 => rating.first_place_finishes += 1,
                1 => rating.second_place_finishes += 1,
                2 => rating.third_place_finishes += 1,
                _ => {}
            }
            rating.tournaments_played += 1;
            rating.updated_at = Utc::now();
            self.store.save_rating(&rating).await?;
        }
        Ok(())
    }
}
