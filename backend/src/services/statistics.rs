//! Player Statistics & Rating Leaderboard
//!
//! Read-side views over the rating store: a per-player statistics page
//! (rating snapshot, lifetime counters, podium record, recent tournament
//! history) and the global rating leaderboard.

use crate::config::RatingConfig;
use crate::error::{AppError, Result};
use crate::models::{PlayerRating, User};
use crate::store::Store;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// History entries shown on the statistics page (one final entry per
/// tournament).
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Skill label and external (Playtomic-style) level for a rating.
pub fn skill_level(rating: f64) -> (&'static str, f64) {
    const BANDS: [(f64, &str, f64); 10] = [
        (1100.0, "Beginner", 1.0),
        (1200.0, "Novice", 2.0),
        (1300.0, "Improver", 2.5),
        (1400.0, "Weak Intermediate", 3.0),
        (1500.0, "Intermediate", 3.5),
        (1600.0, "Strong Intermediate", 4.0),
        (1700.0, "Weak Advanced", 4.5),
        (1800.0, "Advanced", 5.0),
        (1900.0, "Strong Advanced", 5.5),
        (2000.0, "Weak Expert", 6.0),
    ];

    for (threshold, label, external) in BANDS {
        if rating < threshold {
            return (label, external);
        }
    }
    ("Expert", 6.5)
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingView {
    pub current: f64,
    pub peak: f64,
    pub lowest: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LifetimeStatsView {
    pub matches_played: i32,
    pub matches_won: i32,
    pub win_rate: f64,
    pub average_point_percentage: f64,
    pub tournaments_played: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PodiumView {
    pub first: i32,
    pub second: i32,
    pub third: i32,
    pub total: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntryView {
    pub date: chrono::DateTime<chrono::Utc>,
    pub tournament_id: Option<Uuid>,
    pub old_rating: f64,
    pub new_rating: f64,
    pub change: f64,
    pub match_result: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerStatisticsView {
    pub player_id: Uuid,
    pub player_name: String,
    pub rating: RatingView,
    pub skill_level: &'static str,
    pub external_level: f64,
    pub statistics: LifetimeStatsView,
    pub podium: PodiumView,
    pub recent_history: Vec<HistoryEntryView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingLeaderboardRow {
    pub rank: usize,
    pub player_id: Uuid,
    pub player_name: String,
    pub rating: f64,
    pub matches_played: i32,
    pub win_rate: f64,
    pub trend: Trend,
}

pub struct StatisticsService {
    store: Arc<dyn Store>,
    config: RatingConfig,
}

impl StatisticsService {
    pub fn new(store: Arc<dyn Store>, config: RatingConfig) -> Self {
        Self { store, config }
    }

    /// Full statistics page for one player. Players who never played get
    /// the initial-rating defaults rather than an error.
    pub async fn player_statistics(&self, user_id: Uuid) -> Result<PlayerStatisticsView> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

        let rating = match self.store.rating_for_user(user_id).await? {
            Some(rating) => rating,
            None => PlayerRating::new(user_id, self.config.initial_rating),
        };

        let history = self
            .store
            .recent_tournament_history(rating.id, DEFAULT_HISTORY_LIMIT)
            .await?;

        let (skill, external) = skill_level(rating.current_rating);

        Ok(PlayerStatisticsView {
            player_id: user_id,
            player_name: user.display_name(),
            rating: RatingView {
                current: round_tenths(rating.current_rating),
                peak: round_tenths(rating.peak_rating),
                lowest: round_tenths(rating.lowest_rating),
            },
            skill_level: skill,
            external_level: external,
            statistics: LifetimeStatsView {
                matches_played: rating.matches_played,
                matches_won: rating.matches_won,
                win_rate: round_tenths(rating.win_rate()),
                average_point_percentage: round_tenths(rating.average_point_percentage()),
                tournaments_played: rating.tournaments_played,
            },
            podium: PodiumView {
                first: rating.first_place_finishes,
                second: rating.second_place_finishes,
                third: rating.third_place_finishes,
                total: rating.podium_count(),
            },
            recent_history: history
                .into_iter()
                .map(|entry| HistoryEntryView {
                    date: entry.timestamp,
                    tournament_id: entry.tournament_id,
                    old_rating: round_tenths(entry.old_rating),
                    new_rating: round_tenths(entry.new_rating),
                    change: round_tenths(entry.rating_change),
                    match_result: entry.match_result,
                })
                .collect(),
        })
    }

    /// Top-N players by current rating. Players below the configured
    /// minimum match count do not appear.
    pub async fn rating_leaderboard(&self, limit: usize) -> Result<Vec<RatingLeaderboardRow>> {
        let ratings = self
            .store
            .top_ratings(self.config.leaderboard_min_matches, limit)
            .await?;

        let user_ids: Vec<Uuid> = ratings.iter().map(|r| r.user_id).collect();
        let users = self.store.get_users(&user_ids).await?;
        let name_of = |id: Uuid| {
            users
                .iter()
                .find(|u| u.id == id)
                .map(User::display_name)
                .unwrap_or_else(|| "Unknown Player".to_string())
        };

        let mut rows = Vec::with_capacity(ratings.len());
        for (index, rating) in ratings.iter().enumerate() {
            let trend = match self.store.latest_history_entry(rating.id).await? {
                Some(entry) if entry.rating_change > 0.0 => Trend::Up,
                _ => Trend::Down,
            };
            rows.push(RatingLeaderboardRow {
                rank: index + 1,
                player_id: rating.user_id,
                player_name: name_of(rating.user_id),
                rating: round_tenths(rating.current_rating),
                matches_played: rating.matches_played,
                win_rate: round_tenths(rating.win_rate()),
                trend,
            });
        }

        Ok(rows)
    }
}
