use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Skill estimate and lifetime counters for one player. Created lazily on
/// first use; never deleted while matches reference the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRating {
    pub id: Uuid,
    pub user_id: Uuid,
    pub current_rating: f64,
    pub peak_rating: f64,
    pub lowest_rating: f64,
    pub matches_played: i32,
    pub matches_won: i32,
    pub total_points_scored: i32,
    pub total_points_possible: i32,
    pub tournaments_played: i32,
    pub first_place_finishes: i32,
    pub second_place_finishes: i32,
    pub third_place_finishes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlayerRating {
    pub fn new(user_id: Uuid, initial_rating: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            current_rating: initial_rating,
            peak_rating: initial_rating,
            lowest_rating: initial_rating,
            matches_played: 0,
            matches_won: 0,
            total_points_scored: 0,
            total_points_possible: 0,
            tournaments_played: 0,
            first_place_finishes: 0,
            second_place_finishes: 0,
            third_place_finishes: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Win rate percentage.
    pub fn win_rate(&self) -> f64 {
        if self.matches_played == 0 {
            return 0.0;
        }
        (self.matches_won as f64 / self.matches_played as f64) * 100.0
    }

    /// Share of all contested points this player's teams took, as a
    /// percentage.
    pub fn average_point_percentage(&self) -> f64 {
        if self.total_points_possible == 0 {
            return 0.0;
        }
        (self.total_points_scored as f64 / self.total_points_possible as f64) * 100.0
    }

    pub fn podium_count(&self) -> i32 {
        self.first_place_finishes + self.second_place_finishes + self.third_place_finishes
    }
}

/// Pre-update ratings of the other three players in a match, kept with
/// each history entry so a rating trajectory can be reconstructed without
/// replaying matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingContext {
    pub partner_rating: f64,
    pub opponent_ratings: [f64; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingHistoryEntry {
    pub id: Uuid,
    pub player_rating_id: Uuid,
    pub tournament_id: Option<Uuid>,
    pub match_id: Option<Uuid>,
    pub old_rating: f64,
    pub new_rating: f64,
    /// Always exactly `new_rating - old_rating`.
    pub rating_change: f64,
    pub context: Option<RatingContext>,
    /// Own-score-first result string, e.g. "21-11".
    pub match_result: Option<String>,
    pub timestamp: DateTime<Utc>,
}
