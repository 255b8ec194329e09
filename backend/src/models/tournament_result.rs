use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Frozen final placement of one player in one tournament. Written when
/// the tournament finishes; replaced wholesale only by an audited
/// administrative recomputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentResult {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub player_id: Uuid,
    /// 1-indexed.
    pub final_position: i32,
    pub total_score: i32,
    pub points_difference: i32,
    pub matches_played: i32,
    pub matches_won: i32,
    pub matches_lost: i32,
    pub matches_tied: i32,
    pub created_at: DateTime<Utc>,
}
