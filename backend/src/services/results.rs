//! Final Placements
//!
//! Builds the frozen per-player result rows a tournament persists when it
//! finishes. Shared by the finish transition and the audited
//! administrative recomputation so both always agree on placement rules.

use crate::models::{Match, TournamentResult};
use crate::services::scoring;
use chrono::Utc;
use uuid::Uuid;

/// Computes the final placements for a tournament from its completed
/// matches: total points descending, points difference descending,
/// remaining ties in roster order. Positions are 1-indexed.
pub fn build_final_results(
    tournament_id: Uuid,
    roster: &[Uuid],
    matches: &[Match],
) -> Vec<TournamentResult> {
    let stats = scoring::calculate_player_stats(roster, matches);
    let standings = scoring::leaderboard_order(roster, &stats);
    let now = Utc::now();

    standings
        .into_iter()
        .enumerate()
        .map(|(index, (player_id, stats))| TournamentResult {
            id: Uuid::new_v4(),
            tournament_id,
            player_id,
            final_position: (index + 1) as i32,
            total_score: stats.total_points,
            points_difference: stats.points_difference,
            matches_played: stats.matches_played,
            matches_won: stats.wins,
            matches_lost: stats.losses,
            matches_tied: stats.ties,
            created_at: now,
        })
        .collect()
}
