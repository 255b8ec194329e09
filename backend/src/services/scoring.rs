//! Scoring & Statistics
//!
//! Pure derivation of per-player totals from a tournament's completed
//! matches. In Americano every player banks their team's score from each
//! match, so the totals double as the tournament standings.

use crate::models::Match;
use std::collections::HashMap;
use uuid::Uuid;

/// Accumulated figures for one player across a tournament's completed
/// matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub total_points: i32,
    pub points_for: i32,
    pub points_against: i32,
    pub points_difference: i32,
    pub wins: i32,
    pub losses: i32,
    pub ties: i32,
    pub matches_played: i32,
}

impl PlayerStats {
    fn record(&mut self, own_score: i32, opposing_score: i32) {
        self.total_points += own_score;
        self.points_for += own_score;
        self.points_against += opposing_score;
        self.points_difference = self.points_for - self.points_against;
        self.matches_played += 1;

        match own_score.cmp(&opposing_score) {
            std::cmp::Ordering::Greater => self.wins += 1,
            std::cmp::Ordering::Less => self.losses += 1,
            std::cmp::Ordering::Equal => self.ties += 1,
        }
    }
}

/// Derives per-player statistics from completed matches. Matches that are
/// not completed (or carry no scores) are skipped; every roster member is
/// present in the output even with no matches played.
pub fn calculate_player_stats(roster: &[Uuid], matches: &[Match]) -> HashMap<Uuid, PlayerStats> {
    let mut stats: HashMap<Uuid, PlayerStats> = roster
        .iter()
        .map(|id| (*id, PlayerStats::default()))
        .collect();

    for m in matches {
        if !m.is_completed {
            continue;
        }
        for player in m.player_ids() {
            if let Some((own_score, opposing_score)) = m.scores_for(player) {
                stats.entry(player).or_default().record(own_score, opposing_score);
            }
        }
    }

    stats
}

/// Standings order: total points descending, then points difference
/// descending. Remaining ties keep roster order (the sort is stable over
/// the roster-ordered input).
pub fn leaderboard_order(
    roster: &[Uuid],
    stats: &HashMap<Uuid, PlayerStats>,
) -> Vec<(Uuid, PlayerStats)> {
    let mut entries: Vec<(Uuid, PlayerStats)> = roster
        .iter()
        .map(|id| (*id, stats.get(id).copied().unwrap_or_default()))
        .collect();

    entries.sort_by(|a, b| {
        b.1.total_points
            .cmp(&a.1.total_points)
            .then(b.1.points_difference.cmp(&a.1.points_difference))
    });

    entries
}
