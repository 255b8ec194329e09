//! Schedule Planner
//!
//! Duration estimation helpers for organisers sizing a tournament before
//! creating it: how long a roster/court combination will take, and the
//! largest points-per-match that still fits a time budget.

use crate::config::PlannerConfig;
use crate::error::{AppError, Result};
use crate::services::pairing;

/// Duration estimate for one tournament configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationEstimate {
    pub total_rounds: usize,
    pub total_matches: usize,
    pub total_minutes: i64,
}

/// Estimates the wall-clock length of an Americano tournament.
///
/// Each match takes `points_per_match * seconds_per_point` seconds of play
/// plus `rest_seconds` of change-over, and `courts` matches run in
/// parallel.
///
/// # Errors
///
/// Returns `InvalidInput` for a roster outside the supported range or a
/// non-positive court count
pub fn estimate_duration(
    config: &PlannerConfig,
    num_players: usize,
    courts: i32,
    points_per_match: i32,
) -> Result<DurationEstimate> {
    if num_players < pairing::MIN_PLAYERS
        || num_players > pairing::MAX_PLAYERS
        || num_players % 4 != 0
    {
        return Err(AppError::InvalidInput(format!(
            "Cannot estimate duration for {num_players} players"
        )));
    }
    if courts < 1 {
        return Err(AppError::InvalidInput(
            "Courts must be at least 1".to_string(),
        ));
    }
    if points_per_match < 1 {
        return Err(AppError::InvalidInput(
            "Points per match must be at least 1".to_string(),
        ));
    }

    let total_rounds = pairing::rounds_for(num_players);
    let total_matches = pairing::total_matches(num_players);

    let seconds_per_match =
        points_per_match as i64 * config.seconds_per_point as i64 + config.rest_seconds as i64;
    let total_minutes = total_matches as i64 * seconds_per_match / (60 * courts as i64);

    Ok(DurationEstimate {
        total_rounds,
        total_matches,
        total_minutes,
    })
}

/// Largest points-per-match that keeps the tournament within
/// `budget_minutes`, searching downward from the configured maximum in
/// steps of four. Falls back to the configured floor when even that does
/// not fit.
pub fn fit_points_to_budget(
    config: &PlannerConfig,
    num_players: usize,
    courts: i32,
    budget_minutes: i64,
) -> Result<i32> {
    let mut points = config.max_points;
    while points > config.min_points {
        let estimate = estimate_duration(config, num_players, courts, points)?;
        if estimate.total_minutes <= budget_minutes {
            return Ok(points);
        }
        points -= config.points_step;
    }
    Ok(config.min_points)
}
