use crate::error::{AppError, Result};

const MIN_NAME_LENGTH: usize = 1;
const MAX_NAME_LENGTH: usize = 100;
const ALLOWED_MAX_PLAYERS: [i32; 6] = [4, 8, 12, 16, 20, 24];

/// Validates a display name (for tournaments, locations, etc.)
pub fn validate_name(name: &str, field_name: &str) -> Result<()> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "{field_name} cannot be empty"
        )));
    }

    if trimmed.len() < MIN_NAME_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "{field_name} must be at least {MIN_NAME_LENGTH} characters long"
        )));
    }

    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "{field_name} must be at most {MAX_NAME_LENGTH} characters long"
        )));
    }

    Ok(())
}

/// Validates the immutable configuration of a new tournament.
pub fn validate_tournament_config(
    max_players: i32,
    points_per_match: i32,
    courts: i32,
    entry_fee: f64,
) -> Result<()> {
    if !ALLOWED_MAX_PLAYERS.contains(&max_players) {
        return Err(AppError::InvalidInput(format!(
            "Max players must be one of {ALLOWED_MAX_PLAYERS:?}, got {max_players}"
        )));
    }

    if points_per_match < 1 {
        return Err(AppError::InvalidInput(format!(
            "Points per match must be at least 1, got {points_per_match}"
        )));
    }

    if courts < 1 {
        return Err(AppError::InvalidInput(format!(
            "Courts must be at least 1, got {courts}"
        )));
    }

    if entry_fee < 0.0 {
        return Err(AppError::InvalidInput(
            "Entry fee must be non-negative".to_string(),
        ));
    }

    Ok(())
}

/// Validates a recorded Americano match score pair before it is persisted.
pub fn validate_americano_score(
    team1_score: i32,
    team2_score: i32,
    points_per_match: i32,
) -> Result<()> {
    if team1_score < 0 || team2_score < 0 {
        return Err(AppError::InvalidScore(
            "Scores must be non-negative".to_string(),
        ));
    }

    let total = team1_score + team2_score;
    if total != points_per_match {
        return Err(AppError::InvalidScore(format!(
            "Team scores must sum to {points_per_match} points, got {total} ({team1_score} + {team2_score})"
        )));
    }

    Ok(())
}
