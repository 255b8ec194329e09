/// Numeric constants of the rating engine. Engines receive this record at
/// construction; tests override individual fields.
#[derive(Clone, Debug)]
pub struct RatingConfig {
    pub initial_rating: f64,
    /// K for players with fewer than `new_player_threshold` matches.
    pub k_base_new: f64,
    pub k_base_normal: f64,
    /// K for players with more than `experienced_threshold` matches.
    pub k_base_experienced: f64,
    pub new_player_threshold: i32,
    pub experienced_threshold: i32,
    pub scaling_factor: f64,
    /// Margin-of-victory coefficient applied on top of the base K.
    pub margin_weight: f64,
    /// Uncertainty multipliers for teams whose least experienced player has
    /// played fewer than 5 / fewer than 15 matches.
    pub uncertainty_fresh: f64,
    pub uncertainty_settling: f64,
    pub uncertainty_fresh_threshold: i32,
    pub uncertainty_settling_threshold: i32,
    /// Tilt of the teammate split towards the lower-rated partner.
    pub split_tilt: f64,
    /// Partner rating gap is clamped to ±this before computing the split.
    pub partner_gap_cap: f64,
    /// Minimum matches played to appear on the rating leaderboard.
    pub leaderboard_min_matches: i32,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            initial_rating: 1000.0,
            k_base_new: 40.0,
            k_base_normal: 20.0,
            k_base_experienced: 10.0,
            new_player_threshold: 30,
            experienced_threshold: 100,
            scaling_factor: 400.0,
            margin_weight: 0.75,
            uncertainty_fresh: 1.25,
            uncertainty_settling: 1.10,
            uncertainty_fresh_threshold: 5,
            uncertainty_settling_threshold: 15,
            split_tilt: 0.25,
            partner_gap_cap: 200.0,
            leaderboard_min_matches: 5,
        }
    }
}

/// Defaults for the duration planner.
#[derive(Clone, Debug)]
pub struct PlannerConfig {
    pub points_per_game: i32,
    pub seconds_per_point: i32,
    pub rest_seconds: i32,
    /// Points-fit search runs downward from `max_points` in steps of
    /// `points_step` and bottoms out at `min_points`.
    pub max_points: i32,
    pub min_points: i32,
    pub points_step: i32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            points_per_game: 21,
            seconds_per_point: 25,
            rest_seconds: 60,
            max_points: 48,
            min_points: 16,
            points_step: 4,
        }
    }
}

/// Roster constraints of the Americano format.
#[derive(Clone, Debug)]
pub struct RosterConfig {
    pub min_players: usize,
    pub max_players: usize,
    pub group_size: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            min_players: 4,
            max_players: 24,
            group_size: 4,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub rating: RatingConfig,
    pub planner: PlannerConfig,
    pub roster: RosterConfig,
}
