use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentSystem {
    Americano,
    /// Enumerated for forward compatibility; no schedule generator exists
    /// for it yet and starting such a tournament is rejected.
    Mexicano,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    Pending,
    Active,
    Completed,
}

impl TournamentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentStatus::Pending => "pending",
            TournamentStatus::Active => "active",
            TournamentStatus::Completed => "completed",
        }
    }

    /// Status transitions are monotonic: pending → active → completed.
    pub fn can_transition_to(&self, next: TournamentStatus) -> bool {
        self.rank() < next.rank()
    }

    fn rank(&self) -> u8 {
        match self {
            TournamentStatus::Pending => 0,
            TournamentStatus::Active => 1,
            TournamentStatus::Completed => 2,
        }
    }
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub start_date: NaiveDate,
    pub entry_fee: f64,
    pub max_players: i32,
    pub system: TournamentSystem,
    pub points_per_match: i32,
    pub courts: i32,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub status: TournamentStatus,
    /// 1-indexed; meaningful only once the tournament is active.
    pub current_round: i32,
    /// Mean of the roster's ratings, frozen when the tournament starts.
    pub average_player_rating: Option<f64>,
    /// Globally unique when set; created lazily by the organiser.
    pub join_code: Option<String>,
}

impl Tournament {
    pub fn is_organiser(&self, user_id: Uuid) -> bool {
        self.created_by == user_id
    }

    pub fn is_pending(&self) -> bool {
        self.status == TournamentStatus::Pending
    }

    pub fn is_active(&self) -> bool {
        self.status == TournamentStatus::Active
    }

    pub fn is_completed(&self) -> bool {
        self.status == TournamentStatus::Completed
    }
}

/// Read-model projection of a tournament enriched with the roster count.
/// The count is a first-class field here; the domain entity is never
/// mutated to carry it.
#[derive(Debug, Clone, Serialize)]
pub struct TournamentSummary {
    #[serde(flatten)]
    pub tournament: Tournament,
    pub current_players: usize,
    pub is_full: bool,
}

impl TournamentSummary {
    pub fn new(tournament: Tournament, current_players: usize) -> Self {
        let is_full = current_players >= tournament.max_players as usize;
        Self {
            tournament,
            current_players,
            is_full,
        }
    }
}

/// Mutable fields of a pending tournament.
#[derive(Debug, Clone, Default)]
pub struct TournamentUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub entry_fee: Option<f64>,
    pub max_players: Option<i32>,
    pub points_per_match: Option<i32>,
    pub courts: Option<i32>,
}

/// Listing filters; all criteria are conjunctive.
#[derive(Debug, Clone, Default)]
pub struct TournamentFilter {
    pub system: Option<TournamentSystem>,
    pub status: Option<TournamentStatus>,
    pub start_date_from: Option<NaiveDate>,
    pub start_date_to: Option<NaiveDate>,
    /// Case-insensitive substring match on the location.
    pub location_contains: Option<String>,
    pub created_by: Option<Uuid>,
    pub min_average_rating: Option<f64>,
    pub max_average_rating: Option<f64>,
    pub offset: usize,
    pub limit: Option<usize>,
}
