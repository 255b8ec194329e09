pub mod audit_log;
pub mod r#match;
pub mod player_rating;
pub mod tournament;
pub mod tournament_result;
pub mod user;

pub use audit_log::{AuditAction, AuditRecord, AuditTargetType};
pub use r#match::Match;
pub use player_rating::{PlayerRating, RatingContext, RatingHistoryEntry};
pub use tournament::{
    Tournament, TournamentFilter, TournamentStatus, TournamentSummary, TournamentSystem,
    TournamentUpdate,
};
pub use tournament_result::TournamentResult;
pub use user::User;
