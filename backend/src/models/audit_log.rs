use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Administrative actions that are recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    MatchResultOverride,
    TournamentScoreRecalc,
    TournamentStatusChange,
    TournamentDelete,
    UserStatusChange,
    UserDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditTargetType {
    User,
    Tournament,
    Match,
}

/// Who did what, to which entity, and why. `old_values`/`new_values` hold
/// entity snapshots taken before and after the change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    pub admin_id: Uuid,
    pub action: AuditAction,
    pub target_type: AuditTargetType,
    pub target_id: String,
    pub old_values: Option<serde_json::Value>,
    pub new_values: Option<serde_json::Value>,
    pub reason: String,
    pub ip_address: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl AuditRecord {
    pub fn new(
        admin_id: Uuid,
        action: AuditAction,
        target_type: AuditTargetType,
        target_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            admin_id,
            action,
            target_type,
            target_id: target_id.into(),
            old_values: None,
            new_values: None,
            reason: reason.into(),
            ip_address: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_values(
        mut self,
        old_values: Option<serde_json::Value>,
        new_values: Option<serde_json::Value>,
    ) -> Self {
        self.old_values = old_values;
        self.new_values = new_values;
        self
    }
}
