use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Absent for guest players; unique across users when present.
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub picture: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl User {
    pub fn new(full_name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            full_name: Some(full_name.into()),
            picture: None,
            is_active: true,
            is_superuser: false,
        }
    }

    /// Guest players participate without credentials.
    pub fn guest(full_name: impl Into<String>) -> Self {
        Self::new(full_name, None)
    }

    pub fn is_guest(&self) -> bool {
        self.email.is_none()
    }

    pub fn display_name(&self) -> String {
        self.full_name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "Unknown Player".to_string())
    }
}
