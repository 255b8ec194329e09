use crate::error::{AppError, Result};
use tokio::time::Instant;
use uuid::Uuid;

/// Caller identity as resolved by the HTTP layer. This core checks
/// capabilities; it never issues or parses tokens.
#[derive(Clone, Copy, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub is_superuser: bool,
}

impl CurrentUser {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            is_superuser: false,
        }
    }

    pub fn superuser(id: Uuid) -> Self {
        Self {
            id,
            is_superuser: true,
        }
    }
}

/// Per-request context: the caller plus an optional deadline supplied by
/// the transport. Multi-step operations check the deadline between store
/// round-trips and abort with `DeadlineExceeded` once it passes.
#[derive(Clone, Copy, Debug)]
pub struct RequestContext {
    pub user: CurrentUser,
    pub deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new(user: CurrentUser) -> Self {
        Self {
            user,
            deadline: None,
        }
    }

    pub fn with_deadline(user: CurrentUser, deadline: Instant) -> Self {
        Self {
            user,
            deadline: Some(deadline),
        }
    }

    pub fn check_deadline(&self) -> Result<()> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(AppError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    pub fn require_superuser(&self) -> Result<()> {
        if self.user.is_superuser {
            Ok(())
        } else {
            Err(AppError::AuthorizationFailed(
                "superuser capability required".to_string(),
            ))
        }
    }
}
