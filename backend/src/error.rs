use crate::store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Operation not allowed in current status: {0}")]
    WrongStatus(String),

    #[error("Result already recorded: {0}")]
    AlreadyRecorded(String),

    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    #[error("Invalid score: {0}")]
    InvalidScore(String),

    #[error("Authorization failed: {0}")]
    AuthorizationFailed(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Transient store failure: {0}")]
    TransientStore(String),

    #[error("Fatal store failure: {0}")]
    FatalStore(String),

    #[error("Deadline exceeded")]
    DeadlineExceeded,

    #[error("Cancelled")]
    Cancelled,
}

impl AppError {
    /// Whether a bounded retry may succeed. Only the mutating lifecycle
    /// paths consult this; read paths never retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::TransientStore(_) | AppError::Conflict(_))
    }

    /// Status code the HTTP adapter maps this kind to. The adapter itself
    /// lives outside this crate.
    pub fn http_status(&self) -> u16 {
        match self {
            AppError::InvalidInput(_)
            | AppError::WrongStatus(_)
            | AppError::AlreadyRecorded(_)
            | AppError::InvalidRoster(_)
            | AppError::InvalidScore(_) => 400,
            AppError::AuthorizationFailed(_) => 403,
            AppError::NotFound(_) => 404,
            AppError::Conflict(_) => 409,
            AppError::TransientStore(_) | AppError::FatalStore(_) | AppError::Cancelled => 500,
            AppError::DeadlineExceeded => 504,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(constraint) => AppError::Conflict(format!(
                "unique constraint violated{}",
                constraint.map(|c| format!(": {c}")).unwrap_or_default()
            )),
            StoreError::Transient(msg) => AppError::TransientStore(msg),
            StoreError::Fatal(msg) => AppError::FatalStore(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
