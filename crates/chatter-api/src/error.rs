use axum::http::StatusCode;
use thiserror::Error;
use tracing::{error, warn};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("username must not be blank")]
    InvalidUsername,

    #[error("password must be longer than 4 characters")]
    InvalidPassword,

    #[error("username is already taken")]
    UsernameTaken,

    #[error("username or password does not match")]
    InvalidCredentials,

    #[error("message text must not be blank")]
    BlankMessage,

    #[error("message text exceeds {0} characters")]
    MessageTooLong(usize),

    /// The insert itself was refused by the database.
    #[error("insert rejected: {0}")]
    CreateFailed(#[source] anyhow::Error),

    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

impl From<ServiceError> for StatusCode {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidUsername
            | ServiceError::InvalidPassword
            | ServiceError::UsernameTaken
            | ServiceError::BlankMessage
            | ServiceError::MessageTooLong(_) => StatusCode::BAD_REQUEST,
            ServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ServiceError::CreateFailed(e) => {
                warn!("Insert rejected: {:#}", e);
                StatusCode::BAD_REQUEST
            }
            ServiceError::Storage(e) => {
                error!("Storage failure: {:#}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
