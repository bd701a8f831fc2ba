use mokki_surrealdb::repository::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid or expired authorization code")]
    InvalidCode,

    #[error("invalid or expired verification token")]
    InvalidToken,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("jwt error: {0}")]
    Jwt(String),

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
