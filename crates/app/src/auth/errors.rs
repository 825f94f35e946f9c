//! Auth service errors.

use thiserror::Error;

use crate::auth::ApiTokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// The token is malformed, unknown, revoked, expired or does not verify.
    #[error("api token is not valid")]
    NotFound,

    #[error("auth storage error")]
    Sql(#[from] sqlx::Error),

    #[error("api token processing error")]
    Token(#[from] ApiTokenError),
}
