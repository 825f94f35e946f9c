//! Promotions service errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromotionsServiceError {
    /// A promotion or rule with the same UUID already exists.
    #[error("promotion already exists")]
    AlreadyExists,

    /// The promotion or rule does not exist (or no longer exists).
    #[error("promotion not found")]
    NotFound,

    /// A referenced promotion does not exist.
    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    /// A value violated a storage constraint (empty name, bad period, bad reward).
    #[error("invalid data")]
    InvalidData,

    #[error("reward value out of range")]
    InvalidReward(#[from] TryFromIntError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PromotionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = PromotionsServiceError::from(Error::RowNotFound);

        assert!(
            matches!(error, PromotionsServiceError::NotFound),
            "expected NotFound, got {error:?}"
        );
    }

    #[test]
    fn non_database_errors_map_to_sql() {
        let error = PromotionsServiceError::from(Error::PoolTimedOut);

        assert!(
            matches!(error, PromotionsServiceError::Sql(_)),
            "expected Sql, got {error:?}"
        );
    }
}
