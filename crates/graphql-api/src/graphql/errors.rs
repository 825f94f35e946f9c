//! GraphQL error values.
//!
//! Authorization failures and storage failures are top-level GraphQL errors;
//! validation and lookup failures are returned in a payload's `errors` list.

use async_graphql::{Enum, Error, ErrorExtensions as _, SimpleObject, value};
use discounts_app::domain::promotions::PromotionsServiceError;
use tracing::error;

use crate::graphql::ids::GlobalIdError;

pub(crate) const PERMISSION_DENIED_MESSAGE: &str =
    "You need one of the following permissions: MANAGE_DISCOUNTS";

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DiscountErrorCode {
    AlreadyExists,
    GraphqlError,
    Invalid,
    NotFound,
    Required,
    Unique,
}

/// A validation or lookup problem with a mutation's input.
#[derive(SimpleObject, Debug, Clone, PartialEq, Eq)]
pub(crate) struct DiscountError {
    /// Name of the input field the error relates to; `null` for the whole input.
    pub field: Option<String>,
    pub code: DiscountErrorCode,
    pub message: Option<String>,
}

impl DiscountError {
    pub(crate) fn new(field: &str, code: DiscountErrorCode, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.to_string()),
            code,
            message: Some(message.into()),
        }
    }

    pub(crate) fn invalid_id(field: &str, source: &GlobalIdError) -> Self {
        Self::new(field, DiscountErrorCode::GraphqlError, source.to_string())
    }
}

pub(crate) fn permission_denied() -> Error {
    Error::new(PERMISSION_DENIED_MESSAGE)
        .extend_with(|_, e| e.set("exception", value!({ "code": "PermissionDenied" })))
}

pub(crate) fn internal_error() -> Error {
    Error::new("internal server error")
}

/// Map a service failure onto a payload error, or a top-level error for storage failures.
///
/// `subject` names the input field identifying the object being acted on.
pub(crate) fn service_error(
    subject: &str,
    source: PromotionsServiceError,
) -> Result<DiscountError, Error> {
    let error = match source {
        PromotionsServiceError::NotFound => DiscountError::new(
            subject,
            DiscountErrorCode::NotFound,
            "Object with the given ID does not exist.",
        ),
        PromotionsServiceError::AlreadyExists => DiscountError::new(
            subject,
            DiscountErrorCode::Unique,
            "Object with this ID already exists.",
        ),
        PromotionsServiceError::InvalidReference => DiscountError::new(
            "promotion",
            DiscountErrorCode::NotFound,
            "Promotion with the given ID does not exist.",
        ),
        PromotionsServiceError::MissingRequiredData => DiscountError {
            field: None,
            code: DiscountErrorCode::Required,
            message: Some("A required value is missing.".to_string()),
        },
        PromotionsServiceError::InvalidData => DiscountError {
            field: None,
            code: DiscountErrorCode::Invalid,
            message: Some("The provided values are not valid.".to_string()),
        },
        PromotionsServiceError::InvalidReward(_) => DiscountError::new(
            "rewardValue",
            DiscountErrorCode::Invalid,
            "Reward value is out of range.",
        ),
        PromotionsServiceError::Sql(source) => {
            error!("promotions storage failure: {source}");

            return Err(internal_error());
        }
    };

    Ok(error)
}
