//! Relay-style global object identifiers: `base64("<TypeName>:<uuid>")`.

use async_graphql::ID;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use thiserror::Error;
use uuid::Uuid;

pub(crate) const PROMOTION: &str = "Promotion";
pub(crate) const PROMOTION_RULE: &str = "PromotionRule";
pub(crate) const PROMOTION_EVENT: &str = "PromotionEvent";
pub(crate) const USER: &str = "User";
pub(crate) const APP: &str = "App";

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum GlobalIdError {
    #[error("Couldn't resolve id: {0}.")]
    Malformed(String),

    #[error("Invalid ID: {id}. Expected: {expected}, received: {found}.")]
    WrongType {
        id: String,
        expected: &'static str,
        found: String,
    },
}

pub(crate) fn to_global_id(type_name: &str, uuid: Uuid) -> ID {
    ID(STANDARD.encode(format!("{type_name}:{uuid}")))
}

/// Decode `id`, requiring it to name an object of `expected` type.
pub(crate) fn from_global_id(expected: &'static str, id: &ID) -> Result<Uuid, GlobalIdError> {
    let malformed = || GlobalIdError::Malformed(id.to_string());

    let decoded = STANDARD.decode(id.as_str()).map_err(|_e| malformed())?;
    let decoded = String::from_utf8(decoded).map_err(|_e| malformed())?;

    let (type_name, raw_uuid) = decoded.split_once(':').ok_or_else(malformed)?;

    if type_name != expected {
        return Err(GlobalIdError::WrongType {
            id: id.to_string(),
            expected,
            found: type_name.to_string(),
        });
    }

    Uuid::try_parse(raw_uuid).map_err(|_e| malformed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_type_name_and_uuid() {
        let uuid = Uuid::nil();

        assert_eq!(
            to_global_id(PROMOTION_RULE, uuid).as_str(),
            STANDARD.encode("PromotionRule:00000000-0000-0000-0000-000000000000")
        );
    }

    #[test]
    fn decodes_matching_type() {
        let uuid = Uuid::now_v7();
        let id = to_global_id(PROMOTION_RULE, uuid);

        assert_eq!(from_global_id(PROMOTION_RULE, &id), Ok(uuid));
    }

    #[test]
    fn rejects_other_type() {
        let id = to_global_id(PROMOTION, Uuid::now_v7());

        let result = from_global_id(PROMOTION_RULE, &id);

        assert!(
            matches!(result, Err(GlobalIdError::WrongType { ref found, .. }) if found == "Promotion"),
            "expected WrongType, got {result:?}"
        );
    }

    #[test]
    fn rejects_garbage() {
        let candidates = [
            "not base64!".to_string(),
            String::new(),
            STANDARD.encode("PromotionRule"),
            STANDARD.encode("PromotionRule:42"),
        ];

        for raw in candidates {
            let result = from_global_id(PROMOTION_RULE, &ID(raw.clone()));

            assert!(
                matches!(result, Err(GlobalIdError::Malformed(_))),
                "expected Malformed for {raw:?}, got {result:?}"
            );
        }
    }
}
