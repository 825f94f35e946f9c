//! Request ID resolution and response header helpers.

use salvo::{
    http::{StatusCode, header::HeaderValue},
    prelude::Response,
};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Keep a caller-supplied ID when it is short printable ASCII, otherwise mint a v7 UUID.
pub(super) fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .map(|value| value.trim().to_string())
        .filter(|value| is_acceptable(value))
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => warn!(request_id, "request id is not a valid header value: {source}"),
    }
}

pub(super) fn response_status_or_ok(status_code: Option<StatusCode>) -> StatusCode {
    status_code.unwrap_or(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_generated(value: &str) -> bool {
        Uuid::parse_str(value).is_ok_and(|uuid| uuid.get_version_num() == 7)
    }

    #[test]
    fn missing_or_blank_request_id_is_generated() {
        assert!(is_generated(&resolve_request_id(None)));
        assert!(is_generated(&resolve_request_id(Some("   ".to_string()))));
    }

    #[test]
    fn supplied_request_id_is_trimmed_and_kept() {
        assert_eq!(resolve_request_id(Some(" req-42 ".to_string())), "req-42");
    }

    #[test]
    fn oversized_or_unprintable_request_ids_are_replaced() {
        let oversized = "a".repeat(MAX_REQUEST_ID_LEN + 1);

        assert!(is_generated(&resolve_request_id(Some(oversized))));
        assert!(is_generated(&resolve_request_id(Some("two words".to_string()))));
        assert!(is_generated(&resolve_request_id(Some("naïve".to_string()))));
    }
}
