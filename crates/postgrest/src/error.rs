//! Backend error classification.
//!
//! Maps transport failures and non-2xx responses into the closed taxonomy in
//! `tastelog-core`. Cancellation is produced only by the client's
//! cancellation token, never here.

use reqwest::StatusCode;
use serde::Deserialize;
use tastelog_core::Error;

/// Error payload shape returned by the backend for failed requests.
#[derive(Debug, Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// PostgREST code for a single-object request that matched zero rows.
const CODE_SINGULAR_EMPTY: &str = "PGRST116";

/// PostgreSQL unique-constraint and check-constraint violation codes.
const CODE_UNIQUE_VIOLATION: &str = "23505";
const CODE_CHECK_VIOLATION: &str = "23514";

/// Classify a failed `reqwest` send or body read.
pub(crate) fn classify_request_error(err: reqwest::Error) -> Error {
    if err.is_decode() {
        return Error::Decode(err.to_string());
    }
    if err.is_timeout() || err.is_connect() || err.is_request() || err.is_body() {
        return Error::Transport(err.to_string());
    }
    tracing::error!(error = %err, "unclassified transport error");
    Error::Unknown(err.to_string())
}

/// Classify a non-2xx response from its status and raw body.
pub(crate) fn classify_status(status: StatusCode, body: &str) -> Error {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .or(parsed.details)
        .unwrap_or_else(|| status.to_string());
    let code = parsed.code.as_deref();

    match status.as_u16() {
        401 | 403 => Error::Unauthorized(message),
        404 => Error::NotFound(message),
        // PostgREST answers 406 when a single-object read matches 0 rows.
        406 if code == Some(CODE_SINGULAR_EMPTY) => Error::NotFound(message),
        406 => Error::NotFound(message),
        409 => Error::Conflict(message),
        _ if code == Some(CODE_UNIQUE_VIOLATION) || code == Some(CODE_CHECK_VIOLATION) => {
            Error::Conflict(message)
        }
        408 | 429 | 502 | 503 | 504 => Error::Transport(message),
        _ => {
            tracing::error!(status = status.as_u16(), body, "unclassified backend error");
            Error::Unknown(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn auth_statuses_map_to_unauthorized() {
        assert_matches!(
            classify_status(StatusCode::UNAUTHORIZED, "{}"),
            Error::Unauthorized(_)
        );
        assert_matches!(
            classify_status(StatusCode::FORBIDDEN, r#"{"message":"row-level security"}"#),
            Error::Unauthorized(m) if m == "row-level security"
        );
    }

    #[test]
    fn empty_single_read_maps_to_not_found() {
        let body = r#"{"code":"PGRST116","message":"JSON object requested, multiple (or no) rows returned"}"#;
        assert_matches!(
            classify_status(StatusCode::NOT_ACCEPTABLE, body),
            Error::NotFound(_)
        );
    }

    #[test]
    fn constraint_violations_map_to_conflict() {
        let body = r#"{"code":"23505","message":"duplicate key value violates unique constraint"}"#;
        assert_matches!(classify_status(StatusCode::CONFLICT, body), Error::Conflict(_));
        // Some deployments surface constraint codes with a 400 status.
        assert_matches!(
            classify_status(StatusCode::BAD_REQUEST, body),
            Error::Conflict(_)
        );
    }

    #[test]
    fn gateway_failures_are_retryable_transport() {
        let err = classify_status(StatusCode::BAD_GATEWAY, "");
        assert_matches!(err, Error::Transport(_));
        assert!(err.is_retryable());
    }

    #[test]
    fn everything_else_is_unknown_and_never_cancelled() {
        let err = classify_status(StatusCode::IM_A_TEAPOT, "");
        assert_matches!(err, Error::Unknown(_));
        assert!(!err.is_cancelled());
    }
}
