//! Classified failure taxonomy for the repository boundary.
//!
//! Repositories never leak transport or serde errors directly; every failure
//! arrives as one of these variants. `Cancelled` is first-class so callers
//! can drop it without surfacing anything to the user.

use thiserror::Error;

/// A classified backend failure.
#[derive(Debug, Error)]
pub enum Error {
    /// The invocation was cancelled. Callers drop this silently.
    #[error("operation cancelled")]
    Cancelled,

    /// A single-cardinality read matched zero rows.
    #[error("not found: {0}")]
    NotFound(String),

    /// Uniqueness or validity violation on write (e.g. duplicate username,
    /// delete of a verified row).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backend rejected the credentials or a privilege check failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Network or protocol failure. Retryable.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response did not match the expected projection. Not retryable;
    /// indicates contract drift between client and backend.
    #[error("decode failure: {0}")]
    Decode(String),

    /// Anything else. Treated like transport for retry purposes but logged
    /// distinctly at the classification point.
    #[error("unknown backend failure: {0}")]
    Unknown(String),
}

impl Error {
    /// True only for [`Error::Cancelled`]. The UI layer checks this before
    /// rendering any alert.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// True for failures worth an automatic retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Unknown(_))
    }
}

/// Convenience alias used across repositories.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_cancelled_reports_cancelled() {
        assert!(Error::Cancelled.is_cancelled());

        let others = [
            Error::NotFound("check in 1".into()),
            Error::Conflict("duplicate".into()),
            Error::Unauthorized("no token".into()),
            Error::Transport("refused".into()),
            Error::Decode("missing field".into()),
            Error::Unknown("???".into()),
        ];
        for err in others {
            assert!(!err.is_cancelled());
        }
    }

    #[test]
    fn retryable_covers_transport_and_unknown_only() {
        assert!(Error::Transport("refused".into()).is_retryable());
        assert!(Error::Unknown("???".into()).is_retryable());
        assert!(!Error::Decode("bad".into()).is_retryable());
        assert!(!Error::Cancelled.is_retryable());
    }
}
