//! The module contains the errors the engine can report.
//!
//! Only session decoding can fail. Callers of [`decode`] never see these
//! errors: a token that cannot be read is the ordinary unauthenticated case.
//! [`try_decode`] exposes the reason for logging and tests.
//!
//!  [`decode`]: crate::session::decode
//!  [`try_decode`]: crate::session::try_decode
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("no session token")]
    MissingToken,
    #[error("malformed token: {0}")]
    MalformedToken(String),
    #[error("\"{0}\" claim missing from token")]
    MissingClaim(&'static str),
}
