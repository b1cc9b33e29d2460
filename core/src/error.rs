//! Error kinds for the matching engine.
//!
//! Scoring, matching, and walking are infallible (spec §7) — only
//! registration-time mistakes surface as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("alias text must not be empty (token {token:?})")]
    EmptyAliasText { token: String },

    #[error("domain name must not be empty")]
    EmptyDomainName,
}
