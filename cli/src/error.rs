//! Error kinds surfaced by the catalog loader and relevance harness.
//!
//! Reference: SPEC_FULL.md §7 "`CliError` (thiserror, `semtok-cli`)".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] semtok_core::CoreError),

    #[error("invalid catalog YAML: {0}")]
    Catalog(#[from] serde_yaml::Error),

    #[error("catalog I/O error: {0}")]
    Io(#[from] std::io::Error),
}
