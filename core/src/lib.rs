//! semtok-core
//!
//! The matching engine behind a domain-specific natural-language tokenizer:
//! stems and fingerprints surface terms, recognizes spelled-out numbers,
//! indexes labelled aliases into domains, builds a weighted lattice for an
//! incoming query, and enumerates complete paths through it in best-first
//! order.
//!
//! Public API:
//! - `TermModel` — stemming and fingerprinting.
//! - `NumberParser` — spelled-out cardinal number recognition.
//! - `Matcher`, `ExactPrefixMatcher`, `ApproxMatcher` — alignment policies.
//! - `Lexicon`, `Domain`, `Alias` — registration and downstream-term
//!   bookkeeping.
//! - `Tokenizer` — the inverted index, lattice builder, and scorer.
//! - `GraphWalker` — the best-first path enumerator.
//! - `Config` — tunable constants.
//! - `CoreError` — registration-time error kinds.

pub mod config;
pub use config::Config;

pub mod error;
pub use error::CoreError;

pub mod term;
pub use term::{Hash, TermModel};

pub mod number;
pub use number::{NumberMatch, NumberParser};

pub mod matcher;
pub use matcher::{ApproxMatcher, DiffResults, ExactPrefixMatcher, Matcher};

pub mod edge;
pub use edge::{Edge, EdgeKind, Lattice};

pub mod lexicon;
pub use lexicon::{Alias, AliasInput, Domain, Lexicon, MatcherPolicy};

pub mod tokenizer;
pub use tokenizer::{MatchDiagnostics, Tokenizer};

pub mod token;
pub use token::Token;

pub mod walker;
pub use walker::{enumerate_dynamic, enumerate_static, GraphWalker};
