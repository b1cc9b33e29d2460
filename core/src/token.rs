//! The token shapes emitted at the end of a walk.
//!
//! Reference: spec §6 "Token output".

/// What a chosen lattice edge ultimately means to a caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// An alias edge: the opaque payload attached at registration.
    Catalog(String),
    /// A number edge: the parsed integer value.
    Number(i64),
    /// An unknown edge: the caller recovers the covered surface terms from
    /// `length` and the edge's starting position (not carried here).
    Unknown { length: usize },
}
