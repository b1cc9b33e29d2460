//! Lattice edges and the lattice itself.
//!
//! Reference: spec §3 "Edge" / "Lattice". Edges are immutable once built.

/// Which part of the engine produced an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Alias,
    Number,
    Unknown,
}

/// A weighted lattice edge starting at some query position (implicit —
/// the lattice stores edges per start position, so `Edge` itself does not
/// repeat it).
///
/// `label` means:
/// - `EdgeKind::Alias` → the winning alias id (`>= 0`)
/// - `EdgeKind::Number` → the parsed numeric value
/// - `EdgeKind::Unknown` → always `-1`, the sentinel for "unknown single term"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub score: f32,
    pub length: usize,
    pub label: i64,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn alias(score: f32, length: usize, alias_id: usize) -> Self {
        Self {
            score,
            length,
            label: alias_id as i64,
            kind: EdgeKind::Alias,
        }
    }

    pub fn number(score: f32, length: usize, value: i64) -> Self {
        Self {
            score,
            length,
            label: value,
            kind: EdgeKind::Number,
        }
    }

    pub fn unknown() -> Self {
        Self {
            score: 0.0,
            length: 1,
            label: -1,
            kind: EdgeKind::Unknown,
        }
    }
}

/// Per-position edge lists covering a query. `lattice[i]` holds the edges
/// that start at query position `i`, sorted by descending score (stable on
/// insertion order for ties).
pub type Lattice = Vec<Vec<Edge>>;
