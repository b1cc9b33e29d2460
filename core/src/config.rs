//! Tunable constants for the matching engine.
//!
//! A single `Config` struct with a `Default` impl carrying the tuned
//! literals, deserializable from TOML. Spec §9(c): the score floor is a
//! tuned constant exposed here rather than hard-coded in the scorer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Any final edge score at or below this value is clamped to -1.0
    /// (spec §4.5 "Rejection rules"). Upstream-tuned default: 0.01.
    pub score_floor: f32,
    /// Maximum number of `output` entries the number parser will emit per
    /// `parse` call (longest-prefix-first; bounds pathological inputs).
    pub max_number_matches: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            score_floor: 0.01,
            max_number_matches: 8,
        }
    }
}

impl Config {
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
