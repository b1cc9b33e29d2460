//! Tokenizer: owns the inverted index, builds the per-query lattice, and
//! maps edges to emitted tokens.
//!
//! Reference: spec §4.5.

use std::collections::HashMap;

use crate::config::Config;
use crate::edge::{Edge, EdgeKind, Lattice};
use crate::lexicon::Alias;
use crate::matcher::DiffResults;
use crate::number::NumberParser;
use crate::term::{Hash, TermModel};
use crate::token::Token;

/// Owns the registered aliases, the inverted index over their fingerprints,
/// and builds lattices for incoming queries. Read-only once ingestion ends.
#[derive(Debug)]
pub struct Tokenizer {
    config: Config,
    aliases: Vec<Alias>,
    postings: HashMap<Hash, Vec<usize>>,
    frequency: HashMap<Hash, usize>,
    hash_to_stem: HashMap<Hash, String>,
}

impl Tokenizer {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            aliases: Vec::new(),
            postings: HashMap::new(),
            frequency: HashMap::new(),
            hash_to_stem: HashMap::new(),
        }
    }

    /// Assigns the next alias id and indexes every fingerprint in
    /// `alias.hashes`. Returns the assigned id.
    pub fn add_item(&mut self, alias: Alias) -> usize {
        let id = self.aliases.len();
        for (hash, stem) in alias.hashes.iter().zip(alias.stemmed.iter()) {
            self.postings.entry(*hash).or_default().push(id);
            *self.frequency.entry(*hash).or_insert(0) += 1;
            self.hash_to_stem.entry(*hash).or_insert_with(|| stem.clone());
        }
        tracing::trace!(alias_id = id, token = %alias.token, "indexed alias");
        self.aliases.push(alias);
        id
    }

    pub fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    pub fn postings_of(&self, hash: Hash) -> &[usize] {
        self.postings.get(&hash).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn frequency_of(&self, hash: Hash) -> usize {
        self.frequency.get(&hash).copied().unwrap_or(0)
    }

    pub fn stem_text_of(&self, hash: Hash) -> Option<&str> {
        self.hash_to_stem.get(&hash).map(|s| s.as_str())
    }

    /// Builds the full lattice for `hashes` (a query already stemmed and
    /// fingerprinted by `term_model`).
    pub fn generate_graph(
        &self,
        hashes: &[Hash],
        term_model: &TermModel,
        number_parser: &NumberParser,
    ) -> Lattice {
        tracing::debug!(query_len = hashes.len(), "generating lattice");
        let mut lattice = Vec::with_capacity(hashes.len());
        for i in 0..hashes.len() {
            let tail = &hashes[i..];
            let mut edges = Vec::new();

            if let Some(ids) = self.postings.get(&hashes[i]) {
                let mut seen = std::collections::HashSet::new();
                for &alias_id in ids {
                    if !seen.insert(alias_id) {
                        continue;
                    }
                    let alias = &self.aliases[alias_id];
                    let is_opaque = |h: Hash| term_model.is_token_hash(h);
                    let is_downstream = alias.is_downstream_term.as_ref();
                    let diff = alias.matcher.diff(tail, &alias.hashes, is_downstream, &is_opaque);
                    if diff.is_empty_match() {
                        continue;
                    }
                    if let Some(score) =
                        self.score_match(&diff, alias.hashes.len(), is_downstream)
                    {
                        let length = diff.rightmost_a.unwrap() + 1;
                        edges.push(Edge::alias(score, length, alias_id));
                    }
                }
            }

            let mut number_matches = Vec::new();
            number_parser.parse(tail, &mut number_matches);
            for nm in number_matches.into_iter().take(self.config.max_number_matches) {
                let matched: Vec<Hash> = tail[..nm.length].to_vec();
                let common_terms: std::collections::HashSet<Hash> =
                    matched.iter().copied().collect();
                let diff = DiffResults {
                    matched: matched.clone(),
                    cost: 0,
                    leftmost_a: 0,
                    rightmost_a: Some(nm.length - 1),
                    alignments: nm.length,
                    common_terms,
                };
                let never_downstream = |_h: Hash| false;
                if let Some(score) = self.score_match(&diff, matched.len(), &never_downstream) {
                    edges.push(Edge::number(score, nm.length, nm.value));
                }
            }

            if edges.is_empty() {
                edges.push(Edge::unknown());
            }

            edges.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
            lattice.push(edges);
        }
        lattice
    }

    /// Maps a chosen edge to the token it emits.
    pub fn token_from_edge(&self, edge: &Edge) -> Token {
        match edge.kind {
            EdgeKind::Number => Token::Number(edge.label),
            EdgeKind::Unknown => Token::Unknown { length: edge.length },
            EdgeKind::Alias => Token::Catalog(self.aliases[edge.label as usize].token.clone()),
        }
    }

    /// spec §4.5 "Scoring". Returns `None` only when asked to score an
    /// empty alignment (callers should skip the edge instead of calling
    /// this); returns `Some(-1.0)` for a rejected or floor-clamped match.
    fn score_match(
        &self,
        diff: &DiffResults,
        prefix_len: usize,
        is_downstream: &dyn Fn(Hash) -> bool,
    ) -> Option<f32> {
        self.diagnostics(diff, prefix_len, is_downstream).map(|d| d.score)
    }

    /// Full scoring breakdown for `diff`, including the informational
    /// `downstream_word_factor` (spec §4.5) that never affects `score`
    /// itself. `None` only for an empty alignment.
    fn diagnostics(
        &self,
        diff: &DiffResults,
        prefix_len: usize,
        is_downstream: &dyn Fn(Hash) -> bool,
    ) -> Option<MatchDiagnostics> {
        let rightmost_a = diff.rightmost_a?;
        let l = (rightmost_a + 1) as f32;
        let cost = diff.cost as f32;

        let match_factor = if l > cost { (l - cost) / l } else { 1.0 / (l + cost) };

        let matched_len = diff.matched.len() as f32;
        let common_factor = if matched_len > 0.0 {
            diff.common_terms.len() as f32 / matched_len
        } else {
            0.0
        };
        let position_factor = if matched_len > 0.0 {
            ((diff.matched.len() as i64 - diff.leftmost_a as i64).max(0)) as f32 / matched_len
        } else {
            0.0
        };
        let length_factor = matched_len;

        let downstream_count = diff.common_terms.iter().filter(|h| is_downstream(**h)).count();
        let downstream_word_factor = if diff.common_terms.is_empty() {
            1.0
        } else {
            (diff.common_terms.len() - downstream_count) as f32 / diff.common_terms.len() as f32
        };

        let mut score = match_factor * common_factor * position_factor * length_factor;

        let all_downstream_partial_prefix = !diff.common_terms.is_empty()
            && downstream_count == diff.common_terms.len()
            && diff.common_terms.len() != prefix_len;
        if all_downstream_partial_prefix {
            score = -1.0;
        }
        if score <= self.config.score_floor {
            score = -1.0;
        }

        Some(MatchDiagnostics {
            match_factor,
            common_factor,
            position_factor,
            length_factor,
            downstream_word_factor,
            score,
        })
    }

    /// Recomputes the scoring breakdown for the alias edge that would be
    /// offered at `tail` for `alias_id`, for diagnostic display (e.g. a
    /// REPL's `:why` dump) — not used by `generate_graph` itself, which
    /// only needs the final score.
    pub fn diagnostics_for_alias(
        &self,
        alias_id: usize,
        tail: &[Hash],
        term_model: &TermModel,
    ) -> Option<MatchDiagnostics> {
        let alias = self.aliases.get(alias_id)?;
        let is_opaque = |h: Hash| term_model.is_token_hash(h);
        let is_downstream = alias.is_downstream_term.as_ref();
        let diff = alias.matcher.diff(tail, &alias.hashes, is_downstream, &is_opaque);
        if diff.is_empty_match() {
            return None;
        }
        self.diagnostics(&diff, alias.hashes.len(), is_downstream)
    }
}

/// Per-match scoring factors (spec §4.5). `downstream_word_factor` is
/// informational only — it never changes `score`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchDiagnostics {
    pub match_factor: f32,
    pub common_factor: f32,
    pub position_factor: f32,
    pub length_factor: f32,
    pub downstream_word_factor: f32,
    pub score: f32,
}
