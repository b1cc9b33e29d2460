//! Term model: stemming and fingerprinting of surface terms.
//!
//! Reference: spec §4.1. `stem` must be deterministic and total; `hash_term`
//! must be order-independent per term (a pure function of the stem's bytes).

use std::collections::HashSet;

use rust_stemmers::{Algorithm, Stemmer};

/// A 32-bit fingerprint identifying a stemmed surface term.
pub type Hash = u32;

/// Surface placeholder recognized internally as the numeric position marker.
/// Never occurs in real catalog text; reserved purely to give the numeric
/// tag a stable fingerprint.
const NUMERIC_MARKER: &str = "\u{0}semtok-numeric\u{0}";

/// Surface placeholders reserved for opaque (never-match) tokens.
const OPAQUE_MARKERS: &[&str] = &["\u{0}semtok-opaque-slot\u{0}", "\u{0}semtok-opaque-raw\u{0}"];

/// Stems and fingerprints surface terms, and classifies fingerprints as
/// numeric, opaque, or ordinary.
///
/// Read-only after construction; safe to share across queries.
pub struct TermModel {
    stemmer: Stemmer,
    number_hash: Hash,
    opaque_hashes: HashSet<Hash>,
}

impl std::fmt::Debug for TermModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermModel")
            .field("number_hash", &self.number_hash)
            .field("opaque_hashes", &self.opaque_hashes)
            .finish()
    }
}

impl Default for TermModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TermModel {
    pub fn new() -> Self {
        let stemmer = Stemmer::create(Algorithm::English);
        let number_hash = hash_term(NUMERIC_MARKER);
        let opaque_hashes = OPAQUE_MARKERS.iter().map(|m| hash_term(m)).collect();
        Self {
            stemmer,
            number_hash,
            opaque_hashes,
        }
    }

    /// Stem a single surface term. Deterministic and total (never panics).
    pub fn stem(&self, term: &str) -> String {
        self.stemmer.stem(&term.to_lowercase()).into_owned()
    }

    /// Deterministic 32-bit fingerprint of an already-stemmed term.
    pub fn hash_term(stem: &str) -> Hash {
        hash_term(stem)
    }

    /// Stem then hash in one step.
    pub fn stem_and_hash(&self, term: &str) -> Hash {
        hash_term(&self.stem(term))
    }

    /// The single fingerprint the number parser uses to mark numeric edges.
    pub fn number_hash(&self) -> Hash {
        self.number_hash
    }

    /// Whether `h` is the reserved numeric-position fingerprint.
    pub fn is_number_hash(&self, h: Hash) -> bool {
        h == self.number_hash
    }

    /// Whether `h` is one of the reserved opaque-token fingerprints.
    pub fn is_token_hash(&self, h: Hash) -> bool {
        self.opaque_hashes.contains(&h)
    }
}

/// MurmurHash3 (x86, 32-bit) with seed 0, applied to the stem's UTF-8 bytes.
fn hash_term(stem: &str) -> Hash {
    murmurhash32::murmurhash3(stem.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_matches_reference_vectors() {
        let tm = TermModel::new();
        assert_eq!(tm.stem("convertible"), "convert");
        assert_eq!(tm.stem("knobby"), "knobbi");
    }

    #[test]
    fn stem_sentence_matches_reference() {
        let tm = TermModel::new();
        let input = "red convertible sedan rims tires knobby spinners slicks turbo charger";
        let expected =
            "red convert sedan rim tire knobbi spinner slick turbo charger";
        let stemmed: Vec<String> = input.split_whitespace().map(|t| tm.stem(t)).collect();
        assert_eq!(stemmed.join(" "), expected);
    }

    #[test]
    fn hashing_is_deterministic_and_order_independent() {
        let tm = TermModel::new();
        let a = tm.stem_and_hash("run");
        let b = tm.stem_and_hash("run");
        assert_eq!(a, b);
    }

    #[test]
    fn alias_hash_vector_matches_reference() {
        let tm = TermModel::new();
        let terms = ["small", "unsweeten", "ice", "tea"];
        let hashes: Vec<Hash> = terms.iter().map(|t| tm.stem_and_hash(t)).collect();
        assert_eq!(
            hashes,
            vec![2557986934, 1506511588, 4077993285, 1955911164]
        );
    }

    #[test]
    fn number_and_opaque_hashes_are_disjoint_from_ordinary_terms() {
        let tm = TermModel::new();
        let ordinary = tm.stem_and_hash("sedan");
        assert!(!tm.is_number_hash(ordinary));
        assert!(!tm.is_token_hash(ordinary));
        assert!(tm.is_number_hash(tm.number_hash()));
    }
}
