//! Number parser: recognizes spelled-out cardinal numbers in a fingerprint
//! stream and injects matches into the lattice.
//!
//! Reference: spec §4.2. `parse` never advances past the longest prefix it
//! found; it records every shorter prefix that is *also* a valid number
//! along the way (e.g. "two hundred" yields matches at both length 1 and
//! length 2).

use std::collections::HashMap;
use std::collections::HashSet;

use crate::term::{Hash, TermModel};

/// A single numeric match: the value spelled out, and how many fingerprints
/// of the input it consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberMatch {
    pub value: i64,
    pub length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Word {
    Zero,
    Unit(i64),
    Teen(i64),
    Tens(i64),
    Hundred,
    Scale(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Last {
    None,
    Unit,
    Teen,
    Tens,
    Hundred,
    Scale,
}

/// Canonical surface forms the parser recognizes, paired with their kind.
const VOCAB: &[(&str, Word)] = &[
    ("zero", Word::Zero),
    ("one", Word::Unit(1)),
    ("two", Word::Unit(2)),
    ("three", Word::Unit(3)),
    ("four", Word::Unit(4)),
    ("five", Word::Unit(5)),
    ("six", Word::Unit(6)),
    ("seven", Word::Unit(7)),
    ("eight", Word::Unit(8)),
    ("nine", Word::Unit(9)),
    ("ten", Word::Teen(10)),
    ("eleven", Word::Teen(11)),
    ("twelve", Word::Teen(12)),
    ("thirteen", Word::Teen(13)),
    ("fourteen", Word::Teen(14)),
    ("fifteen", Word::Teen(15)),
    ("sixteen", Word::Teen(16)),
    ("seventeen", Word::Teen(17)),
    ("eighteen", Word::Teen(18)),
    ("nineteen", Word::Teen(19)),
    ("twenty", Word::Tens(20)),
    ("thirty", Word::Tens(30)),
    ("forty", Word::Tens(40)),
    ("fifty", Word::Tens(50)),
    ("sixty", Word::Tens(60)),
    ("seventy", Word::Tens(70)),
    ("eighty", Word::Tens(80)),
    ("ninety", Word::Tens(90)),
    ("hundred", Word::Hundred),
    ("thousand", Word::Scale(1_000)),
    ("million", Word::Scale(1_000_000)),
];

/// Recognizes spelled-out cardinal numbers over a stream of fingerprints
/// produced by the same [`TermModel`] used to fingerprint the query.
#[derive(Debug)]
pub struct NumberParser {
    table: HashMap<Hash, Word>,
    surface_terms: Vec<&'static str>,
}

impl NumberParser {
    pub fn new(term_model: &TermModel) -> Self {
        let mut table = HashMap::new();
        let mut surface_terms = Vec::new();
        for (term, word) in VOCAB {
            table.insert(term_model.stem_and_hash(term), *word);
            surface_terms.push(*term);
        }
        Self {
            table,
            surface_terms,
        }
    }

    /// The fingerprints of every surface term this parser might consume.
    pub fn own_hashed_terms(&self) -> HashSet<Hash> {
        self.table.keys().copied().collect()
    }

    /// Adds the surface terms this parser recognizes to `set`.
    pub fn add_terms_to_set(&self, set: &mut HashSet<String>) {
        for term in &self.surface_terms {
            set.insert((*term).to_string());
        }
    }

    /// Consumes a prefix of `input` matching a cardinal-number phrase,
    /// appending `{value, length}` for every prefix length that forms a
    /// valid number. Never advances past the longest prefix it finds.
    pub fn parse(&self, input: &[Hash], output: &mut Vec<NumberMatch>) {
        let mut total: i64 = 0;
        let mut group: i64 = 0;
        let mut last = Last::None;

        for (idx, hash) in input.iter().enumerate() {
            let Some(word) = self.table.get(hash) else {
                break;
            };

            match (last, *word) {
                (Last::None, Word::Zero) => {
                    output.push(NumberMatch {
                        value: 0,
                        length: 1,
                    });
                    break;
                }
                (Last::None | Last::Scale, Word::Tens(v)) => {
                    group += v;
                    last = Last::Tens;
                }
                (Last::None | Last::Scale, Word::Unit(v)) => {
                    group += v;
                    last = Last::Unit;
                }
                (Last::None | Last::Scale, Word::Teen(v)) => {
                    group += v;
                    last = Last::Teen;
                }
                (Last::Tens, Word::Unit(v)) => {
                    group += v;
                    last = Last::Unit;
                }
                (Last::Unit | Last::Teen | Last::Tens | Last::None, Word::Hundred) => {
                    let base = if group == 0 { 1 } else { group };
                    group = base * 100;
                    last = Last::Hundred;
                }
                (Last::Hundred, Word::Tens(v)) => {
                    group += v;
                    last = Last::Tens;
                }
                (Last::Hundred, Word::Unit(v)) => {
                    group += v;
                    last = Last::Unit;
                }
                (Last::Hundred, Word::Teen(v)) => {
                    group += v;
                    last = Last::Teen;
                }
                (
                    Last::Unit | Last::Teen | Last::Tens | Last::Hundred | Last::None,
                    Word::Scale(scale),
                ) => {
                    let base = if group == 0 { 1 } else { group };
                    total += base * scale;
                    group = 0;
                    last = Last::Scale;
                }
                _ => break,
            }

            output.push(NumberMatch {
                value: total + group,
                length: idx + 1,
            });
        }
    }
}
