//! Relevance harness: runs a YAML suite of input/expected cases against a
//! tokenizer, backtracking through the walker's alternatives until the
//! emitted tokens match or every path is exhausted, then reports pass/fail
//! grouped by `suites` and `priority`.
//!
//! Reference: spec §6 "Relevance harness I/O (informative)", SPEC_FULL.md
//! §4.9.

use std::collections::BTreeMap;
use std::path::Path;

use semtok_core::{GraphWalker, Lexicon, Token, Tokenizer};
use serde::Deserialize;

use crate::error::CliError;

#[derive(Debug, Deserialize)]
struct SuiteFile {
    cases: Vec<Case>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Case {
    pub priority: i32,
    #[serde(default)]
    pub suites: Vec<String>,
    pub input: String,
    pub expected: String,
}

#[derive(Debug, Clone)]
pub struct CaseResult {
    pub case: Case,
    pub passed: bool,
    pub produced: Vec<String>,
}

/// Pass/fail totals for a single group (a suite name or a priority value).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupTally {
    pub total: usize,
    pub passed: usize,
}

impl GroupTally {
    fn record(&mut self, passed: bool) {
        self.total += 1;
        if passed {
            self.passed += 1;
        }
    }
}

/// Full relevance-suite outcome: every case's result, plus pass/fail
/// tallies grouped by `suites` and by `priority`.
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub results: Vec<CaseResult>,
    pub by_suite: BTreeMap<String, GroupTally>,
    pub by_priority: BTreeMap<i32, GroupTally>,
}

impl SuiteReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<Case>, CliError> {
    let content = std::fs::read_to_string(path)?;
    let file: SuiteFile = serde_yaml::from_str(&content)?;
    Ok(file.cases)
}

/// Runs every case and groups the pass/fail outcome by `suites` and by
/// `priority` (SPEC_FULL.md §4.9).
pub fn run_suite(cases: &[Case], lexicon: &Lexicon, tokenizer: &Tokenizer) -> SuiteReport {
    let mut report = SuiteReport::default();
    for case in cases {
        let result = run_one(case.clone(), lexicon, tokenizer);

        for suite in &result.case.suites {
            report.by_suite.entry(suite.clone()).or_default().record(result.passed);
        }
        report.by_priority.entry(result.case.priority).or_default().record(result.passed);
        report.results.push(result);
    }
    report
}

fn run_one(case: Case, lexicon: &Lexicon, tokenizer: &Tokenizer) -> CaseResult {
    let expected: Vec<String> = case.expected.split_whitespace().map(str::to_string).collect();
    let terms: Vec<&str> = case.input.split_whitespace().collect();
    let hashes: Vec<_> = terms.iter().map(|t| lexicon.term_model().stem_and_hash(t)).collect();
    let lattice = tokenizer.generate_graph(&hashes, lexicon.term_model(), lexicon.number_parser());

    let mut walker = GraphWalker::new(&lattice);
    loop {
        while walker.advance() {}
        if walker.complete() {
            let produced: Vec<String> = walker
                .path_edges()
                .iter()
                .map(|e| describe(tokenizer.token_from_edge(e)))
                .collect();
            if produced == expected {
                return CaseResult { case, passed: true, produced };
            }
        }

        let mut found_alternative = false;
        while walker.retreat(false) {
            if walker.discard() {
                found_alternative = true;
                break;
            }
        }
        if !found_alternative {
            return CaseResult { case, passed: false, produced: Vec::new() };
        }
    }
}

fn describe(token: Token) -> String {
    match token {
        Token::Catalog(t) => t,
        Token::Number(v) => v.to_string(),
        Token::Unknown { length } => format!("<unknown:{length}>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semtok_core::{AliasInput, Config, MatcherPolicy};
    use std::rc::Rc;

    fn build_lexicon_and_tokenizer() -> (Lexicon, Tokenizer) {
        let mut lexicon = Lexicon::new();
        lexicon
            .add_domain(
                "drinks",
                vec![
                    AliasInput {
                        token: "iced-tea-unsweetened".into(),
                        text: "small unsweeten ice tea".into(),
                        matcher: MatcherPolicy::ExactPrefix,
                    },
                    AliasInput {
                        token: "coffee".into(),
                        text: "black coffee".into(),
                        matcher: MatcherPolicy::ExactPrefix,
                    },
                ],
                |_policy| Rc::new(semtok_core::ExactPrefixMatcher) as Rc<dyn semtok_core::Matcher>,
                true,
            )
            .unwrap();

        let mut tokenizer = Tokenizer::new(Config::default());
        lexicon.ingest(&mut tokenizer);
        (lexicon, tokenizer)
    }

    fn embedded_suite() -> Vec<Case> {
        vec![
            Case {
                priority: 1,
                suites: vec!["drinks".into()],
                input: "small unsweeten ice tea".into(),
                expected: "iced-tea-unsweetened".into(),
            },
            Case {
                priority: 1,
                suites: vec!["drinks".into()],
                input: "black coffee".into(),
                expected: "coffee".into(),
            },
            Case {
                priority: 2,
                suites: vec!["numbers".into()],
                input: "two hundred".into(),
                expected: "200".into(),
            },
            Case {
                priority: 2,
                suites: vec!["numbers".into(), "smoke".into()],
                input: "three".into(),
                expected: "3".into(),
            },
        ]
    }

    #[test]
    fn embedded_suite_passes_end_to_end() {
        let (lexicon, tokenizer) = build_lexicon_and_tokenizer();
        let cases = embedded_suite();
        let report = run_suite(&cases, &lexicon, &tokenizer);
        assert_eq!(report.passed(), report.total());
        assert_eq!(report.total(), 4);
    }

    #[test]
    fn report_groups_by_suite_and_priority() {
        let (lexicon, tokenizer) = build_lexicon_and_tokenizer();
        let cases = embedded_suite();
        let report = run_suite(&cases, &lexicon, &tokenizer);

        assert_eq!(report.by_suite["drinks"], GroupTally { total: 2, passed: 2 });
        assert_eq!(report.by_suite["numbers"], GroupTally { total: 2, passed: 2 });
        assert_eq!(report.by_suite["smoke"], GroupTally { total: 1, passed: 1 });
        assert_eq!(report.by_priority[&1], GroupTally { total: 2, passed: 2 });
        assert_eq!(report.by_priority[&2], GroupTally { total: 2, passed: 2 });
    }
}
