//! Lexicon: groups aliases into domains, stems/hashes/tags each alias, and
//! feeds ingestion domains into the tokenizer.
//!
//! Reference: spec §3 "Alias"/"Domain"/"Lexicon", §4.4.

use std::collections::HashSet;
use std::rc::Rc;

use crate::error::CoreError;
use crate::matcher::Matcher;
use crate::number::NumberParser;
use crate::term::{Hash, TermModel};
use crate::tokenizer::Tokenizer;

/// The fundamental indexed unit: a labelled surface phrase.
///
/// Immutable after registration. `|terms| = |stemmed| = |hashes| >= 1`.
pub struct Alias {
    pub token: String,
    pub text: String,
    pub terms: Vec<String>,
    pub stemmed: Vec<String>,
    pub hashes: Vec<Hash>,
    pub matcher: Rc<dyn Matcher>,
    /// From this alias's perspective, is `h` owned primarily by another
    /// domain (or numeric/opaque)?
    pub is_downstream_term: Rc<dyn Fn(Hash) -> bool>,
}

impl std::fmt::Debug for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Alias")
            .field("token", &self.token)
            .field("text", &self.text)
            .field("hashes", &self.hashes)
            .finish()
    }
}

/// A pre-registration alias as supplied by a catalog: just the opaque
/// token, the surface text, and the chosen matcher policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherPolicy {
    ExactPrefix,
    Approx,
}

#[derive(Debug, Clone)]
pub struct AliasInput {
    pub token: String,
    pub text: String,
    pub matcher: MatcherPolicy,
}

/// A set of aliases sharing provenance (e.g. "cars catalog", "intents").
pub struct Domain {
    name: String,
    aliases: Vec<Alias>,
    ingestion: bool,
    own: HashSet<Hash>,
    downstream: HashSet<Hash>,
}

impl Domain {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    pub fn ingestion(&self) -> bool {
        self.ingestion
    }

    pub fn own(&self) -> &HashSet<Hash> {
        &self.own
    }

    pub fn downstream(&self) -> &HashSet<Hash> {
        &self.downstream
    }
}

/// Owns the term model, the number parser, and the ordered list of domains.
pub struct Lexicon {
    term_model: Rc<TermModel>,
    number_parser: Rc<NumberParser>,
    domains: Vec<Domain>,
}

impl Lexicon {
    pub fn new() -> Self {
        let term_model = Rc::new(TermModel::new());
        let number_parser = Rc::new(NumberParser::new(&term_model));
        Self {
            term_model,
            number_parser,
            domains: Vec::new(),
        }
    }

    pub fn term_model(&self) -> &TermModel {
        &self.term_model
    }

    pub fn number_parser(&self) -> &NumberParser {
        &self.number_parser
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Register a domain's aliases. Stems, hashes, and tags each alias;
    /// registration is an idempotent append (calling this twice with the
    /// same inputs yields two domains with identical postings once
    /// ingested — see spec §8 "Idempotence").
    pub fn add_domain(
        &mut self,
        name: impl Into<String>,
        inputs: Vec<AliasInput>,
        matcher_for: impl Fn(MatcherPolicy) -> Rc<dyn Matcher>,
        ingestion: bool,
    ) -> Result<(), CoreError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CoreError::EmptyDomainName);
        }

        let mut aliases = Vec::with_capacity(inputs.len());
        let mut own = HashSet::new();

        for input in inputs {
            if input.text.is_empty() {
                return Err(CoreError::EmptyAliasText { token: input.token });
            }
            let terms: Vec<String> = input.text.split_whitespace().map(|s| s.to_string()).collect();
            let stemmed: Vec<String> = terms.iter().map(|t| self.term_model.stem(t)).collect();
            let hashes: Vec<Hash> = stemmed.iter().map(|s| TermModel::hash_term(s)).collect();
            own.extend(hashes.iter().copied());

            aliases.push(Alias {
                token: input.token,
                text: input.text,
                terms,
                stemmed,
                hashes,
                matcher: matcher_for(input.matcher),
                // Patched below, once every domain's `own` set is final —
                // placeholder until `ingest` resolves downstream sets.
                is_downstream_term: Rc::new(|_h: Hash| false),
            });
        }

        tracing::debug!(domain = %name, aliases = aliases.len(), ingestion, "registered domain");
        self.domains.push(Domain {
            name,
            aliases,
            ingestion,
            own,
            downstream: HashSet::new(),
        });
        Ok(())
    }

    /// The set of surface terms across every domain's aliases.
    pub fn terms(&self) -> HashSet<String> {
        let mut out = HashSet::new();
        for domain in &self.domains {
            for alias in &domain.aliases {
                out.extend(alias.terms.iter().cloned());
            }
        }
        out
    }

    /// Resolves each domain's downstream set (`numeric ∪ ⋃_{D'≠D} own(D')`),
    /// patches every alias's `is_downstream_term` closure accordingly, then
    /// hands every alias of every *ingestion* domain to `tokenizer`.
    pub fn ingest(&mut self, tokenizer: &mut Tokenizer) {
        let numeric: HashSet<Hash> = self.number_parser.own_hashed_terms();

        let all_own: Vec<HashSet<Hash>> = self.domains.iter().map(|d| d.own.clone()).collect();

        for (i, domain) in self.domains.iter_mut().enumerate() {
            let mut downstream = numeric.clone();
            for (j, own_j) in all_own.iter().enumerate() {
                if i != j {
                    downstream.extend(own_j.iter().copied());
                }
            }
            let downstream_rc: Rc<HashSet<Hash>> = Rc::new(downstream.clone());
            for alias in domain.aliases.iter_mut() {
                let downstream_rc = downstream_rc.clone();
                alias.is_downstream_term = Rc::new(move |h: Hash| downstream_rc.contains(&h));
            }
            domain.downstream = downstream;
        }

        for domain in &self.domains {
            if !domain.ingestion {
                continue;
            }
            for alias in &domain.aliases {
                tokenizer.add_item(clone_alias(alias));
            }
        }
        tracing::info!(domains = self.domains.len(), "lexicon ingested");
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

/// Aliases are handed to the tokenizer by value (spec §9: "no
/// back-references" — the tokenizer owns its copy with no link back to the
/// lexicon/domain).
fn clone_alias(alias: &Alias) -> Alias {
    Alias {
        token: alias.token.clone(),
        text: alias.text.clone(),
        terms: alias.terms.clone(),
        stemmed: alias.stemmed.clone(),
        hashes: alias.hashes.clone(),
        matcher: alias.matcher.clone(),
        is_downstream_term: alias.is_downstream_term.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::ExactPrefixMatcher;

    fn exact(_policy: MatcherPolicy) -> Rc<dyn Matcher> {
        Rc::new(ExactPrefixMatcher)
    }

    #[test]
    fn rejects_empty_alias_text() {
        let mut lx = Lexicon::new();
        let inputs = vec![AliasInput {
            token: "t".into(),
            text: "".into(),
            matcher: MatcherPolicy::ExactPrefix,
        }];
        let err = lx.add_domain("d", inputs, exact, true).unwrap_err();
        assert!(matches!(err, CoreError::EmptyAliasText { .. }));
    }

    #[test]
    fn rejects_empty_domain_name() {
        let mut lx = Lexicon::new();
        let err = lx.add_domain("", vec![], exact, true).unwrap_err();
        assert!(matches!(err, CoreError::EmptyDomainName));
    }

    #[test]
    fn downstream_is_union_of_other_domains_own_sets() {
        let mut lx = Lexicon::new();
        lx.add_domain(
            "a",
            vec![AliasInput {
                token: "a1".into(),
                text: "red car".into(),
                matcher: MatcherPolicy::ExactPrefix,
            }],
            exact,
            true,
        )
        .unwrap();
        lx.add_domain(
            "b",
            vec![AliasInput {
                token: "b1".into(),
                text: "blue car".into(),
                matcher: MatcherPolicy::ExactPrefix,
            }],
            exact,
            true,
        )
        .unwrap();

        let mut tokenizer = Tokenizer::new(crate::config::Config::default());
        lx.ingest(&mut tokenizer);

        let car_hash = TermModel::hash_term(&lx.term_model().stem("car"));
        let red_hash = TermModel::hash_term(&lx.term_model().stem("red"));

        let domain_a = &lx.domains()[0];
        // "car" is in both domains' own sets, so it IS downstream for A
        // (spec §3: shared terms are still downstream if present elsewhere).
        assert!(domain_a.downstream().contains(&car_hash));
        // "red" only belongs to domain A's own set, so it is not downstream
        // for A.
        assert!(!domain_a.downstream().contains(&red_hash));
    }
}
