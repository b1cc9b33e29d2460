//! Loads a YAML catalog of domains and aliases into a [`Lexicon`].
//!
//! Catalog files, REPLs, and relevance suites live outside the matching
//! engine's core (spec §1) — this module is the thin glue that turns a
//! YAML document into `addDomain` calls.

use std::path::Path;
use std::rc::Rc;

use semtok_core::{AliasInput, ApproxMatcher, ExactPrefixMatcher, Lexicon, Matcher, MatcherPolicy};
use serde::Deserialize;

use crate::error::CliError;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    domains: Vec<DomainSpec>,
}

#[derive(Debug, Deserialize)]
pub struct DomainSpec {
    pub name: String,
    #[serde(default = "default_true")]
    pub ingestion: bool,
    #[serde(default)]
    pub matcher: MatcherSpec,
    pub aliases: Vec<AliasSpec>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Default, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum MatcherSpec {
    #[default]
    Exact,
    Approx,
}

impl From<MatcherSpec> for MatcherPolicy {
    fn from(m: MatcherSpec) -> Self {
        match m {
            MatcherSpec::Exact => MatcherPolicy::ExactPrefix,
            MatcherSpec::Approx => MatcherPolicy::Approx,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AliasSpec {
    pub token: String,
    pub text: String,
}

/// Reads and parses `path` as a catalog, without registering anything.
pub fn load_catalog(path: &Path) -> Result<Vec<DomainSpec>, CliError> {
    let content = std::fs::read_to_string(path)?;
    let file: CatalogFile = serde_yaml::from_str(&content)?;
    Ok(file.domains)
}

/// Parses `path` as a catalog and registers every domain it describes.
/// An alias with empty `text` surfaces as `CliError::Core` wrapping
/// `CoreError::EmptyAliasText`.
pub fn load_into(path: impl AsRef<Path>, lexicon: &mut Lexicon, approx_slack: usize) -> Result<(), CliError> {
    let domains = load_catalog(path.as_ref())?;

    for domain in domains {
        let inputs: Vec<AliasInput> = domain
            .aliases
            .into_iter()
            .map(|a| AliasInput {
                token: a.token,
                text: a.text,
                matcher: domain.matcher.into(),
            })
            .collect();
        lexicon.add_domain(domain.name, inputs, move |policy| matcher_for(policy, approx_slack), domain.ingestion)?;
    }
    Ok(())
}

fn matcher_for(policy: MatcherPolicy, approx_slack: usize) -> Rc<dyn Matcher> {
    match policy {
        MatcherPolicy::ExactPrefix => Rc::new(ExactPrefixMatcher),
        MatcherPolicy::Approx => Rc::new(ApproxMatcher::new(approx_slack)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("semtok-catalog-test-{name}-{:?}", std::thread::current().id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_a_minimal_catalog() {
        let yaml = r#"
domains:
  - name: drinks
    matcher: exact
    aliases:
      - token: iced-tea-unsweetened
        text: small unsweeten ice tea
"#;
        let path = write_temp("minimal", yaml);
        let mut lexicon = Lexicon::new();
        load_into(&path, &mut lexicon, 2).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(lexicon.domains().len(), 1);
        assert_eq!(lexicon.domains()[0].aliases().len(), 1);
    }

    #[test]
    fn rejects_an_alias_with_empty_text() {
        let yaml = r#"
domains:
  - name: drinks
    matcher: exact
    aliases:
      - token: empty
        text: ""
"#;
        let path = write_temp("empty-text", yaml);
        let mut lexicon = Lexicon::new();
        let err = load_into(&path, &mut lexicon, 2).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            err,
            CliError::Core(semtok_core::CoreError::EmptyAliasText { .. })
        ));
    }
}
