//! Integration test driving the full pipeline: lexicon registration,
//! ingestion into a tokenizer, lattice generation, and best-path walking.

use std::rc::Rc;

use semtok_core::{
    AliasInput, Config, ExactPrefixMatcher, GraphWalker, Lexicon, MatcherPolicy, Token, Tokenizer,
};

fn exact(_policy: MatcherPolicy) -> Rc<dyn semtok_core::Matcher> {
    Rc::new(ExactPrefixMatcher)
}

#[test]
fn registers_ingests_and_walks_a_simple_query() {
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
            exact,
            true,
        )
        .unwrap();

    let mut tokenizer = Tokenizer::new(Config::default());
    lexicon.ingest(&mut tokenizer);

    let query: Vec<&str> = "small unsweeten ice tea".split_whitespace().collect();
    let hashes: Vec<u32> = query.iter().map(|t| lexicon.term_model().stem_and_hash(t)).collect();

    let lattice = tokenizer.generate_graph(&hashes, lexicon.term_model(), lexicon.number_parser());
    assert_eq!(lattice.len(), 4);

    let mut walker = GraphWalker::new(&lattice);
    while walker.advance() {}
    assert!(walker.complete());

    let path = walker.path_edges();
    assert_eq!(path.len(), 1);
    let token = tokenizer.token_from_edge(&path[0]);
    assert_eq!(token, Token::Catalog("iced-tea-unsweetened".to_string()));
}

#[test]
fn number_phrase_query_yields_a_numeric_token() {
    let mut lexicon = Lexicon::new();
    lexicon
        .add_domain(
            "quantifiers",
            vec![AliasInput {
                token: "unrelated".into(),
                text: "large fries".into(),
                matcher: MatcherPolicy::ExactPrefix,
            }],
            exact,
            true,
        )
        .unwrap();

    let mut tokenizer = Tokenizer::new(Config::default());
    lexicon.ingest(&mut tokenizer);

    let query: Vec<&str> = "two hundred".split_whitespace().collect();
    let hashes: Vec<u32> = query.iter().map(|t| lexicon.term_model().stem_and_hash(t)).collect();

    let lattice = tokenizer.generate_graph(&hashes, lexicon.term_model(), lexicon.number_parser());
    let mut walker = GraphWalker::new(&lattice);
    while walker.advance() {}
    assert!(walker.complete());

    let path = walker.path_edges();
    let tokens: Vec<Token> = path.iter().map(|e| tokenizer.token_from_edge(e)).collect();
    assert_eq!(tokens, vec![Token::Number(200)]);
}
