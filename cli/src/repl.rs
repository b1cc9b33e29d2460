//! Interactive line-at-a-time REPL over a loaded catalog.
//!
//! `:why` prints the last query's full lattice (every candidate edge per
//! position, including the informational `downstream_word_factor` for
//! alias edges); `:next` backtracks the live walker (`retreat(false)` +
//! `discard()`) and prints the next-best complete path (SPEC_FULL.md §4.8).

use std::io::{self, BufRead, Write};

use semtok_core::{EdgeKind, GraphWalker, Hash, Lattice, TermModel, Token, Tokenizer};

pub fn run(lexicon: &semtok_core::Lexicon, tokenizer: &Tokenizer) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut last_lattice: Option<Lattice> = None;
    let mut last_hashes: Vec<Hash> = Vec::new();
    let mut walker: Option<GraphWalker<'_>> = None;

    prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            prompt()?;
            continue;
        }
        match line {
            ":quit" | ":q" => break,
            ":why" => {
                match &last_lattice {
                    Some(lattice) => print_lattice(lattice, &last_hashes, tokenizer, lexicon.term_model()),
                    None => println!("no query yet"),
                }
                prompt()?;
                continue;
            }
            ":next" => {
                match walker.as_mut() {
                    Some(w) => print_next(w, tokenizer),
                    None => println!("no query yet"),
                }
                prompt()?;
                continue;
            }
            _ => {}
        }

        let terms: Vec<&str> = line.split_whitespace().collect();
        let hashes: Vec<Hash> = terms.iter().map(|t| lexicon.term_model().stem_and_hash(t)).collect();
        let lattice = tokenizer.generate_graph(&hashes, lexicon.term_model(), lexicon.number_parser());

        // Drop any walker borrowing the previous lattice before replacing it.
        walker = None;
        last_lattice = Some(lattice);
        last_hashes = hashes;

        let mut w = GraphWalker::new(last_lattice.as_ref().unwrap());
        while w.advance() {}
        print_path(&w, tokenizer);
        walker = Some(w);

        prompt()?;
    }
    Ok(())
}

/// Backtracks the live walker to the next alternative and prints it, or
/// reports that none remain.
fn print_next(walker: &mut GraphWalker<'_>, tokenizer: &Tokenizer) {
    let mut found = false;
    while walker.retreat(false) {
        if walker.discard() {
            found = true;
            break;
        }
    }
    if !found {
        println!("(no further alternatives)");
        return;
    }
    while walker.advance() {}
    print_path(walker, tokenizer);
}

fn print_path(walker: &GraphWalker<'_>, tokenizer: &Tokenizer) {
    if walker.complete() {
        let tokens: Vec<String> =
            walker.path_edges().iter().map(|e| describe(tokenizer.token_from_edge(e))).collect();
        println!("{}", tokens.join(" "));
    } else {
        println!("(no complete path)");
    }
}

fn prompt() -> anyhow::Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

fn describe(token: Token) -> String {
    match token {
        Token::Catalog(t) => t,
        Token::Number(v) => v.to_string(),
        Token::Unknown { length } => format!("<unknown:{length}>"),
    }
}

fn print_lattice(lattice: &Lattice, hashes: &[Hash], tokenizer: &Tokenizer, term_model: &TermModel) {
    for (i, edges) in lattice.iter().enumerate() {
        println!("position {i}:");
        for edge in edges {
            if edge.kind == EdgeKind::Alias {
                let tail = &hashes[i..];
                if let Some(d) = tokenizer.diagnostics_for_alias(edge.label as usize, tail, term_model) {
                    println!(
                        "  {:?} score={:.4} length={} downstream_word_factor={:.4}",
                        edge.kind, edge.score, edge.length, d.downstream_word_factor
                    );
                    continue;
                }
            }
            println!("  {:?} score={:.4} length={}", edge.kind, edge.score, edge.length);
        }
    }
}
