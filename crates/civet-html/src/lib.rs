//! HTML tokenizer and tree builder for the Civet toolkit.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** (in the spirit of
//!   [WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RCDATA, tag, attribute, comment, and doctype states
//!   - Named and numeric character references with longest-match backtracking
//! - **Tree Builder**
//!   - Stack of open elements, void elements, rcdata promotion for `style`
//!   - Best-effort recovery: every input produces a tree
//!
//! # Not Implemented
//!
//! - Script data and rawtext states
//! - Insertion modes, implied tags, the adoption agency algorithm
//! - Template content, foreign content, fragment parsing
//! - Encoding sniffing (input is decoded UTF-8)

/// Tree construction from the token stream.
pub mod parser;
/// Tokenizer state machine and token types.
pub mod tokenizer;

pub use civet_dom::{DomTree, NodeId, NodeType};
pub use parser::{ParseIssue, TreeBuilder};
pub use tokenizer::{Attribute, HTMLTokenizer, Token};

/// Parse an HTML document into a tree.
///
/// Line endings are normalized first (`\r\n` and lone `\r` become `\n`),
/// then the input is tokenized to completion and the tokens are fed to the
/// tree builder. Parse errors are absorbed; the result is always a tree
/// rooted at [`NodeId::ROOT`].
#[must_use]
pub fn parse(body: &str) -> DomTree {
    let mut tokenizer = HTMLTokenizer::new(normalize_newlines(body));
    tokenizer.run();
    TreeBuilder::new(tokenizer.into_tokens()).run()
}

/// Like [`parse`], but also returns the issues the tree builder recorded.
#[must_use]
pub fn parse_with_issues(body: &str) -> (DomTree, Vec<ParseIssue>) {
    let mut tokenizer = HTMLTokenizer::new(normalize_newlines(body));
    tokenizer.run();
    TreeBuilder::new(tokenizer.into_tokens()).run_with_issues()
}

fn normalize_newlines(body: &str) -> String {
    body.replace("\r\n", "\n").replace('\r', "\n")
}
