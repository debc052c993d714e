//! HTML tokenizer module.
//!
//! Implements a per-codepoint state machine in the spirit of
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard, with a simplified doctype family and
//! no script-data states.

/// Character reference resolution (named and numeric).
pub mod character_reference;
/// The tokenizer state machine.
pub mod core;
/// Named character reference table and prefix trie.
pub mod entities;
/// Helper methods for state transitions, input, and token emission.
pub mod helpers;
/// Token types produced by the tokenizer.
pub mod token;

pub use core::{HTMLTokenizer, TokenizerState};
pub use token::{Attribute, Token};
