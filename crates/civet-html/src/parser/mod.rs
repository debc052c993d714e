//! Tree construction.
//!
//! Consumes the token stream and builds a [`civet_dom::DomTree`]. The policy
//! is deliberately small: a stack of open elements, void-element handling,
//! and unconditional popping on end tags. There are no insertion modes,
//! implied tags, or scope checks.

/// The tree builder.
pub mod core;

pub use core::{ParseIssue, TreeBuilder};
