//! Common utilities for the Civet HTML toolkit.
//!
//! This crate provides shared infrastructure used by the parsing crates:
//! - **Warning System** - deduplicated terminal output for recoverable errors

pub mod warning;
