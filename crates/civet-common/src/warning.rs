//! Deduplicated warnings with colored terminal output.
//!
//! Parse errors in HTML are recoverable, so the tokenizer and tree builder
//! report them here instead of failing. Each unique message prints once.

use std::collections::HashSet;
use std::sync::{LazyLock, Mutex};

const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Messages that have already been printed.
static WARNED: LazyLock<Mutex<HashSet<String>>> = LazyLock::new(|| Mutex::new(HashSet::new()));

/// Warn about a recoverable problem (prints once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("HTML Tokenizer", "parse error in CommentEnd state at byte 14");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    if WARNED.lock().unwrap().insert(key) {
        eprintln!("{YELLOW}[Civet {component}] ⚠ {message}{RESET}");
    }
}

/// Number of unique warnings recorded so far.
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
#[must_use]
pub fn warning_count() -> usize {
    WARNED.lock().unwrap().len()
}

/// Clear all recorded warnings (call when starting a new document).
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    WARNED.lock().unwrap().clear();
}
