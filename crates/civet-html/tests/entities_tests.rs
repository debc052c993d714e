//! Integration tests for the named character reference trie.

use civet_html::tokenizer::entities::{ENTITY_TRIE, EntityTrie, lookup_entity};

#[test]
fn test_semicolon_and_legacy_forms() {
    assert_eq!(lookup_entity("amp;"), Some("&"));
    assert_eq!(lookup_entity("amp"), Some("&"));
    assert_eq!(lookup_entity("not;"), Some("\u{00AC}"));
    assert_eq!(lookup_entity("not"), Some("\u{00AC}"));
    // apos has no legacy form
    assert_eq!(lookup_entity("apos;"), Some("'"));
    assert_eq!(lookup_entity("apos"), None);
}

#[test]
fn test_walk_matches_lookup() {
    let mut node = &*ENTITY_TRIE;
    for c in "notin".chars() {
        node = node.walk(c).expect("path to notin;");
    }
    assert!(!node.is_terminal());
    let terminal = node.walk(';').expect("notin; terminal");
    assert!(terminal.is_terminal());
    assert_eq!(terminal.name(), Some("notin;"));
    assert_eq!(terminal.replacement(), Some("\u{2209}"));

    assert_eq!(
        ENTITY_TRIE.lookup("notin;").and_then(EntityTrie::replacement),
        Some("\u{2209}")
    );
}

#[test]
fn test_shared_prefixes() {
    // "not" is a terminal with descendants; its siblings branch off "n".
    let not = ENTITY_TRIE.lookup("not").expect("not");
    assert!(not.is_terminal());
    assert!(not.walk('i').is_some()); // notin;
    assert!(not.walk(';').is_some()); // not;

    // Longest terminal prefix of "notit" is "not".
    assert!(ENTITY_TRIE.lookup("notit").is_none());
    assert!(ENTITY_TRIE.lookup("noti").is_some());
}

#[test]
fn test_dead_ends() {
    assert!(ENTITY_TRIE.lookup("q").is_some()); // prefix of quot
    assert!(ENTITY_TRIE.lookup("qz").is_none());
    assert!(ENTITY_TRIE.walk('&').is_none());
    assert!(ENTITY_TRIE.lookup("AMP;").is_none()); // names are case-sensitive
}

#[test]
fn test_multi_codepoint_replacements() {
    assert_eq!(lookup_entity("fjlig;"), Some("fj"));
}
