//! Named character reference table and prefix trie.
//!
//! [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
//!
//! The full reference table defines 2,231 names; this module carries the
//! common subset. Names are stored without the leading `&` but with their
//! trailing `;` where the name requires one. Legacy names that work without
//! a semicolon (`&amp`, `&not`, the Latin-1 set) appear as separate entries.
//!
//! Lookups go through [`EntityTrie`], a prefix tree built once on first use.
//! The tokenizer walks it one codepoint at a time and, on a dead end, asks
//! for the longest terminal prefix of what it has consumed so far.

use std::collections::HashMap;
use std::sync::LazyLock;

/// The name → replacement table the trie is built from.
///
/// NOTE: Some names map to more than one codepoint (e.g. `fjlig;` → "fj").
static ENTITIES: &[(&str, &str)] = &[
    // Markup-significant (required for any HTML at all)
    ("amp;", "&"),
    ("amp", "&"),
    ("lt;", "<"),
    ("lt", "<"),
    ("gt;", ">"),
    ("gt", ">"),
    ("quot;", "\""),
    ("quot", "\""),
    ("apos;", "'"),
    ("nbsp;", "\u{00A0}"),
    ("nbsp", "\u{00A0}"),
    // Latin-1 punctuation and signs
    ("iexcl;", "\u{00A1}"),
    ("iexcl", "\u{00A1}"),
    ("cent;", "\u{00A2}"),
    ("cent", "\u{00A2}"),
    ("pound;", "\u{00A3}"),
    ("pound", "\u{00A3}"),
    ("curren;", "\u{00A4}"),
    ("curren", "\u{00A4}"),
    ("yen;", "\u{00A5}"),
    ("yen", "\u{00A5}"),
    ("brvbar;", "\u{00A6}"),
    ("brvbar", "\u{00A6}"),
    ("sect;", "\u{00A7}"),
    ("sect", "\u{00A7}"),
    ("uml;", "\u{00A8}"),
    ("uml", "\u{00A8}"),
    ("copy;", "\u{00A9}"),
    ("copy", "\u{00A9}"),
    ("ordf;", "\u{00AA}"),
    ("ordf", "\u{00AA}"),
    ("laquo;", "\u{00AB}"),
    ("laquo", "\u{00AB}"),
    ("not;", "\u{00AC}"),
    ("not", "\u{00AC}"),
    ("shy;", "\u{00AD}"),
    ("shy", "\u{00AD}"),
    ("reg;", "\u{00AE}"),
    ("reg", "\u{00AE}"),
    ("macr;", "\u{00AF}"),
    ("macr", "\u{00AF}"),
    ("deg;", "\u{00B0}"),
    ("deg", "\u{00B0}"),
    ("plusmn;", "\u{00B1}"),
    ("plusmn", "\u{00B1}"),
    ("sup2;", "\u{00B2}"),
    ("sup2", "\u{00B2}"),
    ("sup3;", "\u{00B3}"),
    ("sup3", "\u{00B3}"),
    ("acute;", "\u{00B4}"),
    ("acute", "\u{00B4}"),
    ("micro;", "\u{00B5}"),
    ("micro", "\u{00B5}"),
    ("para;", "\u{00B6}"),
    ("para", "\u{00B6}"),
    ("middot;", "\u{00B7}"),
    ("middot", "\u{00B7}"),
    ("cedil;", "\u{00B8}"),
    ("cedil", "\u{00B8}"),
    ("sup1;", "\u{00B9}"),
    ("sup1", "\u{00B9}"),
    ("ordm;", "\u{00BA}"),
    ("ordm", "\u{00BA}"),
    ("raquo;", "\u{00BB}"),
    ("raquo", "\u{00BB}"),
    ("frac14;", "\u{00BC}"),
    ("frac14", "\u{00BC}"),
    ("frac12;", "\u{00BD}"),
    ("frac12", "\u{00BD}"),
    ("frac34;", "\u{00BE}"),
    ("frac34", "\u{00BE}"),
    ("iquest;", "\u{00BF}"),
    ("iquest", "\u{00BF}"),
    ("times;", "\u{00D7}"),
    ("times", "\u{00D7}"),
    ("divide;", "\u{00F7}"),
    ("divide", "\u{00F7}"),
    // Latin-1 letters (common subset, with legacy forms)
    ("Agrave;", "\u{00C0}"),
    ("Aacute;", "\u{00C1}"),
    ("Acirc;", "\u{00C2}"),
    ("Atilde;", "\u{00C3}"),
    ("Auml;", "\u{00C4}"),
    ("Aring;", "\u{00C5}"),
    ("AElig;", "\u{00C6}"),
    ("Ccedil;", "\u{00C7}"),
    ("Egrave;", "\u{00C8}"),
    ("Eacute;", "\u{00C9}"),
    ("Ecirc;", "\u{00CA}"),
    ("Euml;", "\u{00CB}"),
    ("Igrave;", "\u{00CC}"),
    ("Iacute;", "\u{00CD}"),
    ("Icirc;", "\u{00CE}"),
    ("Iuml;", "\u{00CF}"),
    ("ETH;", "\u{00D0}"),
    ("Ntilde;", "\u{00D1}"),
    ("Ograve;", "\u{00D2}"),
    ("Oacute;", "\u{00D3}"),
    ("Ocirc;", "\u{00D4}"),
    ("Otilde;", "\u{00D5}"),
    ("Ouml;", "\u{00D6}"),
    ("Oslash;", "\u{00D8}"),
    ("Ugrave;", "\u{00D9}"),
    ("Uacute;", "\u{00DA}"),
    ("Ucirc;", "\u{00DB}"),
    ("Uuml;", "\u{00DC}"),
    ("Yacute;", "\u{00DD}"),
    ("THORN;", "\u{00DE}"),
    ("szlig;", "\u{00DF}"),
    ("szlig", "\u{00DF}"),
    ("agrave;", "\u{00E0}"),
    ("agrave", "\u{00E0}"),
    ("aacute;", "\u{00E1}"),
    ("aacute", "\u{00E1}"),
    ("acirc;", "\u{00E2}"),
    ("atilde;", "\u{00E3}"),
    ("auml;", "\u{00E4}"),
    ("auml", "\u{00E4}"),
    ("aring;", "\u{00E5}"),
    ("aring", "\u{00E5}"),
    ("aelig;", "\u{00E6}"),
    ("aelig", "\u{00E6}"),
    ("ccedil;", "\u{00E7}"),
    ("ccedil", "\u{00E7}"),
    ("egrave;", "\u{00E8}"),
    ("egrave", "\u{00E8}"),
    ("eacute;", "\u{00E9}"),
    ("eacute", "\u{00E9}"),
    ("ecirc;", "\u{00EA}"),
    ("euml;", "\u{00EB}"),
    ("igrave;", "\u{00EC}"),
    ("iacute;", "\u{00ED}"),
    ("icirc;", "\u{00EE}"),
    ("iuml;", "\u{00EF}"),
    ("eth;", "\u{00F0}"),
    ("eth", "\u{00F0}"),
    ("ntilde;", "\u{00F1}"),
    ("ntilde", "\u{00F1}"),
    ("ograve;", "\u{00F2}"),
    ("oacute;", "\u{00F3}"),
    ("ocirc;", "\u{00F4}"),
    ("otilde;", "\u{00F5}"),
    ("ouml;", "\u{00F6}"),
    ("ouml", "\u{00F6}"),
    ("oslash;", "\u{00F8}"),
    ("oslash", "\u{00F8}"),
    ("ugrave;", "\u{00F9}"),
    ("uacute;", "\u{00FA}"),
    ("ucirc;", "\u{00FB}"),
    ("uuml;", "\u{00FC}"),
    ("uuml", "\u{00FC}"),
    ("yacute;", "\u{00FD}"),
    ("thorn;", "\u{00FE}"),
    ("thorn", "\u{00FE}"),
    ("yuml;", "\u{00FF}"),
    ("yuml", "\u{00FF}"),
    // General punctuation
    ("OElig;", "\u{0152}"),
    ("oelig;", "\u{0153}"),
    ("Scaron;", "\u{0160}"),
    ("scaron;", "\u{0161}"),
    ("Yuml;", "\u{0178}"),
    ("fnof;", "\u{0192}"),
    ("circ;", "\u{02C6}"),
    ("tilde;", "\u{02DC}"),
    ("ensp;", "\u{2002}"),
    ("emsp;", "\u{2003}"),
    ("thinsp;", "\u{2009}"),
    ("zwnj;", "\u{200C}"),
    ("zwj;", "\u{200D}"),
    ("lrm;", "\u{200E}"),
    ("rlm;", "\u{200F}"),
    ("ndash;", "\u{2013}"),
    ("mdash;", "\u{2014}"),
    ("lsquo;", "\u{2018}"),
    ("rsquo;", "\u{2019}"),
    ("sbquo;", "\u{201A}"),
    ("ldquo;", "\u{201C}"),
    ("rdquo;", "\u{201D}"),
    ("bdquo;", "\u{201E}"),
    ("dagger;", "\u{2020}"),
    ("Dagger;", "\u{2021}"),
    ("bull;", "\u{2022}"),
    ("hellip;", "\u{2026}"),
    ("permil;", "\u{2030}"),
    ("prime;", "\u{2032}"),
    ("Prime;", "\u{2033}"),
    ("lsaquo;", "\u{2039}"),
    ("rsaquo;", "\u{203A}"),
    ("oline;", "\u{203E}"),
    ("frasl;", "\u{2044}"),
    ("euro;", "\u{20AC}"),
    ("trade;", "\u{2122}"),
    // Arrows
    ("larr;", "\u{2190}"),
    ("uarr;", "\u{2191}"),
    ("rarr;", "\u{2192}"),
    ("darr;", "\u{2193}"),
    ("harr;", "\u{2194}"),
    ("crarr;", "\u{21B5}"),
    ("lArr;", "\u{21D0}"),
    ("uArr;", "\u{21D1}"),
    ("rArr;", "\u{21D2}"),
    ("dArr;", "\u{21D3}"),
    ("hArr;", "\u{21D4}"),
    // Mathematical operators
    ("forall;", "\u{2200}"),
    ("part;", "\u{2202}"),
    ("exist;", "\u{2203}"),
    ("empty;", "\u{2205}"),
    ("nabla;", "\u{2207}"),
    ("isin;", "\u{2208}"),
    ("notin;", "\u{2209}"),
    ("ni;", "\u{220B}"),
    ("prod;", "\u{220F}"),
    ("sum;", "\u{2211}"),
    ("minus;", "\u{2212}"),
    ("lowast;", "\u{2217}"),
    ("radic;", "\u{221A}"),
    ("prop;", "\u{221D}"),
    ("infin;", "\u{221E}"),
    ("ang;", "\u{2220}"),
    ("and;", "\u{2227}"),
    ("or;", "\u{2228}"),
    ("cap;", "\u{2229}"),
    ("cup;", "\u{222A}"),
    ("int;", "\u{222B}"),
    ("there4;", "\u{2234}"),
    ("sim;", "\u{223C}"),
    ("cong;", "\u{2245}"),
    ("asymp;", "\u{2248}"),
    ("ne;", "\u{2260}"),
    ("equiv;", "\u{2261}"),
    ("le;", "\u{2264}"),
    ("ge;", "\u{2265}"),
    ("sub;", "\u{2282}"),
    ("sup;", "\u{2283}"),
    ("nsub;", "\u{2284}"),
    ("sube;", "\u{2286}"),
    ("supe;", "\u{2287}"),
    ("oplus;", "\u{2295}"),
    ("otimes;", "\u{2297}"),
    ("perp;", "\u{22A5}"),
    ("sdot;", "\u{22C5}"),
    // Greek
    ("alpha;", "\u{03B1}"),
    ("beta;", "\u{03B2}"),
    ("gamma;", "\u{03B3}"),
    ("delta;", "\u{03B4}"),
    ("epsilon;", "\u{03B5}"),
    ("zeta;", "\u{03B6}"),
    ("eta;", "\u{03B7}"),
    ("theta;", "\u{03B8}"),
    ("iota;", "\u{03B9}"),
    ("kappa;", "\u{03BA}"),
    ("lambda;", "\u{03BB}"),
    ("mu;", "\u{03BC}"),
    ("nu;", "\u{03BD}"),
    ("xi;", "\u{03BE}"),
    ("omicron;", "\u{03BF}"),
    ("pi;", "\u{03C0}"),
    ("rho;", "\u{03C1}"),
    ("sigmaf;", "\u{03C2}"),
    ("sigma;", "\u{03C3}"),
    ("tau;", "\u{03C4}"),
    ("upsilon;", "\u{03C5}"),
    ("phi;", "\u{03C6}"),
    ("chi;", "\u{03C7}"),
    ("psi;", "\u{03C8}"),
    ("omega;", "\u{03C9}"),
    ("Alpha;", "\u{0391}"),
    ("Beta;", "\u{0392}"),
    ("Gamma;", "\u{0393}"),
    ("Delta;", "\u{0394}"),
    ("Theta;", "\u{0398}"),
    ("Lambda;", "\u{039B}"),
    ("Pi;", "\u{03A0}"),
    ("Sigma;", "\u{03A3}"),
    ("Phi;", "\u{03A6}"),
    ("Psi;", "\u{03A8}"),
    ("Omega;", "\u{03A9}"),
    // Shapes and suits
    ("loz;", "\u{25CA}"),
    ("spades;", "\u{2660}"),
    ("clubs;", "\u{2663}"),
    ("hearts;", "\u{2665}"),
    ("diams;", "\u{2666}"),
    // Multi-codepoint replacement
    ("fjlig;", "fj"),
];

/// A node in the entity prefix tree.
///
/// Each node maps the next codepoint to a child and, when a complete name
/// ends here, carries that name and its replacement.
pub struct EntityTrie {
    children: HashMap<char, EntityTrie>,
    terminal: Option<(&'static str, &'static str)>,
}

impl EntityTrie {
    fn new() -> Self {
        EntityTrie {
            children: HashMap::new(),
            terminal: None,
        }
    }

    fn insert(&mut self, name: &'static str, replacement: &'static str) {
        let mut node = self;
        for c in name.chars() {
            node = node.children.entry(c).or_insert_with(EntityTrie::new);
        }
        node.terminal = Some((name, replacement));
    }

    /// Descend one step.
    #[must_use]
    pub fn walk(&self, c: char) -> Option<&EntityTrie> {
        self.children.get(&c)
    }

    /// Descend along `name`, returning the reached node (terminal or
    /// interior) if the whole sequence is a path in the trie.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&EntityTrie> {
        let mut node = self;
        for c in name.chars() {
            node = node.walk(c)?;
        }
        Some(node)
    }

    /// Whether a complete entity name ends at this node.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    /// The complete name ending here, if any.
    #[must_use]
    pub fn name(&self) -> Option<&'static str> {
        self.terminal.map(|(n, _)| n)
    }

    /// The replacement string for the name ending here, if any.
    #[must_use]
    pub fn replacement(&self) -> Option<&'static str> {
        self.terminal.map(|(_, r)| r)
    }
}

/// The entity trie, built once from [`ENTITIES`] on first use and shared
/// read-only by every tokenizer instance.
pub static ENTITY_TRIE: LazyLock<EntityTrie> = LazyLock::new(|| {
    let mut root = EntityTrie::new();
    for &(name, replacement) in ENTITIES {
        root.insert(name, replacement);
    }
    root
});

/// Look up a complete entity name (without the leading `&`).
///
/// # Example
/// ```ignore
/// lookup_entity("amp;")  // Some("&")
/// lookup_entity("amp")   // Some("&") - legacy form
/// lookup_entity("xyz;")  // None
/// ```
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    ENTITY_TRIE.lookup(name).and_then(EntityTrie::replacement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_common_entities() {
        assert_eq!(lookup_entity("amp;"), Some("&"));
        assert_eq!(lookup_entity("lt;"), Some("<"));
        assert_eq!(lookup_entity("gt;"), Some(">"));
        assert_eq!(lookup_entity("quot;"), Some("\""));
        assert_eq!(lookup_entity("nbsp;"), Some("\u{00A0}"));
        assert_eq!(lookup_entity("notin;"), Some("\u{2209}"));
    }

    #[test]
    fn lookup_legacy_entities() {
        // No-semicolon forms
        assert_eq!(lookup_entity("amp"), Some("&"));
        assert_eq!(lookup_entity("not"), Some("\u{00AC}"));
        assert_eq!(lookup_entity("copy"), Some("\u{00A9}"));
    }

    #[test]
    fn lookup_unknown_entity() {
        assert_eq!(lookup_entity("notarealentity;"), None);
        assert_eq!(lookup_entity(""), None);
    }

    #[test]
    fn interior_nodes_are_not_terminals() {
        // "noti" lies on the path to "notin;" but no name ends there.
        let node = ENTITY_TRIE.lookup("noti").expect("prefix of notin;");
        assert!(!node.is_terminal());
        assert_eq!(node.replacement(), None);

        // "not" is both an interior node and a legacy terminal.
        let node = ENTITY_TRIE.lookup("not").expect("legacy name");
        assert!(node.is_terminal());
        assert_eq!(node.name(), Some("not"));
    }

    #[test]
    fn walk_descends_one_step() {
        let n = ENTITY_TRIE.walk('a').expect("names starting with a");
        let n = n.walk('m').expect("am");
        let n = n.walk('p').expect("amp");
        assert!(n.is_terminal());
        assert_eq!(n.walk(';').and_then(EntityTrie::replacement), Some("&"));
        assert!(n.walk('q').is_none());
    }

    #[test]
    fn multi_codepoint_replacement() {
        assert_eq!(lookup_entity("fjlig;"), Some("fj"));
    }
}
