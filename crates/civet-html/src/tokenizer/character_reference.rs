//! Character reference resolution.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//! and the named/numeric states that follow it.
//!
//! Named references resolve against the entity trie with longest-match
//! semantics: the tokenizer walks the trie one codepoint at a time, and on a
//! dead end backtracks to the longest prefix that is a complete name. The
//! characters consumed past that prefix are carried forward unchanged, so
//! `&notit;` becomes `¬` followed by the literal `it;`.

use std::sync::LazyLock;

use super::core::{HTMLTokenizer, TokenizerState};
use super::entities::{ENTITY_TRIE, EntityTrie, lookup_entity};
use super::token::Token;

impl HTMLTokenizer {
    /// "Consumed as part of an attribute": true when the return state is one
    /// of the attribute value states.
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            Some(
                TokenizerState::AttributeValueDoubleQuoted
                    | TokenizerState::AttributeValueSingleQuoted
                    | TokenizerState::AttributeValueUnquoted
            )
        )
    }

    /// "Flush code points consumed as a character reference"
    ///
    /// The raw buffered source text goes to the current attribute's value
    /// when the reference sits inside a start tag's attribute, and is
    /// emitted as character tokens otherwise.
    pub(super) fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        let into_attribute = self
            .current_token
            .as_ref()
            .is_some_and(Token::is_start_tag)
            && self.is_consumed_as_part_of_attribute();
        for c in buffer.chars() {
            if into_attribute {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_value(c);
                }
            } else {
                self.emit_character_token(c);
            }
        }
    }

    /// Deliver one resolved codepoint: into the current attribute value when
    /// a start tag is under construction, as a character token otherwise.
    /// Clears the temporary buffer.
    pub(super) fn add_entity(&mut self, c: char) {
        if self.current_token.as_ref().is_some_and(Token::is_start_tag) {
            if let Some(ref mut token) = self.current_token {
                token.append_to_current_attribute_value(c);
            }
        } else {
            self.emit_character_token(c);
        }
        self.temporary_buffer.clear();
    }

    /// Deliver a resolved replacement plus any characters consumed past the
    /// matched name.
    fn emit_resolved_reference(&mut self, replacement: &str, tail: &str) {
        for c in replacement.chars() {
            self.add_entity(c);
        }
        for c in tail.chars() {
            self.add_entity(c);
        }
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn handle_character_reference_state(&mut self) {
        // "Set the temporary buffer to the empty string. Append a U+0026
        // AMPERSAND character (&) to the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');
        self.entity_cursor = Some(LazyLock::force(&ENTITY_TRIE));

        match self.current_input_character {
            // "ASCII alphanumeric - Reconsume in the named character
            // reference state."
            Some(c) if c.is_ascii_alphanumeric() => {
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            // "U+0023 NUMBER SIGN (#) - Append the current input character to
            // the temporary buffer. Switch to the numeric character reference
            // state."
            Some('#') => {
                self.temporary_buffer.push('#');
                self.switch_to(TokenizerState::NumericCharacterReference);
            }
            // "Anything else - Flush code points consumed as a character
            // reference. Reconsume in the return state."
            _ => {
                self.flush_code_points_consumed_as_character_reference();
                let return_state = self.return_state.take().unwrap();
                self.reconsume_in(return_state);
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// Dispatched once per codepoint. `entity_cursor` tracks where the walk
    /// stands in the trie; the temporary buffer holds the committed source
    /// characters after the `&`.
    pub(super) fn handle_named_character_reference_state(&mut self) {
        match self.current_input_character {
            // A semicolon completes the name only if the trie has a terminal
            // one step down; a partial prefix is never resolved here.
            Some(';') => {
                let replacement = self
                    .entity_cursor
                    .and_then(|node| node.walk(';'))
                    .and_then(EntityTrie::replacement);
                if let Some(replacement) = replacement {
                    self.emit_resolved_reference(replacement, "");
                    let return_state = self.return_state.take().unwrap();
                    self.switch_to(return_state);
                } else {
                    self.log_parse_error();
                    self.flush_code_points_consumed_as_character_reference();
                    let return_state = self.return_state.take().unwrap();
                    self.reconsume_in(return_state);
                }
            }
            // The walk continues: commit the character and stay.
            Some(c) if self.entity_cursor.is_some_and(|node| node.walk(c).is_some()) => {
                self.entity_cursor = self.entity_cursor.and_then(|node| node.walk(c));
                self.temporary_buffer.push(c);
            }
            // Historical exception: inside a start tag, a name that dead-ends
            // on `=` or an alphanumeric is not a reference at all. The raw
            // text flushes into the attribute value, so `&notreal;` in an
            // attribute survives unchanged.
            Some(c)
                if (c == '=' || c.is_ascii_alphanumeric())
                    && self.current_token.as_ref().is_some_and(Token::is_start_tag) =>
            {
                self.flush_code_points_consumed_as_character_reference();
                let return_state = self.return_state.take().unwrap();
                self.reconsume_in(return_state);
            }
            // Dead end (EOF included): resolve the longest terminal prefix of
            // what was committed, then reprocess the current character in the
            // return state.
            _ => {
                self.resolve_reference_with_backtrack();
                let return_state = self.return_state.take().unwrap();
                self.reconsume_in(return_state);
            }
        }
    }

    /// Backtrack over the committed characters to the longest prefix that is
    /// a complete entity name. Characters past the match are carried forward
    /// verbatim; with no matching prefix the whole buffer flushes unchanged.
    fn resolve_reference_with_backtrack(&mut self) {
        // Committed characters sit after the leading '&'. They all walked
        // the trie, so they are ASCII and byte indexing is safe.
        let search = self.temporary_buffer[1..].to_string();
        for len in (1..=search.len()).rev() {
            let (prefix, tail) = search.split_at(len);
            if let Some(replacement) = lookup_entity(prefix) {
                if !prefix.ends_with(';') {
                    // missing-semicolon-after-character-reference
                    self.log_parse_error();
                }
                self.emit_resolved_reference(replacement, tail);
                return;
            }
        }
        self.flush_code_points_consumed_as_character_reference();
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(super) fn handle_numeric_character_reference_state(&mut self) {
        // "Set the character reference code to zero (0)."
        self.character_reference_code = 0;
        match self.current_input_character {
            // "U+0078 LATIN SMALL LETTER X / U+0058 LATIN CAPITAL LETTER X -
            // Append the current input character to the temporary buffer.
            // Switch to the hexadecimal character reference start state."
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            // "Anything else - Reconsume in the decimal character reference
            // start state."
            _ => {
                self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart);
            }
        }
    }

    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    pub(super) fn handle_hexadecimal_character_reference_start_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_hexdigit() => {
                self.reconsume_in(TokenizerState::HexadecimalCharacterReference);
            }
            // No digits at all: the introducer flushes back out unchanged.
            _ => {
                self.log_parse_error();
                self.flush_code_points_consumed_as_character_reference();
                let return_state = self.return_state.take().unwrap();
                self.reconsume_in(return_state);
            }
        }
    }

    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    pub(super) fn handle_decimal_character_reference_start_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_digit() => {
                self.reconsume_in(TokenizerState::DecimalCharacterReference);
            }
            _ => {
                self.log_parse_error();
                self.flush_code_points_consumed_as_character_reference();
                let return_state = self.return_state.take().unwrap();
                self.reconsume_in(return_state);
            }
        }
    }

    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    ///
    /// Accumulation saturates; anything past U+10FFFF collapses to U+FFFD in
    /// the end state regardless of how far it overflowed.
    pub(super) fn handle_hexadecimal_character_reference_state(&mut self) {
        match self.current_input_character {
            // "ASCII digit - Multiply the character reference code by 16. Add
            // a numeric version of the current input character (subtract
            // 0x0030 from the character's code point) to the character
            // reference code."
            Some(c) if c.is_ascii_digit() => {
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(16)
                    .saturating_add(c as u32 - 0x30);
            }
            // "ASCII upper hex digit - ... subtract 0x0037 ..."
            Some(c) if ('A'..='F').contains(&c) => {
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(16)
                    .saturating_add(c as u32 - 0x37);
            }
            // "ASCII lower hex digit - ... subtract 0x0057 ..."
            Some(c) if ('a'..='f').contains(&c) => {
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(16)
                    .saturating_add(c as u32 - 0x57);
            }
            // The terminator (semicolon or not) is handled by the end state.
            _ => {
                self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
            }
        }
    }

    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    pub(super) fn handle_decimal_character_reference_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_digit() => {
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(10)
                    .saturating_add(c as u32 - 0x30);
            }
            _ => {
                self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
            }
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// Sanitizes the accumulated code, delivers the resulting scalar, and
    /// returns to the return state. A semicolon terminator is consumed; any
    /// other terminator is reprocessed there.
    pub(super) fn handle_numeric_character_reference_end_state(&mut self) {
        let code = self.character_reference_code;
        let code = if code == 0 || code > 0x10FFFF || (0xD800..=0xDFFF).contains(&code) {
            self.log_parse_error();
            0xFFFD
        } else if let Some(mapped) = windows_1252_remap(code) {
            self.log_parse_error();
            mapped
        } else {
            // Noncharacters and control codes pass through.
            code
        };
        let c = char::from_u32(code).unwrap_or('\u{FFFD}');
        self.add_entity(c);

        let return_state = self.return_state.take().unwrap();
        match self.current_input_character {
            Some(';') => self.switch_to(return_state),
            _ => {
                self.log_parse_error();
                self.reconsume_in(return_state);
            }
        }
    }
}

/// The Windows-1252 patch-up table: numeric references in 0x80..=0x9F that
/// historically meant CP-1252 glyphs are remapped to the codepoints those
/// glyphs actually have. Holes in the range (0x81, 0x8D, 0x8F, 0x90, 0x9D)
/// pass through untouched.
const fn windows_1252_remap(code: u32) -> Option<u32> {
    match code {
        0x80 => Some(0x20AC), // EURO SIGN
        0x82 => Some(0x201A), // SINGLE LOW-9 QUOTATION MARK
        0x83 => Some(0x0192), // LATIN SMALL LETTER F WITH HOOK
        0x84 => Some(0x201E), // DOUBLE LOW-9 QUOTATION MARK
        0x85 => Some(0x2026), // HORIZONTAL ELLIPSIS
        0x86 => Some(0x2020), // DAGGER
        0x87 => Some(0x2021), // DOUBLE DAGGER
        0x88 => Some(0x02C6), // MODIFIER LETTER CIRCUMFLEX ACCENT
        0x89 => Some(0x2030), // PER MILLE SIGN
        0x8A => Some(0x0160), // LATIN CAPITAL LETTER S WITH CARON
        0x8B => Some(0x2039), // SINGLE LEFT-POINTING ANGLE QUOTATION MARK
        0x8C => Some(0x0152), // LATIN CAPITAL LIGATURE OE
        0x8E => Some(0x017D), // LATIN CAPITAL LETTER Z WITH CARON
        0x91 => Some(0x2018), // LEFT SINGLE QUOTATION MARK
        0x92 => Some(0x2019), // RIGHT SINGLE QUOTATION MARK
        0x93 => Some(0x201C), // LEFT DOUBLE QUOTATION MARK
        0x94 => Some(0x201D), // RIGHT DOUBLE QUOTATION MARK
        0x95 => Some(0x2022), // BULLET
        0x96 => Some(0x2013), // EN DASH
        0x97 => Some(0x2014), // EM DASH
        0x98 => Some(0x02DC), // SMALL TILDE
        0x99 => Some(0x2122), // TRADE MARK SIGN
        0x9A => Some(0x0161), // LATIN SMALL LETTER S WITH CARON
        0x9B => Some(0x203A), // SINGLE RIGHT-POINTING ANGLE QUOTATION MARK
        0x9C => Some(0x0153), // LATIN SMALL LIGATURE OE
        0x9E => Some(0x017E), // LATIN SMALL LETTER Z WITH CARON
        0x9F => Some(0x0178), // LATIN CAPITAL LETTER Y WITH DIAERESIS
        _ => None,
    }
}
