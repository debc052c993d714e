//! Helper methods for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! - State transitions ("Switch to", "Reconsume in")
//! - Input handling ("Consume the next input character", lookahead)
//! - Token emission ("Emit the current token")
//! - RCDATA end tag helpers
//! - Parse error reporting

use civet_common::warning::warn_once;

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::Token;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next iteration of the main
    /// loop.
    pub(super) fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// Transitions without consuming: the same character is dispatched again
    /// in the new state.
    pub(super) fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Consume the next input character"
    ///
    /// Returns the character at the current position and advances, or `None`
    /// at end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Peek at the codepoint `offset` characters past the cursor without
    /// consuming anything.
    #[must_use]
    pub(super) fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// "If the next few characters are..."
    pub(super) fn next_few_characters_are(&self, target: &str) -> bool {
        for (i, target_char) in target.chars().enumerate() {
            if self.peek_codepoint(i) != Some(target_char) {
                return false;
            }
        }
        true
    }

    /// ASCII case-insensitive version of [`Self::next_few_characters_are`],
    /// used for the `DOCTYPE` keyword.
    pub(super) fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        for (i, target_char) in target.chars().enumerate() {
            match self.peek_codepoint(i) {
                Some(c) if c.eq_ignore_ascii_case(&target_char) => {}
                _ => return false,
            }
        }
        true
    }

    /// Skip past a multi-character introducer the caller has already
    /// verified with one of the lookahead helpers. ASCII only.
    pub(super) fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }

    /// [ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    /// minus CR, which newline normalization removed before tokenization.
    pub(super) const fn is_whitespace_char(c: char) -> bool {
        matches!(c, ' ' | '\t' | '\n' | '\x0C')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Emit the current token"
    ///
    /// Finalizes the pending attribute, records the last start tag name, and
    /// pushes the token onto the output stream. A `style` start tag also
    /// redirects the tokenizer to RCDATA so the element's content is taken
    /// as text until the matching end tag.
    pub fn emit_token(&mut self) {
        let Some(mut token) = self.current_token.take() else {
            return;
        };
        token.commit_pending_attribute();
        if let Token::StartTag {
            ref name,
            self_closing,
            ..
        } = token
        {
            self.last_start_tag_name = Some(name.clone());
            if name == "style" && !self_closing {
                self.token_stream.push(token);
                self.switch_to(TokenizerState::RCDATA);
                return;
            }
        }
        self.token_stream.push(token);
    }

    /// "Emit the current input character as a character token."
    pub fn emit_character_token(&mut self, c: char) {
        self.token_stream.push(Token::new_character(c));
    }

    /// "Emit an end-of-file token."
    pub fn emit_eof_token(&mut self) {
        self.token_stream.push(Token::new_eof());
    }
}

// =============================================================================
// RCDATA Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "An appropriate end tag token is an end tag token whose tag name
    /// matches the tag name of the last start tag to have been emitted from
    /// this tokenizer, if any."
    ///
    /// Decides whether `</style>` closes the current `<style>` content.
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        if let (Some(last_start_tag), Some(Token::EndTag { name })) =
            (&self.last_start_tag_name, &self.current_token)
        {
            return name == last_start_tag;
        }
        false
    }

    /// The RCDATA end tag name "anything else" entry: the candidate end tag
    /// was not appropriate, so the consumed prefix degrades to literal
    /// characters and tokenization resumes in RCDATA.
    pub(super) fn emit_rcdata_end_tag_name_anything_else(&mut self) {
        self.emit_character_token('<');
        self.emit_character_token('/');
        let buffer = std::mem::take(&mut self.temporary_buffer);
        for c in buffer.chars() {
            self.emit_character_token(c);
        }
        // Discard the candidate end tag token.
        self.current_token = None;
        self.reconsume_in(TokenizerState::RCDATA);
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// Report a recoverable parse error. Tokenization always continues; the
    /// warning channel deduplicates repeats.
    pub(super) fn log_parse_error(&self) {
        warn_once(
            "HTML Tokenizer",
            &format!(
                "parse error in {} state at byte {}",
                self.state, self.current_pos
            ),
        );
    }
}
