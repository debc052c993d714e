//! End-to-end checks on the tokenizer's output stream: whole inputs go in,
//! the emitted token sequence is inspected.

use civet_html::{HTMLTokenizer, Token};

/// Run the state machine over `input` and collect everything it emits.
fn tokens_for(input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input.to_string());
    tokenizer.run();
    tokenizer.into_tokens()
}

/// Collect the character tokens of a stream into a string.
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|t| match t {
            Token::Character { data } => Some(*data),
            _ => None,
        })
        .collect()
}

/// Pull the attribute pairs off an input whose first token is a start tag.
fn attrs_of(input: &str) -> Vec<(String, String)> {
    match tokens_for(input).into_iter().next() {
        Some(Token::StartTag { attributes, .. }) => attributes
            .into_iter()
            .map(|attr| (attr.name, attr.value))
            .collect(),
        other => panic!("no start tag at the front of {input:?}, got {other:?}"),
    }
}

/// Pull the data off an input whose first token is a comment.
fn comment_data(input: &str) -> String {
    match tokens_for(input).into_iter().next() {
        Some(Token::Comment { data }) => data,
        other => panic!("no comment at the front of {input:?}, got {other:?}"),
    }
}

#[test]
fn test_bare_text_is_one_character_token_per_codepoint() {
    let tokens = tokens_for("hé!");
    let expected = [
        Token::new_character('h'),
        Token::new_character('é'),
        Token::new_character('!'),
        Token::new_eof(),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn test_bare_start_tag() {
    let tokens = tokens_for("<section>");
    assert_eq!(tokens.len(), 2);
    let Token::StartTag {
        name,
        self_closing,
        attributes,
        ..
    } = &tokens[0]
    else {
        panic!("expected a start tag, got {:?}", tokens[0]);
    };
    assert_eq!(name, "section");
    assert!(!*self_closing);
    assert!(attributes.is_empty());
}

#[test]
fn test_end_tag_after_text() {
    let tokens = tokens_for("x</em>");
    assert_eq!(tokens[0], Token::new_character('x'));
    let Token::EndTag { name } = &tokens[1] else {
        panic!("expected an end tag, got {:?}", tokens[1]);
    };
    assert_eq!(name, "em");
}

#[test]
fn test_tag_names_are_lowercased() {
    let tokens = tokens_for("<DiV></SPAN>");
    match &tokens[0] {
        Token::StartTag { name, .. } => assert_eq!(name, "div"),
        _ => panic!("Expected StartTag token"),
    }
    match &tokens[1] {
        Token::EndTag { name } => assert_eq!(name, "span"),
        _ => panic!("Expected EndTag token"),
    }
}

#[test]
fn test_self_closing_flag_survives_emission() {
    for (input, expect_flag) in [("<hr/>", true), ("<hr>", false), ("<hr />", true)] {
        match &tokens_for(input)[0] {
            Token::StartTag {
                name, self_closing, ..
            } => {
                assert_eq!(name, "hr", "input: {input}");
                assert_eq!(*self_closing, expect_flag, "input: {input}");
            }
            other => panic!("expected a start tag for {input}, got {other:?}"),
        }
    }
}

#[test]
fn test_all_three_quoting_styles_agree() {
    let expected = vec![("charset".to_string(), "utf-8".to_string())];
    for input in [
        r#"<meta charset="utf-8">"#,
        "<meta charset='utf-8'>",
        "<meta charset=utf-8>",
    ] {
        assert_eq!(attrs_of(input), expected, "input: {input}");
    }
}

#[test]
fn test_value_less_attribute_gets_an_empty_value() {
    assert_eq!(
        attrs_of("<option selected>"),
        vec![("selected".to_string(), String::new())]
    );
}

#[test]
fn test_attribute_names_are_lowercased() {
    assert_eq!(
        attrs_of(r#"<img SRC="a.png" ALT=x>"#),
        vec![
            ("src".to_string(), "a.png".to_string()),
            ("alt".to_string(), "x".to_string()),
        ]
    );
}

#[test]
fn test_duplicate_attributes_are_kept_in_source_order() {
    assert_eq!(
        attrs_of(r#"<p a="1" b="2" a="3">"#),
        vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "3".to_string()),
        ]
    );
}

#[test]
fn test_attribute_name_starting_with_equals_sign() {
    // A stray "=" before the attribute name starts an attribute whose name
    // begins with "=".
    assert_eq!(
        attrs_of("<p ==x>"),
        vec![("=".to_string(), "x".to_string())]
    );
}

#[test]
fn test_attributes_on_end_tags_are_discarded() {
    let tokens = tokens_for(r#"</div class="x">"#);
    assert_eq!(tokens.len(), 2);
    let Token::EndTag { name } = &tokens[0] else {
        panic!("expected an end tag, got {:?}", tokens[0]);
    };
    assert_eq!(name, "div");
}

#[test]
fn test_unterminated_tag_at_eof_emits_partial_token() {
    let input = r#"<div class="x"#;
    let tokens = tokens_for(input);
    assert_eq!(tokens.len(), 2);
    assert!(matches!(tokens[1], Token::EndOfFile));
    assert_eq!(
        attrs_of(input),
        vec![("class".to_string(), "x".to_string())]
    );
}

#[test]
fn test_well_formed_comments() {
    assert_eq!(comment_data("<!--one two-->"), "one two");
    assert_eq!(comment_data("<!-- spaced -->"), " spaced ");
}

#[test]
fn test_comment_bang_close() {
    assert_eq!(comment_data("<!--x--!>"), "x");
}

#[test]
fn test_empty_comment() {
    assert_eq!(comment_data("<!---->"), "");
}

#[test]
fn test_abrupt_empty_comments() {
    // <!--> and <!---> both close an empty comment early.
    for input in ["<!-->", "<!--->"] {
        assert_eq!(comment_data(input), "", "input: {input}");
        assert_eq!(tokens_for(input).len(), 2, "input: {input}");
    }
}

#[test]
fn test_unterminated_comment_at_eof() {
    let tokens = tokens_for("<!--partial");
    assert_eq!(tokens.len(), 2);
    let Token::Comment { data } = &tokens[0] else {
        panic!("expected a comment, got {:?}", tokens[0]);
    };
    assert_eq!(data, "partial");
    assert!(matches!(tokens[1], Token::EndOfFile));

    assert_eq!(comment_data("<!--"), "");
}

#[test]
fn test_comment_with_embedded_dashes_and_markup() {
    assert_eq!(comment_data("<!--a<!--b-->"), "a<!--b");
    assert_eq!(comment_data("<!-- a - b -- c -->"), " a - b -- c ");
}

#[test]
fn test_nul_in_comment_becomes_replacement_character() {
    assert_eq!(comment_data("<!--a\0b-->"), "a\u{FFFD}b");
}

#[test]
fn test_bogus_comment_from_question_mark() {
    assert_eq!(comment_data("<?php echo ?>"), "php echo ?");
}

#[test]
fn test_bogus_comment_from_bad_end_tag() {
    assert_eq!(comment_data("</ x>"), " x");
}

#[test]
fn test_bogus_comment_from_unknown_declaration() {
    assert_eq!(comment_data("<!ELEMENT br EMPTY>"), "ELEMENT br EMPTY");
}

#[test]
fn test_cdata_becomes_bogus_comment() {
    assert_eq!(comment_data("<![CDATA[foo]]>"), "[CDATA[foo]]");
}

#[test]
fn test_empty_end_tag_is_dropped() {
    let tokens = tokens_for("</>");
    assert_eq!(tokens.len(), 1);
    assert!(matches!(tokens[0], Token::EndOfFile));
}

#[test]
fn test_lone_less_than_sign() {
    let tokens = tokens_for("a < b");
    assert_eq!(text_of(&tokens), "a < b");
}

#[test]
fn test_less_than_at_eof() {
    let tokens = tokens_for("<");
    assert_eq!(text_of(&tokens), "<");
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));
}

#[test]
fn test_doctype() {
    let tokens = tokens_for("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Doctype {
            name,
            data,
            force_quirks,
        } => {
            assert_eq!(name, "html");
            assert_eq!(data.as_deref(), None);
            assert!(!force_quirks);
        }
        _ => panic!("Expected Doctype token"),
    }
}

#[test]
fn test_doctype_name_is_lowercased_and_keyword_case_insensitive() {
    let tokens = tokens_for("<!doctype HTML>");
    match &tokens[0] {
        Token::Doctype { name, .. } => assert_eq!(name, "html"),
        _ => panic!("Expected Doctype token"),
    }
}

#[test]
fn test_doctype_tail_is_kept_verbatim() {
    let tokens = tokens_for(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN">"#);
    match &tokens[0] {
        Token::Doctype { name, data, .. } => {
            assert_eq!(name, "html");
            assert_eq!(data.as_deref(), Some(r#"PUBLIC "-//W3C//DTD HTML 4.01//EN""#));
        }
        _ => panic!("Expected Doctype token"),
    }
}

#[test]
fn test_doctype_trailing_whitespace_only_yields_no_data() {
    let tokens = tokens_for("<!DOCTYPE html   >");
    match &tokens[0] {
        Token::Doctype { data, .. } => assert_eq!(data.as_deref(), None),
        _ => panic!("Expected Doctype token"),
    }
}

#[test]
fn test_doctype_at_eof_forces_quirks() {
    let tokens = tokens_for("<!DOCTYPE");
    match &tokens[0] {
        Token::Doctype { force_quirks, .. } => assert!(force_quirks),
        _ => panic!("Expected Doctype token"),
    }
    assert!(matches!(tokens[1], Token::EndOfFile));

    let tokens = tokens_for("<!DOCTYPE ht");
    match &tokens[0] {
        Token::Doctype {
            name, force_quirks, ..
        } => {
            assert_eq!(name, "ht");
            assert!(force_quirks);
        }
        _ => panic!("Expected Doctype token"),
    }
}

#[test]
fn test_style_content_is_rcdata() {
    let tokens = tokens_for("<style>a<b>c</style>d");
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "style"));
    // Inside style, "<b>" is not a tag.
    let mut i = 1;
    let mut style_text = String::new();
    while let Token::Character { data } = &tokens[i] {
        style_text.push(*data);
        i += 1;
    }
    assert_eq!(style_text, "a<b>c");
    assert!(matches!(&tokens[i], Token::EndTag { name } if name == "style"));
}

#[test]
fn test_rcdata_non_matching_end_tag_stays_text() {
    let tokens = tokens_for("<style></b></style>");
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "style"));
    assert_eq!(text_of(&tokens), "</b>");
    let end_tags: Vec<&Token> = tokens
        .iter()
        .filter(|t| matches!(t, Token::EndTag { .. }))
        .collect();
    assert_eq!(end_tags.len(), 1);
}

#[test]
fn test_rcdata_end_tag_with_whitespace_before_close() {
    let tokens = tokens_for("<style>x</style >y");
    assert_eq!(text_of(&tokens), "xy");
    assert!(tokens
        .iter()
        .any(|t| matches!(t, Token::EndTag { name } if name == "style")));
}

#[test]
fn test_self_closed_style_does_not_enter_rcdata() {
    let tokens = tokens_for("<style/><b>");
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "style"));
    assert!(matches!(&tokens[1], Token::StartTag { name, .. } if name == "b"));
}

#[test]
fn test_nul_passes_through_in_data() {
    let tokens = tokens_for("a\0b");
    assert_eq!(text_of(&tokens), "a\0b");
}

#[test]
fn test_nul_in_rcdata_becomes_replacement_character() {
    let tokens = tokens_for("<style>a\0b</style>");
    assert_eq!(text_of(&tokens), "a\u{FFFD}b");
}

#[test]
fn test_named_reference_in_text() {
    let tokens = tokens_for("&amp;");
    assert_eq!(text_of(&tokens), "&");
}

#[test]
fn test_named_reference_without_semicolon() {
    // Legacy form resolves, and the next character is reprocessed normally.
    let tokens = tokens_for("&amp rest");
    assert_eq!(text_of(&tokens), "& rest");
}

#[test]
fn test_named_reference_backtracks_to_longest_prefix() {
    // "notit" is not a name; "not" is. The tail stays literal.
    let tokens = tokens_for("&notit;");
    assert_eq!(text_of(&tokens), "\u{00AC}it;");

    let tokens = tokens_for("&notin;");
    assert_eq!(text_of(&tokens), "\u{2209}");
}

#[test]
fn test_unknown_reference_flushes_verbatim() {
    let tokens = tokens_for("&noti;");
    assert_eq!(text_of(&tokens), "&noti;");

    let tokens = tokens_for("&bogusname;");
    assert_eq!(text_of(&tokens), "&bogusname;");
}

#[test]
fn test_bare_ampersand() {
    let tokens = tokens_for("a & b &; c");
    assert_eq!(text_of(&tokens), "a & b &; c");
}

#[test]
fn test_reference_in_attribute_value() {
    assert_eq!(
        attrs_of(r#"<a title="x&lt;y">"#),
        vec![("title".to_string(), "x<y".to_string())]
    );
}

#[test]
fn test_attribute_reference_historical_exception() {
    // A dead-end followed by an alphanumeric inside an attribute value is
    // not a reference; the raw text survives.
    assert_eq!(
        attrs_of(r#"<a href="a&notreal;b">"#),
        vec![("href".to_string(), "a&notreal;b".to_string())]
    );
}

#[test]
fn test_reference_in_unquoted_attribute_value() {
    assert_eq!(
        attrs_of("<a b=c&gt;d>"),
        vec![("b".to_string(), "c>d".to_string())]
    );
}

#[test]
fn test_numeric_references() {
    let tokens = tokens_for("&#65;&#x42;&#x6a;");
    assert_eq!(text_of(&tokens), "ABj");
}

#[test]
fn test_numeric_reference_without_semicolon() {
    let tokens = tokens_for("&#65 x");
    assert_eq!(text_of(&tokens), "A x");
}

#[test]
fn test_numeric_reference_sanitization() {
    // Zero, out-of-range, and surrogate codes collapse to U+FFFD.
    assert_eq!(text_of(&tokens_for("&#0;")), "\u{FFFD}");
    assert_eq!(text_of(&tokens_for("&#x110000;")), "\u{FFFD}");
    assert_eq!(text_of(&tokens_for("&#xD800;")), "\u{FFFD}");
    // A hopeless overflow still collapses instead of wrapping.
    assert_eq!(text_of(&tokens_for("&#99999999999999999999;")), "\u{FFFD}");
}

#[test]
fn test_numeric_reference_windows_1252_remap() {
    assert_eq!(text_of(&tokens_for("&#128;")), "\u{20AC}");
    assert_eq!(text_of(&tokens_for("&#x99;")), "\u{2122}");
    assert_eq!(text_of(&tokens_for("&#x9F;")), "\u{0178}");
    // Holes in the remap range pass through.
    assert_eq!(text_of(&tokens_for("&#x81;")), "\u{0081}");
}

#[test]
fn test_numeric_reference_with_no_digits_flushes() {
    assert_eq!(text_of(&tokens_for("&#;")), "&#;");
    assert_eq!(text_of(&tokens_for("&#x;")), "&#x;");
    assert_eq!(text_of(&tokens_for("&#xg")), "&#xg");
}

#[test]
fn test_token_display() {
    let tokens = tokens_for(r#"<img src="a.png"/>"#);
    assert_eq!(tokens[0].to_string(), r#"<img src="a.png" />"#);
    assert_eq!(tokens[1].to_string(), "EOF");
}
