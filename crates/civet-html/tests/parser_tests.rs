//! Integration tests for the tree builder, driven through `parse`.

use civet_dom::{DomTree, NodeId, NodeType};
use civet_html::{parse, parse_with_issues};

/// First element with the given tag name, preorder, without recursing.
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    let mut pending = vec![from];
    while let Some(id) = pending.pop() {
        if tree.as_element(id).is_some_and(|e| e.tag_name == tag) {
            return Some(id);
        }
        // Reversed so the leftmost subtree comes off the stack first.
        pending.extend(tree.children(id).iter().rev().copied());
    }
    None
}

/// Helper to summarize a node's children as short kind strings
fn child_kinds(tree: &DomTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .map(|&child| match &tree.get(child).unwrap().node_type {
            NodeType::Document => "#document".to_string(),
            NodeType::Doctype(d) => format!("doctype:{}", d.name),
            NodeType::Element(e) => e.tag_name.clone(),
            NodeType::Text(s) => format!("text:{s}"),
            NodeType::Comment(s) => format!("comment:{s}"),
        })
        .collect()
}

#[test]
fn test_nested_elements_and_text() {
    let tree = parse("<p>Hello, <b>world</b>!</p>");

    assert_eq!(child_kinds(&tree, NodeId::ROOT), vec!["p"]);
    let p = find_element(&tree, NodeId::ROOT, "p").unwrap();
    assert_eq!(
        child_kinds(&tree, p),
        vec!["text:Hello, ", "b", "text:!"]
    );
    let b = find_element(&tree, p, "b").unwrap();
    assert_eq!(child_kinds(&tree, b), vec!["text:world"]);
}

#[test]
fn test_void_element_with_trailing_text() {
    let tree = parse("<img src=\"a.png\" ALT='x'>tail");

    assert_eq!(child_kinds(&tree, NodeId::ROOT), vec!["img", "text:tail"]);
    let img = find_element(&tree, NodeId::ROOT, "img").unwrap();
    let data = tree.as_element(img).unwrap();
    assert_eq!(
        data.attrs,
        vec![
            ("src".to_string(), "a.png".to_string()),
            ("alt".to_string(), "x".to_string()),
        ]
    );
    // Void elements never have children.
    assert!(tree.children(img).is_empty());
}

#[test]
fn test_character_references_in_text() {
    let tree = parse("&amp;&#65;&#x42;&#67;&notit;&notin;");

    assert_eq!(
        child_kinds(&tree, NodeId::ROOT),
        vec!["text:&ABC\u{00AC}it;\u{2209}"]
    );
}

#[test]
fn test_comment_sequence() {
    let tree = parse("<!-- hi --><!--x--!><!---->");

    assert_eq!(
        child_kinds(&tree, NodeId::ROOT),
        vec!["comment: hi ", "comment:x", "comment:"]
    );
}

#[test]
fn test_doctype_and_document_structure() {
    let tree = parse("<!DOCTYPE html><html><body></body></html>");

    assert_eq!(child_kinds(&tree, NodeId::ROOT), vec!["doctype:html", "html"]);
    let html = tree.document_element().unwrap();
    assert_eq!(child_kinds(&tree, html), vec!["body"]);

    match &tree.get(tree.first_child(NodeId::ROOT).unwrap()).unwrap().node_type {
        NodeType::Doctype(d) => {
            assert_eq!(d.name, "html");
            assert_eq!(d.data, None);
            assert!(!d.force_quirks);
        }
        _ => panic!("Expected doctype node first"),
    }
}

#[test]
fn test_style_content_is_taken_verbatim() {
    let tree = parse("<style>a<b>c</style>d");

    assert_eq!(child_kinds(&tree, NodeId::ROOT), vec!["style", "text:d"]);
    let style = find_element(&tree, NodeId::ROOT, "style").unwrap();
    assert_eq!(child_kinds(&tree, style), vec!["text:a<b>c"]);
}

#[test]
fn test_adjacent_character_tokens_coalesce() {
    let tree = parse("one &amp; two");
    // One text node, not a node per character.
    assert_eq!(child_kinds(&tree, NodeId::ROOT), vec!["text:one & two"]);
}

#[test]
fn test_mismatched_end_tag_closes_innermost() {
    let (tree, issues) = parse_with_issues("<div><p>x</div></p>");

    // </div> pops <p>, </p> pops <div>: nesting stays div > p.
    let div = find_element(&tree, NodeId::ROOT, "div").unwrap();
    assert_eq!(child_kinds(&tree, div), vec!["p"]);
    assert!(!issues.is_empty());
}

#[test]
fn test_end_tag_with_nothing_open_is_ignored() {
    let (tree, issues) = parse_with_issues("</div>text");

    assert_eq!(child_kinds(&tree, NodeId::ROOT), vec!["text:text"]);
    assert_eq!(issues.len(), 1);
}

#[test]
fn test_unclosed_elements_close_at_end_of_input() {
    let tree = parse("<ul><li>one<li>two");

    // No implied-tag handling: the second <li> nests inside the first.
    let ul = find_element(&tree, NodeId::ROOT, "ul").unwrap();
    assert_eq!(child_kinds(&tree, ul), vec!["li"]);
    let li = find_element(&tree, ul, "li").unwrap();
    assert_eq!(child_kinds(&tree, li), vec!["text:one", "li"]);
}

#[test]
fn test_self_closing_syntax_does_not_open_an_element() {
    let tree = parse("<widget/>after");

    assert_eq!(child_kinds(&tree, NodeId::ROOT), vec!["widget", "text:after"]);
    let widget = find_element(&tree, NodeId::ROOT, "widget").unwrap();
    assert!(tree.as_element(widget).unwrap().self_closing);
    assert!(tree.children(widget).is_empty());
}

#[test]
fn test_unterminated_tag_still_appears_in_tree() {
    let tree = parse("<div class=\"x");

    let div = find_element(&tree, NodeId::ROOT, "div").unwrap();
    assert_eq!(tree.as_element(div).unwrap().get("class"), Some("x"));
}

#[test]
fn test_newline_normalization() {
    let crlf = parse("a\r\nb\rc");
    let lf = parse("a\nb\nc");
    assert_eq!(crlf.to_debug_string(), lf.to_debug_string());
    assert_eq!(crlf.text_content(NodeId::ROOT), "a\nb\nc");
}

#[test]
fn test_text_concatenation_matches_source_text() {
    // Concatenated text equals the source with markup removed and
    // references replaced.
    let tree = parse("<p>a<b>c</b>d</p><!--skip-->e&amp;f");
    assert_eq!(tree.text_content(NodeId::ROOT), "acde&f");
}

#[test]
fn test_attribute_order_is_source_order() {
    let tree = parse(r#"<x z="1" a="2" m="3" a="4">"#);
    let x = find_element(&tree, NodeId::ROOT, "x").unwrap();
    let names: Vec<&str> = tree
        .as_element(x)
        .unwrap()
        .attrs
        .iter()
        .map(|(n, _)| n.as_str())
        .collect();
    assert_eq!(names, vec!["z", "a", "m", "a"]);
    // First-wins lookup over duplicates.
    assert_eq!(tree.as_element(x).unwrap().get("a"), Some("2"));
}

#[test]
fn test_empty_input_gives_bare_document() {
    let tree = parse("");
    assert!(tree.children(NodeId::ROOT).is_empty());
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_whitespace_only_text_is_preserved() {
    let tree = parse("<p> </p>");
    let p = find_element(&tree, NodeId::ROOT, "p").unwrap();
    assert_eq!(child_kinds(&tree, p), vec!["text: "]);
}

#[test]
fn test_quirks_doctype_reaches_the_tree() {
    let tree = parse("<!DOCTYPE>");
    match &tree.get(tree.first_child(NodeId::ROOT).unwrap()).unwrap().node_type {
        NodeType::Doctype(d) => {
            assert_eq!(d.name, "");
            assert!(d.force_quirks);
        }
        _ => panic!("Expected doctype node"),
    }
}

#[test]
fn test_every_non_root_node_has_a_parent() {
    let tree = parse("<!DOCTYPE html><div><p>x<!--c--></p><img></div>tail");
    for idx in 1..tree.len() {
        let id = NodeId(idx);
        let parent = tree.parent(id).expect("non-root node must have a parent");
        assert!(tree.children(parent).contains(&id));
    }
    assert!(tree.parent(NodeId::ROOT).is_none());
}
