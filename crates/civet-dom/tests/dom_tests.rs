//! Tests for the arena document tree.

use civet_dom::{DomTree, ElementData, NodeId, NodeType};

fn element(tag: &str) -> NodeType {
    NodeType::Element(ElementData {
        tag_name: tag.to_string(),
        attrs: Vec::new(),
        self_closing: false,
    })
}

#[test]
fn test_new_tree_has_only_the_document() {
    let tree = DomTree::new();
    assert_eq!(tree.len(), 1);
    assert!(matches!(
        tree.get(NodeId::ROOT).unwrap().node_type,
        NodeType::Document
    ));
    assert!(tree.children(NodeId::ROOT).is_empty());
    assert!(tree.parent(NodeId::ROOT).is_none());
}

#[test]
fn test_append_child_sets_links() {
    let mut tree = DomTree::new();
    let a = tree.alloc(element("a"));
    let b = tree.alloc(element("b"));
    let c = tree.alloc(element("c"));
    tree.append_child(NodeId::ROOT, a);
    tree.append_child(NodeId::ROOT, b);
    tree.append_child(a, c);

    assert_eq!(tree.children(NodeId::ROOT), &[a, b]);
    assert_eq!(tree.parent(a), Some(NodeId::ROOT));
    assert_eq!(tree.parent(c), Some(a));

    // Sibling links
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.next_sibling(b), None);
    assert_eq!(tree.prev_sibling(a), None);

    assert_eq!(tree.first_child(NodeId::ROOT), Some(a));
    assert_eq!(tree.last_child(NodeId::ROOT), Some(b));
}

#[test]
fn test_ancestors_walk_to_the_document() {
    let mut tree = DomTree::new();
    let a = tree.alloc(element("a"));
    let b = tree.alloc(element("b"));
    let c = tree.alloc(element("c"));
    tree.append_child(NodeId::ROOT, a);
    tree.append_child(a, b);
    tree.append_child(b, c);

    let chain: Vec<NodeId> = tree.ancestors(c).collect();
    assert_eq!(chain, vec![b, a, NodeId::ROOT]);
}

#[test]
fn test_document_element_skips_non_elements() {
    let mut tree = DomTree::new();
    let comment = tree.alloc(NodeType::Comment("c".to_string()));
    let html = tree.alloc(element("html"));
    tree.append_child(NodeId::ROOT, comment);
    tree.append_child(NodeId::ROOT, html);

    assert_eq!(tree.document_element(), Some(html));
}

#[test]
fn test_text_content_concatenates_in_document_order() {
    let mut tree = DomTree::new();
    let p = tree.alloc(element("p"));
    let t1 = tree.alloc(NodeType::Text("one ".to_string()));
    let b = tree.alloc(element("b"));
    let t2 = tree.alloc(NodeType::Text("two".to_string()));
    let t3 = tree.alloc(NodeType::Text(" three".to_string()));
    tree.append_child(NodeId::ROOT, p);
    tree.append_child(p, t1);
    tree.append_child(p, b);
    tree.append_child(b, t2);
    tree.append_child(p, t3);

    assert_eq!(tree.text_content(p), "one two three");
    assert_eq!(tree.as_text(t2), Some("two"));
    assert_eq!(tree.as_text(b), None);
}

#[test]
fn test_attribute_lookup_is_first_wins() {
    let data = ElementData {
        tag_name: "x".to_string(),
        attrs: vec![
            ("class".to_string(), "a b".to_string()),
            ("id".to_string(), "one".to_string()),
            ("id".to_string(), "two".to_string()),
        ],
        self_closing: false,
    };
    assert_eq!(data.get("id"), Some("one"));
    assert_eq!(data.id(), Some("one"));
    assert_eq!(data.get("missing"), None);
    let classes: Vec<&str> = data.classes().collect();
    assert_eq!(classes, vec!["a", "b"]);
}

#[test]
fn test_debug_string_shape() {
    let mut tree = DomTree::new();
    let div = tree.alloc(NodeType::Element(ElementData {
        tag_name: "div".to_string(),
        attrs: vec![("id".to_string(), "main".to_string())],
        self_closing: false,
    }));
    let text = tree.alloc(NodeType::Text("hi".to_string()));
    tree.append_child(NodeId::ROOT, div);
    tree.append_child(div, text);

    let dump = tree.to_debug_string();
    assert_eq!(dump, "#document\n  <div id=\"main\">\n    \"hi\"\n");
}
