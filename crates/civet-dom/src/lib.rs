//! Document tree for the Civet HTML toolkit.
//!
//! This crate provides an arena-based document tree loosely following the
//! node model of the [DOM Living Standard](https://dom.spec.whatwg.org/).
//!
//! # Design
//!
//! All nodes live in one vector owned by [`DomTree`]; every relationship
//! (parent, children, siblings) is a [`NodeId`] index. The document node
//! owns the tree, and parent links are purely navigational — an index never
//! keeps a node alive on its own.
//!
//! Attributes are stored as an ordered list of `(name, value)` pairs. Source
//! order is preserved and duplicate names are kept; [`ElementData::get`]
//! returns the first occurrence.

/// A type-safe index into the document tree.
///
/// Provides O(1) access to any node without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// Ordered element attributes: source order, duplicates kept.
pub type AttributeList = Vec<(String, String)>;

/// A node in the document tree.
///
/// Stores indices for parent/child/sibling relationships, enabling O(1)
/// traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is, with its payload.
    pub node_type: NodeType,

    /// The parent, or `None` for the document node.
    ///
    /// Navigational only; the arena owns every node.
    pub parent: Option<NodeId>,

    /// Children in insertion order.
    pub children: Vec<NodeId>,

    /// The node immediately after this one in its parent's children.
    pub next_sibling: Option<NodeId>,

    /// The node immediately before this one in its parent's children.
    pub prev_sibling: Option<NodeId>,
}

/// The kinds of nodes the tree builder produces.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// The document root. Exactly one per tree, at [`NodeId::ROOT`].
    Document,
    /// A `<!DOCTYPE ...>` declaration.
    Doctype(DoctypeData),
    /// An element.
    Element(ElementData),
    /// A run of character data. Never empty.
    Text(String),
    /// A `<!-- ... -->` comment.
    Comment(String),
}

/// Payload of a doctype node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctypeData {
    /// The doctype name, ASCII-lowercased (`html` for `<!DOCTYPE HTML>`).
    pub name: String,
    /// Everything between the name and the closing `>`, verbatim.
    pub data: Option<String>,
    /// Hint for downstream consumers that the document should be treated
    /// as quirks-mode.
    pub force_quirks: bool,
}

/// Payload of an element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// The tag name, ASCII-lowercased.
    pub tag_name: String,
    /// Attributes in source order. Duplicate names are kept.
    pub attrs: AttributeList,
    /// Whether the source tag carried a trailing `/`.
    pub self_closing: bool,
}

impl ElementData {
    /// First attribute value with the given name, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The element's `id` attribute value, if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get("id")
    }

    /// Class names from the `class` attribute, split on spaces.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get("class")
            .unwrap_or("")
            .split_ascii_whitespace()
    }
}

/// Arena-based document tree with O(1) node access and traversal.
///
/// All nodes live in a contiguous vector, using indices for relationships.
/// Nodes are created append-only; the tree never reparents or removes.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes, indexed by `NodeId`. The document node is at index 0.
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding just the document node.
    #[must_use]
    pub fn new() -> Self {
        DomTree {
            nodes: vec![Node {
                node_type: NodeType::Document,
                parent: None,
                children: Vec::new(),
                next_sibling: None,
                prev_sibling: None,
            }],
        }
    }

    /// The document node's ID.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Total number of nodes, including the document node.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True only for a tree that lost its document node (never happens
    /// through this API).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new detached node and return its ID.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// Append `child` as the last child of `parent`, updating parent and
    /// sibling links.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// The parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// All children of a node, in order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// The first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// The last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// The next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// The previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate over all ancestors of a node, from parent to the document.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Comment content if this node is a comment node.
    #[must_use]
    pub fn as_comment(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Comment(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// The first element child of the document node, if any.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| matches!(self.get(id).map(|n| &n.node_type), Some(NodeType::Element(_))))
            .copied()
    }

    /// Concatenated text of a node and its descendants, in document order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        if let NodeType::Text(s) = &node.node_type {
            out.push_str(s);
            return;
        }
        for &child in &node.children {
            self.collect_text(child, out);
        }
    }

    /// Render an indented dump of the tree, for diagnostics and tests.
    ///
    /// Not a serializer: output shape is stable only for debugging.
    #[must_use]
    pub fn to_debug_string(&self) -> String {
        let mut out = String::new();
        self.debug_node(NodeId::ROOT, 0, &mut out);
        out
    }

    fn debug_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        for _ in 0..depth {
            out.push_str("  ");
        }
        match &node.node_type {
            NodeType::Document => out.push_str("#document"),
            NodeType::Doctype(d) => {
                out.push_str("<!DOCTYPE ");
                out.push_str(&d.name);
                if let Some(data) = &d.data {
                    out.push(' ');
                    out.push_str(data);
                }
                out.push('>');
            }
            NodeType::Element(e) => {
                out.push('<');
                out.push_str(&e.tag_name);
                for (name, value) in &e.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(value);
                    out.push('"');
                }
                out.push('>');
            }
            NodeType::Text(s) => {
                out.push('"');
                out.push_str(s);
                out.push('"');
            }
            NodeType::Comment(s) => {
                out.push_str("<!--");
                out.push_str(s);
                out.push_str("-->");
            }
        }
        out.push('\n');
        for &child in &node.children {
            self.debug_node(child, depth + 1, out);
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the ancestors of a node.
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
