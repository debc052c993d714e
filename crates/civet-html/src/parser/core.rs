use civet_common::warning::warn_once;
use civet_dom::{DoctypeData, DomTree, ElementData, NodeId, NodeType};

use crate::tokenizer::Token;

/// A recoverable problem the tree builder noticed and absorbed.
///
/// Issues never change the result: the builder always produces a tree.
#[derive(Debug, Clone)]
pub struct ParseIssue {
    /// Description of what was tolerated.
    pub message: String,
    /// Index into the token stream where it happened.
    pub token_index: usize,
}

/// Elements whose HTML syntax forbids an end tag; they never get children
/// and are never pushed onto the stack of open elements.
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Builds a document tree from a stream of tokens.
///
/// The stack of open elements always has the document node at position 0.
/// Adjacent character tokens coalesce into a pending text buffer that is
/// flushed as a single text node when any other token arrives; empty runs
/// never produce a node.
pub struct TreeBuilder {
    /// The tree under construction. `NodeId::ROOT` is the document node.
    tree: DomTree,

    /// The stack of open elements, rooted at the document node. Grows on
    /// non-void start tags, shrinks on end tags and at finalization.
    open_elements: Vec<NodeId>,

    /// Coalesced character data awaiting a flush into a text node.
    pending_text: String,

    /// Input tokens from the tokenizer.
    tokens: Vec<Token>,

    /// Current position in the token stream.
    token_index: usize,

    /// Problems absorbed along the way.
    issues: Vec<ParseIssue>,
}

impl TreeBuilder {
    /// Create a builder over a token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tree: DomTree::new(),
            open_elements: vec![NodeId::ROOT],
            pending_text: String::new(),
            tokens,
            token_index: 0,
            issues: Vec::new(),
        }
    }

    /// Consume the tokens and return the finished tree.
    #[must_use]
    pub fn run(self) -> DomTree {
        self.run_with_issues().0
    }

    /// Consume the tokens and return the finished tree together with the
    /// issues absorbed while building it.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        while self.token_index < self.tokens.len() {
            let token = self.tokens[self.token_index].clone();
            self.process_token(token);
            self.token_index += 1;
        }
        self.finalize();
        (self.tree, self.issues)
    }

    fn process_token(&mut self, token: Token) {
        match token {
            Token::Character { data } => {
                self.pending_text.push(data);
            }
            Token::StartTag {
                name,
                self_closing,
                attributes,
                ..
            } => {
                self.flush_pending_text();
                let attrs = attributes
                    .into_iter()
                    .map(|attr| (attr.name, attr.value))
                    .collect();
                let element = self.tree.alloc(NodeType::Element(ElementData {
                    tag_name: name.clone(),
                    attrs,
                    self_closing,
                }));
                self.tree.append_child(self.current_parent(), element);
                // Void and self-closed elements never open; everything else
                // becomes the new current parent.
                if !(self_closing || is_void_element(&name)) {
                    self.open_elements.push(element);
                }
            }
            Token::EndTag { name } => {
                self.flush_pending_text();
                if self.open_elements.len() <= 1 {
                    self.record_issue(format!("ignored end tag </{name}> with nothing open"));
                    return;
                }
                // No scope matching: an end tag closes the innermost open
                // element whatever its name.
                let closed = self.open_elements.pop();
                let closed_tag = closed
                    .and_then(|id| self.tree.as_element(id))
                    .map(|element| element.tag_name.clone());
                if let Some(tag) = closed_tag
                    && tag != name
                {
                    self.record_issue(format!("end tag </{name}> closed <{tag}>"));
                }
            }
            Token::Comment { data } => {
                self.flush_pending_text();
                let comment = self.tree.alloc(NodeType::Comment(data));
                self.tree.append_child(self.current_parent(), comment);
            }
            Token::Doctype {
                name,
                data,
                force_quirks,
            } => {
                self.flush_pending_text();
                let doctype = self.tree.alloc(NodeType::Doctype(DoctypeData {
                    name,
                    data,
                    force_quirks,
                }));
                self.tree.append_child(self.current_parent(), doctype);
            }
            Token::EndOfFile => {
                self.finalize();
            }
        }
    }

    /// Flush remaining text and close every open element. Safe to run more
    /// than once.
    fn finalize(&mut self) {
        self.flush_pending_text();
        while self.open_elements.len() > 1 {
            self.open_elements.pop();
        }
    }

    /// "The current node is the bottommost node in this stack of open
    /// elements."
    fn current_parent(&self) -> NodeId {
        *self
            .open_elements
            .last()
            .expect("stack of open elements always holds the document node")
    }

    /// Turn the pending character run into a text node under the current
    /// parent. Empty runs produce nothing.
    fn flush_pending_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending_text);
        let node = self.tree.alloc(NodeType::Text(text));
        self.tree.append_child(self.current_parent(), node);
    }

    fn record_issue(&mut self, message: String) {
        warn_once("Tree Builder", &message);
        self.issues.push(ParseIssue {
            message,
            token_index: self.token_index,
        });
    }
}
