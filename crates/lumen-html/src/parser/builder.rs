use lumen_common::warning::warn_once;
use lumen_dom::{DomTree, ElementData, NodeId, NodeType};
use serde::Serialize;

use crate::tokenizer::{Token, TokenKind};

/// Deepest element nesting the builder will produce.
///
/// Start tags opened below this depth still become elements but are not
/// pushed, so later content becomes their sibling. Every later stage walks
/// the tree recursively and relies on this bound.
pub const MAX_TREE_DEPTH: usize = 512;

/// A problem the tree builder recovered from.
///
/// Nothing here aborts the build; issues exist so callers can explain why
/// the tree looks the way it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseIssue {
    /// Human-readable description.
    pub message: String,
    /// Index into the token stream where this issue was encountered.
    pub token_index: usize,
    /// True for malformed input (an end tag closing nothing); false for
    /// informational notes such as elements left open at end of input.
    pub is_error: bool,
}

/// Builds a [`DomTree`] from a token stream using a stack of open elements.
///
/// The stack starts with the synthetic document root, which is never popped.
/// Each build owns its own tree, so node identifiers are scoped to one call
/// and independent builds never interleave them.
pub struct TreeBuilder<'a> {
    tokens: &'a [Token],

    /// Stores `NodeId`s into the arena. Index 0 is always the document.
    stack_of_open_elements: Vec<NodeId>,

    tree: DomTree,

    issues: Vec<ParseIssue>,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder over `tokens`.
    #[must_use]
    pub fn new(tokens: &'a [Token]) -> Self {
        let tree = DomTree::new();
        Self {
            tokens,
            stack_of_open_elements: vec![tree.root()],
            tree,
            issues: Vec::new(),
        }
    }

    /// Build the tree, discarding recovery notes.
    #[must_use]
    pub fn run(self) -> DomTree {
        self.run_with_issues().0
    }

    /// Build the tree and return it with every issue recovered from.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        let tokens = self.tokens;
        for (index, token) in tokens.iter().enumerate() {
            self.process_token(index, token);
        }

        // Unclosed elements simply stay open; note them for diagnosability.
        let open = self.stack_of_open_elements.len() - 1;
        if open > 0 {
            let names: Vec<&str> = self.stack_of_open_elements[1..]
                .iter()
                .filter_map(|&id| self.tree.tag_name(id))
                .collect();
            self.issues.push(ParseIssue {
                message: format!(
                    "{open} element(s) left open at end of input: {}",
                    names.join(", ")
                ),
                token_index: tokens.len().saturating_sub(1),
                is_error: false,
            });
        }

        (self.tree, self.issues)
    }

    fn current_node(&self) -> NodeId {
        self.stack_of_open_elements
            .last()
            .copied()
            .unwrap_or(NodeId::ROOT)
    }

    fn process_token(&mut self, index: usize, token: &Token) {
        match &token.kind {
            // Informational only, not represented as a node.
            TokenKind::Doctype { .. } => {}
            TokenKind::StartTag { name, attributes } => {
                let id = self.insert_node(
                    NodeType::Element(ElementData {
                        tag_name: name.clone(),
                        attrs: attributes.clone(),
                    }),
                    index,
                );
                // The root sits at the bottom of the stack and is not counted.
                if self.stack_of_open_elements.len() > MAX_TREE_DEPTH {
                    warn_once("HTML", "nesting limit reached; deeper start tags are not kept open");
                    self.issues.push(ParseIssue {
                        message: format!(
                            "<{name}> opened beyond nesting depth {MAX_TREE_DEPTH} and was not kept open"
                        ),
                        token_index: index,
                        is_error: false,
                    });
                } else {
                    self.stack_of_open_elements.push(id);
                }
            }
            TokenKind::SelfClosingTag { name, attributes } => {
                let _ = self.insert_node(
                    NodeType::Element(ElementData {
                        tag_name: name.clone(),
                        attrs: attributes.clone(),
                    }),
                    index,
                );
            }
            TokenKind::EndTag { name } => self.close_element(name, index),
            TokenKind::Text { content } => {
                let _ = self.insert_node(NodeType::Text(content.clone()), index);
            }
            TokenKind::Comment { content } => {
                let _ = self.insert_node(NodeType::Comment(content.clone()), index);
            }
        }
    }

    /// Create a node and append it as the last child of the current node.
    fn insert_node(&mut self, node_type: NodeType, token_index: usize) -> NodeId {
        let parent = self.current_node();
        let id = self.tree.alloc(node_type, Some(token_index));
        self.tree.append_child(parent, id);
        id
    }

    /// Pop up to and including the nearest open element named `name`.
    ///
    /// The root is never searched. An end tag that matches nothing leaves
    /// the stack untouched.
    fn close_element(&mut self, name: &str, token_index: usize) {
        let matched = self
            .stack_of_open_elements
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .find(|&(_, &id)| self.tree.tag_name(id) == Some(name))
            .map(|(depth, _)| depth);

        if let Some(depth) = matched {
            self.stack_of_open_elements.truncate(depth);
        } else {
            warn_once("HTML", &format!("ignored end tag </{name}> with no open element"));
            self.issues.push(ParseIssue {
                message: format!("end tag </{name}> matches no open element and was ignored"),
                token_index,
                is_error: true,
            });
        }
    }
}

/// Print a tree with two-space indentation per level.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    if let Some(node) = tree.get(id) {
        match &node.node_type {
            NodeType::Document => {
                println!("{prefix}#document");
            }
            NodeType::Element(data) => {
                if data.attrs.is_empty() {
                    println!("{prefix}<{}>", data.tag_name);
                } else {
                    let attrs: Vec<String> = data
                        .attrs
                        .iter()
                        .map(|(k, v)| {
                            if v.is_empty() {
                                k.clone()
                            } else {
                                format!("{k}=\"{v}\"")
                            }
                        })
                        .collect();
                    println!("{prefix}<{} {}>", data.tag_name, attrs.join(" "));
                }
            }
            NodeType::Text(data) => {
                let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
                println!("{prefix}\"{display}\"");
            }
            NodeType::Comment(data) => {
                println!("{prefix}<!-- {data} -->");
            }
        }
        for &child_id in tree.children(id) {
            print_tree(tree, child_id, indent + 1);
        }
    }
}
