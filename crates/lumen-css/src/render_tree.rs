//! Render tree construction.
//!
//! The render tree keeps only what produces boxes: elements and non-blank
//! text that are not hidden. Everything dropped at the root of a pruned
//! subtree is recorded with the reason it was dropped.

use lumen_dom::{DomTree, NodeId, NodeType};
use serde::Serialize;
use strum_macros::Display;

use crate::cascade::StyledNode;
use crate::style::ComputedStyle;

/// Elements that never render, whatever their style.
pub const NON_VISUAL_TAGS: [&str; 6] = ["head", "script", "style", "meta", "link", "title"];

/// Tag name given to the synthetic root wrapping a document with no `html`.
pub const DOCUMENT_TAG: &str = "#document";

/// A node that will produce a box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderNode {
    /// The node this was built from.
    pub node_id: NodeId,
    /// Tag name for elements; [`DOCUMENT_TAG`] for a synthetic root.
    pub tag_name: Option<String>,
    /// Content for text nodes.
    pub text: Option<String>,
    /// The computed style of the node.
    pub style: ComputedStyle,
    /// Index of the token the node was created from.
    pub token_index: Option<usize>,
    /// Surviving children, in order. Text nodes have none.
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    /// True for text nodes.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        self.text.is_some()
    }

    /// Tag name, or `#text` for text nodes.
    #[must_use]
    pub fn label(&self) -> &str {
        self.tag_name.as_deref().unwrap_or("#text")
    }

    /// Number of nodes in this subtree.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }
}

/// Why a node was left out of the render tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FilterReasonKind {
    /// Computed `display` is `none`.
    DisplayNone,
    /// The element is one of [`NON_VISUAL_TAGS`].
    NonVisualTag,
    /// A text node containing only whitespace.
    EmptyText,
}

/// A record of one pruned subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterReason {
    /// The root of the pruned subtree.
    pub node_id: NodeId,
    /// Tag name, or the first characters of a text node.
    pub node_name: String,
    /// Why it was pruned.
    pub reason: FilterReasonKind,
    /// One-sentence explanation for display.
    pub explanation: String,
}

/// Build the render tree from the styled tree.
///
/// Returns `None` for the tree when nothing renders, along with the reasons
/// recorded for every pruned subtree root, in document order.
///
/// When the document has an `html` child, the root is its `body` child, or
/// the `html` node itself when there is no `body`. Otherwise a synthetic
/// [`DOCUMENT_TAG`] root holds the surviving top-level nodes.
#[must_use]
pub fn build_render_tree(
    tree: &DomTree,
    styled: &StyledNode,
) -> (Option<RenderNode>, Vec<FilterReason>) {
    let mut builder = RenderTreeBuilder {
        tree,
        reasons: Vec::new(),
    };
    let root = builder.build(styled);
    (root, builder.reasons)
}

struct RenderTreeBuilder<'a> {
    tree: &'a DomTree,
    reasons: Vec<FilterReason>,
}

impl RenderTreeBuilder<'_> {
    fn build(&mut self, styled: &StyledNode) -> Option<RenderNode> {
        let node = self.tree.get(styled.node_id)?;

        let tag_name = match &node.node_type {
            NodeType::Comment(_) => return None,
            NodeType::Element(data) => {
                if NON_VISUAL_TAGS.contains(&data.tag_name.as_str()) {
                    self.record(
                        styled.node_id,
                        data.tag_name.clone(),
                        FilterReasonKind::NonVisualTag,
                        format!(
                            "<{}> holds metadata, scripts, or style definitions and produces no rendered content.",
                            data.tag_name
                        ),
                    );
                    return None;
                }
                Some(data.tag_name.clone())
            }
            NodeType::Document | NodeType::Text(_) => None,
        };

        if styled.style.is_display_none() {
            let name = tag_name.clone().unwrap_or_else(|| node_name(self.tree, styled.node_id));
            self.record(
                styled.node_id,
                name,
                FilterReasonKind::DisplayNone,
                "display: none removes the element and its subtree entirely; unlike visibility: hidden it occupies no space.".to_string(),
            );
            return None;
        }

        if let NodeType::Text(text) = &node.node_type {
            if text.trim().is_empty() {
                self.record(
                    styled.node_id,
                    "(whitespace text)".to_string(),
                    FilterReasonKind::EmptyText,
                    "Whitespace-only text is ignored unless white-space preserves it.".to_string(),
                );
                return None;
            }
            return Some(RenderNode {
                node_id: styled.node_id,
                tag_name: None,
                text: Some(text.clone()),
                style: styled.style.clone(),
                token_index: node.token_index,
                children: Vec::new(),
            });
        }

        let children: Vec<RenderNode> = styled
            .children
            .iter()
            .filter_map(|child| self.build(child))
            .collect();

        if matches!(node.node_type, NodeType::Document) {
            return Some(unwrap_document(styled, children));
        }

        Some(RenderNode {
            node_id: styled.node_id,
            tag_name,
            text: None,
            style: styled.style.clone(),
            token_index: node.token_index,
            children,
        })
    }

    fn record(
        &mut self,
        node_id: NodeId,
        node_name: String,
        reason: FilterReasonKind,
        explanation: String,
    ) {
        self.reasons.push(FilterReason {
            node_id,
            node_name,
            reason,
            explanation,
        });
    }
}

/// Pick the render root among the document's surviving children.
fn unwrap_document(styled: &StyledNode, mut children: Vec<RenderNode>) -> RenderNode {
    if let Some(position) = children
        .iter()
        .position(|child| child.tag_name.as_deref() == Some("html"))
    {
        let html = children.swap_remove(position);
        if let Some(body_position) = html
            .children
            .iter()
            .position(|child| child.tag_name.as_deref() == Some("body"))
        {
            let mut html_children = html.children;
            return html_children.swap_remove(body_position);
        }
        return html;
    }

    RenderNode {
        node_id: styled.node_id,
        tag_name: Some(DOCUMENT_TAG.to_string()),
        text: None,
        style: styled.style.clone(),
        token_index: None,
        children,
    }
}

/// Tag name, or the first 20 characters of a text node.
fn node_name(tree: &DomTree, node_id: NodeId) -> String {
    if let Some(tag_name) = tree.tag_name(node_id) {
        return tag_name.to_string();
    }
    tree.as_text(node_id).map_or_else(
        || "unknown".to_string(),
        |text| text.chars().take(20).collect(),
    )
}
