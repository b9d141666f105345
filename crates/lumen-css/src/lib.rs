//! Stylesheet parsing, cascade, render tree, layout, paint, and layer
//! classification for the Lumen rendering pipeline.
//!
//! # Scope
//!
//! This crate implements, in pipeline order:
//! - **Stylesheet Parser** - rules with raw selector text, ordered
//!   declarations, and a specificity computed from the selector text
//! - **Selectors** - compound selectors (type, id, classes) joined by
//!   descendant combinators, matched right to left
//! - **Cascade** - per-node computed styles: inherited subset, then matched
//!   rules in ascending specificity, source order breaking ties
//! - **Render Tree** - drops comments, non-visual tags, `display: none`
//!   subtrees, and empty text, recording why
//! - **Layout** - block-flow box model against a container width
//! - **Paint** - background, border, children, text, in that fixed order
//! - **Composite** - which boxes are promoted to their own layer
//!
//! # Not Implemented
//!
//! - Combinators other than descendant; attribute and pseudo-class matching
//! - Inline, float, flex, and grid layout; text shaping and wrapping
//! - Inline `style` attributes (the inline specificity slot stays 0)

/// Cascade and computed style tree.
pub mod cascade;
/// Compositing layer classification.
pub mod composite;
/// Box model and block layout.
pub mod layout;
/// Paint command generation.
pub mod paint;
/// Stylesheet parser.
pub mod parser;
/// Render tree filtering.
pub mod render_tree;
/// Selector parsing, matching, and specificity.
pub mod selector;
/// Computed style representation and value parsing.
pub mod style;

// Re-exports for convenience
pub use cascade::{StyledNode, compute_styles};
pub use composite::{Layer, LayerTrigger, ROOT_LAYER_ID, classify_layers, promotion};
pub use layout::{DEFAULT_CONTAINER_WIDTH, EdgeSizes, LayoutBox, LayoutEngine, Rect};
pub use paint::{DisplayList, PaintCommand, PaintKind, Painter};
pub use parser::{CSSParser, Declaration, StyleRule, Stylesheet, parse_stylesheet};
pub use render_tree::{
    DOCUMENT_TAG, FilterReason, FilterReasonKind, NON_VISUAL_TAGS, RenderNode, build_render_tree,
};
pub use selector::{CompoundSelector, ParsedSelector, Specificity, parse_selector};
pub use style::{BoxEdge, ComputedStyle, INHERITED_PROPERTIES, Property, Side, parse_length};

use lumen_dom::{DomTree, NodeId};

/// Extract CSS text from all `<style>` elements in the tree, in document
/// order, one block per line.
#[must_use]
pub fn extract_style_content(tree: &DomTree) -> String {
    let mut css = String::new();
    for id in tree.iter_all() {
        if tree.tag_name(id) == Some("style") {
            collect_text_children(tree, id, &mut css);
        }
    }
    css
}

fn collect_text_children(tree: &DomTree, id: NodeId, css: &mut String) {
    for &child_id in tree.children(id) {
        if let Some(text) = tree.as_text(child_id) {
            css.push_str(text);
            css.push('\n');
        }
    }
}
