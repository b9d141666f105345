//! Layout box types and the block layout algorithm.
//!
//! [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)

#[cfg(feature = "layout-trace")]
use std::cell::Cell;

use lumen_dom::NodeId;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::render_tree::RenderNode;
use crate::style::{BoxEdge, ComputedStyle, Side, parse_length};

use super::box_model::{EdgeSizes, Rect};

/// Container width used when none is configured.
pub const DEFAULT_CONTAINER_WIDTH: f32 = 800.0;

/// Content width of a non-block box with no explicit `width`.
pub const INLINE_FALLBACK_WIDTH: f32 = 100.0;

/// Smallest content height of a box with no explicit `height`.
pub const MIN_CONTENT_HEIGHT: f32 = 20.0;

#[cfg(feature = "layout-trace")]
thread_local! {
    static LAYOUT_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// A positioned box.
///
/// `x`/`y` is the border-box corner (already shifted by the margin) and
/// `width`/`height` include padding and border but not margin. All
/// coordinates share one space, so child positions are absolute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutBox {
    /// The node this box was built from.
    pub node_id: NodeId,
    /// Tag name for element boxes.
    pub tag_name: Option<String>,
    /// Content for text boxes.
    pub text: Option<String>,
    /// The computed style of the node.
    pub style: ComputedStyle,
    /// Index of the token the node was created from.
    pub token_index: Option<usize>,
    /// Border box.
    #[serde(flatten)]
    pub rect: Rect,
    /// Resolved margin.
    pub margin: EdgeSizes,
    /// Resolved border widths.
    pub border: EdgeSizes,
    /// Resolved padding.
    pub padding: EdgeSizes,
    /// Child boxes, top to bottom.
    pub children: Vec<LayoutBox>,
}

impl LayoutBox {
    /// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
    ///
    /// "The content box is the innermost box."
    #[must_use]
    pub fn content_box(&self) -> Rect {
        self.rect.inset(&self.border).inset(&self.padding)
    }

    /// The border box expanded by the margin.
    #[must_use]
    pub fn margin_box(&self) -> Rect {
        self.rect.outset(&self.margin)
    }

    /// Tag name, or `#text` for text boxes.
    #[must_use]
    pub fn label(&self) -> &str {
        self.tag_name.as_deref().unwrap_or("#text")
    }

    /// Find the box built from `node_id` in this subtree.
    #[must_use]
    pub fn find(&self, node_id: NodeId) -> Option<&Self> {
        if self.node_id == node_id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(node_id))
    }

    /// Number of boxes in this subtree.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }
}

/// Computes box geometry for a render tree.
///
/// Holds only the container width percentages resolve against, so one
/// engine can lay out any number of trees, from any thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEngine {
    container_width: f32,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER_WIDTH)
    }
}

impl LayoutEngine {
    /// Create an engine for the given container width.
    #[must_use]
    pub const fn new(container_width: f32) -> Self {
        Self { container_width }
    }

    /// The width percentages resolve against.
    #[must_use]
    pub const fn container_width(&self) -> f32 {
        self.container_width
    }

    /// Lay out `root` at the origin with the full container width available.
    #[must_use]
    pub fn layout(&self, root: &RenderNode) -> LayoutBox {
        self.layout_node(root, 0.0, 0.0, self.container_width)
    }

    /// [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
    ///
    /// "In a block formatting context, boxes are laid out one after the
    /// other, vertically, beginning at the top of a containing block."
    ///
    /// `x`/`y` is the margin-box corner offered by the parent.
    fn layout_node(&self, node: &RenderNode, x: f32, y: f32, available_width: f32) -> LayoutBox {
        #[cfg(feature = "layout-trace")]
        let depth = LAYOUT_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });

        let style = &node.style;
        let margin = self.resolve_edges(style, BoxEdge::Margin);
        let border = self.resolve_edges(style, BoxEdge::Border);
        let padding = self.resolve_edges(style, BoxEdge::Padding);

        let content_width = self.content_width(style, available_width, &margin, &border, &padding);

        // STEP 1: Stack children inside the content box.
        let content_x = x + margin.left + border.left + padding.left;
        let content_y = y + margin.top + border.top + padding.top;
        let mut cursor_y = content_y;
        let mut children = Vec::with_capacity(node.children.len());
        for child in &node.children {
            let child_box = self.layout_node(child, content_x, cursor_y, content_width);
            cursor_y += child_box.rect.height + child_box.margin.top + child_box.margin.bottom;
            children.push(child_box);
        }

        // STEP 2: Height follows from the children unless set explicitly.
        let content_height = self.content_height(style, cursor_y - content_y);

        let rect = Rect {
            x: x + margin.left,
            y: y + margin.top,
            width: content_width + padding.horizontal() + border.horizontal(),
            height: content_height + padding.vertical() + border.vertical(),
        };

        #[cfg(feature = "layout-trace")]
        {
            LAYOUT_DEPTH.with(|d| d.set(depth));
            eprintln!(
                "[LAYOUT] {}{} x={} y={} w={} h={}",
                "  ".repeat(depth),
                node.tag_name.as_deref().unwrap_or("#text"),
                rect.x,
                rect.y,
                rect.width,
                rect.height
            );
        }

        LayoutBox {
            node_id: node.node_id,
            tag_name: node.tag_name.clone(),
            text: node.text.clone(),
            style: style.clone(),
            token_index: node.token_index,
            rect,
            margin,
            border,
            padding,
            children,
        }
    }

    /// A shorthand applies its one length to all four sides; otherwise each
    /// side reads its own property and defaults to 0.
    fn resolve_edges(&self, style: &ComputedStyle, edge: BoxEdge) -> EdgeSizes {
        if let Some(shorthand) = style.edge_shorthand(edge) {
            return EdgeSizes::uniform(parse_length(shorthand, self.container_width));
        }

        let mut sizes = EdgeSizes::default();
        for side in Side::iter() {
            let value = style
                .edge_side(edge, side)
                .map_or(0.0, |value| parse_length(value, self.container_width));
            match side {
                Side::Top => sizes.top = value,
                Side::Right => sizes.right = value,
                Side::Bottom => sizes.bottom = value,
                Side::Left => sizes.left = value,
            }
        }
        sizes
    }

    /// [§ 10.3.3](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
    ///
    /// An explicit width wins. A block fills what its parent offers minus
    /// its own margin, border, and padding. Anything else gets a fixed
    /// fallback.
    fn content_width(
        &self,
        style: &ComputedStyle,
        available_width: f32,
        margin: &EdgeSizes,
        border: &EdgeSizes,
        padding: &EdgeSizes,
    ) -> f32 {
        match style.width() {
            Some(width) if width != "auto" => parse_length(width, self.container_width),
            _ if style.display().unwrap_or("block") == "block" => {
                available_width - margin.horizontal() - padding.horizontal() - border.horizontal()
            }
            _ => INLINE_FALLBACK_WIDTH,
        }
    }

    /// [§ 10.6.3 Block-level non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#normal-block)
    fn content_height(&self, style: &ComputedStyle, children_height: f32) -> f32 {
        match style.height() {
            Some(height) if height != "auto" => parse_length(height, self.container_width),
            _ => children_height.max(MIN_CONTENT_HEIGHT),
        }
    }
}
