//! Compositing layer classification.
//!
//! [§ 9.9 Layered presentation](https://www.w3.org/TR/CSS2/visuren.html#layers)
//!
//! Lists which boxes a compositor would rasterize on their own surface. The
//! list is flat: a root layer for the document, then one layer per
//! promoted box in pre-order. Boxes that are not promoted paint into the
//! layer of their nearest promoted ancestor, which is not modelled here.

use lumen_dom::NodeId;
use serde::Serialize;
use strum_macros::Display;

use crate::layout::{LayoutBox, Rect};
use crate::style::{ComputedStyle, Property, leading_number};

/// Id of the layer that always comes first.
pub const ROOT_LAYER_ID: &str = "root-layer";

/// What caused a layer to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum LayerTrigger {
    /// The document root layer.
    Root,
    /// `transform` other than `none`.
    Transform,
    /// `opacity` below 1.
    Opacity,
    /// `position: fixed`.
    FixedPosition,
    /// `will-change` other than `auto`.
    WillChange,
    /// `filter` other than `none`.
    Filter,
    /// `z-index` on a positioned box, which starts a stacking context.
    ZIndex,
}

impl LayerTrigger {
    /// One-sentence explanation of why the trigger promotes a box.
    #[must_use]
    pub const fn explanation(self) -> &'static str {
        match self {
            Self::Root => "The document always has a root layer that every unpromoted box paints into.",
            Self::Transform => {
                "Transforms are applied by the compositor, so the box can move without repainting."
            }
            Self::Opacity => {
                "Translucent content is blended by the compositor, so opacity changes skip repaint."
            }
            Self::FixedPosition => {
                "Fixed boxes stay put while the page scrolls, so they are kept on their own surface."
            }
            Self::WillChange => {
                "will-change asks for promotion ahead of time so later changes are cheap."
            }
            Self::Filter => "Filters are applied to the rasterized surface of the box.",
            Self::ZIndex => {
                "A positioned box with z-index forms a stacking context painted as one unit."
            }
        }
    }
}

/// A compositing layer.
///
/// Anchored to its box by node id; `bounds` is that box's border box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    /// `root-layer`, or `layer-<node id>`.
    pub id: String,
    /// The node whose box is promoted.
    pub node_id: NodeId,
    /// Tag name, `text` for text boxes, or `Root Layer`.
    pub name: String,
    /// The trigger that fired.
    pub trigger: LayerTrigger,
    /// The triggering declaration, e.g. `opacity: 0.5`.
    pub reason: String,
    /// Border box of the promoted box.
    pub bounds: Rect,
}

/// Classify the layers of a layout tree.
///
/// The first entry is always the root layer, anchored to `root`.
#[must_use]
pub fn classify_layers(root: &LayoutBox) -> Vec<Layer> {
    let mut layers = vec![Layer {
        id: ROOT_LAYER_ID.to_string(),
        node_id: root.node_id,
        name: "Root Layer".to_string(),
        trigger: LayerTrigger::Root,
        reason: "document root layer".to_string(),
        bounds: root.rect,
    }];
    collect_layers(root, &mut layers);
    layers
}

fn collect_layers(layout_box: &LayoutBox, layers: &mut Vec<Layer>) {
    if let Some((trigger, reason)) = promotion(&layout_box.style) {
        layers.push(Layer {
            id: format!("layer-{}", layout_box.node_id),
            node_id: layout_box.node_id,
            name: layout_box
                .tag_name
                .clone()
                .unwrap_or_else(|| "text".to_string()),
            trigger,
            reason,
            bounds: layout_box.rect,
        });
    }
    for child in &layout_box.children {
        collect_layers(child, layers);
    }
}

/// The first trigger, in priority order, that promotes a box with `style`.
#[must_use]
pub fn promotion(style: &ComputedStyle) -> Option<(LayerTrigger, String)> {
    if let Some(transform) = style.get(Property::Transform)
        && transform != "none"
    {
        return Some((LayerTrigger::Transform, format!("transform: {transform}")));
    }
    if let Some(opacity) = style.get(Property::Opacity)
        && leading_number(opacity).is_some_and(|(value, _)| value < 1.0)
    {
        return Some((LayerTrigger::Opacity, format!("opacity: {opacity}")));
    }
    let position = style.get(Property::Position);
    if position == Some("fixed") {
        return Some((LayerTrigger::FixedPosition, "position: fixed".to_string()));
    }
    if let Some(will_change) = style.get(Property::WillChange)
        && will_change != "auto"
    {
        return Some((LayerTrigger::WillChange, format!("will-change: {will_change}")));
    }
    if let Some(filter) = style.get(Property::Filter)
        && filter != "none"
    {
        return Some((LayerTrigger::Filter, format!("filter: {filter}")));
    }
    if let Some(z_index) = style.get(Property::ZIndex)
        && position.is_some_and(|position| position != "static")
    {
        return Some((
            LayerTrigger::ZIndex,
            format!("z-index: {z_index} (stacking context)"),
        ));
    }
    None
}
