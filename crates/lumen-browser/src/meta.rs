//! Per-stage rationale.
//!
//! Each executed stage leaves a [`StepMeta`] saying what it produced and
//! why the stage exists. Filter and layer reasons explain the two places
//! where content visibly drops out or splits off.

use lumen_css::{FilterReason, Layer, LayerTrigger};
use lumen_dom::NodeId;
use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PipelineStage {
    /// Markup to tokens.
    Tokenize,
    /// Tokens to node tree.
    BuildDom,
    /// Stylesheet text to rules. Skipped when there are no rules.
    ParseCss,
    /// Cascade and inheritance.
    ComputeStyle,
    /// Visibility filtering.
    BuildRenderTree,
    /// Box geometry. Skipped when there is no render tree.
    Layout,
    /// Paint commands. Skipped when there is no render tree.
    Paint,
    /// Layer classification. Skipped when there is no render tree.
    Composite,
}

/// What one stage did and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepMeta {
    /// The stage this describes.
    pub stage: PipelineStage,
    /// What the stage produced, with counts.
    pub action: String,
    /// Why the stage exists.
    pub reason: String,
    /// Nodes the stage singled out, by display name.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub affected_nodes: Vec<String>,
    /// Background on how browsers perform the stage.
    pub explanation: String,
}

/// Why a box was promoted to its own layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerReason {
    /// The promoted node.
    pub node_id: NodeId,
    /// The layer's id.
    pub layer_id: String,
    /// Tag name, or `text`.
    pub node_name: String,
    /// The triggering declaration, e.g. `transform: rotate(5deg)`.
    pub trigger: String,
    /// Which trigger fired.
    pub kind: LayerTrigger,
    /// Why that trigger promotes.
    pub explanation: String,
}

/// All rationale gathered during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineMeta {
    /// One record per executed stage, in execution order.
    pub steps: Vec<StepMeta>,
    /// Roots of the subtrees left out of the render tree.
    pub filter_reasons: Vec<FilterReason>,
    /// Every promoted layer except the root.
    pub layer_reasons: Vec<LayerReason>,
}

/// Explain every layer except the root.
#[must_use]
pub fn layer_reasons(layers: &[Layer]) -> Vec<LayerReason> {
    layers
        .iter()
        .filter(|layer| layer.trigger != LayerTrigger::Root)
        .map(|layer| LayerReason {
            node_id: layer.node_id,
            layer_id: layer.id.clone(),
            node_name: layer.name.clone(),
            trigger: layer.reason.clone(),
            kind: layer.trigger,
            explanation: layer.trigger.explanation().to_string(),
        })
        .collect()
}

fn step(stage: PipelineStage, action: String, reason: &str, explanation: &str) -> StepMeta {
    StepMeta {
        stage,
        action,
        reason: reason.to_string(),
        affected_nodes: Vec::new(),
        explanation: explanation.to_string(),
    }
}

pub(crate) fn tokenize_step(token_count: usize) -> StepMeta {
    step(
        PipelineStage::Tokenize,
        format!("split the markup into {token_count} tokens"),
        "Lexing turns a character stream into tags, attributes, and text.",
        "The tokenizer scans the markup once, picking a scanner from the next few characters.",
    )
}

pub(crate) fn build_dom_step(node_count: usize) -> StepMeta {
    step(
        PipelineStage::BuildDom,
        format!("built a node tree of {node_count} nodes"),
        "The flat token stream becomes a tree with parent and child links.",
        "A stack of open elements tracks nesting: start tags push, end tags pop back to their match.",
    )
}

pub(crate) fn parse_css_step(rule_count: usize) -> StepMeta {
    step(
        PipelineStage::ParseCss,
        format!("parsed {rule_count} style rules"),
        "Stylesheet text becomes structured rules that can be matched against nodes.",
        "Each rule keeps its selector, its declarations in order, and the selector's specificity.",
    )
}

pub(crate) fn compute_style_step() -> StepMeta {
    step(
        PipelineStage::ComputeStyle,
        "matched style rules against every node".to_string(),
        "Each node needs one final value per property before it can be laid out.",
        "Matching rules apply in ascending specificity, later rules winning ties; elements inherit color and font properties from their parent.",
    )
}

pub(crate) fn render_tree_step(
    total_nodes: usize,
    rendered_nodes: usize,
    filter_reasons: &[FilterReason],
) -> StepMeta {
    let filtered = format!(
        "{} nodes were filtered as invisible or non-visual",
        total_nodes.saturating_sub(rendered_nodes)
    );
    let mut meta = step(
        PipelineStage::BuildRenderTree,
        format!("kept {rendered_nodes} of {total_nodes} nodes for rendering"),
        &filtered,
        "The render tree is the styled tree minus what cannot occupy space: display: none subtrees, <head>, <script>, and similar tags.",
    );
    meta.affected_nodes = filter_reasons
        .iter()
        .map(|reason| reason.node_name.clone())
        .collect();
    meta
}

pub(crate) fn layout_step() -> StepMeta {
    step(
        PipelineStage::Layout,
        "computed the position and size of every box".to_string(),
        "Painting needs exact geometry for each element.",
        "Each box is content plus padding, border, and margin; blocks fill their parent's width and stack vertically.",
    )
}

pub(crate) fn paint_step(command_count: usize) -> StepMeta {
    step(
        PipelineStage::Paint,
        format!("generated {command_count} paint commands"),
        "Geometry becomes concrete drawing operations.",
        "Each box paints background, then border, then its children, then its own text, so later commands cover earlier ones.",
    )
}

pub(crate) fn composite_step(layer_count: usize, layer_reasons: &[LayerReason]) -> StepMeta {
    let reason = if layer_count > 1 {
        "Some properties promoted boxes to their own layers."
    } else {
        "All content paints into the root layer."
    };
    let mut meta = step(
        PipelineStage::Composite,
        format!("found {layer_count} layers"),
        reason,
        "Promoted layers are rasterized separately so transform and opacity changes need no relayout or repaint.",
    );
    meta.affected_nodes = layer_reasons
        .iter()
        .map(|reason| reason.node_name.clone())
        .collect();
    meta
}
