//! The rendering pipeline.
//!
//! ```text
//! markup ─► tokens ─► node tree ─┐
//!                                ├─► styled tree ─► render tree ─► layout ─┬─► paint
//! stylesheet ─► rules ───────────┘                                         └─► layers
//! ```
//!
//! Each stage reads only the previous stage's output and builds a new
//! value, so nothing is shared between runs and a run never fails.

use lumen_css::{
    DEFAULT_CONTAINER_WIDTH, DisplayList, Layer, LayoutBox, LayoutEngine, Painter, RenderNode,
    StyledNode, Stylesheet, build_render_tree, classify_layers, compute_styles,
    extract_style_content, parse_stylesheet,
};
use lumen_common::warning::warn_once;
use lumen_dom::DomTree;
use lumen_html::{ParseIssue, Token, TreeBuilder, tokenize};
use serde::Serialize;

use crate::meta::{self, PipelineMeta};

/// Settings that do not come from the sources themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipelineOptions {
    /// Width of the layout container; percentages resolve against it.
    pub container_width: f32,
    /// Also apply the text of `<style>` elements, after the stylesheet.
    pub embedded_styles: bool,
}

impl PipelineOptions {
    /// The container width to lay out against.
    ///
    /// Widths that are not finite and positive fall back to
    /// [`DEFAULT_CONTAINER_WIDTH`].
    #[must_use]
    pub fn effective_container_width(self) -> f32 {
        if self.container_width.is_finite() && self.container_width > 0.0 {
            self.container_width
        } else {
            warn_once(
                "Pipeline",
                &format!(
                    "container width {} is unusable; using {DEFAULT_CONTAINER_WIDTH}",
                    self.container_width
                ),
            );
            DEFAULT_CONTAINER_WIDTH
        }
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            container_width: DEFAULT_CONTAINER_WIDTH,
            embedded_styles: false,
        }
    }
}

/// Everything one run needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineInput {
    /// Markup source.
    pub markup: String,
    /// Stylesheet source; empty for none.
    pub stylesheet: String,
    /// Run settings.
    pub options: PipelineOptions,
}

impl PipelineInput {
    /// Input with markup only and default options.
    #[must_use]
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            ..Self::default()
        }
    }

    /// Set the stylesheet.
    #[must_use]
    pub fn with_stylesheet(mut self, stylesheet: impl Into<String>) -> Self {
        self.stylesheet = stylesheet.into();
        self
    }

    /// Set the container width.
    #[must_use]
    pub fn with_container_width(mut self, container_width: f32) -> Self {
        self.options.container_width = container_width;
        self
    }

    /// Also apply `<style>` elements found in the markup.
    #[must_use]
    pub fn with_embedded_styles(mut self, embedded_styles: bool) -> Self {
        self.options.embedded_styles = embedded_styles;
        self
    }
}

/// Sizes of each stage's output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Tokens produced by the tokenizer.
    pub token_count: usize,
    /// Nodes in the node tree, document included.
    pub dom_node_count: usize,
    /// Rules in the stylesheet.
    pub css_rule_count: usize,
    /// Nodes in the render tree; 0 without one.
    pub render_node_count: usize,
    /// Paint commands generated.
    pub paint_command_count: usize,
    /// Layers, root included; 0 without a render tree.
    pub layer_count: usize,
}

/// The output of every stage of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineResult {
    /// Tokens in source order.
    pub tokens: Vec<Token>,
    /// The node tree.
    pub dom: DomTree,
    /// Problems the tree builder recovered from.
    pub parse_issues: Vec<ParseIssue>,
    /// Parsed rules.
    pub rules: Stylesheet,
    /// Computed styles, one per node.
    pub styled: StyledNode,
    /// Nodes that produce boxes.
    pub render: Option<RenderNode>,
    /// Box geometry, when there is a render tree.
    pub layout: Option<LayoutBox>,
    /// Paint commands in painting order.
    pub paint: DisplayList,
    /// Compositing layers, root first.
    pub layers: Vec<Layer>,
    /// Per-stage rationale and reasons.
    pub meta: PipelineMeta,
    /// Output sizes.
    pub stats: PipelineStats,
}

impl PipelineResult {
    /// The layout box a layer is anchored to.
    #[must_use]
    pub fn layer_box(&self, layer: &Layer) -> Option<&LayoutBox> {
        self.layout.as_ref()?.find(layer.node_id)
    }

    /// The whole result as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Run every stage on `input`.
#[must_use]
pub fn run_pipeline(input: &PipelineInput) -> PipelineResult {
    let options = input.options;
    let mut steps = Vec::new();

    // Tokenize markup
    let tokens = tokenize(&input.markup);
    steps.push(meta::tokenize_step(tokens.len()));

    // Build the node tree
    let (dom, parse_issues) = TreeBuilder::new(&tokens).run_with_issues();
    steps.push(meta::build_dom_step(dom.len()));

    // Parse CSS (embedded styles come after the stylesheet)
    let mut rules = if input.stylesheet.trim().is_empty() {
        Stylesheet::default()
    } else {
        parse_stylesheet(&input.stylesheet)
    };
    if options.embedded_styles {
        rules.extend(parse_stylesheet(&extract_style_content(&dom)));
    }
    if !rules.is_empty() {
        steps.push(meta::parse_css_step(rules.len()));
    }

    // Compute styles
    let styled = compute_styles(&dom, &rules);
    steps.push(meta::compute_style_step());

    // Filter to the render tree
    let (render, filter_reasons) = build_render_tree(&dom, &styled);
    let render_node_count = render.as_ref().map_or(0, RenderNode::count);
    steps.push(meta::render_tree_step(
        styled.count(),
        render_node_count,
        &filter_reasons,
    ));

    // Layout, paint, and composite need a render tree
    let mut layout = None;
    let mut paint = DisplayList::new();
    let mut layers = Vec::new();
    let mut layer_reasons = Vec::new();
    if let Some(render_root) = &render {
        let root_box = LayoutEngine::new(options.effective_container_width()).layout(render_root);
        steps.push(meta::layout_step());

        paint = Painter::new().paint(&root_box);
        steps.push(meta::paint_step(paint.len()));

        layers = classify_layers(&root_box);
        layer_reasons = meta::layer_reasons(&layers);
        steps.push(meta::composite_step(layers.len(), &layer_reasons));

        layout = Some(root_box);
    }

    let stats = PipelineStats {
        token_count: tokens.len(),
        dom_node_count: dom.len(),
        css_rule_count: rules.len(),
        render_node_count,
        paint_command_count: paint.len(),
        layer_count: layers.len(),
    };

    PipelineResult {
        tokens,
        dom,
        parse_issues,
        rules,
        styled,
        render,
        layout,
        paint,
        layers,
        meta: PipelineMeta {
            steps,
            filter_reasons,
            layer_reasons,
        },
        stats,
    }
}

/// Chainable front end to [`run_pipeline`].
///
/// ```
/// use lumen_browser::Pipeline;
///
/// let result = Pipeline::new()
///     .markup(r#"<div class="a">hi</div>"#)
///     .stylesheet(".a { color: blue }")
///     .container_width(640.0)
///     .run();
/// assert_eq!(result.stats.css_rule_count, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    input: PipelineInput,
}

impl Pipeline {
    /// A pipeline with empty sources and default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the markup source.
    #[must_use]
    pub fn markup(mut self, markup: impl Into<String>) -> Self {
        self.input.markup = markup.into();
        self
    }

    /// Set the stylesheet source.
    #[must_use]
    pub fn stylesheet(mut self, stylesheet: impl Into<String>) -> Self {
        self.input.stylesheet = stylesheet.into();
        self
    }

    /// Set the container width.
    #[must_use]
    pub fn container_width(mut self, container_width: f32) -> Self {
        self.input.options.container_width = container_width;
        self
    }

    /// Also apply `<style>` elements found in the markup.
    #[must_use]
    pub fn embedded_styles(mut self, embedded_styles: bool) -> Self {
        self.input.options.embedded_styles = embedded_styles;
        self
    }

    /// The input this pipeline will run on.
    #[must_use]
    pub const fn input(&self) -> &PipelineInput {
        &self.input
    }

    /// Run every stage.
    #[must_use]
    pub fn run(&self) -> PipelineResult {
        run_pipeline(&self.input)
    }

    /// Run every stage and return the result as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        self.run().to_json()
    }
}

impl From<PipelineInput> for Pipeline {
    fn from(input: PipelineInput) -> Self {
        Self { input }
    }
}
