//! High-level pipeline API for the Lumen renderer.
//!
//! # Scope
//!
//! This crate provides:
//! - **Pipeline** - runs every stage from markup to layers in one call
//! - **Rationale** - one record per executed stage saying what it did and why
//! - **Reasons** - why nodes left the render tree and why boxes were promoted
//! - **Source Loading** - read markup and stylesheets from disk
//!
//! Every stage is a plain function of the previous stage's output, so a
//! run never fails and never depends on an earlier run.
//!
//! # Not Implemented
//!
//! - Network loading of documents or external stylesheets
//! - Incremental re-rendering of changed subtrees

pub mod meta;
pub mod pipeline;
pub mod source;

pub use lumen_css as css;
pub use lumen_dom as dom;
pub use lumen_html as html;

pub use meta::{LayerReason, PipelineMeta, PipelineStage, StepMeta};
pub use pipeline::{
    Pipeline, PipelineInput, PipelineOptions, PipelineResult, PipelineStats, run_pipeline,
};
pub use source::{LoadError, load_markup, load_stylesheet};
