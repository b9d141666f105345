//! Tree builder module.

/// Stack-based tree construction.
pub mod builder;

pub use builder::{MAX_TREE_DEPTH, ParseIssue, TreeBuilder, print_tree};
