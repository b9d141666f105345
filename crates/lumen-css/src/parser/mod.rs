//! Stylesheet parser.

mod stylesheet;

pub use stylesheet::{CSSParser, Declaration, StyleRule, Stylesheet, parse_stylesheet};
