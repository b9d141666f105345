//! Cascading and style computation per
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/),
//! reduced to one author stylesheet with no `!important`.

use lumen_common::warning::warn_once;
use lumen_dom::{DomTree, NodeId, NodeType};
use serde::Serialize;

use crate::parser::{StyleRule, Stylesheet};
use crate::selector::{ParsedSelector, Specificity, parse_selector};
use crate::style::ComputedStyle;

/// A node of the computed style tree, mirroring the node tree shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledNode {
    /// The node this style belongs to.
    pub node_id: NodeId,
    /// Resolved property values.
    pub style: ComputedStyle,
    /// One entry per child node, in the same order.
    pub children: Vec<StyledNode>,
}

impl StyledNode {
    /// Find the styled node for `node_id` in this subtree.
    #[must_use]
    pub fn find(&self, node_id: NodeId) -> Option<&Self> {
        if self.node_id == node_id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(node_id))
    }

    /// Number of nodes in this subtree.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }
}

/// [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
///
/// A matched rule with its specificity for cascade ordering.
struct MatchedRule<'a> {
    specificity: Specificity,
    rule: &'a StyleRule,
}

/// [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
/// "The cascade takes an unordered list of declared values for a given property
/// on a given element, sorts them by their declaration's precedence..."
///
/// Compute styles for the entire tree given a stylesheet. The returned tree
/// has one styled node per node, starting at the document.
#[must_use]
pub fn compute_styles(tree: &DomTree, stylesheet: &Stylesheet) -> StyledNode {
    // Parse all selectors upfront, keeping source order.
    let parsed_rules: Vec<(ParsedSelector, &StyleRule)> = stylesheet
        .rules
        .iter()
        .filter_map(|rule| {
            let parsed = parse_selector(&rule.selector);
            if parsed.is_none() {
                warn_once("CSS", &format!("failed to parse selector '{}'", rule.selector));
            }
            parsed.map(|selector| (selector, rule))
        })
        .collect();

    compute_node_style(tree, tree.root(), &parsed_rules, &ComputedStyle::default())
}

/// Compute the style of `id` and, recursively, of its children.
fn compute_node_style(
    tree: &DomTree,
    id: NodeId,
    rules: &[(ParsedSelector, &StyleRule)],
    inherited: &ComputedStyle,
) -> StyledNode {
    let is_element = tree
        .get(id)
        .is_some_and(|node| matches!(node.node_type, NodeType::Element(_)));

    let style = if is_element {
        cascade_element(tree, id, rules, inherited)
    } else {
        // Document, text, and comment nodes take the parent style whole.
        inherited.clone()
    };

    let children = tree
        .children(id)
        .iter()
        .map(|&child_id| compute_node_style(tree, child_id, rules, &style))
        .collect();

    StyledNode {
        node_id: id,
        style,
        children,
    }
}

/// [§ 6.4 Cascade Sorting Order](https://www.w3.org/TR/css-cascade-4/#cascade-sort)
fn cascade_element(
    tree: &DomTree,
    id: NodeId,
    rules: &[(ParsedSelector, &StyleRule)],
    inherited: &ComputedStyle,
) -> ComputedStyle {
    // [§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
    let mut computed = ComputedStyle::inherit_from(inherited);

    let mut matched: Vec<MatchedRule<'_>> = rules
        .iter()
        .filter(|(selector, _)| selector.matches_in_tree(tree, id))
        .map(|(selector, rule)| MatchedRule {
            specificity: selector.specificity,
            rule,
        })
        .collect();

    // [§ 6.4.3 Specificity](https://www.w3.org/TR/css-cascade-4/#cascade-specificity)
    // Lowest first so later rules override. The sort is stable, so equal
    // specificity keeps source order.
    matched.sort_by_key(|m| m.specificity);

    for m in matched {
        for declaration in &m.rule.declarations {
            computed.apply_declaration(declaration);
        }
    }
    computed
}
