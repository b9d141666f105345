//! Selector parsing, matching, and specificity per
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/), reduced to
//! compound selectors joined by descendant combinators.
//!
//! Selector text is scanned twice for different purposes:
//! [`Specificity::of`] counts every selector component it recognizes, while
//! [`parse_selector`] keeps only the parts matching understands (type, one
//! id, classes). Attribute selectors and pseudo-classes raise specificity
//! but never constrain a match.

use lumen_dom::{DomTree, NodeId};
use serde::Serialize;

/// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
///
/// `(inline, ids, classes, types)`, compared lexicographically. The inline
/// slot is always 0 since inline `style` attributes are not read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Specificity(pub u32, pub u32, pub u32, pub u32);

impl Specificity {
    /// Create a specificity from its four components.
    #[must_use]
    pub const fn new(inline: u32, ids: u32, classes: u32, types: u32) -> Self {
        Self(inline, ids, classes, types)
    }

    /// Count the components of raw selector text.
    ///
    /// - `#id` counts as an id.
    /// - `.class`, `[attr]`, and `:pseudo-class` (with any parenthesized
    ///   argument) count as classes.
    /// - Type names and `::pseudo-element` count as types.
    ///
    /// The contents of `[...]` and of pseudo-class arguments are not
    /// counted.
    #[must_use]
    pub fn of(selector: &str) -> Self {
        let chars: Vec<char> = selector.chars().collect();
        let mut specificity = Self::default();
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                '#' if starts_identifier(&chars, i + 1) => {
                    specificity.1 += 1;
                    i = skip_identifier(&chars, i + 1);
                }
                '.' if starts_identifier(&chars, i + 1) => {
                    specificity.2 += 1;
                    i = skip_identifier(&chars, i + 1);
                }
                '[' => match find_from(&chars, i + 1, ']') {
                    Some(close) if close > i + 1 => {
                        specificity.2 += 1;
                        i = close + 1;
                    }
                    _ => i += 1,
                },
                ':' => {
                    let is_element = chars.get(i + 1) == Some(&':');
                    let name_start = if is_element { i + 2 } else { i + 1 };
                    let name_end = skip_while(&chars, name_start, |c| {
                        c.is_ascii_alphabetic() || c == '-'
                    });
                    if name_end == name_start {
                        i = name_start;
                        continue;
                    }
                    if is_element {
                        specificity.3 += 1;
                    } else {
                        specificity.2 += 1;
                    }
                    i = name_end;
                    if chars.get(i) == Some(&'(')
                        && let Some(close) = find_from(&chars, i + 1, ')')
                    {
                        i = close + 1;
                    }
                }
                c if c.is_ascii_alphabetic() => {
                    specificity.3 += 1;
                    i = skip_while(&chars, i, |c| c.is_ascii_alphanumeric());
                }
                _ => i += 1,
            }
        }
        specificity
    }
}

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
///
/// A sequence of simple selectors with no combinator between them, e.g.
/// `div#main.note`. A compound with no constraints (`*`) matches any
/// element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    /// Lower-cased type name, only recognized at the start of the compound.
    pub type_name: Option<String>,
    /// The first `#id` in the compound.
    pub id: Option<String>,
    /// Every `.class` in the compound.
    pub classes: Vec<String>,
}

impl CompoundSelector {
    /// Parse one whitespace-free compound.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut compound = Self::default();
        let mut i = 0;

        if chars.first().is_some_and(char::is_ascii_alphabetic) {
            i = skip_while(&chars, 0, |c| c.is_ascii_alphanumeric());
            let name: String = chars[..i].iter().collect();
            compound.type_name = Some(name.to_ascii_lowercase());
        }

        while i < chars.len() {
            match chars[i] {
                '#' if starts_identifier(&chars, i + 1) => {
                    let end = skip_identifier(&chars, i + 1);
                    if compound.id.is_none() {
                        compound.id = Some(chars[i + 1..end].iter().collect());
                    }
                    i = end;
                }
                '.' if starts_identifier(&chars, i + 1) => {
                    let end = skip_identifier(&chars, i + 1);
                    compound.classes.push(chars[i + 1..end].iter().collect());
                    i = end;
                }
                '[' => i = find_from(&chars, i + 1, ']').map_or(chars.len(), |close| close + 1),
                // Pseudo-classes never constrain a match, and neither does
                // anything inside their arguments.
                ':' => {
                    i = skip_while(&chars, i, |c| c == ':');
                    i = skip_while(&chars, i, |c| c.is_ascii_alphabetic() || c == '-');
                    if chars.get(i) == Some(&'(') {
                        i = find_from(&chars, i + 1, ')').map_or(chars.len(), |close| close + 1);
                    }
                }
                _ => i += 1,
            }
        }
        compound
    }

    /// True when no simple selector constrains the match.
    #[must_use]
    pub fn is_universal(&self) -> bool {
        self.type_name.is_none() && self.id.is_none() && self.classes.is_empty()
    }

    /// Test this compound against one node. Only elements can match.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, node_id: NodeId) -> bool {
        let Some(element) = tree.as_element(node_id) else {
            return false;
        };

        if let Some(type_name) = &self.type_name
            && *type_name != element.tag_name
        {
            return false;
        }
        if let Some(id) = &self.id
            && element.id() != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.is_empty() {
            let element_classes = element.classes();
            if !self.classes.iter().all(|class| element_classes.contains(class.as_str())) {
                return false;
            }
        }
        true
    }
}

/// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
///
/// A selector ready for matching: compounds separated by whitespace, in
/// source order. The last compound is the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSelector {
    /// Compounds left to right.
    pub compounds: Vec<CompoundSelector>,
    /// Specificity of the full selector text.
    pub specificity: Specificity,
}

/// Parse selector text. Returns `None` for blank text.
#[must_use]
pub fn parse_selector(raw: &str) -> Option<ParsedSelector> {
    let compounds: Vec<CompoundSelector> =
        raw.split_whitespace().map(CompoundSelector::parse).collect();
    if compounds.is_empty() {
        return None;
    }
    Some(ParsedSelector {
        compounds,
        specificity: Specificity::of(raw),
    })
}

impl ParsedSelector {
    /// The rightmost compound.
    #[must_use]
    pub fn subject(&self) -> Option<&CompoundSelector> {
        self.compounds.last()
    }

    /// [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
    ///
    /// The subject must match the node itself. Each earlier compound, right
    /// to left, must then match some ancestor strictly above the ancestor
    /// matched by the compound after it. Taking the nearest match each time
    /// is enough: a nearer ancestor leaves at least as many candidates for
    /// the remaining compounds as a farther one.
    #[must_use]
    pub fn matches_in_tree(&self, tree: &DomTree, node_id: NodeId) -> bool {
        let Some((subject, mut remaining)) = self.compounds.split_last() else {
            return false;
        };
        if !subject.matches(tree, node_id) {
            return false;
        }

        for ancestor_id in tree.ancestors(node_id) {
            let Some((next, rest)) = remaining.split_last() else {
                break;
            };
            if next.matches(tree, ancestor_id) {
                remaining = rest;
            }
        }
        remaining.is_empty()
    }
}

// =============================================================================
// Scanning helpers
// =============================================================================

/// `[a-zA-Z_-]`
fn starts_identifier(chars: &[char], index: usize) -> bool {
    chars
        .get(index)
        .is_some_and(|&c| c.is_ascii_alphabetic() || c == '_' || c == '-')
}

/// Index one past `[a-zA-Z0-9_-]*` starting at `index`.
fn skip_identifier(chars: &[char], index: usize) -> usize {
    skip_while(chars, index, |c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn skip_while(chars: &[char], index: usize, predicate: impl Fn(char) -> bool) -> usize {
    let mut end = index;
    while end < chars.len() && predicate(chars[end]) {
        end += 1;
    }
    end
}

fn find_from(chars: &[char], index: usize, target: char) -> Option<usize> {
    chars
        .get(index..)?
        .iter()
        .position(|&c| c == target)
        .map(|offset| index + offset)
}
