//! Display List - a sequence of paint commands
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! The display list is the output of the painting phase. Commands appear in
//! painting order, back to front.

use std::slice;

use lumen_dom::NodeId;
use serde::Serialize;
use strum_macros::Display;

use crate::layout::Rect;

/// What a command paints, with its paint data.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PaintKind {
    /// Fill the border box.
    Background {
        /// `background-color`
        color: String,
    },
    /// Stroke the border box.
    Border {
        /// `border-color`, or black.
        color: String,
    },
    /// Draw text into the content box.
    Text {
        /// `color`, or black.
        color: String,
        /// The full text.
        text: String,
    },
}

impl PaintKind {
    /// The color this command paints with.
    #[must_use]
    pub fn color(&self) -> &str {
        match self {
            Self::Background { color } | Self::Border { color } | Self::Text { color, .. } => color,
        }
    }
}

/// A single paint command.
///
/// [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaintCommand {
    /// Position in the display list, starting at 1.
    pub id: usize,
    /// What to paint.
    #[serde(flatten)]
    pub kind: PaintKind,
    /// The node whose box this paints.
    pub target: NodeId,
    /// Tag name of the target, if it is an element.
    pub tag_name: Option<String>,
    /// Where to paint, in layout coordinates.
    pub rect: Rect,
    /// Short human-readable summary.
    pub description: String,
}

/// Paint commands in painting order.
///
/// Ids are assigned on push, so they increase with position and are unique
/// within one list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DisplayList {
    commands: Vec<PaintCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Append a command, assigning it the next id.
    pub fn push(
        &mut self,
        kind: PaintKind,
        target: NodeId,
        tag_name: Option<String>,
        rect: Rect,
        description: String,
    ) {
        let id = self.commands.len() + 1;
        self.commands.push(PaintCommand {
            id,
            kind,
            target,
            tag_name,
            rect,
            description,
        });
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over the commands in painting order.
    pub fn iter(&self) -> slice::Iter<'_, PaintCommand> {
        self.commands.iter()
    }

    /// Take the commands out of the list.
    #[must_use]
    pub fn into_commands(self) -> Vec<PaintCommand> {
        self.commands
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a PaintCommand;
    type IntoIter = slice::Iter<'a, PaintCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
