//! Painter - generates a display list from a layout tree
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)

use crate::layout::LayoutBox;

use super::{DisplayList, PaintKind};

/// Color used when a border or text has none set.
pub const DEFAULT_COLOR: &str = "#000";

/// Characters of text shown in a command description before truncation.
pub const TEXT_LABEL_LIMIT: usize = 20;

/// Painter that generates a display list from a layout tree.
///
/// Stateless; every call to [`Painter::paint`] starts a fresh list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Painter;

impl Painter {
    /// Create a painter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Paint a layout tree and return the display list.
    #[must_use]
    pub fn paint(&self, layout: &LayoutBox) -> DisplayList {
        let mut display_list = DisplayList::new();
        self.paint_box(layout, &mut display_list);
        display_list
    }

    /// [CSS 2.1 Appendix E.2](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
    ///
    /// For each box, in this order and never reordered:
    /// 1. Background color
    /// 2. Border
    /// 3. Descendants, in tree order
    /// 4. The box's own text
    fn paint_box(&self, layout_box: &LayoutBox, display_list: &mut DisplayList) {
        let style = &layout_box.style;
        let label = layout_box.label();

        // STEP 1: Background
        if let Some(color) = style.background_color()
            && color != "transparent"
        {
            display_list.push(
                PaintKind::Background {
                    color: color.to_string(),
                },
                layout_box.node_id,
                layout_box.tag_name.clone(),
                layout_box.rect,
                format!("paint <{label}> background: {color}"),
            );
        }

        // STEP 2: Border
        if layout_box.border.any_positive() {
            let color = style.border_color().unwrap_or(DEFAULT_COLOR);
            display_list.push(
                PaintKind::Border {
                    color: color.to_string(),
                },
                layout_box.node_id,
                layout_box.tag_name.clone(),
                layout_box.rect,
                format!("paint <{label}> border: {color}"),
            );
        }

        // STEP 3: Descendants
        for child in &layout_box.children {
            self.paint_box(child, display_list);
        }

        // STEP 4: Text, inside the padding.
        if let Some(text) = layout_box.text.as_deref()
            && !text.is_empty()
        {
            let color = style.color().unwrap_or(DEFAULT_COLOR);
            display_list.push(
                PaintKind::Text {
                    color: color.to_string(),
                    text: text.to_string(),
                },
                layout_box.node_id,
                layout_box.tag_name.clone(),
                layout_box.rect.inset(&layout_box.padding),
                format!("paint text: \"{}\"", text_label(text)),
            );
        }
    }
}

/// The first [`TEXT_LABEL_LIMIT`] characters of `text`, with `...` when
/// anything was cut.
fn text_label(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(TEXT_LABEL_LIMIT).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_label_truncates_by_characters() {
        assert_eq!(text_label("short"), "short");
        assert_eq!(text_label("exactly twenty chars"), "exactly twenty chars");
        assert_eq!(
            text_label("this sentence is longer than twenty"),
            "this sentence is lon..."
        );
        assert_eq!(text_label(&"é".repeat(25)), format!("{}...", "é".repeat(20)));
    }
}
