//! Painting
//!
//! [CSS 2.1 Appendix E - Elaborate description of Stacking Contexts](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! Converts a layout tree into a display list of paint commands. Nothing
//! here rasterizes; the list only records what would be drawn, where, and
//! in which order.
//!
//! ```text
//! Style → Layout → Paint → Composite
//!                    ↓
//!              DisplayList
//! ```

mod display_list;
mod painter;

pub use display_list::{DisplayList, PaintCommand, PaintKind};
pub use painter::{DEFAULT_COLOR, Painter, TEXT_LABEL_LIMIT};
