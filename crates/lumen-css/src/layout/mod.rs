//! Block layout.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/) and
//! [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting),
//! reduced to vertical stacking: every box is placed below its previous
//! sibling, with no margin collapsing, wrapping, or inline flow.

mod box_model;
mod layout_box;

pub use box_model::{EdgeSizes, Rect};
pub use layout_box::{
    DEFAULT_CONTAINER_WIDTH, INLINE_FALLBACK_WIDTH, LayoutBox, LayoutEngine, MIN_CONTENT_HEIGHT,
};
