//! Computed style representation.
//!
//! Styles are plain property-name to value-string maps. The typed
//! [`Property`] enum names the properties later stages read, so nothing
//! downstream spells property names by hand.

mod computed;
mod length;

pub use computed::{BoxEdge, ComputedStyle, INHERITED_PROPERTIES, Property, Side};
pub use length::{leading_number, parse_length};
