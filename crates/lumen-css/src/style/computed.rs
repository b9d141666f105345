use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::parser::Declaration;

/// The properties later stages interpret.
///
/// Any other property a stylesheet declares is still carried in the
/// [`ComputedStyle`] map; it just has no typed accessor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Property {
    /// `display`; `none` removes the subtree, anything but `block` is
    /// treated as inline by layout.
    Display,
    /// `width`
    Width,
    /// `height`
    Height,
    /// `color`
    Color,
    /// `background-color`
    BackgroundColor,
    /// `border-color`
    BorderColor,
    /// `font-size`
    FontSize,
    /// `font-family`
    FontFamily,
    /// `line-height`
    LineHeight,
    /// `text-align`
    TextAlign,
    /// `transform`
    Transform,
    /// `opacity`
    Opacity,
    /// `position`
    Position,
    /// `will-change`
    WillChange,
    /// `filter`
    Filter,
    /// `z-index`
    ZIndex,
}

impl Property {
    /// The CSS property name, e.g. `background-color`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// True for the properties elements inherit from their parent.
    #[must_use]
    pub fn is_inherited(self) -> bool {
        INHERITED_PROPERTIES.contains(&self)
    }
}

/// [§ 7.1 Inherited Properties](https://www.w3.org/TR/css-cascade-4/#inherited-property)
///
/// The only properties an element takes from its parent. Text nodes copy
/// the whole parent style instead.
pub const INHERITED_PROPERTIES: [Property; 5] = [
    Property::Color,
    Property::FontSize,
    Property::FontFamily,
    Property::LineHeight,
    Property::TextAlign,
];

/// The three edges of the box model that take per-side lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum BoxEdge {
    /// `margin`, `margin-top`, ...
    Margin,
    /// `border`, `border-top`, ... read for their leading length only.
    Border,
    /// `padding`, `padding-top`, ...
    Padding,
}

impl BoxEdge {
    /// Name of the shorthand property covering all four sides.
    #[must_use]
    pub const fn shorthand(self) -> &'static str {
        match self {
            Self::Margin => "margin",
            Self::Border => "border",
            Self::Padding => "padding",
        }
    }

    /// Name of the property for one side, e.g. `margin-top`.
    #[must_use]
    pub fn longhand(self, side: Side) -> String {
        format!("{}-{side}", self.shorthand())
    }
}

/// One side of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    /// Top
    Top,
    /// Right
    Right,
    /// Bottom
    Bottom,
    /// Left
    Left,
}

/// The resolved property values for one node.
///
/// Property names are the map keys; values are the raw declaration text.
/// Ordered so serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComputedStyle {
    properties: BTreeMap<String, String>,
}

impl ComputedStyle {
    /// An empty style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// [§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
    ///
    /// A fresh style seeded with the inheritable subset of `parent`.
    #[must_use]
    pub fn inherit_from(parent: &Self) -> Self {
        let mut style = Self::new();
        for property in INHERITED_PROPERTIES {
            if let Some(value) = parent.get(property) {
                style.set(property.name(), value);
            }
        }
        style
    }

    /// Value of a typed property.
    #[must_use]
    pub fn get(&self, property: Property) -> Option<&str> {
        self.get_raw(property.name())
    }

    /// Value of any property by name.
    #[must_use]
    pub fn get_raw(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Set a property, replacing any earlier value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let _ = self.properties.insert(name.into(), value.into());
    }

    /// Apply one declaration on top of the current values.
    pub fn apply_declaration(&mut self, declaration: &Declaration) {
        self.set(declaration.property.as_str(), declaration.value.as_str());
    }

    /// Shorthand value for an edge (`margin`, `border`, `padding`).
    #[must_use]
    pub fn edge_shorthand(&self, edge: BoxEdge) -> Option<&str> {
        self.get_raw(edge.shorthand())
    }

    /// Longhand value for one side of an edge (`margin-top`, ...).
    #[must_use]
    pub fn edge_side(&self, edge: BoxEdge, side: Side) -> Option<&str> {
        self.get_raw(&edge.longhand(side))
    }

    /// `display`, if declared or inherited.
    #[must_use]
    pub fn display(&self) -> Option<&str> {
        self.get(Property::Display)
    }

    /// True when `display` is `none`.
    #[must_use]
    pub fn is_display_none(&self) -> bool {
        self.display() == Some("none")
    }

    /// `width`
    #[must_use]
    pub fn width(&self) -> Option<&str> {
        self.get(Property::Width)
    }

    /// `height`
    #[must_use]
    pub fn height(&self) -> Option<&str> {
        self.get(Property::Height)
    }

    /// `color`
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.get(Property::Color)
    }

    /// `background-color`
    #[must_use]
    pub fn background_color(&self) -> Option<&str> {
        self.get(Property::BackgroundColor)
    }

    /// `border-color`
    #[must_use]
    pub fn border_color(&self) -> Option<&str> {
        self.get(Property::BorderColor)
    }

    /// Number of properties set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// True when no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// All properties, ordered by name.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.properties.iter()
    }
}

impl<'a> IntoIterator for &'a ComputedStyle {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
