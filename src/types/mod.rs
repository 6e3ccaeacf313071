//! Core type definitions shared by the parser and the builder

use alloc::sync::Arc;
use core::fmt;

use strum::EnumCount as _;
use strum_macros::{AsRefStr, Display, EnumCount, EnumIter, EnumString, FromRepr};

mod layout_error;
pub use layout_error::{LayoutError, MetricsLookupError};

mod parse_error;
pub use parse_error::{ErrorLocationProvider, ParseError, ParseErrorKind};

mod settings;
pub use settings::{Settings, StrictMode};

mod source_location;
pub use source_location::SourceLocation;

mod tokens;
pub use crate::symbols::Mode;
pub use tokens::Token;

/// Inline style properties a box may override.
///
/// Serialized in `kebab-case`, the CSS spelling, via `strum`.
#[derive(
    EnumIter, Debug, Copy, AsRefStr, PartialEq, Eq, Hash, Clone, Display, EnumCount, FromRepr,
)]
#[strum(serialize_all = "kebab-case")]
#[repr(u8)]
pub enum CssProperty {
    /// Thickness of a rule drawn as the bottom border of an empty box
    BorderBottomWidth,
    /// Explicit box height, used by struts
    Height,
    /// Horizontal offset before the box
    MarginLeft,
    /// Horizontal offset after the box
    MarginRight,
    /// Minimum box width, used by radical signs
    MinWidth,
    /// Space reserved before the content, used for the radicand
    PaddingLeft,
    /// Vertical offset of a vlist entry relative to its baseline
    Top,
    /// Explicit box width
    Width,
}

/// Inline style overrides of a box.
///
/// A fixed slot per [`CssProperty`], so lookups never hash. Values are
/// `Arc<str>` to keep box trees `Send + Sync`.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct CssStyle {
    map: [Option<Arc<str>>; CssProperty::COUNT],
}

impl fmt::Debug for CssStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ds = f.debug_struct("CssStyle");
        for (property, value) in self {
            ds.field(property.as_ref(), &value);
        }
        ds.finish()
    }
}

/// Iterator over the properties set on a [`CssStyle`]
pub struct CssStyleIter<'a> {
    index: usize,
    data: &'a [Option<Arc<str>>; CssProperty::COUNT],
}

impl<'a> Iterator for CssStyleIter<'a> {
    type Item = (CssProperty, &'a str);
    fn next(&mut self) -> Option<Self::Item> {
        while self.index < CssProperty::COUNT {
            let idx = self.index;
            self.index += 1;
            if let Some(v) = &self.data[idx]
                && let Some(prop) = CssProperty::from_repr(idx as u8)
            {
                return Some((prop, v.as_ref()));
            }
        }
        None
    }
}

impl<'a> IntoIterator for &'a CssStyle {
    type Item = (CssProperty, &'a str);
    type IntoIter = CssStyleIter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        CssStyleIter {
            index: 0,
            data: &self.map,
        }
    }
}

impl CssStyle {
    /// Inserts or updates a property.
    #[inline]
    pub fn insert<T>(&mut self, property: CssProperty, value: T)
    where
        T: Into<Arc<str>>,
    {
        self.map[property as usize] = Some(value.into());
    }

    /// Builder-style [`CssStyle::insert`].
    #[must_use]
    pub fn with<T: Into<Arc<str>>>(mut self, property: CssProperty, value: T) -> Self {
        self.insert(property, value);
        self
    }

    /// Whether a property is set.
    #[inline]
    #[must_use]
    pub const fn contains_key(&self, property: CssProperty) -> bool {
        self.map[property as usize].is_some()
    }

    /// Value of a property, if set.
    #[inline]
    #[must_use]
    pub fn get(&self, property: CssProperty) -> Option<&str> {
        self.map[property as usize].as_deref()
    }

    /// Whether no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.iter().all(Option::is_none)
    }

    /// Iterates over the set properties in declaration order.
    #[must_use]
    pub fn iter(&self) -> CssStyleIter<'_> {
        self.into_iter()
    }
}

/// Kinds of arguments a control sequence can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// A dimension such as `3pt` or `{-1mu}`
    Size,
    /// A group parsed in text mode, as taken by `\text`
    Text,
    /// A braced group or a single token, parsed in the current mode
    Original,
}

/// Tokens that end the expression currently being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
pub enum BreakToken {
    /// Closes an optional argument
    #[strum(serialize = "]")]
    RightBracket,
    /// Closes a group
    #[strum(serialize = "}")]
    RightBrace,
    /// Closes a `\left` group
    #[strum(serialize = "\\right")]
    Right,
    /// End of input
    #[strum(serialize = "EOF")]
    Eof,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_style_iterates_in_declaration_order() {
        let style = CssStyle::default()
            .with(CssProperty::Top, "-3.23em")
            .with(CssProperty::BorderBottomWidth, "0.04em");

        let collected: Vec<_> = style.iter().collect();
        assert_eq!(
            collected,
            vec![
                (CssProperty::BorderBottomWidth, "0.04em"),
                (CssProperty::Top, "-3.23em"),
            ]
        );
        assert!(!style.contains_key(CssProperty::Height));
        assert_eq!(CssProperty::MarginRight.as_ref(), "margin-right");
    }

    #[test]
    fn test_break_token_round_trip() {
        assert_eq!("}".parse::<BreakToken>().ok(), Some(BreakToken::RightBrace));
        assert_eq!(BreakToken::Right.as_ref(), "\\right");
        assert!("x".parse::<BreakToken>().is_err());
    }
}
