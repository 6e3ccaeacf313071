//! Box tree node definitions
//!
//! These objects are the output of the builder: glyph boxes ([`SymbolNode`])
//! and boxes wrapping other boxes ([`Span`]), each carrying its measured
//! extents in ems, its class names and any explicit style overrides.

use bon::bon;

use crate::namespace::KeySet;
use crate::options::Options;
use crate::types::CssStyle;

/// Box wrapping other boxes, generic over the child type
#[derive(Debug, Clone, PartialEq)]
pub struct Span<T> {
    /// Child boxes, in reading order
    pub children: Vec<T>,
    /// Class names, without duplicates
    pub classes: Vec<String>,
    /// Height above the baseline
    pub height: f64,
    /// Depth below the baseline
    pub depth: f64,
    /// Horizontal advance
    pub width: f64,
    /// Largest scale of any glyph inside the span
    pub max_font_size: f64,
    /// Inline style overrides
    pub style: CssStyle,
    /// Italic correction of the nucleus, set by operators and scripts
    pub italic: Option<f64>,
}

#[bon]
impl<T> Span<T> {
    #[builder]
    /// Create a new Span with builder
    pub fn new(
        /// Options the span is built under; tight styles add `mtight`
        #[builder(finish_fn)]
        options: Option<&Options>,
        /// Child boxes
        children: Vec<T>,
        /// Class names
        classes: Option<Vec<String>>,
        /// Height of the span
        height: Option<f64>,
        /// Depth of the span
        depth: Option<f64>,
        /// Width of the span
        width: Option<f64>,
        /// Maximum font size used in the span
        max_font_size: Option<f64>,
        /// Inline style overrides
        style: Option<CssStyle>,
    ) -> Self {
        let mut classes = classes.unwrap_or_default();
        if let Some(options) = options {
            init_node(&mut classes, options);
        }

        Self {
            children,
            classes: dedup_classes(classes),
            height: height.unwrap_or_default(),
            depth: depth.unwrap_or_default(),
            width: width.unwrap_or_default(),
            max_font_size: max_font_size.unwrap_or_default(),
            style: style.unwrap_or_default(),
            italic: None,
        }
    }
}

/// Span over box tree nodes
pub type BoxSpan = Span<RenderNode>;

/// A measured glyph
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolNode {
    /// The glyph text
    pub text: String,
    /// Height above the baseline
    pub height: f64,
    /// Depth below the baseline
    pub depth: f64,
    /// Italic correction
    pub italic: f64,
    /// Skew, used to place accents
    pub skew: f64,
    /// Horizontal advance
    pub width: f64,
    /// Scale of the glyph relative to the base size
    pub max_font_size: f64,
    /// Class names, without duplicates
    pub classes: Vec<String>,
    /// Inline style overrides
    pub style: CssStyle,
}

#[bon]
impl SymbolNode {
    /// Create a new Symbol
    #[builder]
    pub fn new(
        /// Glyph text
        text: &str,
        /// Height of the glyph
        height: Option<f64>,
        /// Depth of the glyph
        depth: Option<f64>,
        /// Italic correction value
        italic: Option<f64>,
        /// Skew correction value
        skew: Option<f64>,
        /// Width of the glyph
        width: Option<f64>,
        /// Scale of the glyph
        max_font_size: Option<f64>,
        /// Class names
        classes: Option<Vec<String>>,
        /// Inline style overrides
        style: Option<CssStyle>,
    ) -> Self {
        Self {
            text: text.to_owned(),
            height: height.unwrap_or_default(),
            depth: depth.unwrap_or_default(),
            italic: italic.unwrap_or_default(),
            skew: skew.unwrap_or_default(),
            width: width.unwrap_or_default(),
            max_font_size: max_font_size.unwrap_or_default(),
            classes: dedup_classes(classes.unwrap_or_default()),
            style: style.unwrap_or_default(),
        }
    }
}

/// A node of the box tree
#[derive(Debug, Clone, PartialEq)]
pub enum RenderNode {
    /// A measured glyph
    Symbol(SymbolNode),
    /// A box wrapping other boxes
    Span(BoxSpan),
}

impl From<SymbolNode> for RenderNode {
    fn from(symbol: SymbolNode) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<BoxSpan> for RenderNode {
    fn from(span: BoxSpan) -> Self {
        Self::Span(span)
    }
}

/// Drops empty names and repeated names, keeping first occurrences in order.
pub(crate) fn dedup_classes(classes: Vec<String>) -> Vec<String> {
    let mut seen = KeySet::default();
    classes
        .into_iter()
        .filter(|cls| !cls.is_empty() && seen.insert(cls.clone()))
        .collect()
}

#[inline]
fn init_node(classes: &mut Vec<String>, options: &Options) {
    if options.style.is_tight() {
        classes.push("mtight".to_owned());
    }
}

impl RenderNode {
    /// Class names of this node
    #[must_use]
    pub fn classes(&self) -> &[String] {
        match self {
            Self::Symbol(symbol) => &symbol.classes,
            Self::Span(span) => &span.classes,
        }
    }

    /// Adds a class unless the node already has it.
    pub fn add_class(&mut self, class_name: &str) {
        if class_name.is_empty() || self.has_class(class_name) {
            return;
        }
        let classes = match self {
            Self::Symbol(symbol) => &mut symbol.classes,
            Self::Span(span) => &mut span.classes,
        };
        classes.push(class_name.to_owned());
    }

    /// Replaces every class in `from` with `to`, used by bin cancellation.
    pub fn replace_class(&mut self, from: &str, to: &str) {
        let classes = match self {
            Self::Symbol(symbol) => &mut symbol.classes,
            Self::Span(span) => &mut span.classes,
        };
        for cls in classes.iter_mut() {
            if cls == from {
                to.clone_into(cls);
            }
        }
        *classes = dedup_classes(core::mem::take(classes));
    }

    /// Whether this node carries `class_name`
    #[must_use]
    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes().iter().any(|cls| cls == class_name)
    }

    /// Height above the baseline, in ems
    #[must_use]
    pub const fn height(&self) -> f64 {
        match self {
            Self::Symbol(symbol) => symbol.height,
            Self::Span(span) => span.height,
        }
    }

    /// Depth below the baseline, in ems
    #[must_use]
    pub const fn depth(&self) -> f64 {
        match self {
            Self::Symbol(symbol) => symbol.depth,
            Self::Span(span) => span.depth,
        }
    }

    /// Horizontal advance, in ems
    #[must_use]
    pub const fn width(&self) -> f64 {
        match self {
            Self::Symbol(symbol) => symbol.width,
            Self::Span(span) => span.width,
        }
    }

    /// Largest glyph scale inside this node
    #[must_use]
    pub const fn max_font_size(&self) -> f64 {
        match self {
            Self::Symbol(symbol) => symbol.max_font_size,
            Self::Span(span) => span.max_font_size,
        }
    }

    /// Italic correction: the glyph's own, or the one a span recorded
    #[must_use]
    pub fn italic(&self) -> f64 {
        match self {
            Self::Symbol(symbol) => symbol.italic,
            Self::Span(span) => span.italic.unwrap_or_default(),
        }
    }

    /// Inline style overrides
    #[must_use]
    pub const fn style(&self) -> &CssStyle {
        match self {
            Self::Symbol(symbol) => &symbol.style,
            Self::Span(span) => &span.style,
        }
    }

    /// Mutable inline style overrides, for builders that shift a finished box
    pub const fn style_mut(&mut self) -> &mut CssStyle {
        match self {
            Self::Symbol(symbol) => &mut symbol.style,
            Self::Span(span) => &mut span.style,
        }
    }

    /// Children of a span; a symbol has none
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Symbol(_) => &[],
            Self::Span(span) => &span.children,
        }
    }

    /// The `index`-th child, if any
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Self> {
        self.children().get(index)
    }

    /// The span inside this node, if it is one
    #[must_use]
    pub const fn as_span(&self) -> Option<&BoxSpan> {
        match self {
            Self::Span(span) => Some(span),
            Self::Symbol(_) => None,
        }
    }

    /// The symbol inside this node, if it is one
    #[must_use]
    pub const fn as_symbol(&self) -> Option<&SymbolNode> {
        match self {
            Self::Symbol(symbol) => Some(symbol),
            Self::Span(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::SCRIPT;

    #[test]
    fn test_classes_are_a_set() {
        let span: BoxSpan = Span::builder()
            .children(vec![])
            .classes(vec![
                "mord".to_owned(),
                String::new(),
                "mord".to_owned(),
                "mtight".to_owned(),
            ])
            .build(Some(&Options::default().having_style(SCRIPT)));
        assert_eq!(span.classes, vec!["mord", "mtight"]);
    }

    #[test]
    fn test_replace_class() {
        let mut node: RenderNode = SymbolNode::builder()
            .text("+")
            .classes(vec!["mbin".to_owned(), "mord".to_owned()])
            .build()
            .into();
        node.replace_class("mbin", "mord");
        assert_eq!(node.classes(), ["mord"]);
        node.add_class("mtight");
        node.add_class("mtight");
        assert_eq!(node.classes(), ["mord", "mtight"]);
    }

    #[test]
    fn test_accessors() {
        let sym = SymbolNode::builder()
            .text("x")
            .height(0.43056)
            .width(0.57153)
            .italic(0.1)
            .build();
        let span: RenderNode = Span::builder()
            .children(vec![RenderNode::from(sym)])
            .height(0.5)
            .build(None)
            .into();
        assert_eq!(span.children().len(), 1);
        assert_eq!(span.child(0).map(RenderNode::width), Some(0.57153));
        assert_eq!(span.child(0).map(RenderNode::italic), Some(0.1));
        assert!(span.as_symbol().is_none());
        assert_eq!(span.italic(), 0.0);
    }
}
