//! Parse node definitions
//!
//! The parser produces a tree of [`AnyParseNode`]s. Every node records the
//! mode it was parsed in and, when known, the source range it came from.
//! Nodes are plain owned values: children are boxed or kept in vectors, and
//! nothing is shared between subtrees.

use strum_macros::{AsRefStr, Display, EnumDiscriminants};

use crate::options::FontFamily;
use crate::spacing_data::{AtomClass, MeasurementOwned};
use crate::style::Style;
use crate::symbols::Atom;
use crate::types::{ErrorLocationProvider, Mode, SourceLocation, Token};

/// A node of the syntax tree.
#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(vis(pub))]
#[strum_discriminants(doc = "Discriminant type for runtime type checking of parse nodes")]
#[strum_discriminants(derive(Display, Hash, AsRefStr), strum(serialize_all = "lowercase"))]
#[strum_discriminants(name(NodeType))]
pub enum AnyParseNode {
    /// Braced group `{...}`
    OrdGroup(ParseNodeOrdGroup),
    /// Base with superscript and/or subscript
    SupSub(ParseNodeSupSub),
    /// Fraction or binomial
    Genfrac(Box<ParseNodeGenfrac>),
    /// Square root, optionally with an index
    Sqrt(Box<ParseNodeSqrt>),
    /// `\left ... \right`
    LeftRight(ParseNodeLeftRight),
    /// The `\right` half of a `\left ... \right` pair, before it is merged
    #[strum_discriminants(strum(serialize = "leftright-right"))]
    LeftRightRight(ParseNodeLeftRightRight),
    /// Fixed-size delimiter such as `\bigl(`
    Delimsizing(ParseNodeDelimsizing),
    /// Symbol with an atom class
    Atom(ParseNodeAtom),
    /// Italic math letter
    MathOrd(ParseNodeMathOrd),
    /// Upright ordinary glyph
    TextOrd(ParseNodeTextOrd),
    /// Large or named operator
    Op(ParseNodeOp),
    /// Active space such as `~`
    Spacing(ParseNodeSpacing),
    /// `\displaystyle` and friends
    Styling(ParseNodeStyling),
    /// `\tiny` ... `\Huge`
    Sizing(ParseNodeSizing),
    /// `\mathrm`, `\mathnormal`
    Font(ParseNodeFont),
    /// `\text`, `\textrm`
    Text(ParseNodeText),
    /// Explicit horizontal space such as `\kern2pt` or `\,`
    Kern(ParseNodeKern),
    /// A dimension argument
    Size(ParseNodeSize),
    /// Infix command such as `\over`, rewritten once the group is complete
    Infix(ParseNodeInfix),
}

/// Convenience alias for [`AnyParseNode`]
pub type ParseNode = AnyParseNode;

impl AnyParseNode {
    /// TeXbook algorithms often reference "character boxes", which are simply
    /// groups with a single character in them.
    #[must_use]
    pub fn is_character_box(&self) -> bool {
        matches!(
            self.base_elem(),
            Self::MathOrd(_) | Self::TextOrd(_) | Self::Atom(_)
        )
    }

    /// The innermost element of single-element groups and font wrappers.
    #[must_use]
    pub fn base_elem(&self) -> &Self {
        match self {
            Self::OrdGroup(ord) if ord.body.len() == 1 => ord.body[0].base_elem(),
            Self::Font(font) => font.body.base_elem(),
            _ => self,
        }
    }

    /// Mode the node was parsed in
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::OrdGroup(node) => node.mode,
            Self::SupSub(node) => node.mode,
            Self::Genfrac(node) => node.mode,
            Self::Sqrt(node) => node.mode,
            Self::LeftRight(node) => node.mode,
            Self::LeftRightRight(node) => node.mode,
            Self::Delimsizing(node) => node.mode,
            Self::Atom(node) => node.mode,
            Self::MathOrd(node) => node.mode,
            Self::TextOrd(node) => node.mode,
            Self::Op(node) => node.mode,
            Self::Spacing(node) => node.mode,
            Self::Styling(node) => node.mode,
            Self::Sizing(node) => node.mode,
            Self::Font(node) => node.mode,
            Self::Text(node) => node.mode,
            Self::Kern(node) => node.mode,
            Self::Size(node) => node.mode,
            Self::Infix(node) => node.mode,
        }
    }

    /// Source range of the node, when known
    #[must_use]
    pub fn loc(&self) -> Option<&SourceLocation> {
        match self {
            Self::OrdGroup(node) => node.loc.as_ref(),
            Self::SupSub(node) => node.loc.as_ref(),
            Self::Genfrac(node) => node.loc.as_ref(),
            Self::Sqrt(node) => node.loc.as_ref(),
            Self::LeftRight(node) => node.loc.as_ref(),
            Self::LeftRightRight(node) => node.loc.as_ref(),
            Self::Delimsizing(node) => node.loc.as_ref(),
            Self::Atom(node) => node.loc.as_ref(),
            Self::MathOrd(node) => node.loc.as_ref(),
            Self::TextOrd(node) => node.loc.as_ref(),
            Self::Op(node) => node.loc.as_ref(),
            Self::Spacing(node) => node.loc.as_ref(),
            Self::Styling(node) => node.loc.as_ref(),
            Self::Sizing(node) => node.loc.as_ref(),
            Self::Font(node) => node.loc.as_ref(),
            Self::Text(node) => node.loc.as_ref(),
            Self::Kern(node) => node.loc.as_ref(),
            Self::Size(node) => node.loc.as_ref(),
            Self::Infix(node) => node.loc.as_ref(),
        }
    }

    /// Text of a symbol node
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Atom(node) => Some(&node.text),
            Self::MathOrd(node) => Some(&node.text),
            Self::TextOrd(node) => Some(&node.text),
            Self::Spacing(node) => Some(&node.text),
            _ => None,
        }
    }
}

impl ErrorLocationProvider for AnyParseNode {
    fn loc(&self) -> Option<&SourceLocation> {
        Self::loc(self)
    }
}

/// Braced group.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeOrdGroup {
    /// The parsing mode
    pub mode: Mode,
    /// Source range, braces included
    pub loc: Option<SourceLocation>,
    /// Group contents
    pub body: Vec<AnyParseNode>,
}

/// Scripts attached to a base. At least one of `sup` and `sub` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeSupSub {
    /// The parsing mode
    pub mode: Mode,
    /// Source range
    pub loc: Option<SourceLocation>,
    /// Nucleus; `None` for a script with nothing before it, as in `{}^2`
    pub base: Option<Box<AnyParseNode>>,
    /// Superscript
    pub sup: Option<Box<AnyParseNode>>,
    /// Subscript
    pub sub: Option<Box<AnyParseNode>>,
}

/// Generalized fraction: `\frac`, `\binom`, `\over`, `\atop` and variants.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeGenfrac {
    /// The parsing mode
    pub mode: Mode,
    /// Source range
    pub loc: Option<SourceLocation>,
    /// Numerator
    pub numer: AnyParseNode,
    /// Denominator
    pub denom: AnyParseNode,
    /// Whether a fraction rule is drawn
    pub has_bar_line: bool,
    /// Delimiter on the left, e.g. `(` for `\binom`
    pub left_delim: Option<String>,
    /// Delimiter on the right
    pub right_delim: Option<String>,
    /// Forced style (`\dfrac`, `\tfrac`); `None` follows the ambient style
    pub size: Option<Style>,
}

/// Radical.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeSqrt {
    /// The parsing mode
    pub mode: Mode,
    /// Source range
    pub loc: Option<SourceLocation>,
    /// Radicand
    pub body: AnyParseNode,
    /// Root index, from `\sqrt[n]{...}`
    pub index: Option<AnyParseNode>,
}

/// `\left<delim> body \right<delim>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeLeftRight {
    /// The parsing mode
    pub mode: Mode,
    /// Source range
    pub loc: Option<SourceLocation>,
    /// Contents between the delimiters
    pub body: Vec<AnyParseNode>,
    /// Left delimiter, `.` for none
    pub left: String,
    /// Right delimiter, `.` for none
    pub right: String,
}

/// The `\right<delim>` half, consumed by the `\left` handler.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeLeftRightRight {
    /// The parsing mode
    pub mode: Mode,
    /// Source range
    pub loc: Option<SourceLocation>,
    /// The delimiter
    pub delim: String,
}

/// `\big(`, `\Bigl[` and friends.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeDelimsizing {
    /// The parsing mode
    pub mode: Mode,
    /// Source range
    pub loc: Option<SourceLocation>,
    /// Size 1 to 4
    pub size: usize,
    /// Class of the resulting atom
    pub mclass: AtomClass,
    /// The delimiter
    pub delim: String,
}

/// Symbol with an atom class (bin, rel, open, close, punct, inner).
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeAtom {
    /// The atom family
    pub family: Atom,
    /// The parsing mode
    pub mode: Mode,
    /// Source range
    pub loc: Option<SourceLocation>,
    /// Symbol text
    pub text: String,
}

/// Italic math letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeMathOrd {
    /// The parsing mode
    pub mode: Mode,
    /// Source range
    pub loc: Option<SourceLocation>,
    /// Symbol text
    pub text: String,
}

/// Upright ordinary glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeTextOrd {
    /// The parsing mode
    pub mode: Mode,
    /// Source range
    pub loc: Option<SourceLocation>,
    /// Symbol text
    pub text: String,
}

/// Active space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeSpacing {
    /// The parsing mode
    pub mode: Mode,
    /// Source range
    pub loc: Option<SourceLocation>,
    /// Symbol text
    pub text: String,
}

/// What an operator draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpContent {
    /// A single large glyph such as `∑`
    Symbol(String),
    /// An upright name such as `sin`
    Name(String),
}

/// Large operator (`\sum`, `\int`) or named operator (`\sin`, `\lim`).
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeOp {
    /// The parsing mode
    pub mode: Mode,
    /// Source range
    pub loc: Option<SourceLocation>,
    /// Whether scripts go above and below in display style
    pub limits: bool,
    /// Set by `\limits`/`\nolimits`: honor `limits` in every style
    pub always_handle_sup_sub: bool,
    /// Glyph or name
    pub content: OpContent,
}

/// Math style change.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeStyling {
    /// The parsing mode
    pub mode: Mode,
    /// Source range
    pub loc: Option<SourceLocation>,
    /// The new style
    pub style: Style,
    /// Rest of the group, set in the new style
    pub body: Vec<AnyParseNode>,
}

/// Size change.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeSizing {
    /// The parsing mode
    pub mode: Mode,
    /// Source range
    pub loc: Option<SourceLocation>,
    /// Size level 1 to 11
    pub size: usize,
    /// Rest of the group, set at the new size
    pub body: Vec<AnyParseNode>,
}

/// Math font change.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeFont {
    /// The parsing mode
    pub mode: Mode,
    /// Source range
    pub loc: Option<SourceLocation>,
    /// The font
    pub font: FontFamily,
    /// Argument set in the font
    pub body: Box<AnyParseNode>,
}

/// Text inside math.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeText {
    /// The parsing mode
    pub mode: Mode,
    /// Source range
    pub loc: Option<SourceLocation>,
    /// Text-mode contents
    pub body: Vec<AnyParseNode>,
    /// The text font
    pub font: FontFamily,
}

/// Explicit horizontal space.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeKern {
    /// The parsing mode
    pub mode: Mode,
    /// Source range
    pub loc: Option<SourceLocation>,
    /// Amount of space
    pub dimension: MeasurementOwned,
}

/// Dimension argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeSize {
    /// The parsing mode
    pub mode: Mode,
    /// Source range
    pub loc: Option<SourceLocation>,
    /// The dimension
    pub value: MeasurementOwned,
    /// Whether the argument was empty, read as `0pt`
    pub is_blank: bool,
}

/// Infix command awaiting its operands.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeInfix {
    /// The parsing mode
    pub mode: Mode,
    /// Source range
    pub loc: Option<SourceLocation>,
    /// Function called with the numerator and denominator
    pub replace_with: String,
    /// The infix token, for error reporting
    pub token: Option<Token>,
}
