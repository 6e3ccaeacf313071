use strum_macros::{AsRefStr, EnumString};

/// Parsing mode of a token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Math mode: spaces are ignored and scripts are allowed
    Math,
    /// Text mode
    Text,
}

/// Atom classes that take part in inter-atom spacing.
///
/// The lowercase name, prefixed with `m`, is the CSS class the builder
/// attaches to the box (`Bin` becomes `mbin`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Atom {
    /// Binary operator such as `+`
    Bin,
    /// Closing delimiter
    Close,
    /// Inner formula such as a `\left..\right` group
    Inner,
    /// Opening delimiter
    Open,
    /// Punctuation
    Punct,
    /// Relation such as `=`
    Rel,
}

/// Symbol groups that are not atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonAtom {
    /// Italic math letter
    MathOrd,
    /// Upright glyph: digits, Greek capitals, punctuation used as ordinary
    TextOrd,
    /// Large operator symbol such as `\sum`
    OpToken,
    /// Active space such as `~`
    Spacing,
}

/// How a symbol participates in parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    /// Symbol with an atom class
    Atom(Atom),
    /// Ordinary, operator or spacing symbol
    NonAtom(NonAtom),
}

/// Symbol table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharInfo {
    /// Parsing group of the symbol
    pub group: Group,
    /// Unicode character the command stands for, when it differs from the
    /// command text (`\alpha` is replaced by `α`)
    pub replace: Option<char>,
}
