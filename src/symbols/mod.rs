//! Symbol table: which characters and control words stand for glyphs
//!
//! Maps the text of a token (`x`, `+`, `\alpha`) to the parsing group it
//! belongs to and, for control words, the Unicode character that is looked
//! up in the font metrics. Math and text mode have separate tables.
//!
//! # Examples
//!
//! ```rust
//! use katex_layout::symbols::{Atom, Group, Mode, Symbols};
//!
//! let symbols = Symbols::default();
//! let plus = symbols.get(Mode::Math, "+").unwrap();
//! assert_eq!(plus.group, Group::Atom(Atom::Bin));
//!
//! let alpha = symbols.get(Mode::Math, "\\alpha").unwrap();
//! assert_eq!(alpha.replace, Some('α'));
//! ```

mod types;
use crate::namespace::KeyMap;
pub use types::{Atom, CharInfo, Group, Mode, NonAtom};

const MATHORD: Group = Group::NonAtom(NonAtom::MathOrd);
const TEXTORD: Group = Group::NonAtom(NonAtom::TextOrd);
const OP: Group = Group::NonAtom(NonAtom::OpToken);
const SPACING: Group = Group::NonAtom(NonAtom::Spacing);
const BIN: Group = Group::Atom(Atom::Bin);
const REL: Group = Group::Atom(Atom::Rel);
const OPEN: Group = Group::Atom(Atom::Open);
const CLOSE: Group = Group::Atom(Atom::Close);
const PUNCT: Group = Group::Atom(Atom::Punct);

/// Lowercase Greek, set in math italic.
const GREEK_LOWER: [(&str, char); 12] = [
    ("\\alpha", '\u{3b1}'),
    ("\\beta", '\u{3b2}'),
    ("\\gamma", '\u{3b3}'),
    ("\\delta", '\u{3b4}'),
    ("\\epsilon", '\u{3f5}'),
    ("\\theta", '\u{3b8}'),
    ("\\lambda", '\u{3bb}'),
    ("\\mu", '\u{3bc}'),
    ("\\pi", '\u{3c0}'),
    ("\\sigma", '\u{3c3}'),
    ("\\omega", '\u{3c9}'),
    ("\\phi", '\u{3d5}'),
];

/// Uppercase Greek, set upright in the main font.
const GREEK_UPPER: [(&str, char); 9] = [
    ("\\Gamma", '\u{393}'),
    ("\\Delta", '\u{394}'),
    ("\\Theta", '\u{398}'),
    ("\\Lambda", '\u{39b}'),
    ("\\Pi", '\u{3a0}'),
    ("\\Sigma", '\u{3a3}'),
    ("\\Phi", '\u{3a6}'),
    ("\\Psi", '\u{3a8}'),
    ("\\Omega", '\u{3a9}'),
];

/// Math mode entries: (name, group, replacement, also accept the
/// replacement character itself as input).
const MATH_SYMBOLS: &[(&str, Group, Option<char>, bool)] = &[
    // Binary operators
    ("+", BIN, None, false),
    ("-", BIN, Some('\u{2212}'), true),
    ("\\times", BIN, Some('\u{d7}'), true),
    ("\\div", BIN, Some('\u{f7}'), true),
    ("\\pm", BIN, Some('\u{b1}'), true),
    ("\\cdot", BIN, Some('\u{22c5}'), true),
    // Relations
    ("=", REL, None, false),
    ("<", REL, None, false),
    (">", REL, None, false),
    (":", REL, None, false),
    ("\\leq", REL, Some('\u{2264}'), true),
    ("\\le", REL, Some('\u{2264}'), false),
    ("\\geq", REL, Some('\u{2265}'), true),
    ("\\ge", REL, Some('\u{2265}'), false),
    ("\\rightarrow", REL, Some('\u{2192}'), true),
    ("\\to", REL, Some('\u{2192}'), false),
    // Delimiters
    ("(", OPEN, None, false),
    ("[", OPEN, None, false),
    ("\\{", OPEN, Some('{'), false),
    ("\\lbrace", OPEN, Some('{'), false),
    ("\\lbrack", OPEN, Some('['), false),
    (")", CLOSE, None, false),
    ("]", CLOSE, None, false),
    ("\\}", CLOSE, Some('}'), false),
    ("\\rbrace", CLOSE, Some('}'), false),
    ("\\rbrack", CLOSE, Some(']'), false),
    ("!", CLOSE, None, false),
    // Punctuation
    (",", PUNCT, None, false),
    (";", PUNCT, None, false),
    // Ordinary upright glyphs
    (".", TEXTORD, None, false),
    ("/", TEXTORD, None, false),
    ("|", TEXTORD, None, false),
    ("\\vert", TEXTORD, Some('|'), false),
    ("\\|", TEXTORD, Some('\u{2225}'), true),
    ("\\Vert", TEXTORD, Some('\u{2225}'), false),
    ("\\infty", TEXTORD, Some('\u{221e}'), true),
    ("\\prime", TEXTORD, Some('\u{2032}'), true),
    ("\\surd", TEXTORD, Some('\u{221a}'), true),
    // Single-character large operators
    ("\u{2211}", OP, None, false),
    ("\u{220f}", OP, None, false),
    ("\u{2210}", OP, None, false),
    ("\u{222b}", OP, None, false),
    ("\u{222e}", OP, None, false),
    ("\u{22c3}", OP, None, false),
    ("\u{22c2}", OP, None, false),
    // Active spaces
    ("~", SPACING, Some('\u{a0}'), false),
    ("\\ ", SPACING, Some('\u{a0}'), false),
    ("\\space", SPACING, Some('\u{a0}'), false),
    ("\\nobreakspace", SPACING, Some('\u{a0}'), false),
];

const TEXT_SYMBOLS: &[(&str, Group, Option<char>)] = &[
    (" ", SPACING, None),
    ("~", SPACING, Some('\u{a0}')),
    ("\\ ", SPACING, Some('\u{a0}')),
    ("\\space", SPACING, Some('\u{a0}')),
    ("\\nobreakspace", SPACING, Some('\u{a0}')),
    (",", TEXTORD, None),
    (".", TEXTORD, None),
    (";", TEXTORD, None),
    (":", TEXTORD, None),
    ("!", TEXTORD, None),
    ("'", TEXTORD, None),
    ("-", TEXTORD, None),
    ("+", TEXTORD, None),
    ("=", TEXTORD, None),
    ("/", TEXTORD, None),
    ("(", TEXTORD, None),
    (")", TEXTORD, None),
    ("[", TEXTORD, None),
    ("]", TEXTORD, None),
    ("\\{", TEXTORD, Some('{')),
    ("\\}", TEXTORD, Some('}')),
    ("\\textbraceleft", TEXTORD, Some('{')),
    ("\\textbraceright", TEXTORD, Some('}')),
];

/// Per-mode symbol lookup tables.
pub struct Symbols {
    math: KeyMap<String, CharInfo>,
    text: KeyMap<String, CharInfo>,
}

impl Default for Symbols {
    /// The built-in symbol set.
    fn default() -> Self {
        let mut symbols = Self::new();

        for letter in ('a'..='z').chain('A'..='Z') {
            let name = letter.to_string();
            symbols.define_symbol(Mode::Math, MATHORD, None, &name, false);
            symbols.define_symbol(Mode::Text, TEXTORD, None, &name, false);
        }
        for digit in '0'..='9' {
            let name = digit.to_string();
            symbols.define_symbol(Mode::Math, TEXTORD, None, &name, false);
            symbols.define_symbol(Mode::Text, TEXTORD, None, &name, false);
        }
        for (name, ch) in GREEK_LOWER {
            symbols.define_symbol(Mode::Math, MATHORD, Some(ch), name, true);
        }
        for (name, ch) in GREEK_UPPER {
            symbols.define_symbol(Mode::Math, TEXTORD, Some(ch), name, true);
        }
        for &(name, group, replace, accept_unicode) in MATH_SYMBOLS {
            symbols.define_symbol(Mode::Math, group, replace, name, accept_unicode);
        }
        for &(name, group, replace) in TEXT_SYMBOLS {
            symbols.define_symbol(Mode::Text, group, replace, name, false);
        }

        symbols
    }
}

impl Symbols {
    /// Creates empty tables.
    #[must_use]
    pub fn new() -> Self {
        Self {
            math: KeyMap::default(),
            text: KeyMap::default(),
        }
    }

    /// Registers `name` in the table for `mode`.
    ///
    /// With `accept_unicode_char`, the replacement character is registered
    /// as well so that `α` parses like `\alpha`.
    pub fn define_symbol(
        &mut self,
        mode: Mode,
        group: Group,
        replace: Option<char>,
        name: &str,
        accept_unicode_char: bool,
    ) {
        let char_info = CharInfo { group, replace };

        let table = match mode {
            Mode::Math => &mut self.math,
            Mode::Text => &mut self.text,
        };

        table.insert(name.to_owned(), char_info);

        if accept_unicode_char && let Some(s) = replace {
            table.insert(s.to_string(), char_info);
        }
    }

    /// Looks up a symbol in the table for `mode`.
    #[must_use]
    pub fn get(&self, mode: Mode, name: &str) -> Option<&CharInfo> {
        match mode {
            Mode::Math => self.math.get(name),
            Mode::Text => self.text.get(name),
        }
    }

    /// Whether `name` is a symbol in `mode`.
    #[must_use]
    pub fn contains(&self, mode: Mode, name: &str) -> bool {
        self.get(mode, name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_depend_on_mode() {
        let symbols = Symbols::default();
        assert_eq!(symbols.get(Mode::Math, "x").unwrap().group, MATHORD);
        assert_eq!(symbols.get(Mode::Text, "x").unwrap().group, TEXTORD);
        assert_eq!(symbols.get(Mode::Math, "7").unwrap().group, TEXTORD);
    }

    #[test]
    fn test_unicode_aliases() {
        let symbols = Symbols::default();
        assert_eq!(symbols.get(Mode::Math, "\u{3b1}"), symbols.get(Mode::Math, "\\alpha"));
        assert_eq!(
            symbols.get(Mode::Math, "\u{2212}").unwrap().group,
            Group::Atom(Atom::Bin)
        );
        // `\le` is an alias but does not claim the character a second time
        assert_eq!(symbols.get(Mode::Math, "\u{2264}").unwrap().replace, Some('\u{2264}'));
    }

    #[test]
    fn test_unknown_symbol() {
        let symbols = Symbols::default();
        assert!(!symbols.contains(Mode::Math, "\\alephnull"));
        assert!(!symbols.contains(Mode::Text, "\\alpha"));
    }
}
