//! The TeX math style lattice
//!
//! Four styles (display, text, script, scriptscript), each in a cramped and
//! an uncramped variant. Styles are small `Copy` values; every transition
//! returns a new style and never touches the one it was derived from.

use core::fmt;

/// One of the eight math styles.
///
/// `size` is shared between the cramped and uncramped variant of a style:
/// 0 for display, 1 for text, 2 for script and 3 for scriptscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    /// Index into the style table
    pub id: usize,
    /// Size level (0=display, 1=text, 2=script, 3=scriptscript)
    pub size: usize,
    /// Whether the style is cramped
    pub cramped: bool,
}

impl Style {
    const fn new(id: usize, size: usize, cramped: bool) -> Self {
        Self { id, size, cramped }
    }

    /// Style of a superscript on a base in this style.
    #[must_use]
    pub const fn sup(self) -> Self {
        STYLES[SUP[self.id]]
    }

    /// Style of a subscript on a base in this style. Always cramped.
    #[must_use]
    pub const fn sub(self) -> Self {
        STYLES[SUB[self.id]]
    }

    /// Style of a fraction numerator.
    #[must_use]
    pub const fn frac_num(self) -> Self {
        STYLES[FRAC_NUM[self.id]]
    }

    /// Style of a fraction denominator. Always cramped.
    #[must_use]
    pub const fn frac_den(self) -> Self {
        STYLES[FRAC_DEN[self.id]]
    }

    /// Cramped variant; cramping a cramped style is a no-op.
    #[must_use]
    pub const fn cramp(self) -> Self {
        STYLES[CRAMP[self.id]]
    }

    /// Text or display variant of this style.
    #[must_use]
    pub const fn text(self) -> Self {
        STYLES[TEXT_LOOKUP[self.id]]
    }

    /// Script and scriptscript are tightly spaced.
    #[must_use]
    pub const fn is_tight(self) -> bool {
        self.size >= 2
    }

    /// Glyph scale of this style relative to text style.
    #[must_use]
    pub const fn size_factor(self) -> f64 {
        SIZE_FACTORS[self.size]
    }

    /// Looks up the style named by a styling command such as
    /// `\scriptstyle`.
    #[must_use]
    pub fn from_command(name: &str) -> Option<Self> {
        match name {
            "\\displaystyle" => Some(DISPLAY),
            "\\textstyle" => Some(TEXT),
            "\\scriptstyle" => Some(SCRIPT),
            "\\scriptscriptstyle" => Some(SCRIPTSCRIPT),
            _ => None,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(NAMES[self.size])?;
        if self.cramped {
            f.write_str("'")?;
        }
        Ok(())
    }
}

const D: usize = 0;
const DC: usize = 1;
const T: usize = 2;
const TC: usize = 3;
const S: usize = 4;
const SC: usize = 5;
const SS: usize = 6;
const SSC: usize = 7;

const STYLES: [Style; 8] = [
    Style::new(D, 0, false),
    Style::new(DC, 0, true),
    Style::new(T, 1, false),
    Style::new(TC, 1, true),
    Style::new(S, 2, false),
    Style::new(SC, 2, true),
    Style::new(SS, 3, false),
    Style::new(SSC, 3, true),
];

const SUP: [usize; 8] = [S, SC, S, SC, SS, SSC, SS, SSC];
const SUB: [usize; 8] = [SC, SC, SC, SC, SSC, SSC, SSC, SSC];
const FRAC_NUM: [usize; 8] = [T, TC, S, SC, SS, SSC, SS, SSC];
const FRAC_DEN: [usize; 8] = [TC, TC, SC, SC, SSC, SSC, SSC, SSC];
const CRAMP: [usize; 8] = [DC, DC, TC, TC, SC, SC, SSC, SSC];
const TEXT_LOOKUP: [usize; 8] = [D, DC, T, TC, T, TC, T, TC];

const SIZE_FACTORS: [f64; 4] = [1.0, 1.0, 0.7, 0.5];
const NAMES: [&str; 4] = ["display", "text", "script", "scriptscript"];

/// `\displaystyle`, the style of displayed equations.
pub const DISPLAY: Style = STYLES[D];
/// `\textstyle`, the style of inline math.
pub const TEXT: Style = STYLES[T];
/// `\scriptstyle`, first-level scripts.
pub const SCRIPT: Style = STYLES[S];
/// `\scriptscriptstyle`, scripts of scripts.
pub const SCRIPTSCRIPT: Style = STYLES[SS];
