//! The style context threaded through the builder
//!
//! [`Options`] records the math style, the size level and the active font.
//! It is an immutable value: each `having_*`/`with_*` method returns a new
//! context and leaves `self` untouched, so a superscript built under
//! `options.having_style(options.style.sup())` can never leak its style to
//! its siblings.
use bon::bon;
use strum_macros::AsRefStr;

use crate::style::{DISPLAY, Style, TEXT};
use crate::types::Settings;

/// Font selected by `\mathrm`, `\mathnormal` or `\text`.
///
/// The lowercase name doubles as the CSS class put on glyphs set in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum FontFamily {
    /// Upright math letters
    MathRm,
    /// Math italic, the default for letters
    MathNormal,
    /// Upright text
    TextRm,
}

impl FontFamily {
    /// Name of the metrics font glyphs in this family come from.
    #[must_use]
    pub const fn font_name(self) -> &'static str {
        match self {
            Self::MathRm | Self::TextRm => "Main-Regular",
            Self::MathNormal => "Math-Italic",
        }
    }
}

/// Each row holds [textsize, scriptsize, scriptscriptsize], taken from TeX
/// with \normalsize=10pt.
const SIZE_STYLE_MAP: [[usize; 3]; 11] = [
    [1, 1, 1],   // size1: [5, 5, 5]              \tiny
    [2, 1, 1],   // size2: [6, 5, 5]
    [3, 1, 1],   // size3: [7, 5, 5]              \scriptsize
    [4, 2, 1],   // size4: [8, 6, 5]              \footnotesize
    [5, 2, 1],   // size5: [9, 6, 5]              \small
    [6, 3, 1],   // size6: [10, 7, 5]             \normalsize
    [7, 4, 2],   // size7: [12, 8, 6]             \large
    [8, 6, 3],   // size8: [14.4, 10, 7]          \Large
    [9, 7, 6],   // size9: [17.28, 12, 10]        \LARGE
    [10, 8, 7],  // size10: [20.74, 14.4, 12]     \huge
    [11, 10, 9], // size11: [24.88, 20.74, 17.28] \HUGE
];

/// Scale of each size level relative to \normalsize.
pub const SIZE_MULTIPLIERS: [f64; 11] =
    [0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.2, 1.44, 1.728, 2.074, 2.488];

const fn size_at_style(size: usize, style: Style) -> usize {
    if style.size < 2 {
        size
    } else {
        SIZE_STYLE_MAP[size - 1][style.size - 1]
    }
}

const fn multiplier(size: usize) -> f64 {
    let idx = if size > SIZE_MULTIPLIERS.len() {
        SIZE_MULTIPLIERS.len()
    } else if size == 0 {
        1
    } else {
        size
    };
    SIZE_MULTIPLIERS[idx - 1]
}

/// Style context: style, size level and font.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Current math style
    pub style: Style,
    /// Current size level, 1 to 11
    pub size: usize,
    /// Size level of text style at the current sizing
    pub text_size: usize,
    /// Font selected by a font command, if any
    pub font: Option<FontFamily>,
    /// Scale of `size` relative to \normalsize
    pub size_multiplier: f64,
    /// Upper bound for user sizes, in ems
    pub max_size: f64,
    /// Lower bound for rule thickness, in ems
    pub min_rule_thickness: f64,
}

#[bon]
impl Options {
    #[builder]
    /// Create a new Options instance with builder
    pub fn new(
        style: Style,
        size: Option<usize>,
        text_size: Option<usize>,
        font: Option<FontFamily>,
        max_size: Option<f64>,
        min_rule_thickness: Option<f64>,
    ) -> Self {
        let size = size.unwrap_or(Self::BASESIZE).clamp(1, SIZE_MULTIPLIERS.len());
        Self {
            style,
            size,
            text_size: text_size.unwrap_or(size),
            font,
            size_multiplier: multiplier(size),
            max_size: max_size.unwrap_or(f64::INFINITY),
            min_rule_thickness: min_rule_thickness.unwrap_or(0.0),
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::builder().style(TEXT).build()
    }
}

impl Options {
    /// The base size index, \normalsize
    pub const BASESIZE: usize = 6;

    /// Initial context for a layout run: display style in display mode,
    /// text style otherwise, at the base size.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::builder()
            .style(if settings.display_mode { DISPLAY } else { TEXT })
            .max_size(settings.max_size)
            .min_rule_thickness(settings.min_rule_thickness)
            .build()
    }

    /// Context with the given style; the size follows the style.
    #[must_use]
    pub fn having_style(&self, style: Style) -> Self {
        if self.style == style {
            return self.clone();
        }
        let size = size_at_style(self.text_size, style);
        Self {
            style,
            size,
            size_multiplier: multiplier(size),
            ..self.clone()
        }
    }

    /// Context with the cramped variant of the current style.
    #[must_use]
    pub fn having_cramped_style(&self) -> Self {
        self.having_style(self.style.cramp())
    }

    /// Context with the given size level, in at least `\textstyle`.
    #[must_use]
    pub fn having_size(&self, size: usize) -> Self {
        if self.size == size && self.text_size == size {
            return self.clone();
        }
        Self {
            style: self.style.text(),
            size,
            text_size: size,
            size_multiplier: multiplier(size),
            ..self.clone()
        }
    }

    /// Like `self.having_size(BASESIZE).having_style(style)`. Without a
    /// style, changes to at least `\textstyle`.
    #[must_use]
    pub fn having_base_style(&self, style: Option<Style>) -> Self {
        let style = style.unwrap_or_else(|| self.style.text());
        let want_size = size_at_style(Self::BASESIZE, style);
        if self.size == want_size && self.text_size == Self::BASESIZE && self.style == style {
            return self.clone();
        }
        Self {
            style,
            size: want_size,
            text_size: Self::BASESIZE,
            size_multiplier: multiplier(want_size),
            ..self.clone()
        }
    }

    /// Context with the given font.
    #[must_use]
    pub fn with_font(&self, font: FontFamily) -> Self {
        Self {
            font: Some(font),
            ..self.clone()
        }
    }

    /// Classes needed to switch from `old_options` to `self`. Empty when
    /// the size does not change.
    #[must_use]
    pub fn sizing_classes(&self, old_options: &Self) -> Vec<String> {
        if old_options.size == self.size {
            vec![]
        } else {
            vec![
                "sizing".to_owned(),
                format!("reset-size{}", old_options.size),
                format!("size{}", self.size),
            ]
        }
    }

    /// Classes needed to switch to the base size.
    #[must_use]
    pub fn base_sizing_classes(&self) -> Vec<String> {
        if self.size == Self::BASESIZE {
            vec![]
        } else {
            vec![
                "sizing".to_owned(),
                format!("reset-size{}", self.size),
                format!("size{}", Self::BASESIZE),
            ]
        }
    }

    /// Which column of the sigma tables applies: 0 for text sizes, 1 for
    /// script sizes, 2 for scriptscript sizes.
    #[must_use]
    pub const fn font_size_index(&self) -> usize {
        if self.size >= 5 {
            0
        } else if self.size >= 3 {
            1
        } else {
            2
        }
    }
}
