//! Font metrics: global layout constants and per-glyph lookup
//!
//! TeX keeps three sets of global dimensions, one for each of textstyle (size
//! level 5 and higher, >=9pt), scriptstyle (size level 3 and 4, 7-8pt) and
//! scriptscriptstyle (size level 1 and 2, 5-6pt). They come from the fonts
//! cmsy10, cmsy7 and cmsy5 and from cmex10 for the `xi` parameters.
//!
//! The builder never reads a table directly. It goes through a
//! [`MetricsProvider`], so callers may inject their own measurements;
//! [`BuiltinMetrics`] serves the Computer Modern data bundled with the crate.

use crate::font_metrics_data::FONT_METRICS_INDEX;
pub use crate::font_metrics_data::CharacterMetrics;

/// Global layout constants for one script level.
///
/// Field names follow TeX's sigma and xi parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    /// Slant per unit height
    pub slant: f64,
    /// Interword space
    pub space: f64,
    /// Interword stretch
    pub stretch: f64,
    /// Interword shrink
    pub shrink: f64,
    /// Height of a lowercase x
    pub x_height: f64,
    /// One em
    pub quad: f64,
    /// Extra space after a sentence
    pub extra_space: f64,
    /// Numerator shift in display style
    pub num1: f64,
    /// Numerator shift for fractions with a rule
    pub num2: f64,
    /// Numerator shift for fractions without a rule
    pub num3: f64,
    /// Denominator shift in display style
    pub denom1: f64,
    /// Denominator shift otherwise
    pub denom2: f64,
    /// Superscript shift in display style
    pub sup1: f64,
    /// Superscript shift in uncramped styles
    pub sup2: f64,
    /// Superscript shift in cramped styles
    pub sup3: f64,
    /// Subscript shift without a superscript
    pub sub1: f64,
    /// Subscript shift with a superscript
    pub sub2: f64,
    /// Superscript baseline drop below the top of a compound base
    pub sup_drop: f64,
    /// Subscript baseline drop below the bottom of a compound base
    pub sub_drop: f64,
    /// Delimiter size for display-style generalized fractions
    pub delim1: f64,
    /// Delimiter size for other generalized fractions
    pub delim2: f64,
    /// Height of the math axis
    pub axis_height: f64,
    /// Rule thickness of fraction bars
    pub default_rule_thickness: f64,
    /// Minimum clearance above a limit
    pub big_op_spacing1: f64,
    /// Minimum clearance below a limit
    pub big_op_spacing2: f64,
    /// Minimum baseline rise of an upper limit
    pub big_op_spacing3: f64,
    /// Minimum baseline drop of a lower limit
    pub big_op_spacing4: f64,
    /// Padding above and below limits
    pub big_op_spacing5: f64,
    /// Thickness of the radical rule
    pub sqrt_rule_thickness: f64,
    /// Points per em, for converting TeX constants given in points
    pub pt_per_em: f64,
    /// Gap between two rules of a double rule
    pub double_rule_sep: f64,
    /// Width of an array rule
    pub array_rule_width: f64,
    /// Padding inside a framed box
    pub fboxsep: f64,
    /// Thickness of a framed box rule
    pub fboxrule: f64,
    /// Size of one math unit (`quad / 18`)
    pub css_em_per_mu: f64,
}

/// Sigma and xi parameters for text, script and scriptscript sizes.
pub const SIGMAS_AND_XIS: [FontMetrics; 3] = [
    FontMetrics {
        slant: 0.25,
        space: 0.0,
        stretch: 0.0,
        shrink: 0.0,
        x_height: 0.431,
        quad: 1.0,
        extra_space: 0.0,
        num1: 0.677,
        num2: 0.394,
        num3: 0.444,
        denom1: 0.686,
        denom2: 0.345,
        sup1: 0.413,
        sup2: 0.363,
        sup3: 0.289,
        sub1: 0.15,
        sub2: 0.247,
        sup_drop: 0.386,
        sub_drop: 0.05,
        delim1: 2.39,
        delim2: 1.01,
        axis_height: 0.25,
        default_rule_thickness: 0.04,
        big_op_spacing1: 0.111,
        big_op_spacing2: 0.166,
        big_op_spacing3: 0.2,
        big_op_spacing4: 0.6,
        big_op_spacing5: 0.1,
        sqrt_rule_thickness: 0.04,
        pt_per_em: 10.0,
        double_rule_sep: 0.2,
        array_rule_width: 0.04,
        fboxsep: 0.3,
        fboxrule: 0.04,
        css_em_per_mu: 1.0 / 18.0,
    },
    FontMetrics {
        slant: 0.25,
        space: 0.0,
        stretch: 0.0,
        shrink: 0.0,
        x_height: 0.431,
        quad: 1.171,
        extra_space: 0.0,
        num1: 0.732,
        num2: 0.384,
        num3: 0.471,
        denom1: 0.752,
        denom2: 0.344,
        sup1: 0.503,
        sup2: 0.431,
        sup3: 0.286,
        sub1: 0.143,
        sub2: 0.286,
        sup_drop: 0.353,
        sub_drop: 0.071,
        delim1: 1.7,
        delim2: 1.157,
        axis_height: 0.25,
        default_rule_thickness: 0.049,
        big_op_spacing1: 0.111,
        big_op_spacing2: 0.166,
        big_op_spacing3: 0.2,
        big_op_spacing4: 0.611,
        big_op_spacing5: 0.143,
        sqrt_rule_thickness: 0.04,
        pt_per_em: 10.0,
        double_rule_sep: 0.2,
        array_rule_width: 0.04,
        fboxsep: 0.3,
        fboxrule: 0.04,
        css_em_per_mu: 1.171 / 18.0,
    },
    FontMetrics {
        slant: 0.25,
        space: 0.0,
        stretch: 0.0,
        shrink: 0.0,
        x_height: 0.431,
        quad: 1.472,
        extra_space: 0.0,
        num1: 0.925,
        num2: 0.387,
        num3: 0.504,
        denom1: 1.025,
        denom2: 0.532,
        sup1: 0.504,
        sup2: 0.404,
        sup3: 0.294,
        sub1: 0.2,
        sub2: 0.4,
        sup_drop: 0.494,
        sub_drop: 0.1,
        delim1: 1.98,
        delim2: 1.42,
        axis_height: 0.25,
        default_rule_thickness: 0.049,
        big_op_spacing1: 0.111,
        big_op_spacing2: 0.166,
        big_op_spacing3: 0.2,
        big_op_spacing4: 0.611,
        big_op_spacing5: 0.143,
        sqrt_rule_thickness: 0.04,
        pt_per_em: 10.0,
        double_rule_sep: 0.2,
        array_rule_width: 0.04,
        fboxsep: 0.3,
        fboxrule: 0.04,
        css_em_per_mu: 1.472 / 18.0,
    },
];

/// Source of glyph measurements and global layout constants.
///
/// Implementations must be read-only after construction; the builder may
/// share one provider between threads.
pub trait MetricsProvider: Send + Sync {
    /// Measurements of `character` in the font named `font` (e.g.
    /// `Main-Regular`), or `None` when the font lacks the glyph.
    fn character_metrics(&self, character: char, font: &str) -> Option<CharacterMetrics>;

    /// Global constants for a sigma table column: 0 for text sizes, 1 for
    /// script sizes, 2 for scriptscript sizes.
    fn global_metrics(&self, size_index: usize) -> &FontMetrics;
}

/// The Computer Modern metrics bundled with the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMetrics;

impl MetricsProvider for BuiltinMetrics {
    fn character_metrics(&self, character: char, font: &str) -> Option<CharacterMetrics> {
        FONT_METRICS_INDEX
            .get(font)
            .and_then(|table| table.get(&(character as u32)))
            .copied()
    }

    fn global_metrics(&self, size_index: usize) -> &FontMetrics {
        &SIGMAS_AND_XIS[size_index.min(SIGMAS_AND_XIS.len() - 1)]
    }
}
