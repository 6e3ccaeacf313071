//! Conversion between TeX units and ems
//!
//! - `valid_unit` checks a unit string
//! - `LayoutContext::calculate_size` converts a [`Measurement`] into ems for
//!   the given [`Options`]
//! - `make_em` formats a number as an em string rounded to 4 decimals

use crate::context::LayoutContext;
use crate::options::Options;
use crate::spacing_data::Measurement;
use crate::types::{ParseError, ParseErrorKind};

/// TeX points per unit for the absolute units.
fn pt_per_unit(unit: &str) -> Option<f64> {
    match unit {
        "pt" => Some(1.0),
        "mm" => Some(7227.0 / 2540.0),
        "cm" => Some(7227.0 / 254.0),
        "in" => Some(72.27),
        // \pdfpxdimen defaults to 1 bp
        "bp" | "px" => Some(803.0 / 800.0),
        "pc" => Some(12.0),
        "dd" => Some(1238.0 / 1157.0),
        "cc" => Some(14856.0 / 1157.0),
        "nd" => Some(685.0 / 642.0),
        "nc" => Some(1370.0 / 107.0),
        "sp" => Some(1.0 / 65536.0),
        _ => None,
    }
}

/// Whether `unit` is a length unit the parser accepts.
pub fn valid_unit<T>(unit: T) -> bool
where
    T: AsRef<str>,
{
    pt_per_unit(unit.as_ref()).is_some() || matches!(unit.as_ref(), "ex" | "em" | "mu")
}

impl LayoutContext {
    /// Converts `size` into ems at the size of `options`, clamped to
    /// `options.max_size`.
    pub fn calculate_size<T>(&self, size: &Measurement<T>, options: &Options) -> Result<f64, ParseError>
    where
        T: AsRef<str>,
    {
        let unit = size.unit.as_ref();
        let scale = if let Some(pt) = pt_per_unit(unit) {
            // Absolute units are unscaled from the current size
            pt / self.font_metrics(options).pt_per_em / options.size_multiplier
        } else if unit == "mu" {
            self.font_metrics(options).css_em_per_mu
        } else {
            // em and ex always refer to the textstyle font at the current size
            let unit_options = if options.style.is_tight() {
                options.having_style(options.style.text())
            } else {
                options.clone()
            };
            let metrics = self.font_metrics(&unit_options);
            let mut scale = match unit {
                "ex" => metrics.x_height,
                "em" => metrics.quad,
                other => {
                    return Err(ParseError::new(ParseErrorKind::InvalidUnit {
                        unit: other.to_owned(),
                    }));
                }
            };
            if unit_options.size != options.size {
                scale *= unit_options.size_multiplier / options.size_multiplier;
            }
            scale
        };

        Ok(f64::min(size.number * scale, options.max_size))
    }
}

/// Rounds to 4 decimal places and appends "em", dropping trailing zeros.
#[must_use]
pub fn make_em(n: f64) -> String {
    let mut s = format!("{n:.4}");

    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        "0".clone_into(&mut s);
    }

    s.push_str("em");
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spacing_data::{MeasurementOwned, THINSPACE};
    use crate::style::SCRIPT;

    fn measure(number: f64, unit: &str) -> MeasurementOwned {
        MeasurementOwned {
            number,
            unit: unit.to_owned(),
        }
    }

    #[test]
    fn test_valid_unit() {
        for unit in ["pt", "mm", "cm", "in", "bp", "px", "pc", "dd", "cc", "nd", "nc", "sp"] {
            assert!(valid_unit(unit), "{unit}");
        }
        assert!(valid_unit("em"));
        assert!(valid_unit("mu"));
        assert!(!valid_unit("furlong"));
    }

    #[test]
    fn test_make_em() {
        assert_eq!(make_em(1.0), "1em");
        assert_eq!(make_em(2.7), "2.7em");
        assert_eq!(make_em(-3.23), "-3.23em");
        assert_eq!(make_em(1.23456), "1.2346em");
        assert_eq!(make_em(-0.00001), "0em");
        assert_eq!(make_em(0.04), "0.04em");
    }

    #[test]
    fn test_absolute_and_relative_units() {
        let ctx = LayoutContext::default();
        let options = Options::default();
        let ten_pt = ctx.calculate_size(&measure(10.0, "pt"), &options).unwrap();
        assert!((ten_pt - 1.0).abs() < 1e-9);
        let two_em = ctx.calculate_size(&measure(2.0, "em"), &options).unwrap();
        assert!((two_em - 2.0).abs() < 1e-9);
        let one_ex = ctx.calculate_size(&measure(1.0, "ex"), &options).unwrap();
        assert!((one_ex - 0.431).abs() < 1e-9);
    }

    #[test]
    fn test_mu_follows_script_size() {
        let ctx = LayoutContext::default();
        let text = ctx.calculate_size(&THINSPACE, &Options::default()).unwrap();
        assert!((text - 3.0 / 18.0).abs() < 1e-9);

        let script = Options::default().having_style(SCRIPT);
        let tight = ctx.calculate_size(&THINSPACE, &script).unwrap();
        assert!((tight - 3.0 * 1.171 / 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_size_clamps() {
        let ctx = LayoutContext::default();
        let options = Options::builder()
            .style(crate::style::TEXT)
            .max_size(5.0)
            .build();
        let size = ctx.calculate_size(&measure(100.0, "em"), &options).unwrap();
        assert_eq!(size, 5.0);
    }

    #[test]
    fn test_invalid_unit() {
        let ctx = LayoutContext::default();
        let err = ctx.calculate_size(&measure(1.0, "furlong"), &Options::default()).unwrap_err();
        assert!(matches!(err.kind.as_ref(), ParseErrorKind::InvalidUnit { .. }));
    }
}
