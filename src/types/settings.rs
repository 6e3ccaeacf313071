use bon::bon;

use crate::types::{ErrorLocationProvider, ParseError, ParseErrorKind};

/// How to react to input that LaTeX itself would reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrictMode {
    /// Accept silently.
    Ignore,
    /// Accept and log a warning through the `log` facade.
    #[default]
    Warn,
    /// Reject with a [`ParseError`].
    Error,
}

/// Resolved configuration for one layout run.
///
/// Every field carries a concrete value; use [`Settings::builder`] to fill
/// in only the options you care about.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Lay out in display style instead of text style.
    pub display_mode: bool,
    /// Lower bound for rule thickness, in ems.
    pub min_rule_thickness: f64,
    /// Upper bound for user-specified sizes, in ems.
    pub max_size: f64,
    /// Strictness for LaTeX-incompatible input.
    pub strict: StrictMode,
    /// Deepest nesting of groups and function calls the parser accepts.
    pub max_nesting: usize,
}

#[bon]
impl Settings {
    /// Creates settings, applying defaults for every option left out.
    ///
    /// # Default Values
    /// - `display_mode`: `false`
    /// - `min_rule_thickness`: `0.0`
    /// - `max_size`: `f64::INFINITY`
    /// - `strict`: [`StrictMode::Warn`]
    /// - `max_nesting`: `40`
    #[must_use]
    #[builder]
    pub fn new(
        /// Display mode (true for block, false for inline).
        display_mode: Option<bool>,
        /// Minimum rule thickness in ems.
        min_rule_thickness: Option<f64>,
        /// Maximum user size in ems.
        max_size: Option<f64>,
        /// Strict mode configuration.
        strict: Option<StrictMode>,
        /// Nesting limit for groups and function calls.
        max_nesting: Option<usize>,
    ) -> Self {
        Self {
            display_mode: display_mode.unwrap_or(false),
            min_rule_thickness: min_rule_thickness.unwrap_or(0.0).max(0.0),
            max_size: max_size.unwrap_or(f64::INFINITY).max(0.0),
            strict: strict.unwrap_or_default(),
            max_nesting: max_nesting.unwrap_or(40),
        }
    }

    /// Reports non-standard input according to [`Settings::strict`].
    ///
    /// Returns an error only in [`StrictMode::Error`].
    pub fn report_nonstrict(
        &self,
        error_code: &str,
        error_msg: &str,
        token: Option<&dyn ErrorLocationProvider>,
    ) -> Result<(), ParseError> {
        match self.strict {
            StrictMode::Ignore => Ok(()),
            StrictMode::Warn => {
                log::warn!(
                    "LaTeX-incompatible input and strict mode is set to 'warn': {error_msg} [{error_code}]"
                );
                Ok(())
            }
            StrictMode::Error => {
                let kind = ParseErrorKind::StrictModeError {
                    message: error_msg.to_owned(),
                    code: error_code.to_owned(),
                };
                Err(match token {
                    Some(t) => ParseError::with_token(kind, t),
                    None => ParseError::new(kind),
                })
            }
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.display_mode);
        assert_eq!(settings.strict, StrictMode::Warn);
        assert_eq!(settings.min_rule_thickness, 0.0);
        assert!(settings.max_size.is_infinite());
        assert_eq!(settings.max_nesting, 40);
    }

    #[test]
    fn test_negative_bounds_are_clamped() {
        let settings = Settings::builder()
            .max_size(-3.0)
            .min_rule_thickness(-1.0)
            .build();
        assert_eq!(settings.max_size, 0.0);
        assert_eq!(settings.min_rule_thickness, 0.0);
    }

    #[test]
    fn test_report_nonstrict_by_mode() {
        let ignore = Settings::builder().strict(StrictMode::Ignore).build();
        assert!(ignore.report_nonstrict("code", "msg", None).is_ok());

        let warn = Settings::builder().strict(StrictMode::Warn).build();
        assert!(warn.report_nonstrict("code", "msg", None).is_ok());

        let error = Settings::builder().strict(StrictMode::Error).build();
        let err = error.report_nonstrict("commentAtEnd", "msg", None).unwrap_err();
        assert!(matches!(
            err.kind.as_ref(),
            ParseErrorKind::StrictModeError { code, .. } if code == "commentAtEnd"
        ));
    }
}
