//! Shared layout context
//!
//! The [`LayoutContext`] owns everything a layout run reads but never
//! writes: the function registry the parser consults, the symbol table and
//! the font metrics provider. Build one, then share it freely; it is
//! `Send + Sync` and no operation mutates it.

use crate::define_function::{FunctionDefSpec, FunctionSpec};
use crate::font_metrics::{BuiltinMetrics, FontMetrics, MetricsProvider};
use crate::functions;
use crate::namespace::KeyMap;
use crate::options::Options;
use crate::symbols::Symbols;

/// Registry of functions and symbols plus the metrics source.
pub struct LayoutContext {
    /// All registered functions, keyed by control sequence
    pub functions: KeyMap<String, FunctionSpec>,
    /// Math and text mode symbol tables
    pub symbols: Symbols,
    metrics: Box<dyn MetricsProvider>,
}

impl LayoutContext {
    /// A context with the built-in functions and symbols that measures
    /// glyphs with `metrics`.
    #[must_use]
    pub fn with_metrics<M>(metrics: M) -> Self
    where
        M: MetricsProvider + 'static,
    {
        let mut ctx = Self {
            functions: KeyMap::default(),
            symbols: Symbols::default(),
            metrics: Box::new(metrics),
        };
        functions::define_all(&mut ctx);
        ctx
    }

    /// Registers every name of `spec`, replacing earlier definitions.
    pub fn define_function(&mut self, spec: &FunctionDefSpec) {
        let data = FunctionSpec::from(spec);
        for name in spec.names {
            self.functions.insert((*name).to_owned(), data.clone());
        }
    }

    /// The metrics provider.
    #[must_use]
    pub fn metrics(&self) -> &dyn MetricsProvider {
        self.metrics.as_ref()
    }

    /// Global constants for the size of `options`.
    #[must_use]
    pub fn font_metrics(&self, options: &Options) -> &FontMetrics {
        self.metrics.global_metrics(options.font_size_index())
    }
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::with_metrics(BuiltinMetrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{SCRIPT, SCRIPTSCRIPT};

    #[test]
    fn test_context_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LayoutContext>();
    }

    #[test]
    fn test_font_metrics_follow_size() {
        let ctx = LayoutContext::default();
        let text = Options::default();
        assert_eq!(ctx.font_metrics(&text).x_height, 0.431);
        assert_eq!(ctx.font_metrics(&text.having_style(SCRIPT)).sup1, 0.503);
        assert_eq!(ctx.font_metrics(&text.having_style(SCRIPTSCRIPT)).quad, 1.472);
    }

    #[test]
    fn test_builtin_functions_registered() {
        let ctx = LayoutContext::default();
        for name in ["\\frac", "\\sqrt", "\\left", "\\sum", "\\text", "\\over", "\\,"] {
            assert!(ctx.functions.contains_key(name), "{name}");
        }
        assert!(ctx.functions.get("\\over").is_some_and(|f| f.infix));
    }
}
