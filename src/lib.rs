//! TeX math layout engine
//!
//! Parses LaTeX-style math markup into a tree of parse nodes, then lays the
//! tree out as nested boxes measured with TeX font metrics. Every box carries
//! its height, depth and width in ems together with the CSS classes and
//! inline styles a renderer needs to draw it. The layout follows the
//! appendix G rules of the TeXbook: atom classes and the glue between them,
//! scripts, fractions, radicals, large operators and extensible delimiters.
//!
//! The pipeline has two stages:
//!
//! 1. [`parse`] turns the source into [`ParseNode`](parser::parse_node::ParseNode)s
//!    using the function and symbol tables of a [`LayoutContext`].
//! 2. [`build_tree`] lays the nodes out as a [`BoxSpan`].
//!
//! [`render_to_tree`] runs both.
//!
//! ```rust
//! use katex_layout::{LayoutContext, Settings, render_to_tree};
//!
//! let ctx = LayoutContext::default();
//! let tree = render_to_tree(&ctx, "a+b", &Settings::default()).unwrap();
//! assert_eq!(tree.classes, ["mord"]);
//! assert_eq!(tree.children.len(), 5);
//! ```
#![warn(missing_docs)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::str_to_string)]
#![warn(clippy::non_ascii_literal)]
#![warn(clippy::pointer_format)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::absolute_paths)]
#![warn(clippy::panic)]
#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_in_result)]
#![warn(clippy::if_then_some_else_none)]
#![warn(clippy::unused_trait_names)]
#![warn(clippy::get_unwrap)]
#![warn(clippy::impl_trait_in_params)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::unimplemented)]
#![warn(clippy::return_and_then)]
#![warn(clippy::needless_raw_strings)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::rc_buffer)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::map_with_unused_argument_over_ranges)]
#![warn(clippy::missing_asserts_for_indexing)]
#![warn(clippy::separated_literal_suffix)]
#![warn(clippy::ref_patterns)]
// Not sure
#![allow(clippy::indexing_slicing)]
#![allow(clippy::string_slice)]
#![allow(clippy::pub_use)]
// clippy exceptions
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::default_numeric_fallback)]
#![allow(clippy::single_call_fn)]

extern crate alloc;
pub mod build_common;
pub mod build_tree;
pub mod context;
pub mod define_function;
pub mod delimiter;
pub mod dom_tree;
pub mod font_metrics;
pub mod font_metrics_data;
pub mod functions;
pub mod lexer;
pub mod namespace;
pub mod options;
/// Core parsing logic for LaTeX mathematical expressions.
pub mod parser;
pub mod spacing_data;
pub mod style;
pub mod symbols;
pub mod types;
pub mod units;

/// Registry of functions and symbols plus the font metrics source, shared by
/// every parse and layout.
///
/// The context is immutable once built and can be shared between threads.
///
/// # Examples
///
/// ```rust
/// use katex_layout::LayoutContext;
///
/// let ctx = LayoutContext::default();
/// assert!(ctx.functions.contains_key("\\frac"));
/// ```
pub use crate::context::LayoutContext;

/// Parses an expression into a list of parse nodes.
///
/// # Parameters
/// * `input` - The LaTeX math expression
/// * `settings` - Parsing configuration, notably the strict mode
/// * `ctx` - The function and symbol tables to parse with
///
/// # Returns
/// The top-level nodes of the expression, or a [`ParseError`] pointing at
/// the offending input.
pub use crate::parser::parse;

/// Lays out a parsed expression as one box.
///
/// The result is measured in ems of the text size. A formula that builds to
/// a single span is returned as is; otherwise the pieces are wrapped in an
/// ordinary span.
pub use crate::build_tree::build_tree;

/// Parses and lays out an expression in one step.
///
/// Errors from both stages come back as a [`LayoutError`]:
///
/// ```rust
/// use katex_layout::{LayoutContext, LayoutError, Settings, render_to_tree};
///
/// let ctx = LayoutContext::default();
/// match render_to_tree(&ctx, "\\frac{a}{", &Settings::default()) {
///     Err(LayoutError::Parse(err)) => assert!(err.to_string().contains("Expected")),
///     other => panic!("expected a parse error, got {other:?}"),
/// }
/// ```
pub use crate::build_tree::render_to_tree;

/// Builds a sequence of nodes with the glue between atoms.
pub use crate::build_tree::build_expression;

/// Builds a single node.
pub use crate::build_tree::build_group;

/// Configuration for parsing and layout: display mode, strictness and size
/// limits.
///
/// # Examples
///
/// ```rust
/// use katex_layout::Settings;
/// use katex_layout::types::StrictMode;
///
/// let settings = Settings::builder()
///     .display_mode(true)
///     .strict(StrictMode::Error)
///     .build();
/// assert!(settings.display_mode);
/// ```
pub use crate::types::Settings;

/// Error for malformed input.
///
/// Carries the reason as a [`ParseErrorKind`](types::ParseErrorKind) and,
/// when known, the byte range of the offending token. The message includes
/// the surrounding input with the range underlined.
pub use crate::types::ParseError;

/// Any failure of [`render_to_tree`] or [`build_tree`].
pub use crate::types::LayoutError;

/// A glyph missing from the metrics provider.
pub use crate::types::MetricsLookupError;

/// A box: either a glyph or a span of boxes.
pub use crate::dom_tree::RenderNode;

/// A span of boxes with its measured extent.
pub use crate::dom_tree::BoxSpan;

/// A single glyph with its metrics.
pub use crate::dom_tree::SymbolNode;

/// The layout state: style, size and font.
pub use crate::options::Options;

/// Source of glyph measurements and global constants.
///
/// Implement it to lay out with metrics other than the built-in Computer
/// Modern tables, then pass it to [`LayoutContext::with_metrics`].
pub use crate::font_metrics::MetricsProvider;

/// Measurements of one glyph: height, depth, italic correction, skew and
/// width, in ems.
pub use crate::font_metrics_data::CharacterMetrics;
