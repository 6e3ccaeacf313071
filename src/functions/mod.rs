//! Control sequences and the builders for the nodes they produce
//!
//! Each submodule owns one family of constructs. A `define_*` function
//! registers the family's control sequences with a [`LayoutContext`]: their
//! argument counts and kinds and the handler that turns parsed arguments
//! into a parse node. A `box_builder` function turns the family's parse
//! node into boxes; the builder in [`crate::build_tree`] dispatches to it by
//! node type.
//!
//! Nodes that no control sequence produces directly (braced groups, plain
//! symbols, scripts) only have builders.

use crate::context::LayoutContext;

pub mod delimsizing;
pub mod font;
pub mod genfrac;
pub mod kern;
pub mod op;
pub mod ordgroup;
pub mod sizing;
pub mod sqrt;
pub mod styling;
pub mod supsub;
pub mod symbols;
pub mod text;
pub mod utils;

/// Registers `\frac`, `\dfrac`, `\tfrac`, the binomials and the infix
/// `\over`, `\choose` and `\atop`.
pub use genfrac::define_genfrac;

/// Registers `\sqrt` with its optional index.
pub use sqrt::define_sqrt;

/// Registers `\tiny` through `\Huge`.
pub use sizing::define_sizing;

/// Registers `\displaystyle`, `\textstyle`, `\scriptstyle` and
/// `\scriptscriptstyle`.
pub use styling::define_styling;

/// Registers `\kern`, `\mkern`, `\hspace` and the named spaces such as `\,`
/// and `\quad`.
pub use kern::define_kern;

/// Registers `\big` and its variants, `\left` and `\right`.
pub use delimsizing::define_delimsizing;

/// Registers large operators such as `\sum` and named operators such as
/// `\sin`.
pub use op::define_op;

/// Registers `\mathrm` and `\mathnormal`.
pub use font::define_font;

/// Registers `\text` and `\textrm`.
pub use text::define_text;

/// Registers every built-in control sequence.
pub fn define_all(ctx: &mut LayoutContext) {
    define_genfrac(ctx);
    define_sqrt(ctx);
    define_sizing(ctx);
    define_styling(ctx);
    define_kern(ctx);
    define_delimsizing(ctx);
    define_op(ctx);
    define_font(ctx);
    define_text(ctx);
}
