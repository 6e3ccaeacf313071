//! Large and named operators
//!
//! Symbol operators (`\sum`, `\int`, ...) are set in the `Size1`/`Size2`
//! fonts and centred on the math axis, TeXbook rule 13. Named operators
//! (`\sin`, `\lim`, ...) are upright text with operator spacing.

use phf::{Map, phf_map};

use crate::build_common::{make_span, make_symbol, mathsym};
use crate::context::LayoutContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::dom_tree::RenderNode;
use crate::functions::utils::assemble_sup_sub;
use crate::options::Options;
use crate::parser::parse_node::{AnyParseNode, OpContent, ParseNode, ParseNodeOp};
use crate::style::DISPLAY;
use crate::types::{CssProperty, LayoutError, Mode, ParseError, SourceLocation};
use crate::units::make_em;

const SYMBOL_OPS: Map<&'static str, &'static str> = phf_map! {
    "\\sum" => "\u{2211}",
    "\\prod" => "\u{220f}",
    "\\coprod" => "\u{2210}",
    "\\bigcap" => "\u{22c2}",
    "\\bigcup" => "\u{22c3}",
    "\\int" => "\u{222b}",
    "\\intop" => "\u{222b}",
    "\\oint" => "\u{222e}",
};

/// Integrals keep their scripts at the side even in display style.
fn no_limits(text: &str) -> bool {
    matches!(text, "\u{222b}" | "\u{222e}")
}

/// The operator node for a large-operator glyph.
#[must_use]
pub fn symbol_op(mode: Mode, loc: Option<SourceLocation>, text: &str) -> ParseNode {
    ParseNode::Op(ParseNodeOp {
        mode,
        loc,
        limits: !no_limits(text),
        always_handle_sup_sub: false,
        content: OpContent::Symbol(text.to_owned()),
    })
}

fn symbol_op_handler(
    context: FunctionContext,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let Some(text) = SYMBOL_OPS.get(context.func_name.as_str()) else {
        return Err(context.error("Unrecognized operator"));
    };
    Ok(symbol_op(context.parser.mode, context.loc(), text))
}

fn named_op_handler(
    context: FunctionContext,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let name = context
        .func_name
        .strip_prefix('\\')
        .unwrap_or(&context.func_name)
        .to_owned();
    let limits = matches!(
        name.as_str(),
        "lim" | "max" | "min" | "det" | "sup" | "inf" | "gcd" | "Pr"
    );
    Ok(ParseNode::Op(ParseNodeOp {
        mode: context.parser.mode,
        loc: context.loc(),
        limits,
        always_handle_sup_sub: false,
        content: OpContent::Name(name),
    }))
}

/// Registers symbol and named operators.
pub fn define_op(ctx: &mut LayoutContext) {
    ctx.define_function(&FunctionDefSpec {
        names: &[
            "\\sum", "\\prod", "\\coprod", "\\bigcap", "\\bigcup", "\\int", "\\intop", "\\oint",
        ],
        props: FunctionPropSpec::default(),
        handler: symbol_op_handler,
    });

    ctx.define_function(&FunctionDefSpec {
        names: &[
            "\\arcsin", "\\arccos", "\\arctan", "\\arg", "\\cos", "\\cosh", "\\cot", "\\coth",
            "\\csc", "\\deg", "\\dim", "\\exp", "\\hom", "\\ker", "\\lg", "\\ln", "\\log",
            "\\sec", "\\sin", "\\sinh", "\\tan", "\\tanh",
        ],
        props: FunctionPropSpec::default(),
        handler: named_op_handler,
    });

    ctx.define_function(&FunctionDefSpec {
        names: &[
            "\\det", "\\gcd", "\\inf", "\\lim", "\\max", "\\min", "\\Pr", "\\sup",
        ],
        props: FunctionPropSpec::default(),
        handler: named_op_handler,
    });
}

/// Builds an operator, placing `sup` and `sub` as limits when given.
pub fn box_builder(
    ctx: &LayoutContext,
    group: &ParseNodeOp,
    sup: Option<&AnyParseNode>,
    sub: Option<&AnyParseNode>,
    options: &Options,
) -> Result<RenderNode, LayoutError> {
    let has_limits = sup.is_some() || sub.is_some();
    let style = options.style;

    let mut base_shift = 0.0;
    let mut slant = 0.0;

    let mut base: RenderNode = match &group.content {
        OpContent::Symbol(text) => {
            // Rule 13: symbol operators grow in display style
            let large = style.size == DISPLAY.size;
            let font_name = if large {
                "Size2-Regular"
            } else {
                "Size1-Regular"
            };
            let classes = vec![
                "mop".to_owned(),
                "op-symbol".to_owned(),
                if large { "large-op" } else { "small-op" }.to_owned(),
            ];
            let symbol = make_symbol(ctx, text, font_name, Mode::Math, Some(options), classes)?;

            // Centre on the axis
            let axis_height = ctx.font_metrics(options).axis_height;
            base_shift = (symbol.height - symbol.depth) / 2.0 - axis_height;
            slant = symbol.italic;
            symbol.into()
        }
        OpContent::Name(name) => {
            let mut output = Vec::with_capacity(name.len());
            for ch in name.chars() {
                output.push(mathsym(ctx, &ch.to_string(), group.mode, options, vec![])?.into());
            }
            make_span(vec!["mop".to_owned()], output, Some(options), None).into()
        }
    };

    if has_limits {
        return assemble_sup_sub(ctx, base, sup, sub, options, style, slant, base_shift);
    }

    if base_shift != 0.0 {
        base.style_mut().insert(CssProperty::Top, make_em(base_shift));
    }
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_tree::build_group;
    use crate::parser::parse;
    use crate::types::Settings;

    fn build(input: &str, options: &Options) -> RenderNode {
        let ctx = LayoutContext::default();
        let nodes = parse(input, &Settings::default(), &ctx).unwrap();
        build_group(&ctx, &nodes[0], options, None).unwrap()
    }

    #[test]
    fn test_integrals_default_to_side_scripts() {
        let ParseNode::Op(op) = symbol_op(Mode::Math, None, "\u{222b}") else {
            panic!("expected op");
        };
        assert!(!op.limits);
        let ParseNode::Op(op) = symbol_op(Mode::Math, None, "\u{2211}") else {
            panic!("expected op");
        };
        assert!(op.limits);
    }

    #[test]
    fn test_sum_grows_in_display_style() {
        let text = build("\\sum", &Options::default());
        assert!(text.has_class("small-op"));
        assert!((text.height() - 0.75).abs() < 1e-9);

        let display = build("\\sum", &Options::default().having_style(DISPLAY));
        assert!(display.has_class("large-op"));
        assert!(display.has_class("op-symbol"));
        assert!((display.height() - 1.05).abs() < 1e-9);
    }

    #[test]
    fn test_display_sum_stacks_limits() {
        let built = build("\\sum_{i=1}^n", &Options::default().having_style(DISPLAY));
        assert_eq!(built.classes(), ["mop", "op-limits"]);
        assert!(built.height() > 1.05);
        assert!(built.depth() > 0.55);
    }

    #[test]
    fn test_text_sum_keeps_side_scripts() {
        let built = build("\\sum_{i=1}^n", &Options::default());
        assert!(built.has_class("mop"));
        assert!(built.children()[1].has_class("msupsub"));
    }

    #[test]
    fn test_limits_forces_stacking() {
        let built = build("\\int\\limits_0^1", &Options::default());
        assert!(built.has_class("op-limits"));
    }

    #[test]
    fn test_named_operator() {
        let built = build("\\sin", &Options::default());
        assert_eq!(built.classes(), ["mop"]);
        assert_eq!(built.children().len(), 3);
        assert!(
            built
                .children()
                .iter()
                .all(|c| c.as_symbol().is_some_and(|s| s.italic == 0.0))
        );
    }

    #[test]
    fn test_lim_takes_limits_in_display() {
        let built = build("\\lim_{x}", &Options::default().having_style(DISPLAY));
        assert!(built.has_class("op-limits"));
    }
}
