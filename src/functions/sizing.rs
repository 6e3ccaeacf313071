//! Size commands, `\tiny` through `\Huge`
//!
//! A size command applies to the rest of its group. Its body is built at the
//! new size and every box gets the classes that switch to that size.

use crate::build_common::make_span;
use crate::build_tree::build_expression;
use crate::context::LayoutContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::dom_tree::RenderNode;
use crate::options::Options;
use crate::parser::parse_node::{AnyParseNode, ParseNode, ParseNodeSizing};
use crate::types::{LayoutError, ParseError};

/// Size commands, indexed by size level minus one.
pub const SIZE_FUNCS: [&str; 11] = [
    "\\tiny",
    "\\sixptsize",
    "\\scriptsize",
    "\\footnotesize",
    "\\small",
    "\\normalsize",
    "\\large",
    "\\Large",
    "\\LARGE",
    "\\huge",
    "\\Huge",
];

/// Builds `body` under `options` and rescales each box into the units of
/// `base_options`.
pub fn sizing_group(
    ctx: &LayoutContext,
    body: &[AnyParseNode],
    options: &Options,
    base_options: &Options,
) -> Result<RenderNode, LayoutError> {
    let mut inner = build_expression(ctx, body, options, false, (None, None))?;
    let multiplier = options.size_multiplier / base_options.size_multiplier;

    for item in &mut inner {
        let (classes, height, depth) = match item {
            RenderNode::Symbol(symbol) => {
                (&mut symbol.classes, &mut symbol.height, &mut symbol.depth)
            }
            RenderNode::Span(span) => (&mut span.classes, &mut span.height, &mut span.depth),
        };

        // A box that already switches size keeps its own reset
        if !classes.iter().any(|c| c == "sizing") {
            classes.extend(options.sizing_classes(base_options));
        }

        *height *= multiplier;
        *depth *= multiplier;
    }

    Ok(make_span(vec![], inner, None, None).into())
}

fn sizing_handler(
    context: FunctionContext,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let Some(index) = SIZE_FUNCS
        .iter()
        .position(|name| *name == context.func_name)
    else {
        return Err(context.error("Unrecognized size command"));
    };
    let body = context
        .parser
        .parse_expression(false, context.break_on_token_text)?;

    Ok(ParseNode::Sizing(ParseNodeSizing {
        mode: context.parser.mode,
        loc: context.loc(),
        size: index + 1,
        body,
    }))
}

/// Registers the size commands.
pub fn define_sizing(ctx: &mut LayoutContext) {
    ctx.define_function(&FunctionDefSpec {
        names: &SIZE_FUNCS,
        props: FunctionPropSpec {
            allowed_in_text: true,
            ..Default::default()
        },
        handler: sizing_handler,
    });
}

/// Builds the rest of a group at a new size.
pub fn box_builder(
    ctx: &LayoutContext,
    group: &ParseNodeSizing,
    options: &Options,
) -> Result<RenderNode, LayoutError> {
    let new_options = options.having_size(group.size);
    sizing_group(ctx, &group.body, &new_options, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_tree::build_group;
    use crate::parser::parse;
    use crate::types::Settings;

    fn build(input: &str) -> RenderNode {
        let ctx = LayoutContext::default();
        let nodes = parse(input, &Settings::default(), &ctx).unwrap();
        build_group(&ctx, &nodes[0], &Options::default(), None).unwrap()
    }

    #[test]
    fn test_size_command_takes_rest_of_group() {
        let ctx = LayoutContext::default();
        let nodes = parse("\\Large x y", &Settings::default(), &ctx).unwrap();
        assert_eq!(nodes.len(), 1);
        let ParseNode::Sizing(sizing) = &nodes[0] else {
            panic!("expected sizing");
        };
        assert_eq!(sizing.size, 8);
        assert_eq!(sizing.body.len(), 2);
    }

    #[test]
    fn test_sizing_classes_and_scale() {
        let built = build("\\Large x");
        let x = &built.children()[0];
        assert_eq!(x.classes(), ["mord", "mathdefault", "sizing", "reset-size6", "size8"]);
        assert!((x.height() - 0.43056 * 1.44).abs() < 1e-9);
        assert!((built.height() - 0.43056 * 1.44).abs() < 1e-9);
    }

    #[test]
    fn test_nested_size_change_resets_from_enclosing_size() {
        let built = build("\\Huge a \\small b");
        let inner = &built.children()[1];
        assert_eq!(inner.classes(), ["sizing", "reset-size6", "size11"]);
        let b = &inner.children()[0];
        assert_eq!(b.classes(), ["mord", "mathdefault", "sizing", "reset-size11", "size5"]);
        assert!((b.height() - 0.43056 * 0.9 / 2.488).abs() < 1e-9);
    }
}
