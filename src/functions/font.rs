//! Math font commands, `\mathrm` and `\mathnormal`

use crate::build_tree::build_group;
use crate::context::LayoutContext;
use crate::define_function::{
    FunctionContext, FunctionDefSpec, FunctionPropSpec, normalize_argument,
};
use crate::dom_tree::RenderNode;
use crate::options::{FontFamily, Options};
use crate::parser::parse_node::{ParseNode, ParseNodeFont};
use crate::types::{LayoutError, ParseError};

fn font_handler(
    context: FunctionContext,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let font = match context.func_name.as_str() {
        "\\mathrm" => FontFamily::MathRm,
        "\\mathnormal" => FontFamily::MathNormal,
        _ => return Err(context.error("Unrecognized font command")),
    };
    let Some(arg) = args.first() else {
        return Err(context.error("Font command needs an argument"));
    };

    Ok(ParseNode::Font(ParseNodeFont {
        mode: context.parser.mode,
        loc: context.loc(),
        font,
        body: Box::new(normalize_argument(arg).clone()),
    }))
}

/// Registers the math font commands.
pub fn define_font(ctx: &mut LayoutContext) {
    ctx.define_function(&FunctionDefSpec {
        names: &["\\mathrm", "\\mathnormal"],
        props: FunctionPropSpec {
            num_args: 1,
            allowed_in_argument: true,
            ..Default::default()
        },
        handler: font_handler,
    });
}

/// Builds the body with the font selected.
pub fn box_builder(
    ctx: &LayoutContext,
    group: &ParseNodeFont,
    options: &Options,
) -> Result<RenderNode, LayoutError> {
    build_group(ctx, &group.body, &options.with_font(group.font), None)
}
