//! Style commands: `\displaystyle`, `\textstyle`, `\scriptstyle` and
//! `\scriptscriptstyle`

use crate::context::LayoutContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::dom_tree::RenderNode;
use crate::functions::sizing::sizing_group;
use crate::options::Options;
use crate::parser::parse_node::{ParseNode, ParseNodeStyling};
use crate::style::Style;
use crate::types::{LayoutError, ParseError, ParseErrorKind};

fn styling_handler(
    context: FunctionContext,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let Some(style) = Style::from_command(&context.func_name) else {
        return Err(context.error(ParseErrorKind::UndefinedControlSequence {
            name: context.func_name.clone(),
        }));
    };
    // An infix command after the style belongs to the enclosing group, so
    // `\displaystyle a \over b` sets the whole fraction in display style
    let body = context
        .parser
        .parse_expression(true, context.break_on_token_text)?;

    Ok(ParseNode::Styling(ParseNodeStyling {
        mode: context.parser.mode,
        loc: context.loc(),
        style,
        body,
    }))
}

/// Registers the style commands.
pub fn define_styling(ctx: &mut LayoutContext) {
    ctx.define_function(&FunctionDefSpec {
        names: &[
            "\\displaystyle",
            "\\textstyle",
            "\\scriptstyle",
            "\\scriptscriptstyle",
        ],
        props: FunctionPropSpec {
            allowed_in_text: true,
            ..Default::default()
        },
        handler: styling_handler,
    });
}

/// Builds the rest of a group in a new style.
pub fn box_builder(
    ctx: &LayoutContext,
    group: &ParseNodeStyling,
    options: &Options,
) -> Result<RenderNode, LayoutError> {
    let new_options = options.having_style(group.style);
    sizing_group(ctx, &group.body, &new_options, options)
}
