//! Upright text inside math, `\text` and `\textrm`

use crate::build_common::make_span;
use crate::build_tree::build_expression;
use crate::context::LayoutContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec, ord_argument};
use crate::dom_tree::RenderNode;
use crate::options::{FontFamily, Options};
use crate::parser::parse_node::{ParseNode, ParseNodeText};
use crate::types::{ArgType, LayoutError, ParseError};

fn text_handler(
    context: FunctionContext,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let Some(body) = args.into_iter().next() else {
        return Err(context.error("Text command needs an argument"));
    };
    Ok(ParseNode::Text(ParseNodeText {
        mode: context.parser.mode,
        loc: context.loc(),
        body: ord_argument(body),
        font: FontFamily::TextRm,
    }))
}

/// Registers the text commands.
pub fn define_text(ctx: &mut LayoutContext) {
    ctx.define_function(&FunctionDefSpec {
        names: &["\\text", "\\textrm"],
        props: FunctionPropSpec {
            num_args: 1,
            arg_types: Some(vec![ArgType::Text]),
            allowed_in_argument: true,
            allowed_in_text: true,
            ..Default::default()
        },
        handler: text_handler,
    });
}

/// Builds the text run in the text font.
pub fn box_builder(
    ctx: &LayoutContext,
    group: &ParseNodeText,
    options: &Options,
) -> Result<RenderNode, LayoutError> {
    let new_options = options.with_font(group.font);
    let inner = build_expression(ctx, &group.body, &new_options, true, (None, None))?;
    Ok(make_span(
        vec!["mord".to_owned(), "text".to_owned()],
        inner,
        Some(&new_options),
        None,
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_tree::build_group;
    use crate::parser::parse;
    use crate::style::SCRIPT;
    use crate::types::Settings;

    fn build(input: &str, options: &Options) -> RenderNode {
        let ctx = LayoutContext::default();
        let nodes = parse(input, &Settings::default(), &ctx).unwrap();
        build_group(&ctx, &nodes[0], options, None).unwrap()
    }

    #[test]
    fn test_text_keeps_spaces_and_is_upright() {
        let built = build("\\text{a b}", &Options::default());
        assert_eq!(built.classes(), ["mord", "text"]);
        let children = built.children();
        assert_eq!(children.len(), 3);
        assert!(children.iter().all(|c| c.italic() == 0.0));
        assert!(children[0].has_class("textrm"));
        let width: f64 = children.iter().map(RenderNode::width).sum();
        assert!((built.width() - width).abs() < 1e-9);
    }

    #[test]
    fn test_text_in_script_is_tight() {
        let built = build("\\text{a}", &Options::default().having_style(SCRIPT));
        assert!(built.has_class("mtight"));
    }

    #[test]
    fn test_text_as_script_argument() {
        let built = build("x^\\text{a}", &Options::default());
        assert!(built.children()[1].has_class("msupsub"));
    }
}
