//! Radicals, TeXbook rule 11
//!
//! The radical sign is a `\surd` glyph sized to the radicand, or a
//! `sqrt-tall` box of the exact height once no glyph is tall enough. A rule
//! is drawn over the radicand at the top of the sign.

use crate::build_common::{
    VListChild, VListElem, VListParam, make_line_span, make_span, make_v_list,
};
use crate::build_tree::build_group;
use crate::context::LayoutContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::delimiter::make_sqrt_image;
use crate::dom_tree::RenderNode;
use crate::options::Options;
use crate::parser::parse_node::{ParseNode, ParseNodeSqrt};
use crate::style::{SCRIPTSCRIPT, TEXT};
use crate::types::{CssProperty, LayoutError, ParseError};
use crate::units::make_em;

fn sqrt_handler(
    context: FunctionContext,
    args: Vec<ParseNode>,
    opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let Some(body) = args.into_iter().next() else {
        return Err(context.error("\\sqrt needs a radicand"));
    };
    let index = opt_args.into_iter().next().flatten();
    Ok(ParseNode::Sqrt(Box::new(ParseNodeSqrt {
        mode: context.parser.mode,
        loc: context.loc(),
        body,
        index,
    })))
}

/// Registers `\sqrt`.
pub fn define_sqrt(ctx: &mut LayoutContext) {
    ctx.define_function(&FunctionDefSpec {
        names: &["\\sqrt"],
        props: FunctionPropSpec {
            num_args: 1,
            num_optional_args: 1,
            ..Default::default()
        },
        handler: sqrt_handler,
    });
}

/// Builds a radical with its optional index.
pub fn box_builder(
    ctx: &LayoutContext,
    group: &ParseNodeSqrt,
    options: &Options,
) -> Result<RenderNode, LayoutError> {
    let metrics = ctx.font_metrics(options);
    let cramped = options.having_cramped_style();

    let mut inner = make_span(
        vec![],
        vec![build_group(ctx, &group.body, &cramped, None)?],
        Some(&cramped),
        None,
    );
    if inner.height == 0.0 {
        // An empty radicand still gets a sign of x-height
        inner.height = metrics.x_height;
    }

    let line = make_line_span(ctx, "sqrt-line", options, None);
    let theta = line.height;

    let phi = if options.style.id < TEXT.id {
        metrics.x_height
    } else {
        theta
    };
    let mut line_clearance = theta + phi / 4.0;
    let inner_total = inner.height + inner.depth;
    let min_delimiter_height = inner_total + line_clearance + theta;

    let sign = make_sqrt_image(ctx, min_delimiter_height, options, group.mode)?;
    let mut delim = make_span(
        vec!["sqrt-sign".to_owned()],
        vec![sign.into()],
        Some(options),
        None,
    );

    let delim_depth = (delim.height + delim.depth) - theta;
    if delim_depth > inner_total + line_clearance {
        // Centre the radicand in the extra room a larger sign leaves
        line_clearance = (line_clearance + delim_depth - inner_total) / 2.0;
    }

    // Lines the top of the sign up with the rule
    let delim_shift = -(inner.height + line_clearance + theta) + delim.height;
    delim.style.insert(CssProperty::Top, make_em(delim_shift));
    delim.height -= delim_shift;
    delim.depth += delim_shift;

    let body = make_v_list(VListParam::FirstBaseline {
        children: vec![
            VListElem::builder().elem(inner.into()).build().into(),
            VListChild::Kern(line_clearance),
            VListElem::builder().elem(line.into()).build().into(),
            VListChild::Kern(theta),
        ],
    });

    let Some(index) = &group.index else {
        return Ok(make_span(
            vec!["mord".to_owned(), "sqrt".to_owned()],
            vec![delim.into(), body.into()],
            Some(options),
            None,
        )
        .into());
    };

    // The index is always in scriptscript style, raised by the amount
    // `\r@@t` uses
    let new_options = options.having_style(SCRIPTSCRIPT);
    let rootm = build_group(ctx, index, &new_options, Some(options))?;
    let to_shift = 0.6 * (body.height - body.depth);
    let root_v_list = make_v_list(VListParam::Shift {
        amount: -to_shift,
        children: vec![VListElem::builder().elem(rootm).build().into()],
    });
    let root = make_span(
        vec!["root".to_owned()],
        vec![root_v_list.into()],
        None,
        None,
    );

    Ok(make_span(
        vec!["mord".to_owned(), "sqrt".to_owned()],
        vec![root.into(), delim.into(), body.into()],
        Some(options),
        None,
    )
    .into())
}
