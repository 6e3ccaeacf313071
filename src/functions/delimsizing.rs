//! Delimiters: the fixed sizes of `\big` and friends, and `\left ... \right`
//! pairs that grow to fit what they enclose.

use phf::{Map, phf_map};

use crate::build_common::{make_null_delimiter, make_span};
use crate::build_tree::build_expression;
use crate::context::LayoutContext;
use crate::define_function::{
    FunctionContext, FunctionDefSpec, FunctionPropSpec, normalize_argument,
};
use crate::delimiter::{is_delimiter, left_right_delim, sized_delim};
use crate::dom_tree::RenderNode;
use crate::options::Options;
use crate::parser::parse_node::{
    ParseNode, ParseNodeDelimsizing, ParseNodeLeftRight, ParseNodeLeftRightRight,
};
use crate::spacing_data::AtomClass;
use crate::types::{LayoutError, ParseError, ParseErrorKind};

const DELIMITER_SIZES: Map<&'static str, (AtomClass, usize)> = phf_map! {
    "\\bigl" => (AtomClass::Mopen, 1),
    "\\Bigl" => (AtomClass::Mopen, 2),
    "\\biggl" => (AtomClass::Mopen, 3),
    "\\Biggl" => (AtomClass::Mopen, 4),
    "\\bigr" => (AtomClass::Mclose, 1),
    "\\Bigr" => (AtomClass::Mclose, 2),
    "\\biggr" => (AtomClass::Mclose, 3),
    "\\Biggr" => (AtomClass::Mclose, 4),
    "\\bigm" => (AtomClass::Mrel, 1),
    "\\Bigm" => (AtomClass::Mrel, 2),
    "\\biggm" => (AtomClass::Mrel, 3),
    "\\Biggm" => (AtomClass::Mrel, 4),
    "\\big" => (AtomClass::Mord, 1),
    "\\Big" => (AtomClass::Mord, 2),
    "\\bigg" => (AtomClass::Mord, 3),
    "\\Bigg" => (AtomClass::Mord, 4),
};

/// The delimiter text of a function's argument, or an error naming the
/// function when it is not a delimiter.
fn check_delimiter(arg: Option<&ParseNode>, context: &FunctionContext) -> Result<String, ParseError> {
    let Some(arg) = arg else {
        return Err(context.error("Missing delimiter"));
    };
    let node = normalize_argument(arg);
    match node.text() {
        Some(text) if is_delimiter(text) => Ok(text.to_owned()),
        text => Err(context.error(ParseErrorKind::InvalidDelimiterAfter {
            delimiter: text.unwrap_or_default().to_owned(),
            function: context.func_name.clone(),
        })),
    }
}

fn delimsizing_handler(
    context: FunctionContext,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let delim = check_delimiter(args.first(), &context)?;
    let Some(&(mclass, size)) = DELIMITER_SIZES.get(context.func_name.as_str()) else {
        return Err(context.error("Unrecognized delimiter size command"));
    };

    Ok(ParseNode::Delimsizing(ParseNodeDelimsizing {
        mode: context.parser.mode,
        loc: context.loc(),
        size,
        mclass,
        delim,
    }))
}

fn left_handler(
    context: FunctionContext,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let left = check_delimiter(args.first(), &context)?;
    let loc = context.loc();
    let parser = context.parser;

    // The body ends at the matching `\right`, which must follow
    let body = parser.parse_expression(false, None)?;
    parser.expect("\\right", false)?;
    let Some(ParseNode::LeftRightRight(right)) = parser.parse_function(None, None)? else {
        return Err(ParseError::new("Expected \\right after \\left"));
    };

    Ok(ParseNode::LeftRight(ParseNodeLeftRight {
        mode: parser.mode,
        loc,
        body,
        left,
        right: right.delim,
    }))
}

fn right_handler(
    context: FunctionContext,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let delim = check_delimiter(args.first(), &context)?;
    Ok(ParseNode::LeftRightRight(ParseNodeLeftRightRight {
        mode: context.parser.mode,
        loc: context.loc(),
        delim,
    }))
}

/// Registers `\big` and its variants, `\left` and `\right`.
pub fn define_delimsizing(ctx: &mut LayoutContext) {
    let names: Vec<&str> = DELIMITER_SIZES.keys().copied().collect();
    ctx.define_function(&FunctionDefSpec {
        names: &names,
        props: FunctionPropSpec {
            num_args: 1,
            ..Default::default()
        },
        handler: delimsizing_handler,
    });

    ctx.define_function(&FunctionDefSpec {
        names: &["\\left"],
        props: FunctionPropSpec {
            num_args: 1,
            ..Default::default()
        },
        handler: left_handler,
    });

    ctx.define_function(&FunctionDefSpec {
        names: &["\\right"],
        props: FunctionPropSpec {
            num_args: 1,
            ..Default::default()
        },
        handler: right_handler,
    });
}

/// Builds a delimiter of fixed size; `.` leaves an empty box of the class.
pub fn box_builder(
    ctx: &LayoutContext,
    group: &ParseNodeDelimsizing,
    options: &Options,
) -> Result<RenderNode, LayoutError> {
    let class = group.mclass.as_ref().to_owned();
    if group.delim == "." {
        return Ok(make_span(vec![class], vec![], None, None).into());
    }
    Ok(sized_delim(ctx, &group.delim, group.size, options, group.mode, &[class])?.into())
}

/// Builds `\left ... \right`, sizing both delimiters to the body.
pub fn left_right_builder(
    ctx: &LayoutContext,
    group: &ParseNodeLeftRight,
    options: &Options,
) -> Result<RenderNode, LayoutError> {
    let mut inner = build_expression(
        ctx,
        &group.body,
        options,
        true,
        (Some(AtomClass::Mopen), Some(AtomClass::Mclose)),
    )?;

    let (inner_height, inner_depth) = inner
        .iter()
        .fold((0.0_f64, 0.0_f64), |(h, d), node| (h.max(node.height()), d.max(node.depth())));

    // Delimiter sizes are absolute, so measure the body in text-size ems
    let inner_height = inner_height * options.size_multiplier;
    let inner_depth = inner_depth * options.size_multiplier;

    let delim = |text: &str, class: AtomClass| -> Result<RenderNode, LayoutError> {
        let classes = vec![class.as_ref().to_owned()];
        if text == "." {
            return Ok(make_null_delimiter(options, classes).into());
        }
        Ok(left_right_delim(ctx, text, inner_height, inner_depth, options, group.mode, &classes)?.into())
    };

    inner.insert(0, delim(&group.left, AtomClass::Mopen)?);
    inner.push(delim(&group.right, AtomClass::Mclose)?);

    Ok(make_span(vec!["minner".to_owned()], inner, Some(options), None).into())
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

    fn parse_err(input: &str) -> ParseErrorKind {
        let ctx = LayoutContext::default();
        *parse(input, &Settings::default(), &ctx).unwrap_err().kind
    }

    #[test]
    fn test_left_right_parses_as_one_node() {
        let ctx = LayoutContext::default();
        let nodes = parse("\\left( x + y \\right]", &Settings::default(), &ctx).unwrap();
        assert_eq!(nodes.len(), 1);
        let ParseNode::LeftRight(leftright) = &nodes[0] else {
            panic!("expected leftright");
        };
        assert_eq!(leftright.left, "(");
        assert_eq!(leftright.right, "]");
        assert_eq!(leftright.body.len(), 3);
    }

    #[test]
    fn test_left_right_around_short_body() {
        let built = build("\\left( x \\right)");
        assert_eq!(built.classes(), ["minner"]);
        let children = built.children();
        assert_eq!(children.len(), 3);
        assert!(children[0].has_class("mopen"));
        assert!(children[2].has_class("mclose"));
        // A single letter needs only the text-size glyph
        assert!(children[0].height() + children[0].depth() < 1.01);
    }

    #[test]
    fn test_null_delimiter() {
        let built = build("\\left. x \\right|");
        let open = &built.children()[0];
        assert!(open.has_class("nulldelimiter"));
        assert!(open.has_class("mopen"));
        assert!((open.width() - 0.12).abs() < 1e-9);
    }

    #[test]
    fn test_delimiters_grow_with_body() {
        let short = build("\\left( x \\right)");
        let tall = build("\\left( \\frac{\\frac{a}{b}}{\\frac{c}{d}} \\right)");
        let total = |node: &RenderNode| {
            let open = &node.children()[0];
            open.height() + open.depth()
        };
        assert!(total(&tall) > total(&short));
        assert!(total(&tall) > 1.1);
    }

    #[test]
    fn test_missing_right() {
        assert!(matches!(
            parse_err("\\left( x"),
            ParseErrorKind::ExpectedToken { .. }
        ));
    }

    #[test]
    fn test_invalid_delimiter() {
        assert!(matches!(
            parse_err("\\left x \\right)"),
            ParseErrorKind::InvalidDelimiterAfter { ref function, .. } if function == "\\left"
        ));
        assert!(matches!(
            parse_err("\\bigl a"),
            ParseErrorKind::InvalidDelimiterAfter { .. }
        ));
    }

    #[test]
    fn test_big_delimiters() {
        let built = build("\\bigl(");
        assert!(built.has_class("mopen"));
        assert!(built.children()[0].has_class("size1"));

        let bigger = build("\\Biggr]");
        assert!(bigger.has_class("mclose"));
        assert!(bigger.height() + bigger.depth() > built.height() + built.depth());

        let empty = build("\\big.");
        assert_eq!(empty.classes(), ["mord"]);
        assert!(empty.children().is_empty());
    }
}
