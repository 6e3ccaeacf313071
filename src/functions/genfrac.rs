//! Fractions and binomials
//!
//! `\frac` and its relatives build a [`ParseNodeGenfrac`]. The infix forms
//! `\over`, `\choose` and `\atop` produce an [`ParseNodeInfix`] marker that
//! the parser rewrites into a call of the function they stand for.

use phf::{Map, phf_map};

use crate::build_common::{
    VListElemAndShift, VListParam, make_line_span, make_null_delimiter, make_span, make_v_list,
};
use crate::build_tree::build_group;
use crate::context::LayoutContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::delimiter::custom_sized_delim;
use crate::dom_tree::{BoxSpan, RenderNode};
use crate::options::Options;
use crate::parser::parse_node::{ParseNode, ParseNodeGenfrac, ParseNodeInfix};
use crate::style::{DISPLAY, SCRIPT, SCRIPTSCRIPT, Style, TEXT};
use crate::types::{LayoutError, ParseError};

const INFIX_REPLACE_MAP: Map<&'static str, &'static str> = phf_map! {
    "\\over" => "\\frac",
    "\\choose" => "\\binom",
    "\\atop" => "\\\\atopfrac",
};

/// Style the fraction is set in, given the one it was forced to, if any.
const fn adjust_style(size: Option<Style>, original_style: Style) -> Style {
    let Some(size) = size else {
        return original_style;
    };
    if size.id == DISPLAY.id {
        if original_style.id >= SCRIPT.id {
            original_style.text()
        } else {
            DISPLAY
        }
    } else if size.id == TEXT.id && original_style.size == DISPLAY.size {
        TEXT
    } else {
        original_style
    }
}

fn genfrac_handler(
    context: FunctionContext,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let (left_delim, right_delim, has_bar_line) = match context.func_name.as_str() {
        "\\dfrac" | "\\frac" | "\\tfrac" => (None, None, true),
        "\\dbinom" | "\\binom" | "\\tbinom" => (Some("("), Some(")"), false),
        "\\\\atopfrac" => (None, None, false),
        _ => return Err(context.error("Unrecognized genfrac command")),
    };
    let size = match context.func_name.as_str() {
        "\\dfrac" | "\\dbinom" => Some(DISPLAY),
        "\\tfrac" | "\\tbinom" => Some(TEXT),
        _ => None,
    };

    let mut args = args.into_iter();
    let (Some(numer), Some(denom)) = (args.next(), args.next()) else {
        return Err(context.error("Fraction needs a numerator and a denominator"));
    };

    Ok(ParseNode::Genfrac(Box::new(ParseNodeGenfrac {
        mode: context.parser.mode,
        loc: context.loc(),
        numer,
        denom,
        has_bar_line,
        left_delim: left_delim.map(str::to_owned),
        right_delim: right_delim.map(str::to_owned),
        size,
    })))
}

fn infix_handler(
    context: FunctionContext,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let Some(replace_with) = INFIX_REPLACE_MAP.get(context.func_name.as_str()) else {
        return Err(context.error("Unrecognized infix genfrac command"));
    };
    Ok(ParseNode::Infix(ParseNodeInfix {
        mode: context.parser.mode,
        loc: context.loc(),
        replace_with: (*replace_with).to_owned(),
        token: context.token.cloned(),
    }))
}

/// Registers the fraction commands.
pub fn define_genfrac(ctx: &mut LayoutContext) {
    ctx.define_function(&FunctionDefSpec {
        names: &[
            "\\dfrac",
            "\\frac",
            "\\tfrac",
            "\\dbinom",
            "\\binom",
            "\\tbinom",
            "\\\\atopfrac", // can't be entered directly
        ],
        props: FunctionPropSpec {
            num_args: 2,
            allowed_in_argument: true,
            ..Default::default()
        },
        handler: genfrac_handler,
    });

    ctx.define_function(&FunctionDefSpec {
        names: &["\\over", "\\choose", "\\atop"],
        props: FunctionPropSpec {
            infix: true,
            ..Default::default()
        },
        handler: infix_handler,
    });
}

fn delim_span(
    ctx: &LayoutContext,
    delim: Option<&str>,
    delim_size: f64,
    style: Style,
    group: &ParseNodeGenfrac,
    options: &Options,
    class: &str,
) -> Result<BoxSpan, LayoutError> {
    let classes = [class.to_owned()];
    match delim {
        Some(delim) => custom_sized_delim(
            ctx,
            delim,
            delim_size,
            true,
            &options.having_style(style),
            group.mode,
            &classes,
        ),
        None => Ok(make_null_delimiter(options, classes.to_vec())),
    }
}

/// Stacks numerator over denominator, TeXbook rule 15.
pub fn box_builder(
    ctx: &LayoutContext,
    group: &ParseNodeGenfrac,
    options: &Options,
) -> Result<RenderNode, LayoutError> {
    let style = adjust_style(group.size, options.style);

    let numer_options = options.having_style(style.frac_num());
    let numer = build_group(ctx, &group.numer, &numer_options, Some(options))?;
    let denom_options = options.having_style(style.frac_den());
    let denom = build_group(ctx, &group.denom, &denom_options, Some(options))?;

    let metrics = ctx.font_metrics(options);
    let (rule, rule_width, rule_spacing) = if group.has_bar_line {
        let rule = make_line_span(ctx, "frac-line", options, None);
        let height = rule.height;
        (Some(rule), height, height)
    } else {
        (None, 0.0, metrics.default_rule_thickness)
    };

    // Rule 15b
    let (mut num_shift, mut denom_shift, clearance) = if style.size == DISPLAY.size {
        let clearance = if rule_width > 0.0 {
            3.0 * rule_spacing
        } else {
            7.0 * rule_spacing
        };
        (metrics.num1, metrics.denom1, clearance)
    } else if rule_width > 0.0 {
        (metrics.num2, metrics.denom2, rule_spacing)
    } else {
        (metrics.num3, metrics.denom2, 3.0 * rule_spacing)
    };

    let axis_height = metrics.axis_height;
    let mut children = Vec::with_capacity(3);
    if let Some(rule) = rule {
        // Rule 15d
        let numer_gap = (num_shift - numer.depth()) - 0.5f64.mul_add(rule_width, axis_height);
        if numer_gap < clearance {
            num_shift += clearance - numer_gap;
        }
        let denom_gap = 0.5f64.mul_add(-rule_width, axis_height) - (denom.height() - denom_shift);
        if denom_gap < clearance {
            denom_shift += clearance - denom_gap;
        }

        let mid_shift = -0.5f64.mul_add(-rule_width, axis_height);
        children.push(
            VListElemAndShift::builder()
                .elem(denom)
                .shift(denom_shift)
                .build(),
        );
        children.push(
            VListElemAndShift::builder()
                .elem(rule.into())
                .shift(mid_shift)
                .build(),
        );
    } else {
        // Rule 15c
        let candidate_clearance = (num_shift - numer.depth()) - (denom.height() - denom_shift);
        if candidate_clearance < clearance {
            num_shift += 0.5 * (clearance - candidate_clearance);
            denom_shift += 0.5 * (clearance - candidate_clearance);
        }
        children.push(
            VListElemAndShift::builder()
                .elem(denom)
                .shift(denom_shift)
                .build(),
        );
    }
    children.push(
        VListElemAndShift::builder()
            .elem(numer)
            .shift(-num_shift)
            .build(),
    );

    let mut frac = make_v_list(VListParam::IndividualShift { children });

    // \dfrac and \tfrac may change the size
    let new_options = options.having_style(style);
    frac.height *= new_options.size_multiplier / options.size_multiplier;
    frac.depth *= new_options.size_multiplier / options.size_multiplier;

    // Rule 15e
    let delim_size = if style.size == DISPLAY.size {
        metrics.delim1
    } else if style.size == SCRIPTSCRIPT.size {
        ctx.font_metrics(&options.having_style(SCRIPT)).delim2
    } else {
        metrics.delim2
    };

    let left = delim_span(
        ctx,
        group.left_delim.as_deref(),
        delim_size,
        style,
        group,
        options,
        "mopen",
    )?;
    let right = delim_span(
        ctx,
        group.right_delim.as_deref(),
        delim_size,
        style,
        group,
        options,
        "mclose",
    )?;

    let mut classes = vec!["mord".to_owned()];
    classes.extend(new_options.sizing_classes(options));
    Ok(make_span(
        classes,
        vec![
            left.into(),
            make_span(vec!["mfrac".to_owned()], vec![frac.into()], Some(options), None).into(),
            right.into(),
        ],
        Some(options),
        None,
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::types::{CssProperty, Settings};

    fn build(input: &str, options: &Options) -> RenderNode {
        let ctx = LayoutContext::default();
        let nodes = parse(input, &Settings::default(), &ctx).unwrap();
        build_group(&ctx, &nodes[0], options, None).unwrap()
    }

    #[test]
    fn test_adjust_style() {
        assert_eq!(adjust_style(None, SCRIPT), SCRIPT);
        assert_eq!(adjust_style(Some(DISPLAY), TEXT), DISPLAY);
        assert_eq!(adjust_style(Some(DISPLAY), SCRIPT), TEXT);
        assert_eq!(adjust_style(Some(TEXT), DISPLAY), TEXT);
        assert_eq!(adjust_style(Some(TEXT), SCRIPT), SCRIPT);
    }

    #[test]
    fn test_text_fraction() {
        let built = build("\\frac{1}{2}", &Options::default());
        assert_eq!(built.classes(), ["mord"]);
        assert!((built.height() - 0.845108).abs() < 1e-6);
        assert!((built.depth() - 0.345).abs() < 1e-6);

        let children = built.children();
        assert_eq!(children.len(), 3);
        assert!(children[0].has_class("mopen") && children[0].has_class("nulldelimiter"));
        assert!(children[1].has_class("mfrac"));
        assert!(children[2].has_class("mclose") && children[2].has_class("nulldelimiter"));
    }

    #[test]
    fn test_fraction_rule_sits_on_axis() {
        let built = build("\\frac{1}{2}", &Options::default());
        let vlist = &built.children()[1].children()[0].children()[0].children()[0];
        let rule_wrapper = &vlist.children()[1];
        assert_eq!(rule_wrapper.style().get(CssProperty::Top), Some("-3.23em"));
        let rule = &rule_wrapper.children()[1];
        assert!(rule.has_class("frac-line"));
        assert!((rule.height() - 0.04).abs() < 1e-9);
    }

    #[test]
    fn test_binom_gets_parens() {
        let built = build("\\binom{n}{k}", &Options::default());
        let children = built.children();
        assert!(children[0].has_class("mopen"));
        assert!(!children[0].has_class("nulldelimiter"));
        assert!(children[2].has_class("mclose"));
    }

    #[test]
    fn test_dfrac_is_taller_than_frac() {
        let text = build("\\frac{1}{2}", &Options::default());
        let display = build("\\dfrac{1}{2}", &Options::default());
        assert!(display.height() > text.height());
        assert!(display.depth() > text.depth());
    }

    #[test]
    fn test_infix_over_builds_a_fraction() {
        let built = build("1 \\over 2", &Options::default());
        assert!(built.children()[1].has_class("mfrac"));
    }
}
