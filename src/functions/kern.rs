//! Explicit horizontal space
//!
//! `\kern`, `\mkern` and `\hspace` take a size argument; the named spaces
//! (`\,`, `\quad`, ...) are fixed kerns.

use phf::{Map, phf_map};

use crate::context::LayoutContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::dom_tree::RenderNode;
use crate::options::Options;
use crate::parser::parse_node::{ParseNode, ParseNodeKern};
use crate::spacing_data::{MEDIUMSPACE, MeasurementOwned, MeasurementStatic, THICKSPACE, THINSPACE};
use crate::types::{ArgType, ErrorLocationProvider, LayoutError, ParseError};

const NEGATIVE_THINSPACE: MeasurementStatic = MeasurementStatic {
    number: -3.0,
    unit: "mu",
};

const NAMED_SPACES: Map<&'static str, MeasurementStatic> = phf_map! {
    "\\," => THINSPACE,
    "\\thinspace" => THINSPACE,
    "\\:" => MEDIUMSPACE,
    "\\>" => MEDIUMSPACE,
    "\\medspace" => MEDIUMSPACE,
    "\\;" => THICKSPACE,
    "\\thickspace" => THICKSPACE,
    "\\!" => NEGATIVE_THINSPACE,
    "\\negthinspace" => NEGATIVE_THINSPACE,
    "\\enspace" => MeasurementStatic { number: 0.5, unit: "em" },
    "\\quad" => MeasurementStatic { number: 1.0, unit: "em" },
    "\\qquad" => MeasurementStatic { number: 2.0, unit: "em" },
};

fn kern_handler(
    context: FunctionContext,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let Some(ParseNode::Size(size)) = args.into_iter().next() else {
        return Err(context.error("Expected size argument"));
    };

    // \mkern measures in mu, the others in text units
    let math_function = context.func_name == "\\mkern";
    let mu_unit = size.value.unit == "mu";
    if math_function != mu_unit {
        let message = if math_function {
            format!(
                "LaTeX's {} supports only mu units, not {} units",
                context.func_name, size.value.unit
            )
        } else {
            format!("LaTeX's {} doesn't support mu units", context.func_name)
        };
        context.parser.settings.report_nonstrict(
            "mathVsTextUnits",
            &message,
            context.token.map(|t| t as &dyn ErrorLocationProvider),
        )?;
    }

    Ok(ParseNode::Kern(ParseNodeKern {
        mode: context.parser.mode,
        loc: context.loc(),
        dimension: size.value,
    }))
}

fn named_space_handler(
    context: FunctionContext,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let Some(space) = NAMED_SPACES.get(context.func_name.as_str()) else {
        return Err(context.error("Unrecognized space command"));
    };
    Ok(ParseNode::Kern(ParseNodeKern {
        mode: context.parser.mode,
        loc: context.loc(),
        dimension: MeasurementOwned {
            number: space.number,
            unit: space.unit.to_owned(),
        },
    }))
}

/// Registers the kern commands and the named spaces.
pub fn define_kern(ctx: &mut LayoutContext) {
    ctx.define_function(&FunctionDefSpec {
        names: &["\\kern", "\\mkern", "\\hspace"],
        props: FunctionPropSpec {
            num_args: 1,
            arg_types: Some(vec![ArgType::Size]),
            allowed_in_text: true,
            ..Default::default()
        },
        handler: kern_handler,
    });

    ctx.define_function(&FunctionDefSpec {
        names: &[
            "\\,",
            "\\thinspace",
            "\\:",
            "\\>",
            "\\medspace",
            "\\;",
            "\\thickspace",
            "\\!",
            "\\negthinspace",
            "\\enspace",
            "\\quad",
            "\\qquad",
        ],
        props: FunctionPropSpec {
            allowed_in_text: true,
            ..Default::default()
        },
        handler: named_space_handler,
    });
}

/// Builds an empty box as wide as the kern.
pub fn box_builder(
    ctx: &LayoutContext,
    group: &ParseNodeKern,
    options: &Options,
) -> Result<RenderNode, LayoutError> {
    Ok(ctx.make_glue(&group.dimension, options)?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_tree::build_group;
    use crate::parser::parse;
    use crate::style::SCRIPT;
    use crate::types::{CssProperty, Settings, StrictMode};

    fn build(input: &str, options: &Options) -> RenderNode {
        let ctx = LayoutContext::default();
        let nodes = parse(input, &Settings::default(), &ctx).unwrap();
        build_group(&ctx, &nodes[0], options, None).unwrap()
    }

    #[test]
    fn test_kern_width() {
        let built = build("\\kern{1.5em}", &Options::default());
        assert!(built.has_class("mspace"));
        assert!((built.width() - 1.5).abs() < 1e-9);
        assert_eq!(built.style().get(CssProperty::MarginRight), Some("1.5em"));
    }

    #[test]
    fn test_named_spaces() {
        let quad = build("\\quad", &Options::default());
        assert!((quad.width() - 1.0).abs() < 1e-9);

        let thin = build("\\,", &Options::default());
        assert!((thin.width() - 3.0 / 18.0).abs() < 1e-9);

        let negative = build("\\!", &Options::default());
        assert!((negative.width() + 3.0 / 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_mu_follows_the_script_font() {
        // 18mu is one quad of the font at the current size, in its own ems
        let text = build("\\mkern{18mu}", &Options::default());
        let script = build("\\mkern{18mu}", &Options::default().having_style(SCRIPT));
        assert!((text.width() - 1.0).abs() < 1e-9);
        assert!((script.width() - 1.171).abs() < 1e-9);
    }

    #[test]
    fn test_units_checked_in_strict_mode() {
        let ctx = LayoutContext::default();
        let settings = Settings::builder().strict(StrictMode::Error).build();
        assert!(parse("\\mkern{1em}", &settings, &ctx).is_err());
        assert!(parse("\\kern{1mu}", &settings, &ctx).is_err());
        assert!(parse("\\kern{1em}", &settings, &ctx).is_ok());
    }
}
