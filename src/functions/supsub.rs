//! Superscripts and subscripts
//!
//! Placement follows TeXbook rules 18(a-f), p. 445-446. Operators with
//! limits place their own scripts, see [`crate::functions::op`].

use crate::build_common::{
    VListElem, VListElemAndShift, VListParam, make_span, make_v_list,
};
use crate::build_tree::{atom_class_of, build_group};
use crate::context::LayoutContext;
use crate::dom_tree::RenderNode;
use crate::functions::op;
use crate::options::Options;
use crate::parser::parse_node::{AnyParseNode, ParseNodeOp, ParseNodeSupSub};
use crate::spacing_data::AtomClass;
use crate::style::DISPLAY;
use crate::types::{LayoutError, ParseError};

/// The operator that places the scripts itself, if the base is one.
fn limits_delegate<'a>(group: &'a ParseNodeSupSub, options: &Options) -> Option<&'a ParseNodeOp> {
    match group.base.as_deref()? {
        AnyParseNode::Op(op_node)
            if op_node.limits
                && (options.style.size == DISPLAY.size || op_node.always_handle_sup_sub) =>
        {
            Some(op_node)
        }
        _ => None,
    }
}

/// Builds a base with its scripts.
pub fn box_builder(
    ctx: &LayoutContext,
    group: &ParseNodeSupSub,
    options: &Options,
) -> Result<RenderNode, LayoutError> {
    if let Some(op_node) = limits_delegate(group, options) {
        return op::box_builder(
            ctx,
            op_node,
            group.sup.as_deref(),
            group.sub.as_deref(),
            options,
        );
    }

    let value_base = group.base.as_deref();
    let base = match value_base {
        Some(base) => build_group(ctx, base, options, None)?,
        None => make_span(vec![], vec![], Some(options), None).into(),
    };

    let metrics = ctx.font_metrics(options);
    let is_character_box = value_base.is_some_and(AnyParseNode::is_character_box);

    // Rule 18a
    let mut sup_shift = 0.0;
    let mut sub_shift = 0.0;

    let sup = match group.sup.as_deref() {
        Some(sup_group) => {
            let new_options = options.having_style(options.style.sup());
            let elem = build_group(ctx, sup_group, &new_options, Some(options))?;
            if !is_character_box {
                sup_shift = base.height()
                    - ctx.font_metrics(&new_options).sup_drop * new_options.size_multiplier
                        / options.size_multiplier;
            }
            Some(elem)
        }
        None => None,
    };

    let sub = match group.sub.as_deref() {
        Some(sub_group) => {
            let new_options = options.having_style(options.style.sub());
            let elem = build_group(ctx, sub_group, &new_options, Some(options))?;
            if !is_character_box {
                sub_shift = base.depth()
                    + ctx.font_metrics(&new_options).sub_drop * new_options.size_multiplier
                        / options.size_multiplier;
            }
            Some(elem)
        }
        None => None,
    };

    // Rule 18c
    let min_sup_shift = if options.style == DISPLAY {
        metrics.sup1
    } else if options.style.cramped {
        metrics.sup3
    } else {
        metrics.sup2
    };

    // \scriptspace is 0.5pt at every size
    let margin_right = (0.5 / metrics.pt_per_em) / options.size_multiplier;

    // Subscripts ignore the italic correction of a single glyph base
    let margin_left = match &base {
        RenderNode::Symbol(symbol) if sub.is_some() => Some(-symbol.italic),
        _ => None,
    };

    let supsub = match (sup, sub) {
        (Some(sup), Some(sub)) => {
            sup_shift = sup_shift
                .max(min_sup_shift)
                .max(0.25f64.mul_add(metrics.x_height, sup.depth()));
            sub_shift = sub_shift.max(metrics.sub2);

            // Rule 18e
            let max_width = 4.0 * metrics.default_rule_thickness;
            if (sup_shift - sup.depth()) - (sub.height() - sub_shift) < max_width {
                sub_shift = max_width - (sup_shift - sup.depth()) + sub.height();
                let psi = 0.8f64.mul_add(metrics.x_height, -(sup_shift - sup.depth()));
                if psi > 0.0 {
                    sup_shift += psi;
                    sub_shift -= psi;
                }
            }

            make_v_list(VListParam::IndividualShift {
                children: vec![
                    VListElemAndShift::builder()
                        .elem(sub)
                        .shift(sub_shift)
                        .maybe_margin_left(margin_left)
                        .margin_right(margin_right)
                        .build(),
                    VListElemAndShift::builder()
                        .elem(sup)
                        .shift(-sup_shift)
                        .margin_right(margin_right)
                        .build(),
                ],
            })
        }
        (None, Some(sub)) => {
            // Rule 18b
            sub_shift = sub_shift
                .max(metrics.sub1)
                .max(0.8f64.mul_add(-metrics.x_height, sub.height()));

            make_v_list(VListParam::Shift {
                amount: sub_shift,
                children: vec![
                    VListElem::builder()
                        .elem(sub)
                        .maybe_margin_left(margin_left)
                        .margin_right(margin_right)
                        .build()
                        .into(),
                ],
            })
        }
        (Some(sup), None) => {
            // Rule 18c, d
            sup_shift = sup_shift
                .max(min_sup_shift)
                .max(0.25f64.mul_add(metrics.x_height, sup.depth()));

            make_v_list(VListParam::Shift {
                amount: -sup_shift,
                children: vec![
                    VListElem::builder()
                        .elem(sup)
                        .margin_right(margin_right)
                        .build()
                        .into(),
                ],
            })
        }
        (None, None) => {
            return Err(ParseError::new("supsub must have either sup or sub.").into());
        }
    };

    // The scripts inherit the class of the base
    let mclass = atom_class_of(&base).unwrap_or(AtomClass::Mord);
    Ok(make_span(
        vec![mclass.as_ref().to_owned()],
        vec![
            base,
            make_span(vec!["msupsub".to_owned()], vec![supsub.into()], None, None).into(),
        ],
        Some(options),
        None,
    )
    .into())
}
