//! Limits placed above and below an operator
//!
//! TeXbook rule 13a, p. 443-444: the scripts of `\sum\limits` or of a large
//! operator in display style are stacked over and under the operator,
//! centred on it and offset by half its slant.

use crate::build_common::{VListChild, VListElem, VListParam, make_span, make_v_list};
use crate::build_tree::build_group;
use crate::context::LayoutContext;
use crate::dom_tree::RenderNode;
use crate::options::Options;
use crate::parser::parse_node::AnyParseNode;
use crate::style::Style;
use crate::types::{CssProperty, LayoutError};
use crate::units::make_em;

struct Limit {
    elem: RenderNode,
    kern: f64,
}

fn limit_elem(elem: RenderNode, margin_left: f64) -> VListChild {
    VListElem::builder()
        .elem(elem)
        .margin_left(margin_left)
        .build()
        .into()
}

/// Stacks `sup` over `base` over `sub`.
///
/// `base_shift` is how far the base was lowered to centre it on the axis and
/// `slant` its italic correction. Without scripts the wrapped base is
/// returned.
#[expect(clippy::too_many_arguments)]
pub fn assemble_sup_sub(
    ctx: &LayoutContext,
    base: RenderNode,
    sup_group: Option<&AnyParseNode>,
    sub_group: Option<&AnyParseNode>,
    options: &Options,
    style: Style,
    slant: f64,
    base_shift: f64,
) -> Result<RenderNode, LayoutError> {
    let base: RenderNode = make_span(vec![], vec![base], Some(options), None).into();
    let base_height = base.height();
    let base_depth = base.depth();
    let metrics = ctx.font_metrics(options);

    let sup = sup_group
        .map(|group| {
            let elem =
                build_group(ctx, group, &options.having_style(style.sup()), Some(options))?;
            let kern = metrics
                .big_op_spacing1
                .max(metrics.big_op_spacing3 - elem.depth());
            Ok::<_, LayoutError>(Limit { elem, kern })
        })
        .transpose()?;

    let sub = sub_group
        .map(|group| {
            let elem =
                build_group(ctx, group, &options.having_style(style.sub()), Some(options))?;
            let kern = metrics
                .big_op_spacing2
                .max(metrics.big_op_spacing4 - elem.height());
            Ok::<_, LayoutError>(Limit { elem, kern })
        })
        .transpose()?;

    let has_sub = sub.is_some();
    let spacing5 = metrics.big_op_spacing5;
    let base_elem = |base: RenderNode| VListChild::from(VListElem::builder().elem(base).build());

    let params = match (sup, sub) {
        (Some(sup), Some(sub)) => {
            let bottom = spacing5
                + sub.elem.height()
                + sub.elem.depth()
                + sub.kern
                + base_depth
                + base_shift;
            VListParam::Bottom {
                amount: bottom,
                children: vec![
                    VListChild::Kern(spacing5),
                    limit_elem(sub.elem, -slant),
                    VListChild::Kern(sub.kern),
                    base_elem(base),
                    VListChild::Kern(sup.kern),
                    limit_elem(sup.elem, slant),
                    VListChild::Kern(spacing5),
                ],
            }
        }
        (None, Some(sub)) => VListParam::Top {
            amount: base_height - base_shift,
            children: vec![
                VListChild::Kern(spacing5),
                limit_elem(sub.elem, -slant),
                VListChild::Kern(sub.kern),
                base_elem(base),
            ],
        },
        (Some(sup), None) => VListParam::Bottom {
            amount: base_depth + base_shift,
            children: vec![
                base_elem(base),
                VListChild::Kern(sup.kern),
                limit_elem(sup.elem, slant),
                VListChild::Kern(spacing5),
            ],
        },
        (None, None) => return Ok(base),
    };

    let mut parts: Vec<RenderNode> = vec![make_v_list(params).into()];
    let sub_is_character_box = sub_group.is_some_and(AnyParseNode::is_character_box);
    if has_sub && slant != 0.0 && !sub_is_character_box {
        // Keeps the shifted subscript from overlapping what precedes it
        let mut spacer = make_span(vec!["mspace".to_owned()], vec![], Some(options), None);
        spacer.style.insert(CssProperty::MarginRight, make_em(slant));
        spacer.width = slant;
        parts.insert(0, spacer.into());
    }

    Ok(make_span(
        vec!["mop".to_owned(), "op-limits".to_owned()],
        parts,
        Some(options),
        None,
    )
    .into())
}
