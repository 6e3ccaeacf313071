//! Render tree building
//!
//! [`build_group`] turns one parse node into a box, dispatching on the node
//! type; [`build_expression`] builds a sequence and inserts the glue TeX
//! puts between atoms; [`build_tree`] is the entry point for a whole
//! formula.

use core::str::FromStr as _;

use phf::phf_set;

use crate::build_common::make_span;
use crate::context::LayoutContext;
use crate::dom_tree::{BoxSpan, RenderNode};
use crate::functions::{
    delimsizing, font, genfrac, kern, op, ordgroup, sizing, sqrt, styling, supsub, symbols, text,
};
use crate::options::Options;
use crate::parser::parse;
use crate::parser::parse_node::{AnyParseNode, NodeType};
use crate::spacing_data::{AtomClass, spacing};
use crate::types::{LayoutError, ParseError, ParseErrorKind, Settings};

// Binary atoms (first class `mbin`) change into ordinary atoms (`mord`)
// depending on their surroundings. See TeXbook pg. 442-446, Rules 5 and 6,
// and the text before Rule 19.
const BIN_LEFT_CANCELLER: phf::Set<&str> =
    phf_set!("leftmost", "mbin", "mopen", "mrel", "mop", "mpunct");
const BIN_RIGHT_CANCELLER: phf::Set<&str> = phf_set!("rightmost", "mrel", "mclose", "mpunct");

/// Atom class of a built box, read from its first class name.
#[must_use]
pub fn atom_class_of(node: &RenderNode) -> Option<AtomClass> {
    AtomClass::from_str(node.classes().first()?).ok()
}

fn edge_class(class: Option<AtomClass>, fallback: &'static str) -> String {
    class.map_or_else(|| fallback.to_owned(), |class| class.as_ref().to_owned())
}

/// Builds a sequence of nodes.
///
/// With `is_real_group`, the sequence is a complete group: binary atoms at
/// its edges become ordinary and glue from the spacing table is inserted
/// between atoms. `surrounding` names the atom classes just outside the
/// group, as `\left..\right` needs; `None` means the group edge.
pub fn build_expression(
    ctx: &LayoutContext,
    expression: &[AnyParseNode],
    options: &Options,
    is_real_group: bool,
    surrounding: (Option<AtomClass>, Option<AtomClass>),
) -> Result<Vec<RenderNode>, LayoutError> {
    let mut groups = expression
        .iter()
        .map(|node| build_group(ctx, node, options, None))
        .collect::<Result<Vec<_>, _>>()?;

    if !is_real_group {
        return Ok(groups);
    }

    // A lone sizing or styling command sets the glue in its own size
    let glue_options = match expression {
        [AnyParseNode::Sizing(sizing)] => options.having_size(sizing.size),
        [AnyParseNode::Styling(styling)] => options.having_style(styling.style),
        _ => options.clone(),
    };

    cancel_bins(&mut groups, &surrounding);

    let left_edge = surrounding.0;
    let right_edge = surrounding.1;

    let mut spaced = Vec::with_capacity(groups.len() * 2);
    let mut prev_class = left_edge;
    for node in groups {
        if node.has_class("mspace") {
            spaced.push(node);
            continue;
        }
        let class = atom_class_of(&node);
        if let (Some(left), Some(right)) = (prev_class, class)
            && let Some(space) = spacing(left, right, glue_options.style)
        {
            spaced.push(ctx.make_glue(space, &glue_options)?.into());
        }
        prev_class = class;
        spaced.push(node);
    }
    if let (Some(left), Some(right)) = (prev_class, right_edge)
        && let Some(space) = spacing(left, right, glue_options.style)
    {
        spaced.push(ctx.make_glue(space, &glue_options)?.into());
    }

    Ok(spaced)
}

/// Turns `mbin` atoms into `mord` where TeX does not allow a binary
/// operator, skipping explicit spaces.
fn cancel_bins(groups: &mut [RenderNode], surrounding: &(Option<AtomClass>, Option<AtomClass>)) {
    let atoms: Vec<usize> = groups
        .iter()
        .enumerate()
        .filter(|(_, node)| !node.has_class("mspace"))
        .map(|(i, _)| i)
        .collect();

    let mut prev_type = edge_class(surrounding.0, "leftmost");
    let mut prev_index: Option<usize> = None;
    for &i in &atoms {
        let cur_type = groups[i].classes().first().cloned().unwrap_or_default();
        if prev_type == "mbin" && BIN_RIGHT_CANCELLER.contains(cur_type.as_str()) {
            if let Some(p) = prev_index {
                groups[p].replace_class("mbin", "mord");
            }
        } else if cur_type == "mbin" && BIN_LEFT_CANCELLER.contains(prev_type.as_str()) {
            groups[i].replace_class("mbin", "mord");
        }
        prev_type = groups[i].classes().first().cloned().unwrap_or_default();
        prev_index = Some(i);
    }

    let next_type = edge_class(surrounding.1, "rightmost");
    if prev_type == "mbin"
        && BIN_RIGHT_CANCELLER.contains(next_type.as_str())
        && let Some(p) = prev_index
    {
        groups[p].replace_class("mbin", "mord");
    }
}

/// Builds one node under `options`.
///
/// When `base_options` is given and its size differs, the box is wrapped in
/// a sizing span and its extents are rescaled to the size of `base_options`.
pub fn build_group(
    ctx: &LayoutContext,
    group: &AnyParseNode,
    options: &Options,
    base_options: Option<&Options>,
) -> Result<RenderNode, LayoutError> {
    let group_type = NodeType::from(group);
    log::trace!(
        "building {group_type} in style {} at size {}",
        options.style.id,
        options.size
    );

    let group_node: RenderNode = match group {
        AnyParseNode::OrdGroup(node) => ordgroup::box_builder(ctx, node, options)?,
        AnyParseNode::SupSub(node) => supsub::box_builder(ctx, node, options)?,
        AnyParseNode::Genfrac(node) => genfrac::box_builder(ctx, node, options)?,
        AnyParseNode::Sqrt(node) => sqrt::box_builder(ctx, node, options)?,
        AnyParseNode::LeftRight(node) => delimsizing::left_right_builder(ctx, node, options)?,
        AnyParseNode::Delimsizing(node) => delimsizing::box_builder(ctx, node, options)?,
        AnyParseNode::Atom(node) => symbols::atom_builder(ctx, node, options)?,
        AnyParseNode::MathOrd(_) | AnyParseNode::TextOrd(_) => {
            symbols::ord_builder(ctx, group, options)?
        }
        AnyParseNode::Spacing(node) => symbols::spacing_builder(ctx, group, node, options)?,
        AnyParseNode::Op(node) => op::box_builder(ctx, node, None, None, options)?,
        AnyParseNode::Styling(node) => styling::box_builder(ctx, node, options)?,
        AnyParseNode::Sizing(node) => sizing::box_builder(ctx, node, options)?,
        AnyParseNode::Font(node) => font::box_builder(ctx, node, options)?,
        AnyParseNode::Text(node) => text::box_builder(ctx, node, options)?,
        AnyParseNode::Kern(node) => kern::box_builder(ctx, node, options)?,
        AnyParseNode::LeftRightRight(_) | AnyParseNode::Size(_) | AnyParseNode::Infix(_) => {
            return Err(
                ParseError::with_token(ParseErrorKind::UnknownGroupType { group_type }, group)
                    .into(),
            );
        }
    };

    if let Some(base_options) = base_options
        && options.size != base_options.size
    {
        let mut group_node = make_span(
            options.sizing_classes(base_options),
            vec![group_node],
            Some(options),
            None,
        );
        let multiplier = options.size_multiplier / base_options.size_multiplier;
        group_node.height *= multiplier;
        group_node.depth *= multiplier;
        Ok(group_node.into())
    } else {
        Ok(group_node)
    }
}

/// Builds a parsed formula under the initial context `settings` describe.
///
/// The result is a single span. A formula that builds to one span, such as
/// `x^2` or `\frac12`, is returned as that span, already classed by its atom
/// class; longer sequences are wrapped in a span classed `mord`.
///
/// # Examples
///
/// ```rust
/// use katex_layout::{LayoutContext, Settings, build_tree, parse};
///
/// let ctx = LayoutContext::default();
/// let settings = Settings::default();
/// let nodes = parse("x^2", &settings, &ctx).unwrap();
/// let tree = build_tree(&ctx, &nodes, &settings).unwrap();
/// assert_eq!(tree.classes, ["mord"]);
/// assert!((tree.height - 0.814108).abs() < 1e-6);
/// ```
pub fn build_tree(
    ctx: &LayoutContext,
    tree: &[AnyParseNode],
    settings: &Settings,
) -> Result<BoxSpan, LayoutError> {
    let options = Options::from_settings(settings);
    let mut expression = build_expression(ctx, tree, &options, true, (None, None))?;

    if expression.len() == 1
        && let Some(RenderNode::Span(_)) = expression.first()
        && let Some(RenderNode::Span(span)) = expression.pop()
    {
        return Ok(span);
    }

    Ok(make_span(
        vec![AtomClass::Mord.as_ref().to_owned()],
        expression,
        Some(&options),
        None,
    ))
}

/// Parses and builds `expression` in one step.
///
/// # Examples
///
/// ```rust
/// use katex_layout::{LayoutContext, Settings, render_to_tree};
///
/// let ctx = LayoutContext::default();
/// let tree = render_to_tree(&ctx, "\\frac{1}{2}", &Settings::default()).unwrap();
/// assert_eq!(tree.children.len(), 3);
/// assert!((tree.depth - 0.345).abs() < 1e-6);
/// ```
pub fn render_to_tree(
    ctx: &LayoutContext,
    expression: &str,
    settings: &Settings,
) -> Result<BoxSpan, LayoutError> {
    let nodes = parse(expression, settings, ctx)?;
    build_tree(ctx, &nodes, settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(input: &str) -> Vec<RenderNode> {
        let ctx = LayoutContext::default();
        let settings = Settings::default();
        let nodes = parse(input, &settings, &ctx).unwrap();
        build_expression(&ctx, &nodes, &Options::from_settings(&settings), true, (None, None))
            .unwrap()
    }

    fn first_classes(nodes: &[RenderNode]) -> Vec<&str> {
        nodes
            .iter()
            .map(|node| node.classes().first().map_or("", String::as_str))
            .collect()
    }

    #[test]
    fn test_glue_between_atoms() {
        let nodes = build("a+b=c");
        assert_eq!(
            first_classes(&nodes),
            ["mord", "mspace", "mbin", "mspace", "mord", "mspace", "mrel", "mspace", "mord"]
        );
        assert_eq!(nodes[1].width(), nodes[3].width());
        assert!(nodes[5].width() > nodes[1].width());
    }

    #[test]
    fn test_leading_and_trailing_bins_cancel() {
        assert_eq!(first_classes(&build("-a")), ["mord", "mord"]);
        assert_eq!(first_classes(&build("a+")), ["mord", "mord"]);
        assert_eq!(
            first_classes(&build("a=-b")),
            ["mord", "mspace", "mrel", "mspace", "mord", "mord"]
        );
    }

    #[test]
    fn test_tight_styles_drop_medium_glue() {
        let ctx = LayoutContext::default();
        let settings = Settings::default();
        let nodes = parse("a+b", &settings, &ctx).unwrap();
        let script = Options::default().having_style(crate::style::SCRIPT);
        let built = build_expression(&ctx, &nodes, &script, true, (None, None)).unwrap();
        assert_eq!(first_classes(&built), ["mord", "mbin", "mord"]);
    }

    #[test]
    fn test_unbuildable_node_is_an_error() {
        let ctx = LayoutContext::default();
        let infix = AnyParseNode::Infix(crate::parser::parse_node::ParseNodeInfix {
            mode: crate::types::Mode::Math,
            loc: None,
            replace_with: "\\frac".to_owned(),
            token: None,
        });
        let err = build_group(&ctx, &infix, &Options::default(), None).unwrap_err();
        assert!(err.to_string().contains("unknown type"));
    }

    #[test]
    fn test_single_span_is_not_rewrapped() {
        let ctx = LayoutContext::default();
        let settings = Settings::default();
        let tree = render_to_tree(&ctx, "x^2", &settings).unwrap();
        assert_eq!(tree.children.len(), 2);

        let tree = render_to_tree(&ctx, "a+b", &settings).unwrap();
        assert_eq!(tree.classes, ["mord"]);
        assert_eq!(tree.children.len(), 5);
    }
}
