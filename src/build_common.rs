//! Box constructors shared by the builders
//!
//! Glyph boxes come from [`make_symbol`] and its wrappers, horizontal boxes
//! from [`make_span`] and vertical stacks from [`make_v_list`].

use crate::context::LayoutContext;
use crate::dom_tree::{BoxSpan, RenderNode, Span, SymbolNode};
use crate::font_metrics::CharacterMetrics;
use crate::options::{FontFamily, Options};
use crate::parser::parse_node::AnyParseNode;
use crate::spacing_data::Measurement;
use crate::types::{CssProperty, CssStyle, LayoutError, MetricsLookupError, Mode, ParseError};
use crate::units::make_em;

/// Glyph chosen for a symbol, with its metrics.
#[derive(Debug, Clone, Copy)]
pub struct SymbolLookup {
    /// The character measured, after symbol replacement
    pub value: char,
    /// Its metrics
    pub metrics: CharacterMetrics,
}

/// Element of a vertical list.
#[derive(Debug, bon::Builder)]
pub struct VListElem {
    /// The box to stack
    pub elem: RenderNode,
    /// Left margin, in ems
    pub margin_left: Option<f64>,
    /// Right margin, in ems
    pub margin_right: Option<f64>,
    /// Classes of the wrapper around the box
    pub wrapper_classes: Option<Vec<String>>,
    /// Style of the wrapper around the box
    pub wrapper_style: Option<CssStyle>,
}

/// Child of a vertical list: a box or a vertical kern.
#[derive(Debug)]
pub enum VListChild {
    /// A box
    Elem(Box<VListElem>),
    /// Vertical space, in ems
    Kern(f64),
}

impl From<VListElem> for VListChild {
    fn from(elem: VListElem) -> Self {
        Self::Elem(Box::new(elem))
    }
}

/// A box placed at its own baseline shift.
#[derive(Debug)]
pub struct VListElemAndShift {
    /// The box
    pub elem: VListElem,
    /// Downward shift of the box's baseline, in ems
    pub shift: f64,
}

#[bon::bon]
impl VListElemAndShift {
    /// Creates a shifted element.
    #[builder]
    pub fn new(
        /// The box
        elem: RenderNode,
        /// Downward shift of the box's baseline
        shift: f64,
        /// Left margin, in ems
        margin_left: Option<f64>,
        /// Right margin, in ems
        margin_right: Option<f64>,
        /// Classes of the wrapper
        wrapper_classes: Option<Vec<String>>,
    ) -> Self {
        Self {
            elem: VListElem {
                elem,
                margin_left,
                margin_right,
                wrapper_classes,
                wrapper_style: None,
            },
            shift,
        }
    }
}

/// How the elements of a vertical list are positioned.
///
/// Children are listed bottom to top.
#[derive(Debug)]
pub enum VListParam {
    /// Every element gives its own shift
    IndividualShift {
        /// The shifted elements
        children: Vec<VListElemAndShift>,
    },
    /// The top of the list sits `amount` above the baseline
    Top {
        /// Height of the top edge
        amount: f64,
        /// Elements and kerns
        children: Vec<VListChild>,
    },
    /// The bottom of the list sits `amount` below the baseline
    Bottom {
        /// Depth of the bottom edge
        amount: f64,
        /// Elements and kerns
        children: Vec<VListChild>,
    },
    /// The first element's baseline is shifted down by `amount`
    Shift {
        /// Downward shift of the first baseline
        amount: f64,
        /// Elements and kerns
        children: Vec<VListChild>,
    },
    /// The first element sits on the baseline
    FirstBaseline {
        /// Elements and kerns
        children: Vec<VListChild>,
    },
}

/// Builds a span whose extents are folded from its children: height, depth
/// and font size are maxima starting at zero, width is the sum.
#[must_use]
pub fn make_span(
    classes: Vec<String>,
    children: Vec<RenderNode>,
    options: Option<&Options>,
    style: Option<CssStyle>,
) -> BoxSpan {
    let (height, depth, max_font_size, width) =
        children.iter().fold((0.0_f64, 0.0_f64, 0.0_f64, 0.0), |acc, child| {
            (
                acc.0.max(child.height()),
                acc.1.max(child.depth()),
                acc.2.max(child.max_font_size()),
                acc.3 + child.width(),
            )
        });

    Span::builder()
        .children(children)
        .classes(classes)
        .height(height)
        .depth(depth)
        .max_font_size(max_font_size)
        .width(width)
        .maybe_style(style)
        .build(options)
}

/// Turns any positioning into a bottom-to-top list of children and the
/// depth of the bottom edge.
fn get_v_list_children_and_depth(params: VListParam) -> (Vec<VListChild>, f64) {
    match params {
        VListParam::IndividualShift { children: shifted } => {
            let mut children = Vec::with_capacity(shifted.len() * 2);
            let mut depth = 0.0;
            let mut curr_pos = 0.0;
            let mut prev_extent = 0.0;
            for (i, child) in shifted.into_iter().enumerate() {
                let elem_depth = child.elem.elem.depth();
                let bottom = -child.shift - elem_depth;
                if i == 0 {
                    depth = bottom;
                } else {
                    children.push(VListChild::Kern(bottom - curr_pos - prev_extent));
                }
                curr_pos = bottom;
                prev_extent = child.elem.elem.height() + elem_depth;
                children.push(child.elem.into());
            }
            (children, depth)
        }
        VListParam::Top { amount, children } => {
            let depth = children.iter().fold(amount, |bottom, child| {
                bottom
                    - match child {
                        VListChild::Kern(size) => *size,
                        VListChild::Elem(elem) => elem.elem.height() + elem.elem.depth(),
                    }
            });
            (children, depth)
        }
        VListParam::Bottom { amount, children } => (children, -amount),
        VListParam::Shift { amount, children } => {
            let first_depth = first_elem_depth(&children);
            (children, -first_depth - amount)
        }
        VListParam::FirstBaseline { children } => {
            let first_depth = first_elem_depth(&children);
            (children, -first_depth)
        }
    }
}

fn first_elem_depth(children: &[VListChild]) -> f64 {
    children
        .iter()
        .find_map(|child| match child {
            VListChild::Elem(elem) => Some(elem.elem.depth()),
            VListChild::Kern(_) => None,
        })
        .unwrap_or_default()
}

/// Stacks boxes vertically.
///
/// Each box is wrapped together with a `pstrut`, a zero-width strut taller
/// than any box in the list, and positioned with a `top` offset measured
/// from the strut. The result is a `vlist-t` table whose height and depth
/// are the extents of the stack; when the stack reaches below the baseline a
/// second row holds a depth strut and the table gets `vlist-t2`.
#[must_use]
pub fn make_v_list(params: VListParam) -> BoxSpan {
    let (children, depth) = get_v_list_children_and_depth(params);

    let pstrut_size = children
        .iter()
        .filter_map(|child| match child {
            VListChild::Elem(elem) => Some(elem.elem.max_font_size().max(elem.elem.height())),
            VListChild::Kern(_) => None,
        })
        .fold(0.0_f64, f64::max)
        + 2.0;
    let pstrut = make_span(
        vec!["pstrut".to_owned()],
        vec![],
        None,
        Some(CssStyle::default().with(CssProperty::Height, make_em(pstrut_size))),
    );

    let mut real_children: Vec<RenderNode> = Vec::with_capacity(children.len());
    let mut min_pos = depth;
    let mut max_pos = depth;
    let mut curr_pos = depth;
    let mut width = 0.0_f64;

    for child in children {
        match child {
            VListChild::Kern(size) => curr_pos += size,
            VListChild::Elem(child) => {
                let VListElem {
                    elem,
                    margin_left,
                    margin_right,
                    wrapper_classes,
                    wrapper_style,
                } = *child;
                let elem_height = elem.height();
                let elem_depth = elem.depth();

                let mut wrapper = make_span(
                    wrapper_classes.unwrap_or_default(),
                    vec![pstrut.clone().into(), elem],
                    None,
                    wrapper_style,
                );
                wrapper
                    .style
                    .insert(CssProperty::Top, make_em(-pstrut_size - curr_pos - elem_depth));
                if let Some(margin) = margin_left {
                    wrapper.style.insert(CssProperty::MarginLeft, make_em(margin));
                    wrapper.width += margin;
                }
                if let Some(margin) = margin_right {
                    wrapper.style.insert(CssProperty::MarginRight, make_em(margin));
                    wrapper.width += margin;
                }
                width = width.max(wrapper.width);

                real_children.push(wrapper.into());
                curr_pos += elem_height + elem_depth;
            }
        }
        min_pos = min_pos.min(curr_pos);
        max_pos = max_pos.max(curr_pos);
    }

    let mut vlist = make_span(
        vec!["vlist".to_owned()],
        real_children,
        None,
        Some(CssStyle::default().with(CssProperty::Height, make_em(max_pos))),
    );
    vlist.width = width;

    let rows: Vec<RenderNode> = if min_pos < 0.0 {
        let depth_strut = make_span(
            vec!["vlist".to_owned()],
            vec![make_span(vec![], vec![], None, None).into()],
            None,
            Some(CssStyle::default().with(CssProperty::Height, make_em(-min_pos))),
        );
        let top_strut = make_span(
            vec!["vlist-s".to_owned()],
            vec![SymbolNode::builder().text("\u{200b}").build().into()],
            None,
            None,
        );
        let mut top_row = make_span(
            vec!["vlist-r".to_owned()],
            vec![vlist.into(), top_strut.into()],
            None,
            None,
        );
        top_row.width = width;
        vec![
            top_row.into(),
            make_span(vec!["vlist-r".to_owned()], vec![depth_strut.into()], None, None).into(),
        ]
    } else {
        let mut row = make_span(vec!["vlist-r".to_owned()], vec![vlist.into()], None, None);
        row.width = width;
        vec![row.into()]
    };

    let mut classes = vec!["vlist-t".to_owned()];
    if rows.len() == 2 {
        classes.push("vlist-t2".to_owned());
    }
    let mut vtable = make_span(classes, rows, None, None);
    vtable.height = max_pos;
    vtable.depth = -min_pos;
    vtable.width = width;
    vtable
}

/// Finds the glyph `value` stands for in `mode` and measures it in
/// `font_name`.
pub fn lookup_symbol(
    ctx: &LayoutContext,
    value: &str,
    font_name: &str,
    mode: Mode,
) -> Result<SymbolLookup, MetricsLookupError> {
    let query = ctx
        .symbols
        .get(mode, value)
        .and_then(|info| info.replace)
        .or_else(|| value.chars().next())
        .unwrap_or_default();

    ctx.metrics()
        .character_metrics(query, font_name)
        .map(|metrics| SymbolLookup {
            value: query,
            metrics,
        })
        .ok_or_else(|| MetricsLookupError {
            character: query,
            font: font_name.to_owned(),
        })
}

/// Makes a glyph box, measured in `font_name`.
///
/// Italic corrections are dropped in text mode. With `options`, the glyph
/// takes the current scale as its font size and `mtight` in script styles.
pub fn make_symbol(
    ctx: &LayoutContext,
    value: &str,
    font_name: &str,
    mode: Mode,
    options: Option<&Options>,
    mut classes: Vec<String>,
) -> Result<SymbolNode, MetricsLookupError> {
    let SymbolLookup { value, metrics } = lookup_symbol(ctx, value, font_name, mode)?;
    let italic = if mode == Mode::Text { 0.0 } else { metrics.italic };

    if options.is_some_and(|o| o.style.is_tight()) {
        classes.push("mtight".to_owned());
    }

    Ok(SymbolNode::builder()
        .text(&value.to_string())
        .height(metrics.height)
        .depth(metrics.depth)
        .italic(italic)
        .skew(metrics.skew)
        .width(metrics.width)
        .max_font_size(options.map_or(1.0, |o| o.size_multiplier))
        .classes(classes)
        .build())
}

/// Makes an operator, relation or delimiter glyph in the main font.
pub fn mathsym(
    ctx: &LayoutContext,
    value: &str,
    mode: Mode,
    options: &Options,
    classes: Vec<String>,
) -> Result<SymbolNode, MetricsLookupError> {
    make_symbol(ctx, value, "Main-Regular", mode, Some(options), classes)
}

/// Makes a letter or ordinary glyph in the font `options` selects.
///
/// Math letters default to math italic and carry `mathdefault`; everything
/// else defaults to the upright main font.
pub fn make_ord(
    ctx: &LayoutContext,
    node: &AnyParseNode,
    options: &Options,
) -> Result<RenderNode, LayoutError> {
    let (mode, text, is_math_letter) = match node {
        AnyParseNode::MathOrd(ord) => (ord.mode, ord.text.as_str(), true),
        AnyParseNode::TextOrd(ord) => (ord.mode, ord.text.as_str(), false),
        AnyParseNode::Spacing(spacing) => (spacing.mode, spacing.text.as_str(), false),
        _ => {
            return Err(ParseError::with_token("make_ord: expected an ordinary symbol", node).into());
        }
    };
    let classes = vec!["mord".to_owned()];

    if let Some(font) = options.font
        && lookup_symbol(ctx, text, font.font_name(), mode).is_ok()
    {
        let mut classes = classes;
        classes.push(font.as_ref().to_owned());
        return Ok(make_symbol(ctx, text, font.font_name(), mode, Some(options), classes)?.into());
    }

    let symbol = if is_math_letter && mode == Mode::Math {
        let mut classes = classes;
        classes.push("mathdefault".to_owned());
        make_symbol(
            ctx,
            text,
            FontFamily::MathNormal.font_name(),
            mode,
            Some(options),
            classes,
        )?
    } else {
        make_symbol(ctx, text, "Main-Regular", mode, Some(options), classes)?
    };
    Ok(symbol.into())
}

/// Makes a rule box such as the fraction bar, `thickness` defaulting to the
/// font's rule thickness and never thinner than the configured minimum.
#[must_use]
pub fn make_line_span(
    ctx: &LayoutContext,
    class_name: &str,
    options: &Options,
    thickness: Option<f64>,
) -> BoxSpan {
    let mut line = make_span(vec![class_name.to_owned()], vec![], Some(options), None);
    line.height = thickness
        .unwrap_or_else(|| ctx.font_metrics(options).default_rule_thickness)
        .max(options.min_rule_thickness);
    line.style
        .insert(CssProperty::BorderBottomWidth, make_em(line.height));
    line.max_font_size = 1.0;
    line
}

/// Width of `\nulldelimiterspace`, 1.2pt.
const NULL_DELIMITER_SPACE: f64 = 0.12;

/// Empty box standing in for a missing delimiter.
#[must_use]
pub fn make_null_delimiter(options: &Options, mut classes: Vec<String>) -> BoxSpan {
    classes.push("nulldelimiter".to_owned());
    classes.extend(options.base_sizing_classes());
    let mut span = make_span(classes, vec![], None, None);
    span.width = NULL_DELIMITER_SPACE;
    span
}

impl LayoutContext {
    /// Horizontal glue of the given size.
    pub fn make_glue<T>(
        &self,
        measurement: &Measurement<T>,
        options: &Options,
    ) -> Result<BoxSpan, ParseError>
    where
        T: AsRef<str>,
    {
        let size = self.calculate_size(measurement, options)?;
        let mut rule = make_span(vec!["mspace".to_owned()], vec![], Some(options), None);
        rule.style.insert(CssProperty::MarginRight, make_em(size));
        rule.width = size;
        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_node::ParseNodeMathOrd;
    use crate::spacing_data::THINSPACE;
    use crate::style::SCRIPT;

    fn glyph(height: f64, depth: f64, width: f64) -> RenderNode {
        SymbolNode::builder()
            .text("x")
            .height(height)
            .depth(depth)
            .width(width)
            .max_font_size(1.0)
            .build()
            .into()
    }

    #[test]
    fn test_make_span_folds_extents() {
        let span = make_span(
            vec!["mord".to_owned()],
            vec![glyph(0.5, 0.1, 0.3), glyph(0.7, -0.2, 0.4)],
            None,
            None,
        );
        assert_eq!(span.height, 0.7);
        assert_eq!(span.depth, 0.1);
        assert!((span.width - 0.7).abs() < 1e-9);
        assert_eq!(span.max_font_size, 1.0);

        let empty = make_span(vec![], vec![], None, None);
        assert_eq!((empty.height, empty.depth, empty.width), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_v_list_shift() {
        let vtable = make_v_list(VListParam::Shift {
            amount: -0.363,
            children: vec![
                VListElem::builder()
                    .elem(glyph(0.45, 0.0, 0.5))
                    .margin_right(0.05)
                    .build()
                    .into(),
            ],
        });
        assert_eq!(vtable.classes, vec!["vlist-t"]);
        assert!((vtable.height - 0.813).abs() < 1e-9);
        assert!((vtable.depth + 0.363).abs() < 1e-9);
        assert!((vtable.width - 0.55).abs() < 1e-9);

        let wrapper = &vtable.children[0].children()[0].children()[0];
        assert_eq!(wrapper.style().get(CssProperty::Top), Some("-3.363em"));
        assert_eq!(wrapper.style().get(CssProperty::MarginRight), Some("0.05em"));
        let pstrut = &wrapper.children()[0];
        assert!(pstrut.has_class("pstrut"));
        assert_eq!(pstrut.style().get(CssProperty::Height), Some("3em"));
    }

    #[test]
    fn test_v_list_below_baseline_adds_depth_row() {
        let vtable = make_v_list(VListParam::IndividualShift {
            children: vec![
                VListElemAndShift::builder()
                    .elem(glyph(0.5, 0.0, 0.5))
                    .shift(0.7)
                    .build(),
                VListElemAndShift::builder()
                    .elem(glyph(0.5, 0.0, 0.3))
                    .shift(-0.6)
                    .build(),
            ],
        });
        assert_eq!(vtable.classes, vec!["vlist-t", "vlist-t2"]);
        assert!((vtable.height - 1.1).abs() < 1e-9);
        assert!((vtable.depth - 0.7).abs() < 1e-9);
        assert_eq!(vtable.children.len(), 2);
        assert!(vtable.children[0].child(1).is_some_and(|s| s.has_class("vlist-s")));
    }

    #[test]
    fn test_make_ord_fonts() {
        let ctx = LayoutContext::default();
        let node = AnyParseNode::MathOrd(ParseNodeMathOrd {
            mode: Mode::Math,
            loc: None,
            text: "x".to_owned(),
        });

        let italic = make_ord(&ctx, &node, &Options::default()).unwrap();
        assert_eq!(italic.classes(), ["mord", "mathdefault"]);
        assert_eq!(italic.height(), 0.43056);

        let upright = make_ord(&ctx, &node, &Options::default().with_font(FontFamily::MathRm))
            .unwrap();
        assert_eq!(upright.classes(), ["mord", "mathrm"]);

        let script = make_ord(&ctx, &node, &Options::default().having_style(SCRIPT)).unwrap();
        assert!(script.has_class("mtight"));
        assert_eq!(script.max_font_size(), 0.7);
    }

    #[test]
    fn test_missing_glyph() {
        let ctx = LayoutContext::default();
        let err = make_symbol(&ctx, "2", "Math-Italic", Mode::Math, None, vec![]).unwrap_err();
        assert_eq!(err.character, '2');
        assert_eq!(err.font, "Math-Italic");
    }

    #[test]
    fn test_rules_and_glue() {
        let ctx = LayoutContext::default();
        let options = Options::default();
        let line = make_line_span(&ctx, "frac-line", &options, None);
        assert_eq!(line.height, 0.04);
        assert_eq!(line.style.get(CssProperty::BorderBottomWidth), Some("0.04em"));

        let glue = ctx.make_glue(&THINSPACE, &options).unwrap();
        assert_eq!(glue.style.get(CssProperty::MarginRight), Some("0.1667em"));

        let null = make_null_delimiter(&options, vec!["mopen".to_owned()]);
        assert_eq!(null.classes, vec!["mopen", "nulldelimiter"]);
    }
}
