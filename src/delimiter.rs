//! Delimiter sizing
//!
//! A delimiter of a requested height comes from one of three places:
//!
//! - a *small* delimiter: the Main-Regular glyph, set in scriptscript,
//!   script or text style
//! - a *large* delimiter: the glyph from one of the Size1 to Size4 fonts
//! - a *stacked* delimiter: top, optional middle, repeated extension and
//!   bottom pieces stacked in a vertical list (TeXbook p. 442)
//!
//! Each delimiter walks a sequence of these candidates and takes the first
//! one tall enough.

use phf::{Set, phf_set};

use crate::build_common::{
    VListChild, VListElem, VListParam, lookup_symbol, make_span, make_symbol, make_v_list,
};
use crate::context::LayoutContext;
use crate::dom_tree::{BoxSpan, RenderNode};
use crate::font_metrics::CharacterMetrics;
use crate::options::Options;
use crate::style::{SCRIPT, SCRIPTSCRIPT, Style, TEXT};
use crate::symbols::Mode;
use crate::types::{CssProperty, CssStyle, LayoutError, MetricsLookupError, ParseError, ParseErrorKind};
use crate::units::make_em;

const SIZE_TO_MAX_HEIGHT: [f64; 5] = [0.0, 1.2, 1.8, 2.4, 3.0];

/// Height+depth of the large delimiter glyphs of size 1 to 4.
#[must_use]
pub fn size_to_max_height(size: usize) -> f64 {
    SIZE_TO_MAX_HEIGHT[size.min(SIZE_TO_MAX_HEIGHT.len() - 1)]
}

/// One candidate of a delimiter sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterType {
    /// Main-Regular glyph set in the given style
    Small(Style),
    /// Glyph from the `Size{n}-Regular` font
    Large(usize),
    /// Pieces stacked to any height
    Stack,
}

impl DelimiterType {
    const fn font(self) -> &'static str {
        match self {
            Self::Small(_) => "Main-Regular",
            Self::Large(1) => "Size1-Regular",
            Self::Large(2) => "Size2-Regular",
            Self::Large(3) => "Size3-Regular",
            Self::Large(_) | Self::Stack => "Size4-Regular",
        }
    }
}

fn get_metrics(
    ctx: &LayoutContext,
    symbol: &str,
    font: &str,
    mode: Mode,
) -> Result<CharacterMetrics, MetricsLookupError> {
    Ok(lookup_symbol(ctx, symbol, font, mode)?.metrics)
}

/// Wraps a delimiter set in `to_style`, rescaling its extents to the
/// current size.
fn style_wrap(delim: RenderNode, to_style: Style, options: &Options, classes: &[String]) -> BoxSpan {
    let new_options = options.having_base_style(Some(to_style));
    let mut span = make_span(
        classes
            .iter()
            .cloned()
            .chain(new_options.sizing_classes(options))
            .collect(),
        vec![delim],
        Some(options),
        None,
    );

    let multiplier = new_options.size_multiplier / options.size_multiplier;
    span.height *= multiplier;
    span.depth *= multiplier;
    span.max_font_size = new_options.size_multiplier;
    span
}

/// Moves a delimiter set in `style` so that it is centered on the axis of
/// the current size.
fn center_span(mut span: BoxSpan, ctx: &LayoutContext, options: &Options, style: Style) -> BoxSpan {
    let new_options = options.having_base_style(Some(style));
    let shift = (1.0 - options.size_multiplier / new_options.size_multiplier)
        * ctx.font_metrics(options).axis_height;

    span.classes.push("delimcenter".to_owned());
    span.style.insert(CssProperty::Top, make_em(shift));
    span.height -= shift;
    span.depth += shift;
    span
}

/// Delimiter in the main font, restyled to `style`.
pub fn make_small_delim(
    ctx: &LayoutContext,
    delim: &str,
    style: Style,
    center: bool,
    options: &Options,
    mode: Mode,
    classes: &[String],
) -> Result<BoxSpan, LayoutError> {
    let text = make_symbol(ctx, delim, "Main-Regular", mode, Some(options), classes.to_vec())?;
    let span = style_wrap(text.into(), style, options, classes);
    Ok(if center {
        center_span(span, ctx, options, style)
    } else {
        span
    })
}

/// Delimiter from the `Size{size}` font, always set in text style.
pub fn make_large_delim(
    ctx: &LayoutContext,
    delim: &str,
    size: usize,
    center: bool,
    options: &Options,
    mode: Mode,
    classes: &[String],
) -> Result<BoxSpan, LayoutError> {
    let font = DelimiterType::Large(size).font();
    let inner = make_symbol(ctx, delim, font, mode, Some(options), vec![])?;
    let span = style_wrap(
        make_span(
            vec!["delimsizing".to_owned(), format!("size{size}")],
            vec![inner.into()],
            Some(options),
            None,
        )
        .into(),
        TEXT,
        options,
        classes,
    );
    Ok(if center {
        center_span(span, ctx, options, TEXT)
    } else {
        span
    })
}

/// One piece of a stacked delimiter.
fn make_glyph_span(
    ctx: &LayoutContext,
    symbol: &str,
    font: &str,
    mode: Mode,
) -> Result<VListChild, MetricsLookupError> {
    let size_class = if font == "Size1-Regular" {
        "delim-size1"
    } else {
        "delim-size4"
    };
    let glyph = make_span(
        vec![],
        vec![make_symbol(ctx, symbol, font, mode, None, vec![])?.into()],
        None,
        None,
    );
    let piece = make_span(
        vec!["delimsizinginner".to_owned(), size_class.to_owned()],
        vec![glyph.into()],
        None,
        None,
    );
    Ok(VListElem::builder().elem(piece.into()).build().into())
}

/// Pieces of a stacked delimiter.
struct StackParts {
    top: &'static str,
    middle: Option<&'static str>,
    repeat: &'static str,
    bottom: &'static str,
    font: &'static str,
}

fn stack_parts(delim: &str) -> Option<StackParts> {
    let parts = |top, middle, repeat, bottom, font| StackParts {
        top,
        middle,
        repeat,
        bottom,
        font,
    };
    Some(match delim {
        "|" | "\\vert" => parts("\u{2223}", None, "\u{2223}", "\u{2223}", "Size1-Regular"),
        "\\|" | "\\Vert" => parts("\u{2225}", None, "\u{2225}", "\u{2225}", "Size1-Regular"),
        "(" => parts("\u{239b}", None, "\u{239c}", "\u{239d}", "Size4-Regular"),
        ")" => parts("\u{239e}", None, "\u{239f}", "\u{23a0}", "Size4-Regular"),
        "[" | "\\lbrack" => parts("\u{23a1}", None, "\u{23a2}", "\u{23a3}", "Size4-Regular"),
        "]" | "\\rbrack" => parts("\u{23a4}", None, "\u{23a5}", "\u{23a6}", "Size4-Regular"),
        "\\{" | "\\lbrace" => parts(
            "\u{23a7}",
            Some("\u{23a8}"),
            "\u{23aa}",
            "\u{23a9}",
            "Size4-Regular",
        ),
        "\\}" | "\\rbrace" => parts(
            "\u{23ab}",
            Some("\u{23ac}"),
            "\u{23aa}",
            "\u{23ad}",
            "Size4-Regular",
        ),
        _ => return None,
    })
}

/// Stacks pieces of `delim` to a total height of at least `height_total`.
pub fn make_stacked_delim(
    ctx: &LayoutContext,
    delim: &str,
    height_total: f64,
    center: bool,
    options: &Options,
    mode: Mode,
    classes: &[String],
) -> Result<BoxSpan, LayoutError> {
    let Some(parts) = stack_parts(delim) else {
        return Err(ParseError::new(ParseErrorKind::InvalidDelimiter {
            delimiter: delim.to_owned(),
        })
        .into());
    };
    let font = parts.font;

    let extent = |m: CharacterMetrics| m.height + m.depth;
    let top_height = extent(get_metrics(ctx, parts.top, font, mode)?);
    let repeat_height = extent(get_metrics(ctx, parts.repeat, font, mode)?);
    let bottom_height = extent(get_metrics(ctx, parts.bottom, font, mode)?);
    let middle_height = match parts.middle {
        Some(middle) => extent(get_metrics(ctx, middle, font, mode)?),
        None => 0.0,
    };
    let middle_factor = if parts.middle.is_some() { 2.0 } else { 1.0 };

    let minimal_height = top_height + bottom_height + middle_height;
    let repeat_count = ((height_total - minimal_height) / (middle_factor * repeat_height))
        .ceil()
        .max(0.0) as usize;
    let real_height_total =
        (repeat_count as f64 * middle_factor).mul_add(repeat_height, minimal_height);

    let axis_height = ctx.font_metrics(options).axis_height;
    let axis_height = if center {
        axis_height * options.size_multiplier
    } else {
        axis_height
    };
    let depth = real_height_total / 2.0 - axis_height;

    log::debug!(
        "stacking {delim}: {repeat_count} repeats for {height_total:.4}em, real {real_height_total:.4}em"
    );

    // bottom to top
    let mut stack = Vec::with_capacity(2 * repeat_count + 3);
    stack.push(make_glyph_span(ctx, parts.bottom, font, mode)?);
    for _ in 0..repeat_count {
        stack.push(make_glyph_span(ctx, parts.repeat, font, mode)?);
    }
    if let Some(middle) = parts.middle {
        stack.push(make_glyph_span(ctx, middle, font, mode)?);
        for _ in 0..repeat_count {
            stack.push(make_glyph_span(ctx, parts.repeat, font, mode)?);
        }
    }
    stack.push(make_glyph_span(ctx, parts.top, font, mode)?);

    let new_options = options.having_base_style(Some(TEXT));
    let inner = make_v_list(VListParam::Bottom {
        amount: depth,
        children: stack,
    });

    Ok(style_wrap(
        make_span(
            vec!["delimsizing".to_owned(), "mult".to_owned()],
            vec![inner.into()],
            Some(&new_options),
            None,
        )
        .into(),
        TEXT,
        options,
        classes,
    ))
}

/// Delimiter of a fixed size 1 to 4, as made by `\big` and friends.
pub fn sized_delim(
    ctx: &LayoutContext,
    delim: &str,
    size: usize,
    options: &Options,
    mode: Mode,
    classes: &[String],
) -> Result<BoxSpan, LayoutError> {
    if STACK_LARGE_DELIMITERS.contains(delim) || STACK_NEVER_DELIMITERS.contains(delim) {
        make_large_delim(ctx, delim, size, false, options, mode, classes)
    } else if STACK_ALWAYS_DELIMITERS.contains(delim) {
        make_stacked_delim(
            ctx,
            delim,
            size_to_max_height(size),
            false,
            options,
            mode,
            classes,
        )
    } else {
        Err(ParseError::new(ParseErrorKind::InvalidDelimiter {
            delimiter: delim.to_owned(),
        })
        .into())
    }
}

/// First candidate of `sequence` whose glyph is taller than `height`.
///
/// Smaller styles start earlier in the sequence: scriptscript at the first
/// entry, script at the second, text and display at the third.
fn traverse_sequence(
    ctx: &LayoutContext,
    delim: &str,
    height: f64,
    sequence: &[DelimiterType],
    options: &Options,
) -> Result<DelimiterType, LayoutError> {
    let start = 3_usize.saturating_sub(options.style.size).min(2);
    for &delim_type in sequence.iter().skip(start) {
        if delim_type == DelimiterType::Stack {
            break;
        }

        let metrics = get_metrics(ctx, delim, delim_type.font(), Mode::Math)?;
        let mut height_depth = metrics.height + metrics.depth;
        if let DelimiterType::Small(style) = delim_type {
            height_depth *= options.having_base_style(Some(style)).size_multiplier;
        }

        if height_depth > height {
            return Ok(delim_type);
        }
    }

    sequence
        .last()
        .copied()
        .ok_or_else(|| ParseError::new("empty delimiter sequence").into())
}

/// Delimiter at least `height` tall, taken from the first fitting candidate.
pub fn custom_sized_delim(
    ctx: &LayoutContext,
    delim: &str,
    height: f64,
    center: bool,
    options: &Options,
    mode: Mode,
    classes: &[String],
) -> Result<BoxSpan, LayoutError> {
    let sequence = if STACK_NEVER_DELIMITERS.contains(delim) {
        STACK_NEVER_DELIMITER_SEQUENCE
    } else if STACK_LARGE_DELIMITERS.contains(delim) {
        STACK_LARGE_DELIMITER_SEQUENCE
    } else if STACK_ALWAYS_DELIMITERS.contains(delim) {
        STACK_ALWAYS_DELIMITER_SEQUENCE
    } else {
        return Err(ParseError::new(ParseErrorKind::InvalidDelimiter {
            delimiter: delim.to_owned(),
        })
        .into());
    };

    let delim_type = traverse_sequence(ctx, delim, height, sequence, options)?;
    log::debug!("delimiter {delim} at {height:.4}em: {delim_type:?}");

    match delim_type {
        DelimiterType::Small(style) => {
            make_small_delim(ctx, delim, style, center, options, mode, classes)
        }
        DelimiterType::Large(size) => {
            make_large_delim(ctx, delim, size, center, options, mode, classes)
        }
        DelimiterType::Stack => {
            make_stacked_delim(ctx, delim, height, center, options, mode, classes)
        }
    }
}

/// Advance width of a radical sign drawn beyond the largest glyph.
const SQRT_TALL_ADVANCE: f64 = 1.056;

/// Radical sign at least `height` tall.
///
/// Beyond the `Size4` glyph the sign is a `sqrt-tall` span measuring exactly
/// `height`; the renderer draws it.
pub fn make_sqrt_image(
    ctx: &LayoutContext,
    height: f64,
    options: &Options,
    mode: Mode,
) -> Result<BoxSpan, LayoutError> {
    let delim_type =
        traverse_sequence(ctx, "\\surd", height, STACK_LARGE_DELIMITER_SEQUENCE, options)?;
    log::debug!("radical at {height:.4}em: {delim_type:?}");

    match delim_type {
        DelimiterType::Small(style) => {
            make_small_delim(ctx, "\\surd", style, false, options, mode, &[])
        }
        DelimiterType::Large(size) => {
            make_large_delim(ctx, "\\surd", size, false, options, mode, &[])
        }
        DelimiterType::Stack => {
            let mut span = make_span(
                vec!["sqrt-tall".to_owned()],
                vec![],
                Some(options),
                Some(
                    CssStyle::default()
                        .with(CssProperty::Height, make_em(height))
                        .with(CssProperty::MinWidth, make_em(0.742)),
                ),
            );
            span.height = height;
            span.width = SQRT_TALL_ADVANCE;
            Ok(span)
        }
    }
}

/// Delimiter for `\left`/`\right` around material of the given height and
/// depth, sized with TeX's `\delimiterfactor` and `\delimitershortfall`.
pub fn left_right_delim(
    ctx: &LayoutContext,
    delim: &str,
    height: f64,
    depth: f64,
    options: &Options,
    mode: Mode,
    classes: &[String],
) -> Result<BoxSpan, LayoutError> {
    let metrics = ctx.font_metrics(options);
    let axis_height = metrics.axis_height * options.size_multiplier;

    // tex.web, make_left_right
    let delimiter_factor = 901.0;
    let delimiter_extend = 5.0 / metrics.pt_per_em;

    let max_dist_from_axis = (height - axis_height).max(depth + axis_height);
    let total_height = (max_dist_from_axis / 500.0 * delimiter_factor)
        .max(2.0_f64.mul_add(max_dist_from_axis, -delimiter_extend));

    custom_sized_delim(ctx, delim, total_height, true, options, mode, classes)
}

/// Whether `delim` can follow `\left`, `\right` or `\big`.
#[must_use]
pub fn is_delimiter(delim: &str) -> bool {
    delim == "."
        || STACK_LARGE_DELIMITERS.contains(delim)
        || STACK_ALWAYS_DELIMITERS.contains(delim)
        || STACK_NEVER_DELIMITERS.contains(delim)
}

const STACK_LARGE_DELIMITERS: Set<&str> = phf_set!(
    "(", ")", "[", "\\lbrack", "]", "\\rbrack", "\\{", "\\lbrace", "\\}", "\\rbrace",
);

const STACK_ALWAYS_DELIMITERS: Set<&str> = phf_set!("|", "\\|", "\\vert", "\\Vert");

const STACK_NEVER_DELIMITERS: Set<&str> = phf_set!("/", "\\surd");

const STACK_NEVER_DELIMITER_SEQUENCE: &[DelimiterType] = &[
    DelimiterType::Small(SCRIPTSCRIPT),
    DelimiterType::Small(SCRIPT),
    DelimiterType::Small(TEXT),
    DelimiterType::Large(1),
    DelimiterType::Large(2),
    DelimiterType::Large(3),
    DelimiterType::Large(4),
];

const STACK_ALWAYS_DELIMITER_SEQUENCE: &[DelimiterType] = &[
    DelimiterType::Small(SCRIPTSCRIPT),
    DelimiterType::Small(SCRIPT),
    DelimiterType::Small(TEXT),
    DelimiterType::Stack,
];

const STACK_LARGE_DELIMITER_SEQUENCE: &[DelimiterType] = &[
    DelimiterType::Small(SCRIPTSCRIPT),
    DelimiterType::Small(SCRIPT),
    DelimiterType::Small(TEXT),
    DelimiterType::Large(1),
    DelimiterType::Large(2),
    DelimiterType::Large(3),
    DelimiterType::Large(4),
    DelimiterType::Stack,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_content_gets_small_delim() {
        let ctx = LayoutContext::default();
        let options = Options::default();
        let span = left_right_delim(&ctx, "(", 0.5, 0.1, &options, Mode::Math, &[]).unwrap();
        assert!(span.classes.contains(&"delimcenter".to_owned()));
        let RenderNode::Symbol(paren) = &span.children[0] else {
            panic!("expected a glyph, got {:?}", span.children[0]);
        };
        assert_eq!(paren.text, "(");
    }

    #[test]
    fn test_sequence_grows_with_height() {
        let ctx = LayoutContext::default();
        let options = Options::default();
        let pick = |delim, height, sequence| {
            traverse_sequence(&ctx, delim, height, sequence, &options).unwrap()
        };
        assert_eq!(pick("(", 0.5, STACK_LARGE_DELIMITER_SEQUENCE), DelimiterType::Small(TEXT));
        assert_eq!(pick("(", 1.1, STACK_LARGE_DELIMITER_SEQUENCE), DelimiterType::Large(1));
        assert_eq!(pick("(", 2.5, STACK_LARGE_DELIMITER_SEQUENCE), DelimiterType::Large(4));
        assert_eq!(pick("(", 5.0, STACK_LARGE_DELIMITER_SEQUENCE), DelimiterType::Stack);
        assert_eq!(pick("/", 5.0, STACK_NEVER_DELIMITER_SEQUENCE), DelimiterType::Large(4));
        assert_eq!(pick("|", 1.5, STACK_ALWAYS_DELIMITER_SEQUENCE), DelimiterType::Stack);
    }

    #[test]
    fn test_script_styles_start_earlier() {
        let ctx = LayoutContext::default();
        let options = Options::default().having_style(SCRIPTSCRIPT);
        assert_eq!(
            traverse_sequence(&ctx, "(", 0.1, STACK_LARGE_DELIMITER_SEQUENCE, &options).unwrap(),
            DelimiterType::Small(SCRIPTSCRIPT)
        );
    }

    #[test]
    fn test_stacked_paren_is_tall_enough() {
        let ctx = LayoutContext::default();
        let options = Options::default();
        let span = make_stacked_delim(&ctx, "(", 5.0, true, &options, Mode::Math, &[]).unwrap();
        assert!(span.height + span.depth >= 5.0);
        assert!(span.children[0].has_class("mult"));

        let brace = make_stacked_delim(&ctx, "\\{", 4.0, false, &options, Mode::Math, &[]).unwrap();
        assert!(brace.height + brace.depth >= 4.0);
    }

    #[test]
    fn test_sqrt_image_beyond_glyphs() {
        let ctx = LayoutContext::default();
        let options = Options::default();

        let glyph = make_sqrt_image(&ctx, 2.5, &options, Mode::Math).unwrap();
        assert!(glyph.children[0].has_class("size4"));

        let tall = make_sqrt_image(&ctx, 4.2, &options, Mode::Math).unwrap();
        assert_eq!(tall.classes, vec!["sqrt-tall"]);
        assert!(tall.children.is_empty());
        assert_eq!(tall.height, 4.2);
        assert_eq!(tall.depth, 0.0);
        assert_eq!(tall.width, SQRT_TALL_ADVANCE);
        assert_eq!(tall.style.get(CssProperty::Height), Some("4.2em"));
    }

    #[test]
    fn test_sized_delims() {
        let ctx = LayoutContext::default();
        let options = Options::default();
        for size in 1..=4 {
            let span = sized_delim(&ctx, "[", size, &options, Mode::Math, &[]).unwrap();
            assert!(span.children[0].has_class(&format!("size{size}")));
        }
        let vert = sized_delim(&ctx, "|", 4, &options, Mode::Math, &[]).unwrap();
        assert!(vert.height + vert.depth >= size_to_max_height(4));

        assert!(sized_delim(&ctx, "x", 1, &options, Mode::Math, &[]).is_err());
        assert!(is_delimiter("."));
        assert!(!is_delimiter("x"));
    }
}
