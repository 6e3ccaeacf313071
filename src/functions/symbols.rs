//! Plain symbols: letters, digits, atoms and active spaces

use phf::phf_map;

use crate::build_common::{make_ord, make_span, mathsym};
use crate::context::LayoutContext;
use crate::dom_tree::RenderNode;
use crate::options::Options;
use crate::parser::parse_node::{AnyParseNode, ParseNodeAtom, ParseNodeSpacing};
use crate::types::{LayoutError, Mode, ParseError};

/// Spaces drawn as a glyph, with the extra class each one carries.
static REGULAR_SPACE: phf::Map<&'static str, Option<&'static str>> = phf_map! {
    " " => None,
    "\\ " => None,
    "~" => Some("nobreak"),
    "\\space" => None,
    "\\nobreakspace" => Some("nobreak"),
};

/// Builds a letter or an upright ordinary glyph.
pub fn ord_builder(
    ctx: &LayoutContext,
    node: &AnyParseNode,
    options: &Options,
) -> Result<RenderNode, LayoutError> {
    make_ord(ctx, node, options)
}

/// Builds a symbol with an atom class; the class is the first class of the
/// box (`+` becomes `mbin`).
pub fn atom_builder(
    ctx: &LayoutContext,
    group: &ParseNodeAtom,
    options: &Options,
) -> Result<RenderNode, LayoutError> {
    let class = format!("m{}", group.family.as_ref());
    Ok(mathsym(ctx, &group.text, group.mode, options, vec![class])?.into())
}

/// Builds an active space such as `~`.
pub fn spacing_builder(
    ctx: &LayoutContext,
    node: &AnyParseNode,
    group: &ParseNodeSpacing,
    options: &Options,
) -> Result<RenderNode, LayoutError> {
    let Some(class_name) = REGULAR_SPACE.get(group.text.as_str()) else {
        return Err(ParseError::with_token("Unknown type of space", node).into());
    };
    let class_name = class_name.unwrap_or_default();

    if group.mode == Mode::Text {
        let mut ord = make_ord(ctx, node, options)?;
        ord.add_class(class_name);
        Ok(ord)
    } else {
        let symbol = mathsym(ctx, &group.text, Mode::Math, options, vec![])?;
        Ok(make_span(
            vec!["mspace".to_owned(), class_name.to_owned()],
            vec![symbol.into()],
            Some(options),
            None,
        )
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::Atom;

    #[test]
    fn test_atom_class_comes_from_family() {
        let ctx = LayoutContext::default();
        let plus = ParseNodeAtom {
            family: Atom::Bin,
            mode: Mode::Math,
            loc: None,
            text: "+".to_owned(),
        };
        let built = atom_builder(&ctx, &plus, &Options::default()).unwrap();
        assert_eq!(built.classes(), ["mbin"]);

        let minus = ParseNodeAtom {
            text: "-".to_owned(),
            ..plus
        };
        let built = atom_builder(&ctx, &minus, &Options::default()).unwrap();
        assert_eq!(built.as_symbol().map(|s| s.text.as_str()), Some("\u{2212}"));
    }

    #[test]
    fn test_spaces() {
        let ctx = LayoutContext::default();
        let tilde = ParseNodeSpacing {
            mode: Mode::Math,
            loc: None,
            text: "~".to_owned(),
        };
        let node = AnyParseNode::Spacing(tilde.clone());
        let built = spacing_builder(&ctx, &node, &tilde, &Options::default()).unwrap();
        assert_eq!(built.classes(), ["mspace", "nobreak"]);
        assert_eq!(built.width(), 0.25);

        let space = ParseNodeSpacing {
            mode: Mode::Text,
            loc: None,
            text: " ".to_owned(),
        };
        let node = AnyParseNode::Spacing(space.clone());
        let built = spacing_builder(&ctx, &node, &space, &Options::default()).unwrap();
        assert_eq!(built.classes(), ["mord"]);
    }
}
