//! Braced groups
//!
//! `{...}` builds its body as a real group, so spacing and bin cancellation
//! restart inside it, and the result is an ordinary atom.

use crate::build_common::make_span;
use crate::build_tree::build_expression;
use crate::context::LayoutContext;
use crate::dom_tree::RenderNode;
use crate::options::Options;
use crate::parser::parse_node::ParseNodeOrdGroup;
use crate::types::LayoutError;

/// Builds a braced group into a `mord` span.
pub fn box_builder(
    ctx: &LayoutContext,
    group: &ParseNodeOrdGroup,
    options: &Options,
) -> Result<RenderNode, LayoutError> {
    let body = build_expression(ctx, &group.body, options, true, (None, None))?;
    Ok(make_span(vec!["mord".to_owned()], body, Some(options), None).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::parser::parse_node::AnyParseNode;
    use crate::types::Settings;

    #[test]
    fn test_empty_group_has_no_extent() {
        let ctx = LayoutContext::default();
        let nodes = parse("{}", &Settings::default(), &ctx).unwrap();
        let AnyParseNode::OrdGroup(group) = &nodes[0] else {
            panic!("expected ordgroup");
        };
        let built = box_builder(&ctx, group, &Options::default()).unwrap();
        assert_eq!(built.classes(), ["mord"]);
        assert!(built.children().is_empty());
        assert_eq!(
            (built.height(), built.depth(), built.width()),
            (0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_group_restarts_bin_cancellation() {
        let ctx = LayoutContext::default();
        let nodes = parse("a{+b}", &Settings::default(), &ctx).unwrap();
        let AnyParseNode::OrdGroup(group) = &nodes[1] else {
            panic!("expected ordgroup");
        };
        let built = box_builder(&ctx, group, &Options::default()).unwrap();
        assert_eq!(built.children()[0].classes()[0], "mord");
    }
}
