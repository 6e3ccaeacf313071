mod setup;
use katex_layout::{
    CharacterMetrics, LayoutContext, LayoutError, MetricsProvider, RenderNode, Settings,
    font_metrics::{BuiltinMetrics, FontMetrics},
    parser::parse_node::ParseNode,
    render_to_tree,
    types::{CssProperty, ParseErrorKind},
};
use setup::*;

#[test]
fn a_parser() {
    it("should not fail on an empty string", || {
        expect!("").to_parse(&strict_settings())
    });

    it("should ignore whitespace", || {
        expect!("    x    y    ").to_parse_like("xy", &strict_settings())
    });

    it("should accept scripts in either order", || {
        expect!("x_1^2").to_parse_like("x^2_1", &strict_settings())
    });

    it("should fail on unknown control sequences", || {
        let err = get_parsed("\\foo").unwrap_err();
        assert!(matches!(
            *err.kind,
            ParseErrorKind::UndefinedControlSequence { ref name } if name == "\\foo"
        ));
        Ok(())
    });

    it("should fail on unmatched braces", || {
        expect!("{x").not_to_parse(&strict_settings())?;
        expect!("x}").not_to_parse(&strict_settings())
    });

    it("should fail on missing arguments", || {
        expect!("\\frac{1}").not_to_parse(&strict_settings())?;
        expect!("\\sqrt").not_to_parse(&strict_settings())
    });
}

#[test]
fn a_script_parser() {
    it("should reject a double superscript", || {
        let err = get_parsed("x^2^3").unwrap_err();
        assert!(matches!(*err.kind, ParseErrorKind::DoubleSuperscript));
        assert!(err.position.is_some());
        Ok(())
    });

    it("should reject a double subscript", || {
        let err = get_parsed("x_2_3").unwrap_err();
        assert!(matches!(*err.kind, ParseErrorKind::DoubleSubscript));
        Ok(())
    });

    it("should combine a superscript and a subscript", || {
        let parsed = get_parsed("x^2_3")?;
        assert_eq!(parsed.len(), 1);
        let ParseNode::SupSub(supsub) = &parsed[0] else {
            panic!("expected supsub, got {:?}", parsed[0]);
        };
        assert!(supsub.sup.is_some() && supsub.sub.is_some());
        Ok(())
    });
}

#[test]
fn a_superscript_builder() {
    it("should lay out x^2 at text style", || {
        let tree = get_built("x^2")?;
        assert_eq!(tree.classes, ["mord"]);
        assert_close(tree.depth, 0.0);
        assert_close(tree.height, 0.814108);
        assert_close(tree.max_font_size, 1.0);
        assert_eq!(tree.children.len(), 2);

        let x = tree.children[0].as_symbol().unwrap();
        assert_eq!(x.text, "x");
        assert_eq!(x.classes.len(), 2);
        assert_close(x.height, 0.43056);
        assert_close(x.depth, 0.0);
        assert_close(x.skew, 0.02778);
        assert_close(x.width, 0.57153);
        assert_close(x.max_font_size, 1.0);

        let supsub = &tree.children[1];
        assert!(supsub.has_class("msupsub"));
        assert_close(supsub.height(), 0.814108);
        assert_close(supsub.max_font_size(), 0.7);

        // msupsub > vlist-t > vlist-r > vlist > wrapper > [pstrut, script]
        let vlist_t = descend(supsub, &[0]);
        assert_eq!(vlist_t.classes(), ["vlist-t"]);
        assert_close(vlist_t.height(), 0.814108);
        assert_close(vlist_t.depth(), -0.363);
        assert_eq!(vlist_t.children().len(), 1);

        let vlist_r = descend(vlist_t, &[0]);
        assert_eq!(vlist_r.classes(), ["vlist-r"]);
        assert_close(vlist_r.height(), 0.451108);

        let vlist = descend(vlist_r, &[0]);
        assert_eq!(vlist.classes(), ["vlist"]);
        assert_close(vlist.height(), 0.451108);
        assert_eq!(vlist.children().len(), 1);

        let wrapper = descend(vlist, &[0]).as_span().unwrap();
        assert!(wrapper.classes.is_empty());
        assert_eq!(wrapper.children.len(), 2);
        assert_close(wrapper.height, 0.451108);
        assert_eq!(wrapper.style.get(CssProperty::Top), Some("-3.063em"));

        let pstrut = &wrapper.children[0];
        assert_eq!(pstrut.classes(), ["pstrut"]);
        assert_eq!(pstrut.style().get(CssProperty::Height), Some("2.7em"));
        assert_close(pstrut.max_font_size(), 0.0);
        assert!(pstrut.children().is_empty());

        let script = &wrapper.children[1];
        assert_eq!(script.classes(), ["sizing", "reset-size6", "size3", "mtight"]);
        assert_close(script.height(), 0.451108);
        assert_close(script.max_font_size(), 0.7);

        let two = descend(script, &[0]).as_symbol().unwrap();
        assert_eq!(two.text, "2");
        assert_eq!(two.classes, ["mord", "mtight"]);
        assert_close(two.height, 0.64444);
        assert_close(two.width, 0.5);
        assert_close(two.max_font_size, 0.7);
        assert_close(two.skew, 0.0);
        Ok(())
    });
}

#[test]
fn a_fraction_builder() {
    it("should lay out \\frac{1}{2} at text style", || {
        let tree = get_built("\\frac{1}{2}")?;
        assert_eq!(tree.classes, ["mord"]);
        assert_close(tree.depth, 0.345);
        assert_close(tree.height, 0.845108);
        assert_close(tree.max_font_size, 1.0);
        assert_eq!(tree.children.len(), 3);

        let [open, frac, close] = tree.children.as_slice() else {
            panic!("expected three children");
        };
        assert_eq!(open.classes(), ["mopen", "nulldelimiter"]);
        assert!(frac.has_class("mfrac"));
        assert_eq!(close.classes(), ["mclose", "nulldelimiter"]);

        // mfrac > vlist-t > vlist-r > vlist > [denom, rule, numer]
        let rule_wrapper = descend(frac, &[0, 0, 0, 1]);
        assert_eq!(rule_wrapper.style().get(CssProperty::Top), Some("-3.23em"));
        assert_close(rule_wrapper.height(), 0.04);
        assert_eq!(rule_wrapper.children().len(), 2);
        let rule = &rule_wrapper.children()[1];
        assert!(rule.has_class("frac-line"));
        assert_close(rule.height(), 0.04);
        assert_eq!(
            rule.style().get(CssProperty::BorderBottomWidth),
            Some("0.04em")
        );

        // Both parts are set in script size inside a sizing span
        let denom = descend(frac, &[0, 0, 0, 0, 1]);
        assert_eq!(denom.classes(), ["sizing", "reset-size6", "size3", "mtight"]);
        let two = descend(frac, &[0, 0, 0, 0, 1, 0, 0]).as_symbol().unwrap();
        assert_eq!(two.text, "2");
        assert_eq!(two.classes, ["mord", "mtight"]);
        assert_close(two.height, 0.64444);
        assert_close(two.max_font_size, 0.7);

        let one = descend(frac, &[0, 0, 0, 2, 1, 0, 0]).as_symbol().unwrap();
        assert_eq!(one.text, "1");
        Ok(())
    });

    it("should grow in display mode", || {
        let text = get_built("\\frac{1}{2}")?;
        let display = expect!("\\frac{1}{2}").to_build(&display_settings())?;
        assert!(display.height > text.height);
        Ok(())
    });
}

#[test]
fn a_spacing_builder() {
    it("should put glue between atoms", || {
        let tree = get_built("a+b=c")?;
        let classes: Vec<&str> = tree
            .children
            .iter()
            .map(|child| child.classes()[0].as_str())
            .collect();
        assert_eq!(
            classes,
            ["mord", "mspace", "mbin", "mspace", "mord", "mspace", "mrel", "mspace", "mord"]
        );
        assert_close(tree.children[1].width(), 4.0 / 18.0);
        assert_close(tree.children[5].width(), 5.0 / 18.0);
        Ok(())
    });

    it("should treat a leading binary operator as ordinary", || {
        let tree = get_built("-x")?;
        assert_eq!(tree.children.len(), 2);
        assert!(tree.children[0].has_class("mord"));
        Ok(())
    });

    it("should build an empty group as an empty box", || {
        let tree = get_built("{}")?;
        assert_close(tree.height, 0.0);
        assert_close(tree.depth, 0.0);
        assert_close(tree.width, 0.0);
        Ok(())
    });

    it("should honour explicit spaces", || {
        expect!("a\\,b").to_build(&Settings::default())?;
        expect!("a\\quad b").to_build(&Settings::default())?;
        expect!("\\kern{1mu}").not_to_parse(&strict_settings())
    });
}

#[test]
fn a_delimiter_builder() {
    it("should size \\left and \\right to the body", || {
        let short = get_built("\\left( x \\right)")?;
        let tall = get_built("\\left( \\frac{\\frac{a}{b}}{\\frac{c}{d}} \\right)")?;
        assert_eq!(short.classes, ["minner"]);
        let open_total = |node: &RenderNode| node.height() + node.depth();
        assert!(open_total(&tall.children[0]) > open_total(&short.children[0]));
        Ok(())
    });

    it("should require a matching \\right", || {
        expect!("\\left( x").not_to_parse(&strict_settings())?;
        expect!("x \\right)").not_to_parse(&strict_settings())
    });

    it("should build fixed sizes", || {
        let small = get_built("\\bigl(")?;
        let large = get_built("\\Biggl(")?;
        assert!(large.height + large.depth > small.height + small.depth);
        Ok(())
    });
}

#[test]
fn an_operator_builder() {
    it("should stack limits in display mode", || {
        let tree = expect!("\\sum_{i=1}^n i").to_build(&display_settings())?;
        assert!(tree.children[0].has_class("op-limits"));
        Ok(())
    });

    it("should keep side scripts in text mode", || {
        let tree = get_built("\\sum_{i=1}^n i")?;
        assert!(tree.children[0].children()[1].has_class("msupsub"));
        Ok(())
    });

    it("should build radicals", || {
        let tree = get_built("\\sqrt{x}")?;
        assert_eq!(tree.classes, ["mord", "sqrt"]);
        Ok(())
    });
}

#[test]
fn a_layout() {
    it("should be deterministic", || {
        for expr in ["x^2", "\\frac{1}{2}", "\\left( \\sum_{i}^{n} \\sqrt[3]{x} \\right)"] {
            expect!(expr).to_build_like(expr, &Settings::default())?;
        }
        Ok(())
    });

    it("should not depend on the previous layout", || {
        let first = get_built("\\Huge x")?;
        get_built("\\tiny y")?;
        let second = get_built("\\Huge x")?;
        assert_eq!(first, second);
        Ok(())
    });
}

#[test]
fn a_nesting_limit() {
    it("should build nesting below the limit", || {
        let braces = format!("{}x{}", "{".repeat(38), "}".repeat(38));
        expect!(&braces).to_build(&Settings::default())?;

        let fractions =
            (0..15).fold("x".to_owned(), |inner, _| format!("\\frac{{{inner}}}{{y}}"));
        expect!(&fractions).to_build(&Settings::default())?;
        Ok(())
    });

    it("should reject deeper nesting with an error", || {
        let deep = format!("{}x{}", "{".repeat(5000), "}".repeat(5000));
        let err = get_parsed(&deep).unwrap_err();
        assert!(matches!(
            *err.kind,
            ParseErrorKind::TooDeeplyNested { limit: 40 }
        ));
        expect!(&deep).not_to_build(&Settings::default())?;

        let radicals = format!("{}x{}", "\\sqrt{".repeat(5000), "}".repeat(5000));
        expect!(&radicals).not_to_build(&Settings::default())
    });

    it("should follow the configured limit", || {
        let settings = Settings::builder().max_nesting(2).build();
        expect!("{x}").to_build(&settings)?;
        expect!("{{x}}").not_to_build(&settings)
    });
}

static BUILTIN: BuiltinMetrics = BuiltinMetrics;

/// Builtin metrics with the digit two removed.
struct NoTwo;

impl MetricsProvider for NoTwo {
    fn character_metrics(&self, character: char, font: &str) -> Option<CharacterMetrics> {
        if character == '2' {
            return None;
        }
        BUILTIN.character_metrics(character, font)
    }

    fn global_metrics(&self, size_index: usize) -> &FontMetrics {
        BUILTIN.global_metrics(size_index)
    }
}

#[test]
fn a_metrics_provider() {
    let ctx = LayoutContext::with_metrics(NoTwo);

    assert!(render_to_tree(&ctx, "x^3", &Settings::default()).is_ok());

    let Err(LayoutError::Metrics(err)) = render_to_tree(&ctx, "x^2", &Settings::default()) else {
        panic!("expected a metrics error");
    };
    assert_eq!(err.character, '2');
    assert_eq!(err.font, "Main-Regular");
}
