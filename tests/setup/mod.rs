#![allow(dead_code)]

use std::{
    panic::{UnwindSafe, catch_unwind},
    sync::OnceLock,
};

use katex_layout::{
    BoxSpan, LayoutContext, LayoutError, ParseError, RenderNode, Settings, parse,
    parser::parse_node::{AnyParseNode, ParseNode},
    render_to_tree,
    types::StrictMode,
};

static DEFAULT_CONTEXT: OnceLock<LayoutContext> = OnceLock::new();
pub fn default_ctx() -> &'static LayoutContext {
    let _ = env_logger::builder().is_test(true).try_init();
    DEFAULT_CONTEXT.get_or_init(LayoutContext::default)
}

pub struct TestExpr<'a> {
    pub expr: String,
    pub ctx: &'a LayoutContext,
    pub file: &'static str,
    pub line: u32,
}

/// Set all `loc` to None for easier comparison
pub fn strip_positions(nodes: &mut [ParseNode]) {
    for node in nodes.iter_mut() {
        strip_positions_single(node);
    }
}

fn strip_positions_single(node: &mut ParseNode) {
    match node {
        AnyParseNode::OrdGroup(group) => {
            group.loc = None;
            strip_positions(&mut group.body);
        }
        AnyParseNode::SupSub(supsub) => {
            supsub.loc = None;
            for part in [&mut supsub.base, &mut supsub.sup, &mut supsub.sub]
                .into_iter()
                .flatten()
            {
                strip_positions_single(part);
            }
        }
        AnyParseNode::Genfrac(frac) => {
            frac.loc = None;
            strip_positions_single(&mut frac.numer);
            strip_positions_single(&mut frac.denom);
        }
        AnyParseNode::Sqrt(sqrt) => {
            sqrt.loc = None;
            strip_positions_single(&mut sqrt.body);
            if let Some(index) = &mut sqrt.index {
                strip_positions_single(index);
            }
        }
        AnyParseNode::LeftRight(leftright) => {
            leftright.loc = None;
            strip_positions(&mut leftright.body);
        }
        AnyParseNode::Styling(styling) => {
            styling.loc = None;
            strip_positions(&mut styling.body);
        }
        AnyParseNode::Sizing(sizing) => {
            sizing.loc = None;
            strip_positions(&mut sizing.body);
        }
        AnyParseNode::Font(font) => {
            font.loc = None;
            strip_positions_single(&mut font.body);
        }
        AnyParseNode::Text(text) => {
            text.loc = None;
            strip_positions(&mut text.body);
        }
        AnyParseNode::LeftRightRight(node) => node.loc = None,
        AnyParseNode::Delimsizing(node) => node.loc = None,
        AnyParseNode::Atom(node) => node.loc = None,
        AnyParseNode::MathOrd(node) => node.loc = None,
        AnyParseNode::TextOrd(node) => node.loc = None,
        AnyParseNode::Op(node) => node.loc = None,
        AnyParseNode::Spacing(node) => node.loc = None,
        AnyParseNode::Kern(node) => node.loc = None,
        AnyParseNode::Size(node) => node.loc = None,
        AnyParseNode::Infix(node) => node.loc = None,
    }
}

impl TestExpr<'_> {
    fn at(&self) -> String {
        format!("{}:{} '{}'", self.file, self.line, self.expr)
    }

    pub fn to_parse(self, settings: &Settings) -> Result<(), LayoutError> {
        parse(&self.expr, settings, self.ctx)?;
        Ok(())
    }

    pub fn not_to_parse(self, settings: &Settings) -> Result<(), LayoutError> {
        let result = parse(&self.expr, settings, self.ctx);
        assert!(result.is_err(), "{} parsed, expected an error", self.at());
        Ok(())
    }

    pub fn to_parse_like(self, other: &str, settings: &Settings) -> Result<(), LayoutError> {
        let mut tree1 = parse(&self.expr, settings, self.ctx)?;
        let mut tree2 = parse(other, settings, self.ctx)?;

        strip_positions(&mut tree1);
        strip_positions(&mut tree2);

        assert_eq!(tree1, tree2, "{} does not parse like '{other}'", self.at());
        Ok(())
    }

    pub fn to_build(self, settings: &Settings) -> Result<BoxSpan, LayoutError> {
        render_to_tree(self.ctx, &self.expr, settings)
    }

    pub fn not_to_build(self, settings: &Settings) -> Result<(), LayoutError> {
        let result = render_to_tree(self.ctx, &self.expr, settings);
        assert!(result.is_err(), "{} built, expected an error", self.at());
        Ok(())
    }

    pub fn to_build_like(self, other: &str, settings: &Settings) -> Result<(), LayoutError> {
        let tree1 = render_to_tree(self.ctx, &self.expr, settings)?;
        let tree2 = render_to_tree(self.ctx, other, settings)?;
        assert_eq!(tree1, tree2, "{} does not build like '{other}'", self.at());
        Ok(())
    }
}

pub fn expect_impl(expr: &str, file: &'static str, line: u32) -> TestExpr<'static> {
    TestExpr {
        expr: expr.to_owned(),
        ctx: default_ctx(),
        file,
        line,
    }
}

#[macro_export]
macro_rules! expect {
    ($e:expr) => {
        $crate::setup::expect_impl($e, file!(), line!())
    };
}

/// Runs one case of a test, naming it in the failure message.
pub fn it<F>(desc: &str, test_fn: F)
where
    F: FnOnce() -> Result<(), LayoutError> + UnwindSafe,
{
    match catch_unwind(test_fn) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => panic!("Test '{desc}' failed with Result::Err: {e}"),
        Err(panic_payload) => {
            let msg = if let Some(s) = panic_payload.downcast_ref::<&str>() {
                (*s).to_owned()
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "<non-string panic payload>".to_owned()
            };
            panic!("Test '{desc}' panicked: {msg}");
        }
    }
}

/// Settings helpers
pub fn strict_settings() -> Settings {
    Settings::builder().strict(StrictMode::Error).build()
}

pub fn display_settings() -> Settings {
    Settings::builder().display_mode(true).build()
}

pub fn get_parsed(expr: &str) -> Result<Vec<ParseNode>, ParseError> {
    parse(expr, &strict_settings(), default_ctx())
}

pub fn get_built(expr: &str) -> Result<BoxSpan, LayoutError> {
    render_to_tree(default_ctx(), expr, &Settings::default())
}

/// Walks `path` of child indices down from `node`.
pub fn descend<'a>(node: &'a RenderNode, path: &[usize]) -> &'a RenderNode {
    path.iter().fold(node, |node, &index| {
        let span = node
            .as_span()
            .unwrap_or_else(|| panic!("expected a span above child {index}, got {node:?}"));
        &span.children[index]
    })
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
