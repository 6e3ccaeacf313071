//! Function definition utilities
//!
//! A function is a control sequence that takes arguments, such as `\frac`
//! or `\sqrt`. Each one registers a [`FunctionDefSpec`] with the
//! [`LayoutContext`](crate::LayoutContext): how many arguments it takes, of
//! which kind, where it is allowed, and a handler that turns the parsed
//! arguments into a parse node. Building the node into boxes is the job of
//! the builder, which dispatches on the node type.

use crate::parser::Parser;
use crate::parser::parse_node::ParseNode;
use crate::types::{
    ArgType, BreakToken, ErrorLocationProvider as _, ParseError, ParseErrorKind, SourceLocation,
    Token,
};

/// Context passed to function handlers while parsing.
pub struct FunctionContext<'a, 'b> {
    /// Function name, e.g. `\frac`
    pub func_name: String,
    /// Parser instance, for handlers that keep parsing (`\left`, `\tiny`)
    pub parser: &'a mut Parser<'b>,
    /// The token the function was invoked with
    pub token: Option<&'a Token>,
    /// Token that ends the enclosing expression
    pub break_on_token_text: Option<&'a BreakToken>,
}

impl FunctionContext<'_, '_> {
    /// Source location of the invoking token, if available.
    #[must_use]
    pub fn loc(&self) -> Option<SourceLocation> {
        self.token?.loc().cloned()
    }

    /// Error located at the invoking token when there is one.
    #[must_use]
    pub fn error<T: Into<ParseErrorKind>>(&self, kind: T) -> ParseError {
        match self.token {
            Some(token) => ParseError::with_token(kind, token),
            None => ParseError::new(kind),
        }
    }
}

/// Turns the parsed arguments of a function into a parse node.
pub type FunctionHandler = fn(
    context: FunctionContext,
    args: Vec<ParseNode>,
    opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError>;

/// Parsing properties of a function.
#[derive(Debug, Clone)]
pub struct FunctionPropSpec {
    /// Number of mandatory arguments
    pub num_args: usize,
    /// Kind of each argument, optional ones first; `None` means all
    /// [`ArgType::Original`]
    pub arg_types: Option<Vec<ArgType>>,
    /// Whether the function may itself be an argument without braces, as in
    /// `x^\frac12`
    pub allowed_in_argument: bool,
    /// Whether the function is allowed in text mode
    pub allowed_in_text: bool,
    /// Whether the function is allowed in math mode
    pub allowed_in_math: bool,
    /// Number of optional `[...]` arguments
    pub num_optional_args: usize,
    /// Whether the function is an infix operator such as `\over`
    pub infix: bool,
}

impl Default for FunctionPropSpec {
    fn default() -> Self {
        Self {
            num_args: 0,
            arg_types: None,
            allowed_in_argument: false,
            allowed_in_text: false,
            allowed_in_math: true,
            num_optional_args: 0,
            infix: false,
        }
    }
}

/// Definition of one or more functions sharing a handler.
pub struct FunctionDefSpec<'b> {
    /// Function names
    pub names: &'b [&'b str],
    /// Parsing properties
    pub props: FunctionPropSpec,
    /// Handler
    pub handler: FunctionHandler,
}

/// Registered function, as looked up by the parser.
#[derive(Debug, Clone)]
pub struct FunctionSpec {
    /// Number of mandatory arguments
    pub num_args: usize,
    /// Argument kinds
    pub arg_types: Option<Vec<ArgType>>,
    /// Allowed as a brace-less argument
    pub allowed_in_argument: bool,
    /// Allowed in text mode
    pub allowed_in_text: bool,
    /// Allowed in math mode
    pub allowed_in_math: bool,
    /// Number of optional arguments
    pub num_optional_args: usize,
    /// Infix operator
    pub infix: bool,
    /// Handler
    pub handler: FunctionHandler,
}

impl From<&FunctionDefSpec<'_>> for FunctionSpec {
    fn from(spec: &FunctionDefSpec<'_>) -> Self {
        Self {
            num_args: spec.props.num_args,
            arg_types: spec.props.arg_types.clone(),
            allowed_in_argument: spec.props.allowed_in_argument,
            allowed_in_text: spec.props.allowed_in_text,
            allowed_in_math: spec.props.allowed_in_math,
            num_optional_args: spec.props.num_optional_args,
            infix: spec.props.infix,
            handler: spec.handler,
        }
    }
}

/// Unwraps a single-element braced group.
#[must_use]
pub fn normalize_argument(arg: &ParseNode) -> &ParseNode {
    if let ParseNode::OrdGroup(ord) = arg
        && ord.body.len() == 1
    {
        return &ord.body[0];
    }
    arg
}

/// The contents of a braced group, or the argument itself.
#[must_use]
pub fn ord_argument(arg: ParseNode) -> Vec<ParseNode> {
    match arg {
        ParseNode::OrdGroup(ord) => ord.body,
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_node::{ParseNodeMathOrd, ParseNodeOrdGroup};
    use crate::types::Mode;

    fn group(body: Vec<ParseNode>) -> ParseNode {
        ParseNode::OrdGroup(ParseNodeOrdGroup {
            mode: Mode::Math,
            loc: None,
            body,
        })
    }

    fn x() -> ParseNode {
        ParseNode::MathOrd(ParseNodeMathOrd {
            mode: Mode::Math,
            loc: None,
            text: "x".to_owned(),
        })
    }

    #[test]
    fn test_normalize_argument() {
        let single = group(vec![x()]);
        assert_eq!(normalize_argument(&single), &x());
        let empty = group(vec![]);
        assert_eq!(normalize_argument(&empty), &empty);
    }

    #[test]
    fn test_ord_argument() {
        assert_eq!(ord_argument(group(vec![x(), x()])).len(), 2);
        assert_eq!(ord_argument(x()), vec![x()]);
    }
}
