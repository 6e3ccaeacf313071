//! Recursive descent parser
//!
//! [`Parser`] turns markup into a sequence of [`ParseNode`]s. It reads the
//! lexer through a single lookahead token and never backtracks.
//!
//! # Parsing Strategy
//!
//! - [`Parser::parse_expression`] reads atoms until the end of the group
//! - an atom is a group, a function call or a symbol, followed by any
//!   number of `^`, `_`, `'`, `\limits` and `\nolimits` postfixes
//! - functions declare their arguments in the registry of the
//!   [`LayoutContext`]; the parser reads them and hands them to the
//!   function's handler
//! - infix commands (`\over`, `\choose`) are collected like atoms and
//!   rewritten once the whole group is known

use alloc::sync::Arc;
use core::iter;

use phf::phf_set;

use crate::context::LayoutContext;
use crate::define_function::{FunctionContext, FunctionSpec};
use crate::functions::op::symbol_op;
use crate::lexer::Lexer;
use crate::spacing_data::MeasurementOwned;
use crate::symbols::{Group, NonAtom};
use crate::types::{
    ArgType, BreakToken, ErrorLocationProvider, Mode, ParseError, ParseErrorKind, Settings,
    SourceLocation, Token,
};
use crate::units::valid_unit;

pub mod parse_node;
use parse_node::{
    ParseNode, ParseNodeAtom, ParseNodeMathOrd, ParseNodeOrdGroup, ParseNodeSize,
    ParseNodeSpacing, ParseNodeSupSub, ParseNodeTextOrd,
};

/// Parser state for one input string.
pub struct Parser<'a> {
    /// Current parsing mode
    pub mode: Mode,
    lexer: Lexer<'a>,
    /// Configuration of the run
    pub settings: &'a Settings,
    /// Registry of functions and symbols
    pub ctx: &'a LayoutContext,
    /// Cached lookahead token
    next_token: Option<Token>,
    /// Groups and function calls currently open
    depth: usize,
}

/// Tokens that always close the expression being parsed.
const END_OF_EXPRESSION: phf::Set<&'static str> = phf_set! {
    "}",
    "\\right",
    "&",
};

fn wrap_ordgroup(mut nodes: Vec<ParseNode>, mode: Mode) -> ParseNode {
    if nodes.len() == 1 && matches!(nodes[0], ParseNode::OrdGroup(_)) {
        return nodes.remove(0);
    }
    ParseNode::OrdGroup(ParseNodeOrdGroup {
        mode,
        loc: None,
        body: nodes,
    })
}

/// Whether `s` can still grow into a dimension such as `-1.5 em`.
fn is_size_prefix(s: &str) -> bool {
    let rest = s.trim_start();
    let rest = rest.strip_prefix(['+', '-']).unwrap_or(rest).trim_start();
    if rest.is_empty() {
        return true;
    }

    let bytes = rest.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    } else if i == 0 {
        return false;
    }

    let unit = rest[i..].trim_start();
    let letters = unit
        .bytes()
        .take(2)
        .take_while(u8::is_ascii_lowercase)
        .count();
    unit[letters..].trim().is_empty()
}

/// Splits `-1.5em` into its number and two-letter unit.
fn parse_size_with_unit(s: &str) -> Option<(f64, String)> {
    let s = s.trim();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    let rest = rest.trim_start();

    let number_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b'.')
        .count();
    let number = &rest[..number_len];
    if number.is_empty() || number == "." || number.matches('.').count() > 1 {
        return None;
    }

    let unit = rest[number_len..].trim();
    if unit.len() != 2 || !unit.bytes().all(|b| b.is_ascii_lowercase()) {
        return None;
    }

    let value: f64 = number.parse().ok()?;
    Some((sign * value, unit.to_owned()))
}

impl<'a> Parser<'a> {
    /// Creates a parser over `input`, starting in math mode.
    #[must_use]
    pub fn new(input: &str, settings: &'a Settings, ctx: &'a LayoutContext) -> Self {
        Self {
            mode: Mode::Math,
            lexer: Lexer::new(Arc::from(input), settings),
            settings,
            ctx,
            next_token: None,
            depth: 0,
        }
    }

    /// Fails unless the lookahead token is `text`; consumes it when
    /// `consume` is set.
    pub fn expect(&mut self, text: &str, consume: bool) -> Result<(), ParseError> {
        let token = self.fetch()?;
        if token.text != text {
            return Err(ParseError::with_token(
                ParseErrorKind::ExpectedToken {
                    expected: text.to_owned(),
                    found: token.text.clone(),
                },
                token,
            ));
        }
        if consume {
            self.consume();
        }
        Ok(())
    }

    /// Discards the lookahead token.
    pub fn consume(&mut self) {
        self.next_token = None;
    }

    /// The lookahead token, lexing a new one when none is cached.
    pub fn fetch(&mut self) -> Result<&Token, ParseError> {
        match &mut self.next_token {
            Some(token) => Ok(token),
            slot => {
                let token = self.lexer.lex()?;
                Ok(slot.get_or_insert(token))
            }
        }
    }

    /// Switches between math and text mode.
    pub const fn switch_mode(&mut self, new_mode: Mode) {
        self.mode = new_mode;
    }

    /// Parses the whole input.
    pub fn parse(&mut self) -> Result<Vec<ParseNode>, ParseError> {
        let body = self.parse_expression(false, None)?;
        self.expect("EOF", true)?;
        Ok(body)
    }

    /// Parses atoms until the end of the current group.
    ///
    /// With `break_on_infix`, stops in front of an infix command so that an
    /// enclosing expression can claim it (`\displaystyle a \over b`).
    pub fn parse_expression(
        &mut self,
        break_on_infix: bool,
        break_on_token_text: Option<&BreakToken>,
    ) -> Result<Vec<ParseNode>, ParseError> {
        let first = self.fetch()?.clone();
        self.nested(&first, |parser| {
            parser.parse_atoms(break_on_infix, break_on_token_text)
        })
    }

    /// Runs `parse` one nesting level deeper, failing at `first` once
    /// [`Settings::max_nesting`] levels are open.
    fn nested<T>(
        &mut self,
        first: &Token,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let limit = self.settings.max_nesting;
        if self.depth >= limit {
            return Err(ParseError::with_token(
                ParseErrorKind::TooDeeplyNested { limit },
                first,
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_atoms(
        &mut self,
        break_on_infix: bool,
        break_on_token_text: Option<&BreakToken>,
    ) -> Result<Vec<ParseNode>, ParseError> {
        let mut body = Vec::new();
        loop {
            if self.mode == Mode::Math {
                self.consume_spaces()?;
            }

            let text = self.fetch()?.text.clone();
            if END_OF_EXPRESSION.contains(text.as_str()) {
                break;
            }
            if break_on_token_text.is_some_and(|t| t.as_ref() == text) {
                break;
            }
            if break_on_infix && self.ctx.functions.get(&text).is_some_and(|f| f.infix) {
                break;
            }

            match self.parse_atom(break_on_token_text)? {
                Some(atom) => body.push(atom),
                None => break,
            }
        }

        self.handle_infix_nodes(body)
    }

    /// Skips space tokens.
    pub fn consume_spaces(&mut self) -> Result<(), ParseError> {
        while self.fetch()?.text == " " {
            self.consume();
        }
        Ok(())
    }

    /// Parses one base and its scripts.
    fn parse_atom(
        &mut self,
        break_on_token_text: Option<&BreakToken>,
    ) -> Result<Option<ParseNode>, ParseError> {
        let mut base = self.parse_group("atom", break_on_token_text)?;

        if self.mode == Mode::Text {
            return Ok(base);
        }

        let mut superscript: Option<ParseNode> = None;
        let mut subscript: Option<ParseNode> = None;

        loop {
            self.consume_spaces()?;
            let lex = self.fetch()?.clone();
            match lex.text.as_str() {
                "\\limits" | "\\nolimits" => {
                    let Some(ParseNode::Op(op)) = &mut base else {
                        return Err(ParseError::with_token(
                            ParseErrorKind::LimitsWithoutOperator,
                            &lex,
                        ));
                    };
                    op.limits = lex.text == "\\limits";
                    op.always_handle_sup_sub = true;
                    self.consume();
                }
                "^" => {
                    if superscript.is_some() {
                        return Err(ParseError::with_token(
                            ParseErrorKind::DoubleSuperscript,
                            &lex,
                        ));
                    }
                    superscript = Some(self.handle_sup_subscript("superscript")?);
                }
                "_" => {
                    if subscript.is_some() {
                        return Err(ParseError::with_token(ParseErrorKind::DoubleSubscript, &lex));
                    }
                    subscript = Some(self.handle_sup_subscript("subscript")?);
                }
                "'" => {
                    if superscript.is_some() {
                        return Err(ParseError::with_token(
                            ParseErrorKind::DoubleSuperscript,
                            &lex,
                        ));
                    }
                    let mut count = 1;
                    self.consume();
                    while self.fetch()?.text == "'" {
                        count += 1;
                        self.consume();
                    }
                    let prime = ParseNode::TextOrd(ParseNodeTextOrd {
                        mode: self.mode,
                        loc: None,
                        text: "\\prime".to_owned(),
                    });
                    let mut primes: Vec<ParseNode> = iter::repeat_n(prime, count).collect();
                    if self.fetch()?.text == "^" {
                        primes.push(self.handle_sup_subscript("superscript")?);
                    }
                    superscript = Some(ParseNode::OrdGroup(ParseNodeOrdGroup {
                        mode: self.mode,
                        loc: None,
                        body: primes,
                    }));
                }
                _ => break,
            }
        }

        if superscript.is_none() && subscript.is_none() {
            return Ok(base);
        }

        let loc = [base.as_ref(), superscript.as_ref(), subscript.as_ref()]
            .into_iter()
            .flatten()
            .filter_map(ParseNode::loc)
            .fold(None, |acc: Option<SourceLocation>, loc| match acc {
                None => Some(loc.clone()),
                Some(acc) => SourceLocation::range(Some(&acc), Some(loc)),
            });

        Ok(Some(ParseNode::SupSub(ParseNodeSupSub {
            mode: self.mode,
            loc,
            base: base.map(Box::new),
            sup: superscript.map(Box::new),
            sub: subscript.map(Box::new),
        })))
    }

    /// Rewrites `a \over b` into a call of the function the infix command
    /// stands for.
    fn handle_infix_nodes(&mut self, mut body: Vec<ParseNode>) -> Result<Vec<ParseNode>, ParseError> {
        let mut infix: Option<(usize, String)> = None;
        for (i, node) in body.iter().enumerate() {
            if let ParseNode::Infix(node) = node {
                if infix.is_some() {
                    return Err(match &node.token {
                        Some(token) => {
                            ParseError::with_token(ParseErrorKind::MultipleInfixOperators, token)
                        }
                        None => ParseError::new(ParseErrorKind::MultipleInfixOperators),
                    });
                }
                infix = Some((i, node.replace_with.clone()));
            }
        }

        let Some((index, func_name)) = infix else {
            return Ok(body);
        };

        let denom_body = body.split_off(index + 1);
        body.truncate(index);
        let numer = wrap_ordgroup(body, self.mode);
        let denom = wrap_ordgroup(denom_body, self.mode);

        let node = self.call_function(&func_name, vec![numer, denom], vec![], None, None)?;
        Ok(vec![node])
    }

    /// Collects raw token text up to the close of a `{...}` or `[...]`
    /// group, used for dimensions.
    fn parse_string_group(&mut self, optional: bool) -> Result<Option<Token>, ParseError> {
        let open = self.fetch()?.clone();
        let close = match open.text.as_str() {
            "[" if optional => "]",
            "{" if !optional => "}",
            _ => return Ok(None),
        };
        self.consume();

        let mut text = String::new();
        let mut depth = 0_usize;
        loop {
            let token = self.fetch()?.clone();
            if token.is_eof() {
                return Err(ParseError::with_token(
                    ParseErrorKind::ExpectedToken {
                        expected: close.to_owned(),
                        found: token.text.clone(),
                    },
                    &token,
                ));
            }
            self.consume();
            match token.text.as_str() {
                "{" => depth += 1,
                "}" if depth > 0 => depth -= 1,
                t if t == close && depth == 0 => return Ok(Some(open.range(&token, text))),
                _ => {}
            }
            text.push_str(&token.text);
        }
    }

    /// Reads as many tokens as still form a dimension prefix.
    fn parse_size_tokens(&mut self) -> Result<Token, ParseError> {
        let first = self.fetch()?.clone();
        let mut last = first.clone();
        let mut text = String::new();

        loop {
            let next = self.fetch()?;
            if next.is_eof() {
                break;
            }
            let candidate = format!("{text}{}", next.text);
            if !is_size_prefix(&candidate) {
                break;
            }
            last = next.clone();
            text = candidate;
            self.consume();
        }

        if text.is_empty() {
            return Err(ParseError::with_token(
                ParseErrorKind::InvalidSize { size: first.text.clone() },
                &first,
            ));
        }
        Ok(first.range(&last, text))
    }

    /// Parses a dimension such as `3pt`, `{-1mu}` or an optional `[2em]`.
    pub fn parse_size_group(&mut self, optional: bool) -> Result<Option<ParseNodeSize>, ParseError> {
        self.consume_spaces()?;
        let braced = self.fetch()?.text == "{";
        let token = if !optional && !braced {
            Some(self.parse_size_tokens()?)
        } else {
            self.parse_string_group(optional)?
        };
        let Some(mut token) = token else {
            return Ok(None);
        };

        let is_blank = !optional && token.text.trim().is_empty();
        if is_blank {
            "0pt".clone_into(&mut token.text);
        }

        let Some((number, unit)) = parse_size_with_unit(&token.text) else {
            return Err(ParseError::with_token(
                ParseErrorKind::InvalidSize { size: token.text.clone() },
                &token,
            ));
        };
        if !valid_unit(&unit) {
            return Err(ParseError::with_token(ParseErrorKind::InvalidUnit { unit }, &token));
        }

        Ok(Some(ParseNodeSize {
            mode: self.mode,
            loc: token.loc,
            value: MeasurementOwned { number, unit },
            is_blank,
        }))
    }

    /// Parses a braced or bracketed argument, or a single-token mandatory
    /// argument, optionally switching mode for its contents.
    fn parse_argument_group(
        &mut self,
        name: &str,
        optional: bool,
        mode: Option<Mode>,
    ) -> Result<Option<ParseNode>, ParseError> {
        self.consume_spaces()?;
        let first = self.fetch()?.clone();
        let outer_mode = self.mode;

        let close = match first.text.as_str() {
            "[" if optional => BreakToken::RightBracket,
            _ if optional => return Ok(None),
            "{" => BreakToken::RightBrace,
            _ => {
                // `\frac12`: the argument is the next token alone
                if let Some(m) = mode {
                    self.switch_mode(m);
                }
                let group = self.parse_group(name, None);
                self.switch_mode(outer_mode);
                let Some(node) = group? else {
                    return Err(ParseError::with_token(
                        ParseErrorKind::ExpectedGroupAs { context: name.to_owned() },
                        &first,
                    ));
                };
                return Ok(Some(ParseNode::OrdGroup(ParseNodeOrdGroup {
                    mode: self.mode,
                    loc: node.loc().cloned(),
                    body: vec![node],
                })));
            }
        };

        self.consume();
        if let Some(m) = mode {
            self.switch_mode(m);
        }
        let expression = self.parse_expression(false, Some(&close));
        let last = self.fetch().cloned();
        let closed = self.expect(close.as_ref(), true);
        self.switch_mode(outer_mode);
        let (expression, last) = (expression?, last?);
        closed?;

        Ok(Some(ParseNode::OrdGroup(ParseNodeOrdGroup {
            mode: self.mode,
            loc: SourceLocation::range(first.loc(), last.loc()),
            body: expression,
        })))
    }

    /// Parses an argument of the given kind.
    fn parse_group_of_type(
        &mut self,
        name: &str,
        arg_type: ArgType,
        optional: bool,
    ) -> Result<Option<ParseNode>, ParseError> {
        match arg_type {
            ArgType::Size => Ok(self.parse_size_group(optional)?.map(ParseNode::Size)),
            ArgType::Text => self.parse_argument_group(name, optional, Some(Mode::Text)),
            ArgType::Original => self.parse_argument_group(name, optional, None),
        }
    }

    /// Parses a braced group, a function call or a symbol.
    ///
    /// `name` describes the position for error messages; `"atom"` means the
    /// group is a base, where any function is allowed.
    fn parse_group(
        &mut self,
        name: &str,
        break_on_token_text: Option<&BreakToken>,
    ) -> Result<Option<ParseNode>, ParseError> {
        let first = self.fetch()?.clone();

        if first.text == "{" {
            self.consume();
            let expression = self.parse_expression(false, Some(&BreakToken::RightBrace))?;
            let last = self.fetch()?.clone();
            self.expect("}", true)?;
            return Ok(Some(ParseNode::OrdGroup(ParseNodeOrdGroup {
                mode: self.mode,
                loc: SourceLocation::range(first.loc(), last.loc()),
                body: expression,
            })));
        }

        let result = match self.parse_function(break_on_token_text, Some(name))? {
            Some(node) => Some(node),
            None => self.parse_symbol()?,
        };

        if result.is_none() && first.text.starts_with('\\') {
            return Err(ParseError::with_token(
                ParseErrorKind::UndefinedControlSequence { name: first.text.clone() },
                &first,
            ));
        }
        Ok(result)
    }

    /// Parses a function call if the lookahead token names one.
    pub fn parse_function(
        &mut self,
        break_on_token_text: Option<&BreakToken>,
        name: Option<&str>,
    ) -> Result<Option<ParseNode>, ParseError> {
        let token = self.fetch()?.clone();
        let ctx = self.ctx;
        let Some(func_data) = ctx.functions.get(&token.text) else {
            return Ok(None);
        };
        self.consume();

        if let Some(name) = name
            && name != "atom"
            && !func_data.allowed_in_argument
        {
            return Err(ParseError::with_token(
                ParseErrorKind::FunctionMissingArguments {
                    func: token.text.clone(),
                    context: name.to_owned(),
                },
                &token,
            ));
        } else if self.mode == Mode::Text && !func_data.allowed_in_text {
            return Err(ParseError::with_token(
                ParseErrorKind::FunctionDisallowedInMode {
                    func: token.text.clone(),
                    mode: Mode::Text,
                },
                &token,
            ));
        } else if self.mode == Mode::Math && !func_data.allowed_in_math {
            return Err(ParseError::with_token(
                ParseErrorKind::FunctionDisallowedInMode {
                    func: token.text.clone(),
                    mode: Mode::Math,
                },
                &token,
            ));
        }

        self.nested(&token, |parser| {
            let (args, opt_args) = parser.parse_arguments(&token.text, func_data)?;
            parser.call_function(&token.text, args, opt_args, Some(&token), break_on_token_text)
        })
        .map(Some)
    }

    /// Parses a symbol if the lookahead token is one.
    fn parse_symbol(&mut self) -> Result<Option<ParseNode>, ParseError> {
        let nucleus = self.fetch()?.clone();
        let text = nucleus.text.clone();
        let mode = self.mode;
        let loc = nucleus.loc.clone();

        let node = if let Some(info) = self.ctx.symbols.get(mode, &text) {
            match info.group {
                Group::Atom(family) => ParseNode::Atom(ParseNodeAtom {
                    family,
                    mode,
                    loc,
                    text,
                }),
                Group::NonAtom(NonAtom::MathOrd) => {
                    ParseNode::MathOrd(ParseNodeMathOrd { mode, loc, text })
                }
                Group::NonAtom(NonAtom::TextOrd) => {
                    ParseNode::TextOrd(ParseNodeTextOrd { mode, loc, text })
                }
                Group::NonAtom(NonAtom::Spacing) => {
                    ParseNode::Spacing(ParseNodeSpacing { mode, loc, text })
                }
                Group::NonAtom(NonAtom::OpToken) => symbol_op(mode, loc, &text),
            }
        } else if !nucleus.is_eof() && text.chars().any(|c| !c.is_ascii()) {
            let code = text.chars().next().map_or(0, u32::from);
            self.settings.report_nonstrict(
                "unknownSymbol",
                &format!("Unrecognized Unicode character \"{text}\" (0x{code:X})"),
                Some(&nucleus as &dyn ErrorLocationProvider),
            )?;
            ParseNode::TextOrd(ParseNodeTextOrd {
                mode: Mode::Text,
                loc,
                text,
            })
        } else {
            // EOF, `^`, `_`, `}` and other structural tokens
            return Ok(None);
        };

        self.consume();
        Ok(Some(node))
    }

    /// Parses the group after `^` or `_`.
    pub fn handle_sup_subscript(&mut self, name: &str) -> Result<ParseNode, ParseError> {
        let symbol_token = self.fetch()?.clone();
        self.consume();
        self.consume_spaces()?;

        self.parse_group(name, None)?.ok_or_else(|| {
            ParseError::with_token(
                ParseErrorKind::ExpectedGroupAfterSymbol {
                    symbol: symbol_token.text.clone(),
                },
                &symbol_token,
            )
        })
    }

    /// Runs the handler registered for `name`.
    pub fn call_function(
        &mut self,
        name: &str,
        args: Vec<ParseNode>,
        opt_args: Vec<Option<ParseNode>>,
        token: Option<&Token>,
        break_on_token_text: Option<&BreakToken>,
    ) -> Result<ParseNode, ParseError> {
        let Some(handler) = self.ctx.functions.get(name).map(|f| f.handler) else {
            return Err(ParseError::new(ParseErrorKind::UndefinedControlSequence {
                name: name.to_owned(),
            }));
        };
        let context = FunctionContext {
            func_name: name.to_owned(),
            parser: self,
            token,
            break_on_token_text,
        };
        handler(context, args, opt_args)
    }

    /// Parses the optional and mandatory arguments of a function.
    pub fn parse_arguments(
        &mut self,
        func: &str,
        func_data: &FunctionSpec,
    ) -> Result<(Vec<ParseNode>, Vec<Option<ParseNode>>), ParseError> {
        let total_args = func_data.num_args + func_data.num_optional_args;
        let mut args = Vec::with_capacity(func_data.num_args);
        let mut opt_args = Vec::with_capacity(func_data.num_optional_args);

        for i in 0..total_args {
            let arg_type = func_data
                .arg_types
                .as_ref()
                .and_then(|types| types.get(i))
                .copied()
                .unwrap_or(ArgType::Original);
            let is_optional = i < func_data.num_optional_args;

            let arg =
                self.parse_group_of_type(&format!("argument to '{func}'"), arg_type, is_optional)?;

            if is_optional {
                opt_args.push(arg);
            } else if let Some(arg) = arg {
                args.push(arg);
            } else {
                let token = self.fetch()?;
                return Err(ParseError::with_token(
                    ParseErrorKind::ExpectedGroupAs {
                        context: format!("argument to '{func}'"),
                    },
                    token,
                ));
            }
        }

        Ok((args, opt_args))
    }
}

/// Parses `input` into a sequence of nodes.
///
/// # Examples
///
/// ```rust
/// use katex_layout::{LayoutContext, Settings, parse};
///
/// let ctx = LayoutContext::default();
/// let nodes = parse("x^2", &Settings::default(), &ctx).unwrap();
/// assert_eq!(nodes.len(), 1);
/// ```
pub fn parse(
    input: &str,
    settings: &Settings,
    ctx: &LayoutContext,
) -> Result<Vec<ParseNode>, ParseError> {
    Parser::new(input, settings, ctx).parse()
}
