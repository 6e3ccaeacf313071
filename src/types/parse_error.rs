//! Parse errors with an excerpt of the offending input.
//!
//! A [`ParseError`] remembers where in the source the problem occurred and
//! renders the surrounding text with the bad range underlined, so callers
//! can show it to users unchanged.

use alloc::boxed::Box;
use core::fmt;
#[cfg(feature = "backtrace")]
use std::backtrace::Backtrace;

use thiserror::Error;

use crate::parser::parse_node::NodeType;
use crate::symbols::Mode;
use crate::types::SourceLocation;

/// Error raised for malformed markup.
#[derive(Debug, Error)]
#[error("KaTeX parse error: {kind}{context}")]
pub struct ParseError {
    /// Categorised reason for the failure.
    #[source]
    pub kind: Box<ParseErrorKind>,
    /// Start byte offset of the offending token or node
    pub position: Option<usize>,
    /// Byte length of the offending range
    pub length: Option<usize>,
    context: ParseErrorContext,
    /// Backtrace of the error stack
    #[cfg(feature = "backtrace")]
    pub backtrace: Box<Backtrace>,
}

impl ParseError {
    /// Create a new ParseError with the given kind
    pub fn new<T: Into<ParseErrorKind>>(kind: T) -> Self {
        Self::from_kind(kind.into(), ParseErrorContext::None, None, None)
    }

    /// Create a new ParseError located at a token or node
    pub fn with_token<T: Into<ParseErrorKind>>(kind: T, token: &dyn ErrorLocationProvider) -> Self {
        let mut position = None;
        let mut length = None;
        let context = token.loc().filter(|loc| loc.start() <= loc.end()).map_or(
            ParseErrorContext::None,
            |loc| {
                position = Some(loc.start());
                length = Some(loc.end() - loc.start());
                ParseErrorContext::Location(loc.clone())
            },
        );

        Self::from_kind(kind.into(), context, position, length)
    }

    fn from_kind(
        kind: ParseErrorKind,
        context: ParseErrorContext,
        position: Option<usize>,
        length: Option<usize>,
    ) -> Self {
        Self {
            kind: Box::new(kind),
            position,
            length,
            context,
            #[cfg(feature = "backtrace")]
            backtrace: Box::new(Backtrace::force_capture()),
        }
    }
}

impl From<strum::ParseError> for ParseError {
    fn from(err: strum::ParseError) -> Self {
        Self::new(ParseErrorKind::EnumParse(err))
    }
}

/// Describes the specific reason for a [`ParseError`].
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("{0}")]
    Message(&'static str),
    #[error("Expected '{expected}', got '{found}'")]
    ExpectedToken { expected: String, found: String },
    #[error("Undefined control sequence: {name}")]
    UndefinedControlSequence { name: String },
    #[error("Unexpected character: '{character}'")]
    UnexpectedCharacter { character: String },
    #[error("Double superscript")]
    DoubleSuperscript,
    #[error("Double subscript")]
    DoubleSubscript,
    #[error("Got function '{func}' with no arguments as {context}")]
    FunctionMissingArguments { func: String, context: String },
    #[error("Can't use function '{func}' in {} mode", mode.as_ref())]
    FunctionDisallowedInMode { func: String, mode: Mode },
    #[error("Expected group after '{symbol}'")]
    ExpectedGroupAfterSymbol { symbol: String },
    #[error("Expected group as {context}")]
    ExpectedGroupAs { context: String },
    #[error("Invalid size: '{size}'")]
    InvalidSize { size: String },
    #[error("Invalid unit: '{unit}'")]
    InvalidUnit { unit: String },
    #[error("Invalid delimiter: '{delimiter}'")]
    InvalidDelimiter { delimiter: String },
    #[error("Invalid delimiter '{delimiter}' after '{function}'")]
    InvalidDelimiterAfter { delimiter: String, function: String },
    #[error("only one infix operator per group")]
    MultipleInfixOperators,
    #[error("Limit controls must follow a math operator")]
    LimitsWithoutOperator,
    #[error("Too deeply nested: more than {limit} levels of groups and function calls")]
    TooDeeplyNested { limit: usize },
    #[error("LaTeX-incompatible input and strict mode is set to 'error': {message} [{code}]")]
    StrictModeError { message: String, code: String },
    #[error("Got group of unknown type: '{group_type}'")]
    UnknownGroupType { group_type: NodeType },
    #[error("Enum parse error: {0}")]
    EnumParse(strum::ParseError),
}

impl From<&'static str> for ParseErrorKind {
    fn from(message: &'static str) -> Self {
        Self::Message(message)
    }
}

#[derive(Debug)]
enum ParseErrorContext {
    None,
    Location(SourceLocation),
}

impl fmt::Display for ParseErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self::Location(SourceLocation { input, start, end }) = self else {
            return Ok(());
        };
        if *start == input.len() {
            write!(f, " at end of input: ")?;
        } else {
            write!(f, " at position {}: ", start + 1)?;
        }

        let prefix_start = floor_char_boundary(input, start.saturating_sub(15));
        if prefix_start > 0 {
            write!(f, "\u{2026}")?;
        }
        write!(f, "{}", &input[prefix_start..*start])?;
        for c in input[*start..*end].chars() {
            write!(f, "{c}\u{0332}")?;
        }
        let suffix_end = ceil_char_boundary(input, (*end + 15).min(input.len()));
        write!(f, "{}", &input[*end..suffix_end])?;
        if suffix_end < input.len() {
            write!(f, "\u{2026}")?;
        }
        Ok(())
    }
}

const fn floor_char_boundary(input: &str, mut index: usize) -> usize {
    while index > 0 && !input.is_char_boundary(index) {
        index -= 1;
    }
    index
}

const fn ceil_char_boundary(input: &str, mut index: usize) -> usize {
    while index < input.len() && !input.is_char_boundary(index) {
        index += 1;
    }
    index
}

/// Anything that can point at a range of the input for error reporting.
pub trait ErrorLocationProvider {
    /// Get the source location if available
    fn loc(&self) -> Option<&SourceLocation>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Token;
    use alloc::sync::Arc;

    #[test]
    fn test_parse_error_without_location() {
        let error = ParseError::new("Invalid syntax");
        assert!(matches!(
            error.kind.as_ref(),
            ParseErrorKind::Message("Invalid syntax")
        ));
        assert_eq!(error.to_string(), "KaTeX parse error: Invalid syntax");
        assert_eq!(error.position, None);
        assert_eq!(error.length, None);
    }

    #[test]
    fn test_parse_error_underlines_token() {
        let input: Arc<str> = Arc::from("x^2^3");
        let token = Token::new("^".to_owned(), Some(SourceLocation::new(input, 3, 4)));

        let error = ParseError::with_token(ParseErrorKind::DoubleSuperscript, &token);
        assert_eq!(error.position, Some(3));
        assert_eq!(error.length, Some(1));
        assert_eq!(
            error.to_string(),
            "KaTeX parse error: Double superscript at position 4: x^2^\u{0332}3"
        );
    }

    #[test]
    fn test_parse_error_at_end_of_input() {
        let input: Arc<str> = Arc::from(r"\frac{1}");
        let eof = Token::new("EOF".to_owned(), Some(SourceLocation::new(input, 8, 8)));
        let error = ParseError::with_token("Unexpected end of input", &eof);
        assert!(error.to_string().contains(" at end of input: "));
    }

    #[test]
    fn test_parse_error_elides_long_context() {
        let input: Arc<str> = Arc::from("abcdefghijklmnopqrstuvwxyz0123456789");
        let token = Token::new("q".to_owned(), Some(SourceLocation::new(input, 16, 17)));
        let rendered = ParseError::with_token("bad", &token).to_string();
        assert!(rendered.contains("\u{2026}bcdefghijklmnop"));
        assert!(rendered.ends_with("rstuvwxyz012345\u{2026}"));
    }
}
