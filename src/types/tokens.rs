use crate::types::{ErrorLocationProvider, SourceLocation};

/// A lexed token: its text and where it came from.
///
/// The end of input is represented by the text `"EOF"` with a zero-length
/// location at the end of the string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token text, e.g. `x`, `\frac`, `{`
    pub text: String,
    /// Location in the input, when known
    pub loc: Option<SourceLocation>,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub const fn new(text: String, loc: Option<SourceLocation>) -> Self {
        Self { text, loc }
    }

    /// Creates a token spanning from `self` to `end_token` with the given
    /// text.
    #[must_use]
    pub fn range(&self, end_token: &Self, text: String) -> Self {
        Self {
            text,
            loc: SourceLocation::range(self.loc.as_ref(), end_token.loc.as_ref()),
        }
    }

    /// Whether this token marks the end of input.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.text == "EOF"
    }
}

impl ErrorLocationProvider for Token {
    fn loc(&self) -> Option<&SourceLocation> {
        self.loc.as_ref()
    }
}
