//! The lexer splits the input into tokens on demand.
//!
//! Tokens are whitespace runs, control words (`\frac`, with trailing spaces
//! dropped), control symbols (`\,`), control spaces (`\ `) and single
//! characters. `%` starts a comment that runs to the end of the line.

use alloc::sync::Arc;

use crate::types::{ParseError, ParseErrorKind, Settings, SourceLocation, Token};

const fn is_combining_mark(ch: char) -> bool {
    (ch as u32) >= 0x0300 && (ch as u32) <= 0x036F
}

fn match_space(s: &str) -> Option<usize> {
    let len: usize = s
        .chars()
        .take_while(|c| matches!(c, ' ' | '\r' | '\n' | '\t'))
        .map(char::len_utf8)
        .sum();
    (len > 0).then_some(len)
}

fn match_control_space(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('\\')?;
    let next = rest.chars().next()?;
    if !matches!(next, ' ' | '\r' | '\t' | '\n') {
        return None;
    }
    let trailing: usize = rest[next.len_utf8()..]
        .chars()
        .take_while(|c| matches!(c, ' ' | '\r' | '\t'))
        .map(char::len_utf8)
        .sum();
    Some(1 + next.len_utf8() + trailing)
}

/// A printable character, with any combining marks that follow it.
fn match_normal_char(s: &str) -> Option<usize> {
    let first = s.chars().next()?;
    let u = first as u32;
    let printable = (0x0021..=0x005B).contains(&u)
        || (0x005D..=0x2027).contains(&u)
        || (0x202A..=0xD7FF).contains(&u)
        || u >= 0xF900;
    if !printable {
        return None;
    }
    let marks: usize = s[first.len_utf8()..]
        .chars()
        .take_while(|&c| is_combining_mark(c))
        .map(char::len_utf8)
        .sum();
    Some(first.len_utf8() + marks)
}

fn match_control_word(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('\\')?;
    let len: usize = rest
        .chars()
        .take_while(|c| c.is_ascii_alphabetic() || *c == '@')
        .map(char::len_utf8)
        .sum();
    (len > 0).then_some(1 + len)
}

fn match_control_symbol(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('\\')?;
    rest.chars().next().map(|c| 1 + c.len_utf8())
}

/// Which rule matched, how many bytes it covers, and how many trailing bytes
/// are not part of the token text.
enum TokenMatch {
    Space(usize),
    ControlSpace(usize),
    Text { len: usize, skip: usize },
    Unknown(usize),
}

fn exec(slice: &str) -> TokenMatch {
    if let Some(len) = match_space(slice) {
        TokenMatch::Space(len)
    } else if let Some(len) = match_control_space(slice) {
        TokenMatch::ControlSpace(len)
    } else if let Some(len) = match_normal_char(slice) {
        TokenMatch::Text { len, skip: 0 }
    } else if let Some(len) = match_control_word(slice) {
        let skip = match_space(&slice[len..]).unwrap_or(0);
        TokenMatch::Text {
            len: len + skip,
            skip,
        }
    } else if let Some(len) = match_control_symbol(slice) {
        TokenMatch::Text { len, skip: 0 }
    } else {
        TokenMatch::Unknown(slice.chars().next().map_or(0, char::len_utf8))
    }
}

/// Tokenizer over one input string.
pub struct Lexer<'a> {
    input: Arc<str>,
    last_index: usize,
    settings: &'a Settings,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: Arc<str>, settings: &'a Settings) -> Self {
        Self {
            input,
            last_index: 0,
            settings,
        }
    }

    fn loc(&self, start: usize, end: usize) -> Option<SourceLocation> {
        Some(SourceLocation::new(Arc::clone(&self.input), start, end))
    }

    /// Returns the next token, or `EOF` at the end of input.
    pub fn lex(&mut self) -> Result<Token, ParseError> {
        loop {
            let start = self.last_index;
            if start >= self.input.len() {
                return Ok(Token::new("EOF".to_owned(), self.loc(start, start)));
            }

            let slice = &self.input[start..];
            let (text, len) = match exec(slice) {
                TokenMatch::Space(len) => (" ".to_owned(), len),
                TokenMatch::ControlSpace(len) => ("\\ ".to_owned(), len),
                TokenMatch::Text { len, skip } => (slice[..len - skip].to_owned(), len),
                TokenMatch::Unknown(len) => {
                    let token = Token::new(slice[..len].to_owned(), self.loc(start, start + len));
                    return Err(ParseError::with_token(
                        ParseErrorKind::UnexpectedCharacter {
                            character: token.text.clone(),
                        },
                        &token,
                    ));
                }
            };
            self.last_index = start + len;

            if text == "%" {
                if let Some(rel_pos) = slice.find('\n') {
                    self.last_index = start + rel_pos;
                } else {
                    self.last_index = self.input.len();
                    self.settings.report_nonstrict(
                        "commentAtEnd",
                        "% comment has no terminating newline; LaTeX would fail because of commenting the end of math mode (e.g. $)",
                        None,
                    )?;
                }
                continue;
            }

            return Ok(Token::new(text, self.loc(start, self.last_index)));
        }
    }

    /// Byte offset the next token starts at.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.last_index
    }

    /// The input being tokenized.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StrictMode;

    fn lex_all(input: &str, settings: &Settings) -> Result<Vec<String>, ParseError> {
        let mut lexer = Lexer::new(Arc::from(input), settings);
        let mut out = Vec::new();
        loop {
            let token = lexer.lex()?;
            if token.is_eof() {
                return Ok(out);
            }
            out.push(token.text);
        }
    }

    #[test]
    fn test_control_words_drop_trailing_space() {
        let settings = Settings::default();
        let tokens = lex_all("\\frac  {1}", &settings).unwrap();
        assert_eq!(tokens, vec!["\\frac", "{", "1", "}"]);
    }

    #[test]
    fn test_spaces_and_control_symbols() {
        let settings = Settings::default();
        let tokens = lex_all("a \\,b\\ c", &settings).unwrap();
        assert_eq!(tokens, vec!["a", " ", "\\,", "b", "\\ ", "c"]);
    }

    #[test]
    fn test_combining_marks_stay_attached() {
        let settings = Settings::default();
        let tokens = lex_all("e\u{301}x", &settings).unwrap();
        assert_eq!(tokens, vec!["e\u{301}", "x"]);
    }

    #[test]
    fn test_comments() {
        let settings = Settings::default();
        let tokens = lex_all("x%ignored\ny", &settings).unwrap();
        assert_eq!(tokens, vec!["x", " ", "y"]);

        let strict = Settings::builder().strict(StrictMode::Error).build();
        assert!(lex_all("x%no newline", &strict).is_err());
        assert_eq!(lex_all("x%no newline", &settings).unwrap(), vec!["x"]);
    }

    #[test]
    fn test_token_locations() {
        let settings = Settings::default();
        let mut lexer = Lexer::new(Arc::from("x^{22}"), &settings);
        let _ = lexer.lex().unwrap();
        let caret = lexer.lex().unwrap();
        let loc = caret.loc.unwrap();
        assert_eq!((loc.start(), loc.end()), (1, 2));
        assert_eq!(lexer.position(), 2);
    }

    #[test]
    fn test_unexpected_character() {
        let settings = Settings::default();
        let err = lex_all("a\u{7}", &settings).unwrap_err();
        assert!(matches!(
            err.kind.as_ref(),
            ParseErrorKind::UnexpectedCharacter { .. }
        ));
        assert_eq!(err.position, Some(1));
    }
}
