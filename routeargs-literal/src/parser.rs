/*!
Parser for argument lists written in route-definition syntax, such as
`20, "1m", "auth"` or, with [`parse_call`], `localRatelimit(20, "1m", "auth")`.
*/

use alloc::{string::String, vec::Vec};
use core::fmt::{self, Display};

use crate::Literal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// The input ended in the middle of a literal or list
    UnexpectedEnd,

    /// Found a character that can't appear here
    UnexpectedCharacter(char),

    /// A quoted string, raw string or regular expression wasn't closed
    UnterminatedString,

    /// A `"` string contained an escape sequence we don't recognize
    InvalidEscape(char),

    /// A number was malformed or didn't fit in its type
    InvalidNumber,

    /// A call expression didn't start with a name
    ExpectedName,

    /// There was something left over after a complete call expression
    TrailingInput,
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ParseErrorKind::UnexpectedEnd => f.write_str("unexpected end of input"),
            ParseErrorKind::UnexpectedCharacter(c) => write!(f, "unexpected character {c:?}"),
            ParseErrorKind::UnterminatedString => f.write_str("unterminated string"),
            ParseErrorKind::InvalidEscape(c) => write!(f, "invalid escape sequence \\{c}"),
            ParseErrorKind::InvalidNumber => f.write_str("invalid number"),
            ParseErrorKind::ExpectedName => f.write_str("expected a name"),
            ParseErrorKind::TrailingInput => f.write_str("unexpected trailing input"),
        }
    }
}

/// An error from parsing an argument list, with the byte offset in the input
/// where it was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    pub offset: usize,
    pub kind: ParseErrorKind,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.offset)
    }
}

impl core::error::Error for ParseError {}

/// A filter or predicate invocation, such as `status(404)`
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub arguments: Vec<Literal>,
}

/// Parse a comma separated list of literals. An empty (or all whitespace)
/// input is an empty list.
pub fn parse_arguments(input: &str) -> Result<Vec<Literal>, ParseError> {
    Parser::new(input).list(None)
}

/// Parse a single `name(arguments...)` call expression.
pub fn parse_call(input: &str) -> Result<Call, ParseError> {
    let mut parser = Parser::new(input);

    parser.skip_whitespace();
    let name = parser.word();
    if name.is_empty() {
        return Err(parser.error(ParseErrorKind::ExpectedName));
    }

    parser.skip_whitespace();
    parser.expect(b'(')?;
    let arguments = parser.list(Some(b')'))?;
    parser.expect(b')')?;

    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(Call {
            name: name.into(),
            arguments,
        }),
        Some(_) => Err(parser.error(ParseErrorKind::TrailingInput)),
    }
}

struct Parser<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> Parser<'a> {
    #[inline]
    fn new(input: &'a str) -> Self {
        Self { input, offset: 0 }
    }

    #[inline]
    fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.offset).copied()
    }

    #[inline]
    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            offset: self.offset,
            kind,
        }
    }

    /// The error for whatever is at the current position, which is either
    /// an unexpected character or the end of the input.
    fn unexpected(&self) -> ParseError {
        self.error(match self.rest().chars().next() {
            Some(c) => ParseErrorKind::UnexpectedCharacter(c),
            None => ParseErrorKind::UnexpectedEnd,
        })
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.offset += rest.len() - rest.trim_start().len();
    }

    fn expect(&mut self, byte: u8) -> Result<(), ParseError> {
        match self.peek() {
            Some(b) if b == byte => {
                self.offset += 1;
                Ok(())
            }
            _ => Err(self.unexpected()),
        }
    }

    /// Consume an identifier-like word: ascii alphanumerics and underscores
    fn word(&mut self) -> &'a str {
        let rest = self.rest();
        let len = rest
            .bytes()
            .take_while(|&b| b.is_ascii_alphanumeric() || b == b'_')
            .count();

        self.offset += len;
        &rest[..len]
    }

    /// Parse literals separated by commas, until `close` (which is not
    /// consumed) or, if `close` is `None`, until the end of the input.
    fn list(&mut self, close: Option<u8>) -> Result<Vec<Literal>, ParseError> {
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.peek() == close {
            return Ok(items);
        }

        loop {
            items.push(self.literal()?);
            self.skip_whitespace();

            match self.peek() {
                Some(b',') => {
                    self.offset += 1;
                    self.skip_whitespace();
                }
                next if next == close => return Ok(items),
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn literal(&mut self) -> Result<Literal, ParseError> {
        match self.peek() {
            None => Err(self.error(ParseErrorKind::UnexpectedEnd)),
            Some(b'"') => {
                self.offset += 1;
                self.quoted(b'"').map(Literal::String)
            }
            Some(b'/') => {
                self.offset += 1;
                self.quoted(b'/').map(Literal::String)
            }
            Some(b'`') => {
                self.offset += 1;
                self.raw().map(Literal::String)
            }
            Some(b'[') => {
                self.offset += 1;
                let items = self.list(Some(b']'))?;
                self.expect(b']')?;
                Ok(Literal::List(items))
            }
            Some(b'-' | b'+' | b'.' | b'0'..=b'9') => self.number(),
            Some(b) if b.is_ascii_alphabetic() => {
                let start = self.offset;
                match self.word() {
                    "true" => Ok(Literal::Bool(true)),
                    "false" => Ok(Literal::Bool(false)),
                    _ => {
                        self.offset = start;
                        Err(self.unexpected())
                    }
                }
            }
            Some(_) => Err(self.unexpected()),
        }
    }

    fn number(&mut self) -> Result<Literal, ParseError> {
        let start = self.offset;
        let bytes = self.input.as_bytes();
        let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

        let mut end = start;
        if matches!(bytes.get(end), Some(b'-' | b'+')) {
            end += 1;
        }

        let whole = digits(end);
        end += whole;

        let mut fraction = 0;
        let mut float = false;
        if bytes.get(end) == Some(&b'.') {
            float = true;
            fraction = digits(end + 1);
            end += 1 + fraction;
        }

        if whole == 0 && fraction == 0 {
            return Err(self.error(ParseErrorKind::InvalidNumber));
        }

        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            float = true;
            end += 1;
            if matches!(bytes.get(end), Some(b'-' | b'+')) {
                end += 1;
            }

            match digits(end) {
                0 => {
                    self.offset = end;
                    return Err(self.error(ParseErrorKind::InvalidNumber));
                }
                exponent => end += exponent,
            }
        }

        let text = &self.input[start..end];
        let literal = match float {
            true => text.parse().map(Literal::Float).ok(),
            false => text.parse().map(Literal::Int).ok(),
        };

        match literal {
            Some(literal) => {
                self.offset = end;
                Ok(literal)
            }
            None => Err(self.error(ParseErrorKind::InvalidNumber)),
        }
    }

    /// Parse the body of a `"` string or `/` regular expression; the opening
    /// delimiter has already been consumed. Regular expressions only unescape
    /// `\/`, preserving every other escape for the regex engine.
    fn quoted(&mut self, delimiter: u8) -> Result<String, ParseError> {
        let start = self.offset - 1;
        let mut value = String::new();

        loop {
            let rest = self.rest();
            let Some(i) = memchr::memchr2(delimiter, b'\\', rest.as_bytes()) else {
                self.offset = start;
                return Err(self.error(ParseErrorKind::UnterminatedString));
            };

            value.push_str(&rest[..i]);
            self.offset += i + 1;

            if rest.as_bytes()[i] == delimiter {
                return Ok(value);
            }

            let Some(escaped) = self.rest().chars().next() else {
                self.offset = start;
                return Err(self.error(ParseErrorKind::UnterminatedString));
            };

            match (delimiter, escaped) {
                (b'/', '/') => value.push('/'),
                (b'/', other) => {
                    value.push('\\');
                    value.push(other);
                }
                (_, '"') => value.push('"'),
                (_, '\\') => value.push('\\'),
                (_, 'n') => value.push('\n'),
                (_, 't') => value.push('\t'),
                (_, 'r') => value.push('\r'),
                (_, other) => {
                    self.offset -= 1;
                    return Err(self.error(ParseErrorKind::InvalidEscape(other)));
                }
            }

            self.offset += escaped.len_utf8();
        }
    }

    /// Parse the body of a `` ` `` raw string, which has no escapes.
    fn raw(&mut self) -> Result<String, ParseError> {
        let rest = self.rest();
        match memchr::memchr(b'`', rest.as_bytes()) {
            Some(i) => {
                self.offset += i + 1;
                Ok(rest[..i].into())
            }
            None => {
                self.offset -= 1;
                Err(self.error(ParseErrorKind::UnterminatedString))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literals;

    #[test]
    fn empty_list() {
        assert_eq!(parse_arguments(""), Ok(Vec::new()));
        assert_eq!(parse_arguments("   "), Ok(Vec::new()));
    }

    #[test]
    fn scalars() {
        assert_eq!(
            parse_arguments(r#"42, 3.0, "foo", -7, .5, 1e3, true"#),
            Ok(literals![42, 3.0, "foo", -7, 0.5, 1000.0, true]),
        );
    }

    #[test]
    fn strings() {
        assert_eq!(
            parse_arguments(r#""a \"quoted\" \\ value\n", `raw \n`, /^\/api\/\d+$/"#),
            Ok(literals!["a \"quoted\" \\ value\n", "raw \\n", r"^/api/\d+$"]),
        );
    }

    #[test]
    fn nested_lists() {
        assert_eq!(
            parse_arguments(r#"1, [2, ["three"]], []"#),
            Ok(literals![1, literals![2, literals!["three"]], literals![]]),
        );
    }

    #[test]
    fn call() {
        assert_eq!(
            parse_call(r#" localRatelimit( 20, "1m", "auth" ) "#),
            Ok(Call {
                name: "localRatelimit".into(),
                arguments: literals![20, "1m", "auth"],
            }),
        );

        assert_eq!(
            parse_call("disableBreaker()"),
            Ok(Call {
                name: "disableBreaker".into(),
                arguments: Vec::new(),
            }),
        );
    }

    #[test]
    fn errors() {
        let kind = |input| parse_arguments(input).unwrap_err().kind;

        assert_eq!(kind(r#""open"#), ParseErrorKind::UnterminatedString);
        assert_eq!(kind(r#""\q""#), ParseErrorKind::InvalidEscape('q'));
        assert_eq!(kind("1,"), ParseErrorKind::UnexpectedEnd);
        assert_eq!(kind("1 2"), ParseErrorKind::UnexpectedCharacter('2'));
        assert_eq!(kind("nope"), ParseErrorKind::UnexpectedCharacter('n'));
        assert_eq!(kind("99999999999999999999"), ParseErrorKind::InvalidNumber);
        assert_eq!(kind("1e"), ParseErrorKind::InvalidNumber);
        assert_eq!(kind("[1, 2"), ParseErrorKind::UnexpectedEnd);
    }

    #[test]
    fn call_errors() {
        let error = |input| parse_call(input).unwrap_err();

        assert_eq!(
            error("(1)"),
            ParseError {
                offset: 0,
                kind: ParseErrorKind::ExpectedName
            }
        );
        assert_eq!(
            error("status 404"),
            ParseError {
                offset: 7,
                kind: ParseErrorKind::UnexpectedCharacter('4')
            }
        );
        assert_eq!(
            error("status(404) extra").kind,
            ParseErrorKind::TrailingInput
        );
    }
}
