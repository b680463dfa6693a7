use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::Serialize;
use strum_macros::IntoStaticStr;

/// A lexical token of the math markup.
///
/// `Command` and `Text` borrow their payload from the input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Token<'source> {
    /// A backslash followed by a run of letters, e.g. `\frac`. The payload is the name
    /// without the backslash.
    Command(&'source str),
    /// A single character which is not part of a text run, e.g. `+`, `^` or `&`.
    Symbol(char),
    /// The character `{`.
    LeftBrace,
    /// The character `}`.
    RightBrace,
    /// The character `[`.
    LeftBracket,
    /// The character `]`.
    RightBracket,
    /// A single whitespace character. Whitespace is not coalesced.
    Whitespace,
    /// A maximal run of letters and digits, e.g. `x`, `12` or `abc1`.
    Text(&'source str),
    /// End of input.
    Eoi,
}

static_assertions::assert_eq_size!(Token<'_>, [usize; 3]);

impl Token<'_> {
    /// `true` for the tokens which end a construct rather than start an argument:
    /// `}`, `]`, `\right`, `\end` and the end of input.
    #[inline]
    pub(crate) fn ends_argument(&self) -> bool {
        matches!(
            self,
            Token::RightBrace
                | Token::RightBracket
                | Token::Command("right" | "end")
                | Token::Eoi
        )
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Command(name) => write!(f, "\\{name}"),
            Token::Symbol(c) => write!(f, "{c}"),
            Token::LeftBrace => f.write_str("{"),
            Token::RightBrace => f.write_str("}"),
            Token::LeftBracket => f.write_str("["),
            Token::RightBracket => f.write_str("]"),
            Token::Whitespace => f.write_str(" "),
            Token::Text(text) => f.write_str(text),
            Token::Eoi => f.write_str("end of input"),
        }
    }
}

/// Byte offsets of a token in the input string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    #[inline]
    pub const fn zero_width(at: usize) -> Self {
        Span { start: at, end: at }
    }

    #[inline]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// A span covering both `self` and `other`.
    #[inline]
    pub const fn to(self, other: Span) -> Self {
        Span {
            start: self.start,
            end: other.end,
        }
    }
}

impl From<Span> for Range<usize> {
    #[inline]
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// A token together with its span in the input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokSpan<'source>(Token<'source>, Span);

impl<'source> TokSpan<'source> {
    #[inline]
    pub const fn new(token: Token<'source>, span: Span) -> Self {
        TokSpan(token, span)
    }

    #[inline]
    pub fn token(&self) -> &Token<'source> {
        &self.0
    }

    #[inline]
    pub fn into_token(self) -> Token<'source> {
        self.0
    }

    #[inline]
    pub fn into_parts(self) -> (Token<'source>, Span) {
        (self.0, self.1)
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.1
    }
}

/// The token which was expected to close a construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum EndToken {
    #[strum(serialize = r"}")]
    GroupClose,
    #[strum(serialize = r"]")]
    SquareBracketClose,
    #[strum(serialize = r"\right")]
    Right,
    #[strum(serialize = r"\end{...}")]
    End,
}

impl EndToken {
    pub fn matches(&self, other: &Token) -> bool {
        matches!(
            (self, other),
            (EndToken::GroupClose, Token::RightBrace)
                | (EndToken::SquareBracketClose, Token::RightBracket)
                | (EndToken::Right, Token::Command("right"))
                | (EndToken::End, Token::Command("end"))
        )
    }

    pub(crate) fn for_closing(tok: &Token) -> Option<Self> {
        match tok {
            Token::RightBrace => Some(EndToken::GroupClose),
            Token::RightBracket => Some(EndToken::SquareBracketClose),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_token_matches_its_closer() {
        assert!(EndToken::GroupClose.matches(&Token::RightBrace));
        assert!(EndToken::Right.matches(&Token::Command("right")));
        assert!(EndToken::End.matches(&Token::Command("end")));
        assert!(!EndToken::SquareBracketClose.matches(&Token::RightBrace));
        assert!(!EndToken::Right.matches(&Token::Command("left")));
    }

    #[test]
    fn display_uses_source_form() {
        assert_eq!(Token::Command("frac").to_string(), r"\frac");
        assert_eq!(Token::Text("x2").to_string(), "x2");
        assert_eq!(<&str>::from(EndToken::End), r"\end{...}");
    }
}
