use std::mem;
use std::str::CharIndices;

use crate::character_class::Class;
use crate::token::{Span, TokSpan, Token};

/// Splits math markup into tokens, one per call, in a single forward pass.
///
/// Every input character ends up in some token; the tokenizer has no error channel.
/// Once the input is exhausted, [`Tokenizer::next_token`] returns [`Token::Eoi`] forever.
pub struct Tokenizer<'source> {
    input: CharIndices<'source>,
    peek: (usize, Option<char>),
    input_string: &'source str,
}

impl<'source> Tokenizer<'source> {
    pub fn new(input: &'source str) -> Self {
        let mut tokenizer = Tokenizer {
            input: input.char_indices(),
            peek: (0, None),
            input_string: input,
        };
        tokenizer.read_char(); // Initialize `peek`.
        tokenizer
    }

    /// Byte offset of the cursor.
    #[inline]
    pub fn offset(&self) -> usize {
        self.peek.0
    }

    /// Advance by one character, returning the character that was under the cursor.
    fn read_char(&mut self) -> (usize, Option<char>) {
        let input_length = self.input_string.len();
        mem::replace(
            &mut self.peek,
            self.input
                .next()
                .map(|(idx, ch)| (idx, Some(ch)))
                .unwrap_or((input_length, None)),
        )
    }

    /// Consume characters while `pred` holds and return the consumed slice.
    fn read_while(&mut self, pred: impl Fn(char) -> bool) -> &'source str {
        let start = self.peek.0;
        while self.peek.1.is_some_and(&pred) {
            self.read_char();
        }
        &self.input_string[start..self.peek.0]
    }

    pub fn next_token(&mut self) -> Token<'source> {
        self.next_tokspan().into_token()
    }

    pub fn next_tokspan(&mut self) -> TokSpan<'source> {
        let (loc, ch) = self.read_char();
        let Some(ch) = ch else {
            return TokSpan::new(Token::Eoi, Span::zero_width(loc));
        };
        let tok = match Class::of(ch) {
            Class::Whitespace => Token::Whitespace,
            Class::Escape => {
                let name = self.read_while(char::is_alphabetic);
                if name.is_empty() {
                    // The character after a bare backslash is left for the next call.
                    Token::Symbol('\\')
                } else {
                    Token::Command(name)
                }
            }
            Class::OpenBrace => Token::LeftBrace,
            Class::CloseBrace => Token::RightBrace,
            Class::OpenBracket => Token::LeftBracket,
            Class::CloseBracket => Token::RightBracket,
            Class::Operator | Class::Other => Token::Symbol(ch),
            Class::Alphanumeric => {
                self.read_while(char::is_alphanumeric);
                Token::Text(&self.input_string[loc..self.peek.0])
            }
        };
        TokSpan::new(tok, Span::new(loc, self.peek.0))
    }
}

impl<'source> Iterator for Tokenizer<'source> {
    type Item = Token<'source>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Token::Eoi => None,
            tok => Some(tok),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token<'_>> {
        Tokenizer::new(input).collect()
    }

    #[test]
    fn commands_and_text() {
        assert_eq!(
            tokenize(r"\frac{a1}{2}"),
            vec![
                Token::Command("frac"),
                Token::LeftBrace,
                Token::Text("a1"),
                Token::RightBrace,
                Token::LeftBrace,
                Token::Text("2"),
                Token::RightBrace,
            ]
        );
    }

    #[test]
    fn whitespace_is_not_coalesced() {
        assert_eq!(
            tokenize("x  +y"),
            vec![
                Token::Text("x"),
                Token::Whitespace,
                Token::Whitespace,
                Token::Symbol('+'),
                Token::Text("y"),
            ]
        );
    }

    #[test]
    fn bare_backslash() {
        // `\\` is two backslash symbols; the second one does not swallow the space.
        assert_eq!(
            tokenize(r"1 \\ 2"),
            vec![
                Token::Text("1"),
                Token::Whitespace,
                Token::Symbol('\\'),
                Token::Symbol('\\'),
                Token::Whitespace,
                Token::Text("2"),
            ]
        );
        assert_eq!(tokenize("\\"), vec![Token::Symbol('\\')]);
        assert_eq!(
            tokenize(r"\{"),
            vec![Token::Symbol('\\'), Token::LeftBrace]
        );
    }

    #[test]
    fn command_stops_at_digit() {
        assert_eq!(
            tokenize(r"\alpha2"),
            vec![Token::Command("alpha"), Token::Text("2")]
        );
    }

    #[test]
    fn brackets_and_other_characters() {
        assert_eq!(
            tokenize("[a]&😀"),
            vec![
                Token::LeftBracket,
                Token::Text("a"),
                Token::RightBracket,
                Token::Symbol('&'),
                Token::Symbol('😀'),
            ]
        );
    }

    #[test]
    fn unicode_text_run() {
        assert_eq!(tokenize("héllo世界"), vec![Token::Text("héllo世界")]);
    }

    #[test]
    fn eoi_is_sticky() {
        let mut tokenizer = Tokenizer::new("x");
        assert_eq!(tokenizer.next_token(), Token::Text("x"));
        for _ in 0..3 {
            assert_eq!(tokenizer.next_token(), Token::Eoi);
        }
        assert_eq!(Tokenizer::new("").next_token(), Token::Eoi);
    }

    #[test]
    fn spans_are_byte_offsets() {
        let mut tokenizer = Tokenizer::new(r"é\sqrt x");
        let (tok, span) = tokenizer.next_tokspan().into_parts();
        assert_eq!(tok, Token::Text("é"));
        assert_eq!((span.start(), span.end()), (0, 2));
        let (tok, span) = tokenizer.next_tokspan().into_parts();
        assert_eq!(tok, Token::Command("sqrt"));
        assert_eq!((span.start(), span.end()), (2, 7));
        let span = tokenizer.next_tokspan().span();
        assert_eq!((span.start(), span.end()), (7, 8));
        let (tok, span) = tokenizer.next_tokspan().into_parts();
        assert_eq!(tok, Token::Text("x"));
        assert_eq!((span.start(), span.end()), (8, 9));
        assert_eq!(tokenizer.next_tokspan().span(), Span::zero_width(9));
    }
}
