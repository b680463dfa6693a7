use crate::error::LatexErrKind;
use crate::parser::Parser;
use crate::token::{EndToken, Token};

impl Parser<'_> {
    /// Read a `{..}` group as raw text, without parsing commands.
    ///
    /// Whitespace becomes a single space each, nested braces are balanced and dropped,
    /// escaped braces `\{` and `\}` become literal braces, and commands are kept as
    /// `\name`. Returns `None` if the next non-whitespace token is not `{`.
    pub(crate) fn read_raw_group(&mut self) -> Option<String> {
        self.skip_whitespace();
        if !matches!(self.peek.token(), Token::LeftBrace) {
            return None;
        }
        self.next_token();
        let mut text = String::new();
        let mut nesting = 0usize;
        loop {
            let (token, span) = self.next_token().into_parts();
            match token {
                Token::LeftBrace => nesting += 1,
                Token::RightBrace => {
                    let Some(new_nesting) = nesting.checked_sub(1) else {
                        break;
                    };
                    nesting = new_nesting;
                }
                Token::Eoi => {
                    self.report(span, LatexErrKind::UnclosedGroup(EndToken::GroupClose));
                    break;
                }
                Token::Whitespace => text.push(' '),
                Token::Text(run) => text.push_str(run),
                Token::Symbol('\\') => match *self.peek.token() {
                    Token::LeftBrace => {
                        self.next_token();
                        text.push('{');
                    }
                    Token::RightBrace => {
                        self.next_token();
                        text.push('}');
                    }
                    _ => text.push('\\'),
                },
                Token::Symbol(ch) => text.push(ch),
                Token::Command(name) => {
                    text.push('\\');
                    text.push_str(name);
                }
                Token::LeftBracket => text.push('['),
                Token::RightBracket => text.push(']'),
            }
        }
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Node;
    use crate::parser::Parser;

    fn read(input: &str) -> Option<String> {
        Parser::new(input).read_raw_group()
    }

    #[test]
    fn keeps_whitespace_and_symbols() {
        assert_eq!(read("{a  b, c!}").as_deref(), Some("a  b, c!"));
        assert_eq!(read("  {x}").as_deref(), Some("x"));
    }

    #[test]
    fn nested_braces_and_commands() {
        assert_eq!(
            read(r"{if {x} \alpha [y]}").as_deref(),
            Some(r"if x \alpha [y]")
        );
    }

    #[test]
    fn escaped_braces_are_literal() {
        assert_eq!(read(r"{set \{a\}}").as_deref(), Some("set {a}"));
        assert_eq!(read(r"{\}}").as_deref(), Some("}"));

        let (ast, diagnostics) = Parser::new(r"\text{\{} + \frac{1}{2}").parse_with_diagnostics();
        assert_eq!(ast.to_string(), r#"[(text "{") + (frac 1 2)]"#);
        assert!(diagnostics.is_empty());

        let ast = Parser::new(r"\text{set \{a\}} + x").parse();
        assert_eq!(ast.to_string(), r#"[(text "set {a}") + x]"#);
    }

    #[test]
    fn missing_group() {
        assert_eq!(read("x"), None);
        assert_eq!(read(""), None);
    }

    #[test]
    fn unterminated_group() {
        let mut parser = Parser::new("{ab");
        assert_eq!(parser.read_raw_group().as_deref(), Some("ab"));
        let (ast, diagnostics) = parser.parse_with_diagnostics();
        assert_eq!(ast, Node::Sequence(vec![]));
        assert_eq!(diagnostics.len(), 1);
    }
}
