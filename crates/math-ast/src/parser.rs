use std::mem;

use crate::ParserConfig;
use crate::ast::Node;
use crate::commands::get_command;
use crate::error::{LatexErrKind, LatexError, ScriptKind};
use crate::token::{EndToken, Span, TokSpan, Token};
use crate::tokenizer::Tokenizer;

/// A recursive descent parser with a single token of lookahead.
///
/// A parser is built for one input string and consumed by [`Parser::parse`] or
/// [`Parser::parse_with_diagnostics`].
pub struct Parser<'source> {
    tokenizer: Tokenizer<'source>,
    pub(crate) peek: TokSpan<'source>,
    depth: usize,
    max_depth: usize,
    open_braces: usize,
    any_order_limits: bool,
    diagnostics: Vec<LatexError>,
    limit_reported: bool,
}

/// The scripts attached to a function name or a big operator.
#[derive(Debug, Default)]
pub(crate) struct Scripts {
    pub(crate) lower: Option<Box<Node>>,
    pub(crate) upper: Option<Box<Node>>,
}

impl<'source> Parser<'source> {
    pub fn new(latex: &'source str) -> Self {
        Self::with_config(latex, &ParserConfig::default())
    }

    pub fn with_config(latex: &'source str, config: &ParserConfig) -> Self {
        let mut tokenizer = Tokenizer::new(latex);
        // Load the first token into `peek`.
        let peek = tokenizer.next_tokspan();
        Parser {
            tokenizer,
            peek,
            depth: 0,
            max_depth: config.max_depth,
            open_braces: 0,
            any_order_limits: config.any_order_limits,
            diagnostics: Vec::new(),
            limit_reported: false,
        }
    }

    /// Parse the whole input. The root is always a [`Node::Sequence`].
    ///
    /// Problems in the input are logged and otherwise ignored.
    #[inline]
    pub fn parse(self) -> Node {
        self.parse_with_diagnostics().0
    }

    /// Parse the whole input and return the problems that were recovered from, in the
    /// order they were found.
    pub fn parse_with_diagnostics(mut self) -> (Node, Vec<LatexError>) {
        log::trace!("parsing with a depth limit of {}", self.max_depth);
        let nodes = self.parse_sequence(None);
        log::trace!(
            "parsed {} top-level nodes with {} diagnostics",
            nodes.len(),
            self.diagnostics.len()
        );
        (Node::Sequence(nodes), self.diagnostics)
    }

    /// Return the current lookahead and load the next token.
    pub(crate) fn next_token(&mut self) -> TokSpan<'source> {
        let peek = self.tokenizer.next_tokspan();
        mem::replace(&mut self.peek, peek)
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while matches!(self.peek.token(), Token::Whitespace) {
            self.next_token();
        }
    }

    pub(crate) fn report(&mut self, span: Span, kind: LatexErrKind) {
        let err = LatexError(span.into(), kind);
        log::warn!("{err}");
        self.diagnostics.push(err);
    }

    /// Report a missing argument of `\command` and return the placeholder.
    pub(crate) fn missing_argument(&mut self, command: &str) -> Node {
        let span = self.peek.span();
        self.report(span, LatexErrKind::MissingArgument(format!("\\{command}").into()));
        Node::placeholder()
    }

    /// Consume `end` if it is the lookahead. Otherwise the problem is reported and the
    /// lookahead is left alone.
    pub(crate) fn expect_closer(&mut self, end: EndToken) -> bool {
        if end.matches(self.peek.token()) {
            self.next_token();
            true
        } else {
            let span = self.peek.span();
            self.report(span, LatexErrKind::UnclosedGroup(end));
            false
        }
    }

    /// Parse nodes until the end of input or until `until` is the lookahead.
    ///
    /// The terminating token is not consumed. A `[..]` group also stops at a `}` which
    /// closes an enclosing brace group.
    pub(crate) fn parse_sequence(&mut self, until: Option<EndToken>) -> Vec<Node> {
        let in_braces = until == Some(EndToken::GroupClose);
        let in_brackets = until == Some(EndToken::SquareBracketClose);
        if in_braces {
            self.open_braces += 1;
        }
        let mut nodes = Vec::new();
        loop {
            let token = self.peek.token();
            if matches!(token, Token::Eoi) || until.is_some_and(|end| end.matches(token)) {
                break;
            }
            if in_brackets && self.open_braces > 0 && matches!(token, Token::RightBrace) {
                break;
            }
            if let Some(node) = self.parse_node() {
                nodes.push(node);
            }
        }
        if in_braces {
            self.open_braces -= 1;
        }
        nodes
    }

    /// Parse a single node. Returns `None` for tokens which contribute nothing to the tree.
    ///
    /// Unless the lookahead is the end of input, at least one token is consumed.
    pub(crate) fn parse_node(&mut self) -> Option<Node> {
        if matches!(self.peek.token(), Token::Eoi) {
            return None;
        }
        if self.depth >= self.max_depth {
            return self.skip_too_deep();
        }
        self.depth += 1;
        let node = self.parse_node_inner();
        self.depth -= 1;
        node
    }

    fn parse_node_inner(&mut self) -> Option<Node> {
        let (token, span) = self.next_token().into_parts();
        match token {
            Token::Command("right") => {
                self.report(span, LatexErrKind::UnmatchedClose(EndToken::Right));
                Some(Node::symbol(r"\right"))
            }
            Token::Command("end") => {
                self.report(span, LatexErrKind::UnmatchedClose(EndToken::End));
                Some(Node::symbol(r"\end"))
            }
            Token::Command(name) => Some(match get_command(name) {
                Some(command) => self.parse_command(name, command, span),
                None => {
                    self.report(span, LatexErrKind::UnknownCommand(name.into()));
                    Node::Symbol(format!("\\{name}"))
                }
            }),
            Token::LeftBrace => Some(Node::Group(self.parse_group_body(EndToken::GroupClose))),
            Token::LeftBracket => Some(Node::Group(
                self.parse_group_body(EndToken::SquareBracketClose),
            )),
            Token::Text(value) => Some(self.parse_scripts_on(Node::symbol(value))),
            Token::Symbol(ch) => Some(Node::Symbol(ch.to_string())),
            Token::RightBrace | Token::RightBracket => {
                if let Some(end) = EndToken::for_closing(&token) {
                    self.report(span, LatexErrKind::UnmatchedClose(end));
                }
                None
            }
            Token::Whitespace | Token::Eoi => None,
        }
    }

    /// Consume the construct at the lookahead without descending into it.
    fn skip_too_deep(&mut self) -> Option<Node> {
        let (token, span) = self.next_token().into_parts();
        if !self.limit_reported {
            self.limit_reported = true;
            self.report(span, LatexErrKind::HardLimitExceeded);
        }
        match token {
            Token::Whitespace => None,
            Token::LeftBrace | Token::LeftBracket => {
                let mut nesting = 1usize;
                while nesting > 0 {
                    match self.next_token().into_token() {
                        Token::LeftBrace | Token::LeftBracket => nesting += 1,
                        Token::RightBrace | Token::RightBracket => nesting -= 1,
                        Token::Eoi => break,
                        _ => {}
                    }
                }
                Some(Node::placeholder())
            }
            _ => Some(Node::placeholder()),
        }
    }

    /// Parse the inside of a group whose opening token was already consumed, then the
    /// closing token.
    fn parse_group_body(&mut self, end: EndToken) -> Vec<Node> {
        let nodes = self.parse_sequence(Some(end));
        self.expect_closer(end);
        nodes
    }

    /// Parse the group opened by `open` if it is the next non-whitespace token.
    pub(crate) fn parse_delimited(
        &mut self,
        open: Token<'static>,
        end: EndToken,
    ) -> Option<Vec<Node>> {
        self.skip_whitespace();
        if *self.peek.token() != open {
            return None;
        }
        self.next_token();
        Some(self.parse_group_body(end))
    }

    /// Parse a `{..}` argument group, unwrapping it if it holds a single node.
    pub(crate) fn parse_required_group(&mut self) -> Option<Node> {
        self.parse_delimited(Token::LeftBrace, EndToken::GroupClose)
            .map(node_vec_to_node)
    }

    /// Parse the next node as the argument of a command.
    ///
    /// Returns `None` without consuming anything if the lookahead closes the enclosing
    /// construct.
    pub(crate) fn parse_argument(&mut self) -> Option<Node> {
        self.skip_whitespace();
        if self.peek.token().ends_argument() {
            return None;
        }
        self.parse_node()
    }

    /// The kind of script whose marker is the next non-whitespace token.
    pub(crate) fn peek_script(&mut self) -> Option<ScriptKind> {
        self.skip_whitespace();
        match self.peek.token() {
            Token::Symbol('_') => Some(ScriptKind::Sub),
            Token::Symbol('^') => Some(ScriptKind::Sup),
            _ => None,
        }
    }

    /// Consume a script marker and parse its argument.
    ///
    /// A text run right after the marker is taken as is, so scripts on a script chain onto
    /// the outer base: `x^2_3` is `(x^2)_3`.
    pub(crate) fn parse_script(&mut self, kind: ScriptKind) -> Option<Box<Node>> {
        let marker = self.next_token().span();
        self.skip_whitespace();
        let token = *self.peek.token();
        let script = if let Token::Text(value) = token {
            self.next_token();
            Some(Node::symbol(value))
        } else {
            self.parse_argument()
        };
        if script.is_none() {
            let name = match kind {
                ScriptKind::Sub => "_",
                ScriptKind::Sup => "^",
            };
            self.report(marker, LatexErrKind::MissingArgument(name.into()));
        }
        script.map(Box::new)
    }

    /// Greedily wrap `base` in the scripts that follow it, in the order they appear.
    fn parse_scripts_on(&mut self, mut base: Node) -> Node {
        while let Some(kind) = self.peek_script() {
            let Some(script) = self.parse_script(kind) else {
                continue;
            };
            base = match kind {
                ScriptKind::Sub => Node::Subscript {
                    base: Box::new(base),
                    sub: script,
                },
                ScriptKind::Sup => Node::Superscript {
                    base: Box::new(base),
                    exponent: script,
                },
            };
        }
        base
    }

    /// Parse the limits of a big operator.
    ///
    /// Unless limits in any order are enabled, only `_` followed by `^` is recognized.
    pub(crate) fn parse_limits(&mut self) -> Scripts {
        if self.any_order_limits {
            return self.parse_scripts();
        }
        let mut scripts = Scripts::default();
        if self.peek_script() == Some(ScriptKind::Sub) {
            scripts.lower = self.parse_script(ScriptKind::Sub);
        }
        if self.peek_script() == Some(ScriptKind::Sup) {
            scripts.upper = self.parse_script(ScriptKind::Sup);
        }
        scripts
    }

    /// Parse `_` and `^` scripts in any order. A repeated script is reported and dropped.
    pub(crate) fn parse_scripts(&mut self) -> Scripts {
        let mut scripts = Scripts::default();
        while let Some(kind) = self.peek_script() {
            let span = self.peek.span();
            let script = self.parse_script(kind);
            let slot = match kind {
                ScriptKind::Sub => &mut scripts.lower,
                ScriptKind::Sup => &mut scripts.upper,
            };
            if slot.is_some() {
                self.report(span, LatexErrKind::DuplicateScript(kind));
            } else {
                *slot = script;
            }
        }
        scripts
    }
}

/// Turn a list of nodes into a single node.
///
/// A single node is returned as is; anything else becomes a `Group`.
pub(crate) fn node_vec_to_node(mut nodes: Vec<Node>) -> Node {
    if nodes.len() == 1
        && let Some(node) = nodes.pop()
    {
        node
    } else {
        Node::Group(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(input: &str) -> (String, Vec<LatexErrKind>) {
        let (ast, diagnostics) = Parser::new(input).parse_with_diagnostics();
        (
            ast.to_string(),
            diagnostics.into_iter().map(|err| err.1).collect(),
        )
    }

    #[test]
    fn scripts_chain_in_order() {
        assert_eq!(parse_str("x^2_3").0, "[(_ (^ x 2) 3)]");
        assert_eq!(parse_str("x_{i}^{2}").0, "[(^ (_ x {i}) {2})]");
    }

    #[test]
    fn whitespace_around_scripts() {
        assert_eq!(parse_str("x ^ 2 + y").0, "[(^ x 2) + y]");
    }

    #[test]
    fn groups_and_brackets() {
        assert_eq!(parse_str("{a b}[c]").0, "[{a b} {c}]");
        assert_eq!(parse_str("{}").0, "[{}]");
    }

    #[test]
    fn stray_closer_is_dropped() {
        let (ast, diagnostics) = parse_str("a}b");
        assert_eq!(ast, "[a b]");
        assert_eq!(
            diagnostics,
            vec![LatexErrKind::UnmatchedClose(EndToken::GroupClose)]
        );
    }

    #[test]
    fn unclosed_group_keeps_content() {
        let (ast, diagnostics) = parse_str("{a");
        assert_eq!(ast, "[{a}]");
        assert_eq!(
            diagnostics,
            vec![LatexErrKind::UnclosedGroup(EndToken::GroupClose)]
        );
    }

    #[test]
    fn bracket_group_stops_at_enclosing_brace() {
        let (ast, diagnostics) = parse_str(r"\sqrt{[0,1)} + x");
        assert_eq!(ast, "[(sqrt {0 , 1 )}) + x]");
        assert_eq!(
            diagnostics,
            vec![LatexErrKind::UnclosedGroup(EndToken::SquareBracketClose)]
        );

        // Outside of braces a stray `}` is still dropped.
        let (ast, diagnostics) = parse_str("[a}b]");
        assert_eq!(ast, "[{a b}]");
        assert_eq!(
            diagnostics,
            vec![LatexErrKind::UnmatchedClose(EndToken::GroupClose)]
        );
    }

    #[test]
    fn missing_script() {
        let (ast, diagnostics) = parse_str("x^");
        assert_eq!(ast, "[x]");
        assert_eq!(diagnostics, vec![LatexErrKind::MissingArgument("^".into())]);
    }

    #[test]
    fn depth_limit() {
        let config = ParserConfig {
            max_depth: 3,
            ..Default::default()
        };
        let (ast, diagnostics) =
            Parser::with_config("{{{{x}}}} {{{{y}}}}", &config).parse_with_diagnostics();
        assert_eq!(ast.to_string(), "[{{{?}}} {{{?}}}]");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].1, LatexErrKind::HardLimitExceeded);
        assert_eq!(diagnostics[0].0, 3..4);
    }

    #[test]
    fn stray_right_and_end() {
        let (ast, diagnostics) = parse_str(r"a \right)");
        assert_eq!(ast, r"[a \right )]");
        assert_eq!(
            diagnostics,
            vec![LatexErrKind::UnmatchedClose(EndToken::Right)]
        );
    }

    #[test]
    fn node_vec_to_node_unwraps_single() {
        assert_eq!(node_vec_to_node(vec![Node::symbol("x")]), Node::symbol("x"));
        assert_eq!(node_vec_to_node(vec![]), Node::Group(vec![]));
    }
}
