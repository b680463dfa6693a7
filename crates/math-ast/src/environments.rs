use std::mem;

use crate::ast::Node;
use crate::error::LatexErrKind;
use crate::parser::{Parser, node_vec_to_node};
use crate::token::{EndToken, Span, Token};

/// Environments whose body is parsed as a grid of cells.
static MATRIX_ENVIRONMENTS: phf::Set<&'static str> = phf::phf_set! {
    "matrix",
    "pmatrix",
    "bmatrix",
    "Bmatrix",
    "vmatrix",
    "Vmatrix",
    "smallmatrix",
};

#[inline]
pub(crate) fn is_matrix_environment(name: &str) -> bool {
    MATRIX_ENVIRONMENTS.contains(name)
}

impl Parser<'_> {
    /// Parse `{name} .. \end{name}` after a `\begin` at `begin`.
    pub(crate) fn parse_environment(&mut self, begin: Span) -> Node {
        let Some(name) = self.read_environment_name() else {
            let span = self.peek.span();
            self.report(span, LatexErrKind::ExpectedEnvironmentName);
            return Node::symbol(r"\begin");
        };
        let node = if is_matrix_environment(&name) {
            Node::Matrix(self.parse_matrix_body())
        } else {
            let content = self.parse_sequence(Some(EndToken::End));
            Node::Environment {
                name: name.clone(),
                content: Box::new(Node::Sequence(content)),
            }
        };
        self.finish_environment(&name, begin);
        node
    }

    /// Read `{name}` where the name is a text run with an optional trailing `*`.
    fn read_environment_name(&mut self) -> Option<String> {
        self.skip_whitespace();
        if !matches!(self.peek.token(), Token::LeftBrace) {
            return None;
        }
        self.next_token();
        let Token::Text(text) = *self.peek.token() else {
            return None;
        };
        self.next_token();
        let mut name = text.to_string();
        if matches!(self.peek.token(), Token::Symbol('*')) {
            self.next_token();
            name.push('*');
        }
        if !matches!(self.peek.token(), Token::RightBrace) {
            return None;
        }
        self.next_token();
        Some(name)
    }

    /// Rows are separated by `\\` (or `\newline`), cells by `&`.
    fn parse_matrix_body(&mut self) -> Vec<Vec<Node>> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut cell = Vec::new();
        loop {
            match self.peek.token() {
                Token::Eoi | Token::RightBrace | Token::Command("end") => break,
                Token::Whitespace => {
                    self.next_token();
                }
                Token::Symbol('&') => {
                    self.next_token();
                    row.push(node_vec_to_node(mem::take(&mut cell)));
                }
                Token::Command("newline") => {
                    self.next_token();
                    row.push(node_vec_to_node(mem::take(&mut cell)));
                    rows.push(mem::take(&mut row));
                }
                Token::Symbol('\\') => {
                    self.next_token();
                    // A lone backslash is dropped.
                    if matches!(
                        self.peek.token(),
                        Token::Symbol('\\') | Token::Command("newline")
                    ) {
                        self.next_token();
                        row.push(node_vec_to_node(mem::take(&mut cell)));
                        rows.push(mem::take(&mut row));
                    }
                }
                _ => {
                    if let Some(node) = self.parse_node() {
                        cell.push(node);
                    }
                }
            }
        }
        if !row.is_empty() || !cell.is_empty() {
            row.push(node_vec_to_node(cell));
            rows.push(row);
        }
        rows
    }

    /// Consume `\end{name}`.
    fn finish_environment(&mut self, name: &str, begin: Span) {
        if !EndToken::End.matches(self.peek.token()) {
            let span = begin.to(self.peek.span());
            self.report(span, LatexErrKind::UnclosedGroup(EndToken::End));
            return;
        }
        self.next_token();
        let start = self.peek.span();
        match self.read_environment_name() {
            Some(got) if got == name => {}
            Some(got) => {
                let span = Span::new(start.start(), self.peek.span().start());
                self.report(
                    span,
                    LatexErrKind::MismatchedEnvironment {
                        expected: name.into(),
                        got: got.into(),
                    },
                );
            }
            None => {
                let span = self.peek.span();
                self.report(span, LatexErrKind::ExpectedEnvironmentName);
            }
        }
    }
}
