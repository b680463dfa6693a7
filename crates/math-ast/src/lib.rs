//! Parse a subset of LaTeX math into an abstract syntax tree.
//!
//! The tree is meant to be handed to a math renderer, which maps each [`Node`] variant to
//! its own visual primitives.
//!
//! # Usage
//!
//! ```rust
//! use math_ast::{Node, parse};
//!
//! let ast = parse(r"\frac{1}{x}");
//! assert_eq!(ast.to_string(), "[(frac 1 x)]");
//! assert!(matches!(ast, Node::Sequence(_)));
//! ```
//!
//! Parsing never fails. Malformed input produces a best-effort tree with placeholder
//! symbols (`?`) where arguments are missing, and each recovered problem is logged with
//! the [`log`] crate. To inspect the problems, use
//! [`Parser::parse_with_diagnostics`]:
//!
//! ```rust
//! use math_ast::{LatexErrKind, Parser};
//!
//! let (ast, diagnostics) = Parser::new(r"\frac{1}").parse_with_diagnostics();
//! assert_eq!(ast.to_string(), "[(frac 1 ?)]");
//! assert!(matches!(diagnostics[0].kind(), LatexErrKind::MissingArgument(_)));
//! ```
//!
//! # Features
//!
//! - `serde`: `Node` and `Token` implement `Serialize`, `ParserConfig` implements
//!   `Deserialize`.
//! - `ariadne`: `LatexError::to_report` renders a diagnostic against its source.
//!
mod ast;
mod character_class;
mod commands;
mod environments;
mod error;
mod parser;
mod text_parser;
mod token;
mod tokenizer;

#[cfg(feature = "serde")]
use serde::Deserialize;

pub use self::ast::{BigOp, Node};
pub use self::error::{DelimiterModifier, LatexErrKind, LatexError, ScriptKind};
pub use self::parser::Parser;
pub use self::token::{EndToken, Span, TokSpan, Token};
pub use self::tokenizer::Tokenizer;

/// Nesting depth at which the parser stops descending.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration for a [`Parser`].
///
/// # Example usage
///
/// ```rust
/// use math_ast::{Parser, ParserConfig};
///
/// let config = ParserConfig {
///     any_order_limits: true,
///     ..Default::default()
/// };
/// let ast = Parser::with_config(r"\sum^{n}_{k=0} k", &config).parse();
/// assert_eq!(ast.to_string(), "[(sum {k = 0} {n} k)]");
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct ParserConfig {
    /// Maximum nesting depth. Deeper constructs are replaced by a placeholder and reported
    /// as [`LatexErrKind::HardLimitExceeded`].
    pub max_depth: usize,
    /// If `true`, the limits of `\sum`, `\prod` and `\int` may be written in either order
    /// (`^` before `_`). By default only `_` followed by `^` is recognized, and an upper
    /// limit written first is left to the following content.
    pub any_order_limits: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            any_order_limits: false,
        }
    }
}

static_assertions::assert_impl_all!(ParserConfig: Send, Sync);

/// Parse `latex` with the default configuration.
///
/// The result is always a [`Node::Sequence`].
pub fn parse(latex: &str) -> Node {
    Parser::new(latex).parse()
}
