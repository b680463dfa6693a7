use std::fmt;
use std::ops::Range;

use strum_macros::IntoStaticStr;

use crate::token::EndToken;

/// A problem found while parsing, together with its byte range in the input.
///
/// The parser never fails; each problem is recovered from and recorded as one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatexError(pub Range<usize>, pub LatexErrKind);

static_assertions::assert_impl_all!(LatexError: Send, Sync, std::error::Error);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatexErrKind {
    /// A required closing token is missing.
    UnclosedGroup(EndToken),
    /// A closing token without a matching opening token.
    UnmatchedClose(EndToken),
    /// A command that is not in the command table. It is kept as a literal symbol.
    UnknownCommand(Box<str>),
    /// A command is missing a required argument; a placeholder is used in its place.
    MissingArgument(Box<str>),
    ExpectedDelimiter(DelimiterModifier),
    ExpectedEnvironmentName,
    MismatchedEnvironment {
        expected: Box<str>,
        got: Box<str>,
    },
    DuplicateScript(ScriptKind),
    HardLimitExceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum DelimiterModifier {
    #[strum(serialize = r"\left")]
    Left,
    #[strum(serialize = r"\right")]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum ScriptKind {
    #[strum(serialize = "subscript")]
    Sub,
    #[strum(serialize = "superscript")]
    Sup,
}

impl LatexErrKind {
    /// Returns the error message as a string.
    pub fn string(&self) -> String {
        match self {
            LatexErrKind::UnclosedGroup(expected) => {
                "Expected token \"".to_string() + <&str>::from(expected) + "\", but not found."
            }
            LatexErrKind::UnmatchedClose(got) => {
                "Unmatched closing token: \"".to_string() + <&str>::from(got) + "\"."
            }
            LatexErrKind::UnknownCommand(cmd) => "Unknown command \"\\".to_string() + cmd + "\".",
            LatexErrKind::MissingArgument(cmd) => {
                "Missing argument for \"".to_string() + cmd + "\"."
            }
            LatexErrKind::ExpectedDelimiter(location) => {
                "There must be a delimiter after \"".to_string()
                    + <&str>::from(*location)
                    + "\", but not found."
            }
            LatexErrKind::ExpectedEnvironmentName => {
                r"Expected an environment name in braces after \begin.".to_string()
            }
            LatexErrKind::MismatchedEnvironment { expected, got } => {
                "Expected \"\\end{".to_string() + expected + "}\", but got \"\\end{" + got + "}\"."
            }
            LatexErrKind::DuplicateScript(kind) => {
                "Duplicate ".to_string() + <&str>::from(*kind) + "."
            }
            LatexErrKind::HardLimitExceeded => {
                "Nesting limit exceeded. Please simplify your equation.".to_string()
            }
        }
    }
}

impl LatexError {
    pub fn error_message(&self) -> String {
        self.1.string()
    }

    #[inline]
    pub fn kind(&self) -> &LatexErrKind {
        &self.1
    }
}

#[cfg(feature = "ariadne")]
impl LatexError {
    /// Convert this error into an [`ariadne::Report`] for pretty-printing.
    pub fn to_report<'name>(
        &self,
        source_name: &'name str,
        with_color: bool,
    ) -> ariadne::Report<'static, (&'name str, Range<usize>)> {
        use ariadne::{Label, Report, ReportKind};

        let label_msg = match &self.1 {
            LatexErrKind::UnclosedGroup(expected) => {
                format!(
                    "expected \"{}\" to close this group",
                    <&str>::from(expected)
                )
            }
            LatexErrKind::UnmatchedClose(got) => {
                format!("unmatched \"{}\"", <&str>::from(got))
            }
            LatexErrKind::UnknownCommand(_) => "unknown command".into(),
            LatexErrKind::MissingArgument(_) => "expected an argument here".into(),
            LatexErrKind::ExpectedDelimiter(modifier) => {
                format!("expected a delimiter after \"{}\"", <&str>::from(*modifier))
            }
            LatexErrKind::ExpectedEnvironmentName => "expected `{name}`".into(),
            LatexErrKind::MismatchedEnvironment { expected, .. } => {
                format!("expected \"\\end{{{expected}}}\" here")
            }
            LatexErrKind::DuplicateScript(_) => "duplicate".into(),
            LatexErrKind::HardLimitExceeded => "limit exceeded".into(),
        };

        let mut config = ariadne::Config::default().with_index_type(ariadne::IndexType::Byte);
        if !with_color {
            config = config.with_color(false);
        }
        Report::build(ReportKind::Warning, (source_name, self.0.start..self.0.start))
            .with_config(config)
            .with_message(self.1.string())
            .with_label(Label::new((source_name, self.0.clone())).with_message(label_msg))
            .finish()
    }
}

impl fmt::Display for LatexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.0.start, self.1.string())
    }
}

impl std::error::Error for LatexError {}
