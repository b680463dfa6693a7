use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// AST node
///
/// Every node owns its children. Optional parts (the limits of big operators, the scripts
/// of a function name) are `None` when absent, never a sentinel node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Node {
    /// An atomic literal: an identifier, a number, a single character, or the raw text of
    /// an unknown command like `\foo`.
    Symbol(String),
    /// A top-level or group-level concatenation.
    Sequence(Vec<Node>),
    /// A braced or bracketed sub-sequence.
    Group(Vec<Node>),
    /// `\frac{..}{..}`
    Fraction {
        numerator: Box<Node>,
        denominator: Box<Node>,
    },
    /// `\sqrt{..}`
    Sqrt(Box<Node>),
    /// `\sqrt[..]{..}`
    Root {
        degree: Box<Node>,
        radicand: Box<Node>,
    },
    /// `base^exponent`
    Superscript {
        base: Box<Node>,
        exponent: Box<Node>,
    },
    /// `base_sub`
    Subscript { base: Box<Node>, sub: Box<Node> },
    /// `\sum`
    Sum(BigOp),
    /// `\prod`
    Product(BigOp),
    /// `\int`
    Integral(BigOp),
    /// `\lim`
    Limit {
        lower: Option<Box<Node>>,
        body: Box<Node>,
    },
    /// `\text{..}`
    Text(String),
    /// A `matrix`-like environment. Each row is a list of cells.
    Matrix(Vec<Vec<Node>>),
    /// `\left X .. \right Y`
    Bracket {
        left: String,
        content: Box<Node>,
        right: String,
    },
    /// A named function like `\sin` or `\log`, with the scripts written on its name.
    Function {
        name: String,
        lower: Option<Box<Node>>,
        upper: Option<Box<Node>>,
        argument: Box<Node>,
    },
    /// `\hat{..}`, `\vec{..}`, ...
    Accent { accent: String, base: Box<Node> },
    /// `\mathbf{..}`, `\mathbb{..}`, ...
    Font { style: String, base: Box<Node> },
    /// A binary operator glyph, e.g. `±`.
    Operator { op: String, args: Vec<Node> },
    /// A generic command with several arguments, e.g. `\overset`.
    Macro { name: String, args: Vec<Node> },
    /// An environment without special support.
    Environment { name: String, content: Box<Node> },
    /// A relation glyph, e.g. `≤`.
    Relation(String),
    /// A Greek letter, by name.
    Greek(String),
    /// `\color{..}{..}`
    Color { color: String, content: Box<Node> },
    /// `\textcolor{..}{..}`
    TextColor { color: String, content: Box<Node> },
    /// `\colorbox{..}{..}`
    ColorBox { color: String, content: Box<Node> },
}

/// Limits and body of a big operator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BigOp {
    pub lower: Option<Box<Node>>,
    pub upper: Option<Box<Node>>,
    pub body: Box<Node>,
}

static_assertions::assert_impl_all!(Node: Send, Sync);

impl Node {
    /// The placeholder put in place of a missing argument.
    pub fn placeholder() -> Node {
        Node::Symbol("?".to_string())
    }

    #[inline]
    pub fn symbol(value: impl Into<String>) -> Node {
        Node::Symbol(value.into())
    }

    /// The children of a `Sequence` or `Group`.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(children) | Node::Group(children) => Some(children),
            _ => None,
        }
    }
}

/// Compact s-expression form, e.g. `[(frac 1 x) (^ y 2)]`.
///
/// Sequences print as `[..]`, groups as `{..}`, absent optional parts as `_`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Symbol(value) => f.write_str(value),
            Node::Sequence(children) => {
                f.write_str("[")?;
                write_list(f, children)?;
                f.write_str("]")
            }
            Node::Group(children) => {
                f.write_str("{")?;
                write_list(f, children)?;
                f.write_str("}")
            }
            Node::Fraction {
                numerator,
                denominator,
            } => write!(f, "(frac {numerator} {denominator})"),
            Node::Sqrt(radicand) => write!(f, "(sqrt {radicand})"),
            Node::Root { degree, radicand } => write!(f, "(root {degree} {radicand})"),
            Node::Superscript { base, exponent } => write!(f, "(^ {base} {exponent})"),
            Node::Subscript { base, sub } => write!(f, "(_ {base} {sub})"),
            Node::Sum(op) => write_big_op(f, "sum", op),
            Node::Product(op) => write_big_op(f, "prod", op),
            Node::Integral(op) => write_big_op(f, "int", op),
            Node::Limit { lower, body } => {
                write!(f, "(lim {} {body})", Optional(lower.as_deref()))
            }
            Node::Text(text) => write!(f, "(text {text:?})"),
            Node::Matrix(rows) => {
                f.write_str("(matrix")?;
                for row in rows {
                    f.write_str(" [")?;
                    write_list(f, row)?;
                    f.write_str("]")?;
                }
                f.write_str(")")
            }
            Node::Bracket {
                left,
                content,
                right,
            } => write!(f, "(left {left} {content} {right})"),
            Node::Function {
                name,
                lower,
                upper,
                argument,
            } => {
                if lower.is_none() && upper.is_none() {
                    write!(f, "({name} {argument})")
                } else {
                    write!(
                        f,
                        "({name} {} {} {argument})",
                        Optional(lower.as_deref()),
                        Optional(upper.as_deref())
                    )
                }
            }
            Node::Accent { accent, base } => write!(f, "({accent} {base})"),
            Node::Font { style, base } => write!(f, "({style} {base})"),
            Node::Operator { op, args } | Node::Macro { name: op, args } => {
                write!(f, "({op}")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                f.write_str(")")
            }
            Node::Environment { name, content } => write!(f, "(env {name} {content})"),
            Node::Relation(symbol) => write!(f, "(rel {symbol})"),
            Node::Greek(name) => write!(f, "(greek {name})"),
            Node::Color { color, content } => write!(f, "(color {color} {content})"),
            Node::TextColor { color, content } => write!(f, "(textcolor {color} {content})"),
            Node::ColorBox { color, content } => write!(f, "(colorbox {color} {content})"),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, nodes: &[Node]) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{node}")?;
    }
    Ok(())
}

fn write_big_op(f: &mut fmt::Formatter<'_>, name: &str, op: &BigOp) -> fmt::Result {
    write!(
        f,
        "({name} {} {} {})",
        Optional(op.lower.as_deref()),
        Optional(op.upper.as_deref()),
        op.body
    )
}

struct Optional<'a>(Option<&'a Node>);

impl fmt::Display for Optional<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(node) => write!(f, "{node}"),
            None => f.write_str("_"),
        }
    }
}
