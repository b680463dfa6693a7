use strum_macros::{EnumIter, IntoStaticStr};

use crate::ast::{BigOp, Node};
use crate::error::{DelimiterModifier, LatexErrKind, ScriptKind};
use crate::parser::{Parser, node_vec_to_node};
use crate::token::{EndToken, Span, Token};

/// The parsing rule of a command family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    Accent,
    Font,
    Function,
    Frac,
    Sqrt,
    BigOp(BigOpKind),
    Lim,
    Begin,
    Text,
    Left,
    Color(ColorKind),
    TwoArgMacro,
    Relation(&'static str),
    Operator(&'static str),
    Symbol(&'static str),
    Greek,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, EnumIter)]
pub(crate) enum BigOpKind {
    #[strum(serialize = "sum")]
    Sum,
    #[strum(serialize = "prod")]
    Product,
    #[strum(serialize = "int")]
    Integral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, EnumIter)]
pub(crate) enum ColorKind {
    #[strum(serialize = "color")]
    Color,
    #[strum(serialize = "textcolor")]
    TextColor,
    #[strum(serialize = "colorbox")]
    ColorBox,
}

impl BigOpKind {
    fn node(self, op: BigOp) -> Node {
        match self {
            BigOpKind::Sum => Node::Sum(op),
            BigOpKind::Product => Node::Product(op),
            BigOpKind::Integral => Node::Integral(op),
        }
    }
}

impl ColorKind {
    fn node(self, color: String, content: Node) -> Node {
        let content = Box::new(content);
        match self {
            ColorKind::Color => Node::Color { color, content },
            ColorKind::TextColor => Node::TextColor { color, content },
            ColorKind::ColorBox => Node::ColorBox { color, content },
        }
    }
}

#[inline]
pub(crate) fn get_command(name: &str) -> Option<Command> {
    COMMANDS.get(name).copied()
}

static COMMANDS: phf::Map<&'static str, Command> = phf::phf_map! {
    // Accents
    "hat" => Command::Accent,
    "tilde" => Command::Accent,
    "bar" => Command::Accent,
    "vec" => Command::Accent,
    "dot" => Command::Accent,
    "ddot" => Command::Accent,
    "breve" => Command::Accent,
    "check" => Command::Accent,
    "acute" => Command::Accent,
    "grave" => Command::Accent,
    "widehat" => Command::Accent,
    "widetilde" => Command::Accent,
    "overline" => Command::Accent,
    // Fonts
    "mathbf" => Command::Font,
    "mathit" => Command::Font,
    "mathrm" => Command::Font,
    "mathbb" => Command::Font,
    "mathcal" => Command::Font,
    "mathsf" => Command::Font,
    "mathtt" => Command::Font,
    "mathfrak" => Command::Font,
    "boldsymbol" => Command::Font,
    // Functions
    "sin" => Command::Function,
    "cos" => Command::Function,
    "tan" => Command::Function,
    "cot" => Command::Function,
    "sec" => Command::Function,
    "csc" => Command::Function,
    "log" => Command::Function,
    "ln" => Command::Function,
    "exp" => Command::Function,
    "arcsin" => Command::Function,
    "arccos" => Command::Function,
    "arctan" => Command::Function,
    "sinh" => Command::Function,
    "cosh" => Command::Function,
    "tanh" => Command::Function,
    "max" => Command::Function,
    "min" => Command::Function,
    "det" => Command::Function,
    // Structures
    "frac" => Command::Frac,
    "sqrt" => Command::Sqrt,
    "sum" => Command::BigOp(BigOpKind::Sum),
    "prod" => Command::BigOp(BigOpKind::Product),
    "int" => Command::BigOp(BigOpKind::Integral),
    "lim" => Command::Lim,
    "begin" => Command::Begin,
    "text" => Command::Text,
    "left" => Command::Left,
    "color" => Command::Color(ColorKind::Color),
    "textcolor" => Command::Color(ColorKind::TextColor),
    "colorbox" => Command::Color(ColorKind::ColorBox),
    "overset" => Command::TwoArgMacro,
    "underset" => Command::TwoArgMacro,
    // Relations
    "leq" => Command::Relation("≤"),
    "le" => Command::Relation("≤"),
    "geq" => Command::Relation("≥"),
    "ge" => Command::Relation("≥"),
    "neq" => Command::Relation("≠"),
    "ne" => Command::Relation("≠"),
    "approx" => Command::Relation("≈"),
    "equiv" => Command::Relation("≡"),
    "sim" => Command::Relation("∼"),
    "in" => Command::Relation("∈"),
    "subset" => Command::Relation("⊂"),
    "to" => Command::Relation("→"),
    "rightarrow" => Command::Relation("→"),
    "leftarrow" => Command::Relation("←"),
    "Rightarrow" => Command::Relation("⇒"),
    "mapsto" => Command::Relation("↦"),
    // Operators
    "pm" => Command::Operator("±"),
    "mp" => Command::Operator("∓"),
    "cdot" => Command::Operator("⋅"),
    "times" => Command::Operator("×"),
    "div" => Command::Operator("÷"),
    "ast" => Command::Operator("∗"),
    // Symbols
    "infty" => Command::Symbol("∞"),
    "partial" => Command::Symbol("∂"),
    "nabla" => Command::Symbol("∇"),
    "ldots" => Command::Symbol("…"),
    "cdots" => Command::Symbol("⋯"),
    // Greek letters
    "alpha" => Command::Greek,
    "beta" => Command::Greek,
    "gamma" => Command::Greek,
    "delta" => Command::Greek,
    "epsilon" => Command::Greek,
    "zeta" => Command::Greek,
    "eta" => Command::Greek,
    "theta" => Command::Greek,
    "iota" => Command::Greek,
    "kappa" => Command::Greek,
    "lambda" => Command::Greek,
    "mu" => Command::Greek,
    "nu" => Command::Greek,
    "xi" => Command::Greek,
    "omicron" => Command::Greek,
    "pi" => Command::Greek,
    "rho" => Command::Greek,
    "sigma" => Command::Greek,
    "tau" => Command::Greek,
    "upsilon" => Command::Greek,
    "phi" => Command::Greek,
    "chi" => Command::Greek,
    "psi" => Command::Greek,
    "omega" => Command::Greek,
    "Gamma" => Command::Greek,
    "Delta" => Command::Greek,
    "Theta" => Command::Greek,
    "Lambda" => Command::Greek,
    "Xi" => Command::Greek,
    "Pi" => Command::Greek,
    "Sigma" => Command::Greek,
    "Upsilon" => Command::Greek,
    "Phi" => Command::Greek,
    "Psi" => Command::Greek,
    "Omega" => Command::Greek,
    "varepsilon" => Command::Greek,
    "vartheta" => Command::Greek,
    "varpi" => Command::Greek,
    "varrho" => Command::Greek,
    "varsigma" => Command::Greek,
    "varphi" => Command::Greek,
};

/// Delimiter commands accepted after `\left` and `\right`.
static DELIMITERS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "langle" => "⟨",
    "rangle" => "⟩",
    "lvert" => "|",
    "rvert" => "|",
    "lVert" => "‖",
    "rVert" => "‖",
    "lfloor" => "⌊",
    "rfloor" => "⌋",
    "lceil" => "⌈",
    "rceil" => "⌉",
};

impl Parser<'_> {
    /// Run the rule of `command`, whose token was just consumed.
    pub(crate) fn parse_command(&mut self, name: &str, command: Command, span: Span) -> Node {
        match command {
            Command::Accent => {
                let base = self.required_group_or_placeholder(name);
                Node::Accent {
                    accent: name.to_string(),
                    base: Box::new(base),
                }
            }
            Command::Font => {
                let base = self.required_group_or_placeholder(name);
                Node::Font {
                    style: name.to_string(),
                    base: Box::new(base),
                }
            }
            Command::Function => {
                let scripts = self.parse_scripts();
                let argument = self
                    .parse_argument()
                    .unwrap_or_else(|| self.missing_argument(name));
                Node::Function {
                    name: name.to_string(),
                    lower: scripts.lower,
                    upper: scripts.upper,
                    argument: Box::new(argument),
                }
            }
            Command::Frac => {
                let (numerator, denominator) = match self.parse_required_group() {
                    Some(numerator) => (numerator, self.required_group_or_placeholder(name)),
                    None => (self.missing_argument(name), Node::placeholder()),
                };
                Node::Fraction {
                    numerator: Box::new(numerator),
                    denominator: Box::new(denominator),
                }
            }
            Command::Sqrt => {
                let degree = self
                    .parse_delimited(Token::LeftBracket, EndToken::SquareBracketClose)
                    .map(node_vec_to_node);
                let radicand = Box::new(self.required_group_or_placeholder(name));
                match degree {
                    Some(degree) => Node::Root {
                        degree: Box::new(degree),
                        radicand,
                    },
                    None => Node::Sqrt(radicand),
                }
            }
            Command::BigOp(kind) => {
                let limits = self.parse_limits();
                let body = self
                    .parse_argument()
                    .unwrap_or_else(|| self.missing_argument(name));
                kind.node(BigOp {
                    lower: limits.lower,
                    upper: limits.upper,
                    body: Box::new(body),
                })
            }
            Command::Lim => {
                let lower = match self.peek_script() {
                    Some(kind @ ScriptKind::Sub) => self.parse_script(kind),
                    _ => None,
                };
                let body = self
                    .parse_argument()
                    .unwrap_or_else(|| self.missing_argument(name));
                Node::Limit {
                    lower,
                    body: Box::new(body),
                }
            }
            Command::Begin => self.parse_environment(span),
            Command::Text => {
                let text = self.read_raw_group().unwrap_or_else(|| {
                    self.missing_argument(name);
                    String::new()
                });
                Node::Text(text)
            }
            Command::Left => self.parse_bracket(),
            Command::Color(kind) => {
                let Some(color) = self.read_raw_group() else {
                    self.missing_argument(name);
                    return kind.node("?".to_string(), Node::Sequence(Vec::new()));
                };
                match self.parse_delimited(Token::LeftBrace, EndToken::GroupClose) {
                    Some(content) => kind.node(color, Node::Sequence(content)),
                    // `\color{red}` may stand alone; the others need content.
                    None if kind == ColorKind::Color => {
                        kind.node(color, Node::Sequence(Vec::new()))
                    }
                    None => {
                        self.missing_argument(name);
                        kind.node("?".to_string(), Node::Sequence(Vec::new()))
                    }
                }
            }
            Command::TwoArgMacro => {
                let first = self
                    .parse_argument()
                    .unwrap_or_else(|| self.missing_argument(name));
                let second = self
                    .parse_argument()
                    .unwrap_or_else(|| self.missing_argument(name));
                Node::Macro {
                    name: name.to_string(),
                    args: vec![first, second],
                }
            }
            Command::Relation(glyph) => Node::Relation(glyph.to_string()),
            Command::Operator(glyph) => Node::Operator {
                op: glyph.to_string(),
                args: Vec::new(),
            },
            Command::Symbol(glyph) => Node::symbol(glyph),
            Command::Greek => Node::Greek(name.to_string()),
        }
    }

    fn required_group_or_placeholder(&mut self, name: &str) -> Node {
        self.parse_required_group()
            .unwrap_or_else(|| self.missing_argument(name))
    }

    /// `\left X .. \right Y`
    fn parse_bracket(&mut self) -> Node {
        let Some(left) = self.parse_delimiter(DelimiterModifier::Left) else {
            return Node::symbol(r"\left?");
        };
        let content = self.parse_sequence(Some(EndToken::Right));
        if !self.expect_closer(EndToken::Right) {
            return Node::symbol(r"\left?");
        }
        let Some(right) = self.parse_delimiter(DelimiterModifier::Right) else {
            return Node::symbol(r"\left?");
        };
        Node::Bracket {
            left,
            content: Box::new(Node::Sequence(content)),
            right,
        }
    }

    fn parse_delimiter(&mut self, modifier: DelimiterModifier) -> Option<String> {
        self.skip_whitespace();
        let token = *self.peek.token();
        let delimiter = match token {
            Token::Symbol('\\') => {
                // An escaped delimiter: `\{`, `\}` or `\|`.
                self.next_token();
                let escaped = *self.peek.token();
                match escaped {
                    Token::LeftBrace => "{",
                    Token::RightBrace => "}",
                    Token::Symbol('|') => "‖",
                    _ => {
                        let span = self.peek.span();
                        self.report(span, LatexErrKind::ExpectedDelimiter(modifier));
                        return None;
                    }
                }
            }
            Token::Symbol(ch) => {
                self.next_token();
                return Some(ch.to_string());
            }
            Token::LeftBracket => "[",
            Token::RightBracket => "]",
            token => {
                let glyph = match token {
                    Token::Command(name) => DELIMITERS.get(name).copied(),
                    _ => None,
                };
                let Some(glyph) = glyph else {
                    let span = self.peek.span();
                    self.report(span, LatexErrKind::ExpectedDelimiter(modifier));
                    return None;
                };
                glyph
            }
        };
        self.next_token();
        Some(delimiter.to_string())
    }
}
