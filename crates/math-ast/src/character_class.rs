/// How the tokenizer treats a character at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Class {
    Whitespace,
    /// `\`
    Escape,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    /// One of the fixed operator and punctuation characters.
    Operator,
    /// A letter or digit; these form text runs.
    Alphanumeric,
    /// Anything else, e.g. emoji or unlisted punctuation.
    Other,
}

/// Operator and punctuation characters which always form a single-character symbol.
const OPERATORS: &str = "+-*/^_=()[]|<>.,;:!?'\"";

impl Class {
    #[inline]
    pub(crate) fn of(ch: char) -> Self {
        // Order matters: `[` and `]` appear in `OPERATORS` as well.
        match ch {
            c if c.is_whitespace() => Class::Whitespace,
            '\\' => Class::Escape,
            '{' => Class::OpenBrace,
            '}' => Class::CloseBrace,
            '[' => Class::OpenBracket,
            ']' => Class::CloseBracket,
            c if OPERATORS.contains(c) => Class::Operator,
            c if c.is_alphanumeric() => Class::Alphanumeric,
            _ => Class::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Class;

    #[test]
    fn brackets_are_structural() {
        assert_eq!(Class::of('['), Class::OpenBracket);
        assert_eq!(Class::of(']'), Class::CloseBracket);
        assert_eq!(Class::of('^'), Class::Operator);
        assert_eq!(Class::of('é'), Class::Alphanumeric);
        assert_eq!(Class::of('&'), Class::Other);
        assert_eq!(Class::of('\u{3000}'), Class::Whitespace);
    }
}
