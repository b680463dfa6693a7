use math_ast::{
    DelimiterModifier, EndToken, LatexErrKind, LatexError, Parser, ParserConfig, ScriptKind,
};

fn diagnostics(input: &str) -> Vec<LatexError> {
    Parser::new(input).parse_with_diagnostics().1
}

fn kinds(input: &str) -> Vec<LatexErrKind> {
    diagnostics(input).into_iter().map(|err| err.1).collect()
}

#[test]
fn well_formed_input_has_no_diagnostics() {
    let inputs = [
        r"\frac{1}{x}",
        r"\sqrt[3]{z}",
        r"\sum_{n=1}^{\infty} n^2",
        r"\begin{matrix} 1 & 2 \\ 3 & 4 \end{matrix}",
        r"\left( x \right)",
        r"\textcolor{blue}{hello}",
        r"\color{red}",
        r"\text{a {b} c}",
        r"\log_2 x",
    ];
    for input in inputs {
        assert_eq!(kinds(input), vec![], "{input}");
    }
}

#[test]
fn problems() {
    let problems = [
        (
            "curly_close_without_open",
            "}",
            LatexErrKind::UnmatchedClose(EndToken::GroupClose),
        ),
        (
            "end_without_begin",
            r"\end{matrix}",
            LatexErrKind::UnmatchedClose(EndToken::End),
        ),
        (
            "unsupported_command",
            r"\asdf",
            LatexErrKind::UnknownCommand("asdf".into()),
        ),
        (
            "unclosed_brace",
            "{x",
            LatexErrKind::UnclosedGroup(EndToken::GroupClose),
        ),
        (
            "unclosed_bracket",
            r"\sqrt[3",
            LatexErrKind::UnclosedGroup(EndToken::SquareBracketClose),
        ),
        (
            "incomplete_frac",
            r"\frac{1}",
            LatexErrKind::MissingArgument(r"\frac".into()),
        ),
        (
            "incomplete_sup",
            "x^",
            LatexErrKind::MissingArgument("^".into()),
        ),
        (
            "sup_closed",
            "{x_}",
            LatexErrKind::MissingArgument("_".into()),
        ),
        (
            "left_with_non_delimiter",
            r"\left x 1 \right)",
            LatexErrKind::ExpectedDelimiter(DelimiterModifier::Left),
        ),
        (
            "right_with_non_delimiter",
            r"\left( 1 \right x",
            LatexErrKind::ExpectedDelimiter(DelimiterModifier::Right),
        ),
        (
            "unclosed_left",
            r"\left( x",
            LatexErrKind::UnclosedGroup(EndToken::Right),
        ),
        (
            "begin_without_name",
            r"\begin x",
            LatexErrKind::ExpectedEnvironmentName,
        ),
        (
            "mismatched_begin_end",
            r"\begin{matrix} 1 \end{bmatrix}",
            LatexErrKind::MismatchedEnvironment {
                expected: "matrix".into(),
                got: "bmatrix".into(),
            },
        ),
        (
            "unclosed_env",
            r"\begin{aligned} x",
            LatexErrKind::UnclosedGroup(EndToken::End),
        ),
        (
            "double_sub_on_function",
            r"\ln_a_b x",
            LatexErrKind::DuplicateScript(ScriptKind::Sub),
        ),
        (
            "unclosed_text",
            r"\text{hello",
            LatexErrKind::UnclosedGroup(EndToken::GroupClose),
        ),
        (
            "textcolor_without_content",
            r"\textcolor{red}",
            LatexErrKind::MissingArgument(r"\textcolor".into()),
        ),
    ];

    for (name, problem, expected) in problems {
        let found = kinds(problem);
        assert_eq!(found.first(), Some(&expected), "{name}: {found:?}");
    }
}

#[test]
fn spans_point_into_the_input() {
    let input = r"a + \asdf";
    let errors = diagnostics(input);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, 4..9);
    assert_eq!(&input[errors[0].0.clone()], r"\asdf");
}

#[test]
fn depth_limit_is_reported_once() {
    let config = ParserConfig {
        max_depth: 4,
        ..Default::default()
    };
    let input = format!("{} {}", "{".repeat(8) + &"}".repeat(8), "{".repeat(8) + &"}".repeat(8));
    let (_, errors) = Parser::with_config(&input, &config).parse_with_diagnostics();
    let limits = errors
        .iter()
        .filter(|err| err.1 == LatexErrKind::HardLimitExceeded)
        .count();
    assert_eq!(limits, 1);
}

#[test]
fn reports() {
    let problems = [
        (r"\asdf", r#"Unknown command "\asdf"."#, "unknown command"),
        ("{x", r#"Expected token "}", but not found."#, "to close this group"),
        (
            r"\begin{matrix} 1 \end{bmatrix}",
            r#"Expected "\end{matrix}", but got "\end{bmatrix}"."#,
            r#"expected "\end{matrix}" here"#,
        ),
        (r"\sqrt", r#"Missing argument for "\sqrt"."#, "expected an argument here"),
    ];
    for (problem, message, label) in problems {
        let errors = diagnostics(problem);
        let error = &errors[0];
        assert_eq!(error.error_message(), message);

        let report = error.to_report("<input>", false);
        let mut buf = Vec::new();
        report
            .write(("<input>", ariadne::Source::from(problem)), &mut buf)
            .expect("failed to write report");
        let output = String::from_utf8(buf).expect("report should be valid UTF-8");
        assert!(output.contains(message), "{output}");
        assert!(output.contains(label), "{output}");
        assert!(output.contains("<input>"), "{output}");
    }
}
