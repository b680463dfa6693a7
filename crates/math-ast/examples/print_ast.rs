use math_ast::Parser;

fn main() {
    let inputs = vec![
        r"\frac{1}{x} + \sqrt[3]{z}",
        r"\sum_{n=1}^{\infty} \frac{1}{n^2} = \frac{\pi^2}{6}",
        r"\begin{pmatrix} 1 & 2 \\ 3 & 4 \end{pmatrix}",
        r"\left( \hat{x} \cdot \vec{v} \right) \leq \mathbf{M}",
        r"\textcolor{blue}{\text{hello world}}",
        // Recovered problems:
        r"\frac{1}",
        r"\left( x",
        r"\begin{matrix} 1 \end{bmatrix}",
        r"\zzzNotACommand",
    ];

    for input in inputs {
        let (ast, diagnostics) = Parser::new(input).parse_with_diagnostics();
        println!("{input}\n  {ast}");
        for diagnostic in diagnostics {
            let report = diagnostic.to_report("<input>", true);
            report
                .eprint(("<input>", ariadne::Source::from(input)))
                .expect("failed to print report");
        }
    }
}
