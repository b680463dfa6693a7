#![no_main]

use libfuzzer_sys::fuzz_target;
use math_ast::{Node, Parser, ParserConfig};

fuzz_target!(|data: &str| {
    let (ast, _) = Parser::new(data).parse_with_diagnostics();
    assert!(matches!(ast, Node::Sequence(_)));

    // A second parse must build the same tree.
    assert_eq!(ast, math_ast::parse(data));

    let config = ParserConfig {
        max_depth: 8,
        any_order_limits: true,
    };
    let ast = Parser::with_config(data, &config).parse();
    assert!(matches!(ast, Node::Sequence(_)));
});
