// Integration tests for the TINY parser

use tiny_parser::backends::EmitterType;
use tiny_parser::{parse, parse_with, tokenize, Category, ParseError, ParseOptions, SyntaxNode};

/// label(child,child) for an expression or statement subtree
fn sexpr(node: &SyntaxNode) -> String {
    if node.children().is_empty() {
        return node.label();
    }
    let children: Vec<String> = node.children().iter().map(sexpr).collect();
    format!("{}({})", node.label(), children.join(","))
}

/// Same labels, categories, child counts and chain lengths, ignoring spans
fn isomorphic(a: &SyntaxNode, b: &SyntaxNode) -> bool {
    if a.chain_len() != b.chain_len() {
        return false;
    }
    a.chain().zip(b.chain()).all(|(x, y)| {
        x.label() == y.label()
            && x.category() == y.category()
            && x.children().len() == y.children().len()
            && x.children()
                .iter()
                .zip(y.children())
                .all(|(cx, cy)| isomorphic(cx, cy))
    })
}

#[test]
fn test_read_then_if_without_else() {
    let root = parse("read x; if x<10 then write x end").expect("Parsing failed");

    assert_eq!(root.label(), "read(x)");
    assert_eq!(root.category(), Category::Statement);
    assert!(root.children().is_empty());

    let if_node = root.next().expect("missing if statement");
    assert_eq!(if_node.label(), "if");
    assert_eq!(if_node.children().len(), 2);
    assert_eq!(sexpr(&if_node.children()[0]), "op(<)(id(x),const(10))");
    assert_eq!(sexpr(&if_node.children()[1]), "write(id(x))");
    assert!(if_node.next().is_none());
}

#[test]
fn test_assignment_precedence() {
    let root = parse("x:=1+2*3").expect("Parsing failed");
    assert_eq!(root.label(), "assign(x)");
    assert_eq!(root.children().len(), 1);
    assert_eq!(
        sexpr(&root.children()[0]),
        "op(+)(const(1),op(*)(const(2),const(3)))"
    );
}

#[test]
fn test_repeat_until() {
    let root = parse("repeat x:=x-1 until x=0").expect("Parsing failed");
    assert_eq!(root.label(), "repeat");
    assert_eq!(sexpr(&root.children()[0]), "assign(x)(op(-)(id(x),const(1)))");
    assert_eq!(sexpr(&root.children()[1]), "op(=)(id(x),const(0))");
    assert_eq!(root.children()[0].category(), Category::Statement);
    assert_eq!(root.children()[1].category(), Category::Expression);
}

#[test]
fn test_left_associativity() {
    let root = parse("x := 1-2-3").expect("Parsing failed");
    assert_eq!(
        sexpr(&root.children()[0]),
        "op(-)(op(-)(const(1),const(2)),const(3))"
    );
}

#[test]
fn test_relational_not_chainable() {
    let err = parse("x := 1<2<3").unwrap_err();
    assert!(err.is_syntax(), "expected syntax error, got {err:?}");
    assert_eq!(err.span().map(|s| s.column), Some(9));
}

#[test]
fn test_missing_right_hand_side() {
    let err = parse("x := ").unwrap_err();
    assert!(err.is_syntax());
    let message = err.to_string();
    assert!(message.contains("'(', number or identifier"), "{message}");
}

#[test]
fn test_comments_elided() {
    let with_comment = tokenize("x := 1{this is ignored}+2").unwrap();
    let without = tokenize("x := 1+2").unwrap();
    let kinds = |tokens: &[tiny_parser::parser::token::Token]| {
        tokens.iter().map(|t| (t.kind, t.text.clone())).collect::<Vec<_>>()
    };
    assert_eq!(kinds(&with_comment), kinds(&without));

    let a = parse("x := 1{this is ignored}+2").unwrap();
    let b = parse("x := 1+2").unwrap();
    assert!(isomorphic(&a, &b));
}

#[test]
fn test_unterminated_comment() {
    let err = parse("x := 1 { oops").unwrap_err();
    assert!(err.is_lexical(), "expected lexical error, got {err:?}");
    assert!(err.to_string().contains("unterminated comment"));
}

#[test]
fn test_unrecognized_character() {
    let err = parse("x := 1 # 2").unwrap_err();
    match err {
        ParseError::Lexical { message, span } => {
            assert_eq!(message, "unrecognized character '#'");
            assert_eq!((span.line, span.column), (1, 8));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_statement_chain_length() {
    let cases = [
        ("read x", 1),
        ("read x; write x", 2),
        ("read x; if x < 1 then write 1; write 2 end; write 3", 3),
        ("repeat read x; read y until x = y; write x; write y", 3),
    ];
    for (source, expected) in cases {
        let root = parse(source).expect(source);
        assert_eq!(root.chain_len(), expected, "{source}");
        assert!(root.chain().all(|n| n.category() == Category::Statement));
    }
}

#[test]
fn test_round_trip_through_source_emitter() {
    let programs = [
        "read x; if 0 < x then fact := 1; repeat fact := fact * x; x := x - 1 until x = 0; write fact end",
        "x := (1 + 2) * (3 - 4) / 5; write x",
        "if a = b then write a else if a < b then write b end end",
        "repeat repeat read n until n = 0 until 1",
    ];
    for program in programs {
        let original = parse(program).expect(program);
        let printed = EmitterType::Source.create().emit(&original).unwrap();
        let reparsed = parse(&printed).expect(&printed);
        assert!(isomorphic(&original, &reparsed), "{program}\n---\n{printed}");
    }
}

#[test]
fn test_empty_input() {
    assert!(matches!(parse(""), Err(ParseError::Empty)));
    assert!(matches!(parse("  { nothing here }  "), Err(ParseError::Empty)));
}

#[test]
fn test_trailing_tokens_rejected() {
    let err = parse("write 1 end").unwrap_err();
    assert!(matches!(err, ParseError::TrailingInput { .. }));
}

#[test]
fn test_input_size_limit() {
    let options = ParseOptions::default().with_max_input_len(8);
    let err = parse_with("x := 1 + 2 + 3", &options).unwrap_err();
    assert!(matches!(err, ParseError::InputTooLarge { limit: 8, len: 14 }));
}

#[test]
fn test_deep_nesting_is_guarded() {
    let source = format!("x := {}1{}", "(".repeat(10_000), ")".repeat(10_000));
    let err = parse(&source).unwrap_err();
    assert!(matches!(err, ParseError::TooDeep { .. }), "{err:?}");

    let nested_ifs = format!("{}write 1{}", "if 1 then ".repeat(1000), " end".repeat(1000));
    assert!(matches!(parse(&nested_ifs), Err(ParseError::TooDeep { .. })));
}

#[test]
fn test_long_operator_chains_are_bounded() {
    // ~1 MiB of `+1`, inside the default input limit
    let sum = format!("write 1{}", "+1".repeat(500_000));
    assert!(sum.len() <= ParseOptions::DEFAULT_MAX_INPUT_LEN);
    let err = parse(&sum).unwrap_err();
    assert!(matches!(err, ParseError::TooDeep { .. }), "{err:?}");

    let product = format!("write 2{}", "*2".repeat(500_000));
    let err = parse(&product).unwrap_err();
    assert!(matches!(err, ParseError::TooDeep { .. }), "{err:?}");
}

#[test]
fn test_operator_chain_within_limit_emits_and_drops() {
    let options = ParseOptions::default().with_max_depth(1_000);
    let source = format!("write 1{}; write 2{}", "+1".repeat(400), "*2".repeat(400));
    let root = parse_with(&source, &options).expect("Parsing failed");
    assert_eq!(root.chain_len(), 2);
    assert_eq!(root.count_nodes(), 2 + 801 + 801);

    for emitter in EmitterType::all() {
        let text = emitter.create().emit(&root).expect("Emit failed");
        assert!(!text.is_empty());
    }
    drop(root);

    // default depth still accepts ordinary sums
    let source = format!("x := 1{}", "+1".repeat(90));
    assert!(parse(&source).is_ok());
}

#[test]
fn test_long_statement_list() {
    let source = vec!["x := x + 1"; 50_000].join("; ");
    let root = parse(&source).expect("Parsing failed");
    assert_eq!(root.chain_len(), 50_000);
}

#[test]
fn test_parses_are_independent_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let source = format!("read x; x := x + {i}; write x");
                let root = parse(&source).expect("Parsing failed");
                sexpr(root.next().expect("missing assignment"))
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let text = handle.join().expect("thread panicked");
        assert_eq!(text, format!("assign(x)(op(+)(id(x),const({i})))"));
    }
}
