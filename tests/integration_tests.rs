//! Integration tests for end-to-end parsing.
//!
//! These tests drive the public API from source text through tokenization,
//! the depth check and parsing, plus error rendering and template splitting.

use std::thread;

use excellent::{
    ast::ast::{BinaryOperator, Expr},
    display_error,
    errors::errors::ErrorImpl,
    parse_expression,
    template::template::{parse_template, TemplatePart},
    ParseOptions,
};

fn parse_ok(source: &str) -> Expr {
    parse_expression(source, &ParseOptions::default()).unwrap()
}

#[test]
fn test_parse_realistic_expression() {
    let expr = parse_ok(r#"IF(contact.fields.age >= 18, "adult", "minor") & "!""#);

    match expr {
        Expr::BinaryOp {
            op: BinaryOperator::Concat,
            left,
            right,
        } => {
            assert!(matches!(*left, Expr::FunctionCall { ref name, ref arguments } if name == "IF" && arguments.len() == 3));
            assert_eq!(*right, Expr::string(r#""!""#));
        }
        other => panic!("unexpected tree {:?}", other),
    }
}

#[test]
fn test_render_round_trip() {
    let sources = [
        "1 + 2 * 3",
        "(1 + 2) * 3",
        "2 ^ 3 ^ 2",
        "-a.b",
        "-2 ^ 2",
        "-(2 ^ 2)",
        "a[0].b",
        r#"upper(contact.name) & " " & "hi""#,
        "foo()",
        "x != null",
        "contact.urns.0",
    ];

    for source in sources {
        let expr = parse_ok(source);
        assert_eq!(expr.to_string(), source);
        assert_eq!(parse_ok(&expr.to_string()), expr);
    }
}

#[test]
fn test_render_normalises_spacing() {
    assert_eq!(parse_ok("1+2*3").to_string(), "1 + 2 * 3");
    assert_eq!(parse_ok("foo( 1 ,2 )").to_string(), "foo(1, 2)");
}

#[test]
fn test_depth_limit() {
    let deep = format!("{}1{}", "(".repeat(100), ")".repeat(100));

    let error = parse_expression(&deep, &ParseOptions::default()).unwrap_err();
    assert!(matches!(
        error.kind(),
        ErrorImpl::NestingTooDeep { max: 64, .. }
    ));

    let expr = parse_expression(&deep, &ParseOptions::unbounded()).unwrap();
    assert_eq!(expr.node_count(), 101);
}

#[test]
fn test_depth_limit_without_brackets() {
    let negations = format!("{}1", "-".repeat(200_000));
    let error = parse_expression(&negations, &ParseOptions::default()).unwrap_err();
    assert_eq!(error.get_error_name(), "NestingTooDeep");

    let powers = format!("2{}", "^2".repeat(100_000));
    let error = parse_expression(&powers, &ParseOptions::default()).unwrap_err();
    assert_eq!(error.get_error_name(), "NestingTooDeep");
}

#[test]
fn test_negation_binds_tighter_than_exponent() {
    let expr = parse_ok("-2 ^ 2");

    assert_eq!(
        expr,
        Expr::binary(
            BinaryOperator::Exponent,
            Expr::negation(Expr::decimal("2")),
            Expr::decimal("2")
        )
    );
}

#[test]
fn test_display_error() {
    let source = "foo(1, )";
    let error = parse_expression(source, &ParseOptions::default()).unwrap_err();

    let rendered = display_error(&error, source, "<expression>");
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines[0],
        "Error: UnexpectedToken (Unexpected `)` in parameters, expected an expression)"
    );
    assert_eq!(lines[1], "-> <expression>");
    assert_eq!(lines[3], "1 | foo(1, )");
    assert_eq!(lines[4], "  | -------^");
}

#[test]
fn test_display_error_at_end_of_input() {
    let source = "1 +";
    let error = parse_expression(source, &ParseOptions::default()).unwrap_err();

    let rendered = display_error(&error, source, "<expression>");
    assert!(rendered.ends_with("  | ---^"), "{}", rendered);
}

#[test]
fn test_tokenizer_errors_surface() {
    let error = parse_expression("a # b", &ParseOptions::default()).unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().offset, 2);

    let error = parse_expression("\"open", &ParseOptions::default()).unwrap_err();
    assert_eq!(error.get_error_name(), "UnterminatedString");
}

#[test]
fn test_parse_on_many_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| thread::spawn(move || parse_expression(&format!("x[{}] + {}", i, i), &ParseOptions::default())))
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
}

#[test]
fn test_template_end_to_end() {
    let parts = parse_template(
        "Hi @contact.first_name, you owe @(format_number(balance * 1.15)). Mail bob@nyaruka.com",
        Some(&["contact", "fields"][..]),
        &ParseOptions::default(),
    )
    .unwrap();

    let expressions: Vec<String> = parts
        .iter()
        .filter_map(|part| match part {
            TemplatePart::Expression { expr, .. } => Some(expr.to_string()),
            TemplatePart::Text(_) => None,
        })
        .collect();

    assert_eq!(
        expressions,
        vec!["contact.first_name", "format_number(balance * 1.15)"]
    );
    assert_eq!(
        parts.last(),
        Some(&TemplatePart::Text(". Mail bob@nyaruka.com".to_string()))
    );
}
