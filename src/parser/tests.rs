//! Unit tests for the parser module.
//!
//! This module contains tests for parsing:
//! - Atoms and postfix lookups
//! - Function calls
//! - Operator precedence and associativity
//! - Negation and parentheses
//! - Syntax errors

use crate::{
    ast::ast::{BinaryOperator, Expr},
    errors::errors::{ErrorImpl, Production},
    lexer::{lexer::tokenize, tokens::TokenKind},
    ParseOptions,
};

use super::parser::{parse, parse_with_options};

fn parse_str(source: &str) -> Result<Expr, crate::errors::errors::Error> {
    parse(tokenize(source).unwrap())
}

fn name(n: &str) -> Expr {
    Expr::context_reference(n)
}

fn num(n: &str) -> Expr {
    Expr::decimal(n)
}

fn bin(op: BinaryOperator, left: Expr, right: Expr) -> Expr {
    Expr::binary(op, left, right)
}

#[test]
fn test_parse_atoms() {
    assert_eq!(parse_str("foo").unwrap(), name("foo"));
    assert_eq!(parse_str("1.5").unwrap(), num("1.5"));
    assert_eq!(parse_str(r#""hi""#).unwrap(), Expr::string(r#""hi""#));
    assert_eq!(parse_str("TRUE").unwrap(), Expr::BooleanLiteral(true));
    assert_eq!(parse_str("false").unwrap(), Expr::BooleanLiteral(false));
    assert_eq!(parse_str("Null").unwrap(), Expr::NullLiteral);
}

#[test]
fn test_parse_function_calls() {
    assert_eq!(parse_str("foo()").unwrap(), Expr::function_call("foo", vec![]));
    assert_eq!(
        parse_str("foo(1, 2)").unwrap(),
        Expr::function_call("foo", vec![num("1"), num("2")])
    );
    assert_eq!(
        parse_str("upper(trim(name))").unwrap(),
        Expr::function_call(
            "upper",
            vec![Expr::function_call("trim", vec![name("name")])]
        )
    );
}

#[test]
fn test_parse_keyword_named_function() {
    assert_eq!(
        parse_str("true(1)").unwrap(),
        Expr::function_call("true", vec![num("1")])
    );
    assert_eq!(
        parse_str("FALSE()").unwrap(),
        Expr::function_call("FALSE", vec![])
    );
}

#[test]
fn test_parse_bare_name_is_not_a_call() {
    assert_eq!(parse_str("foo").unwrap(), name("foo"));
}

#[test]
fn test_parse_lookup_chains() {
    assert_eq!(
        parse_str("a[0].b").unwrap(),
        Expr::dot_lookup(Expr::array_lookup(name("a"), num("0")), "b")
    );
    assert_eq!(
        parse_str("a.b.c").unwrap(),
        Expr::dot_lookup(Expr::dot_lookup(name("a"), "b"), "c")
    );
    assert_eq!(
        parse_str("contact.urns.0").unwrap(),
        Expr::dot_lookup(Expr::dot_lookup(name("contact"), "urns"), "0")
    );
    assert_eq!(
        parse_str("fields[\"age\" & x]").unwrap(),
        Expr::array_lookup(
            name("fields"),
            bin(BinaryOperator::Concat, Expr::string("\"age\""), name("x"))
        )
    );
}

#[test]
fn test_parse_lookup_on_call() {
    assert_eq!(
        parse_str("foo(1).bar").unwrap(),
        Expr::dot_lookup(Expr::function_call("foo", vec![num("1")]), "bar")
    );
}

#[test]
fn test_parse_keyword_fields() {
    assert_eq!(
        parse_str("flags.true").unwrap(),
        Expr::dot_lookup(name("flags"), "true")
    );
    assert_eq!(
        parse_str("x.null").unwrap(),
        Expr::dot_lookup(name("x"), "null")
    );
}

#[test]
fn test_parse_precedence() {
    assert_eq!(
        parse_str("1 + 2 * 3").unwrap(),
        bin(
            BinaryOperator::Plus,
            num("1"),
            bin(BinaryOperator::Times, num("2"), num("3"))
        )
    );
    assert_eq!(
        parse_str("1 * 2 + 3").unwrap(),
        bin(
            BinaryOperator::Plus,
            bin(BinaryOperator::Times, num("1"), num("2")),
            num("3")
        )
    );
    assert_eq!(
        parse_str("a & b = c").unwrap(),
        bin(
            BinaryOperator::Concat,
            name("a"),
            bin(BinaryOperator::Eq, name("b"), name("c"))
        )
    );
    assert_eq!(
        parse_str("a = b < c").unwrap(),
        bin(
            BinaryOperator::Eq,
            name("a"),
            bin(BinaryOperator::Lt, name("b"), name("c"))
        )
    );
    assert_eq!(
        parse_str("a <= b + 1").unwrap(),
        bin(
            BinaryOperator::Lte,
            name("a"),
            bin(BinaryOperator::Plus, name("b"), num("1"))
        )
    );
    assert_eq!(
        parse_str("2 * 3 ^ 2").unwrap(),
        bin(
            BinaryOperator::Times,
            num("2"),
            bin(BinaryOperator::Exponent, num("3"), num("2"))
        )
    );
}

#[test]
fn test_parse_left_associativity() {
    assert_eq!(
        parse_str("8 - 3 - 1").unwrap(),
        bin(
            BinaryOperator::Minus,
            bin(BinaryOperator::Minus, num("8"), num("3")),
            num("1")
        )
    );
    assert_eq!(
        parse_str("8 / 4 * 2").unwrap(),
        bin(
            BinaryOperator::Times,
            bin(BinaryOperator::Divide, num("8"), num("4")),
            num("2")
        )
    );
    assert_eq!(
        parse_str("a != b = c").unwrap(),
        bin(
            BinaryOperator::Eq,
            bin(BinaryOperator::Neq, name("a"), name("b")),
            name("c")
        )
    );
    assert_eq!(
        parse_str("a & b & c").unwrap(),
        bin(
            BinaryOperator::Concat,
            bin(BinaryOperator::Concat, name("a"), name("b")),
            name("c")
        )
    );
}

#[test]
fn test_parse_exponent_right_associativity() {
    assert_eq!(
        parse_str("2 ^ 3 ^ 2").unwrap(),
        bin(
            BinaryOperator::Exponent,
            num("2"),
            bin(BinaryOperator::Exponent, num("3"), num("2"))
        )
    );
}

#[test]
fn test_parse_negation() {
    assert_eq!(
        parse_str("-a.b").unwrap(),
        Expr::negation(Expr::dot_lookup(name("a"), "b"))
    );
    assert_eq!(
        parse_str("-2 ^ 2").unwrap(),
        bin(BinaryOperator::Exponent, Expr::negation(num("2")), num("2"))
    );
    assert_eq!(
        parse_str("-(2 ^ 2)").unwrap(),
        Expr::negation(Expr::parentheses(bin(
            BinaryOperator::Exponent,
            num("2"),
            num("2")
        )))
    );
    assert_eq!(
        parse_str("-1 + 2").unwrap(),
        bin(BinaryOperator::Plus, Expr::negation(num("1")), num("2"))
    );
    assert_eq!(
        parse_str("1 - -1").unwrap(),
        bin(BinaryOperator::Minus, num("1"), Expr::negation(num("1")))
    );
    assert_eq!(
        parse_str("--x").unwrap(),
        Expr::negation(Expr::negation(name("x")))
    );
    assert_eq!(
        parse_str("2 ^ -1").unwrap(),
        bin(BinaryOperator::Exponent, num("2"), Expr::negation(num("1")))
    );
}

#[test]
fn test_parse_parentheses() {
    assert_eq!(
        parse_str("(1 + 2) * 3").unwrap(),
        bin(
            BinaryOperator::Times,
            Expr::parentheses(bin(BinaryOperator::Plus, num("1"), num("2"))),
            num("3")
        )
    );
    assert_eq!(
        parse_str("((x))").unwrap(),
        Expr::parentheses(Expr::parentheses(name("x")))
    );
}

#[test]
fn test_parse_is_deterministic() {
    let tokens = tokenize("if(a > 1, a.b[0] & \"x\", -2 ^ 3)").unwrap();

    let first = parse(tokens.clone()).unwrap();
    let second = parse(tokens).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parse_without_end_of_input_token() {
    let mut tokens = tokenize("1 + 2").unwrap();
    tokens.pop();

    assert_eq!(
        parse(tokens).unwrap(),
        bin(BinaryOperator::Plus, num("1"), num("2"))
    );
}

#[test]
fn test_parse_missing_operand() {
    let error = parse_str("1 +").unwrap_err();

    match error.kind() {
        ErrorImpl::UnexpectedToken {
            token, production, ..
        } => {
            assert_eq!(token.kind, TokenKind::EndOfInput);
            assert_eq!(*production, Production::Expression);
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(error.get_position().offset, 3);
}

#[test]
fn test_parse_empty_input() {
    let error = parse_str("").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.production(), Some(Production::Expression));
}

#[test]
fn test_parse_trailing_comma() {
    let error = parse_str("foo(1,").unwrap_err();
    assert_eq!(error.production(), Some(Production::Parameters));

    let error = parse_str("foo(1, )").unwrap_err();
    assert_eq!(error.production(), Some(Production::Parameters));
    assert_eq!(error.get_position().offset, 7);
}

#[test]
fn test_parse_unclosed_delimiters() {
    let error = parse_str("a[1").unwrap_err();
    match error.kind() {
        ErrorImpl::UnclosedDelimiter {
            opening,
            expected,
            production,
            ..
        } => {
            assert_eq!(opening.kind, TokenKind::LBrack);
            assert_eq!(*expected, TokenKind::RBrack);
            assert_eq!(*production, Production::Atom);
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(error.get_position().offset, 1);

    let error = parse_str("foo(1").unwrap_err();
    assert_eq!(error.get_error_name(), "UnclosedDelimiter");
    assert_eq!(error.production(), Some(Production::Atom));

    let error = parse_str("(1 + 2").unwrap_err();
    assert_eq!(error.get_error_name(), "UnclosedDelimiter");
    assert_eq!(error.production(), Some(Production::Expression));
    assert_eq!(error.get_position().offset, 0);
}

#[test]
fn test_parse_stray_token_before_closing() {
    let cases = [
        ("(1 2)", 3, "`)`", Production::Expression),
        ("foo(1 2)", 6, "`)`", Production::Atom),
        ("a[1 2]", 4, "`]`", Production::Atom),
    ];

    for (source, offset, closing, expected_production) in cases {
        let error = parse_str(source).unwrap_err();
        match error.kind() {
            ErrorImpl::UnexpectedToken {
                token,
                expected,
                production,
            } => {
                assert_eq!(token.value, "2", "{}", source);
                assert_eq!(expected, closing);
                assert_eq!(*production, expected_production);
            }
            other => panic!("unexpected error {:?} for {}", other, source),
        }
        assert_eq!(error.get_position().offset, offset);
    }
}

#[test]
fn test_parse_trailing_input() {
    let error = parse_str("1 2").unwrap_err();
    match error.kind() {
        ErrorImpl::TrailingInput { token } => assert_eq!(token.value, "2"),
        other => panic!("unexpected error {:?}", other),
    }

    let error = parse_str("(a).b").unwrap_err();
    assert_eq!(error.get_error_name(), "TrailingInput");
    assert_eq!(error.production(), Some(Production::Parse));
}

#[test]
fn test_parse_bad_field_names() {
    for source in ["a.\"b\"", "a.b()", "a.", "a.(b)"] {
        let error = parse_str(source).unwrap_err();
        match error.kind() {
            ErrorImpl::UnexpectedToken {
                expected,
                production,
                ..
            } => {
                assert_eq!(expected, "a field name", "{}", source);
                assert_eq!(*production, Production::Atom);
            }
            other => panic!("unexpected error {:?} for {}", other, source),
        }
    }
}

#[test]
fn test_parse_operator_without_left_operand() {
    let error = parse_str("* 2").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_position().offset, 0);
}

fn parse_limited(source: &str, max_depth: usize) -> Result<Expr, crate::errors::errors::Error> {
    parse_with_options(
        tokenize(source).unwrap(),
        &ParseOptions::with_max_depth(max_depth),
    )
}

#[test]
fn test_parse_depth_limit() {
    assert!(parse_limited("a[(b)]", 2).is_ok());

    let error = parse_limited("a[(b)]", 1).unwrap_err();
    match error.kind() {
        ErrorImpl::NestingTooDeep { depth, max } => {
            assert_eq!(*depth, 2);
            assert_eq!(*max, 1);
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(error.get_position().offset, 3);
}

#[test]
fn test_parse_depth_resets_between_groups() {
    assert!(parse_limited("(1) + (2) + (3)", 2).is_ok());
}

#[test]
fn test_parse_depth_counts_prefix_minus() {
    let within = format!("{}1", "-".repeat(64));
    assert!(parse_str(&within).is_ok());

    let source = format!("{}1", "-".repeat(20_000));
    let error = parse_str(&source).unwrap_err();
    assert!(matches!(
        error.kind(),
        ErrorImpl::NestingTooDeep { depth: 65, max: 64 }
    ));
}

#[test]
fn test_parse_depth_counts_exponent_chain() {
    let source = format!("2{}", " ^ 2".repeat(20_000));
    let error = parse_str(&source).unwrap_err();
    assert!(matches!(
        error.kind(),
        ErrorImpl::NestingTooDeep { max: 64, .. }
    ));

    assert!(parse_with_options(tokenize("2 ^ 2 ^ 2").unwrap(), &ParseOptions::unbounded()).is_ok());
}
