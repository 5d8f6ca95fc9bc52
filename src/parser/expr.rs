use crate::{
    ast::ast::{BinaryOperator, Expr},
    errors::errors::{Error, Production},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Parses an expression whose infix operators all bind at least as tightly as `bp`.
///
/// Every recursive descent passes through here, so this is where the parser's
/// depth limit is enforced.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.descend()?;
    let expr = parse_climbing(parser, bp);
    parser.ascend();
    expr
}

fn parse_climbing(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected("an expression", Production::Expression)),
    };

    let mut left = nud(parser)?;

    // While the next token is an operator binding at least as tightly as bp, extend lhs
    loop {
        let token_kind = parser.current_token_kind();

        let operator_bp = match parser.get_bp_lookup().get(&token_kind) {
            Some(operator_bp) if *operator_bp >= bp => *operator_bp,
            _ => break,
        };

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => break,
        };

        left = led(parser, left, operator_bp)?;
    }

    Ok(left)
}

fn binary_operator(parser: &mut Parser) -> Result<BinaryOperator, Error> {
    match BinaryOperator::from_token_kind(parser.current_token_kind()) {
        Some(op) => {
            parser.advance();
            Ok(op)
        }
        None => Err(parser.unexpected("an operator", Production::Expression)),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let op = binary_operator(parser)?;
    let right = parse_expr(parser, bp.tighter())?;

    Ok(Expr::binary(op, left, right))
}

// `2 ^ 3 ^ 2` is `2 ^ (3 ^ 2)`: the right operand may contain the same tier
pub fn parse_exponent_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let op = binary_operator(parser)?;
    let right = parse_expr(parser, bp)?;

    Ok(Expr::binary(op, left, right))
}

// No infix operator binds at `Prefix`, so `-2 ^ 2` is `(-2) ^ 2`
pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let operand = parse_expr(parser, BindingPower::Prefix)?;

    Ok(Expr::negation(operand))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let opening = parser.advance();
    let inner = parse_expr(parser, BindingPower::Default)?;
    parser.expect_closing(TokenKind::RParen, &opening, Production::Expression)?;

    Ok(Expr::parentheses(inner))
}

pub fn parse_atom_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_atom(parser)
}

/// Parses a primary expression followed by any `.field` / `[index]` chain,
/// folding the chain left to right.
pub fn parse_atom(parser: &mut Parser) -> Result<Expr, Error> {
    let mut expr = parse_primary(parser)?;

    loop {
        match parser.current_token_kind() {
            TokenKind::Dot => {
                parser.advance();
                let field = parse_field_name(parser)?;
                expr = Expr::dot_lookup(expr, field);
            }
            TokenKind::LBrack => {
                let opening = parser.advance();
                let index = parse_expr(parser, BindingPower::Default)?;
                parser.expect_closing(TokenKind::RBrack, &opening, Production::Atom)?;
                expr = Expr::array_lookup(expr, index);
            }
            _ => break,
        }
    }

    Ok(expr)
}

fn is_function_call(parser: &Parser) -> bool {
    matches!(
        parser.current_token_kind(),
        TokenKind::Name | TokenKind::True | TokenKind::False
    ) && parser.peek_kind(1) == TokenKind::LParen
}

pub fn parse_primary(parser: &mut Parser) -> Result<Expr, Error> {
    if is_function_call(parser) {
        return parse_function_call(parser);
    }

    match parser.current_token_kind() {
        TokenKind::Name => Ok(Expr::ContextReference(parser.advance().value)),
        TokenKind::String => Ok(Expr::StringLiteral(parser.advance().value)),
        TokenKind::Decimal => Ok(Expr::DecimalLiteral(parser.advance().value)),
        TokenKind::True => {
            parser.advance();
            Ok(Expr::BooleanLiteral(true))
        }
        TokenKind::False => {
            parser.advance();
            Ok(Expr::BooleanLiteral(false))
        }
        TokenKind::Null => {
            parser.advance();
            Ok(Expr::NullLiteral)
        }
        _ => Err(parser.unexpected(
            "a name, literal or function call",
            Production::Atom,
        )),
    }
}

/// The operand after `.`: a name, or a number/keyword spelled as a name
/// (`contact.urns.0`, `flags.true`). Strings and calls are rejected.
fn parse_field_name(parser: &mut Parser) -> Result<String, Error> {
    if is_function_call(parser) {
        return Err(parser.unexpected("a field name", Production::Atom));
    }

    match parser.current_token_kind() {
        TokenKind::Name | TokenKind::Decimal | TokenKind::True | TokenKind::False | TokenKind::Null => {
            Ok(parser.advance().value)
        }
        _ => Err(parser.unexpected("a field name", Production::Atom)),
    }
}

pub fn parse_function_call(parser: &mut Parser) -> Result<Expr, Error> {
    let name = parser.advance().value;
    let opening = parser.expect(TokenKind::LParen, Production::Atom)?;

    let arguments = if parser.current_token_kind() != TokenKind::RParen {
        parse_parameters(parser)?
    } else {
        vec![]
    };

    parser.expect_closing(TokenKind::RParen, &opening, Production::Atom)?;

    Ok(Expr::function_call(name, arguments))
}

/// Parses `expr (, expr)*`. A trailing comma is an error.
pub fn parse_parameters(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut parameters = vec![];

    loop {
        if !parser.at_expression_start() {
            return Err(parser.unexpected("an expression", Production::Parameters));
        }
        parameters.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    Ok(parameters)
}
