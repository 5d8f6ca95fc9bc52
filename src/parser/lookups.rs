use std::collections::HashMap;

use crate::{ast::ast::Expr, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser};

/// Precedence tiers, loosest first. The discriminants are the binding powers.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum BindingPower {
    Default = 0,
    Concatenation = 3,
    Equality = 4,
    Relational = 5,
    Additive = 6,
    Multiplicative = 7,
    Exponent = 8,
    Prefix = 9,
}

impl BindingPower {
    /// The tier one step tighter, used for the right operand of left-associative
    /// operators. `Prefix` is already the tightest tier.
    pub fn tighter(self) -> BindingPower {
        match self {
            BindingPower::Default => BindingPower::Concatenation,
            BindingPower::Concatenation => BindingPower::Equality,
            BindingPower::Equality => BindingPower::Relational,
            BindingPower::Relational => BindingPower::Additive,
            BindingPower::Additive => BindingPower::Multiplicative,
            BindingPower::Multiplicative => BindingPower::Exponent,
            BindingPower::Exponent | BindingPower::Prefix => BindingPower::Prefix,
        }
    }
}

pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Concatenation
    parser.led(TokenKind::Ampersand, BindingPower::Concatenation, parse_binary_expr);

    // Equality
    parser.led(TokenKind::Eq, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::Neq, BindingPower::Equality, parse_binary_expr);

    // Relational
    parser.led(TokenKind::Lte, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Lt, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Gte, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Gt, BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Minus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Times, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Divide, BindingPower::Multiplicative, parse_binary_expr);

    // Right-associative
    parser.led(TokenKind::Exponent, BindingPower::Exponent, parse_exponent_expr);

    // Prefix and grouping
    parser.nud(TokenKind::Minus, parse_prefix_expr);
    parser.nud(TokenKind::LParen, parse_grouping_expr);

    // Atoms
    parser.nud(TokenKind::Name, parse_atom_expr);
    parser.nud(TokenKind::True, parse_atom_expr);
    parser.nud(TokenKind::False, parse_atom_expr);
    parser.nud(TokenKind::String, parse_atom_expr);
    parser.nud(TokenKind::Decimal, parse_atom_expr);
    parser.nud(TokenKind::Null, parse_atom_expr);
}

// Lookup tables inside parser struct, so it's easier
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
