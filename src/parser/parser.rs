//! Parser implementation for building the expression tree.
//!
//! This module contains the Parser cursor and the `parse` entry point.
//! Expressions are parsed by precedence climbing over NUD/LED lookup tables:
//! - NUD (null denotation) handlers for tokens that start an expression
//! - LED (left denotation) handlers for infix operators
//! - Binding powers for operator precedence

use std::collections::HashMap;

use crate::{
    ast::ast::Expr,
    errors::errors::{Error, ErrorImpl, Production},
    lexer::tokens::{Token, TokenKind},
    ParseOptions, Span,
};

use super::{
    expr::parse_expr,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
    },
};

/// Cursor over a token sequence plus the lookup tables driving expression parsing.
///
/// The cursor only moves forward and never moves past the final `EndOfInput`
/// token, so lookahead at the end of input keeps returning it.
pub struct Parser {
    /// The tokens to parse, always ending in `EndOfInput`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for infix binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Number of `parse_expr` calls currently on the stack
    depth: usize,
    /// Deepest nesting allowed below the outermost expression, if limited
    max_depth: Option<usize>,
}

impl Parser {
    /// Creates a new Parser over `tokens`.
    ///
    /// A missing trailing `EndOfInput` is supplied, positioned at the end of the
    /// last token.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EndOfInput) {
            let end = tokens
                .last()
                .map(|t| t.span.end)
                .unwrap_or_else(crate::Position::start);
            tokens.push(Token {
                kind: TokenKind::EndOfInput,
                value: String::new(),
                span: Span { start: end, end },
            });
        }

        Parser {
            tokens,
            pos: 0,
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            depth: 0,
            max_depth: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enters one more level of expression nesting, failing once the limit is passed.
    pub fn descend(&mut self) -> Result<(), Error> {
        self.depth += 1;
        let nesting = self.depth - 1;

        match self.max_depth {
            Some(max) if nesting > max => Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    depth: nesting,
                    max,
                },
                self.current_token().span.start,
            )),
            _ => Ok(()),
        }
    }

    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.peek(0)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the token `offset` places ahead of the cursor, or `EndOfInput`.
    pub fn peek(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.peek(offset).kind
    }

    /// Advances to the next token and returns the consumed one.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consumes a token of the expected kind or fails naming the production.
    pub fn expect(&mut self, expected_kind: TokenKind, production: Production) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            return Err(self.unexpected(expected_kind.describe(), production));
        }
        Ok(self.advance())
    }

    /// Consumes the token closing `opening`.
    ///
    /// Running out of input is reported at `opening`. Any other token is reported
    /// where it stands.
    pub fn expect_closing(
        &mut self,
        expected_kind: TokenKind,
        opening: &Token,
        production: Production,
    ) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            return Ok(self.advance());
        }

        if self.has_tokens() {
            return Err(self.unexpected(expected_kind.describe(), production));
        }

        Err(Error::new(
            ErrorImpl::UnclosedDelimiter {
                token: self.current_token().clone(),
                opening: opening.clone(),
                expected: expected_kind,
                production,
            },
            opening.span.start,
        ))
    }

    /// A syntax error at the current token.
    pub fn unexpected(&self, expected: &str, production: Production) -> Error {
        let token = self.current_token().clone();
        let position = token.span.start;
        Error::new(
            ErrorImpl::UnexpectedToken {
                token,
                expected: expected.to_string(),
                production,
            },
            position,
        )
    }

    /// Whether the current token can begin an expression.
    pub fn at_expression_start(&self) -> bool {
        self.nud_lookup.contains_key(&self.current_token_kind())
    }

    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EndOfInput
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }
}

/// Parses a complete token sequence into a single expression.
///
/// This is the main entry point for parsing. The whole input must be consumed:
/// anything left before `EndOfInput` is reported as trailing input. Nesting is
/// limited to [`ParseOptions::DEFAULT_MAX_DEPTH`].
pub fn parse(tokens: Vec<Token>) -> Result<Expr, Error> {
    parse_with_options(tokens, &ParseOptions::default())
}

/// Like [`parse`], with the nesting limit taken from `options`.
pub fn parse_with_options(tokens: Vec<Token>, options: &ParseOptions) -> Result<Expr, Error> {
    let mut parser = Parser::new(tokens).with_max_depth(options.max_depth);
    create_token_lookups(&mut parser);

    let expr = parse_expr(&mut parser, BindingPower::Default)?;

    if parser.has_tokens() {
        let token = parser.current_token().clone();
        let position = token.span.start;
        return Err(Error::new(ErrorImpl::TrailingInput { token }, position));
    }

    Ok(expr)
}
