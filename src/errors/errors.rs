use std::fmt::Display;

use thiserror::Error;

use crate::{
    lexer::tokens::{Token, TokenKind},
    Position,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// The grammar production that was being parsed, for syntax errors.
    pub fn production(&self) -> Option<Production> {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { production, .. }
            | ErrorImpl::UnclosedDelimiter { production, .. } => Some(*production),
            ErrorImpl::TrailingInput { .. } => Some(Production::Parse),
            _ => None,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnclosedDelimiter { .. } => "UnclosedDelimiter",
            ErrorImpl::TrailingInput { .. } => "TrailingInput",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString { .. } => {
                ErrorTip::Suggestion(String::from("String literal is missing its closing `\"`"))
            }
            ErrorImpl::UnexpectedToken {
                token,
                expected,
                production,
            } => ErrorTip::Suggestion(format!(
                "Unexpected {} in {}, expected {}",
                token, production, expected
            )),
            ErrorImpl::UnclosedDelimiter {
                opening, expected, ..
            } => ErrorTip::Suggestion(format!(
                "{} opened here is never closed, expected {}",
                opening,
                expected.describe()
            )),
            ErrorImpl::TrailingInput { token } => ErrorTip::Suggestion(format!(
                "Unexpected {} after the end of the expression, did you miss an operator?",
                token
            )),
            ErrorImpl::NestingTooDeep { max, .. } => ErrorTip::Suggestion(format!(
                "Expressions may nest at most {} levels deep, try splitting this one up",
                max
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// Grammar productions named in syntax errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    Parse,
    Expression,
    Atom,
    Parameters,
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Production::Parse => "parse",
            Production::Expression => "expression",
            Production::Atom => "atom",
            Production::Parameters => "parameters",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated string: {literal:?}")]
    UnterminatedString { literal: String },
    #[error("syntax error in {production}: unexpected {token}, expected {expected}")]
    UnexpectedToken {
        token: Token,
        expected: String,
        production: Production,
    },
    #[error("syntax error in {production}: {opening} is never closed, expected {} but found {token}", expected.describe())]
    UnclosedDelimiter {
        token: Token,
        opening: Token,
        expected: TokenKind,
        production: Production,
    },
    #[error("syntax error: unexpected {token} after the end of the expression")]
    TrailingInput { token: Token },
    #[error("expression nests {depth} levels deep, the limit is {max}")]
    NestingTooDeep { depth: usize, max: usize },
}
