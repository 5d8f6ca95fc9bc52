use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    /// Keywords, matched case-insensitively against the lowercased name.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("null", TokenKind::Null);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Comma,
    LParen,
    RParen,
    LBrack,
    RBrack,
    Dot,

    Plus,
    Minus,
    Times,
    Divide,
    Exponent,

    Eq,  // =
    Neq, // !=
    Lte,
    Lt,
    Gte,
    Gt,

    Ampersand,

    Decimal,
    String,

    // Reserved
    True,
    False,
    Null,

    Name,
    EndOfInput,
}

impl TokenKind {
    /// How the token kind is spelled in source, for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Comma => "`,`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrack => "`[`",
            TokenKind::RBrack => "`]`",
            TokenKind::Dot => "`.`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Times => "`*`",
            TokenKind::Divide => "`/`",
            TokenKind::Exponent => "`^`",
            TokenKind::Eq => "`=`",
            TokenKind::Neq => "`!=`",
            TokenKind::Lte => "`<=`",
            TokenKind::Lt => "`<`",
            TokenKind::Gte => "`>=`",
            TokenKind::Gt => "`>`",
            TokenKind::Ampersand => "`&`",
            TokenKind::Decimal => "number",
            TokenKind::String => "string",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Null => "`null`",
            TokenKind::Name => "name",
            TokenKind::EndOfInput => "end of input",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => write!(f, "end of input"),
            _ => write!(f, "`{}`", self.value),
        }
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// One line per token, as printed by `excellent parse --tokens`.
    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[TokenKind::String, TokenKind::Name, TokenKind::Decimal]) {
            format!("{} ({}) @ {}", self.kind, self.value, self.span.start)
        } else {
            format!("{} @ {}", self.kind, self.span.start)
        }
    }
}
