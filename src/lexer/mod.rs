//! Lexical analysis for Excellent expressions.
//!
//! Converts expression source such as `UPPER(contact.name) & "!"` into the
//! token stream consumed by the parser:
//!
//! - Tokenization using anchored regex patterns, tried in order
//! - Case-insensitive `true`, `false` and `null` keywords
//! - Raw string and decimal literals (no unescaping or number conversion)
//! - Line/column tracking for error reporting

pub mod lexer;
pub mod tokens;
