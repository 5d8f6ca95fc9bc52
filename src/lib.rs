#![allow(clippy::module_inception)]

use log::debug;

use crate::{
    ast::ast::Expr,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse_with_options,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod template;

/// A location in the source text.
///
/// `offset` is a byte offset, `line` and `column` are 1-based and counted in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn start() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Knobs for [`parse_expression`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting below the outermost expression. Groups, indexes, call
    /// arguments, prefix `-` and operator right-hand sides each nest one level.
    /// `None` leaves recursion bounded only by the stack.
    pub max_depth: Option<usize>,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    pub fn unbounded() -> Self {
        ParseOptions { max_depth: None }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        ParseOptions {
            max_depth: Some(max_depth),
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions::with_max_depth(Self::DEFAULT_MAX_DEPTH)
    }
}

/// Tokenizes and parses a single expression such as `contact.age + 1`.
pub fn parse_expression(source: &str, options: &ParseOptions) -> Result<Expr, Error> {
    let tokens = tokenize(source)?;
    debug!("tokenized {:?} into {} tokens", source, tokens.len());

    parse_with_options(tokens, options)
}

/// Returns the 1-based line number, the line text and the char column (0-based)
/// of a byte offset in `source`.
pub fn get_line_at_position(source: &str, offset: usize) -> (usize, String, usize) {
    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&offset) {
            let line_pos = source[start..offset].chars().count();
            return (line_number, line.to_string(), line_pos);
        }

        start = end;
        line_number += 1;
    }

    // Offsets at the very end (the end-of-input token) point just past the last char
    let last = source.rsplit('\n').next().unwrap_or("");
    let line_number = source.matches('\n').count() + 1;
    (line_number, last.to_string(), last.chars().count())
}


/// Renders an error against the source it came from.
///
/// ```text
/// Error: UnexpectedToken (Unexpected `)` in parameters, expected an expression)
/// -> <expression>
///   |
/// 1 | foo(1, )
///   | -------^
/// ```
pub fn display_error(error: &Error, source: &str, name: &str) -> String {
    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.offset);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", name));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    out.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
