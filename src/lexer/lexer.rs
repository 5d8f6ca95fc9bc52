use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), Error>;

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            regex: Regex::new(pattern).unwrap(),
            handler,
        }
    }
}

lazy_static! {
    // Tried in order, first match wins. Every pattern is anchored at the cursor.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new(r"^\s+", skip_handler),
        RegexPattern::new(r"^[_\p{L}][_\p{L}\p{Nd}]*", symbol_handler),
        RegexPattern::new(r"^[0-9]+(\.[0-9]+)?", number_handler),
        RegexPattern::new(r#"(?s)^"(?:[^"\\]|\\.)*""#, string_handler),
        RegexPattern::new(r#"^""#, unterminated_string_handler),
        RegexPattern::new(r"^!=", MK_DEFAULT_HANDLER!(TokenKind::Neq, "!=")),
        RegexPattern::new(r"^<=", MK_DEFAULT_HANDLER!(TokenKind::Lte, "<=")),
        RegexPattern::new(r"^>=", MK_DEFAULT_HANDLER!(TokenKind::Gte, ">=")),
        RegexPattern::new(r"^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        RegexPattern::new(r"^\(", MK_DEFAULT_HANDLER!(TokenKind::LParen, "(")),
        RegexPattern::new(r"^\)", MK_DEFAULT_HANDLER!(TokenKind::RParen, ")")),
        RegexPattern::new(r"^\[", MK_DEFAULT_HANDLER!(TokenKind::LBrack, "[")),
        RegexPattern::new(r"^\]", MK_DEFAULT_HANDLER!(TokenKind::RBrack, "]")),
        RegexPattern::new(r"^\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        RegexPattern::new(r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        RegexPattern::new(r"^-", MK_DEFAULT_HANDLER!(TokenKind::Minus, "-")),
        RegexPattern::new(r"^\*", MK_DEFAULT_HANDLER!(TokenKind::Times, "*")),
        RegexPattern::new(r"^/", MK_DEFAULT_HANDLER!(TokenKind::Divide, "/")),
        RegexPattern::new(r"^\^", MK_DEFAULT_HANDLER!(TokenKind::Exponent, "^")),
        RegexPattern::new(r"^=", MK_DEFAULT_HANDLER!(TokenKind::Eq, "=")),
        RegexPattern::new(r"^<", MK_DEFAULT_HANDLER!(TokenKind::Lt, "<")),
        RegexPattern::new(r"^>", MK_DEFAULT_HANDLER!(TokenKind::Gt, ">")),
        RegexPattern::new(r"^&", MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&")),
    ];
}

#[derive(Clone)]
pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            tokens: vec![],
            source: source.to_string(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Moves the cursor forward by `n` bytes, keeping line and column in step.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());

        for ch in self.source[self.pos..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        self.pos = end;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn position(&self) -> Position {
        Position {
            offset: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn matched(&self, regex: &Regex) -> Result<String, Error> {
        match regex.find(self.remainder()) {
            Some(found) => Ok(found.as_str().to_string()),
            None => Err(self.unrecognised()),
        }
    }

    fn unrecognised(&self) -> Error {
        Error::new(
            ErrorImpl::UnrecognisedToken {
                token: self.at().map(String::from).unwrap_or_default(),
            },
            self.position(),
        )
    }

    /// Pushes a token spanning `value` from the cursor and moves past it.
    fn push_spanning(&mut self, kind: TokenKind, value: String) {
        let start = self.position();
        self.advance_n(value.len());
        let span = Span {
            start,
            end: self.position(),
        };
        self.push(MK_TOKEN!(kind, value, span));
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex)?;
    lexer.advance_n(matched.len());
    Ok(())
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex)?;
    lexer.push_spanning(TokenKind::Decimal, matched);
    Ok(())
}

// The raw literal, quotes and escapes included, is kept as the token value
fn string_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex)?;
    lexer.push_spanning(TokenKind::String, matched);
    Ok(())
}

fn unterminated_string_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    Err(Error::new(
        ErrorImpl::UnterminatedString {
            literal: lexer.remainder().to_string(),
        },
        lexer.position(),
    ))
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let value = lexer.matched(regex)?;

    let kind = match RESERVED_LOOKUP.get(value.to_lowercase().as_str()) {
        Some(kind) => *kind,
        None => TokenKind::Name,
    };

    lexer.push_spanning(kind, value);
    Ok(())
}

/// Splits `source` into tokens, always ending with a single `EndOfInput` token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(lex.remainder()) {
                (pattern.handler)(&mut lex, &pattern.regex)?;
                matched = true;
                break;
            }
        }

        if !matched {
            return Err(lex.unrecognised());
        }
    }

    let end = lex.position();
    lex.push(MK_TOKEN!(
        TokenKind::EndOfInput,
        String::new(),
        Span { start: end, end }
    ));
    Ok(lex.tokens)
}
