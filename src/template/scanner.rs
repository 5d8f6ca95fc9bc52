use std::fmt::Display;

/// A piece of a template, as split by the [`Scanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    /// Literal text, `@@` already collapsed unless escapes are kept
    Body(String),
    /// `contact.age` in `@contact.age`
    Identifier(String),
    /// `1 + 2` in `@(1 + 2)`
    Expression(String),
}

impl Display for TemplateToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateToken::Body(text) => write!(f, "Body({:?})", text),
            TemplateToken::Identifier(text) => write!(f, "Identifier({:?})", text),
            TemplateToken::Expression(text) => write!(f, "Expression({:?})", text),
        }
    }
}

pub fn is_name_char(c: char) -> bool {
    c.is_alphabetic() || c.is_numeric() || c == '_'
}

/// Splits a template into body text, `@identifier`s and `@(expression)`s.
#[derive(Debug, Clone)]
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    /// Lowercased allowed top-level names. `None` allows any.
    top_levels: Option<Vec<String>>,
    unescape_body: bool,
}

impl Scanner {
    pub fn new(template: &str) -> Scanner {
        Scanner {
            chars: template.chars().collect(),
            pos: 0,
            top_levels: None,
            unescape_body: true,
        }
    }

    /// Only treat `@name...` as an identifier when `name` is one of `top_levels`,
    /// compared case-insensitively.
    pub fn with_top_levels<I, S>(mut self, top_levels: I) -> Scanner
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.top_levels = Some(
            top_levels
                .into_iter()
                .map(|name| name.as_ref().to_lowercase())
                .collect(),
        );
        self
    }

    /// Whether `@@` in body text becomes `@` (the default) or is kept as is.
    pub fn unescape_body(mut self, unescape: bool) -> Scanner {
        self.unescape_body = unescape;
        self
    }

    fn at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    // Cursor sits just past `@(`
    fn scan_expression(&mut self) -> TemplateToken {
        let mut buf = String::new();
        let mut parens = 1;

        while let Some(c) = self.at(0) {
            self.pos += 1;

            match c {
                '"' => {
                    buf.push(c);
                    self.read_text_literal(&mut buf);
                }
                '(' => {
                    buf.push(c);
                    parens += 1;
                }
                ')' => {
                    parens -= 1;
                    if parens == 0 {
                        return TemplateToken::Expression(buf);
                    }
                    buf.push(c);
                }
                _ => buf.push(c),
            }
        }

        TemplateToken::Body(format!("@({}", buf))
    }

    // Remainder of a quoted literal, closing quote included
    fn read_text_literal(&mut self, buf: &mut String) {
        let mut escaped = false;

        while let Some(c) = self.at(0) {
            self.pos += 1;
            buf.push(c);

            if c == '"' && !escaped {
                break;
            }
            escaped = c == '\\' && !escaped;
        }
    }

    // Cursor sits just past `@`
    fn scan_identifier(&mut self) -> TemplateToken {
        let mut identifier = String::new();
        let mut top_level: Option<String> = None;

        while let Some(c) = self.at(0) {
            if c == '.' {
                // A period only continues the identifier when a name char follows
                match self.at(1) {
                    Some(next) if is_name_char(next) => {
                        if top_level.is_none() {
                            top_level = Some(identifier.clone());
                        }
                        identifier.push(c);
                        identifier.push(next);
                        self.pos += 2;
                    }
                    _ => break,
                }
            } else if is_name_char(c) {
                identifier.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }

        let top_level = top_level.unwrap_or_else(|| identifier.clone()).to_lowercase();

        match &self.top_levels {
            Some(allowed) if !allowed.contains(&top_level) => {
                TemplateToken::Body(format!("@{}", identifier))
            }
            _ => TemplateToken::Identifier(identifier),
        }
    }

    // Runs until the start of an identifier or expression, or the end of input
    fn scan_body(&mut self) -> TemplateToken {
        let mut buf = String::new();

        while let Some(c) = self.at(0) {
            if c != '@' {
                buf.push(c);
                self.pos += 1;
                continue;
            }

            match self.at(1) {
                Some('(') => break,
                Some(next) if is_name_char(next) => break,
                Some('@') => {
                    buf.push('@');
                    if !self.unescape_body {
                        buf.push('@');
                    }
                    self.pos += 2;
                }
                Some(next) => {
                    buf.push('@');
                    buf.push(next);
                    self.pos += 2;
                }
                None => {
                    buf.push('@');
                    self.pos += 1;
                }
            }
        }

        TemplateToken::Body(buf)
    }
}

impl Iterator for Scanner {
    type Item = TemplateToken;

    fn next(&mut self) -> Option<TemplateToken> {
        if self.at_eof() {
            return None;
        }

        if self.at(0) == Some('@') {
            match self.at(1) {
                Some('(') => {
                    self.pos += 2;
                    return Some(self.scan_expression());
                }
                Some(next) if is_name_char(next) => {
                    self.pos += 1;
                    return Some(self.scan_identifier());
                }
                _ => {}
            }
        }

        Some(self.scan_body())
    }
}
