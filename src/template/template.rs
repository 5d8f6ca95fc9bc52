use log::{debug, trace};

use crate::{ast::ast::Expr, errors::errors::Error, parse_expression, ParseOptions};

use super::scanner::{Scanner, TemplateToken};

/// A template split into literal text and parsed expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Text(String),
    Expression {
        /// The expression source as written in the template, without `@` or the
        /// surrounding `@(`/`)`
        source: String,
        expr: Expr,
    },
}

/// Splits `template` and parses every identifier and expression in it.
///
/// When `top_levels` is given only identifiers starting with one of those names
/// are treated as expressions, so `bob@nyaruka.com` stays text. Adjacent text is
/// merged. Error positions are relative to the failing expression's source.
pub fn parse_template(
    template: &str,
    top_levels: Option<&[&str]>,
    options: &ParseOptions,
) -> Result<Vec<TemplatePart>, Error> {
    let scanner = match top_levels {
        Some(names) => Scanner::new(template).with_top_levels(names),
        None => Scanner::new(template),
    };

    let mut parts: Vec<TemplatePart> = vec![];

    for token in scanner {
        trace!("scanned {}", token);

        match token {
            TemplateToken::Body(text) => match parts.last_mut() {
                Some(TemplatePart::Text(previous)) => previous.push_str(&text),
                _ => parts.push(TemplatePart::Text(text)),
            },
            TemplateToken::Identifier(source) | TemplateToken::Expression(source) => {
                let expr = parse_expression(&source, options)?;
                parts.push(TemplatePart::Expression { source, expr });
            }
        }
    }

    debug!(
        "split template into {} parts ({} expressions)",
        parts.len(),
        parts
            .iter()
            .filter(|part| matches!(part, TemplatePart::Expression { .. }))
            .count()
    );

    Ok(parts)
}
