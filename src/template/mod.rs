//! Template scanning.
//!
//! Templates are plain text with embedded expressions:
//!
//! - `@contact.name` is an identifier, optionally limited to known top-level names
//! - `@(upper(contact.name))` is a full expression with balanced parentheses
//! - `@@` is a literal `@`

pub mod scanner;
pub mod template;
