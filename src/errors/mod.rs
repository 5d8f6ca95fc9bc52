//! Error types for tokenizing and parsing Excellent expressions.
//!
//! - Positioned errors wrapping a specific `ErrorImpl` variant
//! - Syntax errors carrying the offending token, the expected construct and
//!   the grammar production being parsed
//! - Error names and suggestions used when reporting to template authors

pub mod errors;
