//! Parser module for building the expression tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into an [`Expr`](crate::ast::ast::Expr). It uses precedence climbing
//! over lookup tables and handles:
//!
//! - Binary operators across six precedence tiers
//! - Prefix negation and parenthesised groups
//! - Atoms with `.field` and `[index]` chains
//! - Function calls and their parameter lists
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;

#[cfg(test)]
mod tests;
