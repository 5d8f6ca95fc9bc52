use std::fmt::Display;

use super::ast::{BinaryOperator, Expr};

// CONSTRUCTION

impl Expr {
    pub fn context_reference(name: impl Into<String>) -> Expr {
        Expr::ContextReference(name.into())
    }

    pub fn string(raw: impl Into<String>) -> Expr {
        Expr::StringLiteral(raw.into())
    }

    pub fn decimal(raw: impl Into<String>) -> Expr {
        Expr::DecimalLiteral(raw.into())
    }

    pub fn function_call(name: impl Into<String>, arguments: Vec<Expr>) -> Expr {
        Expr::FunctionCall {
            name: name.into(),
            arguments,
        }
    }

    pub fn dot_lookup(left: Expr, field: impl Into<String>) -> Expr {
        Expr::DotLookup {
            left: Box::new(left),
            field: field.into(),
        }
    }

    pub fn array_lookup(left: Expr, index: Expr) -> Expr {
        Expr::ArrayLookup {
            left: Box::new(left),
            index: Box::new(index),
        }
    }

    pub fn negation(operand: Expr) -> Expr {
        Expr::Negation(Box::new(operand))
    }

    pub fn parentheses(inner: Expr) -> Expr {
        Expr::Parentheses(Box::new(inner))
    }

    pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Expr {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Nodes in the tree, this one included.
    pub fn node_count(&self) -> usize {
        1 + match self {
            Expr::ContextReference(_)
            | Expr::StringLiteral(_)
            | Expr::DecimalLiteral(_)
            | Expr::BooleanLiteral(_)
            | Expr::NullLiteral => 0,
            Expr::FunctionCall { arguments, .. } => arguments.iter().map(Expr::node_count).sum(),
            Expr::DotLookup { left, .. } => left.node_count(),
            Expr::ArrayLookup { left, index } => left.node_count() + index.node_count(),
            Expr::Negation(operand) | Expr::Parentheses(operand) => operand.node_count(),
            Expr::BinaryOp { left, right, .. } => left.node_count() + right.node_count(),
        }
    }
}

// RENDERING

/// Renders the expression back to source. Literals keep their raw spelling and
/// parentheses appear only where a `Parentheses` node exists.
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::ContextReference(name) => write!(f, "{}", name),
            Expr::StringLiteral(raw) | Expr::DecimalLiteral(raw) => write!(f, "{}", raw),
            Expr::BooleanLiteral(value) => write!(f, "{}", value),
            Expr::NullLiteral => write!(f, "null"),
            Expr::FunctionCall { name, arguments } => {
                write!(f, "{}(", name)?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                write!(f, ")")
            }
            Expr::DotLookup { left, field } => write!(f, "{}.{}", left, field),
            Expr::ArrayLookup { left, index } => write!(f, "{}[{}]", left, index),
            Expr::Negation(operand) => write!(f, "-{}", operand),
            Expr::Parentheses(inner) => write!(f, "({})", inner),
            Expr::BinaryOp { op, left, right } => {
                write!(f, "{} {} {}", left, op.symbol(), right)
            }
        }
    }
}
