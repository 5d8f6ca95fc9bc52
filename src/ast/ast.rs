use crate::lexer::tokens::TokenKind;

/// Binary operators, one per infix token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Exponent,
    Times,
    Divide,
    Plus,
    Minus,
    Lte,
    Lt,
    Gte,
    Gt,
    Eq,
    Neq,
    Concat,
}

impl BinaryOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<BinaryOperator> {
        match kind {
            TokenKind::Exponent => Some(BinaryOperator::Exponent),
            TokenKind::Times => Some(BinaryOperator::Times),
            TokenKind::Divide => Some(BinaryOperator::Divide),
            TokenKind::Plus => Some(BinaryOperator::Plus),
            TokenKind::Minus => Some(BinaryOperator::Minus),
            TokenKind::Lte => Some(BinaryOperator::Lte),
            TokenKind::Lt => Some(BinaryOperator::Lt),
            TokenKind::Gte => Some(BinaryOperator::Gte),
            TokenKind::Gt => Some(BinaryOperator::Gt),
            TokenKind::Eq => Some(BinaryOperator::Eq),
            TokenKind::Neq => Some(BinaryOperator::Neq),
            TokenKind::Ampersand => Some(BinaryOperator::Concat),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Exponent => "^",
            BinaryOperator::Times => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Lte => "<=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Gte => ">=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Eq => "=",
            BinaryOperator::Neq => "!=",
            BinaryOperator::Concat => "&",
        }
    }
}

/// A parsed Excellent expression.
///
/// Every node owns its children, so a tree is dropped as a unit and can be
/// compared structurally with `==`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Bare name resolved against the evaluation context, e.g. `contact`
    ContextReference(String),
    /// Raw quoted literal, quotes and escapes included
    StringLiteral(String),
    /// Raw decimal literal such as `1.50`, kept as text to stay exact
    DecimalLiteral(String),
    BooleanLiteral(bool),
    NullLiteral,
    /// `name(args...)`. The name may also be spelled `true` or `false`.
    FunctionCall {
        name: String,
        arguments: Vec<Expr>,
    },
    /// `left.field`
    DotLookup {
        left: Box<Expr>,
        field: String,
    },
    /// `left[index]`
    ArrayLookup {
        left: Box<Expr>,
        index: Box<Expr>,
    },
    /// `-operand`
    Negation(Box<Expr>),
    /// `(inner)`, kept only so the source shape survives
    Parentheses(Box<Expr>),
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}
