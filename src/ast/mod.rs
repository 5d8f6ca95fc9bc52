/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the expression tree
///
/// Submodules:
/// - ast: The closed `Expr` node type and binary operators
/// - expressions: Construction helpers and rendering back to source
pub mod ast;
pub mod expressions;
