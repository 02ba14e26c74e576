use crate::Span;

use super::ast::Expr;

/// A bare expression terminated by `;`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

/// `let name = value;` introduces a new binding.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationStmt {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

/// `name = value;` rebinds a name.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}
