use std::fmt::{Display, Write};

use crate::{Position, Span};

use super::{
    expressions::{BinaryExpr, BinaryOperator, IdentifierExpr, NumberExpr, UnaryExpr, UnaryOperator},
    statements::{AssignmentStmt, DeclarationStmt, ExpressionStmt},
};

/// Root of a parsed source unit. Statements are kept in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl Program {
    pub fn new(statements: Vec<Stmt>, span: Span) -> Self {
        Program { statements, span }
    }

    pub fn empty() -> Self {
        Program {
            statements: vec![],
            span: Span::point(Position::start()),
        }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.statements.iter()
    }

    /// Indented tree dump, one node per line.
    pub fn pretty(&self) -> String {
        let mut out = String::from("Program\n");
        for stmt in &self.statements {
            pretty_stmt(&mut out, stmt, 1);
        }
        out
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.statements {
            writeln!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    Declaration(DeclarationStmt),
    Assignment(AssignmentStmt),
}

impl Stmt {
    pub fn expression(expression: Expr, span: Span) -> Self {
        Stmt::Expression(ExpressionStmt { expression, span })
    }

    pub fn declaration(name: String, value: Expr, span: Span) -> Self {
        Stmt::Declaration(DeclarationStmt { name, value, span })
    }

    pub fn assignment(name: String, value: Expr, span: Span) -> Self {
        Stmt::Assignment(AssignmentStmt { name, value, span })
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::Declaration(stmt) => &stmt.span,
            Stmt::Assignment(stmt) => &stmt.span,
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::Expression(stmt) => write!(f, "{};", stmt.expression),
            Stmt::Declaration(stmt) => write!(f, "let {} = {};", stmt.name, stmt.value),
            Stmt::Assignment(stmt) => write!(f, "{} = {};", stmt.name, stmt.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(NumberExpr),
    Identifier(IdentifierExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
}

impl Expr {
    pub fn number(value: f64, span: Span) -> Self {
        Expr::Number(NumberExpr { value, span })
    }

    pub fn identifier(name: String, span: Span) -> Self {
        Expr::Identifier(IdentifierExpr { name, span })
    }

    /// The span runs from the start of `left` to the end of `right`.
    pub fn binary(operator: BinaryOperator, left: Expr, right: Expr) -> Self {
        let span = left.get_span().to(right.get_span());
        Expr::Binary(BinaryExpr {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            span,
        })
    }

    /// `operator_span` is the span of the prefix operator token.
    pub fn unary(operator: UnaryOperator, operator_span: Span, operand: Expr) -> Self {
        let span = operator_span.to(operand.get_span());
        Expr::Unary(UnaryExpr {
            operator,
            operand: Box::new(operand),
            span,
        })
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Number(expr) => &expr.span,
            Expr::Identifier(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Unary(expr) => &expr.span,
        }
    }
}

/// Fully parenthesized prefix form: `1 + 2 * 3` renders as `(+ 1 (* 2 3))`.
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Number(expr) => write!(f, "{}", expr.value),
            Expr::Identifier(expr) => write!(f, "{}", expr.name),
            Expr::Binary(expr) => write!(f, "({} {} {})", expr.operator, expr.left, expr.right),
            Expr::Unary(expr) => write!(f, "({} {})", expr.operator, expr.operand),
        }
    }
}

fn indent(out: &mut String, level: usize) {
    out.push_str(&"  ".repeat(level));
}

fn pretty_stmt(out: &mut String, stmt: &Stmt, level: usize) {
    indent(out, level);
    match stmt {
        Stmt::Expression(stmt) => {
            out.push_str("ExpressionStatement\n");
            pretty_expr(out, &stmt.expression, level + 1);
        }
        Stmt::Declaration(stmt) => {
            let _ = writeln!(out, "Declaration {}", stmt.name);
            pretty_expr(out, &stmt.value, level + 1);
        }
        Stmt::Assignment(stmt) => {
            let _ = writeln!(out, "Assignment {}", stmt.name);
            pretty_expr(out, &stmt.value, level + 1);
        }
    }
}

fn pretty_expr(out: &mut String, expr: &Expr, level: usize) {
    indent(out, level);
    match expr {
        Expr::Number(expr) => {
            let _ = writeln!(out, "NumberLiteral {}", expr.value);
        }
        Expr::Identifier(expr) => {
            let _ = writeln!(out, "Identifier {}", expr.name);
        }
        Expr::Binary(expr) => {
            let _ = writeln!(out, "BinaryExpr {}", expr.operator);
            pretty_expr(out, &expr.left, level + 1);
            pretty_expr(out, &expr.right, level + 1);
        }
        Expr::Unary(expr) => {
            let _ = writeln!(out, "UnaryExpr {}", expr.operator);
            pretty_expr(out, &expr.operand, level + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: u32, end: u32) -> Span {
        Span::new(
            Position {
                offset: start,
                line: 1,
                column: start + 1,
            },
            Position {
                offset: end,
                line: 1,
                column: end + 1,
            },
        )
    }

    #[test]
    fn test_binary_span_covers_operands() {
        let expr = Expr::binary(
            BinaryOperator::Add,
            Expr::number(1.0, span(0, 1)),
            Expr::identifier(String::from("x"), span(4, 5)),
        );

        assert_eq!(expr.get_span(), &span(0, 5));
        assert_eq!(expr.to_string(), "(+ 1 x)");
    }

    #[test]
    fn test_unary_span_starts_at_operator() {
        let expr = Expr::unary(UnaryOperator::Not, span(0, 1), Expr::number(0.0, span(1, 2)));

        assert_eq!(expr.get_span(), &span(0, 2));
        assert_eq!(expr.to_string(), "(! 0)");
    }

    #[test]
    fn test_program_pretty() {
        let value = Expr::unary(
            UnaryOperator::Negate,
            span(8, 9),
            Expr::number(5.0, span(9, 10)),
        );
        let program = Program::new(
            vec![Stmt::declaration(String::from("x"), value, span(0, 11))],
            span(0, 11),
        );

        assert_eq!(program.to_string(), "let x = (- 5);\n");
        assert_eq!(
            program.pretty(),
            "Program\n  Declaration x\n    UnaryExpr -\n      NumberLiteral 5\n"
        );
    }
}
