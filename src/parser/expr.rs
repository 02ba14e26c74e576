use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryOperator, UnaryOperator},
    },
    errors::errors::{Diagnostic, DiagnosticKind},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

fn expected_expression(parser: &Parser) -> Diagnostic {
    let token = parser.current_token();
    Diagnostic::new(
        DiagnosticKind::ExpectedExpression { found: token.kind },
        token.span,
    )
}

/// Parses an expression whose operators bind tighter than `bp`.
///
/// Each call is one level of nesting, checked against the parser's depth
/// ceiling before anything is consumed.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Diagnostic> {
    parser.enter()?;
    let result = parse_nested_expr(parser, bp);
    parser.leave();

    result
}

fn parse_nested_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Diagnostic> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(expected_expression(parser));
    };

    let mut left = nud(parser)?;

    // While the current token binds tighter than `bp`, keep extending the lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = match parser.get_bp_lookup().get(&token_kind) {
            Some(next_bp) if *next_bp > bp => *next_bp,
            _ => break,
        };
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            break;
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let token = parser.current_token();

    match token.kind {
        // `[0-9]+` always parses; overflow comes back as infinity
        TokenKind::Number => match token.value.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                parser.advance();
                Ok(Expr::number(value, token.span))
            }
            _ => Err(Diagnostic::new(
                DiagnosticKind::NumberParseError {
                    token: token.value.clone(),
                },
                token.span,
            )),
        },
        TokenKind::Identifier => {
            parser.advance();
            Ok(Expr::identifier(token.value.clone(), token.span))
        }
        _ => Err(expected_expression(parser)),
    }
}

/// Parses the right operand at the operator's own binding power, which
/// makes operators of equal power group to the left.
pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Diagnostic> {
    let operator_token = parser.advance();
    let Some(operator) = BinaryOperator::from_token(operator_token.kind) else {
        return Err(Diagnostic::new(
            DiagnosticKind::ExpectedExpression {
                found: operator_token.kind,
            },
            operator_token.span,
        ));
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::binary(operator, left, right))
}

/// `-` and `!` take an operand at unary power, so `-1 * 2` is `(-1) * 2`
/// and `--1` is `-(-1)`.
pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let operator_token = parser.advance();
    let Some(operator) = UnaryOperator::from_token(operator_token.kind) else {
        return Err(Diagnostic::new(
            DiagnosticKind::ExpectedExpression {
                found: operator_token.kind,
            },
            operator_token.span,
        ));
    };

    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::unary(operator, operator_token.span, operand))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::RParen)?;

    Ok(expr)
}
