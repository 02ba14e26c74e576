use crate::{
    ast::ast::Stmt,
    errors::errors::Diagnostic,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

/// Dispatches on the leading token: a registered statement keyword, then
/// `name =` (the only place that looks two tokens ahead), then a bare
/// expression.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();
    if let Some(handler) = handler {
        return handler(parser);
    }

    if parser.current_token_kind() == TokenKind::Identifier
        && parser.peek_kind(1) == TokenKind::Equals
    {
        return parse_assignment_stmt(parser);
    }

    let expr = parse_expr(parser, BindingPower::Default)?;
    let semicolon = parser.expect(TokenKind::Semicolon)?;

    let span = expr.get_span().to(&semicolon.span);
    Ok(Stmt::expression(expr, span))
}

pub fn parse_declaration_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start_token = parser.advance();

    let name = parser.expect(TokenKind::Identifier)?.value.clone();
    parser.expect(TokenKind::Equals)?;
    let value = parse_expr(parser, BindingPower::Default)?;
    let semicolon = parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::declaration(
        name,
        value,
        start_token.span.to(&semicolon.span),
    ))
}

pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let name_token = parser.expect(TokenKind::Identifier)?;

    parser.expect(TokenKind::Equals)?;
    let value = parse_expr(parser, BindingPower::Default)?;
    let semicolon = parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::assignment(
        name_token.value.clone(),
        value,
        name_token.span.to(&semicolon.span),
    ))
}
