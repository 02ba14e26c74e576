//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! Expressions are parsed with NUD/LED handlers and binding powers,
//! statements by dispatch on the leading token.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    ast::ast::Program,
    config::limits::DEFAULT_MAX_DEPTH,
    errors::errors::{Diagnostic, DiagnosticKind},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
///
/// The token slice is borrowed read-only and always ends with exactly one
/// `EndOfInput` token; the cursor never moves past it.
pub struct Parser<'t> {
    /// The tokens to parse
    tokens: &'t [Token],
    /// Index of the current token
    pos: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for infix binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Expressions currently being parsed, innermost included
    depth: usize,
    max_depth: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token], max_depth: usize) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
            max_depth,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &'t Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Kind of the token `n` places after the current one.
    ///
    /// Only the statement dispatcher looks further than the current token.
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|token| token.kind)
            .unwrap_or(TokenKind::EndOfInput)
    }

    /// Advances to the next token and returns the previous token.
    ///
    /// At `EndOfInput` the cursor stays put.
    pub fn advance(&mut self) -> &'t Token {
        let token = self.current_token();
        if token.kind != TokenKind::EndOfInput {
            self.pos += 1;
        }
        token
    }

    /// Consumes the current token if it is of the expected kind.
    ///
    /// # Returns
    ///
    /// The consumed token, or an `UnexpectedToken` diagnostic at the
    /// current token.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<&'t Token, Diagnostic> {
        let token = self.current_token();
        if token.kind != expected_kind {
            Err(Diagnostic::new(
                DiagnosticKind::UnexpectedToken {
                    expected: expected_kind,
                    found: token.kind,
                },
                token.span,
            ))
        } else {
            Ok(self.advance())
        }
    }

    /// Enters one more level of expression nesting.
    ///
    /// Fails with `NestingTooDeep` at the current token once `max_depth`
    /// levels are open. Every successful call is paired with `leave`.
    pub fn enter(&mut self) -> Result<(), Diagnostic> {
        if self.depth >= self.max_depth {
            return Err(Diagnostic::new(
                DiagnosticKind::NestingTooDeep {
                    limit: self.max_depth,
                },
                self.current_token().span,
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EndOfInput
    }

    /// Skips tokens up to and including the next `;`, or up to the end of input.
    pub fn synchronize(&mut self) {
        let start = self.pos;

        loop {
            match self.current_token_kind() {
                TokenKind::EndOfInput => break,
                TokenKind::Semicolon => {
                    self.advance();
                    break;
                }
                _ => {
                    self.advance();
                }
            }
        }

        trace!("recovery skipped {} tokens", self.pos - start);
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix handlers do not get a binding power: a token that is both
    /// prefix and infix (`-`) keeps its infix power.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the current position in the source.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start
    }
}

/// Parses a token sequence into a `Program`.
///
/// This is the main entry point for parsing. Statements that fail to parse
/// are reported and skipped up to the next `;`; everything else ends up in
/// the returned program, in source order.
///
/// Only a sequence without an `EndOfInput` token stops parsing outright: an
/// empty program and a fatal `MissingEndOfInput` diagnostic are returned.
/// Tokens after the first `EndOfInput` are ignored. Expressions may nest
/// `DEFAULT_MAX_DEPTH` levels deep, see `parse_with_depth`.
pub fn parse(tokens: &[Token]) -> (Program, Vec<Diagnostic>) {
    parse_with_depth(tokens, DEFAULT_MAX_DEPTH)
}

/// Like `parse`, with expression nesting capped at `max_depth` levels.
///
/// A statement nesting deeper is reported as `NestingTooDeep` and skipped
/// like any other malformed statement.
pub fn parse_with_depth(tokens: &[Token], max_depth: usize) -> (Program, Vec<Diagnostic>) {
    let Some(end) = tokens
        .iter()
        .position(|token| token.kind == TokenKind::EndOfInput)
    else {
        let position = tokens
            .last()
            .map(|token| token.span.end)
            .unwrap_or_else(Position::start);
        debug!("refusing to parse {} tokens with no end of input", tokens.len());
        return (
            Program::empty(),
            vec![Diagnostic::at(DiagnosticKind::MissingEndOfInput, position)],
        );
    };

    let mut parser = Parser::new(&tokens[..=end], max_depth);
    create_token_lookups(&mut parser);

    let mut body = vec![];
    let mut diagnostics = vec![];

    while parser.has_tokens() {
        match parse_stmt(&mut parser) {
            Ok(stmt) => body.push(stmt),
            Err(diagnostic) => {
                diagnostics.push(diagnostic);
                parser.synchronize();
            }
        }
    }

    debug!(
        "parsed {} statements with {} diagnostics",
        body.len(),
        diagnostics.len()
    );

    let span = Span::new(Position::start(), parser.current_token().span.end);
    (Program::new(body, span), diagnostics)
}
