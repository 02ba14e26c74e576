//! Unit tests for diagnostics.
//!
//! This module contains tests for diagnostic construction, naming, tips and
//! rendering.

use crate::errors::errors::{Diagnostic, DiagnosticKind, ErrorTip, Severity};
use crate::lexer::tokens::TokenKind;
use crate::{Position, Span};

fn position(offset: u32, line: u32, column: u32) -> Position {
    Position {
        offset,
        line,
        column,
    }
}

#[test]
fn test_diagnostic_creation() {
    let diagnostic = Diagnostic::at(
        DiagnosticKind::UnexpectedCharacter { character: '@' },
        position(10, 2, 4),
    );

    assert_eq!(diagnostic.get_error_name(), "UnexpectedCharacter");
    assert_eq!(diagnostic.severity(), Severity::Error);
    assert_eq!(diagnostic.message(), "unexpected character `@`");
    assert_eq!(diagnostic.line(), 2);
    assert_eq!(diagnostic.column(), 4);
    assert_eq!(diagnostic.get_position().offset, 10);
}

#[test]
fn test_unexpected_token_message() {
    let diagnostic = Diagnostic::at(
        DiagnosticKind::UnexpectedToken {
            expected: TokenKind::RParen,
            found: TokenKind::EndOfInput,
        },
        Position::start(),
    );

    assert_eq!(diagnostic.get_error_name(), "UnexpectedToken");
    assert_eq!(diagnostic.message(), "expected `)`, found end of input");
    assert_eq!(
        diagnostic.to_string(),
        "error at 1:1: expected `)`, found end of input"
    );
}

#[test]
fn test_fatal_kinds() {
    for kind in [
        DiagnosticKind::MissingEndOfInput,
        DiagnosticKind::SourceTooLarge { size: 10, limit: 5 },
        DiagnosticKind::TooManyTokens { count: 10, limit: 5 },
    ] {
        assert!(Diagnostic::at(kind, Position::start()).is_fatal());
    }

    let diagnostic = Diagnostic::at(
        DiagnosticKind::ExpectedExpression {
            found: TokenKind::Semicolon,
        },
        Position::start(),
    );
    assert!(!diagnostic.is_fatal());
}

#[test]
fn test_error_tip_none() {
    let diagnostic = Diagnostic::at(
        DiagnosticKind::UnexpectedCharacter { character: '@' },
        Position::start(),
    );

    assert!(matches!(diagnostic.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let diagnostic = Diagnostic::at(
        DiagnosticKind::UnexpectedToken {
            expected: TokenKind::Semicolon,
            found: TokenKind::Let,
        },
        Position::start(),
    );

    match diagnostic.get_tip() {
        ErrorTip::Suggestion(tip) => assert_eq!(tip, "did you miss a semicolon?"),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_render_points_at_column() {
    let source = "let a = 1;\n  let b = #;\n";
    let diagnostic = Diagnostic::new(
        DiagnosticKind::UnexpectedCharacter { character: '#' },
        Span::new(position(21, 2, 11), position(22, 2, 12)),
    );

    let rendered = diagnostic.render(source, "main.pcl");

    assert_eq!(
        rendered,
        "error: unexpected character `#`\n\
         -> main.pcl:2:11\n  \
         |\n\
         2 | let b = #;\n  \
         | --------^\n"
    );
}

#[test]
fn test_render_at_end_of_input() {
    let source = "x + 1";
    let diagnostic = Diagnostic::at(
        DiagnosticKind::UnexpectedToken {
            expected: TokenKind::Semicolon,
            found: TokenKind::EndOfInput,
        },
        position(5, 1, 6),
    );

    let rendered = diagnostic.render(source, "shell");

    assert!(rendered.starts_with("error: expected `;`, found end of input\n"));
    assert!(rendered.contains("-> shell:1:6 (did you miss a semicolon?)"));
    assert!(rendered.ends_with("1 | x + 1\n  | -----^\n"));
}

#[test]
fn test_nesting_too_deep_is_recoverable() {
    let diagnostic = Diagnostic::at(
        DiagnosticKind::NestingTooDeep { limit: 256 },
        position(256, 1, 257),
    );

    assert!(!diagnostic.is_fatal());
    assert_eq!(diagnostic.get_error_name(), "NestingTooDeep");
    assert_eq!(
        diagnostic.message(),
        "expression nested deeper than 256 levels"
    );
    match diagnostic.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("PCL_MAX_DEPTH")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_number_parse_error_message() {
    let diagnostic = Diagnostic::at(
        DiagnosticKind::NumberParseError {
            token: String::from("1e999"),
        },
        Position::start(),
    );

    assert_eq!(diagnostic.message(), "number literal out of range");
    assert_eq!(
        diagnostic.get_tip().to_string(),
        "`1e999` does not fit in a 64-bit float"
    );
}
