#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    ast::ast::Program,
    config::FrontendLimits,
    errors::errors::Diagnostic,
    lexer::{lexer::tokenize, tokens::Token},
    parser::parser::parse_with_depth,
};

pub mod ast;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A location in the source buffer.
///
/// `offset` is a byte offset, `line` and `column` are 1-based and count
/// characters rather than bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn start() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// A zero-width span, used for `EndOfInput`.
    pub fn point(position: Position) -> Self {
        Span {
            start: position,
            end: position,
        }
    }

    pub fn len(&self) -> usize {
        (self.end.offset - self.start.offset) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Runs from the start of `self` to the end of `other`, which must not
    /// come before `self`.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start,
            end: other.end,
        }
    }
}

/// Finds the line containing byte offset `position`.
///
/// Returns the 1-based line number, the line text (including its newline)
/// and the byte offset of `position` within that line. An offset equal to the
/// source length resolves to the last line, so end-of-input diagnostics can
/// still be shown.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;
    let mut last = (1, String::new(), 0);

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        last = (line_number, line.to_string(), pos - start);
        start = end;
        line_number += 1;
    }

    // End of input: either past a trailing newline or at the end of the last line.
    if content.ends_with('\n') || content.is_empty() {
        Some((line_number, String::new(), 0))
    } else {
        Some(last)
    }
}

/// Everything one front end run produced.
#[derive(Debug, Clone)]
pub struct FrontendOutput {
    /// Empty when a ceiling stopped the run before parsing.
    pub tokens: Vec<Token>,
    pub program: Program,
    /// Lexical diagnostics first, then syntactic ones.
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs the whole front end over `source`, applying `limits` first.
///
/// When the source or token ceiling is exceeded, no tokens are kept, the
/// program is empty and the last diagnostic is the fatal one describing
/// the limit. Expression nesting is capped at `limits.max_depth`.
pub fn run_frontend(source: &str, limits: &FrontendLimits) -> FrontendOutput {
    if let Err(diagnostic) = limits.check_source(source) {
        return FrontendOutput {
            tokens: vec![],
            program: Program::empty(),
            diagnostics: vec![diagnostic],
        };
    }

    let (tokens, mut diagnostics) = tokenize(source).into_parts();

    if let Err(diagnostic) = limits.check_tokens(&tokens) {
        diagnostics.push(diagnostic);
        return FrontendOutput {
            tokens: vec![],
            program: Program::empty(),
            diagnostics,
        };
    }

    let (program, parse_diagnostics) = parse_with_depth(&tokens, limits.max_depth);
    diagnostics.extend(parse_diagnostics);

    FrontendOutput {
        tokens,
        program,
        diagnostics,
    }
}

/// `run_frontend` without the tokens.
pub fn parse_source(source: &str, limits: &FrontendLimits) -> (Program, Vec<Diagnostic>) {
    let output = run_frontend(source, limits);
    (output.program, output.diagnostics)
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at_position() {
        let content = "Hello, world!\nlet x = 1;\n\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(content, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(content, 34).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_at_end_of_input() {
        let (line_number, line, line_pos) = super::get_line_at_position("1 +", 3).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "1 +");
        assert_eq!(line_pos, 3);

        let (line_number, line, _) = super::get_line_at_position("1;\n", 3).unwrap();
        assert_eq!(line_number, 2);
        assert_eq!(line, "");

        assert!(super::get_line_at_position("abc", 10).is_none());
    }

    #[test]
    fn test_span_helpers() {
        let start = super::Position::start();
        let end = super::Position {
            offset: 4,
            line: 1,
            column: 5,
        };
        let span = super::Span::new(start, end);

        assert_eq!(span.len(), 4);
        assert!(!span.is_empty());
        assert!(super::Span::point(end).is_empty());
        assert_eq!(end.to_string(), "1:5");
    }
}
