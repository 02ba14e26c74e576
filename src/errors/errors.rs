use std::fmt::Display;

use thiserror::Error;

use crate::{get_line_at_position, lexer::tokens::TokenKind, Position, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Recoverable; lexing or parsing carried on past it.
    Error,
    /// Nothing further could be done with the input.
    Fatal,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// A reported problem with its position in the source.
///
/// Diagnostics are collected by the lexer and the parser instead of aborting,
/// so a single run can report several independent problems.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    internal_error: DiagnosticKind,
    severity: Severity,
    span: Span,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span) -> Self {
        let severity = match &kind {
            DiagnosticKind::MissingEndOfInput
            | DiagnosticKind::SourceTooLarge { .. }
            | DiagnosticKind::TooManyTokens { .. } => Severity::Fatal,
            _ => Severity::Error,
        };

        Diagnostic {
            internal_error: kind,
            severity,
            span,
        }
    }

    pub fn at(kind: DiagnosticKind, position: Position) -> Self {
        Diagnostic::new(kind, Span::point(position))
    }

    pub fn kind(&self) -> &DiagnosticKind {
        &self.internal_error
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }

    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn get_position(&self) -> &Position {
        &self.span.start
    }

    pub fn line(&self) -> u32 {
        self.span.start.line
    }

    pub fn column(&self) -> u32 {
        self.span.start.column
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            DiagnosticKind::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            DiagnosticKind::UnexpectedToken { .. } => "UnexpectedToken",
            DiagnosticKind::ExpectedExpression { .. } => "ExpectedExpression",
            DiagnosticKind::NumberParseError { .. } => "NumberParseError",
            DiagnosticKind::MissingEndOfInput => "MissingEndOfInput",
            DiagnosticKind::SourceTooLarge { .. } => "SourceTooLarge",
            DiagnosticKind::TooManyTokens { .. } => "TooManyTokens",
            DiagnosticKind::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            DiagnosticKind::UnexpectedCharacter { .. } => ErrorTip::None,
            DiagnosticKind::UnexpectedToken {
                expected: TokenKind::Semicolon,
                ..
            } => ErrorTip::Suggestion(String::from("did you miss a semicolon?")),
            DiagnosticKind::UnexpectedToken {
                expected: TokenKind::RParen,
                ..
            } => ErrorTip::Suggestion(String::from("unbalanced parentheses")),
            DiagnosticKind::UnexpectedToken { expected, .. } => {
                ErrorTip::Suggestion(format!("insert {} here", expected))
            }
            DiagnosticKind::ExpectedExpression { .. } => ErrorTip::Suggestion(String::from(
                "expected a number, a name, `-`, `!` or `(`",
            )),
            DiagnosticKind::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "`{}` does not fit in a 64-bit float",
                token
            )),
            DiagnosticKind::MissingEndOfInput => ErrorTip::None,
            DiagnosticKind::SourceTooLarge { limit, .. } => ErrorTip::Suggestion(format!(
                "raise PCL_MAX_SOURCE_BYTES above {} to accept this input",
                limit
            )),
            DiagnosticKind::TooManyTokens { limit, .. } => ErrorTip::Suggestion(format!(
                "raise PCL_MAX_TOKENS above {} to accept this input",
                limit
            )),
            DiagnosticKind::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "split the expression or raise PCL_MAX_DEPTH above {}",
                limit
            )),
        }
    }

    /// Renders the diagnostic against the source it was produced from.
    ///
    /// ```text
    /// error: expected `;`, found end of input
    /// -> main.pcl:1:10 (did you miss a semicolon?)
    ///   |
    /// 1 | let a = 1
    ///   | ---------^
    /// ```
    pub fn render(&self, source: &str, file: &str) -> String {
        let mut out = String::new();

        out.push_str(&format!("{}: {}\n", self.severity, self.message()));
        if let ErrorTip::None = self.get_tip() {
            out.push_str(&format!("-> {}:{}\n", file, self.span.start));
        } else {
            out.push_str(&format!("-> {}:{} ({})\n", file, self.span.start, self.get_tip()));
        }

        let Some((line, line_text, line_pos)) = get_line_at_position(source, self.span.start.offset)
        else {
            return out;
        };

        let line_str = line.to_string();
        let padding = line_str.len() + 2;

        out.push_str(&format!("{:>padding$}\n", "|"));

        let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
        out.push_str(&format!("{} | {}\n", line_str, line_text_removed.trim_end()));

        // Columns count characters, the line position is in bytes.
        let column = line_text
            .get(..line_pos)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(line_pos);
        let arrows = column.saturating_sub(removed_whitespace) + 1;

        out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
        out
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}: {}",
            self.severity, self.span.start, self.internal_error
        )
    }
}

impl std::error::Error for Diagnostic {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    #[error("unexpected character `{character}`")]
    UnexpectedCharacter { character: char },
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: TokenKind, found: TokenKind },
    #[error("expected an expression, found {found}")]
    ExpectedExpression { found: TokenKind },
    #[error("number literal out of range")]
    NumberParseError { token: String },
    #[error("token sequence is not terminated by end of input")]
    MissingEndOfInput,
    #[error("source is {size} bytes, the limit is {limit}")]
    SourceTooLarge { size: usize, limit: usize },
    #[error("source produced {count} tokens, the limit is {limit}")]
    TooManyTokens { count: usize, limit: usize },
    #[error("expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
