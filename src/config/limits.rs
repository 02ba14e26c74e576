use std::env;

use crate::{
    errors::errors::{Diagnostic, DiagnosticKind},
    lexer::tokens::Token,
    Position,
};

/// Default ceiling on the source buffer (1 MiB).
pub const DEFAULT_MAX_SOURCE_BYTES: usize = 1024 * 1024;

/// Default ceiling on the token count, `EndOfInput` included.
pub const DEFAULT_MAX_TOKENS: usize = 100_000;

/// Default ceiling on expression nesting (prefix operators, groups and
/// operands of binary operators).
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Input ceilings checked before the lexer and the parser run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontendLimits {
    pub max_source_bytes: usize,
    pub max_tokens: usize,
    pub max_depth: usize,
}

impl Default for FrontendLimits {
    fn default() -> Self {
        Self {
            max_source_bytes: env::var("PCL_MAX_SOURCE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_SOURCE_BYTES),
            max_tokens: env::var("PCL_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_TOKENS),
            max_depth: env::var("PCL_MAX_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_DEPTH),
        }
    }
}

impl FrontendLimits {
    pub fn new(max_source_bytes: usize, max_tokens: usize) -> Self {
        Self {
            max_source_bytes,
            max_tokens,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }

    /// No ceilings on source size or token count. Nesting depth stays at
    /// `DEFAULT_MAX_DEPTH`, deeper input would exhaust the stack.
    pub fn unlimited() -> Self {
        Self::new(usize::MAX, usize::MAX)
    }

    pub fn check_source(&self, source: &str) -> Result<(), Diagnostic> {
        if source.len() > self.max_source_bytes {
            return Err(Diagnostic::at(
                DiagnosticKind::SourceTooLarge {
                    size: source.len(),
                    limit: self.max_source_bytes,
                },
                Position::start(),
            ));
        }

        Ok(())
    }

    /// Reported at the first token past the ceiling.
    pub fn check_tokens(&self, tokens: &[Token]) -> Result<(), Diagnostic> {
        if tokens.len() > self.max_tokens {
            let position = tokens
                .get(self.max_tokens)
                .map(|token| token.span.start)
                .unwrap_or_else(Position::start);

            return Err(Diagnostic::at(
                DiagnosticKind::TooManyTokens {
                    count: tokens.len(),
                    limit: self.max_tokens,
                },
                position,
            ));
        }

        Ok(())
    }
}
