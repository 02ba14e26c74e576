//! Diagnostics shared by the lexer and the parser.
//!
//! This module defines:
//!
//! - The diagnostic structure with severity and source span
//! - Specific diagnostic variants for lexing, parsing and input limits
//! - Suggestions shown next to a diagnostic
//! - Caret-style rendering against the source text

pub mod errors;

#[cfg(test)]
mod tests;
