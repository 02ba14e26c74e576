//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization using an ordered table of anchored regex patterns
//! - Recognition of the `let` keyword, identifiers, numbers, and operators
//! - Token position tracking for diagnostics
//! - Whitespace and unrecognised characters, kept as trivia

pub mod lexer;
pub mod tokens;
