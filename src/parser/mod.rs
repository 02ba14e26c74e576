//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a token sequence into a
//! `Program`. Expressions use a Pratt parser with one binding power per
//! grammar level and handles:
//!
//! - Statement parsing (declarations, assignments, expression statements)
//! - Expression parsing (binary and prefix operators, groups, literals)
//! - Error recovery at statement boundaries
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
