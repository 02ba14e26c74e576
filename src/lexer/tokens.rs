use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EndOfInput,
    Number,
    /// Reserved for string literals; the lexer does not produce it.
    String,
    Identifier,

    LParen,
    RParen,

    Equals, // =
    Bang,   // !
    Semicolon,

    Plus,
    Minus,
    Asterisk,
    Slash,

    // Reserved
    Let,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::EndOfInput => write!(f, "end of input"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::String => write!(f, "string"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::LParen => write!(f, "`(`"),
            TokenKind::RParen => write!(f, "`)`"),
            TokenKind::Equals => write!(f, "`=`"),
            TokenKind::Bang => write!(f, "`!`"),
            TokenKind::Semicolon => write!(f, "`;`"),
            TokenKind::Plus => write!(f, "`+`"),
            TokenKind::Minus => write!(f, "`-`"),
            TokenKind::Asterisk => write!(f, "`*`"),
            TokenKind::Slash => write!(f, "`/`"),
            TokenKind::Let => write!(f, "`let`"),
        }
    }
}

/// A classified fragment of the source.
///
/// `value` is an owned copy of the source text at `span`; for `EndOfInput`
/// it is empty and the span has zero width.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} `{}` at {}", self.kind, self.value, self.span.start)
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// One-line dump used by the `--tokens` output.
    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[TokenKind::String, TokenKind::Identifier, TokenKind::Number]) {
            format!("{:?} ({}) @ {}", self.kind, self.value, self.span.start)
        } else {
            format!("{:?} () @ {}", self.kind, self.span.start)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaKind {
    Whitespace,
    /// A character no pattern matched; it was reported and skipped.
    Unrecognised,
}

/// Source text the lexer consumed without producing a token.
#[derive(Debug, Clone, PartialEq)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub text: String,
    pub span: Span,
}
