use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::{
    errors::errors::{Diagnostic, DiagnosticKind},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, Trivia, TriviaKind, RESERVED_LOOKUP};

/// Called with the text a pattern matched at the cursor.
pub type PatternHandler = fn(&mut Lexer, &str);

pub struct RegexPattern {
    regex: Regex,
    handler: PatternHandler,
}

fn pattern(source: &str, handler: PatternHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(source).expect("lexer patterns are valid regular expressions"),
        handler,
    }
}

lazy_static! {
    /// Tried in order at the cursor; every pattern is anchored and never
    /// matches the empty string.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern("^\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus)),
        pattern("^-", MK_DEFAULT_HANDLER!(TokenKind::Minus)),
        pattern("^\\*", MK_DEFAULT_HANDLER!(TokenKind::Asterisk)),
        pattern("^/", MK_DEFAULT_HANDLER!(TokenKind::Slash)),
        pattern("^\\(", MK_DEFAULT_HANDLER!(TokenKind::LParen)),
        pattern("^\\)", MK_DEFAULT_HANDLER!(TokenKind::RParen)),
        pattern("^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon)),
        pattern("^=", MK_DEFAULT_HANDLER!(TokenKind::Equals)),
        pattern("^!", MK_DEFAULT_HANDLER!(TokenKind::Bang)),
        pattern("^[ \\t\\r\\n]+", whitespace_handler),
        pattern("^[0-9]+", number_handler),
        pattern("^[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
    ];
}

pub struct Lexer<'a> {
    source: &'a str,
    position: Position,
    tokens: Vec<Token>,
    trivia: Vec<Trivia>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            source,
            position: Position::start(),
            tokens: vec![],
            trivia: vec![],
            diagnostics: vec![],
        }
    }

    /// Moves the cursor over `text`, which must be the source at the cursor,
    /// and returns the span it covered.
    fn advance(&mut self, text: &str) -> Span {
        let start = self.position;

        for c in text.chars() {
            if c == '\n' {
                self.position.line += 1;
                self.position.column = 1;
            } else {
                self.position.column += 1;
            }
        }
        self.position.offset += text.len() as u32;

        Span::new(start, self.position)
    }

    pub fn push_token(&mut self, kind: TokenKind, lexeme: &str) {
        let span = self.advance(lexeme);
        self.tokens.push(MK_TOKEN!(kind, String::from(lexeme), span));
    }

    pub fn push_trivia(&mut self, kind: TriviaKind, text: &str) {
        let span = self.advance(text);
        self.trivia.push(Trivia {
            kind,
            text: String::from(text),
            span,
        });
    }

    fn report_unrecognised(&mut self, character: char) {
        let mut buffer = [0; 4];
        let text: &str = character.encode_utf8(&mut buffer);
        let span = self.advance(text);

        self.diagnostics.push(Diagnostic::new(
            DiagnosticKind::UnexpectedCharacter { character },
            span,
        ));
        self.trivia.push(Trivia {
            kind: TriviaKind::Unrecognised,
            text: String::from(text),
            span,
        });
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.position.offset as usize..]
    }

    pub fn at_eof(&self) -> bool {
        self.position.offset as usize >= self.source.len()
    }
}

fn whitespace_handler(lexer: &mut Lexer, lexeme: &str) {
    lexer.push_trivia(TriviaKind::Whitespace, lexeme);
}

fn number_handler(lexer: &mut Lexer, lexeme: &str) {
    lexer.push_token(TokenKind::Number, lexeme);
}

fn symbol_handler(lexer: &mut Lexer, lexeme: &str) {
    let kind = RESERVED_LOOKUP
        .get(lexeme)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.push_token(kind, lexeme);
}

/// Everything one scan of a buffer produced.
#[derive(Debug, Clone)]
pub struct Lexed {
    /// Always ends with exactly one `EndOfInput` token.
    pub tokens: Vec<Token>,
    pub trivia: Vec<Trivia>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Lexed {
    pub fn into_parts(self) -> (Vec<Token>, Vec<Diagnostic>) {
        (self.tokens, self.diagnostics)
    }

    /// Rebuilds the scanned source from token lexemes and trivia.
    pub fn reconstruct(&self) -> String {
        let mut pieces: Vec<(u32, &str)> = self
            .tokens
            .iter()
            .map(|token| (token.span.start.offset, token.value.as_str()))
            .chain(
                self.trivia
                    .iter()
                    .map(|trivia| (trivia.span.start.offset, trivia.text.as_str())),
            )
            .collect();
        pieces.sort_by_key(|(offset, _)| *offset);

        pieces.into_iter().map(|(_, text)| text).collect()
    }
}

/// Scans `source` into tokens.
///
/// Never fails: characters no pattern accepts are reported as diagnostics
/// and skipped.
pub fn tokenize(source: &str) -> Lexed {
    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        let remaining = lex.remainder();

        let matched = PATTERNS.iter().find_map(|pattern| {
            pattern
                .regex
                .find(remaining)
                .map(|found| (pattern.handler, found.as_str()))
        });

        match matched {
            Some((handler, lexeme)) => handler(&mut lex, lexeme),
            None => match remaining.chars().next() {
                Some(character) => lex.report_unrecognised(character),
                None => break,
            },
        }
    }

    let end = lex.position;
    lex.tokens
        .push(MK_TOKEN!(TokenKind::EndOfInput, String::new(), Span::point(end)));

    debug!(
        "tokenized {} bytes into {} tokens ({} trivia, {} diagnostics)",
        source.len(),
        lex.tokens.len(),
        lex.trivia.len(),
        lex.diagnostics.len()
    );

    Lexed {
        tokens: lex.tokens,
        trivia: lex.trivia,
        diagnostics: lex.diagnostics,
    }
}
