//! Sable parser.
//!
//! Recursive descent with Pratt expression parsing, producing the flat
//! arena AST. Errors are collected rather than aborting the parse: a
//! failed statement records a diagnostic, the parser resynchronizes at
//! the next statement boundary, and parsing continues so one bad line
//! yields one error instead of a cascade.

mod grammar;
mod precedence;

use std::fmt;

use sable_ir::{Arena, Name, Program, Span, StringInterner, Token, TokenKind};
use sable_lexer::Lexer;
use tracing::debug;

pub use precedence::Precedence;

/// A single syntax diagnostic.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Everything one parse produces: the program, its node storage, and
/// any diagnostics.
pub struct Parsed {
    pub program: Program,
    pub arena: Arena,
    pub errors: Vec<ParseError>,
}

impl Parsed {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parser state: a two-token window over the lexer plus the arena under
/// construction.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    pub(crate) interner: &'a StringInterner,
    pub(crate) arena: Arena,
    pub(crate) cur: Token,
    pub(crate) peek: Token,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str, interner: &'a StringInterner) -> Self {
        let mut lexer = Lexer::new(src, interner);
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Parser {
            lexer,
            interner,
            arena: Arena::new(),
            cur,
            peek,
        }
    }

    /// Parse the whole input.
    pub fn parse_program(mut self) -> Parsed {
        let mut stmts = Vec::new();
        let mut errors = Vec::new();

        while self.cur.kind != TokenKind::Eof {
            match self.parse_stmt() {
                Ok(id) => stmts.push(id),
                Err(e) => {
                    errors.push(e);
                    self.synchronize();
                }
            }
            self.bump();
        }

        debug!(
            statements = stmts.len(),
            errors = errors.len(),
            "parsed program"
        );

        let range = self.arena.alloc_stmt_list(stmts);
        Parsed {
            program: Program::new(range),
            arena: self.arena,
            errors,
        }
    }

    /// Skip ahead to a statement boundary after an error.
    ///
    /// Stops on the current semicolon (the main loop then steps past it)
    /// or just before a token that can begin a statement.
    fn synchronize(&mut self) {
        while !matches!(self.cur.kind, TokenKind::Semicolon | TokenKind::Eof) {
            if starts_statement(self.peek.kind) {
                break;
            }
            self.bump();
        }
    }

    // Token window helpers. Every parse function leaves `cur` on the last
    // token it consumed; callers advance.

    #[inline]
    pub(crate) fn bump(&mut self) {
        self.cur = self.peek;
        self.peek = self.lexer.next_token();
    }

    #[inline]
    pub(crate) fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur.kind == kind
    }

    #[inline]
    pub(crate) fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advance iff the next token is `kind`, otherwise report it.
    pub(crate) fn expect_peek(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek.kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(ParseError::new(
                format!(
                    "expected next token to be {}, got {} instead",
                    kind.describe(),
                    self.peek.kind
                ),
                self.peek.span,
            ))
        }
    }

    /// Advance iff the next token is an identifier, yielding its name.
    pub(crate) fn expect_peek_ident(&mut self) -> Result<Name, ParseError> {
        match self.peek.kind {
            TokenKind::Ident(name) => {
                self.bump();
                Ok(name)
            }
            other => Err(ParseError::new(
                format!("expected next token to be identifier, got {other} instead"),
                self.peek.span,
            )),
        }
    }

    #[inline]
    pub(crate) fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek.kind)
    }
}

/// Tokens that can begin a statement, used as recovery anchors.
fn starts_statement(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Let
            | TokenKind::Fn
            | TokenKind::Return
            | TokenKind::If
            | TokenKind::While
            | TokenKind::For
            | TokenKind::LBrace
    )
}

/// Parse `src` into a program.
pub fn parse(src: &str, interner: &StringInterner) -> Parsed {
    Parser::new(src, interner).parse_program()
}
