//! Sable lexer.
//!
//! Tokens are produced on demand: the parser pulls one token at a time
//! through [`Lexer::next_token`], so no token buffer is materialized for
//! ordinary parsing. [`tokenize`] collects the full stream for tests and
//! tooling.
//!
//! The scanner works on bytes. Identifiers are ASCII
//! (`[A-Za-z_][A-Za-z0-9_]*`), integer literals are decimal digit runs, and
//! any other non-ASCII input surfaces as [`TokenKind::Illegal`] for the
//! parser to report. Whitespace and `//` line comments are skipped.

mod keywords;

use sable_ir::{Name, Span, StringInterner, Token, TokenKind};
use tracing::trace;

pub use keywords::keyword;

/// Streaming tokenizer over a single source string.
pub struct Lexer<'src> {
    src: &'src str,
    interner: &'src StringInterner,
    pos: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str, interner: &'src StringInterner) -> Self {
        Lexer {
            src,
            interner,
            pos: 0,
        }
    }

    /// Scan the next token. Returns `Eof` forever once input is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let start = self.pos;
        let Some(byte) = self.peek() else {
            return Token::new(TokenKind::Eof, self.span_from(start));
        };

        let kind = match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.scan_ident(start),
            b'0'..=b'9' => self.scan_int(start),
            _ => self.scan_operator(),
        };

        let token = Token::new(kind, self.span_from(start));
        trace!(?token.kind, start, "token");
        token
    }

    fn scan_ident(&mut self, start: usize) -> TokenKind {
        while matches!(self.peek(), Some(b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_')) {
            self.pos += 1;
        }
        let text = &self.src[start..self.pos];
        match keywords::keyword(text) {
            Some(kw) => kw,
            None => TokenKind::Ident(self.intern(text)),
        }
    }

    fn scan_int(&mut self, start: usize) -> TokenKind {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        // Digit text is kept verbatim; numeric conversion happens in the
        // parser so overflow becomes a parse diagnostic with a span.
        TokenKind::Int(self.intern(&self.src[start..self.pos]))
    }

    fn scan_operator(&mut self) -> TokenKind {
        let byte = self.bump_byte();
        match byte {
            b'+' => {
                if self.eat(b'+') {
                    TokenKind::PlusPlus
                } else if self.eat(b'=') {
                    TokenKind::PlusEq
                } else {
                    TokenKind::Plus
                }
            }
            b'-' => {
                if self.eat(b'-') {
                    TokenKind::MinusMinus
                } else if self.eat(b'=') {
                    TokenKind::MinusEq
                } else {
                    TokenKind::Minus
                }
            }
            b'*' => {
                if self.eat(b'=') {
                    TokenKind::StarEq
                } else {
                    TokenKind::Star
                }
            }
            b'/' => {
                if self.eat(b'=') {
                    TokenKind::SlashEq
                } else {
                    TokenKind::Slash
                }
            }
            b'%' => {
                if self.eat(b'=') {
                    TokenKind::PercentEq
                } else {
                    TokenKind::Percent
                }
            }
            b'~' => TokenKind::Tilde,
            b'&' => {
                if self.eat(b'&') {
                    TokenKind::AmpAmp
                } else if self.eat(b'=') {
                    TokenKind::AmpEq
                } else {
                    TokenKind::Amp
                }
            }
            b'|' => {
                if self.eat(b'|') {
                    TokenKind::PipePipe
                } else if self.eat(b'=') {
                    TokenKind::PipeEq
                } else {
                    TokenKind::Pipe
                }
            }
            b'^' => {
                if self.eat(b'=') {
                    TokenKind::CaretEq
                } else {
                    TokenKind::Caret
                }
            }
            b'<' => {
                if self.eat(b'<') {
                    if self.eat(b'=') {
                        TokenKind::ShlEq
                    } else {
                        TokenKind::Shl
                    }
                } else if self.eat(b'=') {
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            b'>' => {
                if self.eat(b'>') {
                    if self.eat(b'=') {
                        TokenKind::ShrEq
                    } else {
                        TokenKind::Shr
                    }
                } else if self.eat(b'=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            b'=' => {
                if self.eat(b'=') {
                    TokenKind::EqEq
                } else {
                    TokenKind::Assign
                }
            }
            b'!' => {
                if self.eat(b'=') {
                    TokenKind::BangEq
                } else {
                    TokenKind::Bang
                }
            }
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            _ => self.illegal_at(self.pos - 1),
        }
    }

    /// Recover the full (possibly multi-byte) character for an illegal
    /// byte, and advance past its remaining bytes.
    fn illegal_at(&mut self, start: usize) -> TokenKind {
        // The byte at `start` came from a valid &str, so a char starts there.
        let ch = self.src[start..].chars().next().unwrap_or('\u{FFFD}');
        self.pos = start + ch.len_utf8();
        TokenKind::Illegal(ch)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n') => self.pos += 1,
                Some(b'/') if self.peek_at(1) == Some(b'/') => {
                    while !matches!(self.peek(), None | Some(b'\n')) {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn intern(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + offset).copied()
    }

    #[inline]
    fn bump_byte(&mut self) -> u8 {
        let byte = self.src.as_bytes()[self.pos];
        self.pos += 1;
        byte
    }

    #[inline]
    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    #[inline]
    fn span_from(&self, start: usize) -> Span {
        Span::new(start as u32, self.pos as u32)
    }
}

/// Tokenize a whole source string, excluding the trailing `Eof`.
pub fn tokenize(src: &str, interner: &StringInterner) -> Vec<Token> {
    let mut lexer = Lexer::new(src, interner);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        if token.kind == TokenKind::Eof {
            break;
        }
        tokens.push(token);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let interner = StringInterner::new();
        tokenize(src, &interner).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn scans_idents_ints_and_keywords() {
        let interner = StringInterner::new();
        let tokens = tokenize("let five = 5;", &interner);
        let five = interner.intern("five");
        let digits = interner.intern("5");
        let got: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            got,
            vec![
                TokenKind::Let,
                TokenKind::Ident(five),
                TokenKind::Assign,
                TokenKind::Int(digits),
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn longest_match_wins() {
        let interner = StringInterner::new();
        let got: Vec<TokenKind> = tokenize("<<= >>= << >> <= >= == != && || ++ --", &interner)
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            got,
            vec![
                TokenKind::ShlEq,
                TokenKind::ShrEq,
                TokenKind::Shl,
                TokenKind::Shr,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::EqEq,
                TokenKind::BangEq,
                TokenKind::AmpAmp,
                TokenKind::PipePipe,
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
            ]
        );
    }

    #[test]
    fn compound_assignment_operators() {
        let got = kinds("+= -= *= /= %= &= |= ^=");
        assert_eq!(
            got,
            vec![
                TokenKind::PlusEq,
                TokenKind::MinusEq,
                TokenKind::StarEq,
                TokenKind::SlashEq,
                TokenKind::PercentEq,
                TokenKind::AmpEq,
                TokenKind::PipeEq,
                TokenKind::CaretEq,
            ]
        );
    }

    #[test]
    fn skips_line_comments() {
        let got = kinds("1 // trailing words + * (\n2");
        let interner = StringInterner::new();
        let one = interner.intern("1");
        let two = interner.intern("2");
        // Fresh interner assigns the same indices in the same order.
        assert_eq!(got, vec![TokenKind::Int(one), TokenKind::Int(two)]);
    }

    #[test]
    fn spans_cover_token_text() {
        let interner = StringInterner::new();
        let tokens = tokenize("let abc = 42;", &interner);
        let src = "let abc = 42;";
        let texts: Vec<&str> = tokens
            .iter()
            .map(|t| &src[t.span.to_range()])
            .collect();
        assert_eq!(texts, vec!["let", "abc", "=", "42", ";"]);
    }

    #[test]
    fn illegal_character_is_reported_not_skipped() {
        let got = kinds("1 @ 2");
        assert!(matches!(got[1], TokenKind::Illegal('@')));
        assert_eq!(got.len(), 3);
    }

    #[test]
    fn eof_is_sticky() {
        let interner = StringInterner::new();
        let mut lexer = Lexer::new("  ", &interner);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }
}
