//! Keyword recognition.

use sable_ir::TokenKind;

/// Map identifier text to its keyword token, if any.
///
/// Bucketed by length so each arm compares against at most three
/// candidates.
pub fn keyword(text: &str) -> Option<TokenKind> {
    match text.len() {
        2 => match text {
            "fn" => Some(TokenKind::Fn),
            "if" => Some(TokenKind::If),
            _ => None,
        },
        3 => match text {
            "let" => Some(TokenKind::Let),
            "for" => Some(TokenKind::For),
            "nil" => Some(TokenKind::Nil),
            _ => None,
        },
        4 => match text {
            "else" => Some(TokenKind::Else),
            "true" => Some(TokenKind::True),
            _ => None,
        },
        5 => match text {
            "while" => Some(TokenKind::While),
            "false" => Some(TokenKind::False),
            _ => None,
        },
        6 => match text {
            "return" => Some(TokenKind::Return),
            _ => None,
        },
        _ => None,
    }
}
