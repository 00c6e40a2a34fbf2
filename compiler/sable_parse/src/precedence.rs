//! Infix binding powers.

use sable_ir::{BinaryOp, TokenKind};

/// Binding power of an infix position, loosest to tightest.
///
/// The derived `Ord` is the whole comparison logic: the expression loop
/// continues while the incoming operator binds tighter than the level the
/// current call was entered with.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub enum Precedence {
    Lowest,
    Or,
    And,
    Compare,
    Bitwise,
    Sum,
    Product,
    Unary,
    Update,
    Assign,
    Call,
}

impl Precedence {
    /// Binding power of `kind` in infix position.
    ///
    /// Tokens with no infix role map to `Lowest`, which terminates the
    /// expression loop without a dedicated handler check.
    pub fn of(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::PipePipe => Precedence::Or,
            TokenKind::AmpAmp => Precedence::And,

            TokenKind::EqEq
            | TokenKind::BangEq
            | TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::LtEq
            | TokenKind::GtEq => Precedence::Compare,

            TokenKind::Amp
            | TokenKind::Pipe
            | TokenKind::Caret
            | TokenKind::Shl
            | TokenKind::Shr => Precedence::Bitwise,

            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Precedence::Product,

            TokenKind::PlusPlus | TokenKind::MinusMinus => Precedence::Update,

            TokenKind::Assign
            | TokenKind::PlusEq
            | TokenKind::MinusEq
            | TokenKind::StarEq
            | TokenKind::SlashEq
            | TokenKind::PercentEq
            | TokenKind::AmpEq
            | TokenKind::PipeEq
            | TokenKind::CaretEq
            | TokenKind::ShlEq
            | TokenKind::ShrEq => Precedence::Assign,

            TokenKind::LParen => Precedence::Call,

            _ => Precedence::Lowest,
        }
    }
}

/// The binary operator a plain infix token denotes.
pub fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::BangEq => BinaryOp::NotEq,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::GtEq,
        TokenKind::AmpAmp => BinaryOp::And,
        TokenKind::PipePipe => BinaryOp::Or,
        TokenKind::Amp => BinaryOp::BitAnd,
        TokenKind::Pipe => BinaryOp::BitOr,
        TokenKind::Caret => BinaryOp::BitXor,
        TokenKind::Shl => BinaryOp::Shl,
        TokenKind::Shr => BinaryOp::Shr,
        _ => return None,
    })
}

/// The binary operator a compound-assignment token desugars to.
pub fn compound_op(kind: TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::PlusEq => BinaryOp::Add,
        TokenKind::MinusEq => BinaryOp::Sub,
        TokenKind::StarEq => BinaryOp::Mul,
        TokenKind::SlashEq => BinaryOp::Div,
        TokenKind::PercentEq => BinaryOp::Mod,
        TokenKind::AmpEq => BinaryOp::BitAnd,
        TokenKind::PipeEq => BinaryOp::BitOr,
        TokenKind::CaretEq => BinaryOp::BitXor,
        TokenKind::ShlEq => BinaryOp::Shl,
        TokenKind::ShrEq => BinaryOp::Shr,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_grammar() {
        assert!(Precedence::Lowest < Precedence::Or);
        assert!(Precedence::Or < Precedence::And);
        assert!(Precedence::And < Precedence::Compare);
        assert!(Precedence::Compare < Precedence::Bitwise);
        assert!(Precedence::Bitwise < Precedence::Sum);
        assert!(Precedence::Sum < Precedence::Product);
        assert!(Precedence::Product < Precedence::Unary);
        assert!(Precedence::Unary < Precedence::Update);
        assert!(Precedence::Update < Precedence::Assign);
        assert!(Precedence::Assign < Precedence::Call);
    }

    #[test]
    fn non_infix_tokens_are_lowest() {
        assert_eq!(Precedence::of(TokenKind::Semicolon), Precedence::Lowest);
        assert_eq!(Precedence::of(TokenKind::RParen), Precedence::Lowest);
        assert_eq!(Precedence::of(TokenKind::Let), Precedence::Lowest);
        assert_eq!(Precedence::of(TokenKind::Eof), Precedence::Lowest);
    }
}
