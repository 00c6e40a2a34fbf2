//! Expression grammar: Pratt parsing.
//!
//! One prefix rule per token kind starts an expression; the loop in
//! [`Parser::parse_expr`] then folds infix operators into the left-hand
//! side while the next operator binds tighter than the level the call was
//! entered with. Right-hand recursion reuses the operator's own level, so
//! binary operators come out left-associative.

use sable_ir::{BinaryOp, Expr, ExprId, ExprKind, Printer, TokenKind, UnaryOp, UpdateOp};
use sable_stack::ensure_sufficient_stack;

use crate::precedence::{binary_op, compound_op, Precedence};
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse one expression at the given binding level, `cur` on its
    /// first token.
    pub(crate) fn parse_expr(&mut self, prec: Precedence) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_expr_at(prec))
    }

    fn parse_expr_at(&mut self, prec: Precedence) -> Result<ExprId, ParseError> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenKind::Semicolon) && prec < self.peek_precedence() {
            self.bump();
            left = self.parse_infix(left)?;
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> Result<ExprId, ParseError> {
        let span = self.cur.span;
        match self.cur.kind {
            TokenKind::Int(text) => {
                let digits = self.interner.lookup(text);
                let value: i64 = digits.parse().map_err(|_| {
                    ParseError::new(format!("could not parse {digits} as integer"), span)
                })?;
                Ok(self.arena.alloc_expr(Expr::new(ExprKind::Int(value), span)))
            }
            TokenKind::Ident(name) => Ok(self
                .arena
                .alloc_expr(Expr::new(ExprKind::Ident(name), span))),
            TokenKind::True => Ok(self
                .arena
                .alloc_expr(Expr::new(ExprKind::Bool(true), span))),
            TokenKind::False => Ok(self
                .arena
                .alloc_expr(Expr::new(ExprKind::Bool(false), span))),
            TokenKind::Nil => Ok(self.arena.alloc_expr(Expr::new(ExprKind::Nil, span))),

            TokenKind::Bang => self.parse_unary(UnaryOp::Not),
            TokenKind::Minus => self.parse_unary(UnaryOp::Neg),
            TokenKind::Tilde => self.parse_unary(UnaryOp::BitNot),

            TokenKind::LParen => {
                self.bump();
                let expr = self.parse_expr(Precedence::Lowest)?;
                self.expect_peek(TokenKind::RParen)?;
                Ok(expr)
            }

            TokenKind::If => self.parse_if_expr(),
            TokenKind::Fn => self.parse_fn_lit(),

            TokenKind::Illegal(c) => {
                Err(ParseError::new(format!("illegal character '{c}'"), span))
            }
            other => Err(ParseError::new(
                format!("no prefix parse function for {other} found"),
                span,
            )),
        }
    }

    fn parse_infix(&mut self, left: ExprId) -> Result<ExprId, ParseError> {
        match self.cur.kind {
            TokenKind::LParen => self.parse_call(left),
            TokenKind::Assign => self.parse_assign(left, None),
            TokenKind::PlusPlus => self.parse_update(left, UpdateOp::Incr),
            TokenKind::MinusMinus => self.parse_update(left, UpdateOp::Decr),
            kind => {
                if let Some(op) = compound_op(kind) {
                    return self.parse_assign(left, Some(op));
                }
                let Some(op) = binary_op(kind) else {
                    return Err(ParseError::new(
                        format!("no infix parse function for {kind} found"),
                        self.cur.span,
                    ));
                };
                self.parse_binary(left, op, Precedence::of(kind))
            }
        }
    }

    fn parse_unary(&mut self, op: UnaryOp) -> Result<ExprId, ParseError> {
        let start = self.cur.span;
        self.bump();
        let operand = self.parse_expr(Precedence::Unary)?;
        let span = start.merge(self.arena.expr(operand).span);
        Ok(self
            .arena
            .alloc_expr(Expr::new(ExprKind::Unary { op, operand }, span)))
    }

    fn parse_binary(
        &mut self,
        left: ExprId,
        op: BinaryOp,
        prec: Precedence,
    ) -> Result<ExprId, ParseError> {
        self.bump();
        let right = self.parse_expr(prec)?;
        let span = self
            .arena
            .expr(left)
            .span
            .merge(self.arena.expr(right).span);
        Ok(self
            .arena
            .alloc_expr(Expr::new(ExprKind::Binary { op, left, right }, span)))
    }

    /// Plain and compound assignment. `x += e` is rewritten here into
    /// `x = (x + e)`, so the evaluator only ever sees plain assignment.
    fn parse_assign(&mut self, left: ExprId, op: Option<BinaryOp>) -> Result<ExprId, ParseError> {
        let left_span = self.arena.expr(left).span;
        let ExprKind::Ident(target) = self.arena.expr(left).kind else {
            let rendered = Printer::new(&self.arena, self.interner).expr(left);
            return Err(ParseError::new(
                format!("invalid left-hand side expression in assignment: {rendered}"),
                left_span,
            ));
        };

        self.bump();
        let rhs = self.parse_expr(Precedence::Lowest)?;

        let value = match op {
            None => rhs,
            Some(op) => {
                let span = left_span.merge(self.arena.expr(rhs).span);
                self.arena.alloc_expr(Expr::new(
                    ExprKind::Binary {
                        op,
                        left,
                        right: rhs,
                    },
                    span,
                ))
            }
        };

        let span = left_span.merge(self.arena.expr(value).span);
        Ok(self
            .arena
            .alloc_expr(Expr::new(ExprKind::Assign { target, value }, span)))
    }

    fn parse_update(&mut self, left: ExprId, op: UpdateOp) -> Result<ExprId, ParseError> {
        let left_span = self.arena.expr(left).span;
        let ExprKind::Ident(target) = self.arena.expr(left).kind else {
            let rendered = Printer::new(&self.arena, self.interner).expr(left);
            return Err(ParseError::new(
                format!(
                    "invalid left-hand side expression in postfix operation: {rendered}{}",
                    op.as_symbol()
                ),
                left_span,
            ));
        };

        let span = left_span.merge(self.cur.span);
        Ok(self
            .arena
            .alloc_expr(Expr::new(ExprKind::Update { op, target }, span)))
    }

    fn parse_call(&mut self, callee: ExprId) -> Result<ExprId, ParseError> {
        let mut args = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.bump();
        } else {
            self.bump();
            args.push(self.parse_expr(Precedence::Lowest)?);
            while self.peek_is(TokenKind::Comma) {
                self.bump();
                self.bump();
                args.push(self.parse_expr(Precedence::Lowest)?);
            }
            self.expect_peek(TokenKind::RParen)?;
        }

        let span = self.arena.expr(callee).span.merge(self.cur.span);
        let args = self.arena.alloc_args(args);
        Ok(self
            .arena
            .alloc_expr(Expr::new(ExprKind::Call { callee, args }, span)))
    }

    fn parse_if_expr(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cur.span;
        self.expect_peek(TokenKind::LParen)?;
        self.bump();
        let cond = self.parse_expr(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block_stmt()?;

        let alternative = if self.peek_is(TokenKind::Else) {
            self.bump();
            self.expect_peek(TokenKind::LBrace)?;
            Some(self.parse_block_stmt()?)
        } else {
            None
        };

        let span = start.merge(self.cur.span);
        Ok(self.arena.alloc_expr(Expr::new(
            ExprKind::If {
                cond,
                consequence,
                alternative,
            },
            span,
        )))
    }

    fn parse_fn_lit(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cur.span;
        self.expect_peek(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_stmt()?;

        let span = start.merge(self.cur.span);
        Ok(self
            .arena
            .alloc_expr(Expr::new(ExprKind::FnLit { params, body }, span)))
    }
}
