//! Statement grammar.
//!
//! Every parse function here follows the token-window convention from
//! `lib.rs`: entered with `cur` on the statement's first token, returns
//! with `cur` on its last consumed token.

mod expr;

use sable_ir::{ParamRange, Stmt, StmtId, StmtKind, TokenKind};

use crate::precedence::Precedence;
use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_stmt(&mut self) -> Result<StmtId, ParseError> {
        match self.cur.kind {
            TokenKind::Let => self.parse_let_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::LBrace => self.parse_block_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            // `fn` not followed by a name is a function literal in
            // expression position.
            TokenKind::Fn if matches!(self.peek.kind, TokenKind::Ident(_)) => {
                self.parse_fn_decl()
            }
            _ => self.parse_expr_stmt(),
        }
    }

    fn parse_let_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cur.span;
        let name = self.expect_peek_ident()?;

        let init = if self.peek_is(TokenKind::Assign) {
            self.bump();
            self.bump();
            Some(self.parse_expr(Precedence::Lowest)?)
        } else {
            None
        };

        if self.peek_is(TokenKind::Semicolon) {
            self.bump();
        }

        let span = start.merge(self.cur.span);
        Ok(self
            .arena
            .alloc_stmt(Stmt::new(StmtKind::Let { name, init }, span)))
    }

    fn parse_return_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cur.span;

        let value = if self.peek_is(TokenKind::Semicolon) {
            None
        } else {
            self.bump();
            Some(self.parse_expr(Precedence::Lowest)?)
        };

        if self.peek_is(TokenKind::Semicolon) {
            self.bump();
        }

        let span = start.merge(self.cur.span);
        Ok(self
            .arena
            .alloc_stmt(Stmt::new(StmtKind::Return(value), span)))
    }

    /// Parse `{ ... }` with `cur` on the opening brace.
    pub(crate) fn parse_block_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cur.span;
        self.bump();

        let mut stmts = Vec::new();
        while !self.cur_is(TokenKind::RBrace) && !self.cur_is(TokenKind::Eof) {
            stmts.push(self.parse_stmt()?);
            self.bump();
        }

        if !self.cur_is(TokenKind::RBrace) {
            return Err(ParseError::new(
                "expected next token to be }, got end of input instead",
                self.cur.span,
            ));
        }

        let span = start.merge(self.cur.span);
        let range = self.arena.alloc_stmt_list(stmts);
        Ok(self
            .arena
            .alloc_stmt(Stmt::new(StmtKind::Block(range), span)))
    }

    fn parse_while_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cur.span;
        self.expect_peek(TokenKind::LParen)?;

        if self.peek_is(TokenKind::RParen) {
            return Err(ParseError::new(
                "expected a conditional expression before ')'",
                self.peek.span,
            ));
        }

        self.bump();
        let cond = self.parse_expr(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_stmt()?;

        let span = start.merge(self.cur.span);
        Ok(self
            .arena
            .alloc_stmt(Stmt::new(StmtKind::While { cond, body }, span)))
    }

    fn parse_for_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cur.span;
        self.expect_peek(TokenKind::LParen)?;

        // All three header slots are optional. The init statement eats its
        // own semicolon; the bare-semicolon cases consume it here.
        let init = if self.peek_is(TokenKind::Semicolon) {
            self.bump();
            None
        } else if self.peek_is(TokenKind::Let) {
            self.bump();
            Some(self.parse_let_stmt()?)
        } else {
            self.bump();
            Some(self.parse_expr_stmt()?)
        };

        let cond = if self.peek_is(TokenKind::Semicolon) {
            self.bump();
            None
        } else {
            self.bump();
            let cond = self.parse_expr(Precedence::Lowest)?;
            self.expect_peek(TokenKind::Semicolon)?;
            Some(cond)
        };

        let update = if self.peek_is(TokenKind::RParen) {
            None
        } else {
            self.bump();
            Some(self.parse_expr(Precedence::Lowest)?)
        };

        self.expect_peek(TokenKind::RParen)?;
        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_stmt()?;

        let span = start.merge(self.cur.span);
        Ok(self.arena.alloc_stmt(Stmt::new(
            StmtKind::For {
                init,
                cond,
                update,
                body,
            },
            span,
        )))
    }

    fn parse_fn_decl(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cur.span;
        let name = self.expect_peek_ident()?;
        self.expect_peek(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_stmt()?;

        let span = start.merge(self.cur.span);
        Ok(self
            .arena
            .alloc_stmt(Stmt::new(StmtKind::FnDecl { name, params, body }, span)))
    }

    fn parse_expr_stmt(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cur.span;
        let expr = self.parse_expr(Precedence::Lowest)?;

        if self.peek_is(TokenKind::Semicolon) {
            self.bump();
        }

        let span = start.merge(self.cur.span);
        Ok(self.arena.alloc_stmt(Stmt::new(StmtKind::Expr(expr), span)))
    }

    /// Parse `(a, b, c)` with `cur` on the opening paren. Shared by
    /// declarations and literals.
    pub(crate) fn parse_params(&mut self) -> Result<ParamRange, ParseError> {
        let mut names = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.bump();
            return Ok(self.arena.alloc_params(names));
        }

        names.push(self.expect_peek_ident()?);
        while self.peek_is(TokenKind::Comma) {
            self.bump();
            names.push(self.expect_peek_ident()?);
        }
        self.expect_peek(TokenKind::RParen)?;

        Ok(self.arena.alloc_params(names))
    }
}
