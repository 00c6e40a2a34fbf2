//! Canonical source rendering of the tree.
//!
//! Output is deterministic and re-parses to the same tree: expressions are
//! fully parenthesized, blocks are printed inline, and control-flow headers
//! keep the parentheses the grammar requires.

use std::fmt::Write as _;

use crate::{Arena, ExprId, ExprKind, Program, StmtId, StmtKind, StringInterner};

/// Renders arena nodes back to source text.
pub struct Printer<'a> {
    arena: &'a Arena,
    interner: &'a StringInterner,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a Arena, interner: &'a StringInterner) -> Self {
        Printer { arena, interner }
    }

    /// Render a whole program, one statement per line.
    pub fn program(&self, program: Program) -> String {
        let mut out = String::new();
        for (i, &id) in self.arena.stmt_list(program.stmts).iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            self.write_stmt(&mut out, id);
        }
        out
    }

    /// Render a single statement.
    pub fn stmt(&self, id: StmtId) -> String {
        let mut out = String::new();
        self.write_stmt(&mut out, id);
        out
    }

    /// Render a single expression.
    pub fn expr(&self, id: ExprId) -> String {
        let mut out = String::new();
        self.write_expr(&mut out, id);
        out
    }

    fn write_stmt(&self, out: &mut String, id: StmtId) {
        match &self.arena.stmt(id).kind {
            StmtKind::Let { name, init } => {
                let _ = write!(out, "let {}", self.interner.lookup(*name));
                if let Some(init) = init {
                    out.push_str(" = ");
                    self.write_expr(out, *init);
                }
                out.push(';');
            }
            StmtKind::Return(value) => {
                out.push_str("return");
                if let Some(value) = value {
                    out.push(' ');
                    self.write_expr(out, *value);
                }
                out.push(';');
            }
            StmtKind::Expr(expr) => {
                self.write_expr(out, *expr);
                out.push(';');
            }
            StmtKind::Block(stmts) => {
                out.push_str("{ ");
                for &stmt in self.arena.stmt_list(*stmts) {
                    self.write_stmt(out, stmt);
                    out.push(' ');
                }
                out.push('}');
            }
            StmtKind::While { cond, body } => {
                out.push_str("while (");
                self.write_expr(out, *cond);
                out.push_str(") ");
                self.write_stmt(out, *body);
            }
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => {
                out.push_str("for (");
                match init {
                    Some(init) => self.write_stmt(out, *init),
                    None => out.push(';'),
                }
                if let Some(cond) = cond {
                    out.push(' ');
                    self.write_expr(out, *cond);
                }
                out.push(';');
                if let Some(update) = update {
                    out.push(' ');
                    self.write_expr(out, *update);
                }
                out.push_str(") ");
                self.write_stmt(out, *body);
            }
            StmtKind::FnDecl { name, params, body } => {
                let _ = write!(out, "fn {}(", self.interner.lookup(*name));
                for (i, &param) in self.arena.params(*params).iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(self.interner.lookup(param));
                }
                out.push_str(") ");
                self.write_stmt(out, *body);
            }
        }
    }

    fn write_expr(&self, out: &mut String, id: ExprId) {
        match &self.arena.expr(id).kind {
            ExprKind::Int(value) => {
                let _ = write!(out, "{value}");
            }
            ExprKind::Bool(value) => {
                let _ = write!(out, "{value}");
            }
            ExprKind::Nil => out.push_str("nil"),
            ExprKind::Ident(name) => out.push_str(self.interner.lookup(*name)),
            ExprKind::Unary { op, operand } => {
                out.push('(');
                out.push_str(op.as_symbol());
                self.write_expr(out, *operand);
                out.push(')');
            }
            ExprKind::Binary { op, left, right } => {
                out.push('(');
                self.write_expr(out, *left);
                let _ = write!(out, " {} ", op.as_symbol());
                self.write_expr(out, *right);
                out.push(')');
            }
            ExprKind::Assign { target, value } => {
                let _ = write!(out, "({} = ", self.interner.lookup(*target));
                self.write_expr(out, *value);
                out.push(')');
            }
            ExprKind::Update { op, target } => {
                let _ = write!(out, "({}{})", self.interner.lookup(*target), op.as_symbol());
            }
            ExprKind::If {
                cond,
                consequence,
                alternative,
            } => {
                out.push_str("if (");
                self.write_expr(out, *cond);
                out.push_str(") ");
                self.write_stmt(out, *consequence);
                if let Some(alternative) = alternative {
                    out.push_str(" else ");
                    self.write_stmt(out, *alternative);
                }
            }
            ExprKind::Call { callee, args } => {
                self.write_expr(out, *callee);
                out.push('(');
                for (i, &arg) in self.arena.args(*args).iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_expr(out, arg);
                }
                out.push(')');
            }
            ExprKind::FnLit { params, body } => {
                out.push_str("fn(");
                for (i, &param) in self.arena.params(*params).iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(self.interner.lookup(param));
                }
                out.push_str(") ");
                self.write_stmt(out, *body);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BinaryOp, Expr, Span, Stmt, UnaryOp};

    fn expr(arena: &mut Arena, kind: ExprKind) -> ExprId {
        arena.alloc_expr(Expr::new(kind, Span::DUMMY))
    }

    #[test]
    fn parenthesizes_nested_binaries() {
        let mut arena = Arena::new();
        let interner = StringInterner::new();
        let one = expr(&mut arena, ExprKind::Int(1));
        let two = expr(&mut arena, ExprKind::Int(2));
        let three = expr(&mut arena, ExprKind::Int(3));
        let mul = expr(
            &mut arena,
            ExprKind::Binary {
                op: BinaryOp::Mul,
                left: two,
                right: three,
            },
        );
        let add = expr(
            &mut arena,
            ExprKind::Binary {
                op: BinaryOp::Add,
                left: one,
                right: mul,
            },
        );
        let printer = Printer::new(&arena, &interner);
        assert_eq!(printer.expr(add), "(1 + (2 * 3))");
    }

    #[test]
    fn prints_let_and_unary() {
        let mut arena = Arena::new();
        let interner = StringInterner::new();
        let x = interner.intern("x");
        let five = expr(&mut arena, ExprKind::Int(5));
        let neg = expr(
            &mut arena,
            ExprKind::Unary {
                op: UnaryOp::Neg,
                operand: five,
            },
        );
        let stmt = arena.alloc_stmt(Stmt::new(
            StmtKind::Let {
                name: x,
                init: Some(neg),
            },
            Span::DUMMY,
        ));
        let printer = Printer::new(&arena, &interner);
        assert_eq!(printer.stmt(stmt), "let x = (-5);");
    }

    #[test]
    fn prints_for_header_slots() {
        let mut arena = Arena::new();
        let interner = StringInterner::new();
        let body = arena.alloc_stmt(Stmt::new(
            StmtKind::Block(crate::StmtRange::EMPTY),
            Span::DUMMY,
        ));
        let stmt = arena.alloc_stmt(Stmt::new(
            StmtKind::For {
                init: None,
                cond: None,
                update: None,
                body,
            },
            Span::DUMMY,
        ));
        let printer = Printer::new(&arena, &interner);
        assert_eq!(printer.stmt(stmt), "for (;;) { }");
    }
}
