//! Flat AST storage.
//!
//! Nodes live in contiguous arrays addressed by `u32` ids instead of boxed
//! children. Child lists (block statements, call arguments, parameter
//! names) live in side tables addressed by ranges, so node kinds stay
//! small and `Copy`.

use std::fmt;

use crate::{Expr, Name, Stmt};

/// Index of an expression in the arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ExprId(u32);

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Index of a statement in the arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct StmtId(u32);

impl fmt::Debug for StmtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StmtId({})", self.0)
    }
}

/// Range into the statement-list side table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct StmtRange {
    start: u32,
    end: u32,
}

impl StmtRange {
    pub const EMPTY: StmtRange = StmtRange { start: 0, end: 0 };

    pub const fn len(self) -> usize {
        (self.end - self.start) as usize
    }

    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// Range into the call-argument side table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ExprRange {
    start: u32,
    end: u32,
}

impl ExprRange {
    pub const fn len(self) -> usize {
        (self.end - self.start) as usize
    }

    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// Range into the parameter-name side table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParamRange {
    start: u32,
    end: u32,
}

impl ParamRange {
    pub const fn len(self) -> usize {
        (self.end - self.start) as usize
    }

    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// Arena holding every node of one parse.
///
/// The arena is append-only during parsing and read-only afterwards; ids
/// and ranges handed out by the `alloc_*` methods are valid for its whole
/// lifetime.
#[derive(Default)]
pub struct Arena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    stmt_lists: Vec<StmtId>,
    arg_lists: Vec<ExprId>,
    param_lists: Vec<Name>,
}

#[inline]
fn to_u32(len: usize) -> u32 {
    debug_assert!(len <= u32::MAX as usize, "arena table overflow");
    len as u32
}

impl Arena {
    pub fn new() -> Self {
        Arena::default()
    }

    /// Store an expression, returning its id.
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId(to_u32(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// Store a statement, returning its id.
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId(to_u32(self.stmts.len()));
        self.stmts.push(stmt);
        id
    }

    /// Store an ordered statement list (block or program body).
    pub fn alloc_stmt_list(&mut self, ids: Vec<StmtId>) -> StmtRange {
        let start = to_u32(self.stmt_lists.len());
        self.stmt_lists.extend(ids);
        StmtRange {
            start,
            end: to_u32(self.stmt_lists.len()),
        }
    }

    /// Store an ordered call-argument list.
    pub fn alloc_args(&mut self, ids: Vec<ExprId>) -> ExprRange {
        let start = to_u32(self.arg_lists.len());
        self.arg_lists.extend(ids);
        ExprRange {
            start,
            end: to_u32(self.arg_lists.len()),
        }
    }

    /// Store an ordered parameter-name list.
    pub fn alloc_params(&mut self, names: Vec<Name>) -> ParamRange {
        let start = to_u32(self.param_lists.len());
        self.param_lists.extend(names);
        ParamRange {
            start,
            end: to_u32(self.param_lists.len()),
        }
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.0 as usize]
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.0 as usize]
    }

    #[inline]
    pub fn stmt_list(&self, range: StmtRange) -> &[StmtId] {
        &self.stmt_lists[range.start as usize..range.end as usize]
    }

    #[inline]
    pub fn args(&self, range: ExprRange) -> &[ExprId] {
        &self.arg_lists[range.start as usize..range.end as usize]
    }

    #[inline]
    pub fn params(&self, range: ParamRange) -> &[Name] {
        &self.param_lists[range.start as usize..range.end as usize]
    }

    /// Number of expressions allocated (diagnostics/tests).
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Number of statements allocated (diagnostics/tests).
    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExprKind, Span, StmtKind};

    #[test]
    fn alloc_and_read_back() {
        let mut arena = Arena::new();
        let a = arena.alloc_expr(Expr::new(ExprKind::Int(1), Span::DUMMY));
        let b = arena.alloc_expr(Expr::new(ExprKind::Int(2), Span::DUMMY));
        assert_ne!(a, b);
        assert_eq!(arena.expr(a).kind, ExprKind::Int(1));
        assert_eq!(arena.expr(b).kind, ExprKind::Int(2));
    }

    #[test]
    fn side_tables_preserve_order() {
        let mut arena = Arena::new();
        let s1 = arena.alloc_stmt(Stmt::new(StmtKind::Block(StmtRange::EMPTY), Span::DUMMY));
        let s2 = arena.alloc_stmt(Stmt::new(StmtKind::Block(StmtRange::EMPTY), Span::DUMMY));
        let range = arena.alloc_stmt_list(vec![s1, s2]);
        assert_eq!(range.len(), 2);
        assert_eq!(arena.stmt_list(range), &[s1, s2]);
    }
}
