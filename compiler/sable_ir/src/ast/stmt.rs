//! Statement nodes.

use crate::{ExprId, Name, ParamRange, Span, StmtId, StmtRange};

/// A statement with its source span.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub const fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

/// Statement kinds.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum StmtKind {
    /// `let name = init;`. A bare `let name;` binds `nil`.
    Let { name: Name, init: Option<ExprId> },
    /// `return;` or `return expr;`.
    Return(Option<ExprId>),
    /// Expression used as a statement.
    Expr(ExprId),
    /// Braced statement list. Introduces a scope.
    Block(StmtRange),
    /// `while (cond) body`.
    While { cond: ExprId, body: StmtId },
    /// `for (init; cond; update) body`. All three header slots are
    /// optional; a missing condition loops until `return` or an error.
    For {
        init: Option<StmtId>,
        cond: Option<ExprId>,
        update: Option<ExprId>,
        body: StmtId,
    },
    /// `fn name(params) body`, a declaration binding `name` in the
    /// current scope.
    FnDecl {
        name: Name,
        params: ParamRange,
        body: StmtId,
    },
}
