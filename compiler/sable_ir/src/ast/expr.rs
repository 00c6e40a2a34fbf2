//! Expression nodes.

use crate::{BinaryOp, ExprId, ExprRange, Name, ParamRange, Span, StmtId, UnaryOp, UpdateOp};

/// An expression with its source span.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Expression kinds.
///
/// Child expressions are arena ids; `If` bodies and function bodies point
/// at block statements so the evaluator runs them through a single path.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ExprKind {
    /// Integer literal, already parsed to a machine integer.
    Int(i64),
    /// Boolean literal.
    Bool(bool),
    /// `nil`.
    Nil,
    /// Variable reference.
    Ident(Name),

    /// Prefix operation: `-x`, `!x`, `~x`.
    Unary { op: UnaryOp, operand: ExprId },
    /// Infix operation.
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    /// Assignment to an existing binding. Compound forms (`+=` etc.) are
    /// desugared into this during parsing.
    Assign { target: Name, value: ExprId },
    /// Postfix increment/decrement. Evaluates to the pre-update value.
    Update { op: UpdateOp, target: Name },

    /// Conditional. Both arms are block statements; a missing `else`
    /// leaves the expression at `nil` when the condition is falsy.
    If {
        cond: ExprId,
        consequence: StmtId,
        alternative: Option<StmtId>,
    },
    /// Function call. The callee is an arbitrary expression.
    Call { callee: ExprId, args: ExprRange },
    /// Function literal. Named function declarations share this node; the
    /// name lives on the enclosing statement.
    FnLit { params: ParamRange, body: StmtId },
}
