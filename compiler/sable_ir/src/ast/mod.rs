//! Arena-allocated syntax tree.

mod arena;
mod expr;
mod operators;
mod stmt;

pub use arena::{Arena, ExprId, ExprRange, ParamRange, StmtId, StmtRange};
pub use expr::{Expr, ExprKind};
pub use operators::{BinaryOp, UnaryOp, UpdateOp};
pub use stmt::{Stmt, StmtKind};

/// A parsed source file: the top-level statement list.
///
/// All node storage lives in the [`Arena`] the program was parsed into.
#[derive(Copy, Clone, Debug)]
pub struct Program {
    pub stmts: StmtRange,
}

impl Program {
    pub const fn new(stmts: StmtRange) -> Self {
        Program { stmts }
    }

    pub const fn is_empty(self) -> bool {
        self.stmts.is_empty()
    }
}
