//! Sable IR - core data structures for the Sable interpreter.
//!
//! This crate contains the shared types every stage works with:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Tokens (lexer output)
//! - AST nodes (Expr, Stmt, Program) with arena allocation
//! - The canonical source printer
//!
//! # Design
//!
//! - **Intern everything**: identifier text lives once, nodes carry Name(u32)
//! - **Flatten everything**: no Box<Expr>, children are `ExprId(u32)` indices
//!
//! Nodes stay `Copy`, so walking the tree never clones storage.

pub mod ast;
mod interner;
mod name;
mod printer;
mod span;
mod token;

pub use ast::{
    Arena, BinaryOp, Expr, ExprId, ExprKind, ExprRange, ParamRange, Program, Stmt, StmtId,
    StmtKind, StmtRange, UnaryOp, UpdateOp,
};
pub use interner::StringInterner;
pub use name::Name;
pub use printer::Printer;
pub use span::Span;
pub use token::{Token, TokenKind};
