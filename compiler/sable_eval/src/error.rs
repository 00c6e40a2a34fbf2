//! Runtime errors and control signals.

use std::fmt;

use sable_ir::Span;

use crate::value::Value;

/// What went wrong at runtime.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum EvalErrorKind {
    /// Binary operator applied to operands of different types.
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
    /// Binary operator not defined for the (matching) operand type.
    UnknownBinaryOp {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
    /// Prefix operator not defined for the operand type.
    UnknownUnaryOp {
        op: &'static str,
        operand: &'static str,
    },
    IdentifierNotFound(String),
    AlreadyDefined(String),
    NotCallable(&'static str),
    WrongArgumentCount { expected: usize, got: usize },
    DivisionByZero,
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalErrorKind::TypeMismatch { op, left, right } => {
                write!(f, "type mismatch: {left} {op} {right}")
            }
            EvalErrorKind::UnknownBinaryOp { op, left, right } => {
                write!(f, "unknown operator: {left} {op} {right}")
            }
            EvalErrorKind::UnknownUnaryOp { op, operand } => {
                write!(f, "unknown operator: {op}{operand}")
            }
            EvalErrorKind::IdentifierNotFound(name) => {
                write!(f, "identifier not found: {name}")
            }
            EvalErrorKind::AlreadyDefined(name) => write!(f, "{name} already defined"),
            EvalErrorKind::NotCallable(type_name) => {
                write!(f, "not a function: {type_name}")
            }
            EvalErrorKind::WrongArgumentCount { expected, got } => {
                write!(f, "wrong number of arguments: expected {expected}, got {got}")
            }
            EvalErrorKind::DivisionByZero => f.write_str("division by zero"),
        }
    }
}

/// A runtime error with the span of the node that raised it.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Span,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind, span: Span) -> Self {
        EvalError { kind, span }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for EvalError {}

/// Non-value outcome of evaluating a node.
///
/// Both variants ride the `Err` channel so `?` propagates them through
/// statement sequences. `Return` is unwrapped back into a value at a call
/// boundary (or the end of the program); `Error` is never unwrapped.
#[derive(Clone, Debug)]
pub enum Flow {
    Return(Value),
    Error(EvalError),
}

impl From<EvalError> for Flow {
    fn from(err: EvalError) -> Self {
        Flow::Error(err)
    }
}

/// Result of evaluating a node: a value, or a control signal.
pub type EvalResult<T = Value> = Result<T, Flow>;
