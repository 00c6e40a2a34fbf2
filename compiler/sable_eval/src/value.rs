//! Runtime values.

use std::fmt;
use std::rc::Rc;

use sable_ir::{Name, ParamRange, StmtId};

use crate::env::Env;

/// A user function: its parameter list and body in the arena, plus the
/// environment it was defined in. The captured environment is what makes
/// it a closure.
pub struct FunctionValue {
    pub name: Option<Name>,
    pub params: ParamRange,
    pub body: StmtId,
    pub env: Env,
}

impl fmt::Debug for FunctionValue {
    // The captured environment may transitively contain this function,
    // so it stays out of the Debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Nil,
    Function(Rc<FunctionValue>),
}

impl Value {
    /// Type tag used in runtime error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "INTEGER",
            Value::Bool(_) => "BOOLEAN",
            Value::Nil => "NIL",
            Value::Function(_) => "FUNCTION",
        }
    }

    /// Only `nil` and `false` are falsy; every integer (including zero)
    /// and every function is truthy.
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }
}

/// Equality used by `==`/`!=`: value equality within a type, identity for
/// functions, and `false` across types.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Nil => f.write_str("nil"),
            Value::Function(_) => f.write_str("<function>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness() {
        assert!(Value::Int(0).is_truthy());
        assert!(Value::Int(-1).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Nil.is_truthy());
    }

    #[test]
    fn cross_type_equality_is_false() {
        assert_ne!(Value::Int(1), Value::Bool(true));
        assert_ne!(Value::Int(0), Value::Nil);
        assert_eq!(Value::Nil, Value::Nil);
    }

    #[test]
    fn display_forms() {
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Nil.to_string(), "nil");
    }
}
