//! Lexically scoped environments.
//!
//! An environment is a chain of scopes, each a name-to-value map with an
//! optional parent. Scopes are shared: a closure holds a strong handle to
//! its defining scope, keeping that scope (and everything it can see)
//! alive for as long as the closure exists. The chain has no parent-to-
//! child references, so the sharing graph is acyclic and reference
//! counting is enough.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use sable_ir::Name;

use crate::value::Value;

struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<Env>,
}

/// Shared handle to one scope in the chain.
#[derive(Clone)]
pub struct Env(Rc<RefCell<Scope>>);

impl Env {
    /// The root scope of a program.
    pub fn top_level() -> Env {
        Env(Rc::new(RefCell::new(Scope {
            bindings: FxHashMap::default(),
            parent: None,
        })))
    }

    /// A fresh scope whose lookups fall through to `self`.
    pub fn child(&self) -> Env {
        Env(Rc::new(RefCell::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
        })))
    }

    /// Bind `name` in this scope. Returns `false` if the scope already
    /// defines `name` locally; outer bindings do not count, which is what
    /// allows shadowing.
    pub fn define(&self, name: Name, value: Value) -> bool {
        let mut scope = self.0.borrow_mut();
        if scope.bindings.contains_key(&name) {
            return false;
        }
        scope.bindings.insert(name, value);
        true
    }

    /// Resolve `name`, checking this scope first and then the parents.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        let scope = self.0.borrow();
        if let Some(value) = scope.bindings.get(&name) {
            return Some(value.clone());
        }
        scope.parent.as_ref().and_then(|p| p.lookup(name))
    }

    /// Overwrite the nearest existing binding of `name`. Returns `false`
    /// if no scope in the chain defines it; `assign` never creates a
    /// binding.
    pub fn assign(&self, name: Name, value: Value) -> bool {
        let mut scope = self.0.borrow_mut();
        if let Some(slot) = scope.bindings.get_mut(&name) {
            *slot = value;
            return true;
        }
        match &scope.parent {
            Some(parent) => parent.assign(name, value),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_ir::StringInterner;

    #[test]
    fn define_rejects_local_duplicates_only() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let outer = Env::top_level();
        assert!(outer.define(x, Value::Int(1)));
        assert!(!outer.define(x, Value::Int(2)));

        let inner = outer.child();
        assert!(inner.define(x, Value::Int(3)), "shadowing is allowed");
        assert_eq!(inner.lookup(x), Some(Value::Int(3)));
        assert_eq!(outer.lookup(x), Some(Value::Int(1)));
    }

    #[test]
    fn lookup_walks_the_chain() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let outer = Env::top_level();
        outer.define(x, Value::Int(7));
        let inner = outer.child().child();
        assert_eq!(inner.lookup(x), Some(Value::Int(7)));
    }

    #[test]
    fn assign_mutates_nearest_definition() {
        let interner = StringInterner::new();
        let x = interner.intern("x");
        let y = interner.intern("y");

        let outer = Env::top_level();
        outer.define(x, Value::Int(1));
        let inner = outer.child();

        assert!(inner.assign(x, Value::Int(2)));
        assert_eq!(outer.lookup(x), Some(Value::Int(2)));

        assert!(!inner.assign(y, Value::Int(9)), "assign never defines");
        assert_eq!(inner.lookup(y), None);
    }

    #[test]
    fn assign_respects_shadowing() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let outer = Env::top_level();
        outer.define(x, Value::Int(1));
        let inner = outer.child();
        inner.define(x, Value::Int(10));

        inner.assign(x, Value::Int(11));
        assert_eq!(inner.lookup(x), Some(Value::Int(11)));
        assert_eq!(outer.lookup(x), Some(Value::Int(1)));
    }
}
