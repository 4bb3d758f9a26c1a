use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::value::Value;

/// Shared handle to one scope in the chain.
///
/// Function values keep their defining scope alive through this handle, so
/// environments need shared ownership. Cyclic closures (`let f = fn() { f }`)
/// can keep a cycle of `Rc`s alive; accepted for bounded programs.
pub type Env = Rc<RefCell<Environment>>;

/// One lexical scope: a name table plus an optional enclosing scope.
#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Value>,
    outer: Option<Env>,
}

impl Environment {
    pub fn new() -> Env {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Fresh innermost scope on function entry; the chain is extended,
    /// never mutated.
    pub fn enclosed(outer: Env) -> Env {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }))
    }

    /// Innermost-first lookup through the scope chain.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.store.get(name) {
            return Some(Rc::clone(value));
        }
        self.outer.as_ref().and_then(|outer| outer.borrow().get(name))
    }

    /// Bind in the current scope only; rebinding an existing name is the
    /// same operation as defining it.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::Object;

    #[test]
    fn get_returns_bindings_from_current_scope() {
        let env = Environment::new();
        env.borrow_mut().set("a", Object::integer(1));
        assert_eq!(env.borrow().get("a").unwrap().inspect(), "1");
        assert!(env.borrow().get("missing").is_none());
    }

    #[test]
    fn get_falls_back_to_outer_scopes() {
        let outer = Environment::new();
        outer.borrow_mut().set("a", Object::integer(1));
        let inner = Environment::enclosed(Rc::clone(&outer));
        assert_eq!(inner.borrow().get("a").unwrap().inspect(), "1");
    }

    #[test]
    fn set_writes_the_current_scope_only() {
        let outer = Environment::new();
        outer.borrow_mut().set("a", Object::integer(1));
        let inner = Environment::enclosed(Rc::clone(&outer));
        inner.borrow_mut().set("a", Object::integer(2));

        assert_eq!(inner.borrow().get("a").unwrap().inspect(), "2");
        assert_eq!(outer.borrow().get("a").unwrap().inspect(), "1");
    }
}
