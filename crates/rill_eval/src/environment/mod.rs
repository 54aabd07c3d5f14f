//! Variable store.
//!
//! A stack of scopes over one global scope. `use` pushes a scope for its
//! local words; everything else, including `set` / `copy` captures made by
//! the parse engine, writes through [`Environment::assign`], which updates
//! the innermost scope that already binds the word and falls back to the
//! global scope.

use rustc_hash::FxHashMap;

use rill_ir::{Name, Value};

#[derive(Debug, Default)]
struct Scope {
    bindings: FxHashMap<Name, Value>,
}

#[derive(Debug)]
pub struct Environment {
    /// Innermost scope last. Never empty: index 0 is the global scope.
    scopes: Vec<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::default()],
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Pop the innermost scope. The global scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Bind `name` in the innermost scope.
    pub fn define(&mut self, name: Name, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.bindings.insert(name, value);
        }
    }

    pub fn define_global(&mut self, name: Name, value: Value) {
        if let Some(global) = self.scopes.first_mut() {
            global.bindings.insert(name, value);
        }
    }

    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.bindings.get(&name))
            .cloned()
    }

    /// Update the innermost binding of `name`, or bind it globally.
    pub fn assign(&mut self, name: Name, value: Value) {
        let slot = self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.bindings.get_mut(&name));
        match slot {
            Some(slot) => *slot = value,
            None => self.define_global(name, value),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
