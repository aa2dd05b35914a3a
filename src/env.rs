// ABOUTME: Environment module for managing variable bindings and scopes

use crate::error::EvalError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new global environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a new child environment whose parent is `parent`.
    pub fn child(parent: &Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(Rc::clone(parent)),
        })
    }

    /// Introduces or overwrites a binding in this (the nearest) frame.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Walks frames parent-ward, returning the nearest binding.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|p| p.lookup(name))
    }

    /// Updates the nearest existing binding; errors when none exists.
    pub fn set(&self, name: &str, value: Value) -> Result<(), EvalError> {
        if self.bindings.borrow().contains_key(name) {
            self.bindings.borrow_mut().insert(name.to_string(), value);
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.set(name, value),
            None => Err(EvalError::Unbound(name.to_string())),
        }
    }

    /// All names visible through the chain, nearest frame first, for
    /// help/introspection.
    pub fn keys(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.borrow().keys().cloned().collect();
        if let Some(parent) = &self.parent {
            for name in parent.keys() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}
