use std::collections::HashMap;

use crate::{
    error::EvaluationErrorKind,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// The single flat variable store shared by a whole program run.
///
/// Every block, loop body and branch reads and writes the same bindings, so a
/// name declared inside a loop is still visible after it. A binding whose last
/// assignment failed to evaluate is kept but marked as having no value.
#[derive(Debug, Default, Clone)]
pub struct Environment {
    bindings: HashMap<String, Option<Value>>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`, creating or overwriting the binding.
    pub fn define(&mut self, name: &str, value: Value) {
        tracing::trace!(name, %value, "bind");
        self.bindings.insert(name.to_string(), Some(value));
    }

    /// Marks `name` as bound without a usable value.
    pub fn mark_unavailable(&mut self, name: &str) {
        tracing::trace!(name, "bind unavailable");
        self.bindings.insert(name.to_string(), None);
    }

    /// Reads the current value of `name`.
    ///
    /// The value is copied out; later writes to `name` do not affect it.
    ///
    /// # Errors
    /// `UndefinedIdentifier` if `name` was never bound, `Unavailable` if its
    /// last assignment failed.
    ///
    /// # Example
    /// ```
    /// use hinglish::interpreter::{environment::Environment, value::Value};
    ///
    /// let mut env = Environment::new();
    /// env.define("x", Value::Int(5));
    /// let before = env.lookup("x").unwrap();
    /// env.define("x", Value::Int(6));
    ///
    /// assert_eq!(before, Value::Int(5));
    /// assert_eq!(env.lookup("x").unwrap(), Value::Int(6));
    /// assert!(env.lookup("y").is_err());
    /// ```
    pub fn lookup(&self, name: &str) -> EvalResult<Value> {
        match self.bindings.get(name) {
            Some(Some(value)) => Ok(value.clone()),
            Some(None) => Err(EvaluationErrorKind::Unavailable { name: name.to_string() }),
            None => Err(EvaluationErrorKind::UndefinedIdentifier { name: name.to_string() }),
        }
    }

    /// Borrows the value of `name` if it is bound to one.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name).and_then(Option::as_ref)
    }

    /// Whether `name` has a binding, usable or not.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing has been bound yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
