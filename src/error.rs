// ABOUTME: Error types for evaluation failures in the Lisp interpreter

use crate::value::Value;
use thiserror::Error;

/// The error kinds a running interpreter can raise (§7 of the design).
#[derive(Error, Debug, Clone)]
pub enum EvalError {
    /// Malformed token or unbalanced list; carries a position.
    #[error("parse error at {position}: {message}")]
    Parse { message: String, position: usize },

    #[error("unbound atom: {0}")]
    Unbound(String),

    /// A builtin or special form received a value of the wrong shape.
    #[error("{function}: expected {expected}, got {actual}")]
    Type {
        function: String,
        expected: String,
        actual: String,
    },

    /// Wrong number of arguments to a lambda or builtin.
    #[error("{function}: expected {expected} argument{}, got {actual}", if expected == "1" { "" } else { "s" })]
    Arity {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Division by zero, empty-argument where one is required, etc.
    #[error("{function}: {message}")]
    Domain { function: String, message: String },

    /// Raised by `(error msg-list)`; message is the list argument itself,
    /// kept as a `Value` so `try`'s catch clause can bind it back unchanged.
    #[error("{0}")]
    User(Value),

    /// An `errors` block did not observe the expected substring pattern.
    #[error("expected error matching {pattern:?}, got: {actual}")]
    CatchMismatch { pattern: Vec<String>, actual: String },

    /// Wraps an inner error with the printed form of the expression being
    /// evaluated when it propagated through a non-tail call site.
    #[error("ERROR in '{form}': {inner}")]
    Context { form: String, inner: Box<EvalError> },

    /// Head of a call position evaluated to something uncallable.
    #[error("{0} is not a function")]
    NotCallable(String),

    /// `unquote`/`splicing-unquote` seen at syntax-quote nesting depth 0.
    #[error("unquote not inside syntax-quote")]
    UnquoteOutsideSyntaxQuote,
}

impl EvalError {
    pub fn type_error(function: &str, expected: &str, actual: &Value) -> Self {
        EvalError::Type {
            function: function.to_string(),
            expected: expected.to_string(),
            actual: actual.type_name().to_string(),
        }
    }

    pub fn arity_error(function: &str, expected: impl Into<String>, actual: usize) -> Self {
        EvalError::Arity {
            function: function.to_string(),
            expected: expected.into(),
            actual,
        }
    }

    pub fn domain_error(function: &str, message: impl Into<String>) -> Self {
        EvalError::Domain {
            function: function.to_string(),
            message: message.into(),
        }
    }

    /// Prepend context naming the printed form under evaluation, producing
    /// the `ERROR in '<outer>': ERROR in '<inner>': <origin>` chain of §7.
    pub fn with_context(self, form: &Value) -> Self {
        EvalError::Context {
            form: form.to_string(),
            inner: Box::new(self),
        }
    }

    /// Does the full printed message contain every pattern substring, as
    /// used by the `errors` special form?
    pub fn matches_patterns(&self, patterns: &[String]) -> bool {
        let text = self.to_string();
        patterns.iter().all(|p| text.contains(p.as_str()))
    }

    /// The list `try`'s catch clause binds its error name to: the words of
    /// the innermost (context-unwrapped) message, as a list of atoms.
    pub fn message_value(&self) -> Value {
        match self {
            EvalError::Context { inner, .. } => inner.message_value(),
            EvalError::User(message) if message.is_proper_list() => message.clone(),
            EvalError::User(message) => Value::list(vec![message.clone()]),
            other => Value::list(other.to_string().split_whitespace().map(Value::atom)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_wraps_message() {
        let inner = EvalError::Unbound("x".to_string());
        let wrapped = inner.with_context(&Value::atom("x"));
        assert_eq!(wrapped.to_string(), "ERROR in 'x': unbound atom: x");
    }

    #[test]
    fn arity_message_pluralizes() {
        let e = EvalError::arity_error("f", "1", 2);
        assert_eq!(e.to_string(), "f: expected 1 argument, got 2");
        let e = EvalError::arity_error("f", "2", 1);
        assert_eq!(e.to_string(), "f: expected 2 arguments, got 1");
    }

    #[test]
    fn pattern_matching_checks_substrings() {
        let e = EvalError::NotCallable("(1)".to_string());
        assert!(e.matches_patterns(&["is not a function".to_string()]));
        assert!(!e.matches_patterns(&["unbound".to_string()]));
    }
}
