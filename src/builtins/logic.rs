//! Logical negation. `and`/`or` are special forms (see `eval.rs`) since
//! they must short-circuit without evaluating every argument.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use lisp_macros::builtin;
use std::rc::Rc;

/// Negation. `nil` is the only falsy value.
///
/// # Examples
///
/// ```lisp
/// (not ()) => t
/// (not 5) => ()
/// ```
#[builtin(name = "not", min_arity = 1, max_arity = 1)]
pub fn not(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::from_bool(!args[0].is_truthy()))
}

pub fn register(env: &Rc<Environment>) {
    env.define("not", Value::Builtin(Rc::new(not_spec())));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_inverts_truthiness() {
        let env = Environment::new();
        assert_eq!(not(&[Value::Nil], &env).unwrap(), Value::t());
        assert_eq!(not(&[Value::int(5)], &env).unwrap(), Value::Nil);
    }
}
