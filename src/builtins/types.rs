//! Type predicates over the five runtime value shapes.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use lisp_macros::builtin;
use std::rc::Rc;

/// Tests whether a value is an atom (a symbol, not `nil`).
///
/// # Examples
///
/// ```lisp
/// (atom? 'x) => t
/// (atom? '(1 2)) => ()
/// ```
#[builtin(name = "atom?", min_arity = 1, max_arity = 1)]
pub fn atom_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::from_bool(matches!(&args[0], Value::Atom(_))))
}

/// Tests whether a value is a number.
///
/// # Examples
///
/// ```lisp
/// (number? 42) => t
/// (number? 'x) => ()
/// ```
#[builtin(name = "number?", min_arity = 1, max_arity = 1)]
pub fn number_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::from_bool(matches!(&args[0], Value::Number(_))))
}

/// Tests whether a value is a cons cell (a non-empty pair).
///
/// # Examples
///
/// ```lisp
/// (cons? (cons 1 2)) => t
/// (cons? ()) => ()
/// ```
#[builtin(name = "cons?", min_arity = 1, max_arity = 1)]
pub fn cons_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::from_bool(matches!(&args[0], Value::Cons(_))))
}

/// Tests whether a value is `nil`, the empty list.
///
/// # Examples
///
/// ```lisp
/// (nil? ()) => t
/// (nil? '(1)) => ()
/// ```
#[builtin(name = "nil?", min_arity = 1, max_arity = 1)]
pub fn nil_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::from_bool(args[0].is_nil()))
}

/// Tests whether a value is a proper list (`nil` or a chain of cons
/// cells ending in `nil`).
///
/// # Examples
///
/// ```lisp
/// (list? '(1 2)) => t
/// (list? (cons 1 2)) => ()
/// ```
#[builtin(name = "list?", min_arity = 1, max_arity = 1)]
pub fn list_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::from_bool(args[0].is_proper_list()))
}

/// Tests whether a value is a callable builtin.
///
/// # Examples
///
/// ```lisp
/// (builtin? car) => t
/// ```
#[builtin(name = "builtin?", min_arity = 1, max_arity = 1)]
pub fn builtin_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::from_bool(matches!(&args[0], Value::Builtin(_))))
}

/// Tests whether a value is a lambda (ordinary function, not a macro).
///
/// # Examples
///
/// ```lisp
/// (lambda? (lambda (x) x)) => t
/// ```
#[builtin(name = "lambda?", min_arity = 1, max_arity = 1)]
pub fn lambda_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::from_bool(
        matches!(&args[0], Value::Lambda(data) if !data.is_macro),
    ))
}

/// Tests whether a value is a macro.
///
/// # Examples
///
/// ```lisp
/// (defmacro m (x) x)
/// (macro? m) => t
/// ```
#[builtin(name = "macro?", min_arity = 1, max_arity = 1)]
pub fn macro_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::from_bool(
        matches!(&args[0], Value::Lambda(data) if data.is_macro),
    ))
}

pub fn register(env: &Rc<Environment>) {
    env.define("atom?", Value::Builtin(Rc::new(atom_p_spec())));
    env.define("number?", Value::Builtin(Rc::new(number_p_spec())));
    env.define("cons?", Value::Builtin(Rc::new(cons_p_spec())));
    env.define("nil?", Value::Builtin(Rc::new(nil_p_spec())));
    env.define("list?", Value::Builtin(Rc::new(list_p_spec())));
    env.define("builtin?", Value::Builtin(Rc::new(builtin_p_spec())));
    env.define("lambda?", Value::Builtin(Rc::new(lambda_p_spec())));
    env.define("macro?", Value::Builtin(Rc::new(macro_p_spec())));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_match_value_shapes() {
        let env = Environment::new();
        assert_eq!(atom_p(&[Value::atom("x")], &env).unwrap(), Value::t());
        assert_eq!(number_p(&[Value::int(1)], &env).unwrap(), Value::t());
        assert_eq!(nil_p(&[Value::Nil], &env).unwrap(), Value::t());
        assert_eq!(
            list_p(&[Value::list(vec![Value::int(1)])], &env).unwrap(),
            Value::t()
        );
        assert_eq!(
            cons_p(&[Value::cons(Value::int(1), Value::int(2))], &env).unwrap(),
            Value::t()
        );
        assert_eq!(cons_p(&[Value::Nil], &env).unwrap(), Value::Nil);
    }
}
