//! Comparisons: structural equality `=` and the numeric ordering chain
//! `< <= > >=`.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use lisp_macros::builtin;
use num_bigint::BigInt;
use std::rc::Rc;

fn number_arg(function: &str, v: &Value) -> Result<&BigInt, EvalError> {
    v.as_number()
        .ok_or_else(|| EvalError::type_error(function, "number", v))
}

fn chain(function: &str, args: &[Value], ok: impl Fn(&BigInt, &BigInt) -> bool) -> Result<Value, EvalError> {
    for pair in args.windows(2) {
        let a = number_arg(function, &pair[0])?;
        let b = number_arg(function, &pair[1])?;
        if !ok(a, b) {
            return Ok(Value::Nil);
        }
    }
    Ok(Value::t())
}

/// Structural equality. Any two values may be compared; numbers compare
/// by value, atoms by name, lists element-by-element.
///
/// # Examples
///
/// ```lisp
/// (= 1 1 1) => t
/// (= 'a 'a) => t
/// (= 1 2) => ()
/// ```
#[builtin(name = "=", min_arity = 1, variadic = true)]
pub fn eq(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::from_bool(args.windows(2).all(|pair| pair[0] == pair[1])))
}

/// Strictly increasing numeric chain.
///
/// # Examples
///
/// ```lisp
/// (< 1 2 3) => t
/// (< 1 1) => ()
/// ```
#[builtin(name = "<", min_arity = 1, variadic = true)]
pub fn lt(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    chain("<", args, |a, b| a < b)
}

/// Strictly decreasing numeric chain.
///
/// # Examples
///
/// ```lisp
/// (> 3 2 1) => t
/// ```
#[builtin(name = ">", min_arity = 1, variadic = true)]
pub fn gt(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    chain(">", args, |a, b| a > b)
}

/// Non-decreasing numeric chain.
///
/// # Examples
///
/// ```lisp
/// (<= 1 1 2) => t
/// ```
#[builtin(name = "<=", min_arity = 1, variadic = true)]
pub fn le(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    chain("<=", args, |a, b| a <= b)
}

/// Non-increasing numeric chain.
///
/// # Examples
///
/// ```lisp
/// (>= 2 2 1) => t
/// ```
#[builtin(name = ">=", min_arity = 1, variadic = true)]
pub fn ge(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    chain(">=", args, |a, b| a >= b)
}

pub fn register(env: &Rc<Environment>) {
    env.define("=", Value::Builtin(Rc::new(eq_spec())));
    env.define("<", Value::Builtin(Rc::new(lt_spec())));
    env.define(">", Value::Builtin(Rc::new(gt_spec())));
    env.define("<=", Value::Builtin(Rc::new(le_spec())));
    env.define(">=", Value::Builtin(Rc::new(ge_spec())));
}
