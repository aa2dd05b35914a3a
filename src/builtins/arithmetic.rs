//! Arithmetic operations: `+`, `-`, `*`, `/`, `rem`, `isqrt`.
//!
//! All numbers are arbitrary-precision integers (`BigInt`); there is no
//! floating point in this dialect.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use lisp_macros::builtin;
use num_bigint::BigInt;
use num_integer::Roots;
use num_traits::Zero;
use std::rc::Rc;

fn number_arg(function: &str, v: &Value) -> Result<&BigInt, EvalError> {
    v.as_number()
        .ok_or_else(|| EvalError::type_error(function, "number", v))
}

/// Sums all arguments; the identity with no arguments is `0`.
///
/// # Examples
///
/// ```lisp
/// (+ 1 2 3) => 6
/// (+) => 0
/// ```
#[builtin(name = "+", min_arity = 0, variadic = true)]
pub fn add(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut sum = BigInt::zero();
    for a in args {
        sum += number_arg("+", a)?;
    }
    Ok(Value::Number(sum))
}

/// Subtracts every later argument from the first; negates a single argument.
///
/// # Examples
///
/// ```lisp
/// (- 10 3 2) => 5
/// (- 5) => -5
/// ```
#[builtin(name = "-", min_arity = 1, variadic = true)]
pub fn sub(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let first = number_arg("-", &args[0])?.clone();
    if args.len() == 1 {
        return Ok(Value::Number(-first));
    }
    let mut result = first;
    for a in &args[1..] {
        result -= number_arg("-", a)?;
    }
    Ok(Value::Number(result))
}

/// Multiplies all arguments; the identity with no arguments is `1`.
///
/// # Examples
///
/// ```lisp
/// (* 2 3 4) => 24
/// (*) => 1
/// ```
#[builtin(name = "*", min_arity = 0, variadic = true)]
pub fn mul(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut product = BigInt::from(1);
    for a in args {
        product *= number_arg("*", a)?;
    }
    Ok(Value::Number(product))
}

/// Integer-divides the first argument by each later argument in turn.
///
/// # Examples
///
/// ```lisp
/// (/ 20 4) => 5
/// (/ 100 2 5) => 10
/// ```
#[builtin(name = "/", min_arity = 1, variadic = true)]
pub fn div(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut result = number_arg("/", &args[0])?.clone();
    for a in &args[1..] {
        let divisor = number_arg("/", a)?;
        if divisor.is_zero() {
            return Err(EvalError::domain_error("/", "division by zero"));
        }
        result /= divisor;
    }
    Ok(Value::Number(result))
}

/// Remainder of dividing the first argument by the second.
///
/// # Examples
///
/// ```lisp
/// (rem 17 5) => 2
/// (rem 10 3) => 1
/// ```
#[builtin(name = "rem", min_arity = 2, max_arity = 2)]
pub fn rem(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let a = number_arg("rem", &args[0])?;
    let b = number_arg("rem", &args[1])?;
    if b.is_zero() {
        return Err(EvalError::domain_error("rem", "division by zero"));
    }
    Ok(Value::Number(a % b))
}

/// Integer square root, truncated toward zero.
///
/// # Examples
///
/// ```lisp
/// (isqrt 17) => 4
/// (isqrt 9) => 3
/// ```
#[builtin(name = "isqrt", min_arity = 1, max_arity = 1)]
pub fn isqrt(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let n = number_arg("isqrt", &args[0])?;
    if n.sign() == num_bigint::Sign::Minus {
        return Err(EvalError::domain_error("isqrt", "argument must not be negative"));
    }
    Ok(Value::Number(n.sqrt()))
}

pub fn register(env: &Rc<Environment>) {
    env.define("+", Value::Builtin(Rc::new(add_spec())));
    env.define("-", Value::Builtin(Rc::new(sub_spec())));
    env.define("*", Value::Builtin(Rc::new(mul_spec())));
    env.define("/", Value::Builtin(Rc::new(div_spec())));
    env.define("rem", Value::Builtin(Rc::new(rem_spec())));
    env.define("isqrt", Value::Builtin(Rc::new(isqrt_spec())));
}
