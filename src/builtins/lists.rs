//! List construction and inspection: `cons`, `car`, `cdr`, `list`, `len`,
//! `sort`, `sort-by`, `shuffle`, `apply`.

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval;
use crate::value::Value;
use lisp_macros::builtin;
use rand::seq::SliceRandom;
use std::cmp::Ordering;
use std::rc::Rc;

/// Prepends an element to a list.
///
/// # Examples
///
/// ```lisp
/// (cons 1 '(2 3)) => (1 2 3)
/// (cons 'a ()) => (a)
/// ```
#[builtin(name = "cons", min_arity = 2, max_arity = 2)]
pub fn cons(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::cons(args[0].clone(), args[1].clone()))
}

/// The first element of a cons cell; `nil` on an empty list.
///
/// # Examples
///
/// ```lisp
/// (car '(1 2 3)) => 1
/// (car ()) => ()
/// ```
#[builtin(name = "car", min_arity = 1, max_arity = 1)]
pub fn car(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Cons(pair) => Ok(pair.0.clone()),
        Value::Nil => Ok(Value::Nil),
        other => Err(EvalError::type_error("car", "a cons or nil", other)),
    }
}

/// Everything but the first element; `nil` on an empty list.
///
/// # Examples
///
/// ```lisp
/// (cdr '(1 2 3)) => (2 3)
/// (cdr ()) => ()
/// ```
#[builtin(name = "cdr", min_arity = 1, max_arity = 1)]
pub fn cdr(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Cons(pair) => Ok(pair.1.clone()),
        Value::Nil => Ok(Value::Nil),
        other => Err(EvalError::type_error("cdr", "a cons or nil", other)),
    }
}

/// Builds a proper list from its arguments.
///
/// # Examples
///
/// ```lisp
/// (list 1 2 3) => (1 2 3)
/// (list) => ()
/// ```
#[builtin(name = "list", min_arity = 0, variadic = true)]
pub fn list(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::list(args.to_vec()))
}

/// The number of elements in a proper list.
///
/// # Examples
///
/// ```lisp
/// (len '(1 2 3)) => 3
/// (len ()) => 0
/// ```
#[builtin(name = "len", min_arity = 1, max_arity = 1)]
pub fn len(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let n = args[0]
        .list_len()
        .ok_or_else(|| EvalError::type_error("len", "a proper list", &args[0]))?;
    Ok(Value::int(n as i64))
}

fn compare(a: &Value, b: &Value) -> Result<Ordering, EvalError> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(x.cmp(y)),
        (Value::Atom(x), Value::Atom(y)) => Ok(x.cmp(y)),
        _ => Err(EvalError::type_error("sort", "a list of numbers or atoms", a)),
    }
}

/// Sorts a list of numbers, or a list of atoms (lexicographically).
///
/// # Examples
///
/// ```lisp
/// (sort '(3 1 2)) => (1 2 3)
/// ```
#[builtin(name = "sort", min_arity = 1, max_arity = 1)]
pub fn sort(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut items = args[0].list_to_vec()?;
    let mut err = None;
    items.sort_by(|a, b| match compare(a, b) {
        Ok(ord) => ord,
        Err(e) => {
            err.get_or_insert(e);
            Ordering::Equal
        }
    });
    if let Some(e) = err {
        return Err(e);
    }
    Ok(Value::list(items))
}

/// Sorts a list by the numeric key a function assigns each element.
///
/// # Examples
///
/// ```lisp
/// (sort-by len '((1 2) (1) (1 2 3))) => ((1) (1 2) (1 2 3))
/// ```
#[builtin(name = "sort-by", min_arity = 2, max_arity = 2)]
pub fn sort_by(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    let key_fn = &args[0];
    let items = args[1].list_to_vec()?;
    let mut keyed = Vec::with_capacity(items.len());
    for item in items {
        let key = eval::apply(key_fn, vec![item.clone()], env)?;
        let key = key
            .as_number()
            .cloned()
            .ok_or_else(|| EvalError::type_error("sort-by", "a number", &key))?;
        keyed.push((key, item));
    }
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(Value::list(keyed.into_iter().map(|(_, v)| v)))
}

/// Returns a list with the same elements in random order.
///
/// # Examples
///
/// ```lisp
/// (len (shuffle '(1 2 3))) => 3
/// ```
#[builtin(name = "shuffle", min_arity = 1, max_arity = 1)]
pub fn shuffle(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut items = args[0].list_to_vec()?;
    items.shuffle(&mut rand::thread_rng());
    Ok(Value::list(items))
}

/// Calls a function with arguments taken from a list.
///
/// # Examples
///
/// ```lisp
/// (apply + '(1 2 3)) => 6
/// ```
#[builtin(name = "apply", min_arity = 2, max_arity = 2)]
pub fn apply(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    let callable = &args[0];
    let call_args = args[1].list_to_vec()?;
    eval::apply(callable, call_args, env)
}

pub fn register(env: &Rc<Environment>) {
    env.define("cons", Value::Builtin(Rc::new(cons_spec())));
    env.define("car", Value::Builtin(Rc::new(car_spec())));
    env.define("cdr", Value::Builtin(Rc::new(cdr_spec())));
    env.define("list", Value::Builtin(Rc::new(list_spec())));
    env.define("len", Value::Builtin(Rc::new(len_spec())));
    env.define("sort", Value::Builtin(Rc::new(sort_spec())));
    env.define("sort-by", Value::Builtin(Rc::new(sort_by_spec())));
    env.define("shuffle", Value::Builtin(Rc::new(shuffle_spec())));
    env.define("apply", Value::Builtin(Rc::new(apply_spec())));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cons_car_cdr_round_trip() {
        let env = Environment::new();
        let built = cons(&[Value::int(1), Value::list(vec![Value::int(2)])], &env).unwrap();
        assert_eq!(car(&[built.clone()], &env).unwrap(), Value::int(1));
        assert_eq!(cdr(&[built], &env).unwrap(), Value::list(vec![Value::int(2)]));
    }

    #[test]
    fn car_and_cdr_of_nil_are_nil() {
        let env = Environment::new();
        assert_eq!(car(&[Value::Nil], &env).unwrap(), Value::Nil);
        assert_eq!(cdr(&[Value::Nil], &env).unwrap(), Value::Nil);
    }

    #[test]
    fn len_counts_proper_list() {
        let env = Environment::new();
        let v = Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]);
        assert_eq!(len(&[v], &env).unwrap(), Value::int(3));
    }

    #[test]
    fn sort_orders_numbers_ascending() {
        let env = Environment::new();
        let v = Value::list(vec![Value::int(3), Value::int(1), Value::int(2)]);
        let sorted = sort(&[v], &env).unwrap();
        assert_eq!(
            sorted,
            Value::list(vec![Value::int(1), Value::int(2), Value::int(3)])
        );
    }
}
