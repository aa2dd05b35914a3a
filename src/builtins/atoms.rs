//! Atom and number utilities: `fuse`, `split`, `upcase`, `downcase`,
//! `gensym`. Type predicates `atom?`/`number?` live in `types.rs`.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use lisp_macros::builtin;
use num_bigint::BigInt;
use std::cell::Cell;
use std::rc::Rc;
use std::str::FromStr;

/// Parses a printed form as a Number if it looks numeric, else as an Atom.
pub(crate) fn parse_fused(text: &str) -> Value {
    let looks_numeric = match text.strip_prefix('-') {
        Some(rest) => rest.starts_with(|c: char| c.is_ascii_digit()),
        None => text.starts_with(|c: char| c.is_ascii_digit()),
    };
    if looks_numeric {
        if let Ok(n) = BigInt::from_str(text) {
            return Value::Number(n);
        }
    }
    Value::atom(text)
}

/// Concatenates the printed forms of every element of a list into one
/// value, parsed as a Number if the text looks numeric, else as an Atom.
///
/// # Examples
///
/// ```lisp
/// (fuse '(1 2 3)) => 123
/// (fuse '(a b c)) => abc
/// ```
#[builtin(name = "fuse", min_arity = 1, max_arity = 1)]
pub fn fuse(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let items = args[0].list_to_vec()?;
    let text: String = items.iter().map(|v| v.to_string()).collect();
    Ok(parse_fused(&text))
}

/// Splits the printed form of a value into a list of its characters, each
/// parsed the same way `fuse` parses its pieces.
///
/// # Examples
///
/// ```lisp
/// (fuse (split 1295807125987)) => 1295807125987
/// ```
#[builtin(name = "split", min_arity = 1, max_arity = 1)]
pub fn split(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let text = args[0].to_string();
    Ok(Value::list(
        text.chars().map(|c| parse_fused(&c.to_string())),
    ))
}

/// Uppercases an atom's name.
///
/// # Examples
///
/// ```lisp
/// (upcase 'hello) => HELLO
/// ```
#[builtin(name = "upcase", min_arity = 1, max_arity = 1)]
pub fn upcase(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let name = args[0]
        .as_atom_name()
        .ok_or_else(|| EvalError::type_error("upcase", "an atom", &args[0]))?;
    Ok(Value::atom(name.to_uppercase()))
}

/// Lowercases an atom's name.
///
/// # Examples
///
/// ```lisp
/// (downcase 'HELLO) => hello
/// ```
#[builtin(name = "downcase", min_arity = 1, max_arity = 1)]
pub fn downcase(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let name = args[0]
        .as_atom_name()
        .ok_or_else(|| EvalError::type_error("downcase", "an atom", &args[0]))?;
    Ok(Value::atom(name.to_lowercase()))
}

thread_local! {
    static GENSYM_COUNTER: Cell<u64> = Cell::new(0);
}

/// A fresh atom guaranteed not to collide with any prior `gensym` call,
/// optionally prefixed.
///
/// # Examples
///
/// ```lisp
/// (atom? (gensym)) => t
/// ```
#[builtin(name = "gensym", min_arity = 0, max_arity = 1)]
pub fn gensym(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let prefix = match args.first() {
        Some(v) => v
            .as_atom_name()
            .ok_or_else(|| EvalError::type_error("gensym", "an atom", v))?
            .to_string(),
        None => "g".to_string(),
    };
    let n = GENSYM_COUNTER.with(|c| {
        let n = c.get();
        c.set(n + 1);
        n
    });
    Ok(Value::atom(format!("{prefix}{n}")))
}

pub fn register(env: &Rc<Environment>) {
    env.define("fuse", Value::Builtin(Rc::new(fuse_spec())));
    env.define("split", Value::Builtin(Rc::new(split_spec())));
    env.define("upcase", Value::Builtin(Rc::new(upcase_spec())));
    env.define("downcase", Value::Builtin(Rc::new(downcase_spec())));
    env.define("gensym", Value::Builtin(Rc::new(gensym_spec())));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuse_concatenates_digits_into_a_number() {
        let env = Environment::new();
        let v = Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]);
        assert_eq!(fuse(&[v], &env).unwrap(), Value::int(123));
    }

    #[test]
    fn fuse_concatenates_atoms_into_an_atom() {
        let env = Environment::new();
        let v = Value::list(vec![Value::atom("a"), Value::atom("b")]);
        assert_eq!(fuse(&[v], &env).unwrap(), Value::atom("ab"));
    }

    #[test]
    fn split_then_fuse_round_trips_a_number() {
        let env = Environment::new();
        let n = Value::Number(BigInt::from_str("1295807125987").unwrap());
        let pieces = split(&[n.clone()], &env).unwrap();
        assert_eq!(fuse(&[pieces], &env).unwrap(), n);
    }

    #[test]
    fn gensym_never_repeats() {
        let env = Environment::new();
        let a = gensym(&[], &env).unwrap();
        let b = gensym(&[], &env).unwrap();
        assert_ne!(a, b);
    }
}
