//! Introspection: `doc`, `body`, `source`, `forms`, `macroexpand-1`,
//! `version`, `help`.
//!
//! These builtins let source-language code inspect the callables living in
//! the environment — its own lambdas and macros, and the registry of
//! builtins — the same data the help formatter (`crate::help`) renders.

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::macroexpand_1;
use crate::value::Value;
use lisp_macros::builtin;
use std::rc::Rc;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn words(text: &str) -> Value {
    Value::list(text.split_whitespace().map(Value::atom))
}

/// The documentation of a callable, as a list of atoms (its docstring split
/// on whitespace), or `nil` if it has none.
///
/// # Examples
///
/// ```lisp
/// (doc car) => (the first element ...)
/// ```
#[builtin(name = "doc", min_arity = 1, max_arity = 1)]
pub fn doc(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Builtin(spec) => Ok(words(spec.doc)),
        Value::Lambda(data) => Ok(match &data.doc {
            Some(lines) => Value::list(lines.iter().map(words)),
            None => Value::Nil,
        }),
        other => Err(EvalError::type_error("doc", "a builtin or lambda", other)),
    }
}

/// The body of a lambda, as a proper list of its (unevaluated) expressions.
///
/// # Examples
///
/// ```lisp
/// (body (lambda (x) (+ x 1))) => ((+ x 1))
/// ```
#[builtin(name = "body", min_arity = 1, max_arity = 1)]
pub fn body(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Lambda(data) => Ok(Value::list(data.body.clone())),
        other => Err(EvalError::type_error("body", "a lambda", other)),
    }
}

/// The full syntactic form of a lambda, reparsed from its printed
/// representation: `(lambda (params...) body...)`.
///
/// # Examples
///
/// ```lisp
/// (source (lambda (x) x)) => (lambda (x) x)
/// ```
#[builtin(name = "source", min_arity = 1, max_arity = 1)]
pub fn source(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Lambda(_) => crate::parser::parse_one(&args[0].to_string())
            .map_err(|_| EvalError::domain_error("source", "lambda source did not re-parse")),
        other => Err(EvalError::type_error("source", "a lambda", other)),
    }
}

/// The parameter list of a callable: fixed names followed by the rest
/// name if variadic, as a list (or a dotted pair when there is a rest).
///
/// # Examples
///
/// ```lisp
/// (forms (lambda (x y) x)) => (x y)
/// ```
#[builtin(name = "forms", min_arity = 1, max_arity = 1)]
pub fn forms(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Lambda(data) => {
            let params = data.params.iter().map(|p| Value::atom(p.as_ref()));
            Ok(match &data.rest {
                None => Value::list(params),
                Some(rest) => {
                    let mut result = Value::atom(rest.as_ref());
                    for p in data.params.iter().rev() {
                        result = Value::cons(Value::atom(p.as_ref()), result);
                    }
                    result
                }
            })
        }
        other => Err(EvalError::type_error("forms", "a lambda", other)),
    }
}

/// Expands a quoted macro call form one level; returns the form unchanged
/// if its head is not bound to a macro.
///
/// # Examples
///
/// ```lisp
/// (defmacro ignore-car (l) (cdr l))
/// (macroexpand-1 '(ignore-car (x * 2 3 4))) => (* 2 3 4)
/// ```
#[builtin(name = "macroexpand-1", min_arity = 1, max_arity = 1)]
pub fn macroexpand_1_builtin(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    macroexpand_1(&args[0], env)
}

/// The interpreter's version, as an atom.
///
/// # Examples
///
/// ```lisp
/// (atom? (version)) => t
/// ```
#[builtin(name = "version", min_arity = 0, max_arity = 0)]
pub fn version(_args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::atom(VERSION))
}

/// With no arguments, prints a short tabular listing of every installed
/// special form and builtin; with one atom argument, prints the long-form
/// documentation for that name. Always returns `nil`.
///
/// # Examples
///
/// ```lisp
/// (help 'car) => prints car's documentation
/// ```
#[builtin(name = "help", min_arity = 0, max_arity = 1)]
pub fn help(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    match args.first() {
        None => println!("{}", crate::help::quick_reference(env)),
        Some(name) => {
            let name = name
                .as_atom_name()
                .ok_or_else(|| EvalError::type_error("help", "an atom naming a function", name))?;
            println!("{}", crate::help::entry_for(env, name));
        }
    }
    Ok(Value::Nil)
}

pub fn register(env: &Rc<Environment>) {
    env.define("doc", Value::Builtin(Rc::new(doc_spec())));
    env.define("body", Value::Builtin(Rc::new(body_spec())));
    env.define("source", Value::Builtin(Rc::new(source_spec())));
    env.define("forms", Value::Builtin(Rc::new(forms_spec())));
    env.define(
        "macroexpand-1",
        Value::Builtin(Rc::new(macroexpand_1_builtin_spec())),
    );
    env.define("version", Value::Builtin(Rc::new(version_spec())));
    env.define("help", Value::Builtin(Rc::new(help_spec())));
}
