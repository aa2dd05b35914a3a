//! Input/output and host interaction: `print`, `println`, `printl`,
//! `readlist`, `load`, `eval`, `sleep`, `randint`, `exit`.

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval;
use crate::value::Value;
use lisp_macros::builtin;
use num_traits::ToPrimitive;
use rand::Rng;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::time::Duration;

/// Prints each argument separated by a space, with no trailing newline.
/// Returns the last argument, or `nil` if called with none.
///
/// # Examples
///
/// ```lisp
/// (print 'hello 'world) => world
/// ```
#[builtin(name = "print", min_arity = 0, variadic = true)]
pub fn print(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let text: Vec<String> = args.iter().map(|v| v.to_string()).collect();
    print!("{}", text.join(" "));
    io::stdout().flush().ok();
    Ok(args.last().cloned().unwrap_or(Value::Nil))
}

/// Like `print`, but followed by a newline.
///
/// # Examples
///
/// ```lisp
/// (println 'hello) => hello
/// ```
#[builtin(name = "println", min_arity = 0, variadic = true)]
pub fn println_(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let text: Vec<String> = args.iter().map(|v| v.to_string()).collect();
    println!("{}", text.join(" "));
    Ok(args.last().cloned().unwrap_or(Value::Nil))
}

/// Prints each element of a list on its own line.
///
/// # Examples
///
/// ```lisp
/// (printl '(1 2 3)) => ()
/// ```
#[builtin(name = "printl", min_arity = 1, max_arity = 1)]
pub fn printl(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    for item in args[0].list_to_vec()? {
        println!("{}", item);
    }
    Ok(Value::Nil)
}

/// Reads one line from standard input and parses it as a list of atoms
/// and numbers, whitespace-separated. Returns `nil` at end of input.
///
/// # Examples
///
/// ```lisp
/// (readlist) => (reads a line, e.g. (1 2 3))
/// ```
#[builtin(name = "readlist", min_arity = 0, max_arity = 0)]
pub fn readlist(_args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut line = String::new();
    let n = io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| EvalError::domain_error("readlist", e.to_string()))?;
    if n == 0 {
        return Ok(Value::Nil);
    }
    Ok(Value::list(
        line.split_whitespace()
            .map(crate::builtins::atoms::parse_fused),
    ))
}

/// Reads a file and evaluates each form in it against the current
/// environment in order, returning the value of the last one.
///
/// # Examples
///
/// ```lisp
/// (load "helpers.lisp") => (last form's value)
/// ```
#[builtin(name = "load", min_arity = 1, max_arity = 1)]
pub fn load(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    let path = args[0]
        .as_atom_name()
        .ok_or_else(|| EvalError::type_error("load", "an atom naming a path", &args[0]))?;
    let text = std::fs::read_to_string(path)
        .map_err(|e| EvalError::domain_error("load", format!("{path}: {e}")))?;
    let forms = crate::parser::parse(&text)?;
    let mut result = Value::Nil;
    for form in forms {
        result = eval::eval(form, env.clone())?;
    }
    Ok(result)
}

/// Evaluates a value as code in the current environment.
///
/// # Examples
///
/// ```lisp
/// (eval '(+ 1 2)) => 3
/// ```
#[builtin(name = "eval", min_arity = 1, max_arity = 1)]
pub fn eval_builtin(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    eval::eval(args[0].clone(), env.clone())
}

/// Sleeps for the given number of milliseconds, returning `nil`.
///
/// # Examples
///
/// ```lisp
/// (sleep 0) => ()
/// ```
#[builtin(name = "sleep", min_arity = 1, max_arity = 1)]
pub fn sleep(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let ms = args[0]
        .as_number()
        .ok_or_else(|| EvalError::type_error("sleep", "a number", &args[0]))?;
    let ms = ms.to_u64().ok_or_else(|| {
        EvalError::domain_error("sleep", "duration out of range")
    })?;
    std::thread::sleep(Duration::from_millis(ms));
    Ok(Value::Nil)
}

/// A random integer in `[low, high)`.
///
/// # Examples
///
/// ```lisp
/// (< (randint 0 10) 10) => t
/// ```
#[builtin(name = "randint", min_arity = 2, max_arity = 2)]
pub fn randint(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let low = args[0]
        .as_number()
        .and_then(|n| n.to_i64())
        .ok_or_else(|| EvalError::type_error("randint", "an i64-range number", &args[0]))?;
    let high = args[1]
        .as_number()
        .and_then(|n| n.to_i64())
        .ok_or_else(|| EvalError::type_error("randint", "an i64-range number", &args[1]))?;
    if low >= high {
        return Err(EvalError::domain_error("randint", "low must be less than high"));
    }
    Ok(Value::int(rand::thread_rng().gen_range(low..high)))
}

/// Terminates the process immediately with the given exit code (0 if
/// omitted).
///
/// # Examples
///
/// ```lisp
/// (exit 0)
/// ```
#[builtin(name = "exit", min_arity = 0, max_arity = 1)]
pub fn exit(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let code = match args.first() {
        Some(v) => v
            .as_number()
            .and_then(|n| n.to_i32())
            .ok_or_else(|| EvalError::type_error("exit", "a number", v))?,
        None => 0,
    };
    std::process::exit(code);
}

pub fn register(env: &Rc<Environment>) {
    env.define("print", Value::Builtin(Rc::new(print_spec())));
    env.define("println", Value::Builtin(Rc::new(println__spec())));
    env.define("printl", Value::Builtin(Rc::new(printl_spec())));
    env.define("readlist", Value::Builtin(Rc::new(readlist_spec())));
    env.define("load", Value::Builtin(Rc::new(load_spec())));
    env.define("eval", Value::Builtin(Rc::new(eval_builtin_spec())));
    env.define("sleep", Value::Builtin(Rc::new(sleep_spec())));
    env.define("randint", Value::Builtin(Rc::new(randint_spec())));
    env.define("exit", Value::Builtin(Rc::new(exit_spec())));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_returns_its_last_argument() {
        let env = Environment::new();
        assert_eq!(
            print(&[Value::atom("a"), Value::atom("b")], &env).unwrap(),
            Value::atom("b")
        );
    }

    #[test]
    fn eval_builtin_evaluates_its_argument() {
        let env = Environment::new();
        crate::builtins::register_builtins(&env);
        let form = Value::list(vec![Value::atom("+"), Value::int(1), Value::int(2)]);
        assert_eq!(eval_builtin(&[form], &env).unwrap(), Value::int(3));
    }

    #[test]
    fn randint_stays_within_bounds() {
        let env = Environment::new();
        for _ in 0..20 {
            let n = randint(&[Value::int(0), Value::int(10)], &env).unwrap();
            let n = n.as_number().unwrap().to_i64().unwrap();
            assert!((0..10).contains(&n));
        }
    }

    #[test]
    fn randint_rejects_empty_range() {
        let env = Environment::new();
        assert!(randint(&[Value::int(5), Value::int(5)], &env).is_err());
    }
}
