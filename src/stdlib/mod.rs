//! Standard library bootstrap: dialect-source definitions loaded into the
//! global environment before a script or REPL session starts.

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval;
use crate::parser;
use std::rc::Rc;

/// The bundled source, evaluated top to bottom against the fresh global
/// environment. Defines `if`/`when`/`when-not`/`progn`/`dotimes`/`foreach`/
/// `comment` as macros and the usual small list/numeric helpers as
/// functions, all built on the Rust builtins.
pub const SOURCE: &str = include_str!("core.lisp");

/// Parses and evaluates [`SOURCE`] against `env`, defining its macros and
/// functions. Returns an error if the bundled source fails to parse or a
/// form raises while loading (both would indicate a packaging bug, not
/// anything a caller can recover from).
pub fn load(env: &Rc<Environment>) -> Result<(), EvalError> {
    for form in parser::parse(SOURCE)? {
        eval::eval(form, env.clone())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use crate::parser::parse_one;
    use crate::value::Value;

    fn loaded_env() -> Rc<Environment> {
        let env = Environment::new();
        register_builtins(&env);
        load(&env).unwrap();
        env
    }

    fn run(env: &Rc<Environment>, src: &str) -> Value {
        eval::eval(parse_one(src).unwrap(), env.clone()).unwrap()
    }

    #[test]
    fn source_loads_without_error() {
        loaded_env();
    }

    #[test]
    fn if_macro_branches() {
        let env = loaded_env();
        assert_eq!(run(&env, "(if t 1 2)"), Value::int(1));
        assert_eq!(run(&env, "(if () 1 2)"), Value::int(2));
    }

    #[test]
    fn when_and_when_not() {
        let env = loaded_env();
        assert_eq!(run(&env, "(when t 1 2)"), Value::int(2));
        assert_eq!(run(&env, "(when () 1 2)"), Value::Nil);
        assert_eq!(run(&env, "(when-not () 1 2)"), Value::int(2));
    }

    #[test]
    fn progn_runs_forms_in_order_and_returns_the_last() {
        let env = loaded_env();
        assert_eq!(run(&env, "(progn (def x 1) (def x (+ x 1)) x)"), Value::int(2));
    }

    #[test]
    fn comment_is_ignored() {
        let env = loaded_env();
        assert_eq!(run(&env, "(progn (comment this is not evaluated) 5)"), Value::int(5));
    }

    #[test]
    fn dotimes_iterates_the_given_count() {
        let env = loaded_env();
        run(&env, "(def total 0)");
        run(&env, "(dotimes (i 5) (set! total (+ total i)))");
        assert_eq!(run(&env, "total"), Value::int(10));
    }

    #[test]
    fn foreach_visits_every_element() {
        let env = loaded_env();
        run(&env, "(def total 0)");
        run(&env, "(foreach (x '(1 2 3 4)) (set! total (+ total x)))");
        assert_eq!(run(&env, "total"), Value::int(10));
    }

    #[test]
    fn map_filter_reduce() {
        let env = loaded_env();
        assert_eq!(
            run(&env, "(map (lambda (x) (* x x)) '(1 2 3))"),
            Value::list(vec![Value::int(1), Value::int(4), Value::int(9)])
        );
        assert_eq!(
            run(&env, "(filter even? '(1 2 3 4 5 6))"),
            Value::list(vec![Value::int(2), Value::int(4), Value::int(6)])
        );
        assert_eq!(run(&env, "(reduce + 0 '(1 2 3 4))"), Value::int(10));
    }

    #[test]
    fn reverse_append_concat() {
        let env = loaded_env();
        assert_eq!(
            run(&env, "(reverse '(1 2 3))"),
            Value::list(vec![Value::int(3), Value::int(2), Value::int(1)])
        );
        assert_eq!(
            run(&env, "(append '(1 2) '(3 4))"),
            Value::list(vec![Value::int(1), Value::int(2), Value::int(3), Value::int(4)])
        );
        assert_eq!(
            run(&env, "(concat '(1) '(2 3) '(4))"),
            Value::list(vec![Value::int(1), Value::int(2), Value::int(3), Value::int(4)])
        );
    }

    #[test]
    fn range_nth_last_take_drop() {
        let env = loaded_env();
        assert_eq!(
            run(&env, "(range 0 5)"),
            Value::list(vec![
                Value::int(0),
                Value::int(1),
                Value::int(2),
                Value::int(3),
                Value::int(4)
            ])
        );
        assert_eq!(run(&env, "(nth '(10 20 30) 1)"), Value::int(20));
        assert_eq!(run(&env, "(last '(10 20 30))"), Value::int(30));
        assert_eq!(
            run(&env, "(take '(1 2 3 4 5) 2)"),
            Value::list(vec![Value::int(1), Value::int(2)])
        );
        assert_eq!(
            run(&env, "(drop '(1 2 3 4 5) 2)"),
            Value::list(vec![Value::int(3), Value::int(4), Value::int(5)])
        );
    }

    #[test]
    fn zip_and_member() {
        let env = loaded_env();
        assert_eq!(
            run(&env, "(zip '(1 2) '(a b))"),
            Value::list(vec![
                Value::list(vec![Value::int(1), Value::atom("a")]),
                Value::list(vec![Value::int(2), Value::atom("b")]),
            ])
        );
        assert_eq!(
            run(&env, "(member 2 '(1 2 3))"),
            Value::list(vec![Value::int(2), Value::int(3)])
        );
        assert_eq!(run(&env, "(member 9 '(1 2 3))"), Value::Nil);
    }

    #[test]
    fn compose_and_partial() {
        let env = loaded_env();
        run(&env, "(def add1 (lambda (x) (+ x 1)))");
        assert_eq!(run(&env, "((compose square add1) 2)"), Value::int(9));
        run(&env, "(def add (lambda (a b) (+ a b)))");
        assert_eq!(run(&env, "((partial add 10) 5)"), Value::int(15));
    }

    #[test]
    fn numeric_helpers() {
        let env = loaded_env();
        assert_eq!(run(&env, "(abs (- 0 5))"), Value::int(5));
        assert_eq!(run(&env, "(min 3 7)"), Value::int(3));
        assert_eq!(run(&env, "(max 3 7)"), Value::int(7));
        assert_eq!(run(&env, "(square 4)"), Value::int(16));
        assert_eq!(run(&env, "(cube 3)"), Value::int(27));
        assert_eq!(run(&env, "(even? 4)"), Value::t());
        assert_eq!(run(&env, "(odd? 4)"), Value::Nil);
        assert_eq!(run(&env, "(zero? 0)"), Value::t());
    }
}
