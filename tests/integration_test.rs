//! End-to-end tests driving the crate the way a script or REPL session
//! would: build an environment, register builtins and the standard
//! library, then parse and evaluate source text against it.

use little_lisp::builtins::register_builtins;
use little_lisp::env::Environment;
use little_lisp::eval::eval;
use little_lisp::parser::{parse, parse_one};
use little_lisp::stdlib;
use little_lisp::value::Value;
use std::rc::Rc;
use std::str::FromStr;

fn fresh_env() -> Rc<Environment> {
    let env = Environment::new();
    register_builtins(&env);
    stdlib::load(&env).unwrap();
    env
}

fn run(env: &Rc<Environment>, src: &str) -> Value {
    eval(parse_one(src).unwrap(), env.clone()).unwrap()
}

fn run_err(env: &Rc<Environment>, src: &str) -> String {
    eval(parse_one(src).unwrap(), env.clone()).unwrap_err().to_string()
}

#[test]
fn factorial_on_bignums() {
    let env = fresh_env();
    run(
        &env,
        "(defn factorial (n) (cond ((= n 0) 1) (t (* n (factorial (- n 1))))))",
    );
    let expected = num_bigint::BigInt::from_str(
        "30414093201713378043612608166064768844377641568960512000000000000",
    )
    .unwrap();
    assert_eq!(run(&env, "(factorial 30)"), Value::Number(expected));
}

#[test]
fn deep_tail_recursion_does_not_overflow() {
    let env = fresh_env();
    run(
        &env,
        "(defn count-down (n) (cond ((= n 0) 'done) (t (count-down (- n 1)))))",
    );
    assert_eq!(run(&env, "(count-down 200000)"), Value::atom("done"));
}

#[test]
fn quasiquote_unquote_and_splice() {
    let env = fresh_env();
    assert_eq!(
        run(&env, "`(1 ~(+ 1 1) ~@(list 3 4))"),
        Value::list(vec![
            Value::int(1),
            Value::int(2),
            Value::int(3),
            Value::int(4)
        ])
    );
}

#[test]
fn macro_definition_and_expansion() {
    let env = fresh_env();
    run(&env, "(defmacro ignore-car (form) (cdr form))");
    assert_eq!(
        run(&env, "(macroexpand-1 '(ignore-car (a b c)))"),
        Value::list(vec![Value::atom("b"), Value::atom("c")])
    );
    assert_eq!(run(&env, "(ignore-car (+ 1 2))"), Value::int(2));
}

#[test]
fn error_context_wraps_the_failing_form() {
    let env = fresh_env();
    let message = run_err(&env, "(+ 1 'a)");
    assert!(message.contains("(+ 1 (quote a))"), "{message}");
}

#[test]
fn try_catch_binds_the_error_message() {
    let env = fresh_env();
    assert_eq!(
        run(&env, "(try (car 5) (catch e (list 'caught e)))").to_string().starts_with("(caught"),
        true
    );
}

#[test]
fn fuse_and_split_round_trip() {
    let env = fresh_env();
    assert_eq!(run(&env, "(fuse (split 1295807125987))"), Value::int(1295807125987));
}

#[test]
fn variadic_lambda_binds_the_rest_as_a_list() {
    let env = fresh_env();
    assert_eq!(
        run(&env, "((lambda (x . xs) (list x xs)) 1 2 3 4)"),
        Value::list(vec![
            Value::int(1),
            Value::list(vec![Value::int(2), Value::int(3), Value::int(4)])
        ])
    );
}

#[test]
fn stdlib_map_filter_reduce_compose_over_a_range() {
    let env = fresh_env();
    run(&env, "(def squares (map square (range 0 5)))");
    assert_eq!(
        run(&env, "squares"),
        Value::list(vec![
            Value::int(0),
            Value::int(1),
            Value::int(4),
            Value::int(9),
            Value::int(16)
        ])
    );
    assert_eq!(
        run(&env, "(filter even? squares)"),
        Value::list(vec![Value::int(0), Value::int(4), Value::int(16)])
    );
    assert_eq!(run(&env, "(reduce + 0 squares)"), Value::int(30));
}

#[test]
fn a_whole_script_evaluates_in_source_order() {
    let env = fresh_env();
    let source = "
        (def total 0)
        (dotimes (i 10) (set! total (+ total i)))
        total
    ";
    let forms = parse(source).unwrap();
    let mut last = Value::Nil;
    for form in forms {
        last = eval(form, env.clone()).unwrap();
    }
    assert_eq!(last, Value::int(45));
}
