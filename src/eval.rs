// ABOUTME: Evaluator module for executing parsed Lisp expressions

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{LambdaData, Value};
use std::rc::Rc;

/// Evaluate `expr` in `env`.
///
/// This is the single evaluation site callers go through; on error it
/// prepends context naming the printed form of `expr` itself (§7). The inner
/// trampoline may reassign its own working `(expr, env)` pair many times
/// without ever calling back into `eval`, so a long tail-recursive chain
/// produces no additional context layers and no additional Rust stack
/// frames.
pub fn eval(expr: Value, env: Rc<Environment>) -> Result<Value, EvalError> {
    let original = expr.clone();
    eval_loop(expr, env).map_err(|e| e.with_context(&original))
}

fn eval_loop(mut expr: Value, mut env: Rc<Environment>) -> Result<Value, EvalError> {
    loop {
        match expr {
            Value::Nil | Value::Number(_) | Value::Builtin(_) | Value::Lambda(_) => return Ok(expr),
            Value::Atom(name) => {
                return env
                    .lookup(&name)
                    .ok_or_else(|| EvalError::Unbound(name.to_string()));
            }
            Value::Cons(ref pair) => {
                let (head, args) = (pair.0.clone(), pair.1.clone());

                if let Value::Atom(name) = &head {
                    match eval_special_form(name, &args, &env)? {
                        Some(Flow::Done(value)) => return Ok(value),
                        Some(Flow::Tail(next_expr, next_env)) => {
                            expr = next_expr;
                            env = next_env;
                            continue;
                        }
                        None => {}
                    }
                }

                let callable = eval(head, env.clone())?;
                match callable {
                    Value::Lambda(data) if data.is_macro => {
                        let arg_forms = args.list_to_vec()?;
                        expr = expand_macro_body(&data, arg_forms)?;
                        continue;
                    }
                    Value::Builtin(spec) => {
                        let arg_values = eval_args(&args, &env)?;
                        check_arity(&spec, arg_values.len())?;
                        return (spec.handler)(&arg_values, &env);
                    }
                    Value::Lambda(data) => {
                        let arg_values = eval_args(&args, &env)?;
                        let new_env = bind_params(&data, arg_values)?;
                        match data.body.split_last() {
                            None => return Ok(Value::Nil),
                            Some((last, init)) => {
                                for form in init {
                                    eval(form.clone(), new_env.clone())?;
                                }
                                expr = last.clone();
                                env = new_env;
                                continue;
                            }
                        }
                    }
                    other => return Err(EvalError::NotCallable(other.to_string())),
                }
            }
            other => return Ok(other),
        }
    }
}

/// The result of dispatching a special form: either a finished value, or a
/// replacement `(expr, env)` pair to hand back to the trampoline in tail
/// position.
enum Flow {
    Done(Value),
    Tail(Value, Rc<Environment>),
}

/// Dispatches one of the reserved special-form names against its unevaluated
/// argument list. Returns `None` when `name` is not a special form, so the
/// caller falls through to ordinary function application.
fn eval_special_form(
    name: &str,
    args: &Value,
    env: &Rc<Environment>,
) -> Result<Option<Flow>, EvalError> {
    let flow = match name {
        "quote" => {
            let items = args.list_to_vec()?;
            Flow::Done(items.into_iter().next().unwrap_or(Value::Nil))
        }
        "syntax-quote" => {
            let items = args.list_to_vec()?;
            let inner = items.into_iter().next().unwrap_or(Value::Nil);
            Flow::Done(syntax_quote(&inner, env, 1)?)
        }
        "unquote" | "splicing-unquote" => return Err(EvalError::UnquoteOutsideSyntaxQuote),
        "def" => {
            let items = args.list_to_vec()?;
            let (sym, value_form) = def_name_and_value(&items, "def")?;
            let value = eval(value_form, env.clone())?;
            env.define(sym.as_str(), value.clone());
            Flow::Done(value)
        }
        "set!" => {
            let items = args.list_to_vec()?;
            let (sym, value_form) = def_name_and_value(&items, "set!")?;
            let value = eval(value_form, env.clone())?;
            env.set(&sym, value.clone())?;
            Flow::Done(value)
        }
        "defn" | "defmacro" => {
            let items = args.list_to_vec()?;
            if items.len() < 2 {
                return Err(EvalError::arity_error(name, "at least 2", items.len()));
            }
            let sym = items[0]
                .as_atom_name()
                .ok_or_else(|| EvalError::type_error(name, "an atom name", &items[0]))?
                .to_string();
            let (params, rest) = parse_params(&items[1])?;
            let (doc, body) = extract_doc(items[2..].to_vec());
            let lambda = Value::Lambda(Rc::new(LambdaData {
                params,
                rest,
                body,
                env: env.clone(),
                is_macro: name == "defmacro",
                self_name: Some(Rc::from(sym.as_str())),
                doc,
            }));
            env.define(sym, lambda.clone());
            Flow::Done(lambda)
        }
        "lambda" => {
            let items = args.list_to_vec()?;
            Flow::Done(build_lambda(&items, env)?)
        }
        "let" => {
            let items = args.list_to_vec()?;
            let (bindings_form, body) = items
                .split_first()
                .ok_or_else(|| EvalError::arity_error("let", "at least 1", 0))?;
            let new_env = Environment::child(env);
            for binding in bindings_form.list_to_vec()? {
                let pair = binding.list_to_vec()?;
                if pair.len() != 2 {
                    return Err(EvalError::type_error("let", "a (name value) pair", &binding));
                }
                let sym = pair[0]
                    .as_atom_name()
                    .ok_or_else(|| EvalError::type_error("let", "an atom name", &pair[0]))?;
                let value = eval(pair[1].clone(), new_env.clone())?;
                new_env.define(sym, value);
            }
            tail_of_body(body, new_env)?
        }
        "cond" => {
            let mut chosen = None;
            for clause in args.list_to_vec()? {
                let forms = clause.list_to_vec()?;
                let (test, body) = forms
                    .split_first()
                    .ok_or_else(|| EvalError::type_error("cond", "a non-empty clause", &clause))?;
                let test_value = eval(test.clone(), env.clone())?;
                if test_value.is_truthy() {
                    chosen = Some(if body.is_empty() {
                        Flow::Done(test_value)
                    } else {
                        tail_of_body(body, env.clone())?
                    });
                    break;
                }
            }
            chosen.unwrap_or(Flow::Done(Value::Nil))
        }
        "and" => {
            let items = args.list_to_vec()?;
            match items.split_last() {
                None => Flow::Done(Value::t()),
                Some((last, init)) => {
                    let mut short = None;
                    for form in init {
                        let value = eval(form.clone(), env.clone())?;
                        if !value.is_truthy() {
                            short = Some(value);
                            break;
                        }
                    }
                    match short {
                        Some(value) => Flow::Done(value),
                        None => Flow::Tail(last.clone(), env.clone()),
                    }
                }
            }
        }
        "or" => {
            let items = args.list_to_vec()?;
            match items.split_last() {
                None => Flow::Done(Value::Nil),
                Some((last, init)) => {
                    let mut short = None;
                    for form in init {
                        let value = eval(form.clone(), env.clone())?;
                        if value.is_truthy() {
                            short = Some(value);
                            break;
                        }
                    }
                    match short {
                        Some(value) => Flow::Done(value),
                        None => Flow::Tail(last.clone(), env.clone()),
                    }
                }
            }
        }
        "loop" => {
            let body = args.list_to_vec()?;
            loop {
                for form in &body {
                    eval(form.clone(), env.clone())?;
                }
            }
        }
        "error" => {
            let items = args.list_to_vec()?;
            let form = items
                .into_iter()
                .next()
                .ok_or_else(|| EvalError::arity_error("error", "1", 0))?;
            let message = eval(form, env.clone())?;
            return Err(EvalError::User(message));
        }
        "try" => {
            let items = args.list_to_vec()?;
            let (catch_form, body) = items
                .split_last()
                .ok_or_else(|| EvalError::arity_error("try", "at least 1", 0))?;
            let catch = catch_form.list_to_vec()?;
            if catch.len() < 2 || catch[0].as_atom_name() != Some("catch") {
                return Err(EvalError::type_error(
                    "try",
                    "a trailing (catch e body...) clause",
                    catch_form,
                ));
            }
            let err_name = catch[1]
                .as_atom_name()
                .ok_or_else(|| EvalError::type_error("try", "an atom name", &catch[1]))?;
            let mut result = Ok(Value::Nil);
            for form in body {
                result = eval(form.clone(), env.clone());
                if result.is_err() {
                    break;
                }
            }
            match result {
                Ok(value) => Flow::Done(value),
                Err(e) => {
                    let catch_env = Environment::child(env);
                    catch_env.define(err_name, e.message_value());
                    tail_of_body(&catch[2..], catch_env)?
                }
            }
        }
        "swallow" => {
            let items = args.list_to_vec()?;
            let mut errored = false;
            for form in items {
                if eval(form, env.clone()).is_err() {
                    errored = true;
                    break;
                }
            }
            Flow::Done(Value::from_bool(errored))
        }
        "errors" => {
            let items = args.list_to_vec()?;
            let (pattern_form, body) = items
                .split_first()
                .ok_or_else(|| EvalError::arity_error("errors", "at least 1", 0))?;
            let patterns = eval(pattern_form.clone(), env.clone())?
                .list_to_vec()?
                .into_iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>();
            let mut result = Ok(Value::Nil);
            for form in body {
                result = eval(form.clone(), env.clone());
                if result.is_err() {
                    break;
                }
            }
            match result {
                Ok(_) => {
                    return Err(EvalError::CatchMismatch {
                        pattern: patterns,
                        actual: "no error was raised".to_string(),
                    })
                }
                Err(e) if e.matches_patterns(&patterns) => Flow::Done(Value::t()),
                Err(e) => {
                    return Err(EvalError::CatchMismatch {
                        pattern: patterns,
                        actual: e.to_string(),
                    })
                }
            }
        }
        _ => return Ok(None),
    };
    Ok(Some(flow))
}

/// `(name value)` for `def`/`set!`.
fn def_name_and_value(items: &[Value], form: &str) -> Result<(String, Value), EvalError> {
    if items.len() != 2 {
        return Err(EvalError::arity_error(form, "2", items.len()));
    }
    let sym = items[0]
        .as_atom_name()
        .ok_or_else(|| EvalError::type_error(form, "an atom name", &items[0]))?
        .to_string();
    Ok((sym, items[1].clone()))
}

/// All but the last form of an implicit-progn body are evaluated eagerly;
/// the last is handed back as a tail position.
fn tail_of_body(body: &[Value], env: Rc<Environment>) -> Result<Flow, EvalError> {
    match body.split_last() {
        None => Ok(Flow::Done(Value::Nil)),
        Some((last, init)) => {
            for form in init {
                eval(form.clone(), env.clone())?;
            }
            Ok(Flow::Tail(last.clone(), env))
        }
    }
}

/// `(params...) body...` or `name (params...) body...`, already split into
/// argument forms following the `lambda` keyword.
fn build_lambda(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    let (self_name, params_form, body) = match items.first() {
        Some(Value::Atom(name)) if items.len() >= 2 && is_param_list(&items[1]) => {
            (Some(name.clone()), items[1].clone(), &items[2..])
        }
        Some(form) => (None, form.clone(), &items[1..]),
        None => (None, Value::Nil, &items[0..0]),
    };
    let (params, rest) = parse_params(&params_form)?;
    let (doc, body) = extract_doc(body.to_vec());
    Ok(Value::Lambda(Rc::new(LambdaData {
        params,
        rest,
        body,
        env: env.clone(),
        is_macro: false,
        self_name,
        doc,
    })))
}

fn is_param_list(v: &Value) -> bool {
    matches!(v, Value::Nil | Value::Cons(_))
}

/// Walks a parameter form, which is `()`, a proper list of atoms, or a
/// dotted list ending in an atom naming the rest parameter.
fn parse_params(form: &Value) -> Result<(Vec<Rc<str>>, Option<Rc<str>>), EvalError> {
    let mut params = Vec::new();
    let mut cur = form.clone();
    loop {
        match cur {
            Value::Nil => return Ok((params, None)),
            Value::Atom(name) => return Ok((params, Some(name))),
            Value::Cons(pair) => {
                match &pair.0 {
                    Value::Atom(name) => params.push(name.clone()),
                    other => return Err(EvalError::type_error("lambda", "an atom parameter name", other)),
                }
                cur = pair.1.clone();
            }
            other => return Err(EvalError::type_error("lambda", "a parameter list", &other)),
        }
    }
}

/// If the first body form is `(doc ...)`, peel it off and render its
/// arguments as a documentation list.
fn extract_doc(body: Vec<Value>) -> (Option<Vec<String>>, Vec<Value>) {
    match body.split_first() {
        Some((Value::Cons(pair), rest)) if pair.0.as_atom_name() == Some("doc") => {
            let doc_items = pair
                .1
                .list_to_vec()
                .unwrap_or_default()
                .into_iter()
                .map(|v| v.to_string())
                .collect();
            (Some(doc_items), rest.to_vec())
        }
        _ => (None, body),
    }
}

/// Binds `data`'s parameters (and optional rest/self-name) against `args`
/// in a fresh child frame of the lambda's captured environment.
pub fn bind_params(data: &Rc<LambdaData>, args: Vec<Value>) -> Result<Rc<Environment>, EvalError> {
    let name = data.self_name.as_deref().unwrap_or("lambda");
    match &data.rest {
        None if args.len() != data.params.len() => {
            return Err(EvalError::arity_error(
                name,
                data.params.len().to_string(),
                args.len(),
            ))
        }
        Some(_) if args.len() < data.params.len() => {
            return Err(EvalError::arity_error(
                name,
                format!("at least {}", data.params.len()),
                args.len(),
            ))
        }
        _ => {}
    }
    let new_env = Environment::child(&data.env);
    for (param, value) in data.params.iter().zip(args.iter()) {
        new_env.define(param.as_ref(), value.clone());
    }
    if let Some(rest_name) = &data.rest {
        let rest_values = args[data.params.len()..].to_vec();
        new_env.define(rest_name.as_ref(), Value::list(rest_values));
    }
    if let Some(self_name) = &data.self_name {
        new_env.define(self_name.as_ref(), Value::Lambda(Rc::clone(data)));
    }
    Ok(new_env)
}

/// Expands one macro call: binds the macro's parameters against the raw,
/// unevaluated argument forms, then evaluates its body to produce the
/// resulting expression.
pub fn expand_macro_body(data: &Rc<LambdaData>, arg_forms: Vec<Value>) -> Result<Value, EvalError> {
    let new_env = bind_params(data, arg_forms)?;
    match data.body.split_last() {
        None => Ok(Value::Nil),
        Some((last, init)) => {
            for form in init {
                eval(form.clone(), new_env.clone())?;
            }
            eval(last.clone(), new_env)
        }
    }
}

/// Expands a single macro call form one level, or returns it unchanged if
/// its head is not bound to a macro. Used by the `macroexpand-1` builtin.
pub fn macroexpand_1(form: &Value, env: &Rc<Environment>) -> Result<Value, EvalError> {
    let Value::Cons(pair) = form else {
        return Ok(form.clone());
    };
    let Value::Atom(name) = &pair.0 else {
        return Ok(form.clone());
    };
    match env.lookup(name) {
        Some(Value::Lambda(data)) if data.is_macro => {
            expand_macro_body(&data, pair.1.list_to_vec()?)
        }
        _ => Ok(form.clone()),
    }
}

fn eval_args(args_list: &Value, env: &Rc<Environment>) -> Result<Vec<Value>, EvalError> {
    args_list
        .list_to_vec()?
        .into_iter()
        .map(|form| eval(form, env.clone()))
        .collect()
}

pub fn check_arity(spec: &crate::value::BuiltinSpec, got: usize) -> Result<(), EvalError> {
    if got < spec.min_arity {
        let expected = arity_description(spec);
        return Err(EvalError::arity_error(spec.name, expected, got));
    }
    if let Some(max) = spec.max_arity {
        if got > max {
            let expected = arity_description(spec);
            return Err(EvalError::arity_error(spec.name, expected, got));
        }
    }
    Ok(())
}

fn arity_description(spec: &crate::value::BuiltinSpec) -> String {
    match (spec.variadic, spec.max_arity) {
        (true, _) => format!("at least {}", spec.min_arity),
        (false, Some(max)) if max == spec.min_arity => spec.min_arity.to_string(),
        (false, Some(max)) => format!("{}-{}", spec.min_arity, max),
        (false, None) => format!("at least {}", spec.min_arity),
    }
}

/// Applies a callable value to already-evaluated arguments, for builtins
/// like `apply` and `sort-by` that need to invoke a value they hold.
pub fn apply(callable: &Value, args: Vec<Value>, env: &Rc<Environment>) -> Result<Value, EvalError> {
    match callable {
        Value::Builtin(spec) => {
            check_arity(spec, args.len())?;
            (spec.handler)(&args, env)
        }
        Value::Lambda(data) if !data.is_macro => {
            let new_env = bind_params(data, args)?;
            let mut result = Value::Nil;
            for form in &data.body {
                result = eval(form.clone(), new_env.clone())?;
            }
            Ok(result)
        }
        other => Err(EvalError::NotCallable(other.to_string())),
    }
}

/// Quasiquote expansion: atoms/numbers are literal data; `(unquote x)` at
/// depth 1 evaluates `x`; nested `syntax-quote`/`unquote` adjust depth and
/// are rebuilt as literal data; `splicing-unquote` is only meaningful as a
/// list element and is handled by `syntax_quote_list`.
fn syntax_quote(expr: &Value, env: &Rc<Environment>, depth: i32) -> Result<Value, EvalError> {
    match expr {
        Value::Cons(pair) => {
            if let Value::Atom(name) = &pair.0 {
                match name.as_ref() {
                    "unquote" => {
                        let arg = single_arg(expr, "unquote")?;
                        return if depth == 1 {
                            eval(arg, env.clone())
                        } else {
                            let inner = syntax_quote(&arg, env, depth - 1)?;
                            Ok(Value::list(vec![Value::atom("unquote"), inner]))
                        };
                    }
                    "splicing-unquote" if depth > 1 => {
                        let arg = single_arg(expr, "splicing-unquote")?;
                        let inner = syntax_quote(&arg, env, depth - 1)?;
                        return Ok(Value::list(vec![Value::atom("splicing-unquote"), inner]));
                    }
                    "syntax-quote" => {
                        let arg = single_arg(expr, "syntax-quote")?;
                        let inner = syntax_quote(&arg, env, depth + 1)?;
                        return Ok(Value::list(vec![Value::atom("syntax-quote"), inner]));
                    }
                    _ => {}
                }
            }
            syntax_quote_list(expr, env, depth)
        }
        other => Ok(other.clone()),
    }
}

fn single_arg(form: &Value, name: &str) -> Result<Value, EvalError> {
    let items = form.list_to_vec()?;
    if items.len() != 2 {
        return Err(EvalError::arity_error(name, "1", items.len().saturating_sub(1)));
    }
    Ok(items[1].clone())
}

/// Rebuilds a cons chain element by element, splicing in `(splicing-unquote
/// x)` elements at the unquoting depth.
fn syntax_quote_list(list: &Value, env: &Rc<Environment>, depth: i32) -> Result<Value, EvalError> {
    match list {
        Value::Nil => Ok(Value::Nil),
        Value::Cons(pair) => {
            let head = &pair.0;
            let tail = &pair.1;
            if depth == 1 {
                if let Value::Cons(hp) = head {
                    if hp.0.as_atom_name() == Some("splicing-unquote") {
                        let arg = single_arg(head, "splicing-unquote")?;
                        let spliced = eval(arg, env.clone())?;
                        let rest = syntax_quote_list(tail, env, depth)?;
                        return append(spliced, rest);
                    }
                }
            }
            let new_head = syntax_quote(head, env, depth)?;
            let new_tail = match tail {
                Value::Cons(_) | Value::Nil => syntax_quote_list(tail, env, depth)?,
                other => syntax_quote(other, env, depth)?,
            };
            Ok(Value::cons(new_head, new_tail))
        }
        other => syntax_quote(other, env, depth),
    }
}

fn append(list: Value, tail: Value) -> Result<Value, EvalError> {
    let items = list.list_to_vec()?;
    let mut result = tail;
    for item in items.into_iter().rev() {
        result = Value::cons(item, result);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_one;

    fn run(src: &str) -> Value {
        let env = Environment::new();
        crate::builtins::register_builtins(&env);
        eval(parse_one(src).unwrap(), env).unwrap()
    }

    fn run_err(src: &str) -> EvalError {
        let env = Environment::new();
        crate::builtins::register_builtins(&env);
        eval(parse_one(src).unwrap(), env).unwrap_err()
    }

    #[test]
    fn self_evaluating_forms() {
        assert_eq!(run("42"), Value::int(42));
        assert_eq!(run("()"), Value::Nil);
    }

    #[test]
    fn quote_returns_its_argument_unevaluated() {
        assert_eq!(
            run("(quote (a b))"),
            Value::list(vec![Value::atom("a"), Value::atom("b")])
        );
    }

    #[test]
    fn def_and_atom_lookup() {
        let env = Environment::new();
        crate::builtins::register_builtins(&env);
        eval(parse_one("(def x 10)").unwrap(), env.clone()).unwrap();
        assert_eq!(eval(parse_one("x").unwrap(), env).unwrap(), Value::int(10));
    }

    #[test]
    fn unbound_atom_errors() {
        let e = run_err("nonexistent");
        assert!(e.to_string().contains("unbound atom"));
    }

    #[test]
    fn cond_picks_first_truthy_clause() {
        assert_eq!(run("(cond (() 1) (t 2))"), Value::int(2));
        assert_eq!(run("(cond (t 1) (t 2))"), Value::int(1));
    }

    #[test]
    fn lambda_application_and_closures() {
        assert_eq!(run("((lambda (x y) (+ x y)) 3 4)"), Value::int(7));
    }

    #[test]
    fn variadic_rest_parameter() {
        assert_eq!(
            run("((lambda (x . xs) (list x xs)) 1 2 3 4)"),
            Value::list(vec![
                Value::int(1),
                Value::list(vec![Value::int(2), Value::int(3), Value::int(4)])
            ])
        );
    }

    #[test]
    fn defn_supports_deep_tail_recursion() {
        let env = Environment::new();
        crate::builtins::register_builtins(&env);
        eval(
            parse_one(
                "(defn count-down (n) (cond ((= n 0) 'done) (t (count-down (- n 1)))))",
            )
            .unwrap(),
            env.clone(),
        )
        .unwrap();
        assert_eq!(
            eval(parse_one("(count-down 100000)").unwrap(), env).unwrap(),
            Value::atom("done")
        );
    }

    #[test]
    fn defmacro_and_macro_expansion() {
        let env = Environment::new();
        crate::builtins::register_builtins(&env);
        eval(
            parse_one("(defmacro ignore-car (l) (cdr l))").unwrap(),
            env.clone(),
        )
        .unwrap();
        assert_eq!(
            eval(parse_one("(ignore-car (x * 2 3 4))").unwrap(), env).unwrap(),
            Value::int(24)
        );
    }

    #[test]
    fn quasiquote_with_unquote_and_splicing() {
        let env = Environment::new();
        crate::builtins::register_builtins(&env);
        let result = eval(parse_one("`(1 ~(+ 1 1) ~@(list 3 4))").unwrap(), env).unwrap();
        assert_eq!(
            result,
            Value::list(vec![
                Value::int(1),
                Value::int(2),
                Value::int(3),
                Value::int(4)
            ])
        );
    }

    #[test]
    fn try_catch_binds_error_message() {
        let env = Environment::new();
        crate::builtins::register_builtins(&env);
        let result = eval(parse_one("(try (error '(boom)) (catch e e))").unwrap(), env).unwrap();
        assert_eq!(result, Value::list(vec![Value::atom("boom")]));
    }

    #[test]
    fn swallow_catches_errors_and_returns_truthiness() {
        assert_eq!(run("(swallow (error '(boom)))"), Value::t());
        assert_eq!(run("(swallow 1)"), Value::Nil);
    }

    #[test]
    fn error_context_wraps_outer_form() {
        let e = run_err("(+ 1 'a)");
        let text = e.to_string();
        assert!(text.starts_with("ERROR in '(+ 1 (quote a))':"));
    }

    #[test]
    fn and_or_short_circuit() {
        assert_eq!(run("(and 1 () 3)"), Value::Nil);
        assert_eq!(run("(or () () 3)"), Value::int(3));
        assert_eq!(run("(and)"), Value::t());
        assert_eq!(run("(or)"), Value::Nil);
    }

    #[test]
    fn errors_form_matches_substrings() {
        assert_eq!(run("(errors '(unbound) nonexistent)"), Value::t());
    }
}
