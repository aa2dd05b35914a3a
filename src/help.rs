//! Documentation rendering: builtins and lambdas carry their own docs, so
//! there is no separate registry to populate — `help` and `doc` read
//! straight off the live bindings in the environment.

use crate::env::Environment;
use crate::value::Value;
use std::rc::Rc;
use termimad::MadSkin;

/// `(name, category, signature, one-line description)` for every special
/// form, since those live in the evaluator rather than the environment.
const SPECIAL_FORMS: &[(&str, &str, &str, &str)] = &[
    ("quote", "Special forms", "(quote expr)", "Returns expr unevaluated."),
    (
        "syntax-quote",
        "Special forms",
        "(syntax-quote expr)",
        "Quotes expr, splicing in unquote/splicing-unquote forms.",
    ),
    ("def", "Special forms", "(def name value)", "Binds name in the nearest frame."),
    ("set!", "Special forms", "(set! name value)", "Updates the nearest existing binding."),
    (
        "lambda",
        "Special forms",
        "(lambda (params...) body...)",
        "Builds an anonymous function closing over the current environment.",
    ),
    (
        "let",
        "Special forms",
        "(let ((name value)...) body...)",
        "Evaluates bindings in order, then body in a child frame.",
    ),
    (
        "cond",
        "Special forms",
        "(cond (test expr...)...)",
        "Evaluates the body of the first clause whose test is truthy.",
    ),
    ("and", "Special forms", "(and expr...)", "Short-circuits on the first falsy value."),
    ("or", "Special forms", "(or expr...)", "Short-circuits on the first truthy value."),
    (
        "loop",
        "Special forms",
        "(loop body...)",
        "Evaluates body repeatedly; terminates only by an error or the host process exiting.",
    ),
    ("error", "Special forms", "(error msgs)", "Raises msgs (a list) as a user error."),
    (
        "try",
        "Special forms",
        "(try expr (name handler))",
        "Evaluates expr, binding any raised error's words to name in handler on failure.",
    ),
    (
        "swallow",
        "Special forms",
        "(swallow expr...)",
        "Evaluates each expr, returns t if any raised an error, else nil.",
    ),
    (
        "errors",
        "Special forms",
        "(errors (pattern...) expr...)",
        "Asserts expr raises an error whose message contains every pattern.",
    ),
    (
        "defn",
        "Special forms",
        "(defn name (params...) body...)",
        "Defines a named function; sugar over (def name (lambda ...)).",
    ),
    (
        "defmacro",
        "Special forms",
        "(defmacro name (params...) body...)",
        "Defines a macro: a lambda expanded inline at its call site before evaluation.",
    ),
];

fn category_of(name: &str) -> &'static str {
    match name {
        "+" | "-" | "*" | "/" | "rem" | "isqrt" => "Arithmetic",
        "=" | "<" | "<=" | ">" | ">=" => "Comparison",
        "not" => "Logic",
        "atom?" | "number?" | "cons?" | "nil?" | "list?" | "builtin?" | "lambda?" | "macro?" => {
            "Type predicates"
        }
        "cons" | "car" | "cdr" | "list" | "len" | "sort" | "sort-by" | "shuffle" | "apply" => {
            "List operations"
        }
        "fuse" | "split" | "upcase" | "downcase" | "gensym" => "Atoms",
        "doc" | "body" | "source" | "forms" | "macroexpand-1" | "version" | "help" => {
            "Introspection"
        }
        "print" | "println" | "printl" | "readlist" | "load" | "eval" | "sleep" | "randint"
        | "exit" => "I/O",
        "screen-start" | "screen-end" | "screen-clear" | "screen-size" | "screen-get-key"
        | "screen-write" | "shell" => "System",
        _ => "Other",
    }
}

const CATEGORY_ORDER: &[&str] = &[
    "Special forms",
    "Arithmetic",
    "Comparison",
    "Logic",
    "List operations",
    "Type predicates",
    "Atoms",
    "Introspection",
    "I/O",
    "System",
    "Other",
];

/// A short tabular listing of every special form and builtin, grouped by
/// category, for `(help)` with no arguments.
pub fn quick_reference(env: &Rc<Environment>) -> String {
    let mut by_category: std::collections::HashMap<&str, Vec<String>> =
        std::collections::HashMap::new();
    for (name, category, _, _) in SPECIAL_FORMS {
        by_category.entry(category).or_default().push(name.to_string());
    }
    let mut names: Vec<String> = env
        .keys()
        .into_iter()
        .filter(|name| matches!(env.lookup(name), Some(Value::Builtin(_))))
        .collect();
    names.sort();
    for name in names {
        let category = category_of(&name);
        by_category.entry(category).or_default().push(name);
    }

    let total: usize = by_category.values().map(|v| v.len()).sum();
    let mut out = format!("Available functions ({total} total)\n");
    out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    for category in CATEGORY_ORDER {
        if let Some(names) = by_category.get(category) {
            let mut names = names.clone();
            names.sort();
            out.push_str(&format!("{category} ({})\n", names.len()));
            out.push_str(&format!("  {}\n\n", names.join(", ")));
        }
    }
    out.push_str("Type (help 'name) for detailed help.\n");
    out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    out
}

fn format_markdown(heading: &str, category: &str, body: &str, examples: &[&str]) -> String {
    let mut md = format!("## {heading} — *{category}*\n\n{body}\n");
    if !examples.is_empty() {
        md.push_str("\n**Examples**\n\n```lisp\n");
        for example in examples {
            md.push_str(example);
            md.push('\n');
        }
        md.push_str("```\n");
    }
    let skin = MadSkin::default();
    skin.term_text(&md).to_string()
}

/// Long-form documentation for one name: a special form, a builtin, or a
/// user-defined lambda/macro bound in `env`.
pub fn entry_for(env: &Rc<Environment>, name: &str) -> String {
    if let Some((_, category, signature, description)) =
        SPECIAL_FORMS.iter().find(|(n, ..)| *n == name)
    {
        return format_markdown(&format!("{name} — `{signature}`"), category, description, &[]);
    }
    match env.lookup(name) {
        Some(Value::Builtin(spec)) => format_markdown(
            &format!("{name} — a builtin"),
            category_of(name),
            spec.doc,
            spec.examples,
        ),
        Some(value @ Value::Lambda(_)) => {
            let Value::Lambda(data) = &value else { unreachable!() };
            let category = if data.is_macro { "Macros" } else { "User-defined" };
            let doc = data
                .doc
                .as_ref()
                .map(|lines| lines.join("\n"))
                .unwrap_or_else(|| "(no documentation)".to_string());
            format_markdown(&format!("{name} — {value}"), category, &doc, &[])
        }
        Some(other) => format!("{name} is bound to {other}, not a callable."),
        None => format!("No documentation for '{name}'."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;

    #[test]
    fn quick_reference_lists_arithmetic() {
        let env = Environment::new();
        register_builtins(&env);
        assert!(quick_reference(&env).contains("Arithmetic"));
    }

    #[test]
    fn entry_for_a_special_form_is_found() {
        let env = Environment::new();
        assert!(entry_for(&env, "lambda").contains("lambda"));
    }

    #[test]
    fn entry_for_a_builtin_includes_its_doc() {
        let env = Environment::new();
        register_builtins(&env);
        assert!(entry_for(&env, "car").contains("first element"));
    }

    #[test]
    fn entry_for_unknown_name_says_so() {
        let env = Environment::new();
        assert!(entry_for(&env, "nonexistent").contains("No documentation"));
    }
}
