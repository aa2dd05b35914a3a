//! Syntax highlighting and multi-line input handling for the REPL.
//!
//! Implements rustyline's `Helper` bundle by hand (its derive crate is in
//! the dependency tree but, as in the source this was adapted from, isn't
//! actually used — the traits below are written out directly instead).

use rustyline::completion::Completer;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;
use std::borrow::Cow;
use std::collections::HashSet;

use crate::value::Value;

const COLOR_RESET: &str = "\x1b[0m";
const COLOR_PARENS: &str = "\x1b[1;34m";
const COLOR_SPECIAL_FORM: &str = "\x1b[1;35m";
const COLOR_BUILTIN: &str = "\x1b[36m";
const COLOR_NUMBER: &str = "\x1b[33m";
const COLOR_COMMENT: &str = "\x1b[90m";
const COLOR_QUOTE: &str = "\x1b[1;33m";

pub struct LispHelper;

impl LispHelper {
    pub fn new() -> Self {
        LispHelper
    }

    /// Colors a single evaluation result the way numbers are colored in
    /// the input line.
    pub fn highlight_output(value: &Value) -> String {
        let text = value.to_string();
        if matches!(value, Value::Number(_)) {
            format!("{COLOR_NUMBER}{text}{COLOR_RESET}")
        } else {
            text
        }
    }
}

impl Default for LispHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for LispHelper {}

impl Completer for LispHelper {
    type Candidate = String;
}

impl Hinter for LispHelper {
    type Hint = String;
}

impl Validator for LispHelper {}

/// Whether `line` is a complete, balanced form (used by the REPL loop to
/// decide between evaluating and prompting for a continuation line).
pub fn is_balanced(line: &str) -> bool {
    match crate::lexer::tokenize(line) {
        Ok(spanned) => {
            let tokens: Vec<_> = spanned.into_iter().map(|s| s.token).collect();
            !tokens.is_empty() && crate::lexer::tokens_balanced(&tokens)
        }
        Err(_) => true,
    }
}

impl Highlighter for LispHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let highlighted = highlight_line(line, &special_forms(), &builtin_names());
        if highlighted == line {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(highlighted)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

/// Special forms handled directly by the evaluator's trampoline.
fn special_forms() -> HashSet<&'static str> {
    [
        "quote",
        "syntax-quote",
        "unquote",
        "splicing-unquote",
        "def",
        "set!",
        "lambda",
        "let",
        "cond",
        "and",
        "or",
        "loop",
        "error",
        "try",
        "swallow",
        "errors",
        "defn",
        "defmacro",
    ]
    .into_iter()
    .collect()
}

/// Builtins and the dialect-defined stdlib functions/macros, shown the
/// same color since both are ordinary callables from the REPL's view.
fn builtin_names() -> HashSet<&'static str> {
    [
        "+", "-", "*", "/", "rem", "isqrt", "=", "<", "<=", ">", ">=", "not", "atom?", "number?",
        "cons?", "nil?", "list?", "builtin?", "lambda?", "macro?", "cons", "car", "cdr", "list",
        "len", "sort", "sort-by", "shuffle", "apply", "fuse", "split", "upcase", "downcase",
        "gensym", "doc", "body", "source", "forms", "macroexpand-1", "version", "help", "print",
        "println", "printl", "readlist", "load", "eval", "sleep", "randint", "exit",
        "screen-start", "screen-end", "screen-clear", "screen-size", "screen-get-key",
        "screen-write", "shell", "map", "filter", "reduce", "reverse", "append", "concat",
        "range", "nth", "last", "take", "drop", "zip", "member", "compose", "partial", "abs",
        "min", "max", "square", "cube", "even?", "odd?", "zero?", "when", "when-not", "progn",
        "dotimes", "foreach", "comment", "if",
    ]
    .into_iter()
    .collect()
}

fn is_symbol_boundary(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '\'' | '`' | '~' | ';')
}

/// Tokenizes a line by hand for display purposes (separate from the real
/// lexer, which does not preserve whitespace/comment text verbatim) and
/// wraps each recognized piece in ANSI color codes.
fn highlight_line(
    line: &str,
    special_forms: &HashSet<&'static str>,
    builtins: &HashSet<&'static str>,
) -> String {
    let mut result = String::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            ';' => {
                result.push_str(COLOR_COMMENT);
                while i < chars.len() && chars[i] != '\n' {
                    result.push(chars[i]);
                    i += 1;
                }
                result.push_str(COLOR_RESET);
            }
            '(' | ')' => {
                result.push_str(COLOR_PARENS);
                result.push(chars[i]);
                i += 1;
                result.push_str(COLOR_RESET);
            }
            '\'' | '`' => {
                result.push_str(COLOR_QUOTE);
                result.push(chars[i]);
                i += 1;
                result.push_str(COLOR_RESET);
            }
            '~' => {
                result.push_str(COLOR_QUOTE);
                result.push('~');
                i += 1;
                if i < chars.len() && chars[i] == '@' {
                    result.push('@');
                    i += 1;
                }
                result.push_str(COLOR_RESET);
            }
            c if c.is_whitespace() => {
                result.push(c);
                i += 1;
            }
            c if c.is_ascii_digit()
                || ((c == '-' || c == '+')
                    && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())) =>
            {
                let start = i;
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                if chars.get(i).map_or(true, |c| is_symbol_boundary(*c)) {
                    let text: String = chars[start..i].iter().collect();
                    result.push_str(COLOR_NUMBER);
                    result.push_str(&text);
                    result.push_str(COLOR_RESET);
                } else {
                    while i < chars.len() && !is_symbol_boundary(chars[i]) {
                        i += 1;
                    }
                    let symbol: String = chars[start..i].iter().collect();
                    result.push_str(&symbol);
                }
            }
            _ => {
                let start = i;
                while i < chars.len() && !is_symbol_boundary(chars[i]) {
                    i += 1;
                }
                let symbol: String = chars[start..i].iter().collect();
                if special_forms.contains(symbol.as_str()) {
                    result.push_str(COLOR_SPECIAL_FORM);
                    result.push_str(&symbol);
                    result.push_str(COLOR_RESET);
                } else if builtins.contains(symbol.as_str()) {
                    result.push_str(COLOR_BUILTIN);
                    result.push_str(&symbol);
                    result.push_str(COLOR_RESET);
                } else {
                    result.push_str(&symbol);
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_gets_colored() {
        let highlighted = highlight_line("42", &special_forms(), &builtin_names());
        assert!(highlighted.contains(COLOR_NUMBER));
    }

    #[test]
    fn special_form_gets_colored() {
        let highlighted = highlight_line("(def x 5)", &special_forms(), &builtin_names());
        assert!(highlighted.contains(COLOR_SPECIAL_FORM));
        assert!(highlighted.contains(COLOR_PARENS));
    }

    #[test]
    fn builtin_gets_colored() {
        let highlighted = highlight_line("(+ 1 2)", &special_forms(), &builtin_names());
        assert!(highlighted.contains(COLOR_BUILTIN));
    }

    #[test]
    fn quote_gets_colored() {
        let highlighted = highlight_line("'(1 2 3)", &special_forms(), &builtin_names());
        assert!(highlighted.contains(COLOR_QUOTE));
    }

    #[test]
    fn plain_symbol_is_untouched() {
        let highlighted = highlight_line("foo", &special_forms(), &builtin_names());
        assert_eq!(highlighted, "foo");
    }

    #[test]
    fn unclosed_paren_is_unbalanced() {
        assert!(!is_balanced("(def x"));
        assert!(is_balanced("(def x 1)"));
    }
}
