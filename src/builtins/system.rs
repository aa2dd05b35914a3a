//! Terminal and host-process access: `screen-start`, `screen-end`,
//! `screen-clear`, `screen-size`, `screen-get-key`, `screen-write`, `shell`.
//!
//! The screen builtins are a minimal raw-terminal stub built on plain ANSI
//! escape sequences rather than a terminal-UI crate — enough to draw and
//! read single keypresses, not a full curses replacement.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use lisp_macros::builtin;
use std::io::{self, Read, Write};
use std::rc::Rc;

const ALT_SCREEN_ON: &str = "\x1b[?1049h\x1b[2J\x1b[H";
const ALT_SCREEN_OFF: &str = "\x1b[?1049l";

fn raw_mode(enable: bool) {
    let flag = if enable { "-echo -icanon" } else { "echo icanon" };
    std::process::Command::new("stty").arg(flag).status().ok();
}

/// Switches the terminal to the alternate screen buffer and raw input mode.
///
/// # Examples
///
/// ```lisp
/// (screen-start) => ()
/// ```
#[builtin(name = "screen-start", min_arity = 0, max_arity = 0)]
pub fn screen_start(_args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    print!("{ALT_SCREEN_ON}");
    io::stdout().flush().ok();
    raw_mode(true);
    Ok(Value::Nil)
}

/// Restores the normal screen buffer and cooked input mode.
///
/// # Examples
///
/// ```lisp
/// (screen-end) => ()
/// ```
#[builtin(name = "screen-end", min_arity = 0, max_arity = 0)]
pub fn screen_end(_args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    raw_mode(false);
    print!("{ALT_SCREEN_OFF}");
    io::stdout().flush().ok();
    Ok(Value::Nil)
}

/// Clears the screen and homes the cursor.
///
/// # Examples
///
/// ```lisp
/// (screen-clear) => ()
/// ```
#[builtin(name = "screen-clear", min_arity = 0, max_arity = 0)]
pub fn screen_clear(_args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    print!("\x1b[2J\x1b[H");
    io::stdout().flush().ok();
    Ok(Value::Nil)
}

/// The terminal's size, as a list `(columns rows)`.
///
/// # Examples
///
/// ```lisp
/// (len (screen-size)) => 2
/// ```
#[builtin(name = "screen-size", min_arity = 0, max_arity = 0)]
pub fn screen_size(_args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let (cols, rows) = term_size();
    Ok(Value::list(vec![Value::int(cols as i64), Value::int(rows as i64)]))
}

fn term_size() -> (u16, u16) {
    let output = std::process::Command::new("stty")
        .arg("size")
        .output()
        .ok()
        .filter(|o| o.status.success());
    let parsed = output.and_then(|o| {
        let text = String::from_utf8_lossy(&o.stdout);
        let mut parts = text.split_whitespace();
        let rows: u16 = parts.next()?.parse().ok()?;
        let cols: u16 = parts.next()?.parse().ok()?;
        Some((cols, rows))
    });
    parsed.unwrap_or((80, 24))
}

/// Reads a single keypress from the terminal, returned as an atom (e.g.
/// `a`, `space`, `enter`, `esc`).
///
/// # Examples
///
/// ```lisp
/// (screen-get-key) => (reads one key)
/// ```
#[builtin(name = "screen-get-key", min_arity = 0, max_arity = 0)]
pub fn screen_get_key(_args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut buf = [0u8; 1];
    io::stdin()
        .read_exact(&mut buf)
        .map_err(|e| EvalError::domain_error("screen-get-key", e.to_string()))?;
    Ok(Value::atom(match buf[0] {
        b' ' => "space".to_string(),
        b'\r' | b'\n' => "enter".to_string(),
        0x1b => "esc".to_string(),
        0x7f => "backspace".to_string(),
        c => (c as char).to_string(),
    }))
}

/// Writes text at a given row and column (1-based), without a trailing
/// newline.
///
/// # Examples
///
/// ```lisp
/// (screen-write 1 1 'hi) => ()
/// ```
#[builtin(name = "screen-write", min_arity = 3, max_arity = 3)]
pub fn screen_write(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let row = args[0]
        .as_number()
        .ok_or_else(|| EvalError::type_error("screen-write", "a number", &args[0]))?;
    let col = args[1]
        .as_number()
        .ok_or_else(|| EvalError::type_error("screen-write", "a number", &args[1]))?;
    print!("\x1b[{row};{col}H{}", args[2]);
    io::stdout().flush().ok();
    Ok(Value::Nil)
}

/// Runs a command in a host shell, returning `(stdout stderr exit-code)`
/// with stdout/stderr as atoms of their trimmed text.
///
/// # Examples
///
/// ```lisp
/// (car (shell "echo hi")) => hi
/// ```
#[builtin(name = "shell", min_arity = 1, max_arity = 1)]
pub fn shell(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let command = args[0]
        .as_atom_name()
        .ok_or_else(|| EvalError::type_error("shell", "an atom naming a command", &args[0]))?;
    let output = std::process::Command::new("sh")
        .arg("-c")
        .arg(command)
        .output()
        .map_err(|e| EvalError::domain_error("shell", e.to_string()))?;
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let code = output.status.code().unwrap_or(-1);
    Ok(Value::list(vec![
        if stdout.is_empty() { Value::Nil } else { Value::atom(stdout) },
        if stderr.is_empty() { Value::Nil } else { Value::atom(stderr) },
        Value::int(code as i64),
    ]))
}

pub fn register(env: &Rc<Environment>) {
    env.define("screen-start", Value::Builtin(Rc::new(screen_start_spec())));
    env.define("screen-end", Value::Builtin(Rc::new(screen_end_spec())));
    env.define("screen-clear", Value::Builtin(Rc::new(screen_clear_spec())));
    env.define("screen-size", Value::Builtin(Rc::new(screen_size_spec())));
    env.define(
        "screen-get-key",
        Value::Builtin(Rc::new(screen_get_key_spec())),
    );
    env.define("screen-write", Value::Builtin(Rc::new(screen_write_spec())));
    env.define("shell", Value::Builtin(Rc::new(shell_spec())));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_runs_a_command_and_captures_stdout() {
        let env = Environment::new();
        let result = shell(&[Value::atom("echo hi")], &env).unwrap();
        let items = result.list_to_vec().unwrap();
        assert_eq!(items[0], Value::atom("hi"));
        assert_eq!(items[2], Value::int(0));
    }

    #[test]
    fn shell_reports_nonzero_exit_codes() {
        let env = Environment::new();
        let result = shell(&[Value::atom("exit 7")], &env).unwrap();
        let items = result.list_to_vec().unwrap();
        assert_eq!(items[2], Value::int(7));
    }

    #[test]
    fn shell_empty_output_is_nil_not_the_atom() {
        let env = Environment::new();
        let result = shell(&[Value::atom("true")], &env).unwrap();
        let items = result.list_to_vec().unwrap();
        assert_eq!(items[0], Value::Nil);
        assert!(items[0].is_nil());
    }
}
