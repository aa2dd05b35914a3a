use clap::Parser;
use little_lisp::builtins::register_builtins;
use little_lisp::config::{VERSION, WELCOME_FOOTER, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use little_lisp::env::Environment;
use little_lisp::eval;
use little_lisp::highlighter::{is_balanced, LispHelper};
use little_lisp::parser;
use little_lisp::stdlib;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

/// little-lisp — a homoiconic Lisp-1 interpreter
#[derive(Parser, Debug)]
#[command(name = "little-lisp")]
#[command(version = VERSION)]
#[command(about = "A homoiconic Lisp-1 interpreter with bignums, TCO, and macros")]
struct CliArgs {
    /// Script file to execute (if omitted, starts the REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let env = Environment::new();
    register_builtins(&env);
    if let Err(e) = stdlib::load(&env) {
        eprintln!("Failed to load standard library: {e}");
        return ExitCode::FAILURE;
    }

    match args.script {
        Some(path) => run_script(&path, &env),
        None => {
            run_repl(&env);
            ExitCode::SUCCESS
        }
    }
}

/// Reads a script file, evaluates every top-level form against `env` in
/// order, and reports the exit status the CLI contract promises: zero on
/// success, non-zero on an uncaught error.
fn run_script(path: &PathBuf, env: &Rc<Environment>) -> ExitCode {
    let contents = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Cannot read {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };
    let forms = match parser::parse(&contents) {
        Ok(forms) => forms,
        Err(e) => {
            eprintln!("Parse error: {e}");
            return ExitCode::FAILURE;
        }
    };
    for form in forms {
        if let Err(e) = eval::eval(form, env.clone()) {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

const HISTORY_FILE: &str = ".little_lisp_history";

/// Reads lines until the accumulated buffer is balanced, then parses and
/// evaluates every top-level form collected so far and prints the value of
/// the last one. Uncaught errors are printed and the session continues.
fn run_repl(env: &Rc<Environment>) {
    println!("{WELCOME_MESSAGE}");
    println!("{WELCOME_SUBTITLE}");
    println!("{WELCOME_FOOTER}");

    let config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<LispHelper, rustyline::history::FileHistory> =
        match Editor::with_config(config) {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize the line editor: {e}");
                return;
            }
        };
    rl.set_helper(Some(LispHelper::new()));
    let _ = rl.load_history(HISTORY_FILE);

    let mut buffer = String::new();
    loop {
        let prompt = if buffer.is_empty() { "> " } else { "... " };
        match rl.readline(prompt) {
            Ok(line) => {
                if buffer.is_empty() {
                    let trimmed = line.trim();
                    if trimmed == "(quit)" || trimmed == "(exit)" {
                        break;
                    }
                    if trimmed.is_empty() {
                        continue;
                    }
                }
                if !buffer.is_empty() {
                    buffer.push('\n');
                }
                buffer.push_str(&line);
                if !is_balanced(&buffer) {
                    continue;
                }
                match parser::parse(&buffer) {
                    Ok(forms) => {
                        let mut result = little_lisp::value::Value::Nil;
                        let mut failed = false;
                        for form in forms {
                            match eval::eval(form, env.clone()) {
                                Ok(value) => result = value,
                                Err(e) => {
                                    eprintln!("Error: {e}");
                                    failed = true;
                                    break;
                                }
                            }
                        }
                        if !failed {
                            println!("=> {}", LispHelper::highlight_output(&result));
                        }
                    }
                    Err(e) => eprintln!("Parse error: {e}"),
                }
                buffer.clear();
            }
            Err(ReadlineError::Interrupted) => {
                buffer.clear();
                println!("^C");
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {e}");
                break;
            }
        }
    }

    let _ = rl.save_history(HISTORY_FILE);
}
