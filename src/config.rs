//! Version and welcome-banner constants for the CLI/REPL shell.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const WELCOME_MESSAGE: &str = "little-lisp — a homoiconic Lisp-1";
pub const WELCOME_SUBTITLE: &str = "Atoms, bignums, and cons cells. Nothing else.";
pub const WELCOME_FOOTER: &str = "Type (help) for a function list, (quit) or Ctrl-D to exit.";
