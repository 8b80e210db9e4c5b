//! CLI command modules. Each command owns an args struct and a `run`
//! entrypoint; `main` only parses flags and dispatches.

pub mod check;
pub mod coverage;
