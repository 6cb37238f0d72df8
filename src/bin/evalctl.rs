//! A minimal, non-interactive way to poke at the library by hand: parse and
//! evaluate one expression, optionally against a JSON environment file.
//!
//! This is not the command-line driver the crate's core scopes out (no
//! REPL, no subcommands) — just enough of a binary that `cargo run` does
//! something useful. Argument parsing is hand-rolled rather than pulling in
//! a flag-parsing crate, matching the size of the job.
//!
//! Usage: `evalctl <expression> [--env <path-to-json-file>]`

use exprlang::{evaluate, json, EvalOptions, Environment};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(expression) = args.next() else {
        eprintln!("usage: evalctl <expression> [--env <path-to-json-file>]");
        return ExitCode::FAILURE;
    };

    let env = match parse_env_flag(args) {
        Ok(env) => env,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let opts = EvalOptions { env, ..EvalOptions::default() };
    match evaluate(&expression, opts) {
        Ok(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprint!("error: {err}");
            if let Some(span) = err.span() {
                eprintln!(" (at {}..{})", span.start, span.end);
            } else if let Some(index) = err.parse_index() {
                eprintln!(" (at byte {index})");
            } else {
                eprintln!();
            }
            ExitCode::FAILURE
        }
    }
}

fn parse_env_flag(mut args: impl Iterator<Item = String>) -> Result<Environment, String> {
    match args.next() {
        None => Ok(Environment::empty()),
        Some(flag) if flag == "--env" => {
            let path = args.next().ok_or("--env requires a path argument")?;
            let text = std::fs::read_to_string(&path).map_err(|e| format!("reading {path}: {e}"))?;
            let value = json::value_from_json_str(&text)?;
            Environment::new(value).map_err(|e| e.to_string())
        }
        Some(other) => Err(format!("unrecognized argument: {other}")),
    }
}
