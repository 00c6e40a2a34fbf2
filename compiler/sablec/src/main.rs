//! Sable CLI.
//!
//! `sable <file>` parses and evaluates the file, printing each top-level
//! statement in canonical form followed by the value it produced. Set
//! `RUST_LOG` (e.g. `RUST_LOG=sable_parse=debug`) for pipeline tracing on
//! stderr.

use std::process::ExitCode;

use sable_ir::StringInterner;
use sablec::RunResult;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("fatal error: no input files");
        eprintln!("Usage: sable <file>");
        return ExitCode::FAILURE;
    };

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: could not read {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let interner = StringInterner::new();
    match sablec::run(&source, &interner) {
        RunResult::SyntaxErrors(errors) => {
            eprintln!("{path}: {} syntax error(s)", errors.len());
            for error in errors {
                eprintln!("  {error}");
            }
            ExitCode::FAILURE
        }
        RunResult::Evaluated { stmts, error } => {
            for stmt in stmts {
                println!("{}", stmt.rendered);
                println!("{}", stmt.value);
            }
            match error {
                Some(err) => {
                    eprintln!("runtime error: {err}");
                    ExitCode::FAILURE
                }
                None => ExitCode::SUCCESS,
            }
        }
    }
}
