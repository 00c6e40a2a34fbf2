//! Driver pipeline: source text in, (canonical statement, value) pairs out.
//!
//! Parsing and evaluation are wired together here so the binary and the
//! tests share one code path. Syntax errors short-circuit evaluation
//! entirely; a runtime error stops the program at the failing statement.

use sable_eval::{Env, EvalError, Evaluator, Flow, Value};
use sable_ir::{Printer, StringInterner};
use sable_parse::ParseError;
use tracing::debug;

/// One executed top-level statement: its canonical rendering and the
/// value it produced.
pub struct EvaluatedStmt {
    pub rendered: String,
    pub value: Value,
}

/// What running a source string produced.
pub enum RunResult {
    /// The program parsed. `error` is set when evaluation stopped early;
    /// `stmts` holds everything that ran before that.
    Evaluated {
        stmts: Vec<EvaluatedStmt>,
        error: Option<EvalError>,
    },
    /// The parser recorded diagnostics; nothing was evaluated.
    SyntaxErrors(Vec<ParseError>),
}

/// Parse and evaluate `src` against a fresh top-level environment.
pub fn run(src: &str, interner: &StringInterner) -> RunResult {
    let parsed = sable_parse::parse(src, interner);
    if parsed.has_errors() {
        return RunResult::SyntaxErrors(parsed.errors);
    }

    let printer = Printer::new(&parsed.arena, interner);
    let evaluator = Evaluator::new(&parsed.arena, interner);
    let env = Env::top_level();

    let mut stmts = Vec::new();
    for &stmt in parsed.arena.stmt_list(parsed.program.stmts) {
        let rendered = printer.stmt(stmt);
        match evaluator.eval_stmt(stmt, &env) {
            Ok(value) => stmts.push(EvaluatedStmt { rendered, value }),
            Err(Flow::Return(value)) => {
                // A top-level return ends the program with its value.
                stmts.push(EvaluatedStmt { rendered, value });
                break;
            }
            Err(Flow::Error(error)) => {
                debug!(statement = %rendered, "stopped on runtime error");
                return RunResult::Evaluated {
                    stmts,
                    error: Some(error),
                };
            }
        }
    }

    RunResult::Evaluated { stmts, error: None }
}
