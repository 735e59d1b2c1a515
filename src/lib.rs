//! # hinglish
//!
//! hinglish is an interpreter for a small scripting language whose keywords
//! are transliterated Hindi: `agar`/`warna` for conditionals, `jabtk` and
//! `chal` for loops, `likh` to print and `no`/`binduno`/`sach`/`shabd` for
//! typed declarations.
//!
//! ```
//! let run = hinglish::run("no x = 5\nchal (no i = 0; i < 3; i++) { x = x + i }\nlikh \"x = \" + x");
//!
//! assert_eq!(run.transcript.output(), ["x = 8"]);
//! assert!(run.outcome.is_ok());
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::ControlFlowError,
    interpreter::{
        environment::Environment,
        executor::core::Interpreter,
        parser::statement::parse_program,
        sink::{Sink, Transcript},
        value::Value,
    },
};

/// Defines the structure of parsed programs.
///
/// Declares the `Statement` and `Expression` trees the parser builds and the
/// executor walks, together with the operator and declared-type enums.
///
/// # Responsibilities
/// - Defines one variant per statement form, including `Invalid` for
///   statements that could not be structured.
/// - Keeps each expression's source text and line next to its parse, so
///   failures can quote it.
pub mod ast;
/// Provides the error types of every phase.
///
/// # Responsibilities
/// - Defines lexical, structural, evaluation and control-flow errors.
/// - Attaches line numbers and the offending source text to each of them.
/// - Wraps the recoverable ones in a `Diagnostic` for the sink.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// Ties together tokenizing, block resolution, parsing, evaluation and
/// execution, and exposes the pieces for embedding.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

pub use interpreter::lexer::tokenize;

/// Everything a finished program run produced.
#[derive(Debug)]
pub struct Run {
    /// Printed output and diagnostics, in order.
    pub transcript:  Transcript,
    /// The variable store as the program left it.
    pub environment: Environment,
    /// The value of a top-level `lautao`, or the error that stopped the run.
    pub outcome:     Result<Option<Value>, ControlFlowError>,
}

/// Runs a program in a fresh environment, collecting its output.
///
/// Evaluation and structural errors are recorded in the transcript and the
/// program carries on; only a `tod` or `aage` outside a loop ends it early.
///
/// # Examples
/// ```
/// use hinglish::{error::ControlFlowError, run};
///
/// let stopped = run("likh 1\ntod\nlikh 2");
/// assert_eq!(stopped.transcript.output(), ["1"]);
/// assert_eq!(stopped.outcome, Err(ControlFlowError::BreakOutsideLoop { line: 2 }));
///
/// let recovered = run("no x = 1 / 0\nlikh \"still running\"");
/// assert_eq!(recovered.transcript.output(), ["still running"]);
/// assert_eq!(recovered.transcript.diagnostics().len(), 1);
/// ```
#[must_use]
pub fn run(source: &str) -> Run {
    let mut transcript = Transcript::default();
    let mut environment = Environment::new();
    let outcome = run_with(source, &mut environment, &mut transcript);

    Run { transcript,
          environment,
          outcome }
}

/// Runs a program against an existing environment and sink.
///
/// Variables already in `env` are visible to the program, and whatever it
/// binds stays there afterwards.
pub fn run_with(source: &str,
                env: &mut Environment,
                sink: &mut dyn Sink)
                -> Result<Option<Value>, ControlFlowError> {
    let program = parse_program(source);
    tracing::debug!(statements = program.len(), "parsed program");

    Interpreter::new(sink).execute_program(&program, env)
}
