/// Lexical errors.
///
/// Unknown characters never stop tokenization; these values exist so a caller
/// can decide after the fact whether an unknown token is fatal.
pub mod lex_error;
/// Structural errors found while resolving blocks and headers.
///
/// Reported when the statement that contains them is reached. An unterminated
/// block ends the enclosing sequence, a malformed `for` header only skips that
/// loop.
pub mod syntax_error;
/// Errors raised while evaluating an expression.
///
/// The statement that asked for the value treats it as unavailable and
/// execution continues with the next statement.
pub mod evaluation_error;
/// The one fatal error: `tod` or `aage` escaping every loop.
pub mod control_flow_error;

pub use control_flow_error::ControlFlowError;
pub use evaluation_error::{EvaluationError, EvaluationErrorKind};
pub use lex_error::LexError;
pub use syntax_error::SyntaxError;
use thiserror::Error;

/// A recoverable problem reported to the sink while the program keeps running.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    /// A lexical problem.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// A structural problem in a block or header.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// An expression could not be evaluated.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

impl Diagnostic {
    /// Line the diagnostic refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Lex(e) => e.line(),
            Self::Syntax(e) => e.line(),
            Self::Evaluation(e) => e.line,
        }
    }
}
