use thiserror::Error;

/// Why an expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationErrorKind {
    /// An identifier that was never declared or assigned.
    #[error("undefined identifier '{name}'")]
    UndefinedIdentifier {
        /// The identifier.
        name: String,
    },
    /// A variable whose last assignment failed to produce a value.
    #[error("'{name}' has no usable value")]
    Unavailable {
        /// The variable.
        name: String,
    },
    /// Division or modulo by zero.
    #[error("division by zero")]
    DivisionByZero,
    /// An operator or builtin was applied to values it does not accept.
    #[error("type mismatch: {details}")]
    TypeMismatch {
        /// What went wrong.
        details: String,
    },
    /// The expression text is not a valid expression.
    #[error("parse failure: {details}")]
    ParseFailure {
        /// What went wrong.
        details: String,
    },
    /// A call to a name outside the builtin whitelist.
    #[error("unknown function '{name}'")]
    UnknownFunction {
        /// The called name.
        name: String,
    },
    /// A builtin was called with the wrong number of arguments.
    #[error("'{name}' takes {expected} argument(s), found {found}")]
    ArgumentCount {
        /// The builtin.
        name:     &'static str,
        /// Accepted counts, for the message.
        expected: String,
        /// Supplied count.
        found:    usize,
    },
    /// Integer arithmetic left the 64-bit range.
    #[error("integer overflow")]
    Overflow,
    /// A builtin rejected an argument value.
    #[error("invalid argument: {details}")]
    InvalidArgument {
        /// What went wrong.
        details: String,
    },
}

/// An expression failed to evaluate.
///
/// Carries the original expression text and the line it came from, so the
/// diagnostic can quote it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error on line {line}: Could not evaluate '{expression}': {kind}.")]
pub struct EvaluationError {
    /// The expression text as written.
    pub expression: String,
    /// The source line of the expression.
    pub line:       usize,
    /// The cause.
    pub kind:       EvaluationErrorKind,
}

impl EvaluationError {
    /// Builds an error for `expression` on `line`.
    #[must_use]
    pub fn new(expression: impl Into<String>, line: usize, kind: EvaluationErrorKind) -> Self {
        Self { expression: expression.into(),
               line,
               kind }
    }
}
