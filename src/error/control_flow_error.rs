use thiserror::Error;

/// Represents control-flow signals that reached the top level unconsumed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlFlowError {
    /// `tod` was executed outside of any loop.
    #[error("Error on line {line}: 'tod' (break) used outside of a loop.")]
    BreakOutsideLoop {
        /// The source line of the `tod`.
        line: usize,
    },
    /// `aage` was executed outside of any loop.
    #[error("Error on line {line}: 'aage' (continue) used outside of a loop.")]
    ContinueOutsideLoop {
        /// The source line of the `aage`.
        line: usize,
    },
}
