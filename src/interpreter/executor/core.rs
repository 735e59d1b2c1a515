use crate::{
    ast::{Clause, Statement},
    error::{ControlFlowError, Diagnostic},
    interpreter::{environment::Environment, sink::Sink, value::Value},
};

/// The outcome of executing a statement or block.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Continue with the next statement.
    Normal,
    /// `tod`: leave the nearest enclosing loop.
    Break {
        /// Line of the `tod`.
        line: usize,
    },
    /// `aage`: start the next iteration of the nearest enclosing loop.
    Continue {
        /// Line of the `aage`.
        line: usize,
    },
    /// `lautao`: unwind to the top level with an optional value.
    Return(Option<Value>),
}

impl Flow {
    /// Whether execution of the current block should stop here.
    #[must_use]
    pub const fn is_abrupt(&self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// Executes statements, sending output and diagnostics to a [`Sink`].
///
/// The interpreter holds no variables itself; every call borrows the one
/// [`Environment`] of the run.
pub struct Interpreter<'s> {
    sink: &'s mut dyn Sink,
}

impl<'s> Interpreter<'s> {
    /// Creates an interpreter writing to `sink`.
    pub fn new(sink: &'s mut dyn Sink) -> Self {
        Self { sink }
    }

    /// Executes `block` in order, stopping at the first abrupt [`Flow`].
    pub fn execute_block(&mut self, block: &[Statement], env: &mut Environment) -> Flow {
        for statement in block {
            let flow = self.execute_statement(statement, env);
            if flow.is_abrupt() {
                return flow;
            }
        }
        Flow::Normal
    }

    /// Executes a whole program.
    ///
    /// A `lautao` anywhere ends the program with its value.
    ///
    /// # Errors
    /// A [`ControlFlowError`] if `tod` or `aage` escapes every loop. Nothing
    /// after it runs.
    pub fn execute_program(&mut self,
                           program: &[Statement],
                           env: &mut Environment)
                           -> Result<Option<Value>, ControlFlowError> {
        match self.execute_block(program, env) {
            Flow::Normal => Ok(None),
            Flow::Return(value) => Ok(value),
            Flow::Break { line } => Err(ControlFlowError::BreakOutsideLoop { line }),
            Flow::Continue { line } => Err(ControlFlowError::ContinueOutsideLoop { line }),
        }
    }

    /// Sends a recoverable error to the sink.
    ///
    /// The sink is where diagnostics are shown; the log only echoes them at
    /// debug level.
    pub(crate) fn report(&mut self, diagnostic: impl Into<Diagnostic>) {
        let diagnostic = diagnostic.into();
        tracing::debug!(line = diagnostic.line(), "{diagnostic}");
        self.sink.report(&diagnostic);
    }

    pub(crate) fn print(&mut self, text: &str) {
        self.sink.print(text);
    }

    /// Evaluates a clause, reporting a failure and yielding `None` for it.
    pub(crate) fn value_of(&mut self, clause: &Clause, env: &Environment) -> Option<Value> {
        match clause.evaluate(env) {
            Ok(value) => Some(value),
            Err(error) => {
                self.report(error);
                None
            },
        }
    }

    /// Evaluates a condition. A condition that fails to evaluate is false.
    pub(crate) fn condition(&mut self, clause: &Clause, env: &Environment) -> bool {
        self.value_of(clause, env).is_some_and(|value| value.is_truthy())
    }
}
