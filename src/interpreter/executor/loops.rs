use crate::{
    ast::{Clause, Statement},
    interpreter::{
        environment::Environment,
        executor::core::{Flow, Interpreter},
    },
};

impl Interpreter<'_> {
    /// Executes a `jabtk` loop.
    ///
    /// The condition is checked before every iteration, including the first.
    /// `aage` goes straight back to the check, `tod` leaves the loop, and
    /// `lautao` propagates outward.
    pub(crate) fn execute_while(&mut self,
                                condition: &Clause,
                                body: &[Statement],
                                line: usize,
                                env: &mut Environment)
                                -> Flow {
        tracing::debug!(line, "enter while");
        let mut iterations = 0u64;

        while self.condition(condition, env) {
            match self.execute_block(body, env) {
                Flow::Normal | Flow::Continue { .. } => {},
                Flow::Break { .. } => break,
                flow @ Flow::Return(_) => return flow,
            }
            iterations += 1;
        }

        tracing::debug!(line, iterations, "exit while");
        Flow::Normal
    }

    /// Executes a `chal` loop.
    ///
    /// `init` runs once. The update runs after every iteration that did not
    /// `tod`, including one cut short by `aage`. A missing condition is true.
    pub(crate) fn execute_for(&mut self,
                              init: Option<&Statement>,
                              condition: Option<&Clause>,
                              update: Option<&Statement>,
                              body: &[Statement],
                              line: usize,
                              env: &mut Environment)
                              -> Flow {
        tracing::debug!(line, "enter for");
        let mut iterations = 0u64;

        if let Some(init) = init {
            self.execute_statement(init, env);
        }

        while condition.is_none_or(|condition| self.condition(condition, env)) {
            match self.execute_block(body, env) {
                Flow::Normal | Flow::Continue { .. } => {},
                Flow::Break { .. } => break,
                flow @ Flow::Return(_) => return flow,
            }
            if let Some(update) = update {
                self.execute_statement(update, env);
            }
            iterations += 1;
        }

        tracing::debug!(line, iterations, "exit for");
        Flow::Normal
    }
}
