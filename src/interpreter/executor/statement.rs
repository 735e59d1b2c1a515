use crate::{
    ast::{Clause, Statement},
    interpreter::{
        environment::Environment,
        executor::core::{Flow, Interpreter},
        value::Value,
    },
};

impl Interpreter<'_> {
    /// Executes a single statement.
    ///
    /// Evaluation errors are reported and the statement completes normally;
    /// only `tod`, `aage` and `lautao` produce an abrupt [`Flow`], directly or
    /// from a nested block.
    pub fn execute_statement(&mut self, statement: &Statement, env: &mut Environment) -> Flow {
        tracing::trace!(line = statement.line(), kind = statement.kind(), "execute");

        match statement {
            Statement::VarDecl { declared_type,
                                 name,
                                 initializer,
                                 .. } => {
                let value = match initializer {
                    Some(clause) => self.value_of(clause, env),
                    None => Some(declared_type.zero_value()),
                };
                bind(env, name, value);
                Flow::Normal
            },
            Statement::Assignment { name, value, .. } => {
                let value = self.value_of(value, env);
                bind(env, name, value);
                Flow::Normal
            },
            Statement::Print { value, .. } => {
                if let Some(value) = self.value_of(value, env) {
                    self.print(&value.to_string());
                }
                Flow::Normal
            },
            Statement::Return { value, .. } => {
                Flow::Return(value.as_ref().and_then(|clause| self.value_of(clause, env)))
            },
            Statement::Break { line } => Flow::Break { line: *line },
            Statement::Continue { line } => Flow::Continue { line: *line },
            Statement::If { condition,
                            then_block,
                            else_block,
                            .. } => self.execute_if(condition, then_block, else_block.as_deref(), env),
            Statement::While { condition, body, line } => self.execute_while(condition, body, *line, env),
            Statement::For { init,
                             condition,
                             update,
                             body,
                             line, } => self.execute_for(init.as_deref(),
                                                         condition.as_ref(),
                                                         update.as_deref(),
                                                         body,
                                                         *line,
                                                         env),
            Statement::Expression { value, .. } => {
                self.value_of(value, env);
                Flow::Normal
            },
            Statement::Invalid(error) => {
                self.report(error.clone());
                Flow::Normal
            },
        }
    }

    /// Runs exactly one branch. The condition is evaluated once.
    fn execute_if(&mut self,
                  condition: &Clause,
                  then_block: &[Statement],
                  else_block: Option<&[Statement]>,
                  env: &mut Environment)
                  -> Flow {
        if self.condition(condition, env) {
            self.execute_block(then_block, env)
        } else if let Some(else_block) = else_block {
            self.execute_block(else_block, env)
        } else {
            Flow::Normal
        }
    }
}

/// Binds `name`, or marks it unavailable when its value failed to evaluate.
fn bind(env: &mut Environment, name: &str, value: Option<Value>) {
    match value {
        Some(value) => env.define(name, value),
        None => env.mark_unavailable(name),
    }
}
