use crate::{
    ast::{BinaryOperator, Expression},
    error::{EvaluationError, EvaluationErrorKind},
    interpreter::{
        environment::Environment,
        evaluator::normalize::normalize,
        lexer::{Token, tokenize},
        parser::core::parse_complete,
        value::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or the
/// [`EvaluationErrorKind`] describing the failure. The caller attaches the
/// expression text and line.
pub type EvalResult<T> = Result<T, EvaluationErrorKind>;

/// Walks expression trees against a read-only view of the environment.
///
/// Identifiers are resolved as they are reached, so an operand skipped by
/// short-circuiting is never looked up.
pub struct Evaluator<'env> {
    env: &'env Environment,
}

impl<'env> Evaluator<'env> {
    /// Creates an evaluator reading from `env`.
    #[must_use]
    pub const fn new(env: &'env Environment) -> Self {
        Self { env }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// # Example
    /// ```
    /// use hinglish::{
    ///     ast::{BinaryOperator, Expression},
    ///     interpreter::{environment::Environment, evaluator::core::Evaluator, value::Value},
    /// };
    ///
    /// let mut env = Environment::new();
    /// env.define("x", Value::Int(4));
    ///
    /// let expr = Expression::Binary { op:    BinaryOperator::Mul,
    ///                                 left:  Box::new(Expression::Identifier("x".into())),
    ///                                 right: Box::new(Expression::Literal(Value::Float(0.5))), };
    ///
    /// assert_eq!(Evaluator::new(&env).eval(&expr), Ok(Value::Float(2.0)));
    /// ```
    pub fn eval(&self, expr: &Expression) -> EvalResult<Value> {
        match expr {
            Expression::Literal(value) => Ok(value.clone()),
            Expression::Identifier(name) => self.env.lookup(name),
            Expression::Unary { op, operand } => {
                let value = self.eval(operand)?;
                Self::eval_unary(*op, &value)
            },
            Expression::Binary { op: op @ (BinaryOperator::And | BinaryOperator::Or),
                                 left,
                                 right, } => self.eval_logic(*op, left, right),
            Expression::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right)
            },
            Expression::Call { name, args } => self.eval_call(name, args),
        }
    }
}

/// Evaluates a piece of source text as one expression.
///
/// The text is tokenized and normalized exactly as statement clauses are.
///
/// # Errors
/// An [`EvaluationError`] quoting `text` if it does not parse or fails to
/// evaluate.
///
/// # Example
/// ```
/// use hinglish::interpreter::{
///     environment::Environment,
///     evaluator::core::evaluate,
///     value::Value,
/// };
///
/// let env = Environment::new();
/// assert_eq!(evaluate("len(\"namaste\") > 3 aur sahi", &env).unwrap(), Value::Bool(true));
/// assert!(evaluate("1 / 0", &env).is_err());
/// ```
pub fn evaluate(text: &str, env: &Environment) -> Result<Value, EvaluationError> {
    let mut tokens: Vec<Token> = tokenize(text).collect();
    normalize(&mut tokens);
    let line = tokens.first().map_or(1, |t| t.line);

    parse_complete(&tokens).and_then(|expr| Evaluator::new(env).eval(&expr))
                           .map_err(|kind| EvaluationError::new(text.trim(), line, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(text: &str) -> EvalResult<Value> {
        let mut env = Environment::new();
        env.define("x", Value::Int(5));
        env.define("s", Value::Str("ab".into()));
        env.mark_unavailable("gone");
        evaluate(text, &env).map_err(|e| e.kind)
    }

    #[test]
    fn precedence() {
        assert_eq!(eval("1 + 2 * 3"), Ok(Value::Int(7)));
        assert_eq!(eval("(1 + 2) * 3"), Ok(Value::Int(9)));
        assert_eq!(eval("-x + 1"), Ok(Value::Int(-4)));
        assert_eq!(eval("1 < 2 == 2 < 3"), Ok(Value::Bool(true)));
        assert_eq!(eval("sahi ya jhooth aur jhooth"), Ok(Value::Bool(true)));
        assert_eq!(eval("nahin 1 == 2"), Ok(Value::Bool(false)));
    }

    #[test]
    fn identifiers_resolve_lazily() {
        assert_eq!(eval("jhooth aur undefined_name"), Ok(Value::Bool(false)));
        assert_eq!(eval("x ya undefined_name"), Ok(Value::Int(5)));
        assert_eq!(eval("sahi aur undefined_name"),
                   Err(EvaluationErrorKind::UndefinedIdentifier { name: "undefined_name".into() }));
    }

    #[test]
    fn unavailable_variable() {
        assert_eq!(eval("gone + 1"),
                   Err(EvaluationErrorKind::Unavailable { name: "gone".into() }));
    }

    #[test]
    fn keywords_inside_strings_survive() {
        assert_eq!(eval(r#""sahi aur ya" + s"#), Ok(Value::Str("sahi aur yaab".into())));
    }

    #[test]
    fn error_quotes_expression() {
        let env = Environment::new();
        let error = evaluate(" x / 0 ", &env).unwrap_err();
        assert_eq!(error.expression, "x / 0");
        assert_eq!(error.to_string(),
                   "Error on line 1: Could not evaluate 'x / 0': undefined identifier 'x'.");
    }

    #[test]
    fn malformed_expression_is_a_parse_failure() {
        assert!(matches!(eval("1 +"), Err(EvaluationErrorKind::ParseFailure { .. })));
        assert!(matches!(eval("x x"), Err(EvaluationErrorKind::ParseFailure { .. })));
        assert!(matches!(eval(""), Err(EvaluationErrorKind::ParseFailure { .. })));
    }
}
