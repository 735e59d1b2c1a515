use crate::{
    ast::UnaryOperator,
    error::EvaluationErrorKind,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::{Number, Value},
    },
};

impl Evaluator<'_> {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation. Booleans negate as `0`/`1`.
    /// - `Not`: the negated truthiness of any value.
    ///
    /// # Example
    /// ```
    /// use hinglish::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::Value},
    /// };
    ///
    /// let v = Evaluator::eval_unary(UnaryOperator::Negate, &Value::Float(2.5)).unwrap();
    /// assert_eq!(v, Value::Float(-2.5));
    ///
    /// let v = Evaluator::eval_unary(UnaryOperator::Not, &Value::Str(String::new())).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => match value.expect_number("unary '-'")? {
                Number::Int(n) => n.checked_neg().map(Value::Int).ok_or(EvaluationErrorKind::Overflow),
                Number::Float(x) => Ok(Value::Float(-x)),
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negating_a_string_is_a_type_mismatch() {
        assert!(matches!(Evaluator::eval_unary(UnaryOperator::Negate, &Value::Str("a".into())),
                         Err(EvaluationErrorKind::TypeMismatch { .. })));
    }

    #[test]
    fn negating_min_int_overflows() {
        assert_eq!(Evaluator::eval_unary(UnaryOperator::Negate, &Value::Int(i64::MIN)),
                   Err(EvaluationErrorKind::Overflow));
        assert_eq!(Evaluator::eval_unary(UnaryOperator::Negate, &Value::Bool(true)),
                   Ok(Value::Int(-1)));
    }
}
