use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// `==` and `!=` never fail: values of unrelated types are simply unequal.
    /// Ordering operators compare numbers by value and strings
    /// lexicographically, and reject a string against a number.
    ///
    /// # Example
    /// ```
    /// use hinglish::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::Value},
    /// };
    ///
    /// let result = Evaluator::eval_comparison(BinaryOperator::Equal, &Value::Int(1), &Value::Str("1".into()));
    /// assert_eq!(result.unwrap(), Value::Bool(false));
    ///
    /// let result = Evaluator::eval_comparison(BinaryOperator::LessEqual, &Value::Int(3), &Value::Float(3.0));
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_comparison(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        let result = match op {
            BinaryOperator::Equal => left.loose_eq(right),
            BinaryOperator::NotEqual => !left.loose_eq(right),
            _ => {
                let symbol = op.to_string();
                let ordering = left.ordering(right, &symbol)?;
                if is_nan_pair(left, right) {
                    false
                } else {
                    match op {
                        BinaryOperator::Less => ordering == Ordering::Less,
                        BinaryOperator::Greater => ordering == Ordering::Greater,
                        BinaryOperator::LessEqual => ordering != Ordering::Greater,
                        _ => ordering != Ordering::Less,
                    }
                }
            },
        };

        Ok(Value::Bool(result))
    }
}

/// Every ordering against NaN is false.
fn is_nan_pair(left: &Value, right: &Value) -> bool {
    [left, right].iter()
                 .any(|value| matches!(value, Value::Float(x) if x.is_nan()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvaluationErrorKind;

    fn compare(op: BinaryOperator, left: impl Into<Value>, right: impl Into<Value>) -> EvalResult<Value> {
        Evaluator::eval_comparison(op, &left.into(), &right.into())
    }

    #[test]
    fn strings_order_lexicographically() {
        assert_eq!(compare(BinaryOperator::Less, "apple", "banana"), Ok(Value::Bool(true)));
        assert_eq!(compare(BinaryOperator::GreaterEqual, "b", "b"), Ok(Value::Bool(true)));
    }

    #[test]
    fn string_against_number_is_a_type_mismatch() {
        assert!(matches!(compare(BinaryOperator::Less, "1", 2_i64),
                         Err(EvaluationErrorKind::TypeMismatch { .. })));
        assert_eq!(compare(BinaryOperator::NotEqual, "1", 1_i64), Ok(Value::Bool(true)));
    }

    #[test]
    fn nan_is_unordered() {
        for op in [BinaryOperator::Less,
                   BinaryOperator::LessEqual,
                   BinaryOperator::Greater,
                   BinaryOperator::GreaterEqual]
        {
            assert_eq!(compare(op, f64::NAN, 1.0), Ok(Value::Bool(false)));
        }
        assert_eq!(compare(BinaryOperator::Equal, f64::NAN, f64::NAN), Ok(Value::Bool(false)));
    }

    #[test]
    fn bool_compares_as_number() {
        assert_eq!(compare(BinaryOperator::Greater, true, false), Ok(Value::Bool(true)));
        assert_eq!(compare(BinaryOperator::Equal, true, 1.0), Ok(Value::Bool(true)));
    }
}
