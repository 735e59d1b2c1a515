use crate::{
    ast::BinaryOperator,
    error::EvaluationErrorKind,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::{Number, Value},
    },
    util::num::{floor_mod_f64, floor_mod_i64},
};

/// Longest string `*` may build.
pub const MAX_REPEAT_LEN: usize = 1 << 24;

impl Evaluator<'_> {
    /// Evaluates `+ - * / %`.
    ///
    /// - `+` with a string on either side concatenates the text forms.
    /// - `*` between a string and an integer repeats the string.
    /// - Otherwise both operands must be numeric. Two integers stay integer
    ///   (checked for overflow); any float promotes the operation to float.
    /// - `/` always produces a float.
    /// - `%` takes the sign of the divisor.
    ///
    /// # Example
    /// ```
    /// use hinglish::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::Value},
    /// };
    ///
    /// let v = Evaluator::eval_arithmetic(BinaryOperator::Div, &Value::Int(7), &Value::Int(2)).unwrap();
    /// assert_eq!(v, Value::Float(3.5));
    ///
    /// let v = Evaluator::eval_arithmetic(BinaryOperator::Add, &Value::Str("x = ".into()), &Value::Int(4)).unwrap();
    /// assert_eq!(v, Value::Str("x = 4".into()));
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        match (op, left, right) {
            (BinaryOperator::Add, Value::Str(_), _) | (BinaryOperator::Add, _, Value::Str(_)) => {
                Ok(Value::Str(format!("{left}{right}")))
            },
            (BinaryOperator::Mul, Value::Str(s), count) | (BinaryOperator::Mul, count, Value::Str(s)) => {
                repeat(s, count)
            },
            _ => {
                let symbol = op.to_string();
                let a = left.expect_number(&format!("'{symbol}'"))?;
                let b = right.expect_number(&format!("'{symbol}'"))?;
                match (a, b) {
                    (Number::Int(a), Number::Int(b)) => int_op(op, a, b),
                    (a, b) => float_op(op, a.as_f64(), b.as_f64()),
                }
            },
        }
    }
}

fn int_op(op: BinaryOperator, a: i64, b: i64) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => a.checked_add(b),
        BinaryOperator::Sub => a.checked_sub(b),
        BinaryOperator::Mul => a.checked_mul(b),
        BinaryOperator::Div => {
            return float_op(op, Number::Int(a).as_f64(), Number::Int(b).as_f64());
        },
        _ => {
            if b == 0 {
                return Err(EvaluationErrorKind::DivisionByZero);
            }
            floor_mod_i64(a, b)
        },
    };

    result.map(Value::Int).ok_or(EvaluationErrorKind::Overflow)
}

fn float_op(op: BinaryOperator, a: f64, b: f64) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => a + b,
        BinaryOperator::Sub => a - b,
        BinaryOperator::Mul => a * b,
        BinaryOperator::Div if b == 0.0 => return Err(EvaluationErrorKind::DivisionByZero),
        BinaryOperator::Div => a / b,
        _ if b == 0.0 => return Err(EvaluationErrorKind::DivisionByZero),
        _ => floor_mod_f64(a, b),
    };

    Ok(Value::Float(result))
}

fn repeat(text: &str, count: &Value) -> EvalResult<Value> {
    let count = match count {
        Value::Int(n) => *n,
        Value::Bool(b) => i64::from(*b),
        other => {
            return Err(EvaluationErrorKind::TypeMismatch { details: format!("can't multiply str by {}",
                                                                            other.type_name()) });
        },
    };

    let count = usize::try_from(count).unwrap_or(0);
    match text.len().checked_mul(count) {
        Some(len) if len <= MAX_REPEAT_LEN => Ok(Value::Str(text.repeat(count))),
        _ => Err(EvaluationErrorKind::InvalidArgument { details: format!("repeated string would exceed \
                                                                          {MAX_REPEAT_LEN} bytes") }),
    }
}
