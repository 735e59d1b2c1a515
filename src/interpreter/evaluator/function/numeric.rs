use crate::{
    error::EvaluationErrorKind,
    interpreter::{
        evaluator::{core::EvalResult, function::core::Argument},
        value::{Number, Value},
    },
    util::num::f64_to_i64_checked,
};

/// `abs(x)`: the magnitude of a number, keeping its numeric type.
///
/// # Example
/// ```
/// use hinglish::interpreter::{
///     evaluator::function::{core::Argument, numeric::abs},
///     value::Value,
/// };
///
/// assert_eq!(abs(&[Argument::Value(Value::Int(-4))]).unwrap(), Value::Int(4));
/// assert_eq!(abs(&[Argument::Value(Value::Float(-0.5))]).unwrap(), Value::Float(0.5));
/// ```
pub fn abs(args: &[Argument]) -> EvalResult<Value> {
    match argument(args, 0)?.expect_number("abs()")? {
        Number::Int(n) => n.checked_abs().map(Value::Int).ok_or(EvaluationErrorKind::Overflow),
        Number::Float(x) => Ok(Value::Float(x.abs())),
    }
}

/// `round(x)` and `round(x, n)`.
///
/// Halves round to the nearest even digit. With one argument the result is
/// an integer; with `n` digits it keeps the type of `x`, and a negative `n`
/// rounds to tens, hundreds and so on.
pub fn round(args: &[Argument]) -> EvalResult<Value> {
    let x = argument(args, 0)?.expect_number("round()")?;

    let Some(digits) = args.get(1) else {
        return match x {
            Number::Int(n) => Ok(Value::Int(n)),
            Number::Float(x) => {
                let error = EvaluationErrorKind::InvalidArgument { details: format!("cannot round {x} to int") };
                f64_to_i64_checked(x.round_ties_even(), error).map(Value::Int)
            },
        };
    };

    let digits = match digits.value()?.as_number() {
        Some(Number::Int(n)) => n,
        _ => {
            return Err(EvaluationErrorKind::TypeMismatch { details: "round() digits must be an int".to_string() });
        },
    };

    match x {
        Number::Int(n) => round_int(n, digits).map(Value::Int),
        Number::Float(x) => Ok(Value::Float(round_float(x, digits))),
    }
}

fn argument(args: &[Argument], index: usize) -> EvalResult<&Value> {
    args.get(index)
        .ok_or_else(|| EvaluationErrorKind::InvalidArgument { details: "missing argument".to_string() })?
        .value()
}

/// Rounds `n` to a multiple of `10^-digits`, half to even.
fn round_int(n: i64, digits: i64) -> EvalResult<i64> {
    if digits >= 0 {
        return Ok(n);
    }

    let exponent = u32::try_from(digits.unsigned_abs()).unwrap_or(u32::MAX);
    let Some(unit) = 10_i128.checked_pow(exponent).filter(|unit| *unit <= i128::from(i64::MAX)) else {
        return Ok(0);
    };

    let n = i128::from(n);
    let quotient = n.div_euclid(unit);
    let twice_remainder = 2 * n.rem_euclid(unit);

    let quotient = if twice_remainder > unit || (twice_remainder == unit && quotient % 2 != 0) {
        quotient + 1
    } else {
        quotient
    };

    i64::try_from(quotient * unit).map_err(|_| EvaluationErrorKind::Overflow)
}

/// Rounds `x` to `digits` decimal places, half to even.
fn round_float(x: f64, digits: i64) -> f64 {
    if !x.is_finite() {
        return x;
    }

    let exponent = i32::try_from(digits.clamp(-400, 400)).unwrap_or(0);
    let factor = 10_f64.powi(exponent);
    let scaled = x * factor;

    if !scaled.is_finite() {
        // More digits than the float carries.
        return x;
    }
    if factor == 0.0 {
        return 0.0_f64.copysign(x);
    }

    scaled.round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{environment::Environment, evaluator::core::evaluate};

    fn eval(text: &str) -> EvalResult<Value> {
        evaluate(text, &Environment::new()).map_err(|e| e.kind)
    }

    #[test]
    fn round_half_to_even() {
        assert_eq!(eval("round(2.5)"), Ok(Value::Int(2)));
        assert_eq!(eval("round(3.5)"), Ok(Value::Int(4)));
        assert_eq!(eval("round(-2.5)"), Ok(Value::Int(-2)));
        assert_eq!(eval("round(7)"), Ok(Value::Int(7)));
    }

    #[test]
    fn round_to_digits() {
        assert_eq!(eval("round(3.14159, 2)"), Ok(Value::Float(3.14)));
        assert_eq!(eval("round(1234.5, -2)"), Ok(Value::Float(1200.0)));
        assert_eq!(eval("round(1250, -2)"), Ok(Value::Int(1200)));
        assert_eq!(eval("round(1350, -2)"), Ok(Value::Int(1400)));
        assert_eq!(eval("round(-1351, -2)"), Ok(Value::Int(-1400)));
        assert_eq!(eval("round(5, 3)"), Ok(Value::Int(5)));
        assert_eq!(eval("round(5, -30)"), Ok(Value::Int(0)));
        assert!(matches!(eval("round(1.5, 0.5)"), Err(EvaluationErrorKind::TypeMismatch { .. })));
    }

    #[test]
    fn abs_values() {
        assert_eq!(eval("abs(-3)"), Ok(Value::Int(3)));
        assert_eq!(eval("abs(sahi)"), Ok(Value::Int(1)));
        assert!(matches!(eval("abs(\"x\")"), Err(EvaluationErrorKind::TypeMismatch { .. })));
    }
}
