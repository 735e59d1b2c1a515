use crate::{
    error::EvaluationErrorKind,
    interpreter::{evaluator::core::EvalResult, evaluator::function::core::Argument, value::Value},
    util::num::{f64_to_i64_checked, i64_to_f64},
};

/// `str(x)`: the text form of `x`, exactly as `likh` would print it.
///
/// With no argument, the empty string.
///
/// # Example
/// ```
/// use hinglish::interpreter::{
///     evaluator::function::{convert::to_str, core::Argument},
///     value::Value,
/// };
///
/// assert_eq!(to_str(&[Argument::Value(Value::Float(2.0))]).unwrap(), Value::Str("2.0".into()));
/// ```
pub fn to_str(args: &[Argument]) -> EvalResult<Value> {
    match args.first() {
        Some(arg) => Ok(Value::Str(arg.value()?.to_string())),
        None => Ok(Value::Str(String::new())),
    }
}

/// `int(x)`: truncates floats toward zero and parses strings.
pub fn to_int(args: &[Argument]) -> EvalResult<Value> {
    let Some(arg) = args.first() else {
        return Ok(Value::Int(0));
    };

    match arg.value()? {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::Float(x) => {
            let error = EvaluationErrorKind::InvalidArgument { details: format!("cannot convert float {x} to int") };
            f64_to_i64_checked(*x, error).map(Value::Int)
        },
        Value::Str(s) => s.trim().parse::<i64>().map(Value::Int).map_err(|_| {
            EvaluationErrorKind::InvalidArgument { details: format!("invalid literal for int(): '{s}'") }
        }),
    }
}

/// `float(x)`: widens numbers and parses strings.
pub fn to_float(args: &[Argument]) -> EvalResult<Value> {
    let Some(arg) = args.first() else {
        return Ok(Value::Float(0.0));
    };

    match arg.value()? {
        Value::Int(n) => Ok(Value::Float(i64_to_f64(*n))),
        Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::Float(x) => Ok(Value::Float(*x)),
        Value::Str(s) => s.trim().parse::<f64>().map(Value::Float).map_err(|_| {
            EvaluationErrorKind::InvalidArgument { details: format!("could not convert string to float: '{s}'") }
        }),
    }
}

/// `bool(x)`: the truthiness of `x`.
pub fn to_bool(args: &[Argument]) -> EvalResult<Value> {
    match args.first() {
        Some(arg) => Ok(Value::Bool(arg.value()?.is_truthy())),
        None => Ok(Value::Bool(false)),
    }
}
