use crate::{
    ast::{BinaryOperator, Expression},
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates `aur` / `ya` with short-circuiting.
    ///
    /// The right operand is only evaluated when the left one does not decide
    /// the result. The deciding operand itself is returned, not a coerced
    /// boolean: `0 ya "x"` is `"x"`.
    pub(crate) fn eval_logic(&self,
                             op: BinaryOperator,
                             left: &Expression,
                             right: &Expression)
                             -> EvalResult<Value> {
        let left = self.eval(left)?;

        let decided = match op {
            BinaryOperator::And => !left.is_truthy(),
            _ => left.is_truthy(),
        };

        if decided { Ok(left) } else { self.eval(right) }
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::{environment::Environment, evaluator::core::evaluate, value::Value};

    #[test]
    fn returns_deciding_operand() {
        let env = Environment::new();
        assert_eq!(evaluate("0 ya \"x\"", &env).unwrap(), Value::Str("x".into()));
        assert_eq!(evaluate("2 aur 3", &env).unwrap(), Value::Int(3));
        assert_eq!(evaluate("\"\" aur 3", &env).unwrap(), Value::Str(String::new()));
    }

    #[test]
    fn right_side_errors_are_skipped_when_decided() {
        let env = Environment::new();
        assert_eq!(evaluate("sahi ya 1 / 0", &env).unwrap(), Value::Bool(true));
        assert!(evaluate("jhooth ya 1 / 0", &env).is_err());
    }
}
