use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates a binary operation between two already evaluated values.
    ///
    /// Arithmetic operators go to [`Evaluator::eval_arithmetic`], equality and
    /// ordering to [`Evaluator::eval_comparison`]. `aur` and `ya` never reach
    /// this point with both operands evaluated; if they do, they pick their
    /// result the same way the short-circuiting path does.
    ///
    /// # Example
    /// ```
    /// use hinglish::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::Value},
    /// };
    ///
    /// let result = Evaluator::eval_binary(BinaryOperator::Add, &Value::Int(3), &Value::Float(0.5));
    /// assert_eq!(result.unwrap(), Value::Float(3.5));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or, Sub,
        };

        match op {
            Add | Sub | Mul | Div | Mod => Self::eval_arithmetic(op, left, right),
            Equal | NotEqual | Less | Greater | LessEqual | GreaterEqual => {
                Self::eval_comparison(op, left, right)
            },
            And => Ok(if left.is_truthy() { right } else { left }.clone()),
            Or => Ok(if left.is_truthy() { left } else { right }.clone()),
        }
    }
}
