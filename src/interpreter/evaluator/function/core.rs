use std::fmt;

use crate::{
    ast::Expression,
    error::EvaluationErrorKind,
    interpreter::{
        evaluator::{
            core::{EvalResult, Evaluator},
            function::{
                convert, numeric,
                sequence::{self, IntRange},
            },
        },
        value::Value,
    },
};

/// An evaluated builtin argument.
///
/// `range(...)` written directly as an argument is kept as a lazy range
/// rather than turned into a value; only `len`, `max` and `min` accept it.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Any ordinary value.
    Value(Value),
    /// A `range(...)` argument.
    Range(IntRange),
}

impl Argument {
    /// The argument as a plain value.
    ///
    /// # Errors
    /// `TypeMismatch` for a range.
    pub fn value(&self) -> EvalResult<&Value> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Range(_) => Err(range_escapes()),
        }
    }
}

/// The error for a `range(...)` used anywhere but `len`, `max` or `min`.
pub(crate) fn range_escapes() -> EvaluationErrorKind {
    EvaluationErrorKind::TypeMismatch { details: "range() can only be used inside len(), max() or min()".to_string() }
}

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluated arguments, already checked against its
/// arity.
type BuiltinFn = fn(&[Argument]) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `AtLeast(n)` means `n` or more arguments.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the accepted argument counts,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Every name a call expression may use.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "str"   => { arity: Arity::OneOf(&[0, 1]), func: convert::to_str },
    "int"   => { arity: Arity::OneOf(&[0, 1]), func: convert::to_int },
    "float" => { arity: Arity::OneOf(&[0, 1]), func: convert::to_float },
    "bool"  => { arity: Arity::OneOf(&[0, 1]), func: convert::to_bool },
    "len"   => { arity: Arity::Exact(1), func: sequence::len },
    "abs"   => { arity: Arity::Exact(1), func: numeric::abs },
    "round" => { arity: Arity::OneOf(&[1, 2]), func: numeric::round },
    "range" => { arity: Arity::OneOf(&[1, 2, 3]), func: sequence::range },
    "max"   => { arity: Arity::AtLeast(1), func: |args| sequence::extreme("max", args) },
    "min"   => { arity: Arity::AtLeast(1), func: |args| sequence::extreme("min", args) },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::OneOf(arr) => arr.contains(&n),
            Self::AtLeast(m) => n >= m,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::OneOf(counts) => {
                let counts: Vec<String> = counts.iter().map(ToString::to_string).collect();
                f.write_str(&counts.join(" or "))
            },
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Finds a builtin and checks the argument count against it.
fn lookup(name: &str, found: usize) -> EvalResult<&'static BuiltinDef> {
    let builtin = BUILTIN_TABLE.iter()
                               .find(|b| b.name == name)
                               .ok_or_else(|| EvaluationErrorKind::UnknownFunction { name: name.to_string() })?;

    if builtin.arity.check(found) {
        Ok(builtin)
    } else {
        Err(EvaluationErrorKind::ArgumentCount { name: builtin.name,
                                                 expected: builtin.arity.to_string(),
                                                 found })
    }
}

impl Evaluator<'_> {
    /// Evaluates a call to a builtin.
    ///
    /// The name must be in [`BUILTIN_FUNCTIONS`]; there are no user-defined
    /// functions. Arguments are evaluated left to right before the call.
    ///
    /// # Errors
    /// `UnknownFunction` for any other name, `ArgumentCount` for a wrong
    /// number of arguments, and whatever the builtin itself reports.
    pub(crate) fn eval_call(&self, name: &str, args: &[Expression]) -> EvalResult<Value> {
        let builtin = lookup(name, args.len())?;
        let values = self.eval_arguments(args)?;

        tracing::trace!(name, args = values.len(), "call builtin");
        (builtin.func)(&values)
    }

    fn eval_arguments(&self, args: &[Expression]) -> EvalResult<Vec<Argument>> {
        args.iter()
            .map(|arg| match arg {
                Expression::Call { name, args } if name == "range" => {
                    lookup(name, args.len())?;
                    IntRange::from_arguments(&self.eval_arguments(args)?).map(Argument::Range)
                },
                _ => self.eval(arg).map(Argument::Value),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{environment::Environment, evaluator::core::evaluate};

    fn eval(text: &str) -> EvalResult<Value> {
        evaluate(text, &Environment::new()).map_err(|e| e.kind)
    }

    #[test]
    fn unknown_function() {
        assert_eq!(eval("print(1)"),
                   Err(EvaluationErrorKind::UnknownFunction { name: "print".into() }));
        assert_eq!(eval("LEN(\"a\")"),
                   Err(EvaluationErrorKind::UnknownFunction { name: "LEN".into() }));
    }

    #[test]
    fn argument_count() {
        assert_eq!(eval("abs(1, 2)"),
                   Err(EvaluationErrorKind::ArgumentCount { name:     "abs",
                                                            expected: "1".into(),
                                                            found:    2, }));
        assert_eq!(eval("round()"),
                   Err(EvaluationErrorKind::ArgumentCount { name:     "round",
                                                            expected: "1 or 2".into(),
                                                            found:    0, }));
        assert_eq!(eval("max()"),
                   Err(EvaluationErrorKind::ArgumentCount { name:     "max",
                                                            expected: "at least 1".into(),
                                                            found:    0, }));
    }

    #[test]
    fn range_only_inside_aggregates() {
        assert_eq!(eval("len(range(5))"), Ok(Value::Int(5)));
        assert_eq!(eval("range(5)"), Err(range_escapes()));
        assert_eq!(eval("str(range(5))"), Err(range_escapes()));
        assert_eq!(eval("len(range(1, 2, 3, 4))"),
                   Err(EvaluationErrorKind::ArgumentCount { name:     "range",
                                                            expected: "1 or 2 or 3".into(),
                                                            found:    4, }));
    }

    #[test]
    fn every_builtin_is_listed() {
        assert_eq!(BUILTIN_FUNCTIONS,
                   ["str", "int", "float", "bool", "len", "abs", "round", "range", "max", "min"]);
    }
}
