use std::cmp::Ordering;

use crate::{
    error::EvaluationErrorKind,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::core::{Argument, range_escapes},
        },
        value::Value,
    },
};

/// An arithmetic progression `start, start + step, ...` stopping before
/// `stop`, as built by `range(...)`.
///
/// Never materialised: only its length and extremes are ever needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    /// First element.
    pub start: i64,
    /// Exclusive bound.
    pub stop:  i64,
    /// Distance between elements, never zero.
    pub step:  i64,
}

impl IntRange {
    /// Builds a range from `range(stop)`, `range(start, stop)` or
    /// `range(start, stop, step)` arguments.
    ///
    /// # Errors
    /// `TypeMismatch` for a non-integer bound and `InvalidArgument` for a
    /// zero step.
    pub fn from_arguments(args: &[Argument]) -> EvalResult<Self> {
        let bounds = args.iter()
                         .map(|arg| match arg.value()? {
                             Value::Int(n) => Ok(*n),
                             Value::Bool(b) => Ok(i64::from(*b)),
                             other => Err(EvaluationErrorKind::TypeMismatch {
                                 details: format!("range() bounds must be int, found {}", other.type_name()),
                             }),
                         })
                         .collect::<EvalResult<Vec<i64>>>()?;

        let range = match bounds.as_slice() {
            [stop] => Self { start: 0,
                             stop:  *stop,
                             step:  1, },
            [start, stop] => Self { start: *start,
                                    stop:  *stop,
                                    step:  1, },
            [start, stop, step] => Self { start: *start,
                                          stop:  *stop,
                                          step:  *step, },
            _ => {
                return Err(EvaluationErrorKind::InvalidArgument { details: "range() takes 1 to 3 bounds".to_string() });
            },
        };

        if range.step == 0 {
            return Err(EvaluationErrorKind::InvalidArgument { details: "range() step must not be zero".to_string() });
        }
        Ok(range)
    }

    /// Number of elements.
    ///
    /// # Example
    /// ```
    /// use hinglish::interpreter::evaluator::function::sequence::IntRange;
    ///
    /// assert_eq!(IntRange { start: 0, stop: 10, step: 3 }.len(), 4);
    /// assert_eq!(IntRange { start: 5, stop: 0, step: -2 }.len(), 3);
    /// assert_eq!(IntRange { start: 5, stop: 0, step: 1 }.len(), 0);
    /// ```
    #[must_use]
    pub fn len(&self) -> u64 {
        let (start, stop, step) = (i128::from(self.start), i128::from(self.stop), i128::from(self.step));

        let span = if step > 0 { stop - start } else { start - stop };
        if span <= 0 {
            return 0;
        }
        u64::try_from((span - 1) / step.abs() + 1).unwrap_or(u64::MAX)
    }

    /// Whether the range has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Last element, if any.
    #[must_use]
    pub fn last(&self) -> Option<i64> {
        let count = self.len().checked_sub(1)?;
        let last = i128::from(self.start) + i128::from(count) * i128::from(self.step);
        i64::try_from(last).ok()
    }

    /// Largest element, if any.
    #[must_use]
    pub fn max(&self) -> Option<i64> {
        if self.step > 0 { self.last() } else { (!self.is_empty()).then_some(self.start) }
    }

    /// Smallest element, if any.
    #[must_use]
    pub fn min(&self) -> Option<i64> {
        if self.step > 0 { (!self.is_empty()).then_some(self.start) } else { self.last() }
    }
}

/// `range(...)` called anywhere but directly inside `len`, `max` or `min`.
///
/// The bounds are still checked so their errors are reported first.
pub fn range(args: &[Argument]) -> EvalResult<Value> {
    IntRange::from_arguments(args)?;
    Err(range_escapes())
}

/// `len(x)`: characters in a string, or elements in a range.
pub fn len(args: &[Argument]) -> EvalResult<Value> {
    let count = match args.first() {
        Some(Argument::Range(range)) => range.len(),
        Some(Argument::Value(Value::Str(s))) => u64::try_from(s.chars().count()).unwrap_or(u64::MAX),
        Some(Argument::Value(other)) => {
            return Err(EvaluationErrorKind::TypeMismatch { details: format!("object of type '{}' has no len()",
                                                                            other.type_name()) });
        },
        None => 0,
    };

    i64::try_from(count).map(Value::Int).map_err(|_| EvaluationErrorKind::Overflow)
}

/// `max(...)` / `min(...)`.
///
/// With several arguments, returns the first largest (or smallest) one.
/// With a single argument, that argument must be a range or a string, and
/// the result is its largest (or smallest) element.
pub fn extreme(name: &str, args: &[Argument]) -> EvalResult<Value> {
    let wanted = if name == "max" { Ordering::Greater } else { Ordering::Less };

    match args {
        [Argument::Range(range)] => {
            let value = if wanted == Ordering::Greater { range.max() } else { range.min() };
            value.map(Value::Int).ok_or_else(|| empty_sequence(name))
        },
        [Argument::Value(Value::Str(s))] => {
            let c = if wanted == Ordering::Greater { s.chars().max() } else { s.chars().min() };
            c.map(|c| Value::Str(c.to_string())).ok_or_else(|| empty_sequence(name))
        },
        [Argument::Value(other)] => {
            Err(EvaluationErrorKind::TypeMismatch { details: format!("'{}' object is not iterable",
                                                                     other.type_name()) })
        },
        _ => {
            let mut best: Option<&Value> = None;
            for arg in args {
                let value = arg.value()?;
                let replace = match best {
                    Some(current) => value.ordering(current, name)? == wanted,
                    None => true,
                };
                if replace {
                    best = Some(value);
                }
            }
            best.cloned().ok_or_else(|| empty_sequence(name))
        },
    }
}

fn empty_sequence(name: &str) -> EvaluationErrorKind {
    EvaluationErrorKind::InvalidArgument { details: format!("{name}() arg is an empty sequence") }
}
