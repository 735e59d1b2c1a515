use std::{cmp::Ordering, fmt};

use crate::{
    error::EvaluationErrorKind,
    interpreter::evaluator::core::EvalResult,
    util::num::i64_to_f64,
};

/// Represents a runtime value in the interpreter.
///
/// Every value carries exactly one of four tags. Values are owned by the
/// environment and handed out by copy, so two variables never alias.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Int(i64),
    /// A double precision float.
    Float(f64),
    /// `sahi` or `jhooth`.
    Bool(bool),
    /// A string of text.
    Str(String),
}

/// The numeric view of a value used by arithmetic and comparisons.
///
/// Booleans take part as `0` and `1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// An integer operand.
    Int(i64),
    /// A float operand.
    Float(f64),
}

impl Number {
    /// Widens to `f64`.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(n) => i64_to_f64(n),
            Self::Float(x) => x,
        }
    }

    /// Compares two numbers, promoting to float when the tags differ.
    #[must_use]
    pub fn compare(self, other: Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl Value {
    /// The name of the value's tag, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Str(_) => "str",
        }
    }

    /// Maps the value through the boolean coercion.
    ///
    /// Numeric zero and the empty string are false, everything else is true.
    ///
    /// # Example
    /// ```
    /// use hinglish::interpreter::value::Value;
    ///
    /// assert!(!Value::Int(0).is_truthy());
    /// assert!(Value::Float(0.5).is_truthy());
    /// assert!(!Value::Str(String::new()).is_truthy());
    /// assert!(Value::Str("0".into()).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Int(n) => *n != 0,
            Self::Float(x) => *x != 0.0,
            Self::Bool(b) => *b,
            Self::Str(s) => !s.is_empty(),
        }
    }

    /// The numeric view of the value, or `None` for strings.
    #[must_use]
    pub const fn as_number(&self) -> Option<Number> {
        match self {
            Self::Int(n) => Some(Number::Int(*n)),
            Self::Float(x) => Some(Number::Float(*x)),
            Self::Bool(b) => Some(Number::Int(*b as i64)),
            Self::Str(_) => None,
        }
    }

    /// Like [`Value::as_number`], but a string is a type mismatch.
    ///
    /// `what` names the operation for the error message.
    pub fn expect_number(&self, what: &str) -> EvalResult<Number> {
        self.as_number()
            .ok_or_else(|| EvaluationErrorKind::TypeMismatch { details: format!("{what} expects a number, found {}",
                                                                                self.type_name()) })
    }

    /// Loose equality: numbers compare by value across tags, strings by
    /// content, and a string never equals a number.
    #[must_use]
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Str(_), _) | (_, Self::Str(_)) => false,
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.compare(b) == Some(Ordering::Equal),
                _ => false,
            },
        }
    }

    /// Ordering used by `<`, `>`, `max` and `min`.
    ///
    /// Numbers order numerically and strings lexicographically; anything
    /// else is a type mismatch.
    pub fn ordering(&self, other: &Self, op: &str) -> EvalResult<Ordering> {
        let ordering = match (self, other) {
            (Self::Str(a), Self::Str(b)) => Some(a.cmp(b)),
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.compare(b),
                _ => {
                    return Err(EvaluationErrorKind::TypeMismatch {
                        details: format!("'{op}' not supported between {} and {}",
                                         self.type_name(),
                                         other.type_name()),
                    });
                },
            },
        };

        // NaN compares unordered; treat it as "not less, not greater".
        Ok(ordering.unwrap_or(Ordering::Equal))
    }
}

/// Magnitudes from here up print in exponent form.
const EXPONENT_FROM: f64 = 1e16;
/// Nonzero magnitudes below this print in exponent form.
const EXPONENT_BELOW: f64 = 1e-4;

/// Writes a float so it never reads as an integer: `5.0`, `0.25`, `1e+16`,
/// `1.5e-07`, `inf`, `nan`.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("nan");
    }
    if x.is_infinite() {
        return f.write_str(if x < 0.0 { "-inf" } else { "inf" });
    }

    let magnitude = x.abs();
    if magnitude >= EXPONENT_FROM || (magnitude != 0.0 && magnitude < EXPONENT_BELOW) {
        let formatted = format!("{x:e}");
        let (mantissa, exponent) = formatted.split_once('e').unwrap_or((&formatted, "0"));
        let (sign, digits) = exponent.strip_prefix('-').map_or(("+", exponent), |digits| ("-", digits));
        write!(f, "{mantissa}e{sign}{digits:0>2}")
    } else if x.fract() == 0.0 {
        write!(f, "{x:.1}")
    } else {
        write!(f, "{x}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write_float(f, *x),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_forms() {
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Float(5.0).to_string(), "5.0");
        assert_eq!(Value::Float(0.1 + 0.2).to_string(), "0.30000000000000004");
        assert_eq!(Value::Float(-2.5).to_string(), "-2.5");
        assert_eq!(Value::Float(9_999_999_999_999_998.0).to_string(), "9999999999999998.0");
        assert_eq!(Value::Float(1e16).to_string(), "1e+16");
        assert_eq!(Value::Float(-1.2345678901234568e18).to_string(), "-1.2345678901234568e+18");
        assert_eq!(Value::Float(1.5e-7).to_string(), "1.5e-07");
        assert_eq!(Value::Float(0.0001).to_string(), "0.0001");
        assert_eq!(Value::Float(0.0).to_string(), "0.0");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::Float(f64::NAN).to_string(), "nan");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Str("namaste".into()).to_string(), "namaste");
    }

    #[test]
    fn bool_is_numeric() {
        assert_eq!(Value::Bool(true).as_number(), Some(Number::Int(1)));
        assert!(Value::Bool(true).loose_eq(&Value::Int(1)));
        assert!(Value::Int(2).loose_eq(&Value::Float(2.0)));
        assert!(!Value::Str("1".into()).loose_eq(&Value::Int(1)));
    }

    #[test]
    fn ordering_rejects_mixed_string_and_number() {
        assert_eq!(Value::Str("a".into()).ordering(&Value::Str("b".into()), "<"),
                   Ok(Ordering::Less));
        assert!(matches!(Value::Str("a".into()).ordering(&Value::Int(1), "<"),
                         Err(EvaluationErrorKind::TypeMismatch { .. })));
    }
}
