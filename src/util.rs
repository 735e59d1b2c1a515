/// Numeric conversion helpers.
///
/// This module provides the conversions between `i64` and `f64` that the
/// evaluator needs for promotion, `int()` and `round()`, so that out-of-range
/// floats are reported instead of silently saturating.
pub mod num;
