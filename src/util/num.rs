/// Widens an `i64` to `f64`.
///
/// Magnitudes above `2^53` round to the nearest representable float, which is
/// the promotion the language defines for mixed arithmetic.
///
/// ## Example
/// ```
/// use hinglish::util::num::i64_to_f64;
///
/// assert_eq!(i64_to_f64(42), 42.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Truncates an `f64` toward zero and converts it to `i64`.
///
/// ## Errors
/// Returns `Err(error)` if the value is NaN, infinite, or outside the `i64`
/// range after truncation.
///
/// ## Example
/// ```
/// use hinglish::util::num::f64_to_i64_checked;
///
/// assert_eq!(f64_to_i64_checked(-3.9, "bad"), Ok(-3));
/// assert_eq!(f64_to_i64_checked(f64::NAN, "bad"), Err("bad"));
/// assert_eq!(f64_to_i64_checked(1e300, "bad"), Err("bad"));
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn f64_to_i64_checked<E>(value: f64, error: E) -> Result<i64, E> {
    let truncated = value.trunc();
    // i64::MAX is not representable; 2^63 is the first float past the range.
    if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated >= 9_223_372_036_854_775_808.0
    {
        return Err(error);
    }
    Ok(truncated as i64)
}

/// Python-style modulo for integers: the result takes the sign of the divisor.
///
/// Returns `None` when `divisor` is zero. Every other pair has an exact
/// result, including `i64::MIN % -1`.
///
/// ## Example
/// ```
/// use hinglish::util::num::floor_mod_i64;
///
/// assert_eq!(floor_mod_i64(-7, 3), Some(2));
/// assert_eq!(floor_mod_i64(7, -3), Some(-2));
/// assert_eq!(floor_mod_i64(7, 0), None);
/// assert_eq!(floor_mod_i64(i64::MIN, -1), Some(0));
/// ```
#[must_use]
pub fn floor_mod_i64(dividend: i64, divisor: i64) -> Option<i64> {
    // checked_rem reports MIN % -1 as overflow although the remainder is 0.
    if divisor == -1 {
        return Some(0);
    }
    let remainder = dividend.checked_rem(divisor)?;
    if remainder != 0 && ((remainder < 0) != (divisor < 0)) {
        Some(remainder + divisor)
    } else {
        Some(remainder)
    }
}

/// Python-style modulo for floats: the result takes the sign of the divisor.
///
/// The caller is responsible for rejecting a zero divisor.
#[must_use]
pub fn floor_mod_f64(dividend: f64, divisor: f64) -> f64 {
    let remainder = dividend % divisor;
    if remainder != 0.0 && ((remainder < 0.0) != (divisor < 0.0)) {
        remainder + divisor
    } else {
        remainder
    }
}
