/// Builtin lookup, arity checking and argument evaluation.
///
/// Declares the builtin table with the `builtin_functions!` macro.
pub mod core;

/// `str`, `int`, `float` and `bool`.
pub mod convert;

/// `abs` and `round`.
pub mod numeric;

/// `range`, and the `len`, `max` and `min` functions that can consume it.
pub mod sequence;
