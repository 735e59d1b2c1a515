/// Dispatch from an operator to its handler.
pub mod core;

/// `+ - * / %` over numbers, plus string concatenation and repetition.
pub mod arithmetic;

/// Equality and ordering comparisons.
pub mod comparison;

/// Short-circuiting `aur` and `ya`.
pub mod logic;
