/// Core evaluation entry points.
///
/// Holds the [`core::Evaluator`], which walks an expression tree against a
/// read-only view of the environment, and the text-level [`core::evaluate`].
pub mod core;

/// Canonicalisation of logical spellings.
///
/// Rewrites `and`/`&&` to `aur`, `or`/`||` to `ya`, `not`/`!` to `nahin` and
/// `true`/`false` to `sahi`/`jhooth` at the token level, so string literals are
/// never touched.
pub mod normalize;

/// Binary operator evaluation.
///
/// Arithmetic with Int to Float promotion, string concatenation and
/// repetition, comparisons, and short-circuiting logic.
pub mod binary;

/// Unary operator evaluation: negation and logical not.
pub mod unary;

/// The builtin function whitelist.
///
/// Conversions, numeric helpers and the `range`-aware aggregates.
pub mod function;
