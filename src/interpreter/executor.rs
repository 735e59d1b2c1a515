/// The executor state, [`core::Flow`] and the program entry point.
///
/// Every call that runs a block returns a [`core::Flow`]; constructs that
/// contain blocks inspect it and pass anything but `Normal` upward.
pub mod core;

/// Declarations, assignments, prints and the control-flow statements.
pub mod statement;

/// `jabtk` and `chal` loops, which consume `tod` and `aage`.
pub mod loops;
