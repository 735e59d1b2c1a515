/// Entry points of the expression grammar.
///
/// Parses one expression from a token slice, either the longest prefix that
/// forms an expression or the whole slice.
pub mod core;

/// Binary operator levels, from logical OR down to multiplication.
pub mod binary;

/// Unary operators, literals, identifiers, calls and parentheses.
pub mod unary;

/// Structures a token stream into statements and nested blocks.
///
/// Uses the block resolver for every compound header and the expression
/// grammar for every simple statement.
pub mod statement;
