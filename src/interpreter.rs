/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// carrying its kind, its exact text and a 1-based line and column.
///
/// # Responsibilities
/// - Recognizes the transliterated keywords case-insensitively.
/// - Handles numeric, string and character literals, identifiers (including
///   Devanagari), operators and punctuation.
/// - Skips whitespace and comments while keeping line numbers right.
/// - Turns unrecognized characters into `Unknown` tokens instead of failing.
pub mod lexer;
/// Locates brace-delimited bodies and header clauses in the token stream.
pub mod resolver;
/// The parser module builds statements and expression trees from tokens.
///
/// # Responsibilities
/// - Structures the token stream into a [`crate::ast::Block`] of statements.
/// - Parses every expression clause with a precedence-climbing grammar.
/// - Keeps structural and parse errors in the tree so they surface in
///   program order.
pub mod parser;
/// The evaluator module computes the value of expression trees.
///
/// # Responsibilities
/// - Normalizes logical keywords outside string literals.
/// - Resolves identifiers against the environment.
/// - Applies operators and the builtin function whitelist.
/// - Reports division by zero, type mismatches and parse failures.
pub mod evaluator;
/// Executes statements and propagates `tod`, `aage` and `lautao`.
pub mod executor;
/// The single flat variable store of a program run.
pub mod environment;
/// The runtime value type and its coercions.
pub mod value;
/// Where printed output and diagnostics go.
pub mod sink;
