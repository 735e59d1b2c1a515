use std::iter::Peekable;

use crate::{
    ast::Expression,
    error::EvaluationErrorKind,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::binary::parse_logical_or,
    },
};

/// Result type used by the expression parser.
///
/// Parse failures are evaluation errors of kind `ParseFailure`, reported when
/// the expression is first needed.
pub type ParseResult<T> = Result<T, EvaluationErrorKind>;

/// How deeply expressions and blocks may nest.
///
/// Parentheses, call arguments, prefix operators and each operator in a chain
/// add a level to an expression; each body adds a level to a block.
pub const MAX_NESTING: usize = 200;

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, logical OR, and recursively
/// descends through the precedence hierarchy. `depth` is the nesting level
/// the expression starts at.
///
/// Grammar: `expression := logical_or`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expression>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_logical_or(tokens, depth)
}

/// Enters one more nesting level.
///
/// # Errors
/// `ParseFailure` once [`MAX_NESTING`] is exceeded.
pub(crate) fn deeper(depth: usize) -> ParseResult<usize> {
    if depth >= MAX_NESTING {
        return Err(EvaluationErrorKind::ParseFailure { details: format!("expression nested more than {MAX_NESTING} \
                                                                         levels deep") });
    }
    Ok(depth + 1)
}

/// Parses the longest expression at the start of `tokens`.
///
/// Returns the expression and the number of tokens it used. Parsing stops at
/// the first token that cannot continue the expression.
pub fn parse_prefix(tokens: &[Token]) -> ParseResult<(Expression, usize)> {
    let mut iter = tokens.iter().peekable();
    let expr = parse_expression(&mut iter, 0)?;
    let consumed = tokens.len() - iter.count();
    Ok((expr, consumed))
}

/// Parses `tokens` as exactly one expression.
///
/// # Errors
/// `ParseFailure` if the tokens are not an expression or if tokens remain
/// after it.
pub fn parse_complete(tokens: &[Token]) -> ParseResult<Expression> {
    let (expr, consumed) = parse_prefix(tokens)?;
    match tokens.get(consumed) {
        None => Ok(expr),
        Some(token) => Err(unexpected(token)),
    }
}

/// Builds the parse failure for a token that does not fit the grammar.
pub(crate) fn unexpected(token: &Token) -> EvaluationErrorKind {
    let details = match token.kind {
        TokenKind::Unknown => {
            format!("unknown character '{}' at column {}", token.lexeme, token.column)
        },
        _ => format!("unexpected '{}' at column {}", token.lexeme, token.column),
    };
    EvaluationErrorKind::ParseFailure { details }
}

/// The parse failure for running out of tokens.
pub(crate) fn end_of_input() -> EvaluationErrorKind {
    EvaluationErrorKind::ParseFailure { details: "unexpected end of expression".to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::BinaryOperator,
        interpreter::{evaluator::normalize::normalize, lexer::tokenize, value::Value},
    };

    fn lex(source: &str) -> Vec<Token> {
        let mut tokens: Vec<Token> = tokenize(source).collect();
        normalize(&mut tokens);
        tokens
    }

    #[test]
    fn prefix_stops_at_statement_keyword() {
        let tokens = lex("1 + 2 tod");
        let (expr, consumed) = parse_prefix(&tokens).unwrap();
        assert_eq!(consumed, 3);
        assert_eq!(expr,
                   Expression::Binary { op:    BinaryOperator::Add,
                                        left:  Box::new(Expression::Literal(Value::Int(1))),
                                        right: Box::new(Expression::Literal(Value::Int(2))), });
    }

    #[test]
    fn complete_rejects_trailing_tokens() {
        assert!(parse_complete(&lex("x == 1")).is_ok());
        assert!(matches!(parse_complete(&lex("x 1")),
                         Err(EvaluationErrorKind::ParseFailure { .. })));
    }

    #[test]
    fn nesting_is_limited() {
        let at_limit = format!("{}1{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert_eq!(parse_complete(&lex(&at_limit)), Ok(Expression::Literal(Value::Int(1))));

        let too_deep = format!("{}1{}", "(".repeat(500), ")".repeat(500));
        let Err(EvaluationErrorKind::ParseFailure { details }) = parse_complete(&lex(&too_deep)) else {
            panic!("expected a parse failure");
        };
        assert!(details.contains("nested more than"));

        let negations = format!("{}1", "- ".repeat(MAX_NESTING));
        assert!(parse_complete(&lex(&negations)).is_ok());
        let negations = format!("{}1", "- ".repeat(MAX_NESTING + 1));
        assert!(parse_complete(&lex(&negations)).is_err());
        let chain = vec!["1"; MAX_NESTING + 2].join(" + ");
        assert!(parse_complete(&lex(&chain)).is_err());
        let chain = vec!["1"; MAX_NESTING].join(" + ");
        assert!(parse_complete(&lex(&chain)).is_ok());
    }

    #[test]
    fn unknown_character_is_named() {
        let Err(EvaluationErrorKind::ParseFailure { details }) = parse_complete(&lex("1 @ 2")) else {
            panic!("expected a parse failure");
        };
        assert!(details.contains("unknown character '@'"));
    }
}
