use std::iter::Peekable;

use crate::{
    ast::{Expression, UnaryOperator},
    error::EvaluationErrorKind,
    interpreter::{
        lexer::{Token, TokenKind, unescape},
        parser::core::{ParseResult, deeper, end_of_input, parse_expression, unexpected},
        value::Value,
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-` (numeric negation)
/// - `nahin` / `!` (logical not)
///
/// Unary operators are right-associative, so `nahin -x` is parsed as
/// `nahin (-x)`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "nahin") unary
///            | primary
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expression>
    where I: Iterator<Item = &'a Token> + Clone
{
    let op = match tokens.peek().map(|token| token.kind) {
        Some(TokenKind::Minus) => UnaryOperator::Negate,
        Some(TokenKind::Not) => UnaryOperator::Not,
        _ => return parse_primary(tokens, depth),
    };

    tokens.next();
    let operand = parse_unary(tokens, deeper(depth)?)?;
    Ok(Expression::Unary { op,
                           operand: Box::new(operand) })
}

/// Parses a primary (atomic) expression.
///
/// Grammar:
/// ```text
///     primary := INT | FLOAT | STRING | CHAR | "sahi" | "jhooth"
///              | name "(" arguments ")"
///              | name
///              | "(" expression ")"
/// ```
///
/// # Errors
/// `ParseFailure` naming the first token that cannot start an expression, or
/// when the tokens run out.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expression>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = tokens.peek().copied().ok_or_else(end_of_input)?;

    match token.kind {
        TokenKind::IntLiteral
        | TokenKind::FloatLiteral
        | TokenKind::StringLiteral
        | TokenKind::CharLiteral
        | TokenKind::True
        | TokenKind::False => {
            tokens.next();
            parse_literal(token).map(Expression::Literal)
        },
        kind if kind.is_name() => {
            tokens.next();
            parse_name(tokens, token, depth)
        },
        TokenKind::LParen => {
            tokens.next();
            let expr = parse_expression(tokens, deeper(depth)?)?;
            expect_closing_paren(tokens)?;
            Ok(expr)
        },
        _ => Err(unexpected(token)),
    }
}

/// Converts a literal token to its value.
fn parse_literal(token: &Token) -> ParseResult<Value> {
    let lexeme = token.lexeme.as_str();

    match token.kind {
        TokenKind::IntLiteral => lexeme.parse::<i64>().map(Value::Int).map_err(|_| {
            EvaluationErrorKind::ParseFailure { details: format!("integer literal '{lexeme}' is out of range") }
        }),
        TokenKind::FloatLiteral => lexeme.parse::<f64>().map(Value::Float).map_err(|e| {
            EvaluationErrorKind::ParseFailure { details: format!("bad float literal '{lexeme}': {e}") }
        }),
        TokenKind::StringLiteral | TokenKind::CharLiteral => {
            let body = lexeme.get(1..lexeme.len() - 1).unwrap_or_default();
            Ok(Value::Str(unescape(body)))
        },
        TokenKind::True => Ok(Value::Bool(true)),
        TokenKind::False => Ok(Value::Bool(false)),
        _ => Err(unexpected(token)),
    }
}

/// Parses a variable reference, or a call when the name is followed by `(`.
fn parse_name<'a, I>(tokens: &mut Peekable<I>, name: &Token, depth: usize) -> ParseResult<Expression>
    where I: Iterator<Item = &'a Token> + Clone
{
    if !tokens.peek().is_some_and(|t| t.kind == TokenKind::LParen) {
        return Ok(Expression::Identifier(name.lexeme.clone()));
    }
    tokens.next();

    let depth = deeper(depth)?;
    let mut args = Vec::new();
    if tokens.peek().is_some_and(|t| t.kind == TokenKind::RParen) {
        tokens.next();
    } else {
        loop {
            args.push(parse_expression(tokens, depth)?);
            match tokens.next() {
                Some(t) if t.kind == TokenKind::Comma => {},
                Some(t) if t.kind == TokenKind::RParen => break,
                Some(t) => return Err(unexpected(t)),
                None => return Err(end_of_input()),
            }
        }
    }

    Ok(Expression::Call { name: name.lexeme.clone(),
                          args })
}

fn expect_closing_paren<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<()>
    where I: Iterator<Item = &'a Token> + Clone
{
    match tokens.next() {
        Some(t) if t.kind == TokenKind::RParen => Ok(()),
        Some(t) => Err(unexpected(t)),
        None => Err(EvaluationErrorKind::ParseFailure { details: "missing ')'".to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{
        evaluator::normalize::normalize, lexer::tokenize, parser::core::parse_complete,
    };

    fn parse(source: &str) -> ParseResult<Expression> {
        let mut tokens: Vec<Token> = tokenize(source).collect();
        normalize(&mut tokens);
        parse_complete(&tokens)
    }

    #[test]
    fn literals() {
        assert_eq!(parse("42"), Ok(Expression::Literal(Value::Int(42))));
        assert_eq!(parse("2.5"), Ok(Expression::Literal(Value::Float(2.5))));
        assert_eq!(parse(r#""a\tb""#), Ok(Expression::Literal(Value::Str("a\tb".into()))));
        assert_eq!(parse("'x'"), Ok(Expression::Literal(Value::Str("x".into()))));
        assert_eq!(parse("SAHI"), Ok(Expression::Literal(Value::Bool(true))));
    }

    #[test]
    fn oversized_integer_is_a_parse_failure() {
        assert!(matches!(parse("99999999999999999999"),
                         Err(EvaluationErrorKind::ParseFailure { .. })));
    }

    #[test]
    fn unary_is_right_associative() {
        let lit = Box::new(Expression::Literal(Value::Int(1)));
        assert_eq!(parse("nahin -1"),
                   Ok(Expression::Unary { op:      UnaryOperator::Not,
                                          operand: Box::new(Expression::Unary { op:      UnaryOperator::Negate,
                                                                                operand: lit, }), }));
    }

    #[test]
    fn calls_and_grouping() {
        assert_eq!(parse("max(1, (2))"),
                   Ok(Expression::Call { name: "max".into(),
                                         args: vec![Expression::Literal(Value::Int(1)),
                                                    Expression::Literal(Value::Int(2))], }));
        assert_eq!(parse("range()"),
                   Ok(Expression::Call { name: "range".into(),
                                         args: Vec::new(), }));
    }

    #[test]
    fn unbalanced_parentheses_fail() {
        assert!(matches!(parse("(1 + 2"), Err(EvaluationErrorKind::ParseFailure { .. })));
        assert!(matches!(parse("len(1, "), Err(EvaluationErrorKind::ParseFailure { .. })));
        assert!(matches!(parse(")"), Err(EvaluationErrorKind::ParseFailure { .. })));
    }
}
