use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expression},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, deeper},
            unary::parse_unary,
        },
    },
};

/// Parses one left-associative precedence level.
///
/// `operand` parses the next-higher level; `accepts` selects the operators
/// that belong to this one. Every operator in the chain deepens the tree by
/// one level.
fn parse_level<'a, I>(tokens: &mut Peekable<I>,
                      depth: usize,
                      operand: fn(&mut Peekable<I>, usize) -> ParseResult<Expression>,
                      accepts: fn(BinaryOperator) -> bool)
                      -> ParseResult<Expression>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut left = operand(tokens, depth)?;
    let mut chain = depth;

    while let Some(op) = tokens.peek()
                               .and_then(|token| token_to_binary_operator(token.kind))
                               .filter(|op| accepts(*op))
    {
        tokens.next();
        chain = deeper(chain)?;
        let right = operand(tokens, chain)?;
        left = Expression::Binary { op,
                                    left: Box::new(left),
                                    right: Box::new(right) };
    }

    Ok(left)
}

/// Parses logical OR expressions.
///
/// The rule is: `logical_or := logical_and ("ya" logical_and)*`
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expression>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_level(tokens, depth, parse_logical_and, |op| op == BinaryOperator::Or)
}

/// Parses logical AND expressions.
///
/// The rule is: `logical_and := equality ("aur" equality)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expression>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_level(tokens, depth, parse_equality, |op| op == BinaryOperator::And)
}

/// Parses equality comparisons.
///
/// The rule is: `equality := relational (("==" | "!=") relational)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expression>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_level(tokens, depth, parse_relational, |op| {
        matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual)
    })
}

/// Parses ordering comparisons.
///
/// The rule is: `relational := additive (("<" | ">" | "<=" | ">=") additive)*`
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expression>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_level(tokens, depth, parse_additive, |op| {
        matches!(op,
                 BinaryOperator::Less
                 | BinaryOperator::Greater
                 | BinaryOperator::LessEqual
                 | BinaryOperator::GreaterEqual)
    })
}

/// Parses addition and subtraction.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expression>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_level(tokens, depth, parse_multiplicative, |op| {
        matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
    })
}

/// Parses multiplication, division and modulo.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expression>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_level(tokens, depth, parse_unary, |op| {
        matches!(op, BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
    })
}

/// Maps a token kind to its binary operator, if it is one.
///
/// Expects normalized tokens: `&&` and `aur` both arrive as
/// [`TokenKind::And`].
///
/// # Example
/// ```
/// use hinglish::{
///     ast::BinaryOperator,
///     interpreter::{lexer::TokenKind, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(TokenKind::Percent), Some(BinaryOperator::Mod));
/// assert_eq!(token_to_binary_operator(TokenKind::Equals), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Percent => Some(BinaryOperator::Mod),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        TokenKind::And => Some(BinaryOperator::And),
        TokenKind::Or => Some(BinaryOperator::Or),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{
        evaluator::normalize::normalize, lexer::tokenize, parser::core::parse_complete,
        value::Value,
    };

    fn parse(source: &str) -> Expression {
        let mut tokens: Vec<Token> = tokenize(source).collect();
        normalize(&mut tokens);
        parse_complete(&tokens).unwrap()
    }

    fn int(n: i64) -> Box<Expression> {
        Box::new(Expression::Literal(Value::Int(n)))
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(parse("1 + 2 * 3"),
                   Expression::Binary { op:    BinaryOperator::Add,
                                        left:  int(1),
                                        right: Box::new(Expression::Binary { op:    BinaryOperator::Mul,
                                                                             left:  int(2),
                                                                             right: int(3), }), });
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(parse("8 - 4 - 2"),
                   Expression::Binary { op:    BinaryOperator::Sub,
                                        left:  Box::new(Expression::Binary { op:    BinaryOperator::Sub,
                                                                             left:  int(8),
                                                                             right: int(4), }),
                                        right: int(2), });
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let Expression::Binary { op, right, .. } = parse("a ya b aur c") else {
            panic!("expected a binary expression");
        };
        assert_eq!(op, BinaryOperator::Or);
        assert!(matches!(*right, Expression::Binary { op: BinaryOperator::And, .. }));
    }

    #[test]
    fn relational_binds_tighter_than_equality() {
        let Expression::Binary { op, left, .. } = parse("1 < 2 == sahi") else {
            panic!("expected a binary expression");
        };
        assert_eq!(op, BinaryOperator::Equal);
        assert!(matches!(*left, Expression::Binary { op: BinaryOperator::Less, .. }));
    }
}
