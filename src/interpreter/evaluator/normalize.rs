use crate::interpreter::lexer::{Token, TokenKind};

/// Rewrites every token to its canonical kind.
///
/// The symbols `&&`, `||` and `!` and the English words `and`, `or`, `not`,
/// `true` and `false` (in any case) become the same kinds as `aur`, `ya`,
/// `nahin`, `sahi` and `jhooth`. Lexemes are left as written so diagnostics
/// quote the source. String literals are single tokens and are never touched.
///
/// # Example
/// ```
/// use hinglish::interpreter::{
///     evaluator::normalize::normalize,
///     lexer::{Token, TokenKind, tokenize},
/// };
///
/// let mut tokens: Vec<Token> = tokenize(r#"True && "and""#).collect();
/// normalize(&mut tokens);
///
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, [TokenKind::True, TokenKind::And, TokenKind::StringLiteral]);
/// assert_eq!(tokens[1].lexeme, "&&");
/// ```
pub fn normalize(tokens: &mut [Token]) {
    for token in tokens {
        token.kind = canonical_kind(token);
    }
}

fn canonical_kind(token: &Token) -> TokenKind {
    match token.kind {
        TokenKind::AmpAmp => TokenKind::And,
        TokenKind::PipePipe => TokenKind::Or,
        TokenKind::Bang => TokenKind::Not,
        TokenKind::Identifier => match token.lexeme.to_ascii_lowercase().as_str() {
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => TokenKind::Identifier,
        },
        kind => kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn normalized(source: &str) -> Vec<TokenKind> {
        let mut tokens: Vec<Token> = tokenize(source).collect();
        normalize(&mut tokens);
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn english_and_symbolic_forms_match_localized() {
        assert_eq!(normalized("a aur b ya nahin c"), normalized("a AND b || !c"));
        assert_eq!(normalized("sahi jhooth"), normalized("TRUE false"));
    }

    #[test]
    fn not_equal_stays_intact() {
        assert_eq!(normalized("a != b"),
                   [TokenKind::Identifier, TokenKind::BangEqual, TokenKind::Identifier]);
    }

    #[test]
    fn identifiers_containing_keywords_are_untouched() {
        assert_eq!(normalized("android notable"),
                   [TokenKind::Identifier, TokenKind::Identifier]);
    }
}
