use std::ops::Range;

use crate::{
    error::SyntaxError,
    interpreter::lexer::{Token, TokenKind},
};

/// A block located by [`resolve_block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBlock {
    /// Token range of the body, excluding both braces.
    pub body:  Range<usize>,
    /// Index of the opening brace.
    pub open:  usize,
    /// Index of the matching closing brace.
    pub close: usize,
}

/// Locates the brace-delimited body that belongs to the header at `header`.
///
/// Scans forward for the first `{`, then counts nesting depth until the `}`
/// that closes it. Braces inside strings and comments never become tokens, so
/// they do not disturb the count.
///
/// # Errors
/// `UnterminatedBlock` if there is no opening brace before the end of
/// `tokens`, or if it is never closed.
///
/// # Example
/// ```
/// use hinglish::interpreter::{
///     lexer::{Token, tokenize},
///     resolver::resolve_block,
/// };
///
/// let tokens: Vec<Token> = tokenize("jabtk (x) { agar (y) { tod } likh x } likh 1").collect();
/// let block = resolve_block(&tokens, 0).unwrap();
///
/// assert_eq!(block.open, 4);
/// assert_eq!(tokens[block.close].lexeme, "}");
/// assert_eq!(tokens[block.close + 1].lexeme, "likh");
/// ```
pub fn resolve_block(tokens: &[Token], header: usize) -> Result<ResolvedBlock, SyntaxError> {
    let open = tokens.iter()
                     .enumerate()
                     .skip(header)
                     .find(|(_, token)| token.kind == TokenKind::LBrace)
                     .map(|(index, _)| index)
                     .ok_or_else(|| unterminated(tokens, header))?;

    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(open + 1) {
        match token.kind {
            TokenKind::LBrace => depth += 1,
            TokenKind::RBrace if depth == 0 => {
                return Ok(ResolvedBlock { body: open + 1..index,
                                          open,
                                          close: index });
            },
            TokenKind::RBrace => depth -= 1,
            _ => {},
        }
    }

    Err(unterminated(tokens, header))
}

/// The expression clause of a compound header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderClause {
    /// Token range of the clause.
    pub tokens: Range<usize>,
    /// Index of the first token after the clause.
    pub after:  usize,
}

/// Extracts the clause of the header keyword at `keyword`.
///
/// The clause is the text between the first balanced parentheses after the
/// keyword. When the keyword is not followed by `(`, or the parentheses never
/// balance, the clause runs up to the next `{` (or the end of `tokens`).
#[must_use]
pub fn header_clause(tokens: &[Token], keyword: usize) -> HeaderClause {
    let start = keyword + 1;

    if tokens.get(start).is_some_and(|t| t.kind == TokenKind::LParen) {
        let mut depth = 0usize;
        for (index, token) in tokens.iter().enumerate().skip(start + 1) {
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen if depth == 0 => {
                    return HeaderClause { tokens: start + 1..index,
                                          after:  index + 1, };
                },
                TokenKind::RParen => depth -= 1,
                TokenKind::LBrace | TokenKind::RBrace => break,
                _ => {},
            }
        }
    }

    let end = tokens.iter()
                    .enumerate()
                    .skip(start)
                    .find(|(_, t)| matches!(t.kind, TokenKind::LBrace | TokenKind::RBrace))
                    .map_or(tokens.len(), |(index, _)| index);

    HeaderClause { tokens: start..end,
                   after:  end, }
}

/// Splits a `for` clause into its init, condition and update ranges.
///
/// # Errors
/// `MalformedForHeader` unless the clause contains exactly two semicolons.
pub fn split_for_header(tokens: &[Token],
                        clause: Range<usize>,
                        text: &str,
                        line: usize)
                        -> Result<[Range<usize>; 3], SyntaxError> {
    let semicolons: Vec<usize> = clause.clone()
                                       .filter(|&index| tokens[index].kind == TokenKind::Semicolon)
                                       .collect();

    match semicolons.as_slice() {
        [first, second] => Ok([clause.start..*first, first + 1..*second, second + 1..clause.end]),
        _ => Err(SyntaxError::MalformedForHeader { header: text.to_string(),
                                                   parts: semicolons.len() + 1,
                                                   line }),
    }
}

/// Builds the error for a header whose block cannot be found.
fn unterminated(tokens: &[Token], header: usize) -> SyntaxError {
    let line = tokens.get(header).map_or(0, |t| t.line);
    let header = tokens.iter()
                       .skip(header)
                       .take_while(|t| t.line == line && t.kind != TokenKind::LBrace)
                       .map(|t| t.lexeme.as_str())
                       .collect::<Vec<_>>()
                       .join(" ");

    SyntaxError::UnterminatedBlock { header, line }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn lex(source: &str) -> Vec<Token> {
        tokenize(source).collect()
    }

    #[test]
    fn body_spans_lines() {
        let tokens = lex("agar (x)\n{\n  likh 1\n}\nlikh 2");
        let block = resolve_block(&tokens, 0).unwrap();
        assert_eq!(block.open, 4);
        assert_eq!(block.body, 5..7);
        assert_eq!(tokens[block.close].line, 4);
    }

    #[test]
    fn nested_bodies_match_outer_brace() {
        for depth in 0..=12 {
            let mut source = String::from("chal (;;) {");
            for _ in 0..depth {
                source.push_str(" agar (sahi) { likh 1");
            }
            for _ in 0..depth {
                source.push_str(" }");
            }
            source.push_str(" } likh 2");

            let tokens = lex(&source);
            let block = resolve_block(&tokens, 0).unwrap();

            let body = &tokens[block.body.clone()];
            let opens = body.iter().filter(|t| t.kind == TokenKind::LBrace).count();
            let closes = body.iter().filter(|t| t.kind == TokenKind::RBrace).count();
            assert_eq!(opens, depth);
            assert_eq!(closes, depth);
            assert_eq!(block.close, tokens.len() - 3, "depth {depth}");
        }
    }

    #[test]
    fn braces_in_strings_and_comments_are_ignored() {
        let tokens = lex("jabtk (x) { likh \"}\" // }\n /* { */ }");
        let block = resolve_block(&tokens, 0).unwrap();
        assert_eq!(block.close, tokens.len() - 1);
    }

    #[test]
    fn missing_open_brace_is_unterminated() {
        let tokens = lex("agar (x) likh 1");
        assert_eq!(resolve_block(&tokens, 0),
                   Err(SyntaxError::UnterminatedBlock { header: "agar ( x ) likh 1".into(),
                                                        line:   1, }));
    }

    #[test]
    fn missing_close_brace_is_unterminated() {
        let tokens = lex("jabtk (x) {\n likh 1\n agar (y) { tod }");
        assert!(matches!(resolve_block(&tokens, 0),
                         Err(SyntaxError::UnterminatedBlock { line: 1, .. })));
    }

    #[test]
    fn clause_with_nested_parentheses() {
        let tokens = lex("agar (len(s) > (1 + 2)) {");
        let clause = header_clause(&tokens, 0);
        assert_eq!(clause.tokens, 2..12);
        assert_eq!(tokens[clause.after].kind, TokenKind::LBrace);
    }

    #[test]
    fn clause_without_parentheses_runs_to_brace() {
        let tokens = lex("jabtk x < 3 { likh x }");
        let clause = header_clause(&tokens, 0);
        assert_eq!(clause.tokens, 1..4);
        assert_eq!(clause.after, 4);
    }

    #[test]
    fn for_header_needs_two_semicolons() {
        let tokens = lex("chal (i=0; i<5; i=i+1) {");
        let clause = header_clause(&tokens, 0);
        let [init, cond, update] = split_for_header(&tokens, clause.tokens, "", 1).unwrap();
        assert_eq!((init.len(), cond.len(), update.len()), (3, 3, 5));

        let tokens = lex("chal (i=0; i<5) {");
        let clause = header_clause(&tokens, 0);
        assert_eq!(split_for_header(&tokens, clause.tokens, "i=0; i<5", 1),
                   Err(SyntaxError::MalformedForHeader { header: "i=0; i<5".into(),
                                                         parts:  2,
                                                         line:   1, }));
    }

    #[test]
    fn empty_for_parts_are_allowed() {
        let tokens = lex("chal (;;) {");
        let clause = header_clause(&tokens, 0);
        let parts = split_for_header(&tokens, clause.tokens, "", 1).unwrap();
        assert!(parts.iter().all(Range::is_empty));
    }
}
