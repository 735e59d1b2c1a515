use std::ops::Range;

use crate::{
    ast::{BinaryOperator, Block, Clause, DeclaredType, Expression, Statement},
    error::{EvaluationErrorKind, SyntaxError},
    interpreter::{
        evaluator::normalize::normalize,
        lexer::{Token, TokenKind, tokenize},
        parser::core::{MAX_NESTING, parse_complete, parse_prefix, unexpected},
        resolver::{header_clause, resolve_block, split_for_header},
        value::Value,
    },
};

/// Structures source text into a program.
///
/// Never fails: anything that cannot be structured becomes a
/// [`Statement::Invalid`] in program order, and an expression that cannot be
/// parsed is kept in its [`Clause`] until the statement owning it runs.
///
/// # Example
/// ```
/// use hinglish::{ast::Statement, interpreter::parser::statement::parse_program};
///
/// let program = parse_program("no x = 5\nagar (x > 1) { likh x } warna { likh 0 }");
///
/// assert_eq!(program.len(), 2);
/// assert!(matches!(program[0], Statement::VarDecl { .. }));
/// assert!(matches!(program[1], Statement::If { else_block: Some(_), .. }));
/// ```
#[must_use]
pub fn parse_program(source: &str) -> Block {
    let mut tokens: Vec<Token> = tokenize(source).collect();
    normalize(&mut tokens);

    let parser = StatementParser { source, tokens };
    parser.parse_sequence(0..parser.tokens.len(), 0)
}

struct StatementParser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
}

impl StatementParser<'_> {
    /// Parses every statement in `range`, a body `depth` levels deep.
    ///
    /// Stops early after an unterminated block, since nothing past it can be
    /// located reliably. A body past [`MAX_NESTING`] is replaced by a single
    /// error.
    fn parse_sequence(&self, range: Range<usize>, depth: usize) -> Block {
        let mut block = Block::new();
        let mut pos = range.start;

        if depth > MAX_NESTING {
            if let Some(token) = self.tokens[range].first() {
                block.push(Statement::Invalid(SyntaxError::NestedTooDeeply { limit: MAX_NESTING,
                                                                             line:  token.line, }));
            }
            return block;
        }

        while pos < range.end {
            match self.parse_statement(pos, range.end, &mut block, depth) {
                Some(next) => pos = next,
                None => break,
            }
        }

        block
    }

    /// Parses the statement at `pos` into `out` and returns where the next one
    /// starts, or `None` if the sequence must end here.
    fn parse_statement(&self, pos: usize, end: usize, out: &mut Block, depth: usize) -> Option<usize> {
        let token = &self.tokens[pos];

        match token.kind {
            TokenKind::Semicolon => Some(pos + 1),
            TokenKind::If => self.parse_if(pos, end, out, depth),
            TokenKind::While => self.parse_while(pos, end, out, depth),
            TokenKind::For => self.parse_for(pos, end, out, depth),
            TokenKind::Else | TokenKind::LBrace => {
                // A stray block is skipped along with its body.
                out.push(Statement::Invalid(stray(token)));
                match resolve_block(&self.tokens[..end], pos) {
                    Ok(block) => Some(block.close + 1),
                    Err(_) => Some(pos + 1),
                }
            },
            TokenKind::RBrace => {
                out.push(Statement::Invalid(stray(token)));
                Some(pos + 1)
            },
            _ => Some(self.parse_simple(pos, end, out)),
        }
    }

    /// `agar (cond) { ... } [warna agar (cond) { ... }]* [warna { ... }]`
    fn parse_if(&self, pos: usize, end: usize, out: &mut Block, depth: usize) -> Option<usize> {
        let tokens = &self.tokens[..end];
        let line = tokens[pos].line;
        let condition = self.clause(header_clause(tokens, pos).tokens, line);

        let block = match resolve_block(tokens, pos) {
            Ok(block) => block,
            Err(error) => {
                out.push(Statement::Invalid(error));
                return None;
            },
        };
        let then_block = self.parse_sequence(block.body, depth + 1);
        let mut next = block.close + 1;

        let else_block = match tokens.get(next).map(|t| t.kind) {
            Some(TokenKind::Else)
                if depth >= MAX_NESTING && tokens.get(next + 1).is_some_and(|t| t.kind == TokenKind::If) =>
            {
                let line = tokens[next].line;
                next = match skip_else_chain(tokens, next) {
                    Ok(after) => after,
                    Err(error) => {
                        out.push(Statement::Invalid(error));
                        return None;
                    },
                };
                Some(vec![Statement::Invalid(SyntaxError::NestedTooDeeply { limit: MAX_NESTING,
                                                                            line })])
            },
            Some(TokenKind::Else) if tokens.get(next + 1).is_some_and(|t| t.kind == TokenKind::If) => {
                let mut chain = Block::new();
                match self.parse_if(next + 1, end, &mut chain, depth + 1) {
                    Some(after) => {
                        next = after;
                        Some(chain)
                    },
                    None => {
                        // Only the failure is left in `chain`.
                        out.extend(chain);
                        return None;
                    },
                }
            },
            Some(TokenKind::Else) => match resolve_block(tokens, next) {
                Ok(block) => {
                    next = block.close + 1;
                    Some(self.parse_sequence(block.body, depth + 1))
                },
                Err(error) => {
                    out.push(Statement::Invalid(error));
                    return None;
                },
            },
            _ => None,
        };

        out.push(Statement::If { condition,
                                 then_block,
                                 else_block,
                                 line });
        Some(next)
    }

    /// `jabtk (cond) { ... }`
    fn parse_while(&self, pos: usize, end: usize, out: &mut Block, depth: usize) -> Option<usize> {
        let tokens = &self.tokens[..end];
        let line = tokens[pos].line;
        let condition = self.clause(header_clause(tokens, pos).tokens, line);

        match resolve_block(tokens, pos) {
            Ok(block) => {
                out.push(Statement::While { condition,
                                            body: self.parse_sequence(block.body, depth + 1),
                                            line });
                Some(block.close + 1)
            },
            Err(error) => {
                out.push(Statement::Invalid(error));
                None
            },
        }
    }

    /// `chal (init; cond; update) { ... }`
    ///
    /// A header that does not split into three parts, or whose init or update
    /// is not a simple assignment-like statement, skips the whole loop.
    fn parse_for(&self, pos: usize, end: usize, out: &mut Block, depth: usize) -> Option<usize> {
        let tokens = &self.tokens[..end];
        let line = tokens[pos].line;
        let clause = header_clause(tokens, pos).tokens;
        let header = self.text(clause.clone());
        let block = resolve_block(tokens, pos);

        let parts = split_for_header(tokens, clause, &header, line).and_then(|[init, cond, update]| {
            Ok((self.for_part(init, line)?, cond, self.for_part(update, line)?))
        });

        let ((init, cond, update), block) = match (parts, block) {
            (Ok(parts), Ok(block)) => (parts, block),
            (Err(error), Ok(block)) => {
                out.push(Statement::Invalid(error));
                return Some(block.close + 1);
            },
            (parts, Err(error)) => {
                if let Err(header_error) = parts {
                    out.push(Statement::Invalid(header_error));
                }
                out.push(Statement::Invalid(error));
                return None;
            },
        };

        let condition = (!cond.is_empty()).then(|| self.clause(cond, line));
        out.push(Statement::For { init,
                                  condition,
                                  update,
                                  body: self.parse_sequence(block.body, depth + 1),
                                  line });
        Some(block.close + 1)
    }

    /// Parses the init or update part of a `for` header.
    fn for_part(&self, range: Range<usize>, line: usize) -> Result<Option<Box<Statement>>, SyntaxError> {
        if range.is_empty() {
            return Ok(None);
        }

        let mut parsed = Block::new();
        let stop = self.parse_simple(range.start, range.end, &mut parsed);

        match parsed.pop() {
            Some(statement @ (Statement::VarDecl { .. }
                              | Statement::Assignment { .. }
                              | Statement::Expression { .. }))
                if parsed.is_empty() && stop == range.end =>
            {
                Ok(Some(Box::new(statement)))
            },
            _ => Err(SyntaxError::UnexpectedToken { token: self.text(range),
                                                    line }),
        }
    }

    /// Parses one non-compound statement and returns where the next one
    /// starts.
    fn parse_simple(&self, pos: usize, end: usize, out: &mut Block) -> usize {
        let token = &self.tokens[pos];
        let line = token.line;
        let seg = self.segment_end(pos, end);

        if let Some(declared_type) = declared_type(token.kind) {
            return self.parse_declaration(declared_type, pos, seg, out);
        }

        match token.kind {
            TokenKind::Print => {
                let (value, stop) = self.expression_at(pos + 1, seg, line);
                out.push(Statement::Print { value, line });
                stop
            },
            TokenKind::Return => {
                if pos + 1 < seg && !self.starts_statement_at(pos + 1, seg) {
                    let (value, stop) = self.expression_at(pos + 1, seg, line);
                    out.push(Statement::Return { value: Some(value),
                                                 line });
                    stop
                } else {
                    out.push(Statement::Return { value: None, line });
                    pos + 1
                }
            },
            TokenKind::Break => {
                out.push(Statement::Break { line });
                pos + 1
            },
            TokenKind::Continue => {
                out.push(Statement::Continue { line });
                pos + 1
            },
            kind if kind.is_name() => match self.kind_at(pos + 1, seg) {
                Some(TokenKind::Equals) => {
                    let (value, stop) = self.expression_at(pos + 2, seg, line);
                    out.push(Statement::Assignment { name: token.lexeme.clone(),
                                                     value,
                                                     line });
                    stop
                },
                Some(kind @ (TokenKind::PlusPlus | TokenKind::MinusMinus)) => {
                    out.push(self.step(pos, kind == TokenKind::PlusPlus));
                    pos + 2
                },
                _ => self.parse_expression_statement(pos, seg, out),
            },
            _ => self.parse_expression_statement(pos, seg, out),
        }
    }

    /// `<type> name [= expr]`
    fn parse_declaration(&self, declared_type: DeclaredType, pos: usize, seg: usize, out: &mut Block) -> usize {
        let line = self.tokens[pos].line;

        let name = match self.tokens.get(pos + 1) {
            Some(token) if pos + 1 < seg && token.kind.is_name() => token.lexeme.clone(),
            other => {
                let token = other.filter(|_| pos + 1 < seg).unwrap_or(&self.tokens[pos]);
                out.push(Statement::Invalid(SyntaxError::UnexpectedToken { token: token.lexeme.clone(),
                                                                           line:  token.line, }));
                return seg;
            },
        };

        if self.kind_at(pos + 2, seg) == Some(TokenKind::Equals) {
            let (initializer, stop) = self.expression_at(pos + 3, seg, line);
            out.push(Statement::VarDecl { declared_type,
                                          name,
                                          initializer: Some(initializer),
                                          line });
            return stop;
        }

        if pos + 2 < seg && !self.starts_statement_at(pos + 2, seg) {
            let token = &self.tokens[pos + 2];
            out.push(Statement::Invalid(SyntaxError::UnexpectedToken { token: token.lexeme.clone(),
                                                                       line:  token.line, }));
            return seg;
        }

        out.push(Statement::VarDecl { declared_type,
                                      name,
                                      initializer: None,
                                      line });
        pos + 2
    }

    fn parse_expression_statement(&self, pos: usize, seg: usize, out: &mut Block) -> usize {
        let line = self.tokens[pos].line;
        let (value, stop) = self.expression_at(pos, seg, line);
        out.push(Statement::Expression { value, line });
        stop
    }

    /// Desugars `name++` / `name--` into an assignment.
    fn step(&self, pos: usize, increment: bool) -> Statement {
        let name = self.tokens[pos].lexeme.clone();
        let line = self.tokens[pos].line;
        let op = if increment { BinaryOperator::Add } else { BinaryOperator::Sub };

        let expr = Expression::Binary { op,
                                        left: Box::new(Expression::Identifier(name.clone())),
                                        right: Box::new(Expression::Literal(Value::Int(1))) };

        Statement::Assignment { name,
                                value: Clause { text: self.text(pos..pos + 2),
                                                line,
                                                parsed: Ok(expr) },
                                line }
    }

    /// Parses the expression starting at `start`, within the segment ending
    /// at `seg`.
    ///
    /// The expression ends where the grammar cannot continue it. If what
    /// follows does not start another statement, the rest of the segment is
    /// folded into the clause as a parse failure.
    fn expression_at(&self, start: usize, seg: usize, line: usize) -> (Clause, usize) {
        if start >= seg {
            let parsed = Err(EvaluationErrorKind::ParseFailure { details: "expected an expression".to_string() });
            return (Clause { text: String::new(),
                             line,
                             parsed },
                    seg);
        }

        let line = self.tokens[start].line;
        match parse_prefix(&self.tokens[start..seg]) {
            Ok((expr, consumed)) => {
                let stop = start + consumed;
                if stop == seg || self.starts_statement_at(stop, seg) {
                    (Clause { text: self.text(start..stop),
                              line,
                              parsed: Ok(expr) },
                     stop)
                } else {
                    (Clause { text: self.text(start..seg),
                              line,
                              parsed: Err(unexpected(&self.tokens[stop])) },
                     seg)
                }
            },
            Err(kind) => (Clause { text: self.text(start..seg),
                                   line,
                                   parsed: Err(kind) },
                          seg),
        }
    }

    /// Builds a clause over a header's token range.
    fn clause(&self, range: Range<usize>, line: usize) -> Clause {
        let text = self.text(range.clone());
        let tokens = &self.tokens[range];

        let parsed = if tokens.is_empty() {
            Err(EvaluationErrorKind::ParseFailure { details: "expected an expression".to_string() })
        } else {
            parse_complete(tokens)
        };

        Clause { text,
                 line: tokens.first().map_or(line, |t| t.line),
                 parsed }
    }

    /// Finds where the simple statement at `pos` must end.
    ///
    /// That is the first `;` or line break outside parentheses, or the first
    /// brace.
    fn segment_end(&self, pos: usize, end: usize) -> usize {
        let mut depth = 0usize;
        let mut last_line = self.tokens[pos].line;

        for index in pos..end {
            let token = &self.tokens[index];
            if index > pos && depth == 0 && token.line > last_line {
                return index;
            }
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => depth = depth.saturating_sub(1),
                TokenKind::Semicolon if depth == 0 => return index,
                TokenKind::LBrace | TokenKind::RBrace => return index,
                _ => {},
            }
            last_line = token.line + token.lexeme.matches('\n').count();
        }

        end
    }

    /// Whether a new statement visibly begins at `index`.
    fn starts_statement_at(&self, index: usize, seg: usize) -> bool {
        let Some(kind) = self.kind_at(index, seg) else {
            return false;
        };

        kind.starts_statement()
        || (kind.is_name()
            && matches!(self.kind_at(index + 1, seg),
                        Some(TokenKind::Equals | TokenKind::PlusPlus | TokenKind::MinusMinus)))
    }

    fn kind_at(&self, index: usize, seg: usize) -> Option<TokenKind> {
        (index < seg).then(|| self.tokens[index].kind)
    }

    /// The source text covered by a token range.
    fn text(&self, range: Range<usize>) -> String {
        match (self.tokens.get(range.start), range.end.checked_sub(1).and_then(|i| self.tokens.get(i))) {
            (Some(first), Some(last)) if !range.is_empty() => {
                self.source[first.span.start..last.span.end].to_string()
            },
            _ => String::new(),
        }
    }
}

/// Steps over `warna ...` blocks starting at `pos` without parsing them.
fn skip_else_chain(tokens: &[Token], mut pos: usize) -> Result<usize, SyntaxError> {
    while tokens.get(pos).is_some_and(|t| t.kind == TokenKind::Else) {
        pos = resolve_block(tokens, pos)?.close + 1;
    }
    Ok(pos)
}

const fn declared_type(kind: TokenKind) -> Option<DeclaredType> {
    match kind {
        TokenKind::TypeInt => Some(DeclaredType::Int),
        TokenKind::TypeFloat => Some(DeclaredType::Float),
        TokenKind::TypeBool => Some(DeclaredType::Bool),
        TokenKind::TypeString => Some(DeclaredType::String),
        _ => None,
    }
}

fn stray(token: &Token) -> SyntaxError {
    SyntaxError::UnexpectedToken { token: token.lexeme.clone(),
                                   line:  token.line, }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(block: &Block) -> Vec<&'static str> {
        block.iter().map(Statement::kind).collect()
    }

    #[test]
    fn several_statements_share_a_line() {
        let program = parse_program("no i = 0 chal (i=0; i<5; i=i+1) { agar (i==2) { aage } likh i }");
        assert_eq!(kinds(&program), ["declaration", "for"]);

        let Statement::For { init, condition, update, body, .. } = &program[1] else {
            panic!("expected a for loop");
        };
        assert!(matches!(init.as_deref(), Some(Statement::Assignment { .. })));
        assert_eq!(condition.as_ref().map(|c| c.text.as_str()), Some("i<5"));
        assert!(matches!(update.as_deref(), Some(Statement::Assignment { .. })));
        assert_eq!(kinds(body), ["if", "print"]);
    }

    #[test]
    fn range_words_are_names() {
        let program = parse_program("no tak = 5\nse = 2\ntk++\nlikh se * tak");
        assert_eq!(kinds(&program), ["declaration", "assignment", "assignment", "print"]);
        assert!(matches!(&program[0], Statement::VarDecl { name, .. } if name == "tak"));
        assert!(matches!(&program[2], Statement::Assignment { name, .. } if name == "tk"));
    }

    /// `depth` nested `agar` blocks.
    fn nested_ifs(depth: usize) -> String {
        format!("{}likh 1{}", "agar (sahi) { ".repeat(depth), " }".repeat(depth))
    }

    /// Follows the first statement of each then-block down to the bottom.
    fn innermost(program: &Block) -> &Statement {
        let mut statement = &program[0];
        while let Statement::If { then_block, .. } = statement {
            statement = &then_block[0];
        }
        statement
    }

    #[test]
    fn blocks_nest_up_to_the_limit() {
        let program = parse_program(&nested_ifs(MAX_NESTING));
        assert!(matches!(innermost(&program), Statement::Print { .. }));
    }

    #[test]
    fn blocks_past_the_limit_are_rejected() {
        let program = parse_program(&nested_ifs(1000));
        assert_eq!(innermost(&program),
                   &Statement::Invalid(SyntaxError::NestedTooDeeply { limit: MAX_NESTING,
                                                                      line:  1, }));
    }

    #[test]
    fn long_else_if_chains_are_cut_off() {
        let mut source = String::from("agar (jhooth) { likh 0 }");
        for i in 1..1000 {
            source.push_str(&format!(" warna agar (jhooth) {{ likh {i} }}"));
        }
        source.push_str(" warna { likh \"last\" }\nlikh \"after\"");

        let program = parse_program(&source);
        assert_eq!(kinds(&program), ["if", "print"]);

        let mut statement = &program[0];
        let mut links = 0;
        while let Statement::If { else_block: Some(else_block), .. } = statement {
            statement = &else_block[0];
            links += 1;
        }
        assert_eq!(links, MAX_NESTING + 1);
        assert!(matches!(statement, Statement::Invalid(SyntaxError::NestedTooDeeply { .. })));
    }

    #[test]
    fn print_and_break_on_one_line() {
        let program = parse_program("jabtk (sahi) { likh 1 tod }");
        let Statement::While { body, .. } = &program[0] else {
            panic!("expected a while loop");
        };
        assert_eq!(kinds(body), ["print", "break"]);
    }

    #[test]
    fn expression_does_not_cross_lines() {
        let program = parse_program("no x = 1\n+ 2\nx = x +\n 3");
        assert_eq!(kinds(&program), ["declaration", "expression", "assignment", "expression"]);

        let Statement::Assignment { value, .. } = &program[2] else {
            panic!("expected an assignment");
        };
        assert_eq!(value.text, "x +");
        assert!(value.parsed.is_err());
    }

    #[test]
    fn parenthesised_expression_spans_lines() {
        let program = parse_program("likh (1 +\n 2)");
        let Statement::Print { value, .. } = &program[0] else {
            panic!("expected a print");
        };
        assert!(value.parsed.is_ok());
    }

    #[test]
    fn return_without_value() {
        let program = parse_program("lautao\nlautao 5\nlautao tod");
        assert!(matches!(program[0], Statement::Return { value: None, line: 1 }));
        assert!(matches!(program[1], Statement::Return { value: Some(_), line: 2 }));
        assert_eq!(kinds(&program), ["return", "return", "return", "break"]);
    }

    #[test]
    fn else_if_chains_nest() {
        let program = parse_program("agar (a) { likh 1 } warna agar (b) { likh 2 } warna { likh 3 }\nlikh 4");
        assert_eq!(kinds(&program), ["if", "print"]);

        let Statement::If { else_block: Some(chain), .. } = &program[0] else {
            panic!("expected an else branch");
        };
        assert!(matches!(chain.as_slice(), [Statement::If { else_block: Some(_), .. }]));
    }

    #[test]
    fn malformed_for_header_skips_body() {
        let program = parse_program("chal (i=0; i<5) { likh i }\nlikh 9");
        assert!(matches!(program[0],
                         Statement::Invalid(SyntaxError::MalformedForHeader { parts: 2, .. })));
        assert_eq!(kinds(&program), ["invalid", "print"]);
    }

    #[test]
    fn for_accepts_declarations_and_steps() {
        let program = parse_program("chal (no i = 0; i < 3; i++) { }");
        let Statement::For { init, update, .. } = &program[0] else {
            panic!("expected a for loop");
        };
        assert!(matches!(init.as_deref(), Some(Statement::VarDecl { .. })));
        assert!(matches!(update.as_deref(),
                         Some(Statement::Assignment { value: Clause { parsed: Ok(_), .. }, .. })));
    }

    #[test]
    fn for_rejects_control_statements_in_header() {
        let program = parse_program("chal (tod; sahi; ) { likh 1 }");
        assert!(matches!(program[0], Statement::Invalid(SyntaxError::UnexpectedToken { .. })));
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn unterminated_block_ends_the_sequence() {
        let program = parse_program("likh 1\nagar (x) {\nlikh 2\nlikh 3");
        assert_eq!(kinds(&program), ["print", "invalid"]);
        assert!(matches!(program[1], Statement::Invalid(SyntaxError::UnterminatedBlock { line: 2, .. })));
    }

    #[test]
    fn stray_closing_brace_is_reported() {
        let program = parse_program("likh 1 }\nlikh 2");
        assert_eq!(kinds(&program), ["print", "invalid", "print"]);
    }

    #[test]
    fn trailing_garbage_fails_the_expression() {
        let program = parse_program("no x = 1 2\nlikh x");
        let Statement::VarDecl { initializer: Some(clause), .. } = &program[0] else {
            panic!("expected a declaration");
        };
        assert_eq!(clause.text, "1 2");
        assert!(clause.parsed.is_err());
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn clause_text_keeps_original_spelling() {
        let program = parse_program("agar (x aur nahin y) { }");
        let Statement::If { condition, .. } = &program[0] else {
            panic!("expected an if");
        };
        assert_eq!(condition.text, "x aur nahin y");
        assert!(condition.parsed.is_ok());
    }
}
