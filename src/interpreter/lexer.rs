use std::{fmt, ops::Range};

use logos::Logos;

use crate::error::LexError;

/// The kind of a lexical token.
///
/// Keywords are matched case-insensitively against the raw identifier text, so
/// `Agar`, `AGAR` and `agar` all produce [`TokenKind::If`]. Identifiers may use
/// ASCII letters, digits, underscores and the Devanagari block.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[logos(extras = LexerExtras)]
pub enum TokenKind {
    /// `no`
    #[token("no", ignore(case))]
    TypeInt,
    /// `binduno`
    #[token("binduno", ignore(case))]
    TypeFloat,
    /// `sach`
    #[token("sach", ignore(case))]
    TypeBool,
    /// `shabd`
    #[token("shabd", ignore(case))]
    TypeString,
    /// `chal`
    #[token("chal", ignore(case))]
    For,
    /// `jabtk`
    #[token("jabtk", ignore(case))]
    While,
    /// `agar`
    #[token("agar", ignore(case))]
    If,
    /// `warna`
    #[token("warna", ignore(case))]
    Else,
    /// `lautao`
    #[token("lautao", ignore(case))]
    Return,
    /// `tod`
    #[token("tod", ignore(case))]
    Break,
    /// `aage`
    #[token("aage", ignore(case))]
    Continue,
    /// `sahi`
    #[token("sahi", ignore(case))]
    True,
    /// `jhooth`
    #[token("jhooth", ignore(case))]
    False,
    /// `se`, the lower end of a range phrase.
    #[token("se", ignore(case))]
    From,
    /// `tak` or `tk`, the upper end of a range phrase.
    #[token("tak", ignore(case))]
    #[token("tk", ignore(case))]
    To,
    /// `aur`
    #[token("aur", ignore(case))]
    And,
    /// `ya`
    #[token("ya", ignore(case))]
    Or,
    /// `nahin`
    #[token("nahin", ignore(case))]
    Not,
    /// `likh`
    #[token("likh", ignore(case))]
    Print,

    /// Floating literals such as `3.14`. Matched before integers so the
    /// fractional part never becomes a separate token.
    #[regex(r"[0-9]+\.[0-9]+")]
    FloatLiteral,
    /// Integer literals such as `42`.
    #[regex(r"[0-9]+")]
    IntLiteral,
    /// Double-quoted strings with backslash escapes. May span lines.
    #[regex(r#""([^"\\]|\\.)*""#, track_newlines, allow_greedy = true)]
    StringLiteral,
    /// Single-character literals such as `'a'` or `'\n'`.
    #[regex(r"'([^'\\]|\\.)'")]
    CharLiteral,
    /// Identifiers: variable and builtin names.
    #[regex("[A-Za-z_\u{0900}-\u{097F}][A-Za-z0-9_\u{0900}-\u{097F}]*")]
    Identifier,

    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `--`
    #[token("--")]
    MinusMinus,
    /// `&&`
    #[token("&&")]
    AmpAmp,
    /// `||`
    #[token("||")]
    PipePipe,
    /// `->`
    #[token("->")]
    Arrow,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `=`
    #[token("=")]
    Equals,
    /// `!`
    #[token("!")]
    Bang,
    /// `~`
    #[token("~")]
    Tilde,
    /// `^`
    #[token("^")]
    Caret,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,

    /// Any character no other rule accepts. Never fatal to tokenization.
    #[regex(r".", priority = 0)]
    Unknown,

    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `/* Block comments */`, possibly spanning lines.
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", |lex| {
        track_newlines(lex);
        logos::Skip
    }, allow_greedy = true)]
    BlockComment,
    /// Newlines advance the line counter and are elided.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and carriage returns.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl TokenKind {
    /// Returns `true` for the typed declaration keywords.
    #[must_use]
    pub const fn is_type_keyword(self) -> bool {
        matches!(self, Self::TypeInt | Self::TypeFloat | Self::TypeBool | Self::TypeString)
    }

    /// Returns `true` for tokens that can name a variable or builtin.
    ///
    /// The range words `se`, `tak` and `tk` are keywords only for display and
    /// remain usable as names.
    #[must_use]
    pub const fn is_name(self) -> bool {
        matches!(self, Self::Identifier | Self::From | Self::To)
    }

    /// Returns `true` for keywords that introduce a statement.
    ///
    /// The expression parser stops in front of these, which is what lets
    /// several statements share one line.
    #[must_use]
    pub const fn starts_statement(self) -> bool {
        matches!(self,
                 Self::TypeInt
                 | Self::TypeFloat
                 | Self::TypeBool
                 | Self::TypeString
                 | Self::For
                 | Self::While
                 | Self::If
                 | Self::Else
                 | Self::Return
                 | Self::Break
                 | Self::Continue
                 | Self::Print)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TypeInt => "TYPE_INT",
            Self::TypeFloat => "TYPE_FLOAT",
            Self::TypeBool => "TYPE_BOOL",
            Self::TypeString => "TYPE_STRING",
            Self::For => "KW_FOR",
            Self::While => "KW_WHILE",
            Self::If => "KW_IF",
            Self::Else => "KW_ELSE",
            Self::Return => "KW_RETURN",
            Self::Break => "KW_BREAK",
            Self::Continue => "KW_CONTINUE",
            Self::True => "BOOL_TRUE",
            Self::False => "BOOL_FALSE",
            Self::From => "KW_FROM",
            Self::To => "KW_TO",
            Self::And => "OP_AND",
            Self::Or => "OP_OR",
            Self::Not => "OP_NOT",
            Self::Print => "KW_PRINT",
            Self::FloatLiteral => "FLOAT_LITERAL",
            Self::IntLiteral => "INT_LITERAL",
            Self::StringLiteral => "STRING_LITERAL",
            Self::CharLiteral => "CHAR_LITERAL",
            Self::Identifier => "IDENTIFIER",
            Self::Semicolon => "SEMI",
            Self::Comma => "COMMA",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::LBrace => "LBRACE",
            Self::RBrace => "RBRACE",
            Self::Equals => "ASSIGN",
            Self::Unknown => "UNKNOWN",
            Self::Comment | Self::BlockComment | Self::NewLine | Self::Ignored => "SKIP",
            _ => "OP",
        };
        f.write_str(name)
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number; columns are tracked by [`Tokens`].
#[derive(Debug, Clone, Copy)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// Advances the line counter over newlines embedded in a multi-line token.
fn track_newlines(lex: &mut logos::Lexer<TokenKind>) {
    lex.extras.line += lex.slice().matches('\n').count();
}

/// A single token with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What the token is.
    pub kind:   TokenKind,
    /// The exact source text of the token.
    pub lexeme: String,
    /// 1-based line of the first character.
    pub line:   usize,
    /// 1-based column of the first character.
    pub column: usize,
    /// Byte range in the source.
    pub span:   Range<usize>,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}\t{}\t{}", self.line, self.column, self.kind, self.lexeme)
    }
}

/// The token stream produced by [`tokenize`].
///
/// Tokens are produced lazily and the stream cannot be restarted; collect it
/// if it needs to be walked more than once.
pub struct Tokens<'src> {
    lexer:  logos::Lexer<'src, TokenKind>,
    /// Byte offset the column below refers to, the end of the last token.
    offset: usize,
    /// 1-based column of `offset`.
    column: usize,
}

/// Returns the 1-based column reached after `text`, starting from `column`.
fn advance_column(column: usize, text: &str) -> usize {
    match text.rfind('\n') {
        Some(index) => text[index + 1..].chars().count() + 1,
        None => column + text.chars().count(),
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let result = self.lexer.next()?;
        let span = self.lexer.span();
        let lexeme = self.lexer.slice().to_string();

        // The counter has already moved past newlines inside the token.
        let line = self.lexer.extras.line - lexeme.matches('\n').count();
        // Only the skipped gap since the last token is scanned, so columns
        // cost linear time over the whole source.
        let column = advance_column(self.column, &self.lexer.source()[self.offset..span.start]);
        self.offset = span.end;
        self.column = advance_column(column, &lexeme);

        Some(Token { kind: result.unwrap_or(TokenKind::Unknown),
                     lexeme,
                     line,
                     column,
                     span })
    }
}

/// Converts source text into a stream of tokens.
///
/// Whitespace, newlines and comments are elided. Characters that match no
/// rule produce [`TokenKind::Unknown`] tokens instead of aborting, leaving it
/// to the caller to decide whether that is fatal.
///
/// # Example
/// ```
/// use hinglish::interpreter::lexer::{TokenKind, tokenize};
///
/// let kinds: Vec<_> = tokenize("AGAR (x >= 1.5)").map(|t| t.kind).collect();
/// assert_eq!(kinds,
///            [TokenKind::If,
///             TokenKind::LParen,
///             TokenKind::Identifier,
///             TokenKind::GreaterEqual,
///             TokenKind::FloatLiteral,
///             TokenKind::RParen]);
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Tokens<'_> {
    Tokens { lexer:  TokenKind::lexer_with_extras(source, LexerExtras::default()),
             offset: 0,
             column: 1, }
}

/// Collects a [`LexError`] for every unknown token in the stream.
#[must_use]
pub fn lex_errors(tokens: &[Token]) -> Vec<LexError> {
    tokens.iter()
          .filter(|token| token.kind == TokenKind::Unknown)
          .map(|token| LexError::UnknownCharacter { character: token.lexeme.clone(),
                                                    line:      token.line,
                                                    column:    token.column, })
          .collect()
}

/// Decodes the body of a string or character literal, resolving backslash
/// escapes. The surrounding quotes must already be stripped.
#[must_use]
pub fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(kinds("agar Agar AGAR warna"),
                   [TokenKind::If, TokenKind::If, TokenKind::If, TokenKind::Else]);
        assert_eq!(kinds("Likh SAHI jhooth"),
                   [TokenKind::Print, TokenKind::True, TokenKind::False]);
    }

    #[test]
    fn keyword_prefixes_stay_identifiers() {
        assert_eq!(kinds("agarwal notes todo"),
                   [TokenKind::Identifier, TokenKind::Identifier, TokenKind::Identifier]);
    }

    #[test]
    fn devanagari_identifiers() {
        let tokens: Vec<_> = tokenize("no संख्या = 5").collect();
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "संख्या");
        assert_eq!(tokens[2].column, 11);
    }

    #[test]
    fn float_is_one_token() {
        let tokens: Vec<_> = tokenize("3.25 7").collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::FloatLiteral);
        assert_eq!(tokens[0].lexeme, "3.25");
        assert_eq!(tokens[1].kind, TokenKind::IntLiteral);
    }

    #[test]
    fn operators_take_longest_match() {
        assert_eq!(kinds("== = != ! <= < ++ + -> - && ||"),
                   [TokenKind::EqualEqual,
                    TokenKind::Equals,
                    TokenKind::BangEqual,
                    TokenKind::Bang,
                    TokenKind::LessEqual,
                    TokenKind::Less,
                    TokenKind::PlusPlus,
                    TokenKind::Plus,
                    TokenKind::Arrow,
                    TokenKind::Minus,
                    TokenKind::AmpAmp,
                    TokenKind::PipePipe]);
    }

    #[test]
    fn comments_are_skipped_and_lines_counted() {
        let tokens: Vec<_> = tokenize("a // one\n/* two\nthree */ b\n  c").collect();
        let positions: Vec<_> = tokens.iter()
                                      .map(|t| (t.lexeme.as_str(), t.line, t.column))
                                      .collect();
        assert_eq!(positions, [("a", 1, 1), ("b", 3, 10), ("c", 4, 3)]);
    }

    #[test]
    fn strings_keep_keywords_inside() {
        let tokens: Vec<_> = tokenize(r#"likh "agar \"aur\" {""#).collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].kind, TokenKind::StringLiteral);
        assert_eq!(unescape(&tokens[1].lexeme[1..tokens[1].lexeme.len() - 1]),
                   r#"agar "aur" {"#);
    }

    #[test]
    fn multi_line_string_keeps_its_start_position() {
        let tokens: Vec<_> = tokenize("x = \"a\nb\" y").collect();
        assert_eq!((tokens[2].line, tokens[2].column), (1, 5));
        assert_eq!((tokens[3].line, tokens[3].column), (2, 4));
    }

    #[test]
    fn char_literal() {
        assert_eq!(kinds("'a' '\\n'"), [TokenKind::CharLiteral, TokenKind::CharLiteral]);
    }

    #[test]
    fn unknown_characters_do_not_stop_tokenization() {
        let tokens: Vec<_> = tokenize("a @ b $").collect();
        assert_eq!(tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
                   [TokenKind::Identifier,
                    TokenKind::Unknown,
                    TokenKind::Identifier,
                    TokenKind::Unknown]);

        let errors = lex_errors(&tokens);
        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0],
                         LexError::UnknownCharacter { character, line: 1, column: 3 }
                         if character == "@"));
    }

    #[test]
    fn columns_on_one_long_line() {
        let source = "x + ".repeat(2000) + "अ";
        let tokens: Vec<_> = tokenize(&source).collect();
        assert_eq!(tokens.len(), 4001);
        assert_eq!(tokens[2].column, 5);
        assert_eq!(tokens[3999].column, 7999);
        assert_eq!(tokens[4000].column, 8001);
    }

    #[test]
    fn range_helpers() {
        assert_eq!(kinds("se tak tk"), [TokenKind::From, TokenKind::To, TokenKind::To]);
    }
}
