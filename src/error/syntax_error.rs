use thiserror::Error;

/// Represents all structural errors in compound statements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// No opening brace follows a header, or its closing brace is missing.
    #[error("Error on line {line}: Unterminated block after '{header}'.")]
    UnterminatedBlock {
        /// Text of the header that owns the block.
        header: String,
        /// The source line of the header.
        line:   usize,
    },
    /// A `chal` header does not have exactly three `;`-separated parts.
    #[error("Error on line {line}: Malformed for-loop header '{header}': expected 3 parts \
             (init; condition; update), found {parts}.")]
    MalformedForHeader {
        /// Text between the header parentheses.
        header: String,
        /// How many parts the header was split into.
        parts:  usize,
        /// The source line of the header.
        line:   usize,
    },
    /// A token that cannot begin or continue a statement.
    #[error("Error on line {line}: Unexpected token '{token}'.")]
    UnexpectedToken {
        /// The offending token text.
        token: String,
        /// The source line where it appears.
        line:  usize,
    },
    /// A block nested deeper than the parser allows.
    #[error("Error on line {line}: Blocks nested more than {limit} levels deep.")]
    NestedTooDeeply {
        /// The nesting limit.
        limit: usize,
        /// The source line where the rejected body starts.
        line:  usize,
    },
}

impl SyntaxError {
    /// Line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnterminatedBlock { line, .. }
            | Self::MalformedForHeader { line, .. }
            | Self::UnexpectedToken { line, .. }
            | Self::NestedTooDeeply { line, .. } => *line,
        }
    }

    /// Whether execution of the enclosing sequence must stop here.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::UnterminatedBlock { .. })
    }
}
