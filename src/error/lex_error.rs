use thiserror::Error;

/// Represents all errors that can occur during tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character matched none of the token rules.
    #[error("Error on line {line}, column {column}: Unknown character '{character}'.")]
    UnknownCharacter {
        /// The offending character.
        character: String,
        /// The source line where the character appears.
        line:      usize,
        /// The source column where the character appears.
        column:    usize,
    },
}

impl LexError {
    /// Line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnknownCharacter { line, .. } => *line,
        }
    }
}
