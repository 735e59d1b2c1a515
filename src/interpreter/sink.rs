use crate::error::Diagnostic;

/// Receives everything a program run emits.
///
/// The interpreter writes one `print` per executed `likh` and one `report`
/// per recoverable error. Formatting and destination are up to the
/// implementation.
pub trait Sink {
    /// Emits the text form of a printed value.
    fn print(&mut self, text: &str);

    /// Emits a recoverable error. Execution continues afterwards.
    fn report(&mut self, diagnostic: &Diagnostic);
}

/// One emitted line.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// Output of a `likh` statement.
    Output(String),
    /// A reported error.
    Diagnostic(Diagnostic),
}

/// A [`Sink`] that records every line in order.
///
/// # Example
/// ```
/// use hinglish::interpreter::sink::{Sink, Transcript};
///
/// let mut transcript = Transcript::default();
/// transcript.print("a");
/// transcript.print("b");
///
/// assert_eq!(transcript.output(), ["a", "b"]);
/// assert!(transcript.diagnostics().is_empty());
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Transcript {
    lines: Vec<Line>,
}

impl Transcript {
    /// Every line, in emission order.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Only the printed output.
    #[must_use]
    pub fn output(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|line| match line {
                Line::Output(text) => Some(text.as_str()),
                Line::Diagnostic(_) => None,
            })
            .collect()
    }

    /// Only the reported errors.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<&Diagnostic> {
        self.lines
            .iter()
            .filter_map(|line| match line {
                Line::Diagnostic(diagnostic) => Some(diagnostic),
                Line::Output(_) => None,
            })
            .collect()
    }
}

impl Sink for Transcript {
    fn print(&mut self, text: &str) {
        self.lines.push(Line::Output(text.to_string()));
    }

    fn report(&mut self, diagnostic: &Diagnostic) {
        self.lines.push(Line::Diagnostic(diagnostic.clone()));
    }
}
