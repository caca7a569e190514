use thiserror::Error;

/// Structural parse failure reported by the syntax provider.
///
/// Positions are 1-based. A failure is terminal for the file's structural
/// analysis; the engine folds it into a `syntax_error` finding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("{line}:{column}: {message}")]
    Invalid {
        line: u32,
        column: u32,
        message: String,
    },

    #[error("Go grammar could not be loaded: {0}")]
    Language(String),

    #[error("parser produced no tree")]
    NoTree,
}

impl SyntaxError {
    /// Line of the offending node, or 0 when the failure has no location.
    pub fn line(&self) -> u32 {
        match self {
            SyntaxError::Invalid { line, .. } => *line,
            SyntaxError::Language(_) | SyntaxError::NoTree => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity `{0}` (expected low, medium, high or critical)")]
pub struct ParseSeverityError(pub String);
