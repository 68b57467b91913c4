use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("row {row} uses column {column:?} which is not declared in the headers")]
    UndeclaredColumn { row: usize, column: String },
    #[error("header {0:?} is declared more than once")]
    DuplicateHeader(String),
    #[error("unknown entity kind: {0:?}")]
    UnknownEntity(String),
    #[error("unknown rule code: {0:?}")]
    UnknownRule(String),
}

/// A cell value that could not be coerced to the type its column requires.
///
/// Rules turn these into issues; they are never propagated as failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceError {
    #[error("{raw:?} is not a number")]
    NotANumber { raw: String },
    #[error("{raw:?} is not an array of numbers")]
    NotANumberArray { raw: String },
    #[error("{raw:?} is not valid JSON: {message}")]
    InvalidJson { raw: String, message: String },
}

impl CoerceError {
    /// The raw cell text that failed to coerce.
    pub fn raw(&self) -> &str {
        match self {
            Self::NotANumber { raw } => raw,
            Self::NotANumberArray { raw } => raw,
            Self::InvalidJson { raw, .. } => raw,
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
