use thiserror::Error;

#[derive(Debug, Error)]
pub enum VectorDbError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Vector ID '{0}' already exists")]
    DuplicateKey(String),

    #[error("Vector ID '{0}' not found")]
    NotFound(String),

    #[error("Cannot calculate cosine similarity with zero vector")]
    ZeroVector,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl VectorDbError {
    pub fn dimension(expected: usize, actual: usize) -> Self {
        VectorDbError::DimensionMismatch { expected, actual }
    }
}
