use thiserror::Error;

/// Parsing never fails on syntax. Every variant is a resource ceiling from
/// [`crate::Limits`] being hit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("input is {len} bytes, limit is {limit}")]
    InputTooLarge { len: usize, limit: usize },

    #[error("line {line} is {len} characters long, limit is {limit}")]
    LineTooLong { line: usize, len: usize, limit: usize },

    #[error("inline nesting at line {line}, column {column} exceeds {limit} levels")]
    NestingTooDeep {
        line: usize,
        column: usize,
        limit: usize,
    },

    #[error("inline scan of line {line} exceeded {limit} steps")]
    StepBudgetExceeded { line: usize, limit: usize },
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid parse options: {0}")]
    Json(#[from] serde_json::Error),
}
