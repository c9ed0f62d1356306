use thiserror::Error;

/// Rejected dependency input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed dependency line: `{0}` (expected `left -> right`)")]
    MalformedLine(String),
    #[error("dependency references unknown attribute `{0}`")]
    UnknownAttribute(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("schema too wide for {0} columns")]
    TooWide(usize),
    #[error("failed to read CSV header: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode analysis as JSON: {0}")]
    Json(#[from] serde_json::Error),
}
