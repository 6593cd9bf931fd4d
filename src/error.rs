use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntakeError>;

/// Failures of the surrounding adapters, never of the pipeline itself.
///
/// Domain-rule violations are recovered into `failed` verdicts inside the
/// engine; only unexpected conditions (payload shape, file I/O) travel as
/// errors.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}
