use thiserror::Error;

/// Contract violations at the request boundary and in finding construction.
///
/// Everything else in the pipeline degrades to "field absent" instead of
/// failing.
#[derive(Debug, Error, PartialEq)]
pub enum InsightError {
    #[error("insight payload must include at least one row")]
    InvalidPayload,
    #[error("finding confidence {0} is outside the range 0.0..=1.0")]
    InvalidFinding(f64),
}
