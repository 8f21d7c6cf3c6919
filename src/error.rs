use thiserror::Error;

/// Why a breakdown could not be computed.
///
/// A non-positive total sale is not an error; it scores 0 for that outlet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// Readings are missing, non-finite or the wrong length for the variant.
    #[error("invalid metrics: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The variant itself is unusable (bad ladder, no outlets).
    #[error("malformed variant config: {}", .0.join("; "))]
    MalformedVariant(Vec<String>),
}

impl ScoringError {
    pub fn messages(&self) -> &[String] {
        match self {
            ScoringError::Validation(errors) | ScoringError::MalformedVariant(errors) => errors,
        }
    }
}
