use store::StoreError;
use thiserror::Error;
use validator::ValidationError;

/// Hard failures of the command pipeline. Interpretation misses (an
/// unrecognized utterance, no extractable data, no delete target) are not
/// errors; they come back inside the `CommandOutcome`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("storage failed: {0}")]
    Store(#[from] StoreError),
}
