use common::error::diagnostics::DiagnosticMessage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more required columns had no resolvable value. Carries every
    /// missing name, not just the first one found.
    #[error("required fields missing: {}", fields.join(", "))]
    MissingRequiredFields { fields: Vec<String> },
    #[error("type mismatch: {context}")]
    TypeMismatch { context: DiagnosticMessage },
}

impl ValidationError {
    #[track_caller]
    pub fn missing_required(fields: Vec<String>) -> Self {
        Self::MissingRequiredFields { fields }
    }

    #[track_caller]
    pub fn type_mismatch(column: &str, expected: &str, value: impl Into<String>) -> Self {
        Self::TypeMismatch {
            context: DiagnosticMessage::new(format!(
                "Column '{}' expected {} but got '{}'",
                column,
                expected,
                value.into()
            )),
        }
    }
}
