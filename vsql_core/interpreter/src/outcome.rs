use common::types::FieldMap;
use serde::Serialize;
use uuid::Uuid;

/// What the interpreter decided an utterance was asking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Insert,
    Delete,
    Unrecognized,
}

/// Transient result of interpreting one utterance. Never persisted.
///
/// A malformed utterance is not an error; every branch of interpretation
/// terminates in one of these with a descriptive `message`.
#[derive(Clone, Debug, Serialize)]
pub struct CommandOutcome {
    pub operation: Operation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_data: Option<FieldMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_value: Option<String>,
    /// For deletes: the single row designated for removal, if any. Matching
    /// is substring-based and only the first match is designated.
    pub matched_row_ids: Vec<Uuid>,
    pub message: String,
}

impl CommandOutcome {
    pub fn unrecognized(message: impl Into<String>) -> Self {
        Self {
            operation: Operation::Unrecognized,
            extracted_data: None,
            target_field: None,
            target_value: None,
            matched_row_ids: Vec::new(),
            message: message.into(),
        }
    }

    pub fn insert(data: FieldMap, message: impl Into<String>) -> Self {
        Self {
            operation: Operation::Insert,
            extracted_data: Some(data),
            target_field: None,
            target_value: None,
            matched_row_ids: Vec::new(),
            message: message.into(),
        }
    }

    pub fn insert_miss(message: impl Into<String>) -> Self {
        Self {
            operation: Operation::Insert,
            extracted_data: None,
            target_field: None,
            target_value: None,
            matched_row_ids: Vec::new(),
            message: message.into(),
        }
    }

    pub fn delete(
        field: String,
        value: String,
        matched_row_ids: Vec<Uuid>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation: Operation::Delete,
            extracted_data: None,
            target_field: Some(field),
            target_value: Some(value),
            matched_row_ids,
            message: message.into(),
        }
    }

    pub fn delete_miss(message: impl Into<String>) -> Self {
        Self {
            operation: Operation::Delete,
            extracted_data: None,
            target_field: None,
            target_value: None,
            matched_row_ids: Vec::new(),
            message: message.into(),
        }
    }
}
