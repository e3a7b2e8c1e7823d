use common::error::diagnostics::DiagnosticMessage;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("entry already exists: {context}")]
    Duplicate { context: DiagnosticMessage },
    #[error("lookup failed: {context}")]
    NotFound { context: DiagnosticMessage },
    #[error("serde json error: {context}")]
    SerdeJson {
        context: DiagnosticMessage,
        #[source]
        source: serde_json::Error,
    },
    #[error("I/O error: {context}")]
    Io {
        context: DiagnosticMessage,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    #[track_caller]
    pub fn duplicate(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::Duplicate {
            context: DiagnosticMessage::new(format!("'{name}' already exists")),
        }
    }

    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            context: DiagnosticMessage::new(message.into()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        StoreError::SerdeJson {
            context: DiagnosticMessage::new(err.to_string()),
            source: err,
        }
    }
}

impl From<io::Error> for StoreError {
    #[track_caller]
    fn from(err: io::Error) -> Self {
        StoreError::Io {
            context: DiagnosticMessage::new(err.to_string()),
            source: err,
        }
    }
}
