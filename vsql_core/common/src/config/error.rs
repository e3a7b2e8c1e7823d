use crate::error::diagnostics::DiagnosticMessage;
use std::error::Error as StdError;
use thiserror::Error;

/// Failures while reading `voicesql.yml`. A missing file is not one of these;
/// the loader falls back to defaults instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parse error: {context}")]
    ParseError {
        context: DiagnosticMessage,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
    #[error("filesystem error: {context}")]
    PathError {
        context: DiagnosticMessage,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl From<std::io::Error> for ConfigError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        ConfigError::PathError {
            context: DiagnosticMessage::new(err.to_string()),
            source: Box::new(err),
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    #[track_caller]
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            context: DiagnosticMessage::new(err.to_string()),
            source: Box::new(err),
        }
    }
}
