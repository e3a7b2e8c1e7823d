use common::error::diagnostics::DiagnosticMessage;
use common::error::ConfigError;
use engine::EngineError;
use store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid argument: {context}")]
    InvalidArgument { context: DiagnosticMessage },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl CliError {
    #[track_caller]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            context: DiagnosticMessage::new(message.into()),
        }
    }
}
