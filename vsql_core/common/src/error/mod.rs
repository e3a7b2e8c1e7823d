pub mod diagnostics;

pub use crate::config::error::ConfigError;
pub use diagnostics::DiagnosticMessage;
