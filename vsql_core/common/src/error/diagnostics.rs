use std::{borrow::Cow, fmt, panic::Location};

/// Error context that remembers where it was built.
///
/// Every error variant in the workspace that carries free-form text carries
/// one of these instead of a bare `String`, so a rendered failure points at
/// the construction site without anyone threading file/line by hand.
#[derive(Clone, Debug)]
pub struct DiagnosticMessage {
    message: Cow<'static, str>,
    location: &'static Location<'static>,
}

impl DiagnosticMessage {
    /// Build a message, recording the caller's file and line.
    #[track_caller]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            location: Location::caller(),
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Where the message was constructed, not where the failure surfaced.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (at {}:{})",
            self.message,
            self.location.file(),
            self.location.line()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn build(message: &'static str) -> DiagnosticMessage {
        DiagnosticMessage::new(message)
    }

    #[test]
    fn records_the_outermost_tracked_caller() {
        let diagnostic = build("row rejected");
        assert_eq!(diagnostic.message(), "row rejected");
        // #[track_caller] propagates through the helper to this test
        assert!(diagnostic.location().file().ends_with("diagnostics.rs"));
    }

    #[test]
    fn display_includes_message_and_location() {
        let diagnostic = DiagnosticMessage::new(format!("table '{}' missing", "people"));
        let rendered = diagnostic.to_string();
        assert!(rendered.starts_with("table 'people' missing (at "));
        assert!(rendered.contains("diagnostics.rs"));
    }
}
