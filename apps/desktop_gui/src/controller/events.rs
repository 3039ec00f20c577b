//! Worker-to-UI events and error modeling for the desktop shell.

use composer_core::ThumbnailOutcome;

pub enum UiEvent {
    Error(UiError),
    ThumbnailFinished(ThumbnailOutcome),
    ClipboardImage { name: String, png: Vec<u8> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Io,
    Decode,
    Clipboard,
    Preferences,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    FileSelection,
    Clipboard,
    Preferences,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("clipboard") {
            UiErrorCategory::Clipboard
        } else if message_lower.contains("preference") || message_lower.contains("settings") {
            UiErrorCategory::Preferences
        } else if message_lower.contains("decode")
            || message_lower.contains("unsupported")
            || message_lower.contains("rgba")
            || message_lower.contains("format")
        {
            UiErrorCategory::Decode
        } else if message_lower.contains("no such file")
            || message_lower.contains("permission denied")
            || message_lower.contains("not found")
            || message_lower.contains("failed to read")
            || message_lower.contains("failed to write")
        {
            UiErrorCategory::Io
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_io_failures() {
        let err = UiError::from_message(
            UiErrorContext::FileSelection,
            "notes.txt: No such file or directory (os error 2)",
        );
        assert_eq!(err.category(), UiErrorCategory::Io);
        assert_eq!(err.context(), UiErrorContext::FileSelection);
    }

    #[test]
    fn clipboard_wins_over_decode() {
        let err = UiError::from_message(
            UiErrorContext::Clipboard,
            "clipboard image could not be decoded",
        );
        assert_eq!(err.category(), UiErrorCategory::Clipboard);
    }

    #[test]
    fn preference_write_failures() {
        let err = UiError::from_message(
            UiErrorContext::Preferences,
            "failed to write preference file '/x/settings.json': read-only file system",
        );
        assert_eq!(err.category(), UiErrorCategory::Preferences);
    }

    #[test]
    fn unknown_messages_stay_unknown() {
        let err = UiError::from_message(UiErrorContext::General, "something odd");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.message(), "something odd");
    }
}
