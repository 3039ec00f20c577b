//! UI-independent state for the chat composer: pending attachments and their
//! previews, plus the small pieces of window chrome around them.

pub mod chrome;
pub mod classify;
pub mod composer;
pub mod config;
pub mod error;
pub mod format;
pub mod manager;
pub mod source;
pub mod thumbnail;

pub use classify::classify;
pub use error::{PreferenceError, ThumbnailError};
pub use format::format_size;
pub use manager::{AttachmentPreviewManager, PendingAttachment, Submission};
pub use source::{AttachmentSource, MemorySource, PathSource};
pub use thumbnail::{load_thumbnail, Thumbnail, ThumbnailOutcome, ThumbnailRequest};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
