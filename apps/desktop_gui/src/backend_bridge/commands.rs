//! Commands queued from the UI thread to the preview worker.

use composer_core::ThumbnailRequest;

pub enum BackendCommand {
    LoadThumbnail { request: ThumbnailRequest },
    ReadClipboardImage,
}
