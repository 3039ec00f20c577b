//! Extension/MIME sniffing used to pick a preview icon.

use shared::domain::AttachmentCategory;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg", "bmp"];
const DOCUMENT_EXTENSIONS: &[&str] = &["doc", "docx", "txt", "rtf", "odt"];
const SPREADSHEET_EXTENSIONS: &[&str] = &["xls", "xlsx", "csv"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a"];
const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "rar", "7z", "tar", "gz"];
const CODE_EXTENSIONS: &[&str] = &[
    "js", "html", "css", "json", "xml", "py", "java", "cpp", "c", "php",
];

/// Lower-cased text after the last `.`. A name without a dot is its own
/// extension, so a file called `zip` is an archive.
pub fn extension_of(name: &str) -> String {
    name.rsplit('.').next().unwrap_or_default().to_ascii_lowercase()
}

/// First matching rule wins. Extension membership and the MIME prefix are
/// evaluated together for image, video and audio.
pub fn classify(name: &str, mime_type: Option<&str>) -> AttachmentCategory {
    let ext = extension_of(name);
    let ext = ext.as_str();
    let mime = mime_type.unwrap_or_default().to_ascii_lowercase();

    if IMAGE_EXTENSIONS.contains(&ext) || mime.starts_with("image/") {
        AttachmentCategory::Image
    } else if ext == "pdf" || mime == "application/pdf" {
        AttachmentCategory::Pdf
    } else if DOCUMENT_EXTENSIONS.contains(&ext) {
        AttachmentCategory::Document
    } else if SPREADSHEET_EXTENSIONS.contains(&ext) {
        AttachmentCategory::Spreadsheet
    } else if VIDEO_EXTENSIONS.contains(&ext) || mime.starts_with("video/") {
        AttachmentCategory::Video
    } else if AUDIO_EXTENSIONS.contains(&ext) || mime.starts_with("audio/") {
        AttachmentCategory::Audio
    } else if ARCHIVE_EXTENSIONS.contains(&ext) {
        AttachmentCategory::Archive
    } else if CODE_EXTENSIONS.contains(&ext) {
        AttachmentCategory::Code
    } else {
        AttachmentCategory::Other
    }
}
