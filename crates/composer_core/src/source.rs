//! Handles to the bytes behind a pending attachment.

use std::{
    fmt, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;

/// Opaque handle to a selected file. The preview manager reads its metadata
/// once at insertion; bytes are only read for thumbnails or upload.
#[async_trait]
pub trait AttachmentSource: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;
    fn mime_type(&self) -> Option<&str>;
    fn size_bytes(&self) -> u64;
    async fn read_bytes(&self) -> io::Result<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct PathSource {
    path: PathBuf,
    name: String,
    mime_type: Option<String>,
    size_bytes: u64,
}

impl PathSource {
    /// Reads file metadata up front so the preview can show a size without
    /// touching the contents.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let size_bytes = std::fs::metadata(&path)?.len();
        Ok(Self::with_size(path, size_bytes))
    }

    pub fn with_size(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = mime_guess::from_path(&path).first_raw().map(str::to_string);
        Self {
            path,
            name,
            mime_type,
            size_bytes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AttachmentSource for PathSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    async fn read_bytes(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

/// Bytes already held in memory, e.g. an image pasted from the clipboard.
#[derive(Clone)]
pub struct MemorySource {
    name: String,
    mime_type: Option<String>,
    bytes: Arc<[u8]>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, mime_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.filter(|mime| !mime.trim().is_empty()),
            bytes: bytes.into(),
        }
    }
}

impl fmt::Debug for MemorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySource")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[async_trait]
impl AttachmentSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    async fn read_bytes(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_source_guesses_mime_and_name_from_path() {
        let source = PathSource::with_size("/tmp/uploads/photo.JPG", 42);
        assert_eq!(source.name(), "photo.JPG");
        assert_eq!(source.mime_type(), Some("image/jpeg"));
        assert_eq!(source.size_bytes(), 42);
    }

    #[test]
    fn path_source_without_known_extension_has_no_mime() {
        let source = PathSource::with_size("notes.zzqq", 0);
        assert_eq!(source.mime_type(), None);
    }

    #[tokio::test]
    async fn path_source_reads_file_contents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").expect("write fixture");

        let source = PathSource::open(&path).expect("open");
        assert_eq!(source.size_bytes(), 5);
        assert_eq!(source.read_bytes().await.expect("read"), b"hello");
    }

    #[tokio::test]
    async fn path_source_read_fails_once_file_is_gone() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gone.png");
        std::fs::write(&path, b"x").expect("write fixture");
        let source = PathSource::open(&path).expect("open");
        std::fs::remove_file(&path).expect("remove");

        assert!(source.read_bytes().await.is_err());
    }

    #[test]
    fn memory_source_treats_blank_mime_as_unknown() {
        let source = MemorySource::new("paste.png", Some("  ".to_string()), vec![1, 2, 3]);
        assert_eq!(source.mime_type(), None);
        assert_eq!(source.size_bytes(), 3);
    }
}
