//! Off-thread decode of image attachments into small RGBA previews.

use std::{fmt, sync::Arc};

use image::GenericImageView;
use shared::domain::AttachmentId;

use crate::{error::ThumbnailError, source::AttachmentSource};

pub const DEFAULT_THUMBNAIL_MAX_DIMENSION: u32 = 240;

#[derive(Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thumbnail")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rgba_len", &self.rgba.len())
            .finish()
    }
}

/// Work item handed out by the preview manager for one image attachment.
#[derive(Debug, Clone)]
pub struct ThumbnailRequest {
    pub id: AttachmentId,
    pub handle: Arc<dyn AttachmentSource>,
}

#[derive(Debug)]
pub struct ThumbnailOutcome {
    pub id: AttachmentId,
    pub result: Result<Thumbnail, ThumbnailError>,
}

/// Decodes `bytes` and shrinks the image so its longest edge is at most
/// `max_dimension`. Smaller images keep their size.
pub fn decode_thumbnail(bytes: &[u8], max_dimension: u32) -> Result<Thumbnail, String> {
    let decoded = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let (orig_w, orig_h) = decoded.dimensions();
    if orig_w == 0 || orig_h == 0 {
        return Err("image has no pixels".to_string());
    }

    let max_dimension = max_dimension.max(1) as f32;
    let scale = (max_dimension / (orig_w.max(orig_h) as f32)).min(1.0);
    let resized = if scale < 1.0 {
        decoded.resize(
            (orig_w as f32 * scale).max(1.0) as u32,
            (orig_h as f32 * scale).max(1.0) as u32,
            image::imageops::FilterType::Triangle,
        )
    } else {
        decoded
    };

    let rgba = resized.to_rgba8();
    Ok(Thumbnail {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

pub fn encode_rgba_png(rgba: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String> {
    let image = image::RgbaImage::from_raw(width, height, rgba.to_vec())
        .ok_or_else(|| "invalid RGBA buffer".to_string())?;
    let dynamic = image::DynamicImage::ImageRgba8(image);
    let mut out = std::io::Cursor::new(Vec::new());
    dynamic
        .write_to(&mut out, image::ImageFormat::Png)
        .map_err(|err| err.to_string())?;
    Ok(out.into_inner())
}

/// Reads the attachment through its handle and decodes it on a blocking
/// task. Never panics; failures come back in the outcome.
pub async fn load_thumbnail(request: ThumbnailRequest, max_dimension: u32) -> ThumbnailOutcome {
    let ThumbnailRequest { id, handle } = request;
    let result = async {
        let bytes = handle
            .read_bytes()
            .await
            .map_err(|source| ThumbnailError::Read { id, source })?;
        tokio::task::spawn_blocking(move || decode_thumbnail(&bytes, max_dimension))
            .await
            .map_err(|_| ThumbnailError::WorkerStopped { id })?
            .map_err(|reason| ThumbnailError::Decode { id, reason })
    }
    .await;

    match &result {
        Ok(thumbnail) => tracing::debug!(
            %id,
            width = thumbnail.width,
            height = thumbnail.height,
            "thumbnail decoded"
        ),
        Err(error) => tracing::debug!(%id, %error, "thumbnail unavailable; keeping category icon"),
    }

    ThumbnailOutcome { id, result }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    fn png_fixture(width: u32, height: u32) -> Vec<u8> {
        let rgba = vec![200_u8; (width * height * 4) as usize];
        encode_rgba_png(&rgba, width, height).expect("encode fixture")
    }

    #[test]
    fn downsizes_longest_edge_and_keeps_aspect() {
        let thumbnail = decode_thumbnail(&png_fixture(600, 300), 240).expect("decode");
        assert_eq!((thumbnail.width, thumbnail.height), (240, 120));
        assert_eq!(thumbnail.rgba.len(), 240 * 120 * 4);
    }

    #[test]
    fn small_images_are_not_upscaled() {
        let thumbnail = decode_thumbnail(&png_fixture(16, 8), 240).expect("decode");
        assert_eq!((thumbnail.width, thumbnail.height), (16, 8));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(decode_thumbnail(b"definitely not an image", 240).is_err());
    }

    #[test]
    fn encode_rejects_short_buffer() {
        assert!(encode_rgba_png(&[0, 0, 0], 2, 2).is_err());
    }

    #[tokio::test]
    async fn load_reports_decode_failure_for_attachment() {
        let request = ThumbnailRequest {
            id: AttachmentId(9),
            handle: Arc::new(MemorySource::new(
                "broken.png",
                Some("image/png".to_string()),
                b"nope".to_vec(),
            )),
        };

        let outcome = load_thumbnail(request, 64).await;
        assert_eq!(outcome.id, AttachmentId(9));
        assert!(matches!(
            outcome.result,
            Err(ThumbnailError::Decode { id: AttachmentId(9), .. })
        ));
    }

    #[tokio::test]
    async fn load_decodes_in_memory_png() {
        let request = ThumbnailRequest {
            id: AttachmentId(1),
            handle: Arc::new(MemorySource::new("dot.png", None, png_fixture(4, 4))),
        };

        let outcome = load_thumbnail(request, 64).await;
        let thumbnail = outcome.result.expect("thumbnail");
        assert_eq!((thumbnail.width, thumbnail.height), (4, 4));
    }
}
