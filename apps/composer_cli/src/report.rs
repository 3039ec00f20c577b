//! Plain-text rendering of preview snapshots for terminal output.

use std::fmt::Write as _;

use shared::protocol::{AttachmentSummary, PreviewSnapshot, ThumbnailSlot};

fn slot_label(slot: &ThumbnailSlot) -> String {
    match slot {
        ThumbnailSlot::Icon => "icon".to_string(),
        ThumbnailSlot::Loading => "loading".to_string(),
        ThumbnailSlot::Ready { width, height } => format!("thumbnail {width}x{height}"),
        ThumbnailSlot::Failed { error } => format!("icon ({:?}: {})", error.code, error.message),
    }
}

pub fn render_text(snapshot: &PreviewSnapshot) -> String {
    if snapshot.is_empty() {
        return "no pending attachments\n".to_string();
    }

    let mut out = String::new();
    for item in &snapshot.items {
        let _ = writeln!(
            out,
            "[{}] {} {}  {}  {}  {}",
            item.position,
            item.category.icon(),
            item.name,
            item.category.label(),
            item.size_label,
            slot_label(&item.thumbnail),
        );
    }
    out
}

pub fn render_submission(text: &str, attachments: &[AttachmentSummary]) -> String {
    let mut out = format!("sent message ({} attachment(s))\n", attachments.len());
    if !text.is_empty() {
        let _ = writeln!(out, "  text: {text}");
    }
    for attachment in attachments {
        let _ = writeln!(
            out,
            "  - {} ({})",
            attachment.name,
            composer_core::format_size(attachment.size_bytes)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{
        domain::{AttachmentCategory, AttachmentId},
        error::{ErrorCode, ErrorReport},
        protocol::PreviewItem,
    };

    fn item(position: usize, name: &str, thumbnail: ThumbnailSlot) -> PreviewItem {
        PreviewItem {
            id: AttachmentId(position as u64 + 1),
            position,
            name: name.to_string(),
            mime_type: None,
            size_bytes: 1536,
            size_label: "1.5 KB".to_string(),
            category: AttachmentCategory::Image,
            thumbnail,
        }
    }

    #[test]
    fn empty_snapshot_says_so() {
        assert_eq!(
            render_text(&PreviewSnapshot::default()),
            "no pending attachments\n"
        );
    }

    #[test]
    fn rows_show_position_size_and_thumbnail_state() {
        let snapshot = PreviewSnapshot {
            items: vec![
                item(
                    0,
                    "a.png",
                    ThumbnailSlot::Ready {
                        width: 240,
                        height: 120,
                    },
                ),
                item(
                    1,
                    "b.png",
                    ThumbnailSlot::Failed {
                        error: ErrorReport::new(ErrorCode::Decode, "truncated"),
                    },
                ),
            ],
            input_generation: 0,
        };

        let text = render_text(&snapshot);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[0] "));
        assert!(lines[0].contains("a.png"));
        assert!(lines[0].contains("1.5 KB"));
        assert!(lines[0].ends_with("thumbnail 240x120"));
        assert!(lines[1].ends_with("icon (Decode: truncated)"));
    }

    #[test]
    fn submission_lists_attachments() {
        let attachments = vec![AttachmentSummary {
            id: AttachmentId(3),
            name: "notes.txt".to_string(),
            mime_type: Some("text/plain".to_string()),
            size_bytes: 0,
            category: AttachmentCategory::Document,
        }];
        let out = render_submission("hello", &attachments);
        assert_eq!(
            out,
            "sent message (1 attachment(s))\n  text: hello\n  - notes.txt (0 Bytes)\n"
        );
    }
}
