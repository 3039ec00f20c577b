use serde::{Deserialize, Serialize};

use crate::{
    domain::{AttachmentCategory, AttachmentId},
    error::ErrorReport,
};

/// What occupies the icon slot of one preview row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ThumbnailSlot {
    Icon,
    Loading,
    Ready { width: u32, height: u32 },
    Failed { error: ErrorReport },
}

impl ThumbnailSlot {
    /// Whether the category icon is drawn instead of an image.
    pub fn shows_icon(&self) -> bool {
        !matches!(self, ThumbnailSlot::Ready { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewItem {
    pub id: AttachmentId,
    pub position: usize,
    pub name: String,
    pub mime_type: Option<String>,
    pub size_bytes: u64,
    pub size_label: String,
    pub category: AttachmentCategory,
    pub thumbnail: ThumbnailSlot,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSnapshot {
    pub items: Vec<PreviewItem>,
    pub input_generation: u64,
}

impl PreviewSnapshot {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: AttachmentId) -> Option<&PreviewItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Change notification published after every pending-list mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum PreviewEvent {
    Added { ids: Vec<AttachmentId> },
    Removed { id: AttachmentId },
    Cleared,
    InputReset { generation: u64 },
    ThumbnailReady { id: AttachmentId },
    ThumbnailFailed { id: AttachmentId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentSummary {
    pub id: AttachmentId,
    pub name: String,
    pub mime_type: Option<String>,
    pub size_bytes: u64,
    pub category: AttachmentCategory,
}
