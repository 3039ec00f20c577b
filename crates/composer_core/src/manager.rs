//! Pending attachment list and the preview derived from it.
//!
//! The manager never renders anything itself. Every mutation publishes a
//! [`PreviewEvent`] and front ends call [`AttachmentPreviewManager::render`]
//! to rebuild their view from the current state. Removal and thumbnail
//! completion are keyed by [`AttachmentId`]; positions are only computed
//! while rendering.

use std::sync::Arc;

use shared::{
    domain::{AttachmentCategory, AttachmentId},
    error::ErrorReport,
    protocol::{AttachmentSummary, PreviewEvent, PreviewItem, PreviewSnapshot, ThumbnailSlot},
};
use tokio::sync::broadcast;
use tracing::debug;

use crate::{
    classify::classify,
    format::format_size,
    source::AttachmentSource,
    thumbnail::{Thumbnail, ThumbnailOutcome, ThumbnailRequest},
};

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct PendingAttachment {
    pub id: AttachmentId,
    pub name: String,
    pub mime_type: Option<String>,
    pub size_bytes: u64,
    pub category: AttachmentCategory,
    pub handle: Arc<dyn AttachmentSource>,
}

impl PendingAttachment {
    pub fn summary(&self) -> AttachmentSummary {
        AttachmentSummary {
            id: self.id,
            name: self.name.clone(),
            mime_type: self.mime_type.clone(),
            size_bytes: self.size_bytes,
            category: self.category,
        }
    }
}

#[derive(Debug, Clone)]
enum ThumbnailState {
    NotApplicable,
    NotRequested,
    Loading,
    Ready(Arc<Thumbnail>),
    Failed(ErrorReport),
}

impl ThumbnailState {
    fn slot(&self) -> ThumbnailSlot {
        match self {
            ThumbnailState::NotApplicable | ThumbnailState::NotRequested => ThumbnailSlot::Icon,
            ThumbnailState::Loading => ThumbnailSlot::Loading,
            ThumbnailState::Ready(thumbnail) => ThumbnailSlot::Ready {
                width: thumbnail.width,
                height: thumbnail.height,
            },
            ThumbnailState::Failed(error) => ThumbnailSlot::Failed {
                error: error.clone(),
            },
        }
    }
}

#[derive(Debug)]
struct Entry {
    attachment: PendingAttachment,
    thumbnail: ThumbnailState,
}

/// Text and attachments handed to the send path; the manager is already
/// cleared by the time the caller sees this.
#[derive(Debug)]
pub struct Submission {
    pub text: String,
    pub attachments: Vec<PendingAttachment>,
}

impl Submission {
    pub fn summaries(&self) -> Vec<AttachmentSummary> {
        self.attachments
            .iter()
            .map(PendingAttachment::summary)
            .collect()
    }
}

pub struct AttachmentPreviewManager {
    entries: Vec<Entry>,
    next_id: u64,
    input_generation: u64,
    events: broadcast::Sender<PreviewEvent>,
}

impl Default for AttachmentPreviewManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AttachmentPreviewManager {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            entries: Vec::new(),
            next_id: 1,
            input_generation: 0,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PreviewEvent> {
        self.events.subscribe()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bumped every time the file-selection input is reset.
    pub fn input_generation(&self) -> u64 {
        self.input_generation
    }

    pub fn attachments(&self) -> impl Iterator<Item = &PendingAttachment> {
        self.entries.iter().map(|entry| &entry.attachment)
    }

    pub fn get(&self, id: AttachmentId) -> Option<&PendingAttachment> {
        self.position_of(id).map(|index| &self.entries[index].attachment)
    }

    pub fn position_of(&self, id: AttachmentId) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.attachment.id == id)
    }

    /// Decoded pixels for an item whose thumbnail has arrived.
    pub fn thumbnail(&self, id: AttachmentId) -> Option<Arc<Thumbnail>> {
        let index = self.position_of(id)?;
        match &self.entries[index].thumbnail {
            ThumbnailState::Ready(thumbnail) => Some(Arc::clone(thumbnail)),
            _ => None,
        }
    }

    /// Appends every handle in the given order. Nothing is validated; the
    /// same file may be added twice.
    pub fn add_files<I>(&mut self, handles: I) -> Vec<AttachmentId>
    where
        I: IntoIterator<Item = Arc<dyn AttachmentSource>>,
    {
        let mut ids = Vec::new();
        for handle in handles {
            let id = AttachmentId(self.next_id);
            self.next_id += 1;

            let name = handle.name().to_string();
            let mime_type = handle
                .mime_type()
                .map(str::to_string)
                .filter(|mime| !mime.is_empty());
            let category = classify(&name, mime_type.as_deref());
            let thumbnail = if category == AttachmentCategory::Image {
                ThumbnailState::NotRequested
            } else {
                ThumbnailState::NotApplicable
            };

            debug!(%id, %name, ?category, "attachment added");
            self.entries.push(Entry {
                attachment: PendingAttachment {
                    id,
                    name,
                    mime_type,
                    size_bytes: handle.size_bytes(),
                    category,
                    handle,
                },
                thumbnail,
            });
            ids.push(id);
        }

        if !ids.is_empty() {
            self.publish(PreviewEvent::Added { ids: ids.clone() });
        }
        ids
    }

    /// Removes the item at `index`; out-of-range indices are ignored.
    pub fn remove_file(&mut self, index: usize) -> Option<PendingAttachment> {
        if index >= self.entries.len() {
            debug!(index, len = self.entries.len(), "ignoring removal of missing attachment");
            return None;
        }

        let entry = self.entries.remove(index);
        let id = entry.attachment.id;
        debug!(%id, index, "attachment removed");
        self.publish(PreviewEvent::Removed { id });
        if self.entries.is_empty() {
            self.reset_input();
        }
        Some(entry.attachment)
    }

    pub fn remove_by_id(&mut self, id: AttachmentId) -> Option<PendingAttachment> {
        let index = self.position_of(id)?;
        self.remove_file(index)
    }

    /// Pure view of the current list; calling it twice without a mutation in
    /// between yields equal snapshots.
    pub fn render(&self) -> PreviewSnapshot {
        let items = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| {
                let attachment = &entry.attachment;
                PreviewItem {
                    id: attachment.id,
                    position,
                    name: attachment.name.clone(),
                    mime_type: attachment.mime_type.clone(),
                    size_bytes: attachment.size_bytes,
                    size_label: format_size(attachment.size_bytes),
                    category: attachment.category,
                    thumbnail: entry.thumbnail.slot(),
                }
            })
            .collect();

        PreviewSnapshot {
            items,
            input_generation: self.input_generation,
        }
    }

    /// Hands out one request per image that has not been asked for yet and
    /// marks those items as loading.
    pub fn take_thumbnail_requests(&mut self) -> Vec<ThumbnailRequest> {
        self.entries
            .iter_mut()
            .filter(|entry| matches!(entry.thumbnail, ThumbnailState::NotRequested))
            .map(|entry| {
                entry.thumbnail = ThumbnailState::Loading;
                ThumbnailRequest {
                    id: entry.attachment.id,
                    handle: Arc::clone(&entry.attachment.handle),
                }
            })
            .collect()
    }

    /// Stores a finished thumbnail read. Returns `false` when the attachment
    /// was removed in the meantime; nothing else is touched in that case.
    pub fn apply_thumbnail(&mut self, outcome: ThumbnailOutcome) -> bool {
        let ThumbnailOutcome { id, result } = outcome;
        let Some(index) = self.position_of(id) else {
            debug!(%id, "dropping thumbnail for attachment that is no longer pending");
            return false;
        };

        let entry = &mut self.entries[index];
        match result {
            Ok(thumbnail) => {
                entry.thumbnail = ThumbnailState::Ready(Arc::new(thumbnail));
                self.publish(PreviewEvent::ThumbnailReady { id });
            }
            Err(error) => {
                entry.thumbnail = ThumbnailState::Failed(ErrorReport::from(&error));
                self.publish(PreviewEvent::ThumbnailFailed { id });
            }
        }
        true
    }

    pub fn clear(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        debug!(dropped, "pending attachments cleared");
        self.publish(PreviewEvent::Cleared);
        self.reset_input();
    }

    /// Hands the pending text and attachments to the caller and clears.
    /// Blank text with no attachments is ignored and changes nothing.
    pub fn submit(&mut self, text: &str) -> Option<Submission> {
        let text = text.trim();
        if text.is_empty() && self.entries.is_empty() {
            debug!("suppressing empty submission");
            return None;
        }

        let attachments = self
            .entries
            .drain(..)
            .map(|entry| entry.attachment)
            .collect::<Vec<_>>();
        self.clear();
        Some(Submission {
            text: text.to_string(),
            attachments,
        })
    }

    fn reset_input(&mut self) {
        self.input_generation += 1;
        self.publish(PreviewEvent::InputReset {
            generation: self.input_generation,
        });
    }

    fn publish(&self, event: PreviewEvent) {
        // No subscribers is fine; the snapshot is still authoritative.
        let _ = self.events.send(event);
    }
}
