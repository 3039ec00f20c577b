use std::sync::Arc;

use composer_core::{
    load_thumbnail, AttachmentPreviewManager, AttachmentSource, PathSource,
};
use shared::{domain::AttachmentCategory, protocol::ThumbnailSlot};

fn select(paths: &[std::path::PathBuf]) -> Vec<Arc<dyn AttachmentSource>> {
    paths
        .iter()
        .map(|path| Arc::new(PathSource::open(path).expect("open fixture")) as Arc<dyn AttachmentSource>)
        .collect()
}

#[tokio::test]
async fn select_remove_thumbnail_and_submit_acceptance() {
    let dir = tempfile::tempdir().expect("tempdir");
    let notes = dir.path().join("notes.txt");
    let photo = dir.path().join("photo.jpg");
    std::fs::write(&notes, "remember the milk").expect("write notes");
    image::RgbImage::from_pixel(640, 320, image::Rgb([10, 120, 200]))
        .save(&photo)
        .expect("write photo");

    let mut manager = AttachmentPreviewManager::new();
    let ids = manager.add_files(select(&[notes, photo]));

    let snapshot = manager.render();
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.items[0].category, AttachmentCategory::Document);
    assert_eq!(snapshot.items[1].category, AttachmentCategory::Image);
    assert_eq!(snapshot.items[1].mime_type.as_deref(), Some("image/jpeg"));

    let requests = manager.take_thumbnail_requests();
    assert_eq!(requests.len(), 1);
    let pending = tokio::spawn(load_thumbnail(requests[0].clone(), 240));

    manager.remove_by_id(ids[0]);
    let outcome = pending.await.expect("thumbnail task");
    assert!(manager.apply_thumbnail(outcome));

    let snapshot = manager.render();
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].name, "photo.jpg");
    assert_eq!(snapshot.items[0].position, 0);
    assert_eq!(
        snapshot.items[0].thumbnail,
        ThumbnailSlot::Ready {
            width: 240,
            height: 120
        }
    );

    let generation_before = manager.input_generation();
    let submission = manager.submit("").expect("submission");
    assert_eq!(submission.attachments.len(), 1);
    assert!(manager.is_empty());
    assert!(manager.input_generation() > generation_before);
}

#[tokio::test]
async fn completion_after_removal_touches_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let photo = dir.path().join("photo.png");
    image::RgbaImage::new(8, 8).save(&photo).expect("write photo");

    let mut manager = AttachmentPreviewManager::new();
    manager.add_files(select(&[photo]));
    let request = manager.take_thumbnail_requests().remove(0);
    let pending = tokio::spawn(load_thumbnail(request, 240));

    manager.remove_file(0);
    manager.add_files(select(&[dir.path().join("photo.png")]));
    let before = manager.render();

    let outcome = pending.await.expect("thumbnail task");
    assert!(!manager.apply_thumbnail(outcome));
    assert_eq!(manager.render(), before);
}

#[tokio::test]
async fn unreadable_image_keeps_default_icon() {
    let dir = tempfile::tempdir().expect("tempdir");
    let photo = dir.path().join("vanishing.png");
    std::fs::write(&photo, b"placeholder").expect("write placeholder");

    let mut manager = AttachmentPreviewManager::new();
    manager.add_files(select(&[photo.clone()]));
    std::fs::remove_file(&photo).expect("remove");

    let request = manager.take_thumbnail_requests().remove(0);
    let outcome = load_thumbnail(request, 240).await;
    assert!(outcome.result.is_err());
    assert!(manager.apply_thumbnail(outcome));
    assert!(manager.render().items[0].thumbnail.shows_icon());
}

#[tokio::test]
async fn concurrent_thumbnails_land_on_their_own_items() {
    let dir = tempfile::tempdir().expect("tempdir");
    let wide = dir.path().join("wide.png");
    let tall = dir.path().join("tall.png");
    image::RgbaImage::new(480, 240).save(&wide).expect("write wide");
    image::RgbaImage::new(100, 400).save(&tall).expect("write tall");

    let mut manager = AttachmentPreviewManager::new();
    let ids = manager.add_files(select(&[wide, tall]));
    let requests = manager.take_thumbnail_requests();

    // Completion order is reversed on purpose; application is keyed by id.
    let mut outcomes =
        futures::future::join_all(requests.into_iter().map(|request| load_thumbnail(request, 240)))
            .await;
    outcomes.reverse();
    for outcome in outcomes {
        assert!(manager.apply_thumbnail(outcome));
    }

    let snapshot = manager.render();
    assert_eq!(
        snapshot.item(ids[0]).map(|item| item.thumbnail.clone()),
        Some(ThumbnailSlot::Ready {
            width: 240,
            height: 120
        })
    );
    assert_eq!(
        snapshot.item(ids[1]).map(|item| item.thumbnail.clone()),
        Some(ThumbnailSlot::Ready {
            width: 60,
            height: 240
        })
    );
}
