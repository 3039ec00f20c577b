//! Runtime bridge between the UI command queue and the preview worker.

use std::{borrow::Cow, thread};

use composer_core::{load_thumbnail, thumbnail::encode_rgba_png};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, thumbnail_max_dimension: u32) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                forward(
                    &ui_tx,
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("preview worker startup failure: failed to build runtime: {err}"),
                    )),
                );
                tracing::error!("failed to build preview runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::debug!(thumbnail_max_dimension, "preview worker ready");
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadThumbnail { request } => {
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let outcome = load_thumbnail(request, thumbnail_max_dimension).await;
                            // The UI counts in-flight thumbnails, so this one must not be dropped.
                            let _ = tokio::task::spawn_blocking(move || {
                                deliver(&ui_tx, UiEvent::ThumbnailFinished(outcome));
                            })
                            .await;
                        });
                    }
                    BackendCommand::ReadClipboardImage => {
                        let ui_tx = ui_tx.clone();
                        tokio::task::spawn_blocking(move || {
                            let event = match read_clipboard_png() {
                                Ok(png) => UiEvent::ClipboardImage {
                                    name: format!(
                                        "pasted-{}.png",
                                        chrono::Local::now().format("%Y%m%d-%H%M%S")
                                    ),
                                    png,
                                },
                                Err(err) => UiEvent::Error(UiError::from_message(
                                    UiErrorContext::Clipboard,
                                    format!("clipboard image unavailable: {err}"),
                                )),
                            };
                            forward(&ui_tx, event);
                        });
                    }
                }
            }
            tracing::debug!("preview worker shutting down");
        });
    });
}

fn read_clipboard_png() -> Result<Vec<u8>, String> {
    let mut clipboard = arboard::Clipboard::new().map_err(|err| err.to_string())?;
    let image = clipboard.get_image().map_err(|err| err.to_string())?;
    let rgba: Cow<'_, [u8]> = image.bytes;
    encode_rgba_png(&rgba, image.width as u32, image.height as u32)
}

/// Blocks until the UI has room; only a closed UI drops the event.
fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    if ui_tx.send(event).is_err() {
        tracing::debug!("ui closed; dropping worker event");
    }
}

fn forward(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => tracing::warn!("ui event queue full; dropping worker event"),
        Err(TrySendError::Disconnected(_)) => tracing::debug!("ui closed; dropping worker event"),
    }
}
