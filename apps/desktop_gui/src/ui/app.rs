use std::{collections::HashMap, path::PathBuf, sync::Arc, time::Instant};

use chrono::{DateTime, Local};
use composer_core::{
    chrome::{JsonFilePreferenceStore, ProfileDropdown, ResizeDebouncer, SidebarState, ThemeController},
    composer::{ComposerState, MAX_COMPOSER_ROWS, MIN_COMPOSER_ROWS},
    config::{AppPaths, Settings},
    AttachmentPreviewManager, AttachmentSource, MemorySource, PathSource, ThumbnailError,
    ThumbnailOutcome,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::TextureHandle;
use shared::{
    domain::{AttachmentId, MessageId, ThemeMode},
    protocol::{AttachmentSummary, PreviewEvent, PreviewSnapshot, ThumbnailSlot},
};
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::{theme, widgets};

const OVERLAY_SIDEBAR_WIDTH: f32 = 260.0;
const SIDEBAR_RAIL_WIDTH: f32 = 44.0;

#[derive(Debug, Clone)]
struct StatusBanner {
    category: UiErrorCategory,
    message: String,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Io => "File",
        UiErrorCategory::Decode => "Image",
        UiErrorCategory::Clipboard => "Clipboard",
        UiErrorCategory::Preferences => "Preferences",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

struct DisplayMessage {
    id: MessageId,
    text: String,
    attachments: Vec<AttachmentSummary>,
    sent_at: DateTime<Local>,
}

pub struct ComposerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    theme: ThemeController<JsonFilePreferenceStore>,
    applied_theme: Option<ThemeMode>,
    sidebar: SidebarState,
    sidebar_toggle_rect: Option<egui::Rect>,
    resize: ResizeDebouncer,
    observed_width: Option<f32>,
    settled_width: f32,
    profile_menu: ProfileDropdown,
    profile_anchor: Option<egui::Rect>,

    composer: ComposerState,
    attachments: AttachmentPreviewManager,
    preview_events: broadcast::Receiver<PreviewEvent>,
    thumbnail_textures: HashMap<AttachmentId, TextureHandle>,
    thumbnails_in_flight: usize,

    transcript: Vec<DisplayMessage>,
    next_message_id: u64,
    status: String,
    status_banner: Option<StatusBanner>,
}

impl ComposerApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &Settings,
        paths: &AppPaths,
    ) -> Self {
        let theme = ThemeController::load(JsonFilePreferenceStore::load(&paths.settings_path));
        let attachments = AttachmentPreviewManager::new();
        let preview_events = attachments.subscribe();
        Self {
            cmd_tx,
            ui_rx,
            theme,
            applied_theme: None,
            sidebar: SidebarState::default(),
            sidebar_toggle_rect: None,
            resize: ResizeDebouncer::new(settings.resize_debounce()),
            observed_width: None,
            settled_width: f32::INFINITY,
            profile_menu: ProfileDropdown::default(),
            profile_anchor: None,
            composer: ComposerState::default(),
            attachments,
            preview_events,
            thumbnail_textures: HashMap::new(),
            thumbnails_in_flight: 0,
            transcript: Vec::new(),
            next_message_id: 1,
            status: "Ready".to_string(),
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Error(err) => self.show_error(err),
                UiEvent::ThumbnailFinished(outcome) => {
                    self.thumbnails_in_flight = self.thumbnails_in_flight.saturating_sub(1);
                    self.attachments.apply_thumbnail(outcome);
                }
                UiEvent::ClipboardImage { name, png } => {
                    let source: Arc<dyn AttachmentSource> = Arc::new(MemorySource::new(
                        name,
                        Some("image/png".to_string()),
                        png,
                    ));
                    self.attachments.add_files([source]);
                    self.status = "Pasted image from clipboard".to_string();
                }
            }
        }
    }

    fn show_error(&mut self, err: UiError) {
        tracing::warn!(context = ?err.context(), category = ?err.category(), "{}", err.message());
        self.status_banner = Some(StatusBanner {
            category: err.category(),
            message: err.message().to_string(),
        });
    }

    /// Keeps GPU textures in step with the pending list.
    fn drain_preview_events(&mut self, ctx: &egui::Context) {
        loop {
            match self.preview_events.try_recv() {
                Ok(PreviewEvent::Removed { id }) => {
                    self.thumbnail_textures.remove(&id);
                }
                Ok(PreviewEvent::Cleared) => self.thumbnail_textures.clear(),
                Ok(PreviewEvent::ThumbnailReady { .. } | PreviewEvent::ThumbnailFailed { .. }) => {
                    ctx.request_repaint();
                }
                Ok(event @ (PreviewEvent::Added { .. } | PreviewEvent::InputReset { .. })) => {
                    tracing::trace!(?event, "preview changed");
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "preview events lagged; pruning textures");
                    let attachments = &self.attachments;
                    self.thumbnail_textures
                        .retain(|id, _| attachments.get(*id).is_some());
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }

    fn dispatch_thumbnail_requests(&mut self) {
        for request in self.attachments.take_thumbnail_requests() {
            let id = request.id;
            if dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::LoadThumbnail { request },
                &mut self.status,
            ) {
                self.thumbnails_in_flight += 1;
            } else {
                self.attachments.apply_thumbnail(ThumbnailOutcome {
                    id,
                    result: Err(ThumbnailError::WorkerStopped { id }),
                });
            }
        }
    }

    fn track_viewport(&mut self, ctx: &egui::Context) {
        let width = ctx.screen_rect().width();
        let now = Instant::now();
        match self.observed_width {
            None => self.settled_width = width,
            Some(previous) if (previous - width).abs() > f32::EPSILON => {
                self.resize.notify(now, width);
            }
            Some(_) => {}
        }
        self.observed_width = Some(width);

        if let Some(settled) = self.resize.poll(now) {
            self.settled_width = settled;
            self.sidebar.on_resize(settled);
        }
        if self.resize.is_pending() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }

    fn viewport_width(&self) -> f32 {
        self.observed_width.unwrap_or(self.settled_width)
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_theme == Some(self.theme.mode()) {
            return;
        }
        ctx.set_visuals(theme::visuals_for_mode(self.theme.mode()));
        self.applied_theme = Some(self.theme.mode());
    }

    fn toggle_theme(&mut self) {
        match self.theme.toggle() {
            Ok(mode) => self.status = format!("Switched to {} theme", mode.as_preference()),
            Err(err) => self.show_error(UiError::from_message(
                UiErrorContext::Preferences,
                err.to_string(),
            )),
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.profile_menu.on_escape();
            self.sidebar.close_overlay();
        }
    }

    fn add_paths(&mut self, paths: Vec<PathBuf>) {
        let mut handles: Vec<Arc<dyn AttachmentSource>> = Vec::with_capacity(paths.len());
        for path in paths {
            match PathSource::open(&path) {
                Ok(source) => handles.push(Arc::new(source)),
                Err(err) => self.show_error(UiError::from_message(
                    UiErrorContext::FileSelection,
                    format!("{}: {err}", path.display()),
                )),
            }
        }
        let added = self.attachments.add_files(handles).len();
        if added > 0 {
            self.status = format!("{} attachment(s) pending", self.attachments.len());
        }
    }

    fn pick_files(&mut self) {
        let mut dialog = rfd::FileDialog::new();
        if let Some(dir) = dirs::download_dir().or_else(dirs::home_dir) {
            dialog = dialog.set_directory(dir);
        }
        if let Some(paths) = dialog.pick_files() {
            self.add_paths(paths);
        }
    }

    fn try_send_current_composer(&mut self, response: Option<&egui::Response>) {
        match self.attachments.submit(&self.composer.text) {
            Some(submission) => {
                self.composer.take_text();
                let id = MessageId(self.next_message_id);
                self.next_message_id += 1;
                let attachments = submission.summaries();
                tracing::info!(%id, attachments = attachments.len(), "message submitted");
                self.transcript.push(DisplayMessage {
                    id,
                    text: submission.text,
                    attachments,
                    sent_at: Local::now(),
                });
                self.status = "Sent".to_string();
                if let Some(response) = response {
                    response.request_focus();
                }
            }
            None => {
                if self.composer.is_blank() {
                    self.composer.take_text();
                }
            }
        }
    }

    fn new_conversation(&mut self) {
        self.attachments.clear();
        self.composer.take_text();
        self.transcript.clear();
        self.profile_menu.close();
        self.status = "Started a new conversation".to_string();
    }

    fn sync_thumbnail_textures(&mut self, ctx: &egui::Context, snapshot: &PreviewSnapshot) {
        for item in &snapshot.items {
            if !matches!(item.thumbnail, ThumbnailSlot::Ready { .. })
                || self.thumbnail_textures.contains_key(&item.id)
            {
                continue;
            }
            let Some(thumbnail) = self.attachments.thumbnail(item.id) else {
                continue;
            };
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [thumbnail.width as usize, thumbnail.height as usize],
                &thumbnail.rgba,
            );
            let texture = ctx.load_texture(
                format!("pending-attachment:{}", item.id),
                color_image,
                egui::TextureOptions::LINEAR,
            );
            self.thumbnail_textures.insert(item.id, texture);
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let toggle = ui.button("☰").on_hover_text("Toggle sidebar");
                self.sidebar_toggle_rect = Some(toggle.rect);
                if toggle.clicked() {
                    let width = self.viewport_width();
                    self.sidebar.toggle(width);
                }
                ui.heading("Chat");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let profile = ui.button("👤 Me");
                    if profile.clicked() {
                        self.profile_anchor = Some(profile.rect);
                        self.profile_menu.toggle();
                    }
                    if ui.button(theme::toggle_label(self.theme.mode())).clicked() {
                        self.toggle_theme();
                    }
                    ui.weak(&self.status);
                });
            });
        });
    }

    fn show_profile_menu(&mut self, ctx: &egui::Context) {
        if !self.profile_menu.is_open() {
            return;
        }
        let Some(anchor) = self.profile_anchor else {
            self.profile_menu.close();
            return;
        };

        let area = egui::Area::new(egui::Id::new("profile_menu"))
            .order(egui::Order::Foreground)
            .pivot(egui::Align2::RIGHT_TOP)
            .fixed_pos(egui::pos2(anchor.right(), anchor.bottom() + 4.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_min_width(180.0);
                    ui.label(egui::RichText::new("Local profile").strong());
                    ui.separator();
                    if ui.button("✏ New conversation").clicked() {
                        self.new_conversation();
                    }
                    if ui.button(theme::toggle_label(self.theme.mode())).clicked() {
                        self.toggle_theme();
                        self.profile_menu.close();
                    }
                });
            });

        let menu_rect = area.response.rect;
        let clicked_elsewhere = ctx.input(|i| {
            i.pointer.any_click()
                && i.pointer
                    .interact_pos()
                    .is_some_and(|pos| !menu_rect.contains(pos) && !anchor.contains(pos))
        });
        if clicked_elsewhere {
            self.profile_menu.on_click_outside();
        }
    }

    fn show_sidebar_contents(&mut self, ui: &mut egui::Ui) {
        ui.add_space(6.0);
        let mut navigated = false;
        if ui
            .add_sized([ui.available_width(), 30.0], egui::Button::new("✏ New conversation"))
            .clicked()
        {
            self.new_conversation();
            navigated = true;
        }
        ui.separator();
        ui.label(egui::RichText::new("Conversations").small().weak());
        let title = self
            .transcript
            .first()
            .map(|message| message.text.lines().next().unwrap_or_default().to_string())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| "New conversation".to_string());
        if ui.selectable_label(true, title).clicked() {
            navigated = true;
        }

        if navigated {
            let width = self.viewport_width();
            self.sidebar.on_navigate(Instant::now(), width);
        }
    }

    fn show_sidebar_rail(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar_rail")
            .resizable(false)
            .exact_width(SIDEBAR_RAIL_WIDTH)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                if ui
                    .button("✏")
                    .on_hover_text("New conversation")
                    .clicked()
                {
                    self.new_conversation();
                }
            });
    }

    fn show_sidebar(&mut self, ctx: &egui::Context) {
        let width = self.viewport_width();
        if !SidebarState::is_mobile(width) && self.sidebar.is_collapsed() {
            self.show_sidebar_rail(ctx);
            return;
        }
        if !self.sidebar.is_visible(width) {
            return;
        }

        if !SidebarState::is_mobile(width) {
            let panel = egui::SidePanel::left("sidebar")
                .resizable(true)
                .default_width(240.0)
                .show(ctx, |ui| self.show_sidebar_contents(ui));
            let panel_rect = panel.response.rect;
            let toggle_rect = self.sidebar_toggle_rect;
            let clicked_outside = ctx.input(|i| {
                i.pointer.any_click()
                    && i.pointer.interact_pos().is_some_and(|pos| {
                        !panel_rect.contains(pos)
                            && !toggle_rect.is_some_and(|toggle| toggle.contains(pos))
                    })
            });
            if clicked_outside {
                self.sidebar.on_click_outside(width);
            }
            return;
        }

        let screen = ctx.screen_rect();
        let backdrop = egui::Area::new(egui::Id::new("sidebar_backdrop"))
            .order(egui::Order::Middle)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let (rect, response) = ui.allocate_exact_size(screen.size(), egui::Sense::click());
                ui.painter().rect_filled(
                    rect,
                    egui::CornerRadius::ZERO,
                    egui::Color32::from_black_alpha(120),
                );
                response
            })
            .inner;

        egui::Area::new(egui::Id::new("sidebar_overlay"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                egui::Frame::side_top_panel(&ctx.style()).show(ui, |ui| {
                    ui.set_min_size(egui::vec2(OVERLAY_SIDEBAR_WIDTH, screen.height()));
                    ui.set_max_width(OVERLAY_SIDEBAR_WIDTH);
                    self.show_sidebar_contents(ui);
                });
            });

        if backdrop.clicked() {
            self.sidebar.close_overlay();
        }
    }

    fn show_composer(&mut self, ctx: &egui::Context) {
        let snapshot = self.attachments.render();
        self.sync_thumbnail_textures(ctx, &snapshot);

        egui::TopBottomPanel::bottom("composer")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                if !snapshot.is_empty() {
                    let mut removed = Vec::new();
                    egui::ScrollArea::horizontal()
                        .id_salt("attachment_strip")
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                for item in &snapshot.items {
                                    let texture = self.thumbnail_textures.get(&item.id);
                                    if widgets::attachment_chip(ui, item, texture) {
                                        removed.push(item.id);
                                    }
                                }
                            });
                        });
                    for id in removed {
                        self.attachments.remove_by_id(id);
                    }
                    ui.add_space(4.0);
                }

                ui.horizontal(|ui| {
                    if ui.button("📎").on_hover_text("Attach files").clicked() {
                        self.pick_files();
                    }
                    if ui
                        .button("📋")
                        .on_hover_text("Paste image from clipboard")
                        .clicked()
                    {
                        dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::ReadClipboardImage,
                            &mut self.status,
                        );
                    }

                    let send_width = 72.0;
                    let spacing = ui.spacing().item_spacing.x;
                    let text_w = (ui.available_width() - send_width - spacing).max(64.0);
                    let rows = self.composer.desired_rows(MIN_COMPOSER_ROWS, MAX_COMPOSER_ROWS);
                    let response = ui.add(
                        egui::TextEdit::multiline(&mut self.composer.text)
                            .id_salt("composer_text")
                            .desired_rows(rows)
                            .desired_width(text_w)
                            .hint_text("Message (Enter to send, Shift+Enter for newline)"),
                    );

                    let send_shortcut = response.has_focus()
                        && ui.input(|i| {
                            ComposerState::should_submit(
                                i.key_pressed(egui::Key::Enter),
                                i.modifiers.shift,
                            )
                        });
                    let clicked_send = ui
                        .add_sized([send_width, 28.0], egui::Button::new("⬆ Send"))
                        .clicked();

                    if send_shortcut || clicked_send {
                        self.try_send_current_composer(Some(&response));
                    }
                });
                ui.add_space(6.0);
            });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.status_banner.clone() else {
            return;
        };
        egui::Frame::new()
            .fill(ui.visuals().error_fg_color.gamma_multiply(0.15))
            .corner_radius(egui::CornerRadius::same(6))
            .inner_margin(egui::Margin::symmetric(10, 6))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(
                        ui.visuals().error_fg_color,
                        format!("{} error: {}", err_label(banner.category), banner.message),
                    );
                    if ui.small_button("Dismiss").clicked() {
                        self.status_banner = None;
                    }
                });
            });
        ui.add_space(6.0);
    }

    fn show_transcript(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);

            if self.transcript.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.weak("Start a conversation");
                });
                return;
            }

            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for message in &self.transcript {
                        ui.push_id(message.id.0, |ui| {
                            egui::Frame::group(ui.style()).show(ui, |ui| {
                                ui.set_width(ui.available_width());
                                ui.horizontal(|ui| {
                                    ui.label(egui::RichText::new("You").strong());
                                    ui.weak(message.sent_at.format("%H:%M").to_string());
                                });
                                if !message.text.is_empty() {
                                    ui.label(&message.text);
                                }
                                for attachment in &message.attachments {
                                    ui.weak(format!(
                                        "{} {} ({})",
                                        attachment.category.icon(),
                                        attachment.name,
                                        composer_core::format_size(attachment.size_bytes)
                                    ));
                                }
                            });
                        });
                        ui.add_space(4.0);
                    }
                });
        });
    }
}

impl eframe::App for ComposerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.drain_preview_events(ctx);
        self.dispatch_thumbnail_requests();
        self.track_viewport(ctx);
        self.apply_theme_if_needed(ctx);
        self.handle_shortcuts(ctx);
        self.sidebar.poll(Instant::now());

        self.show_top_bar(ctx);
        self.show_composer(ctx);
        self.show_sidebar(ctx);
        self.show_transcript(ctx);
        self.show_profile_menu(ctx);

        if self.thumbnails_in_flight > 0 || self.sidebar.has_scheduled_close() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
