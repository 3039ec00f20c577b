use eframe::egui;
use egui::TextureHandle;
use shared::protocol::{PreviewItem, ThumbnailSlot};

const CHIP_ICON_SIZE: f32 = 40.0;

/// One pending attachment in the composer strip. Returns `true` when the
/// remove control was clicked.
pub fn attachment_chip(
    ui: &mut egui::Ui,
    item: &PreviewItem,
    texture: Option<&TextureHandle>,
) -> bool {
    let mut remove = false;
    egui::Frame::group(ui.style())
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::symmetric(8, 6))
        .show(ui, |ui| {
            ui.set_max_width(240.0);
            ui.horizontal(|ui| {
                match (&item.thumbnail, texture) {
                    (ThumbnailSlot::Ready { .. }, Some(texture)) => {
                        ui.add(
                            egui::Image::new(texture)
                                .max_size(egui::vec2(CHIP_ICON_SIZE, CHIP_ICON_SIZE)),
                        );
                    }
                    (ThumbnailSlot::Loading, _) => {
                        ui.add(egui::Spinner::new().size(CHIP_ICON_SIZE * 0.6));
                    }
                    _ => {
                        ui.label(egui::RichText::new(item.category.icon()).size(CHIP_ICON_SIZE * 0.6));
                    }
                }

                ui.vertical(|ui| {
                    ui.add(egui::Label::new(egui::RichText::new(&item.name).strong()).truncate());
                    ui.weak(format!("{} · {}", item.category.label(), item.size_label));
                });

                if ui
                    .small_button("✕")
                    .on_hover_text("Remove attachment")
                    .clicked()
                {
                    remove = true;
                }
            });
        });
    remove
}
