use eframe::egui;
use shared::domain::ThemeMode;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(88, 101, 242);

pub fn visuals_for_mode(mode: ThemeMode) -> egui::Visuals {
    let mut visuals = match mode {
        ThemeMode::Dark => {
            let mut v = egui::Visuals::dark();
            v.window_fill = egui::Color32::from_rgb(40, 44, 52);
            v.panel_fill = egui::Color32::from_rgb(33, 37, 43);
            v.extreme_bg_color = egui::Color32::from_rgb(24, 26, 31);
            v.faint_bg_color = egui::Color32::from_rgb(52, 57, 66);
            v
        }
        ThemeMode::Light => egui::Visuals::light(),
    };

    visuals.hyperlink_color = ACCENT;
    visuals.selection.bg_fill = ACCENT;
    visuals.window_corner_radius = egui::CornerRadius::same(10);
    visuals.menu_corner_radius = egui::CornerRadius::same(8);
    visuals
}

/// Label for the button that switches away from `mode`.
pub fn toggle_label(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Light => "🌙 Dark",
        ThemeMode::Dark => "☀ Light",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visuals_follow_mode() {
        assert!(visuals_for_mode(ThemeMode::Dark).dark_mode);
        assert!(!visuals_for_mode(ThemeMode::Light).dark_mode);
    }

    #[test]
    fn toggle_label_names_the_other_mode() {
        assert!(toggle_label(ThemeMode::Light).contains("Dark"));
        assert!(toggle_label(ThemeMode::Dark).contains("Light"));
    }
}
