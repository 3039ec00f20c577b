//! UI layer for the desktop shell: app, theme visuals, and attachment widgets.

pub mod app;
pub mod theme;
pub mod widgets;

pub use app::ComposerApp;
