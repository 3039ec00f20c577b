//! Window chrome around the composer: theme, sidebar and profile menu.

pub mod dropdown;
pub mod preferences;
pub mod sidebar;
pub mod theme;

pub use dropdown::ProfileDropdown;
pub use preferences::{JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use sidebar::{ResizeDebouncer, SidebarState, MOBILE_BREAKPOINT, NAVIGATION_CLOSE_DELAY};
pub use theme::{ThemeController, THEME_PREFERENCE_KEY};
