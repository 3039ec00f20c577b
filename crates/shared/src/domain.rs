use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(AttachmentId);
id_newtype!(MessageId);

/// Coarse file-type bucket used to pick a preview icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentCategory {
    Image,
    Pdf,
    Document,
    Spreadsheet,
    Video,
    Audio,
    Archive,
    Code,
    Other,
}

impl AttachmentCategory {
    pub fn label(self) -> &'static str {
        match self {
            AttachmentCategory::Image => "Image",
            AttachmentCategory::Pdf => "PDF",
            AttachmentCategory::Document => "Document",
            AttachmentCategory::Spreadsheet => "Spreadsheet",
            AttachmentCategory::Video => "Video",
            AttachmentCategory::Audio => "Audio",
            AttachmentCategory::Archive => "Archive",
            AttachmentCategory::Code => "Code",
            AttachmentCategory::Other => "File",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            AttachmentCategory::Image => "🖼",
            AttachmentCategory::Pdf => "📕",
            AttachmentCategory::Document => "📄",
            AttachmentCategory::Spreadsheet => "📊",
            AttachmentCategory::Video => "🎞",
            AttachmentCategory::Audio => "🎵",
            AttachmentCategory::Archive => "🗜",
            AttachmentCategory::Code => "💻",
            AttachmentCategory::Other => "📎",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    /// Value written under the `theme` preference key.
    pub fn as_preference(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// A missing or empty value means dark; any other value that is not
    /// `"dark"` is treated as light.
    pub fn from_preference(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some("dark") => ThemeMode::Dark,
            Some(_) => ThemeMode::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}
