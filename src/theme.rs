use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgb8;

/// Enumerated set of supported themes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Dim,
    Light,
}

impl ThemeName {
    /// Resolve a theme identifier, falling back to [`ThemeName::Dark`] for anything unknown.
    pub fn parse_or_default(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Self::Dark,
            "dim" => Self::Dim,
            "light" => Self::Light,
            other => {
                tracing::debug!(theme = other, "unknown theme, using dark");
                Self::Dark
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Dim => "dim",
            Self::Light => "light",
        }
    }
}

/// Semantic color roles used by the card composer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub background: Rgb8,
    pub primary_text: Rgb8,
    pub secondary_text: Rgb8,
    /// Links, mentions, hashtags, badge and fallback avatar fill.
    pub accent: Rgb8,
    pub divider: Rgb8,
    pub icon: Rgb8,
}

impl ThemePalette {
    pub const DARK: Self = Self {
        background: Rgb8::new(0, 0, 0),
        primary_text: Rgb8::new(231, 233, 234),
        secondary_text: Rgb8::new(113, 118, 123),
        accent: Rgb8::new(29, 155, 240),
        divider: Rgb8::new(56, 68, 77),
        icon: Rgb8::new(113, 118, 123),
    };

    pub const DIM: Self = Self {
        background: Rgb8::new(21, 24, 28),
        primary_text: Rgb8::new(247, 249, 249),
        secondary_text: Rgb8::new(139, 152, 165),
        accent: Rgb8::new(29, 155, 240),
        divider: Rgb8::new(56, 68, 77),
        icon: Rgb8::new(139, 152, 165),
    };

    pub const LIGHT: Self = Self {
        background: Rgb8::new(255, 255, 255),
        primary_text: Rgb8::new(15, 20, 25),
        secondary_text: Rgb8::new(83, 100, 113),
        accent: Rgb8::new(29, 155, 240),
        divider: Rgb8::new(180, 185, 190),
        icon: Rgb8::new(83, 100, 113),
    };
}

/// Immutable palette table injected into the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub default_theme: ThemeName,
    pub dark: ThemePalette,
    pub dim: ThemePalette,
    pub light: ThemePalette,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_theme: ThemeName::Dark,
            dark: ThemePalette::DARK,
            dim: ThemePalette::DIM,
            light: ThemePalette::LIGHT,
        }
    }
}

impl ThemeConfig {
    pub fn palette(&self, name: ThemeName) -> &ThemePalette {
        match name {
            ThemeName::Dark => &self.dark,
            ThemeName::Dim => &self.dim,
            ThemeName::Light => &self.light,
        }
    }

    /// Resolve an optional caller-supplied identifier; `None` selects the configured default.
    pub fn resolve(&self, name: Option<&str>) -> (ThemeName, &ThemePalette) {
        let theme = name.map_or(self.default_theme, ThemeName::parse_or_default);
        (theme, self.palette(theme))
    }
}
