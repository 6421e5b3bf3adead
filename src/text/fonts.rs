use std::{
    borrow::Cow,
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgb8;

/// Leading multiplier applied to ascent + descent.
pub const LEADING: f32 = 1.4;

/// Advance used when no font produced glyphs, as a fraction of the font size.
const FALLBACK_ADVANCE_EM: f32 = 0.6;
const FALLBACK_ASCENT_EM: f32 = 0.8;
const FALLBACK_DESCENT_EM: f32 = 0.2;

/// Last entry of every font stack, so text stays visible on hosts without usable fonts.
const BUILTIN_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

const SYSTEM_REGULAR: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const SYSTEM_BOLD: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Typographic role of a piece of card text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Author display name.
    Name,
    /// Post body.
    Body,
    /// Handle and date under the name.
    Meta,
    /// Engagement line.
    Metrics,
    /// Footer branding and full date.
    Small,
    /// Letters on the fallback avatar.
    Initials,
}

impl FontRole {
    /// Size in pixels at scale 1.
    pub fn nominal_size(self) -> f32 {
        match self {
            Self::Name => 68.0,
            Self::Body => 78.0,
            Self::Meta => 42.0,
            Self::Metrics => 40.0,
            Self::Small => 36.0,
            Self::Initials => 48.0,
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, Self::Name | Self::Initials)
    }
}

/// Font files to try, in order, before the well-known system locations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub regular: Vec<PathBuf>,
    pub bold: Vec<PathBuf>,
    /// Append the well-known system font paths after the configured ones.
    pub system_candidates: bool,
    /// Resolve glyphs missing from the loaded files through the host font collection.
    pub host_fonts: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            regular: Vec::new(),
            bold: Vec::new(),
            system_candidates: true,
            host_fonts: true,
        }
    }
}

/// Raw font bytes resolved once and shared by every render.
#[derive(Clone, Debug)]
pub struct FontSet {
    regular: Option<LoadedFont>,
    bold: Option<LoadedFont>,
    host_fonts: bool,
}

impl Default for FontSet {
    fn default() -> Self {
        Self {
            regular: None,
            bold: None,
            host_fonts: true,
        }
    }
}

#[derive(Clone, Debug)]
struct LoadedFont {
    path: PathBuf,
    bytes: Arc<Vec<u8>>,
}

impl FontSet {
    /// Walk the candidate lists; unreadable files are skipped, never reported as errors.
    pub fn load(cfg: &FontConfig) -> Self {
        let regular = first_readable(candidates(&cfg.regular, SYSTEM_REGULAR, cfg.system_candidates));
        let bold = first_readable(candidates(&cfg.bold, SYSTEM_BOLD, cfg.system_candidates));

        match (&regular, &bold) {
            (Some(r), Some(b)) => tracing::info!(
                regular = %r.path.display(),
                bold = %b.path.display(),
                "loaded card fonts"
            ),
            (Some(r), None) => tracing::warn!(
                regular = %r.path.display(),
                "no bold font found, bold text uses the regular face"
            ),
            (None, _) => tracing::warn!("no font files found, falling back to system sans-serif"),
        }

        Self {
            regular,
            bold,
            host_fonts: cfg.host_fonts,
        }
    }

    /// A set with no files; text resolves through the system collection, then the built-in face.
    pub fn system_only() -> Self {
        Self::default()
    }

    /// No files and no host collection: every glyph comes from the built-in face.
    pub fn builtin_only() -> Self {
        Self {
            host_fonts: false,
            ..Self::default()
        }
    }

    pub fn regular_path(&self) -> Option<&Path> {
        self.regular.as_ref().map(|f| f.path.as_path())
    }

    pub fn bold_path(&self) -> Option<&Path> {
        self.bold.as_ref().map(|f| f.path.as_path())
    }
}

fn candidates<'a>(
    configured: &'a [PathBuf],
    system: &'static [&'static str],
    with_system: bool,
) -> impl Iterator<Item = PathBuf> + 'a {
    let system = if with_system { system } else { &[] };
    configured
        .iter()
        .cloned()
        .chain(system.iter().map(PathBuf::from))
}

fn first_readable(paths: impl Iterator<Item = PathBuf>) -> Option<LoadedFont> {
    for path in paths {
        match std::fs::read(&path) {
            Ok(bytes) if !bytes.is_empty() => {
                return Some(LoadedFont {
                    path,
                    bytes: Arc::new(bytes),
                });
            }
            Ok(_) => tracing::debug!(path = %path.display(), "skipping empty font file"),
            Err(err) => tracing::debug!(path = %path.display(), %err, "font candidate unavailable"),
        }
    }
    None
}

/// Ascent and descent of a role's font, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalMetrics {
    pub ascent: f32,
    pub descent: f32,
}

impl VerticalMetrics {
    pub fn line_height(self) -> f32 {
        (self.ascent + self.descent) * LEADING
    }
}

/// Per-render text shaping state: Parley contexts plus the families registered from a
/// [`FontSet`].
pub struct FontBook {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgb8>,
    regular_family: Option<String>,
    bold_family: Option<String>,
    builtin_family: Option<String>,
    host_fonts: bool,
    scale: f32,
    metrics: HashMap<FontRole, VerticalMetrics>,
}

impl FontBook {
    pub fn new(set: &FontSet, scale: f32) -> Self {
        let mut font_ctx = if set.host_fonts {
            parley::FontContext::default()
        } else {
            parley::FontContext {
                collection: parley::fontique::Collection::new(parley::fontique::CollectionOptions {
                    shared: false,
                    system_fonts: false,
                }),
                source_cache: parley::fontique::SourceCache::default(),
            }
        };
        let regular_family = set
            .regular
            .as_ref()
            .and_then(|f| register_family(&mut font_ctx, f));
        let bold_family = set
            .bold
            .as_ref()
            .and_then(|f| register_family(&mut font_ctx, f));
        let builtin_family = register_blob(&mut font_ctx, BUILTIN_FONT.to_vec());
        if builtin_family.is_none() {
            tracing::warn!("built-in font registered no families");
        }

        Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            regular_family,
            bold_family,
            builtin_family,
            host_fonts: set.host_fonts,
            scale,
            metrics: HashMap::new(),
        }
    }

    pub fn size_px(&self, role: FontRole) -> f32 {
        role.nominal_size() * self.scale
    }

    /// Shape `text` on a single unbounded line.
    pub fn layout(&mut self, role: FontRole, text: &str, brush: Rgb8) -> parley::Layout<Rgb8> {
        let stack = self.stack_for(role);
        let size_px = self.size_px(role);
        let weight = if role.is_bold() {
            parley::style::FontWeight::BOLD
        } else {
            parley::style::FontWeight::NORMAL
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(stack)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgb8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Advance width of `text`, trailing whitespace included.
    pub fn measure(&mut self, role: FontRole, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let width = self.layout(role, text, Rgb8::default()).full_width();
        if width > 0.0 {
            width
        } else {
            text.chars().count() as f32 * FALLBACK_ADVANCE_EM * self.size_px(role)
        }
    }

    pub fn metrics(&mut self, role: FontRole) -> VerticalMetrics {
        if let Some(m) = self.metrics.get(&role) {
            return *m;
        }

        let size_px = self.size_px(role);
        let probe = self.layout(role, "Hg", Rgb8::default());
        let shaped = probe
            .lines()
            .next()
            .map(|line| {
                let m = line.metrics();
                VerticalMetrics {
                    ascent: m.ascent.abs(),
                    descent: m.descent.abs(),
                }
            })
            .filter(|m| m.ascent + m.descent > 0.0);
        let metrics = shaped.unwrap_or(VerticalMetrics {
            ascent: FALLBACK_ASCENT_EM * size_px,
            descent: FALLBACK_DESCENT_EM * size_px,
        });

        self.metrics.insert(role, metrics);
        metrics
    }

    pub fn line_height(&mut self, role: FontRole) -> f32 {
        self.metrics(role).line_height()
    }

    fn stack_for(&self, role: FontRole) -> String {
        let family = if role.is_bold() {
            self.bold_family.as_ref().or(self.regular_family.as_ref())
        } else {
            self.regular_family.as_ref()
        };

        let mut stack: Vec<String> = family
            .map(|name| format!("\"{name}\""))
            .into_iter()
            .collect();
        if self.host_fonts {
            stack.push("sans-serif".to_string());
        }
        if let Some(name) = &self.builtin_family {
            stack.push(format!("\"{name}\""));
        }
        stack.join(", ")
    }
}

fn register_family(font_ctx: &mut parley::FontContext, font: &LoadedFont) -> Option<String> {
    let Some(name) = register_blob(font_ctx, font.bytes.to_vec()) else {
        tracing::warn!(path = %font.path.display(), "font file registered no families");
        return None;
    };
    tracing::debug!(path = %font.path.display(), family = %name, "registered font family");
    Some(name)
}

fn register_blob(font_ctx: &mut parley::FontContext, bytes: Vec<u8>) -> Option<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes), None);
    let (family_id, _) = families.first()?;
    Some(font_ctx.collection.family_name(*family_id)?.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
