//! Process-wide font registry.
//!
//! Fonts are registered under a family name and a numeric weight. Text drawing
//! resolves a family chain such as `Open Sans, sans-serif` against the
//! registry and falls back to a system default font when nothing matches.

use once_cell::sync::{Lazy, OnceCell};
use rusttype::Font;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use card_common::{CardError, CardResult};

/// Family name the bundled fonts are registered under.
pub const BUNDLED_FAMILY: &str = "Open Sans";

/// Bundled font files and their weights, relative to the font directory.
pub const BUNDLED_FONTS: [(&str, u16); 3] = [
    ("OpenSans-Regular.ttf", 400),
    ("OpenSans-SemiBold.ttf", 600),
    ("OpenSans-Bold.ttf", 700),
];

/// Families that always resolve to the default font.
const GENERIC_FAMILIES: &[&str] = &[
    "sans-serif",
    "serif",
    "monospace",
    "system-ui",
    "cursive",
    "fantasy",
];

/// Directories searched for a default font.
pub const SYSTEM_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/System/Library/Fonts",
    "/Library/Fonts",
    "C:\\Windows\\Fonts",
];

/// Preferred default font files, checked before any other font found.
const PREFERRED_DEFAULTS: &[&str] = &[
    "DejaVuSans.ttf",
    "LiberationSans-Regular.ttf",
    "Arial.ttf",
    "NotoSans-Regular.ttf",
];

static GLOBAL: Lazy<Arc<FontRegistry>> = Lazy::new(|| Arc::new(FontRegistry::new()));

type Face = (u16, Arc<Font<'static>>);

/// Registry mapping (family, weight) to parsed fonts.
pub struct FontRegistry {
    faces: RwLock<HashMap<String, Vec<Face>>>,
    provisioned: AtomicBool,
    fallback_dirs: Vec<PathBuf>,
    fallback: OnceCell<Option<Arc<Font<'static>>>>,
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry {
    /// Registry that falls back to fonts found in [`SYSTEM_FONT_DIRS`].
    pub fn new() -> Self {
        Self::with_fallback_dirs(SYSTEM_FONT_DIRS.iter().map(PathBuf::from).collect())
    }

    /// Registry with an explicit list of default-font directories.
    ///
    /// An empty list means unmatched families draw nothing.
    pub fn with_fallback_dirs(fallback_dirs: Vec<PathBuf>) -> Self {
        Self {
            faces: RwLock::new(HashMap::new()),
            provisioned: AtomicBool::new(false),
            fallback_dirs,
            fallback: OnceCell::new(),
        }
    }

    /// The registry shared by every request in this process.
    pub fn global() -> Arc<FontRegistry> {
        Arc::clone(&GLOBAL)
    }

    /// Register the bundled fonts from `font_dir`, once.
    ///
    /// Safe to call on every request. If any bundled file is missing nothing
    /// is registered, a warning is logged, and the registry is still marked
    /// provisioned; later calls never retry. Concurrent first calls may both
    /// register, which only replaces identical entries.
    pub fn ensure_fonts(&self, font_dir: &Path) {
        if self.provisioned.load(Ordering::Acquire) {
            return;
        }

        let files: Vec<(PathBuf, u16)> = BUNDLED_FONTS
            .iter()
            .map(|(name, weight)| (font_dir.join(name), *weight))
            .collect();

        let missing: Vec<&PathBuf> = files
            .iter()
            .map(|(path, _)| path)
            .filter(|path| !path.exists())
            .collect();

        if !missing.is_empty() {
            warn!(missing = ?missing, "Missing font files, using default fonts");
            self.provisioned.store(true, Ordering::Release);
            return;
        }

        for (path, weight) in &files {
            if let Err(e) = self.register_file(path, BUNDLED_FAMILY, *weight) {
                warn!(path = %path.display(), error = %e, "Failed to register font");
            }
        }

        info!(family = BUNDLED_FAMILY, dir = %font_dir.display(), "Registered bundled fonts");
        self.provisioned.store(true, Ordering::Release);
    }

    pub fn is_provisioned(&self) -> bool {
        self.provisioned.load(Ordering::Acquire)
    }

    /// Parse and register a font file.
    pub fn register_file(&self, path: &Path, family: &str, weight: u16) -> CardResult<()> {
        let data = std::fs::read(path)?;
        let font = Font::try_from_vec(data)
            .ok_or_else(|| CardError::Font(format!("{} is not a usable font", path.display())))?;
        self.register(family, weight, font);
        Ok(())
    }

    /// Register a parsed font, replacing any font with the same family and weight.
    pub fn register(&self, family: &str, weight: u16, font: Font<'static>) {
        let mut faces = match self.faces.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let entry = faces.entry(family_key(family)).or_default();
        entry.retain(|(w, _)| *w != weight);
        entry.push((weight, Arc::new(font)));
        entry.sort_by_key(|(w, _)| *w);
    }

    /// Registered family names (lowercased), sorted.
    pub fn families(&self) -> Vec<String> {
        let faces = match self.faces.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut names: Vec<String> = faces.keys().cloned().collect();
        names.sort();
        names
    }

    /// Resolve the first registered family in `families` at the nearest weight.
    ///
    /// Generic and unknown families fall through to the default font.
    pub fn resolve<'a>(
        &self,
        families: impl IntoIterator<Item = &'a str>,
        weight: u16,
    ) -> Option<Arc<Font<'static>>> {
        {
            let faces = match self.faces.read() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            for family in families {
                let key = family_key(family);
                if GENERIC_FAMILIES.contains(&key.as_str()) {
                    break;
                }
                if let Some(variants) = faces.get(&key) {
                    if let Some(font) = nearest_weight(variants, weight) {
                        return Some(font);
                    }
                }
            }
        }
        self.default_font()
    }

    /// Default font used when no registered family matches.
    pub fn default_font(&self) -> Option<Arc<Font<'static>>> {
        self.fallback
            .get_or_init(|| {
                let font = load_system_default(&self.fallback_dirs);
                if font.is_none() {
                    warn!("No default font found, text will not be drawn");
                }
                font.map(Arc::new)
            })
            .clone()
    }
}

fn family_key(family: &str) -> String {
    family.trim().to_lowercase()
}

/// Closest registered weight; ties prefer the heavier face.
fn nearest_weight(variants: &[Face], weight: u16) -> Option<Arc<Font<'static>>> {
    variants
        .iter()
        .min_by_key(|(w, _)| ((*w as i32 - weight as i32).abs(), std::cmp::Reverse(*w)))
        .map(|(_, font)| Arc::clone(font))
}

fn is_font_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref(),
        Some("ttf") | Some("otf")
    )
}

fn load_system_default(dirs: &[PathBuf]) -> Option<Font<'static>> {
    let mut candidates: Vec<PathBuf> = dirs
        .iter()
        .filter(|dir| dir.is_dir())
        .flat_map(|dir| {
            WalkDir::new(dir)
                .max_depth(4)
                .into_iter()
                .filter_map(|e| e.ok())
                .map(|e| e.into_path())
                .filter(|p| is_font_file(p))
        })
        .collect();

    candidates.sort_by_key(|path| {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let rank = PREFERRED_DEFAULTS
            .iter()
            .position(|preferred| *preferred == name)
            .unwrap_or(PREFERRED_DEFAULTS.len());
        (rank, path.clone())
    });

    for path in candidates {
        let Ok(data) = std::fs::read(&path) else {
            continue;
        };
        if let Some(font) = Font::try_from_vec(data) {
            debug!(path = %path.display(), "Using default font");
            return Some(font);
        }
    }
    None
}
