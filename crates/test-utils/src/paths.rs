//! Locating fonts for text tests.

use std::path::PathBuf;
use walkdir::WalkDir;

/// Font directories searched by [`find_system_font`].
const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/System/Library/Fonts",
    "/Library/Fonts",
];

/// Finds a TrueType font usable in tests.
///
/// Checks the `TEST_FONT` environment variable first, then prefers
/// `DejaVuSans.ttf` and finally any `.ttf` in the usual font directories.
pub fn find_system_font() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("TEST_FONT") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut fonts: Vec<PathBuf> = FONT_DIRS
        .iter()
        .flat_map(|dir| WalkDir::new(dir).max_depth(4).into_iter().filter_map(|e| e.ok()))
        .map(|e| e.into_path())
        .filter(|p| p.extension().map(|e| e == "ttf").unwrap_or(false))
        .collect();
    fonts.sort();

    fonts
        .iter()
        .find(|p| p.file_name().map(|n| n == "DejaVuSans.ttf").unwrap_or(false))
        .or_else(|| fonts.first())
        .cloned()
}
