//! Common test fixtures for card rendering tests.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::generators::solid_png;

/// Colors used by fixtures, chosen to differ from every layout default.
pub mod colors {
    pub const BACKGROUND: [u8; 4] = [10, 120, 30, 255];
    pub const RED: [u8; 4] = [255, 0, 0, 255];
    pub const BLUE: [u8; 4] = [0, 0, 255, 255];
    pub const YELLOW: [u8; 4] = [255, 255, 0, 255];
}

/// Size of the default background written by [`AssetRoot::with_background`].
pub const DEFAULT_BACKGROUND_SIZE: (u32, u32) = (1530, 383);

/// A throwaway installation root.
///
/// Mirrors the layout the service expects: `original.png` at the root and
/// font files under `fonts/`. Removed when dropped.
pub struct AssetRoot {
    dir: TempDir,
}

impl AssetRoot {
    /// Empty root: no background, no fonts.
    pub fn empty() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("card_assets_")
            .tempdir()
            .expect("Failed to create temporary asset root");
        std::fs::create_dir_all(dir.path().join("fonts")).expect("Failed to create fonts dir");
        Self { dir }
    }

    /// Root with a solid default background of [`DEFAULT_BACKGROUND_SIZE`].
    pub fn with_background() -> Self {
        let (w, h) = DEFAULT_BACKGROUND_SIZE;
        Self::with_background_sized(w, h, colors::BACKGROUND)
    }

    pub fn with_background_sized(width: u32, height: u32, color: [u8; 4]) -> Self {
        let root = Self::empty();
        root.write_file("original.png", &solid_png(width, height, color));
        root
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn background_path(&self) -> PathBuf {
        self.path().join("original.png")
    }

    pub fn font_dir(&self) -> PathBuf {
        self.path().join("fonts")
    }

    /// Write `bytes` to `relative` under the root and return the full path.
    pub fn write_file(&self, relative: &str, bytes: &[u8]) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create fixture dir");
        }
        std::fs::write(&path, bytes).expect("Failed to write fixture file");
        path
    }
}
