//! Desktop catalog generated from `desktop.catalog.toml` at build time.

use std::sync::OnceLock;

use desktop_app_contract::{AppKind, FileId};
use serde::Deserialize;

use crate::model::FileKind;

include!(concat!(env!("OUT_DIR"), "/desktop_catalog_generated.rs"));

/// Window size used when an app kind is missing from the catalog.
pub const DEFAULT_WINDOW_SIZE: (i32, i32) = (800, 550);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Per-kind defaults for windows and the launcher.
pub struct AppCatalogEntry {
    /// App kind the entry describes.
    pub kind: AppKind,
    /// Launcher label.
    pub label: String,
    /// Preferred window width in pixels.
    pub width: i32,
    /// Preferred window height in pixels.
    pub height: i32,
    /// Whether the app is listed in the start menu.
    pub show_in_launcher: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Selectable desktop background.
pub struct WallpaperEntry {
    /// Stable wallpaper id.
    pub id: String,
    /// Image URL.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Desktop entry present at startup.
pub struct SeedFile {
    pub id: FileId,
    pub name: String,
    pub kind: FileKind,
    #[serde(default)]
    pub app: Option<AppKind>,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Login account and boot log.
pub struct SessionConfig {
    pub username: String,
    pub password: String,
    pub avatar_url: String,
    pub boot_messages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Whole catalog as validated by the build script.
pub struct DesktopCatalog {
    pub schema_version: u32,
    pub session: SessionConfig,
    pub wallpapers: Vec<WallpaperEntry>,
    pub apps: Vec<AppCatalogEntry>,
    pub seed_files: Vec<SeedFile>,
}

/// Returns the parsed catalog.
pub fn catalog() -> &'static DesktopCatalog {
    static CATALOG: OnceLock<DesktopCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        serde_json::from_str(DESKTOP_CATALOG_JSON).expect("generated desktop catalog should parse")
    })
}

/// Catalog entry for `kind`, if any.
pub fn app_entry(kind: AppKind) -> Option<&'static AppCatalogEntry> {
    catalog().apps.iter().find(|entry| entry.kind == kind)
}

/// Preferred `(width, height)` for a new window of `kind`.
pub fn preferred_size(kind: AppKind) -> (i32, i32) {
    app_entry(kind)
        .map(|entry| (entry.width, entry.height))
        .unwrap_or(DEFAULT_WINDOW_SIZE)
}

/// Human label for `kind`, falling back to the capitalized token.
pub fn app_label(kind: AppKind) -> String {
    app_entry(kind)
        .map(|entry| entry.label.clone())
        .unwrap_or_else(|| kind.fallback_title())
}

pub fn wallpapers() -> &'static [WallpaperEntry] {
    &catalog().wallpapers
}

pub fn session_config() -> &'static SessionConfig {
    &catalog().session
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn every_app_kind_has_catalog_defaults() {
        for kind in AppKind::ALL {
            assert!(app_entry(kind).is_some(), "missing catalog entry for {kind}");
        }
    }

    #[test]
    fn preferred_sizes_follow_the_catalog() {
        assert_eq!(preferred_size(AppKind::WebEditor), (1100, 700));
        assert_eq!(preferred_size(AppKind::Calculator), (340, 550));
        assert_eq!(preferred_size(AppKind::Terminal), (700, 450));
        assert_eq!(preferred_size(AppKind::Notepad), DEFAULT_WINDOW_SIZE);
        assert_eq!(preferred_size(AppKind::Viewer), (900, 650));
    }

    #[test]
    fn seeds_are_app_shortcuts_on_the_desktop() {
        let seeds = &catalog().seed_files;
        assert_eq!(seeds.len(), 8);
        assert!(seeds
            .iter()
            .all(|seed| seed.kind == FileKind::App && seed.app.is_some()));
        assert_eq!(seeds[0].id, FileId::new("app-webeditor"));
        assert_eq!((seeds[7].x, seeds[7].y), (110, 340));
    }

    #[test]
    fn session_and_wallpapers_are_present() {
        assert_eq!(session_config().username, "mario");
        assert_eq!(session_config().boot_messages.len(), 25);
        assert_eq!(wallpapers().len(), 3);
        assert_eq!(app_label(AppKind::Notepad), "Text Editor");
    }
}
