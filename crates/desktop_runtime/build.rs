use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const APP_KIND_TOKENS: [&str; 24] = [
    "paint",
    "browser",
    "snake",
    "minesweeper",
    "calculator",
    "terminal",
    "notepad",
    "music",
    "settings",
    "files",
    "viewer",
    "particles",
    "minecraft",
    "solarsystem",
    "doom",
    "pacman",
    "book",
    "raytracing",
    "citysim",
    "cyberquiz",
    "webeditor",
    "blackjack",
    "tetris",
    "cyber2048",
];

const FILE_KINDS: [&str; 4] = ["folder", "app", "image", "text"];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionConfig {
    username: String,
    password: String,
    avatar_url: String,
    boot_messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WallpaperEntry {
    id: String,
    url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppEntry {
    kind: String,
    label: String,
    width: i32,
    height: i32,
    show_in_launcher: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SeedFile {
    id: String,
    name: String,
    kind: String,
    #[serde(default)]
    app: Option<String>,
    x: i32,
    y: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DesktopCatalog {
    schema_version: u32,
    session: SessionConfig,
    wallpapers: Vec<WallpaperEntry>,
    apps: Vec<AppEntry>,
    seed_files: Vec<SeedFile>,
}

fn validate(catalog: &DesktopCatalog, path: &str) {
    if catalog.schema_version != 1 {
        panic!(
            "catalog schema mismatch in {path}: expected 1 found {}",
            catalog.schema_version
        );
    }
    if catalog.session.password.is_empty() || catalog.session.username.trim().is_empty() {
        panic!("{path}: session.username and session.password must be set");
    }
    if catalog.session.boot_messages.is_empty() {
        panic!("{path}: session.boot_messages must not be empty");
    }
    if catalog.wallpapers.is_empty() {
        panic!("{path}: at least one [[wallpapers]] entry is required");
    }

    let mut kinds = BTreeSet::new();
    for app in &catalog.apps {
        if !APP_KIND_TOKENS.contains(&app.kind.as_str()) {
            panic!("{path}: apps.kind `{}` is not a known app kind", app.kind);
        }
        if !kinds.insert(app.kind.as_str()) {
            panic!("{path}: apps.kind `{}` is listed twice", app.kind);
        }
        if app.width <= 0 || app.height <= 0 {
            panic!("{path}: apps `{}` needs a positive width and height", app.kind);
        }
    }
    for token in APP_KIND_TOKENS {
        if !kinds.contains(token) {
            panic!("{path}: app kind `{token}` has no [[apps]] entry");
        }
    }

    let mut ids = BTreeSet::new();
    for seed in &catalog.seed_files {
        if !ids.insert(seed.id.as_str()) {
            panic!("{path}: seed_files.id `{}` is listed twice", seed.id);
        }
        if !FILE_KINDS.contains(&seed.kind.as_str()) {
            panic!("{path}: seed_files `{}` has unknown kind `{}`", seed.id, seed.kind);
        }
        match (seed.kind.as_str(), seed.app.as_deref()) {
            ("app", Some(app)) if APP_KIND_TOKENS.contains(&app) => {}
            ("app", _) => panic!(
                "{path}: seed_files `{}` is an app shortcut without a known `app`",
                seed.id
            ),
            (_, Some(_)) => panic!(
                "{path}: seed_files `{}` sets `app` but is not an app shortcut",
                seed.id
            ),
            (_, None) => {}
        }
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("desktop.catalog.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let catalog: DesktopCatalog = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    validate(&catalog, &path.display().to_string());

    let json = serde_json::to_string_pretty(&catalog).expect("serialize desktop catalog");
    let generated = format!(
        "/// Build-time generated desktop catalog JSON.\n\
pub const DESKTOP_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("desktop_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
