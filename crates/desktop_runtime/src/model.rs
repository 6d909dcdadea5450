use std::fmt;

use desktop_app_contract::{AppKind, AppParams, FileId};
use serde::{Deserialize, Serialize};

use crate::file_model::FileStore;
use crate::geometry::PresentationState;
use crate::window_manager::WindowManager;

pub const TASKBAR_HEIGHT_PX: i32 = 48;
pub const GRID_CELL_WIDTH: i32 = 100;
pub const GRID_CELL_HEIGHT: i32 = 110;
pub const GRID_ORIGIN: i32 = 10;
/// First z-index handed out is `INITIAL_TOP_Z + 1`.
pub const INITIAL_TOP_Z: u64 = 10;
pub const DEFAULT_FOLDER_NAME: &str = "New Folder";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Folder,
    App,
    Image,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Top-left corner of a desktop grid cell, in desktop pixels.
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub const ORIGIN: Self = Self {
        x: GRID_ORIGIN,
        y: GRID_ORIGIN,
    };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell at `column`/`row` of the desktop grid.
    pub const fn cell(column: i32, row: i32) -> Self {
        Self {
            x: column * GRID_CELL_WIDTH + GRID_ORIGIN,
            y: row * GRID_CELL_HEIGHT + GRID_ORIGIN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Browser window size; the taskbar strip is part of it.
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Height available to windows and icons above the taskbar.
    pub const fn usable_height(self) -> i32 {
        self.height - TASKBAR_HEIGHT_PX
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1024, 768)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: FileId,
    pub name: String,
    pub kind: FileKind,
    pub app_kind: Option<AppKind>,
    /// Text body, or the data URL of an image.
    pub content: Option<String>,
    /// `None` places the entry on the desktop.
    pub parent_id: Option<FileId>,
    pub position: GridPosition,
}

impl FileEntry {
    pub fn is_folder(&self) -> bool {
        self.kind == FileKind::Folder
    }

    pub fn is_on_desktop(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Identity of a window. At most one window exists per key.
///
/// Document apps opened on a file get one window per file; every other kind is a singleton.
pub struct WindowKey {
    pub kind: AppKind,
    pub file: Option<FileId>,
}

impl WindowKey {
    pub fn derive(kind: AppKind, params: &AppParams) -> Self {
        let file = if kind.is_file_backed() {
            params.file_id().cloned()
        } else {
            None
        };
        Self { kind, file }
    }

    pub const fn singleton(kind: AppKind) -> Self {
        Self { kind, file: None }
    }

    /// Numeric seed for the cascade offset: leading digits of the last `-` segment, else 0.
    pub fn stagger_seed(&self) -> u64 {
        let rendered = self.to_string();
        let last = rendered.rsplit('-').next().unwrap_or_default();
        let digits: String = last.chars().take_while(char::is_ascii_digit).collect();
        digits.parse().unwrap_or(0)
    }
}

impl fmt::Display for WindowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "window-{}-{}", self.kind, file),
            None => write!(f, "window-{}", self.kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub key: WindowKey,
    pub kind: AppKind,
    pub title: String,
    pub is_open: bool,
    pub is_minimized: bool,
    pub is_maximized: bool,
    pub z_index: u64,
    pub params: AppParams,
    pub preferred_width: i32,
    pub preferred_height: i32,
}

impl WindowRecord {
    pub fn preferred_size(&self) -> (i32, i32) {
        (self.preferred_width, self.preferred_height)
    }

    /// Whether the window's params point at `file`.
    pub fn is_bound_to(&self, file: &FileId) -> bool {
        self.params.file_id() == Some(file)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Open context menu, anchored at desktop coordinates.
pub struct ContextMenuState {
    pub x: i32,
    pub y: i32,
    pub target: Option<FileId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesktopState {
    pub files: FileStore,
    pub windows: WindowManager,
    pub presentation: PresentationState,
    pub wallpaper_index: usize,
    pub context_menu: Option<ContextMenuState>,
    pub editing_file: Option<FileId>,
}

impl DesktopState {
    /// Desktop with the given files and nothing else open.
    pub fn with_files(files: FileStore) -> Self {
        Self {
            files,
            windows: WindowManager::default(),
            presentation: PresentationState::default(),
            wallpaper_index: 0,
            context_menu: None,
            editing_file: None,
        }
    }
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::with_files(FileStore::seeded())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn window_keys_render_as_dom_ids() {
        let notepad = WindowKey::derive(
            AppKind::Notepad,
            &AppParams::text_file(FileId::new("text-3"), "a.txt", ""),
        );
        assert_eq!(notepad.to_string(), "window-notepad-text-3");
        assert_eq!(WindowKey::singleton(AppKind::Tetris).to_string(), "window-tetris");
    }

    #[test]
    fn shortcut_ids_do_not_split_singleton_apps() {
        let key = WindowKey::derive(
            AppKind::Tetris,
            &AppParams::Shortcut {
                id: FileId::new("app-tetris"),
                name: "Matrix Tetris".to_string(),
            },
        );
        assert_eq!(key, WindowKey::singleton(AppKind::Tetris));
    }

    #[test]
    fn stagger_seed_reads_leading_digits_of_last_segment() {
        let folder = WindowKey {
            kind: AppKind::Files,
            file: Some(FileId::new("folder-17")),
        };
        assert_eq!(folder.stagger_seed(), 17);
        assert_eq!(WindowKey::singleton(AppKind::Cyber2048).stagger_seed(), 0);
        assert_eq!(WindowKey::singleton(AppKind::Notepad).stagger_seed(), 0);
    }

    #[test]
    fn grid_cells_are_offset_from_the_origin() {
        assert_eq!(GridPosition::cell(0, 0), GridPosition::ORIGIN);
        assert_eq!(GridPosition::cell(2, 1), GridPosition::new(210, 120));
        assert_eq!(Viewport::new(1280, 800).usable_height(), 752);
    }
}
