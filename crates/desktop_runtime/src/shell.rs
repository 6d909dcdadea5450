//! Desktop shell routing: what a double-click opens, which context-menu items apply, and where
//! a dropped icon lands.

use desktop_app_contract::{AppKind, AppParams, FileId};

use crate::file_model::FileStore;
use crate::model::{FileEntry, FileKind, PointerPosition};

/// Distance from an icon's top-left corner to where it is usually grabbed.
pub const ICON_GRAB_OFFSET: i32 = 40;

/// App and params a double-click on `entry` opens. App shortcuts without a target open nothing.
pub fn open_request_for(entry: &FileEntry) -> Option<(AppKind, AppParams)> {
    match entry.kind {
        FileKind::Folder => Some((
            AppKind::Files,
            AppParams::Folder {
                id: entry.id.clone(),
                name: entry.name.clone(),
            },
        )),
        FileKind::App => entry.app_kind.map(|kind| {
            (
                kind,
                AppParams::Shortcut {
                    id: entry.id.clone(),
                    name: entry.name.clone(),
                },
            )
        }),
        FileKind::Image => Some((
            AppKind::Viewer,
            AppParams::image_file(
                entry.id.clone(),
                entry.name.clone(),
                entry.content.clone().unwrap_or_default(),
            ),
        )),
        FileKind::Text => Some((
            AppKind::Notepad,
            AppParams::text_file(
                entry.id.clone(),
                entry.name.clone(),
                entry.content.clone().unwrap_or_default(),
            ),
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMenuItem {
    NewFolder,
    Rename,
    Delete,
    ChangeWallpaper,
    OpenTerminal,
}

impl ContextMenuItem {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewFolder => "New Folder",
            Self::Rename => "Rename",
            Self::Delete => "Delete",
            Self::ChangeWallpaper => "Change Wallpaper",
            Self::OpenTerminal => "Open Terminal here",
        }
    }

    pub const fn is_destructive(self) -> bool {
        matches!(self, Self::Delete)
    }
}

/// Items for a right-click on `target` (`None` = empty desktop).
///
/// App shortcuts get no menu at all. A target that no longer exists is treated as empty desktop.
pub fn context_menu_items(files: &FileStore, target: Option<&FileId>) -> Option<Vec<ContextMenuItem>> {
    let entry = target.and_then(|id| files.get(id));
    let mut items = match entry {
        Some(entry) if entry.kind == FileKind::App => return None,
        Some(_) => vec![ContextMenuItem::Rename, ContextMenuItem::Delete],
        None => vec![ContextMenuItem::NewFolder],
    };
    items.extend([ContextMenuItem::ChangeWallpaper, ContextMenuItem::OpenTerminal]);
    Some(items)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Dropped onto a folder icon or into an open folder window.
    Folder(FileId),
    /// Dropped onto bare desktop; the point is already corrected for the grab offset.
    Desktop(PointerPosition),
}

/// Desktop point for an icon released at `pointer`, relative to the desktop's top-left corner.
pub fn desktop_drop_point(pointer: PointerPosition, desktop_origin: PointerPosition) -> PointerPosition {
    PointerPosition {
        x: pointer.x - desktop_origin.x - ICON_GRAB_OFFSET,
        y: pointer.y - desktop_origin.y - ICON_GRAB_OFFSET,
    }
}

/// Trimmed rename input, or `None` when nothing usable was typed.
pub fn rename_submission(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Glyph drawn for a desktop or folder-view icon.
pub fn icon_glyph(entry: &FileEntry) -> &'static str {
    match entry.kind {
        FileKind::Folder => "📁",
        FileKind::Image => "🖼️",
        FileKind::Text => "📝",
        FileKind::App => entry.app_kind.map(app_glyph).unwrap_or("❔"),
    }
}

pub fn app_glyph(kind: AppKind) -> &'static str {
    match kind {
        AppKind::Paint => "🎨",
        AppKind::Browser => "🌐",
        AppKind::Snake => "🐍",
        AppKind::Minesweeper => "💣",
        AppKind::Calculator => "🧮",
        AppKind::Terminal => "💻",
        AppKind::Notepad => "📝",
        AppKind::Music => "🎵",
        AppKind::Settings => "⚙️",
        AppKind::Files => "📁",
        AppKind::Viewer => "🖼️",
        AppKind::Particles => "✨",
        AppKind::Minecraft => "⛏️",
        AppKind::SolarSystem => "🪐",
        AppKind::Doom => "👹",
        AppKind::Pacman => "🟡",
        AppKind::Book => "📖",
        AppKind::RayTracing => "🔦",
        AppKind::CitySim => "🏙️",
        AppKind::CyberQuiz => "❓",
        AppKind::WebEditor => "🧑‍💻",
        AppKind::Blackjack => "🃏",
        AppKind::Tetris => "🧱",
        AppKind::Cyber2048 => "🔢",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::GridPosition;

    fn entry(id: &str, kind: FileKind) -> FileEntry {
        FileEntry {
            id: FileId::new(id),
            name: format!("{id} name"),
            kind,
            app_kind: (kind == FileKind::App).then_some(AppKind::Doom),
            content: Some(format!("{id} body")),
            parent_id: None,
            position: GridPosition::ORIGIN,
        }
    }

    #[test]
    fn double_click_routes_each_entry_kind() {
        let folder = entry("d1", FileKind::Folder);
        assert_eq!(
            open_request_for(&folder),
            Some((
                AppKind::Files,
                AppParams::Folder {
                    id: FileId::new("d1"),
                    name: "d1 name".to_string(),
                }
            ))
        );

        let shortcut = entry("app-doom", FileKind::App);
        assert_eq!(
            open_request_for(&shortcut).map(|(kind, _)| kind),
            Some(AppKind::Doom)
        );

        let image = entry("file-1", FileKind::Image);
        assert_eq!(
            open_request_for(&image),
            Some((
                AppKind::Viewer,
                AppParams::image_file(FileId::new("file-1"), "file-1 name", "file-1 body")
            ))
        );

        let text = entry("text-2", FileKind::Text);
        assert_eq!(
            open_request_for(&text),
            Some((
                AppKind::Notepad,
                AppParams::text_file(FileId::new("text-2"), "text-2 name", "text-2 body")
            ))
        );

        let mut broken = entry("app-x", FileKind::App);
        broken.app_kind = None;
        assert_eq!(open_request_for(&broken), None);
    }

    #[test]
    fn context_menu_items_depend_on_the_target() {
        let files = FileStore::new(vec![entry("d1", FileKind::Folder), entry("app-doom", FileKind::App)]);
        assert_eq!(
            context_menu_items(&files, None),
            Some(vec![
                ContextMenuItem::NewFolder,
                ContextMenuItem::ChangeWallpaper,
                ContextMenuItem::OpenTerminal,
            ])
        );
        assert_eq!(
            context_menu_items(&files, Some(&FileId::new("d1"))),
            Some(vec![
                ContextMenuItem::Rename,
                ContextMenuItem::Delete,
                ContextMenuItem::ChangeWallpaper,
                ContextMenuItem::OpenTerminal,
            ])
        );
        assert_eq!(context_menu_items(&files, Some(&FileId::new("app-doom"))), None);
    }

    #[test]
    fn drop_point_removes_the_grab_offset() {
        let point = desktop_drop_point(PointerPosition { x: 300, y: 250 }, PointerPosition { x: 0, y: 0 });
        assert_eq!(point, PointerPosition { x: 260, y: 210 });
    }

    #[test]
    fn rename_submission_trims_and_drops_blank_input() {
        assert_eq!(rename_submission("  Work "), Some("Work".to_string()));
        assert_eq!(rename_submission("   "), None);
    }
}
