//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use desktop_app_contract::{AppCommand, AppKind, AppParams, FileId};
use thiserror::Error;

use crate::catalog;
use crate::file_model::SaveTextOutcome;
use crate::model::{ContextMenuState, DesktopState, PointerPosition, Viewport, WindowKey};
use crate::shell::{self, ContextMenuItem, DropTarget};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open (or revive) the window for `kind`.
    OpenApp {
        /// App to open.
        kind: AppKind,
        /// Launch params; must be accepted by `kind`.
        params: AppParams,
        /// Current browser viewport, used for first placement.
        viewport: Viewport,
    },
    /// Open whatever a double-click on `file_id` resolves to.
    OpenEntry {
        /// Desktop or folder entry.
        file_id: FileId,
        /// Current browser viewport.
        viewport: Viewport,
    },
    /// Close a window and drop its geometry.
    CloseWindow {
        /// Window to close.
        key: WindowKey,
    },
    /// Raise a window to the top, restoring it if minimized.
    FocusWindow {
        /// Window to focus.
        key: WindowKey,
    },
    /// Flip a window's minimized flag.
    ToggleMinimize {
        /// Window to toggle.
        key: WindowKey,
    },
    /// Flip a window's maximized flag.
    ToggleMaximize {
        /// Window to toggle.
        key: WindowKey,
    },
    /// Title-bar press: focus the window and start dragging it unless maximized.
    BeginMove {
        /// Window being dragged.
        key: WindowKey,
        /// Pointer position in desktop coordinates.
        pointer: PointerPosition,
    },
    /// Pointer moved while a drag may be active.
    UpdateMove {
        /// Pointer position in desktop coordinates.
        pointer: PointerPosition,
        /// Current browser viewport.
        viewport: Viewport,
    },
    /// Pointer released.
    EndMove,
    /// Right-click on the desktop or an icon.
    OpenContextMenu {
        /// Anchor x in desktop coordinates.
        x: i32,
        /// Anchor y in desktop coordinates.
        y: i32,
        /// Icon under the pointer, if any.
        target: Option<FileId>,
    },
    /// Run an item of the open context menu, closing it.
    ContextMenuCommand {
        /// Chosen item.
        item: ContextMenuItem,
        /// Current browser viewport.
        viewport: Viewport,
    },
    /// Close the context menu and cancel any inline rename.
    DismissOverlays,
    /// Create a desktop folder.
    CreateFolder {
        /// Folder name; defaults to `New Folder`.
        name: Option<String>,
        /// Preferred spot in desktop coordinates.
        at: Option<PointerPosition>,
        /// Current browser viewport.
        viewport: Viewport,
    },
    /// Start inline rename of an icon.
    BeginRename {
        /// Entry to rename.
        file_id: FileId,
    },
    /// Commit an inline rename.
    RenameFile {
        /// Entry to rename.
        file_id: FileId,
        /// Raw input text.
        name: String,
    },
    /// Abandon an inline rename.
    CancelRename,
    /// Delete an entry and close its windows.
    DeleteFile {
        /// Entry to delete.
        file_id: FileId,
        /// Current browser viewport, for re-placing orphaned children.
        viewport: Viewport,
    },
    /// Open the text document with this name, or an unsaved Notepad named after it.
    OpenDocumentByName {
        /// Name to match (case-insensitive).
        name: String,
        /// Current browser viewport.
        viewport: Viewport,
    },
    /// Delete the desktop-root entry with this name (case-insensitive).
    DeleteFileByName {
        /// Name to match.
        name: String,
        /// Current browser viewport.
        viewport: Viewport,
    },
    /// Icon drag-and-drop release.
    DropFile {
        /// Dragged entry.
        file_id: FileId,
        /// Where it was released.
        target: DropTarget,
    },
    /// Store a drawing on the desktop.
    SaveImage {
        /// PNG data URL.
        data_url: String,
        /// Clock label used in the file name.
        label: String,
    },
    /// Create or update a text document.
    SaveText {
        /// Existing document, or `None` to create one.
        id: Option<FileId>,
        /// Document name.
        title: String,
        /// Document body.
        content: String,
    },
    /// Select a wallpaper by catalog index.
    SetWallpaper {
        /// Index into the wallpaper catalog.
        index: usize,
    },
    /// Advance to the next wallpaper, wrapping around.
    CycleWallpaper,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by the reducer for the UI layer.
pub enum RuntimeEffect {
    /// Move focus into the inline rename input of an icon.
    FocusRenameInput(FileId),
    /// Move keyboard focus into a raised window.
    FocusWindowInput(WindowKey),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions. A failed action leaves the state untouched.
pub enum ReducerError {
    #[error("window `{0}` not found")]
    WindowNotFound(WindowKey),
    #[error("file `{0}` not found")]
    FileNotFound(FileId),
    #[error("`{0}` cannot be opened")]
    NotLaunchable(FileId),
    #[error("{kind} cannot be launched with {params} params")]
    ParamsMismatch {
        kind: AppKind,
        params: &'static str,
    },
    #[error("file names cannot be blank")]
    BlankName,
    #[error("`{file}` cannot be moved into `{folder}`")]
    InvalidDrop { file: FileId, folder: FileId },
    #[error("no desktop entry named `{0}`")]
    NoEntryNamed(String),
    #[error("wallpaper {0} does not exist")]
    UnknownWallpaper(usize),
}

/// Translates a hosted-app command into a reducer action.
pub fn action_for_app_command(
    command: AppCommand,
    viewport: Viewport,
    clock_label: String,
) -> DesktopAction {
    match command {
        AppCommand::SaveText { id, title, content } => DesktopAction::SaveText { id, title, content },
        AppCommand::SaveImage { data_url } => DesktopAction::SaveImage {
            data_url,
            label: clock_label,
        },
        AppCommand::CreateFolder { name } => DesktopAction::CreateFolder {
            name,
            at: None,
            viewport,
        },
        AppCommand::DeleteByName { name } => DesktopAction::DeleteFileByName { name, viewport },
        AppCommand::OpenDocumentByName { name } => {
            DesktopAction::OpenDocumentByName { name, viewport }
        }
        AppCommand::OpenApp { kind, params } => DesktopAction::OpenApp {
            kind,
            params,
            viewport,
        },
    }
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// # Errors
///
/// Returns a [`ReducerError`] when the action references a missing window or file, or would
/// break a file-tree or params invariant. `state` may be partially modified in that case, so
/// callers reduce a copy and only commit it on success.
pub fn reduce_desktop(
    state: &mut DesktopState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenApp {
            kind,
            params,
            viewport,
        } => {
            if !kind.accepts(&params) {
                return Err(ReducerError::ParamsMismatch {
                    kind,
                    params: params.shape(),
                });
            }
            let preferred = catalog::preferred_size(kind);
            let outcome = state.windows.open(kind, params, preferred);
            let preferred = state
                .windows
                .get(&outcome.key)
                .map(|record| record.preferred_size())
                .unwrap_or(preferred);
            state.presentation.ensure(&outcome.key, preferred, viewport);
            state.context_menu = None;
            effects.push(RuntimeEffect::FocusWindowInput(outcome.key));
        }
        DesktopAction::OpenEntry { file_id, viewport } => {
            let entry = state
                .files
                .get(&file_id)
                .ok_or_else(|| ReducerError::FileNotFound(file_id.clone()))?;
            let (kind, params) =
                shell::open_request_for(entry).ok_or(ReducerError::NotLaunchable(file_id))?;
            return reduce_desktop(
                state,
                DesktopAction::OpenApp {
                    kind,
                    params,
                    viewport,
                },
            );
        }
        DesktopAction::CloseWindow { key } => {
            state
                .windows
                .close(&key)
                .ok_or_else(|| ReducerError::WindowNotFound(key.clone()))?;
            state.presentation.forget(&key);
        }
        DesktopAction::FocusWindow { key } => {
            if !state.windows.focus(&key) {
                return Err(ReducerError::WindowNotFound(key));
            }
            effects.push(RuntimeEffect::FocusWindowInput(key));
        }
        DesktopAction::ToggleMinimize { key } => {
            if !state.windows.toggle_minimize(&key) {
                return Err(ReducerError::WindowNotFound(key));
            }
            if state.presentation.dragging().is_some_and(|drag| drag.key == key) {
                state.presentation.end_move();
            }
        }
        DesktopAction::ToggleMaximize { key } => {
            if !state.windows.toggle_maximize(&key) {
                return Err(ReducerError::WindowNotFound(key));
            }
            if state.presentation.dragging().is_some_and(|drag| drag.key == key) {
                state.presentation.end_move();
            }
        }
        DesktopAction::BeginMove { key, pointer } => {
            if !state.windows.focus(&key) {
                return Err(ReducerError::WindowNotFound(key));
            }
            let maximized = state
                .windows
                .get(&key)
                .is_some_and(|record| record.is_maximized);
            state.presentation.begin_move(&key, pointer, maximized);
        }
        DesktopAction::UpdateMove { pointer, viewport } => {
            state.presentation.update_move(pointer, viewport);
        }
        DesktopAction::EndMove => {
            state.presentation.end_move();
        }
        DesktopAction::OpenContextMenu { x, y, target } => {
            state.editing_file = None;
            state.context_menu = shell::context_menu_items(&state.files, target.as_ref())
                .map(|_| ContextMenuState { x, y, target });
        }
        DesktopAction::ContextMenuCommand { item, viewport } => {
            let menu = state.context_menu.take();
            let anchor = menu.as_ref().map(|menu| PointerPosition {
                x: menu.x,
                y: menu.y,
            });
            let target = menu.and_then(|menu| menu.target);
            let follow_up = match (item, target) {
                (ContextMenuItem::NewFolder, _) => DesktopAction::CreateFolder {
                    name: None,
                    at: anchor,
                    viewport,
                },
                (ContextMenuItem::Rename, Some(file_id)) => DesktopAction::BeginRename { file_id },
                (ContextMenuItem::Delete, Some(file_id)) => {
                    DesktopAction::DeleteFile { file_id, viewport }
                }
                (ContextMenuItem::Rename | ContextMenuItem::Delete, None) => return Ok(effects),
                (ContextMenuItem::ChangeWallpaper, _) => DesktopAction::OpenApp {
                    kind: AppKind::Settings,
                    params: AppParams::Empty,
                    viewport,
                },
                (ContextMenuItem::OpenTerminal, _) => DesktopAction::OpenApp {
                    kind: AppKind::Terminal,
                    params: AppParams::Empty,
                    viewport,
                },
            };
            return reduce_desktop(state, follow_up);
        }
        DesktopAction::DismissOverlays => {
            state.context_menu = None;
            state.editing_file = None;
        }
        DesktopAction::CreateFolder { name, at, viewport } => {
            state.files.create_folder(name.as_deref(), at, viewport);
            state.context_menu = None;
        }
        DesktopAction::BeginRename { file_id } => {
            if !state.files.contains(&file_id) {
                return Err(ReducerError::FileNotFound(file_id));
            }
            state.context_menu = None;
            state.editing_file = Some(file_id.clone());
            effects.push(RuntimeEffect::FocusRenameInput(file_id));
        }
        DesktopAction::RenameFile { file_id, name } => {
            let name = shell::rename_submission(&name).ok_or(ReducerError::BlankName)?;
            if !state.files.rename(&file_id, &name) {
                return Err(ReducerError::FileNotFound(file_id));
            }
            state.windows.sync_file_name(&file_id, &name);
            if state.editing_file.as_ref() == Some(&file_id) {
                state.editing_file = None;
            }
        }
        DesktopAction::CancelRename => {
            state.editing_file = None;
        }
        DesktopAction::DeleteFile { file_id, viewport } => {
            state
                .files
                .remove(&file_id, viewport)
                .ok_or_else(|| ReducerError::FileNotFound(file_id.clone()))?;
            for key in state.windows.close_bound_to(&file_id) {
                state.presentation.forget(&key);
            }
            state.context_menu = None;
            if state.editing_file.as_ref() == Some(&file_id) {
                state.editing_file = None;
            }
        }
        DesktopAction::OpenDocumentByName { name, viewport } => {
            let follow_up = match state.files.find_text_entry_by_name(&name) {
                Some(entry) => DesktopAction::OpenEntry {
                    file_id: entry.id.clone(),
                    viewport,
                },
                None => DesktopAction::OpenApp {
                    kind: AppKind::Notepad,
                    params: AppParams::Text {
                        id: None,
                        name: Some(name),
                        content: None,
                    },
                    viewport,
                },
            };
            return reduce_desktop(state, follow_up);
        }
        DesktopAction::DeleteFileByName { name, viewport } => {
            let file_id = state
                .files
                .find_desktop_entry_by_name(&name)
                .map(|entry| entry.id.clone())
                .ok_or(ReducerError::NoEntryNamed(name))?;
            return reduce_desktop(state, DesktopAction::DeleteFile { file_id, viewport });
        }
        DesktopAction::DropFile { file_id, target } => {
            if !state.files.contains(&file_id) {
                return Err(ReducerError::FileNotFound(file_id));
            }
            match target {
                DropTarget::Folder(folder) if folder == file_id => {}
                DropTarget::Folder(folder) => {
                    if !state.files.can_move_into(&file_id, &folder) {
                        return Err(ReducerError::InvalidDrop {
                            file: file_id,
                            folder,
                        });
                    }
                    state.files.move_into_folder(&file_id, &folder);
                }
                DropTarget::Desktop(point) => {
                    state.files.move_to_desktop(&file_id, point);
                }
            }
        }
        DesktopAction::SaveImage { data_url, label } => {
            state.files.save_image(data_url, &label);
        }
        DesktopAction::SaveText { id, title, content } => {
            match state.files.save_text(id.as_ref(), &title, &content) {
                SaveTextOutcome::Created(_) => {}
                SaveTextOutcome::Updated(id) => {
                    state.windows.sync_file_text(&id, &title, &content);
                }
                SaveTextOutcome::Missing(id) => return Err(ReducerError::FileNotFound(id)),
            }
        }
        DesktopAction::SetWallpaper { index } => {
            if index >= catalog::wallpapers().len() {
                return Err(ReducerError::UnknownWallpaper(index));
            }
            state.wallpaper_index = index;
        }
        DesktopAction::CycleWallpaper => {
            let count = catalog::wallpapers().len().max(1);
            state.wallpaper_index = (state.wallpaper_index + 1) % count;
        }
    }

    Ok(effects)
}
