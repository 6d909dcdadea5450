//! App registry: maps each [`AppKind`] to the module mounted in its window body.
//!
//! Folder windows and Settings are rendered by the shell itself (see `components::window`).

mod placeholders;

use desktop_app_contract::{AppKind, AppModule};
use desktop_app_notepad::NOTEPAD_MODULE;
use desktop_app_terminal::TERMINAL_MODULE;

const VIEWER_MODULE: AppModule = AppModule::new(placeholders::mount_viewer_app);
const PAINT_MODULE: AppModule = AppModule::new(placeholders::mount_paint_placeholder_app);
const PLACEHOLDER_MODULE: AppModule = AppModule::new(placeholders::mount_placeholder_app);

/// Module mounted for `kind`.
pub fn app_module(kind: AppKind) -> AppModule {
    match kind {
        AppKind::Notepad => NOTEPAD_MODULE,
        AppKind::Terminal => TERMINAL_MODULE,
        AppKind::Viewer => VIEWER_MODULE,
        AppKind::Paint => PAINT_MODULE,
        _ => PLACEHOLDER_MODULE,
    }
}
