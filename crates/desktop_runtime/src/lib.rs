//! Desktop runtime: file model, window manager, session state machine, reducer and the Leptos
//! shell that renders them.

pub mod apps;
pub mod catalog;
pub mod components;
mod effect_executor;
pub mod file_model;
pub mod geometry;
pub mod host;
pub mod launcher;
pub mod model;
pub mod reducer;
mod runtime_context;
pub mod session;
pub mod shell;
pub mod window_manager;

pub use components::{
    use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell, SessionRoot,
};
pub use file_model::FileStore;
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use session::{reduce_session, SessionAction, SessionState, SystemStatus};
pub use window_manager::WindowManager;
