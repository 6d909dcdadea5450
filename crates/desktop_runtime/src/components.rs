//! Desktop shell UI composition and interaction surfaces.

mod desktop_icons;
mod folder_view;
mod menus;
mod session_screens;
mod taskbar;
mod wallpaper_picker;
mod window;

use desktop_app_contract::FileId;
use leptos::*;

use self::{
    desktop_icons::DesktopIcon,
    menus::DesktopContextMenu,
    session_screens::{BootScreen, LoginScreen, PoweredOffScreen},
    taskbar::Taskbar,
    window::DesktopWindow,
};

use crate::{
    catalog, host,
    model::PointerPosition,
    reducer::DesktopAction,
    session::SystemStatus,
    shell::{self, DropTarget},
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

/// Drag payload format carrying a dragged file id.
const DRAG_PAYLOAD_FORMAT: &str = "text/plain";

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn begin_file_drag(ev: &web_sys::DragEvent, file_id: &FileId) {
    if let Some(transfer) = ev.data_transfer() {
        if transfer
            .set_data(DRAG_PAYLOAD_FORMAT, file_id.as_str())
            .is_err()
        {
            logging::warn!("could not attach drag payload for `{file_id}`");
        }
        transfer.set_effect_allowed("move");
    }
}

fn dragged_file(ev: &web_sys::DragEvent) -> Option<FileId> {
    ev.data_transfer()
        .and_then(|transfer| transfer.get_data(DRAG_PAYLOAD_FORMAT).ok())
        .filter(|raw| !raw.is_empty())
        .map(FileId::new)
}

/// Accepts a drop into `folder`, keeping the event away from the desktop behind it.
fn drop_into_folder(runtime: DesktopRuntimeContext, ev: &web_sys::DragEvent, folder: FileId) {
    ev.prevent_default();
    ev.stop_propagation();
    if let Some(file_id) = dragged_file(ev) {
        runtime.dispatch_action(DesktopAction::DropFile {
            file_id,
            target: DropTarget::Folder(folder),
        });
    }
}

fn wallpaper_style(index: usize) -> String {
    catalog::wallpapers()
        .get(index)
        .map(|wallpaper| format!("background-image:url('{}');", wallpaper.url))
        .unwrap_or_default()
}

#[component]
/// Switches between the power-off, boot, login and desktop screens.
pub fn SessionRoot() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let status = create_memo(move |_| runtime.session.get().status);

    move || match status.get() {
        SystemStatus::Off => view! { <PoweredOffScreen /> }.into_view(),
        SystemStatus::Booting => view! { <BootScreen /> }.into_view(),
        SystemStatus::Login => view! { <LoginScreen /> }.into_view(),
        SystemStatus::Desktop => view! { <DesktopShell /> }.into_view(),
    }
}

#[component]
/// Renders the desktop surface, open windows and taskbar.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let desktop_files = create_memo(move |_| {
        state.with(|desktop| {
            desktop
                .files
                .desktop_entries()
                .map(|entry| entry.id.clone())
                .collect::<Vec<_>>()
        })
    });
    let window_keys = create_memo(move |_| {
        state.with(|desktop| {
            desktop
                .windows
                .iter()
                .map(|window| window.key.clone())
                .collect::<Vec<_>>()
        })
    });

    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() || ev.key() != "Escape" {
            return;
        }
        if state.with_untracked(|desktop| desktop.context_menu.is_some()) {
            ev.prevent_default();
            runtime.dispatch_action(DesktopAction::DismissOverlays);
        }
    });
    on_cleanup(move || escape_listener.remove());

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        if state.with_untracked(|desktop| desktop.presentation.dragging().is_some()) {
            runtime.dispatch_action(DesktopAction::UpdateMove {
                pointer: host::pointer_from_pointer_event(&ev),
                viewport: runtime.viewport(),
            });
        }
    };
    let on_pointer_end = move |_| {
        if state.with_untracked(|desktop| desktop.presentation.dragging().is_some()) {
            runtime.dispatch_action(DesktopAction::EndMove);
        }
    };

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            tabindex="-1"
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
        >
            <div
                class="desktop-surface"
                style=move || wallpaper_style(state.with(|desktop| desktop.wallpaper_index))
                on:click=move |_| {
                    let has_overlay = state.with_untracked(|desktop| {
                        desktop.context_menu.is_some() || desktop.editing_file.is_some()
                    });
                    if has_overlay {
                        runtime.dispatch_action(DesktopAction::DismissOverlays);
                    }
                }
                on:contextmenu=move |ev| {
                    stop_mouse_event(&ev);
                    let pointer = host::pointer_from_mouse_event(&ev);
                    runtime.dispatch_action(DesktopAction::OpenContextMenu {
                        x: pointer.x,
                        y: pointer.y,
                        target: None,
                    });
                }
                on:dragover=move |ev: web_sys::DragEvent| ev.prevent_default()
                on:drop=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    let Some(file_id) = dragged_file(&ev) else {
                        return;
                    };
                    let point = shell::desktop_drop_point(
                        PointerPosition {
                            x: ev.client_x(),
                            y: ev.client_y(),
                        },
                        PointerPosition { x: 0, y: 0 },
                    );
                    runtime.dispatch_action(DesktopAction::DropFile {
                        file_id,
                        target: DropTarget::Desktop(point),
                    });
                }
            >
                <For each=move || desktop_files.get() key=|file_id| file_id.clone() let:file_id>
                    <DesktopIcon file_id=file_id />
                </For>
            </div>

            <div class="desktop-window-layer">
                <For each=move || window_keys.get() key=|key| key.clone() let:window_key>
                    <DesktopWindow window_key=window_key />
                </For>
            </div>

            // After the window layer so menus opened from folder windows paint on top.
            <DesktopContextMenu />

            <Taskbar />
        </div>
    }
}
