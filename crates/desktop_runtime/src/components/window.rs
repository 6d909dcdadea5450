use super::*;
use desktop_app_contract::{AppKind, AppMountContext, AppParams};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::{
    apps,
    geometry::{presented_rect, window_body_mounted, WindowGeometry},
    model::WindowKey,
};

use super::{
    folder_view::FolderView,
    wallpaper_picker::{ProfileSettings, WallpaperPicker},
};

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WindowFrame {
    z_index: u64,
    minimized: bool,
    maximized: bool,
    geometry: WindowGeometry,
}

#[component]
pub(super) fn DesktopWindow(window_key: WindowKey) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let dom_id = window_key.to_string();
    let key = store_value(window_key);

    let frame = create_memo(move |_| {
        key.with_value(|key| {
            state.with(|desktop| {
                let record = desktop.windows.get(key)?;
                Some(WindowFrame {
                    z_index: record.z_index,
                    minimized: record.is_minimized,
                    maximized: record.is_maximized,
                    geometry: desktop.presentation.geometry(key)?,
                })
            })
        })
    });
    let title = create_memo(move |_| {
        key.with_value(|key| {
            state.with(|desktop| {
                desktop
                    .windows
                    .get(key)
                    .map(|record| record.title.clone())
                    .unwrap_or_default()
            })
        })
    });
    let body_mounted = create_memo(move |_| {
        key.with_value(|key| {
            state.with(|desktop| desktop.windows.get(key).is_some_and(window_body_mounted))
        })
    });
    let is_frontmost = create_memo(move |_| {
        key.with_value(|key| {
            state.with(|desktop| {
                desktop
                    .windows
                    .frontmost()
                    .is_some_and(|record| &record.key == key)
            })
        })
    });

    let style = move || {
        let Some(frame) = frame.get() else {
            return String::from("display:none;");
        };
        let rect = presented_rect(frame.geometry, frame.maximized, runtime.viewport.get());
        let hidden = if frame.minimized { "display:none;" } else { "" };
        format!("{}z-index:{};{hidden}", rect.to_css(), frame.z_index)
    };
    let class = move || {
        let maximized = frame.get().is_some_and(|frame| frame.maximized);
        format!(
            "desktop-window{}{}",
            if is_frontmost.get() { " focused" } else { "" },
            if maximized { " maximized" } else { "" }
        )
    };

    let focus = move |_: web_sys::PointerEvent| {
        if !is_frontmost.get_untracked() {
            runtime.dispatch_action(DesktopAction::FocusWindow {
                key: key.get_value(),
            });
        }
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        if ev.pointer_type() != "mouse" && !ev.is_primary() {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginMove {
            key: key.get_value(),
            pointer: host::pointer_from_pointer_event(&ev),
        });
    };
    let toggle_maximize = move || {
        runtime.dispatch_action(DesktopAction::ToggleMaximize {
            key: key.get_value(),
        });
    };
    let swallow_pointer = move |ev: web_sys::PointerEvent| ev.stop_propagation();

    view! {
        <section
            id=dom_id
            class=class
            style=style
            tabindex="-1"
            role="dialog"
            aria-label=move || title.get()
            on:pointerdown=focus
            on:contextmenu=move |ev: web_sys::MouseEvent| ev.stop_propagation()
        >
            <header
                class="titlebar"
                on:pointerdown=begin_move
                on:dblclick=move |ev| {
                    stop_mouse_event(&ev);
                    toggle_maximize();
                }
            >
                <span class="titlebar-title">{move || title.get()}</span>
                <div class="titlebar-controls">
                    <button
                        aria-label="Minimize window"
                        on:pointerdown=swallow_pointer
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::ToggleMinimize {
                                key: key.get_value(),
                            });
                        }
                    >
                        "_"
                    </button>
                    <button
                        aria-label=move || {
                            if frame.get().is_some_and(|frame| frame.maximized) {
                                "Restore window"
                            } else {
                                "Maximize window"
                            }
                        }
                        on:pointerdown=swallow_pointer
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            toggle_maximize();
                        }
                    >
                        "□"
                    </button>
                    <button
                        class="titlebar-close"
                        aria-label="Close window"
                        on:pointerdown=swallow_pointer
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::CloseWindow {
                                key: key.get_value(),
                            });
                        }
                    >
                        "×"
                    </button>
                </div>
            </header>
            <div class="window-body">
                <Show when=move || body_mounted.get() fallback=|| ()>
                    <WindowBody window_key=key.get_value() />
                </Show>
            </div>
        </section>
    }
}

#[component]
fn WindowBody(window_key: WindowKey) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let mounted = runtime.state.with_untracked(|desktop| {
        desktop
            .windows
            .get(&window_key)
            .map(|record| (record.kind, record.params.clone()))
    });

    let contents = match mounted {
        Some((AppKind::Files, AppParams::Folder { id, .. })) => {
            view! { <FolderView folder_id=id /> }.into_view()
        }
        Some((AppKind::Settings, _)) => view! {
            <ProfileSettings />
            <WallpaperPicker />
        }
        .into_view(),
        Some((kind, params)) => apps::app_module(kind).mount(AppMountContext {
            kind,
            window_id: window_key.to_string(),
            params,
            host: runtime.app_host(),
        }),
        None => view! { <p>"Closed"</p> }.into_view(),
    };

    view! { <div class="window-body-content">{contents}</div> }
}
