use std::time::Duration;

use desktop_app_contract::AppParams;

use super::*;
use crate::{
    launcher::{self, format_clock, format_date},
    model::WindowKey,
    session::{PowerAction, SessionAction},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TaskbarButton {
    key: WindowKey,
    title: String,
    minimized: bool,
    active: bool,
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let start_menu_open = create_rw_signal(false);
    let clock_now = create_rw_signal(host::clock_now());

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(host::clock_now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    let outside_click_listener = window_event_listener(ev::mousedown, move |_| {
        if start_menu_open.get_untracked() {
            start_menu_open.set(false);
        }
    });
    on_cleanup(move || outside_click_listener.remove());

    let buttons = create_memo(move |_| {
        state.with(|desktop| {
            let frontmost = desktop.windows.frontmost().map(|record| record.key.clone());
            desktop
                .windows
                .iter()
                .map(|record| TaskbarButton {
                    key: record.key.clone(),
                    title: record.title.clone(),
                    minimized: record.is_minimized,
                    active: frontmost.as_ref() == Some(&record.key),
                })
                .collect::<Vec<_>>()
        })
    });

    view! {
        <footer class="taskbar" role="toolbar" aria-label="Taskbar">
            <div class="taskbar-start-wrap" on:mousedown=move |ev| ev.stop_propagation()>
                <button
                    id="taskbar-start-button"
                    class="taskbar-start"
                    class:active=move || start_menu_open.get()
                    aria-haspopup="menu"
                    aria-expanded=move || start_menu_open.get().to_string()
                    on:click=move |ev| {
                        stop_mouse_event(&ev);
                        start_menu_open.update(|open| *open = !*open);
                    }
                >
                    "Start"
                </button>
                <Show when=move || start_menu_open.get() fallback=|| ()>
                    <StartMenu on_close=Callback::new(move |()| start_menu_open.set(false)) />
                </Show>
            </div>

            <div class="taskbar-windows" role="list">
                <For
                    each=move || buttons.get()
                    key=|button| button.clone()
                    let:button
                >
                    {
                        let key = store_value(button.key.clone());
                        view! {
                            <button
                                role="listitem"
                                class="taskbar-app"
                                class:active=button.active
                                class:minimized=button.minimized
                                title=button.title.clone()
                                on:click=move |ev| {
                                    stop_mouse_event(&ev);
                                    runtime.dispatch_action(DesktopAction::FocusWindow {
                                        key: key.get_value(),
                                    });
                                }
                            >
                                <span class="taskbar-app-glyph" aria-hidden="true">
                                    {shell::app_glyph(button.key.kind)}
                                </span>
                                <span class="taskbar-app-label">{button.title.clone()}</span>
                            </button>
                        }
                    }
                </For>
            </div>

            <div class="taskbar-tray">
                <button
                    class="taskbar-tray-button"
                    aria-label="Next wallpaper"
                    title="Next wallpaper"
                    on:click=move |ev| {
                        stop_mouse_event(&ev);
                        runtime.dispatch_action(DesktopAction::CycleWallpaper);
                    }
                >
                    "🖼️"
                </button>
                <div class="taskbar-clock" aria-live="off">
                    <span class="taskbar-clock-time">{move || format_clock(clock_now.get())}</span>
                    <span class="taskbar-clock-date">{move || format_date(clock_now.get())}</span>
                </div>
            </div>
        </footer>
    }
}

#[component]
fn StartMenu(on_close: Callback<()>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let query = create_rw_signal(String::new());
    let entries = store_value(launcher::launcher_entries());
    let visible = create_memo(move |_| {
        let query = query.get();
        entries.with_value(|entries| launcher::filter_launcher(entries, &query))
    });
    let user = create_memo(move |_| runtime.session.with(|session| session.user.clone()));

    let launch = move |kind| {
        on_close.call(());
        runtime.dispatch_action(DesktopAction::OpenApp {
            kind,
            params: AppParams::Empty,
            viewport: runtime.viewport(),
        });
    };
    let power = move |action| {
        on_close.call(());
        runtime.dispatch_session_action(SessionAction::Power(action));
    };

    request_animation_frame(|| {
        let _ = host::focus_element_by_id("desktop-launcher-search");
    });

    view! {
        <div id="desktop-launcher-menu" class="start-menu" role="menu" aria-label="Start menu">
            <div class="start-menu-user">
                {move || {
                    user.get()
                        .map(|user| {
                            view! {
                                <img class="start-menu-avatar" src=user.avatar_url alt="" />
                                <span class="start-menu-username">{user.username}</span>
                            }
                        })
                }}
            </div>
            <input
                id="desktop-launcher-search"
                class="start-menu-search"
                type="search"
                placeholder="Search apps"
                prop:value=move || query.get()
                on:input=move |ev| query.set(event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                    "Enter" => {
                        ev.prevent_default();
                        if let Some(first) = visible.get_untracked().first() {
                            launch(first.kind);
                        }
                    }
                    "Escape" => {
                        ev.prevent_default();
                        on_close.call(());
                    }
                    _ => {}
                }
            />
            <ul class="start-menu-apps">
                <For each=move || visible.get() key=|entry| entry.kind let:entry>
                    <li>
                        <button
                            role="menuitem"
                            class="start-menu-item"
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                launch(entry.kind);
                            }
                        >
                            <span aria-hidden="true">{shell::app_glyph(entry.kind)}</span>
                            <span>{entry.label.clone()}</span>
                        </button>
                    </li>
                </For>
            </ul>
            <Show when=move || visible.get().is_empty() fallback=|| ()>
                <p class="start-menu-empty">"No apps found"</p>
            </Show>
            <div class="start-menu-power">
                <button
                    role="menuitem"
                    class="start-menu-item"
                    on:click=move |ev| {
                        stop_mouse_event(&ev);
                        power(PowerAction::Restart);
                    }
                >
                    "Restart"
                </button>
                <button
                    role="menuitem"
                    class="start-menu-item destructive"
                    on:click=move |ev| {
                        stop_mouse_event(&ev);
                        power(PowerAction::Shutdown);
                    }
                >
                    "Shut down"
                </button>
            </div>
        </div>
    }
}
