use std::time::Duration;

use super::*;
use crate::session::{self, SessionAction, BOOT_LINE_INTERVAL_MS};

#[component]
pub(super) fn PoweredOffScreen() -> impl IntoView {
    let runtime = use_desktop_runtime();

    view! {
        <div class="session-screen powered-off">
            <button
                id="power-on-button"
                class="power-button"
                aria-label="Power on"
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    runtime.dispatch_session_action(SessionAction::PowerOn);
                }
            >
                "⏻"
            </button>
        </div>
    }
}

#[component]
pub(super) fn BootScreen() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let shown = create_memo(move |_| runtime.session.with(|session| session.boot_lines_shown));

    if let Ok(interval) = set_interval_with_handle(
        move || {
            runtime.dispatch_session_action(SessionAction::BootTick);
        },
        Duration::from_millis(u64::from(BOOT_LINE_INTERVAL_MS)),
    ) {
        on_cleanup(move || interval.clear());
    }

    view! {
        <div class="session-screen boot-screen" role="log" aria-live="polite">
            {move || {
                session::boot_messages()
                    .iter()
                    .take(shown.get())
                    .map(|line| view! { <p class="boot-line">{line.clone()}</p> })
                    .collect_view()
            }}
            <span class="boot-cursor" aria-hidden="true">"_"</span>
        </div>
    }
}

#[component]
pub(super) fn LoginScreen() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let config = catalog::session_config();
    let password = create_rw_signal(String::new());
    let login_error = create_memo(move |_| runtime.session.with(|session| session.login_error));

    request_animation_frame(|| {
        let _ = host::focus_element_by_id("login-password");
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let attempt = password.get_untracked();
        if !runtime.dispatch_session_action(SessionAction::SubmitPassword { password: attempt }) {
            password.set(String::new());
        }
    };

    view! {
        <div class="session-screen login-screen">
            <form class="login-card" class:shake=move || login_error.get() on:submit=submit>
                <img class="login-avatar" src=config.avatar_url.clone() alt="" />
                <h1 class="login-username">{config.username.clone()}</h1>
                <input
                    id="login-password"
                    class="login-password"
                    type="password"
                    placeholder="Password"
                    autocomplete="current-password"
                    aria-invalid=move || login_error.get().to_string()
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button type="submit" class="login-submit">
                    "Sign in"
                </button>
                <Show when=move || login_error.get() fallback=|| ()>
                    <p class="login-error" role="alert">
                        "Incorrect password"
                    </p>
                </Show>
            </form>
        </div>
    }
}
