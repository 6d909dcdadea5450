use super::*;
use crate::session::{profile_update, SessionAction};

/// Wallpaper gallery shown in the Settings window.
#[component]
pub(super) fn WallpaperPicker() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let active = create_memo(move |_| runtime.state.with(|desktop| desktop.wallpaper_index));

    view! {
        <div class="wallpaper-picker">
            <h2>"Wallpaper"</h2>
            <div class="wallpaper-picker-grid" role="radiogroup" aria-label="Wallpapers">
                {catalog::wallpapers()
                    .iter()
                    .enumerate()
                    .map(|(index, wallpaper)| {
                        view! {
                            <button
                                role="radio"
                                class="wallpaper-picker-item"
                                class:active=move || active.get() == index
                                aria-checked=move || (active.get() == index).to_string()
                                aria-label=wallpaper.id.clone()
                                style=format!("background-image:url('{}');", wallpaper.url)
                                on:click=move |ev| {
                                    stop_mouse_event(&ev);
                                    runtime.dispatch_action(DesktopAction::SetWallpaper { index });
                                }
                            ></button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// Username and avatar form shown above the wallpapers in Settings.
#[component]
pub(super) fn ProfileSettings() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let current = move || runtime.session.with_untracked(|session| session.user.clone());
    let username = create_rw_signal(current().map(|user| user.username).unwrap_or_default());
    let avatar_url = create_rw_signal(current().map(|user| user.avatar_url).unwrap_or_default());
    let saved = create_rw_signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let current_avatar = current().map(|user| user.avatar_url).unwrap_or_default();
        let Some(user) = profile_update(
            &username.get_untracked(),
            &avatar_url.get_untracked(),
            &current_avatar,
        ) else {
            logging::warn!("profile update ignored: blank username");
            saved.set(false);
            return;
        };
        username.set(user.username.clone());
        avatar_url.set(user.avatar_url.clone());
        saved.set(runtime.dispatch_session_action(SessionAction::UpdateUser(user)));
    };

    view! {
        <form class="profile-settings" on:submit=submit>
            <h2>"Profile"</h2>
            <img
                class="profile-settings-avatar"
                src=move || runtime.session.with(|s| s.user.as_ref().map(|u| u.avatar_url.clone()))
                alt=""
            />
            <label>
                "Username "
                <input
                    class="app-field"
                    type="text"
                    autocomplete="username"
                    prop:value=move || username.get()
                    on:input=move |ev| {
                        saved.set(false);
                        username.set(event_target_value(&ev));
                    }
                />
            </label>
            <label>
                "Avatar URL "
                <input
                    class="app-field"
                    type="url"
                    prop:value=move || avatar_url.get()
                    on:input=move |ev| {
                        saved.set(false);
                        avatar_url.set(event_target_value(&ev));
                    }
                />
            </label>
            <button type="submit" class="app-action">
                "Save profile"
            </button>
            <Show when=move || saved.get() fallback=|| ()>
                <span class="profile-settings-status" role="status">"Saved"</span>
            </Show>
        </form>
    }
}
