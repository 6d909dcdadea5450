//! Built-in app bodies that live inside the runtime: the image viewer, a Paint stand-in and the
//! generic placeholder for kinds without a real app yet.

use desktop_app_contract::AppMountContext;
use leptos::*;

use crate::catalog;

/// Mounts the image viewer.
pub(super) fn mount_viewer_app(context: AppMountContext) -> View {
    let name = context.params.name().unwrap_or("Image").to_string();
    match context.params.image() {
        Some(image) => view! {
            <figure class="app-shell app-viewer-shell">
                <img class="app-viewer-image" src=image.to_string() alt=name.clone() />
                <figcaption class="app-statusbar">{name}</figcaption>
            </figure>
        }
        .into_view(),
        None => view! {
            <div class="app-shell app-viewer-shell">
                <p class="app-viewer-empty">"No image to show."</p>
            </div>
        }
        .into_view(),
    }
}

/// Mounts the Paint stand-in.
pub(super) fn mount_paint_placeholder_app(context: AppMountContext) -> View {
    view! { <PaintPlaceholderApp context=context /> }.into_view()
}

/// Mounts the generic "not built yet" body.
pub(super) fn mount_placeholder_app(context: AppMountContext) -> View {
    let label = catalog::app_label(context.kind);
    view! {
        <div class="app-shell app-placeholder-shell">
            <p><strong>{label}</strong></p>
            <p>"This app is not available yet."</p>
        </div>
    }
    .into_view()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PaintPlaceholderState {
    brush_size: u8,
    color_hex: String,
    status: String,
}

impl Default for PaintPlaceholderState {
    fn default() -> Self {
        Self {
            brush_size: 6,
            color_hex: "#0b5fff".to_string(),
            status: "Canvas placeholder ready".to_string(),
        }
    }
}

/// Data URL of a single-stroke SVG drawn with the current brush.
fn stroke_data_url(state: &PaintPlaceholderState) -> String {
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='320' height='200'>\
         <rect width='320' height='200' fill='white'/>\
         <path d='M20 160 C 100 20, 220 20, 300 160' stroke='{}' stroke-width='{}' fill='none' stroke-linecap='round'/>\
         </svg>",
        state.color_hex, state.brush_size
    );
    format!("data:image/svg+xml;utf8,{}", svg.replace('#', "%23"))
}

#[component]
fn PaintPlaceholderApp(context: AppMountContext) -> impl IntoView {
    let host = context.host;
    let state = create_rw_signal(PaintPlaceholderState::default());
    let preview = context.params.image().map(str::to_string);

    let save = move |_: ev::MouseEvent| {
        let data_url = state.with_untracked(stroke_data_url);
        if host.save_image(data_url) {
            state.update(|s| s.status = "Drawing saved to the desktop".to_string());
        } else {
            logging::warn!("paint save was rejected");
            state.update(|s| s.status = "Save failed".to_string());
        }
    };

    view! {
        <div class="app-shell app-paint-shell">
            <div class="app-toolbar" role="group" aria-label="Paint controls">
                <label>
                    "Brush "
                    <input
                        class="app-field"
                        type="range"
                        min="1"
                        max="64"
                        prop:value=move || state.with(|s| s.brush_size.to_string())
                        on:input=move |ev| {
                            let value = event_target_value(&ev)
                                .parse::<u8>()
                                .unwrap_or(6)
                                .clamp(1, 64);
                            state.update(|s| s.brush_size = value);
                        }
                    />
                </label>
                <label>
                    "Color "
                    <input
                        class="app-field"
                        type="color"
                        prop:value=move || state.with(|s| s.color_hex.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| s.color_hex = value);
                        }
                    />
                </label>
                <button type="button" class="app-action" on:click=save>
                    "Save"
                </button>
            </div>

            <div class="app-paint-canvas">
                {match preview {
                    Some(image) => view! { <img src=image alt="Opened drawing" /> }.into_view(),
                    None => view! { <img src=move || state.with(stroke_data_url) alt="Brush preview" /> }
                        .into_view(),
                }}
            </div>

            <div class="app-statusbar">
                <span>{move || state.with(|s| format!("{}px | {}", s.brush_size, s.color_hex))}</span>
                <span>{move || state.with(|s| s.status.clone())}</span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn stroke_url_escapes_hex_colors() {
        let url = stroke_data_url(&PaintPlaceholderState::default());

        assert!(url.starts_with("data:image/svg+xml;utf8,<svg"));
        assert!(url.contains("stroke='%230b5fff'"));
        assert!(!url.contains('#'));
    }

    #[test]
    fn stroke_url_tracks_brush_size() {
        let state = PaintPlaceholderState {
            brush_size: 12,
            ..PaintPlaceholderState::default()
        };

        assert_eq!(stroke_data_url(&state).matches("stroke-width='12'").count(), 1);
    }
}
