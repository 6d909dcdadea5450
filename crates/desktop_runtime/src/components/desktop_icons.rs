use super::*;

use crate::model::FileKind;

#[component]
pub(super) fn DesktopIcon(file_id: FileId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let id = store_value(file_id);

    let entry = create_memo(move |_| {
        id.with_value(|id| state.with(|desktop| desktop.files.get(id).cloned()))
    });
    let editing = create_memo(move |_| {
        id.with_value(|id| state.with(|desktop| desktop.editing_file.as_ref() == Some(id)))
    });
    let draft = create_rw_signal(String::new());
    create_effect(move |_| {
        if editing.get() {
            draft.set(entry.get_untracked().map(|entry| entry.name).unwrap_or_default());
        }
    });

    let commit_rename = move || {
        if !editing.get_untracked() {
            return;
        }
        match shell::rename_submission(&draft.get_untracked()) {
            Some(name) => {
                runtime.dispatch_action(DesktopAction::RenameFile {
                    file_id: id.get_value(),
                    name,
                });
            }
            None => {
                runtime.dispatch_action(DesktopAction::CancelRename);
            }
        }
    };

    let style = move || {
        entry
            .get()
            .map(|entry| format!("left:{}px;top:{}px;", entry.position.x, entry.position.y))
            .unwrap_or_default()
    };
    let is_folder = move || entry.get().is_some_and(|entry| entry.kind == FileKind::Folder);

    view! {
        <div
            class="desktop-icon"
            class:folder=is_folder
            style=style
            draggable="true"
            on:dblclick=move |ev| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(DesktopAction::OpenEntry {
                    file_id: id.get_value(),
                    viewport: runtime.viewport(),
                });
            }
            on:contextmenu=move |ev| {
                stop_mouse_event(&ev);
                let pointer = host::pointer_from_mouse_event(&ev);
                runtime.dispatch_action(DesktopAction::OpenContextMenu {
                    x: pointer.x,
                    y: pointer.y,
                    target: Some(id.get_value()),
                });
            }
            on:dragstart=move |ev: web_sys::DragEvent| {
                if editing.get_untracked() {
                    ev.prevent_default();
                    return;
                }
                id.with_value(|id| begin_file_drag(&ev, id));
            }
            on:dragover=move |ev: web_sys::DragEvent| {
                if is_folder() {
                    ev.prevent_default();
                    ev.stop_propagation();
                }
            }
            on:drop=move |ev: web_sys::DragEvent| {
                if is_folder() {
                    drop_into_folder(runtime, &ev, id.get_value());
                }
            }
        >
            <span class="desktop-icon-glyph" aria-hidden="true">
                {move || entry.get().map(|entry| shell::icon_glyph(&entry)).unwrap_or_default()}
            </span>
            <Show
                when=move || editing.get()
                fallback=move || {
                    view! {
                        <span class="desktop-icon-label">
                            {move || entry.get().map(|entry| entry.name).unwrap_or_default()}
                        </span>
                    }
                }
            >
                <input
                    id=move || format!("rename-input-{}", id.get_value())
                    class="desktop-icon-rename"
                    type="text"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                    on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                    on:dblclick=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                    on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                        "Enter" => {
                            ev.prevent_default();
                            commit_rename();
                        }
                        "Escape" => {
                            ev.prevent_default();
                            runtime.dispatch_action(DesktopAction::CancelRename);
                        }
                        _ => {}
                    }
                    on:blur=move |_| commit_rename()
                />
            </Show>
        </div>
    }
}
