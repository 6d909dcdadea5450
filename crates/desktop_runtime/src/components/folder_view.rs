use super::*;

use crate::model::FileEntry;

#[component]
pub(super) fn FolderView(folder_id: FileId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let folder = store_value(folder_id);

    let children = create_memo(move |_| {
        folder.with_value(|folder| {
            state.with(|desktop| {
                desktop
                    .files
                    .children(Some(folder))
                    .cloned()
                    .collect::<Vec<_>>()
            })
        })
    });
    let exists = create_memo(move |_| {
        folder.with_value(|folder| state.with(|desktop| desktop.files.contains(folder)))
    });

    view! {
        <div
            class="folder-view"
            on:dragover=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                ev.stop_propagation();
            }
            on:drop=move |ev: web_sys::DragEvent| drop_into_folder(runtime, &ev, folder.get_value())
        >
            <Show
                when=move || exists.get()
                fallback=|| view! { <p class="folder-view-empty">"This folder no longer exists."</p> }
            >
                <Show
                    when=move || !children.get().is_empty()
                    fallback=|| view! { <p class="folder-view-empty">"This folder is empty."</p> }
                >
                    <ul class="folder-view-grid">
                        <For each=move || children.get() key=|entry| (entry.id.clone(), entry.name.clone()) let:entry>
                            <FolderItem entry=entry />
                        </For>
                    </ul>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn FolderItem(entry: FileEntry) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let child_is_folder = entry.is_folder();
    let glyph = shell::icon_glyph(&entry);
    let label = entry.name.clone();
    let child = store_value(entry.id);

    let editing = create_memo(move |_| {
        child.with_value(|id| runtime.state.with(|desktop| desktop.editing_file.as_ref() == Some(id)))
    });
    let draft = create_rw_signal(String::new());
    let draft_seed = label.clone();
    create_effect(move |_| {
        if editing.get() {
            draft.set(draft_seed.clone());
        }
    });

    let commit_rename = move || {
        if !editing.get_untracked() {
            return;
        }
        let action = match shell::rename_submission(&draft.get_untracked()) {
            Some(name) => DesktopAction::RenameFile {
                file_id: child.get_value(),
                name,
            },
            None => DesktopAction::CancelRename,
        };
        runtime.dispatch_action(action);
    };

    view! {
        <li
            class="folder-view-item"
            draggable="true"
            on:dblclick=move |ev| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(DesktopAction::OpenEntry {
                    file_id: child.get_value(),
                    viewport: runtime.viewport(),
                });
            }
            on:contextmenu=move |ev| {
                stop_mouse_event(&ev);
                let pointer = host::pointer_from_mouse_event(&ev);
                runtime.dispatch_action(DesktopAction::OpenContextMenu {
                    x: pointer.x,
                    y: pointer.y,
                    target: Some(child.get_value()),
                });
            }
            on:dragstart=move |ev: web_sys::DragEvent| {
                ev.stop_propagation();
                if editing.get_untracked() {
                    ev.prevent_default();
                    return;
                }
                child.with_value(|id| begin_file_drag(&ev, id));
            }
            on:dragover=move |ev: web_sys::DragEvent| {
                if child_is_folder {
                    ev.prevent_default();
                    ev.stop_propagation();
                }
            }
            on:drop=move |ev: web_sys::DragEvent| {
                if child_is_folder {
                    drop_into_folder(runtime, &ev, child.get_value());
                }
            }
        >
            <span class="desktop-icon-glyph" aria-hidden="true">{glyph}</span>
            <Show
                when=move || editing.get()
                fallback=move || view! { <span class="desktop-icon-label">{label.clone()}</span> }
            >
                <input
                    id=move || format!("rename-input-{}", child.get_value())
                    class="desktop-icon-rename"
                    type="text"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                    on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                    on:dblclick=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                    on:contextmenu=move |ev: web_sys::MouseEvent| ev.stop_propagation()
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
        </li>
    }
}
