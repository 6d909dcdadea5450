use super::*;

use crate::{model::ContextMenuState, shell::ContextMenuItem};

#[component]
pub(super) fn DesktopContextMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let menu = create_memo(move |_| {
        state.with(|desktop| {
            let open = desktop.context_menu.clone()?;
            let items = shell::context_menu_items(&desktop.files, open.target.as_ref())?;
            Some((open, items))
        })
    });

    move || {
        let Some((ContextMenuState { x, y, .. }, items)) = menu.get() else {
            return ().into_view();
        };

        view! {
            <div
                id="desktop-context-menu"
                class="desktop-context-menu"
                role="menu"
                aria-label="Desktop context menu"
                style=format!("left:{x}px;top:{y}px;")
                on:mousedown=move |ev| ev.stop_propagation()
                on:click=move |ev| ev.stop_propagation()
                on:contextmenu=move |ev| stop_mouse_event(&ev)
            >
                {items
                    .into_iter()
                    .map(|item| {
                        view! {
                            <button
                                role="menuitem"
                                class="desktop-context-menu-item"
                                class:destructive=item.is_destructive()
                                on:click:undelegated=move |ev| {
                                    stop_mouse_event(&ev);
                                    runtime.dispatch_action(DesktopAction::ContextMenuCommand {
                                        item,
                                        viewport: runtime.viewport(),
                                    });
                                }
                            >
                                {item.label()}
                            </button>
                            {(item == ContextMenuItem::Delete).then(|| {
                                view! {
                                    <div class="desktop-menu-separator" role="separator" aria-hidden="true"></div>
                                }
                            })}
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_view()
    }
}
