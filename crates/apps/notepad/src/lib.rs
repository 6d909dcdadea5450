//! Notepad desktop app: edits a text entry and saves it back through the desktop host.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_app_contract::{AppMountContext, AppModule, AppParams, FileId};
use leptos::*;

/// Name used when an unsaved document is saved without a title.
pub const UNTITLED_NAME: &str = "Untitled.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
struct NotepadDocument {
    id: Option<FileId>,
    title: String,
    text: String,
    saved_text: String,
    wrap_lines: bool,
}

impl NotepadDocument {
    fn from_params(params: &AppParams) -> Self {
        let text = params.content().unwrap_or_default().to_string();
        Self {
            id: params.file_id().cloned(),
            title: params.name().unwrap_or(UNTITLED_NAME).to_string(),
            saved_text: text.clone(),
            text,
            wrap_lines: true,
        }
    }

    fn is_dirty(&self) -> bool {
        self.text != self.saved_text
    }

    fn save_title(&self) -> String {
        let trimmed = self.title.trim();
        if trimmed.is_empty() {
            UNTITLED_NAME.to_string()
        } else {
            trimmed.to_string()
        }
    }

    fn mark_saved(&mut self) {
        self.saved_text = self.text.clone();
    }

    fn line_count(&self) -> usize {
        self.text.lines().count().max(1)
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Registry entry for the Notepad app.
pub const NOTEPAD_MODULE: AppModule = AppModule::new(mount_notepad_app);

fn mount_notepad_app(context: AppMountContext) -> View {
    view! { <NotepadApp context=context /> }.into_view()
}

#[component]
/// Notepad app window contents.
///
/// Saving an unbound document asks the host to create a new text entry; a bound document is
/// updated in place and its window title follows the saved name.
pub fn NotepadApp(
    /// Mount context supplied by the desktop runtime.
    context: AppMountContext,
) -> impl IntoView {
    let host = context.host;
    let document = create_rw_signal(NotepadDocument::from_params(&context.params));
    let notice = create_rw_signal::<Option<String>>(None);
    let textarea_id = format!("{}-editor", context.window_id);

    let save = move || {
        let snapshot = document.get_untracked();
        let title = snapshot.save_title();
        if host.save_text(snapshot.id.clone(), title.clone(), snapshot.text.clone()) {
            document.update(|doc| {
                doc.title = title.clone();
                doc.mark_saved();
            });
            notice.set(Some(format!("Saved {title}")));
        } else {
            logging::warn!("notepad save of `{title}` was rejected");
            notice.set(Some("Save failed".to_string()));
        }
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if (ev.ctrl_key() || ev.meta_key()) && ev.key().eq_ignore_ascii_case("s") {
            ev.prevent_default();
            save();
        }
    };

    view! {
        <div class="app-shell app-notepad-shell" on:keydown=on_keydown>
            <div class="app-toolbar" role="toolbar" aria-label="Notepad">
                <input
                    class="notepad-title"
                    type="text"
                    aria-label="Document name"
                    prop:value=move || document.with(|doc| doc.title.clone())
                    on:input=move |ev| {
                        let title = event_target_value(&ev);
                        document.update(|doc| doc.title = title);
                    }
                />
                <button type="button" class="app-action" on:click=move |_| save()>
                    "Save"
                </button>
                <button
                    type="button"
                    class="app-action"
                    on:click=move |_| document.update(|doc| doc.wrap_lines = !doc.wrap_lines)
                >
                    {move || if document.with(|doc| doc.wrap_lines) { "Wrap: On" } else { "Wrap: Off" }}
                </button>
            </div>

            <textarea
                id=textarea_id
                class=move || {
                    if document.with(|doc| doc.wrap_lines) {
                        "notepad-page wrap"
                    } else {
                        "notepad-page nowrap"
                    }
                }
                prop:value=move || document.with(|doc| doc.text.clone())
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    document.update(|doc| doc.text = text);
                    notice.set(None);
                }
                spellcheck="false"
                autocomplete="off"
                aria-label="Notepad document editor"
            />

            <div class="app-statusbar">
                <span>{move || format!("Lines: {}", document.with(NotepadDocument::line_count))}</span>
                <span>{move || format!("Chars: {}", document.with(NotepadDocument::char_count))}</span>
                <span>
                    {move || {
                        notice.get().unwrap_or_else(|| {
                            if document.with(NotepadDocument::is_dirty) {
                                "Modified".to_string()
                            } else {
                                "Saved".to_string()
                            }
                        })
                    }}
                </span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bound_text_params_seed_the_document() {
        let doc = NotepadDocument::from_params(&AppParams::text_file(
            FileId::new("text-2"),
            "todo.txt",
            "milk\neggs",
        ));

        assert_eq!(doc.id, Some(FileId::new("text-2")));
        assert_eq!(doc.title, "todo.txt");
        assert_eq!(doc.line_count(), 2);
        assert!(!doc.is_dirty());
    }

    #[test]
    fn empty_launch_opens_an_untitled_scratch_document() {
        let doc = NotepadDocument::from_params(&AppParams::Empty);

        assert_eq!(doc.id, None);
        assert_eq!(doc.title, UNTITLED_NAME);
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.char_count(), 0);
    }

    #[test]
    fn edits_are_dirty_until_saved() {
        let mut doc = NotepadDocument::from_params(&AppParams::Empty);
        doc.text.push_str("héllo");
        assert!(doc.is_dirty());
        assert_eq!(doc.char_count(), 5);

        doc.mark_saved();
        assert!(!doc.is_dirty());
    }

    #[test]
    fn blank_titles_save_as_untitled() {
        let mut doc = NotepadDocument::from_params(&AppParams::Empty);
        doc.title = "   ".to_string();
        assert_eq!(doc.save_title(), UNTITLED_NAME);

        doc.title = "  notes.txt ".to_string();
        assert_eq!(doc.save_title(), "notes.txt");
    }
}
