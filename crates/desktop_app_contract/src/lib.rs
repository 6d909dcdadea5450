//! Shared contract types between the desktop window manager runtime and hosted apps.
//!
//! Hosted apps only ever see what is declared here: the app kind they were launched as, typed
//! launch params, and an [`AppHost`] whose callbacks route back into the desktop shell. They have
//! no visibility into z-order, other windows, or the file tree.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::{Callable, Callback, View};
use serde::{Deserialize, Serialize};

/// Stable identifier for a desktop file entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    /// Wraps a raw id string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FileId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Every application kind the desktop can host inside a window.
pub enum AppKind {
    /// Drawing canvas.
    Paint,
    /// Web browser.
    Browser,
    /// Snake game.
    Snake,
    /// Minesweeper game.
    Minesweeper,
    /// Calculator.
    Calculator,
    /// Terminal emulator.
    Terminal,
    /// Text editor.
    Notepad,
    /// Music player.
    Music,
    /// System settings.
    Settings,
    /// Folder browser.
    Files,
    /// Image viewer.
    Viewer,
    /// Particle simulation.
    Particles,
    /// Voxel sandbox.
    Minecraft,
    /// Solar system visualisation.
    SolarSystem,
    /// Raycasting shooter.
    Doom,
    /// Pac-Man.
    Pacman,
    /// Interactive book.
    Book,
    /// Ray tracing demo.
    RayTracing,
    /// City builder.
    CitySim,
    /// Quiz game.
    CyberQuiz,
    /// HTML/CSS playground.
    WebEditor,
    /// Blackjack.
    Blackjack,
    /// Tetris.
    Tetris,
    /// 2048.
    Cyber2048,
}

impl AppKind {
    /// All app kinds in declaration order.
    pub const ALL: [AppKind; 24] = [
        Self::Paint,
        Self::Browser,
        Self::Snake,
        Self::Minesweeper,
        Self::Calculator,
        Self::Terminal,
        Self::Notepad,
        Self::Music,
        Self::Settings,
        Self::Files,
        Self::Viewer,
        Self::Particles,
        Self::Minecraft,
        Self::SolarSystem,
        Self::Doom,
        Self::Pacman,
        Self::Book,
        Self::RayTracing,
        Self::CitySim,
        Self::CyberQuiz,
        Self::WebEditor,
        Self::Blackjack,
        Self::Tetris,
        Self::Cyber2048,
    ];

    /// Returns the stable lowercase token for this kind (matches its serde form).
    pub const fn token(self) -> &'static str {
        match self {
            Self::Paint => "paint",
            Self::Browser => "browser",
            Self::Snake => "snake",
            Self::Minesweeper => "minesweeper",
            Self::Calculator => "calculator",
            Self::Terminal => "terminal",
            Self::Notepad => "notepad",
            Self::Music => "music",
            Self::Settings => "settings",
            Self::Files => "files",
            Self::Viewer => "viewer",
            Self::Particles => "particles",
            Self::Minecraft => "minecraft",
            Self::SolarSystem => "solarsystem",
            Self::Doom => "doom",
            Self::Pacman => "pacman",
            Self::Book => "book",
            Self::RayTracing => "raytracing",
            Self::CitySim => "citysim",
            Self::CyberQuiz => "cyberquiz",
            Self::WebEditor => "webeditor",
            Self::Blackjack => "blackjack",
            Self::Tetris => "tetris",
            Self::Cyber2048 => "cyber2048",
        }
    }

    /// Parses a token produced by [`AppKind::token`].
    pub fn from_token(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.token() == raw.trim())
    }

    /// Window title used when launch params carry no name: the token with its first letter
    /// upper-cased.
    pub fn fallback_title(self) -> String {
        let token = self.token();
        let mut chars = token.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }

    /// Returns `true` for kinds that open one window per backing file rather than one window
    /// per kind.
    pub const fn is_file_backed(self) -> bool {
        matches!(self, Self::Files | Self::Paint | Self::Viewer | Self::Notepad)
    }

    /// Returns whether `params` is a shape this kind knows how to consume.
    pub fn accepts(self, params: &AppParams) -> bool {
        match params {
            AppParams::Empty | AppParams::Shortcut { .. } => true,
            AppParams::Folder { .. } => matches!(self, Self::Files),
            AppParams::Text { .. } => matches!(self, Self::Notepad),
            AppParams::Image { .. } => matches!(self, Self::Viewer | Self::Paint),
        }
    }
}

impl std::fmt::Display for AppKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "kebab-case")]
/// Launch parameters handed to a hosted app, one variant per parameter shape.
pub enum AppParams {
    /// No launch parameters (launcher or menu opens).
    #[default]
    Empty,
    /// Opened from a desktop application shortcut.
    Shortcut {
        /// Shortcut entry id.
        id: FileId,
        /// Shortcut display name.
        name: String,
    },
    /// Folder browser bound to a folder entry.
    Folder {
        /// Folder entry id.
        id: FileId,
        /// Folder display name.
        name: String,
    },
    /// Text document, optionally bound to an existing text entry.
    Text {
        /// Backing text entry id, `None` for an unsaved document.
        id: Option<FileId>,
        /// Document name.
        name: Option<String>,
        /// Document body.
        content: Option<String>,
    },
    /// Image document, optionally bound to an existing image entry.
    Image {
        /// Backing image entry id.
        id: Option<FileId>,
        /// Image name.
        name: Option<String>,
        /// Image data URL.
        image: Option<String>,
    },
}

impl AppParams {
    /// Builds text params bound to an existing file.
    pub fn text_file(id: FileId, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Text {
            id: Some(id),
            name: Some(name.into()),
            content: Some(content.into()),
        }
    }

    /// Builds image params bound to an existing file.
    pub fn image_file(id: FileId, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self::Image {
            id: Some(id),
            name: Some(name.into()),
            image: Some(image.into()),
        }
    }

    /// Stable name of the variant, used in diagnostics.
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Shortcut { .. } => "shortcut",
            Self::Folder { .. } => "folder",
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
        }
    }

    /// Backing file id when the params reference one.
    pub fn file_id(&self) -> Option<&FileId> {
        match self {
            Self::Empty => None,
            Self::Shortcut { id, .. } | Self::Folder { id, .. } => Some(id),
            Self::Text { id, .. } | Self::Image { id, .. } => id.as_ref(),
        }
    }

    /// Display name carried by the params.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Shortcut { name, .. } | Self::Folder { name, .. } => Some(name.as_str()),
            Self::Text { name, .. } | Self::Image { name, .. } => name.as_deref(),
        }
    }

    /// Text body for text params.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Text { content, .. } => content.as_deref(),
            _ => None,
        }
    }

    /// Image data URL for image params.
    pub fn image(&self) -> Option<&str> {
        match self {
            Self::Image { image, .. } => image.as_deref(),
            _ => None,
        }
    }

    /// Replaces the display name in place. `Empty` params are left alone.
    pub fn set_name(&mut self, new_name: impl Into<String>) {
        match self {
            Self::Empty => {}
            Self::Shortcut { name, .. } | Self::Folder { name, .. } => *name = new_name.into(),
            Self::Text { name, .. } | Self::Image { name, .. } => *name = Some(new_name.into()),
        }
    }

    /// Replaces the text body in place. Only text params carry a body.
    pub fn set_content(&mut self, new_content: impl Into<String>) {
        if let Self::Text { content, .. } = self {
            *content = Some(new_content.into());
        }
    }

    /// Shallow-merges `incoming` over `self`.
    ///
    /// Fields present in `incoming` win. Fields it leaves unset keep their current value.
    /// A differently shaped `incoming` replaces the params wholesale, and `Empty` changes
    /// nothing.
    pub fn merge(self, incoming: AppParams) -> AppParams {
        match (self, incoming) {
            (current, Self::Empty) => current,
            (
                Self::Text { id, name, content },
                Self::Text {
                    id: next_id,
                    name: next_name,
                    content: next_content,
                },
            ) => Self::Text {
                id: next_id.or(id),
                name: next_name.or(name),
                content: next_content.or(content),
            },
            (
                Self::Image { id, name, image },
                Self::Image {
                    id: next_id,
                    name: next_name,
                    image: next_image,
                },
            ) => Self::Image {
                id: next_id.or(id),
                name: next_name.or(name),
                image: next_image.or(image),
            },
            (_, incoming) => incoming,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Commands a hosted app may send back to the desktop shell.
pub enum AppCommand {
    /// Create or update a text entry.
    SaveText {
        /// Existing text entry, `None` to create a new one.
        id: Option<FileId>,
        /// Entry name.
        title: String,
        /// Entry body.
        content: String,
    },
    /// Save a drawing as a new image entry.
    SaveImage {
        /// Encoded image data URL.
        data_url: String,
    },
    /// Create a folder on the desktop.
    CreateFolder {
        /// Folder name, defaulted by the shell when `None`.
        name: Option<String>,
    },
    /// Delete a desktop-root entry by case-insensitive name.
    DeleteByName {
        /// Entry name.
        name: String,
    },
    /// Open the text document called `name` in Notepad, or a new unsaved one when none exists.
    OpenDocumentByName {
        /// Document name, matched case-insensitively.
        name: String,
    },
    /// Open another app.
    OpenApp {
        /// App to open.
        kind: AppKind,
        /// Launch params.
        params: AppParams,
    },
}

#[derive(Clone, Copy)]
/// Callback bundle injected into every hosted app.
///
/// Every helper returns whether the shell applied the command.
pub struct AppHost {
    sender: Callback<AppCommand, bool>,
}

impl AppHost {
    /// Creates a host from the runtime command callback.
    pub fn new(sender: Callback<AppCommand, bool>) -> Self {
        Self { sender }
    }

    /// Saves a text document, creating a new entry when `id` is `None`.
    pub fn save_text(
        &self,
        id: Option<FileId>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> bool {
        self.send(AppCommand::SaveText {
            id,
            title: title.into(),
            content: content.into(),
        })
    }

    /// Saves a drawing as a new desktop image.
    pub fn save_image(&self, data_url: impl Into<String>) -> bool {
        self.send(AppCommand::SaveImage {
            data_url: data_url.into(),
        })
    }

    /// Creates a desktop folder.
    pub fn create_folder(&self, name: Option<String>) -> bool {
        self.send(AppCommand::CreateFolder { name })
    }

    /// Deletes the desktop-root entry called `name`. Returns `false` when none matched.
    pub fn delete_by_name(&self, name: impl Into<String>) -> bool {
        self.send(AppCommand::DeleteByName { name: name.into() })
    }

    /// Opens the text document called `name`, binding the editor to it when it already exists.
    pub fn open_document(&self, name: impl Into<String>) -> bool {
        self.send(AppCommand::OpenDocumentByName { name: name.into() })
    }

    /// Opens another app window.
    pub fn open_app(&self, kind: AppKind, params: AppParams) -> bool {
        self.send(AppCommand::OpenApp { kind, params })
    }

    /// Low-level transport send.
    pub fn send(&self, command: AppCommand) -> bool {
        self.sender.call(command)
    }
}

#[derive(Clone)]
/// App mount context injected by the desktop runtime per window instance.
pub struct AppMountContext {
    /// Kind the window was opened as.
    pub kind: AppKind,
    /// Rendered window key (`window-notepad-text-3`), also the window's DOM id.
    pub window_id: String,
    /// Launch params as stored on the window record at mount time.
    pub params: AppParams,
    /// Shell callbacks.
    pub host: AppHost,
}

/// Static app mount function used by the runtime registry.
pub type AppMountFn = fn(AppMountContext) -> View;

#[derive(Debug, Clone, Copy)]
/// Mountable app module descriptor used by the runtime app registry.
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the app view with a runtime-provided context.
    pub fn mount(self, context: AppMountContext) -> View {
        (self.mount_fn)(context)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tokens_round_trip_and_match_serde_form() {
        for kind in AppKind::ALL {
            assert_eq!(AppKind::from_token(kind.token()), Some(kind));
            let json = serde_json::to_string(&kind).expect("serialize kind");
            assert_eq!(json, format!("\"{}\"", kind.token()));
        }
        assert_eq!(AppKind::from_token("solitaire"), None);
    }

    #[test]
    fn fallback_title_capitalizes_only_the_first_letter() {
        assert_eq!(AppKind::Notepad.fallback_title(), "Notepad");
        assert_eq!(AppKind::SolarSystem.fallback_title(), "Solarsystem");
        assert_eq!(AppKind::Cyber2048.fallback_title(), "Cyber2048");
    }

    #[test]
    fn only_document_apps_are_file_backed() {
        let file_backed: Vec<AppKind> = AppKind::ALL
            .into_iter()
            .filter(|kind| kind.is_file_backed())
            .collect();
        assert_eq!(
            file_backed,
            vec![AppKind::Paint, AppKind::Notepad, AppKind::Files, AppKind::Viewer]
        );
    }

    #[test]
    fn merge_keeps_unset_fields_and_prefers_incoming_values() {
        let current = AppParams::text_file(FileId::new("t1"), "a.txt", "hi");
        let incoming = AppParams::Text {
            id: Some(FileId::new("t1")),
            name: None,
            content: Some("bye".to_string()),
        };

        assert_eq!(
            current.merge(incoming),
            AppParams::text_file(FileId::new("t1"), "a.txt", "bye")
        );
    }

    #[test]
    fn merge_with_empty_is_identity_and_other_shapes_replace() {
        let folder = AppParams::Folder {
            id: FileId::new("d1"),
            name: "Docs".to_string(),
        };
        assert_eq!(folder.clone().merge(AppParams::Empty), folder);

        let image = AppParams::image_file(FileId::new("i1"), "pic", "data:image/png;base64,");
        assert_eq!(AppParams::Empty.merge(image.clone()), image);
    }

    #[test]
    fn accepts_ties_document_shapes_to_their_apps() {
        let text = AppParams::text_file(FileId::new("t1"), "a.txt", "");
        assert!(AppKind::Notepad.accepts(&text));
        assert!(!AppKind::Viewer.accepts(&text));
        assert!(AppKind::Tetris.accepts(&AppParams::Empty));
        assert!(AppKind::Tetris.accepts(&AppParams::Shortcut {
            id: FileId::new("app-tetris"),
            name: "Matrix Tetris".to_string(),
        }));
    }

    #[test]
    fn params_serialize_with_kind_tag() {
        let params = AppParams::Folder {
            id: FileId::new("folder-1"),
            name: "New Folder".to_string(),
        };
        let json = serde_json::to_value(&params).expect("serialize params");
        assert_eq!(
            json,
            serde_json::json!({ "kind": "folder", "id": "folder-1", "name": "New Folder" })
        );
    }

    #[test]
    fn set_name_and_content_touch_only_matching_fields() {
        let mut params = AppParams::text_file(FileId::new("t1"), "a.txt", "hi");
        params.set_name("b.txt");
        params.set_content("there");
        assert_eq!(params.name(), Some("b.txt"));
        assert_eq!(params.content(), Some("there"));

        let mut shortcut = AppParams::Shortcut {
            id: FileId::new("app-doom"),
            name: "Doom 1993".to_string(),
        };
        shortcut.set_content("ignored");
        assert_eq!(shortcut.content(), None);
    }
}
