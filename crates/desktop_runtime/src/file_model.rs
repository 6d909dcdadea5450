//! In-memory desktop file tree.
//!
//! Every operation is total: unknown ids are no-ops reported through `bool`/`Option` returns.

use desktop_app_contract::FileId;

use crate::catalog;
use crate::model::{
    FileEntry, FileKind, GridPosition, PointerPosition, Viewport, DEFAULT_FOLDER_NAME,
    GRID_CELL_HEIGHT, GRID_CELL_WIDTH, GRID_ORIGIN,
};

/// Where a saved drawing lands on the desktop.
pub const SAVED_IMAGE_POSITION: GridPosition = GridPosition::cell(2, 0);
/// Where a new text document lands on the desktop.
pub const SAVED_TEXT_POSITION: GridPosition = GridPosition::cell(2, 1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTextOutcome {
    Created(FileId),
    Updated(FileId),
    Missing(FileId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    entries: Vec<FileEntry>,
    next_serial: u64,
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FileStore {
    pub fn new(entries: Vec<FileEntry>) -> Self {
        Self {
            entries,
            next_serial: 1,
        }
    }

    /// Store holding the catalog's startup entries.
    pub fn seeded() -> Self {
        let entries = catalog::catalog()
            .seed_files
            .iter()
            .map(|seed| FileEntry {
                id: seed.id.clone(),
                name: seed.name.clone(),
                kind: seed.kind,
                app_kind: seed.app,
                content: None,
                parent_id: None,
                position: GridPosition::new(seed.x, seed.y),
            })
            .collect();
        Self::new(entries)
    }

    pub fn get(&self, id: &FileId) -> Option<&FileEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    fn get_mut(&mut self, id: &FileId) -> Option<&mut FileEntry> {
        self.entries.iter_mut().find(|entry| &entry.id == id)
    }

    pub fn contains(&self, id: &FileId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose parent is `parent` (`None` = desktop root), in creation order.
    pub fn children<'a>(
        &'a self,
        parent: Option<&'a FileId>,
    ) -> impl Iterator<Item = &'a FileEntry> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.parent_id.as_ref() == parent)
    }

    pub fn desktop_entries(&self) -> impl Iterator<Item = &FileEntry> {
        self.children(None)
    }

    pub fn is_cell_occupied(&self, cell: GridPosition) -> bool {
        self.desktop_entries().any(|entry| entry.position == cell)
    }

    /// First free desktop cell scanning column by column from the top-left.
    ///
    /// Falls back to the origin cell when every visible cell is taken.
    pub fn first_free_cell(&self, viewport: Viewport) -> GridPosition {
        let columns = viewport.width.div_euclid(GRID_CELL_WIDTH);
        let rows = viewport.usable_height().div_euclid(GRID_CELL_HEIGHT);
        for column in 0..columns {
            for row in 0..rows {
                let cell = GridPosition::cell(column, row);
                if !self.is_cell_occupied(cell) {
                    return cell;
                }
            }
        }
        GridPosition::ORIGIN
    }

    /// Creates a desktop folder, preferring the cell under `desired` when it is free.
    pub fn create_folder(
        &mut self,
        name_hint: Option<&str>,
        desired: Option<PointerPosition>,
        viewport: Viewport,
    ) -> FileEntry {
        let position = match desired.map(snap_to_cell_floor) {
            Some(cell) if !self.is_cell_occupied(cell) => cell,
            _ => self.first_free_cell(viewport),
        };
        let name = name_hint
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FOLDER_NAME);
        let entry = FileEntry {
            id: self.next_id("folder"),
            name: name.to_string(),
            kind: FileKind::Folder,
            app_kind: None,
            content: None,
            parent_id: None,
            position,
        };
        self.entries.push(entry.clone());
        entry
    }

    /// Renames `id`. Blank names and unknown ids leave the store unchanged.
    pub fn rename(&mut self, id: &FileId, new_name: &str) -> bool {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return false;
        }
        match self.get_mut(id) {
            Some(entry) => {
                entry.name = new_name.to_string();
                true
            }
            None => false,
        }
    }

    /// Removes `id`. A removed folder hands its direct children to its own parent; children
    /// landing on the desktop get a free cell.
    pub fn remove(&mut self, id: &FileId, viewport: Viewport) -> Option<FileEntry> {
        let index = self.entries.iter().position(|entry| &entry.id == id)?;
        let removed = self.entries.remove(index);
        if removed.is_folder() {
            let orphans: Vec<FileId> = self
                .children(Some(&removed.id))
                .map(|entry| entry.id.clone())
                .collect();
            for orphan in orphans {
                let position = match removed.parent_id {
                    Some(_) => None,
                    None => Some(self.first_free_cell(viewport)),
                };
                if let Some(entry) = self.get_mut(&orphan) {
                    entry.parent_id = removed.parent_id.clone();
                    if let Some(position) = position {
                        entry.position = position;
                    }
                }
            }
        }
        Some(removed)
    }

    /// Case-insensitive name lookup among desktop-root entries.
    pub fn find_desktop_entry_by_name(&self, name: &str) -> Option<&FileEntry> {
        let wanted = name.to_lowercase();
        self.desktop_entries()
            .find(|entry| entry.name.to_lowercase() == wanted)
    }

    /// Case-insensitive lookup of a text document anywhere in the tree.
    pub fn find_text_entry_by_name(&self, name: &str) -> Option<&FileEntry> {
        let wanted = name.trim().to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.kind == FileKind::Text && entry.name.to_lowercase() == wanted)
    }

    /// Moves `id` to the desktop cell nearest to `point`.
    pub fn move_to_desktop(&mut self, id: &FileId, point: PointerPosition) -> bool {
        let cell = snap_to_cell_round(point);
        match self.get_mut(id) {
            Some(entry) => {
                entry.parent_id = None;
                entry.position = cell;
                true
            }
            None => false,
        }
    }

    /// Whether `id` may be placed inside `folder_id` without breaking the tree.
    pub fn can_move_into(&self, id: &FileId, folder_id: &FileId) -> bool {
        id != folder_id
            && self.contains(id)
            && self.get(folder_id).is_some_and(FileEntry::is_folder)
            && !self.is_within(folder_id, id)
    }

    /// Re-parents `id` under `folder_id`. Returns `false` when rejected or already there.
    pub fn move_into_folder(&mut self, id: &FileId, folder_id: &FileId) -> bool {
        if !self.can_move_into(id, folder_id) {
            return false;
        }
        match self.get_mut(id) {
            Some(entry) if entry.parent_id.as_ref() != Some(folder_id) => {
                entry.parent_id = Some(folder_id.clone());
                true
            }
            _ => false,
        }
    }

    /// Whether `candidate` is `ancestor` or sits somewhere below it.
    fn is_within(&self, candidate: &FileId, ancestor: &FileId) -> bool {
        let mut cursor = Some(candidate);
        // Bounded walk so a malformed tree cannot loop forever.
        for _ in 0..=self.entries.len() {
            match cursor {
                Some(current) if current == ancestor => return true,
                Some(current) => {
                    cursor = self
                        .get(current)
                        .and_then(|entry| entry.parent_id.as_ref());
                }
                None => return false,
            }
        }
        false
    }

    /// Stores a drawing on the desktop as `Drawing <label>`.
    pub fn save_image(&mut self, data_url: impl Into<String>, label: &str) -> FileEntry {
        let entry = FileEntry {
            id: self.next_id("file"),
            name: format!("Drawing {label}"),
            kind: FileKind::Image,
            app_kind: None,
            content: Some(data_url.into()),
            parent_id: None,
            position: SAVED_IMAGE_POSITION,
        };
        self.entries.push(entry.clone());
        entry
    }

    /// Updates the text document `id`, or creates a new one when `id` is `None`.
    pub fn save_text(&mut self, id: Option<&FileId>, title: &str, content: &str) -> SaveTextOutcome {
        match id {
            Some(id) => match self.get_mut(id) {
                Some(entry) => {
                    entry.name = title.to_string();
                    entry.content = Some(content.to_string());
                    SaveTextOutcome::Updated(id.clone())
                }
                None => SaveTextOutcome::Missing(id.clone()),
            },
            None => {
                let name = if title.ends_with(".txt") {
                    title.to_string()
                } else {
                    format!("{title}.txt")
                };
                let id = self.next_id("text");
                self.entries.push(FileEntry {
                    id: id.clone(),
                    name,
                    kind: FileKind::Text,
                    app_kind: None,
                    content: Some(content.to_string()),
                    parent_id: None,
                    position: SAVED_TEXT_POSITION,
                });
                SaveTextOutcome::Created(id)
            }
        }
    }

    fn next_id(&mut self, prefix: &str) -> FileId {
        loop {
            let id = FileId::new(format!("{prefix}-{}", self.next_serial));
            self.next_serial += 1;
            if !self.contains(&id) {
                return id;
            }
        }
    }
}

/// Cell containing `point`.
pub fn snap_to_cell_floor(point: PointerPosition) -> GridPosition {
    GridPosition::new(
        point.x.div_euclid(GRID_CELL_WIDTH) * GRID_CELL_WIDTH + GRID_ORIGIN,
        point.y.div_euclid(GRID_CELL_HEIGHT) * GRID_CELL_HEIGHT + GRID_ORIGIN,
    )
}

/// Cell nearest to `point`, kept inside the desktop's top-left edge.
pub fn snap_to_cell_round(point: PointerPosition) -> GridPosition {
    let snap = |value: i32, cell: i32| {
        let rounded = (f64::from(value) / f64::from(cell)).round() as i32;
        (rounded * cell + GRID_ORIGIN).max(GRID_ORIGIN)
    };
    GridPosition::new(
        snap(point.x, GRID_CELL_WIDTH),
        snap(point.y, GRID_CELL_HEIGHT),
    )
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::AppKind;
    use pretty_assertions::assert_eq;

    use super::*;

    const VIEWPORT: Viewport = Viewport::new(1024, 768);

    fn entry(id: &str, kind: FileKind, parent: Option<&str>, position: GridPosition) -> FileEntry {
        FileEntry {
            id: FileId::new(id),
            name: id.to_string(),
            kind,
            app_kind: None,
            content: None,
            parent_id: parent.map(FileId::new),
            position,
        }
    }

    fn ids<'a>(entries: impl Iterator<Item = &'a FileEntry>) -> Vec<&'a str> {
        entries.map(|entry| entry.id.as_str()).collect()
    }

    #[test]
    fn seeded_store_matches_catalog() {
        let store = FileStore::seeded();
        assert_eq!(store.len(), 8);
        let tetris = store.get(&FileId::new("app-tetris")).expect("tetris seed");
        assert_eq!(tetris.app_kind, Some(AppKind::Tetris));
        assert_eq!(tetris.position, GridPosition::new(10, 120));
    }

    #[test]
    fn folders_without_position_fill_cells_column_major() {
        let mut store = FileStore::default();
        let rows = VIEWPORT.usable_height() / GRID_CELL_HEIGHT;
        let created: Vec<GridPosition> = (0..rows + 2)
            .map(|_| store.create_folder(None, None, VIEWPORT).position)
            .collect();

        let mut expected: Vec<GridPosition> = (0..rows).map(|row| GridPosition::cell(0, row)).collect();
        expected.push(GridPosition::cell(1, 0));
        expected.push(GridPosition::cell(1, 1));
        assert_eq!(created, expected);
        assert_eq!(
            ids(store.iter()),
            vec!["folder-1", "folder-2", "folder-3", "folder-4", "folder-5", "folder-6", "folder-7", "folder-8"]
        );
    }

    #[test]
    fn folder_prefers_the_clicked_cell_until_it_is_taken() {
        let mut store = FileStore::default();
        let at = PointerPosition { x: 357, y: 260 };
        let first = store.create_folder(Some("Work"), Some(at), VIEWPORT);
        assert_eq!(first.position, GridPosition::new(310, 230));
        assert_eq!(first.name, "Work");

        let second = store.create_folder(None, Some(at), VIEWPORT);
        assert_eq!(second.position, GridPosition::ORIGIN);
        assert_eq!(second.name, DEFAULT_FOLDER_NAME);
    }

    #[test]
    fn full_desktop_falls_back_to_origin() {
        let mut store = FileStore::default();
        let tiny = Viewport::new(150, 48 + 120);
        assert_eq!(store.create_folder(None, None, tiny).position, GridPosition::ORIGIN);
        assert_eq!(store.create_folder(None, None, tiny).position, GridPosition::ORIGIN);
    }

    #[test]
    fn rename_trims_and_rejects_blank_names() {
        let mut store = FileStore::new(vec![entry("d1", FileKind::Folder, None, GridPosition::ORIGIN)]);
        assert!(store.rename(&FileId::new("d1"), "  Photos "));
        assert!(!store.rename(&FileId::new("d1"), "   "));
        assert!(!store.rename(&FileId::new("missing"), "x"));
        assert_eq!(store.get(&FileId::new("d1")).map(|e| e.name.as_str()), Some("Photos"));
    }

    #[test]
    fn removing_a_folder_moves_children_to_free_desktop_cells() {
        let mut store = FileStore::new(vec![
            entry("d1", FileKind::Folder, None, GridPosition::ORIGIN),
            entry("f1", FileKind::Text, Some("d1"), GridPosition::ORIGIN),
        ]);

        let removed = store.remove(&FileId::new("d1"), VIEWPORT).expect("folder removed");
        assert_eq!(removed.id, FileId::new("d1"));
        let child = store.get(&FileId::new("f1")).expect("child kept");
        assert_eq!(child.parent_id, None);
        assert_eq!(child.position, GridPosition::ORIGIN);
        assert_eq!(ids(store.desktop_entries()), vec!["f1"]);
    }

    #[test]
    fn removing_a_nested_folder_hands_children_to_its_parent() {
        let mut store = FileStore::new(vec![
            entry("outer", FileKind::Folder, None, GridPosition::ORIGIN),
            entry("inner", FileKind::Folder, Some("outer"), GridPosition::ORIGIN),
            entry("f1", FileKind::Text, Some("inner"), GridPosition::ORIGIN),
        ]);
        store.remove(&FileId::new("inner"), VIEWPORT);
        assert_eq!(ids(store.children(Some(&FileId::new("outer")))), vec!["f1"]);
        assert_eq!(store.remove(&FileId::new("inner"), VIEWPORT), None);
    }

    #[test]
    fn desktop_name_lookup_ignores_case_and_nested_entries() {
        let mut nested = entry("f2", FileKind::Text, Some("d1"), GridPosition::ORIGIN);
        nested.name = "notes.txt".to_string();
        let mut top = entry("f1", FileKind::Text, None, GridPosition::ORIGIN);
        top.name = "Notes.TXT".to_string();
        let store = FileStore::new(vec![
            entry("d1", FileKind::Folder, None, GridPosition::cell(0, 1)),
            nested,
            top,
        ]);
        let found = store.find_desktop_entry_by_name("notes.txt").expect("match");
        assert_eq!(found.id, FileId::new("f1"));
        assert!(store.find_desktop_entry_by_name("todo.txt").is_none());
    }

    #[test]
    fn text_lookup_searches_folders_and_skips_other_kinds() {
        let mut nested = entry("f2", FileKind::Text, Some("d1"), GridPosition::ORIGIN);
        nested.name = "notes.txt".to_string();
        let mut folder = entry("d1", FileKind::Folder, None, GridPosition::cell(0, 1));
        folder.name = "todo.txt".to_string();
        let store = FileStore::new(vec![folder, nested]);

        let found = store.find_text_entry_by_name(" Notes.TXT ").expect("match");
        assert_eq!(found.id, FileId::new("f2"));
        assert!(store.find_text_entry_by_name("todo.txt").is_none());
    }

    #[test]
    fn desktop_drop_rounds_to_nearest_cell_and_clamps() {
        let mut store = FileStore::new(vec![entry("f1", FileKind::Text, Some("d1"), GridPosition::ORIGIN)]);
        assert!(store.move_to_desktop(&FileId::new("f1"), PointerPosition { x: 260, y: 170 }));
        let moved = store.get(&FileId::new("f1")).expect("entry");
        assert_eq!(moved.parent_id, None);
        assert_eq!(moved.position, GridPosition::new(310, 230));

        assert_eq!(
            snap_to_cell_round(PointerPosition { x: -120, y: -300 }),
            GridPosition::ORIGIN
        );
        assert!(!store.move_to_desktop(&FileId::new("ghost"), PointerPosition { x: 0, y: 0 }));
    }

    #[test]
    fn folder_moves_reject_cycles_and_non_folders() {
        let mut store = FileStore::new(vec![
            entry("d1", FileKind::Folder, None, GridPosition::ORIGIN),
            entry("d2", FileKind::Folder, Some("d1"), GridPosition::ORIGIN),
            entry("f1", FileKind::Text, None, GridPosition::cell(0, 1)),
        ]);
        let d1 = FileId::new("d1");
        let d2 = FileId::new("d2");
        let f1 = FileId::new("f1");

        assert!(!store.move_into_folder(&d1, &d1));
        assert!(!store.move_into_folder(&d1, &d2));
        assert!(!store.move_into_folder(&d1, &f1));
        assert!(!store.move_into_folder(&f1, &FileId::new("missing")));
        assert!(store.move_into_folder(&f1, &d2));
        assert!(!store.move_into_folder(&f1, &d2));
        assert_eq!(ids(store.children(Some(&d2))), vec!["f1"]);
        assert_eq!(ids(store.desktop_entries()), vec!["d1"]);
    }

    #[test]
    fn saved_drawings_and_texts_get_fresh_ids() {
        let mut store = FileStore::default();
        let drawing = store.save_image("data:image/png;base64,AAAA", "10:42");
        assert_eq!(drawing.id, FileId::new("file-1"));
        assert_eq!(drawing.name, "Drawing 10:42");
        assert_eq!(drawing.position, SAVED_IMAGE_POSITION);

        assert_eq!(
            store.save_text(None, "todo", "milk"),
            SaveTextOutcome::Created(FileId::new("text-2"))
        );
        assert_eq!(
            store.save_text(None, "done.txt", ""),
            SaveTextOutcome::Created(FileId::new("text-3"))
        );
        let names: Vec<&str> = store.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["Drawing 10:42", "todo.txt", "done.txt"]);
    }

    #[test]
    fn saving_existing_text_updates_in_place() {
        let mut store = FileStore::default();
        let SaveTextOutcome::Created(id) = store.save_text(None, "a", "hi") else {
            panic!("expected a new text entry");
        };
        assert_eq!(
            store.save_text(Some(&id), "b.txt", "bye"),
            SaveTextOutcome::Updated(id.clone())
        );
        let entry = store.get(&id).expect("text entry");
        assert_eq!(entry.name, "b.txt");
        assert_eq!(entry.content.as_deref(), Some("bye"));

        let ghost = FileId::new("text-99");
        assert_eq!(
            store.save_text(Some(&ghost), "x", "y"),
            SaveTextOutcome::Missing(ghost)
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn generated_ids_skip_existing_entries() {
        let mut store = FileStore::new(vec![entry("folder-1", FileKind::Folder, None, GridPosition::ORIGIN)]);
        let created = store.create_folder(None, None, VIEWPORT);
        assert_eq!(created.id, FileId::new("folder-2"));
    }
}
