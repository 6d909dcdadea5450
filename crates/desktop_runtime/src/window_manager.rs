//! Window records, z-order and lifecycle transitions.

use desktop_app_contract::{AppKind, AppParams, FileId};

use crate::model::{WindowKey, WindowRecord, INITIAL_TOP_Z};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOutcome {
    pub key: WindowKey,
    /// `false` when an existing window was revived.
    pub created: bool,
}

/// Open windows in open order, plus the z-order counter.
///
/// The counter only grows: every open or focus takes `top + 1`, so the last raised window always
/// has the highest z-index and values are never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowManager {
    windows: Vec<WindowRecord>,
    top_z: u64,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            top_z: INITIAL_TOP_Z,
        }
    }
}

impl WindowManager {
    pub fn get(&self, key: &WindowKey) -> Option<&WindowRecord> {
        self.windows.iter().find(|window| &window.key == key)
    }

    fn get_mut(&mut self, key: &WindowKey) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|window| &window.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn top_z(&self) -> u64 {
        self.top_z
    }

    /// Highest visible window.
    pub fn frontmost(&self) -> Option<&WindowRecord> {
        self.windows
            .iter()
            .filter(|window| !window.is_minimized)
            .max_by_key(|window| window.z_index)
    }

    fn next_top(&mut self) -> u64 {
        self.top_z = self.top_z.saturating_add(1);
        self.top_z
    }

    /// Opens a window for `kind`, or revives and raises the window already holding its key.
    ///
    /// A revived window keeps its title and geometry; incoming params are merged over the stored
    /// ones.
    pub fn open(&mut self, kind: AppKind, params: AppParams, preferred: (i32, i32)) -> OpenOutcome {
        let key = WindowKey::derive(kind, &params);
        let z_index = self.next_top();

        if let Some(existing) = self.get_mut(&key) {
            existing.is_open = true;
            existing.is_minimized = false;
            existing.z_index = z_index;
            let current = std::mem::take(&mut existing.params);
            existing.params = current.merge(params);
            return OpenOutcome { key, created: false };
        }

        let title = params
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| kind.fallback_title());
        self.windows.push(WindowRecord {
            key: key.clone(),
            kind,
            title,
            is_open: true,
            is_minimized: false,
            is_maximized: false,
            z_index,
            params,
            preferred_width: preferred.0,
            preferred_height: preferred.1,
        });
        OpenOutcome { key, created: true }
    }

    pub fn close(&mut self, key: &WindowKey) -> Option<WindowRecord> {
        let index = self.windows.iter().position(|window| &window.key == key)?;
        Some(self.windows.remove(index))
    }

    pub fn toggle_minimize(&mut self, key: &WindowKey) -> bool {
        match self.get_mut(key) {
            Some(window) => {
                window.is_minimized = !window.is_minimized;
                true
            }
            None => false,
        }
    }

    pub fn toggle_maximize(&mut self, key: &WindowKey) -> bool {
        match self.get_mut(key) {
            Some(window) => {
                window.is_maximized = !window.is_maximized;
                true
            }
            None => false,
        }
    }

    /// Raises `key` above every other window and restores it if minimized.
    pub fn focus(&mut self, key: &WindowKey) -> bool {
        if self.get(key).is_none() {
            return false;
        }
        let z_index = self.next_top();
        if let Some(window) = self.get_mut(key) {
            window.z_index = z_index;
            window.is_minimized = false;
        }
        true
    }

    /// Keys of windows whose params reference `file`.
    pub fn bound_to(&self, file: &FileId) -> Vec<WindowKey> {
        self.windows
            .iter()
            .filter(|window| window.is_bound_to(file))
            .map(|window| window.key.clone())
            .collect()
    }

    pub fn close_bound_to(&mut self, file: &FileId) -> Vec<WindowKey> {
        let closed = self.bound_to(file);
        self.windows.retain(|window| !window.is_bound_to(file));
        closed
    }

    /// Mirrors a file rename into bound windows. Returns how many windows changed.
    pub fn sync_file_name(&mut self, file: &FileId, name: &str) -> usize {
        let mut touched = 0;
        for window in self.windows.iter_mut().filter(|window| window.is_bound_to(file)) {
            window.title = name.to_string();
            window.params.set_name(name);
            touched += 1;
        }
        touched
    }

    /// Mirrors a text save into bound windows.
    pub fn sync_file_text(&mut self, file: &FileId, name: &str, content: &str) -> usize {
        let mut touched = 0;
        for window in self.windows.iter_mut().filter(|window| window.is_bound_to(file)) {
            window.title = name.to_string();
            window.params.set_name(name);
            window.params.set_content(content);
            touched += 1;
        }
        touched
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SIZE: (i32, i32) = (800, 550);

    fn text(id: &str, name: &str, content: &str) -> AppParams {
        AppParams::text_file(FileId::new(id), name, content)
    }

    #[test]
    fn first_open_creates_a_titled_record_above_the_initial_z() {
        let mut windows = WindowManager::default();
        let outcome = windows.open(AppKind::Notepad, text("t1", "a.txt", "hi"), SIZE);
        assert!(outcome.created);

        let record = windows.get(&outcome.key).expect("record");
        assert_eq!(record.title, "a.txt");
        assert_eq!(record.z_index, INITIAL_TOP_Z + 1);
        assert_eq!(record.preferred_size(), SIZE);
        assert!(record.is_open && !record.is_minimized && !record.is_maximized);

        let tetris = windows.open(AppKind::Tetris, AppParams::Empty, (450, 700));
        assert_eq!(windows.get(&tetris.key).map(|w| w.title.as_str()), Some("Tetris"));
    }

    #[test]
    fn reopening_the_same_key_keeps_one_record() {
        let mut windows = WindowManager::default();
        for _ in 0..3 {
            windows.open(AppKind::Terminal, AppParams::Empty, SIZE);
        }
        assert_eq!(windows.len(), 1);
        assert_eq!(windows.top_z(), INITIAL_TOP_Z + 3);
    }

    #[test]
    fn reopening_a_text_window_merges_params_and_keeps_title() {
        let mut windows = WindowManager::default();
        let first = windows.open(AppKind::Notepad, text("t1", "a.txt", "hi"), SIZE);
        windows.toggle_minimize(&first.key);

        let incoming = AppParams::Text {
            id: Some(FileId::new("t1")),
            name: None,
            content: Some("bye".to_string()),
        };
        let second = windows.open(AppKind::Notepad, incoming, SIZE);
        assert!(!second.created);
        assert_eq!(second.key, first.key);

        let record = windows.get(&first.key).expect("record");
        assert_eq!(record.params, text("t1", "a.txt", "bye"));
        assert_eq!(record.title, "a.txt");
        assert!(!record.is_minimized);
        assert_eq!(windows.len(), 1);
    }

    #[test]
    fn distinct_files_get_distinct_windows() {
        let mut windows = WindowManager::default();
        let a = windows.open(AppKind::Notepad, text("t1", "a.txt", ""), SIZE);
        let b = windows.open(AppKind::Notepad, text("t2", "b.txt", ""), SIZE);
        let blank = windows.open(AppKind::Notepad, AppParams::Empty, SIZE);
        assert_ne!(a.key, b.key);
        assert_eq!(blank.key, WindowKey::singleton(AppKind::Notepad));
        assert_eq!(windows.len(), 3);
    }

    #[test]
    fn focus_raises_above_every_other_window() {
        let mut windows = WindowManager::default();
        let a = windows.open(AppKind::Paint, AppParams::Empty, SIZE).key;
        let b = windows.open(AppKind::Snake, AppParams::Empty, SIZE).key;
        let c = windows.open(AppKind::Music, AppParams::Empty, SIZE).key;

        assert!(windows.focus(&a));
        let top = windows.get(&a).expect("a").z_index;
        for other in [&b, &c] {
            assert!(windows.get(other).expect("other").z_index < top);
        }
        assert_eq!(windows.frontmost().map(|w| &w.key), Some(&a));
        assert!(!windows.focus(&WindowKey::singleton(AppKind::Doom)));
    }

    #[test]
    fn minimize_then_focus_restores_and_raises() {
        let mut windows = WindowManager::default();
        let key = windows.open(AppKind::Calculator, AppParams::Empty, SIZE).key;
        let before = windows.get(&key).expect("record").z_index;

        assert!(windows.toggle_minimize(&key));
        assert_eq!(windows.get(&key).map(|w| w.z_index), Some(before));
        assert_eq!(windows.frontmost(), None);

        windows.focus(&key);
        let record = windows.get(&key).expect("record");
        assert!(!record.is_minimized);
        assert!(record.z_index > before);
    }

    #[test]
    fn close_then_open_starts_fresh() {
        let mut windows = WindowManager::default();
        let key = windows.open(AppKind::Settings, AppParams::Empty, SIZE).key;
        windows.toggle_maximize(&key);
        let closed = windows.close(&key).expect("closed record");
        assert!(closed.is_maximized);
        assert!(windows.close(&key).is_none());

        let reopened = windows.open(AppKind::Settings, AppParams::Empty, SIZE);
        assert!(reopened.created);
        let record = windows.get(&key).expect("record");
        assert!(!record.is_maximized && !record.is_minimized);
        assert_eq!(record.z_index, INITIAL_TOP_Z + 2);
    }

    #[test]
    fn file_bound_windows_follow_renames_saves_and_deletes() {
        let mut windows = WindowManager::default();
        let note = windows.open(AppKind::Notepad, text("t1", "a.txt", "hi"), SIZE).key;
        let other = windows.open(AppKind::Notepad, text("t2", "b.txt", ""), SIZE).key;
        let t1 = FileId::new("t1");

        assert_eq!(windows.sync_file_name(&t1, "c.txt"), 1);
        assert_eq!(windows.get(&note).map(|w| w.title.as_str()), Some("c.txt"));

        assert_eq!(windows.sync_file_text(&t1, "d.txt", "bye"), 1);
        assert_eq!(windows.get(&note).map(|w| w.params.clone()), Some(text("t1", "d.txt", "bye")));

        assert_eq!(windows.close_bound_to(&t1), vec![note]);
        assert_eq!(windows.iter().map(|w| w.key.clone()).collect::<Vec<_>>(), vec![other]);
    }

    #[test]
    fn z_indices_are_unique_and_increasing() {
        let mut windows = WindowManager::default();
        let kinds = [AppKind::Paint, AppKind::Browser, AppKind::Snake, AppKind::Paint, AppKind::Snake];
        let mut seen = Vec::new();
        for kind in kinds {
            let key = windows.open(kind, AppParams::Empty, SIZE).key;
            seen.push(windows.get(&key).expect("record").z_index);
        }
        assert!(seen.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
