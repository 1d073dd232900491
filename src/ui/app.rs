use crossterm::event::KeyCode;
use ratatui::widgets::ListState;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use crate::error::RestoreError;
use crate::listing::{self, EntryDetails};
use crate::model::{EntryKind, TrashEntry, TrashLocations};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Browsing,
    Selecting,
    Confirmed,
    Quit,
}

pub struct App {
    pub locations: TrashLocations,
    pub entries: Vec<TrashEntry>,
    pub marked: BTreeSet<usize>,
    pub list_state: ListState,
    pub state: AppState,
    /// Rows visible in the list; updated on every draw.
    pub page_size: usize,
    details: HashMap<usize, EntryDetails>,
}

impl App {
    pub fn new(locations: TrashLocations) -> Result<Self, RestoreError> {
        let mut app = Self {
            locations,
            entries: Vec::new(),
            marked: BTreeSet::new(),
            list_state: ListState::default(),
            state: AppState::Browsing,
            page_size: 10,
            details: HashMap::new(),
        };
        app.refresh()?;
        Ok(app)
    }

    pub fn files_dir(&self) -> Option<PathBuf> {
        self.locations.current().map(|l| l.files_dir())
    }

    /// Re-reads the current location. Selection does not survive a refresh.
    pub fn refresh(&mut self) -> Result<(), RestoreError> {
        self.entries = match self.files_dir() {
            Some(dir) => listing::list_entries(&dir)?,
            None => Vec::new(),
        };
        self.marked.clear();
        self.details.clear();
        self.state = AppState::Browsing;
        self.list_state
            .select(if self.entries.is_empty() { None } else { Some(0) });
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<(), RestoreError> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.state = AppState::Quit,
            KeyCode::Down | KeyCode::Char('j') => self.move_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-1),
            KeyCode::PageDown => self.move_by(self.page_delta()),
            KeyCode::PageUp => self.move_by(-self.page_delta()),
            KeyCode::Char(' ') => self.toggle(),
            KeyCode::Right | KeyCode::Char('l') => {
                if self.locations.advance() {
                    self.refresh()?;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if self.locations.retreat() {
                    self.refresh()?;
                }
            }
            KeyCode::Enter => self.state = AppState::Confirmed,
            _ => {}
        }
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, AppState::Confirmed | AppState::Quit)
    }

    fn page_delta(&self) -> isize {
        isize::try_from(self.page_size.max(1)).unwrap_or(isize::MAX)
    }

    /// Moves the highlight, clamping at both ends.
    fn move_by(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        let current = self.list_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(last);
        self.list_state.select(Some(next));
    }

    pub fn toggle(&mut self) {
        if let Some(i) = self.list_state.selected()
            && i < self.entries.len()
            && !self.marked.remove(&i)
        {
            self.marked.insert(i);
        }
        self.state = if self.marked.is_empty() {
            AppState::Browsing
        } else {
            AppState::Selecting
        };
    }

    pub fn total_selected_size(&self) -> u64 {
        self.marked
            .iter()
            .filter_map(|&i| self.entries.get(i))
            .map(|e| e.size)
            .sum()
    }

    /// Full paths of the marked entries in the current location.
    pub fn selected_paths(&self) -> Vec<PathBuf> {
        let Some(dir) = self.files_dir() else {
            return Vec::new();
        };
        self.marked
            .iter()
            .filter_map(|&i| self.entries.get(i))
            .map(|e| e.path_in(&dir))
            .collect()
    }

    /// Details for the highlighted entry, computed once per refresh.
    pub fn highlighted_details(&mut self) -> Option<&EntryDetails> {
        let i = self.list_state.selected()?;
        let entry = self.entries.get(i)?;
        let path = entry.path_in(&self.files_dir()?);
        let is_dir = entry.kind == EntryKind::Directory;
        Some(
            self.details
                .entry(i)
                .or_insert_with(|| listing::inspect(&path, is_dir)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrashLocation;
    use anyhow::Result;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn location_with(root: &Path, names: &[&str]) -> Result<TrashLocation> {
        fs::create_dir_all(root.join("files"))?;
        for name in names {
            fs::write(root.join("files").join(name), name.as_bytes())?;
        }
        Ok(TrashLocation::new(root))
    }

    #[test]
    fn toggling_drives_state_and_selection() -> Result<()> {
        let dir = tempdir()?;
        let loc = location_with(dir.path(), &["a", "b", "c"])?;
        let mut app = App::new(TrashLocations::new(vec![loc]))?;

        assert_eq!(app.state, AppState::Browsing);
        app.handle_key(KeyCode::Char(' '))?;
        app.handle_key(KeyCode::Down)?;
        app.handle_key(KeyCode::Down)?;
        app.handle_key(KeyCode::Char(' '))?;
        assert_eq!(app.state, AppState::Selecting);
        assert_eq!(app.total_selected_size(), 2);

        let files = dir.path().join("files");
        assert_eq!(app.selected_paths(), vec![files.join("a"), files.join("c")]);

        app.handle_key(KeyCode::Char(' '))?;
        app.handle_key(KeyCode::Up)?;
        app.handle_key(KeyCode::Up)?;
        app.handle_key(KeyCode::Char(' '))?;
        assert!(app.marked.is_empty());
        assert_eq!(app.state, AppState::Browsing);
        Ok(())
    }

    #[test]
    fn movement_clamps_and_pages() -> Result<()> {
        let dir = tempdir()?;
        let names: Vec<String> = (0..25).map(|i| format!("f{i:02}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let loc = location_with(dir.path(), &refs)?;
        let mut app = App::new(TrashLocations::new(vec![loc]))?;
        app.page_size = 10;

        app.handle_key(KeyCode::Up)?;
        assert_eq!(app.list_state.selected(), Some(0));
        app.handle_key(KeyCode::PageDown)?;
        assert_eq!(app.list_state.selected(), Some(10));
        app.handle_key(KeyCode::PageDown)?;
        app.handle_key(KeyCode::PageDown)?;
        assert_eq!(app.list_state.selected(), Some(24));
        app.handle_key(KeyCode::Down)?;
        assert_eq!(app.list_state.selected(), Some(24));
        app.handle_key(KeyCode::PageUp)?;
        assert_eq!(app.list_state.selected(), Some(14));
        Ok(())
    }

    #[test]
    fn location_switch_has_no_wraparound() -> Result<()> {
        let dir = tempdir()?;
        let first = location_with(&dir.path().join("one"), &["x"])?;
        let second = location_with(&dir.path().join("two"), &["y", "z"])?;
        let mut app = App::new(TrashLocations::new(vec![first, second]))?;

        app.handle_key(KeyCode::Char(' '))?;
        app.handle_key(KeyCode::Left)?;
        assert_eq!(app.locations.position(), 0);
        assert_eq!(app.marked.len(), 1);

        app.handle_key(KeyCode::Right)?;
        assert_eq!(app.locations.position(), 1);
        assert_eq!(app.entries.len(), 2);
        assert!(app.marked.is_empty());

        app.handle_key(KeyCode::Right)?;
        assert_eq!(app.locations.position(), 1);
        Ok(())
    }

    #[test]
    fn confirm_and_quit_finish_the_session() -> Result<()> {
        let dir = tempdir()?;
        let loc = location_with(dir.path(), &["a"])?;
        let mut app = App::new(TrashLocations::new(vec![loc.clone()]))?;
        app.handle_key(KeyCode::Enter)?;
        assert_eq!(app.state, AppState::Confirmed);
        assert!(app.is_finished());

        let mut app = App::new(TrashLocations::new(vec![loc]))?;
        app.handle_key(KeyCode::Char('q'))?;
        assert_eq!(app.state, AppState::Quit);
        assert!(app.selected_paths().is_empty());
        Ok(())
    }

    #[test]
    fn unreadable_location_fails_session() {
        let locations = TrashLocations::new(vec![TrashLocation::new("/nonexistent/unwaste")]);
        assert!(matches!(App::new(locations), Err(RestoreError::OpenDir(..))));
    }

    #[test]
    fn empty_location_ignores_movement() -> Result<()> {
        let dir = tempdir()?;
        let loc = location_with(dir.path(), &[])?;
        let mut app = App::new(TrashLocations::new(vec![loc]))?;
        app.handle_key(KeyCode::Down)?;
        app.handle_key(KeyCode::Char(' '))?;
        assert_eq!(app.list_state.selected(), None);
        assert!(app.marked.is_empty());
        Ok(())
    }
}
