use chrono::NaiveDateTime;
use humansize::{BINARY, format_size};
use std::ffi::OsString;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

use crate::constants::FILES_DIR;

/// A trash root holding `files/` and `info/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashLocation {
    pub root: PathBuf,
}

impl TrashLocation {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn files_dir(&self) -> PathBuf {
        self.root.join(FILES_DIR)
    }
}

/// Ordered trash locations with a cursor that never wraps around.
#[derive(Debug, Clone)]
pub struct TrashLocations {
    locations: Vec<TrashLocation>,
    cursor: usize,
}

impl TrashLocations {
    pub fn new(locations: Vec<TrashLocation>) -> Self {
        Self {
            locations,
            cursor: 0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrashLocation> {
        self.locations.iter()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&TrashLocation> {
        self.locations.get(self.cursor)
    }

    pub fn has_next(&self) -> bool {
        self.cursor + 1 < self.locations.len()
    }

    pub fn has_previous(&self) -> bool {
        self.cursor > 0
    }

    /// Moves to the next location; returns false at the last one.
    pub fn advance(&mut self) -> bool {
        if self.has_next() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Moves to the previous location; returns false at the first one.
    pub fn retreat(&mut self) -> bool {
        if self.has_previous() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
}

impl EntryKind {
    fn from_metadata(metadata: &Metadata) -> Self {
        let file_type = metadata.file_type();
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Directory
        } else {
            Self::File
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Self::File => "",
            Self::Directory => " (D)",
            Self::Symlink => " (L)",
        }
    }
}

/// One item sitting in a location's `files/` directory.
#[derive(Debug, Clone)]
pub struct TrashEntry {
    pub name: OsString,
    pub size: u64,
    pub kind: EntryKind,
}

impl TrashEntry {
    /// Builds an entry from `lstat` metadata (symlinks are not followed).
    pub fn from_metadata(name: OsString, metadata: &Metadata) -> Self {
        Self {
            name,
            size: metadata.len(),
            kind: EntryKind::from_metadata(metadata),
        }
    }

    pub fn path_in(&self, files_dir: &Path) -> PathBuf {
        files_dir.join(&self.name)
    }

    /// `[1.5 MiB] (D)` style annotation.
    pub fn description(&self) -> String {
        format!(
            "[{}]{}",
            format_size(self.size, BINARY.decimal_places(1)),
            self.kind.marker()
        )
    }
}

/// Decoded contents of a `.trashinfo` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashInfoRecord {
    pub original_path: PathBuf,
    pub deletion_date: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locations(n: usize) -> TrashLocations {
        TrashLocations::new(
            (0..n)
                .map(|i| TrashLocation::new(format!("/waste{i}")))
                .collect(),
        )
    }

    #[test]
    fn cursor_stops_at_both_ends() {
        let mut locs = locations(3);
        assert!(!locs.has_previous());
        assert!(!locs.retreat());
        assert_eq!(locs.position(), 0);

        assert!(locs.advance());
        assert!(locs.advance());
        assert!(!locs.advance());
        assert_eq!(locs.position(), 2);
        assert_eq!(locs.current().unwrap().root, PathBuf::from("/waste2"));

        assert!(locs.retreat());
        assert_eq!(locs.position(), 1);
    }

    #[test]
    fn empty_collection_has_no_current() {
        let mut locs = locations(0);
        assert!(locs.current().is_none());
        assert!(!locs.advance());
        assert!(!locs.retreat());
    }

    #[test]
    fn location_files_dir() {
        let loc = TrashLocation::new("/trash");
        assert_eq!(loc.files_dir(), PathBuf::from("/trash/files"));
    }

    #[test]
    fn description_uses_binary_units_and_markers() {
        let entry = TrashEntry {
            name: "big".into(),
            size: 1536 * 1024,
            kind: EntryKind::Directory,
        };
        assert_eq!(entry.description(), "[1.5 MiB] (D)");

        let link = TrashEntry {
            name: "l".into(),
            size: 12,
            kind: EntryKind::Symlink,
        };
        assert!(link.description().ends_with(" (L)"));
    }
}
