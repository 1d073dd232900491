use jwalk::WalkDir;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::RestoreError;
use crate::model::{TrashEntry, TrashInfoRecord};
use crate::trashinfo;

/// Lists a `files/` directory, `lstat`-ing each entry. Sorted by name.
pub fn list_entries(files_dir: &Path) -> Result<Vec<TrashEntry>, RestoreError> {
    let read_dir =
        fs::read_dir(files_dir).map_err(|e| RestoreError::OpenDir(files_dir.to_path_buf(), e))?;

    let mut entries: Vec<TrashEntry> = read_dir
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let path = entry.path();
            match fs::symlink_metadata(&path) {
                Ok(metadata) => Some(TrashEntry::from_metadata(entry.file_name(), &metadata)),
                Err(e) => {
                    debug!("skipping {}: {e}", path.display());
                    None
                }
            }
        })
        .collect();

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// What the details pane shows for the highlighted entry.
#[derive(Debug)]
pub struct EntryDetails {
    pub record: Result<TrashInfoRecord, String>,
    /// Total bytes and file count below a directory; `None` for other kinds.
    pub contents: Option<(u64, usize)>,
}

pub fn inspect(item: &Path, is_dir: bool) -> EntryDetails {
    let record = trashinfo::info_path_for(item)
        .ok_or_else(|| "no .trashinfo path".to_string())
        .and_then(|info| trashinfo::parse(&info).map_err(|e| e.to_string()));

    EntryDetails {
        record,
        contents: is_dir.then(|| directory_usage(item)),
    }
}

fn directory_usage(path: &Path) -> (u64, usize) {
    let mut size = 0;
    let mut files = 0;

    // Serial walk; this runs on the UI thread between key presses.
    for entry in WalkDir::new(path)
        .skip_hidden(false)
        .parallelism(jwalk::Parallelism::Serial)
        .into_iter()
        .flatten()
    {
        if let Ok(metadata) = entry.metadata()
            && metadata.is_file()
        {
            size += metadata.len();
            files += 1;
        }
    }

    (size, files)
}
