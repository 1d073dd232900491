use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::MAX_PATH;
use crate::error::RestoreError;

pub(crate) fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Picks where a restored item lands and makes sure its parent exists.
///
/// An occupied destination gets `time_suffix` appended. If even that name is
/// taken the restore is refused rather than overwriting anything.
pub fn resolve(decoded: &Path, time_suffix: &str) -> Result<PathBuf, RestoreError> {
    let mut dest = decoded.to_path_buf();

    if entry_exists(&dest) {
        let needed = dest.as_os_str().as_bytes().len() + time_suffix.len() + 1;
        if needed > MAX_PATH {
            return Err(RestoreError::Overflow {
                context: format!("{}{time_suffix}", dest.display()),
                needed,
                available: MAX_PATH,
            });
        }

        dest.as_mut_os_string().push(time_suffix);
        info!("Duplicate filename at destination - appending time string...");

        if entry_exists(&dest) {
            return Err(RestoreError::DestinationExists(dest));
        }
    }

    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
        && !entry_exists(parent)
    {
        fs::create_dir_all(parent)
            .map_err(|e| RestoreError::DirectoryCreate(parent.to_path_buf(), e))?;
        info!("created directory {}", parent.display());
    }

    Ok(dest)
}
