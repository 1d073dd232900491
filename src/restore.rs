use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::destination::{self, entry_exists};
use crate::error::RestoreError;
use crate::model::TrashLocations;
use crate::trashinfo;

/// What a successful call to [`Restorer::restore`] did.
#[derive(Debug)]
pub enum Restoration {
    Moved {
        from: PathBuf,
        to: PathBuf,
        /// Set when the payload moved but its `.trashinfo` could not be removed.
        stale_info: Option<PathBuf>,
    },
    /// Basename lookup across every location; one attempt per location.
    Searched {
        attempts: Vec<(PathBuf, Result<Restoration, RestoreError>)>,
    },
}

pub type RestoreResult = Result<Restoration, RestoreError>;

/// Moves trashed items back to the path recorded in their `.trashinfo`.
pub struct Restorer<'a> {
    locations: &'a TrashLocations,
    time_suffix: &'a str,
    cwd: PathBuf,
}

impl<'a> Restorer<'a> {
    pub fn new(locations: &'a TrashLocations, time_suffix: &'a str) -> Self {
        Self {
            locations,
            time_suffix,
            cwd: env::current_dir().unwrap_or_else(|e| {
                debug!("current directory unavailable ({e}); relative paths use the process cwd");
                PathBuf::new()
            }),
        }
    }

    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn restore(&self, item: &Path) -> RestoreResult {
        let is_bare_name = item.parent().is_none_or(|p| p.as_os_str().is_empty());
        if is_bare_name && !entry_exists(&self.cwd.join(item)) {
            return Ok(self.search_by_basename(item));
        }

        let item = self.cwd.join(item);
        if !entry_exists(&item) {
            println!(" :File not found: '{}'", item.display());
            return Err(RestoreError::NotFound(item));
        }
        self.restore_direct(&item)
    }

    fn search_by_basename(&self, name: &Path) -> Restoration {
        info!("Searching using only the basename...");

        let attempts = self
            .locations
            .iter()
            .map(|location| {
                let candidate = location.files_dir().join(name);
                let result = self.restore(&candidate);
                warn_restore(&result);
                (candidate, result)
            })
            .collect();

        info!("search complete");
        Restoration::Searched { attempts }
    }

    fn restore_direct(&self, item: &Path) -> RestoreResult {
        let info_path = trashinfo::info_path_for(item)
            .ok_or_else(|| RestoreError::NotFound(item.to_path_buf()))?;

        let record = trashinfo::parse(&info_path)?;
        let dest = destination::resolve(&record.original_path, self.time_suffix)?;

        fs::rename(item, &dest).map_err(|e| RestoreError::Rename(dest.clone(), e))?;
        println!("+'{}' -> '{}'", item.display(), dest.display());

        let stale_info = match fs::remove_file(&info_path) {
            Ok(()) => {
                info!("-{}", info_path.display());
                None
            }
            Err(e) => {
                warn!(
                    "Error while removing .trashinfo file '{}': {e}",
                    info_path.display()
                );
                Some(info_path)
            }
        };

        Ok(Restoration::Moved {
            from: item.to_path_buf(),
            to: dest,
            stale_info,
        })
    }
}

/// Counts as a failure in batch totals. A moved payload whose `.trashinfo`
/// could not be removed is restored, so it is not one.
pub fn is_failure(result: &RestoreResult) -> bool {
    result.is_err()
}

/// Warns about any failed outcome except a plain "not found".
pub fn warn_restore(result: &RestoreResult) {
    if let Err(err) = result
        && !err.is_not_found()
    {
        warn!("Restore() returned {}: {err}", err.code());
    }
}
