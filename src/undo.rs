use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use tracing::{debug, error, warn};

use crate::restore::{Restorer, is_failure, warn_restore};

/// Restores every path listed in the undo log, one per line.
///
/// Returns how many entries failed. The log is deleted only when none did,
/// so a partial undo can be retried.
pub fn replay_and_clear(log_path: &Path, restorer: &Restorer<'_>) -> usize {
    let file = match File::open(log_path) {
        Ok(file) => file,
        Err(e) => {
            error!("while opening {}: {e}", log_path.display());
            return 0;
        }
    };

    // Entries are raw bytes; a path need not be valid UTF-8.
    let mut failures = 0;
    for line in BufReader::new(file).split(b'\n') {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("while reading {}: {e}", log_path.display());
                failures += 1;
                break;
            }
        };
        let entry = line.trim_ascii_end();
        if entry.is_empty() {
            continue;
        }

        let result = restorer.restore(Path::new(OsStr::from_bytes(entry)));
        warn_restore(&result);
        if is_failure(&result) {
            failures += 1;
        }
    }

    if failures > 0 {
        debug!(
            "{failures} entries failed; keeping {}",
            log_path.display()
        );
        return failures;
    }

    if let Err(e) = fs::remove_file(log_path) {
        warn!("failed to remove {}: {e}", log_path.display());
    }
    failures
}
