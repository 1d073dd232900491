use std::io;
use std::path::PathBuf;

use crate::codec::CodecError;

pub const CODE_NOT_FOUND: i32 = 64;
pub const CODE_FORMAT: i32 = 65;
pub const CODE_READ: i32 = 66;
pub const CODE_OPEN: i32 = 67;
pub const CODE_OPEN_DIR: i32 = 68;
pub const CODE_DIR_CREATE: i32 = 69;
pub const CODE_OVERFLOW: i32 = 70;
pub const CODE_DEST_EXISTS: i32 = 71;
pub const CODE_INVALID_ESCAPE: i32 = 72;

/// Every way a single restore (or a selector refresh) can fail.
#[derive(thiserror::Error, Debug)]
pub enum RestoreError {
    #[error("File not found: '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("format of .trashinfo file '{}' is incorrect", .0.display())]
    Format(PathBuf),

    /// The second line (`Path=...`) could not be read.
    #[error("able to open '{}' but could not read the Path= line", .0.display())]
    Read(PathBuf, #[source] Option<io::Error>),

    #[error("while opening {}: {}", .0.display(), .1)]
    Open(PathBuf, #[source] io::Error),

    #[error("while opening directory {}: {}", .0.display(), .1)]
    OpenDir(PathBuf, #[source] io::Error),

    #[error("could not create destination directory {}: {}", .0.display(), .1)]
    DirectoryCreate(PathBuf, #[source] io::Error),

    #[error("path too long while building {context}: needed {needed} bytes, limit is {available}")]
    Overflow {
        context: String,
        needed: usize,
        available: usize,
    },

    #[error("destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("bad escape in .trashinfo file '{}': {}", .0.display(), .1)]
    Escape(PathBuf, #[source] CodecError),

    #[error("Restore (rename) failed: {}: {}", .0.display(), .1)]
    Rename(PathBuf, #[source] io::Error),
}

impl RestoreError {
    /// Numeric outcome code; a failed rename reports the raw OS errno.
    pub fn code(&self) -> i32 {
        match self {
            Self::NotFound(_) => CODE_NOT_FOUND,
            Self::Format(_) => CODE_FORMAT,
            Self::Read(..) => CODE_READ,
            Self::Open(..) => CODE_OPEN,
            Self::OpenDir(..) => CODE_OPEN_DIR,
            Self::DirectoryCreate(..) => CODE_DIR_CREATE,
            Self::Overflow { .. } => CODE_OVERFLOW,
            Self::DestinationExists(_) => CODE_DEST_EXISTS,
            Self::Escape(_, CodecError::Overflow { .. }) => CODE_OVERFLOW,
            Self::Escape(..) => CODE_INVALID_ESCAPE,
            Self::Rename(_, err) => err.raw_os_error().unwrap_or(-1),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_reports_os_errno() {
        let err = RestoreError::Rename(
            PathBuf::from("/x"),
            io::Error::from_raw_os_error(18),
        );
        assert_eq!(err.code(), 18);
    }

    #[test]
    fn decode_overflow_maps_to_overflow_code() {
        let err = RestoreError::Escape(
            PathBuf::from("/i"),
            CodecError::Overflow {
                needed: 10,
                available: 4,
            },
        );
        assert_eq!(err.code(), CODE_OVERFLOW);
        assert!(!err.is_not_found());
        assert!(RestoreError::NotFound(PathBuf::from("a")).is_not_found());
    }
}
