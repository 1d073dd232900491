use chrono::NaiveDateTime;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::os::unix::ffi::OsStringExt;
use std::path::{Path, PathBuf};

use crate::codec;
use crate::constants::{
    INFO_DIR, MAX_PATH, TRASHINFO_DATE_FORMAT, TRASHINFO_DATE_KEY, TRASHINFO_HEADER,
    TRASHINFO_PATH_KEY, TRASHINFO_SUFFIX,
};
use crate::error::RestoreError;
use crate::model::TrashInfoRecord;

/// `<dir>/<name>` -> `<dir>/../info/<name>.trashinfo`.
pub fn info_path_for(item: &Path) -> Option<PathBuf> {
    let name = item.file_name()?;
    let dir = item.parent().unwrap_or_else(|| Path::new(""));
    let trash_root = match dir.parent() {
        Some(root) => root.to_path_buf(),
        None => dir.join(".."),
    };

    let mut info_name = name.to_os_string();
    info_name.push(TRASHINFO_SUFFIX);
    Some(trash_root.join(INFO_DIR).join(info_name))
}

/// Reads the header and `Path=` line of a `.trashinfo` file.
///
/// The handle is dropped on every return path.
pub fn parse(info_path: &Path) -> Result<TrashInfoRecord, RestoreError> {
    let file = File::open(info_path).map_err(|e| RestoreError::Open(info_path.to_path_buf(), e))?;
    let mut reader = BufReader::new(file);
    let mut line = Vec::new();

    let read = reader
        .read_until(b'\n', &mut line)
        .map_err(|e| RestoreError::Read(info_path.to_path_buf(), Some(e)))?;
    if read == 0 || line.trim_ascii_end() != TRASHINFO_HEADER.as_bytes() {
        return Err(RestoreError::Format(info_path.to_path_buf()));
    }

    line.clear();
    let read = reader
        .read_until(b'\n', &mut line)
        .map_err(|e| RestoreError::Read(info_path.to_path_buf(), Some(e)))?;
    if read == 0 {
        return Err(RestoreError::Read(info_path.to_path_buf(), None));
    }

    let encoded = line
        .strip_prefix(TRASHINFO_PATH_KEY.as_bytes())
        .ok_or_else(|| RestoreError::Format(info_path.to_path_buf()))?;
    let mut decoded = codec::decode(encoded.trim_ascii_end(), MAX_PATH)
        .map_err(|e| RestoreError::Escape(info_path.to_path_buf(), e))?;
    let trimmed = decoded.trim_ascii_end().len();
    decoded.truncate(trimmed);

    let original_path = PathBuf::from(OsString::from_vec(decoded));
    let deletion_date = read_deletion_date(&mut reader);

    Ok(TrashInfoRecord {
        original_path,
        deletion_date,
    })
}

fn read_deletion_date(reader: &mut impl BufRead) -> Option<NaiveDateTime> {
    reader
        .lines()
        .map_while(Result::ok)
        .find_map(|line| {
            line.trim_end()
                .strip_prefix(TRASHINFO_DATE_KEY)
                .map(str::to_string)
        })
        .and_then(|value| NaiveDateTime::parse_from_str(&value, TRASHINFO_DATE_FORMAT).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn write_info(dir: &Path, content: &str) -> Result<PathBuf> {
        let path = dir.join("report.txt.trashinfo");
        fs::write(&path, content)?;
        Ok(path)
    }

    #[test]
    fn info_path_sits_in_sibling_info_dir() {
        assert_eq!(
            info_path_for(Path::new("/trash/files/report.txt")),
            Some(PathBuf::from("/trash/info/report.txt.trashinfo"))
        );
        assert_eq!(
            info_path_for(Path::new("files/a b")),
            Some(PathBuf::from("info/a b.trashinfo"))
        );
        assert_eq!(
            info_path_for(Path::new("/x")),
            Some(PathBuf::from("/../info/x.trashinfo"))
        );
    }

    #[test]
    fn parses_path_and_date() -> Result<()> {
        let dir = tempdir()?;
        let info = write_info(
            dir.path(),
            "[Trash Info]\nPath=%2Fhome%2Fuser%2Fmy%20report.txt\nDeletionDate=2024-01-01T10:20:30\n",
        )?;

        let record = parse(&info)?;
        assert_eq!(record.original_path, PathBuf::from("/home/user/my report.txt"));
        assert_eq!(
            record.deletion_date.map(|d| d.to_string()),
            Some("2024-01-01 10:20:30".to_string())
        );
        Ok(())
    }

    #[test]
    fn date_is_optional() -> Result<()> {
        let dir = tempdir()?;
        let info = write_info(dir.path(), "[Trash Info]\nPath=/tmp/a\r\n")?;
        let record = parse(&info)?;
        assert_eq!(record.original_path, PathBuf::from("/tmp/a"));
        assert!(record.deletion_date.is_none());
        Ok(())
    }

    #[test]
    fn wrong_header_is_format_error() -> Result<()> {
        let dir = tempdir()?;
        let info = write_info(dir.path(), "[Trash Inf]\nPath=/tmp/a\n")?;
        assert!(matches!(parse(&info), Err(RestoreError::Format(_))));

        let info = write_info(dir.path(), "")?;
        assert!(matches!(parse(&info), Err(RestoreError::Format(_))));
        Ok(())
    }

    #[test]
    fn missing_path_line_is_read_error() -> Result<()> {
        let dir = tempdir()?;
        let info = write_info(dir.path(), "[Trash Info]\n")?;
        assert!(matches!(parse(&info), Err(RestoreError::Read(_, None))));
        Ok(())
    }

    #[test]
    fn second_line_without_path_key_is_format_error() -> Result<()> {
        let dir = tempdir()?;
        let info = write_info(dir.path(), "[Trash Info]\nDeletionDate=2024-01-01T00:00:00\n")?;
        assert!(matches!(parse(&info), Err(RestoreError::Format(_))));
        Ok(())
    }

    #[test]
    fn missing_file_is_open_error() {
        let err = parse(Path::new("/nonexistent/unwaste/x.trashinfo")).unwrap_err();
        assert!(matches!(err, RestoreError::Open(..)));
    }

    #[test]
    fn oversized_path_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let long = "a".repeat(MAX_PATH);
        let info = write_info(dir.path(), &format!("[Trash Info]\nPath=/{long}\n"))?;
        assert!(matches!(
            parse(&info),
            Err(RestoreError::Escape(_, codec::CodecError::Overflow { .. }))
        ));
        Ok(())
    }
}
