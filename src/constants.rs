pub const APP_NAME: &str = "unwaste";

pub const FILES_DIR: &str = "files";
pub const INFO_DIR: &str = "info";
pub const TRASHINFO_SUFFIX: &str = ".trashinfo";
pub const TRASHINFO_HEADER: &str = "[Trash Info]";
pub const TRASHINFO_PATH_KEY: &str = "Path=";
pub const TRASHINFO_DATE_KEY: &str = "DeletionDate=";
pub const TRASHINFO_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Ceiling for every path buffer (decoded paths, suffixed destinations).
pub const MAX_PATH: usize = 4096;

pub const CONFIG_FILE: &str = "config";
pub const UNDO_FILE: &str = ".config/unwaste/lastrm";
pub const DEFAULT_WASTE_DIR: &str = "Trash";

pub const TIME_SUFFIX_FORMAT: &str = "_%H%M%S-%y%m%d";
