use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{APP_NAME, CONFIG_FILE, DEFAULT_WASTE_DIR, UNDO_FILE};
use crate::model::{TrashLocation, TrashLocations};

pub struct Config {
    pub home: PathBuf,
    pub waste: Vec<PathBuf>,
}

impl Config {
    /// Loads the config file, `path` or `<config_dir>/unwaste/config`.
    /// A missing default file is not an error; a missing explicit one is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let home = dirs::home_dir().context("Home directory not found")?;

        let content = match path {
            Some(path) => Some(
                fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?,
            ),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
                .filter(|p| p.exists())
                .and_then(|p| fs::read_to_string(p).ok()),
        };

        let mut config = content.map_or_else(
            || Self {
                home: home.clone(),
                waste: Vec::new(),
            },
            |text| Self::parse(&text, &home),
        );

        if config.waste.is_empty()
            && let Some(data_dir) = dirs::data_dir()
        {
            config.waste.push(data_dir.join(DEFAULT_WASTE_DIR));
        }

        Ok(config)
    }

    /// Parses `WASTE = <path>` lines; `#` comments and blank lines are skipped.
    pub fn parse(text: &str, home: &Path) -> Self {
        let mut waste = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            match trimmed.split_once('=') {
                Some((key, value)) if key.trim() == "WASTE" => {
                    waste.push(expand_home(value.trim(), home));
                }
                _ => debug!("ignoring config line: {trimmed}"),
            }
        }

        Self {
            home: home.to_path_buf(),
            waste,
        }
    }

    pub fn undo_log(&self) -> PathBuf {
        self.home.join(UNDO_FILE)
    }

    pub fn locations(&self) -> TrashLocations {
        TrashLocations::new(self.waste.iter().map(TrashLocation::new).collect())
    }
}

fn expand_home(value: &str, home: &Path) -> PathBuf {
    let rest = value
        .strip_prefix("~")
        .or_else(|| value.strip_prefix("$HOME"));
    match rest {
        Some(rest) => home.join(rest.trim_start_matches('/')),
        None => PathBuf::from(value),
    }
}
