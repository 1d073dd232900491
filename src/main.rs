mod codec;
mod config;
mod constants;
mod destination;
mod error;
mod listing;
mod model;
mod restore;
mod trashinfo;
mod ui;
mod undo;

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::Config;
use restore::{Restoration, Restorer, is_failure, warn_restore};

#[derive(Parser)]
#[command(version, about, long_about = None, disable_version_flag = true)]
struct Cli {
    /// Trashed files to restore (full path, or a bare name to search every waste folder)
    files: Vec<PathBuf>,

    /// Pick items to restore from a menu
    #[arg(short, long)]
    select: bool,

    /// Restore the files removed by the last trash run
    #[arg(short, long)]
    undo_last: bool,

    /// Waste folder to use instead of the configured ones (repeatable)
    #[arg(short = 'W', long = "waste", value_name = "DIR")]
    waste: Vec<PathBuf>,

    /// Read configuration from FILE
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print more about what is being done
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Print version information
    #[arg(short = 'V', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if !cli.waste.is_empty() {
        config.waste = cli.waste;
    }
    debug!("waste folders: {:?}", config.waste);

    let time_suffix = chrono::Local::now()
        .format(constants::TIME_SUFFIX_FORMAT)
        .to_string();
    let locations = config.locations();
    if locations.is_empty() {
        bail!("no waste folders configured");
    }
    let restorer = Restorer::new(&locations, &time_suffix);

    let failures = if cli.select {
        ui::select_and_restore(locations.clone(), &restorer)?
    } else if cli.undo_last {
        undo::replay_and_clear(&config.undo_log(), &restorer)
    } else if cli.files.is_empty() {
        bail!("nothing to restore; pass FILE..., --select or --undo-last");
    } else {
        restore_files(&cli.files, &restorer)
    };

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn restore_files(files: &[PathBuf], restorer: &Restorer<'_>) -> usize {
    let mut failures = 0;
    for file in files {
        let result = restorer.restore(file);
        warn_restore(&result);
        if is_failure(&result) {
            failures += 1;
        }
        match result {
            Ok(Restoration::Moved { from, to, .. }) => {
                debug!("restored {} to {}", from.display(), to.display());
            }
            Ok(Restoration::Searched { attempts }) => {
                debug!("searched {} waste folders", attempts.len());
            }
            Err(_) => {}
        }
    }
    failures
}
