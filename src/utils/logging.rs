//! Log file setup.
//!
//! The TUI owns the terminal, so log records go to a file through
//! `simplelog::WriteLogger`. The core never touches the logger directly; it
//! reports through [crate::core::LogObserver].

use crate::config::InternalGeneral;

use log::LevelFilter;
use simplelog::WriteLogger;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;

/// `<cache_dir>/treeseek/treeseek.log`
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("treeseek").join("treeseek.log"))
}

/// Installs the global file logger.
///
/// Returns the log file path, or `None` when logging is turned off or no
/// location could be determined.
pub fn init_logging(general: &InternalGeneral) -> io::Result<Option<PathBuf>> {
    let level = general.log_level();
    if level == LevelFilter::Off {
        return Ok(None);
    }

    let Some(path) = general.log_file().cloned().or_else(default_log_path) else {
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    WriteLogger::init(level, simplelog::Config::default(), file).map_err(io::Error::other)?;
    log::info!("treeseek {} started", env!("CARGO_PKG_VERSION"));
    Ok(Some(path))
}
