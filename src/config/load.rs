//! The main config loading module for treeseek.
//!
//! Handles loading and deserializing settings from `treeseek.toml` into the
//! [Config] struct, through the internal [RawConfig] used for parsing.
//! Also writes the default config for `tsk --init`.

use crate::config::{General, InternalGeneral, InternalSearch, Keys, Search};
use crate::utils::get_home;

use serde::Deserialize;
use std::{fs, io, path::Path, path::PathBuf};

/// Raw configuration as read from the toml file.
/// It is converted into the main [Config] struct after parsing.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    search: Search,
    keys: Keys,
}

/// Processed configuration used by treeseek.
#[derive(Debug)]
pub struct Config {
    general: InternalGeneral,
    search: InternalSearch,
    keys: Keys,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            search: InternalSearch::from(raw.search),
            keys: raw.keys,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    /// If the file does not exist or fails to parse, returns the default configuration.
    ///
    /// Runs before logging is set up, so problems go to stderr.
    pub fn load() -> Self {
        let path = Self::default_path();

        if !path.exists() {
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parses the config at `path`.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> io::Result<Self> {
        toml::from_str::<RawConfig>(content)
            .map(Config::from)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn search(&self) -> &InternalSearch {
        &self.search
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Determine the default configuration file path.
    /// Checks the TREESEEK_CONFIG environment variable first,
    /// then XDG_CONFIG_HOME,
    /// then defaults to ~/.config/treeseek/treeseek.toml.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("TREESEEK_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("treeseek/treeseek.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/treeseek/treeseek.toml");
        }
        PathBuf::from("treeseek.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)
    }
}

impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

const DEFAULT_TOML: &str = r##"# treeseek.toml - default configuration

[general]
dirs_first = true
show_hidden = false
# start_dir = "~/projects"
# log_level = "info"          # "off", "error", "warn", "info", "debug", "trace"
# log_file = "~/.cache/treeseek/treeseek.log"

[search]
# max_results = 2000          # min: 15, max: 1_000_000
# jump_to_first_match = true

# [keys]
# open_file = ["Enter", "o"]
# go_up = ["k", "Up"]
# go_down = ["j", "Down"]
# go_parent = ["h", "Left", "Backspace"]
# go_into_dir = ["l", "Right"]
# root_reset = ["r"]
# go_home = ["~"]
# go_to_path = ["p"]
# find = ["s", "/"]
# cancel_find = ["Ctrl+c"]
# next_result = ["n"]
# prev_result = ["Shift+n"]
# quit = ["q", "Esc"]
"##;
