//! Helpers for treeseek.
//!
//! Defines the limits for the number of search results kept per search and a few
//! path utilities:
//! - Locating and expanding the home directory ("~")
//! - Displaying home directories as "~" in paths
//! - Resolving the directory treeseek starts in

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// The lowest accepted `max_results`.
pub const MIN_MAX_RESULTS: usize = 15;
/// The default search result limit. Can be overwritten in treeseek.toml.
pub const DEFAULT_MAX_RESULTS: usize = 2000;
/// The highest accepted `max_results`.
pub const MAX_MAX_RESULTS: usize = 1_000_000;

/// Safely clamp the search result limit.
pub fn clamp_max_results(value: usize) -> usize {
    let clamped = value.clamp(MIN_MAX_RESULTS, MAX_MAX_RESULTS);
    if clamped != value {
        eprintln!(
            "[Warning] max_results={} out of range ({}..={}), clamped to {}",
            value, MIN_MAX_RESULTS, MAX_MAX_RESULTS, clamped
        );
    }
    clamped
}

pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Expands a leading "~" to the home directory.
pub fn expand_home_path(input: &str) -> PathBuf {
    let trimmed = input.trim();
    if trimmed == "~" {
        return get_home().unwrap_or_else(|| PathBuf::from(trimmed));
    }
    if let Some(rest) = trimmed
        .strip_prefix("~/")
        .or_else(|| trimmed.strip_prefix("~\\"))
        && let Some(home) = get_home()
    {
        return home.join(rest);
    }
    PathBuf::from(trimmed)
}

/// Shortens the home directory prefix of `path` to "~".
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = get_home()
        && let Ok(stripped) = path.strip_prefix(&home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", MAIN_SEPARATOR, stripped.display());
    }
    path.display().to_string()
}

/// Turns a command line path argument into an absolute directory path.
pub fn resolve_initial_dir(arg: &str) -> PathBuf {
    let path = expand_home_path(arg);
    std::path::absolute(&path).unwrap_or(path)
}

/// The filesystem root that contains `path`, `/` on unix.
pub fn filesystem_root(path: &Path) -> PathBuf {
    path.ancestors()
        .last()
        .filter(|root| !root.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(MAIN_SEPARATOR.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_values_in_range() {
        assert_eq!(clamp_max_results(0), MIN_MAX_RESULTS);
        assert_eq!(clamp_max_results(500), 500);
        assert_eq!(clamp_max_results(usize::MAX), MAX_MAX_RESULTS);
    }

    #[test]
    fn home_expansion_and_shortening() {
        let Some(home) = get_home() else {
            return;
        };
        assert_eq!(expand_home_path("~"), home);
        assert_eq!(expand_home_path("~/docs"), home.join("docs"));
        assert_eq!(shorten_home_path(&home), "~");
        assert_eq!(
            shorten_home_path(home.join("docs")),
            format!("~{}docs", MAIN_SEPARATOR)
        );
    }

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(expand_home_path("/tmp/x"), PathBuf::from("/tmp/x"));
        assert_eq!(expand_home_path("rel/dir"), PathBuf::from("rel/dir"));
    }

    #[cfg(unix)]
    #[test]
    fn root_of_unix_paths() {
        assert_eq!(filesystem_root(Path::new("/usr/lib")), PathBuf::from("/"));
        assert_eq!(filesystem_root(Path::new("/")), PathBuf::from("/"));
    }

    #[test]
    fn initial_dir_is_absolute() {
        assert!(resolve_initial_dir(".").is_absolute());
    }
}
