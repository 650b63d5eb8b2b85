//! Directory listing for the tree pane.
//!
//! Provides the [FileEntry] struct and [browse_dir], which reads one directory
//! level and sorts it for display.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::Path;

/// A single entry of a directory listing.
#[derive(Debug, Clone)]
pub struct FileEntry {
    name: Box<OsStr>,
    flags: u8,
}

impl FileEntry {
    pub(super) const IS_DIR: u8 = 1 << 0;
    pub(super) const IS_HIDDEN: u8 = 1 << 1;
    pub(super) const IS_SYMLINK: u8 = 1 << 2;

    pub fn new(name: OsString, flags: u8) -> Self {
        FileEntry {
            name: name.into_boxed_os_str(),
            flags,
        }
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.flags & Self::IS_DIR != 0
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.flags & Self::IS_HIDDEN != 0
    }

    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.flags & Self::IS_SYMLINK != 0
    }
}

/// Listing options taken from the config.
#[derive(Debug, Clone, Copy)]
pub struct ListOptions {
    pub dirs_first: bool,
    pub show_hidden: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            dirs_first: true,
            show_hidden: false,
        }
    }
}

/// Reads the entries of `path`, filtered and sorted per `opts`.
///
/// Entries that vanish or cannot be stat'ed while reading are skipped.
/// Symlinks pointing at directories count as directories.
pub fn browse_dir(path: &Path, opts: ListOptions) -> io::Result<Vec<FileEntry>> {
    let mut entries = Vec::with_capacity(64);

    for entry in fs::read_dir(path)? {
        let Ok(entry) = entry else {
            continue;
        };
        let Ok(ft) = entry.file_type() else {
            continue;
        };

        let name = entry.file_name();
        let mut flags = 0u8;

        if ft.is_dir() {
            flags |= FileEntry::IS_DIR;
        }
        if ft.is_symlink() {
            flags |= FileEntry::IS_SYMLINK;
            if fs::metadata(entry.path()).is_ok_and(|md| md.is_dir()) {
                flags |= FileEntry::IS_DIR;
            }
        }
        if is_hidden_name(&name) {
            flags |= FileEntry::IS_HIDDEN;
        }

        if !opts.show_hidden && flags & FileEntry::IS_HIDDEN != 0 {
            continue;
        }
        entries.push(FileEntry::new(name, flags));
    }

    entries.sort_by(|a, b| compare_entries(a, b, opts.dirs_first));
    Ok(entries)
}

fn is_hidden_name(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn compare_entries(a: &FileEntry, b: &FileEntry, dirs_first: bool) -> Ordering {
    if dirs_first && a.is_dir() != b.is_dir() {
        return b.is_dir().cmp(&a.is_dir());
    }
    a.name_str()
        .to_lowercase()
        .cmp(&b.name_str().to_lowercase())
        .then_with(|| a.name().cmp(b.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn file_entry_flags() {
        let fe_file = FileEntry::new(OsString::from("file.txt"), 0);
        assert!(!fe_file.is_dir());
        assert_eq!(fe_file.name_str(), "file.txt");

        let fe_dir = FileEntry::new(
            OsString::from(".hidden_folder"),
            FileEntry::IS_DIR | FileEntry::IS_HIDDEN,
        );
        assert!(fe_dir.is_dir());
        assert!(fe_dir.is_hidden());
        assert!(!fe_dir.is_symlink());
    }

    #[test]
    fn dirs_first_then_case_insensitive() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        File::create(tmp.path().join("b.txt"))?;
        File::create(tmp.path().join("A.txt"))?;
        fs::create_dir(tmp.path().join("zdir"))?;

        let names: Vec<String> = browse_dir(tmp.path(), ListOptions::default())?
            .iter()
            .map(|e| e.name_str().into_owned())
            .collect();
        assert_eq!(names, vec!["zdir", "A.txt", "b.txt"]);
        Ok(())
    }

    #[test]
    fn hidden_entries_follow_options() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        File::create(tmp.path().join(".secret"))?;
        File::create(tmp.path().join("visible"))?;

        let hidden_off = browse_dir(tmp.path(), ListOptions::default())?;
        assert_eq!(hidden_off.len(), 1);

        let hidden_on = browse_dir(
            tmp.path(),
            ListOptions {
                dirs_first: true,
                show_hidden: true,
            },
        )?;
        assert_eq!(hidden_on.len(), 2);
        Ok(())
    }

    #[test]
    fn browse_nonexistent() {
        let path = PathBuf::from("/path/does/not/exist");
        assert!(browse_dir(&path, ListOptions::default()).is_err());
    }
}
