//! Navigation state and tree pane logic for treeseek.
//!
//! Manages the tree root, its listed entries, the selection, the editable path
//! field and the status line. Every root change goes through [NavState::change_root],
//! which remembers the selection per directory.

use crate::core::{FileEntry, ListOptions, OpenError, Opened, Opener, browse_dir, open_path};
use crate::utils::{expand_home_path, filesystem_root};

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Holds the tree root, listing, selection, path field and status line.
pub(crate) struct NavState {
    root: PathBuf,
    entries: Vec<FileEntry>,
    selected: usize,
    positions: HashMap<PathBuf, usize>,
    path_field: String,
    status: String,
    options: ListOptions,
}

impl NavState {
    /// Lists `root` right away. A root that cannot be read shows up empty with
    /// the error on the status line.
    pub(crate) fn new(root: PathBuf, options: ListOptions) -> Self {
        let mut nav = Self {
            root,
            entries: Vec::new(),
            selected: 0,
            positions: HashMap::new(),
            path_field: String::new(),
            status: "Ready".into(),
            options,
        };
        nav.reload(None);
        nav
    }

    // Getters / Accessors

    #[inline]
    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub(crate) fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    #[inline]
    pub(crate) fn selected_idx(&self) -> usize {
        self.selected
    }

    #[inline]
    pub(crate) fn path_field(&self) -> &str {
        &self.path_field
    }

    #[inline]
    pub(crate) fn status(&self) -> &str {
        &self.status
    }

    pub(crate) fn selected_entry(&self) -> Option<&FileEntry> {
        self.entries.get(self.selected)
    }

    pub(crate) fn selected_path(&self) -> Option<PathBuf> {
        self.selected_entry().map(|e| self.root.join(e.name()))
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub(crate) fn set_path_field(&mut self, text: impl Into<String>) {
        self.path_field = text.into();
    }

    // Selection

    /// Moves the selection up by one entry, wrapping around if necessary.
    /// Returns `true` if the selection was moved, `false` if there are no entries.
    pub(crate) fn move_up(&mut self) -> bool {
        let len = self.entries.len();
        if len == 0 {
            return false;
        }
        self.selected = self.selected.checked_sub(1).unwrap_or(len - 1);
        self.select_current();
        true
    }

    /// Moves the selection down by one entry, wrapping around if necessary.
    /// Returns `true` if the selection was moved, `false` if there are no entries.
    pub(crate) fn move_down(&mut self) -> bool {
        let len = self.entries.len();
        if len == 0 {
            return false;
        }
        self.selected = (self.selected + 1) % len;
        self.select_current();
        true
    }

    /// Copies the selected entry into the path field.
    fn select_current(&mut self) {
        if let Some(path) = self.selected_path() {
            self.path_field = path.display().to_string();
            self.status = format!("Selected: {}", path.display());
        }
    }

    // Root changes

    /// Makes `path` the tree root and lists it.
    ///
    /// With `focus`, the entry of that name is selected, otherwise the last
    /// selection in that directory is restored.
    pub(crate) fn change_root(&mut self, path: PathBuf, focus: Option<&OsStr>) {
        if !self.entries.is_empty() {
            self.positions.insert(self.root.clone(), self.selected);
        }
        self.root = path;
        self.reload(focus);
    }

    /// Re-reads the current root.
    pub(crate) fn reload(&mut self, focus: Option<&OsStr>) {
        match browse_dir(&self.root, self.options) {
            Ok(entries) => self.entries = entries,
            Err(e) => {
                log::warn!("cannot list {}: {}", self.root.display(), e);
                self.entries.clear();
                self.status = format!("Cannot read {}: {}", self.root.display(), e);
            }
        }

        let position = match focus {
            Some(name) => self.entries.iter().position(|e| e.name() == name),
            None => self.positions.get(&self.root).copied(),
        };
        self.selected = position
            .unwrap_or(0)
            .min(self.entries.len().saturating_sub(1));
    }

    /// Resets the root to the filesystem root and clears the path field.
    pub(crate) fn root_reset(&mut self) {
        let top = filesystem_root(&self.root);
        self.change_root(top, None);
        self.path_field.clear();
        self.status = "Returned to the root directory.".into();
    }

    /// Moves the root to its parent, leaving the old root selected.
    ///
    /// Returns `false` and reports it on the status line when there is no
    /// parent directory.
    pub(crate) fn root_up(&mut self) -> bool {
        let Some(parent) = self
            .root
            .parent()
            .filter(|p| !p.as_os_str().is_empty() && p.is_dir())
            .map(Path::to_path_buf)
        else {
            self.status = "Cannot go above this directory!".into();
            return false;
        };

        let child = self.root.file_name().map(OsStr::to_os_string);
        self.change_root(parent.clone(), child.as_deref());
        self.path_field = parent.display().to_string();
        self.status = format!("Moved to: {}", parent.display());
        true
    }

    /// Moves the root to `home`, the user's home directory.
    pub(crate) fn root_home(&mut self, home: Option<PathBuf>) -> bool {
        let Some(home) = home.filter(|h| h.is_dir()) else {
            self.status = "Home directory not found!".into();
            return false;
        };
        self.change_root(home, None);
        self.status = "Moved to the home directory.".into();
        true
    }

    /// Makes the directory named in the path field the root.
    pub(crate) fn root_jump(&mut self) -> bool {
        let text = self.path_field.trim();
        if text.is_empty() {
            self.status = "No path entered.".into();
            return false;
        }

        let target = expand_home_path(text);
        let target = std::path::absolute(&target).unwrap_or(target);
        if !target.is_dir() {
            self.status = format!("Not a directory: {}", target.display());
            return false;
        }

        self.change_root(target.clone(), None);
        self.status = format!("Moved to: {}", target.display());
        true
    }

    /// Makes the selected directory the root.
    pub(crate) fn root_into_selected(&mut self) -> bool {
        match self.selected_entry() {
            Some(entry) if entry.is_dir() => {}
            _ => return false,
        }
        let Some(path) = self.selected_path() else {
            return false;
        };
        self.path_field = path.display().to_string();
        self.root_jump()
    }

    /// Roots the tree at the parent of `path` and selects `path` in it.
    pub(crate) fn reveal(&mut self, path: &Path) {
        let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return;
        };
        self.change_root(parent.to_path_buf(), path.file_name());
        self.path_field = path.display().to_string();
        self.status = format!("Found: {}", path.display());
    }

    // Opening

    /// Opens whatever the path field names with the default application.
    pub(crate) fn open_path_field(&mut self, opener: &dyn Opener) -> Result<Opened, OpenError> {
        let path = expand_home_path(&self.path_field);
        let result = open_path(opener, &path);
        self.status = match &result {
            Ok(Opened::Directory) => format!("Opened directory: {}", path.display()),
            Ok(Opened::File) => format!("Opened file: {}", path.display()),
            Err(OpenError::NotFound(_)) => "The given path does not exist!".into(),
            Err(e) => e.to_string(),
        };
        result
    }

    /// Opens the selected entry. Falls back to the path field when the listing is empty.
    pub(crate) fn open_selected(&mut self, opener: &dyn Opener) -> Result<Opened, OpenError> {
        if let Some(path) = self.selected_path() {
            self.path_field = path.display().to_string();
        }
        self.open_path_field(opener)
    }
}
