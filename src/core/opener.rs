//! Opening files and directories with the system default application.
//!
//! The actual platform dispatch lives in the `open` crate. treeseek only decides
//! what the path is and reports back, see [open_path].

use crate::core::error::OpenError;
use std::path::Path;

/// Something that can hand a path to the default application.
pub trait Opener {
    fn open(&self, path: &Path) -> std::io::Result<()>;
}

/// Uses the platform default handler (`xdg-open`, `open`, `start`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, path: &Path) -> std::io::Result<()> {
        open::that(path)
    }
}

/// What [open_path] ended up opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opened {
    Directory,
    File,
}

/// Opens `path` with `opener` after checking that it exists.
pub fn open_path(opener: &dyn Opener, path: &Path) -> Result<Opened, OpenError> {
    if path.as_os_str().is_empty() || !path.exists() {
        return Err(OpenError::NotFound(path.to_path_buf()));
    }

    let kind = if path.is_dir() {
        Opened::Directory
    } else {
        Opened::File
    };

    opener
        .open(path)
        .map_err(|e| OpenError::Io(e, path.to_path_buf()))?;
    Ok(kind)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs::File;
    use std::io;
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// Records paths instead of launching anything.
    #[derive(Default)]
    pub(crate) struct RecordingOpener {
        pub(crate) opened: RefCell<Vec<PathBuf>>,
        pub(crate) fail: bool,
    }

    impl Opener for RecordingOpener {
        fn open(&self, path: &Path) -> io::Result<()> {
            if self.fail {
                return Err(io::Error::other("no handler"));
            }
            self.opened.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    #[test]
    fn opens_directory() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let opener = RecordingOpener::default();
        assert_eq!(open_path(&opener, dir.path())?, Opened::Directory);
        assert_eq!(opener.opened.borrow().as_slice(), &[dir.path().to_path_buf()]);
        Ok(())
    }

    #[test]
    fn opens_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("notes.txt");
        File::create(&file)?;
        let opener = RecordingOpener::default();
        assert_eq!(open_path(&opener, &file)?, Opened::File);
        Ok(())
    }

    #[test]
    fn missing_path_is_not_opened() {
        let opener = RecordingOpener::default();
        let res = open_path(&opener, Path::new("/fake/path/nothing"));
        assert!(matches!(res, Err(OpenError::NotFound(_))));
        assert!(open_path(&opener, Path::new("")).is_err());
        assert!(opener.opened.borrow().is_empty());
    }

    #[test]
    fn handler_failure_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let opener = RecordingOpener {
            fail: true,
            ..Default::default()
        };
        assert!(matches!(
            open_path(&opener, dir.path()),
            Err(OpenError::Io(_, _))
        ));
        Ok(())
    }
}
