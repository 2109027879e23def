// ABOUTME: Filesystem capability trait used by the artifact relocator.
// ABOUTME: Substitutable for testing; the default implementation wraps std::fs.

use std::fs;
use std::io;
use std::path::Path;

/// Synchronous filesystem primitives the relocator depends on.
///
/// Every operation may fail; callers decide which failures are fatal. A
/// "move" is composed as copy-then-remove and is deliberately non-atomic:
/// the destination is a disposable directory regenerated on every run.
pub trait FsHost {
    /// Remove a file or directory tree. Missing paths are not an error.
    fn remove_all(&self, path: &Path) -> io::Result<()>;

    /// Recursively copy a file or directory tree, creating parents as needed.
    fn copy_all(&self, src: &Path, dest: &Path) -> io::Result<()>;

    /// Write a file, creating parent directories as needed.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Rename a file.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// The production filesystem, backed by std::fs.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFsHost;

impl FsHost for StdFsHost {
    fn remove_all(&self, path: &Path) -> io::Result<()> {
        let result = if path.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        match result {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    fn copy_all(&self, src: &Path, dest: &Path) -> io::Result<()> {
        if src.is_dir() {
            fs::create_dir_all(dest)?;
            for entry in fs::read_dir(src)? {
                let entry = entry?;
                self.copy_all(&entry.path(), &dest.join(entry.file_name()))?;
            }
        } else {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(src, dest)?;
        }
        Ok(())
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }
}
