//! Resource fork size lookup.
//!
//! Only some file systems attach a second byte stream to a file. The weigher
//! asks a [`ForkReader`] for that size and never needs to know whether the
//! platform has resource forks at all.

use std::{
    fs,
    io::{self, ErrorKind},
    path::Path,
};

/// Path suffix through which macOS exposes a file's resource fork.
pub const NAMED_FORK_SUFFIX: &str = "..namedfork/rsrc";

/// Capability to report the size of a file's resource fork.
pub trait ForkReader {
    /// Size in bytes of the resource fork of `path`, or `0` if it has none.
    ///
    /// # Errors
    ///
    /// Returns an error only when the fork exists but cannot be inspected;
    /// a missing fork is not an error.
    fn auxiliary_size(&self, path: &Path) -> io::Result<u64>;
}

/// Reads resource fork sizes through the `..namedfork/rsrc` pseudo-path.
///
/// A file without a fork, or on a volume that cannot hold one, reports `0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NamedForkReader;

impl ForkReader for NamedForkReader {
    fn auxiliary_size(&self, path: &Path) -> io::Result<u64> {
        match fs::symlink_metadata(path.join(NAMED_FORK_SUFFIX)) {
            Ok(metadata) => Ok(metadata.len()),
            // ENOTDIR: the file system has no named forks, or `path` is a
            // FIFO, socket or device node.
            Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                Ok(0)
            }
            Err(err) => Err(err),
        }
    }
}

/// For platforms without resource forks: every file reports `0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoForkReader;

impl ForkReader for NoForkReader {
    fn auxiliary_size(&self, _path: &Path) -> io::Result<u64> {
        Ok(0)
    }
}

/// The fork reader matching the platform this binary was built for.
#[cfg(target_os = "macos")]
pub type PlatformReader = NamedForkReader;

/// The fork reader matching the platform this binary was built for.
#[cfg(not(target_os = "macos"))]
pub type PlatformReader = NoForkReader;

#[must_use]
pub fn platform_reader() -> PlatformReader {
    PlatformReader::default()
}

impl<P: ForkReader + ?Sized> ForkReader for &P {
    fn auxiliary_size(&self, path: &Path) -> io::Result<u64> {
        (**self).auxiliary_size(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_fork_reports_zero() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("data.bin");
        fs::write(&file, b"0123456789").unwrap();

        assert_eq!(NoForkReader.auxiliary_size(&file).unwrap(), 0);
        assert_eq!(
            NoForkReader
                .auxiliary_size(&temp_dir.path().join("missing"))
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_named_fork_missing_file_is_zero() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");

        assert_eq!(NamedForkReader.auxiliary_size(&missing).unwrap(), 0);
    }

    #[test]
    fn test_named_fork_plain_file_is_zero() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("plain.txt");
        fs::write(&file, b"no fork here").unwrap();

        assert_eq!(NamedForkReader.auxiliary_size(&file).unwrap(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_named_fork_below_file_component_is_zero() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("plain.txt");
        fs::write(&file, b"").unwrap();

        // `<file>/..namedfork/rsrc/x` always walks through a non-directory.
        assert_eq!(NamedForkReader.auxiliary_size(&file.join("x")).unwrap(), 0);
    }

    #[test]
    fn test_fork_size_through_reference() {
        let none = NoForkReader;
        let by_ref: &dyn ForkReader = &none;

        assert_eq!(by_ref.auxiliary_size(Path::new("x")).unwrap(), 0);
    }
}
