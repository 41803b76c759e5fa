//! File access behind a trait so editing logic can be tested without disk.
//!
//! I/O failures stay `std::io::Error` all the way up. Callers distinguish
//! missing files from permission problems through `ErrorKind` rather than a
//! wrapper type.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Unix owner of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
    pub uid: u32,
    pub gid: u32,
}

/// Permission bits and ownership applied to a written file.
///
/// `None` fields are left to the platform default for new files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileAttrs {
    /// Permission bits, e.g. `0o600` for credential-bearing configs.
    pub mode: Option<u32>,
    /// Owner to assign; requires privilege when it differs from the caller.
    pub owner: Option<Owner>,
}

/// Storage collaborator for configuration files.
pub trait FileStore {
    /// Read the full contents of `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replace `path` with `bytes` atomically: a reader sees either the old
    /// contents or the new, never a partial write.
    fn write_atomic(&self, path: &Path, bytes: &[u8], attrs: FileAttrs) -> io::Result<()>;

    /// Permission bits and ownership of an existing file.
    fn attrs(&self, path: &Path) -> io::Result<FileAttrs>;
}

/// Real filesystem store.
///
/// Writes go to a temporary file in the target directory, are flushed with
/// `fsync`, then renamed over the destination. The directory is synced after
/// the rename so the entry survives a crash.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileStore for LocalFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8], attrs: FileAttrs) -> io::Result<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let name = path
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
        let tmp = dir.join(format!(".{}.{}.tmp", name.to_string_lossy(), std::process::id()));

        let result = (|| {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&tmp)?;
            file.write_all(bytes)?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = attrs.mode {
                    file.set_permissions(fs::Permissions::from_mode(mode))?;
                }
                if let Some(owner) = attrs.owner {
                    std::os::unix::fs::chown(&tmp, Some(owner.uid), Some(owner.gid))?;
                }
            }

            file.sync_all()?;
            fs::rename(&tmp, path)?;

            // Persist the directory entry, not just the file data.
            if let Ok(dir_handle) = File::open(dir) {
                dir_handle.sync_all()?;
            }
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }

    fn attrs(&self, path: &Path) -> io::Result<FileAttrs> {
        let meta = fs::metadata(path)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::{MetadataExt, PermissionsExt};
            Ok(FileAttrs {
                mode: Some(meta.permissions().mode() & 0o7777),
                owner: Some(Owner {
                    uid: meta.uid(),
                    gid: meta.gid(),
                }),
            })
        }

        #[cfg(not(unix))]
        {
            let _ = meta;
            Ok(FileAttrs::default())
        }
    }
}

/// In-memory store for tests: a path-keyed map behind a mutex.
#[derive(Debug, Default)]
pub struct MemFs {
    files: Mutex<HashMap<PathBuf, (Vec<u8>, FileAttrs)>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file without going through the atomic-write path.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), (contents.into(), FileAttrs::default()));
    }

    /// Contents of a stored file as text, if present.
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|(bytes, _)| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Attributes last written for a stored file, if present.
    pub fn stored_attrs(&self, path: &Path) -> Option<FileAttrs> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|(_, attrs)| *attrs)
    }
}

impl FileStore for MemFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|(bytes, _)| bytes.clone())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8], attrs: FileAttrs) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), (bytes.to_vec(), attrs));
        Ok(())
    }

    fn attrs(&self, path: &Path) -> io::Result<FileAttrs> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|(_, attrs)| *attrs)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mem_fs_read_missing_is_not_found() {
        let fs = MemFs::new();
        let err = fs.read(Path::new("/etc/slurm/slurm.conf")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_mem_fs_write_then_read() {
        let fs = MemFs::new();
        fs.write_atomic(
            Path::new("/etc/slurm/slurm.conf"),
            b"ClusterName=base\n",
            FileAttrs::default(),
        )
        .unwrap();
        assert_eq!(
            fs.read(Path::new("/etc/slurm/slurm.conf")).unwrap(),
            b"ClusterName=base\n"
        );
    }

    #[test]
    fn test_local_fs_atomic_write_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slurm.conf");
        let fs = LocalFs::new();

        fs.write_atomic(&path, b"ClusterName=old\n", FileAttrs::default())
            .unwrap();
        fs.write_atomic(&path, b"ClusterName=new\n", FileAttrs::default())
            .unwrap();

        assert_eq!(fs.read(&path).unwrap(), b"ClusterName=new\n");
        // No temporary file left behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_local_fs_applies_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slurmdbd.conf");
        let fs = LocalFs::new();

        fs.write_atomic(
            &path,
            b"StoragePass=secret\n",
            FileAttrs {
                mode: Some(0o600),
                owner: None,
            },
        )
        .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o7777;
        assert_eq!(mode, 0o600);
        assert_eq!(fs.attrs(&path).unwrap().mode, Some(0o600));
    }
}
