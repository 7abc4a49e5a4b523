use std::cell::RefCell;
use std::rc::Rc;

/// A single persistent key-value slot holding the serialized task list.
pub trait KeyValueSlot {
    /// Returns the stored blob, or `None` when nothing has been saved yet.
    fn read(&self) -> anyhow::Result<Option<String>>;

    fn write(&mut self, blob: &str) -> anyhow::Result<()>;
}

/// In-memory slot. Clones share the same backing cell, so a test can keep a
/// handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    inner: Rc<RefCell<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Some(blob.into()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.inner.borrow().clone()
    }
}

impl KeyValueSlot for MemorySlot {
    fn read(&self) -> anyhow::Result<Option<String>> {
        Ok(self.inner.borrow().clone())
    }

    fn write(&mut self, blob: &str) -> anyhow::Result<()> {
        *self.inner.borrow_mut() = Some(blob.to_string());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileSlot;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs;
    use std::io::{ErrorKind, Write};
    use std::path::{Path, PathBuf};

    use anyhow::{Context, anyhow};
    use tempfile::NamedTempFile;
    use tracing::debug;

    use super::KeyValueSlot;

    /// File-backed slot for native hosts. Writes go through a temp file in
    /// the same directory and are renamed into place.
    #[derive(Debug, Clone)]
    pub struct FileSlot {
        path: PathBuf,
    }

    impl FileSlot {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl KeyValueSlot for FileSlot {
        #[tracing::instrument(skip(self), fields(file = %self.path.display()))]
        fn read(&self) -> anyhow::Result<Option<String>> {
            match fs::read_to_string(&self.path) {
                Ok(raw) => Ok(Some(raw)),
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    debug!("slot file absent");
                    Ok(None)
                }
                Err(err) => {
                    Err(err).with_context(|| format!("failed reading {}", self.path.display()))
                }
            }
        }

        #[tracing::instrument(skip(self, blob), fields(file = %self.path.display(), bytes = blob.len()))]
        fn write(&mut self, blob: &str) -> anyhow::Result<()> {
            let dir = self
                .path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;

            let mut temp = NamedTempFile::new_in(dir)?;
            temp.write_all(blob.as_bytes())?;
            temp.flush()?;
            temp.persist(&self.path)
                .map_err(|err| anyhow!("failed to persist {}: {}", self.path.display(), err))?;
            Ok(())
        }
    }
}
