//! Atomic file operations for JSON and TOML documents.
//!
//! Writes go through a temporary file plus rename; read-modify-write cycles
//! hold an exclusive `fs2` lock on a sibling `.lock` file.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use newsforge_core::error::{NewsforgeError, Result};
use serde::{Serialize, de::DeserializeOwned};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn parse<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        match self {
            FileFormat::Json => Ok(serde_json::from_str(content)?),
            FileFormat::Toml => Ok(toml::from_str(content)?),
        }
    }

    fn render<T: Serialize>(&self, data: &T) -> Result<String> {
        match self {
            FileFormat::Json => Ok(serde_json::to_string_pretty(data)?),
            FileFormat::Toml => Ok(toml::to_string_pretty(data)?),
        }
    }
}

/// A handle to a document stored atomically on disk.
pub struct AtomicFile<T> {
    path: PathBuf,
    format: FileFormat,
    _phantom: PhantomData<T>,
}

impl<T> AtomicFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf, format: FileFormat) -> Self {
        Self {
            path,
            format,
            _phantom: PhantomData,
        }
    }

    pub fn json(path: PathBuf) -> Self {
        Self::new(path, FileFormat::Json)
    }

    pub fn toml(path: PathBuf) -> Self {
        Self::new(path, FileFormat::Toml)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `None` when the file is missing or blank.
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        self.format.parse(&content).map(Some)
    }

    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let rendered = self.format.render(data)?;
        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(rendered.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Read-modify-write under an exclusive lock. Returns whatever `f`
    /// returns; the document is saved only when `f` succeeds.
    pub fn update<F, R>(&self, default_value: T, f: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> Result<R>,
    {
        let _lock = FileLock::acquire(&self.path)?;
        let mut data = self.load()?.unwrap_or(default_value);
        let result = f(&mut data)?;
        self.save(&data)?;
        Ok(result)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| NewsforgeError::io("Path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| NewsforgeError::io("Path has no file name"))?;
        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// Released (and the lock file removed) on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");
        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| NewsforgeError::io(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        name: String,
        count: u32,
    }

    fn counter() -> Counter {
        Counter {
            name: "views".to_string(),
            count: 0,
        }
    }

    #[test]
    fn test_json_and_toml_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        for file in [
            AtomicFile::<Counter>::json(temp_dir.path().join("c.json")),
            AtomicFile::<Counter>::toml(temp_dir.path().join("c.toml")),
        ] {
            file.save(&counter()).unwrap();
            assert_eq!(file.load().unwrap(), Some(counter()));
        }
    }

    #[test]
    fn test_missing_and_blank_files_load_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.json");
        let file = AtomicFile::<Counter>::json(path.clone());
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_update_creates_then_modifies() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Counter>::json(temp_dir.path().join("nested/c.json"));

        file.update(counter(), |c| {
            c.count += 10;
            Ok(())
        })
        .unwrap();
        let total = file
            .update(counter(), |c| {
                c.count += 5;
                Ok(c.count)
            })
            .unwrap();

        assert_eq!(total, 15);
        assert!(!temp_dir.path().join("nested/.c.json.tmp").exists());
        assert!(!temp_dir.path().join("nested/c.lock").exists());
    }

    #[test]
    fn test_failed_update_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Counter>::json(temp_dir.path().join("c.json"));
        file.save(&counter()).unwrap();

        let result: Result<()> = file.update(counter(), |c| {
            c.count = 99;
            Err(NewsforgeError::internal("abort"))
        });
        assert!(result.is_err());
        assert_eq!(file.load().unwrap().unwrap().count, 0);
    }
}
