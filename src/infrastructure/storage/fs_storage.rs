//! Local filesystem paste storage.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use super::{PasteStorage, StorageError, StorageResult};

/// Stores each paste body as `<uuid>.txt` inside one directory.
#[derive(Debug, Clone)]
pub struct FsPasteStorage {
    dir: PathBuf,
}

impl FsPasteStorage {
    /// Opens storage rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or `dir` exists
    /// but is not a directory.
    pub async fn new(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir: PathBuf = dir.into();

        fs::create_dir_all(&dir).await?;

        let metadata = fs::metadata(&dir).await?;
        if !metadata.is_dir() {
            return Err(StorageError::InvalidKey(format!(
                "{} is not a directory",
                dir.display()
            )));
        }

        info!("Paste storage at {}", dir.display());

        Ok(Self { dir })
    }

    /// Root directory of this storage.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty()
            || key.contains('/')
            || key.contains('\\')
            || key.contains("..")
            || key.starts_with('.')
        {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(key))
    }
}

#[async_trait]
impl PasteStorage for FsPasteStorage {
    async fn write(&self, content: &str) -> StorageResult<String> {
        let key = format!("{}.txt", Uuid::new_v4().simple());
        let path = self.path_for(&key)?;

        fs::write(&path, content.as_bytes()).await?;
        debug!("Stored {} bytes as {}", content.len(), key);

        Ok(key)
    }

    async fn read(&self, key: &str) -> StorageResult<String> {
        let path = self.path_for(key)?;

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        String::from_utf8(bytes).map_err(|_| StorageError::InvalidUtf8(key.to_string()))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted stored paste {}", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn health_check(&self) -> bool {
        fs::metadata(&self.dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn storage() -> (TempDir, FsPasteStorage) {
        let tmp = TempDir::new().unwrap();
        let storage = FsPasteStorage::new(tmp.path().join("pastes")).await.unwrap();
        (tmp, storage)
    }

    #[tokio::test]
    async fn test_new_creates_directory() {
        let (tmp, storage) = storage().await;

        assert!(tmp.path().join("pastes").is_dir());
        assert!(storage.health_check().await);
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let (_tmp, storage) = storage().await;

        let key = storage.write("fn main() {}\n").await.unwrap();

        assert!(key.ends_with(".txt"));
        assert_eq!(storage.read(&key).await.unwrap(), "fn main() {}\n");
    }

    #[tokio::test]
    async fn test_keys_are_unique_per_write() {
        let (_tmp, storage) = storage().await;

        let first = storage.write("same").await.unwrap();
        let second = storage.write("same").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_read_missing_key() {
        let (_tmp, storage) = storage().await;

        let result = storage.read("missing.txt").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_tmp, storage) = storage().await;

        let key = storage.write("bye").await.unwrap();
        storage.delete(&key).await.unwrap();
        storage.delete(&key).await.unwrap();

        assert!(matches!(
            storage.read(&key).await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let (_tmp, storage) = storage().await;

        for key in ["../etc/passwd", "a/b.txt", "..", "", ".hidden", "a\\b"] {
            assert!(
                matches!(storage.read(key).await, Err(StorageError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_read_rejects_non_utf8() {
        let (_tmp, storage) = storage().await;

        fs::write(storage.dir().join("binary.txt"), [0xff, 0xfe, 0x00])
            .await
            .unwrap();

        assert!(matches!(
            storage.read("binary.txt").await,
            Err(StorageError::InvalidUtf8(_))
        ));
    }

    #[tokio::test]
    async fn test_new_fails_when_path_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file");
        std::fs::write(&file, b"x").unwrap();

        assert!(FsPasteStorage::new(&file).await.is_err());
    }
}
