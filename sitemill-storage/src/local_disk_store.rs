use async_trait::async_trait;
use sitemill_core::{AppendStream, StagingStore, StorageError};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

// LocalDiskStore maps keys onto files below a base directory:
// base_path/
//     index.xml
//     products/
//         products_part0.xml
//         products_part1.xml

#[derive(Debug, Clone)]
pub struct LocalDiskStore {
    base_path: PathBuf,
}

impl LocalDiskStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        LocalDiskStore {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        if key.is_empty() || key.ends_with('/') {
            return Err(StorageError::InvalidPath(key.to_string()));
        }
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(StorageError::InvalidPath(key.to_string()));
        }
        Ok(self.base_path.join(relative))
    }

    async fn ensure_parent(path: &Path) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::Io(format!("create dir {} failed: {}", parent.display(), e))
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl StagingStore for LocalDiskStore {
    async fn create_append_stream(
        &self,
        path: &str,
    ) -> Result<Box<dyn AppendStream>, StorageError> {
        let file_path = self.resolve(path)?;
        let stream_open = |reason: String| StorageError::StreamOpen {
            path: path.to_string(),
            reason,
        };

        Self::ensure_parent(&file_path)
            .await
            .map_err(|e| stream_open(e.to_string()))?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await
            .map_err(|e| stream_open(e.to_string()))?;
        let size = file
            .metadata()
            .await
            .map_err(|e| stream_open(e.to_string()))?
            .len();

        debug!(target = "local_disk", file = %file_path.display(), size, "opened append stream");
        Ok(Box::new(DiskAppendStream {
            writer: Some(BufWriter::new(file)),
            path: file_path,
            size,
        }))
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let file_path = self.resolve(path)?;
        match fs::read(&file_path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(StorageError::Io(format!("read {} failed: {}", file_path.display(), e))),
        }
    }

    async fn write(&self, path: &str, bytes: &[u8], overwrite: bool) -> Result<(), StorageError> {
        let file_path = self.resolve(path)?;
        Self::ensure_parent(&file_path).await?;

        let mut options = OpenOptions::new();
        options.write(true);
        if overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }
        let mut f = match options.open(&file_path).await {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(path.to_string()))
            }
            Err(e) => {
                return Err(StorageError::Io(format!(
                    "open {} failed: {}",
                    file_path.display(),
                    e
                )))
            }
        };
        f.write_all(bytes)
            .await
            .map_err(|e| StorageError::Io(format!("write {} failed: {}", file_path.display(), e)))?;
        f.flush()
            .await
            .map_err(|e| StorageError::Io(format!("flush {} failed: {}", file_path.display(), e)))?;
        Ok(())
    }

    async fn has(&self, path: &str) -> Result<bool, StorageError> {
        let file_path = self.resolve(path)?;
        match fs::metadata(&file_path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let file_path = self.resolve(path)?;
        match fs::remove_file(&file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(StorageError::Io(format!(
                "delete {} failed: {}",
                file_path.display(),
                e
            ))),
        }
    }

    async fn rename(&self, from: &str, to: &str) -> Result<(), StorageError> {
        let from_path = self.resolve(from)?;
        let to_path = self.resolve(to)?;
        Self::ensure_parent(&to_path).await?;
        match fs::rename(&from_path, &to_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(from.to_string()))
            }
            Err(e) => Err(StorageError::Io(format!(
                "rename {} -> {} failed: {}",
                from_path.display(),
                to_path.display(),
                e
            ))),
        }
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let prefix = prefix.trim_start_matches('/');
        let (dir, name_prefix) = match prefix.rfind('/') {
            Some(idx) => (&prefix[..=idx], &prefix[idx + 1..]),
            None => ("", prefix),
        };
        let dir_path = if dir.is_empty() {
            self.base_path.clone()
        } else {
            self.resolve(dir.trim_end_matches('/'))?
        };

        let mut entries = match fs::read_dir(&dir_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::Io(format!(
                    "list {} failed: {}",
                    dir_path.display(),
                    e
                )))
            }
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(name_prefix) {
                keys.push(format!("{}{}", dir, name));
            }
        }
        keys.sort();
        Ok(keys)
    }

    async fn modified_at(&self, path: &str) -> Result<SystemTime, StorageError> {
        let file_path = self.resolve(path)?;
        match fs::metadata(&file_path).await {
            Ok(meta) => Ok(meta.modified()?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Buffered append handle on a local file.
struct DiskAppendStream {
    writer: Option<BufWriter<fs::File>>,
    path: PathBuf,
    size: u64,
}

#[async_trait]
impl AppendStream for DiskAppendStream {
    async fn append(&mut self, bytes: &[u8]) -> Result<(), StorageError> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| StorageError::StreamClosed(self.path.display().to_string()))?;
        writer
            .write_all(bytes)
            .await
            .map_err(|e| StorageError::Io(format!("append {} failed: {}", self.path.display(), e)))?;
        self.size += bytes.len() as u64;
        Ok(())
    }

    fn size(&self) -> u64 {
        self.size
    }

    async fn close(&mut self) -> Result<(), StorageError> {
        if let Some(mut writer) = self.writer.take() {
            writer
                .flush()
                .await
                .map_err(|e| StorageError::Io(format!("flush {} failed: {}", self.path.display(), e)))?;
            writer
                .into_inner()
                .sync_all()
                .await
                .map_err(|e| StorageError::Io(format!("sync {} failed: {}", self.path.display(), e)))?;
            debug!(target = "local_disk", file = %self.path.display(), size = self.size, "closed append stream");
        }
        Ok(())
    }
}
