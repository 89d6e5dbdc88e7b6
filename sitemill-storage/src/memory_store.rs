use async_trait::async_trait;
use dashmap::DashMap;
use sitemill_core::{AppendStream, StagingStore, StorageError};
use std::sync::Arc;
use std::time::SystemTime;

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    modified: SystemTime,
}

impl StoredObject {
    fn new(bytes: Vec<u8>) -> Self {
        StoredObject {
            bytes,
            modified: SystemTime::now(),
        }
    }
}

/// MemoryStore keeps staged objects in process memory.
/// Intended for tests and dry runs: nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, StoredObject>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects, across all prefixes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl StagingStore for MemoryStore {
    async fn create_append_stream(
        &self,
        path: &str,
    ) -> Result<Box<dyn AppendStream>, StorageError> {
        let key = normalize(path)?;
        // Touch the object so it is visible as soon as the stream opens.
        let size = self
            .inner
            .entry(key.clone())
            .or_insert_with(|| StoredObject::new(Vec::new()))
            .bytes
            .len() as u64;

        Ok(Box::new(MemoryAppendStream {
            inner: Arc::clone(&self.inner),
            key,
            size,
            closed: false,
        }))
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let key = normalize(path)?;
        self.inner
            .get(&key)
            .map(|obj| obj.bytes.clone())
            .ok_or(StorageError::NotFound(key))
    }

    async fn write(&self, path: &str, bytes: &[u8], overwrite: bool) -> Result<(), StorageError> {
        let key = normalize(path)?;
        if !overwrite && self.inner.contains_key(&key) {
            return Err(StorageError::AlreadyExists(key));
        }
        self.inner.insert(key, StoredObject::new(bytes.to_vec()));
        Ok(())
    }

    async fn has(&self, path: &str) -> Result<bool, StorageError> {
        Ok(self.inner.contains_key(&normalize(path)?))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let key = normalize(path)?;
        self.inner
            .remove(&key)
            .map(|_| ())
            .ok_or(StorageError::NotFound(key))
    }

    async fn rename(&self, from: &str, to: &str) -> Result<(), StorageError> {
        let from = normalize(from)?;
        let to = normalize(to)?;
        let (_, obj) = self
            .inner
            .remove(&from)
            .ok_or_else(|| StorageError::NotFound(from.clone()))?;
        self.inner.insert(to, obj);
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let prefix = prefix.trim_start_matches('/');
        // Only direct children: nothing after the prefix may contain another separator.
        let mut keys: Vec<String> = self
            .inner
            .iter()
            .map(|item| item.key().clone())
            .filter(|key| {
                key.strip_prefix(prefix)
                    .map(|rest| !rest.is_empty() && !rest.contains('/'))
                    .unwrap_or(false)
            })
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn modified_at(&self, path: &str) -> Result<SystemTime, StorageError> {
        let key = normalize(path)?;
        self.inner
            .get(&key)
            .map(|obj| obj.modified)
            .ok_or(StorageError::NotFound(key))
    }
}

/// Append handle writing straight into the shared map.
struct MemoryAppendStream {
    inner: Arc<DashMap<String, StoredObject>>,
    key: String,
    size: u64,
    closed: bool,
}

#[async_trait]
impl AppendStream for MemoryAppendStream {
    async fn append(&mut self, bytes: &[u8]) -> Result<(), StorageError> {
        if self.closed {
            return Err(StorageError::StreamClosed(self.key.clone()));
        }
        let mut obj = self
            .inner
            .entry(self.key.clone())
            .or_insert_with(|| StoredObject::new(Vec::new()));
        obj.bytes.extend_from_slice(bytes);
        obj.modified = SystemTime::now();
        self.size = obj.bytes.len() as u64;
        Ok(())
    }

    fn size(&self) -> u64 {
        self.size
    }

    async fn close(&mut self) -> Result<(), StorageError> {
        self.closed = true;
        Ok(())
    }
}

fn normalize(path: &str) -> Result<String, StorageError> {
    let key = path.trim_start_matches('/');
    if key.is_empty() || key.ends_with('/') {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    Ok(key.to_string())
}
