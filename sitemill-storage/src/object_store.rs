use crate::object_store_config::{
    normalize_prefix, split_bucket_prefix, split_fs_root, BackendConfig, CloudBackend,
    LocalBackend,
};
use async_trait::async_trait;
use opendal::services::{Fs, Gcs, Memory, S3};
use opendal::{Builder, ErrorKind, Operator};
use sitemill_core::{AppendStream, StagingStore, StorageError};
use std::collections::HashMap;
use std::time::SystemTime;
use tracing::{debug, warn};

/// Staging store backed by an opendal operator (local fs, memory, S3, GCS).
#[derive(Debug, Clone)]
pub struct ObjectStore {
    /// Optional extra prefix for key joining (used by the memory backend)
    root_prefix: String,
    /// Opendal operator
    op: Operator,
}

fn backend_err(context: &str, key: &str, e: opendal::Error) -> StorageError {
    match e.kind() {
        ErrorKind::NotFound => StorageError::NotFound(key.to_string()),
        ErrorKind::AlreadyExists => StorageError::AlreadyExists(key.to_string()),
        _ => StorageError::Backend(format!("{} {}: {}", context, key, e)),
    }
}

fn build_operator<B: Builder>(service: &str, builder: B) -> Result<Operator, StorageError> {
    Operator::new(builder)
        .map(|ob| ob.finish())
        .map_err(|e| StorageError::Backend(format!("cannot build {} operator: {}", service, e)))
}

fn ignore_option(service: &str, key: &str) {
    warn!(target = "object_store", service, option = %key, "ignoring unknown backend option");
}

/// `s3://bucket/prefix`; options: endpoint, region, access_key, secret_key.
fn s3_operator(root: &str, options: &HashMap<String, String>) -> Result<Operator, StorageError> {
    let (bucket, prefix) = split_bucket_prefix(root).map_err(StorageError::Backend)?;
    let mut builder = S3::default().bucket(&bucket).root(&format!("/{}", prefix));
    for (key, value) in options {
        builder = match key.as_str() {
            "endpoint" => builder.endpoint(value),
            "region" => builder.region(value),
            "access_key" => builder.access_key_id(value),
            "secret_key" => builder.secret_access_key(value),
            _ => {
                ignore_option("s3", key);
                builder
            }
        };
    }
    build_operator("s3", builder)
}

/// `gcs://bucket/prefix`; options: endpoint, credential_file.
fn gcs_operator(root: &str, options: &HashMap<String, String>) -> Result<Operator, StorageError> {
    let (bucket, prefix) = split_bucket_prefix(root).map_err(StorageError::Backend)?;
    let mut builder = Gcs::default().bucket(&bucket).root(&format!("/{}", prefix));
    for (key, value) in options {
        builder = match key.as_str() {
            "endpoint" => builder.endpoint(value),
            "credential_file" => builder.credential_path(value),
            _ => {
                ignore_option("gcs", key);
                builder
            }
        };
    }
    build_operator("gcs", builder)
}

impl ObjectStore {
    pub fn new(cfg: BackendConfig) -> Result<Self, StorageError> {
        let store = match cfg {
            BackendConfig::Cloud {
                backend: CloudBackend::S3,
                root,
                options,
            } => ObjectStore::with_operator(s3_operator(&root, &options)?),
            BackendConfig::Cloud {
                backend: CloudBackend::Gcs,
                root,
                options,
            } => ObjectStore::with_operator(gcs_operator(&root, &options)?),
            BackendConfig::Local {
                backend: LocalBackend::Fs,
                root,
            } => {
                let builder = Fs::default().root(&split_fs_root(&root));
                ObjectStore::with_operator(build_operator("fs", builder)?)
            }
            // The memory service has no root; keys are namespaced by hand instead.
            BackendConfig::Local {
                backend: LocalBackend::Memory,
                root,
            } => ObjectStore {
                root_prefix: normalize_prefix(&root),
                op: build_operator("memory", Memory::default())?,
            },
        };
        debug!(target = "object_store", info = ?store.op.info(), prefix = %store.root_prefix, "object store ready");
        Ok(store)
    }

    fn with_operator(op: Operator) -> Self {
        ObjectStore {
            root_prefix: String::new(),
            op,
        }
    }

    #[inline]
    fn join(&self, path: &str) -> String {
        let p = path.trim_matches('/');
        if self.root_prefix.is_empty() {
            p.to_string()
        } else {
            format!("{}/{}", self.root_prefix, p)
        }
    }

    /// Inverse of `join`, for keys returned by listings.
    fn strip(&self, key: &str) -> String {
        let key = key.trim_start_matches('/');
        if self.root_prefix.is_empty() {
            return key.to_string();
        }
        key.strip_prefix(&self.root_prefix)
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or(key)
            .to_string()
    }

    async fn copy_then_delete(&self, from: &str, to: &str) -> Result<(), StorageError> {
        match self.op.copy(from, to).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::Unsupported => {
                let data = self
                    .op
                    .read(from)
                    .await
                    .map_err(|e| backend_err("object read", from, e))?;
                self.op
                    .write(to, data.to_vec())
                    .await
                    .map(|_| ())
                    .map_err(|e| backend_err("object write", to, e))?;
            }
            Err(e) => return Err(backend_err("object copy", from, e)),
        }
        self.op
            .delete(from)
            .await
            .map_err(|e| backend_err("object delete", from, e))
    }
}

#[async_trait]
impl StagingStore for ObjectStore {
    async fn create_append_stream(
        &self,
        path: &str,
    ) -> Result<Box<dyn AppendStream>, StorageError> {
        let key = self.join(path);
        let stream_open = |reason: String| StorageError::StreamOpen {
            path: path.to_string(),
            reason,
        };

        // Object backends cannot append in place: carry existing content into the new upload.
        let existing = match self.op.read(&key).await {
            Ok(buf) => buf.to_vec(),
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(stream_open(e.to_string())),
        };
        let mut writer = self
            .op
            .writer(&key)
            .await
            .map_err(|e| stream_open(e.to_string()))?;
        let size = existing.len() as u64;
        if !existing.is_empty() {
            writer
                .write(opendal::Buffer::from(existing))
                .await
                .map_err(|e| stream_open(e.to_string()))?;
        }

        debug!(target = "object_store", key = %key, size, "opened object stream");
        Ok(Box::new(ObjectAppendStream {
            inner: Some(writer),
            key,
            size,
        }))
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let key = self.join(path);
        let data = self
            .op
            .read(&key)
            .await
            .map_err(|e| backend_err("object read", &key, e))?;
        Ok(data.to_vec())
    }

    async fn write(&self, path: &str, bytes: &[u8], overwrite: bool) -> Result<(), StorageError> {
        let key = self.join(path);
        if !overwrite && self.has(path).await? {
            return Err(StorageError::AlreadyExists(key));
        }
        self.op
            .write(&key, bytes.to_vec())
            .await
            .map(|_| ())
            .map_err(|e| backend_err("object write", &key, e))
    }

    async fn has(&self, path: &str) -> Result<bool, StorageError> {
        let key = self.join(path);
        match self.op.stat(&key).await {
            Ok(meta) => Ok(meta.mode().is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(backend_err("object stat", &key, e)),
        }
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        // opendal deletes are idempotent; keep the NotFound contract of the other stores
        if !self.has(path).await? {
            return Err(StorageError::NotFound(self.join(path)));
        }
        let key = self.join(path);
        self.op
            .delete(&key)
            .await
            .map_err(|e| backend_err("object delete", &key, e))
    }

    /// Native rename where the service supports it (fs), copy + delete otherwise.
    async fn rename(&self, from: &str, to: &str) -> Result<(), StorageError> {
        let from_key = self.join(from);
        let to_key = self.join(to);
        match self.op.rename(&from_key, &to_key).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::Unsupported => {
                debug!(target = "object_store", from = %from_key, to = %to_key, "rename unsupported, falling back to copy");
                self.copy_then_delete(&from_key, &to_key).await
            }
            Err(e) => Err(backend_err("object rename", &from_key, e)),
        }
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let prefix = prefix.trim_start_matches('/');
        let (dir, name_prefix) = match prefix.rfind('/') {
            Some(idx) => (&prefix[..=idx], &prefix[idx + 1..]),
            None => ("", prefix),
        };
        let dir_key = match (self.root_prefix.is_empty(), dir.is_empty()) {
            (true, true) => "/".to_string(),
            (true, false) => dir.to_string(),
            (false, _) => format!("{}/{}", self.root_prefix, dir),
        };

        let entries = match self.op.list(&dir_key).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(backend_err("object list", &dir_key, e)),
        };

        let mut keys: Vec<String> = entries
            .iter()
            .filter(|entry| !entry.path().ends_with('/'))
            .map(|entry| self.strip(entry.path()))
            .filter(|key| {
                key.strip_prefix(dir)
                    .map(|name| name.starts_with(name_prefix) && !name.contains('/'))
                    .unwrap_or(false)
            })
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn modified_at(&self, path: &str) -> Result<SystemTime, StorageError> {
        let key = self.join(path);
        let meta = self
            .op
            .stat(&key)
            .await
            .map_err(|e| backend_err("object stat", &key, e))?;
        // Not every service reports a modification time
        Ok(meta
            .last_modified()
            .map(SystemTime::from)
            .unwrap_or_else(SystemTime::now))
    }
}

/// Streaming object writer; the object becomes visible on close.
struct ObjectAppendStream {
    inner: Option<opendal::Writer>,
    key: String,
    size: u64,
}

#[async_trait]
impl AppendStream for ObjectAppendStream {
    async fn append(&mut self, bytes: &[u8]) -> Result<(), StorageError> {
        let writer = self
            .inner
            .as_mut()
            .ok_or_else(|| StorageError::StreamClosed(self.key.clone()))?;
        writer
            .write(opendal::Buffer::from(bytes.to_vec()))
            .await
            .map_err(|e| StorageError::Backend(format!("object append {}: {}", self.key, e)))?;
        self.size += bytes.len() as u64;
        Ok(())
    }

    fn size(&self) -> u64 {
        self.size
    }

    async fn close(&mut self) -> Result<(), StorageError> {
        if let Some(mut writer) = self.inner.take() {
            writer
                .close()
                .await
                .map(|_| ())
                .map_err(|e| StorageError::Backend(format!("object close {}: {}", self.key, e)))?;
        }
        Ok(())
    }
}
