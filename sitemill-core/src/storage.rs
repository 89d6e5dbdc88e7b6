use crate::errors::StorageError;
use async_trait::async_trait;
use std::time::SystemTime;

/// Byte-oriented storage used to stage and publish sitemap files.
///
/// Keys are relative, `/`-separated paths such as `products/products_part0.xml.tmp`.
#[async_trait]
pub trait StagingStore: Send + Sync + 'static {
    /// Open a stream that appends after any content already stored at `path`.
    async fn create_append_stream(&self, path: &str)
        -> Result<Box<dyn AppendStream>, StorageError>;

    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Store `bytes` at `path`. Fails with `AlreadyExists` when the key exists and
    /// `overwrite` is false.
    async fn write(&self, path: &str, bytes: &[u8], overwrite: bool) -> Result<(), StorageError>;

    async fn has(&self, path: &str) -> Result<bool, StorageError>;

    async fn delete(&self, path: &str) -> Result<(), StorageError>;

    /// Move `from` to `to`, replacing any object at `to`.
    async fn rename(&self, from: &str, to: &str) -> Result<(), StorageError>;

    /// Sorted keys of the direct children matching `prefix`
    /// (e.g. `products/` lists the files of the `products` directory).
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    async fn modified_at(&self, path: &str) -> Result<SystemTime, StorageError>;
}

/// An open, append-only handle on one staged object.
#[async_trait]
pub trait AppendStream: Send {
    async fn append(&mut self, bytes: &[u8]) -> Result<(), StorageError>;

    /// Current size of the object in bytes, including content present before the stream opened.
    fn size(&self) -> u64;

    /// Flush and release the handle. Appending after close fails with `StreamClosed`.
    async fn close(&mut self) -> Result<(), StorageError>;
}
