mod local_disk_store;
pub use local_disk_store::LocalDiskStore;

mod memory_store;
pub use memory_store::MemoryStore;

mod object_store;
pub use object_store::ObjectStore;

pub mod object_store_config;
pub use object_store_config::{BackendConfig, CloudBackend, LocalBackend};

use async_trait::async_trait;
use sitemill_core::{AppendStream, StagingStore, StorageError};
use std::time::SystemTime;

#[derive(Debug, Clone)]
pub enum Storage {
    LocalDisk(LocalDiskStore),
    Object(ObjectStore),
    InMemory(MemoryStore), // InMemory is used for tests and dry runs
}

#[async_trait]
impl StagingStore for Storage {
    async fn create_append_stream(
        &self,
        path: &str,
    ) -> Result<Box<dyn AppendStream>, StorageError> {
        match self {
            Storage::LocalDisk(store) => store.create_append_stream(path).await,
            Storage::Object(store) => store.create_append_stream(path).await,
            Storage::InMemory(store) => store.create_append_stream(path).await,
        }
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        match self {
            Storage::LocalDisk(store) => store.read(path).await,
            Storage::Object(store) => store.read(path).await,
            Storage::InMemory(store) => store.read(path).await,
        }
    }

    async fn write(&self, path: &str, bytes: &[u8], overwrite: bool) -> Result<(), StorageError> {
        match self {
            Storage::LocalDisk(store) => store.write(path, bytes, overwrite).await,
            Storage::Object(store) => store.write(path, bytes, overwrite).await,
            Storage::InMemory(store) => store.write(path, bytes, overwrite).await,
        }
    }

    async fn has(&self, path: &str) -> Result<bool, StorageError> {
        match self {
            Storage::LocalDisk(store) => store.has(path).await,
            Storage::Object(store) => store.has(path).await,
            Storage::InMemory(store) => store.has(path).await,
        }
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        match self {
            Storage::LocalDisk(store) => store.delete(path).await,
            Storage::Object(store) => store.delete(path).await,
            Storage::InMemory(store) => store.delete(path).await,
        }
    }

    async fn rename(&self, from: &str, to: &str) -> Result<(), StorageError> {
        match self {
            Storage::LocalDisk(store) => store.rename(from, to).await,
            Storage::Object(store) => store.rename(from, to).await,
            Storage::InMemory(store) => store.rename(from, to).await,
        }
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        match self {
            Storage::LocalDisk(store) => store.list_keys(prefix).await,
            Storage::Object(store) => store.list_keys(prefix).await,
            Storage::InMemory(store) => store.list_keys(prefix).await,
        }
    }

    async fn modified_at(&self, path: &str) -> Result<SystemTime, StorageError> {
        match self {
            Storage::LocalDisk(store) => store.modified_at(path).await,
            Storage::Object(store) => store.modified_at(path).await,
            Storage::InMemory(store) => store.modified_at(path).await,
        }
    }
}

#[cfg(test)]
mod object_store_test;
