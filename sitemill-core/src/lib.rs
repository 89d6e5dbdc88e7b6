mod errors;
pub use errors::{EntryError, StorageError};

pub mod entry;
pub use entry::{ChangeFrequency, Entry, LastModified, Location, Priority};

pub mod renderer;
pub use renderer::{Renderer, DEFAULT_ENCODING, SITEMAP_NAMESPACE};

pub mod storage;
pub use storage::{AppendStream, StagingStore};

// Unit tests
#[cfg(test)]
mod entry_test;
