use crate::errors::Result;
use async_trait::async_trait;
use sitemill_core::Entry;

// Submodules: the limit decision, the shared session and the two writer kinds
mod index_writer;
mod rotation;
mod session;
mod type_writer;

pub use index_writer::IndexWriter;
pub use rotation::{LimitCheck, RotationLimits, DEFAULT_MAX_ENTRIES, DEFAULT_MAX_SIZE_MB};
pub use session::WriterState;
pub use type_writer::TypeWriter;

/// Extension of files still being written; never served.
pub const TEMPORARY_EXTENSION: &str = "xml.tmp";
/// Extension of published files.
pub const PERMANENT_EXTENSION: &str = "xml";

/// Lifecycle shared by the per-source writer and the index writer.
///
/// A writer is used for exactly one run: `start`, any number of `write`, then `finish`.
#[async_trait]
pub trait SitemapWriter: Send {
    /// Open the first output stream.
    async fn start(&mut self) -> Result<()>;

    /// Append one entry, applying the writer's limit policy first.
    async fn write(&mut self, entry: &Entry) -> Result<()>;

    /// Wrap, publish and return the permanent paths of every file of this run.
    async fn finish(&mut self) -> Result<Vec<String>>;
}

#[cfg(test)]
mod session_test;
