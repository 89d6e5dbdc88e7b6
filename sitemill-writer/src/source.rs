use crate::errors::{Result, WriterError};
use futures::stream::{self, BoxStream, StreamExt};
use sitemill_core::Entry;
use std::sync::Arc;

/// Lazily produced entries of one source. Consumed one item at a time, never collected.
pub type EntryStream<'a> = BoxStream<'a, Result<Entry>>;

/// A named producer of entries; each source publishes its own family of part files.
pub trait SitemapSource: Send + Sync {
    /// Directory and file-name stem of the published parts.
    fn name(&self) -> &str;

    fn entries(&self) -> EntryStream<'_>;
}

/// Source names become a directory and a file-name stem, so they must be a single path segment.
pub fn validate_source_name(name: &str) -> Result<()> {
    if name.trim().is_empty() || name.contains('/') {
        return Err(WriterError::InvalidSourceName(name.to_string()));
    }
    Ok(())
}

/// Sources of one generation run, kept in registration order.
#[derive(Default, Clone)]
pub struct SourceRegistry {
    sources: Vec<Arc<dyn SitemapSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `source`. A source with the same name is replaced in place.
    pub fn register(&mut self, source: Arc<dyn SitemapSource>) -> Result<()> {
        validate_source_name(source.name())?;
        match self.sources.iter_mut().find(|s| s.name() == source.name()) {
            Some(slot) => *slot = source,
            None => self.sources.push(source),
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Arc<dyn SitemapSource>> {
        self.sources
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| {
                let mut available = self.names();
                available.sort();
                WriterError::SourceNotRegistered {
                    name: name.to_string(),
                    available,
                }
            })
    }

    pub fn all(&self) -> &[Arc<dyn SitemapSource>] {
        &self.sources
    }

    /// Names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// A source backed by an in-memory list.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    entries: Vec<Entry>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, entries: Vec<Entry>) -> Self {
        StaticSource {
            name: name.into(),
            entries,
        }
    }
}

impl SitemapSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> EntryStream<'_> {
        stream::iter(self.entries.iter().cloned().map(Ok)).boxed()
    }
}
