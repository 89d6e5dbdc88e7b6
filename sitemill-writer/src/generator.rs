use crate::config::GeneratorConfig;
use crate::errors::Result;
use crate::listener::{GenerationEvent, GenerationListener, NoopListener};
use crate::resolver::IndexEntryResolver;
use crate::source::{SitemapSource, SourceRegistry};
use crate::writer::{IndexWriter, SitemapWriter, TypeWriter};
use futures::TryStreamExt;
use serde::Serialize;
use sitemill_core::StagingStore;
use std::sync::Arc;
use tracing::info;

/// Outcome of one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub name: String,
    pub entries: usize,
    /// Published part paths, sorted by key
    pub paths: Vec<String>,
}

/// Outcome of a complete generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub sources: Vec<SourceReport>,
    pub index_path: String,
}

impl GenerationReport {
    pub fn total_entries(&self) -> usize {
        self.sources.iter().map(|s| s.entries).sum()
    }
}

/// Drives every registered source through its own `TypeWriter` and references
/// each published part from a single index.
///
/// Sources are processed sequentially in registration order; any error aborts the run,
/// leaving temporary files behind.
pub struct Generator {
    store: Arc<dyn StagingStore>,
    registry: SourceRegistry,
    resolver: Arc<dyn IndexEntryResolver>,
    config: GeneratorConfig,
    listener: Arc<dyn GenerationListener>,
}

impl Generator {
    pub fn new(
        store: Arc<dyn StagingStore>,
        registry: SourceRegistry,
        resolver: Arc<dyn IndexEntryResolver>,
        config: GeneratorConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Generator {
            store,
            registry,
            resolver,
            config,
            listener: Arc::new(NoopListener),
        })
    }

    pub fn with_listener(mut self, listener: Arc<dyn GenerationListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub async fn generate(&self) -> Result<GenerationReport> {
        let mut index = IndexWriter::new(Arc::clone(&self.store), &self.config.index)?;
        index.start().await?;
        self.listener.notify(&GenerationEvent::IndexStarted {
            sources: self.registry.names(),
        });

        let mut sources = Vec::with_capacity(self.registry.len());
        for source in self.registry.all() {
            let report = self.generate_source(source.as_ref(), &mut index).await?;
            sources.push(report);
        }

        let index_path = index.finish().await?.into_iter().next().unwrap_or_default();
        self.listener.notify(&GenerationEvent::IndexFinished {
            path: index_path.clone(),
        });

        let report = GenerationReport {
            sources,
            index_path,
        };
        info!(
            target = "generator",
            sources = report.sources.len(),
            entries = report.total_entries(),
            index = %report.index_path,
            "generation completed"
        );
        Ok(report)
    }

    async fn generate_source(
        &self,
        source: &dyn SitemapSource,
        index: &mut IndexWriter,
    ) -> Result<SourceReport> {
        let name = source.name().to_string();
        let mut writer = TypeWriter::new(Arc::clone(&self.store), name.as_str(), &self.config.writer)?;
        writer.start().await?;
        self.listener.notify(&GenerationEvent::SourceStarted {
            source: name.clone(),
        });

        let mut entries = source.entries();
        while let Some(entry) = entries.try_next().await? {
            writer.write(&entry).await?;
            self.listener.notify(&GenerationEvent::SourceEntryWritten {
                source: name.clone(),
                entries_written: writer.entries_written(),
            });
        }

        let paths = writer.finish().await?;
        self.listener.notify(&GenerationEvent::SourceFinished {
            source: name.clone(),
            paths: paths.clone(),
        });

        for path in &paths {
            let modified = self.store.modified_at(path).await?;
            let entry = self.resolver.resolve(path, modified)?;
            index.write(&entry).await?;
            self.listener.notify(&GenerationEvent::IndexEntryWritten { path: path.clone() });
        }

        Ok(SourceReport {
            name,
            entries: writer.entries_written(),
            paths,
        })
    }
}
