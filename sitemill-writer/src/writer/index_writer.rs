use super::rotation::{LimitCheck, RotationLimits};
use super::session::{replace_extension, WriterSession, WriterState};
use super::{SitemapWriter, PERMANENT_EXTENSION, TEMPORARY_EXTENSION};
use crate::config::IndexConfig;
use crate::errors::{Result, WriterError};
use async_trait::async_trait;
use sitemill_core::{Entry, Renderer, StagingStore};
use std::sync::Arc;
use tracing::{debug, info};

/// Writes the single `sitemapindex` file enumerating every published part.
///
/// The index never rotates: breaching a limit is an error the operator has to resolve
/// by reducing the number of part files.
pub struct IndexWriter {
    name: String,
    limits: RotationLimits,
    session: WriterSession,
}

impl IndexWriter {
    pub fn new(store: Arc<dyn StagingStore>, config: &IndexConfig) -> Result<Self> {
        config.validate()?;
        let path = format!("{}.{}", config.name, TEMPORARY_EXTENSION);
        Ok(IndexWriter {
            name: config.name.clone(),
            limits: config.limits,
            session: WriterSession::new(store, Renderer::sitemap_index(config.encoding.clone()), path),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> WriterState {
        self.session.state()
    }

    pub fn path(&self) -> &str {
        self.session.path()
    }

    pub fn entries_written(&self) -> usize {
        self.session.total_entries()
    }
}

#[async_trait]
impl SitemapWriter for IndexWriter {
    async fn start(&mut self) -> Result<()> {
        self.session.ensure_can_start()?;
        let path = self.session.path().to_string();
        self.session.open(path).await?;
        self.session.mark_started();
        Ok(())
    }

    async fn write(&mut self, entry: &Entry) -> Result<()> {
        self.session.ensure_started()?;
        match self.session.check(&self.limits) {
            LimitCheck::Within => {}
            LimitCheck::EntryLimitReached => {
                return Err(WriterError::EntryLimitReached {
                    limit: self.limits.max_entries,
                    path: self.session.path().to_string(),
                });
            }
            LimitCheck::SizeLimitReached => {
                return Err(WriterError::SizeLimitReached {
                    limit: self.limits.max_size_mb,
                    path: self.session.path().to_string(),
                });
            }
        }
        self.session.append(entry).await
    }

    async fn finish(&mut self) -> Result<Vec<String>> {
        self.session.ensure_started()?;

        self.session.close_stream().await?;
        self.session.wrap_opened_paths().await?;

        let temporary = self.session.path().to_string();
        let permanent = replace_extension(&temporary, TEMPORARY_EXTENSION, PERMANENT_EXTENSION)?;
        let store = Arc::clone(self.session.store());
        if store.has(&permanent).await? {
            store.delete(&permanent).await?;
            debug!(target = "writer", path = %permanent, "removed previously published index");
        }
        store.rename(&temporary, &permanent).await?;

        self.session.mark_finished();
        info!(
            target = "writer",
            path = %permanent,
            entries = self.session.total_entries(),
            "published sitemap index"
        );
        Ok(vec![permanent])
    }
}
