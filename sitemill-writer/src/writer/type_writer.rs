use super::rotation::{LimitCheck, RotationLimits};
use super::session::{has_extension, replace_extension, WriterSession, WriterState};
use super::{SitemapWriter, PERMANENT_EXTENSION, TEMPORARY_EXTENSION};
use crate::config::WriterConfig;
use crate::errors::Result;
use crate::source::validate_source_name;
use async_trait::async_trait;
use sitemill_core::{Entry, Renderer, StagingStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Writes the `urlset` files of one source, rotating into numbered parts.
///
/// Part `N` is staged as `{source}/{source}_part{N}.xml.tmp` and published as
/// `{source}/{source}_part{N}.xml` by `finish()`.
pub struct TypeWriter {
    source_name: String,
    limits: RotationLimits,
    part_number: usize,
    session: WriterSession,
}

impl TypeWriter {
    pub fn new(
        store: Arc<dyn StagingStore>,
        source_name: impl Into<String>,
        config: &WriterConfig,
    ) -> Result<Self> {
        let source_name = source_name.into();
        validate_source_name(&source_name)?;
        config.validate()?;

        let first_path = part_path(&source_name, 0);
        Ok(TypeWriter {
            session: WriterSession::new(store, Renderer::url_set(config.encoding.clone()), first_path),
            source_name,
            limits: config.limits,
            part_number: 0,
        })
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn state(&self) -> WriterState {
        self.session.state()
    }

    pub fn part_number(&self) -> usize {
        self.part_number
    }

    /// Temporary path of the part currently being written.
    pub fn current_path(&self) -> &str {
        self.session.path()
    }

    pub fn entries_written(&self) -> usize {
        self.session.total_entries()
    }

    fn directory_prefix(&self) -> String {
        format!("{}/", self.source_name)
    }

    async fn rotate(&mut self, reason: LimitCheck) -> Result<()> {
        self.session.close_stream().await?;
        self.part_number += 1;
        let next = part_path(&self.source_name, self.part_number);
        debug!(target = "writer", source = %self.source_name, part = self.part_number, path = %next, reason = ?reason, "rotating to next part");
        self.session.open(next).await
    }
}

#[async_trait]
impl SitemapWriter for TypeWriter {
    async fn start(&mut self) -> Result<()> {
        self.session.ensure_can_start()?;
        // Leftover temporaries come from an aborted run; they must not join this batch.
        let store = Arc::clone(self.session.store());
        let evicted = evict_with_extension(store.as_ref(), &self.directory_prefix(), TEMPORARY_EXTENSION).await?;
        if evicted > 0 {
            warn!(target = "writer", source = %self.source_name, evicted, "removed temporary parts left by an aborted run");
        }

        let first = part_path(&self.source_name, 0);
        self.session.open(first).await?;
        self.session.mark_started();
        Ok(())
    }

    async fn write(&mut self, entry: &Entry) -> Result<()> {
        self.session.ensure_started()?;
        let check = self.session.check(&self.limits);
        if check.is_breach() {
            self.rotate(check).await?;
        }
        self.session.append(entry).await
    }

    async fn finish(&mut self) -> Result<Vec<String>> {
        self.session.ensure_started()?;

        self.session.close_stream().await?;
        self.session.wrap_opened_paths().await?;

        let store = Arc::clone(self.session.store());
        let prefix = self.directory_prefix();
        let evicted = evict_with_extension(store.as_ref(), &prefix, PERMANENT_EXTENSION).await?;
        debug!(target = "writer", source = %self.source_name, evicted, "removed previously published parts");
        let published = publish_temporaries(store.as_ref(), &prefix).await?;

        self.session.mark_finished();
        info!(
            target = "writer",
            source = %self.source_name,
            parts = published.len(),
            entries = self.session.total_entries(),
            "published sitemap parts"
        );
        Ok(published)
    }
}

fn part_path(source_name: &str, part_number: usize) -> String {
    format!(
        "{0}/{0}_part{1}.{2}",
        source_name, part_number, TEMPORARY_EXTENSION
    )
}

/// Delete every file directly under `prefix` whose extension is `extension`.
async fn evict_with_extension(
    store: &dyn StagingStore,
    prefix: &str,
    extension: &str,
) -> Result<usize> {
    let mut evicted = 0;
    for key in store.list_keys(prefix).await? {
        if has_extension(&key, extension) {
            store.delete(&key).await?;
            evicted += 1;
        }
    }
    Ok(evicted)
}

/// Rename every temporary file under `prefix` to its permanent name.
async fn publish_temporaries(store: &dyn StagingStore, prefix: &str) -> Result<Vec<String>> {
    let mut published = Vec::new();
    for key in store.list_keys(prefix).await? {
        if has_extension(&key, TEMPORARY_EXTENSION) {
            let permanent = replace_extension(&key, TEMPORARY_EXTENSION, PERMANENT_EXTENSION)?;
            store.rename(&key, &permanent).await?;
            published.push(permanent);
        }
    }
    Ok(published)
}
