use super::rotation::{LimitCheck, RotationLimits};
use crate::errors::{Result, StateError, WriterError};
use sitemill_core::{AppendStream, Entry, Renderer, StagingStore};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Lifecycle of a writer: `NotStarted -> Started -> Finished` (terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    NotStarted,
    Started,
    Finished,
}

/// State shared by both writer kinds for one generation run.
///
/// Owns the live append stream, the active path and the per-path entry counters.
/// A counter exists only for paths that received at least one entry.
pub(crate) struct WriterSession {
    store: Arc<dyn StagingStore>,
    renderer: Renderer,
    state: WriterState,
    path: String,
    entries_written: HashMap<String, usize>,
    // Every path a stream was opened on, in opening order; all of them get wrapped.
    opened_paths: Vec<String>,
    stream: Option<Box<dyn AppendStream>>,
}

impl WriterSession {
    pub(crate) fn new(store: Arc<dyn StagingStore>, renderer: Renderer, path: String) -> Self {
        WriterSession {
            store,
            renderer,
            state: WriterState::NotStarted,
            path,
            entries_written: HashMap::new(),
            opened_paths: Vec::new(),
            stream: None,
        }
    }

    pub(crate) fn store(&self) -> &Arc<dyn StagingStore> {
        &self.store
    }

    pub(crate) fn state(&self) -> WriterState {
        self.state
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn ensure_can_start(&self) -> Result<()> {
        match self.state {
            WriterState::NotStarted => Ok(()),
            WriterState::Started => Err(StateError::AlreadyStarted.into()),
            WriterState::Finished => Err(StateError::AlreadyFinished.into()),
        }
    }

    /// Guard for both `write` and `finish`: only a started, unfinished session qualifies.
    pub(crate) fn ensure_started(&self) -> Result<()> {
        match self.state {
            WriterState::Started => Ok(()),
            WriterState::NotStarted => Err(StateError::NotStarted.into()),
            WriterState::Finished => Err(StateError::AlreadyFinished.into()),
        }
    }

    pub(crate) fn mark_started(&mut self) {
        self.state = WriterState::Started;
    }

    pub(crate) fn mark_finished(&mut self) {
        self.state = WriterState::Finished;
    }

    /// Open an append stream on `path` and make it the active path.
    /// Any stream still open is closed first.
    pub(crate) async fn open(&mut self, path: String) -> Result<()> {
        self.close_stream().await?;

        let stream = self
            .store
            .create_append_stream(&path)
            .await
            .map_err(|e| WriterError::from_stream_open(&path, e))?;
        debug!(target = "writer", path = %path, size = stream.size(), "opened part stream");

        if !self.opened_paths.contains(&path) {
            self.opened_paths.push(path.clone());
        }
        self.stream = Some(stream);
        self.path = path;
        Ok(())
    }

    /// Close the live stream, if any. The handle is released even when closing fails.
    pub(crate) async fn close_stream(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            stream.close().await?;
        }
        Ok(())
    }

    pub(crate) fn entries_in_current(&self) -> usize {
        self.entries_written.get(&self.path).copied().unwrap_or(0)
    }

    pub(crate) fn total_entries(&self) -> usize {
        self.entries_written.values().sum()
    }

    pub(crate) fn current_size(&self) -> u64 {
        self.stream.as_ref().map(|s| s.size()).unwrap_or(0)
    }

    pub(crate) fn check(&self, limits: &RotationLimits) -> LimitCheck {
        limits.check(self.entries_in_current(), self.current_size())
    }

    /// Render `entry` into the active stream and count it against the active path.
    pub(crate) async fn append(&mut self, entry: &Entry) -> Result<()> {
        let fragment = self.renderer.render_entry(entry);
        let stream = self.stream.as_mut().ok_or(StateError::NotStarted)?;
        stream.append(fragment.as_bytes()).await?;
        *self.entries_written.entry(self.path.clone()).or_insert(0) += 1;
        Ok(())
    }

    /// Wrap phase: prepend the document header and append the footer to every opened file.
    pub(crate) async fn wrap_opened_paths(&mut self) -> Result<()> {
        let header = self.renderer.render_header();
        let footer = self.renderer.render_footer();

        for path in std::mem::take(&mut self.opened_paths) {
            let body = self.store.read(&path).await?;
            let mut content = Vec::with_capacity(header.len() + body.len() + footer.len());
            content.extend_from_slice(header.as_bytes());
            content.extend_from_slice(&body);
            content.extend_from_slice(footer.as_bytes());
            self.store.write(&path, &content, true).await?;
            debug!(target = "writer", path = %path, bytes = content.len(), entries = self.entries_written.get(&path).copied().unwrap_or(0), "wrapped part");
        }
        Ok(())
    }
}

/// `true` when the final extension of `path` is exactly `.{extension}`.
pub(crate) fn has_extension(path: &str, extension: &str) -> bool {
    path.strip_suffix(extension)
        .map(|stem| stem.ends_with('.'))
        .unwrap_or(false)
}

/// Swap the `.{current}` suffix of `path` for `.{new}`.
pub(crate) fn replace_extension(path: &str, current: &str, new: &str) -> Result<String> {
    if !has_extension(path, current) {
        return Err(WriterError::PathFormat {
            path: path.to_string(),
            extension: current.to_string(),
        });
    }
    let stem = &path[..path.len() - current.len()];
    Ok(format!("{}{}", stem, new))
}
