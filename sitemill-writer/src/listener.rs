use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

/// Progress of a generation run, emitted in the order the work happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationEvent {
    /// The index writer is open; `sources` lists the sources in processing order.
    IndexStarted { sources: Vec<String> },
    SourceStarted { source: String },
    /// One entry went into the source's current part; `entries_written` counts the whole source.
    SourceEntryWritten { source: String, entries_written: usize },
    /// Every part of the source is published.
    SourceFinished { source: String, paths: Vec<String> },
    /// A published part was referenced from the index.
    IndexEntryWritten { path: String },
    IndexFinished { path: String },
}

/// Observer of a generation run. Called inline by the generator, so implementations must not block.
pub trait GenerationListener: Send + Sync {
    fn notify(&self, event: &GenerationEvent);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl GenerationListener for NoopListener {
    fn notify(&self, _event: &GenerationEvent) {}
}

/// Reports milestones at info level and per-entry progress at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingListener;

impl GenerationListener for LoggingListener {
    fn notify(&self, event: &GenerationEvent) {
        match event {
            GenerationEvent::IndexStarted { sources } => {
                info!(target = "generator", sources = ?sources, "generation started");
            }
            GenerationEvent::SourceStarted { source } => {
                info!(target = "generator", source = %source, "writing source");
            }
            GenerationEvent::SourceEntryWritten {
                source,
                entries_written,
            } => {
                debug!(target = "generator", source = %source, entries_written, "entry written");
            }
            GenerationEvent::SourceFinished { source, paths } => {
                info!(target = "generator", source = %source, parts = paths.len(), "source published");
            }
            GenerationEvent::IndexEntryWritten { path } => {
                debug!(target = "generator", path = %path, "index entry written");
            }
            GenerationEvent::IndexFinished { path } => {
                info!(target = "generator", path = %path, "index published");
            }
        }
    }
}

// Channel notification; a dropped receiver only means nobody is listening anymore.
impl GenerationListener for UnboundedSender<GenerationEvent> {
    fn notify(&self, event: &GenerationEvent) {
        let _ = self.send(event.clone());
    }
}
