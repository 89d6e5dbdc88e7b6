mod errors;
pub use errors::{Result, StateError, WriterError};

pub mod config;
pub use config::{GeneratorConfig, IndexConfig, WriterConfig, DEFAULT_INDEX_NAME};

pub mod writer;
pub use writer::{
    IndexWriter, LimitCheck, RotationLimits, SitemapWriter, TypeWriter, WriterState,
    PERMANENT_EXTENSION, TEMPORARY_EXTENSION,
};

pub mod source;
pub use source::{validate_source_name, EntryStream, SitemapSource, SourceRegistry, StaticSource};

pub mod resolver;
pub use resolver::{IndexEntryResolver, SimpleIndexEntryResolver};

pub mod listener;
pub use listener::{GenerationEvent, GenerationListener, LoggingListener, NoopListener};

pub mod generator;
pub use generator::{GenerationReport, Generator, SourceReport};

// Unit tests
#[cfg(test)]
mod config_test;
#[cfg(test)]
mod listener_test;
#[cfg(test)]
mod source_test;
