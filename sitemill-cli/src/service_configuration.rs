use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use sitemill_core::Location;
use sitemill_storage::{
    BackendConfig, CloudBackend, LocalDiskStore, MemoryStore, ObjectStore, Storage,
};
use sitemill_writer::{validate_source_name, GeneratorConfig, IndexConfig, WriterConfig};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// configuration settings loaded from the config file
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct LoadConfiguration {
    /// Public URL the published files are served under
    pub(crate) base_url: String,
    /// Where sitemaps are staged and published
    pub(crate) storage: StorageConfig,
    /// Per-source writer settings (rotation limits, encoding)
    #[serde(default)]
    pub(crate) writer: WriterConfig,
    /// Sitemap index settings
    #[serde(default)]
    pub(crate) index: IndexConfig,
    /// Sources, processed in the listed order
    #[serde(default)]
    pub(crate) sources: Vec<SourceConfig>,
}

/// validated settings of one generation run
#[derive(Debug)]
pub(crate) struct ServiceConfiguration {
    pub(crate) base_url: String,
    pub(crate) storage: StorageConfig,
    pub(crate) generator: GeneratorConfig,
    pub(crate) sources: Vec<SourceConfig>,
}

/// Storage backends selectable from the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum StorageConfig {
    /// In-process store, nothing is persisted (dry runs)
    Memory {
        #[serde(default)]
        root: String,
    },
    /// A local directory, the web root of the site
    Fs { root: String },
    S3 {
        /// s3://bucket/prefix
        root: String,
        #[serde(default)]
        options: HashMap<String, String>,
    },
    Gcs {
        /// gcs://bucket/prefix
        root: String,
        #[serde(default)]
        options: HashMap<String, String>,
    },
}

/// A URL-list file published under `name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SourceConfig {
    pub(crate) name: String,
    pub(crate) file: PathBuf,
}

impl TryFrom<LoadConfiguration> for ServiceConfiguration {
    type Error = anyhow::Error;

    fn try_from(config: LoadConfiguration) -> Result<Self> {
        Location::new(config.base_url.as_str())
            .with_context(|| format!("Invalid base_url: {}", config.base_url))?;

        let generator = GeneratorConfig {
            writer: config.writer,
            index: config.index,
        };
        generator.validate().context("Invalid writer/index configuration")?;

        let mut seen = HashSet::new();
        for source in &config.sources {
            validate_source_name(&source.name)?;
            if !seen.insert(source.name.as_str()) {
                bail!("Source '{}' is configured more than once", source.name);
            }
            // The index lives next to the source directories
            if source.name == generator.index.name {
                bail!(
                    "Source '{}' collides with the index name, rename one of them",
                    source.name
                );
            }
        }

        Ok(ServiceConfiguration {
            base_url: config.base_url,
            storage: config.storage,
            generator,
            sources: config.sources,
        })
    }
}

impl ServiceConfiguration {
    /// Source files given as relative paths are resolved against `base_dir`
    /// (the directory of the config file).
    pub(crate) fn resolve_source_files(&mut self, base_dir: &Path) {
        for source in &mut self.sources {
            if source.file.is_relative() {
                source.file = base_dir.join(&source.file);
            }
        }
    }
}

impl StorageConfig {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            StorageConfig::Memory { .. } => "memory",
            StorageConfig::Fs { .. } => "fs",
            StorageConfig::S3 { .. } => "s3",
            StorageConfig::Gcs { .. } => "gcs",
        }
    }

    pub(crate) fn root(&self) -> &str {
        match self {
            StorageConfig::Memory { root }
            | StorageConfig::Fs { root }
            | StorageConfig::S3 { root, .. }
            | StorageConfig::Gcs { root, .. } => root,
        }
    }

    pub(crate) fn set_root(&mut self, new_root: String) {
        match self {
            StorageConfig::Memory { root }
            | StorageConfig::Fs { root }
            | StorageConfig::S3 { root, .. }
            | StorageConfig::Gcs { root, .. } => *root = new_root,
        }
    }

    pub(crate) fn build(&self) -> Result<Storage> {
        let storage = match self {
            StorageConfig::Memory { .. } => Storage::InMemory(MemoryStore::new()),
            StorageConfig::Fs { root } => {
                if root.trim().is_empty() {
                    bail!("storage.root is required for the fs storage");
                }
                Storage::LocalDisk(LocalDiskStore::new(root.as_str()))
            }
            StorageConfig::S3 { root, options } => Storage::Object(
                ObjectStore::new(BackendConfig::Cloud {
                    backend: CloudBackend::S3,
                    root: root.clone(),
                    options: options.clone(),
                })
                .context("Failed to initialize s3 storage")?,
            ),
            StorageConfig::Gcs { root, options } => Storage::Object(
                ObjectStore::new(BackendConfig::Cloud {
                    backend: CloudBackend::Gcs,
                    root: root.clone(),
                    options: options.clone(),
                })
                .context("Failed to initialize gcs storage")?,
            ),
        };
        Ok(storage)
    }
}
