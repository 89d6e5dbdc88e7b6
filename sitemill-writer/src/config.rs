use crate::errors::{Result, WriterError};
use crate::writer::RotationLimits;
use serde::{Deserialize, Serialize};
use sitemill_core::DEFAULT_ENCODING;

pub const DEFAULT_INDEX_NAME: &str = "index";

/// Settings of the per-source (`urlset`) writers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Rotation limits applied to every part file
    pub limits: RotationLimits,
    /// Encoding declared in the XML header
    pub encoding: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig {
            limits: RotationLimits::default(),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

impl WriterConfig {
    pub fn validate(&self) -> Result<()> {
        self.limits.validate()?;
        if self.encoding.trim().is_empty() {
            return Err(WriterError::InvalidConfig("encoding must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Settings of the sitemap index writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// File name of the index, without extension (`index` publishes `index.xml`)
    pub name: String,
    /// Breaching these limits fails the run; the index never rotates
    pub limits: RotationLimits,
    pub encoding: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            name: DEFAULT_INDEX_NAME.to_string(),
            limits: RotationLimits::default(),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

impl IndexConfig {
    pub fn validate(&self) -> Result<()> {
        self.limits.validate()?;
        if self.name.trim().is_empty() {
            return Err(WriterError::InvalidConfig("index name must not be empty".to_string()));
        }
        // Source directories are cleaned on every run; the index must stay at the store root.
        if self.name.contains('/') {
            return Err(WriterError::InvalidConfig(format!(
                "index name '{}' must not contain '/'",
                self.name
            )));
        }
        if self.encoding.trim().is_empty() {
            return Err(WriterError::InvalidConfig("encoding must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Complete configuration of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub writer: WriterConfig,
    pub index: IndexConfig,
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        self.writer.validate()?;
        self.index.validate()
    }
}
