use crate::errors::{Result, WriterError};
use serde::{Deserialize, Serialize};

/// 50,000 URLs is the protocol limit; stay below it.
pub const DEFAULT_MAX_ENTRIES: usize = 49_000;
/// 10 MB is the protocol limit; stay below it.
pub const DEFAULT_MAX_SIZE_MB: f64 = 9.0;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Per-file limits applied before each write.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationLimits {
    pub max_entries: usize,
    pub max_size_mb: f64,
}

impl Default for RotationLimits {
    fn default() -> Self {
        RotationLimits {
            max_entries: DEFAULT_MAX_ENTRIES,
            max_size_mb: DEFAULT_MAX_SIZE_MB,
        }
    }
}

/// Outcome of checking the current file against the limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitCheck {
    Within,
    EntryLimitReached,
    SizeLimitReached,
}

impl LimitCheck {
    pub fn is_breach(&self) -> bool {
        !matches!(self, LimitCheck::Within)
    }
}

impl RotationLimits {
    pub fn new(max_entries: usize, max_size_mb: f64) -> Result<Self> {
        let limits = RotationLimits {
            max_entries,
            max_size_mb,
        };
        limits.validate()?;
        Ok(limits)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(WriterError::InvalidConfig(
                "max_entries must be greater than zero".to_string(),
            ));
        }
        if !(self.max_size_mb.is_finite() && self.max_size_mb > 0.0) {
            return Err(WriterError::InvalidConfig(format!(
                "max_size_mb must be a positive number, got {}",
                self.max_size_mb
            )));
        }
        Ok(())
    }

    /// Decide whether the next entry may go into the current file.
    ///
    /// `entries_in_file` is the number of entries already written to it and `file_bytes`
    /// its current byte size. The entry-count trigger is evaluated before the size trigger.
    pub fn check(&self, entries_in_file: usize, file_bytes: u64) -> LimitCheck {
        if entries_in_file >= self.max_entries {
            return LimitCheck::EntryLimitReached;
        }
        if file_bytes as f64 / BYTES_PER_MB >= self.max_size_mb {
            return LimitCheck::SizeLimitReached;
        }
        LimitCheck::Within
    }
}
