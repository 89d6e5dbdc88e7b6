use crate::errors::EntryError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

/// Absolute `http`/`https` URL of a page or of a published sitemap file.
///
/// See <https://www.sitemaps.org/protocol.html#locdef>.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location(String);

impl Location {
    pub fn new(value: impl Into<String>) -> Result<Self, EntryError> {
        let value = value.into();
        let invalid = |reason: &str| EntryError::InvalidLocation {
            value: value.clone(),
            reason: reason.to_string(),
        };

        if value.trim().is_empty() {
            return Err(invalid("location is empty"));
        }
        let parsed = url::Url::parse(&value).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if !parsed.has_host() {
            return Err(invalid("missing host"));
        }

        Ok(Location(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How frequently the page is likely to change.
///
/// See <https://www.sitemaps.org/protocol.html#changefreqdef>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub const ALL: [ChangeFrequency; 7] = [
        ChangeFrequency::Always,
        ChangeFrequency::Hourly,
        ChangeFrequency::Daily,
        ChangeFrequency::Weekly,
        ChangeFrequency::Monthly,
        ChangeFrequency::Yearly,
        ChangeFrequency::Never,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

impl FromStr for ChangeFrequency {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChangeFrequency::ALL
            .iter()
            .copied()
            .find(|freq| freq.as_str() == s)
            .ok_or_else(|| EntryError::InvalidChangeFrequency(s.to_string()))
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority of a URL relative to the other URLs of the same site, in `[0.0, 1.0]`.
///
/// See <https://www.sitemaps.org/protocol.html#prioritydef>.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Priority(f64);

impl Priority {
    pub const DEFAULT: f64 = 0.5;

    pub fn new(value: f64) -> Result<Self, EntryError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(EntryError::InvalidPriority(value));
        }
        Ok(Priority(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority(Self::DEFAULT)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Calendar date of the last modification; rendered as `YYYY-MM-DD`.
///
/// See <https://www.sitemaps.org/protocol.html#lastmoddef>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LastModified(NaiveDate);

impl LastModified {
    pub fn new(date: NaiveDate) -> Self {
        LastModified(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, EntryError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(LastModified)
            .ok_or_else(|| EntryError::InvalidLastModified(format!("{year}-{month}-{day}")))
    }

    /// Date (UTC) of the given unix timestamp in seconds.
    pub fn from_unix_timestamp(seconds: i64) -> Result<Self, EntryError> {
        DateTime::<Utc>::from_timestamp(seconds, 0)
            .map(|dt| LastModified(dt.date_naive()))
            .ok_or_else(|| EntryError::InvalidLastModified(format!("timestamp {seconds}")))
    }

    pub fn from_system_time(time: SystemTime) -> Self {
        LastModified(DateTime::<Utc>::from(time).date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for LastModified {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(LastModified)
            .map_err(|e| EntryError::InvalidLastModified(format!("{s}: {e}")))
    }
}

impl fmt::Display for LastModified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// One URL record of a sitemap or of a sitemap index.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    location: Location,
    change_frequency: Option<ChangeFrequency>,
    last_modified: Option<LastModified>,
    priority: Option<Priority>,
}

impl Entry {
    pub fn new(location: Location) -> Self {
        Entry {
            location,
            change_frequency: None,
            last_modified: None,
            priority: None,
        }
    }

    pub fn with_change_frequency(mut self, change_frequency: ChangeFrequency) -> Self {
        self.change_frequency = Some(change_frequency);
        self
    }

    pub fn with_last_modified(mut self, last_modified: LastModified) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn change_frequency(&self) -> Option<ChangeFrequency> {
        self.change_frequency
    }

    pub fn last_modified(&self) -> Option<LastModified> {
        self.last_modified
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }
}
