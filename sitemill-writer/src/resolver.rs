use crate::errors::Result;
use sitemill_core::{Entry, LastModified, Location};
use std::time::SystemTime;

/// Turns a published part path into the entry that references it from the index.
pub trait IndexEntryResolver: Send + Sync {
    fn resolve(&self, path: &str, modified: SystemTime) -> Result<Entry>;
}

/// Serves parts under one base URL: `products/products_part0.xml` becomes
/// `{base_url}/products/products_part0.xml`, dated by the file's modification time.
#[derive(Debug, Clone)]
pub struct SimpleIndexEntryResolver {
    base_url: String,
}

impl SimpleIndexEntryResolver {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Location::new(base_url.as_str())?;
        Ok(SimpleIndexEntryResolver { base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl IndexEntryResolver for SimpleIndexEntryResolver {
    fn resolve(&self, path: &str, modified: SystemTime) -> Result<Entry> {
        let location = Location::new(format!("{}/{}", self.base_url, path.trim_start_matches('/')))?;
        Ok(Entry::new(location).with_last_modified(LastModified::from_system_time(modified)))
    }
}
