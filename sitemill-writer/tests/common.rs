use sitemill_core::{ChangeFrequency, Entry, LastModified, Location, Priority, StagingStore};
use sitemill_writer::{
    GeneratorConfig, IndexConfig, RotationLimits, SitemapSource, SourceRegistry, StaticSource,
    WriterConfig,
};
use std::sync::Arc;

pub const BASE_URL: &str = "https://example.com/sitemaps";

/// Creates `count` fully populated entries under `https://example.com/{prefix}/`
pub fn make_entries(prefix: &str, count: usize) -> Vec<Entry> {
    (0..count)
        .map(|i| {
            Entry::new(Location::new(format!("https://example.com/{}/{}", prefix, i)).unwrap())
                .with_change_frequency(ChangeFrequency::Weekly)
                .with_priority(Priority::new(0.8).unwrap())
                .with_last_modified(LastModified::from_ymd(2024, 1, 15).unwrap())
        })
        .collect()
}

/// Registry with one static source per `(name, entry count)` pair, in the given order
pub fn make_registry(sources: &[(&str, usize)]) -> SourceRegistry {
    let mut registry = SourceRegistry::new();
    for (name, count) in sources {
        let source: Arc<dyn SitemapSource> =
            Arc::new(StaticSource::new(*name, make_entries(name, *count)));
        registry.register(source).unwrap();
    }
    registry
}

/// Generator configuration rotating every `max_entries` entries
pub fn config_with_part_size(max_entries: usize) -> GeneratorConfig {
    GeneratorConfig {
        writer: WriterConfig {
            limits: RotationLimits::new(max_entries, 9.0).unwrap(),
            ..WriterConfig::default()
        },
        index: IndexConfig::default(),
    }
}

#[allow(dead_code)]
pub async fn read_string(store: &dyn StagingStore, path: &str) -> String {
    String::from_utf8(store.read(path).await.unwrap()).unwrap()
}
