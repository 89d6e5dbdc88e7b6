#[cfg(test)]
mod tests {
    use crate::{validate_source_name, SitemapSource, SourceRegistry, StaticSource, WriterError};
    use futures::TryStreamExt;
    use sitemill_core::{Entry, Location};
    use std::sync::Arc;

    fn entry(url: &str) -> Entry {
        Entry::new(Location::new(url).unwrap())
    }

    fn source(name: &str, urls: &[&str]) -> Arc<dyn SitemapSource> {
        Arc::new(StaticSource::new(name, urls.iter().map(|u| entry(u)).collect()))
    }

    #[test]
    fn test_source_names() {
        assert!(validate_source_name("products").is_ok());
        assert!(validate_source_name("blog-posts_2024").is_ok());
        assert!(matches!(
            validate_source_name(""),
            Err(WriterError::InvalidSourceName(_))
        ));
        assert!(matches!(
            validate_source_name("a/b"),
            Err(WriterError::InvalidSourceName(_))
        ));
    }

    /// Test: Registration order and replacement
    ///
    /// Purpose
    /// - Sources keep registration order; re-registering a name replaces it in place
    ///
    /// Expected
    /// - names() is [products, blog] and products now yields the replacement's entries
    #[tokio::test]
    async fn test_register_keeps_order_and_replaces() {
        let mut registry = SourceRegistry::new();
        registry.register(source("products", &["https://example.com/1"])).unwrap();
        registry.register(source("blog", &["https://example.com/b"])).unwrap();
        registry
            .register(source("products", &["https://example.com/2", "https://example.com/3"]))
            .unwrap();

        assert_eq!(registry.names(), vec!["products".to_string(), "blog".to_string()]);
        assert_eq!(registry.len(), 2);

        let entries: Vec<Entry> = registry
            .get("products")
            .unwrap()
            .entries()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].location().as_str(), "https://example.com/2");
    }

    #[test]
    fn test_missing_source_lists_available_sorted() {
        let mut registry = SourceRegistry::new();
        registry.register(source("products", &[])).unwrap();
        registry.register(source("blog", &[])).unwrap();

        match registry.get("news") {
            Err(WriterError::SourceNotRegistered { name, available }) => {
                assert_eq!(name, "news");
                assert_eq!(available, vec!["blog".to_string(), "products".to_string()]);
            }
            Err(other) => panic!("expected SourceNotRegistered, got {:?}", other),
            Ok(_) => panic!("expected SourceNotRegistered"),
        }
    }

    #[test]
    fn test_invalid_name_not_registered() {
        let mut registry = SourceRegistry::new();
        assert!(registry.register(source("a/b", &[])).is_err());
        assert!(registry.is_empty());
    }
}
