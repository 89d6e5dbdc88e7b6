#[cfg(test)]
mod tests {
    use crate::{GeneratorConfig, IndexConfig, WriterConfig, WriterError, DEFAULT_INDEX_NAME};

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.writer.limits.max_entries, 49_000);
        assert_eq!(config.writer.limits.max_size_mb, 9.0);
        assert_eq!(config.writer.encoding, "UTF-8");
        assert_eq!(config.index.name, DEFAULT_INDEX_NAME);
        assert!(config.validate().is_ok());
    }

    /// Test: Partial configuration documents
    ///
    /// Purpose
    /// - Every omitted field falls back to its default
    ///
    /// Expected
    /// - Only the given values differ from GeneratorConfig::default()
    #[test]
    fn test_partial_document_uses_defaults() {
        let json = r#"{ "writer": { "limits": { "max_entries": 100 } }, "index": { "name": "sitemap" } }"#;
        let config: GeneratorConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.writer.limits.max_entries, 100);
        assert_eq!(config.writer.limits.max_size_mb, 9.0);
        assert_eq!(config.writer.encoding, "UTF-8");
        assert_eq!(config.index.name, "sitemap");
        assert_eq!(config.index.limits, WriterConfig::default().limits);
    }

    #[test]
    fn test_validation_failures() {
        let mut config = GeneratorConfig::default();
        config.writer.limits.max_entries = 0;
        assert!(matches!(config.validate(), Err(WriterError::InvalidConfig(_))));

        let index = IndexConfig {
            name: "  ".to_string(),
            ..IndexConfig::default()
        };
        assert!(matches!(index.validate(), Err(WriterError::InvalidConfig(_))));

        let index = IndexConfig {
            encoding: String::new(),
            ..IndexConfig::default()
        };
        assert!(matches!(index.validate(), Err(WriterError::InvalidConfig(_))));
    }

    /// Test: Index name confined to the store root
    ///
    /// Purpose
    /// - An index name with a directory component would place the index inside a
    ///   source directory, where the source writer evicts it as a stale file
    ///
    /// Expected
    /// - "a/index" and "/index" are rejected with InvalidConfig
    #[test]
    fn test_index_name_with_directory_rejected() {
        for name in ["a/index", "/index", "index/"] {
            let index = IndexConfig {
                name: name.to_string(),
                ..IndexConfig::default()
            };
            match index.validate() {
                Err(WriterError::InvalidConfig(message)) => assert!(message.contains(name), "{}", message),
                other => panic!("expected InvalidConfig for {}, got {:?}", name, other),
            }
        }

        let mut config = GeneratorConfig::default();
        config.index.name = "a/index".to_string();
        assert!(matches!(config.validate(), Err(WriterError::InvalidConfig(_))));
    }
}
