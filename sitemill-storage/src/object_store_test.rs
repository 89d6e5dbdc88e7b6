#[cfg(test)]
mod tests {
    use crate::object_store_config::split_bucket_prefix;
    use crate::{BackendConfig, LocalBackend, ObjectStore};
    use sitemill_core::{StagingStore, StorageError};
    use std::collections::HashMap;

    fn memory_store(root: &str) -> ObjectStore {
        ObjectStore::new(BackendConfig::Local {
            backend: LocalBackend::Memory,
            root: root.to_string(),
        })
        .expect("create memory object store")
    }

    /// Test: Streaming writer through the memory backend
    ///
    /// Purpose
    /// - Validate that an append stream uploads its chunks as one object on close
    ///
    /// Expected
    /// - size() reflects appended bytes
    /// - the object holds the concatenated chunks after close
    #[tokio::test]
    async fn test_memory_backend_append_stream() {
        let store = memory_store("sitemaps");

        let mut stream = store
            .create_append_stream("products/products_part0.xml.tmp")
            .await
            .expect("open stream");
        stream.append(b"<url>1</url>").await.unwrap();
        stream.append(b"<url>2</url>").await.unwrap();
        assert_eq!(stream.size(), 24);
        stream.close().await.unwrap();

        let data = store.read("products/products_part0.xml.tmp").await.unwrap();
        assert_eq!(data, b"<url>1</url><url>2</url>".to_vec());
    }

    #[tokio::test]
    async fn test_reopened_stream_keeps_existing_content() {
        let store = memory_store("");
        store.write("index.xml.tmp", b"head", false).await.unwrap();

        let mut stream = store.create_append_stream("index.xml.tmp").await.unwrap();
        assert_eq!(stream.size(), 4);
        stream.append(b"+tail").await.unwrap();
        stream.close().await.unwrap();

        assert_eq!(store.read("index.xml.tmp").await.unwrap(), b"head+tail".to_vec());
    }

    /// Test: Rename through copy fallback
    ///
    /// Purpose
    /// - Services without a native rename still publish the object under its new key
    ///
    /// Expected
    /// - the source key is gone, the destination holds the source content
    #[tokio::test]
    async fn test_rename_replaces_destination() {
        let store = memory_store("prefix");
        store.write("p/p_part0.xml.tmp", b"new", false).await.unwrap();
        store.write("p/p_part0.xml", b"old", false).await.unwrap();

        store.delete("p/p_part0.xml").await.unwrap();
        store.rename("p/p_part0.xml.tmp", "p/p_part0.xml").await.unwrap();

        assert!(!store.has("p/p_part0.xml.tmp").await.unwrap());
        assert_eq!(store.read("p/p_part0.xml").await.unwrap(), b"new".to_vec());
        assert!(store.modified_at("p/p_part0.xml").await.is_ok());
    }

    #[tokio::test]
    async fn test_list_keys_strips_root_prefix() {
        let store = memory_store("site");
        for key in ["news/news_part0.xml", "news/news_part1.xml.tmp", "other/x.xml"] {
            store.write(key, b"x", false).await.unwrap();
        }

        assert_eq!(
            store.list_keys("news/").await.unwrap(),
            vec!["news/news_part0.xml".to_string(), "news/news_part1.xml.tmp".to_string()]
        );
    }

    #[tokio::test]
    async fn test_missing_objects() {
        let store = memory_store("");
        assert!(!store.has("nope.xml").await.unwrap());
        assert!(matches!(store.read("nope.xml").await, Err(StorageError::NotFound(_))));
        assert!(matches!(store.delete("nope.xml").await, Err(StorageError::NotFound(_))));

        store.write("once.xml", b"1", false).await.unwrap();
        assert!(matches!(
            store.write("once.xml", b"2", false).await,
            Err(StorageError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_split_bucket_prefix() {
        assert_eq!(
            split_bucket_prefix("s3://bucket/a/b/").unwrap(),
            ("bucket".to_string(), "a/b".to_string())
        );
        assert_eq!(
            split_bucket_prefix("gcs://bucket").unwrap(),
            ("bucket".to_string(), String::new())
        );
        assert!(split_bucket_prefix("s3:///prefix").is_err());
    }

    #[test]
    fn test_cloud_config_builds_operator() {
        let mut options = HashMap::new();
        options.insert("region".to_string(), "us-east-1".to_string());
        options.insert("endpoint".to_string(), "http://127.0.0.1:9000".to_string());
        let store = ObjectStore::new(BackendConfig::Cloud {
            backend: crate::CloudBackend::S3,
            root: "s3://sitemaps/prod".to_string(),
            options,
        });
        assert!(store.is_ok());
    }

    /// Test: Local filesystem backend
    ///
    /// Purpose
    /// - The opendal fs service maps keys onto files below its root, including a
    ///   `file://` root
    ///
    /// Flow
    /// - Stream a temporary part, publish it by rename, list the directory
    ///
    /// Expected
    /// - Only the published key is listed and the file holds the streamed bytes
    #[tokio::test]
    async fn test_fs_backend_stream_rename_list() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = ObjectStore::new(BackendConfig::Local {
            backend: LocalBackend::Fs,
            root: format!("file://{}", tmp.path().display()),
        })
        .expect("create fs object store");

        let mut stream = store
            .create_append_stream("products/products_part0.xml.tmp")
            .await
            .unwrap();
        stream.append(b"<url>1</url>").await.unwrap();
        stream.close().await.unwrap();

        store
            .rename("products/products_part0.xml.tmp", "products/products_part0.xml")
            .await
            .unwrap();

        assert_eq!(
            store.list_keys("products/").await.unwrap(),
            vec!["products/products_part0.xml".to_string()]
        );
        assert!(!store.has("products/products_part0.xml.tmp").await.unwrap());
        let on_disk = std::fs::read(tmp.path().join("products").join("products_part0.xml")).unwrap();
        assert_eq!(on_disk, b"<url>1</url>".to_vec());
        assert!(store.modified_at("products/products_part0.xml").await.is_ok());
    }

    #[test]
    fn test_unknown_backend_options_are_ignored() {
        let mut options = HashMap::new();
        options.insert("endpoint".to_string(), "http://127.0.0.1:4443".to_string());
        options.insert("storage_class".to_string(), "COLD".to_string());
        let store = ObjectStore::new(BackendConfig::Cloud {
            backend: crate::CloudBackend::Gcs,
            root: "gcs://sitemaps".to_string(),
            options,
        });
        assert!(store.is_ok());
    }
}
