use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloudBackend {
    S3,
    Gcs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalBackend {
    Fs,
    Memory,
}

#[derive(Debug, Clone)]
pub enum BackendConfig {
    /// Cloud backends hosted out of process (S3, GCS)
    Cloud {
        backend: CloudBackend,
        /// A URI-like root, e.g. s3://bucket/prefix, gcs://bucket/prefix
        root: String,
        /// Optional backend-specific options (endpoint, region, credentials, etc.)
        options: HashMap<String, String>,
    },
    /// Local backends (fs, memory)
    Local {
        backend: LocalBackend,
        /// For fs: an absolute directory like file:///var/www/sitemaps or /var/www/sitemaps
        /// For memory: a logical namespace (prefix is used as a virtual root)
        root: String,
    },
}

pub(crate) fn split_bucket_prefix(uri: &str) -> Result<(String, String), String> {
    // Accept formats: s3://bucket, s3://bucket/prefix, gcs://bucket/prefix
    match uri.split_once("://") {
        Some((_, rest)) => {
            let (bucket, prefix) = rest.split_once('/').unwrap_or((rest, ""));
            if bucket.is_empty() {
                return Err(format!("invalid uri, missing bucket: {}", uri));
            }
            Ok((bucket.to_string(), normalize_prefix(prefix)))
        }
        // No scheme: the whole string is the bucket
        None => Ok((uri.to_string(), String::new())),
    }
}

pub(crate) fn split_fs_root(uri_or_path: &str) -> String {
    uri_or_path
        .strip_prefix("file://")
        .unwrap_or(uri_or_path)
        .to_string()
}

pub(crate) fn normalize_prefix(p: &str) -> String {
    p.trim_matches('/').to_string()
}
