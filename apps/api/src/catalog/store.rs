//! Theme storage backends.
//!
//! The catalog only needs two capabilities from storage: fetch the raw bytes
//! stored for an id, and enumerate the ids that exist. `ThemeStore` is that
//! seam; `AppState` carries it as `Arc<dyn ThemeStore>`.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::catalog::error::CatalogError;

const THEME_EXTENSION: &str = "json";

/// Byte retrieval by theme id plus id enumeration.
#[async_trait]
pub trait ThemeStore: Send + Sync {
    /// Returns the raw record for `theme_id`, or `None` if no such theme exists.
    async fn get(&self, theme_id: &str) -> Result<Option<Bytes>, CatalogError>;

    /// Returns every theme id the store knows about, sorted.
    async fn list_ids(&self) -> Result<Vec<String>, CatalogError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

/// Theme ids become file names and object keys, so only a conservative
/// alphabet is accepted. Anything else is treated as unknown.
pub fn is_valid_theme_id(theme_id: &str) -> bool {
    !theme_id.is_empty()
        && theme_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

// ────────────────────────────────────────────────────────────────────────────
// Local filesystem
// ────────────────────────────────────────────────────────────────────────────

/// Reads `<dir>/<id>.json`.
pub struct FsThemeStore {
    dir: PathBuf,
}

impl FsThemeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, theme_id: &str) -> PathBuf {
        self.dir.join(format!("{theme_id}.{THEME_EXTENSION}"))
    }
}

#[async_trait]
impl ThemeStore for FsThemeStore {
    async fn get(&self, theme_id: &str) -> Result<Option<Bytes>, CatalogError> {
        if !is_valid_theme_id(theme_id) {
            return Ok(None);
        }
        let path = self.path_for(theme_id);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Theme file not found");
                Ok(None)
            }
            Err(e) => Err(CatalogError::Storage(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    async fn list_ids(&self) -> Result<Vec<String>, CatalogError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(CatalogError::Storage(format!(
                    "failed to list {}: {e}",
                    self.dir.display()
                )))
            }
        };

        let mut ids = Vec::new();
        loop {
            let entry = entries.next_entry().await.map_err(|e| {
                CatalogError::Storage(format!("failed to list {}: {e}", self.dir.display()))
            })?;
            let Some(entry) = entry else { break };
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(THEME_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if is_valid_theme_id(stem) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn backend(&self) -> &'static str {
        "fs"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// S3 / MinIO
// ────────────────────────────────────────────────────────────────────────────

/// Reads `<prefix><id>.json` from a bucket.
pub struct S3ThemeStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    prefix: String,
}

impl S3ThemeStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, prefix: String) -> Self {
        Self {
            client,
            bucket,
            prefix,
        }
    }

    fn key_for(&self, theme_id: &str) -> String {
        format!("{}{theme_id}.{THEME_EXTENSION}", self.prefix)
    }
}

#[async_trait]
impl ThemeStore for S3ThemeStore {
    async fn get(&self, theme_id: &str) -> Result<Option<Bytes>, CatalogError> {
        if !is_valid_theme_id(theme_id) {
            return Ok(None);
        }
        let key = self.key_for(theme_id);
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    debug!(bucket = %self.bucket, key = %key, "Theme object not found");
                    return Ok(None);
                }
                return Err(CatalogError::Storage(format!(
                    "failed to fetch s3://{}/{key}: {e}",
                    self.bucket
                )));
            }
        };

        let data = output.body.collect().await.map_err(|e| {
            CatalogError::Storage(format!("failed to read s3://{}/{key}: {e}", self.bucket))
        })?;
        Ok(Some(data.into_bytes()))
    }

    async fn list_ids(&self) -> Result<Vec<String>, CatalogError> {
        let mut ids = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let page = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(&self.prefix)
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(|e| {
                    CatalogError::Storage(format!(
                        "failed to list s3://{}/{}: {e}",
                        self.bucket, self.prefix
                    ))
                })?;

            for object in page.contents() {
                if let Some(id) = object.key().and_then(|key| id_from_key(&self.prefix, key)) {
                    ids.push(id);
                }
            }

            match page.next_continuation_token() {
                Some(token) if page.is_truncated().unwrap_or(false) => {
                    continuation = Some(token.to_string());
                }
                _ => break,
            }
        }

        ids.sort();
        Ok(ids)
    }

    fn backend(&self) -> &'static str {
        "s3"
    }
}

/// Maps `themes/office.json` back to `office`. Nested keys are ignored.
fn id_from_key(prefix: &str, key: &str) -> Option<String> {
    let name = key.strip_prefix(prefix)?;
    let stem = name.strip_suffix(&format!(".{THEME_EXTENSION}"))?;
    is_valid_theme_id(stem).then(|| stem.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory (tests)
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod memory {
    use std::collections::BTreeMap;

    use super::*;

    /// Fixed map of id → raw bytes.
    #[derive(Default)]
    pub struct MemoryThemeStore {
        records: BTreeMap<String, Bytes>,
    }

    impl MemoryThemeStore {
        pub fn with(mut self, theme_id: &str, record: serde_json::Value) -> Self {
            self.records
                .insert(theme_id.to_string(), Bytes::from(record.to_string()));
            self
        }

        pub fn with_raw(mut self, theme_id: &str, raw: &'static [u8]) -> Self {
            self.records
                .insert(theme_id.to_string(), Bytes::from_static(raw));
            self
        }
    }

    #[async_trait]
    impl ThemeStore for MemoryThemeStore {
        async fn get(&self, theme_id: &str) -> Result<Option<Bytes>, CatalogError> {
            Ok(self.records.get(theme_id).cloned())
        }

        async fn list_ids(&self) -> Result<Vec<String>, CatalogError> {
            Ok(self.records.keys().cloned().collect())
        }

        fn backend(&self) -> &'static str {
            "memory"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_id_alphabet() {
        assert!(is_valid_theme_id("office-meeting_2"));
        assert!(!is_valid_theme_id(""));
        assert!(!is_valid_theme_id("../etc/passwd"));
        assert!(!is_valid_theme_id("a/b"));
        assert!(!is_valid_theme_id("dot.json"));
    }

    #[test]
    fn test_id_from_key() {
        assert_eq!(
            id_from_key("themes/", "themes/office.json"),
            Some("office".to_string())
        );
        assert_eq!(id_from_key("themes/", "themes/office.txt"), None);
        assert_eq!(id_from_key("themes/", "themes/nested/office.json"), None);
        assert_eq!(id_from_key("themes/", "other/office.json"), None);
    }

    #[tokio::test]
    async fn test_fs_store_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("office.json"), b"{\"title\":\"Office\"}").unwrap();

        let store = FsThemeStore::new(dir.path());
        let bytes = store.get("office").await.unwrap().unwrap();
        assert_eq!(&bytes[..], b"{\"title\":\"Office\"}");
    }

    #[tokio::test]
    async fn test_fs_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsThemeStore::new(dir.path());
        assert!(store.get("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fs_store_rejects_traversal_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsThemeStore::new(dir.path().join("themes"));
        std::fs::write(dir.path().join("secret.json"), b"{}").unwrap();
        assert!(store.get("../secret").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fs_store_lists_json_stems_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("zoo.json"), b"{}").unwrap();
        std::fs::write(dir.path().join("alpha.json"), b"{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let store = FsThemeStore::new(dir.path());
        assert_eq!(store.list_ids().await.unwrap(), vec!["alpha", "zoo"]);
    }

    #[tokio::test]
    async fn test_fs_store_missing_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsThemeStore::new(dir.path().join("absent"));
        assert!(store.list_ids().await.unwrap().is_empty());
    }
}
