//! Local artifact store.
//!
//! Layout: one metadata JSON file and one mp4 blob per fingerprint, both
//! named by the fingerprint itself. Every externally supplied name is
//! validated against the fingerprint format before any path is built, so the
//! store can never be asked to touch a file outside its root.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use roast_models::{CachedArtifact, Fingerprint};

use crate::error::{StorageError, StorageResult};

const VIDEO_EXTENSION: &str = "mp4";
const META_EXTENSION: &str = "json";

/// Configuration for the artifact store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding artifacts and blobs
    pub root: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(".data/roasts"),
        }
    }
}

impl StoreConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            root: std::env::var("ROAST_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".data/roasts")),
        }
    }
}

/// Fingerprint-keyed store for cached artifacts and their video blobs.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Create a new store rooted at the configured directory.
    pub fn new(config: StoreConfig) -> Self {
        Self { root: config.root }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self::new(StoreConfig::from_env())
    }

    /// Read the cached artifact for a fingerprint.
    ///
    /// Returns `None` for a missing entry, and also degrades read I/O or
    /// decode failures to a miss so a damaged cache entry triggers
    /// regeneration instead of failing the request.
    pub async fn read_artifact(&self, fingerprint: &Fingerprint) -> Option<CachedArtifact> {
        let path = self.meta_path(fingerprint);

        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(fingerprint = %fingerprint, "Artifact read failed, treating as miss: {}", e);
                return None;
            }
        };

        match serde_json::from_slice::<CachedArtifact>(&raw) {
            Ok(artifact) => {
                debug!(fingerprint = %fingerprint, "Artifact cache hit");
                Some(artifact)
            }
            Err(e) => {
                warn!(fingerprint = %fingerprint, "Artifact decode failed, treating as miss: {}", e);
                None
            }
        }
    }

    /// Persist an artifact.
    ///
    /// The write is atomic (temp file + rename) so readers never observe a
    /// torn entry. Write failures are surfaced to the caller.
    pub async fn write_artifact(&self, artifact: &CachedArtifact) -> StorageResult<()> {
        self.ensure_root().await?;

        let path = self.meta_path(&artifact.fingerprint);
        let tmp_path = path.with_extension(format!("{}.tmp", META_EXTENSION));

        let payload = serde_json::to_vec_pretty(artifact)?;
        tokio::fs::write(&tmp_path, &payload).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        debug!(fingerprint = %artifact.fingerprint, "Artifact persisted");
        Ok(())
    }

    /// Store a video blob and return its serving URL.
    ///
    /// An already-present blob for the fingerprint is left untouched.
    pub async fn save_video(&self, bytes: &[u8], fingerprint: &Fingerprint) -> StorageResult<String> {
        self.ensure_root().await?;

        let file_name = video_file_name(fingerprint);
        let path = self.root.join(&file_name);

        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            debug!(fingerprint = %fingerprint, "Video blob already stored");
        } else {
            tokio::fs::write(&path, bytes)
                .await
                .map_err(|e| StorageError::write_failed(format!("{}: {}", path.display(), e)))?;
        }

        Ok(format!("/roasts/{}", file_name))
    }

    /// Read a video blob by its externally supplied file name.
    ///
    /// The name is validated against `{fingerprint}.mp4` before any path is
    /// built; anything else is rejected without touching the filesystem.
    pub async fn read_video(&self, file_name: &str) -> StorageResult<Vec<u8>> {
        let path = self.resolve_video_path(file_name)?;

        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::not_found(file_name.to_string())
            } else {
                e.into()
            }
        })
    }

    /// Delete all cached entries and blobs. Returns the number of files
    /// removed.
    pub async fn clear_all(&self) -> StorageResult<u64> {
        let mut removed = 0;

        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_store_file = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext == VIDEO_EXTENSION || ext == META_EXTENSION)
                .unwrap_or(false);

            if is_store_file {
                tokio::fs::remove_file(&path).await?;
                removed += 1;
            }
        }

        debug!(removed, "Cache cleared");
        Ok(removed)
    }

    /// Validate an external video file name and resolve it inside the root.
    fn resolve_video_path(&self, file_name: &str) -> StorageResult<PathBuf> {
        let stem = file_name
            .strip_suffix(&format!(".{}", VIDEO_EXTENSION))
            .ok_or_else(|| StorageError::invalid_key(file_name.to_string()))?;

        let fingerprint = Fingerprint::parse(stem)
            .ok_or_else(|| StorageError::invalid_key(file_name.to_string()))?;

        let path = self.root.join(video_file_name(&fingerprint));

        // The fingerprint format already excludes separators; keep an
        // explicit containment check as a second line of defense.
        if path.parent() != Some(self.root.as_path()) {
            return Err(StorageError::invalid_key(file_name.to_string()));
        }

        Ok(path)
    }

    fn meta_path(&self, fingerprint: &Fingerprint) -> PathBuf {
        self.root
            .join(format!("{}.{}", fingerprint, META_EXTENSION))
    }

    async fn ensure_root(&self) -> StorageResult<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Store root, exposed for tests.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Blob file name for a fingerprint.
pub fn video_file_name(fingerprint: &Fingerprint) -> String {
    format!("{}.{}", fingerprint, VIDEO_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn store() -> (tempfile::TempDir, ArtifactStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(StoreConfig {
            root: dir.path().to_path_buf(),
        });
        (dir, store)
    }

    fn fingerprint(seed: char) -> Fingerprint {
        Fingerprint::parse(&seed.to_string().repeat(64)).unwrap()
    }

    fn artifact(fp: &Fingerprint) -> CachedArtifact {
        CachedArtifact {
            fingerprint: fp.clone(),
            script: "Hook\nPunchline".to_string(),
            caption: "the caption".to_string(),
            duration_seconds: 12,
            video_url: format!("/roasts/{}.mp4", fp),
            srt: "1\n00:00:00,000 --> 00:00:01,000\nHook\n".to_string(),
            video_prompt: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_artifact_round_trip() {
        let (_dir, store) = store();
        let fp = fingerprint('a');

        assert!(store.read_artifact(&fp).await.is_none());

        store.write_artifact(&artifact(&fp)).await.unwrap();

        let loaded = store.read_artifact(&fp).await.unwrap();
        assert_eq!(loaded.script, "Hook\nPunchline");
        assert_eq!(loaded.fingerprint, fp);
    }

    #[tokio::test]
    async fn test_corrupt_artifact_reads_as_miss() {
        let (_dir, store) = store();
        let fp = fingerprint('b');

        tokio::fs::create_dir_all(store.root()).await.unwrap();
        tokio::fs::write(store.root().join(format!("{}.json", fp)), b"not json")
            .await
            .unwrap();

        assert!(store.read_artifact(&fp).await.is_none());
    }

    #[tokio::test]
    async fn test_save_and_read_video() {
        let (_dir, store) = store();
        let fp = fingerprint('c');

        let url = store.save_video(b"mp4 bytes", &fp).await.unwrap();
        assert_eq!(url, format!("/roasts/{}.mp4", fp));

        let bytes = store.read_video(&format!("{}.mp4", fp)).await.unwrap();
        assert_eq!(bytes, b"mp4 bytes");
    }

    #[tokio::test]
    async fn test_existing_video_blob_is_not_overwritten() {
        let (_dir, store) = store();
        let fp = fingerprint('d');

        store.save_video(b"first", &fp).await.unwrap();
        store.save_video(b"second", &fp).await.unwrap();

        let bytes = store.read_video(&format!("{}.mp4", fp)).await.unwrap();
        assert_eq!(bytes, b"first");
    }

    #[tokio::test]
    async fn test_invalid_file_names_rejected_before_io() {
        let (_dir, store) = store();

        for name in [
            "short.mp4",
            "../escape.mp4",
            &format!("{}.json", "a".repeat(64)),
            &format!("{}.mp4.bak", "a".repeat(64)),
            "no-extension",
        ] {
            let err = store.read_video(name).await.unwrap_err();
            assert!(
                matches!(err, StorageError::InvalidKey(_)),
                "expected InvalidKey for {name}, got {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_missing_video_is_not_found() {
        let (_dir, store) = store();
        let err = store
            .read_video(&format!("{}.mp4", "e".repeat(64)))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_clear_all_counts_removed_files() {
        let (_dir, store) = store();
        let fp = fingerprint('f');

        store.write_artifact(&artifact(&fp)).await.unwrap();
        store.save_video(b"bytes", &fp).await.unwrap();

        assert_eq!(store.clear_all().await.unwrap(), 2);
        assert_eq!(store.clear_all().await.unwrap(), 0);
        assert!(store.read_artifact(&fp).await.is_none());
    }
}
