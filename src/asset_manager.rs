use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{info, warn};
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Assets not downloaded: {0}")]
    NotDownloaded(String),
    #[error("Download error: {0}")]
    DownloadError(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Asset verification failed")]
    VerificationFailed,
    #[error("Hash mismatch: expected {expected}, got {actual} for {file_type} file")]
    HashMismatch {
        file_type: String,
        expected: String,
        actual: String,
    },
}

/// Describes a classifier's remote artifacts: the ONNX model and the
/// vocabulary JSON it was trained with, each pinned to a SHA-256 digest.
#[derive(Debug, Clone)]
pub struct AssetSource {
    /// Cache subdirectory name for this model/vocabulary pair
    pub name: String,
    pub model_url: String,
    pub model_hash: String,
    pub vocabulary_url: String,
    pub vocabulary_hash: String,
}

/// Downloads, caches, and verifies classifier assets.
///
/// Assets live under a per-user cache directory (overridable with the
/// `AMARANTH_CACHE` environment variable) and are verified against their
/// pinned hashes both before reuse and after download.
#[derive(Clone)]
pub struct AssetManager {
    assets_dir: PathBuf,
    download_lock: Arc<Mutex<()>>,
}

impl AssetManager {
    /// Creates a new AssetManager rooted at the default cache directory
    pub fn new_default() -> io::Result<Self> {
        Self::new(Self::default_assets_dir())
    }

    /// Returns the default assets directory path
    pub fn default_assets_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("AMARANTH_CACHE") {
            return PathBuf::from(path).join("assets");
        }

        // 2. Use platform-specific cache directory
        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("amaranth").join("assets");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".cache").join("amaranth").join("assets");
        }

        // 4. If all else fails, use system temp directory (platform agnostic)
        env::temp_dir().join("amaranth").join("assets")
    }

    pub fn new<P: AsRef<Path>>(assets_dir: P) -> io::Result<Self> {
        let assets_dir = assets_dir.as_ref().to_path_buf();
        fs::create_dir_all(&assets_dir)?;
        Ok(Self {
            assets_dir,
            download_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn model_path(&self, source: &AssetSource) -> PathBuf {
        self.assets_dir.join(&source.name).join("model.onnx")
    }

    pub fn vocabulary_path(&self, source: &AssetSource) -> PathBuf {
        self.assets_dir.join(&source.name).join("vocabulary.json")
    }

    pub fn is_downloaded(&self, source: &AssetSource) -> bool {
        self.model_path(source).exists() && self.vocabulary_path(source).exists()
    }

    /// Downloads both assets, verifying existing files first and keeping
    /// them when their hashes still match. Partial downloads are cleaned up.
    pub async fn download(&self, source: &AssetSource) -> Result<(), AssetError> {
        let _lock = self.download_lock.lock().await;

        let asset_dir = self.assets_dir.join(&source.name);
        fs::create_dir_all(&asset_dir)?;

        let model_result = self
            .fetch_if_needed(
                &source.model_url,
                &self.model_path(source),
                &source.model_hash,
                "model",
            )
            .await;
        let vocabulary_result = self
            .fetch_if_needed(
                &source.vocabulary_url,
                &self.vocabulary_path(source),
                &source.vocabulary_hash,
                "vocabulary",
            )
            .await;

        match (model_result, vocabulary_result) {
            (Ok(()), Ok(())) => {
                info!("Model and vocabulary ready to use");
                Ok(())
            }
            (Err(e), _) | (_, Err(e)) => {
                // Cleanup on failure
                let _ = self.remove_download(source);
                Err(e)
            }
        }
    }

    /// Ensures both assets are present and verified, downloading or
    /// re-downloading as needed.
    pub async fn ensure_downloaded(&self, source: &AssetSource) -> Result<(), AssetError> {
        if !self.is_downloaded(source) {
            info!("Assets for {} not found, downloading...", source.name);
            return self.download(source).await;
        }

        if !self.verify(source)? {
            warn!("Asset verification failed for {}, re-downloading", source.name);
            self.remove_download(source)?;
            return self.download(source).await;
        }

        Ok(())
    }

    /// Checks both cached assets against their pinned hashes.
    pub fn verify(&self, source: &AssetSource) -> Result<bool, AssetError> {
        let model_path = self.model_path(source);
        let vocabulary_path = self.vocabulary_path(source);

        if !model_path.exists() || !vocabulary_path.exists() {
            return Ok(false);
        }

        Ok(self.verify_file(&model_path, &source.model_hash)?
            && self.verify_file(&vocabulary_path, &source.vocabulary_hash)?)
    }

    pub fn remove_download(&self, source: &AssetSource) -> Result<(), AssetError> {
        for path in [self.model_path(source), self.vocabulary_path(source)] {
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    fn verify_file(&self, path: &Path, expected_hash: &str) -> Result<bool, AssetError> {
        let bytes = fs::read(path)?;
        Ok(Self::sha256_hex(&bytes) == expected_hash)
    }

    fn sha256_hex(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        format!("{:x}", hasher.finalize())
    }

    async fn fetch_if_needed(
        &self,
        url: &str,
        path: &Path,
        expected_hash: &str,
        file_type: &str,
    ) -> Result<(), AssetError> {
        if path.exists() {
            if self.verify_file(path, expected_hash)? {
                info!("Existing {} file verified, keeping {:?}", file_type, path);
                return Ok(());
            }
            warn!("{} file at {:?} failed verification, redownloading", file_type, path);
        }

        info!("Downloading {} file from {} to {:?}", file_type, url, path);
        let response = reqwest::get(url).await?;
        let bytes = response.bytes().await?;

        let hash = Self::sha256_hex(&bytes);
        if hash != expected_hash {
            return Err(AssetError::HashMismatch {
                file_type: file_type.to_string(),
                expected: expected_hash.to_string(),
                actual: hash,
            });
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &bytes)?;

        // Verify after writing
        if !self.verify_file(path, expected_hash)? {
            return Err(AssetError::VerificationFailed);
        }

        info!("{} file downloaded and verified", file_type);
        Ok(())
    }
}
