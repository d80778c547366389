//! Blob storage for uploaded files.
//!
//! [`BlobStore`] is the seam the upload and file handlers talk to;
//! [`LocalFileStore`] keeps files in a single flat directory on disk.

use std::path::PathBuf;
use std::time::SystemTime;

use async_trait::async_trait;
use serde::Serialize;

use crate::types::Timestamp;
use crate::uploads::{is_safe_filename, stored_name};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Client-supplied facts about an upload.
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Multipart field the file arrived in.
    pub field: String,
    pub original_name: String,
    pub mimetype: String,
}

/// Handle returned after a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub filename: String,
    pub original_name: String,
    pub size: u64,
    pub mimetype: String,
    pub path: String,
}

/// One entry of the upload directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    pub created: Timestamp,
    pub modified: Timestamp,
    pub is_directory: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist `bytes` under a freshly generated name.
    async fn save(&self, bytes: &[u8], metadata: FileMetadata) -> Result<StoredFile, FileStoreError>;

    /// All entries currently stored, sorted by name.
    async fn list(&self) -> Result<Vec<FileEntry>, FileStoreError>;

    /// Read a stored file back by name.
    async fn open(&self, name: &str) -> Result<Vec<u8>, FileStoreError>;
}

// ---------------------------------------------------------------------------
// Local directory implementation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn ensure_root(&self) -> Result<(), FileStoreError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }
}

#[async_trait]
impl BlobStore for LocalFileStore {
    async fn save(&self, bytes: &[u8], metadata: FileMetadata) -> Result<StoredFile, FileStoreError> {
        self.ensure_root().await?;

        let millis = chrono::Utc::now().timestamp_millis();
        let suffix = (uuid::Uuid::new_v4().as_u128() % 1_000_000_000) as u32;
        let filename = stored_name(&metadata.field, &metadata.original_name, millis, suffix);
        let path = self.root.join(&filename);

        tokio::fs::write(&path, bytes).await?;

        Ok(StoredFile {
            filename,
            original_name: metadata.original_name,
            size: bytes.len() as u64,
            mimetype: metadata.mimetype,
            path: path.to_string_lossy().into_owned(),
        })
    }

    async fn list(&self) -> Result<Vec<FileEntry>, FileStoreError> {
        self.ensure_root().await?;

        let mut entries = Vec::new();
        let mut dir = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = dir.next_entry().await? {
            let meta = entry.metadata().await?;
            let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            // Not every filesystem records birth time.
            let created = meta.created().unwrap_or(modified);
            entries.push(FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                size: meta.len(),
                created: created.into(),
                modified: modified.into(),
                is_directory: meta.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn open(&self, name: &str) -> Result<Vec<u8>, FileStoreError> {
        if !is_safe_filename(name) {
            return Err(FileStoreError::InvalidName(name.to_string()));
        }
        let path = self.root.join(name);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(tokio::fs::read(&path).await?),
            Ok(_) => Err(FileStoreError::NotFound(name.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FileStoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
