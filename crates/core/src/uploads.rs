//! Upload acceptance rules and stored-file naming.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default per-file size limit (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum number of files accepted by a multi-file upload.
pub const MAX_FILES_PER_REQUEST: usize = 10;

/// MIME types accepted when `ALLOWED_FILE_TYPES` is not configured.
pub const DEFAULT_ALLOWED_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "application/pdf",
    "text/plain",
];

/// Multipart field name for single-file uploads.
pub const SINGLE_FILE_FIELD: &str = "file";

/// Multipart field name for multi-file uploads.
pub const MULTI_FILE_FIELD: &str = "files";

static SAFE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("static regex is valid"));

static SAFE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{1,16}$").expect("static regex is valid"));

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

/// Why an upload was refused. All variants are caller-correctable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("No file uploaded")]
    NoFile,

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("File size exceeds limit of {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("Too many files: at most {max} allowed")]
    TooManyFiles { max: usize },

    #[error("Unexpected file field '{0}'")]
    UnexpectedField(String),
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Size and type limits applied to every uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_file_size: u64,
    pub allowed_types: Vec<String>,
    pub max_files: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect(),
            max_files: MAX_FILES_PER_REQUEST,
        }
    }
}

impl UploadPolicy {
    /// Check one file's declared MIME type and size.
    pub fn check(&self, mimetype: &str, size: u64) -> Result<(), UploadRejection> {
        if !self.allowed_types.iter().any(|t| t.eq_ignore_ascii_case(mimetype)) {
            return Err(UploadRejection::UnsupportedType(mimetype.to_string()));
        }
        if size > self.max_file_size {
            return Err(UploadRejection::TooLarge {
                limit: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Check how many files a multi-file request carried.
    pub fn check_count(&self, count: usize) -> Result<(), UploadRejection> {
        match count {
            0 => Err(UploadRejection::NoFile),
            n if n > self.max_files => Err(UploadRejection::TooManyFiles {
                max: self.max_files,
            }),
            _ => Ok(()),
        }
    }

    /// Request body ceiling for a multi-file upload, with room for multipart framing.
    pub fn body_limit(&self) -> usize {
        let files = self.max_file_size.saturating_mul(self.max_files as u64);
        usize::try_from(files.saturating_add(1024 * 1024)).unwrap_or(usize::MAX)
    }
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

/// Whether `name` may be resolved inside the upload directory.
///
/// Only plain file names are accepted: no separators, no leading dot.
pub fn is_safe_filename(name: &str) -> bool {
    !name.starts_with('.') && name.len() <= 255 && SAFE_NAME.is_match(name)
}

/// Extension of the client-supplied name, if it is a plain alphanumeric one.
pub fn extension_of(original_name: &str) -> Option<String> {
    let (_, ext) = original_name.rsplit_once('.')?;
    SAFE_EXTENSION
        .is_match(ext)
        .then(|| ext.to_ascii_lowercase())
}

/// Name under which an upload is stored: `{field}-{millis}-{suffix}[.ext]`.
///
/// The client-supplied name only contributes its extension.
pub fn stored_name(field: &str, original_name: &str, unix_millis: i64, suffix: u32) -> String {
    let field = if is_safe_filename(field) { field } else { "file" };
    match extension_of(original_name) {
        Some(ext) => format!("{field}-{unix_millis}-{suffix}.{ext}"),
        None => format!("{field}-{unix_millis}-{suffix}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn default_policy_accepts_listed_types() {
        let policy = UploadPolicy::default();
        assert!(policy.check("image/png", 10).is_ok());
        assert!(policy.check("TEXT/PLAIN", 10).is_ok());
    }

    #[test]
    fn unlisted_type_is_rejected() {
        let policy = UploadPolicy::default();
        assert_matches!(
            policy.check("application/x-msdownload", 10),
            Err(UploadRejection::UnsupportedType(t)) if t == "application/x-msdownload"
        );
    }

    #[test]
    fn size_limit_is_inclusive() {
        let policy = UploadPolicy {
            max_file_size: 100,
            ..UploadPolicy::default()
        };
        assert!(policy.check("text/plain", 100).is_ok());
        assert_matches!(
            policy.check("text/plain", 101),
            Err(UploadRejection::TooLarge { limit: 100 })
        );
    }

    #[test]
    fn file_count_bounds() {
        let policy = UploadPolicy::default();
        assert_matches!(policy.check_count(0), Err(UploadRejection::NoFile));
        assert!(policy.check_count(1).is_ok());
        assert!(policy.check_count(10).is_ok());
        assert_matches!(
            policy.check_count(11),
            Err(UploadRejection::TooManyFiles { max: 10 })
        );
    }

    #[test]
    fn safe_filename_rejects_traversal() {
        assert!(is_safe_filename("file-1700000000000-42.png"));
        assert!(!is_safe_filename("../etc/passwd"));
        assert!(!is_safe_filename("a/b.txt"));
        assert!(!is_safe_filename(".env"));
        assert!(!is_safe_filename(""));
        assert!(!is_safe_filename("with space.txt"));
    }

    #[test]
    fn stored_name_keeps_only_a_clean_extension() {
        assert_eq!(
            stored_name("file", "Report.PDF", 1_700_000_000_000, 7),
            "file-1700000000000-7.pdf"
        );
        assert_eq!(
            stored_name("files", "no_extension", 1, 2),
            "files-1-2"
        );
        assert_eq!(
            stored_name("file", "evil.p/hp", 1, 2),
            "file-1-2"
        );
    }
}
