use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::error::{Error, Result};

const ALLOWED_EXTENSIONS: [&str; 9] = ["pdf", "doc", "docx", "txt", "rtf", "jpg", "jpeg", "png", "webp"];

/// A file received from a multipart upload, buffered in memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: bytes::Bytes,
}

/// Folder under the uploads root a file is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Cvs,
    Documents,
}

impl FileCategory {
    pub fn dir_name(&self) -> &'static str {
        match self {
            FileCategory::Cvs => "cvs",
            FileCategory::Documents => "documents",
        }
    }
}

/// Local-disk storage for uploaded files. Stored paths are relative to the
/// root and are served under `/files/`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub async fn store(&self, category: FileCategory, file: &UploadedFile) -> Result<String> {
        self.save(category, &file.filename, &file.data).await
    }

    pub async fn save(&self, category: FileCategory, filename: &str, data: &[u8]) -> Result<String> {
        if data.is_empty() {
            return Err(Error::BadRequest("Uploaded file is empty".into()));
        }
        let ext = check_content(filename, data)?;

        let dir = self.root.join(category.dir_name());
        fs::create_dir_all(&dir).await?;

        let stored_name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(filename, &ext));
        fs::write(dir.join(&stored_name), data).await.map_err(|e| {
            tracing::error!("Failed to write upload {}: {}", stored_name, e);
            Error::Internal(format!("Failed to save file: {}", e))
        })?;

        Ok(format!("{}/{}", category.dir_name(), stored_name))
    }
}

fn check_content(filename: &str, data: &[u8]) -> Result<String> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(Error::BadRequest(format!("File type .{} is not allowed", ext)));
    }
    if ext == "pdf" && !data.starts_with(b"%PDF") {
        return Err(Error::BadRequest("Invalid PDF file content".into()));
    }
    if (ext == "jpg" || ext == "jpeg") && !data.starts_with(&[0xFF, 0xD8]) {
        return Err(Error::BadRequest("Invalid JPEG file content".into()));
    }
    if ext == "png" && !data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Err(Error::BadRequest("Invalid PNG file content".into()));
    }
    Ok(ext)
}

fn sanitize_filename(filename: &str, ext: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("upload");
    let cleaned: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .take(80)
        .collect();
    let cleaned = if cleaned.is_empty() { "upload".to_string() } else { cleaned };
    format!("{}.{}", cleaned, ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_under_category_with_unique_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        let path = storage
            .save(FileCategory::Documents, "../../ID card.pdf", b"%PDF-1.4 test")
            .await
            .unwrap();

        assert!(path.starts_with("documents/"));
        assert!(path.ends_with("_ID_card.pdf"));
        assert!(dir.path().join(&path).exists());
    }

    #[tokio::test]
    async fn rejects_disallowed_and_mismatched_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let exe = storage.save(FileCategory::Cvs, "cv.exe", b"MZ").await;
        assert!(matches!(exe, Err(Error::BadRequest(_))));

        let fake_pdf = storage.save(FileCategory::Cvs, "cv.pdf", b"hello").await;
        assert!(matches!(fake_pdf, Err(Error::BadRequest(_))));

        let empty = storage.save(FileCategory::Cvs, "cv.txt", b"").await;
        assert!(matches!(empty, Err(Error::BadRequest(_))));
    }
}
